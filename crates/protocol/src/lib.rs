//! Deterministic protocol core for the epoch choice pipeline.
//!
//! Everything in this crate is pure and synchronous: seed derivation, card
//! selection, and choice accumulation are all deterministic functions of
//! their inputs so that a player cannot re-roll for a more favorable card
//! sequence and a session can always be reproduced from its inputs.
//!
//! Asynchronous concerns (chain reads, proving, submission) live in the
//! `runtime` crate; witness assembly and ciphertext handling live in `zk`.

pub mod cards;
pub mod choices;
pub mod epoch;
pub mod hash;
pub mod identity;
pub mod seed;

pub use cards::{Card, CardSet, Corpus, CorpusError, SelectError, select_cards};
pub use choices::{ChoiceAccumulator, ChoiceError, StatState};
pub use epoch::EpochContext;
pub use identity::PlayerIdentity;
pub use seed::{Seed, derive_seed};

/// Number of cards presented (and sworn to) per epoch session.
///
/// Fixed by the circuit shape; the proving engine accepts exactly this many
/// encoded choices.
pub const CARD_COUNT: usize = 5;

/// Number of stat dimensions accumulated and encrypted per session.
pub const STAT_COUNT: usize = 3;

/// BN254 scalar field, which is also the Baby Jubjub base field.
///
/// Seeds, commitments, and epoch randomness are elements of this field.
pub type Fq = ark_bn254::Fr;

/// Baby Jubjub scalar field. Private keys and ElGamal randomness live here.
pub type JubjubScalar = ark_ed_on_bn254::Fr;

/// Affine Baby Jubjub point. Public keys and ciphertext components.
pub type CurvePoint = ark_ed_on_bn254::EdwardsAffine;
