//! Witness assembly and proving-engine interface.
//!
//! This crate covers the cryptographic half of a session: turning a complete
//! choice sequence into a [`Witness`], and handing that witness to a
//! [`ProofEngine`] that checks it against the circuit and produces a proof
//! plus the public ElGamal-encrypted stat totals.
//!
//! The production proving engine is an external capability consumed through
//! the [`ProofEngine`] trait; [`LocalProver`] is a native reference engine
//! for development and tests. It produces real ciphertexts but no sound
//! proof.

pub mod elgamal;
pub mod prover;
pub mod witness;

pub use elgamal::{CiphertextPair, decrypt_to_point, encrypt};
pub use prover::{LocalProver, Proof, ProofEngine, ProofError, PublicOutputs};
pub use witness::{ELGAMAL_RANDOMNESS_COUNT, Witness, WitnessError, build_witness};
