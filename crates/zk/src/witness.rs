//! Witness assembly for one proving attempt.
//!
//! A witness is ephemeral: it exists for exactly one proving attempt and the
//! ElGamal randomness inside it is sampled fresh on every build. Reusing
//! randomness across attempts would let an observer link ciphertexts, so
//! the scalars are never cached — this is a hard invariant, not an
//! optimization target.

use ark_std::UniformRand;
use ark_std::rand::RngCore;

use protocol::{
    CARD_COUNT, ChoiceAccumulator, CurvePoint, EpochContext, Fq, JubjubScalar, PlayerIdentity,
    STAT_COUNT, StatState,
};

/// Number of ElGamal randomness scalars the circuit consumes per witness.
pub const ELGAMAL_RANDOMNESS_COUNT: usize = 4;

/// Errors raised during witness assembly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WitnessError {
    #[error("session not ready for proving: {recorded}/{required} choices recorded")]
    NotReady { recorded: usize, required: usize },
}

/// The full private and public input set for one proof.
pub struct Witness {
    /// Player ElGamal public key.
    pub public_key: CurvePoint,

    /// World ElGamal public key the stat ciphertexts are produced under.
    pub world_public_key: CurvePoint,

    /// Fresh randomness for the stat encryptions, sampled per attempt.
    pub elgamal_randomness: [JubjubScalar; ELGAMAL_RANDOMNESS_COUNT],

    /// Epoch randomness the seed was derived from (public input).
    pub epoch_randomness: Fq,

    /// Commitment to the private scalar (public input).
    pub commitment: Fq,

    /// The private scalar; the circuit re-derives the commitment from it.
    pub private_scalar: JubjubScalar,

    /// Choices in circuit polarity: yes swipes encode to 0, no swipes to 1.
    pub encoded_choices: [u8; CARD_COUNT],

    /// Claimed stat totals; the circuit constrains these against the
    /// choices and encrypts them into the public outputs.
    pub stat_totals: StatState,
}

impl core::fmt::Debug for Witness {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Witness")
            .field("public_key", &self.public_key)
            .field("world_public_key", &self.world_public_key)
            .field("elgamal_randomness", &"<redacted>")
            .field("epoch_randomness", &self.epoch_randomness)
            .field("commitment", &self.commitment)
            .field("private_scalar", &"<redacted>")
            .field("encoded_choices", &self.encoded_choices)
            .field("stat_totals", &self.stat_totals)
            .finish()
    }
}

/// Assemble a witness from a completed session.
///
/// Fails with [`WitnessError::NotReady`] unless every card has been
/// answered. Samples all [`ELGAMAL_RANDOMNESS_COUNT`] encryption scalars
/// from the given RNG on each call.
pub fn build_witness<R: RngCore>(
    identity: &PlayerIdentity,
    epoch: &EpochContext,
    accumulator: &ChoiceAccumulator,
    rng: &mut R,
) -> Result<Witness, WitnessError> {
    let choices = accumulator.choices();
    if choices.len() != CARD_COUNT {
        return Err(WitnessError::NotReady {
            recorded: choices.len(),
            required: CARD_COUNT,
        });
    }

    let mut encoded_choices = [0u8; CARD_COUNT];
    for (slot, &yes) in encoded_choices.iter_mut().zip(choices) {
        *slot = if yes { 0 } else { 1 };
    }

    let elgamal_randomness = core::array::from_fn(|_| JubjubScalar::rand(rng));

    Ok(Witness {
        public_key: *identity.public_key(),
        world_public_key: epoch.world_public_key,
        elgamal_randomness,
        epoch_randomness: epoch.epoch_randomness,
        commitment: identity.commitment(),
        private_scalar: *identity.private_scalar(),
        encoded_choices,
        stat_totals: accumulator.stats(),
    })
}

// STAT_COUNT ciphertexts are produced from ELGAMAL_RANDOMNESS_COUNT scalars;
// the circuit shape reserves the surplus scalars.
const _: () = assert!(STAT_COUNT <= ELGAMAL_RANDOMNESS_COUNT);

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::AffineRepr;
    use protocol::{Card, Corpus, derive_seed, select_cards};

    fn session() -> (PlayerIdentity, EpochContext, ChoiceAccumulator) {
        let identity = PlayerIdentity::from_scalar(JubjubScalar::from(21u64));
        let epoch = EpochContext::new(3, Fq::from(17u64), CurvePoint::generator());
        let cards = (0..8)
            .map(|id| Card {
                id,
                stat_deltas: [1, 2, 3],
                prompt: String::new(),
                yes_outcome: String::new(),
                no_outcome: String::new(),
            })
            .collect();
        let corpus = Corpus::new(cards).unwrap();
        let seed = derive_seed(&identity, &epoch);
        let accumulator = ChoiceAccumulator::new(select_cards(seed, &corpus).unwrap());
        (identity, epoch, accumulator)
    }

    #[test]
    fn build_requires_complete_session() {
        let (identity, epoch, mut acc) = session();
        acc.append(true).unwrap();
        let result = build_witness(&identity, &epoch, &acc, &mut rand::thread_rng());
        assert!(matches!(
            result,
            Err(WitnessError::NotReady {
                recorded: 1,
                required: CARD_COUNT
            })
        ));
    }

    #[test]
    fn choices_encode_with_circuit_polarity() {
        let (identity, epoch, mut acc) = session();
        for &yes in &[true, false, true, true, false] {
            acc.append(yes).unwrap();
        }
        let witness = build_witness(&identity, &epoch, &acc, &mut rand::thread_rng()).unwrap();
        assert_eq!(witness.encoded_choices, [0, 1, 0, 0, 1]);
    }

    #[test]
    fn randomness_is_fresh_per_build() {
        let (identity, epoch, mut acc) = session();
        for _ in 0..CARD_COUNT {
            acc.append(true).unwrap();
        }
        let mut rng = rand::thread_rng();
        let a = build_witness(&identity, &epoch, &acc, &mut rng).unwrap();
        let b = build_witness(&identity, &epoch, &acc, &mut rng).unwrap();
        assert_ne!(a.elgamal_randomness, b.elgamal_randomness);
        // Scalars within one witness are sampled independently too.
        assert_ne!(a.elgamal_randomness[0], a.elgamal_randomness[1]);
    }

    #[test]
    fn debug_redacts_secrets() {
        let (identity, epoch, mut acc) = session();
        for _ in 0..CARD_COUNT {
            acc.append(false).unwrap();
        }
        let witness = build_witness(&identity, &epoch, &acc, &mut rand::thread_rng()).unwrap();
        let rendered = format!("{witness:?}");
        assert!(rendered.contains("<redacted>"));
    }
}
