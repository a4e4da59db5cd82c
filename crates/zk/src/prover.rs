//! Proving-engine interface and the native reference engine.

use ark_ff::{BigInteger, PrimeField};
use tracing::debug;

use protocol::{STAT_COUNT, hash};

use crate::elgamal::{CiphertextPair, encrypt};
use crate::witness::Witness;

/// The plaintext-verified public outputs of `execute`: one ciphertext pair
/// per stat dimension.
pub type PublicOutputs = [CiphertextPair; STAT_COUNT];

/// A finished proof with its public outputs.
#[derive(Clone, Debug)]
pub struct Proof {
    /// Opaque proof bytes for the on-chain verifier.
    pub bytes: Vec<u8>,

    /// Encrypted stat totals, submitted alongside the proof.
    pub outputs: PublicOutputs,
}

/// Errors raised by a proving engine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProofError {
    /// The witness violated a circuit constraint. Signals tampering or a
    /// protocol bug; never retryable with the same witness.
    #[error("circuit constraint violation: {0}")]
    ConstraintViolation(String),

    /// Proof generation exceeded the engine's time budget. Retryable.
    #[error("proof generation timed out")]
    Timeout,
}

impl ProofError {
    /// Whether a retry with the same witness may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

/// Interface to the proving engine.
///
/// `execute` is the fast pass: it runs the circuit logic natively and
/// returns the public outputs. `prove` is the expensive full proof
/// generation; callers run it off the hot path (see the runtime's proof
/// task).
pub trait ProofEngine: Send + Sync {
    fn execute(&self, witness: &Witness) -> Result<PublicOutputs, ProofError>;

    fn prove(&self, witness: &Witness) -> Result<Proof, ProofError>;
}

// ============================================================================
// Local Reference Engine
// ============================================================================

/// Native reference engine for development and tests.
///
/// Performs the circuit's constraint checks natively and produces real
/// ElGamal ciphertexts, but the proof bytes are a tagged stub with no
/// cryptographic soundness. The production engine lives outside this
/// workspace and is consumed through [`ProofEngine`].
#[derive(Debug, Clone, Default)]
pub struct LocalProver;

impl LocalProver {
    pub fn new() -> Self {
        Self
    }

    /// Re-derive the identity commitment and check it against the witness.
    fn check_constraints(witness: &Witness) -> Result<(), ProofError> {
        let derived = hash::hash_one(hash::scalar_to_base(&witness.private_scalar));
        if derived != witness.commitment {
            return Err(ProofError::ConstraintViolation(
                "identity commitment does not match private scalar".into(),
            ));
        }
        if witness.encoded_choices.iter().any(|&c| c > 1) {
            return Err(ProofError::ConstraintViolation(
                "encoded choice outside {0, 1}".into(),
            ));
        }
        Ok(())
    }
}

impl ProofEngine for LocalProver {
    fn execute(&self, witness: &Witness) -> Result<PublicOutputs, ProofError> {
        Self::check_constraints(witness)?;

        let outputs = core::array::from_fn(|i| {
            encrypt(
                witness.stat_totals.0[i],
                &witness.elgamal_randomness[i],
                &witness.world_public_key,
            )
        });
        debug!(stats = ?witness.stat_totals, "executed witness");
        Ok(outputs)
    }

    fn prove(&self, witness: &Witness) -> Result<Proof, ProofError> {
        let outputs = self.execute(witness)?;

        // Tagged stub bytes: commitment binds the stub to the witness so
        // tests can tell proofs apart.
        let mut bytes = vec![0x10, 0xCA, 0x1];
        bytes.extend_from_slice(&witness.commitment.into_bigint().to_bytes_le());
        bytes.extend_from_slice(&witness.encoded_choices);

        Ok(Proof { bytes, outputs })
    }
}
