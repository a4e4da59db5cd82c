//! Runtime error taxonomy.
//!
//! Classification follows one rule: constraint failures are fatal and never
//! silently retried; network and timeout failures are retryable because they
//! carry no state-corruption risk.

use protocol::{ChoiceError, SelectError};
use zk::{ProofError, WitnessError};

/// Errors surfaced by the session pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// No player identity is available from the identity store.
    #[error("player identity unavailable")]
    IdentityUnavailable,

    /// Epoch state could not be read from chain.
    #[error("epoch data unavailable: {0}")]
    EpochDataUnavailable(String),

    /// The content store could not supply cards.
    #[error("content unavailable: {0}")]
    ContentUnavailable(String),

    /// The corpus holds fewer cards than one session needs.
    #[error(transparent)]
    InsufficientContent(#[from] SelectError),

    /// All cards have already been answered (or the session was consumed).
    #[error(transparent)]
    SessionComplete(#[from] ChoiceError),

    /// Witness assembly attempted before the session was ready.
    #[error(transparent)]
    NotReady(#[from] WitnessError),

    /// A proof is already being generated for this session.
    #[error("proof generation already in flight")]
    ProvingInFlight,

    /// No proof exists yet for this session.
    #[error("no proof available for this session")]
    ProofMissing,

    /// The proving engine failed. Fatal unless the inner error is a timeout.
    #[error(transparent)]
    Proving(#[from] ProofError),

    /// The background proving task itself failed (panic or cancellation).
    #[error("proving task failed: {0}")]
    TaskFailed(String),

    /// The chain reverted the submission (e.g. already acted this epoch).
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),

    /// The chain epoch moved past the session snapshot; the session must be
    /// restarted from seed derivation.
    #[error("epoch advanced from {session_epoch} to {current_epoch}, session invalidated")]
    EpochAdvanced {
        session_epoch: u64,
        current_epoch: u64,
    },

    /// The session's action was already written on-chain this epoch.
    #[error("session already consumed for this epoch")]
    SessionConsumed,

    /// Transient chain I/O failure.
    #[error("network error: {0}")]
    Network(String),
}

impl RuntimeError {
    /// Whether retrying the failed operation (with unchanged session state)
    /// may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Proving(e) => e.is_retryable(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_classification() {
        assert!(RuntimeError::Network("reset".into()).is_retryable());
        assert!(RuntimeError::Proving(ProofError::Timeout).is_retryable());
        assert!(
            !RuntimeError::Proving(ProofError::ConstraintViolation("bad".into())).is_retryable()
        );
        assert!(!RuntimeError::SubmissionRejected("acted".into()).is_retryable());
        assert!(!RuntimeError::SessionConsumed.is_retryable());
    }
}
