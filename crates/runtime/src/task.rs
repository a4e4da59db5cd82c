//! Background proof computation.
//!
//! Proving is the one long-running operation in the pipeline. It runs on a
//! blocking worker so choice state stays frozen and visible while the proof
//! is computed, and at most one computation is in flight per session.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{error, info};

use zk::{Proof, ProofEngine, ProofError, Witness};

/// Lifecycle of a session's proof computation.
///
/// Abandoning the session drops the handle; partial proof state is never
/// exposed.
#[derive(Debug)]
pub enum ProofTask {
    /// No proof attempt yet.
    Idle,

    /// A proof is being computed in the background.
    Running(JoinHandle<Result<Proof, ProofError>>),

    /// The proof finished and is ready for submission.
    Succeeded(Proof),

    /// The last attempt failed; the session stays inspectable for a retry.
    Failed(ProofError),
}

impl ProofTask {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running(_))
    }

    /// The finished proof, if any.
    pub fn proof(&self) -> Option<&Proof> {
        match self {
            Self::Succeeded(proof) => Some(proof),
            _ => None,
        }
    }
}

/// Run `execute` then `prove` on a blocking worker thread.
///
/// The witness moves into the task and is dropped with it; a retry always
/// assembles a fresh witness (fresh encryption randomness).
pub(crate) fn spawn_proving(
    engine: Arc<dyn ProofEngine>,
    witness: Witness,
) -> JoinHandle<Result<Proof, ProofError>> {
    tokio::task::spawn_blocking(move || {
        let started = Instant::now();

        // Fast pass first: constraint violations surface before the
        // expensive proof generation starts.
        engine.execute(&witness)?;

        match engine.prove(&witness) {
            Ok(proof) => {
                info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "proof generated"
                );
                Ok(proof)
            }
            Err(e) => {
                error!(error = %e, "proof generation failed");
                Err(e)
            }
        }
    })
}
