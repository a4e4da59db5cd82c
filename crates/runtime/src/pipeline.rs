//! Session pipeline orchestration.
//!
//! Wires the external collaborators together: identity and epoch reads feed
//! seed derivation and card selection, completed choice sequences feed the
//! proving task, and finished proofs pass the submission gate before the
//! single chain write of the epoch.

use std::sync::Arc;

use tracing::{info, warn};

use protocol::{ChoiceAccumulator, EpochContext, derive_seed, select_cards};
use zk::{ProofEngine, build_witness};

use crate::error::{Result, RuntimeError};
use crate::gate;
use crate::oracle::{ChainWriter, ContentOracle, EpochOracle, IdentityStore, OracleError, SubmitError, TxHandle};
use crate::session::Session;
use crate::task::{ProofTask, spawn_proving};

/// The client-side protocol pipeline.
pub struct Pipeline {
    identity_store: Arc<dyn IdentityStore>,
    epoch_oracle: Arc<dyn EpochOracle>,
    content: Arc<dyn ContentOracle>,
    chain_writer: Arc<dyn ChainWriter>,
    engine: Arc<dyn ProofEngine>,
}

impl Pipeline {
    pub fn new(
        identity_store: Arc<dyn IdentityStore>,
        epoch_oracle: Arc<dyn EpochOracle>,
        content: Arc<dyn ContentOracle>,
        chain_writer: Arc<dyn ChainWriter>,
        engine: Arc<dyn ProofEngine>,
    ) -> Self {
        Self {
            identity_store,
            epoch_oracle,
            content,
            chain_writer,
            engine,
        }
    }

    /// Start a session: snapshot chain state, derive the seed, and select
    /// the epoch's card sequence.
    ///
    /// The snapshot is fixed for the session's lifetime; epoch advancement
    /// is detected at submission time, not here.
    pub async fn begin_session(&self) -> Result<Session> {
        let identity = self
            .identity_store
            .get()
            .await
            .map_err(identity_error)?
            .ok_or(RuntimeError::IdentityUnavailable)?;

        let epoch_id = self.epoch_oracle.epoch().await.map_err(epoch_error)?;
        let epoch_randomness = self
            .epoch_oracle
            .epoch_randomness()
            .await
            .map_err(epoch_error)?;
        let world_public_key = self
            .epoch_oracle
            .world_public_key()
            .await
            .map_err(epoch_error)?;
        let epoch = EpochContext::new(epoch_id, epoch_randomness, world_public_key);

        let seed = derive_seed(&identity, &epoch);
        let corpus = self
            .content
            .fetch_cards(&seed)
            .await
            .map_err(content_error)?;
        let cards = select_cards(seed, &corpus)?;

        info!(epoch = epoch_id, %seed, "session started");
        Ok(Session::new(
            identity,
            epoch,
            seed,
            ChoiceAccumulator::new(cards),
        ))
    }

    /// Assemble a fresh witness and start proving in the background.
    ///
    /// Rejects concurrent starts: a second call while a proof is in flight
    /// returns [`RuntimeError::ProvingInFlight`] instead of wasting engine
    /// capacity and randomness. A call after success is a no-op; a call
    /// after failure retries with a freshly sampled witness.
    pub fn start_proving(&self, session: &mut Session) -> Result<()> {
        if session.consumed {
            return Err(RuntimeError::SessionConsumed);
        }
        match session.proof_task {
            ProofTask::Running(_) => return Err(RuntimeError::ProvingInFlight),
            ProofTask::Succeeded(_) => return Ok(()),
            ProofTask::Idle | ProofTask::Failed(_) => {}
        }

        let witness = build_witness(
            session.identity(),
            session.epoch(),
            session.accumulator(),
            &mut rand::thread_rng(),
        )?;

        info!(epoch = session.epoch().epoch_id, "proving started");
        session.proof_task = ProofTask::Running(spawn_proving(Arc::clone(&self.engine), witness));
        Ok(())
    }

    /// Wait for the in-flight proof to finish.
    ///
    /// On failure the session's choices and stats remain intact so the
    /// caller can retry without re-swiping.
    pub async fn await_proof<'s>(&self, session: &'s mut Session) -> Result<&'s zk::Proof> {
        let task = std::mem::replace(&mut session.proof_task, ProofTask::Idle);
        session.proof_task = match task {
            ProofTask::Running(handle) => match handle.await {
                Ok(Ok(proof)) => ProofTask::Succeeded(proof),
                Ok(Err(e)) => ProofTask::Failed(e),
                Err(join_error) => {
                    return Err(RuntimeError::TaskFailed(join_error.to_string()));
                }
            },
            other => other,
        };

        match &session.proof_task {
            ProofTask::Succeeded(proof) => Ok(proof),
            ProofTask::Failed(e) => Err(RuntimeError::Proving(e.clone())),
            ProofTask::Idle | ProofTask::Running(_) => Err(RuntimeError::ProofMissing),
        }
    }

    /// Submit the finished proof, re-checking eligibility against fresh
    /// chain state first.
    ///
    /// A network failure leaves the proof reusable; the caller retries
    /// submission without re-proving. An epoch advance invalidates the
    /// whole session.
    pub async fn submit(&self, session: &mut Session) -> Result<TxHandle> {
        if session.consumed {
            return Err(RuntimeError::SessionConsumed);
        }

        let (proof_bytes, outputs) = match session.proof_task.proof() {
            Some(proof) => (proof.bytes.clone(), proof.outputs),
            None => return Err(RuntimeError::ProofMissing),
        };

        // The snapshot is stale by definition; submission gates against the
        // latest successfully read chain state.
        let current_epoch = self.epoch_oracle.epoch().await.map_err(epoch_error)?;
        if current_epoch != session.epoch().epoch_id {
            warn!(
                session_epoch = session.epoch().epoch_id,
                current_epoch, "epoch advanced mid-session"
            );
            return Err(RuntimeError::EpochAdvanced {
                session_epoch: session.epoch().epoch_id,
                current_epoch,
            });
        }

        let last_acted = self
            .epoch_oracle
            .last_action_epoch(session.identity().public_key())
            .await
            .map_err(epoch_error)?;
        if !gate::eligible(session.proof_task.proof(), last_acted, current_epoch) {
            return Err(RuntimeError::SubmissionRejected(format!(
                "already acted in epoch {last_acted}"
            )));
        }

        match self.chain_writer.submit(&proof_bytes, &outputs).await {
            Ok(tx) => {
                session.consumed = true;
                info!(epoch = current_epoch, "action submitted");
                Ok(tx)
            }
            Err(SubmitError::Network(e)) => Err(RuntimeError::Network(e)),
            Err(SubmitError::Rejected(e)) => Err(RuntimeError::SubmissionRejected(e)),
        }
    }
}

fn identity_error(error: OracleError) -> RuntimeError {
    match error {
        OracleError::Network(e) => RuntimeError::Network(e),
        OracleError::Unavailable(_) => RuntimeError::IdentityUnavailable,
    }
}

fn epoch_error(error: OracleError) -> RuntimeError {
    match error {
        OracleError::Network(e) => RuntimeError::Network(e),
        OracleError::Unavailable(e) => RuntimeError::EpochDataUnavailable(e),
    }
}

fn content_error(error: OracleError) -> RuntimeError {
    match error {
        OracleError::Network(e) => RuntimeError::Network(e),
        OracleError::Unavailable(e) => RuntimeError::ContentUnavailable(e),
    }
}
