//! Per-epoch session state.
//!
//! A session binds one epoch snapshot to one choice sequence and at most one
//! accepted submission. All state is explicit and threaded through the
//! pipeline; there is no process-wide "current player".

use protocol::{CardSet, ChoiceAccumulator, EpochContext, PlayerIdentity, Seed, StatState};
use tracing::debug;
use zk::Proof;

use crate::error::{Result, RuntimeError};
use crate::task::ProofTask;

/// One player's session for one epoch.
pub struct Session {
    identity: PlayerIdentity,
    epoch: EpochContext,
    seed: Seed,
    accumulator: ChoiceAccumulator,
    pub(crate) proof_task: ProofTask,
    pub(crate) consumed: bool,
}

impl Session {
    pub(crate) fn new(
        identity: PlayerIdentity,
        epoch: EpochContext,
        seed: Seed,
        accumulator: ChoiceAccumulator,
    ) -> Self {
        Self {
            identity,
            epoch,
            seed,
            accumulator,
            proof_task: ProofTask::Idle,
            consumed: false,
        }
    }

    /// Record one swipe against the next card.
    pub fn swipe(&mut self, yes: bool) -> Result<()> {
        if self.consumed {
            return Err(RuntimeError::SessionConsumed);
        }
        self.accumulator.append(yes)?;
        debug!(
            recorded = self.accumulator.choices().len(),
            yes, "choice recorded"
        );
        Ok(())
    }

    /// True once every card has been answered.
    pub fn is_complete(&self) -> bool {
        self.accumulator.is_complete()
    }

    /// Running stat totals. Preserved across proving failures so the
    /// session stays inspectable without re-swiping.
    pub fn stats(&self) -> StatState {
        self.accumulator.stats()
    }

    pub fn choices(&self) -> &[bool] {
        self.accumulator.choices()
    }

    pub fn cards(&self) -> &CardSet {
        self.accumulator.cards()
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn epoch(&self) -> &EpochContext {
        &self.epoch
    }

    pub fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    /// The finished proof, if proving has succeeded.
    pub fn proof(&self) -> Option<&Proof> {
        self.proof_task.proof()
    }

    /// Whether a proof computation is currently in flight.
    pub fn is_proving(&self) -> bool {
        self.proof_task.is_running()
    }

    /// Whether this session's action has been accepted on-chain.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub(crate) fn accumulator(&self) -> &ChoiceAccumulator {
        &self.accumulator
    }
}
