//! External collaborator seams.
//!
//! The pipeline talks to the outside world only through these traits: the
//! identity store, read-only chain state, the content store, and the chain
//! write path. All chain reads are eventually consistent with the chain
//! head; the pipeline snapshots them once per session.

mod mock;

pub use mock::{MockChain, MockContentStore, MockIdentityStore, RecordedSubmission};

use async_trait::async_trait;

use protocol::{Corpus, CurvePoint, Fq, PlayerIdentity, Seed};
use zk::PublicOutputs;

/// Opaque handle to a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxHandle(pub Vec<u8>);

impl TxHandle {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Errors from read-only collaborators.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OracleError {
    /// The collaborator answered but has no usable data.
    #[error("data unavailable: {0}")]
    Unavailable(String),

    /// Transient I/O failure; safe to retry.
    #[error("network error: {0}")]
    Network(String),
}

/// Errors from the chain write path.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmitError {
    /// The contract reverted the write.
    #[error("rejected on-chain: {0}")]
    Rejected(String),

    /// Transient I/O failure; the proof stays valid for a retry.
    #[error("network error: {0}")]
    Network(String),
}

/// Holder of the player's long-lived identity.
///
/// The private scalar inside [`PlayerIdentity`] never leaves the client
/// process; this store only hands out the in-memory value.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn get(&self) -> Result<Option<PlayerIdentity>, OracleError>;
}

/// Read-only chain state.
#[async_trait]
pub trait EpochOracle: Send + Sync {
    /// Current epoch id.
    async fn epoch(&self) -> Result<u64, OracleError>;

    /// Randomness the contract published for the current epoch.
    async fn epoch_randomness(&self) -> Result<Fq, OracleError>;

    /// World ElGamal public key.
    async fn world_public_key(&self) -> Result<CurvePoint, OracleError>;

    /// Epoch of the player's most recent accepted action.
    async fn last_action_epoch(&self, player: &CurvePoint) -> Result<u64, OracleError>;
}

/// Read-only narrative content store.
#[async_trait]
pub trait ContentOracle: Send + Sync {
    /// Fetch the card corpus for a seed.
    async fn fetch_cards(&self, seed: &Seed) -> Result<Corpus, OracleError>;
}

/// Chain write path: one action submission per epoch per player.
#[async_trait]
pub trait ChainWriter: Send + Sync {
    async fn submit(
        &self,
        proof_bytes: &[u8],
        ciphertexts: &PublicOutputs,
    ) -> Result<TxHandle, SubmitError>;
}
