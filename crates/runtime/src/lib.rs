//! Session orchestration for the epoch choice pipeline.
//!
//! This crate drives one session per player per epoch: it snapshots chain
//! state through the oracle seams, derives the seed and card sequence from
//! the `protocol` crate, runs proving from the `zk` crate as a background
//! task, and gates the single chain write of the epoch.
//!
//! Modules are organized by responsibility:
//! - [`pipeline`] hosts the orchestrator the client embeds
//! - [`session`] holds per-epoch session state
//! - [`oracle`] defines the external collaborator seams and mocks
//! - [`task`] keeps background proving internal to the crate
//! - [`gate`] decides submission eligibility

pub mod error;
pub mod gate;
pub mod oracle;
pub mod pipeline;
pub mod session;

mod task;

pub use error::{Result, RuntimeError};
pub use gate::eligible;
pub use oracle::{
    ChainWriter, ContentOracle, EpochOracle, IdentityStore, MockChain, MockContentStore,
    MockIdentityStore, OracleError, SubmitError, TxHandle,
};
pub use pipeline::Pipeline;
pub use session::Session;
pub use task::ProofTask;
