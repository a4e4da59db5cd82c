//! Per-epoch chain state snapshot.

use crate::{CurvePoint, Fq};

/// Chain state captured once at session start.
///
/// The snapshot is immutable for the lifetime of a session. If the chain
/// epoch advances mid-session the snapshot is not refreshed; the session is
/// invalidated at submission time instead (see `runtime`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpochContext {
    /// Monotonically increasing epoch counter.
    pub epoch_id: u64,

    /// Epoch randomness published by the contract; feeds seed derivation.
    pub epoch_randomness: Fq,

    /// World ElGamal public key the stat ciphertexts are encrypted under.
    pub world_public_key: CurvePoint,
}

impl EpochContext {
    pub fn new(epoch_id: u64, epoch_randomness: Fq, world_public_key: CurvePoint) -> Self {
        Self {
            epoch_id,
            epoch_randomness,
            world_public_key,
        }
    }
}
