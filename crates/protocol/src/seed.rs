//! Per-player, per-epoch seed derivation.
//!
//! The seed is the single source of nondeterminism-free randomness for a
//! session: the same (identity, epoch randomness) pair always yields the
//! same seed, so regenerating a session can never produce a different card
//! sequence. Across epochs the seeds of one player are unlinkable without
//! the private scalar, because Poseidon is preimage resistant.

use ark_ff::{BigInteger, PrimeField};

use crate::hash::{hash_two, scalar_to_base};
use crate::{EpochContext, Fq, PlayerIdentity};

/// Deterministic per-player, per-epoch seed.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Seed(Fq);

impl Seed {
    pub fn as_field(&self) -> Fq {
        self.0
    }

    /// Big-endian byte rendering, for logs and content-store lookups.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.into_bigint().to_bytes_be()
    }
}

impl core::fmt::Debug for Seed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Seed({self})")
    }
}

impl core::fmt::Display for Seed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Derive the session seed from the player's private scalar and the epoch
/// randomness: `Poseidon(sk, r_epoch)`.
pub fn derive_seed(identity: &PlayerIdentity, epoch: &EpochContext) -> Seed {
    Seed(hash_two(
        scalar_to_base(identity.private_scalar()),
        epoch.epoch_randomness,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CurvePoint, JubjubScalar};
    use ark_ec::AffineRepr;

    fn epoch(randomness: u64) -> EpochContext {
        EpochContext::new(1, Fq::from(randomness), CurvePoint::generator())
    }

    #[test]
    fn same_inputs_same_seed() {
        let identity = PlayerIdentity::from_scalar(JubjubScalar::from(77u64));
        assert_eq!(
            derive_seed(&identity, &epoch(5)),
            derive_seed(&identity, &epoch(5))
        );
    }

    #[test]
    fn distinct_randomness_distinct_seeds() {
        let identity = PlayerIdentity::from_scalar(JubjubScalar::from(77u64));
        assert_ne!(
            derive_seed(&identity, &epoch(5)),
            derive_seed(&identity, &epoch(6))
        );
    }

    #[test]
    fn distinct_identities_distinct_seeds() {
        let a = PlayerIdentity::from_scalar(JubjubScalar::from(1u64));
        let b = PlayerIdentity::from_scalar(JubjubScalar::from(2u64));
        assert_ne!(derive_seed(&a, &epoch(5)), derive_seed(&b, &epoch(5)));
    }

    #[test]
    fn display_is_hex() {
        let identity = PlayerIdentity::from_scalar(JubjubScalar::from(3u64));
        let seed = derive_seed(&identity, &epoch(9));
        assert_eq!(seed.to_string(), hex::encode(seed.to_bytes()));
        assert_eq!(seed.to_string().len(), 64);
    }
}
