//! Player identity: private scalar, derived public key, and commitment.
//!
//! The identity is created once on the client and reused across epochs. The
//! private scalar stays inside the process; it is exposed to the witness
//! builder only, never serialized, and redacted from debug output.

use ark_ec::{AffineRepr, CurveGroup};
use ark_std::UniformRand;
use ark_std::rand::RngCore;

use crate::hash::{hash_one, scalar_to_base};
use crate::{CurvePoint, Fq, JubjubScalar};

/// A player's long-lived cryptographic identity.
#[derive(Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    private_scalar: JubjubScalar,
    public_key: CurvePoint,
    commitment: Fq,
}

impl PlayerIdentity {
    /// Derive the full identity from a private scalar.
    ///
    /// Public key is `sk·G` on Baby Jubjub; the commitment is the Poseidon
    /// hash of the scalar, which the circuit re-derives to bind the witness
    /// to this identity without revealing the scalar.
    pub fn from_scalar(private_scalar: JubjubScalar) -> Self {
        let public_key = (CurvePoint::generator() * private_scalar).into_affine();
        let commitment = hash_one(scalar_to_base(&private_scalar));
        Self {
            private_scalar,
            public_key,
            commitment,
        }
    }

    /// Generate a fresh identity from the given RNG.
    pub fn generate<R: RngCore>(rng: &mut R) -> Self {
        Self::from_scalar(JubjubScalar::rand(rng))
    }

    /// The public key `sk·G`.
    pub fn public_key(&self) -> &CurvePoint {
        &self.public_key
    }

    /// Binding, hiding commitment to the private scalar.
    pub fn commitment(&self) -> Fq {
        self.commitment
    }

    /// The private scalar. Only the witness builder should read this; it
    /// must never leave the process in plaintext.
    pub fn private_scalar(&self) -> &JubjubScalar {
        &self.private_scalar
    }
}

impl core::fmt::Debug for PlayerIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PlayerIdentity")
            .field("private_scalar", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("commitment", &self.commitment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let a = PlayerIdentity::from_scalar(JubjubScalar::from(1234u64));
        let b = PlayerIdentity::from_scalar(JubjubScalar::from(1234u64));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_scalars_give_distinct_identities() {
        let a = PlayerIdentity::from_scalar(JubjubScalar::from(1u64));
        let b = PlayerIdentity::from_scalar(JubjubScalar::from(2u64));
        assert_ne!(a.public_key(), b.public_key());
        assert_ne!(a.commitment(), b.commitment());
    }

    #[test]
    fn generated_identities_are_distinct() {
        let mut rng = rand::thread_rng();
        let a = PlayerIdentity::generate(&mut rng);
        let b = PlayerIdentity::generate(&mut rng);
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn debug_redacts_private_scalar() {
        let identity = PlayerIdentity::from_scalar(JubjubScalar::from(99u64));
        let rendered = format!("{identity:?}");
        assert!(rendered.contains("<redacted>"));
    }
}
