//! Exponential ElGamal over Baby Jubjub.
//!
//! Each stat total `m` is encrypted as the pair `(c0, c1) = (r·G, m·G + r·W)`
//! under the world public key `W`. Decryption recovers the point `m·G`, not
//! `m` itself; the world side resolves small exponents externally.

use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalSerialize, SerializationError};

use protocol::{CurvePoint, JubjubScalar};

/// One ElGamal ciphertext: a pair of curve points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CiphertextPair {
    pub c0: CurvePoint,
    pub c1: CurvePoint,
}

impl CiphertextPair {
    /// Compressed encoding `c0 || c1` for chain submission.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        let mut bytes = Vec::with_capacity(64);
        self.c0.serialize_compressed(&mut bytes)?;
        self.c1.serialize_compressed(&mut bytes)?;
        Ok(bytes)
    }
}

/// Map a signed stat total onto the scalar field.
fn signed_scalar(value: i64) -> JubjubScalar {
    if value >= 0 {
        JubjubScalar::from(value as u64)
    } else {
        -JubjubScalar::from(value.unsigned_abs())
    }
}

/// Encrypt a signed stat total under the world public key.
pub fn encrypt(value: i64, randomness: &JubjubScalar, world_public_key: &CurvePoint) -> CiphertextPair {
    let generator = CurvePoint::generator();
    let c0 = (generator * randomness).into_affine();
    let c1 = (generator * signed_scalar(value) + *world_public_key * randomness).into_affine();
    CiphertextPair { c0, c1 }
}

/// Recover `m·G` from a ciphertext with the world secret key. Test support:
/// exponential ElGamal is only point-decryptable.
pub fn decrypt_to_point(pair: &CiphertextPair, world_secret: &JubjubScalar) -> CurvePoint {
    (pair.c1.into_group() - pair.c0 * world_secret).into_affine()
}
