//! Poseidon hashing over the BN254 scalar field.
//!
//! Native (non-circuit) Poseidon used for seed derivation, identity
//! commitments, and card-selection draws. The same sponge shape is enforced
//! by the proving circuit, so these functions must stay in lockstep with it.
//!
//! # Security Parameters
//!
//! - Field: BN254 (254-bit prime)
//! - Full rounds: 8
//! - Partial rounds: 57
//! - Security level: 128 bits

use ark_crypto_primitives::sponge::{
    CryptographicSponge,
    poseidon::{PoseidonConfig, PoseidonSponge, find_poseidon_ark_and_mds},
};
use ark_ff::{BigInteger, PrimeField};
use std::sync::OnceLock;

use crate::{Fq, JubjubScalar};

/// Cached Poseidon config. Computing ark/mds constants is expensive, so the
/// config is initialized once on first use and shared afterwards.
static POSEIDON_CONFIG: OnceLock<PoseidonConfig<Fq>> = OnceLock::new();

fn poseidon_config() -> &'static PoseidonConfig<Fq> {
    POSEIDON_CONFIG.get_or_init(|| {
        let (ark, mds) = find_poseidon_ark_and_mds::<Fq>(254, 2, 8, 57, 0);
        PoseidonConfig::new(8, 57, 5, mds, ark, 2, 1)
    })
}

fn squeeze_single(sponge: &mut PoseidonSponge<Fq>) -> Fq {
    // A Poseidon sponge always yields the requested number of elements.
    sponge.squeeze_field_elements::<Fq>(1)[0]
}

/// Hash a single field element.
pub fn hash_one(input: Fq) -> Fq {
    let mut sponge = PoseidonSponge::<Fq>::new(poseidon_config());
    sponge.absorb(&[input].as_slice());
    squeeze_single(&mut sponge)
}

/// Hash two field elements, absorbed separately to match the circuit gadget.
pub fn hash_two(left: Fq, right: Fq) -> Fq {
    let mut sponge = PoseidonSponge::<Fq>::new(poseidon_config());
    sponge.absorb(&[left].as_slice());
    sponge.absorb(&[right].as_slice());
    squeeze_single(&mut sponge)
}

/// Embed a Baby Jubjub scalar into the base field.
///
/// The Jubjub scalar field is strictly smaller than BN254's, so this is
/// injective and never reduces.
pub fn scalar_to_base(scalar: &JubjubScalar) -> Fq {
    Fq::from_le_bytes_mod_order(&scalar.into_bigint().to_bytes_le())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_one_is_deterministic() {
        let input = Fq::from(5u64);
        assert_eq!(hash_one(input), hash_one(input));
    }

    #[test]
    fn hash_two_separates_inputs() {
        let a = Fq::from(1u64);
        let b = Fq::from(2u64);
        assert_ne!(hash_two(a, b), hash_two(b, a));
    }

    #[test]
    fn hash_differs_from_input() {
        let input = Fq::from(42u64);
        assert_ne!(hash_one(input), input);
    }

    #[test]
    fn scalar_embedding_is_injective_on_small_values() {
        let a = scalar_to_base(&JubjubScalar::from(7u64));
        let b = scalar_to_base(&JubjubScalar::from(8u64));
        assert_ne!(a, b);
        assert_eq!(a, Fq::from(7u64));
    }
}
