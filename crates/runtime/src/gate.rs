//! Submission eligibility.

use zk::Proof;

/// Whether a completed proof may be submitted this epoch.
///
/// True iff a proof exists and the player has not yet acted in the current
/// epoch. A proof from an earlier epoch stays cryptographically valid but
/// becomes ineligible as soon as `last_action_epoch` catches up.
pub fn eligible(proof: Option<&Proof>, last_action_epoch: u64, current_epoch: u64) -> bool {
    proof.is_some() && last_action_epoch < current_epoch
}

#[cfg(test)]
mod tests {
    use super::*;
    use zk::CiphertextPair;

    use ark_ec::AffineRepr;
    use protocol::CurvePoint;

    fn dummy_proof() -> Proof {
        let point = CurvePoint::generator();
        Proof {
            bytes: vec![1],
            outputs: core::array::from_fn(|_| CiphertextPair {
                c0: point,
                c1: point,
            }),
        }
    }

    #[test]
    fn truth_table() {
        let proof = dummy_proof();
        assert!(eligible(Some(&proof), 4, 5));
        assert!(!eligible(None, 4, 5));
        assert!(!eligible(Some(&proof), 5, 5));
        assert!(!eligible(Some(&proof), 6, 5));
        assert!(!eligible(None, 6, 5));
    }
}
