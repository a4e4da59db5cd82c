//! In-memory collaborators for testing without a chain.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ark_ec::{AffineRepr, CurveGroup};
use async_trait::async_trait;

use protocol::{Corpus, CurvePoint, Fq, JubjubScalar, PlayerIdentity, Seed};
use zk::PublicOutputs;

use super::{ChainWriter, ContentOracle, EpochOracle, IdentityStore, OracleError, SubmitError, TxHandle};

/// One recorded submission.
#[derive(Debug, Clone)]
pub struct RecordedSubmission {
    pub epoch: u64,
    pub proof_bytes: Vec<u8>,
    pub ciphertexts: PublicOutputs,
}

struct ChainState {
    epoch: u64,
    epoch_randomness: Fq,
    last_acted: HashMap<CurvePoint, u64>,
    sender: Option<CurvePoint>,
    submissions: Vec<RecordedSubmission>,
    fail_next_submit: Option<SubmitError>,
}

/// Simulated contract state: epoch counter, randomness, world key, and
/// per-player last-acted bookkeeping.
#[derive(Clone)]
pub struct MockChain {
    world_secret: JubjubScalar,
    state: Arc<Mutex<ChainState>>,
}

impl MockChain {
    pub fn new(world_secret: JubjubScalar, epoch: u64, epoch_randomness: Fq) -> Self {
        Self {
            world_secret,
            state: Arc::new(Mutex::new(ChainState {
                epoch,
                epoch_randomness,
                last_acted: HashMap::new(),
                sender: None,
                submissions: Vec::new(),
                fail_next_submit: None,
            })),
        }
    }

    /// The wallet signing submissions. The real contract learns the player
    /// from the transaction sender, so the mock needs it configured.
    pub fn set_sender(&self, player: CurvePoint) {
        self.state.lock().unwrap().sender = Some(player);
    }

    /// Move to the next epoch with new randomness.
    pub fn advance_epoch(&self, epoch_randomness: Fq) {
        let mut state = self.state.lock().unwrap();
        state.epoch += 1;
        state.epoch_randomness = epoch_randomness;
    }

    /// Overwrite a player's last-acted epoch (chain state fixture).
    pub fn set_last_action_epoch(&self, player: CurvePoint, epoch: u64) {
        self.state.lock().unwrap().last_acted.insert(player, epoch);
    }

    /// Make the next submit fail with the given error, then recover.
    pub fn fail_next_submit(&self, error: SubmitError) {
        self.state.lock().unwrap().fail_next_submit = Some(error);
    }

    pub fn submissions(&self) -> Vec<RecordedSubmission> {
        self.state.lock().unwrap().submissions.clone()
    }

    /// World secret key, for decrypting recorded ciphertexts in tests.
    pub fn world_secret(&self) -> &JubjubScalar {
        &self.world_secret
    }
}

#[async_trait]
impl EpochOracle for MockChain {
    async fn epoch(&self) -> Result<u64, OracleError> {
        Ok(self.state.lock().unwrap().epoch)
    }

    async fn epoch_randomness(&self) -> Result<Fq, OracleError> {
        Ok(self.state.lock().unwrap().epoch_randomness)
    }

    async fn world_public_key(&self) -> Result<CurvePoint, OracleError> {
        Ok((CurvePoint::generator() * self.world_secret).into_affine())
    }

    async fn last_action_epoch(&self, player: &CurvePoint) -> Result<u64, OracleError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .last_acted
            .get(player)
            .copied()
            .unwrap_or(0))
    }
}

#[async_trait]
impl ChainWriter for MockChain {
    async fn submit(
        &self,
        proof_bytes: &[u8],
        ciphertexts: &PublicOutputs,
    ) -> Result<TxHandle, SubmitError> {
        let mut state = self.state.lock().unwrap();

        if let Some(error) = state.fail_next_submit.take() {
            return Err(error);
        }

        let sender = state
            .sender
            .ok_or_else(|| SubmitError::Rejected("unknown sender".into()))?;

        let epoch = state.epoch;
        if state.last_acted.get(&sender).copied().unwrap_or(0) >= epoch {
            return Err(SubmitError::Rejected("already acted this epoch".into()));
        }

        state.last_acted.insert(sender, epoch);
        state.submissions.push(RecordedSubmission {
            epoch,
            proof_bytes: proof_bytes.to_vec(),
            ciphertexts: *ciphertexts,
        });

        let tx = state.submissions.len() as u64;
        Ok(TxHandle(tx.to_le_bytes().to_vec()))
    }
}

/// In-memory identity store.
#[derive(Clone, Default)]
pub struct MockIdentityStore {
    identity: Arc<Mutex<Option<PlayerIdentity>>>,
}

impl MockIdentityStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_identity(identity: PlayerIdentity) -> Self {
        Self {
            identity: Arc::new(Mutex::new(Some(identity))),
        }
    }
}

#[async_trait]
impl IdentityStore for MockIdentityStore {
    async fn get(&self) -> Result<Option<PlayerIdentity>, OracleError> {
        Ok(self.identity.lock().unwrap().clone())
    }
}

/// Content store backed by a fixed corpus; ignores the seed.
#[derive(Clone)]
pub struct MockContentStore {
    corpus: Corpus,
}

impl MockContentStore {
    pub fn new(corpus: Corpus) -> Self {
        Self { corpus }
    }
}

#[async_trait]
impl ContentOracle for MockContentStore {
    async fn fetch_cards(&self, _seed: &Seed) -> Result<Corpus, OracleError> {
        Ok(self.corpus.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::UniformRand;

    #[tokio::test]
    async fn chain_tracks_last_acted_per_player() {
        let chain = MockChain::new(JubjubScalar::from(3u64), 5, Fq::from(1u64));
        let player = (CurvePoint::generator() * JubjubScalar::from(2u64)).into_affine();

        assert_eq!(chain.last_action_epoch(&player).await.unwrap(), 0);
        chain.set_sender(player);

        let outputs: PublicOutputs =
            core::array::from_fn(|_| zk::encrypt(0, &JubjubScalar::from(1u64), &player));
        chain.submit(&[1, 2, 3], &outputs).await.unwrap();

        assert_eq!(chain.last_action_epoch(&player).await.unwrap(), 5);
        let again = chain.submit(&[1, 2, 3], &outputs).await;
        assert!(matches!(again, Err(SubmitError::Rejected(_))));
    }

    #[tokio::test]
    async fn injected_failure_fires_once() {
        let mut rng = rand::thread_rng();
        let chain = MockChain::new(JubjubScalar::rand(&mut rng), 1, Fq::from(9u64));
        let player = (CurvePoint::generator() * JubjubScalar::from(4u64)).into_affine();
        chain.set_sender(player);
        chain.fail_next_submit(SubmitError::Network("connection reset".into()));

        let outputs: PublicOutputs =
            core::array::from_fn(|_| zk::encrypt(0, &JubjubScalar::from(1u64), &player));

        let first = chain.submit(&[], &outputs).await;
        assert!(matches!(first, Err(SubmitError::Network(_))));
        assert!(chain.submit(&[], &outputs).await.is_ok());
    }
}
