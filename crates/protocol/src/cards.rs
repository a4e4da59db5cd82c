//! Narrative cards and deterministic, seed-indexed selection.
//!
//! Cards are immutable content sourced from an external store. Selection is
//! a pure function of the seed and the corpus: the draw sequence is an
//! iterated Poseidon chain over the seed, so neither wall-clock time nor any
//! other ambient input can influence which cards a player sees.

use serde::{Deserialize, Serialize};

use crate::hash::hash_two;
use crate::seed::Seed;
use crate::{CARD_COUNT, Fq, STAT_COUNT};

/// One narrative card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,

    /// Stat movement applied on a yes swipe; negated on a no swipe.
    pub stat_deltas: [i32; STAT_COUNT],

    /// The situation presented to the player.
    pub prompt: String,

    /// Outcome text shown after a yes swipe.
    pub yes_outcome: String,

    /// Outcome text shown after a no swipe.
    pub no_outcome: String,
}

/// Errors raised while validating a card corpus.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorpusError {
    #[error("duplicate card id {0} in corpus")]
    DuplicateCardId(u32),
}

/// Errors raised by card selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("insufficient content: corpus has {available} cards, need {required}")]
    InsufficientContent { available: usize, required: usize },
}

/// A validated collection of cards available for selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Corpus {
    cards: Vec<Card>,
}

impl Corpus {
    /// Build a corpus, rejecting duplicate card ids.
    pub fn new(cards: Vec<Card>) -> Result<Self, CorpusError> {
        for (i, card) in cards.iter().enumerate() {
            if cards[..i].iter().any(|other| other.id == card.id) {
                return Err(CorpusError::DuplicateCardId(card.id));
            }
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl TryFrom<Vec<Card>> for Corpus {
    type Error = CorpusError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Self::new(cards)
    }
}

impl From<Corpus> for Vec<Card> {
    fn from(corpus: Corpus) -> Self {
        corpus.cards
    }
}

/// The ordered, fixed-length card sequence for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardSet {
    cards: [Card; CARD_COUNT],
}

impl CardSet {
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub const fn len(&self) -> usize {
        CARD_COUNT
    }

    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl core::ops::Index<usize> for CardSet {
    type Output = Card;

    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

/// Reduce a field draw to a corpus index.
///
/// Takes the low 128 bits of the draw mod the corpus size. The bias is
/// negligible for any realistic corpus.
fn draw_to_index(draw: Fq, len: usize) -> usize {
    use ark_ff::PrimeField;
    let limbs = draw.into_bigint().0;
    let low = (limbs[1] as u128) << 64 | limbs[0] as u128;
    (low % len as u128) as usize
}

/// Select the session's card sequence from the corpus.
///
/// Draws are `Poseidon(seed, counter)` for counter 0, 1, ...; indices that
/// were already taken are skipped, so the result holds `CARD_COUNT` distinct
/// cards in draw order. Same seed and corpus always yield the same set.
pub fn select_cards(seed: Seed, corpus: &Corpus) -> Result<CardSet, SelectError> {
    if corpus.len() < CARD_COUNT {
        return Err(SelectError::InsufficientContent {
            available: corpus.len(),
            required: CARD_COUNT,
        });
    }

    let mut indices: Vec<usize> = Vec::with_capacity(CARD_COUNT);
    let mut counter = 0u64;
    while indices.len() < CARD_COUNT {
        let draw = hash_two(seed.as_field(), Fq::from(counter));
        counter += 1;
        let index = draw_to_index(draw, corpus.len());
        if !indices.contains(&index) {
            indices.push(index);
        }
    }

    let cards = core::array::from_fn(|i| corpus.cards()[indices[i]].clone());
    Ok(CardSet { cards })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EpochContext, PlayerIdentity, derive_seed};
    use crate::{CurvePoint, JubjubScalar};
    use ark_ec::AffineRepr;

    pub(crate) fn test_card(id: u32, deltas: [i32; STAT_COUNT]) -> Card {
        Card {
            id,
            stat_deltas: deltas,
            prompt: format!("card {id}"),
            yes_outcome: "yes".into(),
            no_outcome: "no".into(),
        }
    }

    fn test_corpus(size: u32) -> Corpus {
        let cards = (0..size)
            .map(|id| test_card(id, [id as i32, -(id as i32), 1]))
            .collect();
        Corpus::new(cards).unwrap()
    }

    fn test_seed(randomness: u64) -> Seed {
        let identity = PlayerIdentity::from_scalar(JubjubScalar::from(11u64));
        let epoch = EpochContext::new(1, Fq::from(randomness), CurvePoint::generator());
        derive_seed(&identity, &epoch)
    }

    #[test]
    fn corpus_rejects_duplicate_ids() {
        let cards = vec![test_card(1, [0; STAT_COUNT]), test_card(1, [0; STAT_COUNT])];
        assert_eq!(Corpus::new(cards), Err(CorpusError::DuplicateCardId(1)));
    }

    #[test]
    fn selection_is_deterministic() {
        let corpus = test_corpus(20);
        let a = select_cards(test_seed(3), &corpus).unwrap();
        let b = select_cards(test_seed(3), &corpus).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn selection_varies_with_seed() {
        let corpus = test_corpus(50);
        let a = select_cards(test_seed(3), &corpus).unwrap();
        let b = select_cards(test_seed(4), &corpus).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn selection_has_no_duplicates() {
        let corpus = test_corpus(6);
        let set = select_cards(test_seed(7), &corpus).unwrap();
        for i in 0..set.len() {
            for j in (i + 1)..set.len() {
                assert_ne!(set[i].id, set[j].id);
            }
        }
    }

    #[test]
    fn selection_fails_on_small_corpus() {
        let corpus = test_corpus(CARD_COUNT as u32 - 1);
        assert_eq!(
            select_cards(test_seed(1), &corpus),
            Err(SelectError::InsufficientContent {
                available: CARD_COUNT - 1,
                required: CARD_COUNT,
            })
        );
    }

    #[test]
    fn exact_size_corpus_uses_every_card() {
        let corpus = test_corpus(CARD_COUNT as u32);
        let set = select_cards(test_seed(2), &corpus).unwrap();
        let mut ids: Vec<u32> = set.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..CARD_COUNT as u32).collect::<Vec<_>>());
    }

    #[test]
    fn corpus_round_trips_through_serde() {
        let corpus = test_corpus(6);
        let json = serde_json::to_string(&corpus).unwrap();
        let back: Corpus = serde_json::from_str(&json).unwrap();
        assert_eq!(corpus, back);
    }
}
