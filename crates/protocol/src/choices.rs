//! Choice accumulation over a session's card sequence.
//!
//! The accumulator records swipes append-only and keeps the running stat
//! totals as a derived value: the totals are always equal to the signed fold
//! of the recorded choices over the card set, never an independent source of
//! truth.

use crate::cards::CardSet;
use crate::{CARD_COUNT, STAT_COUNT};

/// Running stat totals for one session. Unclamped; any display-layer
/// normalization is an external concern.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatState(pub [i64; STAT_COUNT]);

impl StatState {
    fn apply(&mut self, deltas: &[i32; STAT_COUNT], yes: bool) {
        let sign: i64 = if yes { 1 } else { -1 };
        for (total, delta) in self.0.iter_mut().zip(deltas) {
            *total += i64::from(*delta) * sign;
        }
    }
}

/// Errors raised while recording choices.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChoiceError {
    #[error("session already holds {CARD_COUNT} choices")]
    SessionComplete,
}

/// Stateful per-session recorder of swipes.
#[derive(Clone, Debug)]
pub struct ChoiceAccumulator {
    cards: CardSet,
    choices: Vec<bool>,
    stats: StatState,
}

impl ChoiceAccumulator {
    pub fn new(cards: CardSet) -> Self {
        Self {
            cards,
            choices: Vec::with_capacity(CARD_COUNT),
            stats: StatState::default(),
        }
    }

    /// Record one swipe against the next card in sequence.
    pub fn append(&mut self, choice: bool) -> Result<(), ChoiceError> {
        if self.choices.len() >= CARD_COUNT {
            return Err(ChoiceError::SessionComplete);
        }
        let deltas = &self.cards[self.choices.len()].stat_deltas;
        self.stats.apply(deltas, choice);
        self.choices.push(choice);
        Ok(())
    }

    /// True once all cards have been answered; completion is the trigger for
    /// witness assembly.
    pub fn is_complete(&self) -> bool {
        self.choices.len() == CARD_COUNT
    }

    pub fn choices(&self) -> &[bool] {
        &self.choices
    }

    pub fn stats(&self) -> StatState {
        self.stats
    }

    pub fn cards(&self) -> &CardSet {
        &self.cards
    }

    /// Discard all recorded choices and the derived totals, keeping the card
    /// sequence. Stats reset together with choices so the fold invariant
    /// holds at every point.
    pub fn reset(&mut self) {
        self.choices.clear();
        self.stats = StatState::default();
    }
}
