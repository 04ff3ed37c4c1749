//! Read-only views published to the presentation layer.
//!
//! `GameSnapshot` is rebuilt after every mutation. Cards are held in an
//! `im::Vector`, so handing a snapshot to several readers is O(1).

use std::time::Duration;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::phase::GamePhase;
use crate::cards::{Card, Language};
use crate::core::CardId;

/// What the presentation layer may see of a card.
///
/// The match key is deliberately absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub emoji: String,
    pub label: String,
    pub language: Language,
    pub face_up: bool,
    pub matched: bool,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id(),
            emoji: card.emoji().to_owned(),
            label: card.label().to_owned(),
            language: card.language(),
            face_up: card.is_face_up(),
            matched: card.is_matched(),
        }
    }
}

/// Observable session state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub cards: Vector<CardView>,
    pub elapsed: Duration,
    pub matched_pairs: usize,
    pub pair_count: usize,
    pub andys_mode: bool,
    pub processing: bool,
}

impl GameSnapshot {
    /// Elapsed time as `m:ss.t`.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        format_elapsed(self.elapsed)
    }

    /// Indices of cards currently face up but not matched.
    #[must_use]
    pub fn revealed(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.face_up && !card.matched)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Render a duration as minutes, zero-padded seconds and tenths.
///
/// ```
/// use std::time::Duration;
/// use vocab_match::engine::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_millis(83_450)), "1:23.4");
/// ```
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let tenths = elapsed.subsec_millis() / 100;
    format!("{}:{:02}.{}", total / 60, total % 60, tenths)
}
