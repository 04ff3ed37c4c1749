//! Cards - runtime tile state.
//!
//! A `Card` is one tile on the board. Its identity, pair key, language and
//! words are fixed at creation; only `face_up` and `matched` change.
//!
//! ## Invariants
//!
//! - `matched` is monotonic: once set it is never cleared.
//! - A matched card is always face up. `hide` refuses to turn one down.

use serde::{Deserialize, Serialize};

use super::vocabulary::VocabularyItem;
use crate::core::{CardId, MatchKey};

/// Which word a card shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Spanish,
}

impl Language {
    /// BCP-47 voice tag used for pronunciation.
    #[must_use]
    pub const fn voice(self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Spanish => "es-MX",
        }
    }
}

/// A card in a session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    match_key: MatchKey,
    language: Language,
    emoji: String,
    english: String,
    spanish: String,

    /// Is the word currently visible?
    face_up: bool,

    /// Has this card been paired off?
    matched: bool,
}

impl Card {
    /// Create a face-up, unmatched card for one side of `item`.
    #[must_use]
    pub fn new(id: CardId, match_key: MatchKey, language: Language, item: &VocabularyItem) -> Self {
        Self {
            id,
            match_key,
            language,
            emoji: item.emoji.clone(),
            english: item.english.clone(),
            spanish: item.spanish.clone(),
            face_up: true,
            matched: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn match_key(&self) -> MatchKey {
        self.match_key
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    /// The word shown on this card.
    #[must_use]
    pub fn label(&self) -> &str {
        match self.language {
            Language::English => &self.english,
            Language::Spanish => &self.spanish,
        }
    }

    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Can a player pick this card?
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.face_up && !self.matched
    }

    /// Do these two cards form a pair?
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.id != other.id && self.match_key == other.match_key
    }

    pub(crate) fn reveal(&mut self) {
        self.face_up = true;
    }

    /// Turn face down. No effect on a matched card.
    pub(crate) fn hide(&mut self) {
        if !self.matched {
            self.face_up = false;
        }
    }

    /// Mark as matched, which also pins it face up.
    pub(crate) fn mark_matched(&mut self) {
        self.face_up = true;
        self.matched = true;
    }
}
