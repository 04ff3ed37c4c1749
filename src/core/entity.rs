//! Card identification.
//!
//! Every card dealt into a session has a unique `CardId`, and every pair of
//! cards shares a `MatchKey`.
//!
//! ## ID Layout
//!
//! IDs are allocated arena-style per deal:
//! - `0..2 * pair_count`: one per card, in creation order (before shuffling)
//!
//! Match keys are the draw index of the vocabulary item the pair was built
//! from, so they are `0..pair_count`.
//!
//! ## Usage
//!
//! ```
//! use vocab_match::core::{CardId, MatchKey};
//!
//! let key = MatchKey::new(3);
//!
//! // The two cards of pair 3
//! let (english, spanish) = CardId::pair(key);
//!
//! assert_eq!(english, CardId(6));
//! assert_eq!(spanish, CardId(7));
//! assert_eq!(english.pair_key(), key);
//! assert_eq!(spanish.pair_key(), key);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within one deal.
///
/// Stable for the card's lifetime: assigned at creation, never reassigned,
/// and unaffected by shuffling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// IDs of the english and spanish card built for `key`.
    #[must_use]
    pub const fn pair(key: MatchKey) -> (Self, Self) {
        let base = key.0 as u32 * 2;
        (Self(base), Self(base + 1))
    }

    /// The match key this ID was allocated for.
    #[must_use]
    pub const fn pair_key(self) -> MatchKey {
        MatchKey((self.0 / 2) as u16)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Value shared by exactly the two cards of a pair.
///
/// Internal to the engine: presentation never sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchKey(pub u16);

impl MatchKey {
    /// Create a new match key.
    #[must_use]
    pub const fn new(key: u16) -> Self {
        Self(key)
    }

    /// Get the raw key value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for MatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_ids_are_adjacent() {
        for k in 0..8u16 {
            let (a, b) = CardId::pair(MatchKey::new(k));
            assert_eq!(a.raw() + 1, b.raw());
            assert_eq!(a.pair_key(), MatchKey::new(k));
            assert_eq!(b.pair_key(), MatchKey::new(k));
        }
    }

    #[test]
    fn test_pair_ids_are_unique() {
        let mut seen = Vec::new();
        for k in 0..8u16 {
            let (a, b) = CardId::pair(MatchKey::new(k));
            assert!(!seen.contains(&a));
            assert!(!seen.contains(&b));
            seen.push(a);
            seen.push(b);
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardId(5)), "Card(5)");
        assert_eq!(format!("{}", MatchKey::new(2)), "Key(2)");
        assert_eq!(CardId::from(9).raw(), 9);
    }
}
