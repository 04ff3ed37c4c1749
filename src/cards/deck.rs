//! Deck building and validation.
//!
//! `DeckBuilder::build` draws `pair_count` distinct vocabulary items without
//! replacement, makes an English and a Spanish card for each, and shuffles
//! the whole deal. `validate_deck` checks the pairing invariants of any deck.

use rustc_hash::{FxHashMap, FxHashSet};

use super::card::{Card, Language};
use super::vocabulary::VocabularyItem;
use crate::core::{CardId, DeckError, GameRng, MatchKey};

/// Builds shuffled decks from a vocabulary pool.
///
/// ## Example
///
/// ```
/// use vocab_match::cards::{default_vocabulary, DeckBuilder};
/// use vocab_match::core::GameRng;
///
/// let pool = default_vocabulary();
/// let mut rng = GameRng::new(42);
///
/// let deck = DeckBuilder::build(&pool, 8, &mut rng).unwrap();
/// assert_eq!(deck.len(), 16);
/// assert!(deck.iter().all(|card| card.is_face_up()));
/// ```
pub struct DeckBuilder;

impl DeckBuilder {
    /// Check that `pool` can supply `pair_count` distinct items.
    pub fn check(pool: &[VocabularyItem], pair_count: usize) -> Result<(), DeckError> {
        if pair_count == 0 {
            return Err(DeckError::NoPairs);
        }
        let available = distinct_items(pool).len();
        if pair_count > available {
            return Err(DeckError::NotEnoughVocabulary {
                requested: pair_count,
                available,
            });
        }
        Ok(())
    }

    /// Deal `2 * pair_count` face-up cards in uniformly random order.
    ///
    /// Items are compared by emoji; repeated entries in `pool` are drawn at
    /// most once.
    pub fn build(
        pool: &[VocabularyItem],
        pair_count: usize,
        rng: &mut GameRng,
    ) -> Result<Vec<Card>, DeckError> {
        Self::check(pool, pair_count)?;

        let candidates = distinct_items(pool);
        let drawn = rng.sample_indices(candidates.len(), pair_count);

        let mut cards = Vec::with_capacity(pair_count * 2);
        for (draw, &pick) in drawn.iter().enumerate() {
            // Bounded by ConfigError::GridTooLarge.
            let key = MatchKey::new(draw as u16);
            let (english_id, spanish_id) = CardId::pair(key);
            let item = candidates[pick];

            cards.push(Card::new(english_id, key, Language::English, item));
            cards.push(Card::new(spanish_id, key, Language::Spanish, item));
        }

        rng.shuffle(&mut cards);

        tracing::debug!(
            pairs = pair_count,
            seed = rng.seed(),
            "dealt deck"
        );
        Ok(cards)
    }
}

/// First occurrence of each emoji, in pool order.
fn distinct_items(pool: &[VocabularyItem]) -> Vec<&VocabularyItem> {
    let mut seen = FxHashSet::default();
    pool.iter()
        .filter(|item| seen.insert(item.emoji.as_str()))
        .collect()
}

/// Verify that every match key appears on exactly one English and one
/// Spanish card.
pub fn validate_deck<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Result<(), DeckError> {
    let mut by_key: FxHashMap<MatchKey, Vec<Language>> = FxHashMap::default();
    let mut len = 0;
    for card in cards {
        by_key.entry(card.match_key()).or_default().push(card.language());
        len += 1;
    }

    if len % 2 != 0 {
        return Err(DeckError::OddLength { len });
    }

    let mut keys: Vec<_> = by_key.into_iter().collect();
    keys.sort_by_key(|(key, _)| *key);

    for (key, languages) in keys {
        match languages.as_slice() {
            [a, b] if a != b => {}
            [_, _] => return Err(DeckError::SameLanguagePair { key: key.raw() }),
            other => {
                return Err(DeckError::UnpairedKey {
                    key: key.raw(),
                    count: other.len(),
                })
            }
        }
    }
    Ok(())
}
