//! Card system: vocabulary, cards, and the deck builder.
//!
//! ## Key Types
//!
//! - `VocabularyItem`: Static emoji/English/Spanish entry
//! - `Card`: Runtime tile state (face up, matched)
//! - `Language`: Which word a card shows
//! - `DeckBuilder`: Draws items and deals a shuffled deck

pub mod card;
pub mod deck;
pub mod vocabulary;

pub use card::{Card, Language};
pub use deck::{validate_deck, DeckBuilder};
pub use vocabulary::{default_vocabulary, VocabularyItem};
