//! Vocabulary pool.
//!
//! `VocabularyItem` is static reference data: an emoji with its English
//! and Spanish names. Pools are read-only inputs to the deck builder.

use serde::{Deserialize, Serialize};

/// One emoji/word entry in a vocabulary pool.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub emoji: String,
    pub english: String,
    pub spanish: String,
}

impl VocabularyItem {
    /// Create a vocabulary item.
    pub fn new(
        emoji: impl Into<String>,
        english: impl Into<String>,
        spanish: impl Into<String>,
    ) -> Self {
        Self {
            emoji: emoji.into(),
            english: english.into(),
            spanish: spanish.into(),
        }
    }
}

const DEFAULT_POOL: [(&str, &str, &str); 25] = [
    ("🍎", "Apple", "Manzana"),
    ("🚙", "Car", "Carro"),
    ("✈️", "Airplane", "Avión"),
    ("⚾️", "Baseball", "Béisbol"),
    ("🍪", "Cookie", "Galleta"),
    ("🥕", "Carrot", "Zanahoria"),
    ("🥑", "Avocado", "Aguacate"),
    ("🍓", "Strawberry", "Fresa"),
    ("🐶", "Dog", "Perro"),
    ("🦁", "Lion", "León"),
    ("🐵", "Monkey", "Mono"),
    ("📱", "Phone", "Teléfono"),
    ("📸", "Camera", "Cámara"),
    ("⏰", "Clock", "Reloj"),
    ("💡", "Light Bulb", "Bombilla"),
    ("🌮", "Taco", "Taco"),
    ("🎸", "Guitar", "Guitarra"),
    ("🏠", "House", "Casa"),
    ("⭐️", "Star", "Estrella"),
    ("🌙", "Moon", "Luna"),
    ("🔑", "Key", "Llave"),
    ("📚", "Books", "Libros"),
    ("🎩", "Hat", "Sombrero"),
    ("🐱", "Cat", "Gato"),
    ("🍕", "Pizza", "Pizza"),
];

/// The built-in 25-item pool.
#[must_use]
pub fn default_vocabulary() -> Vec<VocabularyItem> {
    DEFAULT_POOL
        .iter()
        .map(|&(emoji, english, spanish)| VocabularyItem::new(emoji, english, spanish))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_default_pool_size() {
        assert_eq!(default_vocabulary().len(), 25);
    }

    #[test]
    fn test_default_pool_emoji_distinct() {
        let pool = default_vocabulary();
        let emoji: FxHashSet<_> = pool.iter().map(|item| item.emoji.as_str()).collect();
        assert_eq!(emoji.len(), pool.len());
    }

    #[test]
    fn test_some_words_are_cognates() {
        // Identical words across languages still form a valid pair.
        let pool = default_vocabulary();
        let taco = pool.iter().find(|item| item.english == "Taco").unwrap();
        assert_eq!(taco.spanish, "Taco");
    }
}
