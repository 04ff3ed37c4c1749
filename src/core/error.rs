//! Error types.
//!
//! Only misconfiguration is an error. Rejected taps and stale timers are
//! ordinary outcomes, reported through `SelectOutcome` instead.

use thiserror::Error;

/// Invalid `GameConfig` values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid has no cells")]
    EmptyGrid,

    #[error("grid {rows}x{columns} has an odd number of cells")]
    OddGrid { rows: usize, columns: usize },

    #[error("grid {rows}x{columns} needs more pairs than match keys can address")]
    GridTooLarge { rows: usize, columns: usize },

    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
}

/// Deck construction precondition failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("pair count must be at least 1")]
    NoPairs,

    #[error("requested {requested} pairs but vocabulary has only {available} distinct items")]
    NotEnoughVocabulary { requested: usize, available: usize },

    #[error("deck has an odd number of cards ({len})")]
    OddLength { len: usize },

    #[error("match key {key} appears {count} times")]
    UnpairedKey { key: u16, count: usize },

    #[error("match key {key} pairs two cards of the same language")]
    SameLanguagePair { key: u16 },
}

/// Errors raised while constructing a `GameEngine`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid vocabulary: {0}")]
    Deck(#[from] DeckError),
}

/// Failure reported by a presentation collaborator.
///
/// Never propagated into game state; the engine logs and drops it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentationError {
    #[error("speech unavailable: {0}")]
    SpeechUnavailable(String),

    #[error("haptics unsupported")]
    HapticsUnsupported,
}
