//! # vocab-match
//!
//! Engine for a timed, single-player memory game pairing English and
//! Spanish vocabulary cards.
//!
//! ## Game Flow
//!
//! 1. **Start**: no deck yet.
//! 2. **Preview**: a fresh deck is dealt face up for memorizing.
//! 3. **Playing**: cards turn face down, the clock runs, and the player
//!    flips two at a time looking for an English/Spanish pair.
//! 4. **Finished**: every pair found; the clock stops.
//!
//! Starting a game from any phase deals again and cancels every pending
//! timer from the previous game.
//!
//! ## Architecture
//!
//! - **Pure core**: `GameSession` is a synchronous state machine with no
//!   timers, tested without a runtime.
//! - **Timed driver**: `GameEngine` schedules the delayed transitions on
//!   Tokio with cooperative cancellation.
//! - **Observable state**: every mutation publishes a `GameSnapshot` on a
//!   `watch` channel. Snapshot cards are `im` vectors, cheap to clone.
//! - **Fire-and-forget cues**: pronunciation and haptics are queued to a
//!   `Presenter` and never block or fail a transition.
//!
//! ## Modules
//!
//! - `core`: Card IDs, RNG, configuration, errors
//! - `cards`: Vocabulary, cards, deck builder
//! - `engine`: Phases, session state machine, timed engine, snapshots
//! - `presentation`: Cues, presenter trait, speech and haptic channels
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use vocab_match::{GameConfig, GameEngine, GamePhase};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let config = GameConfig::new()
//!     .with_seed(7)
//!     .with_standard(vocab_match::TimingProfile::new(
//!         Duration::from_millis(10),
//!         Duration::from_millis(1),
//!     ));
//! let engine = GameEngine::with_defaults(config).unwrap();
//!
//! engine.start_game(false).unwrap();
//! assert_eq!(engine.snapshot().phase, GamePhase::Preview);
//!
//! tokio::time::sleep(Duration::from_millis(50)).await;
//! assert_eq!(engine.snapshot().phase, GamePhase::Playing);
//! # }
//! ```

pub mod core;
pub mod cards;
pub mod engine;
pub mod presentation;

// Re-export commonly used types
pub use crate::core::{
    CardId, MatchKey,
    GameRng, GameRngState,
    GameConfig, TimingProfile,
    ConfigError, DeckError, EngineError, PresentationError,
};

pub use crate::cards::{
    Card, Language, VocabularyItem,
    DeckBuilder, default_vocabulary, validate_deck,
};

pub use crate::engine::{
    GameEngine, SelectOutcome,
    GamePhase, GameSession, IgnoreReason,
    GameSnapshot, CardView, format_elapsed,
};

pub use crate::presentation::{
    Cue, Presenter, NullPresenter, CuePresenter,
    SpeechChannel, Speaker, Utterance,
    HapticChannel, Haptics,
};
