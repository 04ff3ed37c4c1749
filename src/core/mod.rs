//! Core engine types: identifiers, RNG, configuration, errors.
//!
//! This module contains the building blocks shared by the deck builder
//! and the game engine.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{CardId, MatchKey};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, TimingProfile};
pub use error::{ConfigError, DeckError, EngineError, PresentationError};
