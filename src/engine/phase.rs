//! Game phases.

use serde::{Deserialize, Serialize};

/// Where a session is in its lifecycle.
///
/// `Start -> Preview -> Playing -> Finished`. Starting a game from any
/// phase goes back to `Preview`; a reset from any phase goes to `Start`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// No deck dealt yet.
    #[default]
    Start,
    /// Every card face up for memorizing.
    Preview,
    /// Cards face down, timer running, picks accepted.
    Playing,
    /// All pairs found.
    Finished,
}

impl GamePhase {
    /// Does this phase hold a dealt deck?
    #[must_use]
    pub const fn has_deck(self) -> bool {
        !matches!(self, GamePhase::Start)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::Start => "start",
            GamePhase::Preview => "preview",
            GamePhase::Playing => "playing",
            GamePhase::Finished => "finished",
        };
        f.write_str(name)
    }
}
