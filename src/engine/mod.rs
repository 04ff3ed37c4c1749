//! Game engine: phases, the session state machine, and its timers.
//!
//! ## Key Types
//!
//! - `GamePhase`: `Start`, `Preview`, `Playing`, `Finished`
//! - `GameSession`: Synchronous state machine, no timers
//! - `GameEngine`: Async driver owning the preview, resolution, settle
//!   and ticker actions
//! - `GameSnapshot`: Read-only state published after every mutation

pub mod game;
pub mod phase;
pub mod session;
pub mod snapshot;
pub mod task;

pub use game::{GameEngine, SelectOutcome};
pub use phase::GamePhase;
pub use session::{GameSession, IgnoreReason, Resolution, Selection};
pub use snapshot::{format_elapsed, CardView, GameSnapshot};
pub use task::{CancelToken, TaskKind};
