//! Game configuration.
//!
//! Hosts configure the engine at construction by providing a `GameConfig`:
//! - Grid dimensions (which fix the pair count)
//! - Two `TimingProfile`s: standard and Andy's mode
//! - Ticker interval and win settle delay
//! - Optional RNG seed for reproducible deals
//!
//! Every value is plain data. `Default` matches the reference game:
//! a 4x4 grid, 5s preview, 800ms resolution delay, 100ms ticks.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Preview and resolution durations for one play style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingProfile {
    /// How long every card stays face up before play begins.
    pub preview: Duration,

    /// Wait between the second pick and its resolution.
    ///
    /// Applied whether or not the two cards match.
    pub resolution_delay: Duration,
}

impl TimingProfile {
    /// Standard timing: 5s preview, 800ms resolution.
    pub const STANDARD: Self = Self {
        preview: Duration::from_secs(5),
        resolution_delay: Duration::from_millis(800),
    };

    /// Andy's mode: 2s preview, 300ms resolution.
    pub const ANDYS_MODE: Self = Self {
        preview: Duration::from_secs(2),
        resolution_delay: Duration::from_millis(300),
    };

    /// Create a timing profile.
    #[must_use]
    pub const fn new(preview: Duration, resolution_delay: Duration) -> Self {
        Self {
            preview,
            resolution_delay,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid rows.
    pub rows: usize,

    /// Grid columns.
    pub columns: usize,

    /// Timing used when Andy's mode is off.
    pub standard: TimingProfile,

    /// Timing used when Andy's mode is on.
    pub andys_mode: TimingProfile,

    /// Period of the elapsed-time ticker.
    pub tick_interval: Duration,

    /// Pause between the final match and `Finished`.
    pub settle_delay: Duration,

    /// Deal seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            columns: 4,
            standard: TimingProfile::STANDARD,
            andys_mode: TimingProfile::ANDYS_MODE,
            tick_interval: Duration::from_millis(100),
            settle_delay: Duration::from_millis(500),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create the reference configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set grid dimensions.
    #[must_use]
    pub fn with_grid(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    /// Set the standard timing profile.
    #[must_use]
    pub fn with_standard(mut self, profile: TimingProfile) -> Self {
        self.standard = profile;
        self
    }

    /// Set the Andy's mode timing profile.
    #[must_use]
    pub fn with_andys_mode(mut self, profile: TimingProfile) -> Self {
        self.andys_mode = profile;
        self
    }

    /// Set the ticker period.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the win settle delay.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Fix the deal seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of pairs dealt: half the grid.
    ///
    /// Saturates on grids too large to count; `validate` rejects those.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cells().unwrap_or(usize::MAX) / 2
    }

    fn cells(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }

    /// Timing for the requested mode.
    #[must_use]
    pub fn timing(&self, andys_mode: bool) -> TimingProfile {
        if andys_mode {
            self.andys_mode
        } else {
            self.standard
        }
    }

    /// Check that the grid holds at least one whole number of pairs and
    /// the ticker can make progress.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let too_large = ConfigError::GridTooLarge {
            rows: self.rows,
            columns: self.columns,
        };
        let cells = self.cells().ok_or_else(|| too_large.clone())?;
        if cells == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if cells % 2 != 0 {
            return Err(ConfigError::OddGrid {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if cells / 2 > usize::from(u16::MAX) {
            return Err(too_large);
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}
