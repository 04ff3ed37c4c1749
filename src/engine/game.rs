//! The timed game engine.
//!
//! `GameEngine` wraps a `GameSession` with the four delayed actions a game
//! needs:
//!
//! 1. the preview timer (`Preview -> Playing`),
//! 2. the resolution delay after a second pick,
//! 3. the settle delay after the final match (`Playing -> Finished`),
//! 4. the elapsed-time ticker, running only while playing.
//!
//! ## Concurrency
//!
//! Every mutation happens under one lock, and the lock is never held across
//! an `.await`. Each session gets a fresh `CancelToken`; every delayed
//! action runs as a spawned task holding a child of it and re-checks it
//! under the lock after waking, so an action from a replaced session is a
//! complete no-op. The `processing` flag rejects (never queues) picks made
//! while a pair is being resolved.
//!
//! The resolution runs in its own task, so a caller that stops awaiting
//! `select_card` still sees the pair resolved on time. Tasks hold only a
//! weak reference to the engine: dropping the last `GameEngine` handle
//! cancels every timer and closes the cue dispatcher.
//!
//! All methods must be called from within a Tokio runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::time::Instant;

use super::session::{GameSession, IgnoreReason, Resolution, Selection};
use super::snapshot::GameSnapshot;
use super::task::{CancelToken, TaskHandle, TaskKind, TaskSet};
use crate::cards::{DeckBuilder, VocabularyItem};
use crate::core::{DeckError, EngineError, GameConfig, GameRng, GameRngState};
use crate::presentation::{Cue, CueSender, NullPresenter, Presenter};

/// What `select_card` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Pick rejected; nothing changed.
    Ignored(IgnoreReason),
    /// Card flipped and held as the first of a pair.
    FirstPick,
    /// Second card matched the first. `completed` on the final pair.
    Matched { completed: bool },
    /// Second card did not match; both turned back down.
    Mismatched,
    /// The session was restarted, reset or dropped during the resolution
    /// delay.
    Abandoned,
}

struct Inner {
    session: GameSession,
    rng: GameRng,
    token: CancelToken,
    tasks: TaskSet,
    generation: u64,
    last_deal: Option<GameRngState>,
}

struct Shared {
    config: GameConfig,
    vocabulary: Vec<VocabularyItem>,
    inner: Mutex<Inner>,
    state: watch::Sender<GameSnapshot>,
    cues: CueSender,
}

impl Drop for Shared {
    fn drop(&mut self) {
        let inner = self.inner.get_mut().unwrap_or_else(PoisonError::into_inner);
        GameEngine::cancel_session(inner);
        tracing::debug!(generation = inner.generation, "engine dropped");
    }
}

/// Handle to a running game. Clones share the same game; dropping the last
/// clone tears it down.
#[derive(Clone)]
pub struct GameEngine {
    shared: Arc<Shared>,
}

impl GameEngine {
    /// Create an engine over `vocabulary`.
    ///
    /// Fails if the configuration is invalid or the vocabulary cannot fill
    /// the grid; after that, starting a game cannot fail.
    pub fn new(
        config: GameConfig,
        vocabulary: Vec<VocabularyItem>,
        presenter: impl Presenter,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        DeckBuilder::check(&vocabulary, config.pair_count())?;

        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let session = GameSession::new();
        let (state, _) = watch::channel(session.snapshot());

        let inner = Inner {
            session,
            rng,
            token: CancelToken::new(),
            tasks: TaskSet::new(),
            generation: 0,
            last_deal: None,
        };

        Ok(Self {
            shared: Arc::new(Shared {
                config,
                vocabulary,
                inner: Mutex::new(inner),
                state,
                cues: CueSender::spawn(presenter),
            }),
        })
    }

    /// Engine over the built-in vocabulary with no presentation.
    pub fn with_defaults(config: GameConfig) -> Result<Self, EngineError> {
        Self::new(config, crate::cards::default_vocabulary(), NullPresenter)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.shared.config
    }

    /// Watch the published state. A new snapshot follows every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.shared.state.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().session.snapshot()
    }

    /// The pending first pick, if any.
    #[must_use]
    pub fn first_selection(&self) -> Option<usize> {
        self.lock().session.first_selection()
    }

    /// RNG state the current deck was dealt from.
    #[must_use]
    pub fn last_deal(&self) -> Option<GameRngState> {
        self.lock().last_deal.clone()
    }

    /// Delayed actions currently scheduled.
    #[must_use]
    pub fn active_tasks(&self) -> Vec<TaskKind> {
        self.lock().tasks.active()
    }

    /// Deal a new deck and enter `Preview`, from any phase.
    ///
    /// Cancels every delayed action of the previous session first.
    pub fn start_game(&self, andys_mode: bool) -> Result<(), DeckError> {
        let mut inner = self.lock();
        Self::cancel_session(&mut inner);

        let deal = inner.rng.state();
        let cards = DeckBuilder::build(
            &self.shared.vocabulary,
            self.shared.config.pair_count(),
            &mut inner.rng,
        )?;

        inner.session = GameSession::deal(cards, andys_mode);
        inner.last_deal = Some(deal);
        self.publish(&inner);

        let preview = self.shared.config.timing(andys_mode).preview;
        tracing::info!(
            generation = inner.generation,
            andys_mode,
            ?preview,
            "game started"
        );

        let token = inner.token.child();
        let task_token = token.clone();
        let shared = self.downgrade();
        let join = tokio::spawn(async move {
            tokio::time::sleep(preview).await;
            if let Some(engine) = Self::upgrade(&shared) {
                engine.end_preview(&task_token);
            }
        });
        inner.tasks.insert(TaskKind::Preview, TaskHandle::new(token, join));
        Ok(())
    }

    /// Start again in the current session's mode.
    pub fn restart(&self) -> Result<(), DeckError> {
        let andys_mode = self.lock().session.andys_mode();
        self.start_game(andys_mode)
    }

    /// Abandon the current game and return to `Start`.
    pub fn reset(&self) {
        let mut inner = self.lock();
        Self::cancel_session(&mut inner);
        inner.session = GameSession::new();
        self.publish(&inner);
        tracing::info!(generation = inner.generation, "game reset");
    }

    /// Cancel everything and release presentation resources.
    pub fn shutdown(&self) {
        let mut inner = self.lock();
        Self::cancel_session(&mut inner);
        self.shared.cues.teardown();
        tracing::debug!(generation = inner.generation, "engine shut down");
    }

    /// Pick the card at `index`.
    ///
    /// A first pick returns at once. A second pick schedules the resolution
    /// delay, after which the pair is matched or hidden, and waits for it;
    /// picks made meanwhile are ignored. The resolution is a tracked task,
    /// so it still happens if this future is dropped.
    pub async fn select_card(&self, index: usize) -> SelectOutcome {
        let resolved = {
            let mut inner = self.lock();
            let selection = inner.session.begin_selection(index);

            let (first, second, is_match) = match selection {
                Selection::Ignored(reason) => {
                    tracing::trace!(index, ?reason, "pick ignored");
                    return SelectOutcome::Ignored(reason);
                }
                Selection::First => {
                    self.announce(&inner, index);
                    self.publish(&inner);
                    tracing::debug!(index, "first pick");
                    return SelectOutcome::FirstPick;
                }
                Selection::Second {
                    first,
                    second,
                    is_match,
                } => (first, second, is_match),
            };

            self.announce(&inner, index);
            self.publish(&inner);
            tracing::debug!(first, second, is_match, "second pick");

            let delay = self
                .shared
                .config
                .timing(inner.session.andys_mode())
                .resolution_delay;
            self.schedule_resolution(&mut inner, delay, first, second, is_match)
        };

        resolved.await.unwrap_or(SelectOutcome::Abandoned)
    }

    // === Delayed actions ===

    fn schedule_resolution(
        &self,
        inner: &mut Inner,
        delay: Duration,
        first: usize,
        second: usize,
        is_match: bool,
    ) -> oneshot::Receiver<SelectOutcome> {
        let (tx, rx) = oneshot::channel();

        let token = inner.token.child();
        let task_token = token.clone();
        let shared = self.downgrade();
        let join = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = match Self::upgrade(&shared) {
                Some(engine) => engine.resolve(&task_token, first, second, is_match),
                None => SelectOutcome::Abandoned,
            };
            // The picker may have stopped waiting.
            let _ = tx.send(outcome);
        });
        inner.tasks.insert(TaskKind::Resolution, TaskHandle::new(token, join));
        rx
    }

    fn resolve(
        &self,
        token: &CancelToken,
        first: usize,
        second: usize,
        is_match: bool,
    ) -> SelectOutcome {
        let mut inner = self.lock();
        if token.is_cancelled() {
            return SelectOutcome::Abandoned;
        }
        inner.tasks.remove(TaskKind::Resolution);

        let resolution = inner.session.resolve_pair(first, second, is_match);
        self.publish(&inner);

        match resolution {
            Resolution::Mismatched => SelectOutcome::Mismatched,
            Resolution::Matched { completed } => {
                tracing::debug!(
                    matched = inner.session.matched_pairs(),
                    pairs = inner.session.pair_count(),
                    "pair matched"
                );
                if completed {
                    self.schedule_finish(&mut inner);
                }
                SelectOutcome::Matched { completed }
            }
        }
    }

    fn end_preview(&self, token: &CancelToken) {
        let mut inner = self.lock();
        if token.is_cancelled() || !inner.session.end_preview() {
            return;
        }
        self.publish(&inner);
        tracing::info!(generation = inner.generation, "preview over");

        let token = inner.token.child();
        let task_token = token.clone();
        let interval = self.shared.config.tick_interval;
        let join = tokio::spawn(Self::run_ticker(self.downgrade(), interval, task_token));
        inner.tasks.insert(TaskKind::Ticker, TaskHandle::new(token, join));
    }

    async fn run_ticker(shared: Weak<Shared>, interval: Duration, token: CancelToken) {
        let started = Instant::now();
        loop {
            tokio::time::sleep(interval).await;

            let Some(engine) = Self::upgrade(&shared) else {
                return;
            };
            let mut inner = engine.lock();
            if token.is_cancelled() || !inner.session.tick(started.elapsed()) {
                return;
            }
            engine.publish(&inner);
        }
    }

    fn schedule_finish(&self, inner: &mut Inner) {
        inner.tasks.cancel(TaskKind::Ticker);

        let token = inner.token.child();
        let task_token = token.clone();
        let settle = self.shared.config.settle_delay;
        let shared = self.downgrade();
        let join = tokio::spawn(async move {
            tokio::time::sleep(settle).await;
            if let Some(engine) = Self::upgrade(&shared) {
                engine.finish(&task_token);
            }
        });
        inner.tasks.insert(TaskKind::Settle, TaskHandle::new(token, join));
    }

    fn finish(&self, token: &CancelToken) {
        let mut inner = self.lock();
        if token.is_cancelled() || !inner.session.finish() {
            return;
        }
        self.publish(&inner);
        tracing::info!(
            generation = inner.generation,
            elapsed = ?inner.session.elapsed(),
            "game finished"
        );
    }

    // === Helpers ===

    fn cancel_session(inner: &mut Inner) {
        inner.token.cancel();
        inner.tasks.cancel_all();
        inner.token = CancelToken::new();
        inner.generation += 1;
    }

    fn announce(&self, inner: &Inner, index: usize) {
        let Some(card) = inner.session.card(index) else {
            return;
        };
        self.shared.cues.send(Cue::HapticPulse);
        self.shared.cues.send(Cue::Pronounce {
            text: card.label().to_owned(),
            language: card.language(),
        });
    }

    fn publish(&self, inner: &Inner) {
        self.shared.state.send_replace(inner.session.snapshot());
    }

    fn downgrade(&self) -> Weak<Shared> {
        Arc::downgrade(&self.shared)
    }

    fn upgrade(shared: &Weak<Shared>) -> Option<Self> {
        shared.upgrade().map(|shared| Self { shared })
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.shared.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
