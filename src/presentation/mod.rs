//! Outbound presentation cues.
//!
//! The engine never waits on presentation. Each flip produces `Cue`s that
//! are queued on an unbounded channel and drained by a dispatcher task,
//! which hands them to a `Presenter`. Presenter failures are logged and
//! dropped; they never reach game state.
//!
//! ## Key Types
//!
//! - `Cue`: Pronounce a word, or pulse haptics
//! - `Presenter`: Host-provided sink for cues
//! - `CueSender`: Non-blocking handle the engine sends through
//! - `SpeechChannel` / `HapticChannel`: Single-instance facilities with
//!   create-on-first-use and explicit teardown
//! - `CuePresenter`: A `Presenter` built from the two channels

pub mod haptics;
pub mod speech;

pub use haptics::{HapticChannel, Haptics};
pub use speech::{Speaker, SpeechChannel, Utterance, SPEECH_RATE};

use tokio::sync::mpsc;

use crate::cards::Language;
use crate::core::PresentationError;

/// A fire-and-forget notification for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    /// Speak a card's word in its language.
    Pronounce { text: String, language: Language },
    /// Short tap feedback.
    HapticPulse,
}

/// Receives cues from the engine.
///
/// Called from the dispatcher task, one cue at a time.
pub trait Presenter: Send + Sync + 'static {
    fn pronounce(&self, text: &str, language: Language) -> Result<(), PresentationError>;

    fn haptic_pulse(&self) -> Result<(), PresentationError>;

    /// Release speech and haptic resources at session teardown.
    fn teardown(&self) {}

    fn present(&self, cue: &Cue) -> Result<(), PresentationError> {
        match cue {
            Cue::Pronounce { text, language } => self.pronounce(text, *language),
            Cue::HapticPulse => self.haptic_pulse(),
        }
    }
}

/// Presenter that ignores every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn pronounce(&self, _text: &str, _language: Language) -> Result<(), PresentationError> {
        Ok(())
    }

    fn haptic_pulse(&self) -> Result<(), PresentationError> {
        Ok(())
    }
}

/// Presenter backed by a speech channel and a haptic channel.
pub struct CuePresenter<S: Speaker, H: Haptics> {
    speech: SpeechChannel<S>,
    haptics: HapticChannel<H>,
}

impl<S: Speaker, H: Haptics> CuePresenter<S, H> {
    pub fn new(speech: SpeechChannel<S>, haptics: HapticChannel<H>) -> Self {
        Self { speech, haptics }
    }

    pub fn speech(&self) -> &SpeechChannel<S> {
        &self.speech
    }

    pub fn haptics(&self) -> &HapticChannel<H> {
        &self.haptics
    }
}

impl<S: Speaker, H: Haptics> Presenter for CuePresenter<S, H> {
    fn pronounce(&self, text: &str, language: Language) -> Result<(), PresentationError> {
        self.speech.speak(text, language)
    }

    fn haptic_pulse(&self) -> Result<(), PresentationError> {
        self.haptics.pulse()
    }

    fn teardown(&self) {
        self.speech.shutdown();
        self.haptics.shutdown();
    }
}

enum Dispatch {
    Cue(Cue),
    Teardown,
}

/// Non-blocking handle for queuing cues.
#[derive(Clone)]
pub struct CueSender {
    tx: mpsc::UnboundedSender<Dispatch>,
}

impl CueSender {
    /// Spawn a dispatcher task that feeds `presenter`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(presenter: impl Presenter) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                match message {
                    Dispatch::Cue(cue) => {
                        if let Err(err) = presenter.present(&cue) {
                            tracing::warn!(%err, ?cue, "presentation cue failed");
                        }
                    }
                    Dispatch::Teardown => presenter.teardown(),
                }
            }
            presenter.teardown();
        });

        Self { tx }
    }

    /// Queue a cue. Never blocks; a closed dispatcher drops it.
    pub fn send(&self, cue: Cue) {
        if self.tx.send(Dispatch::Cue(cue)).is_err() {
            tracing::debug!("cue dispatcher closed");
        }
    }

    /// Ask the presenter to release its resources.
    pub fn teardown(&self) {
        let _ = self.tx.send(Dispatch::Teardown);
    }
}
