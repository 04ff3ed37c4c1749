//! Pronunciation facility.
//!
//! At most one utterance plays at a time: speaking stops whatever is in
//! progress first. The speaker itself is created on first use and dropped
//! on `shutdown`.

use std::sync::{Mutex, PoisonError};

use crate::cards::Language;
use crate::core::PresentationError;

/// Speaking rate handed to every utterance.
pub const SPEECH_RATE: f32 = 0.5;

/// One request to a speech engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// BCP-47 voice tag, e.g. `es-MX`.
    pub voice: &'static str,
    pub rate: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            voice: language.voice(),
            rate: SPEECH_RATE,
        }
    }
}

/// A platform text-to-speech engine.
pub trait Speaker: Send + 'static {
    fn is_speaking(&self) -> bool;

    fn stop(&mut self);

    fn speak(&mut self, utterance: &Utterance) -> Result<(), PresentationError>;
}

type SpeakerFactory<S> = Box<dyn Fn() -> Result<S, PresentationError> + Send + Sync>;

/// Process-wide speech handle.
pub struct SpeechChannel<S: Speaker> {
    factory: SpeakerFactory<S>,
    speaker: Mutex<Option<S>>,
}

impl<S: Speaker> SpeechChannel<S> {
    pub fn new(factory: impl Fn() -> Result<S, PresentationError> + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            speaker: Mutex::new(None),
        }
    }

    /// Interrupt any current utterance and speak `text`.
    pub fn speak(&self, text: &str, language: Language) -> Result<(), PresentationError> {
        let mut slot = self.speaker.lock().unwrap_or_else(PoisonError::into_inner);
        let speaker = match slot.take() {
            Some(speaker) => speaker,
            None => (self.factory)()?,
        };
        let speaker = slot.insert(speaker);

        if speaker.is_speaking() {
            speaker.stop();
        }
        speaker.speak(&Utterance::new(text, language))
    }

    /// Has the speaker been created?
    pub fn is_initialized(&self) -> bool {
        self.speaker.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Stop speaking and release the speaker.
    pub fn shutdown(&self) {
        let mut slot = self.speaker.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(mut speaker) = slot.take() {
            if speaker.is_speaking() {
                speaker.stop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Default)]
    struct Log {
        events: Vec<String>,
        created: usize,
    }

    struct FakeSpeaker {
        log: Arc<Mutex<Log>>,
        speaking: bool,
    }

    impl Speaker for FakeSpeaker {
        fn is_speaking(&self) -> bool {
            self.speaking
        }

        fn stop(&mut self) {
            self.speaking = false;
            self.log.lock().unwrap().events.push("stop".into());
        }

        fn speak(&mut self, utterance: &Utterance) -> Result<(), PresentationError> {
            self.speaking = true;
            self.log
                .lock()
                .unwrap()
                .events
                .push(format!("{}@{}", utterance.text, utterance.voice));
            Ok(())
        }
    }

    fn channel() -> (SpeechChannel<FakeSpeaker>, Arc<Mutex<Log>>) {
        let log = Arc::new(Mutex::new(Log::default()));
        let factory_log = log.clone();
        let channel = SpeechChannel::new(move || {
            factory_log.lock().unwrap().created += 1;
            Ok(FakeSpeaker {
                log: factory_log.clone(),
                speaking: false,
            })
        });
        (channel, log)
    }

    #[test]
    fn test_created_on_first_use() {
        let (channel, log) = channel();
        assert!(!channel.is_initialized());

        channel.speak("Dog", Language::English).unwrap();
        channel.speak("Perro", Language::Spanish).unwrap();

        assert!(channel.is_initialized());
        assert_eq!(log.lock().unwrap().created, 1);
    }

    #[test]
    fn test_stops_before_next_utterance() {
        let (channel, log) = channel();

        channel.speak("Dog", Language::English).unwrap();
        channel.speak("Perro", Language::Spanish).unwrap();

        assert_eq!(
            log.lock().unwrap().events,
            vec!["Dog@en-US", "stop", "Perro@es-MX"]
        );
    }

    #[test]
    fn test_shutdown_stops_and_releases() {
        let (channel, log) = channel();
        channel.speak("Moon", Language::English).unwrap();

        channel.shutdown();
        assert!(!channel.is_initialized());
        assert_eq!(log.lock().unwrap().events.last().unwrap(), "stop");

        channel.speak("Luna", Language::Spanish).unwrap();
        assert_eq!(log.lock().unwrap().created, 2);
    }

    #[test]
    fn test_factory_failure_reported() {
        let channel: SpeechChannel<FakeSpeaker> =
            SpeechChannel::new(|| Err(PresentationError::SpeechUnavailable("no engine".into())));

        assert_eq!(
            channel.speak("Key", Language::English),
            Err(PresentationError::SpeechUnavailable("no engine".into()))
        );
        assert!(!channel.is_initialized());
    }

    #[test]
    fn test_utterance_defaults() {
        let utterance = Utterance::new("Casa", Language::Spanish);
        assert_eq!(utterance.voice, "es-MX");
        assert_eq!(utterance.rate, SPEECH_RATE);
    }
}
