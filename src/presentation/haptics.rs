//! Haptic feedback facility.

use std::sync::{Mutex, PoisonError};

use crate::core::PresentationError;

/// A platform impact generator.
pub trait Haptics: Send + 'static {
    /// Warm up the actuator so the first pulse is not delayed.
    fn prepare(&mut self);

    fn impact(&mut self) -> Result<(), PresentationError>;
}

type HapticsFactory<H> = Box<dyn Fn() -> Result<H, PresentationError> + Send + Sync>;

/// Process-wide haptics handle, created and prepared on the first pulse.
pub struct HapticChannel<H: Haptics> {
    factory: HapticsFactory<H>,
    generator: Mutex<Option<H>>,
}

impl<H: Haptics> HapticChannel<H> {
    pub fn new(factory: impl Fn() -> Result<H, PresentationError> + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            generator: Mutex::new(None),
        }
    }

    pub fn pulse(&self) -> Result<(), PresentationError> {
        let mut slot = self.generator.lock().unwrap_or_else(PoisonError::into_inner);
        let generator = match slot.take() {
            Some(generator) => generator,
            None => {
                let mut generator = (self.factory)()?;
                generator.prepare();
                generator
            }
        };
        let generator = slot.insert(generator);
        generator.impact()
    }

    pub fn is_initialized(&self) -> bool {
        self.generator.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    pub fn shutdown(&self) {
        self.generator.lock().unwrap_or_else(PoisonError::into_inner).take();
    }
}
