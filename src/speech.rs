//! Speech output seam.
//!
//! The synthesis engine is opaque: the pipeline only hands over the text of a
//! realised system utterance. Implementations here do not produce audio.

use parking_lot::Mutex;
use tracing::info;

use crate::{Error, Result};

/// Renders a system utterance on the audio output.
pub trait SpeechSynthesiser: Send + Sync {
    fn synthesise(&self, utterance: &str) -> Result<()>;
}

fn check_utterance(utterance: &str) -> Result<&str> {
    let utterance = utterance.trim();
    if utterance.is_empty() {
        return Err(Error::Synthesis("empty utterance".into()));
    }
    Ok(utterance)
}

/// Keeps every synthesised utterance in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingSynthesiser {
    utterances: Mutex<Vec<String>>,
}

impl RecordingSynthesiser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn utterances(&self) -> Vec<String> {
        self.utterances.lock().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.utterances.lock())
    }
}

impl SpeechSynthesiser for RecordingSynthesiser {
    fn synthesise(&self, utterance: &str) -> Result<()> {
        let utterance = check_utterance(utterance)?;
        self.utterances.lock().push(utterance.to_owned());
        Ok(())
    }
}

/// Logs utterances through `tracing` instead of speaking them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSynthesiser;

impl SpeechSynthesiser for TracingSynthesiser {
    fn synthesise(&self, utterance: &str) -> Result<()> {
        let utterance = check_utterance(utterance)?;
        info!(utterance, "synthesising system utterance");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_keeps_order() {
        let synth = RecordingSynthesiser::new();
        synth.synthesise("hello").unwrap();
        synth.synthesise("  how can I help? ").unwrap();
        assert_eq!(synth.utterances(), vec!["hello", "how can I help?"]);
        assert_eq!(synth.drain().len(), 2);
        assert!(synth.utterances().is_empty());
    }

    #[test]
    fn test_empty_utterance_rejected() {
        let synth = RecordingSynthesiser::new();
        assert!(matches!(synth.synthesise("   "), Err(Error::Synthesis(_))));
        assert!(synth.utterances().is_empty());
        assert!(TracingSynthesiser.synthesise("").is_err());
        assert!(TracingSynthesiser.synthesise("ok").is_ok());
    }

    #[test]
    fn test_usable_as_trait_object() {
        let synths: Vec<Box<dyn SpeechSynthesiser>> =
            vec![Box::new(RecordingSynthesiser::new()), Box::new(TracingSynthesiser)];
        for synth in &synths {
            synth.synthesise("bye").unwrap();
        }
    }
}
