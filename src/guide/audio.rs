//! Audio Cues
//!
//! Tracks which step's audio was cued last so a step that becomes current
//! again (re-render, no-op back at the first step) does not replay its
//! clip. Resetting the tracker re-arms every step, which is what lets a
//! restarted tour speak from the beginning.

use log::debug;

use crate::tour::model::TourStep;

/// Deduplicating audio cue source for a running tour.
#[derive(Debug, Clone, Default)]
pub struct AudioCueTracker {
    last_cued: Option<(String, String)>,
}

impl AudioCueTracker {
    /// Creates a tracker with no cue history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the audio clip to play for the step becoming current, or
    /// `None` when the step has no audio or was the last one cued.
    pub fn cue(&mut self, tour_id: &str, step: &TourStep) -> Option<String> {
        let audio = step.audio_ref.as_ref()?;

        let key = (tour_id.to_string(), step.id.clone());
        if self.last_cued.as_ref() == Some(&key) {
            debug!("Audio for step '{}' already cued, skipping", step.id);
            return None;
        }

        debug!("Cueing audio '{}' for step '{}'", audio, step.id);
        self.last_cued = Some(key);
        Some(audio.clone())
    }

    /// Forgets the cue history so every step can be cued again.
    pub fn reset(&mut self) {
        self.last_cued = None;
    }

    /// Returns the id of the last step whose audio was cued, if any.
    pub fn last_cued_step(&self) -> Option<&str> {
        self.last_cued.as_ref().map(|(_, step_id)| step_id.as_str())
    }
}
