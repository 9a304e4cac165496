//! Tour Data Model
//!
//! Core data structures representing guided tours and their ordered steps.
//!
//! # Example YAML Format
//!
//! ```yaml
//! quick_tour:
//!   - id: navbar
//!     order: 0
//!     promptText: Use the navigation bar to move between sections.
//!     targetAnchor: "nav#navbar"
//!     audioRef: welcome/navigation-intro.mp3
//!
//!   - id: help
//!     order: 1
//!     promptText: Click this button anytime you need assistance.
//!     targetAnchor: a.need-help-button
//! ```

use serde::{Deserialize, Serialize};

/// Represents a single step in a guided tour.
///
/// Each step carries the guidance text to display, the UI element it points
/// at, and an optional audio cue played when the step becomes current.
/// Field names serialize in camelCase to match the declarative tour source
/// and the JSON served over the tour API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TourStep {
    /// Unique identifier for this step within its tour
    pub id: String,

    /// Zero-based position of this step in its tour
    pub order: usize,

    /// Guidance text shown to the user while this step is current
    pub prompt_text: String,

    /// Selector of the UI element this step is anchored to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_anchor: Option<String>,

    /// Audio clip cued when this step becomes current, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<String>,
}

impl TourStep {
    /// Creates a new step with the given id and prompt text.
    ///
    /// The step starts at order 0; [`TourDefinition::with_step`] assigns the
    /// real position when the step is added to a tour.
    ///
    /// # Example
    ///
    /// ```
    /// use tourguide::tour::TourStep;
    ///
    /// let step = TourStep::new("navbar", "Use the navigation bar to move around.")
    ///     .with_anchor("nav#navbar")
    ///     .with_audio("welcome/navigation-intro.mp3");
    /// ```
    pub fn new(id: impl Into<String>, prompt_text: impl Into<String>) -> Self {
        Self {
            id: id.into().trim().to_string(),
            order: 0,
            prompt_text: prompt_text.into(),
            target_anchor: None,
            audio_ref: None,
        }
    }

    /// Sets the zero-based position of this step.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Sets the UI anchor selector for this step.
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.target_anchor = Some(anchor.into());
        self
    }

    /// Sets the audio cue for this step.
    pub fn with_audio(mut self, audio: impl Into<String>) -> Self {
        self.audio_ref = Some(audio.into());
        self
    }
}

/// Represents a complete guided tour: an identifier plus its ordered steps.
///
/// Steps are kept sorted ascending by `order` with contiguous zero-based
/// positions. The loader establishes that ordering when it compiles a tour;
/// nothing re-sorts at runtime.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TourDefinition {
    /// Globally unique tour identifier
    pub id: String,

    /// Steps in presentation order
    pub steps: Vec<TourStep>,
}

impl TourDefinition {
    /// Creates a new tour with no steps.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into().trim().to_string(),
            steps: Vec::new(),
        }
    }

    /// Creates a tour from steps that already carry their final ordering.
    ///
    /// Callers are responsible for the sorted-contiguous invariant; the
    /// loader goes through [`crate::tour::validator`] which guarantees it.
    pub fn from_steps(id: impl Into<String>, steps: Vec<TourStep>) -> Self {
        Self {
            id: id.into().trim().to_string(),
            steps,
        }
    }

    /// Appends a step, assigning it the next position in the tour.
    ///
    /// # Example
    ///
    /// ```
    /// use tourguide::tour::{TourDefinition, TourStep};
    ///
    /// let tour = TourDefinition::new("quick_tour")
    ///     .with_step(TourStep::new("welcome", "Welcome to the portal."))
    ///     .with_step(TourStep::new("finish", "That's all for now."));
    ///
    /// assert_eq!(tour.steps[1].order, 1);
    /// ```
    pub fn with_step(mut self, step: TourStep) -> Self {
        let order = self.steps.len();
        self.steps.push(step.with_order(order));
        self
    }

    /// Gets a step by id.
    pub fn get_step(&self, id: &str) -> Option<&TourStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Gets a step by its position in the tour.
    pub fn step_at(&self, index: usize) -> Option<&TourStep> {
        self.steps.get(index)
    }

    /// Returns the position of the step with the given id, if present.
    pub fn position_of(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == step_id)
    }

    /// Returns the number of steps in the tour.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the tour has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
