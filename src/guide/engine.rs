//! Tour Engine
//!
//! The single authoritative owner of "which tour is active and at which
//! step". The engine guarantees:
//! - at most one active tour per engine instance
//! - the current step index is always in bounds while a tour is active
//! - every successful transition notifies subscribers synchronously, in
//!   registration order, after the state change has landed
//!
//! Engines are constructed explicitly and passed to whatever drives the
//! guided flow; there is no process-wide instance. The engine itself is a
//! single-owner object: hosts that mutate it from several threads wrap it
//! in their own lock and take state snapshots through [`TourEngine::state`].

use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;

use crate::tour::catalog::TourCatalog;
use crate::tour::model::{TourDefinition, TourStep};

use super::signal::{SubscriberId, SubscriberSet, TourSignal};

/// Errors raised by engine transitions.
///
/// All of these are recoverable: callers surface a message and leave the
/// session running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Tour '{0}' not found in the catalog")]
    UnknownTour(String),

    #[error("Step '{step_id}' not found in tour '{tour_id}'")]
    UnknownStep { tour_id: String, step_id: String },

    #[error("No active tour")]
    NotActive,
}

/// Snapshot of the engine's position, safe to hand to passive observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Active { tour_id: String, step_index: usize },
}

impl EngineState {
    /// Returns true when no tour is active.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// The tour currently being presented, owned by the engine for its whole
/// run so catalog lookups happen only at start.
struct ActiveRun {
    tour: TourDefinition,
    index: usize,
}

impl ActiveRun {
    // index is kept in bounds by every transition, which is the engine's
    // core invariant
    fn signal(&self) -> TourSignal {
        TourSignal::Active {
            tour_id: self.tour.id.clone(),
            step_index: self.index,
            step: self.tour.steps[self.index].clone(),
        }
    }
}

/// Guided tour state machine.
///
/// Drives a user through the steps of one tour at a time, drawn from an
/// immutable [`TourCatalog`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tourguide::guide::TourEngine;
/// use tourguide::tour::{TourCatalog, TourDefinition, TourStep};
///
/// let catalog = TourCatalog::from_definitions(vec![
///     TourDefinition::new("quick_tour")
///         .with_step(TourStep::new("welcome", "Welcome to the portal."))
///         .with_step(TourStep::new("finish", "That's it!")),
/// ]);
///
/// let mut engine = TourEngine::new(Arc::new(catalog));
/// engine.start("quick_tour")?;
/// engine.advance()?; // now on "finish"
/// engine.advance()?; // ran past the end: tour completed, engine idle
/// assert!(engine.state().is_idle());
/// # Ok::<(), tourguide::guide::EngineError>(())
/// ```
pub struct TourEngine {
    catalog: Arc<TourCatalog>,
    run: Option<ActiveRun>,
    subscribers: SubscriberSet,
}

impl TourEngine {
    /// Creates an idle engine over the given catalog.
    pub fn new(catalog: Arc<TourCatalog>) -> Self {
        Self {
            catalog,
            run: None,
            subscribers: SubscriberSet::new(),
        }
    }

    /// Returns the catalog this engine draws tours from.
    pub fn catalog(&self) -> &TourCatalog {
        &self.catalog
    }

    /// Starts the named tour at its first step.
    ///
    /// Starting while another tour is active replaces it without saving its
    /// position; starting the active tour again rewinds it to step 0.
    pub fn start(&mut self, tour_id: &str) -> Result<TourSignal, EngineError> {
        let tour = self
            .catalog
            .get(tour_id)
            .ok_or_else(|| EngineError::UnknownTour(tour_id.to_string()))?
            .clone();

        if tour.is_empty() {
            // The catalog refuses empty definitions, so this only trips on a
            // hand-built catalog that bypassed it.
            return Err(EngineError::UnknownTour(tour_id.to_string()));
        }

        if let Some(previous) = &self.run {
            debug!(
                "Replacing active tour '{}' (was at step {})",
                previous.tour.id, previous.index
            );
        }

        info!("Starting tour '{}' ({} steps)", tour.id, tour.len());
        let run = ActiveRun { tour, index: 0 };
        let signal = run.signal();
        self.run = Some(run);
        self.notify(&signal);
        Ok(signal)
    }

    /// Moves to the next step, completing the tour when the last step is
    /// already current.
    pub fn advance(&mut self) -> Result<TourSignal, EngineError> {
        let mut run = self.run.take().ok_or(EngineError::NotActive)?;

        let signal = if run.index + 1 < run.tour.len() {
            run.index += 1;
            debug!(
                "Tour '{}' advanced to step {} of {}",
                run.tour.id,
                run.index + 1,
                run.tour.len()
            );
            let signal = run.signal();
            self.run = Some(run);
            signal
        } else {
            info!("Tour '{}' completed", run.tour.id);
            TourSignal::Completed { tour_id: run.tour.id }
        };

        self.notify(&signal);
        Ok(signal)
    }

    /// Moves to the previous step, staying put when already at the first.
    ///
    /// The no-op case still notifies subscribers with the unchanged tuple;
    /// adapters that care can compare against their last snapshot.
    pub fn back(&mut self) -> Result<TourSignal, EngineError> {
        let run = self.run.as_mut().ok_or(EngineError::NotActive)?;

        if run.index > 0 {
            run.index -= 1;
            debug!("Tour '{}' moved back to step {}", run.tour.id, run.index + 1);
        } else {
            debug!("Tour '{}' already at the first step", run.tour.id);
        }

        let signal = run.signal();
        self.notify(&signal);
        Ok(signal)
    }

    /// Jumps directly to the step with the given id in the active tour.
    ///
    /// State is untouched when the step does not exist.
    pub fn go_to(&mut self, step_id: &str) -> Result<TourSignal, EngineError> {
        let run = self.run.as_mut().ok_or(EngineError::NotActive)?;

        let position = run.tour.position_of(step_id).ok_or_else(|| EngineError::UnknownStep {
            tour_id: run.tour.id.clone(),
            step_id: step_id.to_string(),
        })?;

        run.index = position;
        debug!("Tour '{}' jumped to step '{}'", run.tour.id, step_id);

        let signal = run.signal();
        self.notify(&signal);
        Ok(signal)
    }

    /// Leaves any active tour and returns to idle. Never fails.
    pub fn reset(&mut self) -> TourSignal {
        if let Some(run) = self.run.take() {
            info!("Leaving tour '{}' at step {}", run.tour.id, run.index + 1);
        }

        let signal = TourSignal::Idle;
        self.notify(&signal);
        signal
    }

    /// Returns a snapshot of the current position.
    pub fn state(&self) -> EngineState {
        match &self.run {
            Some(run) => EngineState::Active {
                tour_id: run.tour.id.clone(),
                step_index: run.index,
            },
            None => EngineState::Idle,
        }
    }

    /// Returns the step currently being presented, if any.
    pub fn current_step(&self) -> Option<&TourStep> {
        self.run.as_ref().and_then(|run| run.tour.step_at(run.index))
    }

    /// Registers a handler for transition notifications.
    pub fn subscribe(&mut self, handler: impl Fn(&TourSignal) + Send + 'static) -> SubscriberId {
        self.subscribers.subscribe(handler)
    }

    /// Removes a previously registered handler. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.unsubscribe(id);
    }

    /// Returns the number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&self, signal: &TourSignal) {
        self.subscribers.notify(signal);
    }
}
