//! Tour Session
//!
//! One user's guided-flow driver. The session owns the engine, guards
//! against stale start requests racing each other, and pairs every
//! transition with the audio cue the presentation layer should play.
//!
//! Starting a tour is two-phase because the definition fetch behind it is
//! asynchronous: [`TourSession::request_start`] issues a monotonic token,
//! the caller performs its fetch, and [`TourSession::resolve_start`]
//! applies the start only if no newer request was issued in the meantime.
//! A stale resolution is discarded without touching engine state, so the
//! most recently requested tour always wins regardless of which fetch
//! finishes first.

use log::{debug, info};

use super::audio::AudioCueTracker;
use super::engine::{EngineError, EngineState, TourEngine};
use super::signal::{SubscriberId, TourSignal};

/// Pending start issued by [`TourSession::request_start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    token: u64,
    tour_id: String,
}

impl StartRequest {
    /// The tour this request will start.
    pub fn tour_id(&self) -> &str {
        &self.tour_id
    }
}

/// A transition's signal plus the audio cue to play for it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideUpdate {
    pub signal: TourSignal,
    pub audio: Option<String>,
}

/// Result of resolving a pending start request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The request was still the latest; its tour is now on step 0.
    Started(GuideUpdate),

    /// A newer request was issued while this one was in flight; engine
    /// state is untouched.
    Superseded,
}

/// Session-scoped driver around one [`TourEngine`].
pub struct TourSession {
    engine: TourEngine,
    audio: AudioCueTracker,
    latest_token: u64,
}

impl TourSession {
    /// Wraps an engine in a fresh session.
    pub fn new(engine: TourEngine) -> Self {
        Self {
            engine,
            audio: AudioCueTracker::new(),
            latest_token: 0,
        }
    }

    /// Read access to the underlying engine.
    pub fn engine(&self) -> &TourEngine {
        &self.engine
    }

    /// Issues a token for a start that resolves later.
    ///
    /// Issuing a new request supersedes every earlier one still in flight.
    pub fn request_start(&mut self, tour_id: &str) -> StartRequest {
        self.latest_token += 1;
        debug!(
            "Issued start request #{} for tour '{}'",
            self.latest_token, tour_id
        );
        StartRequest {
            token: self.latest_token,
            tour_id: tour_id.to_string(),
        }
    }

    /// Applies a previously issued start request.
    ///
    /// Returns [`StartOutcome::Superseded`] when a newer request exists;
    /// only the latest request ever reaches the engine.
    pub fn resolve_start(&mut self, request: StartRequest) -> Result<StartOutcome, EngineError> {
        if request.token != self.latest_token {
            info!(
                "Discarding stale start of tour '{}' (request #{}, latest is #{})",
                request.tour_id, request.token, self.latest_token
            );
            return Ok(StartOutcome::Superseded);
        }

        self.apply_start(&request.tour_id).map(StartOutcome::Started)
    }

    /// Starts a tour immediately.
    ///
    /// Shorthand for request-plus-resolve when nothing asynchronous sits in
    /// between; still bumps the token so older in-flight requests go stale.
    pub fn start(&mut self, tour_id: &str) -> Result<GuideUpdate, EngineError> {
        self.request_start(tour_id);
        self.apply_start(tour_id)
    }

    /// Moves to the next step of the active tour.
    pub fn advance(&mut self) -> Result<GuideUpdate, EngineError> {
        let signal = self.engine.advance()?;
        if matches!(signal, TourSignal::Completed { .. }) {
            // A finished tour starts from silence if it runs again
            self.audio.reset();
        }
        Ok(self.update_for(signal))
    }

    /// Moves to the previous step of the active tour.
    pub fn back(&mut self) -> Result<GuideUpdate, EngineError> {
        let signal = self.engine.back()?;
        Ok(self.update_for(signal))
    }

    /// Jumps to the named step of the active tour.
    pub fn go_to(&mut self, step_id: &str) -> Result<GuideUpdate, EngineError> {
        let signal = self.engine.go_to(step_id)?;
        Ok(self.update_for(signal))
    }

    /// Leaves the guided flow entirely.
    pub fn reset(&mut self) -> GuideUpdate {
        let signal = self.engine.reset();
        self.audio.reset();
        GuideUpdate { signal, audio: None }
    }

    /// Snapshot of the engine's position.
    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    /// Registers a notification handler on the underlying engine.
    pub fn subscribe(&mut self, handler: impl Fn(&TourSignal) + Send + 'static) -> SubscriberId {
        self.engine.subscribe(handler)
    }

    /// Removes a notification handler.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.engine.unsubscribe(id);
    }

    fn apply_start(&mut self, tour_id: &str) -> Result<GuideUpdate, EngineError> {
        let signal = self.engine.start(tour_id)?;
        // The cue history belongs to the run that just ended; a rejected
        // start leaves the active run and its history alone
        self.audio.reset();
        Ok(self.update_for(signal))
    }

    fn update_for(&mut self, signal: TourSignal) -> GuideUpdate {
        let audio = match &signal {
            TourSignal::Active { tour_id, step, .. } => self.audio.cue(tour_id, step),
            _ => None,
        };
        GuideUpdate { signal, audio }
    }
}
