//! Guided Tour Module
//!
//! Runs tours step by step: holds the cursor, emits transition signals,
//! and decides when audio cues replay.
//!
//! # Structure
//!
//! - [`engine`]: The tour state machine (start, advance, back, jump, reset)
//! - [`signal`]: Transition signals and the subscriber registry
//! - [`session`]: Per-user driver with race-safe starts and audio pairing
//! - [`audio`]: Deduplication of per-step audio cues

pub mod audio;
pub mod engine;
pub mod session;
pub mod signal;

pub use audio::AudioCueTracker;
pub use engine::{EngineError, EngineState, TourEngine};
pub use session::{GuideUpdate, StartOutcome, StartRequest, TourSession};
pub use signal::{SubscriberId, TourSignal};
