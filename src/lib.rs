//! Tourguide - Guided Tour Engine for the Patient Portal
//!
//! A service that walks patients step by step through unfamiliar screens:
//! tours are authored declaratively in YAML, compiled into validated
//! definitions, and run by a small state machine that reports every
//! transition to interested observers.
//!
//! # Architecture
//!
//! The library is organized into three main modules:
//!
//! - [`tour`]: Tour definitions, the YAML loader, and the catalog
//! - [`guide`]: The state machine that runs a tour, plus signals and audio
//! - [`api`]: HTTP access to the tour configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tourguide::guide::TourEngine;
//! use tourguide::tour::bootstrap_catalog;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Built-in tours, overridden by whatever the file defines
//!     let catalog = bootstrap_catalog("config/tours.yaml");
//!
//!     let mut engine = TourEngine::new(Arc::new(catalog));
//!     engine.subscribe(|signal| println!("{:?}", signal));
//!
//!     // Walk the quick tour to the end
//!     engine.start("quick_tour")?;
//!     while !engine.state().is_idle() {
//!         engine.advance()?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod guide;
pub mod tour;

// Re-export commonly used types
pub use guide::engine::{EngineError, EngineState, TourEngine};
pub use guide::session::TourSession;
pub use guide::signal::TourSignal;
pub use tour::catalog::TourCatalog;
pub use tour::loader::{bootstrap_catalog, load_tour, load_tours};
pub use tour::model::{TourDefinition, TourStep};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Tourguide";
