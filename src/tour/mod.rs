//! Tour Definition Module
//!
//! Provides data structures and utilities for defining, loading, and
//! validating guided tours.
//!
//! # Structure
//!
//! - [`model`]: Core data structures (TourStep, TourDefinition)
//! - [`catalog`]: The read-only catalog the engine draws tours from
//! - [`loader`]: YAML parsing and loading
//! - [`validator`]: Validation rules and order compilation
//! - [`builtin`]: Code-defined fallback tours

pub mod builtin;
pub mod catalog;
pub mod loader;
pub mod model;
pub mod validator;

pub use catalog::TourCatalog;
pub use loader::{bootstrap_catalog, load_tour, load_tours, LoadError, RawStep};
pub use model::{TourDefinition, TourStep};
pub use validator::TourValidationError;
