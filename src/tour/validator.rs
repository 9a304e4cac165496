//! Tour Validation
//!
//! Validates raw step records from the declarative source and compiles them
//! into ordered [`TourDefinition`]s:
//! - the document must be a mapping of tour ids to step sequences
//! - each step list must be non-empty
//! - explicit `order` values must be unique and non-negative; omitted values
//!   take the step's document position
//! - step ids must be unique and non-empty within a tour
//!
//! Every error exposes the identifier of the rule it violated via
//! [`TourValidationError::rule`], so callers can report which check failed
//! rather than just that one did.

use std::collections::HashSet;

use log::debug;
use thiserror::Error;

use super::loader::RawStep;
use super::model::{TourDefinition, TourStep};

/// Validation error raised while compiling a tour from raw records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TourValidationError {
    #[error("Tour configuration must be a top-level mapping of tour ids to step lists")]
    NotAMapping,

    #[error("Tour configuration keys must be strings")]
    TourIdNotAString,

    #[error("Tour '{tour}': steps must be a sequence of step records")]
    StepsNotASequence { tour: String },

    #[error("Tour '{tour}' has no steps")]
    EmptySteps { tour: String },

    #[error("Tour '{tour}': step at position {position} has an empty id")]
    EmptyStepId { tour: String, position: usize },

    #[error("Tour '{tour}': step '{step}' has negative order {order}")]
    NegativeOrder { tour: String, step: String, order: i64 },

    #[error("Tour '{tour}': duplicate step order {order}")]
    DuplicateOrder { tour: String, order: usize },

    #[error("Tour '{tour}': duplicate step id '{step}'")]
    DuplicateStepId { tour: String, step: String },
}

impl TourValidationError {
    /// Stable identifier of the validation rule this error violated.
    pub fn rule(&self) -> &'static str {
        match self {
            Self::NotAMapping | Self::TourIdNotAString => "top-level-mapping",
            Self::StepsNotASequence { .. } => "steps-sequence",
            Self::EmptySteps { .. } => "empty-steps",
            Self::EmptyStepId { .. } => "step-id-required",
            Self::NegativeOrder { .. } => "order-non-negative",
            Self::DuplicateOrder { .. } => "duplicate-order",
            Self::DuplicateStepId { .. } => "duplicate-step-id",
        }
    }
}

/// Compiles one tour's raw step records into a [`TourDefinition`].
///
/// Performs the following checks:
/// 1. The step list is non-empty
/// 2. Every step has a non-empty, unique id
/// 3. Explicit `order` values are non-negative; omitted values take the
///    step's document position
/// 4. No two steps end up with the same order
///
/// On success, steps are sorted by their raw order and renumbered so
/// positions are contiguous and zero-based, even when the source used
/// sparse explicit values. Nothing downstream re-sorts.
pub fn compile_tour(
    tour_id: &str,
    raw_steps: Vec<RawStep>,
) -> Result<TourDefinition, TourValidationError> {
    debug!(
        "Compiling tour '{}' from {} raw step record(s)",
        tour_id,
        raw_steps.len()
    );

    if raw_steps.is_empty() {
        return Err(TourValidationError::EmptySteps {
            tour: tour_id.to_string(),
        });
    }

    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_orders: HashSet<usize> = HashSet::new();
    let mut steps: Vec<TourStep> = Vec::with_capacity(raw_steps.len());

    for (position, raw) in raw_steps.into_iter().enumerate() {
        let id = raw.id.trim().to_string();
        if id.is_empty() {
            return Err(TourValidationError::EmptyStepId {
                tour: tour_id.to_string(),
                position,
            });
        }
        if !seen_ids.insert(id.clone()) {
            return Err(TourValidationError::DuplicateStepId {
                tour: tour_id.to_string(),
                step: id,
            });
        }

        // Explicit order wins; otherwise the document position stands in.
        let order = match raw.order {
            Some(value) if value < 0 => {
                return Err(TourValidationError::NegativeOrder {
                    tour: tour_id.to_string(),
                    step: id,
                    order: value,
                });
            }
            Some(value) => value as usize,
            None => position,
        };
        if !seen_orders.insert(order) {
            return Err(TourValidationError::DuplicateOrder {
                tour: tour_id.to_string(),
                order,
            });
        }

        let mut step = TourStep::new(id, raw.prompt_text).with_order(order);
        step.target_anchor = raw.target_anchor;
        step.audio_ref = raw.audio_ref;
        steps.push(step);
    }

    steps.sort_by_key(|s| s.order);
    if steps.iter().enumerate().any(|(i, s)| s.order != i) {
        debug!("Tour '{}': normalizing sparse step orders", tour_id);
        for (index, step) in steps.iter_mut().enumerate() {
            step.order = index;
        }
    }

    Ok(TourDefinition::from_steps(tour_id, steps))
}
