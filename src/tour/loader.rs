//! Tour Configuration Loader
//!
//! Loads guided tours from the declarative YAML source. Top-level keys are
//! tour identifiers; each value is a list of step records. The source file
//! is read fresh on every call, so edits show up without a restart. The
//! tour API relies on that when serving definitions per request.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

use super::builtin;
use super::catalog::TourCatalog;
use super::model::TourDefinition;
use super::validator::{compile_tour, TourValidationError};

/// A step record as written in the declarative source, before ordering and
/// uniqueness have been established.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawStep {
    /// Step identifier, unique within its tour
    pub id: String,

    /// Explicit position; omitted means "use document position"
    #[serde(default)]
    pub order: Option<i64>,

    /// Guidance text for the step
    pub prompt_text: String,

    /// Selector of the UI element the step points at
    #[serde(default)]
    pub target_anchor: Option<String>,

    /// Audio clip cued when the step becomes current
    #[serde(default)]
    pub audio_ref: Option<String>,
}

/// Error raised while loading tours from the declarative source.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read tour configuration '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse tour configuration: {0}")]
    Parse(String),

    #[error(transparent)]
    Validation(#[from] TourValidationError),

    #[error("Tour with ID {0} not found")]
    TourNotFound(String),
}

/// Loads every tour from a YAML file, in document order.
///
/// This function:
/// 1. Reads the file
/// 2. Parses the YAML into raw step records
/// 3. Validates and compiles each tour (see [`crate::tour::validator`])
///
/// # Arguments
///
/// * `path` - Path to the declarative tour source
///
/// # Returns
///
/// * `Ok(Vec<TourDefinition>)` - Every tour in the document, compiled
/// * `Err(LoadError)` - Read, parse, or validation failure
///
/// # Example
///
/// ```rust,no_run
/// use tourguide::tour::load_tours;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let tours = load_tours("config/tours.yaml")?;
///     println!("Loaded {} tours", tours.len());
///     Ok(())
/// }
/// ```
pub fn load_tours(path: impl AsRef<Path>) -> Result<Vec<TourDefinition>, LoadError> {
    let path = path.as_ref();
    info!("Loading tour configuration from: {}", path.display());

    let yaml_content = fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!("Tour configuration read ({} bytes)", yaml_content.len());

    parse_tours(&yaml_content)
}

/// Parses a declarative tour document into compiled definitions.
///
/// Document order is preserved, which makes catalog registration order
/// deterministic for a given source file.
pub fn parse_tours(yaml_content: &str) -> Result<Vec<TourDefinition>, LoadError> {
    let document: Value = serde_yaml::from_str(yaml_content)
        .map_err(|e| LoadError::Parse(format!("{}. Check the file format.", e)))?;

    let mapping = match document {
        Value::Mapping(mapping) => mapping,
        _ => return Err(TourValidationError::NotAMapping.into()),
    };

    let mut tours = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let tour_id = match key {
            Value::String(id) => id,
            _ => return Err(TourValidationError::TourIdNotAString.into()),
        };

        let entries = match value {
            Value::Sequence(entries) => entries,
            _ => return Err(TourValidationError::StepsNotASequence { tour: tour_id }.into()),
        };

        let mut raw_steps = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            let raw: RawStep = serde_yaml::from_value(entry).map_err(|e| {
                LoadError::Parse(format!("tour '{}', step {}: {}", tour_id, position, e))
            })?;
            raw_steps.push(raw);
        }

        tours.push(compile_tour(&tour_id, raw_steps)?);
    }

    info!("Parsed {} tour(s) from configuration", tours.len());
    Ok(tours)
}

/// Loads a single tour by id from a YAML file.
///
/// The whole document is validated first: a malformed or invalid source
/// fails with the document-level error even when the requested tour is the
/// valid part. `TourNotFound` means the document itself was fine.
pub fn load_tour(path: impl AsRef<Path>, tour_id: &str) -> Result<TourDefinition, LoadError> {
    let tours = load_tours(path)?;

    tours
        .into_iter()
        .find(|t| t.id == tour_id)
        .ok_or_else(|| LoadError::TourNotFound(tour_id.to_string()))
}

/// Builds the startup catalog: built-in tours first, then the declarative
/// source layered on top, with same-id tours from the source replacing the
/// built-in version.
///
/// A missing or invalid source file is not fatal: the built-in tours keep
/// the guided flow usable, which is the same fallback the patient portal UI
/// applies when configuration cannot be fetched.
pub fn bootstrap_catalog(path: impl AsRef<Path>) -> TourCatalog {
    let mut definitions = builtin::builtin_tours().to_vec();

    match load_tours(path) {
        Ok(loaded) => {
            info!("Tour source supplied {} tour(s)", loaded.len());
            definitions.extend(loaded);
        }
        Err(e) => {
            warn!("Using built-in tours only: {}", e);
        }
    }

    TourCatalog::from_definitions(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_source(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tours.yaml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    const QUICK_TOUR_YAML: &str = r##"
quick_tour:
  - id: welcome
    order: 0
    promptText: Welcome to the portal.
  - id: dashboard
    order: 1
    promptText: This is your dashboard.
    targetAnchor: "#dashboard"
  - id: finish
    order: 2
    promptText: That's the end of the tour.
"##;

    #[test]
    fn test_load_tours_valid() {
        let (_dir, path) = write_source(QUICK_TOUR_YAML);

        let tours = load_tours(&path).unwrap();
        assert_eq!(tours.len(), 1);
        assert_eq!(tours[0].id, "quick_tour");

        let ids: Vec<&str> = tours[0].steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["welcome", "dashboard", "finish"]);
        assert_eq!(tours[0].steps[1].target_anchor.as_deref(), Some("#dashboard"));
    }

    #[test]
    fn test_load_tours_preserves_document_order() {
        let (_dir, path) = write_source(
            r#"
second_tour:
  - id: only
    promptText: Step.
first_tour:
  - id: only
    promptText: Step.
"#,
        );

        let tours = load_tours(&path).unwrap();
        let ids: Vec<&str> = tours.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["second_tour", "first_tour"]);
    }

    #[test]
    fn test_load_tours_picks_up_file_edits() {
        let (_dir, path) = write_source(QUICK_TOUR_YAML);
        let ids: Vec<String> = load_tours(&path)
            .unwrap()
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(ids, vec!["quick_tour"]);

        // No restart between loads; the rewrite alone must show up
        std::fs::write(
            &path,
            "billing_tour:\n  - id: statements\n    promptText: View your statements here.\n",
        )
        .unwrap();

        let tours = load_tours(&path).unwrap();
        let ids: Vec<&str> = tours.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["billing_tour"]);
        assert_eq!(tours[0].steps[0].id, "statements");
    }

    #[test]
    fn test_load_tours_missing_file() {
        let result = load_tours("/nonexistent/path/tours.yaml");
        assert!(matches!(result, Err(LoadError::Read { .. })));
    }

    #[test]
    fn test_load_tours_invalid_yaml() {
        let (_dir, path) = write_source("this is not valid yaml: [[[");
        let result = load_tours(&path);
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_load_tours_top_level_not_a_mapping() {
        let (_dir, path) = write_source("- welcome\n- finish\n");
        match load_tours(&path) {
            Err(LoadError::Validation(e)) => assert_eq!(e.rule(), "top-level-mapping"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_tours_steps_not_a_sequence() {
        let (_dir, path) = write_source("quick_tour: 42\n");
        match load_tours(&path) {
            Err(LoadError::Validation(e)) => assert_eq!(e.rule(), "steps-sequence"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_tours_step_type_mismatch_is_parse_error() {
        // promptText must be a string, not a list
        let (_dir, path) = write_source(
            r#"
quick_tour:
  - id: welcome
    promptText:
      - not
      - a
      - string
"#,
        );

        match load_tours(&path) {
            Err(LoadError::Parse(msg)) => assert!(msg.contains("quick_tour")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_tours_missing_prompt_text_is_parse_error() {
        let (_dir, path) = write_source("quick_tour:\n  - id: welcome\n");
        assert!(matches!(load_tours(&path), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_duplicate_order_fails_validation() {
        let (_dir, path) = write_source(
            r#"
quick_tour:
  - id: welcome
    order: 0
    promptText: Welcome.
  - id: dashboard
    order: 0
    promptText: Dashboard.
"#,
        );

        match load_tours(&path) {
            Err(LoadError::Validation(e)) => assert_eq!(e.rule(), "duplicate-order"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_tour_found() {
        let (_dir, path) = write_source(QUICK_TOUR_YAML);
        let tour = load_tour(&path, "quick_tour").unwrap();
        assert_eq!(tour.len(), 3);
    }

    #[test]
    fn test_load_tour_not_found() {
        let (_dir, path) = write_source(QUICK_TOUR_YAML);
        match load_tour(&path, "grand_tour") {
            Err(LoadError::TourNotFound(id)) => {
                assert_eq!(id, "grand_tour");
            }
            other => panic!("expected not-found, got {:?}", other),
        }
    }

    #[test]
    fn test_not_found_message_matches_api_contract() {
        let err = LoadError::TourNotFound("quick_tour".to_string());
        assert_eq!(err.to_string(), "Tour with ID quick_tour not found");
    }

    #[test]
    fn test_document_failure_dominates_not_found() {
        // The requested tour id is absent AND the document is invalid; the
        // document-level failure wins.
        let (_dir, path) = write_source(
            r#"
quick_tour:
  - id: a
    order: 0
    promptText: First.
  - id: b
    order: 0
    promptText: Second.
"#,
        );

        assert!(matches!(
            load_tour(&path, "some_other_tour"),
            Err(LoadError::Validation(_))
        ));
    }

    #[test]
    fn test_bootstrap_catalog_falls_back_to_builtins() {
        let catalog = bootstrap_catalog("/nonexistent/tours.yaml");
        assert!(catalog.contains("quick_tour"));
        assert!(catalog.contains("appointment_booking_tour"));
    }

    #[test]
    fn test_bootstrap_catalog_source_overrides_builtin() {
        let (_dir, path) = write_source(
            r#"
quick_tour:
  - id: replacement
    promptText: Replaced by the source file.
"#,
        );

        let catalog = bootstrap_catalog(&path);
        // The source's quick_tour wins; the other built-in survives
        assert_eq!(catalog.get("quick_tour").unwrap().len(), 1);
        assert_eq!(catalog.get("quick_tour").unwrap().steps[0].id, "replacement");
        assert!(catalog.contains("appointment_booking_tour"));
    }

    #[test]
    fn test_parse_tours_empty_document() {
        let result = parse_tours("");
        assert!(matches!(
            result,
            Err(LoadError::Validation(TourValidationError::NotAMapping))
        ));
    }
}
