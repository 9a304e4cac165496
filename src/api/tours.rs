//! Tour Endpoints
//!
//! Read-only HTTP access to the tour configuration:
//!
//! - `GET /api/tours` lists the available tour ids
//! - `GET /api/tours/{tour_id}` returns one full tour definition
//!
//! Every request re-reads the configuration file, so edits to it show up
//! without a restart. A document that fails to parse or validate is
//! reported as a configuration failure even when the requested tour id
//! does not exist in it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{debug, error};
use serde_json::json;

use crate::tour::loader::{self, LoadError};

use super::ApiState;

/// Routes for the `/api/tours` subtree.
pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/", get(list_tours))
        .route("/{tour_id}", get(get_tour))
}

async fn list_tours(State(state): State<ApiState>) -> Response {
    match loader::load_tours(&state.tours_path) {
        Ok(tours) => {
            let ids: Vec<&str> = tours.iter().map(|t| t.id.as_str()).collect();
            Json(json!({ "tours": ids })).into_response()
        }
        Err(err) => config_failure(&err),
    }
}

async fn get_tour(State(state): State<ApiState>, Path(tour_id): Path<String>) -> Response {
    match loader::load_tour(&state.tours_path, &tour_id) {
        Ok(tour) => (StatusCode::OK, Json(tour)).into_response(),
        Err(err @ LoadError::TourNotFound(_)) => {
            debug!("Request for unknown tour '{}'", tour_id);
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response()
        }
        Err(err) => config_failure(&err),
    }
}

// The generic body keeps configuration details (paths, YAML internals)
// out of client-facing responses; the log line carries the specifics.
fn config_failure(err: &LoadError) -> Response {
    error!("Failed to load tour configuration: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Failed to load tour configuration" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use tempfile::{tempdir, TempDir};

    const TOURS_YAML: &str = r##"
quick_tour:
  - id: welcome
    order: 0
    promptText: Welcome to the patient portal.
    audioRef: welcome.mp3
  - id: dashboard
    order: 1
    promptText: This is your dashboard.
    targetAnchor: "#dashboard"
  - id: finish
    order: 2
    promptText: That's the end of the tour.
appointment_booking_tour:
  - id: open_booking
    promptText: Open the booking page.
"##;

    fn fixture_state() -> (TempDir, ApiState) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tours.yaml");
        std::fs::write(&path, TOURS_YAML).unwrap();
        (dir, ApiState { tours_path: path })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_tour_returns_definition() {
        let (_dir, state) = fixture_state();

        let response = get_tour(State(state), Path("quick_tour".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["id"], "quick_tour");
        assert_eq!(body["steps"].as_array().unwrap().len(), 3);
        assert_eq!(body["steps"][0]["id"], "welcome");
        assert_eq!(body["steps"][0]["promptText"], "Welcome to the patient portal.");
        assert_eq!(body["steps"][1]["targetAnchor"], "#dashboard");
    }

    #[tokio::test]
    async fn test_get_tour_not_found() {
        let (_dir, state) = fixture_state();

        let response = get_tour(State(state), Path("grand_tour".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Tour with ID grand_tour not found");
    }

    #[tokio::test]
    async fn test_missing_file_is_a_config_failure() {
        let state = ApiState {
            tours_path: PathBuf::from("/nonexistent/tours.yaml"),
        };

        let response = get_tour(State(state), Path("quick_tour".to_string())).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to load tour configuration");
    }

    #[tokio::test]
    async fn test_broken_document_outranks_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tours.yaml");
        std::fs::write(&path, "this is not valid yaml: [[[").unwrap();
        let state = ApiState { tours_path: path };

        // The id is unknown too, but a broken document is never a 404
        let response = get_tour(State(state), Path("grand_tour".to_string())).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Failed to load tour configuration");
    }

    #[tokio::test]
    async fn test_list_tours_in_document_order() {
        let (_dir, state) = fixture_state();

        let response = list_tours(State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(
            body["tours"],
            serde_json::json!(["quick_tour", "appointment_booking_tour"])
        );
    }

    #[tokio::test]
    async fn test_list_tours_config_failure() {
        let state = ApiState {
            tours_path: PathBuf::from("/nonexistent/tours.yaml"),
        };

        let response = list_tours(State(state)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
