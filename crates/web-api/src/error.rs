//! Maps service errors onto HTTP responses.
//!
//! Validation failures carry the offending field so the form can point
//! at it; reference failures are plain 404s; storage failures are
//! logged server-side and surfaced as an opaque 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use agent_roi_studies::ServiceError;

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

/// An HTTP-ready error.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    /// A 404 for a missing study.
    #[must_use]
    pub fn study_not_found(id: i32) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorBody {
                error: format!("study not found: {id}"),
                field: None,
            },
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation { field, .. } => Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorBody {
                    error: err.to_string(),
                    field: Some(field),
                },
            },
            ServiceError::AgentNotFound { .. } | ServiceError::StudyNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                body: ErrorBody {
                    error: err.to_string(),
                    field: None,
                },
            },
            ServiceError::Storage(source) => {
                tracing::error!(error = %source, "storage failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorBody {
                        error: "storage error".to_string(),
                        field: None,
                    },
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
