//! API error type and the `{"detail": ...}` envelope.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::{AnalyzeError, MalformedModelOutput};

/// Error response body. Every failure is flattened to a single message.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body could not be decoded into a transcript request
    #[error("{message}")]
    BadRequest { status: StatusCode, message: String },

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { status, .. } => *status,
            ApiError::Analyze(AnalyzeError::Malformed(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Analyze(AnalyzeError::Oracle(_))
            | ApiError::Analyze(AnalyzeError::Configuration(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MalformedModelOutput> for ApiError {
    fn from(err: MalformedModelOutput) -> Self {
        ApiError::Analyze(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::error!(%status, %detail, "Analysis request failed");
        } else {
            tracing::warn!(%status, %detail, "Rejected analysis request");
        }

        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::OracleError;
    use crate::application::PipelineError;
    use crate::domain::error::ConfigurationError;

    #[test]
    fn oracle_failure_is_500_with_cause() {
        let err = ApiError::from(AnalyzeError::from(PipelineError::from(
            OracleError::RateLimited("You exceeded your current quota".to_string()),
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Rate limit or quota exceeded: You exceeded your current quota"
        );
    }

    #[test]
    fn malformed_output_is_502() {
        let err = ApiError::from(MalformedModelOutput::NotAnObject);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn configuration_error_is_500() {
        let err = ApiError::from(AnalyzeError::from(ConfigurationError {
            route: "/x".to_string(),
        }));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("/x"));
    }

    #[tokio::test]
    async fn response_body_is_detail_envelope() {
        let response = ApiError::BadRequest {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "missing field `transcript`".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.detail, "missing field `transcript`");
    }
}
