//! Transcript analysis endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use crate::api::error::ApiError;
use crate::application::AnalysisService;
use crate::domain::analysis::{ProfileId, TranscriptRequest};

/// `POST /generate-overview`: coarse assessment of a transcript.
pub async fn generate_overview(
    State(service): State<Arc<AnalysisService>>,
    payload: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    analyze(&service, ProfileId::Overview, payload).await
}

/// `POST /generate-detailed-analysis`: exhaustive, nested assessment.
pub async fn generate_detailed(
    State(service): State<Arc<AnalysisService>>,
    payload: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    analyze(&service, ProfileId::Detailed, payload).await
}

/// Decode, run the profile bound to its route, and send the oracle text back
/// as the body without re-encoding it.
async fn analyze(
    service: &AnalysisService,
    profile: ProfileId,
    payload: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;

    info!(
        profile = %profile,
        transcript_len = request.transcript.len(),
        "Analysis requested"
    );

    let result = service
        .analyze(profile.route(), &request.transcript)
        .await?;

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        result.into_raw(),
    )
        .into_response())
}
