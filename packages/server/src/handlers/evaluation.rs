use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthCampus;
use crate::extractors::json::AppJson;
use crate::models::evaluation::{ResultsResponse, SubmitEvaluationRequest};
use crate::models::shared::MessageResponse;
use crate::services::SubmissionAggregator;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/submitEvaluation",
    tag = "Evaluations",
    operation_id = "submitEvaluation",
    summary = "Submit a jury's evaluation of a student",
    description = "Records the 18 criterion scores and comments. The jury and the student must currently be listed on the session. Every score must be a number or a numeric string.",
    request_body = SubmitEvaluationRequest,
    responses(
        (status = 200, description = "Evaluation recorded", body = MessageResponse),
        (status = 400, description = "Invalid session, jury, student or score (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Owned by another campus (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("session_cookie" = [])),
)]
#[instrument(skip(state, auth, payload), fields(campus = %auth.0.campus, session_id = ?payload.session_id))]
pub async fn submit_evaluation(
    auth: AuthCampus,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitEvaluationRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    SubmissionAggregator::new(&state.store)
        .submit(&auth.0, payload)
        .await?;
    Ok(Json(MessageResponse::new("Evaluation submitted.")))
}

#[utoipa::path(
    get,
    path = "/resultsWithAverages",
    tag = "Evaluations",
    operation_id = "resultsWithAverages",
    summary = "Raw submissions and per-student averages",
    description = "Returns the campus's sessions, every submission recorded for them, and one row per (session, student) with the mean of each criterion, in first-submission order.",
    responses(
        (status = 200, description = "Results of the campus", body = ResultsResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("session_cookie" = [])),
)]
#[instrument(skip(state, auth), fields(campus = %auth.0.campus))]
pub async fn results_with_averages(
    auth: AuthCampus,
    State(state): State<AppState>,
) -> Json<ResultsResponse> {
    Json(
        SubmissionAggregator::new(&state.store)
            .results_with_averages(&auth.0.campus)
            .await,
    )
}
