use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthCampus;
use crate::extractors::json::AppJson;
use crate::models::session::*;
use crate::models::shared::MessageResponse;
use crate::services::SessionRegistry;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/sessions",
    tag = "Sessions",
    operation_id = "listSessions",
    summary = "List the campus's sessions",
    description = "Returns every session owned by the caller's campus, in creation order.",
    responses(
        (status = 200, description = "Sessions of the campus", body = Vec<Session>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("session_cookie" = [])),
)]
#[instrument(skip(state, auth), fields(campus = %auth.0.campus))]
pub async fn list_sessions(
    auth: AuthCampus,
    State(state): State<AppState>,
) -> Json<Vec<Session>> {
    Json(SessionRegistry::new(&state.store).list(&auth.0.campus).await)
}

#[utoipa::path(
    post,
    path = "/sessions",
    tag = "Sessions",
    operation_id = "createSession",
    summary = "Create a session",
    description = "Creates an empty session owned by the caller's campus.",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Session created", body = SessionResponse),
        (status = 400, description = "Missing name (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("session_cookie" = [])),
)]
#[instrument(skip(state, auth, payload), fields(campus = %auth.0.campus))]
pub async fn create_session(
    auth: AuthCampus,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = SessionRegistry::new(&state.store)
        .create(&auth.0, payload.name.as_deref())
        .await?;
    Ok(Json(SessionResponse::new("Session created.", session)))
}

#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    tag = "Sessions",
    operation_id = "deleteSession",
    summary = "Delete a session",
    description = "Deletes the session together with every submission recorded for it.",
    params(("id" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Owned by another campus (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Session not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("session_cookie" = [])),
)]
#[instrument(skip(state, auth), fields(campus = %auth.0.campus))]
pub async fn delete_session(
    auth: AuthCampus,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    SessionRegistry::new(&state.store)
        .delete(&auth.0, &id)
        .await?;
    Ok(Json(MessageResponse::new("Session deleted.")))
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/juries",
    tag = "Session Rosters",
    operation_id = "addJury",
    summary = "Add a jury member",
    description = "Appends the name to the session's jury list. Duplicates are kept.",
    params(("id" = String, Path, description = "Session ID")),
    request_body = JuryRequest,
    responses(
        (status = 200, description = "Jury added", body = SessionResponse),
        (status = 400, description = "Missing name (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Owned by another campus (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Session not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("session_cookie" = [])),
)]
#[instrument(skip(state, auth, payload), fields(campus = %auth.0.campus))]
pub async fn add_jury(
    auth: AuthCampus,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<JuryRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = SessionRegistry::new(&state.store)
        .add_jury(&auth.0, &id, payload.jury_name.as_deref())
        .await?;
    Ok(Json(SessionResponse::new("Jury added.", session)))
}

#[utoipa::path(
    delete,
    path = "/sessions/{id}/juries",
    tag = "Session Rosters",
    operation_id = "removeJury",
    summary = "Remove a jury member",
    description = "Removes every occurrence of the name. Succeeds even if the name is not listed.",
    params(("id" = String, Path, description = "Session ID")),
    request_body = JuryRequest,
    responses(
        (status = 200, description = "Jury removed", body = SessionResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Owned by another campus (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Session not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("session_cookie" = [])),
)]
#[instrument(skip(state, auth, payload), fields(campus = %auth.0.campus))]
pub async fn remove_jury(
    auth: AuthCampus,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<AppJson<JuryRequest>>,
) -> Result<Json<SessionResponse>, AppError> {
    let name = payload.and_then(|AppJson(p)| p.jury_name);
    let session = SessionRegistry::new(&state.store)
        .remove_jury(&auth.0, &id, name.as_deref())
        .await?;
    Ok(Json(SessionResponse::new("Jury removed.", session)))
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/students",
    tag = "Session Rosters",
    operation_id = "addStudent",
    summary = "Add a student",
    description = "Appends the name to the session's student list. Duplicates are kept.",
    params(("id" = String, Path, description = "Session ID")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student added", body = SessionResponse),
        (status = 400, description = "Missing name (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Owned by another campus (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Session not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("session_cookie" = [])),
)]
#[instrument(skip(state, auth, payload), fields(campus = %auth.0.campus))]
pub async fn add_student(
    auth: AuthCampus,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<StudentRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = SessionRegistry::new(&state.store)
        .add_student(&auth.0, &id, payload.student_name.as_deref())
        .await?;
    Ok(Json(SessionResponse::new("Student added.", session)))
}

#[utoipa::path(
    delete,
    path = "/sessions/{id}/students",
    tag = "Session Rosters",
    operation_id = "removeStudent",
    summary = "Remove a student",
    description = "Removes every occurrence of the name. Succeeds even if the name is not listed.",
    params(("id" = String, Path, description = "Session ID")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student removed", body = SessionResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Owned by another campus (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Session not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("session_cookie" = [])),
)]
#[instrument(skip(state, auth, payload), fields(campus = %auth.0.campus))]
pub async fn remove_student(
    auth: AuthCampus,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<AppJson<StudentRequest>>,
) -> Result<Json<SessionResponse>, AppError> {
    let name = payload.and_then(|AppJson(p)| p.student_name);
    let session = SessionRegistry::new(&state.store)
        .remove_student(&auth.0, &id, name.as_deref())
        .await?;
    Ok(Json(SessionResponse::new("Student removed.", session)))
}
