use axum::{Json, body::Bytes, extract::State, http::HeaderMap, response::Redirect};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{cleared_session_cookie, identity_from_headers, session_cookie};
use crate::models::auth::{CheckSessionResponse, LoginRequest, LoginResponse};
use crate::state::AppState;
use crate::utils::jwt;

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in as a campus",
    description = "Checks the campus against the allow-list and the shared password. Wrong credentials and unreadable bodies are reported with `success: false` and status 200. On success the session cookie is set.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login outcome", body = LoginResponse),
        (status = 500, description = "Session token could not be issued (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, jar, body), fields(username))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let payload = LoginRequest::from_body(&body);
    let username = payload.username.as_deref().unwrap_or_default();
    tracing::Span::current().record("username", username);
    let password = payload.password.as_deref().unwrap_or_default();

    let Some(identity) = state.campuses.verify(username, password) else {
        warn!("Rejected login");
        return Ok((jar, Json(LoginResponse::rejected())));
    };

    let auth = &state.config.auth;
    let token = jwt::sign(&identity.campus, auth.session_ttl_hours, &auth.jwt_secret)
        .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    info!(campus = %identity.campus, "Campus logged in");
    Ok((
        jar.add(session_cookie(token)),
        Json(LoginResponse::accepted(identity.campus)),
    ))
}

#[utoipa::path(
    get,
    path = "/logout",
    tag = "Auth",
    operation_id = "logout",
    summary = "Log out",
    description = "Clears the session cookie and redirects to `/`.",
    responses(
        (status = 303, description = "Session cleared, redirect to /"),
    ),
)]
#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(cleared_session_cookie()), Redirect::to("/"))
}

#[utoipa::path(
    get,
    path = "/checkSession",
    tag = "Auth",
    operation_id = "checkSession",
    summary = "Report the current login state",
    description = "Never fails. Reports `loggedIn: false` when no valid session is presented.",
    responses(
        (status = 200, description = "Login state", body = CheckSessionResponse),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn check_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<CheckSessionResponse> {
    let campus = identity_from_headers(&headers, &state.config.auth.jwt_secret)
        .ok()
        .map(|identity| identity.campus);

    Json(CheckSessionResponse {
        logged_in: campus.is_some(),
        campus,
    })
}
