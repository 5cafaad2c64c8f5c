use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::directory::CampusIdentity;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt;

/// Name of the cookie carrying the campus session token.
pub const SESSION_COOKIE: &str = "evalboard_session";

/// Authenticated campus, taken from the session cookie or an
/// `Authorization: Bearer <token>` header.
///
/// Add this as a handler parameter to require a logged-in campus.
/// Ownership of a targeted session is checked separately, see `utils::access`.
pub struct AuthCampus(pub CampusIdentity);

impl FromRequestParts<AppState> for AuthCampus {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        identity_from_headers(&parts.headers, &state.config.auth.jwt_secret).map(AuthCampus)
    }
}

/// Resolve the campus identity carried by a request.
pub fn identity_from_headers(headers: &HeaderMap, secret: &str) -> Result<CampusIdentity, AppError> {
    let jar = CookieJar::from_headers(headers);
    let token = match jar.get(SESSION_COOKIE) {
        Some(cookie) => cookie.value().to_owned(),
        None => {
            let header = headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .ok_or(AppError::TokenMissing)?;
            header
                .strip_prefix("Bearer ")
                .ok_or(AppError::TokenInvalid)?
                .to_owned()
        }
    };

    let claims = jwt::verify(&token, secret).map_err(|_| AppError::TokenInvalid)?;
    Ok(CampusIdentity::new(claims.sub))
}

/// Cookie holding a freshly signed session token.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Cookie that, once added to a jar, makes the browser drop the session.
pub fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}
