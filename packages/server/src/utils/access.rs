use uuid::Uuid;

use crate::directory::CampusIdentity;
use crate::error::AppError;
use crate::models::session::Session;
use crate::store::Document;

fn not_found() -> AppError {
    AppError::NotFound("Session not found.".into())
}

/// Position of the session with the given id. Ids that are not UUIDs match nothing.
pub fn session_position(document: &Document, id: &str) -> Option<usize> {
    let id = Uuid::parse_str(id).ok()?;
    document.sessions.iter().position(|s| s.id == id)
}

/// Verify the caller's campus owns the session.
pub fn check_session_owner(identity: &CampusIdentity, session: &Session) -> Result<(), AppError> {
    if session.campus == identity.campus {
        Ok(())
    } else {
        Err(AppError::PermissionDenied)
    }
}

/// Look up a session for a mutating operation: 404 if absent, 403 if owned by another campus.
pub fn owned_session_mut<'a>(
    document: &'a mut Document,
    id: &str,
    identity: &CampusIdentity,
) -> Result<&'a mut Session, AppError> {
    let index = session_position(document, id).ok_or_else(not_found)?;
    let session = &mut document.sessions[index];
    check_session_owner(identity, session)?;
    Ok(session)
}

/// Remove a session owned by the caller, returning it.
pub fn take_owned_session(
    document: &mut Document,
    id: &str,
    identity: &CampusIdentity,
) -> Result<Session, AppError> {
    let index = session_position(document, id).ok_or_else(not_found)?;
    check_session_owner(identity, &document.sessions[index])?;
    Ok(document.sessions.remove(index))
}
