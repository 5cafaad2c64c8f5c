use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An evaluation session owned by one campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Session {
    pub id: Uuid,
    #[schema(example = "C#22")]
    pub name: String,
    /// Owning campus. Never changes after creation.
    #[schema(example = "Toulouse")]
    pub campus: String,
    /// Jury names in insertion order. Duplicates are allowed.
    #[serde(default)]
    pub juries: Vec<String>,
    /// Student names in insertion order. Duplicates are allowed.
    #[serde(default)]
    pub students: Vec<String>,
}

impl Session {
    pub fn new(name: String, campus: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            campus,
            juries: Vec::new(),
            students: Vec::new(),
        }
    }
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(default)]
pub struct CreateSessionRequest {
    #[schema(example = "C#22")]
    pub name: Option<String>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct JuryRequest {
    #[schema(example = "Hugo")]
    pub jury_name: Option<String>,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentRequest {
    #[schema(example = "Fabien")]
    pub student_name: Option<String>,
}

/// A message together with the session it concerns, as it is after the change.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SessionResponse {
    #[schema(example = "Jury added.")]
    pub message: String,
    pub session: Session,
}

impl SessionResponse {
    pub fn new(message: impl Into<String>, session: Session) -> Self {
        Self {
            message: message.into(),
            session,
        }
    }
}
