use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for campus login.
///
/// Both fields are optional so that any combination yields a
/// `success: false` answer rather than a request error.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    /// Campus identifier, which doubles as the username.
    #[schema(example = "Toulouse")]
    pub username: Option<String>,
    /// Shared campus password.
    #[schema(example = "demo")]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Read credentials from a raw body. Anything that is not a JSON object
    /// with string fields leaves the corresponding field empty.
    pub fn from_body(body: &[u8]) -> Self {
        let value: Value = serde_json::from_slice(body).unwrap_or_default();
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            username: field("username"),
            password: field("password"),
        }
    }
}

/// Login outcome. Failed logins are reported here, not as HTTP errors.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    #[schema(example = "Login successful.")]
    pub message: String,
    /// Present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Toulouse")]
    pub campus: Option<String>,
}

impl LoginResponse {
    pub fn accepted(campus: String) -> Self {
        Self {
            success: true,
            message: "Login successful.".into(),
            campus: Some(campus),
        }
    }

    pub fn rejected() -> Self {
        Self {
            success: false,
            message: "Invalid credentials.".into(),
            campus: None,
        }
    }
}

/// Whether the caller currently holds a valid campus session.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckSessionResponse {
    pub logged_in: bool,
    #[schema(example = "Toulouse")]
    pub campus: Option<String>,
}
