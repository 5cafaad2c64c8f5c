use serde::Serialize;

use crate::config::AuthConfig;

/// An authenticated campus. The campus is its own username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampusIdentity {
    pub username: String,
    pub campus: String,
}

impl CampusIdentity {
    pub fn new(campus: impl Into<String>) -> Self {
        let campus = campus.into();
        Self {
            username: campus.clone(),
            campus,
        }
    }
}

/// Decides whether a username/password pair identifies a campus.
pub trait CampusVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> Option<CampusIdentity>;
}

/// Fixed allow-list of campuses sharing one password.
pub struct StaticCampusDirectory {
    campuses: Vec<String>,
    password: String,
}

impl StaticCampusDirectory {
    pub fn new(campuses: Vec<String>, password: impl Into<String>) -> Self {
        Self {
            campuses,
            password: password.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.campuses.clone(), config.shared_password.clone())
    }
}

impl CampusVerifier for StaticCampusDirectory {
    fn verify(&self, username: &str, password: &str) -> Option<CampusIdentity> {
        let known = self.campuses.iter().any(|c| c == username);
        (known && password == self.password).then(|| CampusIdentity::new(username))
    }
}
