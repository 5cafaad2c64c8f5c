use tracing::info;

use crate::directory::CampusIdentity;
use crate::error::AppError;
use crate::models::session::Session;
use crate::models::shared::{optional_name, require_name};
use crate::store::Store;
use crate::utils::access::{owned_session_mut, take_owned_session};

/// One of the two name lists a session carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Roster {
    Juries,
    Students,
}

impl Roster {
    fn names_mut(self, session: &mut Session) -> &mut Vec<String> {
        match self {
            Roster::Juries => &mut session.juries,
            Roster::Students => &mut session.students,
        }
    }

    fn missing_name_message(self) -> &'static str {
        match self {
            Roster::Juries => "Jury name is required.",
            Roster::Students => "Student name is required.",
        }
    }
}

/// Campus-scoped CRUD over evaluation sessions.
pub struct SessionRegistry<'a> {
    store: &'a Store,
}

impl<'a> SessionRegistry<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create an empty session owned by the caller's campus.
    pub async fn create(
        &self,
        identity: &CampusIdentity,
        name: Option<&str>,
    ) -> Result<Session, AppError> {
        let name = require_name(name, "Session name is required.")?;
        let session = Session::new(name, identity.campus.clone());

        let created = self
            .store
            .mutate(|doc| {
                doc.sessions.push(session.clone());
                Ok::<_, AppError>(session)
            })
            .await?;

        info!(session_id = %created.id, campus = %created.campus, "Session created");
        Ok(created)
    }

    /// Sessions owned by `campus`, in insertion order.
    pub async fn list(&self, campus: &str) -> Vec<Session> {
        self.store
            .read(|doc| {
                doc.sessions
                    .iter()
                    .filter(|s| s.campus == campus)
                    .cloned()
                    .collect()
            })
            .await
    }

    /// Delete a session and every submission that references it.
    ///
    /// Returns the number of submissions removed alongside it.
    pub async fn delete(&self, identity: &CampusIdentity, id: &str) -> Result<usize, AppError> {
        let (session, removed) = self
            .store
            .mutate(|doc| {
                let session = take_owned_session(doc, id, identity)?;
                let before = doc.submissions.len();
                doc.submissions.retain(|s| s.session_id != session.id);
                Ok::<_, AppError>((session, before - doc.submissions.len()))
            })
            .await?;

        info!(
            session_id = %session.id,
            campus = %session.campus,
            submissions_removed = removed,
            "Session deleted"
        );
        Ok(removed)
    }

    /// Append a name to a roster. Duplicates are kept.
    pub async fn add_member(
        &self,
        identity: &CampusIdentity,
        id: &str,
        roster: Roster,
        name: Option<&str>,
    ) -> Result<Session, AppError> {
        let name = require_name(name, roster.missing_name_message())?;
        self.store
            .mutate(|doc| {
                let session = owned_session_mut(doc, id, identity)?;
                roster.names_mut(session).push(name);
                Ok::<_, AppError>(session.clone())
            })
            .await
    }

    /// Remove every occurrence of a name from a roster. Absent names are not an error.
    pub async fn remove_member(
        &self,
        identity: &CampusIdentity,
        id: &str,
        roster: Roster,
        name: Option<&str>,
    ) -> Result<Session, AppError> {
        let name = optional_name(name);
        self.store
            .mutate(|doc| {
                let session = owned_session_mut(doc, id, identity)?;
                roster.names_mut(session).retain(|n| *n != name);
                Ok::<_, AppError>(session.clone())
            })
            .await
    }

    pub async fn add_jury(
        &self,
        identity: &CampusIdentity,
        id: &str,
        jury_name: Option<&str>,
    ) -> Result<Session, AppError> {
        self.add_member(identity, id, Roster::Juries, jury_name).await
    }

    pub async fn remove_jury(
        &self,
        identity: &CampusIdentity,
        id: &str,
        jury_name: Option<&str>,
    ) -> Result<Session, AppError> {
        self.remove_member(identity, id, Roster::Juries, jury_name)
            .await
    }

    pub async fn add_student(
        &self,
        identity: &CampusIdentity,
        id: &str,
        student_name: Option<&str>,
    ) -> Result<Session, AppError> {
        self.add_member(identity, id, Roster::Students, student_name)
            .await
    }

    pub async fn remove_student(
        &self,
        identity: &CampusIdentity,
        id: &str,
        student_name: Option<&str>,
    ) -> Result<Session, AppError> {
        self.remove_member(identity, id, Roster::Students, student_name)
            .await
    }
}
