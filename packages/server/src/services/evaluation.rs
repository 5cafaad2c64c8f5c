use std::collections::{HashMap, HashSet};

use tracing::info;
use uuid::Uuid;

use super::session::SessionRegistry;
use crate::directory::CampusIdentity;
use crate::error::AppError;
use crate::models::evaluation::{
    AggregateRow, ResultsResponse, Scores, SubmitEvaluationRequest, Submission,
};
use crate::store::Store;
use crate::utils::access::{check_session_owner, session_position};

/// Records jury submissions and rolls them up per student.
pub struct SubmissionAggregator<'a> {
    store: &'a Store,
}

impl<'a> SubmissionAggregator<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Validate and append one submission.
    ///
    /// The session must exist and belong to the caller, and the jury and
    /// student must currently be on its rosters. Membership is only checked
    /// here; later roster changes do not affect stored submissions.
    pub async fn submit(
        &self,
        identity: &CampusIdentity,
        request: SubmitEvaluationRequest,
    ) -> Result<Submission, AppError> {
        let jury_name = request.jury_name.as_deref().map(str::trim).unwrap_or_default();
        let student_name = request
            .student_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();
        let session_key = request.session_id.as_deref().unwrap_or_default();

        let submission = self
            .store
            .mutate(|doc| {
                let index = session_position(doc, session_key)
                    .ok_or_else(|| AppError::Validation("Invalid session.".into()))?;
                let session = &doc.sessions[index];
                check_session_owner(identity, session)?;

                if !session.juries.iter().any(|j| j == jury_name) {
                    return Err(AppError::Validation("Invalid jury.".into()));
                }
                if !session.students.iter().any(|s| s == student_name) {
                    return Err(AppError::Validation("Invalid student.".into()));
                }

                let submission = Submission {
                    session_id: session.id,
                    jury_name: jury_name.to_string(),
                    student_name: student_name.to_string(),
                    scores: request.scores.parse()?,
                    student_comments: request.student_comments.clone().unwrap_or_default(),
                };
                doc.submissions.push(submission.clone());
                Ok(submission)
            })
            .await?;

        info!(
            session_id = %submission.session_id,
            jury = %submission.jury_name,
            student = %submission.student_name,
            "Evaluation submitted"
        );
        Ok(submission)
    }

    /// The campus's sessions, their raw submissions and per-student averages.
    pub async fn results_with_averages(&self, campus: &str) -> ResultsResponse {
        let sessions = SessionRegistry::new(self.store).list(campus).await;
        let ids: HashSet<Uuid> = sessions.iter().map(|s| s.id).collect();

        let raw_submissions: Vec<Submission> = self
            .store
            .read(|doc| {
                doc.submissions
                    .iter()
                    .filter(|s| ids.contains(&s.session_id))
                    .cloned()
                    .collect()
            })
            .await;

        let aggregated = aggregate(&raw_submissions);

        ResultsResponse {
            raw_submissions,
            aggregated,
            sessions,
        }
    }
}

/// Group submissions by (session, student) and average every criterion.
///
/// Rows come out in the order each pair first appears in `submissions`.
pub fn aggregate(submissions: &[Submission]) -> Vec<AggregateRow> {
    let mut index: HashMap<(Uuid, &str), usize> = HashMap::new();
    let mut groups: Vec<(&Submission, Scores, usize)> = Vec::new();

    for submission in submissions {
        let key = (submission.session_id, submission.student_name.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((submission, Scores::default(), 0));
            groups.len() - 1
        });
        let (_, sum, count) = &mut groups[slot];
        sum.accumulate(&submission.scores);
        *count += 1;
    }

    groups
        .into_iter()
        .map(|(first, sum, count)| AggregateRow {
            session_id: first.session_id,
            student_name: first.student_name.clone(),
            count,
            averages: sum.mean(count),
        })
        .collect()
}
