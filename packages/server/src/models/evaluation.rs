use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::session::Session;
use crate::error::AppError;

/// A criterion value as it arrives on the wire: a JSON number or a numeric string.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum ScoreInput {
    Number(f64),
    Text(String),
}

/// Largest accepted score magnitude. Keeps per-student sums finite.
pub const MAX_SCORE_MAGNITUDE: f64 = 1_000_000_000.0;

/// Parse one criterion. Absent, blank, non-numeric and out-of-range values are rejected.
pub fn parse_score(criterion: &str, input: Option<&ScoreInput>) -> Result<f64, AppError> {
    let value = match input {
        Some(ScoreInput::Number(n)) => Some(*n),
        Some(ScoreInput::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    };
    match value {
        Some(v) if v.is_finite() && v.abs() <= MAX_SCORE_MAGNITUDE => Ok(v),
        Some(v) if v.is_finite() => Err(AppError::Validation(format!(
            "Score '{criterion}' must be between -{MAX_SCORE_MAGNITUDE} and {MAX_SCORE_MAGNITUDE}"
        ))),
        _ => Err(AppError::Validation(format!(
            "Score '{criterion}' must be a number"
        ))),
    }
}

macro_rules! criteria {
    ($($field:ident => $key:tt / $avg:tt),+ $(,)?) => {
        /// Wire names of the scored criteria, in document order.
        pub const CRITERIA: &[&str] = &[$($key),+];

        /// One score per criterion.
        #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
        pub struct Scores {
            $(
                #[serde(rename = $key)]
                pub $field: f64,
            )+
        }

        /// Criterion values as submitted, before parsing.
        #[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
        pub struct RawScores {
            $(
                #[serde(rename = $key, default)]
                pub $field: Option<ScoreInput>,
            )+
        }

        /// Per-criterion arithmetic means.
        #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, utoipa::ToSchema)]
        pub struct ScoreAverages {
            $(
                #[serde(rename = $avg)]
                pub $field: f64,
            )+
        }

        impl RawScores {
            pub fn parse(&self) -> Result<Scores, AppError> {
                Ok(Scores {
                    $($field: parse_score($key, self.$field.as_ref())?,)+
                })
            }
        }

        impl Scores {
            /// Add every criterion of `other` into `self`.
            pub fn accumulate(&mut self, other: &Scores) {
                $(self.$field += other.$field;)+
            }

            /// Divide every criterion by `count`. `count` must be non-zero.
            pub fn mean(&self, count: usize) -> ScoreAverages {
                let n = count as f64;
                ScoreAverages {
                    $($field: self.$field / n,)+
                }
            }
        }
    };
}

criteria! {
    introduction_team => "introductionTeam" / "introductionTeamAvg",
    introduction_project => "introductionProject" / "introductionProjectAvg",
    presentation_quality => "presentationQuality" / "presentationQualityAvg",
    time_management => "timeManagement" / "timeManagementAvg",
    teamwork => "teamwork" / "teamworkAvg",
    technical_choices => "technicalChoices" / "technicalChoicesAvg",
    architecture => "architecture" / "architectureAvg",
    code_quality => "codeQuality" / "codeQualityAvg",
    testing => "testing" / "testingAvg",
    security => "security" / "securityAvg",
    documentation => "documentation" / "documentationAvg",
    demo_functional => "demoFunctional" / "demoFunctionalAvg",
    demo_user_experience => "demoUserExperience" / "demoUserExperienceAvg",
    project_management => "projectManagement" / "projectManagementAvg",
    answers_to_questions => "answersToQuestions" / "answersToQuestionsAvg",
    individual_contribution => "individualContribution" / "individualContributionAvg",
    communication => "communication" / "communicationAvg",
    overall_impression => "overallImpression" / "overallImpressionAvg",
}

/// One jury member's scored evaluation of one student. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub session_id: Uuid,
    pub jury_name: String,
    pub student_name: String,
    #[serde(flatten)]
    pub scores: Scores,
    #[serde(default)]
    pub student_comments: String,
}

#[derive(Debug, Deserialize, Default, utoipa::ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmitEvaluationRequest {
    pub session_id: Option<String>,
    #[schema(example = "Hugo")]
    pub jury_name: Option<String>,
    #[schema(example = "Fabien")]
    pub student_name: Option<String>,
    #[serde(flatten)]
    pub scores: RawScores,
    pub student_comments: Option<String>,
}

/// Mean of every criterion over all submissions for one student in one session.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRow {
    pub session_id: Uuid,
    pub student_name: String,
    /// Number of submissions folded into the averages. Always at least 1.
    pub count: usize,
    #[serde(flatten)]
    pub averages: ScoreAverages,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultsResponse {
    pub raw_submissions: Vec<Submission>,
    pub aggregated: Vec<AggregateRow>,
    pub sessions: Vec<Session>,
}
