use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WorkflowError};

/// Technical interviewer's evaluation of a candidate.
///
/// Keyed by `(interview_id, interviewer_id)`: resubmission by the same
/// interviewer against the same interview overwrites the prior record,
/// preserving `created_at` so history stays ordered by first submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub application_id: i64,
    pub interview_id: i64,
    pub interviewer_id: i64,
    pub score: i32,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Feedback payload as submitted by the interviewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackDraft {
    pub score: i32,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub summary: String,
}

impl FeedbackDraft {
    /// Entity-level guards: score within 1..=10, non-empty summary
    pub fn validate(&self) -> Result<()> {
        if !(1..=10).contains(&self.score) {
            return Err(WorkflowError::validation(format!(
                "score {} is out of range 1..=10",
                self.score
            )));
        }
        if self.summary.trim().is_empty() {
            return Err(WorkflowError::validation("summary must not be empty"));
        }
        Ok(())
    }
}
