//! # Workflow Error Types
//!
//! Structured error handling for the hiring workflow engine using thiserror.
//! Every error carries enough context (current status, attempted operation,
//! conflicting actor where relevant) for a caller to render a precise
//! message without re-fetching state.

use thiserror::Error;

use crate::models::ActorRole;
use crate::state_machine::ApplicationStatus;

/// Errors returned by workflow operations.
///
/// All operations are all-or-nothing: an error means no entity or status
/// change was applied. The core never retries; re-fetch and re-attempt is
/// the caller's responsibility.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error("invalid transition for application {application_id}: cannot apply '{attempted}' while {current}")]
    InvalidTransition {
        application_id: i64,
        current: ApplicationStatus,
        attempted: &'static str,
    },

    #[error("actor {actor_id} ({role}) is not allowed to perform '{operation}': {reason}")]
    Unauthorized {
        actor_id: i64,
        role: ActorRole,
        operation: &'static str,
        reason: String,
    },

    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("interview {interview_id} has no proposed slot starting at {requested}")]
    SlotNotFound {
        interview_id: i64,
        requested: chrono::DateTime<chrono::Utc>,
    },

    #[error("interview {interview_id} already has a selected time ({selected})")]
    AlreadySelected {
        interview_id: i64,
        selected: chrono::DateTime<chrono::Utc>,
    },

    #[error("proposal for interview {interview_id} is stale; a selection exists or a newer proposal superseded it")]
    StaleProposal { interview_id: i64 },

    #[error("application {application_id} is already claimed by interviewer {held_by}")]
    AlreadyClaimed { application_id: i64, held_by: i64 },

    #[error("concurrent update on application {application_id}: expected {expected}, found {actual}")]
    Conflict {
        application_id: i64,
        expected: ApplicationStatus,
        actual: ApplicationStatus,
    },

    #[error("interview {interview_id} cannot be finalized before a slot is selected")]
    PrematureFinalize { interview_id: i64 },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl WorkflowError {
    /// Shorthand for validation failures.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for authorization failures.
    pub fn unauthorized(
        actor_id: i64,
        role: ActorRole,
        operation: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::Unauthorized {
            actor_id,
            role,
            operation,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
