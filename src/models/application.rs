//! # Application Model
//!
//! The shared application record every actor role observes and mutates.
//! Created on candidate submission, mutated only through validated
//! transitions, never deleted. Status legality lives in the state machine
//! module; this file only carries the data and the read-side groupings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::status_groups;
use crate::error::{Result, WorkflowError};
use crate::state_machine::ApplicationStatus;

/// A candidate's application moving through the hiring pipeline.
///
/// `hr_id` records the HR staff member who reviewed the application and
/// `tech_interviewer_id` the owner of the technical stage; the latter is
/// `None` exactly while the application sits in the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub candidate_id: i64,
    pub hr_id: Option<i64>,
    pub tech_interviewer_id: Option<i64>,

    // Candidate profile
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub experience_years: Option<i32>,
    pub skills: Vec<String>,
    pub education: Option<String>,
    pub previous_work: Option<String>,
    pub portfolio_url: Option<String>,
    pub additional_info: Option<String>,

    pub status: ApplicationStatus,
    pub rejection_reason: Option<String>,

    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Check if the application sits in the technical pool
    /// (tech stage reached, no interviewer owns it yet)
    pub fn is_in_pool(&self) -> bool {
        self.status == ApplicationStatus::TechPending && self.tech_interviewer_id.is_none()
    }
}

/// Everything the candidate supplies at submission time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewApplication {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub experience_years: Option<i32>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub education: Option<String>,
    pub previous_work: Option<String>,
    pub portfolio_url: Option<String>,
    pub additional_info: Option<String>,
}

impl NewApplication {
    /// Entity-level guards applied before an application record is created
    pub fn validate(&self) -> Result<()> {
        if self.full_name.trim().is_empty() {
            return Err(WorkflowError::validation("full_name must not be empty"));
        }
        if self.email.trim().is_empty() {
            return Err(WorkflowError::validation("email must not be empty"));
        }
        if self.position.trim().is_empty() {
            return Err(WorkflowError::validation("position must not be empty"));
        }
        Ok(())
    }
}

/// Read-side filter tabs over the authoritative status field.
///
/// Tabs are pure projections recomputed from the status groups; they are
/// never stored on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterTab {
    All,
    Pending,
    Processing,
    Interviews,
    TechPool,
    Approved,
    Rejected,
    Archive,
}

impl FilterTab {
    /// Statuses backing this tab; `None` means no status filter applies
    /// (`All` and `TechPool`, which additionally filters on assignment).
    pub fn statuses(&self) -> Option<&'static [ApplicationStatus]> {
        match self {
            Self::All => None,
            Self::Pending => Some(status_groups::PENDING_STATES),
            Self::Processing => Some(status_groups::PROCESSING_STATES),
            Self::Interviews => Some(status_groups::INTERVIEW_STATES),
            Self::TechPool => None,
            Self::Approved => Some(status_groups::APPROVED_STATES),
            Self::Rejected => Some(status_groups::REJECTED_STATES),
            Self::Archive => Some(status_groups::ARCHIVE_STATES),
        }
    }

    /// Check if an application belongs under this tab
    pub fn matches(&self, application: &Application) -> bool {
        match self {
            Self::All => true,
            Self::TechPool => application.is_in_pool(),
            _ => self
                .statuses()
                .map(|group| group.contains(&application.status))
                .unwrap_or(true),
        }
    }
}

impl fmt::Display for FilterTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Interviews => write!(f, "interviews"),
            Self::TechPool => write!(f, "tech-pool"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::Archive => write!(f, "archive"),
        }
    }
}

impl std::str::FromStr for FilterTab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "interviews" => Ok(Self::Interviews),
            "tech-pool" => Ok(Self::TechPool),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "archive" => Ok(Self::Archive),
            _ => Err(format!("Invalid filter tab: {s}")),
        }
    }
}
