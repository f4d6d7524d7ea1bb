use serde::{Deserialize, Serialize};
use std::fmt;

/// Application status definitions for the hiring pipeline
///
/// The set is closed: every application carries exactly one of these values
/// for its whole lifetime, and the transition function in
/// [`super::transitions`] is the only place legality between them is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted, awaiting HR review
    Pending,
    /// Passed initial HR review
    Accepted,
    /// Screening slots proposed, awaiting candidate selection
    ScreeningPending,
    /// Candidate picked a screening slot
    ScreeningScheduled,
    /// HR marked the screening call as done
    ScreeningCompleted,
    /// Routed to the technical stage, awaiting or holding an interviewer
    TechPending,
    /// Technical slots proposed by the assigned interviewer
    TechScheduled,
    /// Technical feedback submitted
    TechCompleted,
    /// Final decision: hire
    Hired,
    /// Final decision or screening outcome: rejected
    Rejected,
    /// Candidate declined an offer
    Declined,
    /// Candidate withdrew the application
    Cancelled,
}

impl ApplicationStatus {
    /// Check if this is a terminal status (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Hired | Self::Rejected | Self::Declined | Self::Cancelled
        )
    }

    /// Check if the application sits in either interview stage
    pub fn is_in_interviews(&self) -> bool {
        matches!(
            self,
            Self::ScreeningPending
                | Self::ScreeningScheduled
                | Self::ScreeningCompleted
                | Self::TechPending
                | Self::TechScheduled
                | Self::TechCompleted
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::ScreeningPending => write!(f, "screening_pending"),
            Self::ScreeningScheduled => write!(f, "screening_scheduled"),
            Self::ScreeningCompleted => write!(f, "screening_completed"),
            Self::TechPending => write!(f, "tech_pending"),
            Self::TechScheduled => write!(f, "tech_scheduled"),
            Self::TechCompleted => write!(f, "tech_completed"),
            Self::Hired => write!(f, "hired"),
            Self::Rejected => write!(f, "rejected"),
            Self::Declined => write!(f, "declined"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "screening_pending" => Ok(Self::ScreeningPending),
            "screening_scheduled" => Ok(Self::ScreeningScheduled),
            "screening_completed" => Ok(Self::ScreeningCompleted),
            "tech_pending" => Ok(Self::TechPending),
            "tech_scheduled" => Ok(Self::TechScheduled),
            "tech_completed" => Ok(Self::TechCompleted),
            "hired" => Ok(Self::Hired),
            "rejected" => Ok(Self::Rejected),
            "declined" => Ok(Self::Declined),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Invalid application status: {s}")),
        }
    }
}

/// New applications always start pending review
impl Default for ApplicationStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_check() {
        assert!(ApplicationStatus::Hired.is_terminal());
        assert!(ApplicationStatus::Rejected.is_terminal());
        assert!(ApplicationStatus::Declined.is_terminal());
        assert!(ApplicationStatus::Cancelled.is_terminal());
        assert!(!ApplicationStatus::Pending.is_terminal());
        assert!(!ApplicationStatus::TechCompleted.is_terminal());
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(ApplicationStatus::ScreeningPending.to_string(), "screening_pending");
        assert_eq!(
            "tech_scheduled".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::TechScheduled
        );
        assert!("interviewing".parse::<ApplicationStatus>().is_err());
    }

    #[test]
    fn test_status_serde() {
        let status = ApplicationStatus::TechPending;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"tech_pending\"");

        let parsed: ApplicationStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, status);
    }
}
