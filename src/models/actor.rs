use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles observing and mutating the shared application record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Candidate,
    Hr,
    Interviewer,
    Decider,
    /// Read-only reporting access; every mutating operation rejects it
    Analyst,
}

impl ActorRole {
    /// Check if this role may mutate workflow state at all
    pub fn can_mutate(&self) -> bool {
        !matches!(self, Self::Analyst)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Candidate => write!(f, "candidate"),
            Self::Hr => write!(f, "hr"),
            Self::Interviewer => write!(f, "interviewer"),
            Self::Decider => write!(f, "decider"),
            Self::Analyst => write!(f, "analyst"),
        }
    }
}

impl std::str::FromStr for ActorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "candidate" => Ok(Self::Candidate),
            "hr" => Ok(Self::Hr),
            "interviewer" => Ok(Self::Interviewer),
            "decider" => Ok(Self::Decider),
            "analyst" => Ok(Self::Analyst),
            _ => Err(format!("Invalid actor role: {s}")),
        }
    }
}

/// A resolved identity, produced by the external session collaborator.
///
/// The core trusts the pair as given; token resolution happens outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: i64,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(user_id: i64, role: ActorRole) -> Self {
        Self { user_id, role }
    }

    pub fn candidate(user_id: i64) -> Self {
        Self::new(user_id, ActorRole::Candidate)
    }

    pub fn hr(user_id: i64) -> Self {
        Self::new(user_id, ActorRole::Hr)
    }

    pub fn interviewer(user_id: i64) -> Self {
        Self::new(user_id, ActorRole::Interviewer)
    }

    pub fn decider(user_id: i64) -> Self {
        Self::new(user_id, ActorRole::Decider)
    }

    pub fn analyst(user_id: i64) -> Self {
        Self::new(user_id, ActorRole::Analyst)
    }
}
