//! # Interview Model
//!
//! Slot-proposal entities for both interview stages. An interview instance
//! is immutable in its proposal list: a new proposal always produces a new
//! instance and deactivates the old one, so `selected_time` is set at most
//! once per instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, WorkflowError};

/// The two interview phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStage {
    HrScreening,
    Technical,
}

impl fmt::Display for InterviewStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HrScreening => write!(f, "hr_screening"),
            Self::Technical => write!(f, "technical"),
        }
    }
}

impl std::str::FromStr for InterviewStage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "hr_screening" => Ok(Self::HrScreening),
            "technical" => Ok(Self::Technical),
            _ => Err(format!("Invalid interview stage: {s}")),
        }
    }
}

/// Where the meeting happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    /// Meeting link; may be supplied later than confirmation
    Online,
    /// Physical address; required at confirmation
    Office,
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Office => write!(f, "office"),
        }
    }
}

/// A proposed meeting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// Validate a slot proposal: non-empty, each window well-formed and strictly
/// in the future, no duplicate windows. Returns the slots sorted by start.
pub fn validate_slots(slots: Vec<TimeSlot>, now: DateTime<Utc>) -> Result<Vec<TimeSlot>> {
    if slots.is_empty() {
        return Err(WorkflowError::validation(
            "at least one slot must be proposed",
        ));
    }
    for slot in &slots {
        if slot.start >= slot.end {
            return Err(WorkflowError::validation(format!(
                "slot start {} must be before its end {}",
                slot.start, slot.end
            )));
        }
        if slot.start <= now {
            return Err(WorkflowError::validation(format!(
                "slot start {} is not in the future",
                slot.start
            )));
        }
    }
    let mut sorted = slots;
    sorted.sort_by_key(|slot| (slot.start, slot.end));
    if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
        return Err(WorkflowError::validation("duplicate slots in proposal"));
    }
    Ok(sorted)
}

/// A slot-proposal instance for one stage of one application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: i64,
    pub application_id: i64,
    pub candidate_id: i64,
    /// The HR or interviewer who proposed it and owns its logistics
    pub interviewer_id: i64,
    pub stage: InterviewStage,
    pub proposed_slots: Vec<TimeSlot>,
    pub selected_time: Option<DateTime<Utc>>,
    pub confirmed: bool,
    pub location_type: Option<LocationType>,
    pub location_detail: Option<String>,
    /// Cleared when a fresh proposal supersedes this instance or the
    /// application is cancelled; inactive instances reject selection and
    /// finalization
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Interview {
    /// Find the proposed slot starting exactly at the given time
    pub fn slot_starting_at(&self, start: DateTime<Utc>) -> Option<&TimeSlot> {
        self.proposed_slots.iter().find(|slot| slot.start == start)
    }
}
