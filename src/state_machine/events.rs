use serde::{Deserialize, Serialize};

use crate::models::{ActorRole, InterviewStage};

/// Final decision on a tech-completed application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Decision {
    /// Extend an offer
    Hire,
    /// Reject with a mandatory reason
    Reject(String),
}

/// Events that can trigger application status transitions
///
/// One variant per actor action from the workflow surface. Events that keep
/// the status unchanged (finalize, tech slot selection, claim, assign) are
/// still modeled here so legality is derived in a single place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ApplicationEvent {
    /// HR accepts the application for screening
    Accept,
    /// HR rejects the application with a reason
    Reject(String),
    /// Candidate withdraws the application
    Cancel,
    /// HR proposes screening slots
    ProposeScreeningSlots,
    /// HR acknowledges the screening call happened
    CompleteScreening,
    /// HR routes the application to the technical stage
    MoveToTech,
    /// Interviewer takes an unassigned application from the pool
    Claim,
    /// HR assigns a specific interviewer to a pooled application
    Assign,
    /// Assigned interviewer proposes technical slots
    ProposeTechSlots,
    /// Candidate picks one of the proposed slots
    SelectSlot,
    /// Host supplies meeting logistics for the selected slot
    Finalize(InterviewStage),
    /// Interviewer submits technical feedback
    SubmitFeedback,
    /// Decision-maker hires or rejects
    Decide(Decision),
}

impl ApplicationEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject(_) => "reject",
            Self::Cancel => "cancel",
            Self::ProposeScreeningSlots => "propose_screening_slots",
            Self::CompleteScreening => "complete_screening",
            Self::MoveToTech => "move_to_tech",
            Self::Claim => "claim",
            Self::Assign => "assign",
            Self::ProposeTechSlots => "propose_tech_slots",
            Self::SelectSlot => "select_slot",
            Self::Finalize(_) => "finalize",
            Self::SubmitFeedback => "submit_feedback",
            Self::Decide(Decision::Hire) => "decide_hire",
            Self::Decide(Decision::Reject(_)) => "decide_reject",
        }
    }

    /// The actor role allowed to emit this event
    pub fn required_role(&self) -> ActorRole {
        match self {
            Self::Accept
            | Self::Reject(_)
            | Self::ProposeScreeningSlots
            | Self::CompleteScreening
            | Self::MoveToTech
            | Self::Assign
            | Self::Finalize(InterviewStage::HrScreening) => ActorRole::Hr,
            Self::Cancel | Self::SelectSlot => ActorRole::Candidate,
            Self::Claim
            | Self::ProposeTechSlots
            | Self::SubmitFeedback
            | Self::Finalize(InterviewStage::Technical) => ActorRole::Interviewer,
            Self::Decide(_) => ActorRole::Decider,
        }
    }

    /// Extract the rejection reason if this event carries one
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::Reject(reason) | Self::Decide(Decision::Reject(reason)) => Some(reason),
            _ => None,
        }
    }

    /// Check if this event leads to a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancel | Self::Reject(_) | Self::Decide(_))
    }
}
