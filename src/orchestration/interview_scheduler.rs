//! # Interview Scheduler
//!
//! The slot-proposal, selection, and confirmation protocol for both
//! interview stages. An interview instance never changes its proposal list:
//! replacing slots always produces a fresh instance and deactivates the old
//! one, which is what makes slot selection one-shot per instance.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::SlotRevisionPolicy;
use crate::error::{Result, WorkflowError};
use crate::models::{
    validate_slots, Actor, Application, Interview, InterviewStage, LocationType, TimeSlot,
};
use crate::orchestration::application_registry::ApplicationRegistry;
use crate::state_machine::ApplicationEvent;
use crate::store::StoreState;

pub struct InterviewScheduler {
    revision_policy: SlotRevisionPolicy,
}

impl InterviewScheduler {
    pub fn new(revision_policy: SlotRevisionPolicy) -> Self {
        Self { revision_policy }
    }

    /// Propose slots for a stage, creating or replacing the active interview.
    ///
    /// Replacement while no selection exists is always allowed. Once a
    /// selection exists the configured [`SlotRevisionPolicy`] decides between
    /// failing with `StaleProposal` and starting a fresh instance.
    pub fn propose_slots(
        &self,
        state: &mut StoreState,
        actor: Actor,
        application_id: i64,
        stage: InterviewStage,
        slots: Vec<TimeSlot>,
        now: DateTime<Utc>,
    ) -> Result<(Application, Interview)> {
        let event = match stage {
            InterviewStage::HrScreening => ApplicationEvent::ProposeScreeningSlots,
            InterviewStage::Technical => ApplicationEvent::ProposeTechSlots,
        };
        ApplicationRegistry::authorize(actor, &event)?;
        let slots = validate_slots(slots, now)?;

        let candidate_id = {
            let application = state.application(application_id)?;
            if stage == InterviewStage::Technical
                && application.tech_interviewer_id != Some(actor.user_id)
            {
                return Err(WorkflowError::unauthorized(
                    actor.user_id,
                    actor.role,
                    event.event_type(),
                    "not the assigned technical interviewer",
                ));
            }
            application.candidate_id
        };

        let superseded = state.active_interview(application_id, stage).map(|existing| {
            (existing.id, existing.selected_time.is_some())
        });
        if let Some((existing_id, has_selection)) = superseded {
            if has_selection && self.revision_policy == SlotRevisionPolicy::Deny {
                return Err(WorkflowError::StaleProposal {
                    interview_id: existing_id,
                });
            }
        }

        let application = ApplicationRegistry::apply(state, actor, application_id, &event, now)?;

        if let Some((existing_id, _)) = superseded {
            state.interview_mut(existing_id)?.active = false;
        }
        let interview = state.insert_interview(
            application_id,
            candidate_id,
            actor.user_id,
            stage,
            slots,
            now,
        );

        debug!(
            application_id,
            interview_id = interview.id,
            stage = %stage,
            slots = interview.proposed_slots.len(),
            "slots proposed"
        );
        Ok((application, interview))
    }

    /// Candidate picks one of the proposed slots. One-shot per instance.
    pub fn select_slot(
        &self,
        state: &mut StoreState,
        actor: Actor,
        interview_id: i64,
        slot_start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(Application, Interview)> {
        let application_id = {
            let interview = state.interview(interview_id)?;
            if !interview.active {
                return Err(WorkflowError::StaleProposal { interview_id });
            }
            if interview.candidate_id != actor.user_id {
                return Err(WorkflowError::unauthorized(
                    actor.user_id,
                    actor.role,
                    "select_slot",
                    "not the invited candidate",
                ));
            }
            if let Some(selected) = interview.selected_time {
                return Err(WorkflowError::AlreadySelected {
                    interview_id,
                    selected,
                });
            }
            if interview.slot_starting_at(slot_start).is_none() {
                return Err(WorkflowError::SlotNotFound {
                    interview_id,
                    requested: slot_start,
                });
            }
            interview.application_id
        };

        let application = ApplicationRegistry::apply(
            state,
            actor,
            application_id,
            &ApplicationEvent::SelectSlot,
            now,
        )?;

        let interview = state.interview_mut(interview_id)?;
        interview.selected_time = Some(slot_start);
        let interview = interview.clone();

        debug!(application_id, interview_id, %slot_start, "slot selected");
        Ok((application, interview))
    }

    /// Supply or update meeting logistics for an already-selected slot.
    ///
    /// The first call confirms the interview; later calls are idempotent
    /// edits of the location detail.
    pub fn finalize(
        &self,
        state: &mut StoreState,
        actor: Actor,
        interview_id: i64,
        location_type: LocationType,
        location_detail: String,
        now: DateTime<Utc>,
    ) -> Result<Interview> {
        let (application_id, stage) = {
            let interview = state.interview(interview_id)?;
            if !interview.active {
                return Err(WorkflowError::StaleProposal { interview_id });
            }
            if interview.interviewer_id != actor.user_id {
                return Err(WorkflowError::unauthorized(
                    actor.user_id,
                    actor.role,
                    "finalize",
                    "not the interview owner",
                ));
            }
            if interview.selected_time.is_none() {
                return Err(WorkflowError::PrematureFinalize { interview_id });
            }
            (interview.application_id, interview.stage)
        };

        // Office meetings need an address up front; an online link may
        // intentionally arrive later
        if location_type == LocationType::Office && location_detail.trim().is_empty() {
            return Err(WorkflowError::validation(
                "office interviews require an address",
            ));
        }

        ApplicationRegistry::apply(
            state,
            actor,
            application_id,
            &ApplicationEvent::Finalize(stage),
            now,
        )?;

        let interview = state.interview_mut(interview_id)?;
        interview.location_type = Some(location_type);
        interview.location_detail = if location_detail.is_empty() {
            None
        } else {
            Some(location_detail)
        };
        interview.confirmed = true;
        let interview = interview.clone();

        debug!(application_id, interview_id, location = %location_type, "interview finalized");
        Ok(interview)
    }
}
