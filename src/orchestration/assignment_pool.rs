//! # Assignment Pool
//!
//! Atomic acquisition of technical-interview ownership. Pool membership is
//! derived, never stored: an application is pooled iff it is tech-pending
//! with no interviewer set. Claiming is a single conditional update guarded
//! by that predicate, checked by its affected count; under concurrent claims
//! on one application exactly one caller wins and the rest observe
//! `AlreadyClaimed` with the winner's id.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{Result, WorkflowError};
use crate::models::{Actor, Application};
use crate::orchestration::application_registry::ApplicationRegistry;
use crate::state_machine::{determine_target_state, ApplicationEvent, ApplicationStatus};
use crate::store::StoreState;

pub struct AssignmentPool;

impl AssignmentPool {
    /// Interviewer takes an unassigned application from the pool
    pub fn claim(
        state: &mut StoreState,
        actor: Actor,
        application_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Application> {
        ApplicationRegistry::authorize(actor, &ApplicationEvent::Claim)?;
        Self::acquire(state, application_id, actor.user_id, &ApplicationEvent::Claim, now)
    }

    /// HR assigns a specific interviewer, bypassing the pool. Subject to the
    /// same unclaimed predicate, so it cannot overwrite a concurrent claim.
    pub fn assign(
        state: &mut StoreState,
        actor: Actor,
        application_id: i64,
        interviewer_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Application> {
        ApplicationRegistry::authorize(actor, &ApplicationEvent::Assign)?;
        Self::acquire(state, application_id, interviewer_id, &ApplicationEvent::Assign, now)
    }

    fn acquire(
        state: &mut StoreState,
        application_id: i64,
        interviewer_id: i64,
        event: &ApplicationEvent,
        now: DateTime<Utc>,
    ) -> Result<Application> {
        // Single conditional update guarded by the unclaimed predicate
        if state.claim_if_unassigned(application_id, interviewer_id, now) {
            let application = state.application(application_id)?.clone();
            info!(
                application_id,
                interviewer_id,
                event = event.event_type(),
                "technical ownership acquired"
            );
            return Ok(application);
        }

        // Classify the miss under the same lock
        let application = state.application(application_id)?;
        determine_target_state(application_id, application.status, event)?;
        match application.tech_interviewer_id {
            Some(held_by) => Err(WorkflowError::AlreadyClaimed {
                application_id,
                held_by,
            }),
            // Unreachable while the write lock is held; reported as a
            // concurrency conflict rather than a panic
            None => Err(WorkflowError::Conflict {
                application_id,
                expected: ApplicationStatus::TechPending,
                actual: application.status,
            }),
        }
    }

    /// All pooled applications, oldest submission first for fairness
    pub fn list_pool(state: &StoreState) -> Vec<Application> {
        let mut pooled: Vec<Application> = state
            .applications()
            .filter(|application| application.is_in_pool())
            .cloned()
            .collect();
        pooled.sort_by_key(|application| (application.submitted_at, application.id));
        debug!(count = pooled.len(), "pool listed");
        pooled
    }
}
