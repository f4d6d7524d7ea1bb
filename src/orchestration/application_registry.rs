//! # Application Registry
//!
//! Owns the application entity and the canonical state machine. Every
//! status change in the system funnels through [`ApplicationRegistry::apply`]:
//! role gate, source-status check via the transition function, entity-level
//! guards, then the mutation. The caller holds the store write lock for the
//! whole sequence, so check-then-apply is atomic per call.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Result, WorkflowError};
use crate::models::{Actor, ActorRole, Application, NewApplication};
use crate::state_machine::{determine_target_state, ApplicationEvent, Decision};
use crate::store::StoreState;

pub struct ApplicationRegistry;

impl ApplicationRegistry {
    /// Create an application in its initial status from a candidate submission
    pub fn create(
        state: &mut StoreState,
        actor: Actor,
        new: NewApplication,
        now: DateTime<Utc>,
    ) -> Result<Application> {
        if actor.role != ActorRole::Candidate {
            return Err(WorkflowError::unauthorized(
                actor.user_id,
                actor.role,
                "submit_application",
                "only candidates submit applications",
            ));
        }
        new.validate()?;
        let application = state.insert_application(actor.user_id, new, now);
        debug!(application_id = application.id, "application created");
        Ok(application)
    }

    /// Role gate shared by every mutating operation
    pub fn authorize(actor: Actor, event: &ApplicationEvent) -> Result<()> {
        if !actor.role.can_mutate() {
            return Err(WorkflowError::unauthorized(
                actor.user_id,
                actor.role,
                event.event_type(),
                "read-only role",
            ));
        }
        let required = event.required_role();
        if actor.role != required {
            return Err(WorkflowError::unauthorized(
                actor.user_id,
                actor.role,
                event.event_type(),
                format!("requires role {required}"),
            ));
        }
        Ok(())
    }

    /// Validate and apply a status transition.
    ///
    /// Sequence: role gate, candidate ownership where the event belongs to
    /// the candidate, source-status legality, entity guards, then the
    /// mutation and any event-specific record effects. Nothing is written
    /// before the last check passes.
    pub fn apply(
        state: &mut StoreState,
        actor: Actor,
        application_id: i64,
        event: &ApplicationEvent,
        now: DateTime<Utc>,
    ) -> Result<Application> {
        Self::authorize(actor, event)?;

        let current = {
            let application = state.application(application_id)?;
            if event.required_role() == ActorRole::Candidate
                && application.candidate_id != actor.user_id
            {
                return Err(WorkflowError::unauthorized(
                    actor.user_id,
                    actor.role,
                    event.event_type(),
                    "not the owning candidate",
                ));
            }
            application.status
        };

        let target = determine_target_state(application_id, current, event)?;

        if let Some(reason) = event.rejection_reason() {
            if reason.trim().is_empty() {
                return Err(WorkflowError::validation(
                    "rejection reason must not be empty",
                ));
            }
        }

        // All checks passed; mutate
        {
            let application = state.application_mut(application_id)?;
            application.status = target;
            application.updated_at = now;

            match event {
                ApplicationEvent::Accept => {
                    application.hr_id = Some(actor.user_id);
                    application.reviewed_at = Some(now);
                }
                ApplicationEvent::Reject(reason) => {
                    application.hr_id = Some(actor.user_id);
                    application.reviewed_at = Some(now);
                    application.rejection_reason = Some(reason.clone());
                }
                ApplicationEvent::Decide(Decision::Reject(reason)) => {
                    application.rejection_reason = Some(reason.clone());
                }
                _ => {}
            }
        }

        if matches!(event, ApplicationEvent::Cancel) {
            // Withdrawal invalidates every outstanding proposal
            state.deactivate_interviews(application_id);
        }

        debug!(
            application_id,
            event = event.event_type(),
            from = %current,
            to = %target,
            "transition applied"
        );

        state.application(application_id).map(Clone::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewApplication;
    use crate::state_machine::ApplicationStatus;
    use crate::store::WorkflowStore;

    fn submit(state: &mut StoreState) -> Application {
        ApplicationRegistry::create(
            state,
            Actor::candidate(100),
            NewApplication {
                full_name: "Olha Bondar".to_string(),
                email: "olha@example.com".to_string(),
                position: "Platform Engineer".to_string(),
                ..NewApplication::default()
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_accept_records_reviewer() {
        let store = WorkflowStore::new();
        store
            .with_write(|state| {
                let app = submit(state);
                let updated = ApplicationRegistry::apply(
                    state,
                    Actor::hr(7),
                    app.id,
                    &ApplicationEvent::Accept,
                    Utc::now(),
                )?;
                assert_eq!(updated.status, ApplicationStatus::Accepted);
                assert_eq!(updated.hr_id, Some(7));
                assert!(updated.reviewed_at.is_some());
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_reject_requires_reason() {
        let store = WorkflowStore::new();
        store
            .with_write(|state| {
                let app = submit(state);
                let err = ApplicationRegistry::apply(
                    state,
                    Actor::hr(7),
                    app.id,
                    &ApplicationEvent::Reject(String::new()),
                    Utc::now(),
                )
                .unwrap_err();
                assert!(matches!(err, WorkflowError::Validation { .. }));
                // no partial effect
                assert_eq!(state.application(app.id)?.status, ApplicationStatus::Pending);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_reject_with_reason_is_recorded() {
        let store = WorkflowStore::new();
        store
            .with_write(|state| {
                let app = submit(state);
                let updated = ApplicationRegistry::apply(
                    state,
                    Actor::hr(7),
                    app.id,
                    &ApplicationEvent::Reject("insufficient experience".to_string()),
                    Utc::now(),
                )?;
                assert_eq!(updated.status, ApplicationStatus::Rejected);
                assert_eq!(
                    updated.rejection_reason.as_deref(),
                    Some("insufficient experience")
                );
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_wrong_role_is_unauthorized() {
        let store = WorkflowStore::new();
        store
            .with_write(|state| {
                let app = submit(state);
                let err = ApplicationRegistry::apply(
                    state,
                    Actor::interviewer(9),
                    app.id,
                    &ApplicationEvent::Accept,
                    Utc::now(),
                )
                .unwrap_err();
                assert!(matches!(err, WorkflowError::Unauthorized { .. }));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_analyst_cannot_mutate() {
        let err =
            ApplicationRegistry::authorize(Actor::analyst(3), &ApplicationEvent::Cancel)
                .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Unauthorized { role: ActorRole::Analyst, .. }
        ));
    }

    #[test]
    fn test_cancel_by_other_candidate_is_unauthorized() {
        let store = WorkflowStore::new();
        store
            .with_write(|state| {
                let app = submit(state);
                let err = ApplicationRegistry::apply(
                    state,
                    Actor::candidate(999),
                    app.id,
                    &ApplicationEvent::Cancel,
                    Utc::now(),
                )
                .unwrap_err();
                assert!(matches!(err, WorkflowError::Unauthorized { .. }));
                Ok(())
            })
            .unwrap();
    }
}
