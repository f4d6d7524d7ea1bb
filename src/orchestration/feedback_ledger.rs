//! # Feedback Ledger
//!
//! Stores interviewer feedback and gates the final-decision transition: the
//! first submission against the active technical interview completes the
//! technical stage, later edits by the same interviewer only update the
//! stored record.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Result, WorkflowError};
use crate::models::{Actor, Application, Feedback, FeedbackDraft, InterviewStage};
use crate::orchestration::application_registry::ApplicationRegistry;
use crate::state_machine::ApplicationEvent;
use crate::store::StoreState;

pub struct FeedbackLedger;

impl FeedbackLedger {
    /// Upsert feedback keyed by (interview, interviewer).
    ///
    /// Returns the stored record, the application snapshot, and whether this
    /// call completed the technical stage.
    pub fn submit(
        state: &mut StoreState,
        actor: Actor,
        interview_id: i64,
        draft: FeedbackDraft,
        now: DateTime<Utc>,
    ) -> Result<(Feedback, Application, bool)> {
        ApplicationRegistry::authorize(actor, &ApplicationEvent::SubmitFeedback)?;
        draft.validate()?;

        let application_id = {
            let interview = state.interview(interview_id)?;
            if interview.stage != InterviewStage::Technical {
                return Err(WorkflowError::validation(
                    "feedback applies to technical interviews only",
                ));
            }
            if !interview.active {
                return Err(WorkflowError::StaleProposal { interview_id });
            }
            if interview.interviewer_id != actor.user_id {
                return Err(WorkflowError::unauthorized(
                    actor.user_id,
                    actor.role,
                    "submit_feedback",
                    "not the interview owner",
                ));
            }
            interview.application_id
        };

        let first_submission = state.feedback(interview_id, actor.user_id).is_none();

        // Only the first submission moves the application forward
        let application = if first_submission {
            ApplicationRegistry::apply(
                state,
                actor,
                application_id,
                &ApplicationEvent::SubmitFeedback,
                now,
            )?
        } else {
            state.application(application_id)?.clone()
        };

        let (stored, created) = state.upsert_feedback(Feedback {
            id: 0, // assigned by the store on insert
            application_id,
            interview_id,
            interviewer_id: actor.user_id,
            score: draft.score,
            pros: draft.pros,
            cons: draft.cons,
            summary: draft.summary,
            created_at: now,
            updated_at: now,
        });
        debug_assert_eq!(created, first_submission);

        debug!(
            application_id,
            interview_id,
            score = stored.score,
            first_submission,
            "feedback stored"
        );
        Ok((stored, application, first_submission))
    }

    /// All feedback across the application's history, ordered by submission
    pub fn list(state: &StoreState, application_id: i64) -> Vec<Feedback> {
        state.feedback_for_application(application_id)
    }

    /// One interviewer's feedback on one interview, if submitted
    pub fn find(
        state: &StoreState,
        interview_id: i64,
        interviewer_id: i64,
    ) -> Option<Feedback> {
        state.feedback(interview_id, interviewer_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewApplication, TimeSlot};
    use crate::state_machine::ApplicationStatus;
    use crate::store::WorkflowStore;
    use chrono::Duration;

    fn draft(score: i32) -> FeedbackDraft {
        FeedbackDraft {
            score,
            pros: Some("clear communication".to_string()),
            cons: None,
            summary: "solid systems knowledge".to_string(),
        }
    }

    /// Application in TECH_SCHEDULED with an active technical interview
    fn tech_scheduled(state: &mut StoreState) -> (Application, i64) {
        let app = ApplicationRegistry::create(
            state,
            Actor::candidate(100),
            NewApplication {
                full_name: "Iryna Shevchenko".to_string(),
                email: "iryna@example.com".to_string(),
                position: "Backend Engineer".to_string(),
                ..NewApplication::default()
            },
            Utc::now(),
        )
        .unwrap();
        state.application_mut(app.id).unwrap().status = ApplicationStatus::TechScheduled;
        state.application_mut(app.id).unwrap().tech_interviewer_id = Some(42);
        let now = Utc::now();
        let interview = state.insert_interview(
            app.id,
            100,
            42,
            InterviewStage::Technical,
            vec![TimeSlot::new(now + Duration::hours(4), now + Duration::hours(5))],
            now,
        );
        (state.application(app.id).unwrap().clone(), interview.id)
    }

    #[test]
    fn test_first_submission_completes_tech_stage() {
        let store = WorkflowStore::new();
        store
            .with_write(|state| {
                let (_, interview_id) = tech_scheduled(state);
                let (stored, app, completed) = FeedbackLedger::submit(
                    state,
                    Actor::interviewer(42),
                    interview_id,
                    draft(7),
                    Utc::now(),
                )?;
                assert!(completed);
                assert_eq!(stored.score, 7);
                assert_eq!(app.status, ApplicationStatus::TechCompleted);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_resubmission_overwrites_without_retrigger() {
        let store = WorkflowStore::new();
        store
            .with_write(|state| {
                let (app, interview_id) = tech_scheduled(state);
                FeedbackLedger::submit(
                    state,
                    Actor::interviewer(42),
                    interview_id,
                    draft(7),
                    Utc::now(),
                )?;
                let (stored, _, completed) = FeedbackLedger::submit(
                    state,
                    Actor::interviewer(42),
                    interview_id,
                    draft(9),
                    Utc::now(),
                )?;
                assert!(!completed);
                assert_eq!(stored.score, 9);

                let all = FeedbackLedger::list(state, app.id);
                assert_eq!(all.len(), 1);
                assert_eq!(all[0].score, 9);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_find_returns_the_stored_record() {
        let store = WorkflowStore::new();
        store
            .with_write(|state| {
                let (_, interview_id) = tech_scheduled(state);
                assert!(FeedbackLedger::find(state, interview_id, 42).is_none());

                FeedbackLedger::submit(
                    state,
                    Actor::interviewer(42),
                    interview_id,
                    draft(6),
                    Utc::now(),
                )?;
                let found = FeedbackLedger::find(state, interview_id, 42).unwrap();
                assert_eq!(found.score, 6);
                assert!(FeedbackLedger::find(state, interview_id, 43).is_none());
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_out_of_range_score_is_rejected() {
        let store = WorkflowStore::new();
        store
            .with_write(|state| {
                let (_, interview_id) = tech_scheduled(state);
                let err = FeedbackLedger::submit(
                    state,
                    Actor::interviewer(42),
                    interview_id,
                    draft(12),
                    Utc::now(),
                )
                .unwrap_err();
                assert!(matches!(err, WorkflowError::Validation { .. }));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_only_the_owner_submits() {
        let store = WorkflowStore::new();
        store
            .with_write(|state| {
                let (_, interview_id) = tech_scheduled(state);
                let err = FeedbackLedger::submit(
                    state,
                    Actor::interviewer(43),
                    interview_id,
                    draft(5),
                    Utc::now(),
                )
                .unwrap_err();
                assert!(matches!(err, WorkflowError::Unauthorized { .. }));
                Ok(())
            })
            .unwrap();
    }
}
