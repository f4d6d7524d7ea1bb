//! The canonical transition function for the application state machine.
//!
//! Every mutating operation routes through [`determine_target_state`]; no
//! call site re-derives legality from status comparisons of its own.

use crate::error::{Result, WorkflowError};
use crate::models::InterviewStage;

use super::events::{ApplicationEvent, Decision};
use super::states::ApplicationStatus;

/// Determine the target status for an event against the current status.
///
/// Returns [`WorkflowError::InvalidTransition`] when the pair is not in the
/// transition table. Events that keep the status unchanged still appear here
/// so that their source-status check lives in the same table.
pub fn determine_target_state(
    application_id: i64,
    current: ApplicationStatus,
    event: &ApplicationEvent,
) -> Result<ApplicationStatus> {
    use ApplicationEvent as E;
    use ApplicationStatus as S;

    let target = match (current, event) {
        // Initial HR review
        (S::Pending, E::Accept) => S::Accepted,
        (S::Pending, E::Reject(_)) => S::Rejected,

        // Candidate withdrawal is allowed from any non-terminal status
        (current, E::Cancel) if !current.is_terminal() => S::Cancelled,

        // Screening scheduling protocol. Re-proposal from scheduled is
        // policy-gated by the scheduler before the event reaches here.
        (S::Accepted | S::ScreeningPending | S::ScreeningScheduled, E::ProposeScreeningSlots) => {
            S::ScreeningPending
        }
        (S::ScreeningPending, E::SelectSlot) => S::ScreeningScheduled,
        (S::ScreeningScheduled, E::Finalize(InterviewStage::HrScreening)) => S::ScreeningScheduled,
        (S::ScreeningScheduled, E::CompleteScreening) => S::ScreeningCompleted,

        // Routing to the technical stage
        (S::ScreeningScheduled | S::ScreeningCompleted, E::MoveToTech) => S::TechPending,
        (S::TechPending, E::Claim) => S::TechPending,
        (S::TechPending, E::Assign) => S::TechPending,

        // Technical scheduling protocol
        (S::TechPending | S::TechScheduled, E::ProposeTechSlots) => S::TechScheduled,
        (S::TechScheduled, E::SelectSlot) => S::TechScheduled,
        (S::TechScheduled, E::Finalize(InterviewStage::Technical)) => S::TechScheduled,
        (S::TechScheduled, E::SubmitFeedback) => S::TechCompleted,

        // Feedback-gated final decision
        (S::TechCompleted, E::Decide(Decision::Hire)) => S::Hired,
        (S::TechCompleted, E::Decide(Decision::Reject(_))) => S::Rejected,

        (current, event) => {
            return Err(WorkflowError::InvalidTransition {
                application_id,
                current,
                attempted: event.event_type(),
            })
        }
    };

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_event() -> impl Strategy<Value = ApplicationEvent> {
        prop_oneof![
            Just(ApplicationEvent::Accept),
            Just(ApplicationEvent::Reject("weak profile".to_string())),
            Just(ApplicationEvent::Cancel),
            Just(ApplicationEvent::ProposeScreeningSlots),
            Just(ApplicationEvent::CompleteScreening),
            Just(ApplicationEvent::MoveToTech),
            Just(ApplicationEvent::Claim),
            Just(ApplicationEvent::Assign),
            Just(ApplicationEvent::ProposeTechSlots),
            Just(ApplicationEvent::SelectSlot),
            Just(ApplicationEvent::Finalize(InterviewStage::HrScreening)),
            Just(ApplicationEvent::Finalize(InterviewStage::Technical)),
            Just(ApplicationEvent::SubmitFeedback),
            Just(ApplicationEvent::Decide(Decision::Hire)),
            Just(ApplicationEvent::Decide(Decision::Reject("low score".to_string()))),
        ]
    }

    #[test]
    fn test_happy_path_to_hired() {
        let steps = [
            ApplicationEvent::Accept,
            ApplicationEvent::ProposeScreeningSlots,
            ApplicationEvent::SelectSlot,
            ApplicationEvent::Finalize(InterviewStage::HrScreening),
            ApplicationEvent::CompleteScreening,
            ApplicationEvent::MoveToTech,
            ApplicationEvent::Claim,
            ApplicationEvent::ProposeTechSlots,
            ApplicationEvent::SelectSlot,
            ApplicationEvent::Finalize(InterviewStage::Technical),
            ApplicationEvent::SubmitFeedback,
            ApplicationEvent::Decide(Decision::Hire),
        ];

        let mut status = ApplicationStatus::Pending;
        for event in &steps {
            status = determine_target_state(1, status, event).unwrap();
        }
        assert_eq!(status, ApplicationStatus::Hired);
    }

    #[test]
    fn test_cancel_from_non_terminal_sources() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Accepted,
            ApplicationStatus::ScreeningScheduled,
            ApplicationStatus::TechPending,
        ] {
            assert_eq!(
                determine_target_state(1, status, &ApplicationEvent::Cancel).unwrap(),
                ApplicationStatus::Cancelled
            );
        }
    }

    #[test]
    fn test_cancel_from_hired_is_invalid() {
        let err =
            determine_target_state(7, ApplicationStatus::Hired, &ApplicationEvent::Cancel)
                .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::InvalidTransition {
                application_id: 7,
                current: ApplicationStatus::Hired,
                attempted: "cancel",
            }
        ));
    }

    #[test]
    fn test_decide_requires_tech_completed() {
        let event = ApplicationEvent::Decide(Decision::Hire);
        assert!(determine_target_state(1, ApplicationStatus::TechScheduled, &event).is_err());
        assert_eq!(
            determine_target_state(1, ApplicationStatus::TechCompleted, &event).unwrap(),
            ApplicationStatus::Hired
        );
    }

    proptest! {
        /// No event ever moves an application out of a terminal status, and
        /// every reachable status stays inside the closed set by construction.
        #[test]
        fn prop_terminal_statuses_are_final(events in proptest::collection::vec(any_event(), 1..40)) {
            let mut status = ApplicationStatus::Pending;
            for event in &events {
                match determine_target_state(1, status, event) {
                    Ok(next) => {
                        prop_assert!(!status.is_terminal(), "transition out of terminal {status}");
                        status = next;
                    }
                    Err(WorkflowError::InvalidTransition { .. }) => {}
                    Err(other) => prop_assert!(false, "unexpected error {other:?}"),
                }
            }
        }
    }
}
