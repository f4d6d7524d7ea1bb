//! Shared helpers for integration suites
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use hireflow_core::config::HireflowConfig;
use hireflow_core::models::{Actor, Application, Interview, NewApplication, TimeSlot};
use hireflow_core::orchestration::{TechRouting, WorkflowCoordinator};

pub const CANDIDATE_ID: i64 = 100;
pub const HR_ID: i64 = 7;

pub fn coordinator() -> WorkflowCoordinator {
    WorkflowCoordinator::new(HireflowConfig::default())
}

pub fn new_application() -> NewApplication {
    NewApplication {
        full_name: "Oleh Tkachenko".to_string(),
        email: "oleh@example.com".to_string(),
        phone: Some("+380501112233".to_string()),
        position: "Senior Backend Engineer".to_string(),
        experience_years: Some(6),
        skills: vec!["rust".to_string(), "postgres".to_string()],
        ..NewApplication::default()
    }
}

/// Two future one-hour windows, the classic morning and afternoon pair
pub fn future_slots() -> Vec<TimeSlot> {
    let base = Utc::now() + Duration::days(2);
    vec![
        TimeSlot::new(base, base + Duration::hours(1)),
        TimeSlot::new(base + Duration::hours(4), base + Duration::hours(5)),
    ]
}

pub async fn submitted(coordinator: &WorkflowCoordinator) -> Application {
    coordinator
        .submit_application(Actor::candidate(CANDIDATE_ID), new_application())
        .await
        .unwrap()
}

pub async fn accepted(coordinator: &WorkflowCoordinator) -> Application {
    let application = submitted(coordinator).await;
    coordinator
        .accept(Actor::hr(HR_ID), application.id)
        .await
        .unwrap()
}

/// Drive an application to SCREENING_SCHEDULED; returns it with the
/// screening interview and the selected start time
pub async fn screening_scheduled(
    coordinator: &WorkflowCoordinator,
) -> (Application, Interview, DateTime<Utc>) {
    let application = accepted(coordinator).await;
    let (_, interview) = coordinator
        .propose_screening_slots(Actor::hr(HR_ID), application.id, future_slots())
        .await
        .unwrap();
    let start = interview.proposed_slots[0].start;
    let interview = coordinator
        .select_slot(Actor::candidate(CANDIDATE_ID), interview.id, start)
        .await
        .unwrap();
    let application = coordinator
        .get_application(Actor::hr(HR_ID), application.id)
        .unwrap();
    (application, interview, start)
}

/// Drive an application to the unassigned technical pool
pub async fn pooled(coordinator: &WorkflowCoordinator) -> Application {
    let (application, _, _) = screening_scheduled(coordinator).await;
    coordinator
        .move_to_tech(Actor::hr(HR_ID), application.id, TechRouting::Pool)
        .await
        .unwrap()
}
