//! # Workflow Store
//!
//! In-memory storage for applications, interviews, and feedback behind a
//! single `parking_lot::RwLock`. Every mutating workflow operation runs
//! inside one [`WorkflowStore::with_write`] closure, which makes the entity
//! mutation and the status transition commit as one unit and makes
//! check-then-apply sequences (the claim conditional update in particular)
//! linearizable per store.
//!
//! Closures passed to `with_write` follow one convention: validate first,
//! mutate last. An `Err` return must leave the state untouched.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::{Result, WorkflowError};
use crate::models::{
    Application, Feedback, Interview, InterviewStage, NewApplication, TimeSlot,
};
use crate::state_machine::ApplicationStatus;

/// All workflow entities plus the id counters.
///
/// Only reachable through [`WorkflowStore`]; components receive `&mut
/// StoreState` for the duration of exactly one guarded commit.
#[derive(Debug, Default)]
pub struct StoreState {
    next_application_id: i64,
    next_interview_id: i64,
    next_feedback_id: i64,
    applications: HashMap<i64, Application>,
    interviews: HashMap<i64, Interview>,
    /// Keyed by (interview_id, interviewer_id); the upsert key of feedback
    feedback: HashMap<(i64, i64), Feedback>,
}

impl StoreState {
    /// Create an application record in its initial status
    pub fn insert_application(
        &mut self,
        candidate_id: i64,
        new: NewApplication,
        now: DateTime<Utc>,
    ) -> Application {
        self.next_application_id += 1;
        let application = Application {
            id: self.next_application_id,
            candidate_id,
            hr_id: None,
            tech_interviewer_id: None,
            full_name: new.full_name,
            email: new.email,
            phone: new.phone,
            position: new.position,
            experience_years: new.experience_years,
            skills: new.skills,
            education: new.education,
            previous_work: new.previous_work,
            portfolio_url: new.portfolio_url,
            additional_info: new.additional_info,
            status: ApplicationStatus::default(),
            rejection_reason: None,
            submitted_at: now,
            reviewed_at: None,
            updated_at: now,
        };
        self.applications
            .insert(application.id, application.clone());
        application
    }

    pub fn application(&self, id: i64) -> Result<&Application> {
        self.applications.get(&id).ok_or(WorkflowError::NotFound {
            entity: "application",
            id,
        })
    }

    pub fn application_mut(&mut self, id: i64) -> Result<&mut Application> {
        self.applications
            .get_mut(&id)
            .ok_or(WorkflowError::NotFound {
                entity: "application",
                id,
            })
    }

    pub fn applications(&self) -> impl Iterator<Item = &Application> {
        self.applications.values()
    }

    /// Atomic conditional update: set the technical interviewer where the
    /// application is tech-pending and no interviewer is set yet. Returns
    /// whether a row was affected; the caller classifies the miss under the
    /// same lock when it was not.
    pub fn claim_if_unassigned(
        &mut self,
        application_id: i64,
        interviewer_id: i64,
        now: DateTime<Utc>,
    ) -> bool {
        match self.applications.get_mut(&application_id) {
            Some(application)
                if application.status == ApplicationStatus::TechPending
                    && application.tech_interviewer_id.is_none() =>
            {
                application.tech_interviewer_id = Some(interviewer_id);
                application.updated_at = now;
                true
            }
            _ => false,
        }
    }

    /// Create a fresh interview instance for a stage of an application
    #[allow(clippy::too_many_arguments)]
    pub fn insert_interview(
        &mut self,
        application_id: i64,
        candidate_id: i64,
        interviewer_id: i64,
        stage: InterviewStage,
        proposed_slots: Vec<TimeSlot>,
        now: DateTime<Utc>,
    ) -> Interview {
        self.next_interview_id += 1;
        let interview = Interview {
            id: self.next_interview_id,
            application_id,
            candidate_id,
            interviewer_id,
            stage,
            proposed_slots,
            selected_time: None,
            confirmed: false,
            location_type: None,
            location_detail: None,
            active: true,
            created_at: now,
        };
        self.interviews.insert(interview.id, interview.clone());
        interview
    }

    pub fn interview(&self, id: i64) -> Result<&Interview> {
        self.interviews.get(&id).ok_or(WorkflowError::NotFound {
            entity: "interview",
            id,
        })
    }

    pub fn interview_mut(&mut self, id: i64) -> Result<&mut Interview> {
        self.interviews
            .get_mut(&id)
            .ok_or(WorkflowError::NotFound {
                entity: "interview",
                id,
            })
    }

    /// The single active interview for a stage, if any
    pub fn active_interview(
        &self,
        application_id: i64,
        stage: InterviewStage,
    ) -> Option<&Interview> {
        self.interviews.values().find(|interview| {
            interview.application_id == application_id
                && interview.stage == stage
                && interview.active
        })
    }

    /// Deactivate every outstanding interview for an application.
    /// Their proposals become unselectable from this point on.
    pub fn deactivate_interviews(&mut self, application_id: i64) {
        for interview in self.interviews.values_mut() {
            if interview.application_id == application_id {
                interview.active = false;
            }
        }
    }

    pub fn feedback(&self, interview_id: i64, interviewer_id: i64) -> Option<&Feedback> {
        self.feedback.get(&(interview_id, interviewer_id))
    }

    /// Upsert feedback by its (interview, interviewer) key. Returns the
    /// stored record and whether the key was newly created.
    pub fn upsert_feedback(&mut self, entry: Feedback) -> (Feedback, bool) {
        let key = (entry.interview_id, entry.interviewer_id);
        match self.feedback.get_mut(&key) {
            Some(existing) => {
                existing.score = entry.score;
                existing.pros = entry.pros;
                existing.cons = entry.cons;
                existing.summary = entry.summary;
                existing.updated_at = entry.updated_at;
                (existing.clone(), false)
            }
            None => {
                self.next_feedback_id += 1;
                let mut stored = entry;
                stored.id = self.next_feedback_id;
                self.feedback.insert(key, stored.clone());
                (stored, true)
            }
        }
    }

    /// All feedback across the application's history, ordered by submission
    pub fn feedback_for_application(&self, application_id: i64) -> Vec<Feedback> {
        let mut entries: Vec<Feedback> = self
            .feedback
            .values()
            .filter(|entry| entry.application_id == application_id)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.created_at, entry.id));
        entries
    }

    /// All interview instances for an application, oldest first
    pub fn interviews_for_application(&self, application_id: i64) -> Vec<Interview> {
        let mut entries: Vec<Interview> = self
            .interviews
            .values()
            .filter(|interview| interview.application_id == application_id)
            .cloned()
            .collect();
        entries.sort_by_key(|interview| interview.id);
        entries
    }
}

/// Shared, thread-safe workflow storage
#[derive(Debug, Default)]
pub struct WorkflowStore {
    state: RwLock<StoreState>,
}

impl WorkflowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a mutating commit under the write lock.
    ///
    /// The closure must validate before mutating so that an `Err` leaves no
    /// partial effect. No `.await` can occur inside; lock scopes stay short.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut StoreState) -> Result<R>) -> Result<R> {
        let mut state = self.state.write();
        f(&mut state)
    }

    /// Run a read-only query under the read lock
    pub fn with_read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        let state = self.state.read();
        f(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewApplication;

    fn new_application() -> NewApplication {
        NewApplication {
            full_name: "Lesia Ivanenko".to_string(),
            email: "lesia@example.com".to_string(),
            position: "Backend Engineer".to_string(),
            ..NewApplication::default()
        }
    }

    #[test]
    fn test_sequential_ids() {
        let store = WorkflowStore::new();
        let (first, second) = store
            .with_write(|state| {
                let now = Utc::now();
                let first = state.insert_application(10, new_application(), now);
                let second = state.insert_application(11, new_application(), now);
                Ok((first.id, second.id))
            })
            .unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_claim_if_unassigned_is_single_shot() {
        let store = WorkflowStore::new();
        store
            .with_write(|state| {
                let now = Utc::now();
                let app = state.insert_application(10, new_application(), now);
                state.application_mut(app.id)?.status = ApplicationStatus::TechPending;
                assert!(state.claim_if_unassigned(app.id, 42, now));
                assert!(!state.claim_if_unassigned(app.id, 43, now));
                assert_eq!(state.application(app.id)?.tech_interviewer_id, Some(42));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_claim_requires_tech_pending() {
        let store = WorkflowStore::new();
        store
            .with_write(|state| {
                let now = Utc::now();
                let app = state.insert_application(10, new_application(), now);
                assert!(!state.claim_if_unassigned(app.id, 42, now));
                assert_eq!(state.application(app.id)?.tech_interviewer_id, None);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_failed_commit_leaves_no_partial_state() {
        let store = WorkflowStore::new();
        let result: Result<()> = store.with_write(|state| {
            // validate-first convention: nothing mutated before this error
            state.application(999).map(|_| ())
        });
        assert!(result.is_err());
        assert_eq!(store.with_read(|state| state.applications().count()), 0);
    }
}
