//! # Workflow Coordinator
//!
//! The actor-facing facade over the hiring workflow engine. Every operation
//! follows the same shape: authorize the actor, dispatch to the owning
//! component inside one store write lock so the entity mutation and the
//! status transition commit as a unit, then publish a lifecycle event and
//! hand notifications to the fire-and-forget collaborator.
//!
//! Read queries are pure projections over the authoritative status field,
//! recomputed here on every call; no client-side tab state is trusted.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::instrument;

use crate::config::HireflowConfig;
use crate::constants::events;
use crate::error::{Result, WorkflowError};
use crate::events::EventPublisher;
use crate::models::{
    Actor, ActorRole, Application, Feedback, FeedbackDraft, FilterTab, Interview, InterviewStage,
    LocationType, NewApplication, TimeSlot,
};
use crate::notifications::{notify_detached, Notifier, TracingNotifier};
use crate::orchestration::application_registry::ApplicationRegistry;
use crate::orchestration::assignment_pool::AssignmentPool;
use crate::orchestration::feedback_ledger::FeedbackLedger;
use crate::orchestration::interview_scheduler::InterviewScheduler;
use crate::state_machine::{ApplicationEvent, Decision};
use crate::store::WorkflowStore;

/// How HR routes an application into the technical stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechRouting {
    /// Unassigned; any interviewer may claim it from the pool
    Pool,
    /// Directly owned by the given interviewer
    Assign(i64),
}

pub struct WorkflowCoordinator {
    store: Arc<WorkflowStore>,
    scheduler: InterviewScheduler,
    publisher: EventPublisher,
    notifier: Arc<dyn Notifier>,
    config: HireflowConfig,
}

impl WorkflowCoordinator {
    pub fn new(config: HireflowConfig) -> Self {
        Self::with_notifier(config, Arc::new(TracingNotifier))
    }

    pub fn with_notifier(config: HireflowConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store: Arc::new(WorkflowStore::new()),
            scheduler: InterviewScheduler::new(config.slot_revision_policy),
            publisher: EventPublisher::new(config.event_channel_capacity),
            notifier,
            config,
        }
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<crate::events::LifecycleEvent> {
        self.publisher.subscribe()
    }

    // ---- mutating operations -------------------------------------------

    /// Candidate submits a new application
    #[instrument(skip(self, new_application))]
    pub async fn submit_application(
        &self,
        actor: Actor,
        new_application: NewApplication,
    ) -> Result<Application> {
        let now = Utc::now();
        let application = self
            .store
            .with_write(|state| ApplicationRegistry::create(state, actor, new_application, now))?;

        self.publish(
            events::APPLICATION_SUBMITTED,
            json!({ "application_id": application.id, "position": application.position }),
        );
        Ok(application)
    }

    /// HR accepts a pending application for screening
    #[instrument(skip(self))]
    pub async fn accept(&self, actor: Actor, application_id: i64) -> Result<Application> {
        let application = self.apply_event(actor, application_id, ApplicationEvent::Accept)?;
        self.publish(
            events::APPLICATION_ACCEPTED,
            json!({ "application_id": application.id }),
        );
        self.notify(
            application.candidate_id,
            format!(
                "Your application for {} passed the initial review",
                application.position
            ),
        );
        Ok(application)
    }

    /// HR rejects a pending application with a reason
    #[instrument(skip(self, reason))]
    pub async fn reject(
        &self,
        actor: Actor,
        application_id: i64,
        reason: String,
    ) -> Result<Application> {
        let application = self
            .apply_event(actor, application_id, ApplicationEvent::Reject(reason))?;
        self.publish(
            events::APPLICATION_REJECTED,
            json!({ "application_id": application.id }),
        );
        self.notify(
            application.candidate_id,
            format!("Your application for {} was declined", application.position),
        );
        Ok(application)
    }

    /// Candidate withdraws the application; outstanding proposals become
    /// unselectable
    #[instrument(skip(self))]
    pub async fn cancel(&self, actor: Actor, application_id: i64) -> Result<Application> {
        let application = self.apply_event(actor, application_id, ApplicationEvent::Cancel)?;
        self.publish(
            events::APPLICATION_CANCELLED,
            json!({ "application_id": application.id }),
        );
        if let Some(hr_id) = application.hr_id {
            self.notify(
                hr_id,
                format!(
                    "{} withdrew the application for {}",
                    application.full_name, application.position
                ),
            );
        }
        Ok(application)
    }

    /// HR proposes screening slots
    #[instrument(skip(self, slots))]
    pub async fn propose_screening_slots(
        &self,
        actor: Actor,
        application_id: i64,
        slots: Vec<TimeSlot>,
    ) -> Result<(Application, Interview)> {
        let now = Utc::now();
        let (application, interview) = self.store.with_write(|state| {
            self.scheduler.propose_slots(
                state,
                actor,
                application_id,
                InterviewStage::HrScreening,
                slots,
                now,
            )
        })?;

        self.publish(
            events::SCREENING_SLOTS_PROPOSED,
            json!({ "application_id": application_id, "interview_id": interview.id }),
        );
        self.notify(
            application.candidate_id,
            format!(
                "Screening slots are available for your {} application",
                application.position
            ),
        );
        Ok((application, interview))
    }

    /// HR acknowledges the screening call happened
    #[instrument(skip(self))]
    pub async fn complete_screening(
        &self,
        actor: Actor,
        application_id: i64,
    ) -> Result<Application> {
        let application = self
            .apply_event(actor, application_id, ApplicationEvent::CompleteScreening)?;
        self.publish(
            events::SCREENING_COMPLETED,
            json!({ "application_id": application.id }),
        );
        Ok(application)
    }

    /// HR routes the application into the technical stage
    #[instrument(skip(self))]
    pub async fn move_to_tech(
        &self,
        actor: Actor,
        application_id: i64,
        routing: TechRouting,
    ) -> Result<Application> {
        let now = Utc::now();
        let application = self.store.with_write(|state| {
            ApplicationRegistry::apply(
                state,
                actor,
                application_id,
                &ApplicationEvent::MoveToTech,
                now,
            )?;
            let application = state.application_mut(application_id)?;
            application.tech_interviewer_id = match routing {
                TechRouting::Pool => None,
                TechRouting::Assign(interviewer_id) => Some(interviewer_id),
            };
            Ok(application.clone())
        })?;

        match routing {
            TechRouting::Pool => {
                self.publish(
                    events::APPLICATION_POOLED,
                    json!({ "application_id": application.id }),
                );
            }
            TechRouting::Assign(interviewer_id) => {
                self.publish(
                    events::APPLICATION_ASSIGNED,
                    json!({ "application_id": application.id, "interviewer_id": interviewer_id }),
                );
                self.notify(
                    interviewer_id,
                    format!(
                        "You were assigned {} ({})",
                        application.full_name, application.position
                    ),
                );
            }
        }
        Ok(application)
    }

    /// Interviewer claims an unassigned application from the pool
    #[instrument(skip(self))]
    pub async fn claim(&self, actor: Actor, application_id: i64) -> Result<Application> {
        let now = Utc::now();
        let application = self
            .store
            .with_write(|state| AssignmentPool::claim(state, actor, application_id, now))?;

        self.publish(
            events::APPLICATION_CLAIMED,
            json!({ "application_id": application.id, "interviewer_id": actor.user_id }),
        );
        if let Some(hr_id) = application.hr_id {
            self.notify(
                hr_id,
                format!(
                    "Interviewer {} claimed {} from the pool",
                    actor.user_id, application.full_name
                ),
            );
        }
        Ok(application)
    }

    /// HR assigns a specific interviewer to a pooled application
    #[instrument(skip(self))]
    pub async fn assign(
        &self,
        actor: Actor,
        application_id: i64,
        interviewer_id: i64,
    ) -> Result<Application> {
        let now = Utc::now();
        let application = self.store.with_write(|state| {
            AssignmentPool::assign(state, actor, application_id, interviewer_id, now)
        })?;

        self.publish(
            events::APPLICATION_ASSIGNED,
            json!({ "application_id": application.id, "interviewer_id": interviewer_id }),
        );
        self.notify(
            interviewer_id,
            format!(
                "You were assigned {} ({})",
                application.full_name, application.position
            ),
        );
        Ok(application)
    }

    /// Assigned interviewer proposes technical slots
    #[instrument(skip(self, slots))]
    pub async fn propose_tech_slots(
        &self,
        actor: Actor,
        application_id: i64,
        slots: Vec<TimeSlot>,
    ) -> Result<(Application, Interview)> {
        let now = Utc::now();
        let (application, interview) = self.store.with_write(|state| {
            self.scheduler.propose_slots(
                state,
                actor,
                application_id,
                InterviewStage::Technical,
                slots,
                now,
            )
        })?;

        self.publish(
            events::TECH_SLOTS_PROPOSED,
            json!({ "application_id": application_id, "interview_id": interview.id }),
        );
        self.notify(
            application.candidate_id,
            format!(
                "Technical interview slots are available for your {} application",
                application.position
            ),
        );
        Ok((application, interview))
    }

    /// Candidate picks one of the proposed slots
    #[instrument(skip(self))]
    pub async fn select_slot(
        &self,
        actor: Actor,
        interview_id: i64,
        slot_start: DateTime<Utc>,
    ) -> Result<Interview> {
        let now = Utc::now();
        let (application, interview) = self.store.with_write(|state| {
            self.scheduler
                .select_slot(state, actor, interview_id, slot_start, now)
        })?;

        self.publish(
            events::SLOT_SELECTED,
            json!({
                "application_id": application.id,
                "interview_id": interview.id,
                "selected_time": interview.selected_time,
            }),
        );
        self.notify(
            interview.interviewer_id,
            format!(
                "{} picked an interview slot for {}",
                application.full_name, application.position
            ),
        );
        Ok(interview)
    }

    /// Interview owner supplies or updates meeting logistics
    #[instrument(skip(self, location_detail))]
    pub async fn finalize(
        &self,
        actor: Actor,
        interview_id: i64,
        location_type: LocationType,
        location_detail: String,
    ) -> Result<Interview> {
        let now = Utc::now();
        let interview = self.store.with_write(|state| {
            self.scheduler
                .finalize(state, actor, interview_id, location_type, location_detail, now)
        })?;

        self.publish(
            events::INTERVIEW_FINALIZED,
            json!({
                "application_id": interview.application_id,
                "interview_id": interview.id,
                "location_type": interview.location_type,
            }),
        );
        self.notify(
            interview.candidate_id,
            "Your interview details were confirmed".to_string(),
        );
        Ok(interview)
    }

    /// Interviewer submits or edits technical feedback
    #[instrument(skip(self, draft))]
    pub async fn submit_feedback(
        &self,
        actor: Actor,
        interview_id: i64,
        draft: FeedbackDraft,
    ) -> Result<(Feedback, Application)> {
        let now = Utc::now();
        let (feedback, application, completed) = self
            .store
            .with_write(|state| FeedbackLedger::submit(state, actor, interview_id, draft, now))?;

        if completed {
            self.publish(
                events::FEEDBACK_SUBMITTED,
                json!({
                    "application_id": application.id,
                    "interview_id": interview_id,
                    "score": feedback.score,
                }),
            );
            if let Some(hr_id) = application.hr_id {
                self.notify(
                    hr_id,
                    format!(
                        "Feedback for {} submitted with score {}",
                        application.full_name, feedback.score
                    ),
                );
            }
        }
        Ok((feedback, application))
    }

    /// Decision-maker hires or rejects a tech-completed application
    #[instrument(skip(self))]
    pub async fn decide(
        &self,
        actor: Actor,
        application_id: i64,
        decision: Decision,
    ) -> Result<Application> {
        let hired = matches!(decision, Decision::Hire);
        let application = self
            .apply_event(actor, application_id, ApplicationEvent::Decide(decision))?;

        let event_name = if hired {
            events::APPLICATION_HIRED
        } else {
            events::APPLICATION_REJECTED
        };
        self.publish(event_name, json!({ "application_id": application.id }));
        self.notify(
            application.candidate_id,
            if hired {
                format!("Congratulations, you are hired for {}", application.position)
            } else {
                format!("Your application for {} was declined", application.position)
            },
        );
        Ok(application)
    }

    // ---- read queries ---------------------------------------------------

    /// Fetch one application, enforcing per-role visibility
    pub fn get_application(&self, actor: Actor, application_id: i64) -> Result<Application> {
        self.store.with_read(|state| {
            let application = state.application(application_id)?;
            let visible = match actor.role {
                ActorRole::Candidate => application.candidate_id == actor.user_id,
                ActorRole::Interviewer => {
                    application.tech_interviewer_id == Some(actor.user_id)
                        || application.is_in_pool()
                }
                ActorRole::Hr | ActorRole::Decider | ActorRole::Analyst => true,
            };
            if !visible {
                return Err(WorkflowError::unauthorized(
                    actor.user_id,
                    actor.role,
                    "get_application",
                    "application is not visible to this actor",
                ));
            }
            Ok(application.clone())
        })
    }

    /// Fetch one interview, enforcing per-role visibility
    pub fn get_interview(&self, actor: Actor, interview_id: i64) -> Result<Interview> {
        self.store.with_read(|state| {
            let interview = state.interview(interview_id)?;
            let visible = match actor.role {
                ActorRole::Candidate => interview.candidate_id == actor.user_id,
                ActorRole::Interviewer => interview.interviewer_id == actor.user_id,
                ActorRole::Hr | ActorRole::Decider | ActorRole::Analyst => true,
            };
            if !visible {
                return Err(WorkflowError::unauthorized(
                    actor.user_id,
                    actor.role,
                    "get_interview",
                    "interview is not visible to this actor",
                ));
            }
            Ok(interview.clone())
        })
    }

    /// The active interview for a stage of an application, if any
    pub fn active_interview(
        &self,
        application_id: i64,
        stage: InterviewStage,
    ) -> Option<Interview> {
        self.store
            .with_read(|state| state.active_interview(application_id, stage).cloned())
    }

    /// Role-scoped application listing for a filter tab.
    ///
    /// Candidates see their own records, interviewers their assignments
    /// (plus the pool tab), staff roles see everything. The pool tab is a
    /// hiring-team view; candidates get nothing from it. Ordering is newest
    /// first except the pool, which is oldest first for fairness.
    pub fn list_applications(&self, actor: Actor, tab: FilterTab) -> Vec<Application> {
        if tab == FilterTab::TechPool {
            return match actor.role {
                ActorRole::Candidate => Vec::new(),
                ActorRole::Interviewer
                | ActorRole::Hr
                | ActorRole::Decider
                | ActorRole::Analyst => self.list_pool(),
            };
        }
        self.store.with_read(|state| {
            let mut applications: Vec<Application> = state
                .applications()
                .filter(|application| match actor.role {
                    ActorRole::Candidate => application.candidate_id == actor.user_id,
                    ActorRole::Interviewer => {
                        application.tech_interviewer_id == Some(actor.user_id)
                    }
                    ActorRole::Hr | ActorRole::Decider | ActorRole::Analyst => true,
                })
                .filter(|application| tab.matches(application))
                .cloned()
                .collect();
            applications.sort_by_key(|application| {
                (std::cmp::Reverse(application.submitted_at), application.id)
            });
            applications
        })
    }

    /// All pooled applications, oldest first
    pub fn list_pool(&self) -> Vec<Application> {
        self.store.with_read(AssignmentPool::list_pool)
    }

    /// All feedback for an application; hidden from candidates
    pub fn list_feedback(&self, actor: Actor, application_id: i64) -> Result<Vec<Feedback>> {
        if actor.role == ActorRole::Candidate {
            return Err(WorkflowError::unauthorized(
                actor.user_id,
                actor.role,
                "list_feedback",
                "feedback is internal to the hiring team",
            ));
        }
        Ok(self
            .store
            .with_read(|state| FeedbackLedger::list(state, application_id)))
    }

    /// One interviewer's feedback on one interview; hidden from candidates
    pub fn find_feedback(
        &self,
        actor: Actor,
        interview_id: i64,
        interviewer_id: i64,
    ) -> Result<Option<Feedback>> {
        if actor.role == ActorRole::Candidate {
            return Err(WorkflowError::unauthorized(
                actor.user_id,
                actor.role,
                "find_feedback",
                "feedback is internal to the hiring team",
            ));
        }
        Ok(self
            .store
            .with_read(|state| FeedbackLedger::find(state, interview_id, interviewer_id)))
    }

    /// Proposals awaiting this candidate's slot selection
    pub fn pending_interviews(&self, actor: Actor) -> Vec<Interview> {
        self.store.with_read(|state| {
            let mut pending: Vec<Interview> = state
                .applications()
                .filter(|application| application.candidate_id == actor.user_id)
                .flat_map(|application| state.interviews_for_application(application.id))
                .filter(|interview| interview.active && interview.selected_time.is_none())
                .collect();
            pending.sort_by_key(|interview| interview.id);
            pending
        })
    }

    /// Per-tab application totals for dashboards
    pub fn status_counts(&self) -> HashMap<FilterTab, usize> {
        const TABS: &[FilterTab] = &[
            FilterTab::All,
            FilterTab::Pending,
            FilterTab::Processing,
            FilterTab::Interviews,
            FilterTab::TechPool,
            FilterTab::Approved,
            FilterTab::Rejected,
            FilterTab::Archive,
        ];
        self.store.with_read(|state| {
            let mut counts = HashMap::new();
            for tab in TABS {
                let count = state
                    .applications()
                    .filter(|application| tab.matches(application))
                    .count();
                counts.insert(*tab, count);
            }
            counts
        })
    }

    // ---- internals ------------------------------------------------------

    fn apply_event(
        &self,
        actor: Actor,
        application_id: i64,
        event: ApplicationEvent,
    ) -> Result<Application> {
        let now = Utc::now();
        self.store
            .with_write(|state| ApplicationRegistry::apply(state, actor, application_id, &event, now))
    }

    fn publish(&self, name: &'static str, context: serde_json::Value) {
        // A committed operation never fails on event delivery
        self.publisher.publish(name, context);
    }

    fn notify(&self, user_id: i64, message: String) {
        if self.config.notifications_enabled {
            notify_detached(self.notifier.clone(), user_id, message);
        }
    }
}
