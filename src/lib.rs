#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Hireflow Core
//!
//! Workflow engine for a multi-stage hiring pipeline: a candidate submits an
//! application, HR screens it, a technical interviewer evaluates it, and a
//! decision-maker hires or rejects. Five actor roles (candidate, HR,
//! interviewer, decider, read-only analyst) observe and mutate the shared
//! application record through one coordinator facade.
//!
//! ## Architecture
//!
//! Correctness rests on three mechanisms:
//!
//! - a **closed status set** with a single transition function; no call site
//!   re-derives legality from status comparisons of its own
//! - **atomic guarded commits**: every operation validates and mutates inside
//!   one store write lock, so the entity change and the status transition
//!   apply as a unit or not at all
//! - an **atomic conditional claim**: pool ownership is acquired by a single
//!   conditional update checked by its affected count, never by a separate
//!   read followed by a write
//!
//! ## Module Organization
//!
//! - [`models`] - applications, interviews, feedback, actors
//! - [`state_machine`] - the closed status set and transition function
//! - [`store`] - in-memory guarded storage
//! - [`orchestration`] - scheduler, pool, ledger, registry, coordinator
//! - [`events`] - lifecycle event publishing
//! - [`notifications`] - fire-and-forget notification collaborator
//! - [`config`] - environment-driven configuration
//! - [`error`] - structured error taxonomy
//!
//! ## Quick Start
//!
//! ```rust
//! use hireflow_core::config::HireflowConfig;
//! use hireflow_core::models::{Actor, NewApplication};
//! use hireflow_core::orchestration::WorkflowCoordinator;
//!
//! # async fn example() -> hireflow_core::error::Result<()> {
//! let coordinator = WorkflowCoordinator::new(HireflowConfig::default());
//!
//! let application = coordinator
//!     .submit_application(
//!         Actor::candidate(100),
//!         NewApplication {
//!             full_name: "Maria Koval".to_string(),
//!             email: "maria@example.com".to_string(),
//!             position: "Backend Engineer".to_string(),
//!             ..NewApplication::default()
//!         },
//!     )
//!     .await?;
//!
//! let accepted = coordinator.accept(Actor::hr(7), application.id).await?;
//! println!("application {} is now {}", accepted.id, accepted.status);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod notifications;
pub mod orchestration;
pub mod state_machine;
pub mod store;

pub use config::{HireflowConfig, SlotRevisionPolicy};
pub use error::{Result, WorkflowError};
pub use models::{
    Actor, ActorRole, Application, Feedback, FeedbackDraft, FilterTab, Interview, InterviewStage,
    LocationType, NewApplication, TimeSlot,
};
pub use orchestration::{TechRouting, WorkflowCoordinator};
pub use state_machine::{ApplicationEvent, ApplicationStatus, Decision};
