// Orchestration components for the hiring workflow
//
// The coordinator is the only entry point callers use; the other components
// encapsulate one concern each and operate inside a single store commit.

pub mod application_registry;
pub mod assignment_pool;
pub mod feedback_ledger;
pub mod interview_scheduler;
pub mod workflow_coordinator;

pub use application_registry::ApplicationRegistry;
pub use assignment_pool::AssignmentPool;
pub use feedback_ledger::FeedbackLedger;
pub use interview_scheduler::InterviewScheduler;
pub use workflow_coordinator::{TechRouting, WorkflowCoordinator};
