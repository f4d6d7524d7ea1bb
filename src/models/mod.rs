// Data entities for the hiring workflow

pub mod actor;
pub mod application;
pub mod feedback;
pub mod interview;

pub use actor::{Actor, ActorRole};
pub use application::{Application, FilterTab, NewApplication};
pub use feedback::{Feedback, FeedbackDraft};
pub use interview::{validate_slots, Interview, InterviewStage, LocationType, TimeSlot};
