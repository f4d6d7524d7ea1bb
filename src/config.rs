use crate::error::{Result, WorkflowError};

/// How a proposer may revise slots once the candidate has selected one.
///
/// The behavior is an explicit policy rather than an implicit default:
/// `Deny` fails the re-proposal with `StaleProposal`, `FreshInterview`
/// deactivates the selected instance and starts a fresh one with the prior
/// selection dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRevisionPolicy {
    Deny,
    FreshInterview,
}

impl std::str::FromStr for SlotRevisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "deny" => Ok(Self::Deny),
            "fresh_interview" => Ok(Self::FreshInterview),
            _ => Err(format!("Invalid slot revision policy: {s}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HireflowConfig {
    pub event_channel_capacity: usize,
    pub notifications_enabled: bool,
    pub slot_revision_policy: SlotRevisionPolicy,
}

impl Default for HireflowConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: 1000,
            notifications_enabled: true,
            slot_revision_policy: SlotRevisionPolicy::FreshInterview,
        }
    }
}

impl HireflowConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(capacity) = std::env::var("HIREFLOW_EVENT_CAPACITY") {
            config.event_channel_capacity = capacity.parse().map_err(|e| {
                WorkflowError::Configuration {
                    message: format!("Invalid event_channel_capacity: {e}"),
                }
            })?;
        }

        if let Ok(enabled) = std::env::var("HIREFLOW_NOTIFICATIONS_ENABLED") {
            config.notifications_enabled = enabled.parse().map_err(|e| {
                WorkflowError::Configuration {
                    message: format!("Invalid notifications_enabled: {e}"),
                }
            })?;
        }

        if let Ok(policy) = std::env::var("HIREFLOW_SLOT_REVISION_POLICY") {
            config.slot_revision_policy =
                policy.parse().map_err(|e| WorkflowError::Configuration {
                    message: format!("Invalid slot_revision_policy: {e}"),
                })?;
        }

        Ok(config)
    }
}
