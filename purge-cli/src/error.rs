//! Purge error types

use std::time::Duration;

use purge_client::ClientError;
use purge_core::domain::task::TaskState;
use thiserror::Error;

/// Result type alias for purge operations
pub type Result<T> = std::result::Result<T, PurgeError>;

/// Reasons a purge run aborts
#[derive(Debug, Error)]
pub enum PurgeError {
    /// A call to the Pulp API failed
    #[error("Failed to {action}")]
    Api {
        action: String,
        #[source]
        source: ClientError,
    },

    /// The cleanup task did not finish within the configured deadline
    #[error("Task {href} still {state} after {waited:?}")]
    Timeout {
        href: String,
        state: TaskState,
        waited: Duration,
    },

    /// The cleanup task ended in a state other than `completed`
    #[error("Task {href} ended in state '{state}'{}", format_detail(.detail))]
    TaskFailed {
        href: String,
        state: TaskState,
        detail: Option<String>,
    },
}

impl PurgeError {
    pub fn api(action: impl Into<String>, source: ClientError) -> Self {
        Self::Api {
            action: action.into(),
            source,
        }
    }
}

fn format_detail(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}
