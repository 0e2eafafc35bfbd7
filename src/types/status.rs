//! Session status and the exposed state vector

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of the connection to the chat backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// No connection attempt has been made
    #[default]
    Disconnected,
    /// A connection-start operation is in flight
    Starting,
    /// The last connection-start operation succeeded
    Connected,
    /// The last connection-start operation failed or timed out
    Error,
}

impl SessionStatus {
    /// Whether a fresh `begin_connection` is allowed from this status
    #[must_use]
    pub const fn can_begin(self) -> bool {
        !matches!(self, Self::Starting)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Disconnected => "Disconnected",
            Self::Starting => "Starting",
            Self::Connected => "Connected",
            Self::Error => "Error",
        };
        f.write_str(label)
    }
}

/// Read-only snapshot of the tracked state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Connection lifecycle status
    pub status: SessionStatus,
    /// Whether a chat session can currently be started or resumed
    pub available: bool,
    /// Last known number of online agents
    pub agent_count: u32,
}
