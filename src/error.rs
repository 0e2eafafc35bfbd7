//! Error types for the live-chat session tracker

use thiserror::Error;

use crate::types::status::SessionStatus;

/// Main error type for session tracking
#[derive(Error, Debug)]
pub enum SessionError {
    /// The connection-start operation was rejected by the SDK
    #[error("Connection error: {0}")]
    Connection(String),

    /// Creating a new chat failed
    #[error("Session creation failed: {0}")]
    SessionCreation(String),

    /// Generic failure reported by the chat SDK
    #[error("SDK error: {0}")]
    Sdk(String),

    /// Timeout error
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A status transition that the lifecycle does not allow
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// Status before the attempted transition
        from: SessionStatus,
        /// Status that was requested
        to: SessionStatus,
    },

    /// An event name already has an active registration
    #[error("Event '{0}' is already subscribed")]
    DuplicateSubscription(String),

    /// JSON decode error
    #[error("JSON decode error: {0}")]
    JsonDecode(#[from] serde_json::Error),
}

/// Result type alias for session tracking operations
pub type Result<T> = std::result::Result<T, SessionError>;

impl SessionError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a session creation error
    pub fn session_creation(msg: impl Into<String>) -> Self {
        Self::SessionCreation(msg.into())
    }

    /// Create an SDK error
    pub fn sdk(msg: impl Into<String>) -> Self {
        Self::Sdk(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid transition error
    #[must_use]
    pub const fn invalid_transition(from: SessionStatus, to: SessionStatus) -> Self {
        Self::InvalidTransition { from, to }
    }

    /// Create a duplicate subscription error
    pub fn duplicate_subscription(event: impl Into<String>) -> Self {
        Self::DuplicateSubscription(event.into())
    }
}
