//! Session state reducer
//!
//! Owns the state vector exposed to the UI and applies the two availability
//! rules plus the connection lifecycle:
//!
//! ```text
//! Disconnected ──begin──▶ Starting ──ok──▶ Connected
//!                            │
//!                            └──err/timeout──▶ Error
//! Connected | Error ──begin──▶ Starting
//! ```
//!
//! Availability is recomputed by whichever rule's event fired last:
//!
//! - agent data: `available = payload.available || contact exists`
//! - persistence: `available = agent_count > 0 || contact exists`
//!
//! A failed connection leaves availability at its last computed value.

use crate::error::{Result, SessionError};
use crate::types::events::{AgentData, EventKind};
use crate::types::status::{SessionState, SessionStatus};

/// Deterministic reducer over SDK events and connection outcomes
#[derive(Debug, Default)]
pub struct SessionReducer {
    state: SessionState,
}

impl SessionReducer {
    /// Create a reducer in the `Disconnected` state with no agents
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SessionState {
                status: SessionStatus::Disconnected,
                available: false,
                agent_count: 0,
            },
        }
    }

    /// Current state snapshot
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Enter `Starting` for a new connection attempt
    ///
    /// # Errors
    /// Returns `SessionError::InvalidTransition` if an attempt is already in flight
    pub fn begin_connection(&mut self) -> Result<SessionState> {
        if !self.state.status.can_begin() {
            return Err(SessionError::invalid_transition(
                self.state.status,
                SessionStatus::Starting,
            ));
        }
        self.transition(SessionStatus::Starting);
        Ok(self.state)
    }

    /// Resolve the in-flight attempt to `Connected` or `Error`
    ///
    /// # Errors
    /// Returns `SessionError::InvalidTransition` if no attempt is in flight
    pub fn complete_connection(&mut self, succeeded: bool) -> Result<SessionState> {
        let target = if succeeded {
            SessionStatus::Connected
        } else {
            SessionStatus::Error
        };
        if self.state.status != SessionStatus::Starting {
            return Err(SessionError::invalid_transition(self.state.status, target));
        }
        self.transition(target);
        Ok(self.state)
    }

    /// Apply an agent-data event
    ///
    /// The agent count is overwritten, and an existing contact keeps the
    /// service available even when the pool reports otherwise.
    pub fn apply_agent_data(&mut self, data: AgentData, contact_present: bool) -> SessionState {
        self.state.agent_count = data.agents;
        self.state.available = data.available || contact_present;
        log::debug!(
            "agent data: agents={} available={} (reported {}, contact {})",
            self.state.agent_count,
            self.state.available,
            data.available,
            contact_present
        );
        self.state
    }

    /// Apply a persistence event using the last known agent count
    pub fn apply_persistence(&mut self, contact_present: bool) -> SessionState {
        self.state.available = self.state.agent_count > 0 || contact_present;
        log::debug!(
            "persistence: available={} (agents {}, contact {})",
            self.state.available,
            self.state.agent_count,
            contact_present
        );
        self.state
    }

    /// Apply a decoded catalog event
    ///
    /// `Observe` events leave the state untouched.
    pub fn apply(
        &mut self,
        kind: EventKind,
        payload: &serde_json::Value,
        contact_present: bool,
    ) -> SessionState {
        match kind {
            EventKind::AgentData => {
                self.apply_agent_data(AgentData::from_payload(payload), contact_present)
            }
            EventKind::Persistence => self.apply_persistence(contact_present),
            EventKind::Observe => self.state,
        }
    }

    fn transition(&mut self, to: SessionStatus) {
        log::info!("Session status {} -> {}", self.state.status, to);
        self.state.status = to;
    }
}
