//! Tracker options and configuration
//!
//! This module contains the configuration for a `SessionTracker`,
//! including a builder pattern for easy configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::events::EventCatalog;
use super::identifiers::{AccountId, ActionName, ServiceId};

// ============================================================================
// Start Options
// ============================================================================

/// Options passed through to the SDK's `start` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartOptions {
    /// Suppress the SDK's default side-tab entry point
    pub block_side_tab: bool,
    /// Enable verbose SDK diagnostics
    pub developer_mode: bool,
}

// ============================================================================
// Tracker Options
// ============================================================================

/// Main options for `SessionTracker`
#[derive(Debug, Clone, Default)]
pub struct TrackerOptions {
    /// Account the SDK connects with
    pub account_id: AccountId,
    /// Service the SDK connects to
    pub service_id: ServiceId,
    /// Options forwarded to `start`
    pub start_options: StartOptions,
    /// Events to subscribe to and their roles
    pub catalog: EventCatalog,
    /// Upper bound on the connection-start operation (`None` waits indefinitely)
    pub connect_timeout: Option<Duration>,
    /// Custom actions to listen for from the operator console
    pub actions: Vec<ActionName>,
}

impl TrackerOptions {
    /// Create a new builder for `TrackerOptions`
    #[must_use]
    pub fn builder() -> TrackerOptionsBuilder {
        TrackerOptionsBuilder::default()
    }
}

// ============================================================================
// Builder for TrackerOptions
// ============================================================================

/// Builder for `TrackerOptions`
///
/// Starts from the standard event catalog.
#[derive(Debug)]
pub struct TrackerOptionsBuilder {
    options: TrackerOptions,
}

impl Default for TrackerOptionsBuilder {
    fn default() -> Self {
        Self {
            options: TrackerOptions {
                catalog: EventCatalog::standard(),
                ..TrackerOptions::default()
            },
        }
    }
}

impl TrackerOptionsBuilder {
    /// Set the account ID
    #[must_use]
    pub fn account_id(mut self, id: impl Into<AccountId>) -> Self {
        self.options.account_id = id.into();
        self
    }

    /// Set the service ID
    #[must_use]
    pub fn service_id(mut self, id: impl Into<ServiceId>) -> Self {
        self.options.service_id = id.into();
        self
    }

    /// Set the options forwarded to `start`
    #[must_use]
    pub const fn start_options(mut self, options: StartOptions) -> Self {
        self.options.start_options = options;
        self
    }

    /// Replace the event catalog
    #[must_use]
    pub fn catalog(mut self, catalog: EventCatalog) -> Self {
        self.options.catalog = catalog;
        self
    }

    /// Bound the connection-start operation
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.options.connect_timeout = Some(timeout);
        self
    }

    /// Listen for a custom action from the operator console
    #[must_use]
    pub fn add_action(mut self, name: impl Into<ActionName>) -> Self {
        self.options.actions.push(name.into());
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> TrackerOptions {
        self.options
    }
}
