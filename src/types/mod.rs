//! Type definitions for the session tracker
//!
//! - [`identifiers`] - Type-safe ID wrappers (`EventName`, `AccountId`, `ContactHandle`, ...)
//! - [`status`] - Session status and the exposed state snapshot
//! - [`events`] - Event catalog and agent-data decoding
//! - [`options`] - Tracker configuration
//! - [`payloads`] - Data forwarded to the SDK (forms, attachments, actions)

pub mod events;
pub mod identifiers;
pub mod options;
pub mod payloads;
pub mod status;

// Re-export commonly used types
pub use events::{AgentData, EventCatalog, EventKind};
pub use identifiers::{AccountId, ActionName, ContactHandle, EventName, ServiceId};
pub use options::{StartOptions, TrackerOptions, TrackerOptionsBuilder};
pub use payloads::{Attachment, CustomAction, DataCollection, DataField, Localization, Theme};
pub use status::{SessionState, SessionStatus};
