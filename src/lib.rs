//! # Live-chat session tracker
//!
//! Keeps a locally observable picture of an embedded live-chat SDK by watching
//! the events it publishes:
//!
//! - whether a chat can be started or resumed right now (`available`)
//! - how many agents are online (`agent_count`)
//! - where the connection to the chat backend is in its lifecycle (`status`)
//!
//! The SDK itself is an external collaborator reached through the [`ChatSdk`]
//! trait. The crate never reimplements its transport or UI.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use livechat_session::{SessionTracker, TrackerOptions};
//! use livechat_session::sdk::loopback::LoopbackSdk;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sdk = Arc::new(LoopbackSdk::new());
//!     let options = TrackerOptions::builder()
//!         .account_id("acct")
//!         .service_id("service")
//!         .build();
//!
//!     let tracker = SessionTracker::new(sdk.clone(), options)?;
//!     tracker.attach()?;
//!     tracker.begin_connection().await?;
//!
//!     sdk.emit("agentdata", serde_json::json!({
//!         "available": true,
//!         "data": { "chat": { "agents": 3 } }
//!     }));
//!     assert!(tracker.state().available);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`]: Identifiers, status, event catalog, options and payloads
//! - [`sdk`]: The [`ChatSdk`] trait and an in-process loopback implementation
//! - [`bus`]: Event bus adapter (symmetric subscribe/unsubscribe)
//! - [`state`]: Session state reducer (availability rules and status lifecycle)
//! - [`tracker`]: [`SessionTracker`], the API the UI layer uses
//! - [`error`]: Error types and handling
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, SessionError>`](Result). Connection
//! failures are not errors: they surface as [`SessionStatus::Error`]. Malformed
//! event payloads never fail; missing fields read as defaults.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bus;
pub mod error;
pub mod sdk;
pub mod state;
pub mod tracker;
pub mod types;

// Re-export commonly used types for external API
pub use bus::{EventBusAdapter, EventHandler};
pub use error::{Result, SessionError};
pub use sdk::{ActionCallback, ChatSdk, EventCallback};
pub use state::SessionReducer;
pub use tracker::{SessionOutcome, SessionTracker};

// Re-export type submodules for flat public API
pub use types::events::{AgentData, EventCatalog, EventKind};
pub use types::identifiers::{AccountId, ActionName, ContactHandle, EventName, ServiceId};
pub use types::options::{StartOptions, TrackerOptions, TrackerOptionsBuilder};
pub use types::payloads::{
    Attachment, CustomAction, DataCollection, DataField, Localization, Theme,
};
pub use types::status::{SessionState, SessionStatus};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
