//! `SessionTracker`, the component the UI layer talks to
//!
//! The tracker ties the pieces together:
//!
//! ```text
//! ┌────────────┐  on/off   ┌────────────────┐  (name, payload)  ┌────────────────┐
//! │  ChatSdk   │◀─────────│ EventBusAdapter │─────────────────▶│ SessionReducer │
//! │ (external) │──events──▶│  (registry)     │                   │  (state)       │
//! └────────────┘           └────────────────┘                   └───────┬────────┘
//!                                                                        │ watch
//!                                                                        ▼
//!                                                                   UI re-render
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use livechat_session::{SessionStatus, SessionTracker, StartOptions, TrackerOptions};
//! use livechat_session::sdk::loopback::LoopbackSdk;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sdk = Arc::new(LoopbackSdk::new());
//! let options = TrackerOptions::builder()
//!     .account_id("acct")
//!     .service_id("service")
//!     .start_options(StartOptions { block_side_tab: true, developer_mode: true })
//!     .connect_timeout(Duration::from_secs(10))
//!     .build();
//!
//! let tracker = SessionTracker::new(sdk, options)?;
//! tracker.attach()?;
//!
//! let mut state_rx = tracker.watch();
//! if tracker.begin_connection().await? == SessionStatus::Connected {
//!     log::info!("connected, available = {}", state_rx.borrow_and_update().available);
//! }
//! # Ok(())
//! # }
//! ```

mod dispatch;
mod tracker_impl;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};

use crate::bus::EventBusAdapter;
use crate::sdk::ChatSdk;
use crate::state::SessionReducer;
use crate::types::identifiers::ContactHandle;
use crate::types::options::TrackerOptions;
use crate::types::payloads::CustomAction;
use crate::types::status::SessionState;

/// Result of [`SessionTracker::create_or_resume_session`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// An existing contact was brought back into view
    Resumed(ContactHandle),
    /// A new chat was created and shown
    Created,
}

/// State shared between the tracker and the callbacks it installs
pub(crate) struct Shared<S: ChatSdk> {
    pub sdk: Arc<S>,
    pub reducer: Mutex<SessionReducer>,
    pub state_tx: watch::Sender<SessionState>,
}

/// Tracks chat availability, agent count and connection status for one SDK client
///
/// Dropping the tracker removes every event callback it installed.
pub struct SessionTracker<S: ChatSdk + 'static> {
    /// Tracker configuration
    options: TrackerOptions,
    /// Reducer, state channel and SDK handle shared with callbacks
    shared: Arc<Shared<S>>,
    /// Event registrations
    bus: EventBusAdapter<S>,
    /// Custom actions only register once (the SDK has no way to remove them)
    actions_registered: AtomicBool,
    /// Sender for configured custom actions
    action_tx: mpsc::UnboundedSender<CustomAction>,
    /// Receiver for configured custom actions (until taken)
    action_rx: Option<mpsc::UnboundedReceiver<CustomAction>>,
}

impl<S: ChatSdk + 'static> Drop for SessionTracker<S> {
    fn drop(&mut self) {
        self.bus.clear();
    }
}
