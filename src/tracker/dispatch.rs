//! Event handlers installed by `SessionTracker`

use std::sync::{Arc, Weak};

use tokio::sync::mpsc;

use super::Shared;
use crate::bus::EventHandler;
use crate::sdk::{ActionCallback, ChatSdk};
use crate::types::events::EventKind;
use crate::types::identifiers::{ActionName, EventName};
use crate::types::payloads::CustomAction;
use crate::types::status::SessionState;

impl<S: ChatSdk> Shared<S> {
    /// Route one event to the reducer and publish the new state
    pub(super) fn handle_event(&self, kind: EventKind, name: &EventName, payload: &serde_json::Value) {
        log::debug!("event -> {name}: {payload}");

        match kind {
            EventKind::AgentData => {}
            EventKind::Persistence => self.log_contact(),
            EventKind::Observe => return,
        }

        // Query the SDK before taking the reducer lock
        let contact_present = self.sdk.get_contact().is_some();
        let state = self.reducer.lock().apply(kind, payload, contact_present);
        self.publish(state);
    }

    /// Push a state snapshot to watchers
    pub(super) fn publish(&self, state: SessionState) {
        self.state_tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }

    fn log_contact(&self) {
        log::debug!("contact: {:?}", self.sdk.get_contact());
        log::debug!("unread messages: {}", self.sdk.get_unread_message_count());
        log::debug!("conversation: {:?}", self.sdk.get_conversation());
    }
}

/// Build the handler for one catalog entry
///
/// Holds the shared state weakly so the SDK's callback table does not keep
/// the tracker alive.
pub(super) fn event_handler<S: ChatSdk + 'static>(
    shared: Weak<Shared<S>>,
    kind: EventKind,
) -> EventHandler {
    Arc::new(move |name: &EventName, payload: serde_json::Value| {
        if let Some(shared) = shared.upgrade() {
            shared.handle_event(kind, name, &payload);
        }
    })
}

/// Build the callback that forwards a configured custom action to the tracker's channel
pub(super) fn action_forwarder(
    name: ActionName,
    tx: mpsc::UnboundedSender<CustomAction>,
) -> ActionCallback {
    Arc::new(move |action: CustomAction| {
        log::debug!(
            "custom action '{}' ({}) from operator: {}",
            action.name.as_str(),
            action.id,
            action.data
        );
        if tx.send(action).is_err() {
            log::warn!("Dropped custom action '{}': receiver closed", name.as_str());
        }
    })
}
