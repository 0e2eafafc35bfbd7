//! In-process chat SDK
//!
//! `LoopbackSdk` keeps its publish/subscribe registry in memory and lets the
//! caller script every outcome: events are injected with [`LoopbackSdk::emit`],
//! the result of `start` and `create_chat` is chosen up front, and every
//! outbound call is recorded for inspection.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{ActionCallback, ChatSdk, EventCallback};
use crate::error::{Result, SessionError};
use crate::types::identifiers::{AccountId, ActionName, ContactHandle, EventName, ServiceId};
use crate::types::options::StartOptions;
use crate::types::payloads::{Attachment, CustomAction, DataCollection, Localization, Theme};

/// Scripted result of an asynchronous SDK operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Outcome {
    /// Resolve successfully
    #[default]
    Succeed,
    /// Reject with the given reason
    Fail(String),
    /// Never resolve
    Hang,
}

/// Outbound call recorded by the loopback SDK
#[derive(Debug, Clone, PartialEq)]
pub enum SdkCall {
    /// `start`
    Start {
        /// Account ID
        account: AccountId,
        /// Service ID
        service: ServiceId,
        /// Start options
        options: StartOptions,
    },
    /// `set_data_collection`
    SetDataCollection(Vec<DataCollection>),
    /// `create_chat`
    CreateChat,
    /// `show_view`
    ShowView(bool),
    /// `terminate`
    Terminate(bool),
    /// `send_action`
    SendAction {
        /// Action name
        name: ActionName,
        /// Action instance ID
        id: String,
        /// Action parameters
        params: Vec<serde_json::Value>,
    },
    /// `send_message`
    SendMessage(String),
    /// `send_attachment`
    SendAttachment(Attachment),
    /// `set_theme`
    SetTheme(Theme),
    /// `add_localization`
    AddLocalization {
        /// Locale code
        locale: String,
        /// Localized strings
        strings: Localization,
    },
    /// `set_language`
    SetLanguage(String),
}

#[derive(Default)]
struct LoopbackState {
    listeners: HashMap<EventName, Vec<EventCallback>>,
    actions: HashMap<ActionName, Vec<ActionCallback>>,
    contact: Option<ContactHandle>,
    unread: u32,
    conversation: Option<serde_json::Value>,
    start_outcome: Outcome,
    create_outcome: Outcome,
    calls: Vec<SdkCall>,
}

/// In-memory implementation of [`ChatSdk`]
#[derive(Default)]
pub struct LoopbackSdk {
    state: Mutex<LoopbackState>,
}

impl LoopbackSdk {
    /// Create a loopback SDK whose operations all succeed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose the outcome of subsequent `start` calls
    pub fn set_start_outcome(&self, outcome: Outcome) {
        self.state.lock().start_outcome = outcome;
    }

    /// Choose the outcome of subsequent `create_chat` calls
    pub fn set_create_outcome(&self, outcome: Outcome) {
        self.state.lock().create_outcome = outcome;
    }

    /// Replace the current contact
    pub fn set_contact(&self, contact: Option<ContactHandle>) {
        self.state.lock().contact = contact;
    }

    /// Replace the unread count and conversation reported to observers
    pub fn set_conversation(&self, unread: u32, conversation: Option<serde_json::Value>) {
        let mut state = self.state.lock();
        state.unread = unread;
        state.conversation = conversation;
    }

    /// Deliver an event to every callback registered for `event`
    ///
    /// Callbacks run in registration order on the calling thread. Events with
    /// no registered callback are dropped. Returns the number of callbacks invoked.
    pub fn emit(&self, event: impl Into<EventName>, payload: serde_json::Value) -> usize {
        let event = event.into();
        // Snapshot so callbacks may call back into the SDK without deadlocking
        let callbacks = self
            .state
            .lock()
            .listeners
            .get(&event)
            .cloned()
            .unwrap_or_default();

        log::trace!("loopback emit {event} to {} callback(s)", callbacks.len());
        for callback in &callbacks {
            callback(payload.clone());
        }
        callbacks.len()
    }

    /// Deliver a custom action as if the operator had sent it
    pub fn emit_action(
        &self,
        name: impl Into<String>,
        id: impl Into<String>,
        data: serde_json::Value,
    ) -> usize {
        let action = CustomAction {
            name: ActionName::new(name),
            id: id.into(),
            data,
        };
        let callbacks = self
            .state
            .lock()
            .actions
            .get(&action.name)
            .cloned()
            .unwrap_or_default();

        for callback in &callbacks {
            callback(action.clone());
        }
        callbacks.len()
    }

    /// Number of callbacks registered for `event`
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.state
            .lock()
            .listeners
            .get(&EventName::from(event))
            .map_or(0, Vec::len)
    }

    /// Number of callbacks registered across all events
    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.state.lock().listeners.values().map(Vec::len).sum()
    }

    /// Number of handlers registered for a custom action
    #[must_use]
    pub fn action_handler_count(&self, name: &str) -> usize {
        self.state
            .lock()
            .actions
            .get(&ActionName::from(name))
            .map_or(0, Vec::len)
    }

    /// Outbound calls recorded so far
    #[must_use]
    pub fn calls(&self) -> Vec<SdkCall> {
        self.state.lock().calls.clone()
    }

    fn record(&self, call: SdkCall) {
        self.state.lock().calls.push(call);
    }
}

impl ChatSdk for LoopbackSdk {
    fn on(&self, event: &EventName, callback: EventCallback) {
        self.state
            .lock()
            .listeners
            .entry(event.clone())
            .or_default()
            .push(callback);
    }

    fn off(&self, event: &EventName, callback: &EventCallback) {
        let mut state = self.state.lock();
        if let Some(callbacks) = state.listeners.get_mut(event) {
            callbacks.retain(|registered| !Arc::ptr_eq(registered, callback));
            if callbacks.is_empty() {
                state.listeners.remove(event);
            }
        }
    }

    fn start(
        &self,
        account: &AccountId,
        service: &ServiceId,
        options: StartOptions,
    ) -> impl Future<Output = Result<()>> + Send {
        let outcome = {
            let mut state = self.state.lock();
            state.calls.push(SdkCall::Start {
                account: account.clone(),
                service: service.clone(),
                options,
            });
            state.start_outcome.clone()
        };

        async move {
            match outcome {
                Outcome::Succeed => Ok(()),
                Outcome::Fail(reason) => Err(SessionError::connection(reason)),
                Outcome::Hang => std::future::pending().await,
            }
        }
    }

    fn get_contact(&self) -> Option<ContactHandle> {
        self.state.lock().contact.clone()
    }

    fn get_unread_message_count(&self) -> u32 {
        self.state.lock().unread
    }

    fn get_conversation(&self) -> Option<serde_json::Value> {
        self.state.lock().conversation.clone()
    }

    fn set_data_collection(&self, forms: Vec<DataCollection>) {
        self.record(SdkCall::SetDataCollection(forms));
    }

    fn create_chat(&self) -> impl Future<Output = Result<()>> + Send {
        let outcome = {
            let mut state = self.state.lock();
            state.calls.push(SdkCall::CreateChat);
            let outcome = state.create_outcome.clone();
            if outcome == Outcome::Succeed {
                state.contact = Some(ContactHandle::new(uuid::Uuid::new_v4().to_string()));
            }
            outcome
        };

        async move {
            match outcome {
                Outcome::Succeed => Ok(()),
                Outcome::Fail(reason) => Err(SessionError::sdk(reason)),
                Outcome::Hang => std::future::pending().await,
            }
        }
    }

    fn show_view(&self, visible: bool) {
        self.record(SdkCall::ShowView(visible));
    }

    fn terminate(&self, hide_view: bool) {
        let mut state = self.state.lock();
        state.calls.push(SdkCall::Terminate(hide_view));
        state.contact = None;
    }

    fn on_action(&self, name: &ActionName, callback: ActionCallback) {
        self.state
            .lock()
            .actions
            .entry(name.clone())
            .or_default()
            .push(callback);
    }

    fn send_action(&self, name: &ActionName, id: &str, params: Vec<serde_json::Value>) {
        self.record(SdkCall::SendAction {
            name: name.clone(),
            id: id.to_string(),
            params,
        });
    }

    fn send_message(&self, text: &str) {
        self.record(SdkCall::SendMessage(text.to_string()));
    }

    fn send_attachment(&self, attachment: &Attachment) {
        self.record(SdkCall::SendAttachment(attachment.clone()));
    }

    fn set_theme(&self, theme: Theme) {
        self.record(SdkCall::SetTheme(theme));
    }

    fn add_localization(&self, locale: &str, strings: Localization) {
        self.record(SdkCall::AddLocalization {
            locale: locale.to_string(),
            strings,
        });
    }

    fn set_language(&self, locale: &str) {
        self.record(SdkCall::SetLanguage(locale.to_string()));
    }
}
