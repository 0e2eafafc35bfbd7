//! Interface to the embedded chat SDK
//!
//! The SDK is an externally owned collaborator. The tracker receives it as an
//! `Arc<S>` and only ever talks to it through [`ChatSdk`]; it never creates
//! the real client itself.
//!
//! [`loopback::LoopbackSdk`] is an in-process implementation used by the demo
//! binary and the test suite.

pub mod loopback;

use std::future::Future;
use std::sync::Arc;

use crate::error::Result;
use crate::types::identifiers::{AccountId, ActionName, ContactHandle, EventName, ServiceId};
use crate::types::options::StartOptions;
use crate::types::payloads::{Attachment, CustomAction, DataCollection, Localization, Theme};

/// Callback registered for a named SDK event; receives the event payload
pub type EventCallback = Arc<dyn Fn(serde_json::Value) + Send + Sync>;

/// Callback registered for a custom action from the operator console
pub type ActionCallback = Arc<dyn Fn(CustomAction) + Send + Sync>;

/// Method surface of the chat SDK
///
/// Implementations must deliver events for a given name in emission order and
/// must not dispatch two callbacks concurrently.
pub trait ChatSdk: Send + Sync {
    /// Register a callback for an event
    fn on(&self, event: &EventName, callback: EventCallback);

    /// Remove a callback previously passed to [`ChatSdk::on`]
    ///
    /// Callbacks are matched by identity (`Arc::ptr_eq`). Unknown callbacks are ignored.
    fn off(&self, event: &EventName, callback: &EventCallback);

    /// Connect to the chat backend
    ///
    /// # Errors
    /// Returns error if the backend rejects the connection
    fn start(
        &self,
        account: &AccountId,
        service: &ServiceId,
        options: StartOptions,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Current contact, if a chat session exists
    fn get_contact(&self) -> Option<ContactHandle>;

    /// Number of unread messages in the current contact
    fn get_unread_message_count(&self) -> u32;

    /// Conversation transcript of the current contact
    fn get_conversation(&self) -> Option<serde_json::Value>;

    /// Set the data-collection forms attached to the next chat created
    fn set_data_collection(&self, forms: Vec<DataCollection>);

    /// Create a new chat
    ///
    /// # Errors
    /// Returns error if the chat could not be created
    fn create_chat(&self) -> impl Future<Output = Result<()>> + Send;

    /// Show or hide the chat view
    fn show_view(&self, visible: bool);

    /// Terminate the current contact
    fn terminate(&self, hide_view: bool);

    /// Register a handler for a custom action sent by the operator
    fn on_action(&self, name: &ActionName, callback: ActionCallback);

    /// Send a custom action to the operator console
    fn send_action(&self, name: &ActionName, id: &str, params: Vec<serde_json::Value>);

    /// Send a text message into the current contact
    fn send_message(&self, text: &str);

    /// Send an attachment into the current contact
    fn send_attachment(&self, attachment: &Attachment);

    /// Replace theme values
    fn set_theme(&self, theme: Theme);

    /// Register localized strings for a locale
    fn add_localization(&self, locale: &str, strings: Localization);

    /// Switch the active locale
    fn set_language(&self, locale: &str);
}
