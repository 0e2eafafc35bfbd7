//! `SessionTracker` implementation
//!
//! This module contains the constructor and public API methods for `SessionTracker`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};

use super::{SessionOutcome, Shared, dispatch};
use crate::bus::{EventBusAdapter, EventHandler};
use crate::error::{Result, SessionError};
use crate::sdk::ChatSdk;
use crate::state::SessionReducer;
use crate::types::identifiers::{ActionName, EventName};
use crate::types::options::TrackerOptions;
use crate::types::payloads::{Attachment, CustomAction, DataCollection, Localization, Theme};
use crate::types::status::{SessionState, SessionStatus};

/// Connection attempt that has moved the reducer to `Starting`
///
/// Settles as failed if dropped before [`settle`](Self::settle) runs.
struct PendingConnection<'a, S: ChatSdk> {
    shared: &'a Shared<S>,
    settled: bool,
}

impl<S: ChatSdk> PendingConnection<'_, S> {
    fn settle(mut self, succeeded: bool) -> Result<SessionState> {
        self.settled = true;
        let state = self.shared.reducer.lock().complete_connection(succeeded)?;
        self.shared.publish(state);
        Ok(state)
    }
}

impl<S: ChatSdk> Drop for PendingConnection<'_, S> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let completed = self.shared.reducer.lock().complete_connection(false);
        if let Ok(state) = completed {
            log::warn!("Connection attempt cancelled before the chat SDK started");
            self.shared.publish(state);
        }
    }
}

impl<S: ChatSdk + 'static> super::SessionTracker<S> {
    /// Create a tracker for an SDK client
    ///
    /// Nothing is subscribed until [`attach`](Self::attach) is called.
    ///
    /// # Arguments
    /// * `sdk` - The externally owned SDK client
    /// * `options` - Tracker configuration
    ///
    /// # Errors
    /// Returns `SessionError::InvalidConfig` if an identifier is empty, the
    /// catalog is empty, or the connect timeout is zero
    pub fn new(sdk: Arc<S>, options: TrackerOptions) -> Result<Self> {
        if options.account_id.as_str().is_empty() {
            return Err(SessionError::invalid_config("account id is empty"));
        }
        if options.service_id.as_str().is_empty() {
            return Err(SessionError::invalid_config("service id is empty"));
        }
        if options.catalog.is_empty() {
            return Err(SessionError::invalid_config("event catalog is empty"));
        }
        if options.connect_timeout.is_some_and(|t| t.is_zero()) {
            return Err(SessionError::invalid_config("connect timeout must be non-zero"));
        }

        let reducer = SessionReducer::new();
        let (state_tx, _) = watch::channel(reducer.state());
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Ok(Self {
            options,
            bus: EventBusAdapter::new(sdk.clone()),
            shared: Arc::new(Shared {
                sdk,
                reducer: Mutex::new(reducer),
                state_tx,
            }),
            actions_registered: AtomicBool::new(false),
            action_tx,
            action_rx: Some(action_rx),
        })
    }

    /// Subscribe to every catalog event and register configured custom actions
    ///
    /// # Returns
    /// Number of events subscribed
    ///
    /// # Errors
    /// Returns `SessionError::DuplicateSubscription` if the tracker is already attached
    pub fn attach(&self) -> Result<usize> {
        let handlers: Vec<(EventName, EventHandler)> = self
            .options
            .catalog
            .iter()
            .map(|(name, kind)| {
                (
                    name.clone(),
                    dispatch::event_handler(Arc::downgrade(&self.shared), kind),
                )
            })
            .collect();
        let count = self.bus.subscribe_all(&handlers)?;

        if !self.actions_registered.swap(true, Ordering::AcqRel) {
            for name in &self.options.actions {
                self.shared.sdk.on_action(
                    name,
                    dispatch::action_forwarder(name.clone(), self.action_tx.clone()),
                );
            }
        }

        log::info!("Tracker attached ({count} events)");
        Ok(count)
    }

    /// Remove every event callback installed by [`attach`](Self::attach)
    ///
    /// Safe to call repeatedly. No handler runs for events emitted after this returns.
    ///
    /// # Returns
    /// Number of events unsubscribed
    pub fn detach(&self) -> usize {
        let count = self
            .bus
            .unsubscribe_all(self.options.catalog.iter().map(|(name, _)| name));
        if count > 0 {
            log::info!("Tracker detached ({count} events)");
        }
        count
    }

    /// Whether the tracker currently has event callbacks installed
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.bus.is_empty()
    }

    /// Current state snapshot
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.shared.reducer.lock().state()
    }

    /// Receiver that observes every state change
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.shared.state_tx.subscribe()
    }

    /// Take the receiver for custom actions configured in the options
    pub const fn take_action_receiver(
        &mut self,
    ) -> Option<mpsc::UnboundedReceiver<CustomAction>> {
        self.action_rx.take()
    }

    /// Connect to the chat backend
    ///
    /// Moves to `Starting`, awaits the SDK's `start` (bounded by the configured
    /// connect timeout, if any), then settles on `Connected` or `Error`.
    /// Connection failures are reported through the returned status, not as an
    /// error, and leave availability untouched. Dropping the returned future
    /// before it completes settles the attempt as `Error`.
    ///
    /// # Errors
    /// Returns `SessionError::InvalidTransition` if a connection attempt is already in flight
    pub async fn begin_connection(&self) -> Result<SessionStatus> {
        let state = self.shared.reducer.lock().begin_connection()?;
        self.shared.publish(state);
        let attempt = PendingConnection {
            shared: &self.shared,
            settled: false,
        };

        log::info!(
            "Starting chat SDK (account {}, service {})",
            self.options.account_id.as_str(),
            self.options.service_id.as_str()
        );
        let start = self.shared.sdk.start(
            &self.options.account_id,
            &self.options.service_id,
            self.options.start_options,
        );
        let outcome = match self.options.connect_timeout {
            Some(limit) => tokio::time::timeout(limit, start).await.unwrap_or_else(|_| {
                Err(SessionError::timeout(format!(
                    "chat SDK did not start within {limit:?}"
                )))
            }),
            None => start.await,
        };

        if let Err(ref e) = outcome {
            log::warn!("Chat SDK failed to start: {e}");
        }

        let state = attempt.settle(outcome.is_ok())?;
        Ok(state.status)
    }

    /// Bring the current contact into view, or create a new chat if there is none
    ///
    /// # Arguments
    /// * `data_collection` - Forms set on the SDK before a new chat is created
    ///
    /// # Errors
    /// Returns `SessionError::SessionCreation` if the SDK fails to create the chat.
    /// The attempt is not retried.
    pub async fn create_or_resume_session(
        &self,
        data_collection: Option<Vec<DataCollection>>,
    ) -> Result<SessionOutcome> {
        let sdk = &self.shared.sdk;

        if let Some(contact) = sdk.get_contact() {
            log::info!("Resuming contact {}", contact.as_str());
            sdk.show_view(true);
            return Ok(SessionOutcome::Resumed(contact));
        }

        if let Some(forms) = data_collection {
            sdk.set_data_collection(forms);
        }
        sdk.create_chat().await.map_err(|e| {
            log::warn!("Failed to create chat: {e}");
            SessionError::session_creation(e.to_string())
        })?;

        sdk.show_view(true);
        log::info!("Created chat");
        Ok(SessionOutcome::Created)
    }

    /// Terminate the current contact
    ///
    /// # Arguments
    /// * `hide_view` - Also hide the chat view
    pub fn end_session(&self, hide_view: bool) {
        log::info!("Ending session (hide view: {hide_view})");
        self.shared.sdk.terminate(hide_view);
    }

    /// Listen for a custom action with a caller-provided handler
    pub fn register_action<F>(&self, name: impl Into<ActionName>, handler: F)
    where
        F: Fn(CustomAction) + Send + Sync + 'static,
    {
        let name = name.into();
        log::debug!("Registering custom action '{}'", name.as_str());
        self.shared.sdk.on_action(&name, Arc::new(handler));
    }

    /// Send a custom action to the operator console
    pub fn send_action(
        &self,
        name: impl Into<ActionName>,
        id: &str,
        params: Vec<serde_json::Value>,
    ) {
        let name = name.into();
        log::debug!("Sending custom action '{}' ({id})", name.as_str());
        self.shared.sdk.send_action(&name, id, params);
    }

    /// Send a text message into the current contact
    pub fn send_message(&self, text: &str) {
        self.shared.sdk.send_message(text);
    }

    /// Send an attachment into the current contact
    pub fn send_attachment(&self, attachment: &Attachment) {
        self.shared.sdk.send_attachment(attachment);
    }

    /// Replace theme values
    pub fn set_theme(&self, theme: Theme) {
        self.shared.sdk.set_theme(theme);
    }

    /// Register localized strings for a locale and make it the active language
    pub fn apply_localization(&self, locale: &str, strings: Localization) {
        self.shared.sdk.add_localization(locale, strings);
        self.shared.sdk.set_language(locale);
    }
}
