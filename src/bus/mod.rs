//! Event bus adapter
//!
//! Binds a table of event names to handlers on the SDK's publish/subscribe
//! surface and removes exactly those bindings again on teardown.
//!
//! Each installed callback shares a "live" flag with its registry entry.
//! Teardown clears the flag before asking the SDK to drop the callback, so a
//! dispatch that is already under way, or a callback the SDK fails to remove,
//! never reaches a handler once [`EventBusAdapter::unsubscribe_all`] returns.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::error::{Result, SessionError};
use crate::sdk::{ChatSdk, EventCallback};
use crate::types::identifiers::EventName;

/// Handler invoked with the event name and its payload
pub type EventHandler = Arc<dyn Fn(&EventName, serde_json::Value) + Send + Sync>;

/// Active registration for one event name
struct Subscription {
    /// Exact callback handed to `ChatSdk::on`
    callback: EventCallback,
    /// Cleared on teardown
    live: Arc<AtomicBool>,
}

/// Registry of callbacks installed on the SDK
pub struct EventBusAdapter<S: ChatSdk> {
    sdk: Arc<S>,
    registry: Mutex<HashMap<EventName, Subscription>>,
}

impl<S: ChatSdk> EventBusAdapter<S> {
    /// Create an adapter with an empty registry
    pub fn new(sdk: Arc<S>) -> Self {
        Self {
            sdk,
            registry: Mutex::new(HashMap::new()),
        }
    }

    /// Register one callback per `(name, handler)` entry
    ///
    /// All names are validated before anything is registered, so a failed
    /// call leaves the registry and the SDK untouched.
    ///
    /// # Returns
    /// Number of callbacks registered
    ///
    /// # Errors
    /// Returns `SessionError::DuplicateSubscription` if a name is already
    /// subscribed or appears twice in `handlers`
    pub fn subscribe_all(&self, handlers: &[(EventName, EventHandler)]) -> Result<usize> {
        let installed = {
            let mut registry = self.registry.lock();

            let mut seen = HashSet::with_capacity(handlers.len());
            for (name, _) in handlers {
                if registry.contains_key(name) || !seen.insert(name) {
                    return Err(SessionError::duplicate_subscription(name.as_str()));
                }
            }

            let mut installed = Vec::with_capacity(handlers.len());
            for (name, handler) in handlers {
                let live = Arc::new(AtomicBool::new(true));
                let callback = Self::guarded_callback(name.clone(), handler.clone(), live.clone());
                registry.insert(
                    name.clone(),
                    Subscription {
                        callback: callback.clone(),
                        live,
                    },
                );
                installed.push((name, callback));
            }
            installed
        };

        // SDK calls happen outside the registry lock
        for (name, callback) in &installed {
            self.sdk.on(name, callback.clone());
        }

        log::debug!("Subscribed {} event(s)", installed.len());
        Ok(installed.len())
    }

    /// Remove the callbacks installed for the given names
    ///
    /// Names that were never subscribed are skipped. Calling this twice is a no-op
    /// the second time.
    ///
    /// # Returns
    /// Number of callbacks removed
    pub fn unsubscribe_all<'a>(&self, names: impl IntoIterator<Item = &'a EventName>) -> usize {
        let removed: Vec<(EventName, Subscription)> = {
            let mut registry = self.registry.lock();
            names
                .into_iter()
                .filter_map(|name| registry.remove_entry(name))
                .collect()
        };
        self.release(removed)
    }

    /// Remove every callback this adapter installed
    pub fn clear(&self) -> usize {
        let removed: Vec<(EventName, Subscription)> = self.registry.lock().drain().collect();
        self.release(removed)
    }

    /// Whether `name` currently has an active registration
    #[must_use]
    pub fn is_subscribed(&self, name: &EventName) -> bool {
        self.registry.lock().contains_key(name)
    }

    /// Number of active registrations
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.lock().len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.lock().is_empty()
    }

    fn release(&self, removed: Vec<(EventName, Subscription)>) -> usize {
        for (name, subscription) in &removed {
            subscription.live.store(false, Ordering::Release);
            self.sdk.off(name, &subscription.callback);
        }
        if !removed.is_empty() {
            log::debug!("Unsubscribed {} event(s)", removed.len());
        }
        removed.len()
    }

    fn guarded_callback(
        name: EventName,
        handler: EventHandler,
        live: Arc<AtomicBool>,
    ) -> EventCallback {
        Arc::new(move |payload: serde_json::Value| {
            if live.load(Ordering::Acquire) {
                handler(&name, payload);
            } else {
                log::trace!("Dropped '{name}' delivered after teardown");
            }
        })
    }
}
