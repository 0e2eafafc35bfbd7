//! Event catalog and event payload decoding
//!
//! The catalog is plain configuration: a table from event name to the role
//! that event plays for the tracker. Deployments that listen to a different
//! set of events change the table, not the code.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use super::identifiers::EventName;
use crate::error::{Result, SessionError};

// ============================================================================
// Event Kinds
// ============================================================================

/// Role an event plays for the state reducer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Carries the agent pool size and availability flag
    AgentData,
    /// Fired when the SDK restores or confirms stored session state
    Persistence,
    /// Logged only, never mutates state
    Observe,
}

/// Events every deployment listens to
const STANDARD_EVENTS: &[(&str, EventKind)] = &[
    ("agentdata", EventKind::AgentData),
    ("persistence", EventKind::Persistence),
    ("agentpresence", EventKind::Observe),
    ("agenttyping", EventKind::Observe),
    ("chatackreceived", EventKind::Observe),
    ("chatacksent", EventKind::Observe),
    ("closeremote", EventKind::Observe),
    ("actionsent", EventKind::Observe),
    ("messagereceived", EventKind::Observe),
    ("messagesent", EventKind::Observe),
    ("attachmentreceived", EventKind::Observe),
    ("attachmentsent", EventKind::Observe),
    ("screenshotsession", EventKind::Observe),
    ("terminate", EventKind::Observe),
    ("transferred", EventKind::Observe),
];

/// The one entry the extended catalog adds to the standard one
pub const TERMINATE_BUTTON_EVENT: &str = "terminatebutton";

// ============================================================================
// Event Catalog
// ============================================================================

/// Table of event names the tracker subscribes to
///
/// Serialized as a JSON object, e.g. `{"agentdata": "agentdata", "terminate": "observe"}`.
/// A name that appears twice in the object is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventCatalog {
    entries: BTreeMap<EventName, EventKind>,
}

impl EventCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard catalog
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_EVENTS
                .iter()
                .map(|(name, kind)| (EventName::from(*name), *kind))
                .collect(),
        }
    }

    /// The standard catalog plus the `terminatebutton` event
    #[must_use]
    pub fn extended() -> Self {
        let mut catalog = Self::standard();
        catalog
            .entries
            .insert(EventName::from(TERMINATE_BUTTON_EVENT), EventKind::Observe);
        catalog
    }

    /// Load a catalog from its JSON representation
    ///
    /// # Errors
    /// Returns `SessionError::JsonDecode` if the JSON is not a name-to-kind
    /// object or names the same event twice
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add an event to the catalog
    ///
    /// # Errors
    /// Returns `SessionError::InvalidConfig` if the name is already present
    pub fn with_event(mut self, name: impl Into<EventName>, kind: EventKind) -> Result<Self> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(SessionError::invalid_config(format!(
                "event '{name}' appears twice in the catalog"
            )));
        }
        self.entries.insert(name, kind);
        Ok(self)
    }

    /// Look up the role of an event
    #[must_use]
    pub fn kind_of(&self, name: &EventName) -> Option<EventKind> {
        self.entries.get(name).copied()
    }

    /// Iterate over `(name, kind)` entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&EventName, EventKind)> {
        self.entries.iter().map(|(name, kind)| (name, *kind))
    }

    /// Number of events in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for EventCatalog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = EventCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from event name to event kind")
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = BTreeMap::new();
                while let Some((name, kind)) = map.next_entry::<EventName, EventKind>()? {
                    if entries.contains_key(&name) {
                        return Err(de::Error::custom(format_args!(
                            "event '{name}' appears twice in the catalog"
                        )));
                    }
                    entries.insert(name, kind);
                }
                Ok(EventCatalog { entries })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Fields of an agent-data event that the reducer uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentData {
    /// Whether the service reports it can accept a new chat
    pub available: bool,
    /// Number of online agents (`data.chat.agents`)
    pub agents: u32,
}

impl AgentData {
    /// Decode an agent-data payload
    ///
    /// Never fails: a missing or non-boolean `available` reads as `false`, and a
    /// missing, negative or non-integer `data.chat.agents` reads as `0`.
    #[must_use]
    pub fn from_payload(payload: &serde_json::Value) -> Self {
        let available = payload
            .get("available")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);

        let agents = payload
            .get("data")
            .and_then(|d| d.get("chat"))
            .and_then(|c| c.get("agents"))
            .and_then(serde_json::Value::as_u64)
            .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX));

        Self { available, agents }
    }
}
