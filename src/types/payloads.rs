//! Payloads forwarded to the chat SDK
//!
//! The tracker never builds these itself; callers construct them and the
//! tracker passes them through.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::identifiers::ActionName;

/// Theme overrides (theme key to value, e.g. a color hex string)
pub type Theme = HashMap<String, String>;

/// Localized strings for one locale (UI key to text)
pub type Localization = HashMap<String, String>;

/// A data-collection form attached to a new chat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataCollection {
    /// Form name
    pub name: String,
    /// Form description
    pub desc: String,
    /// Form fields
    pub data: Vec<DataField>,
}

/// One field of a data-collection form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataField {
    /// Human-readable label
    pub desc: String,
    /// Field key
    pub name: String,
    /// Field type (e.g. `firstname`, `text`)
    #[serde(rename = "type")]
    pub field_type: String,
    /// Field value
    pub value: String,
    /// Whether the operator can see this field
    pub visible: bool,
}

/// An attachment sent into the active chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Location of the file
    pub url: String,
    /// Caller-chosen attachment ID
    pub id: String,
    /// Display title
    pub title: String,
    /// MIME type (e.g. `image/png`)
    pub mime_type: String,
    /// Description shown to the operator
    pub description: String,
    /// Size in bytes
    pub size: u64,
}

/// A custom action received from the operator console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomAction {
    /// Action name
    pub name: ActionName,
    /// Action instance ID
    pub id: String,
    /// Arbitrary action data
    pub data: serde_json::Value,
}
