//! UI Models
//!
//! Ephemeral data held by the enhancement layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Severity class of a toast (`alert-<kind>`)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
    /// Any other framework alert class, passed through
    Other(String),
}

impl ToastKind {
    pub fn parse(kind: &str) -> Self {
        match kind.trim() {
            "" | "info" => ToastKind::Info,
            "success" => ToastKind::Success,
            "warning" => ToastKind::Warning,
            "danger" => ToastKind::Danger,
            other => {
                let cleaned: String = other
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
                    .collect();
                if cleaned.is_empty() {
                    ToastKind::Info
                } else {
                    ToastKind::Other(cleaned)
                }
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Warning => "warning",
            ToastKind::Danger => "danger",
            ToastKind::Other(kind) => kind,
        }
    }

    pub fn class_name(&self) -> String {
        format!("alert alert-{} toast-notification", self.as_str())
    }
}

/// A toast currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    /// Set once the display period is over
    pub fading: bool,
}

/// Snapshot of a form's field values (name -> value)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftRecord {
    pub fields: BTreeMap<String, String>,
}

impl DraftRecord {
    /// Build from form entries; later duplicates overwrite earlier ones
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
