//! UI Errors
//!
//! Failures that can surface while enhancing the page.
//! None of them is fatal: callers log and move on.

use wasm_bindgen::JsValue;

/// Common result type for enhancement operations
pub type UiResult<T> = Result<T, UiError>;

#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// A DOM call threw
    #[error("DOM error: {0}")]
    Dom(String),
    /// Browser storage threw or is unavailable
    #[error("Storage error: {0}")]
    Storage(String),
    /// Currency code rejected by the formatter
    #[error("Currency error: {0}")]
    Currency(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// A required handle (window, document, body) is missing
    #[error("Missing element: {0}")]
    MissingElement(&'static str),
}

impl From<JsValue> for UiError {
    fn from(value: JsValue) -> Self {
        UiError::Dom(describe_js(&value))
    }
}

/// Render a thrown JS value as text
pub fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
