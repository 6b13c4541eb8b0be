//! Clipboard Commands
//!
//! Async Clipboard API with a synchronous `execCommand` fallback.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument, HtmlTextAreaElement};

use crate::error::{describe_js, UiError, UiResult};

#[wasm_bindgen]
extern "C" {
    // Throws (caught) when navigator.clipboard is undefined
    #[wasm_bindgen(js_namespace = ["navigator", "clipboard"], js_name = writeText, catch)]
    async fn write_text(text: &str) -> Result<JsValue, JsValue>;
}

/// Write text with `navigator.clipboard.writeText`
pub async fn write_clipboard(text: &str) -> Result<(), String> {
    write_text(text)
        .await
        .map(|_| ())
        .map_err(|e| describe_js(&e))
}

/// Copy through a temporary selected textarea. Returns whether the
/// browser reported success.
pub fn copy_with_textarea(doc: &Document, text: &str) -> UiResult<bool> {
    let body = doc.body().ok_or(UiError::MissingElement("body"))?;
    let area: HtmlTextAreaElement = doc.create_element("textarea")?.unchecked_into();
    area.set_value(text);
    body.append_child(&area)?;
    area.select();

    let copied = match doc.dyn_ref::<HtmlDocument>() {
        Some(html) => html.exec_command("copy"),
        None => Ok(false),
    };
    area.remove();
    Ok(copied?)
}
