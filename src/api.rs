//! Script API
//!
//! Helpers other page scripts call through `window.AccountingSystem`.

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::commands;
use crate::context::use_ui_context;
use crate::error::{describe_js, UiResult};
use crate::locale::{FixedLocale, Locale};
use crate::feedback::{loading, toast};
use crate::models::ToastKind;
use crate::numeric;

pub const API_GLOBAL: &str = "AccountingSystem";
pub const COPIED_MESSAGE: &str = "Copied to clipboard!";

pub fn show_toast(message: &str, kind: Option<&str>) -> Option<u64> {
    let ctx = use_ui_context()?;
    Some(toast::show_toast(&ctx, message, ToastKind::parse(kind.unwrap_or("info"))))
}

/// Copy text, falling back to `execCommand` when the async API is missing
/// or refuses, then confirm with a toast
pub fn copy_to_clipboard(text: String) {
    let Some(ctx) = use_ui_context() else {
        return;
    };
    spawn_local(async move {
        if let Err(e) = commands::write_clipboard(&text).await {
            log::debug!("[API] Clipboard API unavailable ({}), using fallback", e);
            if let Err(e) = commands::copy_with_textarea(&ctx.document, &text) {
                log::warn!("[API] Fallback copy failed: {}", e);
            }
        }
        toast::show_toast(&ctx, COPIED_MESSAGE, ToastKind::Success);
    });
}

pub fn show_button_loading(button: &Element) -> bool {
    let Some(ctx) = use_ui_context() else {
        return false;
    };
    loading::show_loading(button, ctx.scheduler.as_ref(), ctx.config.button_restore_ms)
}

pub fn hide_button_loading(button: &Element) -> bool {
    loading::hide_loading(button)
}

pub fn confirm_delete(message: Option<&str>) -> bool {
    match web_sys::window() {
        Some(window) => commands::confirm(&window, message),
        None => false,
    }
}

/// Format with the page locale; the built-in en-US one before startup
pub fn format_currency(amount: f64, currency: Option<&str>) -> UiResult<String> {
    let code = currency.unwrap_or("USD");
    match use_ui_context() {
        Some(ctx) => ctx.locale.format_currency(amount, code),
        None => FixedLocale.format_currency(amount, code),
    }
}

// ========================
// JS registration
// ========================

fn js_amount(value: &JsValue) -> f64 {
    value
        .as_f64()
        .or_else(|| value.as_string().and_then(|s| numeric::parse_float_prefix(&s)))
        .unwrap_or(f64::NAN)
}

fn set_method(api: &Object, name: &str, method: JsValue) -> UiResult<()> {
    Reflect::set(api, &JsValue::from_str(name), &method)?;
    Ok(())
}

/// Install `window.AccountingSystem`
pub fn expose(window: &web_sys::Window) -> UiResult<()> {
    let api = Object::new();

    let method = Closure::<dyn Fn(JsValue, JsValue)>::new(|message: JsValue, kind: JsValue| {
        let message = message.as_string().unwrap_or_else(|| describe_js(&message));
        show_toast(&message, kind.as_string().as_deref());
    });
    set_method(&api, "showToast", method.into_js_value())?;

    let method = Closure::<dyn Fn(JsValue)>::new(|text: JsValue| {
        copy_to_clipboard(text.as_string().unwrap_or_default());
    });
    set_method(&api, "copyToClipboard", method.into_js_value())?;

    let method = Closure::<dyn Fn(JsValue)>::new(|button: JsValue| {
        if let Ok(button) = button.dyn_into::<Element>() {
            show_button_loading(&button);
        }
    });
    set_method(&api, "showButtonLoading", method.into_js_value())?;

    let method = Closure::<dyn Fn(JsValue)>::new(|button: JsValue| {
        if let Ok(button) = button.dyn_into::<Element>() {
            hide_button_loading(&button);
        }
    });
    set_method(&api, "hideButtonLoading", method.into_js_value())?;

    // confirmDelete(element, message): the element is accepted and unused
    let method = Closure::<dyn Fn(JsValue, JsValue) -> bool>::new(|_element: JsValue, message: JsValue| {
        confirm_delete(message.as_string().as_deref())
    });
    set_method(&api, "confirmDelete", method.into_js_value())?;

    // Bad currency codes throw a RangeError back to the caller
    let method = Closure::<dyn Fn(JsValue, JsValue) -> Result<String, JsValue>>::new(
        |amount: JsValue, currency: JsValue| {
            format_currency(js_amount(&amount), currency.as_string().as_deref())
                .map_err(|e| js_sys::RangeError::new(&e.to_string()).into())
        },
    );
    set_method(&api, "formatCurrency", method.into_js_value())?;

    Reflect::set(window, &JsValue::from_str(API_GLOBAL), &api)?;
    log::debug!("[API] Exposed window.{}", API_GLOBAL);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_defaults_to_usd() {
        assert_eq!(format_currency(1200.0, None).unwrap(), "$1,200.00");
        assert_eq!(format_currency(1200.0, Some("GBP")).unwrap(), "£1,200.00");
    }

    #[test]
    fn test_format_currency_rejects_bad_code() {
        assert!(format_currency(5.0, Some("NOTACODE")).is_err());
    }
}
