//! UI Configuration
//!
//! Timings and thresholds for every enhancement. Pages may override any
//! field by defining `window.AccountingSystemConfig` before the module loads.

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

/// Global object pages use to override defaults
pub const CONFIG_GLOBAL: &str = "AccountingSystemConfig";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiConfig {
    /// How long a page-load alert stays fully visible
    pub alert_display_ms: u32,
    pub alert_fade_ms: u32,
    pub toast_display_ms: u32,
    pub toast_fade_ms: u32,
    /// Loading buttons restore themselves after this long
    pub button_restore_ms: u32,
    /// Quiet window before a draft is written
    pub autosave_debounce_ms: u32,
    /// Tables with more rows than this get a search box
    pub search_row_threshold: u32,
    /// Viewports at most this wide use the mobile sidebar
    pub mobile_breakpoint_px: f64,
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            alert_display_ms: 5000,
            alert_fade_ms: 500,
            toast_display_ms: 3000,
            toast_fade_ms: 300,
            button_restore_ms: 5000,
            autosave_debounce_ms: 1000,
            search_row_threshold: 10,
            mobile_breakpoint_px: 768.0,
            log_level: "info".to_string(),
        }
    }
}

impl UiConfig {
    /// Read overrides from the page, falling back to defaults field by field
    pub fn from_window(window: &web_sys::Window) -> Self {
        let raw = js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL))
            .unwrap_or(JsValue::UNDEFINED);
        if raw.is_undefined() || raw.is_null() {
            return Self::default();
        }
        match serde_wasm_bindgen::from_value(raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("[CONFIG] Ignoring malformed {}: {}", CONFIG_GLOBAL, e);
                Self::default()
            }
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    pub fn is_mobile_width(&self, width: f64) -> bool {
        width <= self.mobile_breakpoint_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config: UiConfig =
            serde_json::from_str(r#"{"toastDisplayMs": 1500, "logLevel": "debug"}"#).unwrap();

        assert_eq!(config.toast_display_ms, 1500);
        assert_eq!(config.toast_fade_ms, 300);
        assert_eq!(config.alert_display_ms, 5000);
        assert_eq!(config.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = UiConfig {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_mobile_breakpoint_is_inclusive() {
        let config = UiConfig::default();
        assert!(config.is_mobile_width(768.0));
        assert!(!config.is_mobile_width(769.0));
    }
}
