//! Locale Services
//!
//! Text collation and currency formatting. `BrowserLocale` delegates to the
//! page's `Intl` objects; `FixedLocale` is the built-in en-US rendition used
//! when `Intl` is unavailable and in native tests.

use std::cmp::Ordering;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::{describe_js, UiError, UiResult};
use crate::numeric;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Intl)]
    type Collator;

    #[wasm_bindgen(constructor, catch, js_namespace = Intl, js_class = "Collator")]
    fn new(locales: &JsValue, options: &JsValue) -> Result<Collator, JsValue>;

    #[wasm_bindgen(method)]
    fn compare(this: &Collator, a: &str, b: &str) -> f64;

    #[wasm_bindgen(js_namespace = Intl)]
    type NumberFormat;

    // Throws RangeError for malformed currency codes
    #[wasm_bindgen(constructor, catch, js_namespace = Intl, js_class = "NumberFormat")]
    fn new(locales: &str, options: &JsValue) -> Result<NumberFormat, JsValue>;

    #[wasm_bindgen(method)]
    fn format(this: &NumberFormat, value: f64) -> String;
}

/// Currency display locale
pub const CURRENCY_LOCALE: &str = "en-US";

#[derive(Serialize)]
struct CurrencyOptions<'a> {
    style: &'static str,
    currency: &'a str,
}

/// Locale-sensitive operations used by table sort and the script API
pub trait Locale {
    /// Order two strings the way `String.prototype.localeCompare` does
    fn compare_text(&self, a: &str, b: &str) -> Ordering;

    /// Format `amount` as currency `code`; malformed codes are an error
    fn format_currency(&self, amount: f64, code: &str) -> UiResult<String>;
}

/// `Intl`-backed locale, falling back to [`FixedLocale`] piecewise
pub struct BrowserLocale {
    collator: Option<Collator>,
}

impl BrowserLocale {
    pub fn new() -> Self {
        let collator = match Collator::new(&JsValue::UNDEFINED, &JsValue::UNDEFINED) {
            Ok(collator) => Some(collator),
            Err(e) => {
                log::warn!("[LOCALE] Intl.Collator unavailable ({}), using fallback", describe_js(&e));
                None
            }
        };
        Self { collator }
    }
}

impl Default for BrowserLocale {
    fn default() -> Self {
        Self::new()
    }
}

impl Locale for BrowserLocale {
    fn compare_text(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b).partial_cmp(&0.0).unwrap_or(Ordering::Equal),
            None => collate(a, b),
        }
    }

    fn format_currency(&self, amount: f64, code: &str) -> UiResult<String> {
        let options = serde_wasm_bindgen::to_value(&CurrencyOptions {
            style: "currency",
            currency: code,
        })
        .map_err(|e| UiError::Currency(e.to_string()))?;
        let format = NumberFormat::new(CURRENCY_LOCALE, &options)
            .map_err(|e| UiError::Currency(describe_js(&e)))?;
        Ok(format.format(amount))
    }
}

/// Built-in en-US locale
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedLocale;

impl Locale for FixedLocale {
    fn compare_text(&self, a: &str, b: &str) -> Ordering {
        collate(a, b)
    }

    fn format_currency(&self, amount: f64, code: &str) -> UiResult<String> {
        numeric::format_currency(amount, code)
    }
}

// Common Latin-1 accents share a base letter
fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Approximate `localeCompare`: base letters first, then accents, then
/// case with lowercase before uppercase
pub fn collate(a: &str, b: &str) -> Ordering {
    let (lower_a, lower_b) = (a.to_lowercase(), b.to_lowercase());
    let base = |s: &str| s.chars().map(fold_accent).collect::<String>();
    base(&lower_a)
        .cmp(&base(&lower_b))
        .then_with(|| lower_a.cmp(&lower_b))
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collate_ignores_case_first() {
        assert_eq!(collate("alpha", "Zeta"), Ordering::Less);
        assert_eq!(collate("Zeta", "alpha"), Ordering::Greater);
    }

    #[test]
    fn test_collate_lowercase_before_uppercase() {
        assert_eq!(collate("bank", "Bank"), Ordering::Less);
        assert_eq!(collate("Bank", "bank"), Ordering::Greater);
        assert_eq!(collate("bank", "bank"), Ordering::Equal);
    }

    #[test]
    fn test_collate_accents_sort_with_base_letter() {
        assert_eq!(collate("École", "Zoo"), Ordering::Less);
        assert_eq!(collate("école", "ecole"), Ordering::Greater);
        assert_eq!(collate("café", "cafes"), Ordering::Less);
    }

    #[test]
    fn test_fixed_locale_rejects_malformed_code() {
        assert!(FixedLocale.format_currency(5.0, "NOTACODE").is_err());
        assert_eq!(FixedLocale.format_currency(5.0, "usd").unwrap(), "$5.00");
    }
}
