//! Number Parsing and Formatting
//!
//! Browser-compatible number handling shared by validation and table sort.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{UiError, UiResult};

// ASCII digits only: `parseFloat` stops at other scripts' numerals
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("float prefix pattern is valid")
});

/// Parse the longest numeric prefix, like JavaScript `parseFloat`.
///
/// Leading whitespace is skipped; `None` stands for `NaN`.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let matched = FLOAT_PREFIX.find(text)?.as_str();
    let unsigned = matched.trim_start_matches(['+', '-']);
    let negative = matched.starts_with('-');
    let value = if unsigned == "Infinity" {
        f64::INFINITY
    } else {
        unsigned.parse::<f64>().ok()?
    };
    Some(if negative { -value } else { value })
}

/// Strip currency punctuation (`$` and `,`) before parsing
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    parse_float_prefix(&cleaned)
}

/// Render a number the way JavaScript's `String(n)` does
pub fn js_number_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // Shortest round-trip digits and decimal exponent
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (whole, fraction) = digits.split_at(n as usize);
        format!("{}.{}", whole, fraction)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let (lead, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() { String::new() } else { format!(".{}", rest) };
        let sign = if n - 1 >= 0 { '+' } else { '-' };
        format!("{}{}e{}{}", lead, fraction, sign, (n - 1).abs())
    };
    if value < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Symbol and minor digits for en-US currency display
fn currency_style(code: &str) -> (String, usize) {
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CNY" => "CN¥",
        "INR" => "₹",
        "CAD" => "CA$",
        "AUD" => "A$",
        "NZD" => "NZ$",
        "HKD" => "HK$",
        "MXN" => "MX$",
        "BRL" => "R$",
        "KRW" => "₩",
        "VND" => "₫",
        "ILS" => "₪",
        "PHP" => "₱",
        "TWD" => "NT$",
        _ => "",
    };
    let symbol = if symbol.is_empty() {
        format!("{}\u{a0}", code)
    } else {
        symbol.to_string()
    };
    (symbol, minor_digits(code))
}

/// ISO 4217 minor units
fn minor_digits(code: &str) -> usize {
    match code {
        "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF" | "UGX"
        | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

/// Three ASCII letters, any case
fn is_well_formed_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format an amount as en-US currency (`$1,234.50`, `-$5.00`, `¥1,234`).
///
/// Codes that are not three letters are rejected, as `Intl.NumberFormat` does.
pub fn format_currency(amount: f64, currency: &str) -> UiResult<String> {
    let code = currency.trim().to_ascii_uppercase();
    if !is_well_formed_code(&code) {
        return Err(UiError::Currency(format!("Invalid currency code : {}", currency)));
    }
    let (symbol, digits) = currency_style(&code);
    if amount.is_nan() {
        return Ok(format!("{}NaN", symbol));
    }
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    if amount.is_infinite() {
        return Ok(format!("{}{}∞", sign, symbol));
    }

    let fixed = format!("{:.*}", digits, amount.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (fixed.as_str(), None),
    };
    let mut out = format!("{}{}{}", sign, symbol, group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("42"), Some(42.0));
        assert_eq!(parse_float_prefix("  -3.5e2kg"), Some(-350.0));
        assert_eq!(parse_float_prefix("12abc"), Some(12.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("-"), None);
    }

    #[test]
    fn test_parse_float_prefix_stops_at_non_ascii_digits() {
        assert_eq!(parse_float_prefix("1٣"), Some(1.0));
        assert_eq!(parse_float_prefix("٣"), None);
    }

    #[test]
    fn test_parse_amount_strips_currency() {
        assert_eq!(parse_amount("$1,200"), Some(1200.0));
        assert_eq!(parse_amount("$300"), Some(300.0));
        assert_eq!(parse_amount("-$45.10"), Some(-45.1));
        assert_eq!(parse_amount("Bank fees"), None);
    }

    #[test]
    fn test_js_number_string() {
        assert_eq!(js_number_string(10.0), "10");
        assert_eq!(js_number_string(2.5), "2.5");
        assert_eq!(js_number_string(-0.0), "0");
        assert_eq!(js_number_string(f64::INFINITY), "Infinity");
        assert_eq!(js_number_string(-2500.25), "-2500.25");
    }

    #[test]
    fn test_js_number_string_exponent_ranges() {
        assert_eq!(js_number_string(1e21), "1e+21");
        assert_eq!(js_number_string(1e20), "100000000000000000000");
        assert_eq!(js_number_string(1e-7), "1e-7");
        assert_eq!(js_number_string(1.5e-7), "1.5e-7");
        assert_eq!(js_number_string(0.000001), "0.000001");
        assert_eq!(js_number_string(0.001), "0.001");
        assert_eq!(js_number_string(123.456), "123.456");
        assert_eq!(js_number_string(-1.25e22), "-1.25e+22");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5, "USD").unwrap(), "$1,234.50");
        assert_eq!(format_currency(-5.0, "usd").unwrap(), "-$5.00");
        assert_eq!(format_currency(0.0, "USD").unwrap(), "$0.00");
        assert_eq!(format_currency(1234567.891, "EUR").unwrap(), "€1,234,567.89");
        assert_eq!(format_currency(1234.0, "JPY").unwrap(), "¥1,234");
        assert_eq!(format_currency(12.0, "CHF").unwrap(), "CHF\u{a0}12.00");
    }

    #[test]
    fn test_format_currency_minor_units() {
        assert_eq!(format_currency(1234.6, "VND").unwrap(), "₫1,235");
        assert_eq!(format_currency(1234.5, "BRL").unwrap(), "R$1,234.50");
        assert_eq!(format_currency(1.2346, "BHD").unwrap(), "BHD\u{a0}1.235");
    }

    #[test]
    fn test_format_currency_rejects_malformed_code() {
        assert!(matches!(format_currency(5.0, "NOTACODE"), Err(UiError::Currency(_))));
        assert!(format_currency(5.0, "").is_err());
        assert!(format_currency(5.0, "U$D").is_err());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456"), "123,456");
    }
}
