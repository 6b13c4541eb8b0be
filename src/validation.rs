//! Field Validation
//!
//! Pure rules for required, email and numeric fields, plus the DOM
//! annotator that marks a field and its feedback slot.

use std::sync::LazyLock;

use regex::Regex;
use web_sys::{Document, Element, FocusEvent};

use crate::context::UiContext;
use crate::dom::{closest_or_parent, field_value, listen, select_all_in, set_style};
use crate::error::UiResult;
use crate::feedback::loading;
use crate::numeric::{js_number_string, parse_float_prefix};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const NUMBER_MESSAGE: &str = "Please enter a valid number";

/// Constraint declared on a field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRule {
    Required,
    Email,
    Number { min: Option<f64>, max: Option<f64> },
}

impl FieldRule {
    /// Numeric rule with bounds read from the field's `min`/`max` attributes
    pub fn number_for(field: &Element) -> Self {
        let bound = |name: &str| {
            field
                .get_attribute(name)
                .and_then(|raw| parse_float_prefix(&raw))
        };
        FieldRule::Number {
            min: bound("min"),
            max: bound("max"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Validity {
    Valid,
    Invalid(String),
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Validity::Valid => None,
            Validity::Invalid(msg) => Some(msg),
        }
    }
}

/// Check `value` against `rule`
pub fn validate(rule: &FieldRule, value: &str) -> Validity {
    match rule {
        FieldRule::Required => {
            if value.trim().is_empty() {
                Validity::Invalid(REQUIRED_MESSAGE.to_string())
            } else {
                Validity::Valid
            }
        }
        FieldRule::Email => {
            if value.is_empty() || EMAIL.is_match(value) {
                Validity::Valid
            } else {
                Validity::Invalid(EMAIL_MESSAGE.to_string())
            }
        }
        FieldRule::Number { min, max } => {
            let number = parse_float_prefix(value);
            match number {
                None if !value.is_empty() => Validity::Invalid(NUMBER_MESSAGE.to_string()),
                Some(n) if min.is_some_and(|min| n < min) => Validity::Invalid(format!(
                    "Value must be at least {}",
                    js_number_string(min.unwrap_or_default())
                )),
                Some(n) if max.is_some_and(|max| n > max) => Validity::Invalid(format!(
                    "Value must be no more than {}",
                    js_number_string(max.unwrap_or_default())
                )),
                _ => Validity::Valid,
            }
        }
    }
}

/// Changes `annotate` applies to a field and its group's feedback slot
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation<'a> {
    pub add_class: &'static str,
    pub remove_class: &'static str,
    /// Append a `.invalid-feedback` element to the group first
    pub create_slot: bool,
    pub slot_text: Option<&'a str>,
    /// `display` for the slot, when there is one to touch
    pub slot_display: Option<&'static str>,
}

impl<'a> Annotation<'a> {
    pub fn plan(validity: &'a Validity, has_slot: bool) -> Self {
        match validity {
            Validity::Valid => Self {
                add_class: "is-valid",
                remove_class: "is-invalid",
                create_slot: false,
                slot_text: None,
                slot_display: has_slot.then_some("none"),
            },
            Validity::Invalid(message) => Self {
                add_class: "is-invalid",
                remove_class: "is-valid",
                create_slot: !has_slot,
                slot_text: Some(message.as_str()),
                slot_display: Some("block"),
            },
        }
    }
}

/// Mark `field` valid/invalid and update the feedback slot in its group
pub fn annotate(doc: &Document, field: &Element, validity: &Validity) -> UiResult<()> {
    let Some(group) = closest_or_parent(field, ".mb-3") else {
        return Ok(());
    };
    let existing = group.query_selector(".invalid-feedback")?;
    let plan = Annotation::plan(validity, existing.is_some());

    let classes = field.class_list();
    classes.remove_1(plan.remove_class)?;
    classes.add_1(plan.add_class)?;

    let slot = if plan.create_slot {
        let created = doc.create_element("div")?;
        created.set_class_name("invalid-feedback");
        group.append_child(&created)?;
        Some(created)
    } else {
        existing
    };
    if let Some(slot) = slot {
        if let Some(text) = plan.slot_text {
            slot.set_text_content(Some(text));
        }
        if let Some(display) = plan.slot_display {
            set_style(&slot, "display", display)?;
        }
    }
    Ok(())
}

fn check(doc: &Document, field: &Element, rule: &FieldRule) {
    let value = field_value(field).unwrap_or_default();
    if let Err(e) = annotate(doc, field, &validate(rule, &value)) {
        log::warn!("[VALIDATION] Failed to annotate field: {}", e);
    }
}

/// Wire validation and submit feedback for one form
pub fn bind_form(ctx: &UiContext, form: &Element) -> UiResult<()> {
    let submit_target = form.clone();
    listen(form, "submit", move |_: web_sys::Event| {
        if let Ok(Some(button)) = submit_target.query_selector("button[type=\"submit\"]") {
            loading::set_processing(&button);
        }
    })?;

    for field in select_all_in(form, "input[type=\"email\"]")? {
        let (doc, target) = (ctx.document.clone(), field.clone());
        listen(&field, "blur", move |_: FocusEvent| check(&doc, &target, &FieldRule::Email))?;
    }

    for field in select_all_in(form, "[required]")? {
        let (doc, target) = (ctx.document.clone(), field.clone());
        listen(&field, "blur", move |_: FocusEvent| check(&doc, &target, &FieldRule::Required))?;
    }

    for field in select_all_in(form, "input[type=\"number\"]")? {
        let (doc, target) = (ctx.document.clone(), field.clone());
        listen(&field, "input", move |_: web_sys::Event| {
            let rule = FieldRule::number_for(&target);
            check(&doc, &target, &rule);
        })?;
    }
    Ok(())
}

pub fn init(ctx: &UiContext, forms: &[Element]) -> UiResult<()> {
    for form in forms {
        bind_form(ctx, form)?;
    }
    log::debug!("[VALIDATION] Bound {} forms", forms.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(min: Option<f64>, max: Option<f64>) -> FieldRule {
        FieldRule::Number { min, max }
    }

    #[test]
    fn test_required() {
        assert!(validate(&FieldRule::Required, "x").is_valid());
        assert_eq!(
            validate(&FieldRule::Required, "   ").message(),
            Some(REQUIRED_MESSAGE)
        );
    }

    #[test]
    fn test_email() {
        assert!(validate(&FieldRule::Email, "a@b.co").is_valid());
        assert!(validate(&FieldRule::Email, "first.last@sub.example.org").is_valid());
        assert_eq!(validate(&FieldRule::Email, "a@b").message(), Some(EMAIL_MESSAGE));
        assert!(!validate(&FieldRule::Email, "a b@c.d").is_valid());
    }

    #[test]
    fn test_empty_non_required_is_valid() {
        assert!(validate(&FieldRule::Email, "").is_valid());
        assert!(validate(&number(Some(1.0), Some(5.0)), "").is_valid());
    }

    #[test]
    fn test_number_not_a_number() {
        assert_eq!(
            validate(&number(None, None), "abc").message(),
            Some(NUMBER_MESSAGE)
        );
    }

    #[test]
    fn test_number_bounds() {
        let rule = number(Some(10.0), Some(2.5e3));

        assert_eq!(
            validate(&rule, "9.99").message(),
            Some("Value must be at least 10")
        );
        assert_eq!(
            validate(&rule, "2500.5").message(),
            Some("Value must be no more than 2500")
        );
        assert!(validate(&rule, "10").is_valid());
        assert!(validate(&rule, "2500").is_valid());
        assert!(validate(&rule, "42").is_valid());
    }

    #[test]
    fn test_invalid_creates_missing_slot_and_shows_message() {
        let validity = Validity::Invalid(REQUIRED_MESSAGE.to_string());
        let plan = Annotation::plan(&validity, false);

        assert_eq!(plan.add_class, "is-invalid");
        assert_eq!(plan.remove_class, "is-valid");
        assert!(plan.create_slot);
        assert_eq!(plan.slot_text, Some(REQUIRED_MESSAGE));
        assert_eq!(plan.slot_display, Some("block"));
    }

    #[test]
    fn test_invalid_reuses_existing_slot() {
        let validity = Validity::Invalid(EMAIL_MESSAGE.to_string());
        let plan = Annotation::plan(&validity, true);
        assert!(!plan.create_slot);
        assert_eq!(plan.slot_text, Some(EMAIL_MESSAGE));
    }

    #[test]
    fn test_valid_hides_slot_without_creating_one() {
        let hidden = Annotation::plan(&Validity::Valid, true);
        assert_eq!(hidden.add_class, "is-valid");
        assert_eq!(hidden.remove_class, "is-invalid");
        assert_eq!(hidden.slot_display, Some("none"));
        assert_eq!(hidden.slot_text, None);

        let absent = Annotation::plan(&Validity::Valid, false);
        assert!(!absent.create_slot);
        assert_eq!(absent.slot_display, None);
    }

    #[test]
    fn test_number_large_bound_uses_exponent() {
        let rule = number(None, Some(1e21));
        assert_eq!(
            validate(&rule, "2e21").message(),
            Some("Value must be no more than 1e+21")
        );
    }

    #[test]
    fn test_number_fractional_bound_in_message() {
        let rule = number(Some(0.5), None);
        assert_eq!(
            validate(&rule, "0.25").message(),
            Some("Value must be at least 0.5")
        );
    }
}
