//! Draft Auto-save
//!
//! Forms opted in with `data-autosave="<id>"` keep a draft of their field
//! values in key-value storage: restored on load, rewritten after a quiet
//! period of input, deleted on submit.

use std::collections::BTreeMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, FormData, HtmlFormElement};

use ui_timers::{Debouncer, Scheduler};

use crate::context::UiContext;
use crate::dom::{listen, select_all_in, set_field_value};
use crate::error::{UiError, UiResult};
use crate::feedback::toast::show_toast;
use crate::models::{DraftRecord, ToastKind};
use crate::storage::KeyValueStore;

pub const AUTOSAVE_ATTR: &str = "data-autosave";
pub const SAVED_MESSAGE: &str = "Draft saved";

pub fn draft_key(form_id: &str) -> String {
    format!("form_{}", form_id)
}

/// Draft records in key-value storage
pub struct DraftStore {
    storage: Rc<dyn KeyValueStore>,
}

impl DraftStore {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Stored draft, if any. Unreadable drafts count as absent.
    pub fn load(&self, form_id: &str) -> Option<DraftRecord> {
        let raw = match self.storage.get(&draft_key(form_id)) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("[DRAFT] Could not read draft {}: {}", form_id, e);
                return None;
            }
        };
        match parse_record(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                log::debug!("[DRAFT] Ignoring malformed draft {}: {}", form_id, e);
                None
            }
        }
    }

    pub fn save(&self, form_id: &str, record: &DraftRecord) -> UiResult<()> {
        let raw = serde_json::to_string(record)?;
        self.storage.set(&draft_key(form_id), &raw)
    }

    pub fn clear(&self, form_id: &str) -> UiResult<()> {
        self.storage.remove(&draft_key(form_id))
    }
}

// Scalars are kept as text; nested values (e.g. serialized files) are dropped.
fn parse_record(raw: &str) -> Result<DraftRecord, serde_json::Error> {
    let values: BTreeMap<String, serde_json::Value> = serde_json::from_str(raw)?;
    let fields = values
        .into_iter()
        .filter_map(|(name, value)| match value {
            serde_json::Value::String(s) => Some((name, s)),
            serde_json::Value::Number(n) => Some((name, n.to_string())),
            serde_json::Value::Bool(b) => Some((name, b.to_string())),
            _ => None,
        })
        .collect();
    Ok(DraftRecord { fields })
}

/// Debounced draft persistence for one form
pub struct AutoSave {
    form_id: String,
    drafts: Rc<DraftStore>,
    debouncer: Debouncer,
}

impl AutoSave {
    pub fn new(
        form_id: &str,
        storage: Rc<dyn KeyValueStore>,
        scheduler: Rc<dyn Scheduler>,
        delay_ms: u32,
    ) -> Self {
        Self {
            form_id: form_id.to_string(),
            drafts: Rc::new(DraftStore::new(storage)),
            debouncer: Debouncer::new(scheduler, delay_ms),
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn stored(&self) -> Option<DraftRecord> {
        self.drafts.load(&self.form_id)
    }

    /// Restart the quiet window. When it elapses, `snapshot` is taken and
    /// written, then `on_saved` runs.
    pub fn on_input<S, F>(&self, snapshot: S, on_saved: F)
    where
        S: FnOnce() -> UiResult<DraftRecord> + 'static,
        F: FnOnce() + 'static,
    {
        let drafts = self.drafts.clone();
        let form_id = self.form_id.clone();
        self.debouncer.trigger(move || {
            let saved = snapshot().and_then(|record| drafts.save(&form_id, &record));
            match saved {
                Ok(()) => {
                    log::debug!("[DRAFT] Saved draft {}", form_id);
                    on_saved();
                }
                Err(e) => log::warn!("[DRAFT] Could not save draft {}: {}", form_id, e),
            }
        });
    }

    /// Drop any pending save and delete the stored draft
    pub fn on_submit(&self) {
        self.debouncer.cancel();
        if let Err(e) = self.drafts.clear(&self.form_id) {
            log::warn!("[DRAFT] Could not clear draft {}: {}", self.form_id, e);
        }
    }
}

// ========================
// DOM
// ========================

/// Current `FormData` string entries, last value per name
pub fn snapshot_form(form: &Element) -> UiResult<DraftRecord> {
    let form = form
        .dyn_ref::<HtmlFormElement>()
        .ok_or_else(|| UiError::Dom("autosave target is not a form".into()))?;
    let data = FormData::new_with_form(form)?;
    let entries = js_sys::try_iter(&data)?
        .ok_or_else(|| UiError::Dom("FormData is not iterable".into()))?;

    let mut pairs = Vec::new();
    for entry in entries {
        let entry: js_sys::Array = entry?.unchecked_into();
        if let (Some(name), Some(value)) = (entry.get(0).as_string(), entry.get(1).as_string()) {
            pairs.push((name, value));
        }
    }
    Ok(DraftRecord::from_pairs(pairs))
}

/// Pair each stored value with the first control of the same name.
///
/// Keys without a control are skipped; controls without a key get nothing.
pub fn match_fields<'a>(
    control_names: &[Option<String>],
    record: &'a DraftRecord,
) -> Vec<(usize, &'a str)> {
    record
        .fields
        .iter()
        .filter_map(|(name, value)| {
            control_names
                .iter()
                .position(|control| control.as_deref() == Some(name.as_str()))
                .map(|index| (index, value.as_str()))
        })
        .collect()
}

/// Fill named controls from `record`; fields missing from it are untouched
pub fn restore_form(form: &Element, record: &DraftRecord) -> UiResult<usize> {
    let controls = select_all_in(form, "input, textarea, select")?;
    let names: Vec<Option<String>> = controls
        .iter()
        .map(|control| control.get_attribute("name"))
        .collect();
    let restored = match_fields(&names, record)
        .into_iter()
        .filter(|&(index, value)| set_field_value(&controls[index], value))
        .count();
    Ok(restored)
}

pub fn bind(ctx: &UiContext, form: &Element) -> UiResult<()> {
    let Some(form_id) = form.get_attribute(AUTOSAVE_ATTR).filter(|id| !id.is_empty()) else {
        return Ok(());
    };
    let autosave = Rc::new(AutoSave::new(
        &form_id,
        ctx.storage.clone(),
        ctx.scheduler.clone(),
        ctx.config.autosave_debounce_ms,
    ));

    if let Some(record) = autosave.stored() {
        let restored = restore_form(form, &record)?;
        log::debug!("[DRAFT] Restored {} fields into {}", restored, form_id);
    }

    let (saver, source, input_ctx) = (autosave.clone(), form.clone(), ctx.clone());
    listen(form, "input", move |_: web_sys::Event| {
        let (form, ctx) = (source.clone(), input_ctx.clone());
        saver.on_input(
            move || snapshot_form(&form),
            move || {
                show_toast(&ctx, SAVED_MESSAGE, ToastKind::Info);
            },
        );
    })?;

    listen(form, "submit", move |_: web_sys::Event| autosave.on_submit())?;
    Ok(())
}

pub fn init(ctx: &UiContext, forms: &[Element]) -> UiResult<()> {
    for form in forms {
        bind(ctx, form)?;
    }
    log::debug!("[DRAFT] Bound {} autosave forms", forms.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use ui_timers::ManualScheduler;

    use crate::storage::MemoryStore;

    /// MemoryStore that counts writes
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: Cell<usize>,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: &str) -> UiResult<Option<String>> {
            self.inner.get(key)
        }
        fn set(&self, key: &str, value: &str) -> UiResult<()> {
            self.writes.set(self.writes.get() + 1);
            self.inner.set(key, value)
        }
        fn remove(&self, key: &str) -> UiResult<()> {
            self.inner.remove(key)
        }
    }

    fn record(pairs: &[(&str, &str)]) -> DraftRecord {
        DraftRecord::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_match_fields_skips_unknown_keys_and_untouched_controls() {
        let names = vec![
            Some("payee".to_string()),
            None,
            Some("amount".to_string()),
            Some("memo".to_string()),
        ];
        let draft = record(&[("amount", "12.50"), ("payee", "ACME"), ("retired_field", "x")]);

        let mut matched = match_fields(&names, &draft);
        matched.sort();
        assert_eq!(matched, vec![(0, "ACME"), (2, "12.50")]);
    }

    #[test]
    fn test_match_fields_uses_first_control_with_name() {
        let names = vec![Some("memo".to_string()), Some("memo".to_string())];
        let draft = record(&[("memo", "lunch")]);
        assert_eq!(match_fields(&names, &draft), vec![(0, "lunch")]);
    }

    #[test]
    fn test_draft_key() {
        assert_eq!(draft_key("invoice-new"), "form_invoice-new");
    }

    #[test]
    fn test_draft_store_roundtrip_and_clear() {
        let storage = Rc::new(MemoryStore::new());
        let drafts = DraftStore::new(storage.clone());
        let draft = record(&[("payee", "ACME"), ("amount", "99.90")]);

        drafts.save("expense", &draft).unwrap();
        assert_eq!(
            storage.get("form_expense").unwrap().as_deref(),
            Some(r#"{"amount":"99.90","payee":"ACME"}"#)
        );
        assert_eq!(drafts.load("expense"), Some(draft));

        drafts.clear("expense").unwrap();
        assert_eq!(drafts.load("expense"), None);
    }

    #[test]
    fn test_malformed_draft_is_absent() {
        let storage = Rc::new(MemoryStore::new());
        storage.set("form_x", "{not json").unwrap();
        assert_eq!(DraftStore::new(storage).load("x"), None);
    }

    #[test]
    fn test_scalar_values_kept_objects_dropped() {
        let storage = Rc::new(MemoryStore::new());
        storage
            .set("form_x", r#"{"qty": 3, "paid": true, "receipt": {}, "memo": "lunch"}"#)
            .unwrap();
        let loaded = DraftStore::new(storage).load("x").unwrap();

        assert_eq!(loaded.get("qty"), Some("3"));
        assert_eq!(loaded.get("paid"), Some("true"));
        assert_eq!(loaded.get("memo"), Some("lunch"));
        assert_eq!(loaded.get("receipt"), None);
    }

    #[test]
    fn test_typing_then_pause_writes_once() {
        let clock = ManualScheduler::new();
        let storage = Rc::new(CountingStore::default());
        let autosave = AutoSave::new("journal", storage.clone(), Rc::new(clock.clone()), 1000);
        let toasts = Rc::new(Cell::new(0));
        let typed = Rc::new(RefCell::new(String::new()));

        for ch in "rent".chars() {
            typed.borrow_mut().push(ch);
            let (value, toasts) = (typed.clone(), toasts.clone());
            autosave.on_input(
                move || {
                    let memo = value.borrow().clone();
                    Ok(record(&[("memo", memo.as_str())]))
                },
                move || toasts.set(toasts.get() + 1),
            );
            clock.advance(300);
        }
        assert_eq!(storage.writes.get(), 0);

        clock.advance(700);
        assert_eq!(storage.writes.get(), 1);
        assert_eq!(toasts.get(), 1);
        assert_eq!(autosave.stored(), Some(record(&[("memo", "rent")])));

        clock.advance(10_000);
        assert_eq!(storage.writes.get(), 1);
    }

    #[test]
    fn test_reload_restores_then_submit_clears() {
        let clock = ManualScheduler::new();
        let storage: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());

        let first = AutoSave::new("invoice", storage.clone(), Rc::new(clock.clone()), 1000);
        first.on_input(|| Ok(record(&[("client", "Globex")])), || {});
        clock.advance(1000);

        // Page reload: a fresh binding sees the stored draft
        let second = AutoSave::new("invoice", storage.clone(), Rc::new(clock.clone()), 1000);
        assert_eq!(second.stored(), Some(record(&[("client", "Globex")])));

        second.on_submit();
        assert_eq!(second.stored(), None);
        assert_eq!(storage.get("form_invoice").unwrap(), None);
    }

    #[test]
    fn test_submit_cancels_pending_save() {
        let clock = ManualScheduler::new();
        let storage = Rc::new(CountingStore::default());
        let autosave = AutoSave::new("invoice", storage.clone(), Rc::new(clock.clone()), 1000);

        autosave.on_input(|| Ok(record(&[("client", "Initech")])), || {});
        autosave.on_submit();
        clock.advance(2000);

        assert_eq!(storage.writes.get(), 0);
        assert_eq!(autosave.stored(), None);
    }
}
