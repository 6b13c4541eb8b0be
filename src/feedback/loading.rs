//! Button Loading State
//!
//! Swap a button's label for a spinner while an operation is in flight.
//! The saved label (the loading marker) lives in `data-original-text`;
//! its presence means "loading".

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlInputElement};

use ui_timers::Scheduler;

use crate::context::UiContext;
use crate::dom::listen;
use crate::error::UiResult;

pub const LOADING_LABEL: &str = r#"<span class="spinner"></span> Loading..."#;
pub const PROCESSING_LABEL: &str = r#"<span class="spinner"></span> Processing..."#;
pub const MARKER_ATTR: &str = "data-original-text";

/// Something with a label, a disabled flag and room for a marker
pub trait LoadingTarget {
    fn label(&self) -> String;
    fn set_label(&self, html: &str);
    fn set_disabled(&self, disabled: bool);
    fn marker(&self) -> Option<String>;
    fn set_marker(&self, saved: Option<&str>);
}

impl LoadingTarget for Element {
    fn label(&self) -> String {
        self.inner_html()
    }

    fn set_label(&self, html: &str) {
        self.set_inner_html(html);
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = self.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if disabled {
            let _ = self.set_attribute("disabled", "");
        } else {
            let _ = self.remove_attribute("disabled");
        }
    }

    fn marker(&self) -> Option<String> {
        self.get_attribute(MARKER_ATTR)
    }

    fn set_marker(&self, saved: Option<&str>) {
        let _ = match saved {
            Some(label) => self.set_attribute(MARKER_ATTR, label),
            None => self.remove_attribute(MARKER_ATTR),
        };
    }
}

/// Enter the loading state and schedule an automatic restore.
///
/// Returns false if the target is already loading; its saved label is kept.
pub fn show_loading<T>(target: &T, scheduler: &dyn Scheduler, restore_ms: u32) -> bool
where
    T: LoadingTarget + Clone + 'static,
{
    if target.marker().is_some() {
        return false;
    }
    target.set_marker(Some(&target.label()));
    target.set_label(LOADING_LABEL);
    target.set_disabled(true);

    let pending = target.clone();
    drop(scheduler.schedule(
        restore_ms,
        Box::new(move || {
            hide_loading(&pending);
        }),
    ));
    true
}

/// Leave the loading state. Does nothing (returns false) without a marker.
pub fn hide_loading<T: LoadingTarget>(target: &T) -> bool {
    let Some(saved) = target.marker() else {
        return false;
    };
    target.set_label(&saved);
    target.set_disabled(false);
    target.set_marker(None);
    true
}

/// Submit feedback; no marker and no restore, the page is navigating away
pub fn set_processing<T: LoadingTarget>(target: &T) {
    target.set_label(PROCESSING_LABEL);
    target.set_disabled(true);
}

/// Bind `[data-loading]` buttons
pub fn init(ctx: &UiContext, buttons: &[Element]) -> UiResult<()> {
    for button in buttons {
        let (target, scheduler) = (button.clone(), ctx.scheduler.clone());
        let restore_ms = ctx.config.button_restore_ms;
        listen(button, "click", move |_: web_sys::MouseEvent| {
            show_loading(&target, scheduler.as_ref(), restore_ms);
        })?;
    }
    log::debug!("[LOADING] Bound {} buttons", buttons.len());
    Ok(())
}
