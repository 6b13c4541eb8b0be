//! UI Context
//!
//! Handles every enhancer receives instead of querying globals.

use std::cell::RefCell;
use std::rc::Rc;

use ui_timers::Scheduler;
use web_sys::{Document, Window};

use crate::config::UiConfig;
use crate::locale::Locale;
use crate::storage::KeyValueStore;
use crate::store::AppStore;

/// Shared handles for the enhancement layer
#[derive(Clone)]
pub struct UiContext {
    pub window: Window,
    pub document: Document,
    /// Sidebar flag and drafts
    pub storage: Rc<dyn KeyValueStore>,
    pub scheduler: Rc<dyn Scheduler>,
    pub config: Rc<UiConfig>,
    /// Collation and currency display
    pub locale: Rc<dyn Locale>,
    /// Toast queue
    pub store: AppStore,
}

impl UiContext {
    /// Viewport width in CSS pixels; unknown counts as desktop
    pub fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(f64::INFINITY)
    }

    pub fn is_mobile(&self) -> bool {
        self.config.is_mobile_width(self.viewport_width())
    }
}

thread_local! {
    static CURRENT: RefCell<Option<UiContext>> = const { RefCell::new(None) };
}

/// Make the context reachable from the exported API
pub fn provide_ui_context(ctx: UiContext) {
    CURRENT.with(|current| *current.borrow_mut() = Some(ctx));
}

/// The context installed at startup, if startup has run
pub fn use_ui_context() -> Option<UiContext> {
    CURRENT.with(|current| current.borrow().clone())
}
