//! Sidebar Toggle
//!
//! Collapse state persists across page loads; on mobile viewports the
//! toggle also shows/hides an overlay sidebar.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent, Node};

use crate::context::UiContext;
use crate::dom::listen;
use crate::error::UiResult;
use crate::storage::KeyValueStore;

pub const COLLAPSED_KEY: &str = "sidebarCollapsed";

/// Persisted collapse flag
pub struct SidebarPrefs {
    storage: Rc<dyn KeyValueStore>,
}

impl SidebarPrefs {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Only the stored string `"true"` means collapsed
    pub fn load_collapsed(&self) -> bool {
        matches!(self.storage.get(COLLAPSED_KEY), Ok(Some(v)) if v == "true")
    }

    pub fn save_collapsed(&self, collapsed: bool) -> UiResult<()> {
        self.storage
            .set(COLLAPSED_KEY, if collapsed { "true" } else { "false" })
    }
}

/// `#sidebarToggle` and `#sidebar`
#[derive(Clone)]
pub struct SidebarElements {
    pub toggle: Element,
    pub sidebar: Element,
}

impl SidebarElements {
    pub fn find(doc: &Document) -> Option<Self> {
        Some(Self {
            toggle: doc.get_element_by_id("sidebarToggle")?,
            sidebar: doc.get_element_by_id("sidebar")?,
        })
    }
}

/// Close the mobile overlay
pub fn hide_mobile(sidebar: &Element) {
    let _ = sidebar.class_list().remove_1("show");
}

pub fn init(ctx: &UiContext, elements: &SidebarElements) -> UiResult<()> {
    let prefs = Rc::new(SidebarPrefs::new(ctx.storage.clone()));

    let sidebar = elements.sidebar.clone();
    let saver = prefs.clone();
    listen(&elements.toggle, "click", move |_: MouseEvent| {
        match sidebar.class_list().toggle("collapsed") {
            Ok(collapsed) => {
                if let Err(e) = saver.save_collapsed(collapsed) {
                    log::warn!("[SIDEBAR] Could not persist state: {}", e);
                }
            }
            Err(e) => log::warn!("[SIDEBAR] Toggle failed: {:?}", e),
        }
    })?;

    if prefs.load_collapsed() {
        elements.sidebar.class_list().add_1("collapsed")?;
    }

    if ctx.is_mobile() {
        let sidebar = elements.sidebar.clone();
        listen(&elements.toggle, "click", move |_: MouseEvent| {
            let _ = sidebar.class_list().toggle("show");
        })?;

        let (outside, inner_ctx) = (elements.clone(), ctx.clone());
        listen(&ctx.document, "click", move |ev: MouseEvent| {
            if !inner_ctx.is_mobile() {
                return;
            }
            let target = ev.target().and_then(|t| t.dyn_into::<Node>().ok());
            if !outside.sidebar.contains(target.as_ref()) && !outside.toggle.contains(target.as_ref()) {
                hide_mobile(&outside.sidebar);
            }
        })?;
    }
    log::debug!("[SIDEBAR] Initialized (collapsed={})", prefs.load_collapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_missing_flag_is_expanded() {
        let prefs = SidebarPrefs::new(Rc::new(MemoryStore::new()));
        assert!(!prefs.load_collapsed());
    }

    #[test]
    fn test_flag_roundtrip() {
        let storage = Rc::new(MemoryStore::new());
        let prefs = SidebarPrefs::new(storage.clone());

        prefs.save_collapsed(true).unwrap();
        assert_eq!(storage.get(COLLAPSED_KEY).unwrap().as_deref(), Some("true"));
        assert!(prefs.load_collapsed());

        prefs.save_collapsed(false).unwrap();
        assert_eq!(storage.get(COLLAPSED_KEY).unwrap().as_deref(), Some("false"));
        assert!(!prefs.load_collapsed());
    }

    #[test]
    fn test_only_true_string_collapses() {
        let storage = Rc::new(MemoryStore::new());
        storage.set(COLLAPSED_KEY, "TRUE").unwrap();
        assert!(!SidebarPrefs::new(storage).load_collapsed());
    }
}
