//! Global Key, Resize and Anchor Handling

use web_sys::{Element, HtmlInputElement, KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::context::UiContext;
use crate::dom::{listen, select_all};
use crate::error::UiResult;
use crate::sidebar::hide_mobile;

/// Ctrl+K / Cmd+K. Shift (key `K`) does not count.
pub fn is_search_shortcut(key: &str, ctrl: bool, meta: bool) -> bool {
    (ctrl || meta) && key == "k"
}

fn scroll_to_anchor(ctx: &UiContext, link: &Element) {
    let Some(href) = link.get_attribute("href") else {
        return;
    };
    // "#" alone is not a valid selector
    if let Ok(Some(target)) = ctx.document.query_selector(&href) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }
}

pub fn init(
    ctx: &UiContext,
    sidebar: Option<Element>,
    search: Option<HtmlInputElement>,
) -> UiResult<()> {
    let (key_ctx, key_sidebar) = (ctx.clone(), sidebar.clone());
    listen(&ctx.document, "keydown", move |ev: KeyboardEvent| {
        let key = ev.key();
        if is_search_shortcut(&key, ev.ctrl_key(), ev.meta_key()) {
            ev.prevent_default();
            if let Some(input) = &search {
                let _ = input.focus();
            }
        }
        if key == "Escape" && key_ctx.is_mobile() {
            if let Some(sidebar) = &key_sidebar {
                hide_mobile(sidebar);
            }
        }
    })?;

    let resize_ctx = ctx.clone();
    listen(&ctx.window, "resize", move |_: web_sys::Event| {
        if let Some(sidebar) = &sidebar {
            if !resize_ctx.is_mobile() {
                hide_mobile(sidebar);
            }
        }
    })?;

    let links = select_all(&ctx.document, "a[href^=\"#\"]")?;
    for link in &links {
        let (link_ctx, target) = (ctx.clone(), link.clone());
        listen(link, "click", move |ev: MouseEvent| {
            ev.prevent_default();
            scroll_to_anchor(&link_ctx, &target);
        })?;
    }
    log::debug!("[SHORTCUTS] Bound keys, resize and {} anchors", links.len());
    Ok(())
}
