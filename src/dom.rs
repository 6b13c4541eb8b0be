//! DOM Helpers
//!
//! Small wrappers over web-sys used by every enhancer.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, NodeList};

use crate::error::UiResult;

fn collect_elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All matches for `selector` in the document
pub fn select_all(doc: &web_sys::Document, selector: &str) -> UiResult<Vec<Element>> {
    Ok(collect_elements(&doc.query_selector_all(selector)?))
}

/// All matches for `selector` below `root`
pub fn select_all_in(root: &Element, selector: &str) -> UiResult<Vec<Element>> {
    Ok(collect_elements(&root.query_selector_all(selector)?))
}

/// Closest ancestor matching `selector`, else the parent
pub fn closest_or_parent(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten().or_else(|| el.parent_element())
}

/// Current value of an input, textarea or select
pub fn field_value(el: &Element) -> Option<String> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        return Some(area.value());
    }
    el.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
}

/// Write a form control's value. Returns false for non-controls.
pub fn set_field_value(el: &Element, value: &str) -> bool {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else {
        return false;
    }
    true
}

pub fn set_style(el: &Element, property: &str, value: &str) -> UiResult<()> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        html.style().set_property(property, value)?;
    }
    Ok(())
}

/// Attach a listener for the page's lifetime.
///
/// Events that are not an `E` are ignored.
pub fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F) -> UiResult<()>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    });
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
