//! UI State Store
//!
//! Uses Leptos reactive_stores so the toast host re-renders per field.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{ToastKind, ToastMessage};

/// Reactive state shared by the enhancement layer
#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Toasts on screen, oldest first
    pub toasts: Vec<ToastMessage>,
    /// Last id handed out to a toast
    pub last_toast_id: u64,
}

/// Type alias for the store
pub type AppStore = Store<UiState>;

pub fn new_store() -> AppStore {
    Store::new(UiState::default())
}

// ========================
// Store Helper Functions
// ========================

/// Append a toast and return its id
pub fn store_push_toast(store: &AppStore, message: &str, kind: ToastKind) -> u64 {
    let id = {
        let last_field = store.last_toast_id();
        let mut last = last_field.write();
        *last += 1;
        *last
    };
    store.toasts().write().push(ToastMessage {
        id,
        message: message.to_string(),
        kind,
        fading: false,
    });
    id
}

/// Mark a toast as fading; false if it is already gone
pub fn store_fade_toast(store: &AppStore, toast_id: u64) -> bool {
    let toasts_field = store.toasts();
    let mut toasts = toasts_field.write();
    match toasts.iter_mut().find(|toast| toast.id == toast_id) {
        Some(toast) => {
            toast.fading = true;
            true
        }
        None => false,
    }
}

/// Remove a toast by ID
pub fn store_remove_toast(store: &AppStore, toast_id: u64) {
    store.toasts().write().retain(|toast| toast.id != toast_id);
}

/// Whether a toast is in its fade-out period
pub fn store_is_fading(store: &AppStore, toast_id: u64) -> bool {
    store
        .toasts()
        .read()
        .iter()
        .any(|toast| toast.id == toast_id && toast.fading)
}
