//! Toast Notifications
//!
//! Queue a floating message; the toast host renders it and it removes
//! itself after the display and fade periods.

use crate::context::UiContext;
use crate::feedback::schedule_dismissal;
use crate::models::ToastKind;
use crate::store::{store_fade_toast, store_push_toast, store_remove_toast};

/// Show a toast and return its id
pub fn show_toast(ctx: &UiContext, message: &str, kind: ToastKind) -> u64 {
    let store = ctx.store;
    let id = store_push_toast(&store, message, kind);
    schedule_dismissal(
        &ctx.scheduler,
        ctx.config.toast_display_ms,
        ctx.config.toast_fade_ms,
        move || store_fade_toast(&store, id),
        move || store_remove_toast(&store, id),
    );
    id
}
