//! Transient Feedback
//!
//! Timer-driven UI: alert auto-dismiss, button loading state, toasts.

pub mod alerts;
pub mod loading;
pub mod toast;

use std::rc::Rc;

use ui_timers::Scheduler;

/// CSS time value for a millisecond duration (`300` -> `0.3s`)
pub fn css_seconds(ms: u32) -> String {
    format!("{}s", f64::from(ms) / 1000.0)
}

/// Two-step dismissal: `on_fade` after `display_ms`, then `on_remove`
/// after a further `fade_ms`. If `on_fade` reports the element is already
/// gone, removal is skipped.
pub fn schedule_dismissal(
    scheduler: &Rc<dyn Scheduler>,
    display_ms: u32,
    fade_ms: u32,
    on_fade: impl FnOnce() -> bool + 'static,
    on_remove: impl FnOnce() + 'static,
) {
    let later = scheduler.clone();
    drop(scheduler.schedule(
        display_ms,
        Box::new(move || {
            if on_fade() {
                drop(later.schedule(fade_ms, Box::new(on_remove)));
            }
        }),
    ));
}
