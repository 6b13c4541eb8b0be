//! Alert Auto-dismiss
//!
//! Alerts present at page load fade out and are removed after a delay.

use web_sys::Element;

use crate::context::UiContext;
use crate::dom::set_style;
use crate::error::UiResult;
use crate::feedback::{css_seconds, schedule_dismissal};

pub fn init(ctx: &UiContext, alerts: Vec<Element>) -> UiResult<()> {
    let count = alerts.len();
    let transition = format!("opacity {} ease", css_seconds(ctx.config.alert_fade_ms));

    for alert in alerts {
        alert.class_list().add_1("fade-in")?;

        let fading = alert.clone();
        let transition = transition.clone();
        schedule_dismissal(
            &ctx.scheduler,
            ctx.config.alert_display_ms,
            ctx.config.alert_fade_ms,
            move || {
                // Someone else already removed it
                if fading.parent_node().is_none() {
                    return false;
                }
                let faded = set_style(&fading, "transition", &transition)
                    .and_then(|_| set_style(&fading, "opacity", "0"));
                if let Err(e) = faded {
                    log::warn!("[ALERTS] Failed to fade alert: {}", e);
                }
                true
            },
            move || {
                if alert.parent_node().is_some() {
                    alert.remove();
                }
            },
        );
    }
    log::debug!("[ALERTS] Scheduled dismissal for {} alerts", count);
    Ok(())
}
