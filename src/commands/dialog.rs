use web_sys::Window;

pub const DEFAULT_DELETE_MESSAGE: &str = "Are you sure you want to delete this item?";

/// Blocking `window.confirm`; a dialog that fails to open counts as "no"
pub fn confirm(window: &Window, message: Option<&str>) -> bool {
    let message = message
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_DELETE_MESSAGE);
    window.confirm_with_message(message).unwrap_or(false)
}
