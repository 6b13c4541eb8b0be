//! UI Components
//!
//! Leptos components mounted into server-rendered pages.

mod toast_host;

pub use toast_host::ToastHost;
