#![allow(dead_code)]
//! Accounting UI Entry Point

mod api;
mod app;
mod commands;
mod components;
mod config;
mod context;
mod dom;
mod draft;
mod error;
mod feedback;
mod locale;
mod logger;
mod models;
mod numeric;
mod shortcuts;
mod sidebar;
mod storage;
mod store;
mod table;
mod validation;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = app::start() {
        web_sys::console::error_1(&format!("[APP] Failed to start: {}", e).into());
    }
}
