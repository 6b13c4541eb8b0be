//! Host Command Wrappers
//!
//! Bindings to browser services that are not plain DOM calls.

mod clipboard;
mod dialog;

pub use clipboard::*;
pub use dialog::*;
