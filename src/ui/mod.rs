//! UI utilities for terminal output
//!
//! Progress spinners drawn on stderr while pages are fetched.

mod spinner;

pub use spinner::{create_spinner, finish_spinner, set_spinner_message, suspend_spinner};
