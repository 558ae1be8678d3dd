//! Progress spinner utilities

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use std::time::Duration;

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Create a spinner with the given message
///
/// Returns `None` in batch mode.
pub fn create_spinner(message: &str, batch: bool) -> Option<ProgressBar> {
    if batch {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    match ProgressStyle::with_template("{spinner:.blue} {msg}") {
        Ok(style) => spinner.set_style(style.tick_strings(TICKS)),
        Err(e) => debug!("Invalid spinner template: {}", e),
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

pub fn set_spinner_message(spinner: Option<&ProgressBar>, message: String) {
    if let Some(s) = spinner {
        s.set_message(message);
    }
}

/// Hide the spinner while `f` writes to the terminal
pub fn suspend_spinner<F: FnOnce() -> R, R>(spinner: Option<&ProgressBar>, f: F) -> R {
    match spinner {
        Some(s) => s.suspend(f),
        None => f(),
    }
}

/// Remove the spinner line
pub fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(s) = spinner {
        s.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_spinner_batch_mode() {
        assert!(create_spinner("test", true).is_none());
    }

    #[test]
    fn test_suspend_without_spinner_runs_closure() {
        assert_eq!(suspend_spinner(None, || 42), 42);
    }

    #[test]
    fn test_finish_spinner_none() {
        set_spinner_message(None, "page 2".to_string());
        finish_spinner(None);
    }
}
