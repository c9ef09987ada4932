//! Terminal output for the CLI
//!
//! Results go to stdout, diagnostics (errors, warnings, upload progress) go
//! to stderr, so `--json` output can be piped without noise.

use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{json, Value};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Trait for formatting CLI output
pub trait OutputFormatter: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    /// Redraws the upload progress line
    fn progress(&self, percent: u8);
    /// Terminates a progress line left open by an interrupted upload
    fn end_progress(&self);
    fn print_json(&self, value: &Value);
}

/// Human-readable output with status symbols
///
/// In quiet mode only errors, warnings and success lines are shown.
pub struct HumanFormatter {
    quiet: bool,
    progress_open: AtomicBool,
}

impl HumanFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            progress_open: AtomicBool::new(false),
        }
    }

    #[cfg(test)]
    fn has_open_progress(&self) -> bool {
        self.progress_open.load(Ordering::SeqCst)
    }
}

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {}", message);
    }
    fn error(&self, message: &str) {
        self.end_progress();
        eprintln!("\u{2717} Error: {}", message);
    }
    fn warn(&self, message: &str) {
        self.end_progress();
        eprintln!("\u{26a0} Warning: {}", message);
    }
    fn info(&self, message: &str) {
        if !self.quiet {
            println!("  {}", message);
        }
    }
    fn progress(&self, percent: u8) {
        if self.quiet {
            return;
        }
        eprint!("\r  Uploading... {:>3}%", percent);
        if percent >= 100 {
            eprintln!();
            self.progress_open.store(false, Ordering::SeqCst);
        } else {
            self.progress_open.store(true, Ordering::SeqCst);
        }
    }
    fn end_progress(&self) {
        if self.progress_open.swap(false, Ordering::SeqCst) {
            eprintln!();
        }
    }
    fn print_json(&self, _value: &Value) {}
}

/// Machine-readable output, one JSON document per call
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!("{}", json!({"success": true, "message": message}));
    }
    fn error(&self, message: &str) {
        eprintln!("{}", json!({"success": false, "error": message}));
    }
    fn warn(&self, message: &str) {
        eprintln!("{}", json!({"level": "warning", "message": message}));
    }
    fn info(&self, _message: &str) {}
    fn progress(&self, _percent: u8) {}
    fn end_progress(&self) {}
    fn print_json(&self, value: &Value) {
        println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
    }
}

pub fn get_formatter(format: OutputFormat, quiet: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Human => Box::new(HumanFormatter::new(quiet)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_progress_leaves_line_open() {
        let formatter = HumanFormatter::new(false);
        formatter.progress(42);
        assert!(formatter.has_open_progress());

        formatter.end_progress();
        assert!(!formatter.has_open_progress());
    }

    #[test]
    fn test_complete_progress_closes_line() {
        let formatter = HumanFormatter::new(false);
        formatter.progress(50);
        formatter.progress(100);
        assert!(!formatter.has_open_progress());
    }

    #[test]
    fn test_error_closes_open_progress_line() {
        let formatter = HumanFormatter::new(false);
        formatter.progress(10);
        formatter.error("upload failed");
        assert!(!formatter.has_open_progress());
    }

    #[test]
    fn test_quiet_mode_draws_no_progress() {
        let formatter = HumanFormatter::new(true);
        formatter.progress(30);
        assert!(!formatter.has_open_progress());
    }
}
