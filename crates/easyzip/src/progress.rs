//! Progress reporting for archive operations

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// A trait for reporting progress while archiving or extracting
///
/// Reporters only observe. Nothing they do influences the outcome of an
/// operation.
pub trait ProgressReporter {
    /// Called once for every file added to or extracted from an archive, with a
    /// human-readable line (usually the path that was processed)
    fn on_entry(&self, line: &str);

    /// Called when the archive being written turns up among its own sources and
    /// is left out
    fn on_skip_self(&self) {
        self.on_entry("skip self");
    }

    /// Called when the operation finishes successfully
    fn on_finish(&self, _message: &str) {}
}

/// A no-op progress reporter
#[derive(Default)]
pub struct NoProgressReporter;

impl ProgressReporter for NoProgressReporter {
    fn on_entry(&self, _line: &str) {}
}

impl<F: Fn(&str)> ProgressReporter for F {
    fn on_entry(&self, line: &str) {
        self(line)
    }
}

/// Prints `add: <line>` to stdout for every entry
#[derive(Default)]
pub struct PrintProgressReporter;

impl ProgressReporter for PrintProgressReporter {
    fn on_entry(&self, line: &str) {
        println!("add: {line}");
    }
}

/// Progress reporter using indicatif
#[cfg(feature = "progress")]
pub struct IndicatifProgressReporter {
    progress_bar: ProgressBar,
}

#[cfg(feature = "progress")]
impl IndicatifProgressReporter {
    /// Create a new indicatif progress reporter
    pub fn new(progress_bar: ProgressBar) -> Self {
        Self { progress_bar }
    }

    /// Create a spinner that counts entries and shows the current path
    pub fn with_default_style() -> Self {
        let progress_bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {pos} files {wide_msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
        progress_bar.set_style(style);
        progress_bar.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { progress_bar }
    }
}

#[cfg(feature = "progress")]
impl ProgressReporter for IndicatifProgressReporter {
    fn on_entry(&self, line: &str) {
        self.progress_bar.inc(1);
        self.progress_bar.set_message(line.to_string());
    }

    // Not a file, so the counter stays put.
    fn on_skip_self(&self) {
        self.progress_bar.set_message("skip self");
    }

    fn on_finish(&self, message: &str) {
        self.progress_bar.finish_with_message(message.to_string());
    }
}
