//! Progress reporting helpers

use indicatif::{ProgressBar, ProgressStyle};

/// Thin wrapper around an indicatif spinner/bar
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    /// Creates a determinate bar over `total` steps
    pub fn new(total: u64, description: &str) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        bar.set_message(description.to_string());

        ProgressTracker { bar }
    }

    /// Creates an indeterminate spinner
    pub fn new_spinner(description: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_message(description.to_string());

        ProgressTracker { bar }
    }

    pub fn increment(&self, amount: u64) {
        self.bar.inc(amount);
    }

    pub fn set_message(&self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}
