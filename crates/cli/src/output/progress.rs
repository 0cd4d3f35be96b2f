//! Progress bar for the region walk
//!
//! One tick per region attempted. Suppressed in quiet, JSON and
//! no-progress modes, and when stderr is not a terminal; callers then fall
//! back to plain per-region lines.

use super::OutputConfig;

/// Progress bar wrapper
#[derive(Debug)]
pub struct ProgressBar {
    bar: Option<indicatif::ProgressBar>,
}

impl ProgressBar {
    /// Create a bar counting `total` regions
    pub fn regions(config: &OutputConfig, total: u64) -> Self {
        let hidden = indicatif::ProgressDrawTarget::stderr().is_hidden();
        let bar = if config.quiet || config.json || config.no_progress || hidden {
            None
        } else {
            let bar = indicatif::ProgressBar::new(total);
            let style = indicatif::ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} regions {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                .progress_chars("#>-");
            bar.set_style(style);
            Some(bar)
        };

        Self { bar }
    }

    /// Record one finished region
    pub fn tick_region(&self, region: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(region.to_string());
            bar.inc(1);
        }
    }

    /// Print a line above the bar without tearing it
    pub fn println(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.println(message);
        }
    }

    /// Finish and clear the progress bar
    pub fn finish_and_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Check if progress bar is visible
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }
}
