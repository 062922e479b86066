//! Terminal progress reporting
//!
//! A bar with one unit per clip, drawn on stderr with indicatif.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::ports::ProgressPort;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} clips {msg}";

/// Progress bar adapter
pub struct IndicatifProgressAdapter {
    bar: ProgressBar,
}

impl IndicatifProgressAdapter {
    /// Create a bar drawing to stderr
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Create a bar that never draws; used with `--no-progress` and `--json`
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target);
        if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }
}

impl Default for IndicatifProgressAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressPort for IndicatifProgressAdapter {
    fn begin(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
    }

    fn advance(&self, message: &str) {
        self.bar.set_message(message.to_string());
        self.bar.inc(1);
    }

    fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    fn abandon(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_bar_tracks_position() {
        let progress = IndicatifProgressAdapter::hidden();
        progress.begin(3);
        progress.advance("chunk_000.gif");
        progress.advance("chunk_001.gif");

        assert_eq!(progress.bar.length(), Some(3));
        assert_eq!(progress.bar.position(), 2);

        progress.finish("done");
        assert_eq!(progress.bar.position(), 2);
    }
}
