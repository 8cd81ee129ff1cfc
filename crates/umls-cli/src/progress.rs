//! Terminal progress bars for table builds.

use indicatif::{ProgressBar, ProgressStyle};
use umls_loader::{format_bytes, Progress, ProgressUnit};

const BYTES_TEMPLATE: &str =
    "{msg:>15} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})";
const LINES_TEMPLATE: &str =
    "{msg:>15} [{elapsed_precise}] [{bar:40.cyan/blue}] {human_pos}/{human_len} ({per_sec})";

/// One progress bar per scan, hidden when quiet.
pub struct BarProgress {
    quiet: bool,
    bar: Option<ProgressBar>,
}

impl BarProgress {
    pub fn new(quiet: bool) -> Self {
        Self { quiet, bar: None }
    }
}

impl Progress for BarProgress {
    fn start(&mut self, phase: &str, total: u64, unit: ProgressUnit) {
        let bar = if self.quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total)
        };

        let template = match unit {
            ProgressUnit::Bytes => BYTES_TEMPLATE,
            ProgressUnit::Lines => LINES_TEMPLATE,
        };
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message(phase.to_string());

        if unit == ProgressUnit::Bytes {
            tracing::debug!("{}: {} to scan", phase, format_bytes(total));
        }
        self.bar = Some(bar);
    }

    fn advance(&mut self, position: u64) {
        if let Some(bar) = &self.bar {
            bar.set_position(position);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}
