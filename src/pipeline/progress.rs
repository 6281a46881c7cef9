use super::BatchSummary;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::info;

/// Receives batch progress from the driver.
pub trait ProgressReporter {
    fn batch_started(&mut self, root: &Path, total: usize);
    /// `index` is 1-based.
    fn file_processed(&mut self, index: usize, total: usize, path: &Path);
    fn batch_finished(&mut self, summary: &BatchSummary);
}

/// Reports progress as log lines.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn batch_started(&mut self, root: &Path, total: usize) {
        info!("{} files found in {}", total, root.display());
    }

    fn file_processed(&mut self, index: usize, total: usize, _path: &Path) {
        info!("{}/{} files processed.", index, total);
    }

    fn batch_finished(&mut self, summary: &BatchSummary) {
        info!(
            "Finished {} batch: {} files, {} rows",
            summary.name,
            summary.files_processed,
            summary.stats.total_rows()
        );
    }
}

/// Reports progress on an interactive terminal bar, one bar per batch.
#[derive(Debug, Default)]
pub struct BarProgress {
    bar: Option<ProgressBar>,
}

impl BarProgress {
    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }
}

impl ProgressReporter for BarProgress {
    fn batch_started(&mut self, root: &Path, total: usize) {
        info!("{} files found in {}", total, root.display());
        let bar = ProgressBar::new(total as u64);
        bar.set_style(Self::style());
        bar.set_message(root.display().to_string());
        self.bar = Some(bar);
    }

    fn file_processed(&mut self, index: usize, _total: usize, _path: &Path) {
        if let Some(bar) = &self.bar {
            bar.set_position(index as u64);
        }
    }

    fn batch_finished(&mut self, summary: &BatchSummary) {
        if let Some(bar) = self.bar.take() {
            bar.finish_with_message(format!(
                "{} files: {} rows",
                summary.name,
                summary.stats.total_rows()
            ));
        }
    }
}
