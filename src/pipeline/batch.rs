use super::{collect_json_files, ProgressReporter};
use crate::store::Store;
use crate::transform::{RecordTransformer, TransformStats};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of one batch over a data directory.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub name: &'static str,
    pub root: PathBuf,
    pub files_found: usize,
    pub files_processed: usize,
    pub stats: TransformStats,
}

/// Applies `transformer` to every JSON file under `root`, committing after
/// each file.
///
/// A failing file is rolled back and aborts the batch; files committed before
/// it stay committed.
pub fn process_data(
    store: &mut dyn Store,
    root: &Path,
    transformer: &dyn RecordTransformer,
    progress: &mut dyn ProgressReporter,
) -> Result<BatchSummary> {
    let files = collect_json_files(root)?;
    let total = files.len();
    progress.batch_started(root, total);

    let mut summary = BatchSummary {
        name: transformer.name(),
        root: root.to_path_buf(),
        files_found: total,
        files_processed: 0,
        stats: TransformStats::default(),
    };

    for (index, path) in files.iter().enumerate() {
        let stats = match load_file(store, transformer, path) {
            Ok(stats) => stats,
            Err(e) => {
                if let Err(rollback_err) = store.rollback() {
                    warn!("Rollback after failure in {} failed: {}", path.display(), rollback_err);
                }
                return Err(e).with_context(|| {
                    format!(
                        "Failed to load {} file {} ({}/{})",
                        transformer.name(),
                        path.display(),
                        index + 1,
                        total
                    )
                });
            }
        };

        summary.files_processed += 1;
        summary.stats += stats;
        progress.file_processed(index + 1, total, path);
    }

    debug!("{} batch stats: {:?}", summary.name, summary.stats);
    progress.batch_finished(&summary);
    Ok(summary)
}

fn load_file(
    store: &mut dyn Store,
    transformer: &dyn RecordTransformer,
    path: &Path,
) -> Result<TransformStats> {
    let stats = transformer.apply(store, path)?;
    store.commit()?;
    Ok(stats)
}
