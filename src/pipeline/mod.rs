//! Batch loading of the song and log directories into the warehouse.

mod batch;
mod collect;
mod progress;

pub use batch::{process_data, BatchSummary};
pub use collect::collect_json_files;
pub use progress::{BarProgress, LogProgress, ProgressReporter};

use crate::config::EtlConfig;
use crate::store::SqliteStore;
use crate::transform::{LogTransformer, SongTransformer};
use anyhow::Result;
use tracing::info;

#[derive(Debug, Clone)]
pub struct EtlSummary {
    pub songs: BatchSummary,
    pub logs: BatchSummary,
    /// Rows present in each warehouse table once loading finished.
    pub table_counts: Vec<(&'static str, i64)>,
}

impl EtlSummary {
    pub fn log(&self) {
        for batch in [&self.songs, &self.logs] {
            info!(
                "{} batch: {}/{} files loaded from {}",
                batch.name,
                batch.files_processed,
                batch.files_found,
                batch.root.display()
            );
        }
        let songs = &self.songs.stats;
        let logs = &self.logs.stats;
        info!(
            "Rows emitted: songs={}, artists={}, time={}, users={}, songplays={}",
            songs.song_rows,
            songs.artist_rows,
            logs.time_rows,
            logs.user_rows,
            logs.songplay_rows
        );
        info!(
            "Songplays: {} resolved, {} unresolved; {} non-NextSong log lines skipped",
            logs.resolved_songplays,
            logs.songplay_rows - logs.resolved_songplays,
            logs.skipped_events
        );
        for (table, count) in &self.table_counts {
            info!("Table {}: {} rows", table, count);
        }
    }
}

/// Loads all song files, then all log files, into the database at
/// `config.db_path`.
///
/// Song data goes first so that songplay lookups can resolve against it.
pub fn run_etl(config: &EtlConfig, progress: &mut dyn ProgressReporter) -> Result<EtlSummary> {
    let mut store = SqliteStore::open(&config.db_path)?;
    info!("Loading into {}", store.db_path().display());

    let songs = process_data(&mut store, &config.song_data_dir, &SongTransformer, progress)?;
    let logs = process_data(&mut store, &config.log_data_dir, &LogTransformer, progress)?;

    let table_counts = store.table_counts()?;
    store.close()?;

    Ok(EtlSummary {
        songs,
        logs,
        table_counts,
    })
}
