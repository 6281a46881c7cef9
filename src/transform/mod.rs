//! Record transformers: turn one input file into warehouse rows.

mod log;
mod song;

pub use log::LogTransformer;
pub use song::SongTransformer;

use crate::records::WarehouseRow;
use crate::store::Store;
use anyhow::Result;
use std::ops::AddAssign;
use std::path::Path;

/// A per-file transformation from one family of input records into rows.
///
/// Implementations emit rows through the given store and never commit; the
/// batch driver owns transaction boundaries.
pub trait RecordTransformer {
    /// Short name of the record family, used in progress and logs.
    fn name(&self) -> &'static str;

    fn apply(&self, store: &mut dyn Store, path: &Path) -> Result<TransformStats>;
}

/// Rows emitted by one or more transformer runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformStats {
    pub song_rows: usize,
    pub artist_rows: usize,
    pub time_rows: usize,
    pub user_rows: usize,
    pub songplay_rows: usize,
    /// Songplays whose song and artist were found in the catalog.
    pub resolved_songplays: usize,
    /// Log lines dropped by the `NextSong` filter.
    pub skipped_events: usize,
}

impl TransformStats {
    pub fn total_rows(&self) -> usize {
        self.song_rows + self.artist_rows + self.time_rows + self.user_rows + self.songplay_rows
    }
}

impl AddAssign for TransformStats {
    fn add_assign(&mut self, other: Self) {
        self.song_rows += other.song_rows;
        self.artist_rows += other.artist_rows;
        self.time_rows += other.time_rows;
        self.user_rows += other.user_rows;
        self.songplay_rows += other.songplay_rows;
        self.resolved_songplays += other.resolved_songplays;
        self.skipped_events += other.skipped_events;
    }
}

fn insert<R: WarehouseRow>(store: &mut dyn Store, row: &R) -> Result<()> {
    store.execute(R::STATEMENT, &row.params())?;
    Ok(())
}
