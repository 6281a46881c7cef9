use super::{insert, RecordTransformer, TransformStats};
use crate::records::SongRecord;
use crate::store::Store;
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// Loads one song metadata file as a song row followed by its artist row.
#[derive(Debug, Default, Clone, Copy)]
pub struct SongTransformer;

impl RecordTransformer for SongTransformer {
    fn name(&self) -> &'static str {
        "song"
    }

    fn apply(&self, store: &mut dyn Store, path: &Path) -> Result<TransformStats> {
        let record = SongRecord::from_file(path)?;

        insert(store, &record.song_row())?;
        insert(store, &record.artist_row())?;

        debug!("Loaded song {} by {}", record.song_id, record.artist_id);
        Ok(TransformStats {
            song_rows: 1,
            artist_rows: 1,
            ..Default::default()
        })
    }
}
