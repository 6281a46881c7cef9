use super::{insert, RecordTransformer, TransformStats};
use crate::records::{read_listen_events, ListenEvent, TimeRow};
use crate::store::{SqlValue, Statement, Store};
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// Loads one activity log file.
///
/// Only `NextSong` events are kept. Every kept event yields a time row, a user
/// row and a songplay row; the three kinds are written as consecutive batches
/// in file order (all time rows, then all user rows, then all songplays).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTransformer;

impl RecordTransformer for LogTransformer {
    fn name(&self) -> &'static str {
        "log"
    }

    fn apply(&self, store: &mut dyn Store, path: &Path) -> Result<TransformStats> {
        let batch = read_listen_events(path)?;
        let mut stats = TransformStats {
            skipped_events: batch.skipped,
            ..Default::default()
        };

        let times = batch
            .events
            .iter()
            .map(ListenEvent::time_row)
            .collect::<Result<Vec<TimeRow>, _>>()?;

        for time in &times {
            insert(store, time)?;
            stats.time_rows += 1;
        }

        for event in &batch.events {
            insert(store, &event.user_row())?;
            stats.user_rows += 1;
        }

        for (event, time) in batch.events.iter().zip(&times) {
            let (song_id, artist_id) = resolve_song(store, event)?;
            if song_id.is_some() {
                stats.resolved_songplays += 1;
            }
            insert(store, &event.songplay_row(time, song_id, artist_id))?;
            stats.songplay_rows += 1;
        }

        debug!(
            "{}: {} songplays ({} resolved), {} lines skipped",
            path.display(),
            stats.songplay_rows,
            stats.resolved_songplays,
            stats.skipped_events
        );
        Ok(stats)
    }
}

/// Finds the catalog song an event refers to. No match is not an error: both
/// ids are simply unknown.
fn resolve_song(
    store: &mut dyn Store,
    event: &ListenEvent,
) -> Result<(Option<String>, Option<String>)> {
    let row = store.query_one(Statement::SongLookup, &event.lookup_params())?;
    Ok(match row {
        Some(columns) => (text_column(&columns, 0), text_column(&columns, 1)),
        None => (None, None),
    })
}

fn text_column(columns: &[SqlValue], index: usize) -> Option<String> {
    columns
        .get(index)
        .and_then(SqlValue::as_str)
        .map(str::to_string)
}
