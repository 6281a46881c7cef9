//! Typed input records and the warehouse rows derived from them.

mod error;
mod event;
mod rows;
mod song;
mod time;

pub use error::TransformError;
pub use event::{read_listen_events, ListenEvent, LogBatch, NEXT_SONG_PAGE};
pub use rows::{ArtistRow, SongRow, SongplayRow, UserRow, WarehouseRow};
pub use song::SongRecord;
pub use time::{format_start_time, TimeRow};
