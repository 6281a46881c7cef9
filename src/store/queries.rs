//! Parameterized statements understood by the warehouse.
//!
//! Dimension inserts are idempotent upserts keyed by primary key: the same
//! song, artist or timestamp seen twice keeps its first row, while a user seen
//! again takes the most recent subscription level.

const SONG_INSERT: &str = "INSERT INTO songs (song_id, title, artist_id, year, duration) \
     VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT(song_id) DO NOTHING";

const ARTIST_INSERT: &str = "INSERT INTO artists (artist_id, name, location, latitude, longitude) \
     VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT(artist_id) DO NOTHING";

const TIME_INSERT: &str =
    "INSERT INTO time (start_time, time_of_day, hour, day, week, month, year, weekday) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
     ON CONFLICT(start_time) DO NOTHING";

const USER_INSERT: &str = "INSERT INTO users (user_id, first_name, last_name, gender, level) \
     VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT(user_id) DO UPDATE SET level = excluded.level";

const SONGPLAY_INSERT: &str = "INSERT INTO songplays \
     (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const SONG_LOOKUP: &str = "SELECT songs.song_id, artists.artist_id \
     FROM songs JOIN artists ON songs.artist_id = artists.artist_id \
     WHERE songs.title = ?1 AND artists.name = ?2 AND songs.duration = ?3";

/// Every statement the ETL issues. Each kind has a fixed positional
/// parameter order, documented per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statement {
    /// (song_id, title, artist_id, year, duration)
    SongInsert,
    /// (artist_id, name, location, latitude, longitude)
    ArtistInsert,
    /// (start_time, time_of_day, hour, day, week, month, year, weekday)
    TimeInsert,
    /// (user_id, first_name, last_name, gender, level)
    UserInsert,
    /// (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
    SongplayInsert,
    /// (title, artist name, duration) -> (song_id, artist_id)
    SongLookup,
}

impl Statement {
    pub fn sql(self) -> &'static str {
        match self {
            Statement::SongInsert => SONG_INSERT,
            Statement::ArtistInsert => ARTIST_INSERT,
            Statement::TimeInsert => TIME_INSERT,
            Statement::UserInsert => USER_INSERT,
            Statement::SongplayInsert => SONGPLAY_INSERT,
            Statement::SongLookup => SONG_LOOKUP,
        }
    }

    pub fn param_count(self) -> usize {
        match self {
            Statement::SongInsert | Statement::ArtistInsert | Statement::UserInsert => 5,
            Statement::TimeInsert | Statement::SongplayInsert => 8,
            Statement::SongLookup => 3,
        }
    }
}
