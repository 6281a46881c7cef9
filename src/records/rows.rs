use super::TimeRow;
use crate::store::{SqlValue, Statement};

/// A row destined for one warehouse table, flattened into the positional
/// parameters of that table's insert statement.
pub trait WarehouseRow {
    const STATEMENT: Statement;

    fn params(&self) -> Vec<SqlValue>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SongRow {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
}

impl WarehouseRow for SongRow {
    const STATEMENT: Statement = Statement::SongInsert;

    fn params(&self) -> Vec<SqlValue> {
        vec![
            (&self.song_id).into(),
            (&self.title).into(),
            (&self.artist_id).into(),
            self.year.into(),
            self.duration.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistRow {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl WarehouseRow for ArtistRow {
    const STATEMENT: Statement = Statement::ArtistInsert;

    fn params(&self) -> Vec<SqlValue> {
        vec![
            (&self.artist_id).into(),
            (&self.name).into(),
            self.location.clone().into(),
            self.latitude.into(),
            self.longitude.into(),
        ]
    }
}

impl WarehouseRow for TimeRow {
    const STATEMENT: Statement = Statement::TimeInsert;

    fn params(&self) -> Vec<SqlValue> {
        vec![
            self.start_time_text().into(),
            self.time_of_day_text().into(),
            self.hour.into(),
            self.day.into(),
            self.week.into(),
            self.month.into(),
            self.year.into(),
            self.weekday.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: String,
}

impl WarehouseRow for UserRow {
    const STATEMENT: Statement = Statement::UserInsert;

    fn params(&self) -> Vec<SqlValue> {
        vec![
            self.user_id.into(),
            self.first_name.clone().into(),
            self.last_name.clone().into(),
            self.gender.clone().into(),
            (&self.level).into(),
        ]
    }
}

/// A single listening event. `song_id` and `artist_id` stay `None` when the
/// event could not be matched against the song catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct SongplayRow {
    pub start_time: String,
    pub user_id: i64,
    pub level: String,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl WarehouseRow for SongplayRow {
    const STATEMENT: Statement = Statement::SongplayInsert;

    fn params(&self) -> Vec<SqlValue> {
        vec![
            (&self.start_time).into(),
            self.user_id.into(),
            (&self.level).into(),
            self.song_id.clone().into(),
            self.artist_id.clone().into(),
            self.session_id.into(),
            self.location.clone().into(),
            self.user_agent.clone().into(),
        ]
    }
}
