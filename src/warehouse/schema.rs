//! Star schema for the listening warehouse.
//!
//! `songplays` is the fact table; `songs`, `artists`, `users` and `time` are
//! its dimensions. Foreign keys are deferred so that rows derived from a single
//! input file can be inserted in any order within that file's transaction.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

const ARTIST_FK: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "artist_id",
    on_delete: ForeignKeyOnChange::NoAction,
    deferred: true,
};

const SONG_FK: ForeignKey = ForeignKey {
    foreign_table: "songs",
    foreign_column: "song_id",
    on_delete: ForeignKeyOnChange::SetNull,
    deferred: true,
};

const USER_FK: ForeignKey = ForeignKey {
    foreign_table: "users",
    foreign_column: "user_id",
    on_delete: ForeignKeyOnChange::NoAction,
    deferred: true,
};

const TIME_FK: ForeignKey = ForeignKey {
    foreign_table: "time",
    foreign_column: "start_time",
    on_delete: ForeignKeyOnChange::NoAction,
    deferred: true,
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("artist_id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("latitude", &SqlType::Real),
        sqlite_column!("longitude", &SqlType::Real),
    ],
    indices: &[("idx_artists_name", "name")],
};

const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!("song_id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!(
            "artist_id",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&ARTIST_FK)
        ),
        sqlite_column!("year", &SqlType::Integer),
        sqlite_column!("duration", &SqlType::Real, non_null = true),
    ],
    // Songplay resolution looks songs up by title
    indices: &[("idx_songs_title", "title")],
};

const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!("user_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("first_name", &SqlType::Text),
        sqlite_column!("last_name", &SqlType::Text),
        sqlite_column!("gender", &SqlType::Text),
        sqlite_column!("level", &SqlType::Text, non_null = true),
    ],
    indices: &[],
};

const TIME_TABLE: Table = Table {
    name: "time",
    columns: &[
        sqlite_column!("start_time", &SqlType::Text, is_primary_key = true),
        sqlite_column!("time_of_day", &SqlType::Text, non_null = true),
        sqlite_column!("hour", &SqlType::Integer, non_null = true),
        sqlite_column!("day", &SqlType::Integer, non_null = true),
        sqlite_column!("week", &SqlType::Integer, non_null = true),
        sqlite_column!("month", &SqlType::Integer, non_null = true),
        sqlite_column!("year", &SqlType::Integer, non_null = true),
        sqlite_column!("weekday", &SqlType::Text, non_null = true),
    ],
    indices: &[],
};

const SONGPLAYS_TABLE: Table = Table {
    name: "songplays",
    columns: &[
        sqlite_column!("songplay_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "start_time",
            &SqlType::Text,
            non_null = true,
            foreign_key = Some(&TIME_FK)
        ),
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!("level", &SqlType::Text, non_null = true),
        sqlite_column!("song_id", &SqlType::Text, foreign_key = Some(&SONG_FK)),
        sqlite_column!("artist_id", &SqlType::Text, foreign_key = Some(&ARTIST_FK)),
        sqlite_column!("session_id", &SqlType::Integer, non_null = true),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("user_agent", &SqlType::Text),
    ],
    indices: &[
        ("idx_songplays_start_time", "start_time"),
        ("idx_songplays_user", "user_id"),
    ],
};

/// Warehouse schema versions. Tables are listed parents first; dropping walks
/// the list backwards.
pub const WAREHOUSE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        ARTISTS_TABLE,
        SONGS_TABLE,
        USERS_TABLE,
        TIME_TABLE,
        SONGPLAYS_TABLE,
    ],
}];

pub fn latest_schema() -> &'static VersionedSchema {
    &WAREHOUSE_VERSIONED_SCHEMAS[WAREHOUSE_VERSIONED_SCHEMAS.len() - 1]
}

/// Names of all warehouse tables, in creation order.
pub fn table_names() -> impl Iterator<Item = &'static str> {
    latest_schema().tables.iter().map(|t| t.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::{params, Connection};

    fn create_schema() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        latest_schema().create(&conn).unwrap();
        conn
    }

    #[test]
    fn test_schema_creates_successfully() {
        let conn = create_schema();
        latest_schema().validate(&conn).unwrap();
    }

    #[test]
    fn test_table_names_in_creation_order() {
        let names: Vec<_> = table_names().collect();
        assert_eq!(names, vec!["artists", "songs", "users", "time", "songplays"]);
    }

    #[test]
    fn test_songplay_with_unknown_song_is_rejected_at_commit() {
        let mut conn = create_schema();
        let tx = conn.transaction().unwrap();
        tx.execute(
            "INSERT INTO users (user_id, first_name, last_name, gender, level) VALUES (7, 'F', 'L', 'M', 'free')",
            [],
        )
        .unwrap();
        tx.execute(
            "INSERT INTO time VALUES ('2018-11-02 01:25:34.796', '01:25:34.796', 1, 2, 44, 11, 2018, 'Friday')",
            [],
        )
        .unwrap();
        tx.execute(
            "INSERT INTO songplays (start_time, user_id, level, song_id, artist_id, session_id) \
             VALUES ('2018-11-02 01:25:34.796', 7, 'free', 'S404', NULL, 1)",
            [],
        )
        .unwrap();
        assert!(tx.commit().is_err());
    }

    #[test]
    fn test_songplay_with_null_references_is_accepted() {
        let mut conn = create_schema();
        let tx = conn.transaction().unwrap();
        tx.execute(
            "INSERT INTO users (user_id, first_name, last_name, gender, level) VALUES (7, 'F', 'L', 'M', 'free')",
            [],
        )
        .unwrap();
        tx.execute(
            "INSERT INTO time VALUES ('2018-11-02 01:25:34.796', '01:25:34.796', 1, 2, 44, 11, 2018, 'Friday')",
            [],
        )
        .unwrap();
        tx.execute(
            "INSERT INTO songplays (start_time, user_id, level, song_id, artist_id, session_id) \
             VALUES (?1, ?2, ?3, NULL, NULL, ?4)",
            params!["2018-11-02 01:25:34.796", 7, "free", 1],
        )
        .unwrap();
        tx.commit().unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM songplays", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
