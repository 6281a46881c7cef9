use super::{format_start_time, SongplayRow, TimeRow, TransformError, UserRow};
use crate::store::SqlValue;
use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;
use std::path::Path;

/// The only log action that represents a song being played.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// A `NextSong` line of an activity log.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenEvent {
    /// Milliseconds since the Unix epoch.
    pub ts: i64,
    #[serde(deserialize_with = "deserialize_user_id")]
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: String,
    pub song: String,
    pub artist: String,
    pub length: f64,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

/// Log ids arrive either as JSON numbers or as strings of digits.
fn deserialize_user_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawUserId {
        Number(i64),
        Text(String),
    }

    match RawUserId::deserialize(deserializer)? {
        RawUserId::Number(id) => Ok(id),
        RawUserId::Text(text) => text.trim().parse().map_err(|_| {
            de::Error::invalid_value(Unexpected::Str(&text), &"a numeric user id")
        }),
    }
}

impl ListenEvent {
    pub fn time_row(&self) -> Result<TimeRow, TransformError> {
        TimeRow::from_epoch_millis(self.ts)
    }

    pub fn user_row(&self) -> UserRow {
        UserRow {
            user_id: self.user_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            gender: self.gender.clone(),
            level: self.level.clone(),
        }
    }

    /// Parameters of the song lookup: (title, artist name, duration).
    pub fn lookup_params(&self) -> [SqlValue; 3] {
        [
            (&self.song).into(),
            (&self.artist).into(),
            self.length.into(),
        ]
    }

    pub fn songplay_row(
        &self,
        time: &TimeRow,
        song_id: Option<String>,
        artist_id: Option<String>,
    ) -> SongplayRow {
        SongplayRow {
            start_time: format_start_time(&time.start_time),
            user_id: self.user_id,
            level: self.level.clone(),
            song_id,
            artist_id,
            session_id: self.session_id,
            location: self.location.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// The `NextSong` events of one log file, in file order.
#[derive(Debug, Default)]
pub struct LogBatch {
    pub events: Vec<ListenEvent>,
    /// Lines dropped because their page was not `NextSong`.
    pub skipped: usize,
}

pub fn read_listen_events(path: &Path) -> Result<LogBatch, TransformError> {
    let content = std::fs::read_to_string(path).map_err(|source| TransformError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_listen_events(&content, path)
}

fn parse_listen_events(content: &str, path: &Path) -> Result<LogBatch, TransformError> {
    let mut batch = LogBatch::default();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let value: serde_json::Value =
            serde_json::from_str(line).map_err(|source| TransformError::InvalidJson {
                path: path.to_path_buf(),
                line: line_number,
                source,
            })?;

        if value.get("page").and_then(serde_json::Value::as_str) != Some(NEXT_SONG_PAGE) {
            batch.skipped += 1;
            continue;
        }

        let event = ListenEvent::deserialize(value).map_err(|source| {
            TransformError::InvalidRecord {
                path: path.to_path_buf(),
                line: line_number,
                source,
            }
        })?;
        batch.events.push(event);
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEXT_SONG_LINE: &str = r#"{"artist":"A","auth":"Logged In","firstName":"F","gender":"M","itemInSession":0,"lastName":"L","length":10.0,"level":"free","location":"Loc","method":"PUT","page":"NextSong","registration":1540919166796.0,"sessionId":1,"song":"S","status":200,"ts":1541121934796,"userAgent":"UA","userId":"7"}"#;
    const HOME_LINE: &str = r#"{"artist":null,"auth":"Logged In","firstName":"F","gender":"M","itemInSession":1,"lastName":"L","length":null,"level":"free","location":"Loc","method":"GET","page":"Home","registration":1540919166796.0,"sessionId":1,"song":null,"status":200,"ts":1541121935796,"userAgent":"UA","userId":"7"}"#;

    fn parse(content: &str) -> Result<LogBatch, TransformError> {
        parse_listen_events(content, Path::new("log.json"))
    }

    #[test]
    fn test_parses_next_song_line() {
        let batch = parse(NEXT_SONG_LINE).unwrap();
        assert_eq!(batch.skipped, 0);
        assert_eq!(
            batch.events,
            vec![ListenEvent {
                ts: 1541121934796,
                user_id: 7,
                first_name: Some("F".to_string()),
                last_name: Some("L".to_string()),
                gender: Some("M".to_string()),
                level: "free".to_string(),
                song: "S".to_string(),
                artist: "A".to_string(),
                length: 10.0,
                session_id: 1,
                location: Some("Loc".to_string()),
                user_agent: Some("UA".to_string()),
            }]
        );
    }

    #[test]
    fn test_other_pages_are_skipped_without_field_checks() {
        let content = format!(
            "{}\n{}\n{}\n",
            HOME_LINE, r#"{"ts":1}"#, r#"{"page":"nextsong","ts":2}"#
        );
        let batch = parse(&content).unwrap();
        assert!(batch.events.is_empty());
        assert_eq!(batch.skipped, 3);
    }

    #[test]
    fn test_keeps_file_order_and_ignores_blank_lines() {
        let second = NEXT_SONG_LINE.replace("1541121934796", "1541121999999");
        let content = format!("{}\n\n{}\n{}\n", NEXT_SONG_LINE, HOME_LINE, second);
        let batch = parse(&content).unwrap();
        let timestamps: Vec<_> = batch.events.iter().map(|e| e.ts).collect();
        assert_eq!(timestamps, vec![1541121934796, 1541121999999]);
        assert_eq!(batch.skipped, 1);
    }

    #[test]
    fn test_numeric_user_id_is_accepted() {
        let line = NEXT_SONG_LINE.replace(r#""userId":"7""#, r#""userId":7"#);
        let batch = parse(&line).unwrap();
        assert_eq!(batch.events[0].user_id, 7);
    }

    #[test]
    fn test_non_numeric_user_id_is_invalid_record() {
        let line = NEXT_SONG_LINE.replace(r#""userId":"7""#, r#""userId":"""#);
        assert!(matches!(
            parse(&line),
            Err(TransformError::InvalidRecord { line: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_json_reports_line_number() {
        let content = format!("{}\n{{not json\n", NEXT_SONG_LINE);
        assert!(matches!(
            parse(&content),
            Err(TransformError::InvalidJson { line: 2, .. })
        ));
    }

    #[test]
    fn test_next_song_without_length_is_invalid_record() {
        let line = NEXT_SONG_LINE.replace(r#""length":10.0,"#, "");
        assert!(matches!(
            parse(&line),
            Err(TransformError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_songplay_row_uses_lookup_result() {
        let event = parse(NEXT_SONG_LINE).unwrap().events.remove(0);
        let time = event.time_row().unwrap();
        let row = event.songplay_row(&time, Some("S1".to_string()), Some("A1".to_string()));
        assert_eq!(row.start_time, "2018-11-02 01:25:34.796");
        assert_eq!(row.song_id.as_deref(), Some("S1"));
        assert_eq!(row.artist_id.as_deref(), Some("A1"));
        assert_eq!(row.session_id, 1);
    }
}
