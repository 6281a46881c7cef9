//! Temporary warehouse databases and data trees

#![allow(dead_code)]

use super::constants::*;
use anyhow::Result;
use rusqlite::Connection;
use sparkify_etl::config::EtlConfig;
use sparkify_etl::pipeline::{run_etl, EtlSummary, LogProgress};
use sparkify_etl::warehouse::provision;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A provisioned database plus empty song and log directories, all inside
/// one temp dir that is removed on drop.
pub struct TestWarehouse {
    _dir: TempDir,
    pub db_path: PathBuf,
    pub song_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl TestWarehouse {
    pub fn provisioned() -> Self {
        let warehouse = Self::unprovisioned();
        provision(&warehouse.db_path).expect("Failed to provision test warehouse");
        warehouse
    }

    pub fn unprovisioned() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let root = dir.path().canonicalize().expect("Failed to resolve temp dir");
        let song_dir = root.join("song_data");
        let log_dir = root.join("log_data");
        fs::create_dir_all(&song_dir).expect("Failed to create song dir");
        fs::create_dir_all(&log_dir).expect("Failed to create log dir");
        Self {
            db_path: root.join("sparkify.db"),
            song_dir,
            log_dir,
            _dir: dir,
        }
    }

    pub fn config(&self) -> EtlConfig {
        EtlConfig {
            db_path: self.db_path.clone(),
            song_data_dir: self.song_dir.clone(),
            log_data_dir: self.log_dir.clone(),
        }
    }

    pub fn run(&self) -> Result<EtlSummary> {
        run_etl(&self.config(), &mut LogProgress)
    }

    /// Writes `<song_dir>/<subdir>/<name>.json`.
    pub fn write_song(&self, subdir: &str, name: &str, content: &str) -> PathBuf {
        write_file(&self.song_dir.join(subdir), &format!("{}.json", name), content)
    }

    /// Writes `<log_dir>/<subdir>/<name>.json` with one line per entry.
    pub fn write_log(&self, subdir: &str, name: &str, lines: &[String]) -> PathBuf {
        write_file(
            &self.log_dir.join(subdir),
            &format!("{}.json", name),
            &lines.join("\n"),
        )
    }

    pub fn connection(&self) -> Connection {
        Connection::open(&self.db_path).expect("Failed to open test warehouse")
    }

    pub fn count(&self, table: &str) -> i64 {
        self.connection()
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
            .expect("Failed to count rows")
    }
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create fixture dir");
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

pub fn song_json(song_id: &str, title: &str, artist_id: &str, artist_name: &str, duration: f64) -> String {
    serde_json::json!({
        "num_songs": 1,
        "artist_id": artist_id,
        "artist_latitude": null,
        "artist_longitude": null,
        "artist_location": "",
        "artist_name": artist_name,
        "song_id": song_id,
        "title": title,
        "duration": duration,
        "year": 0
    })
    .to_string()
}

pub fn song_1_json() -> String {
    song_json(SONG_1_ID, SONG_1_TITLE, ARTIST_1_ID, ARTIST_1_NAME, SONG_1_DURATION)
}

pub fn song_2_json() -> String {
    serde_json::json!({
        "num_songs": 1,
        "artist_id": ARTIST_2_ID,
        "artist_latitude": 35.14968,
        "artist_longitude": -90.04892,
        "artist_location": "Memphis, TN",
        "artist_name": "Big Star",
        "song_id": SONG_2_ID,
        "title": "Oh My Soul",
        "duration": 345.5,
        "year": 1974
    })
    .to_string()
}

/// A `NextSong` log line.
pub fn listen_line(ts: i64, user_id: i64, level: &str, song: &str, artist: &str, length: f64) -> String {
    serde_json::json!({
        "artist": artist,
        "auth": "Logged In",
        "firstName": "Panay",
        "gender": "F",
        "itemInSession": 0,
        "lastName": "Smith",
        "length": length,
        "level": level,
        "location": "Houston-The Woodlands-Sugar Land, TX",
        "method": "PUT",
        "page": "NextSong",
        "registration": 1540718479796.0,
        "sessionId": 818,
        "song": song,
        "status": 200,
        "ts": ts,
        "userAgent": "Mozilla/5.0",
        "userId": user_id.to_string()
    })
    .to_string()
}

/// A non-playback log line.
pub fn page_line(page: &str, ts: i64) -> String {
    serde_json::json!({
        "artist": null,
        "auth": "Logged Out",
        "firstName": null,
        "gender": null,
        "itemInSession": 0,
        "lastName": null,
        "length": null,
        "level": "free",
        "location": null,
        "method": "GET",
        "page": page,
        "registration": null,
        "sessionId": 52,
        "song": null,
        "status": 200,
        "ts": ts,
        "userAgent": null,
        "userId": ""
    })
    .to_string()
}
