use super::{ArtistRow, SongRow, TransformError};
use serde::Deserialize;
use std::path::Path;

/// One song metadata file: a single JSON object describing a song and its
/// artist.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SongRecord {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
    pub artist_name: String,
    pub artist_location: Option<String>,
    pub artist_latitude: Option<f64>,
    pub artist_longitude: Option<f64>,
}

impl SongRecord {
    pub fn from_file(path: &Path) -> Result<Self, TransformError> {
        let content = std::fs::read_to_string(path).map_err(|source| TransformError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self, TransformError> {
        serde_json::from_str(content).map_err(|source| {
            let line = source.line();
            let path = path.to_path_buf();
            if source.is_data() {
                TransformError::InvalidRecord { path, line, source }
            } else {
                TransformError::InvalidJson { path, line, source }
            }
        })
    }

    pub fn song_row(&self) -> SongRow {
        SongRow {
            song_id: self.song_id.clone(),
            title: self.title.clone(),
            artist_id: self.artist_id.clone(),
            year: self.year,
            duration: self.duration,
        }
    }

    pub fn artist_row(&self) -> ArtistRow {
        ArtistRow {
            artist_id: self.artist_id.clone(),
            name: self.artist_name.clone(),
            location: self.artist_location.clone(),
            latitude: self.artist_latitude,
            longitude: self.artist_longitude,
        }
    }
}
