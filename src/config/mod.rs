mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_PATH: &str = "sparkify.db";
pub const DEFAULT_SONG_DATA_DIR: &str = "data/song_data";
pub const DEFAULT_LOG_DATA_DIR: &str = "data/log_data";

/// CLI arguments that can be used for config resolution.
/// Every field can be overridden by the TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub song_data_dir: Option<PathBuf>,
    pub log_data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EtlConfig {
    pub db_path: PathBuf,
    pub song_data_dir: PathBuf,
    pub log_data_dir: PathBuf,
}

impl EtlConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present; missing values fall back
    /// to the defaults. All paths come out absolute.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = pick(file.db_path, &cli.db_path, DEFAULT_DB_PATH)?;
        if db_path.is_dir() {
            bail!("db_path is a directory: {:?}", db_path);
        }

        let song_data_dir = pick(file.song_data_dir, &cli.song_data_dir, DEFAULT_SONG_DATA_DIR)?;
        check_data_dir("song_data_dir", &song_data_dir)?;

        let log_data_dir = pick(file.log_data_dir, &cli.log_data_dir, DEFAULT_LOG_DATA_DIR)?;
        check_data_dir("log_data_dir", &log_data_dir)?;

        Ok(Self {
            db_path,
            song_data_dir,
            log_data_dir,
        })
    }
}

/// Only the database location matters when provisioning.
pub fn resolve_db_path(cli_db_path: Option<PathBuf>, file_config: Option<FileConfig>) -> Result<PathBuf> {
    let file = file_config.unwrap_or_default();
    pick(file.db_path, &cli_db_path, DEFAULT_DB_PATH)
}

fn pick(file_value: Option<String>, cli_value: &Option<PathBuf>, default: &str) -> Result<PathBuf> {
    let path = file_value
        .map(PathBuf::from)
        .or_else(|| cli_value.clone())
        .unwrap_or_else(|| PathBuf::from(default));
    absolute_path(&path)
}

// A missing data directory is not fatal: that batch simply loads nothing.
fn check_data_dir(name: &str, path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        bail!("{} is not a directory: {:?}", name, path);
    }
    Ok(())
}

/// Makes `path` absolute, canonicalizing it when it exists and joining it
/// onto the working directory otherwise.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    let resolved = match path.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::NotFound {
                path.to_path_buf()
            } else {
                return Err(e).with_context(|| format!("Error resolving path: {:?}", path));
            }
        }
    };
    if resolved.is_absolute() {
        return Ok(resolved);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(resolved))
}
