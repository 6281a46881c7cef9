use anyhow::Result;
use clap::Parser;
use sparkify_etl::cli_style::get_styles;
use sparkify_etl::config::{absolute_path, resolve_db_path, FileConfig};
use sparkify_etl::logging::init_logging;
use sparkify_etl::warehouse::provision;
use std::path::PathBuf;
use tracing::info;

fn parse_path(s: &str) -> Result<PathBuf> {
    absolute_path(&PathBuf::from(s))
}

/// Recreates the Sparkify warehouse database from scratch.
///
/// Any existing database file at the target path is deleted.
#[derive(Parser, Debug)]
#[command(name = "create-tables", version, styles = get_styles())]
struct CliArgs {
    /// Path to a TOML config file. Its `db_path` overrides `--db-path`.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path of the SQLite warehouse to create.
    #[clap(long, value_parser = parse_path)]
    pub db_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_logging()?;

    info!(
        "create-tables {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let db_path = resolve_db_path(cli_args.db_path, file_config)?;

    provision(&db_path)?;
    info!("Warehouse ready at {:?}", db_path);
    Ok(())
}
