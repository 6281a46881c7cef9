use anyhow::Result;
use clap::Parser;
use sparkify_etl::cli_style::get_styles;
use sparkify_etl::config::{absolute_path, CliConfig, EtlConfig, FileConfig};
use sparkify_etl::logging::init_logging;
use sparkify_etl::pipeline::{run_etl, BarProgress, LogProgress, ProgressReporter};
use std::path::PathBuf;
use tracing::info;

fn parse_path(s: &str) -> Result<PathBuf> {
    absolute_path(&PathBuf::from(s))
}

/// Loads song metadata and listening logs into the Sparkify warehouse.
#[derive(Parser, Debug)]
#[command(name = "sparkify-etl", version, styles = get_styles())]
struct CliArgs {
    /// Path to a TOML config file. Its values override the flags below.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite warehouse, as created by `create-tables`.
    #[clap(long, value_parser = parse_path)]
    pub db_path: Option<PathBuf>,

    /// Root of the song metadata files.
    #[clap(long, value_parser = parse_path)]
    pub song_data: Option<PathBuf>,

    /// Root of the activity log files.
    #[clap(long, value_parser = parse_path)]
    pub log_data: Option<PathBuf>,

    /// Show a progress bar instead of logging every processed file.
    #[clap(long)]
    pub progress_bar: bool,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    init_logging()?;

    info!(
        "sparkify-etl {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let cli_config = CliConfig {
        db_path: cli_args.db_path,
        song_data_dir: cli_args.song_data,
        log_data_dir: cli_args.log_data,
    };
    let config = EtlConfig::resolve(&cli_config, file_config)?;

    let mut progress: Box<dyn ProgressReporter> = if cli_args.progress_bar {
        Box::new(BarProgress::default())
    } else {
        Box::new(LogProgress)
    };

    let summary = run_etl(&config, progress.as_mut())?;
    summary.log();
    info!("Done");
    Ok(())
}
