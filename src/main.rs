use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use termfolio::core::config;
use termfolio::tui;

#[derive(Parser)]
#[command(name = "termfolio", about = "Interactive terminal portfolio viewer")]
struct Args {
    /// Path to the YAML config file
    #[arg(long)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize file logger - writes to termfolio.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("termfolio.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Termfolio starting up with config: {}", args.config.display());

    let loaded = match config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("Configuration rejected: {}", e);
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tui::run(loaded) {
        log::warn!("UI loop failed: {}", e);
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
