//! Main binary entry point for the spdx-dbom-bridge.

use clap::{Parser, ValueEnum};
use spdx_dbom_bridge::errors::ConverterError;
use spdx_dbom_bridge::{Config, ConversionDirection};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        help = "The full address (with scheme) at which the gateway can be reached"
    )]
    gateway: String,

    #[arg(short, long, help = "The repository ID on which the channel exists")]
    repo: String,

    #[arg(short, long, help = "The channel ID to commit to or retrieve from")]
    channel: String,

    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The SPDX tag-value file to send (export) or create (import)"
    )]
    file: PathBuf,

    #[arg(
        short,
        long,
        help = "The asset ID to retrieve (required for dbom-to-spdx)"
    )]
    asset: Option<String>,

    #[arg(short, long, help = "String appended to the asset id, for testing")]
    idextra: Option<String>,

    #[arg(short, long, value_enum)]
    direction: CliDirection,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, ValueEnum)]
enum CliDirection {
    #[value(name = "spdx-to-dbom")]
    SpdxToDbom,
    #[value(name = "dbom-to-spdx")]
    DbomToSpdx,
}

fn setup_logging(verbose: bool) {
    let filter_level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter(None, filter_level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_app() -> Result<(), ConverterError> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let direction = match cli.direction {
        CliDirection::SpdxToDbom => ConversionDirection::SpdxToDbom,
        CliDirection::DbomToSpdx => ConversionDirection::DbomToSpdx,
    };

    let config = Config {
        gateway: cli.gateway,
        repo: cli.repo,
        channel: cli.channel,
        direction,
        file: cli.file,
        asset: cli.asset,
        idextra: cli.idextra,
    };

    spdx_dbom_bridge::run(config)
}

fn main() -> ExitCode {
    match run_app() {
        Ok(_) => {
            log::info!("Conversion completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("A fatal error occurred:");
            log::error!("{}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(s) = source {
                log::error!("  Caused by: {}", s);
                source = std::error::Error::source(s);
            }
            ExitCode::FAILURE
        }
    }
}
