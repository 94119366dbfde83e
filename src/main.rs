use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use env_logger::Target;
use log::LevelFilter;

use temperhum::device::Sensor;
use temperhum::poller::{self, OutputFormat, PollConfig};

/// Read temperature and humidity from a TEMPerHUM USB sensor.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Number of request/response cycles to run
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    /// Seconds to wait between cycles
    #[arg(long, default_value_t = 3)]
    interval: u64,

    /// Output format for readings
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Write diagnostics to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Human,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }
    match run(&args) {
        Ok(readings) => {
            log::info!("{readings} reading(s) taken");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<u32> {
    let config = PollConfig {
        repeat: args.repeat,
        interval: Duration::from_secs(args.interval),
        format: match args.format {
            Format::Csv => OutputFormat::Csv,
            Format::Human => OutputFormat::Human,
        },
    };
    let context = rusb::Context::new().context("failed to initialize libusb")?;
    let mut sensor = Sensor::open(&context)?;
    let stdout = io::stdout();
    let readings = poller::poll(&mut sensor, &config, &mut stdout.lock())?;
    Ok(readings)
}

/// Warnings and errors go to stderr by default, or to `--log-file` when
/// given; `RUST_LOG` overrides the severity floor.
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn).parse_default_env();
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}
