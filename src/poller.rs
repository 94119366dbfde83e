//! The poll loop: repeat request/response cycles and print readings.

use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::device::Sensor;
use crate::error::{Error, Result};
use crate::protocol::{self, Reading, CMD_READ_SENSOR, REPORT_SIZE};

/// One write/read transaction with the sensor. The poll loop is generic
/// over this so it can run against a scripted link in tests.
pub trait Link {
    fn exchange(&mut self, command: &[u8], report: &mut [u8]) -> Result<usize>;
}

impl Link for Sensor {
    fn exchange(&mut self, command: &[u8], report: &mut [u8]) -> Result<usize> {
        Sensor::exchange(self, command, report)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `timestamp,temperature,humidity`, one line per reading.
    Csv,
    /// `Temperature: {t}°C` and `Humidity: {h}%` lines.
    Human,
}

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub repeat: u32,
    /// Pause between cycles; not applied after the last one.
    pub interval: Duration,
    pub format: OutputFormat,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            repeat: 1,
            interval: Duration::from_secs(3),
            format: OutputFormat::Csv,
        }
    }
}

/// Run `config.repeat` request/response cycles, printing each decoded
/// reading to `out`. Transfer and decode failures are logged and the loop
/// moves on to the next cycle; setup-class failures abort the run.
///
/// Returns the number of successful readings.
pub fn poll<L: Link>(link: &mut L, config: &PollConfig, out: &mut impl Write) -> Result<u32> {
    let mut readings = 0;
    for cycle in 0..config.repeat {
        match run_cycle(link, config.format, out) {
            Ok(()) => readings += 1,
            Err(e) if e.aborts_run() => return Err(e),
            Err(e) => log::error!("cycle {cycle}: {e}"),
        }
        if cycle + 1 < config.repeat {
            thread::sleep(config.interval);
        }
    }
    Ok(readings)
}

fn run_cycle<L: Link>(link: &mut L, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    log::info!("sending command {}", protocol::hex_str(&CMD_READ_SENSOR));
    let mut report = [0u8; REPORT_SIZE];
    let len = link.exchange(&CMD_READ_SENSOR, &mut report)?;
    log::debug!("received raw report {}", protocol::hex_str(&report[..len]));
    let reading = protocol::decode(&report[..len]).ok_or(Error::ShortReport { len })?;
    emit(&reading, format, out)?;
    Ok(())
}

fn emit(reading: &Reading, format: OutputFormat, out: &mut impl Write) -> std::io::Result<()> {
    match format {
        OutputFormat::Csv => {
            let timestamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S");
            writeln!(
                out,
                "{timestamp},{:.2},{:.2}",
                reading.temperature_c, reading.humidity_pct
            )
        }
        OutputFormat::Human => {
            writeln!(out, "Temperature: {:.2}°C", reading.temperature_c)?;
            writeln!(out, "Humidity: {:.2}%", reading.humidity_pct)
        }
    }
}
