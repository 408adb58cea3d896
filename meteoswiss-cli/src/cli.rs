use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use std::time::Duration;

use meteoswiss_core::{Config, MeteoSwissClient, WeatherReport};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteoswiss", version, about = "MeteoSwiss weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current conditions and the forecast for a postal code.
    Show {
        /// 4-digit Swiss postal code, e.g. 1201 for Geneva.
        postal_code: Option<u32>,

        /// Request timeout in milliseconds; 0 disables the timeout.
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Print the full report as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Set the default postal code and request timeout.
    Configure,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show {
                postal_code,
                timeout_ms,
                json,
            } => show(postal_code, timeout_ms, json),
            Command::Configure => configure(),
        }
    }
}

fn show(postal_code: Option<u32>, timeout_ms: Option<u64>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let postal_code = config.resolve_postal_code(postal_code)?;

    let timeout = match timeout_ms {
        Some(0) => None,
        Some(ms) => Some(Duration::from_millis(ms)),
        None => config.timeout(),
    };

    let client = MeteoSwissClient::from_config(&config)?;
    let report = client
        .query(postal_code, timeout)
        .with_context(|| format!("Query for postal code {postal_code:04} failed"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(postal_code, &report);
    }

    Ok(())
}

fn print_report(postal_code: u32, report: &WeatherReport) {
    let observed = report
        .current
        .observed_at()
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown time".to_string());

    println!("Weather for {postal_code:04} (observed {observed})");
    println!(
        "  Now: {:.1}°C (icon {})",
        report.current.temperature, report.current.icon
    );

    if report.forecast.is_empty() {
        println!("  No forecast available.");
        return;
    }

    println!("  Forecast:");
    for entry in &report.forecast {
        println!(
            "    {}  {:>5.1}°C .. {:>5.1}°C  precip {:.1} mm ({:.1}-{:.1})",
            entry.day_date,
            entry.temperature_min,
            entry.temperature_max,
            entry.precipitation,
            entry.precipitation_min,
            entry.precipitation_max,
        );
    }

    if !report.graph.precipitation10m.is_empty() {
        let peak = report
            .graph
            .precipitation10m
            .iter()
            .cloned()
            .fold(0.0f32, f32::max);
        println!(
            "  Next hours: {} x 10-minute precipitation samples, peak {peak:.1} mm",
            report.graph.precipitation10m.len()
        );
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let postal_code = inquire::CustomType::<u32>::new("Default postal code:")
        .with_help_message("4-digit Swiss postal code, e.g. 8001 for Zurich")
        .prompt()
        .context("Failed to read postal code")?;

    let timeout_ms = inquire::CustomType::<u64>::new("Request timeout in ms (0 for none):")
        .with_default(config.timeout_ms)
        .prompt()
        .context("Failed to read timeout")?;

    config.default_postal_code = Some(postal_code);
    config.timeout_ms = timeout_ms;
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}
