//! Radar Coverage Simulator CLI
//!
//! Computes sensor coverage over the active airports' countries and flies a
//! simulated day of traffic through it.
//!
//! Usage:
//!   radar-sim --airports data/airports.json --countries BE,NL \
//!             --place-sensor MODE_S,50.5,5.0 \
//!             --output radar_report.json --geojson

use anyhow::Result;
use clap::Parser;
use radar_coverage::save_user_sensors;
use radar_sim::{coverage_layer, RunConfig, SensorPlacement};
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "radar-sim", about = "Radar coverage and air traffic simulation over Europe")]
struct Args {
    /// Run configuration JSON; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Airport catalog JSON
    #[arg(short, long)]
    airports: Option<PathBuf>,

    /// Active countries, comma separated ISO codes
    #[arg(long, value_delimiter = ',')]
    countries: Vec<String>,

    /// User sensor file to import
    #[arg(long)]
    user_sensors: Option<PathBuf>,

    /// Place a user sensor, TYPE,LAT,LON (repeatable)
    #[arg(long = "place-sensor")]
    place_sensor: Vec<SensorPlacement>,

    /// Sensor id to switch off (repeatable)
    #[arg(long)]
    disable: Vec<String>,

    /// Write the resulting user sensors to this file
    #[arg(long)]
    export_sensors: Option<PathBuf>,

    /// Lowest altitude band index in the selection
    #[arg(long)]
    alt_min: Option<usize>,

    /// Highest altitude band index in the selection
    #[arg(long)]
    alt_max: Option<usize>,

    /// Simulation start, seconds after midnight
    #[arg(long)]
    start: Option<f64>,

    /// Simulated duration in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Simulation step in seconds
    #[arg(long)]
    step: Option<f64>,

    /// Seed for the flight plan and wind
    #[arg(long)]
    seed: Option<u64>,

    /// Describe the cell containing this latitude (requires --probe-lon)
    #[arg(long, requires = "probe_lon")]
    probe_lat: Option<f64>,

    #[arg(long, requires = "probe_lat")]
    probe_lon: Option<f64>,

    /// Output report JSON
    #[arg(short, long, default_value = "radar_report.json")]
    output: PathBuf,

    /// Also write the coverage layer as GeoJSON next to the report
    #[arg(long)]
    geojson: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<(RunConfig, Output)> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(path) = self.airports {
            config.airports_path = path;
        }
        if !self.countries.is_empty() {
            config.countries = self.countries;
        }
        if self.user_sensors.is_some() {
            config.user_sensors_path = self.user_sensors;
        }
        config.place_sensors.extend(self.place_sensor);
        config.disabled_sensors.extend(self.disable);
        if let Some(v) = self.alt_min {
            config.altitude_min_index = v;
        }
        if let Some(v) = self.alt_max {
            config.altitude_max_index = v;
        }
        if let Some(v) = self.start {
            config.start_time_sec = v;
        }
        if let Some(v) = self.duration {
            config.duration_sec = v;
        }
        if let Some(v) = self.step {
            config.step_sec = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let (Some(lat), Some(lon)) = (self.probe_lat, self.probe_lon) {
            config.probe = Some((lat, lon));
        }

        let output = Output {
            report: self.output,
            geojson: self.geojson,
            export_sensors: self.export_sensors,
        };
        Ok((config, output))
    }
}

struct Output {
    report: PathBuf,
    geojson: bool,
    export_sensors: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "radar_sim=debug,radar_coverage=debug,traffic_sim=debug"
    } else {
        "radar_sim=info,radar_coverage=info,traffic_sim=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("{}", "=".repeat(60));
    info!("Radar Coverage Simulator");
    info!("{}", "=".repeat(60));

    let (config, output) = args.into_config()?;
    let result = radar_sim::run(&config)?;

    let file = File::create(&output.report)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &result.report)?;
    info!("Report written to {:?}", output.report);

    if output.geojson {
        let path = output.report.with_extension("geojson");
        let layer = coverage_layer(&result.grid, &result.coverage);
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &layer)?;
        info!("Coverage layer ({} cells) written to {:?}", layer.features.len(), path);
    }

    if let Some(path) = &output.export_sensors {
        save_user_sensors(path, &result.user_sensors)?;
    }

    let report = &result.report;
    info!("{}", "=".repeat(60));
    info!(
        "Coverage: {} green, {} orange, {} red cells ({:.0}-{:.0} ft)",
        report.coverage.green,
        report.coverage.orange,
        report.coverage.red,
        report.altitude_range_ft.0,
        report.altitude_range_ft.1
    );
    for (country, counts) in &report.country_coverage {
        info!("  {}: {} green, {} orange, {} red", country, counts.green, counts.orange, counts.red);
    }
    info!(
        "Traffic: {} flights, {} landed, {} airborne, {:.1}% of tracked time covered",
        report.fleet.total,
        report.fleet.landed,
        report.fleet.airborne(),
        report.fleet.covered_pct()
    );
    info!("{}", "=".repeat(60));

    Ok(())
}
