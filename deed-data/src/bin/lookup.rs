use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use deed_core::PropertyType;
use deed_data::CircleRateSchedule;

/// Look up a published circle rate.
///
/// The CSV file needs the columns `locality,property_type,rate` and an
/// optional `basis` (`per_sq_foot` or `per_sq_meter`).
#[derive(Parser, Debug)]
#[command(name = "circle-rate-lookup")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the circle-rate CSV
    #[arg(short, long)]
    file: PathBuf,

    /// Locality to look up; lists every locality when omitted
    #[arg(short, long)]
    locality: Option<String>,

    /// residential, agriculture, commercial or industrial
    #[arg(short, long, default_value = "residential")]
    property_type: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let schedule = CircleRateSchedule::from_path(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let Some(locality) = args.locality else {
        for name in schedule.localities() {
            println!("{name}");
        }
        return Ok(());
    };

    let Some(property_type) = PropertyType::parse(&args.property_type) else {
        bail!("Unknown property type '{}'", args.property_type);
    };

    match schedule.lookup(&locality, property_type) {
        Some(entry) => {
            println!(
                "{} ({}): {} {:?}",
                entry.locality, entry.property_type, entry.rate, entry.basis
            );
            Ok(())
        }
        None => bail!("No {property_type} rate for '{locality}'"),
    }
}
