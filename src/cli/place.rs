//! Place command handler
//!
//! Runs one placement against the live tile and geocoding services.

use crate::cli::init_logging;
use crate::config::Config;
use crate::coord::{Bounds, GeoPoint};
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::land::cache::LandCache;
use crate::land::TileClassifier;
use crate::placement::{PlacementEngine, PlacementReport, PlacementRequest};
use crate::random::get_source;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Place command arguments
#[derive(Args)]
pub struct PlaceArgs {
    /// Southern edge of the viewport
    #[arg(long, allow_hyphen_values = true, requires_all = ["north", "west", "east"])]
    pub south: Option<f64>,

    /// Northern edge of the viewport
    #[arg(long, allow_hyphen_values = true, requires_all = ["south", "west", "east"])]
    pub north: Option<f64>,

    /// Western edge of the viewport (may exceed east to cross the antimeridian)
    #[arg(long, allow_hyphen_values = true, requires_all = ["south", "north", "east"])]
    pub west: Option<f64>,

    /// Eastern edge of the viewport
    #[arg(long, allow_hyphen_values = true, requires_all = ["south", "north", "west"])]
    pub east: Option<f64>,

    /// Number of trees to place
    #[arg(long, short = 'n')]
    pub count: Option<usize>,

    /// Minimum spacing between trees in meters
    #[arg(long, short = 'd')]
    pub min_distance: Option<f64>,

    /// JSON file with already-placed trees to keep clear of
    #[arg(long)]
    pub existing: Option<PathBuf>,

    /// Seed for reproducible sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip tile pixel sampling and classify by reverse geocoding only
    #[arg(long)]
    pub no_pixel_sampling: bool,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

impl PlaceArgs {
    fn bounds(&self) -> Option<Bounds> {
        match (self.south, self.north, self.west, self.east) {
            (Some(south), Some(north), Some(west), Some(east)) => {
                Some(Bounds::new(south, north, west, east))
            }
            _ => None,
        }
    }
}

/// Run the place command
pub async fn run(args: PlaceArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    init_logging("warn");

    let mut config = Config::load()?;
    if args.no_pixel_sampling {
        config.classifier.pixel_sampling = false;
    }

    let format = args.format.clone().unwrap_or(config.placement.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let existing = match &args.existing {
        Some(path) => read_existing(path)?,
        None => Vec::new(),
    };

    let request = PlacementRequest::new(
        args.bounds(),
        args.count.unwrap_or(config.placement.count),
        args.min_distance.unwrap_or(config.placement.min_distance_meters),
    )
    .with_existing(existing);

    let classifier = TileClassifier::from_config(&config.classifier, Arc::new(LandCache::new()))?;
    let rng = get_source(args.seed);
    let engine = PlacementEngine::new(&classifier, rng.as_ref());

    let result = engine.place(&request).await?;
    let report = PlacementReport::new(request, result);

    if report.is_short() {
        eprintln!(
            "Placed only {} of {} trees; not enough open land in the viewport",
            report.result.placed.len(),
            report.request.count
        );
    }

    let output = formatter.format(&report)?;

    if let Some(path) = args.output {
        fs::write(&path, &output)?;
        eprintln!("Output written to {}", path.display());
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Read a JSON array of trees
fn read_existing(path: &Path) -> Result<Vec<GeoPoint>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
