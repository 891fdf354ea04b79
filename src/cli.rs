use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shamba", version, about = "Farm advisory engine for Kenyan agriculture")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Latitude of the farm (defaults to Nairobi)
    #[arg(long, default_value_t = -1.2921)]
    pub lat: f64,

    /// Longitude of the farm (defaults to Nairobi)
    #[arg(long, default_value_t = 36.8219)]
    pub lng: f64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Current conditions, 7-day forecast, alerts and farming advice
    Weather,
    /// Soil profile with fertility, texture and crop suitability
    Soil,
    /// County, region and elevation for the coordinate
    Locate,
    /// Market price quote for a crop
    Price {
        crop: String,
        #[arg(long, default_value = "Nairobi")]
        county: String,
    },
    /// Ranked crop recommendations for the given conditions
    Recommend {
        #[arg(long, default_value = "Nairobi")]
        county: String,
        #[arg(long, default_value = "Loam")]
        soil_type: String,
        #[arg(long, default_value_t = 800.0)]
        rainfall_mm: f64,
        #[arg(long, default_value_t = 1700.0)]
        elevation_m: f64,
    },
    /// Weekly irrigation plan for a crop
    Irrigation {
        crop: String,
        /// Expected rainfall this week in millimeters
        #[arg(long, default_value_t = 0.0)]
        rainfall_mm: f64,
    },
    /// Crop disease check from an image file or URL
    Disease {
        crop: String,
        /// Path to a photo of the affected plant
        #[arg(long)]
        image: Option<PathBuf>,
        /// URL of a photo of the affected plant
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Farm area from a boundary of lat,lng corner points
    Area {
        /// Corner points as lat,lng pairs, e.g. -1.29,36.82
        #[arg(required = true, num_args = 3..)]
        points: Vec<String>,
    },
}
