use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Parser;
use shamba::cli::{Cli, Commands};
use shamba::config::Config;
use shamba::engine::FarmAdvisor;
use shamba::error::{Result, ShambaError};
use shamba::models::{Coordinates, NewFarmer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let advisor = FarmAdvisor::new(&config);

    // One-shot demo session scoped to this invocation; the in-memory
    // stores do not outlive the process.
    advisor
        .register(NewFarmer {
            username: "demo".to_string(),
            password: "demo".to_string(),
            coordinates: Some(Coordinates {
                lat: cli.lat,
                lng: cli.lng,
            }),
            ..Default::default()
        })
        .await?;
    let token = advisor.login("demo", "demo")?;

    match cli.command {
        Commands::Weather => {
            print_json(&advisor.weather(&token, cli.lat, cli.lng).await?)?;
        }
        Commands::Soil => {
            print_json(&advisor.soil(&token, cli.lat, cli.lng).await?)?;
        }
        Commands::Locate => {
            print_json(&advisor.locate(&token, cli.lat, cli.lng).await?)?;
        }
        Commands::Price { crop, county } => {
            print_json(&advisor.market_price(&token, &crop, &county)?)?;
        }
        Commands::Recommend {
            county,
            soil_type,
            rainfall_mm,
            elevation_m,
        } => {
            print_json(&advisor.recommend_crops(
                &token,
                &county,
                &soil_type,
                rainfall_mm,
                elevation_m,
            )?)?;
        }
        Commands::Irrigation { crop, rainfall_mm } => {
            print_json(&advisor.irrigation_schedule(&token, &crop, rainfall_mm)?)?;
        }
        Commands::Disease {
            crop,
            image,
            image_url,
        } => {
            let image_base64 = match image {
                Some(path) => Some(STANDARD.encode(std::fs::read(&path)?)),
                None => None,
            };
            print_json(&advisor.detect_disease(&token, &crop, image_base64, image_url).await?)?;
        }
        Commands::Area { points } => {
            let parsed = points
                .iter()
                .map(|p| parse_point(p))
                .collect::<Result<Vec<_>>>()?;
            print_json(&advisor.farm_area(&token, &parsed)?)?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_point(raw: &str) -> Result<Coordinates> {
    let invalid =
        || ShambaError::InvalidInput(format!("invalid point '{}', expected lat,lng", raw));
    let (lat, lng) = raw.split_once(',').ok_or_else(invalid)?;
    Ok(Coordinates {
        lat: lat.trim().parse().map_err(|_| invalid())?,
        lng: lng.trim().parse().map_err(|_| invalid())?,
    })
}
