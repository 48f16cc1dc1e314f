use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use noor_core::{distance_meters, qibla_bearing, AppConfig, Coordinate, PlaceRecord, KAABA};
use noor_overpass::OverpassClient;
use noor_proximity::{
    PgVerifiedPlaceStore, ProximityMeta, ProximityParams, ProximityService, StaticPlaceStore,
    VerifiedPlaceStore,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "noor-cli")]
#[command(about = "Noor halal places command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations.
    Migrate,
    /// Upsert the curated places file into the database as verified places.
    Seed {
        /// Places file; defaults to `NOOR_PLACES_PATH`.
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Find mosques and halal food near a point and print the result as JSON.
    Nearby {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Search radius in meters (clamped to 500..=20000).
        #[arg(long)]
        radius: Option<f64>,
        /// `MOSQUE` or `HALAL_FOOD`; omit for both.
        #[arg(long = "type")]
        place_type: Option<String>,
    },
    /// Print the qibla bearing and distance to the Kaaba.
    Qibla {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
}

#[derive(Debug, Serialize)]
struct NearbyOutput<'a> {
    data: &'a [PlaceRecord],
    meta: &'a ProximityMeta,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = noor_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Migrate) => run_migrate(&config).await,
        Some(Commands::Seed { path }) => {
            let path = path.unwrap_or_else(|| config.places_path.clone());
            run_seed(&config, &path).await
        }
        Some(Commands::Nearby {
            lat,
            lng,
            radius,
            place_type,
        }) => {
            let params = ProximityParams {
                lat: Some(lat.to_string()),
                lng: Some(lng.to_string()),
                radius: radius.map(|r| r.to_string()),
                place_type,
            };
            run_nearby(&config, &params).await
        }
        Some(Commands::Qibla { lat, lng }) => run_qibla(Coordinate::new(lat, lng)),
        None => {
            println!("noor-cli ready; run with --help for commands");
            Ok(())
        }
    }
}

async fn run_migrate(config: &AppConfig) -> anyhow::Result<()> {
    let pool = noor_db::connect_pool_from_config(config).await?;
    let applied = noor_db::run_migrations(&pool).await?;
    println!("applied {applied} migration(s)");
    Ok(())
}

async fn run_seed(config: &AppConfig, path: &std::path::Path) -> anyhow::Result<()> {
    let file = noor_core::load_places_file(path)
        .with_context(|| format!("loading places from {}", path.display()))?;
    let places = file.verified_places();

    let pool = noor_db::connect_pool_from_config(config).await?;
    let (inserted, updated) = noor_db::seed_places(&pool, &places).await?;
    println!(
        "seeded {} place(s): {inserted} new, {updated} updated",
        places.len()
    );
    Ok(())
}

async fn run_nearby(config: &AppConfig, params: &ProximityParams) -> anyhow::Result<()> {
    let store: Arc<dyn VerifiedPlaceStore> = match config.database_url.as_deref() {
        Some(url) => {
            let pool =
                noor_db::connect_pool_lazy(url, noor_db::PoolConfig::from_app_config(config))?;
            Arc::new(PgVerifiedPlaceStore::new(pool))
        }
        None => Arc::new(StaticPlaceStore::fallback()),
    };
    let overpass = OverpassClient::new(
        &config.overpass_url,
        config.overpass_timeout_secs,
        &config.overpass_user_agent,
        config.overpass_max_elements,
    )?;
    let service = ProximityService::new(
        store,
        Arc::new(overpass),
        Duration::from_secs(config.overpass_timeout_secs),
    );

    let result = service.find_proximities(params).await?;
    let output = NearbyOutput {
        data: &result.data,
        meta: &result.meta,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_qibla(origin: Coordinate) -> anyhow::Result<()> {
    anyhow::ensure!(
        origin.is_valid(),
        "coordinate ({}, {}) is out of range",
        origin.latitude,
        origin.longitude
    );

    println!(
        "qibla bearing: {:.2}° from true north\ndistance to the Kaaba: {:.1} km",
        qibla_bearing(origin),
        distance_meters(origin, KAABA) / 1_000.0
    );
    Ok(())
}
