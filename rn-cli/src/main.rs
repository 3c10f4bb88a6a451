use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod output;
mod source;

use rn_core::engine::{filter_events, FilterSpec, PriceRange};
use rn_core::stats::{event_stats, leaderboard, DistanceFilter};
use rn_core::tools::{format_hms, incline_adjusted_speed, kmh_to_pace, pace_per_km, predict_time};
use rn_core::{County, DifficultyLevel, DistanceCategory, SportType, TerrainType};

use config::SiteConfig;

#[derive(Parser)]
#[command(name = "runnorway")]
#[command(about = "Finn løp i hele Norge: søk, filtrer og regn ut")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the optional site config
    #[arg(long, default_value = "runnorway.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, optionally filtered
    Events {
        /// JSON file with an array of events
        #[arg(long)]
        file: Option<PathBuf>,
        /// Fetch events from the hosted backend instead of a file
        #[arg(long)]
        remote: bool,
        /// Free-text search over title and location
        #[arg(long, default_value = "")]
        search: String,
        /// Calendar month, 0-based (0 = January)
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        county: Option<County>,
        /// Distance category; repeatable
        #[arg(long = "distance")]
        distances: Vec<DistanceCategory>,
        /// Terrain type; repeatable
        #[arg(long = "terrain")]
        terrains: Vec<TerrainType>,
        /// Difficulty level; repeatable
        #[arg(long = "difficulty")]
        difficulties: Vec<DifficultyLevel>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        /// Only events with registration open (or closed with =false)
        #[arg(long)]
        registration_open: Option<bool>,
        #[arg(long)]
        sport: Option<SportType>,
    },
    /// Average pace for a distance and finish time
    Pace {
        #[arg(long)]
        distance_km: f64,
        /// Finish time as H:MM:SS or MM:SS
        #[arg(long)]
        time: String,
    },
    /// Predict a finish time for another distance (Riegel)
    Predict {
        #[arg(long)]
        distance_km: f64,
        /// Known finish time as H:MM:SS or MM:SS
        #[arg(long)]
        time: String,
        #[arg(long)]
        target_km: f64,
    },
    /// Convert treadmill speed to pace, with optional incline adjustment
    Treadmill {
        #[arg(long)]
        speed_kmh: f64,
        /// Incline in percent
        #[arg(long, default_value_t = 0.0)]
        incline: f64,
    },
    /// Event statistics and the season leaderboard
    Stats {
        /// JSON file with an array of events
        #[arg(long)]
        file: Option<PathBuf>,
        /// Fetch from the hosted backend instead of a file
        #[arg(long)]
        remote: bool,
        #[arg(long)]
        year: Option<i32>,
        /// Leaderboard distance tab: all, 5k, 10k, half, marathon
        #[arg(long, default_value = "all")]
        distance: DistanceFilter,
    },
}

/// "H:MM:SS" or "MM:SS" to whole seconds.
fn parse_time(raw: &str) -> anyhow::Result<u32> {
    let parts: Vec<&str> = raw.split(':').collect();
    let numbers: Vec<u32> = parts
        .iter()
        .map(|p| {
            p.parse()
                .with_context(|| format!("bad time component {p:?}"))
        })
        .collect::<anyhow::Result<_>>()?;
    match numbers.as_slice() {
        [m, s] => Ok(m * 60 + s),
        [h, m, s] => Ok(h * 3600 + m * 60 + s),
        _ => bail!("expected H:MM:SS or MM:SS, got {raw:?}"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let site = SiteConfig::load(&cli.config)?;

    match cli.command {
        Commands::Events {
            file,
            remote,
            search,
            month,
            county,
            distances,
            terrains,
            difficulties,
            min_price,
            max_price,
            registration_open,
            sport,
        } => {
            if let Some(month) = month {
                if month > 11 {
                    bail!("--month is 0-based: 0 = January, 11 = December");
                }
            }

            let storage = source::open_storage(file.as_deref(), remote)?;
            let events = storage.get_all_events().await?;

            let spec = FilterSpec {
                search,
                month,
                county,
                distance_categories: distances.into_iter().collect(),
                terrain_types: terrains.into_iter().collect(),
                difficulty_levels: difficulties.into_iter().collect(),
                price_range: PriceRange {
                    min: min_price.unwrap_or(0.0),
                    max: max_price.unwrap_or(site.max_price),
                },
                registration_open,
                sport_type: sport,
            };
            info!("Applying {} active filters", spec.active_filter_count());

            let filtered = filter_events(&events, &spec);
            output::print_events(&filtered, events.len(), Utc::now());
        }
        Commands::Pace { distance_km, time } => {
            let seconds = parse_time(&time)?;
            match pace_per_km(distance_km, seconds) {
                Some(pace) => println!("{pace}"),
                None => bail!("distance and time must both be positive"),
            }
        }
        Commands::Predict {
            distance_km,
            time,
            target_km,
        } => {
            let seconds = parse_time(&time)?;
            match predict_time(distance_km, f64::from(seconds), target_km) {
                Some(predicted) => {
                    println!(
                        "Estimert tid for {:.1} km: {}",
                        target_km,
                        format_hms(predicted)
                    );
                }
                None => bail!("distances and time must all be positive"),
            }
        }
        Commands::Treadmill { speed_kmh, incline } => {
            let adjusted = incline_adjusted_speed(speed_kmh, incline);
            match (kmh_to_pace(speed_kmh), kmh_to_pace(adjusted)) {
                (Some(flat), Some(equivalent)) => {
                    println!("Mølle: {flat}");
                    if incline != 0.0 {
                        println!("Tilsvarer flatt: {equivalent} ({adjusted:.1} km/t)");
                    }
                }
                _ => bail!("speed must be positive"),
            }
        }
        Commands::Stats {
            file,
            remote,
            year,
            distance,
        } => {
            let storage = source::open_storage(file.as_deref(), remote)?;
            let events = storage.get_all_events().await?;
            let participants = storage.count_registrations().await?;

            output::print_event_stats(&event_stats(&events, participants, Utc::now()));

            let year = year.unwrap_or_else(|| {
                use chrono::Datelike;
                Utc::now().year()
            });
            let rows = storage.get_runner_statistics(year).await?;
            if !rows.is_empty() {
                println!();
                let top = leaderboard(&rows, year, distance, site.leaderboard_size);
                output::print_leaderboard(&top, year);
            }
        }
    }

    Ok(())
}
