mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::Pick;

#[derive(Debug, Parser)]
#[command(name = "mattour")]
#[command(about = "Find well-rated restaurants near popular attractions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List well-reviewed attractions in a region
    Attractions {
        /// Region name (e.g., 제주)
        region: String,
        /// Maximum number of attractions to print
        #[arg(long)]
        top: Option<usize>,
    },
    /// Rank restaurants near one attraction in a region
    Restaurants {
        /// Region name (e.g., 제주)
        region: String,
        /// Attraction to search around, by exact name or 1-based list index
        #[arg(long, value_parser = commands::parse_pick)]
        pick: Option<Pick>,
        /// Search radius in meters (clamped to 500-3000)
        #[arg(long, default_value_t = mattour_pipeline::search::DEFAULT_RESTAURANT_RADIUS_M)]
        radius: u32,
        /// Write the ranked table as CSV; without a path, `<attraction>_맛집목록.csv`
        #[arg(long)]
        csv: Option<Option<PathBuf>>,
        /// Write a Kakao map page of the top restaurants to this path
        #[arg(long)]
        map: Option<PathBuf>,
        /// Keep restaurants rated 3.5 or lower
        #[arg(long)]
        no_rating_filter: bool,
    },
    /// Show the newest reviews of a place
    Reviews {
        /// Google place ID
        place_id: String,
        /// Maximum number of reviews to show
        #[arg(long, default_value = "3")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = mattour_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Attractions { region, top }) => {
            commands::run_attractions(&config, &region, top).await?;
        }
        Some(Commands::Restaurants {
            region,
            pick,
            radius,
            csv,
            map,
            no_rating_filter,
        }) => {
            let output = commands::RestaurantOutput { csv, map };
            commands::run_restaurants(
                &config,
                &region,
                pick.as_ref(),
                radius,
                !no_rating_filter,
                &output,
            )
            .await?;
        }
        Some(Commands::Reviews { place_id, limit }) => {
            commands::run_reviews(&config, &place_id, limit).await?;
        }
        None => println!("mattour: try `mattour attractions 제주`"),
    }

    Ok(())
}
