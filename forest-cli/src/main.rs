use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Forest feature database CLI tool
#[derive(Parser)]
#[command(name = "forest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Document database endpoint URI
    #[arg(long, env = "FOREST_DB_URI", hide_env_values = true, global = true)]
    uri: Option<String>,

    /// Document database access key
    #[arg(long, env = "FOREST_DB_KEY", hide_env_values = true, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upsert the item1..item9 sample records
    Seed,

    /// Bulk-insert features from a GeoJSON FeatureCollection file
    Load {
        /// Input file (GeoJSON FeatureCollection)
        input: PathBuf,

        /// Prefix for generated ids when a feature has none
        #[arg(long, default_value = "item")]
        id_prefix: String,
    },

    /// Fetch a single feature by id
    Get {
        /// Feature id (e.g. item5)
        id: String,
    },

    /// List features of a forest type, following pagination
    List {
        /// Forest classification to filter on (e.g. C3A09)
        forest_type: String,

        /// Records fetched per page
        #[arg(long, default_value = "100")]
        page_size: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let store = commands::connect(cli.uri, cli.key).await?;

    match cli.command {
        Commands::Seed => commands::seed::run(&store).await,
        Commands::Load { input, id_prefix } => commands::load::run(&store, &input, &id_prefix).await,
        Commands::Get { id } => commands::get::run(&store, &id).await,
        Commands::List {
            forest_type,
            page_size,
        } => commands::list::run(&store, &forest_type, page_size).await,
    }
}
