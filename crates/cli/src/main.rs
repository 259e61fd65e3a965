use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use votereg_core::{
    API_CONFIG_ENV, ApiConfig, DB_CONFIG_ENV, DEFAULT_API_CONFIG_PATH, DEFAULT_DB_CONFIG_PATH,
    DbConfig, config_path_from_env,
};
use votereg_table::DEFAULT_PAGE_SIZE;

mod commands;

#[derive(Parser)]
#[command(name = "votereg")]
#[command(about = "U.S. voter registration deadlines: seed, serve and view", long_about = None)]
struct Cli {
    /// Database config JSON [env: VOTEREG_DB_CONFIG, default: config/db_config.json]
    #[arg(long, global = true)]
    db_config: Option<PathBuf>,
    /// API host/port config JSON [env: VOTEREG_API_CONFIG, default: config/local_api.json]
    #[arg(long, global = true)]
    api_config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and table, then load the CSV
    Bootstrap {
        /// CSV file to load instead of the configured one
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Drop the database if it exists
    Teardown,
    /// Run the read-only data server
    Serve,
    /// Fetch the data and print it as a table
    View {
        /// Viewport width in pixels; 600 or less shows the mobile columns
        #[arg(long, default_value_t = 1200)]
        width: u32,
        /// Column to sort by
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Zero-indexed page
        #[arg(long, default_value_t = 0)]
        page: usize,
        /// Rows per page (5, 10, 25, 50 or 100)
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
        /// FIELD=VALUE (contains) or FIELD==VALUE (exact)
        #[arg(long)]
        filter: Option<String>,
    },
}

fn load_db_config(path: Option<PathBuf>) -> Result<DbConfig> {
    let path = path.unwrap_or_else(|| config_path_from_env(DB_CONFIG_ENV, DEFAULT_DB_CONFIG_PATH));
    DbConfig::load(&path)
        .with_context(|| format!("failed to load database config from {}", path.display()))
}

fn load_api_config(path: Option<PathBuf>) -> Result<ApiConfig> {
    let path =
        path.unwrap_or_else(|| config_path_from_env(API_CONFIG_ENV, DEFAULT_API_CONFIG_PATH));
    ApiConfig::load(&path)
        .with_context(|| format!("failed to load API config from {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Bootstrap { csv } => {
            let mut config = load_db_config(cli.db_config)?;
            if let Some(csv) = csv {
                config.csv_path = csv;
            }
            commands::bootstrap::run(config).await?;
        },
        Commands::Teardown => {
            commands::teardown::run(load_db_config(cli.db_config)?).await?;
        },
        Commands::Serve => {
            let db = load_db_config(cli.db_config)?;
            let api = load_api_config(cli.api_config)?;
            commands::serve::run(&db, &api).await?;
        },
        Commands::View { width, sort, desc, page, page_size, filter } => {
            let api = load_api_config(cli.api_config)?;
            let options = commands::view::ViewOptions { width, sort, desc, page, page_size, filter };
            commands::view::run(&api, options).await?;
        },
    }

    Ok(())
}
