mod import;
mod verify_images;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "meepledb-cli")]
#[command(about = "meepledb command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import a catalog page URL into the database.
    Import(import::ImportArgs),
    /// HEAD-check every stored image URL and log failures.
    VerifyImages {
        /// Number of concurrent checks.
        #[arg(long, default_value_t = 8)]
        concurrency: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Import(args) => import::run_import_command(&args).await,
        Commands::VerifyImages { concurrency } => {
            let pool = meepledb_db::connect_pool_from_env().await?;
            verify_images::run_verify_images(&pool, concurrency).await
        }
    }
}
