//! Catalog refresh jobs.
//!
//! Usage:
//!   guardian-worker definitions       - Upsert armor definitions from the manifest
//!   guardian-worker modifiers         - Upsert the armor mod and fragment catalog
//!   guardian-worker manifest-tables   - Replace stored definition tables on a new version
//!   guardian-worker all               - Run all three in order

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use guardian_armory::manifest::{ManifestJobs, RefreshOutcome};
use guardian_bungie::{BungieClient, BungieConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "guardian-worker")]
#[command(about = "Destiny 2 catalog refresh jobs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upsert armor definitions
    Definitions,

    /// Upsert armor mods and subclass fragments
    Modifiers,

    /// Replace the stored manifest definition tables
    ManifestTables,

    /// Run every job
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guardian_worker=debug,guardian_armory=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = guardian_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    guardian_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let bungie = BungieClient::new(BungieConfig::from_env()).context("Failed to build Bungie client")?;
    let jobs = ManifestJobs::new(pool, bungie);

    match cli.command {
        Commands::Definitions => definitions(&jobs).await?,
        Commands::Modifiers => modifiers(&jobs).await?,
        Commands::ManifestTables => manifest_tables(&jobs).await?,
        Commands::All => {
            definitions(&jobs).await?;
            modifiers(&jobs).await?;
            manifest_tables(&jobs).await?;
        }
    }

    Ok(())
}

async fn definitions(jobs: &ManifestJobs) -> Result<()> {
    let written = jobs
        .refresh_armor_definitions()
        .await
        .context("Armor definition refresh failed")?;
    println!("Armor definitions: {written} upserted");
    Ok(())
}

async fn modifiers(jobs: &ManifestJobs) -> Result<()> {
    let written = jobs
        .populate_armor_modifiers()
        .await
        .context("Armor modifier population failed")?;
    println!("Armor modifiers: {written} upserted");
    Ok(())
}

async fn manifest_tables(jobs: &ManifestJobs) -> Result<()> {
    match jobs
        .refresh_definition_tables()
        .await
        .context("Definition table refresh failed")?
    {
        RefreshOutcome::UpToDate { version } => {
            println!("Definition tables already at {version}");
        }
        RefreshOutcome::Updated { version, tables } => {
            println!("Definition tables updated to {version} ({tables} tables)");
        }
    }
    Ok(())
}
