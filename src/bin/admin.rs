//! CLI administration tool for shortly.
//!
//! Creates, inspects and deletes short URLs and runs database diagnostics
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # Show metadata for a short key
//! cargo run --bin admin -- info aZ3k9Qx
//!
//! # Delete a short key (asks for confirmation unless -y)
//! cargo run --bin admin -- delete aZ3k9Qx
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see [`shortly::config`]): `DATABASE_URL` and `BASE_URL`
//! are required, `REDIS_URL` makes `delete` invalidate the cached entry too.

use shortly::application::services::ShortUrlService;
use shortly::config::{self, Config};
use shortly::domain::repositories::ShortUrlRepository;
use shortly::infrastructure::persistence::PgShortUrlRepository;
use shortly::server::{connect_cache, connect_database};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

/// CLI tool for managing shortly.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Shorten {
        /// Absolute http/https URL
        url: String,
    },

    /// Show metadata for a short key
    Info {
        short_key: String,
    },

    /// Delete a short key
    Delete {
        short_key: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

type Service = ShortUrlService<dyn ShortUrlRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let pool = connect_database(&config).await?;

    match cli.command {
        Commands::Shorten { url } => {
            let (service, _hits) = build_service(&config, &pool).await;
            shorten(&service, &url).await?
        }
        Commands::Info { short_key } => {
            let (service, _hits) = build_service(&config, &pool).await;
            info(&service, &short_key).await?
        }
        Commands::Delete { short_key, yes } => {
            let (service, _hits) = build_service(&config, &pool).await;
            delete(&service, &short_key, yes).await?
        }
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Builds the same service the server uses. The CLI never resolves keys, so the
/// hit receiver is only kept alive, never read.
async fn build_service(
    config: &Config,
    pool: &PgPool,
) -> (Service, mpsc::Receiver<shortly::domain::hit_event::HitEvent>) {
    let repository: Arc<dyn ShortUrlRepository> =
        Arc::new(PgShortUrlRepository::new(Arc::new(pool.clone())));
    let cache = connect_cache(config).await;
    let (hit_tx, hit_rx) = mpsc::channel(1);

    (
        ShortUrlService::new(repository, cache, hit_tx, config.base_url.clone()),
        hit_rx,
    )
}

async fn shorten(service: &Service, url: &str) -> Result<()> {
    let handle = service
        .create_short_url(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", "Short URL created".green().bold());
    println!();
    println!("  Key: {}", handle.short_key.cyan());
    println!("  URL: {}", handle.short_url.bright_white().bold());
    println!();

    Ok(())
}

async fn info(service: &Service, short_key: &str) -> Result<()> {
    let metadata = service
        .get_metadata(short_key)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "Short URL".bright_blue().bold());
    println!();
    println!("  Key:      {}", metadata.short_key.cyan());
    println!("  Target:   {}", metadata.original_url);
    println!(
        "  Hits:     {}",
        metadata.hits.to_string().bright_green().bold()
    );
    println!(
        "  Created:  {}",
        metadata
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!(
        "  Updated:  {}",
        metadata
            .updated_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

async fn delete(service: &Service, short_key: &str, yes: bool) -> Result<()> {
    let metadata = service
        .get_metadata(short_key)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Key:    {}", metadata.short_key.cyan());
    println!("  Target: {}", metadata.original_url);
    println!("  Hits:   {}", metadata.hits);
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_url(short_key)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete short URL: {}", e))?;

    println!("{}", "Short URL deleted".green().bold());
    println!();

    Ok(())
}

/// Displays record and hit totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let (urls_count, hits_total): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(hits), 0)::BIGINT FROM short_urls")
            .fetch_one(pool)
            .await?;

    let top: Vec<(String, i64)> =
        sqlx::query_as("SELECT short_key, hits FROM short_urls ORDER BY hits DESC, id LIMIT 5")
            .fetch_all(pool)
            .await?;

    println!(
        "  Short URLs: {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Hits:       {}",
        hits_total.to_string().bright_green().bold()
    );

    if !top.is_empty() {
        println!();
        println!("  {}", "Most visited".bold());
        for (short_key, hits) in top {
            println!("    {:<10} {}", short_key.cyan(), hits);
        }
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let migrations: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(pool)
            .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations);
            println!();
        }
    }

    Ok(())
}
