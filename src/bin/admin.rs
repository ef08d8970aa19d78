//! CLI administration tool for url-shortener-api.
//!
//! Inspects and manages stored short URLs directly in PostgreSQL, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List stored URLs
//! cargo run --bin admin -- list --skip 0 --limit 20
//!
//! # Show one record
//! cargo run --bin admin -- stats my-link
//!
//! # Disable / re-enable a short code
//! cargo run --bin admin -- deactivate my-link
//! cargo run --bin admin -- activate my-link
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` (required)
//! - `BASE_URL`: prefix used to print short URLs (default: `http://localhost:8000`)

use url_shortener_api::config::Config;
use url_shortener_api::domain::entities::UrlRecord;
use url_shortener_api::domain::repositories::{MAX_LIST_LIMIT, UrlRepository};
use url_shortener_api::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-shortener-api.
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
    /// List stored URLs in creation order
    List {
        /// Records to skip
        #[arg(long, default_value_t = 0)]
        skip: i64,

        /// Page size (max 100)
        #[arg(long, default_value_t = MAX_LIST_LIMIT)]
        limit: i64,
    },

    /// Show the full record for a short code
    Stats {
        /// Short code
        code: String,
    },

    /// Re-enable a short code
    Activate {
        /// Short code
        code: String,
    },

    /// Disable a short code so it no longer resolves
    Deactivate {
        /// Short code
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

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

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?
        .context("DATABASE_URL or DB_HOST/DB_USER must be set")?;
    let base_url = std::env::var("BASE_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_string())
        .trim_end_matches('/')
        .to_string();

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    match cli.command {
        Commands::List { skip, limit } => list_urls(&repo, skip, limit).await?,
        Commands::Stats { code } => show_stats(&repo, &code, &base_url).await?,
        Commands::Activate { code } => set_active(&repo, &code, true, true).await?,
        Commands::Deactivate { code, yes } => set_active(&repo, &code, false, yes).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &repo).await?,
    }

    Ok(())
}

/// Prints one page of stored URLs.
///
/// # Output Format
///
/// ```text
/// 📋 Short URLs
///
///   ID    Code                 Hits     Status     Target
///   ──────────────────────────────────────────────────────────────
///   1     aZ3k9Q               12       ACTIVE     https://example.com
///   2     my-link              0        EXPIRED    https://rust-lang.org
/// ```
async fn list_urls(repo: &PgUrlRepository, skip: i64, limit: i64) -> Result<()> {
    println!("{}", "📋 Short URLs".bright_blue().bold());
    println!();

    let records = repo
        .list(skip, limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list URLs: {}", e))?;
    let total = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count URLs: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No URLs found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<20} {:<8} {:<10} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Hits".bright_white().bold(),
        "Status".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for record in &records {
        println!(
            "  {:<5} {:<20} {:<8} {:<10} {}",
            record.id.to_string().bright_black(),
            record.short_code.cyan(),
            record.access_count,
            status_label(record),
            record.original_url
        );
    }

    println!();
    println!(
        "  Showing {} of {}",
        records.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Prints every stored field of one record.
async fn show_stats(repo: &PgUrlRepository, code: &str, base_url: &str) -> Result<()> {
    let record = repo
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Short code '{code}' not found"))?;

    println!("{}", "📊 URL Statistics".bright_blue().bold());
    println!();
    println!("  Code:       {}", record.short_code.cyan());
    println!("  Short URL:  {}", record.short_url(base_url).bright_white());
    println!("  Target:     {}", record.original_url);
    println!("  Status:     {}", status_label(&record));
    println!(
        "  Hits:       {}",
        record.access_count.to_string().bright_green().bold()
    );
    println!(
        "  Created:    {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    match record.expires_at {
        Some(at) => println!("  Expires:    {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("  Expires:    {}", "never".bright_black()),
    }
    if let Some(creator) = &record.created_by {
        println!("  Created by: {}", creator);
    }
    println!();

    Ok(())
}

/// Toggles the active flag, asking before a deactivation unless `skip_confirm`.
async fn set_active(
    repo: &PgUrlRepository,
    code: &str,
    is_active: bool,
    skip_confirm: bool,
) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Deactivate '{code}'? It will stop resolving."))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let record = repo
        .set_active(code, is_active)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update URL: {}", e))?
        .with_context(|| format!("Short code '{code}' not found"))?;

    let verb = if record.is_active {
        "activated"
    } else {
        "deactivated"
    };
    println!(
        "{} {}",
        "✅".green(),
        format!("'{}' {}", record.short_code, verb).green().bold()
    );

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, repo: &PgUrlRepository) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let total = repo
                .count()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count URLs: {}", e))?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Stored URLs: {}", total.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}

fn status_label(record: &UrlRecord) -> ColoredString {
    if !record.is_active {
        "INACTIVE".red()
    } else if record.is_expired_at(Utc::now()) {
        "EXPIRED".yellow()
    } else {
        "ACTIVE".green()
    }
}
