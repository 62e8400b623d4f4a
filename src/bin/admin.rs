//! CLI administration tool for short-link.
//!
//! Manages links directly in the database, without going through the HTTP API.
//! All changes go through [`LinkService`], so the same validation and
//! uniqueness rules apply as for API requests.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Create a link with a random or a chosen code
//! cargo run --bin admin -- links create https://example.com/page
//! cargo run --bin admin -- links create https://example.com/page --code mycode1
//!
//! # Show one link
//! cargo run --bin admin -- links show mycode1
//!
//! # Delete a link
//! cargo run --bin admin -- links delete mycode1
//!
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//! - `BASE_URL` (optional): prefix used to print short URLs

use short_link::application::services::LinkService;
use short_link::config::{Config, mask_connection_string};
use short_link::domain::entities::Link;
use short_link::error::AppError;
use short_link::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing short-link.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Create a new link
    Create {
        /// Target URL
        url: String,

        /// Desired code (6-8 alphanumeric characters); random if omitted
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show one link
    Show {
        code: String,
    },

    /// Delete a link permanently
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;
    let base_url = std::env::var("BASE_URL")
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| "http://localhost:3000".to_string());

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool, &base_url).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, base_url: &str) -> Result<()> {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = LinkService::new(repo);

    match action {
        LinkAction::List => list_links(&service, base_url).await?,
        LinkAction::Create { url, code } => create_link(&service, base_url, url, code).await?,
        LinkAction::Show { code } => show_link(&service, base_url, &code).await?,
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await?,
    }

    Ok(())
}

/// Lists all links in a table.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code      Clicks  Last click         Target
///   ──────────────────────────────────────────────────────────────
///   mycode1   3       2025-01-15 10:30   https://example.com/page
/// ```
async fn list_links(service: &LinkService, base_url: &str) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service.list_links().await.map_err(describe)?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<9} {:<7} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Last click".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<9} {:<7} {:<18} {}",
            link.code.cyan(),
            link.total_clicks.to_string().bright_green(),
            format_last_click(link).bright_black(),
            truncate_url(&link.target_url, 50)
        );
    }

    println!();
    println!(
        "  Total: {}   Short URL prefix: {}",
        links.len().to_string().bright_white().bold(),
        base_url.bright_black()
    );
    println!();

    Ok(())
}

/// Creates a link and prints its short URL.
async fn create_link(
    service: &LinkService,
    base_url: &str,
    url: String,
    code: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Link".bright_blue().bold());
    println!();

    let link = service.create_link(url, code).await.map_err(describe)?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    print_link(&link, base_url);

    Ok(())
}

/// Shows one link with its click statistics.
async fn show_link(service: &LinkService, base_url: &str, code: &str) -> Result<()> {
    let link = service.get_link(code).await.map_err(describe)?;

    println!("{}", "📈 Link Statistics".bright_blue().bold());
    println!();
    print_link(&link, base_url);

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &LinkService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    let link = service.get_link(code).await.map_err(describe)?;
    println!("  Code:   {}", link.code.cyan());
    println!("  Target: {}", link.target_url.bright_white());
    println!("  Clicks: {}", link.total_clicks.to_string().bright_green());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link? This cannot be undone")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    if service.delete_link(code).await.map_err(describe)? {
        println!("{}", "✅ Link deleted".green().bold());
    } else {
        println!("{}", "⚠️  Link was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Displays totals over all links.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links_count, clicks_count): (i64, Option<i64>) =
        sqlx::query_as("SELECT COUNT(*), SUM(total_clicks)::BIGINT FROM links")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        clicks_count.unwrap_or(0).to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to migrate")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

fn print_link(link: &Link, base_url: &str) {
    println!("  Code:       {}", link.code.cyan());
    println!(
        "  Short URL:  {}",
        format!("{}/{}", base_url, link.code).bright_yellow()
    );
    println!("  Target:     {}", link.target_url.bright_white());
    println!(
        "  Clicks:     {}",
        link.total_clicks.to_string().bright_green()
    );
    println!("  Last click: {}", format_last_click(link));
    println!(
        "  Created:    {}",
        link.created_at.format("%Y-%m-%d %H:%M")
    );
    println!();
}

fn format_last_click(link: &Link) -> String {
    match link.last_clicked_at {
        Some(t) if link.was_clicked() => t.format("%Y-%m-%d %H:%M").to_string(),
        _ => "Never".to_string(),
    }
}

fn truncate_url(url: &str, max_len: usize) -> String {
    if url.chars().count() <= max_len {
        return url.to_string();
    }

    let head: String = url.chars().take(max_len.saturating_sub(3)).collect();
    format!("{head}...")
}

/// Turns a service error into a CLI-friendly message.
fn describe(err: AppError) -> anyhow::Error {
    let info = err.to_error_info();
    anyhow::anyhow!("{} ({}): {}", info.message, info.code, info.details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_url() {
        assert_eq!(truncate_url("https://a.io", 50), "https://a.io");
        assert_eq!(truncate_url("https://example.com/long", 12), "https://e...");
    }

    #[test]
    fn test_cli_parses_create() {
        let cli = Cli::try_parse_from([
            "admin",
            "links",
            "create",
            "https://example.com",
            "--code",
            "mycode1",
        ])
        .unwrap();

        match cli.command {
            Commands::Links {
                action: LinkAction::Create { url, code },
            } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(code.as_deref(), Some("mycode1"));
            }
            _ => panic!("expected links create"),
        }
    }
}
