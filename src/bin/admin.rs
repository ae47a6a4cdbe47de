//! CLI administration tool for stellar-link.
//!
//! Provides moderation commands and database checks without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the moderation queue
//! cargo run --bin admin -- reports list --limit 20
//!
//! # Block a link
//! cargo run --bin admin -- status set AbC12 blocked
//!
//! # Inspect a link
//! cargo run --bin admin -- links show AbC12
//!
//! # Print the admin Bearer token
//! cargo run --bin admin -- token
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components: PostgreSQL connection
//! - `ADMIN_USER`, `ADMIN_SESSION_SECRET`: only for `token`

use stellar_link::application::services::{AdminCredentials, AuthService, ModerationService};
use stellar_link::config::Config;
use stellar_link::domain::entities::{Link, ModerationStatus};
use stellar_link::domain::events::EventBus;
use stellar_link::domain::repositories::LinkRepository;
use stellar_link::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing stellar-link.
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
    /// Moderation queue
    Reports {
        #[command(subcommand)]
        action: ReportsAction,
    },

    /// Moderation status
    Status {
        #[command(subcommand)]
        action: StatusAction,
    },

    /// Inspect links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Print the admin session token for `Authorization: Bearer`
    Token,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum ReportsAction {
    /// List reported links, most recently reported first
    List {
        /// Maximum number of links (1 to 100)
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },
}

#[derive(Subcommand)]
enum StatusAction {
    /// Set the moderation status of a link
    Set {
        slug: String,

        /// pending, approved or blocked
        status: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum LinksAction {
    /// Show a link with its reports
    Show { slug: String },
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

    match cli.command {
        Commands::Reports {
            action: ReportsAction::List { limit },
        } => list_reports(repository().await?, limit).await?,
        Commands::Status {
            action: StatusAction::Set { slug, status, yes },
        } => set_status(repository().await?, &slug, &status, yes).await?,
        Commands::Links {
            action: LinksAction::Show { slug },
        } => show_link(repository().await?, &slug).await?,
        Commands::Token => print_session_token()?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = Config::load_database_url()?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

async fn repository() -> Result<Arc<PgLinkRepository>> {
    let pool = connect().await?;
    Ok(Arc::new(PgLinkRepository::new(Arc::new(pool))))
}

fn colored_status(status: Option<ModerationStatus>) -> ColoredString {
    match status {
        None => "-".bright_black(),
        Some(ModerationStatus::Pending) => "PENDING".yellow(),
        Some(ModerationStatus::Approved) => "APPROVED".green(),
        Some(ModerationStatus::Blocked) => "BLOCKED".red(),
    }
}

/// Lists the moderation queue.
///
/// # Output Format
///
/// ```text
/// 🚩 Reported Links
///
///   Slug     Status     Reports  Last report        URL
///   ──────────────────────────────────────────────────────────────────────────
///   AbC12    PENDING    2        2025-06-01 10:30   https://example.com/page
/// ```
async fn list_reports(repo: Arc<PgLinkRepository>, limit: i64) -> Result<()> {
    println!("{}", "🚩 Reported Links".bright_blue().bold());
    println!();

    let service = ModerationService::new(repo, EventBus::default());
    let links = service
        .list_reported(Some(limit))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list reports: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No reported links".green());
        return Ok(());
    }

    println!(
        "  {:<8} {:<10} {:<8} {:<18} {}",
        "Slug".bright_white().bold(),
        "Status".bright_white().bold(),
        "Reports".bright_white().bold(),
        "Last report".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        let last = link
            .last_reported_at()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<8} {:<10} {:<8} {:<18} {}",
            link.slug.cyan(),
            colored_status(link.status),
            link.reports.len(),
            last.bright_black(),
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Changes a link's status. Blocking asks for confirmation unless `--yes`.
async fn set_status(
    repo: Arc<PgLinkRepository>,
    slug: &str,
    status: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🛡️  Set Moderation Status".bright_blue().bold());
    println!();

    let blocking = status.eq_ignore_ascii_case("blocked");
    if blocking && !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Block /{slug}? Visitors will be refused."))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = ModerationService::new(repo, EventBus::default());
    let change = service
        .set_status(slug, &status.to_ascii_lowercase(), true)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if change.changed {
        println!("{}", format!("✅ {}", change.message).green().bold());
    } else {
        println!("{}", format!("ℹ️  {}", change.message).yellow());
    }
    println!();

    Ok(())
}

/// Prints a link and its report history. The PIN itself is never shown.
async fn show_link(repo: Arc<PgLinkRepository>, slug: &str) -> Result<()> {
    let link: Link = repo
        .find_by_slug(slug)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Link /{slug} not found"))?;

    println!("{}", format!("🔗 /{}", link.slug).bright_blue().bold());
    println!();
    println!("  URL:      {}", link.original_url.bright_white());
    println!(
        "  Created:  {}",
        link.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    println!("  Status:   {}", colored_status(link.status));
    println!("  Clicks:   {}", link.click_count.to_string().bright_green());
    println!("  PIN:      {}", if link.has_pin() { "yes" } else { "no" });
    println!();

    if link.reports.is_empty() {
        println!("{}", "  No reports".bright_black());
    } else {
        println!("  {}", "Reports:".bright_white().bold());
        for report in &link.reports {
            println!(
                "    {}  {}",
                report
                    .reported_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black(),
                report.reason.as_deref().unwrap_or("(no reason)")
            );
        }
    }
    println!();

    Ok(())
}

/// Prints the token the server accepts as `Authorization: Bearer`.
fn print_session_token() -> Result<()> {
    let user = std::env::var("ADMIN_USER").context("ADMIN_USER must be set")?;
    let secret =
        std::env::var("ADMIN_SESSION_SECRET").context("ADMIN_SESSION_SECRET must be set")?;

    let auth = AuthService::new(
        Some(AdminCredentials {
            user,
            password: String::new(),
        }),
        secret,
    );
    let token = auth
        .session_token()
        .context("Admin credentials are not configured")?;

    println!("{}", "🔑 Admin Session Token".bright_blue().bold());
    println!();
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token.bright_yellow()
    );
    println!();
    println!(
        "{}",
        "⚠️  Anyone holding this token can moderate links. Rotate ADMIN_SESSION_SECRET to revoke it."
            .red()
            .bold()
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
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let (links, reports): (i64, i64) = sqlx::query_as(
                "SELECT (SELECT COUNT(*) FROM links), (SELECT COUNT(*) FROM link_reports)",
            )
            .fetch_one(pool)
            .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Links:      {}", links.to_string().bright_green().bold());
            println!("  Reports:    {}", reports.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
