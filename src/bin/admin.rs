//! CLI administration tool for shortlink.
//!
//! Manages callers (the holders of API tokens), prints link statistics and
//! checks the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create an administrator and print its token once
//! cargo run --bin admin -- caller create --name ops --admin
//!
//! # List callers
//! cargo run --bin admin -- caller list
//!
//! # Revoke a caller's token, or toggle its account
//! cargo run --bin admin -- caller revoke ops
//! cargo run --bin admin -- caller deactivate 3
//! cargo run --bin admin -- caller activate 3
//!
//! # Link statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! Reads the same environment as the server; `DATABASE_URL` (or its
//! components) and `TOKEN_SIGNING_SECRET` are required.

use shortlink::application::services::hash_token;
use shortlink::config::{Config, mask_connection_string};
use shortlink::domain::entities::{Caller, NewCaller};
use shortlink::domain::repositories::{CallerRepository, LinkRepository};
use shortlink::infrastructure::persistence::{PgCallerRepository, PgLinkRepository};
use shortlink::server::connect_pool;
use shortlink::utils::code_generator::random_alphanumeric;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// Length of issued bearer tokens.
const TOKEN_LEN: usize = 48;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage callers and their API tokens
    Caller {
        #[command(subcommand)]
        action: CallerAction,
    },

    /// Show link statistics
    Stats {
        /// Number of most accessed links to list
        #[arg(short, long, default_value_t = 10)]
        top: usize,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum CallerAction {
    /// Register a caller and issue its token
    Create {
        /// Caller name (e.g., "ops", "marketing-bot")
        #[arg(short, long)]
        name: Option<String>,

        /// Grant administrator rights
        #[arg(long)]
        admin: bool,

        /// Create the account disabled
        #[arg(long)]
        inactive: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all callers
    List,

    /// Revoke a caller's token
    Revoke {
        /// Caller name or ID
        name_or_id: String,
    },

    /// Enable a caller account
    Activate {
        /// Caller name or ID
        name_or_id: String,
    },

    /// Disable a caller account without revoking its token
    Deactivate {
        /// Caller name or ID
        name_or_id: String,
    },
}

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

    let config = shortlink::config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Caller { action } => handle_caller_action(action, &pool, &config).await?,
        Commands::Stats { top } => handle_stats(&pool, top).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
    }

    Ok(())
}

async fn handle_caller_action(action: CallerAction, pool: &PgPool, config: &Config) -> Result<()> {
    let repo = PgCallerRepository::new(Arc::new(pool.clone()));

    match action {
        CallerAction::Create {
            name,
            admin,
            inactive,
            yes,
        } => create_caller(&repo, &config.token_signing_secret, name, admin, !inactive, yes).await,
        CallerAction::List => list_callers(&repo).await,
        CallerAction::Revoke { name_or_id } => revoke_caller(&repo, &name_or_id).await,
        CallerAction::Activate { name_or_id } => set_active(&repo, &name_or_id, true).await,
        CallerAction::Deactivate { name_or_id } => set_active(&repo, &name_or_id, false).await,
    }
}

/// Registers a caller and prints its token.
///
/// Only the HMAC of the token is stored; the raw value is shown once.
async fn create_caller(
    repo: &PgCallerRepository,
    signing_secret: &str,
    name: Option<String>,
    is_admin: bool,
    is_active: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create Caller".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Caller name").interact_text()?,
    };

    if repo.find_by_name(&name).await?.is_some() {
        anyhow::bail!("A caller named '{name}' already exists");
    }

    let token = random_alphanumeric(TOKEN_LEN);

    println!("{}", "Caller details:".bright_white().bold());
    println!("  Name:   {}", name.cyan());
    println!("  Admin:  {}", yes_no(is_admin));
    println!("  Active: {}", yes_no(is_active));
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this caller?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let caller = repo
        .create(NewCaller {
            name,
            token_hash: hash_token(signing_secret, &token),
            is_active,
            is_admin,
        })
        .await
        .context("Failed to create caller")?;

    println!();
    println!(
        "{} (id {})",
        "✅ Caller created".green().bold(),
        caller.id.to_string().bright_black()
    );
    println!();
    println!("  Token: {}", token.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  Save this token now! It cannot be shown again.".red().bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" -d '{{\"url\":\"https://example.com\"}}' \\\n       -H 'Content-Type: application/json' http://localhost:3000/api/links",
        token.bright_yellow()
    );
    println!();

    Ok(())
}

async fn list_callers(repo: &PgCallerRepository) -> Result<()> {
    println!("{}", "📋 Callers".bright_blue().bold());
    println!();

    let callers = repo.list().await.context("Failed to list callers")?;

    if callers.is_empty() {
        println!("{}", "  No callers found".yellow());
        println!();
        println!(
            "  Create one with: {} admin -- caller create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<24} {:<6} {:<18} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Admin".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(68).bright_black());

    for caller in &callers {
        println!(
            "  {:<4} {:<24} {:<6} {:<18} {}",
            caller.id.to_string().bright_black(),
            caller.name.cyan(),
            if caller.is_admin { "yes" } else { "" },
            caller
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status(caller)
        );
    }

    println!();
    println!("  Total: {}", callers.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn revoke_caller(repo: &PgCallerRepository, name_or_id: &str) -> Result<()> {
    println!("{}", "🔒 Revoke Caller Token".bright_blue().bold());
    println!();

    let caller = find_caller(repo, name_or_id).await?;

    if caller.is_revoked() {
        println!("{}", "⚠️  This caller's token is already revoked".yellow());
        return Ok(());
    }

    println!("  Caller: {}", caller.name.cyan());
    println!("  ID:     {}", caller.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke(caller.id)
        .await
        .context("Failed to revoke token")?;

    println!();
    println!("{}", "✅ Token revoked".green().bold());
    println!();

    Ok(())
}

async fn set_active(repo: &PgCallerRepository, name_or_id: &str, active: bool) -> Result<()> {
    let caller = find_caller(repo, name_or_id).await?;

    if caller.is_active == active {
        println!(
            "{} {} is already {}",
            "⚠️ ".yellow(),
            caller.name.cyan(),
            if active { "active" } else { "inactive" }
        );
        return Ok(());
    }

    repo.set_active(caller.id, active)
        .await
        .context("Failed to update caller")?;

    println!(
        "{} {} is now {}",
        "✅".green(),
        caller.name.cyan(),
        if active { "active".green() } else { "inactive".yellow() }
    );

    Ok(())
}

/// Looks a caller up by ID when the input is numeric, otherwise by exact name.
async fn find_caller(repo: &PgCallerRepository, name_or_id: &str) -> Result<Caller> {
    let caller = match name_or_id.parse::<i64>() {
        Ok(id) => repo.find_by_id(id).await?,
        Err(_) => repo.find_by_name(name_or_id).await?,
    };

    caller.with_context(|| format!("Caller '{name_or_id}' not found"))
}

fn status(caller: &Caller) -> ColoredString {
    if caller.is_revoked() {
        "REVOKED".red()
    } else if !caller.is_active {
        "INACTIVE".yellow()
    } else {
        "ACTIVE".green()
    }
}

fn yes_no(flag: bool) -> ColoredString {
    if flag { "yes".green() } else { "no".bright_black() }
}

/// Prints link totals and the most accessed links.
async fn handle_stats(pool: &PgPool, top: usize) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links = PgLinkRepository::new(Arc::new(pool.clone()))
        .list_all()
        .await
        .context("Failed to load links")?;

    let active_callers: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM callers WHERE revoked_at IS NULL AND is_active",
    )
    .fetch_one(pool)
    .await?;

    let total_accesses: i64 = links.iter().map(|l| l.link.access_count).sum();

    println!("  Links:          {}", links.len().to_string().bright_green().bold());
    println!("  Accesses:       {}", total_accesses.to_string().bright_green().bold());
    println!("  Active callers: {}", active_callers.to_string().bright_green().bold());
    println!();

    if links.is_empty() || top == 0 {
        return Ok(());
    }

    let mut ranked = links;
    ranked.sort_by(|a, b| b.link.access_count.cmp(&a.link.access_count));

    println!("{}", "  Most accessed:".bright_white().bold());
    for row in ranked.iter().take(top) {
        println!(
            "  {:<10} {:>8}  {:<12} {}",
            row.link.identifier.cyan(),
            row.link.access_count.to_string().bright_green(),
            row.owner_name.as_deref().unwrap_or("-"),
            row.link.destination.bright_black()
        );
    }
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool, config: &Config) -> Result<()> {
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

            println!("  URL:        {}", mask_connection_string(&config.database_url));
            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
