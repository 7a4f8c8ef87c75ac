//! CLI administration tool for ad-studio.
//!
//! Checks connectivity to the database and the AI provider and inspects
//! stored client profiles without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Send a tiny completion to the configured AI provider
//! cargo run --bin admin -- ai check
//!
//! # List active clients (add --all to include inactive ones)
//! cargo run --bin admin -- clients list
//!
//! # Show one client with its services
//! cargo run --bin admin -- clients show client-123
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`ad_studio::config`].

use ad_studio::config::{self, Config};
use ad_studio::domain::completion::CompletionClient;
use ad_studio::domain::entities::Client;
use ad_studio::domain::repositories::ClientRepository;
use ad_studio::infrastructure::ai::OpenAiClient;
use ad_studio::infrastructure::persistence::PgClientRepository;
use ad_studio::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing ad-studio.
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
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// AI provider operations
    Ai {
        #[command(subcommand)]
        action: AiAction,
    },

    /// Inspect stored clients
    Clients {
        #[command(subcommand)]
        action: ClientsAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

/// AI provider subcommands.
#[derive(Subcommand)]
enum AiAction {
    /// Send a minimal JSON completion to verify the key and endpoint
    Check,
}

/// Client inspection subcommands.
#[derive(Subcommand)]
enum ClientsAction {
    /// List clients
    List {
        /// Include inactive clients
        #[arg(short, long)]
        all: bool,
    },

    /// Show a client and its services
    Show {
        /// Client id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &config).await?,
        Commands::Ai { action } => handle_ai_action(action, &config).await?,
        Commands::Clients { action } => handle_clients_action(action, &config).await?,
    }

    Ok(())
}

async fn client_repository(config: &Config) -> Result<PgClientRepository> {
    let pool = connect_pool(config).await?;
    Ok(PgClientRepository::new(Arc::new(pool)))
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let repo = client_repository(config).await?;
            if !repo.health_check().await {
                anyhow::bail!("Database did not answer SELECT 1");
            }

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

/// Handles AI provider diagnostic commands.
async fn handle_ai_action(action: AiAction, config: &Config) -> Result<()> {
    match action {
        AiAction::Check => {
            println!(
                "{} {} ({})",
                "🔍 Checking AI provider".bright_blue(),
                config.openai_base_url.bright_white(),
                config.openai_model.cyan()
            );

            let client = OpenAiClient::new(config.openai())?;
            if !client.is_configured() {
                println!("{}", "⚠️  OPENAI_API_KEY is not set".yellow());
                anyhow::bail!("AI provider is not configured");
            }

            client
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("AI provider check failed: {e}"))?;

            println!("{}", "✅ AI provider connection OK".green().bold());
        }
    }

    Ok(())
}

/// Dispatches client inspection commands.
async fn handle_clients_action(action: ClientsAction, config: &Config) -> Result<()> {
    let repo = client_repository(config).await?;

    match action {
        ClientsAction::List { all } => list_clients(&repo, all).await?,
        ClientsAction::Show { id } => show_client(&repo, &id).await?,
    }

    Ok(())
}

/// Lists clients with their service counts.
///
/// # Output Format
///
/// ```text
/// 📋 Clients
///
///   ID                   Business                       City            Services Status
///   ─────────────────────────────────────────────────────────────────────────────────────
///   client-1             Acme Plumbing                  Denver          2        ACTIVE
/// ```
async fn list_clients(repo: &PgClientRepository, include_inactive: bool) -> Result<()> {
    println!("{}", "📋 Clients".bright_blue().bold());
    println!();

    let clients = repo
        .list(!include_inactive)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list clients: {e}"))?;

    if clients.is_empty() {
        println!("{}", "  No clients found".yellow());
        return Ok(());
    }

    println!(
        "  {:<20} {:<30} {:<15} {:<8} {:<8}",
        "ID".bright_white().bold(),
        "Business".bright_white().bold(),
        "City".bright_white().bold(),
        "Services".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(85).bright_black());

    for client in &clients {
        println!(
            "  {:<20} {:<30} {:<15} {:<8} {}",
            client.id.bright_black(),
            client.business_name.cyan(),
            client.city.as_deref().unwrap_or("-"),
            client.services.len(),
            status_label(client)
        );
    }

    println!();
    println!(
        "  Total: {}",
        clients.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Shows one client's profile and services.
async fn show_client(repo: &PgClientRepository, id: &str) -> Result<()> {
    let client = repo
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {e}"))?
        .context("Client not found")?;

    println!("{}", client.business_name.bright_blue().bold());
    println!();
    println!("  ID:       {}", client.id.bright_black());
    println!("  Status:   {}", status_label(&client));
    println!("  Industry: {}", client.industry.as_deref().unwrap_or("-"));
    println!("  City:     {}", client.city.as_deref().unwrap_or("-"));
    println!("  Website:  {}", client.website.as_deref().unwrap_or("-"));
    println!("  Email:    {}", client.contact_email.as_deref().unwrap_or("-"));
    println!(
        "  Updated:  {}",
        client
            .updated_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );

    if let Some(description) = &client.description {
        println!();
        println!("  {}", description);
    }

    println!();
    println!("{}", "  Services:".bright_white().bold());
    if client.services.is_empty() {
        println!("{}", "    none".yellow());
    }
    for service in &client.services {
        println!(
            "    {} {} [{}]",
            service.id.bright_black(),
            service.name.cyan(),
            service.category
        );
        println!("      {}", service.description);
        if let Some(url) = &service.url {
            println!("      {}", url.bright_black());
        }
    }
    println!();

    Ok(())
}

fn status_label(client: &Client) -> ColoredString {
    if client.is_active {
        "ACTIVE".green()
    } else {
        "INACTIVE".red()
    }
}
