//! Command-line probe for broadcast-metadata.
//!
//! Runs the same configuration, parser and aggregation as the HTTP service,
//! without starting a server.
//!
//! # Usage
//!
//! ```bash
//! # List configured sources
//! cargo run --bin probe -- sources
//!
//! # Try the title parser on a metadata string
//! cargo run --bin probe -- parse 'title="Piano Sonata No. 14-Ludwig van Beethoven"'
//!
//! # Fetch the last hour for one station
//! cargo run --bin probe -- fetch --source wqxr
//!
//! # Fetch an explicit window for every station
//! cargo run --bin probe -- fetch --start 1700000000 --stop 1700003600
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `broadcast_metadata::config`); `WQXR_API_KEY` is
//! required for `fetch`.

use broadcast_metadata::api::dto::metadata::MetadataResponse;
use broadcast_metadata::config;
use broadcast_metadata::domain::{SourceResult, TimeRange, parser};
use broadcast_metadata::server::build_state;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for probing upstream metadata.
#[derive(Parser)]
#[command(name = "probe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// List configured sources
    Sources,

    /// Parse a raw metadata string
    Parse {
        /// Raw metadata text, e.g. 'title="Bolero-Maurice Ravel"'
        text: String,

        /// Print the parsed record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch and aggregate metadata once
    Fetch {
        /// Window start in epoch seconds (default: one hour ago)
        #[arg(long)]
        start: Option<String>,

        /// Window stop in epoch seconds (default: now)
        #[arg(long)]
        stop: Option<String>,

        /// Source id; repeat for several (default: all configured)
        #[arg(short, long = "source")]
        sources: Vec<String>,

        /// Print the full JSON response instead of a summary
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sources => list_sources()?,
        Commands::Parse { text, json } => parse_text(&text, json)?,
        Commands::Fetch {
            start,
            stop,
            sources,
            json,
        } => fetch(start, stop, sources, json).await?,
    }

    Ok(())
}

/// Prints the source catalog in order.
fn list_sources() -> Result<()> {
    let config = config::load_from_env()?;

    println!("{}", "📻 Configured sources".bright_blue().bold());
    println!();
    for source in config.sources.sources() {
        println!("  {:<16} {}", source.id.bright_white(), source.display_name);
    }

    Ok(())
}

/// Runs the title parser on one string.
fn parse_text(text: &str, json: bool) -> Result<()> {
    let parsed = parser::parse(Some(text));

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    println!("{} {}", "Title:   ".bright_blue(), parsed.title);
    match parsed.composer {
        Some(composer) => println!("{} {}", "Composer:".bright_blue(), composer.green()),
        None => println!("{} {}", "Composer:".bright_blue(), "(none)".dimmed()),
    }

    Ok(())
}

/// Runs one aggregation with the server's configuration.
async fn fetch(
    start: Option<String>,
    stop: Option<String>,
    source_ids: Vec<String>,
    json: bool,
) -> Result<()> {
    let config = config::load_from_env()?;
    let state = build_state(&config)?;

    let range = TimeRange::resolve(start.as_deref(), stop.as_deref(), Utc::now().timestamp())?;
    let sources = state
        .catalog
        .select((!source_ids.is_empty()).then_some(source_ids.as_slice()))?;

    let aggregate = state
        .metadata_service
        .aggregate(range, &sources)
        .await
        .context("Metadata request failed")?;

    if json {
        let response = MetadataResponse::from(aggregate);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!(
        "{} {} → {} ({} h)",
        "🎵 Window".bright_blue().bold(),
        range.start(),
        range.stop(),
        range.duration_hours()
    );
    println!();

    for (source, result) in &aggregate.sources {
        match result {
            SourceResult::Success { entries } => {
                println!(
                    "{} {} ({} entries)",
                    "✓".green(),
                    source.display_name.bold(),
                    entries.len()
                );
                for entry in entries {
                    let composer = entry.parsed.composer.as_deref().unwrap_or("-");
                    println!("    {} - {}", entry.parsed.title, composer.dimmed());
                }
            }
            SourceResult::Failure { reason } => {
                println!("{} {}: {}", "✗".red(), source.display_name.bold(), reason.red());
            }
        }
    }

    Ok(())
}
