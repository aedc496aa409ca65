//! Sheetgate CLI
//!
//! Runs the dataset server, or fetches a single dataset once.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sheetgate_api::{ApiConfig, ApiServer, AppState, DATASETS};

/// Sheetgate - cached JSON proxy for Google Sheets
#[derive(Parser)]
#[command(name = "sheetgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on [default: $PORT or 3000]
        #[arg(short, long)]
        port: Option<u16>,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Fetch one dataset and print it as JSON
    Fetch {
        /// Dataset key
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(DATASETS))]
        dataset: String,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "sheetgate=debug,info"
    } else {
        "sheetgate=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(port, &bind).await,
        Commands::Fetch { dataset, pretty } => cmd_fetch(&dataset, pretty).await,
    }
}

/// Run the HTTP server
async fn cmd_serve(port: Option<u16>, bind: &str) -> Result<()> {
    let config = ApiConfig::from_env();
    let port = port.unwrap_or(config.port);

    for dataset in DATASETS {
        if config.spreadsheet_id(dataset).is_none() {
            eprintln!("{} no spreadsheet configured for /{}", "warning:".yellow().bold(), dataset);
        }
    }

    let server = ApiServer::new(config).context("Failed to initialize server")?;
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    println!("{}", "Starting Sheetgate server...".cyan().bold());
    println!("   {} http://{}", "Listening on:".green(), addr);
    for dataset in DATASETS {
        println!("   {} http://{}/{}", "Dataset:".dimmed(), addr, dataset);
    }

    server.run(addr).await.context("Server error")?;

    Ok(())
}

/// Fetch one dataset and print it
async fn cmd_fetch(dataset: &str, pretty: bool) -> Result<()> {
    let config = ApiConfig::from_env();
    let spreadsheet_id = config.spreadsheet_id(dataset).map(str::to_owned);
    let state = AppState::new(config).context("Failed to initialize Sheets client")?;

    let data = state
        .datasets
        .load(dataset, spreadsheet_id.as_deref())
        .await
        .with_context(|| format!("Failed to fetch dataset {}", dataset))?;

    let json = if pretty {
        serde_json::to_string_pretty(data.as_ref())?
    } else {
        serde_json::to_string(data.as_ref())?
    };
    println!("{}", json);
    eprintln!("{} {} records", "✓".green(), data.len());

    Ok(())
}
