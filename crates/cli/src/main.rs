//! Cylo CLI - Scripted storefront sessions.
//!
//! # Usage
//!
//! ```bash
//! # List the route table
//! cylo routes
//!
//! # Run a command script
//! cylo run session.cylo
//!
//! # Read commands from stdin
//! printf 'add linen-shirt 2\nheader\n' | cylo run
//! ```
//!
//! # Commands
//!
//! - `routes` - Print every routable path and whether it is guarded
//! - `run` - Drive a storefront session from a command script
//!
//! # Environment Variables
//!
//! See [`cylo_storefront::config`]. When `CYLO_STATE_FILE` is set, `run`
//! restores cart, wishlist and session from it and saves them back at the end.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cylo_storefront::config::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "cylo")]
#[command(author, version, about = "Cylo storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route table
    Routes,
    /// Run a command script against a storefront session
    Run {
        /// Script file (reads stdin when omitted)
        script: Option<PathBuf>,

        /// Do not write state back to `CYLO_STATE_FILE`
        #[arg(long)]
        no_save: bool,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Route tracing events to Sentry: warnings and errors become events,
/// info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn main() {
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Configuration error: {e}");
            }
            std::process::exit(2);
        }
    };

    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cylo_storefront=info,cylo_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Routes => commands::routes::print_table(),
        Commands::Run { script, no_save } => {
            let summary = commands::run::execute(config, script.as_deref(), !no_save)?;
            tracing::info!(
                commands = summary.executed,
                rejected = summary.rejected,
                "Script complete"
            );
        }
    }
    Ok(())
}
