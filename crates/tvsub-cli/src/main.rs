//! CLI entry point.
//!
//! Parses arguments, initializes logging and dispatches to handlers. Errors
//! are printed and mapped to an exit code through [`CliError`].

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tvsub_cli::config::load_settings;
use tvsub_cli::{Cli, CliError, Commands, WatchCommand, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config_path = cli.config;

    match cli.command {
        Commands::Run { once, only } => handlers::run::execute(&config_path, once, &only).await,
        Commands::Lookup { name } => handlers::lookup::execute(&name).await,
        Commands::Config => {
            let settings = load_settings(&config_path).await?;
            handlers::config::execute(&config_path, &settings)
        }
        command => {
            let ctx = bootstrap(load_settings(&config_path).await?)?;
            match command {
                Commands::Watch(WatchCommand::List) => handlers::watch::list(&ctx).await,
                Commands::Watch(WatchCommand::Add {
                    catalog_id,
                    tier,
                    name,
                }) => handlers::watch::add(&ctx, &catalog_id, tier, name).await,
                Commands::Watch(WatchCommand::Remove { catalog_id, tier }) => {
                    handlers::watch::remove(&ctx, &catalog_id, tier).await
                }
                Commands::Search { catalog_id, tier } => {
                    handlers::search::execute(&ctx, &catalog_id, tier).await
                }
                Commands::Grab { torrent_id } => handlers::grab::execute(&ctx, &torrent_id).await,
                Commands::Run { .. } | Commands::Lookup { .. } | Commands::Config => Ok(()),
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads TVSUB_CONFIG
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
