use std::{fs, time::Duration};

use clap::Parser;
use cli::Args;
use list::{list_packages, search_packages};
use logging::setup_logging;
use pkgbrowse_config::config::{self, generate_default_config, get_config, Config, CONFIG_PATH};
use pkgbrowse_core::{error::ErrorContext, BrowseResult};
use pkgbrowse_registry::http_client::configure_http_client;
use pkgbrowse_utils::path::resolve_path;
use show::show_package;
use source::{resolve_source, resolve_update_target};
use stats::show_stats;
use tracing::{info, warn};
use update::update_snapshot;
use utils::COLOR;

mod cli;
mod list;
mod logging;
mod show;
mod source;
mod stats;
mod update;
mod utils;

async fn handle_cli() -> BrowseResult<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color {
        let mut color = COLOR.write().unwrap();
        *color = false;
    }

    if let Some(ref c) = args.config {
        let mut config_path = CONFIG_PATH.write().unwrap();
        *config_path = resolve_path(c)?;
    }

    if let cli::Commands::DefConfig = args.command {
        generate_default_config()?;
        return Ok(());
    }

    config::init()?;
    let config = get_config();

    if !config.display().color() {
        let mut color = COLOR.write().unwrap();
        *color = false;
    }

    let timeout = config.request_timeout;
    let user_agent = args.user_agent.clone();
    configure_http_client(|client| {
        client.timeout = timeout.map(Duration::from_secs);
        if let Some(user_agent) = user_agent {
            client.user_agent = Some(user_agent);
        }
    });

    let snapshot_flag = args.snapshot.as_deref();

    match args.command {
        cli::Commands::List {
            filters,
        } => {
            let source = resolve_source(snapshot_flag, &config)?;
            let page_size = filters.page_size.unwrap_or_else(|| config.page_size());
            list_packages(&source, filters, page_size).await?;
        }
        cli::Commands::Search {
            query,
            filters,
        } => {
            let source = resolve_source(snapshot_flag, &config)?;
            let page_size = filters.page_size.unwrap_or_else(|| config.page_size());
            search_packages(&source, query, filters, page_size).await?;
        }
        cli::Commands::Show {
            name,
        } => {
            let source = resolve_source(snapshot_flag, &config)?;
            show_package(&source, &name).await?;
        }
        cli::Commands::Stats => {
            let source = resolve_source(snapshot_flag, &config)?;
            show_stats(&source).await?;
        }
        cli::Commands::Update {
            force,
        } => {
            let dest = resolve_update_target(snapshot_flag, &config)?;
            update_snapshot(config.get_remote_url(), dest, force, config.update_interval())
                .await?;
        }
        cli::Commands::Env => {
            info!("PKGBROWSE_CONFIG={}", CONFIG_PATH.read().unwrap().display());
            info!(
                "PKGBROWSE_SNAPSHOT={}",
                resolve_source(snapshot_flag, &config)?
            );
            info!("PKGBROWSE_REMOTE={}", config.get_remote_url());
        }
        cli::Commands::Config => {
            let config_path = CONFIG_PATH.read().unwrap().clone();
            let content = if config_path.exists() {
                fs::read_to_string(&config_path)
                    .with_context(|| format!("reading config {}", config_path.display()))?
            } else {
                warn!("Config file {} not found", config_path.display());
                toml::to_string_pretty(&Config::default_config())?
            };
            info!("{}", content);
        }
        cli::Commands::DefConfig => unreachable!(),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli().await {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}

