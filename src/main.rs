mod app;
mod cli;
mod config;
mod context;
mod format;
mod headless;
mod routes;
mod services;
mod styles;
mod ui;

use crate::cli::{Cli, Command, ThemeAction};
use crate::config::AppConfig;
use crate::context::{DocumentAttributes, ThemeMode, ThemeResolver};
use crate::routes::Route;
use crate::services::data::{DataSource, MockDataSource};
use crate::services::preferences::FilePreferenceStore;
use crate::styles::StyleRegistry;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::panic;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        eprintln!("FinGallery panic: {info}");
        if let Some(location) = info.location() {
            eprintln!("  at {}:{}", location.file(), location.line());
        }
    }));

    init_tracing();

    let cli = Cli::parse();
    let settings = AppConfig::load(&cli)?;

    if let Some(command) = cli.command.clone() {
        return handle_command(command, &settings);
    }

    let registry = StyleRegistry::builtin();
    let initial = initial_route(&cli, &settings, registry);
    info!(route = %initial, headless = cli.headless, "starting");

    if cli.headless {
        return run_headless(&initial, &settings, registry);
    }

    app::run(settings, initial)
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fingallery=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `--style` wins over the configured default; neither means the gallery.
fn initial_route(cli: &Cli, settings: &AppConfig, registry: &StyleRegistry) -> Route {
    match cli.style.as_deref().or(settings.default_style.as_deref()) {
        Some(slug) => Route::parse(&format!("/dashboard/{slug}"), registry),
        None => Route::Gallery,
    }
}

fn open_store(settings: &AppConfig) -> Result<FilePreferenceStore> {
    let store = FilePreferenceStore::open(settings.preferences_file.as_deref())
        .context("opening preference store")?;
    debug!(path = %store.path().display(), "preference store opened");
    Ok(store)
}

/// The persisted mode, read without touching the preference file.
fn stored_mode(settings: &AppConfig) -> Result<ThemeMode> {
    Ok(ThemeMode::read_from(&open_store(settings)?).unwrap_or_default())
}

fn run_headless(route: &Route, settings: &AppConfig, registry: &StyleRegistry) -> Result<()> {
    let mode = stored_mode(settings)?;
    let snapshot = app::load_snapshot_blocking(settings)?;
    let page = headless::render_route(route, mode, registry, &snapshot, Utc::now())?;
    println!("{page}");
    Ok(())
}

fn handle_command(command: Command, settings: &AppConfig) -> Result<()> {
    match command {
        Command::Styles => {
            for style in StyleRegistry::builtin().all() {
                println!("{:<14} {:<16} {}", style.slug, style.name, style.description);
            }
        }
        Command::Theme {
            action: ThemeAction::Show,
        } => println!("{}", stored_mode(settings)?),
        Command::Theme { action } => {
            let mut theme = ThemeResolver::new(Arc::new(open_store(settings)?));
            let mut document = DocumentAttributes::new();
            theme.mount(&mut document);
            match action {
                ThemeAction::Show => {}
                ThemeAction::Light => theme.set(ThemeMode::Light, &mut document),
                ThemeAction::Dark => theme.set(ThemeMode::Dark, &mut document),
                ThemeAction::Toggle => theme.toggle(&mut document),
            }
            println!("{}", theme.mode());
        }
        Command::Snapshot { pretty } => {
            let snapshot = MockDataSource::new(Utc::now()).snapshot();
            let json = if pretty {
                serde_json::to_string_pretty(&snapshot)?
            } else {
                serde_json::to_string(&snapshot)?
            };
            println!("{json}");
        }
    }
    Ok(())
}
