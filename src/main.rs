//! Timeline Engine - Command Line Entry Point
//!
//! Loads a project snapshot, computes the timeline model and prints it. Hosts
//! use this to check layout output against real exports; the actual
//! implementation is in the `timeline_engine` library.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;
use timeline_engine::formatting::format_model;
use timeline_engine::storage::load_snapshot;
use timeline_engine::timeline::local_date_today;
use timeline_engine::validation::{
    normalize_id_list, parse_date_filter, parse_preset_filter, parse_zoom_filter,
};
use timeline_engine::{EngineConfig, Storage, TimelineEngine, TimelineFilters};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Toml,
}

/// Timeline Engine - lay out AEC project timelines from a snapshot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the project snapshot (TOML with [[projects]] tables)
    file: PathBuf,

    /// View state file providing zoom, preset and search
    #[arg(long)]
    view: Option<PathBuf>,

    /// Engine config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Zoom level (week, month, quarter)
    #[arg(long)]
    zoom: Option<String>,

    /// Preset (all, active, overdue)
    #[arg(long)]
    preset: Option<String>,

    /// Free-text search
    #[arg(long)]
    search: Option<String>,

    /// Comma-separated project id allowlist
    #[arg(long)]
    ids: Option<String>,

    /// Only projects with this manager
    #[arg(long)]
    manager: Option<String>,

    /// Only projects of this type
    #[arg(long = "type")]
    project_type: Option<String>,

    /// Only projects for this client
    #[arg(long)]
    client: Option<String>,

    /// Override today's date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<String>,

    /// Vertical scroll offset used to pick visible rows
    #[arg(long)]
    scroll_top: Option<f64>,

    /// Viewport height used to pick visible rows
    #[arg(long, default_value_t = 600.0)]
    viewport_height: f64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the effective view state to this file
    #[arg(long)]
    save_view: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let mut view = match &args.view {
        Some(path) => Storage::new(path).load()?,
        None => Default::default(),
    };
    if let Some(zoom) = &args.zoom {
        view.zoom = parse_zoom_filter(zoom, view.zoom);
    }
    if let Some(preset) = &args.preset {
        view.preset = parse_preset_filter(preset);
    }
    if let Some(search) = &args.search {
        view.search = search.clone();
    }

    let filters = TimelineFilters {
        ids: args.ids.as_deref().map(normalize_id_list),
        manager: args.manager.clone(),
        project_type: args.project_type.clone(),
        client: args.client.clone(),
        ..TimelineFilters::from_view_state(&view)
    };

    let projects = load_snapshot(&args.file)?;
    let today = parse_date_filter(args.today.as_deref()).unwrap_or_else(local_date_today);
    info!(projects = projects.len(), %today, zoom = %filters.zoom, "computing timeline");

    let engine = TimelineEngine::new(config);
    let model = engine.compute_at(&projects, &filters, today);

    match args.format {
        OutputFormat::Text => {
            let window = args
                .scroll_top
                .map(|top| engine.visible_window(model.rows.len(), top, args.viewport_height));
            print!("{}", format_model(&model, window.as_ref()));
        }
        OutputFormat::Toml => {
            let content = toml::to_string_pretty(&*model).context("Failed to serialize model")?;
            print!("{}", content);
        }
    }

    if let Some(path) = &args.save_view {
        Storage::new(path).save(&view)?;
    }

    Ok(())
}
