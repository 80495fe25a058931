mod app;
mod cli;
mod config;
mod data;
mod error;
mod state;
mod ui;

use std::path::Path;

use anyhow::{Context, Result};
use app::MzStackApp;
use clap::Parser;
use eframe::egui;

use crate::cli::Cli;
use crate::config::PlotConfig;
use crate::error::PlotError;
use crate::state::AppState;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        log::error!("{e:#}");
        return Err(e);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let (config, mut state) = prepare(cli).context("failed to prepare plots")?;
    log::info!(
        "Prepared {} spectra ({} labelled peaks)",
        state.panels.len(),
        state.peak_total()
    );

    let font = config
        .figure
        .font_file
        .as_deref()
        .map(read_font)
        .transpose()?;

    if let Some(path) = &cli.save {
        state.request_screenshot(path.clone(), true);
    }

    let size = config.figure.window_size(state.panels.len());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(size)
            .with_min_inner_size(config::MIN_WINDOW_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        &config.figure.window_title,
        options,
        Box::new(move |cc| Ok(Box::new(MzStackApp::new(cc, state, font)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}

/// Build the configuration and load every spectrum. Everything happens up
/// front: a bad file stops the run before any window appears.
fn prepare(cli: &Cli) -> Result<(PlotConfig, AppState), PlotError> {
    let config = cli.plot_config()?;
    let state = AppState::prepare(&config)?;
    Ok((config, state))
}

/// Read a font file, naming the family after the file stem.
fn read_font(path: &Path) -> Result<(String, Vec<u8>), PlotError> {
    let bytes = std::fs::read(path).map_err(|source| PlotError::Font {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("custom")
        .to_string();
    log::debug!("Using font '{}' from {}", name, path.display());
    Ok((name, bytes))
}
