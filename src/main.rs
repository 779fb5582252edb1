mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use app::CameraDashboardApp;
use clap::Parser;
use eframe::egui;

use crate::config::{DASHBOARD, DEFAULT_DATA_PATH};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Camera dataset to load (.csv, .json or .parquet)
    #[arg(default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// PNG or JPEG painted behind the dashboard
    #[arg(long)]
    background: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let dataset = data::loader::load_file(&cli.data)
        .inspect_err(|e| log::error!("Cannot start without a dataset: {e:#}"))
        .with_context(|| format!("loading {}", cli.data.display()))?;

    let background_uri = cli
        .background
        .map(|p| std::fs::canonicalize(&p).unwrap_or(p))
        .map(|p| format!("file://{}", p.display()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(DASHBOARD.window_size)
            .with_min_inner_size(DASHBOARD.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Camera Evolution Dashboard",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the background image.
            egui_extras::install_image_loaders(&cc.egui_ctx);

            let mut visuals = egui::Visuals::dark();
            visuals.override_text_color = Some(DASHBOARD.colors.text);
            cc.egui_ctx.set_visuals(visuals);

            Ok(Box::new(CameraDashboardApp::new(dataset, background_uri)))
        }),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}
