// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! cropframe - multi-frame photo cropping
//!
//! A cross-platform desktop application for cutting several crop frames
//! out of a single photo, with aspect-ratio presets and per-project
//! frame collections.

mod app;
mod config;
mod crop;
mod error;
mod io;
mod models;
mod render;
mod repository;
mod ui;
mod util;

use anyhow::{Context, Result};
use app::CropApp;
use config::AppConfig;
use io::persistence::JsonProjectStore;
use repository::ProjectRepository;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = AppConfig::load();
    let repository = ProjectRepository::open(JsonProjectStore::new(&config.data_dir))
        .with_context(|| format!("Failed to open projects in {}", config.data_dir.display()))?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("cropframe"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "cropframe",
        options,
        Box::new(|_cc| Ok(Box::new(CropApp::new(config, repository)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
