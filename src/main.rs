// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! PanoLink - linked 360° panorama tours
//!
//! A cross-platform desktop application for building tours out of
//! equirectangular panoramas connected by clickable hotspots.

mod app;
mod ui;

use anyhow::Result;
use app::PanoLinkApp;
use panolink::config::Settings;

fn main() -> Result<()> {
    // Initialize logging, defaulting to info when RUST_LOG is unset
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("PanoLink - 360° Projects"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "PanoLink",
        options,
        Box::new(move |cc| Ok(Box::new(PanoLinkApp::new(cc, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
