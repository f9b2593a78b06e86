// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Panorama display area.
//!
//! Draws the bound panorama surface, the failed-load placeholder, or a
//! welcome message when there is nothing to show.

use panolink::viewer::equirect::EquirectEngine;
use panolink::PanoramaSurface;

/// Display the main panorama area.
pub fn show(
    ui: &mut egui::Ui,
    surface: &mut PanoramaSurface<EquirectEngine>,
    has_project: bool,
) {
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);
    let available_size = ui.available_size();
    let placing = surface.is_placing();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        if let Some(viewer) = surface.instance_mut() {
            viewer.show(ui, placing);
        } else if let Some(reason) = surface.failure() {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("⚠")
                            .size(32.0)
                            .color(egui::Color32::from_gray(150)),
                    );
                    ui.label(
                        egui::RichText::new("Failed to load 360° image")
                            .color(egui::Color32::from_gray(200)),
                    );
                    ui.label(egui::RichText::new(reason).weak());
                });
            });
        } else if has_project {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("No images yet. Click \"Add Image\" to get started.")
                        .color(egui::Color32::from_gray(180)),
                );
            });
        } else {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.heading(
                        egui::RichText::new("PanoLink")
                            .size(32.0)
                            .color(egui::Color32::from_gray(200)),
                    );
                    ui.label(
                        egui::RichText::new("Linked 360° panorama tours")
                            .size(14.0)
                            .color(egui::Color32::from_gray(150)),
                    );
                    ui.add_space(20.0);
                    ui.label(
                        egui::RichText::new("Create or open a project to begin")
                            .color(egui::Color32::from_gray(180)),
                    );
                });
            });
        }
    });
}
