// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image graph panel.
//!
//! Lists a project's panoramas in upload order with their outgoing
//! hotspots. Doubles as the target picker while a hotspot is being placed.

use panolink::models::{ImageId, Project};
use panolink::HotspotPlacement;

/// Result of image list interaction.
pub enum GraphAction {
    None,
    Display(ImageId),
    SelectTarget(ImageId),
}

fn image_label(project: &Project, id: &ImageId) -> String {
    match project.image_index(id) {
        Some(index) => format!("Image {}", index + 1),
        None => "missing image".to_string(),
    }
}

/// Display the image list and hotspot edges.
pub fn show(
    ui: &mut egui::Ui,
    project: &Project,
    displayed: Option<&ImageId>,
    placement: Option<&HotspotPlacement>,
) -> GraphAction {
    let mut action = GraphAction::None;

    ui.heading("Images");
    match placement.map(|p| p.state()) {
        Some(panolink::PlacementState::SelectingTarget) => {
            ui.label(egui::RichText::new("Select Target Image").strong());
        }
        Some(panolink::PlacementState::AwaitingClick { .. }) => {
            ui.label(egui::RichText::new("Click the panorama to place").weak());
        }
        _ => {}
    }
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (index, image) in project.images.iter().enumerate() {
            let mut title = format!("Image {}", index + 1);
            if index == 0 {
                title.push_str("  (entry)");
            }

            match placement {
                Some(p) if !p.is_idle() => {
                    let is_source = p.source() == &image.id;
                    let is_target = p.target() == Some(&image.id);
                    if is_source {
                        title.push_str("  (source)");
                    }
                    let response = ui.add_enabled(
                        p.accepts_target(&image.id),
                        egui::SelectableLabel::new(is_source || is_target, title),
                    );
                    if response.clicked() {
                        action = GraphAction::SelectTarget(image.id.clone());
                    }
                }
                _ => {
                    let selected = displayed == Some(&image.id);
                    if ui.selectable_label(selected, title).clicked() && !selected {
                        action = GraphAction::Display(image.id.clone());
                    }
                }
            }

            ui.indent(image.id.as_str(), |ui| {
                if image.hotspots.is_empty() {
                    ui.label(egui::RichText::new("no hotspots").weak().small());
                }
                for hotspot in &image.hotspots {
                    ui.label(
                        egui::RichText::new(format!(
                            "→ {}  at ({:.2}, {:.2})",
                            image_label(project, &hotspot.target_image_id),
                            hotspot.longitude,
                            hotspot.latitude
                        ))
                        .small(),
                    );
                }
            });
        }
    });

    ui.separator();
    let dangling = project.dangling_hotspots().count();
    let mut summary = format!("{} hotspots", project.edges().count());
    if dangling > 0 {
        summary.push_str(&format!(", {} with a missing target", dangling));
    }
    ui.label(egui::RichText::new(summary).weak());

    action
}
