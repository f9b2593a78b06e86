// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project toolbar.
//!
//! This module provides the toolbar above the panorama with the image
//! upload and hotspot placement controls.

use panolink::PlacementState;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    AddImage,
    BeginHotspot,
    CancelHotspot,
}

/// What the toolbar needs to know to render its controls.
pub struct ToolbarState<'a> {
    pub project_name: &'a str,
    pub uploading: Option<&'a str>,
    pub upload_error: Option<&'a str>,
    pub can_add_hotspot: bool,
    pub placement: Option<&'a PlacementState>,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, state: &ToolbarState<'_>) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.heading(state.project_name);
        ui.separator();

        if ui
            .add_enabled(state.uploading.is_none(), egui::Button::new("➕ Add Image"))
            .clicked()
        {
            action = ToolbarAction::AddImage;
        }

        match state.placement {
            None => {
                if ui
                    .add_enabled(state.can_add_hotspot, egui::Button::new("⊙ Add Hotspot"))
                    .clicked()
                {
                    action = ToolbarAction::BeginHotspot;
                }
            }
            Some(_) => {
                if ui.button("✖ Cancel Hotspot").clicked() {
                    action = ToolbarAction::CancelHotspot;
                }
            }
        }

        ui.separator();

        if let Some(message) = state.uploading {
            ui.spinner();
            ui.label(message);
        } else if let Some(error) = state.upload_error {
            ui.colored_label(egui::Color32::from_rgb(220, 60, 60), error);
        } else {
            let hint = match state.placement {
                Some(PlacementState::SelectingTarget) => {
                    "Select the target image from the list on the right"
                }
                Some(PlacementState::AwaitingClick { .. }) => {
                    "Click on the panorama where the hotspot should go"
                }
                Some(PlacementState::Idle) | None => "Click a hotspot to navigate",
            };
            ui.label(egui::RichText::new(hint).italics().weak());
        }
    });

    action
}
