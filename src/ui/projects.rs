// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project list panel.
//!
//! Lists every project with its image count and hosts the "New Project"
//! form.

use panolink::models::{Project, ProjectId};
use std::sync::Arc;

/// Result of project list interaction.
pub enum ProjectsAction {
    None,
    Create,
    Open(ProjectId),
}

/// Display the project list and the new-project form.
pub fn show(
    ui: &mut egui::Ui,
    projects: &[Arc<Project>],
    active: Option<&ProjectId>,
    new_name: &mut String,
    error: Option<&str>,
) -> ProjectsAction {
    let mut action = ProjectsAction::None;

    ui.heading("360° Projects");
    ui.separator();

    ui.label("New Project");
    ui.horizontal(|ui| {
        let response = ui.add(egui::TextEdit::singleline(new_name).hint_text("Project Name"));
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Create").clicked() || submitted {
            action = ProjectsAction::Create;
        }
    });
    if let Some(message) = error {
        ui.colored_label(egui::Color32::from_rgb(220, 60, 60), message);
    }

    ui.separator();

    if projects.is_empty() {
        ui.label(
            egui::RichText::new("No projects yet. Enter a name above to get started.")
                .italics()
                .weak(),
        );
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for project in projects {
            let selected = active == Some(&project.id);
            let label = format!("{}  ({} images)", project.name, project.images.len());
            if ui.selectable_label(selected, label).clicked() && !selected {
                action = ProjectsAction::Open(project.id.clone());
            }
        }
    });

    action
}
