// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the project store and the panorama
//! surface, and routes panel actions and surface events between them.

use crate::ui::{canvas, graph, projects, toolbar};
use panolink::config::Settings;
use panolink::io::upload::{self, UploadError};
use panolink::models::{ImageId, Project, ProjectId};
use panolink::viewer::equirect::EquirectEngine;
use panolink::{HotspotPlacement, PanoramaSurface, ProjectStore, SurfaceEvent};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;

/// Message shown when "Create" is pressed with a blank name.
const EMPTY_NAME_MESSAGE: &str = "Please enter a project name";

/// Message shown when the upload thread dies without reporting back.
const UPLOAD_FAILED_MESSAGE: &str = "Upload failed, please try again";

/// Upload finished on the background thread.
struct UploadResult {
    project_id: ProjectId,
    path: PathBuf,
    result: Result<String, UploadError>,
}

/// Main application state.
pub struct PanoLinkApp {
    settings: Settings,
    store: ProjectStore,
    active_project: Option<ProjectId>,
    /// Image shown in the main view; defaults to the project's first image.
    displayed_image: Option<ImageId>,
    surface: PanoramaSurface<EquirectEngine>,
    placement: Option<HotspotPlacement>,
    new_project_name: String,
    project_error: Option<String>,
    upload_error: Option<String>,
    upload_loader: Option<Receiver<UploadResult>>,
    loading_message: Option<String>,
}

impl PanoLinkApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        Self::with_context(cc.egui_ctx.clone(), settings)
    }

    fn with_context(ctx: egui::Context, settings: Settings) -> Self {
        let engine = EquirectEngine::new(ctx, settings.marker_radius);
        Self {
            settings,
            store: ProjectStore::new(),
            active_project: None,
            displayed_image: None,
            surface: PanoramaSurface::new(engine, egui::Id::new("main_panorama")),
            placement: None,
            new_project_name: String::new(),
            project_error: None,
            upload_error: None,
            upload_loader: None,
            loading_message: None,
        }
    }

    fn active(&self) -> Option<Arc<Project>> {
        self.active_project
            .as_ref()
            .and_then(|id| self.store.get_project(id))
            .cloned()
    }

    fn create_project(&mut self) {
        if self.new_project_name.trim().is_empty() {
            self.project_error = Some(EMPTY_NAME_MESSAGE.to_string());
            return;
        }
        if let Some(project) = self.store.create_project(&self.new_project_name) {
            self.new_project_name.clear();
            self.project_error = None;
            self.open_project(project.id.clone());
        }
    }

    fn open_project(&mut self, id: ProjectId) {
        self.cancel_placement();
        self.active_project = Some(id);
        self.displayed_image = None;
        self.upload_error = None;
    }

    fn cancel_placement(&mut self) {
        if let Some(mut placement) = self.placement.take() {
            placement.cancel(&mut self.surface);
        }
    }

    fn begin_placement(&mut self) {
        let (Some(project_id), Some(source)) = (&self.active_project, &self.displayed_image) else {
            return;
        };
        match HotspotPlacement::begin(
            &self.store,
            project_id,
            source,
            self.settings.post_placement(),
        ) {
            Ok(placement) => self.placement = Some(placement),
            Err(e) => log::warn!("Cannot add hotspot: {}", e),
        }
    }

    fn select_target(&mut self, target: &ImageId) {
        if let Some(placement) = self.placement.as_mut() {
            placement.select_target(&self.store, target, &mut self.surface);
        }
    }

    /// Pick an image file and encode it on a background thread.
    fn start_upload(&mut self) {
        let Some(project_id) = self.active_project.clone() else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff", "tif"])
            .pick_file()
        else {
            return;
        };

        let (sender, receiver) = channel();
        self.upload_loader = Some(receiver);
        self.upload_error = None;
        self.loading_message = Some("Uploading image...".to_string());

        let limit = self.settings.max_upload_bytes;
        std::thread::spawn(move || {
            let result = upload::prepare_file(&path, limit);
            let _ = sender.send(UploadResult {
                project_id,
                path,
                result,
            });
        });
    }

    fn poll_upload(&mut self) {
        let Some(ref receiver) = self.upload_loader else {
            return;
        };
        let received = receiver.try_recv();
        match received {
            Ok(upload) => {
                self.upload_loader = None;
                self.loading_message = None;
                self.finish_upload(upload);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::error!("Upload thread exited without a result");
                self.upload_loader = None;
                self.loading_message = None;
                self.upload_error = Some(UPLOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    fn finish_upload(&mut self, upload: UploadResult) {
        match upload.result {
            Ok(url) => {
                if let Some(image_id) = self.store.add_image(&upload.project_id, url) {
                    log::info!("Added image {} from {}", image_id, upload.path.display());
                } else {
                    log::warn!("Project {} vanished before upload finished", upload.project_id);
                }
            }
            Err(e) => {
                match &e {
                    UploadError::TooLarge { size, limit } => log::warn!(
                        "Rejected {} ({} bytes, limit {})",
                        upload.path.display(),
                        size,
                        limit
                    ),
                    other => log::warn!("Rejected {}: {}", upload.path.display(), other),
                }
                self.upload_error = Some(e.to_string());
            }
        }
    }

    /// Keep the displayed image valid and the surface bound to it.
    fn sync_surface(&mut self, project: Option<&Project>) {
        let Some(project) = project else {
            self.cancel_placement();
            self.displayed_image = None;
            self.surface.unbind();
            return;
        };

        let current = self
            .displayed_image
            .as_ref()
            .and_then(|id| project.image(id))
            .or_else(|| project.entry_image())
            .cloned();

        match current {
            Some(image) => {
                self.displayed_image = Some(image.id.clone());
                self.surface.refresh(&image);
            }
            None => {
                self.displayed_image = None;
                self.surface.unbind();
            }
        }
    }

    fn handle_surface_events(&mut self, project: &Project) {
        self.surface.lock_navigation(self.placement.is_some());
        for event in self.surface.pump(project) {
            match event {
                SurfaceEvent::Ready => {}
                SurfaceEvent::Navigated { hotspot, target } => {
                    log::info!("Followed hotspot {} to image {}", hotspot, target);
                    self.displayed_image = Some(target);
                }
                SurfaceEvent::PointPicked(position) => {
                    let Some(placement) = self.placement.as_mut() else {
                        continue;
                    };
                    let outcome = placement.report_click(&mut self.store, position, &mut self.surface);
                    if let Some(outcome) = outcome {
                        if let Some(next) = outcome.advance_to {
                            self.displayed_image = Some(next);
                        }
                    }
                }
            }
        }

        if self.placement.as_ref().is_some_and(|p| p.is_idle()) {
            self.placement = None;
        }
    }
}

impl eframe::App for PanoLinkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_upload();

        // Request repaint if still uploading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        let project = self.active();
        self.sync_surface(project.as_deref());

        // Project list (left side)
        let projects_action = egui::SidePanel::left("projects")
            .default_width(220.0)
            .show(ctx, |ui| {
                projects::show(
                    ui,
                    self.store.list_projects(),
                    self.active_project.as_ref(),
                    &mut self.new_project_name,
                    self.project_error.as_deref(),
                )
            })
            .inner;

        match projects_action {
            projects::ProjectsAction::Create => self.create_project(),
            projects::ProjectsAction::Open(id) => self.open_project(id),
            projects::ProjectsAction::None => {}
        }

        let Some(project) = project else {
            egui::CentralPanel::default().show(ctx, |ui| {
                canvas::show(ui, &mut self.surface, false);
            });
            return;
        };

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                let state = toolbar::ToolbarState {
                    project_name: &project.name,
                    uploading: self.loading_message.as_deref(),
                    upload_error: self.upload_error.as_deref(),
                    can_add_hotspot: HotspotPlacement::can_begin(
                        &project,
                        self.displayed_image.as_ref(),
                    ),
                    placement: self.placement.as_ref().map(|p| p.state()),
                };
                toolbar::show(ui, &state)
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::AddImage => self.start_upload(),
            toolbar::ToolbarAction::BeginHotspot => self.begin_placement(),
            toolbar::ToolbarAction::CancelHotspot => self.cancel_placement(),
            toolbar::ToolbarAction::None => {}
        }

        // Image graph (right side)
        let graph_action = egui::SidePanel::right("images")
            .default_width(250.0)
            .show(ctx, |ui| {
                graph::show(
                    ui,
                    &project,
                    self.displayed_image.as_ref(),
                    self.placement.as_ref(),
                )
            })
            .inner;

        match graph_action {
            graph::GraphAction::Display(id) => self.displayed_image = Some(id),
            graph::GraphAction::SelectTarget(id) => self.select_target(&id),
            graph::GraphAction::None => {}
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.cancel_placement();
        }

        // Main panorama (center)
        egui::CentralPanel::default().show(ctx, |ui| {
            canvas::show(ui, &mut self.surface, true);
        });

        self.handle_surface_events(&project);
    }
}
