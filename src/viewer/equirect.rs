// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Flat equirectangular panorama viewer for egui.
//!
//! The whole panorama is drawn as a 2:1 image; screen positions map
//! linearly to yaw and pitch. Markers are drawn as circles and hit-tested
//! against the pointer on click.

use super::{EngineError, MarkerSpec, MarkerStyle, ViewerEngine, ViewerEvent, ViewerInstance};
use crate::io::media;
use crate::models::Spherical;
use crate::util::geometry::{self, EQUIRECT_ASPECT};
use std::cell::RefCell;
use std::rc::Rc;

/// Default hit and draw radius of a marker, in points.
pub const DEFAULT_MARKER_RADIUS: f32 = 8.0;

/// Texture decoded by the last `switch_panorama`, keyed by its url.
type Handoff = Rc<RefCell<Option<(String, egui::TextureHandle)>>>;

/// Creates [`EquirectViewer`]s that upload their panorama to `ctx`.
pub struct EquirectEngine {
    ctx: egui::Context,
    marker_radius: f32,
    /// Following a hotspot switches the live viewer and is then followed by
    /// a rebind to the same url; the rebind picks the texture up from here
    /// instead of decoding the panorama again.
    handoff: Handoff,
}

impl EquirectEngine {
    pub fn new(ctx: egui::Context, marker_radius: f32) -> Self {
        Self {
            ctx,
            marker_radius,
            handoff: Rc::default(),
        }
    }
}

impl ViewerEngine for EquirectEngine {
    type Container = egui::Id;
    type Instance = EquirectViewer;

    fn create(
        &mut self,
        container: &egui::Id,
        panorama_url: &str,
        markers: &[MarkerSpec],
    ) -> Result<EquirectViewer, EngineError> {
        let texture = match self.handoff.borrow_mut().take() {
            Some((url, texture)) if url == panorama_url => {
                log::debug!("Reusing switched panorama texture");
                texture
            }
            _ => load_texture(&self.ctx, *container, panorama_url)?,
        };
        Ok(EquirectViewer {
            ctx: self.ctx.clone(),
            container: *container,
            handoff: Rc::clone(&self.handoff),
            texture: Some(texture),
            markers: markers.to_vec(),
            events: vec![ViewerEvent::Ready],
            view_rect: None,
            marker_radius: self.marker_radius,
            destroyed: false,
        })
    }
}

fn load_texture(
    ctx: &egui::Context,
    container: egui::Id,
    url: &str,
) -> Result<egui::TextureHandle, EngineError> {
    let loaded = media::load_panorama(url)?;
    let size = [loaded.width as usize, loaded.height as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
    log::debug!("Loaded panorama {}x{}", loaded.width, loaded.height);
    Ok(ctx.load_texture(
        format!("panorama-{:?}", container),
        color_image,
        egui::TextureOptions::LINEAR,
    ))
}

/// One live panorama view.
pub struct EquirectViewer {
    ctx: egui::Context,
    container: egui::Id,
    handoff: Handoff,
    texture: Option<egui::TextureHandle>,
    markers: Vec<MarkerSpec>,
    events: Vec<ViewerEvent>,
    /// Where the panorama was drawn last frame.
    view_rect: Option<egui::Rect>,
    marker_radius: f32,
    destroyed: bool,
}

impl EquirectViewer {
    /// Draw the panorama and its markers, queueing click events.
    pub fn show(&mut self, ui: &mut egui::Ui, crosshair: bool) {
        let Some(texture_id) = self.texture.as_ref().map(|t| t.id()) else {
            return;
        };

        let available = ui.available_size();
        let (width, height) = geometry::fit_to_aspect((available.x, available.y), EQUIRECT_ASPECT);
        let (response, painter) = ui.allocate_painter(available, egui::Sense::click());
        let rect = egui::Rect::from_center_size(response.rect.center(), egui::vec2(width, height));
        self.view_rect = Some(rect);

        painter.image(
            texture_id,
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        for marker in &self.markers {
            let center = to_screen(rect, marker.position);
            let color = match marker.style {
                MarkerStyle::Hotspot => egui::Color32::YELLOW,
                MarkerStyle::Candidate => egui::Color32::LIGHT_BLUE,
            };
            painter.circle_filled(center, self.marker_radius, color);
            painter.circle_stroke(
                center,
                self.marker_radius,
                egui::Stroke::new(1.0, egui::Color32::BLACK),
            );
        }

        if response.hovered() {
            let icon = if crosshair {
                egui::CursorIcon::Crosshair
            } else if self.marker_at(rect, response.hover_pos()).is_some() {
                egui::CursorIcon::PointingHand
            } else {
                egui::CursorIcon::Grab
            };
            ui.ctx().set_cursor_icon(icon);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some(id) = self.marker_at(rect, Some(pos)) {
                    self.events.push(ViewerEvent::MarkerSelected(id));
                }
                self.events.push(ViewerEvent::RawClick { x: pos.x, y: pos.y });
            }
        }
    }

    /// Screen rectangle of the panorama in the last drawn frame.
    pub fn view_rect(&self) -> Option<egui::Rect> {
        self.view_rect
    }

    /// Topmost marker under `pos`.
    fn marker_at(&self, rect: egui::Rect, pos: Option<egui::Pos2>) -> Option<String> {
        let pos = pos?;
        self.markers
            .iter()
            .rev()
            .find(|m| to_screen(rect, m.position).distance(pos) <= self.marker_radius)
            .map(|m| m.id.clone())
    }

    fn ensure_live(&self) -> Result<(), EngineError> {
        if self.destroyed {
            Err(EngineError::Destroyed)
        } else {
            Ok(())
        }
    }
}

fn to_screen(rect: egui::Rect, position: Spherical) -> egui::Pos2 {
    let (u, v) = geometry::spherical_to_normalized(position);
    egui::pos2(
        rect.min.x + u as f32 * rect.width(),
        rect.min.y + v as f32 * rect.height(),
    )
}

impl ViewerInstance for EquirectViewer {
    fn switch_panorama(&mut self, url: &str) -> Result<(), EngineError> {
        self.ensure_live()?;
        let texture = load_texture(&self.ctx, self.container, url)?;
        *self.handoff.borrow_mut() = Some((url.to_string(), texture.clone()));
        self.texture = Some(texture);
        self.events.push(ViewerEvent::Ready);
        Ok(())
    }

    fn add_marker(&mut self, marker: MarkerSpec) -> Result<(), EngineError> {
        self.ensure_live()?;
        if self.markers.iter().any(|m| m.id == marker.id) {
            return Err(EngineError::DuplicateMarker(marker.id));
        }
        self.markers.push(marker);
        Ok(())
    }

    fn remove_marker(&mut self, id: &str) -> Result<(), EngineError> {
        self.ensure_live()?;
        let before = self.markers.len();
        self.markers.retain(|m| m.id != id);
        if self.markers.len() == before {
            return Err(EngineError::MarkerNotFound(id.to_string()));
        }
        Ok(())
    }

    fn map_screen_point_to_spherical(&self, x: f32, y: f32) -> Option<Spherical> {
        let rect = self.view_rect?;
        let pos = egui::pos2(x, y);
        if self.destroyed || !rect.contains(pos) || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        let u = ((x - rect.min.x) / rect.width()) as f64;
        let v = ((y - rect.min.y) / rect.height()) as f64;
        Some(geometry::normalized_to_spherical(u, v))
    }

    fn poll_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        // Dropping the handle frees the texture.
        self.texture = None;
        self.markers.clear();
        self.events.clear();
        self.view_rect = None;
    }
}
