// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Panorama surface.
//!
//! A surface owns at most one live viewer instance, bound to one
//! [`ProjectImage`]. It turns the image's hotspots into markers, turns
//! marker selections into navigation and, while in placement mode, turns
//! clicks into sphere coordinates for the placement workflow.
//!
//! The live instance lives inside a [`Binding`]. Dropping the binding tears
//! the instance down, so every path that replaces or discards it (rebind,
//! unbind, failed rebind, dropping the surface) releases the engine.
//! The binding also carries the image snapshot that marker events are
//! resolved against; a newer snapshot means a new binding.

use crate::models::{HotspotId, ImageId, Project, ProjectImage, Spherical};
use crate::placement::PlacementSurface;
use crate::viewer::{MarkerSpec, ViewerEngine, ViewerEvent, ViewerInstance};
use std::sync::Arc;

/// Marker id of the transient marker shown during placement.
pub const CANDIDATE_MARKER_ID: &str = "candidate-marker";

/// What a surface reports upward after handling a viewer event.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// The bound panorama finished loading.
    Ready,
    /// A hotspot was followed and the viewer now shows `target`.
    Navigated { hotspot: HotspotId, target: ImageId },
    /// A point was picked while in placement mode.
    PointPicked(Spherical),
}

/// A live viewer instance and the image it was built for.
struct Binding<I: ViewerInstance> {
    instance: I,
    image: Arc<ProjectImage>,
    ready: bool,
}

impl<I: ViewerInstance> Drop for Binding<I> {
    fn drop(&mut self) {
        for hotspot in &self.image.hotspots {
            if let Err(e) = self.instance.remove_marker(hotspot.id.as_str()) {
                log::warn!("Failed to remove marker {} during teardown: {}", hotspot.id, e);
            }
        }
        // The candidate may or may not be present.
        let _ = self.instance.remove_marker(CANDIDATE_MARKER_ID);
        self.instance.destroy();
        log::debug!("Released viewer for image {}", self.image.id);
    }
}

enum SurfaceState<I: ViewerInstance> {
    Unbound,
    Bound(Binding<I>),
    /// Construction failed; not retried until a different image is bound.
    Failed { image: Arc<ProjectImage>, reason: String },
}

/// One on-screen panorama backed by a viewer engine.
pub struct PanoramaSurface<E: ViewerEngine> {
    engine: E,
    container: E::Container,
    state: SurfaceState<E::Instance>,
    placing: bool,
    navigation_locked: bool,
    candidate: Option<Spherical>,
}

impl<E: ViewerEngine> PanoramaSurface<E> {
    pub fn new(engine: E, container: E::Container) -> Self {
        Self {
            engine,
            container,
            state: SurfaceState::Unbound,
            placing: false,
            navigation_locked: false,
            candidate: None,
        }
    }

    /// Bind to `image`, tearing down any previous instance first.
    pub fn bind(&mut self, image: Arc<ProjectImage>) {
        self.unbind();

        let markers: Vec<MarkerSpec> = image
            .hotspots
            .iter()
            .map(|h| MarkerSpec::hotspot(h.id.as_str(), h.position()))
            .collect();

        match self.engine.create(&self.container, &image.url, &markers) {
            Ok(instance) => {
                log::debug!(
                    "Bound viewer to image {} with {} markers",
                    image.id,
                    markers.len()
                );
                self.state = SurfaceState::Bound(Binding {
                    instance,
                    image,
                    ready: false,
                });
            }
            Err(e) => {
                log::error!("Error initializing viewer for image {}: {}", image.id, e);
                self.state = SurfaceState::Failed {
                    image,
                    reason: e.to_string(),
                };
            }
        }
    }

    /// Rebind only if `image` is a different snapshot from the bound one.
    ///
    /// A failed surface stays failed for the same snapshot.
    pub fn refresh(&mut self, image: &Arc<ProjectImage>) {
        let current = match &self.state {
            SurfaceState::Bound(binding) => Some(&binding.image),
            SurfaceState::Failed { image, .. } => Some(image),
            SurfaceState::Unbound => None,
        };
        if current.is_some_and(|c| Arc::ptr_eq(c, image)) {
            return;
        }
        self.bind(Arc::clone(image));
    }

    /// Release the viewer instance, if any.
    ///
    /// Placement mode belongs to the binding it was entered on and ends
    /// here; the navigation lock is the host's and is kept.
    pub fn unbind(&mut self) {
        self.state = SurfaceState::Unbound;
        self.placing = false;
        self.candidate = None;
    }

    /// The image currently bound or that failed to bind.
    pub fn image(&self) -> Option<&Arc<ProjectImage>> {
        match &self.state {
            SurfaceState::Bound(binding) => Some(&binding.image),
            SurfaceState::Failed { image, .. } => Some(image),
            SurfaceState::Unbound => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(&self.state, SurfaceState::Bound(b) if b.ready)
    }

    /// Why the last bind failed, if it did.
    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            SurfaceState::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn instance_mut(&mut self) -> Option<&mut E::Instance> {
        match &mut self.state {
            SurfaceState::Bound(binding) => Some(&mut binding.instance),
            _ => None,
        }
    }

    pub fn is_placing(&self) -> bool {
        self.placing
    }

    /// Stop hotspot markers from navigating, without entering placement
    /// mode. Held for the whole placement workflow so the source image
    /// stays on screen while a target is chosen.
    pub fn lock_navigation(&mut self, locked: bool) {
        self.navigation_locked = locked;
    }

    /// Position of the candidate marker, if one is shown.
    pub fn candidate(&self) -> Option<Spherical> {
        self.candidate
    }

    /// Drain the bound instance's events and handle each.
    pub fn pump(&mut self, project: &Project) -> Vec<SurfaceEvent> {
        let events = match &mut self.state {
            SurfaceState::Bound(binding) => binding.instance.poll_events(),
            _ => return Vec::new(),
        };
        events
            .into_iter()
            .filter_map(|event| self.handle_event(event, project))
            .collect()
    }

    /// Handle one viewer event. `project` is the current state of the
    /// project the bound image belongs to.
    pub fn handle_event(&mut self, event: ViewerEvent, project: &Project) -> Option<SurfaceEvent> {
        match event {
            ViewerEvent::Ready => {
                let SurfaceState::Bound(binding) = &mut self.state else {
                    return None;
                };
                binding.ready = true;
                log::debug!("Viewer is ready for image {}", binding.image.id);
                Some(SurfaceEvent::Ready)
            }
            ViewerEvent::MarkerSelected(marker_id) => self.follow_marker(&marker_id, project),
            ViewerEvent::RawClick { x, y } => self.pick_point(x, y),
        }
    }

    /// Resolve a selected marker to its target image and switch to it.
    fn follow_marker(&mut self, marker_id: &str, project: &Project) -> Option<SurfaceEvent> {
        if marker_id == CANDIDATE_MARKER_ID {
            return None;
        }
        if self.placing || self.navigation_locked {
            log::debug!("Ignoring marker {} while placing a hotspot", marker_id);
            return None;
        }
        let SurfaceState::Bound(binding) = &mut self.state else {
            return None;
        };

        let Some(hotspot) = binding.image.hotspot(&HotspotId::from(marker_id)) else {
            log::debug!("No hotspot for marker {} on image {}", marker_id, binding.image.id);
            return None;
        };
        let Some(target) = project.image(&hotspot.target_image_id) else {
            log::debug!(
                "Hotspot {} points at missing image {}",
                hotspot.id,
                hotspot.target_image_id
            );
            return None;
        };

        if let Err(e) = binding.instance.switch_panorama(&target.url) {
            log::error!("Failed to switch panorama to image {}: {}", target.id, e);
            return None;
        }
        log::info!("Navigated from image {} to {}", binding.image.id, target.id);
        Some(SurfaceEvent::Navigated {
            hotspot: hotspot.id.clone(),
            target: target.id.clone(),
        })
    }

    /// In placement mode, move the candidate marker to the clicked point.
    fn pick_point(&mut self, x: f32, y: f32) -> Option<SurfaceEvent> {
        if !self.placing {
            return None;
        }
        let SurfaceState::Bound(binding) = &mut self.state else {
            return None;
        };

        let Some(position) = binding.instance.map_screen_point_to_spherical(x, y) else {
            log::debug!("Click at ({:.1}, {:.1}) missed the panorama", x, y);
            return None;
        };
        if !position.is_finite() {
            log::debug!("Ignoring non-finite click position {:?}", position);
            return None;
        }

        // Absence of a previous candidate is fine.
        let _ = binding.instance.remove_marker(CANDIDATE_MARKER_ID);
        match binding
            .instance
            .add_marker(MarkerSpec::candidate(CANDIDATE_MARKER_ID, position))
        {
            Ok(()) => self.candidate = Some(position),
            Err(e) => {
                log::warn!("Failed to show candidate marker: {}", e);
                self.candidate = None;
            }
        }
        Some(SurfaceEvent::PointPicked(position))
    }

    fn clear_candidate(&mut self) {
        if let SurfaceState::Bound(binding) = &mut self.state {
            if let Err(e) = binding.instance.remove_marker(CANDIDATE_MARKER_ID) {
                log::debug!("No candidate marker to remove: {}", e);
            }
        }
        self.candidate = None;
    }
}

impl<E: ViewerEngine> PlacementSurface for PanoramaSurface<E> {
    fn enter_placement(&mut self) {
        self.placing = true;
    }

    fn leave_placement(&mut self) {
        self.placing = false;
        self.clear_candidate();
    }
}
