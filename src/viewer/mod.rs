// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Panorama viewer engine contract.
//!
//! The rendering engine is an external collaborator. This module describes
//! the capabilities the rest of the crate relies on; [`equirect`] provides an
//! egui implementation for the desktop application.
//!
//! Engines report user interaction as [`ViewerEvent`]s queued on the
//! instance. The owner drains them with [`ViewerInstance::poll_events`], so
//! events can only ever be observed through the instance that produced
//! them: once an instance is destroyed its pending events go with it.

pub mod equirect;
#[cfg(test)]
pub(crate) mod testing;

use crate::models::Spherical;
use thiserror::Error;

/// How a marker should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// A committed hotspot that navigates when selected.
    Hotspot,
    /// The temporary marker shown while a hotspot is being placed.
    Candidate,
}

/// A marker anchored on the panorama sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub id: String,
    pub position: Spherical,
    pub style: MarkerStyle,
}

impl MarkerSpec {
    pub fn hotspot(id: impl Into<String>, position: Spherical) -> Self {
        Self {
            id: id.into(),
            position,
            style: MarkerStyle::Hotspot,
        }
    }

    pub fn candidate(id: impl Into<String>, position: Spherical) -> Self {
        Self {
            id: id.into(),
            position,
            style: MarkerStyle::Candidate,
        }
    }
}

/// Something the user did inside a viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// The panorama finished loading.
    Ready,
    /// A marker was clicked.
    MarkerSelected(String),
    /// The viewport was clicked at a screen position.
    RawClick { x: f32, y: f32 },
}

/// Errors raised by a viewer engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The panorama could not be read or decoded
    #[error("failed to load panorama: {0}")]
    Panorama(#[from] crate::io::media::MediaError),

    /// No marker with this id exists
    #[error("marker not found: {0}")]
    MarkerNotFound(String),

    /// A marker with this id already exists
    #[error("duplicate marker: {0}")]
    DuplicateMarker(String),

    /// The instance has already been destroyed
    #[error("viewer instance destroyed")]
    Destroyed,
}

/// Factory for viewer instances.
pub trait ViewerEngine {
    /// Where an instance is mounted.
    type Container;
    type Instance: ViewerInstance;

    /// Build a viewer showing `panorama_url` with `markers` already placed.
    fn create(
        &mut self,
        container: &Self::Container,
        panorama_url: &str,
        markers: &[MarkerSpec],
    ) -> Result<Self::Instance, EngineError>;
}

/// A live viewer bound to one panorama.
pub trait ViewerInstance {
    /// Show another panorama in the same viewer.
    fn switch_panorama(&mut self, url: &str) -> Result<(), EngineError>;

    fn add_marker(&mut self, marker: MarkerSpec) -> Result<(), EngineError>;

    /// Fails with [`EngineError::MarkerNotFound`] when `id` is absent.
    fn remove_marker(&mut self, id: &str) -> Result<(), EngineError>;

    /// Convert a screen point to sphere coordinates, or `None` if the point
    /// is not on the rendered panorama.
    fn map_screen_point_to_spherical(&self, x: f32, y: f32) -> Option<Spherical>;

    /// Take all events queued since the last call.
    fn poll_events(&mut self) -> Vec<ViewerEvent>;

    /// Release the instance. Calling it more than once has no effect.
    fn destroy(&mut self);
}
