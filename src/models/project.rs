// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project and image data.
//!
//! A project owns an ordered list of panoramas; each panorama owns the
//! hotspots that start on it. Together they form a directed graph whose
//! nodes are images and whose edges are hotspots.
//!
//! Images are held behind `Arc` so the store can replace a single image on
//! mutation while every other image stays shared between the old and the
//! new project value.

use super::hotspot::Hotspot;
use super::ids::{HotspotId, ImageId, ProjectId};
use std::sync::Arc;

/// A 360° panorama inside a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectImage {
    pub id: ImageId,
    /// Data URI or remote URL of the panorama.
    pub url: String,
    pub hotspots: Vec<Hotspot>,
}

impl ProjectImage {
    /// Create an image with a fresh id and no hotspots.
    pub fn new(url: String) -> Self {
        Self {
            id: ImageId::generate(),
            url,
            hotspots: Vec::new(),
        }
    }

    pub fn hotspot(&self, id: &HotspotId) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| &h.id == id)
    }
}

/// A named set of linked panoramas.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub images: Vec<Arc<ProjectImage>>,
}

impl Project {
    /// Create an empty project with a fresh id.
    pub fn new(name: String) -> Self {
        Self {
            id: ProjectId::generate(),
            name,
            images: Vec::new(),
        }
    }

    pub fn image(&self, id: &ImageId) -> Option<&Arc<ProjectImage>> {
        self.images.iter().find(|img| &img.id == id)
    }

    /// Position of an image in upload order.
    pub fn image_index(&self, id: &ImageId) -> Option<usize> {
        self.images.iter().position(|img| &img.id == id)
    }

    /// The default panorama shown when a project is opened.
    pub fn entry_image(&self) -> Option<&Arc<ProjectImage>> {
        self.images.first()
    }

    /// Hotspots need a source and a distinct target.
    pub fn can_link_images(&self) -> bool {
        self.images.len() >= 2
    }

    /// Every edge of the navigation graph as `(source, hotspot)`.
    pub fn edges(&self) -> impl Iterator<Item = (&ImageId, &Hotspot)> {
        self.images
            .iter()
            .flat_map(|img| img.hotspots.iter().map(move |h| (&img.id, h)))
    }

    /// Hotspots whose target does not resolve to an image of this project.
    pub fn dangling_hotspots(&self) -> impl Iterator<Item = (&ImageId, &Hotspot)> {
        self.edges()
            .filter(move |(_, h)| self.image(&h.target_image_id).is_none())
    }
}
