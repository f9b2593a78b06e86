// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot data structures.
//!
//! A hotspot is a directed edge from the image that owns it to a target
//! image in the same project, anchored at a point on the source panorama.

use super::ids::{HotspotId, ImageId};

/// A position on the viewing sphere, in radians.
///
/// `yaw` is the longitude (horizontal angle), `pitch` the latitude
/// (vertical angle, positive is up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub yaw: f64,
    pub pitch: f64,
}

impl Spherical {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Both angles are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.yaw.is_finite() && self.pitch.is_finite()
    }
}

/// The caller-supplied part of a hotspot; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotDraft {
    pub target_image_id: ImageId,
    pub longitude: f64,
    pub latitude: f64,
}

impl HotspotDraft {
    pub fn new(target_image_id: ImageId, position: Spherical) -> Self {
        Self {
            target_image_id,
            longitude: position.yaw,
            latitude: position.pitch,
        }
    }
}

/// A committed navigation edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub id: HotspotId,
    pub target_image_id: ImageId,
    pub longitude: f64,
    pub latitude: f64,
}

impl Hotspot {
    /// Create a hotspot with a freshly generated id.
    pub fn from_draft(draft: HotspotDraft) -> Self {
        Self {
            id: HotspotId::generate(),
            target_image_id: draft.target_image_id,
            longitude: draft.longitude,
            latitude: draft.latitude,
        }
    }

    /// Anchor point on the source panorama, exactly as captured.
    pub fn position(&self) -> Spherical {
        Spherical::new(self.longitude, self.latitude)
    }
}
