// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Domain data: projects, panoramas and hotspots.

pub mod hotspot;
pub mod ids;
pub mod project;

pub use hotspot::{Hotspot, HotspotDraft, Spherical};
pub use ids::{HotspotId, ImageId, ProjectId};
pub use project::{Project, ProjectImage};
