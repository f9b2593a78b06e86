// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! PanoLink - linked 360° panorama tours
//!
//! Projects hold uploaded panoramas; hotspots placed on one panorama jump
//! the viewer to another. The library covers the project store, the
//! panorama surface that wraps a viewer engine, and the interactive
//! workflow for placing a hotspot.

pub mod config;
pub mod io;
pub mod models;
pub mod placement;
pub mod store;
pub mod surface;
pub mod util;
pub mod viewer;

pub use placement::{HotspotPlacement, PlacementError, PlacementState, PostPlacement};
pub use store::ProjectStore;
pub use surface::{PanoramaSurface, SurfaceEvent};
