// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module converts between normalized positions on an equirectangular
//! panorama (0.0 to 1.0 on both axes, origin top-left) and sphere
//! coordinates in radians.

use crate::models::Spherical;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Width-to-height ratio of an equirectangular panorama.
pub const EQUIRECT_ASPECT: f32 = 2.0;

/// Convert a normalized image position to yaw/pitch.
///
/// The horizontal centre of the image faces yaw 0; the top edge is pitch
/// +π/2.
pub fn normalized_to_spherical(u: f64, v: f64) -> Spherical {
    Spherical {
        yaw: (u - 0.5) * TAU,
        pitch: (0.5 - v) * PI,
    }
}

/// Convert yaw/pitch to a normalized image position.
///
/// Yaw is wrapped into one turn so markers stored outside `[-π, π)` still
/// land on the image. Pitch is clamped to the poles.
pub fn spherical_to_normalized(position: Spherical) -> (f64, f64) {
    let yaw = (position.yaw + PI).rem_euclid(TAU) - PI;
    let pitch = position.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    (yaw / TAU + 0.5, 0.5 - pitch / PI)
}

/// Largest size with the given aspect ratio that fits in `available`.
pub fn fit_to_aspect(available: (f32, f32), aspect: f32) -> (f32, f32) {
    let (width, height) = available;
    if height <= 0.0 || width <= 0.0 {
        return (0.0, 0.0);
    }
    if width / height > aspect {
        // Too wide - fit to height
        (height * aspect, height)
    } else {
        // Too tall - fit to width
        (width, width / aspect)
    }
}
