// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings are read once at startup from the file named by the
//! `PANOLINK_CONFIG` environment variable, in YAML or JSON depending on the
//! extension. Every field has a default, so a partial file is fine.

use crate::io::upload::DEFAULT_MAX_UPLOAD_BYTES;
use crate::placement::PostPlacement;
use crate::viewer::equirect::DEFAULT_MARKER_RADIUS;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable holding the settings file path.
pub const CONFIG_ENV: &str = "PANOLINK_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show the target image right after a hotspot is placed.
    pub auto_advance_after_placement: bool,
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: u64,
    /// Marker hit radius in the viewer, in points.
    pub marker_radius: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_advance_after_placement: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            marker_radius: DEFAULT_MARKER_RADIUS,
        }
    }
}

impl Settings {
    /// Load settings from a YAML or JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        let text = std::fs::read_to_string(path)?;
        let settings = match extension {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
            Some("json") => serde_json::from_str(&text)?,
            _ => bail!("Unsupported settings file extension: {:?}", extension),
        };
        Ok(settings)
    }

    /// Load from `PANOLINK_CONFIG`, falling back to defaults.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        let path = Path::new(&path);
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn post_placement(&self) -> PostPlacement {
        if self.auto_advance_after_placement {
            PostPlacement::AdvanceToTarget
        } else {
            PostPlacement::Stay
        }
    }
}
