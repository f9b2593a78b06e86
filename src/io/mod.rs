// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for panorama media and uploads.

pub mod media;
pub mod upload;
