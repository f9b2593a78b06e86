// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the PanoLink application.

pub mod canvas;
pub mod graph;
pub mod projects;
pub mod toolbar;
