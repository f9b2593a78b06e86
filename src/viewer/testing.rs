// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Recording viewer engine for tests.

use super::{EngineError, MarkerSpec, ViewerEngine, ViewerEvent, ViewerInstance};
use crate::models::Spherical;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Everything the engine and its instances were asked to do.
#[derive(Debug, Default)]
pub struct EngineLog {
    pub created: Vec<(String, Vec<MarkerSpec>)>,
    pub switched: Vec<String>,
    pub added: Vec<MarkerSpec>,
    pub removed: Vec<String>,
    pub destroyed: usize,
    pub live: usize,
    /// Events handed out by the next `poll_events` call.
    pub pending: VecDeque<ViewerEvent>,
    /// Answer for every `map_screen_point_to_spherical` call.
    pub mapping: Option<Spherical>,
    pub fail_create: bool,
}

#[derive(Clone, Default)]
pub struct RecordingEngine {
    pub log: Rc<RefCell<EngineLog>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mapping(position: Spherical) -> Self {
        let engine = Self::new();
        engine.log.borrow_mut().mapping = Some(position);
        engine
    }
}

impl ViewerEngine for RecordingEngine {
    type Container = ();
    type Instance = RecordingInstance;

    fn create(
        &mut self,
        _container: &(),
        panorama_url: &str,
        markers: &[MarkerSpec],
    ) -> Result<RecordingInstance, EngineError> {
        let mut log = self.log.borrow_mut();
        if log.fail_create {
            return Err(EngineError::Destroyed);
        }
        log.created.push((panorama_url.to_string(), markers.to_vec()));
        log.live += 1;
        Ok(RecordingInstance {
            log: Rc::clone(&self.log),
            markers: markers.iter().map(|m| m.id.clone()).collect(),
            destroyed: false,
        })
    }
}

pub struct RecordingInstance {
    log: Rc<RefCell<EngineLog>>,
    markers: Vec<String>,
    destroyed: bool,
}

impl ViewerInstance for RecordingInstance {
    fn switch_panorama(&mut self, url: &str) -> Result<(), EngineError> {
        self.log.borrow_mut().switched.push(url.to_string());
        Ok(())
    }

    fn add_marker(&mut self, marker: MarkerSpec) -> Result<(), EngineError> {
        if self.markers.contains(&marker.id) {
            return Err(EngineError::DuplicateMarker(marker.id));
        }
        self.markers.push(marker.id.clone());
        self.log.borrow_mut().added.push(marker);
        Ok(())
    }

    fn remove_marker(&mut self, id: &str) -> Result<(), EngineError> {
        self.log.borrow_mut().removed.push(id.to_string());
        let before = self.markers.len();
        self.markers.retain(|m| m != id);
        if self.markers.len() == before {
            return Err(EngineError::MarkerNotFound(id.to_string()));
        }
        Ok(())
    }

    fn map_screen_point_to_spherical(&self, _x: f32, _y: f32) -> Option<Spherical> {
        self.log.borrow().mapping
    }

    fn poll_events(&mut self) -> Vec<ViewerEvent> {
        self.log.borrow_mut().pending.drain(..).collect()
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        let mut log = self.log.borrow_mut();
        log.destroyed += 1;
        log.live -= 1;
    }
}
