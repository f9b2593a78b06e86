// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot placement workflow.
//!
//! Placing a hotspot takes three user actions: start from the image being
//! shown (the source), pick a different image as the target, then click a
//! point on the source panorama. The click commits the edge to the store.
//!
//! ```text
//!            begin            select_target(≠ source)        report_click
//! (none) ───────────► SelectingTarget ─────────────► AwaitingClick ─────────► Idle
//!                           │                              │
//!                           └──────────── cancel ──────────┴──────────────► Idle
//! ```
//!
//! The workflow drives the source surface through [`PlacementSurface`]:
//! placement mode is switched on when a target is chosen and switched off
//! (removing any candidate marker) on commit or cancel.

use crate::models::{HotspotDraft, HotspotId, ImageId, Project, ProjectId, Spherical};
use crate::store::ProjectStore;
use thiserror::Error;

/// The side of a panorama surface the workflow needs.
pub trait PlacementSurface {
    /// Start turning clicks into candidate positions.
    fn enter_placement(&mut self);

    /// Stop placement mode and remove any candidate marker. Safe to call
    /// when not placing.
    fn leave_placement(&mut self);
}

/// Where the workflow currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementState {
    /// Finished or cancelled.
    Idle,
    /// Waiting for the user to choose a target image.
    SelectingTarget,
    /// Waiting for a click on the source panorama.
    AwaitingClick { target: ImageId },
}

/// What happens to the displayed image after a hotspot is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostPlacement {
    /// Keep showing the source image.
    #[default]
    Stay,
    /// Switch to the image the new hotspot points at.
    AdvanceToTarget,
}

/// Result of a committed placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementOutcome {
    /// Id of the new hotspot; `None` if the store declined the append.
    pub hotspot: Option<HotspotId>,
    pub source: ImageId,
    pub target: ImageId,
    pub position: Spherical,
    /// Image the host should display next, per [`PostPlacement`].
    pub advance_to: Option<ImageId>,
}

/// Reasons a placement cannot start.
#[derive(Error, Debug, PartialEq)]
pub enum PlacementError {
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error("image {image} not found in project {project}")]
    ImageNotFound { project: ProjectId, image: ImageId },

    #[error("a hotspot needs at least two images, project has {count}")]
    NotEnoughImages { count: usize },
}

/// Handle for one in-progress hotspot placement.
#[derive(Debug)]
pub struct HotspotPlacement {
    project_id: ProjectId,
    source: ImageId,
    state: PlacementState,
    post_action: PostPlacement,
}

impl HotspotPlacement {
    /// Whether "Add Hotspot" should be offered for `project` while
    /// `displayed` is on screen.
    pub fn can_begin(project: &Project, displayed: Option<&ImageId>) -> bool {
        project.can_link_images() && displayed.is_some_and(|id| project.image(id).is_some())
    }

    /// Start placing a hotspot on `source_image_id`.
    pub fn begin(
        store: &ProjectStore,
        project_id: &ProjectId,
        source_image_id: &ImageId,
        post_action: PostPlacement,
    ) -> Result<Self, PlacementError> {
        let project = store
            .get_project(project_id)
            .ok_or_else(|| PlacementError::ProjectNotFound(project_id.clone()))?;
        if project.image(source_image_id).is_none() {
            return Err(PlacementError::ImageNotFound {
                project: project_id.clone(),
                image: source_image_id.clone(),
            });
        }
        if !project.can_link_images() {
            return Err(PlacementError::NotEnoughImages {
                count: project.images.len(),
            });
        }

        log::info!("Placing hotspot from image {}", source_image_id);
        Ok(Self {
            project_id: project_id.clone(),
            source: source_image_id.clone(),
            state: PlacementState::SelectingTarget,
            post_action,
        })
    }

    pub fn state(&self) -> &PlacementState {
        &self.state
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn source(&self) -> &ImageId {
        &self.source
    }

    /// Chosen target, once past target selection.
    pub fn target(&self) -> Option<&ImageId> {
        match &self.state {
            PlacementState::AwaitingClick { target } => Some(target),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == PlacementState::Idle
    }

    /// Whether `image_id` may be chosen as the target right now.
    pub fn accepts_target(&self, image_id: &ImageId) -> bool {
        self.state == PlacementState::SelectingTarget && image_id != &self.source
    }

    /// Choose the target image.
    ///
    /// Ignored unless selecting a target. Choosing the source itself, or an
    /// image that is not in the project, leaves the state unchanged.
    /// Returns whether the workflow moved on.
    pub fn select_target(
        &mut self,
        store: &ProjectStore,
        image_id: &ImageId,
        surface: &mut impl PlacementSurface,
    ) -> bool {
        if !self.accepts_target(image_id) {
            log::debug!("Ignoring target {} in state {:?}", image_id, self.state);
            return false;
        }
        let exists = store
            .get_project(&self.project_id)
            .is_some_and(|p| p.image(image_id).is_some());
        if !exists {
            log::debug!("Ignoring unknown target image {}", image_id);
            return false;
        }

        self.state = PlacementState::AwaitingClick {
            target: image_id.clone(),
        };
        surface.enter_placement();
        log::info!("Hotspot target {} selected, awaiting click", image_id);
        true
    }

    /// Commit the hotspot at `position` on the source image.
    ///
    /// Ignored unless awaiting a click. The workflow returns to idle whether
    /// or not the store accepted the hotspot.
    pub fn report_click(
        &mut self,
        store: &mut ProjectStore,
        position: Spherical,
        surface: &mut impl PlacementSurface,
    ) -> Option<PlacementOutcome> {
        let PlacementState::AwaitingClick { target } = &self.state else {
            log::debug!("Ignoring click in state {:?}", self.state);
            return None;
        };
        let target = target.clone();

        surface.leave_placement();
        self.state = PlacementState::Idle;

        let hotspot = store.add_hotspot(
            &self.project_id,
            &self.source,
            HotspotDraft::new(target.clone(), position),
        );
        if hotspot.is_none() {
            log::warn!("Store declined hotspot {} -> {}", self.source, target);
        }

        let advance_to = match self.post_action {
            PostPlacement::Stay => None,
            PostPlacement::AdvanceToTarget => Some(target.clone()),
        };
        Some(PlacementOutcome {
            hotspot,
            source: self.source.clone(),
            target,
            position,
            advance_to,
        })
    }

    /// Abandon the placement. Valid from any state.
    pub fn cancel(&mut self, surface: &mut impl PlacementSurface) {
        if self.state != PlacementState::Idle {
            log::info!("Hotspot placement cancelled");
        }
        self.state = PlacementState::Idle;
        surface.leave_placement();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{PanoramaSurface, SurfaceEvent, CANDIDATE_MARKER_ID};
    use crate::viewer::testing::RecordingEngine;
    use crate::viewer::ViewerEvent;
    use std::sync::Arc;

    /// Records calls made by the workflow.
    #[derive(Default)]
    struct FakeSurface {
        placing: bool,
        entered: usize,
        left: usize,
    }

    impl PlacementSurface for FakeSurface {
        fn enter_placement(&mut self) {
            self.placing = true;
            self.entered += 1;
        }

        fn leave_placement(&mut self) {
            self.placing = false;
            self.left += 1;
        }
    }

    fn tour() -> (ProjectStore, ProjectId, ImageId, ImageId) {
        let mut store = ProjectStore::new();
        let project_id = store.create_project("Tour").unwrap().id.clone();
        let a = store.add_image(&project_id, "a.jpg").unwrap();
        let b = store.add_image(&project_id, "b.jpg").unwrap();
        (store, project_id, a, b)
    }

    fn hotspots_on(store: &ProjectStore, project_id: &ProjectId, image: &ImageId) -> usize {
        store
            .get_project(project_id)
            .unwrap()
            .image(image)
            .unwrap()
            .hotspots
            .len()
    }

    #[test]
    fn test_begin_requires_two_images() {
        let mut store = ProjectStore::new();
        let project_id = store.create_project("Tour").unwrap().id.clone();
        let a = store.add_image(&project_id, "a.jpg").unwrap();

        let err = HotspotPlacement::begin(&store, &project_id, &a, PostPlacement::Stay).unwrap_err();
        assert_eq!(err, PlacementError::NotEnoughImages { count: 1 });
        assert!(!HotspotPlacement::can_begin(
            store.get_project(&project_id).unwrap(),
            Some(&a)
        ));
    }

    #[test]
    fn test_begin_with_missing_keys() {
        let (store, project_id, a, _) = tour();

        let err = HotspotPlacement::begin(&store, &ProjectId::from("nope"), &a, PostPlacement::Stay)
            .unwrap_err();
        assert!(matches!(err, PlacementError::ProjectNotFound(_)));

        let err = HotspotPlacement::begin(
            &store,
            &project_id,
            &ImageId::from("nope"),
            PostPlacement::Stay,
        )
        .unwrap_err();
        assert!(matches!(err, PlacementError::ImageNotFound { .. }));
    }

    #[test]
    fn test_can_begin_needs_displayed_source() {
        let (store, project_id, a, _) = tour();
        let project = store.get_project(&project_id).unwrap();

        assert!(HotspotPlacement::can_begin(project, Some(&a)));
        assert!(!HotspotPlacement::can_begin(project, None));
        assert!(!HotspotPlacement::can_begin(project, Some(&ImageId::from("x"))));
    }

    #[test]
    fn test_selecting_source_as_target_is_ignored() {
        let (store, project_id, a, _) = tour();
        let mut surface = FakeSurface::default();
        let mut placement =
            HotspotPlacement::begin(&store, &project_id, &a, PostPlacement::Stay).unwrap();

        assert!(!placement.select_target(&store, &a, &mut surface));
        assert_eq!(placement.state(), &PlacementState::SelectingTarget);
        assert!(!surface.placing);
    }

    #[test]
    fn test_selecting_unknown_target_is_ignored() {
        let (store, project_id, a, _) = tour();
        let mut surface = FakeSurface::default();
        let mut placement =
            HotspotPlacement::begin(&store, &project_id, &a, PostPlacement::Stay).unwrap();

        assert!(!placement.select_target(&store, &ImageId::from("ghost"), &mut surface));
        assert_eq!(placement.state(), &PlacementState::SelectingTarget);
    }

    #[test]
    fn test_select_target_enters_placement_mode() {
        let (store, project_id, a, b) = tour();
        let mut surface = FakeSurface::default();
        let mut placement =
            HotspotPlacement::begin(&store, &project_id, &a, PostPlacement::Stay).unwrap();

        assert!(placement.select_target(&store, &b, &mut surface));
        assert_eq!(placement.target(), Some(&b));
        assert!(surface.placing);

        // Target is fixed once chosen.
        assert!(!placement.accepts_target(&b));
        assert!(!placement.select_target(&store, &b, &mut surface));
        assert_eq!(surface.entered, 1);
    }

    #[test]
    fn test_click_before_target_is_ignored() {
        let (mut store, project_id, a, _) = tour();
        let mut surface = FakeSurface::default();
        let mut placement =
            HotspotPlacement::begin(&store, &project_id, &a, PostPlacement::Stay).unwrap();

        assert!(placement
            .report_click(&mut store, Spherical::new(1.0, 1.0), &mut surface)
            .is_none());
        assert_eq!(hotspots_on(&store, &project_id, &a), 0);
        assert_eq!(placement.state(), &PlacementState::SelectingTarget);
    }

    #[test]
    fn test_report_click_commits_and_returns_to_idle() {
        let (mut store, project_id, a, b) = tour();
        let mut surface = FakeSurface::default();
        let mut placement =
            HotspotPlacement::begin(&store, &project_id, &a, PostPlacement::Stay).unwrap();
        placement.select_target(&store, &b, &mut surface);

        let outcome = placement
            .report_click(&mut store, Spherical::new(1.2, 0.3), &mut surface)
            .unwrap();

        assert!(outcome.hotspot.is_some());
        assert_eq!(outcome.target, b);
        assert_eq!(outcome.advance_to, None);
        assert!(placement.is_idle());
        assert!(placement.target().is_none());
        assert!(!surface.placing);
        assert_eq!(hotspots_on(&store, &project_id, &a), 1);

        // A second click after committing does nothing.
        assert!(placement
            .report_click(&mut store, Spherical::new(0.0, 0.0), &mut surface)
            .is_none());
        assert_eq!(hotspots_on(&store, &project_id, &a), 1);
    }

    #[test]
    fn test_advance_to_target_post_action() {
        let (mut store, project_id, a, b) = tour();
        let mut surface = FakeSurface::default();
        let mut placement =
            HotspotPlacement::begin(&store, &project_id, &a, PostPlacement::AdvanceToTarget)
                .unwrap();
        placement.select_target(&store, &b, &mut surface);

        let outcome = placement
            .report_click(&mut store, Spherical::new(0.0, 0.0), &mut surface)
            .unwrap();
        assert_eq!(outcome.advance_to, Some(b));
    }

    #[test]
    fn test_store_miss_still_returns_to_idle() {
        let (store, project_id, a, b) = tour();
        let mut surface = FakeSurface::default();
        let mut placement =
            HotspotPlacement::begin(&store, &project_id, &a, PostPlacement::Stay).unwrap();
        placement.select_target(&store, &b, &mut surface);

        // The store is swapped for one that has never seen the project.
        let mut other = ProjectStore::new();
        let outcome = placement
            .report_click(&mut other, Spherical::new(0.0, 0.0), &mut surface)
            .unwrap();

        assert!(outcome.hotspot.is_none());
        assert!(placement.is_idle());
        assert_eq!(hotspots_on(&store, &project_id, &a), 0);
    }

    #[test]
    fn test_cancel_from_every_state() {
        let (mut store, project_id, a, b) = tour();

        // From SelectingTarget
        let mut surface = FakeSurface::default();
        let mut placement =
            HotspotPlacement::begin(&store, &project_id, &a, PostPlacement::Stay).unwrap();
        placement.cancel(&mut surface);
        assert!(placement.is_idle());
        assert_eq!(surface.left, 1);

        // From AwaitingClick
        let mut surface = FakeSurface::default();
        let mut placement =
            HotspotPlacement::begin(&store, &project_id, &a, PostPlacement::Stay).unwrap();
        placement.select_target(&store, &b, &mut surface);
        placement.cancel(&mut surface);
        assert!(placement.is_idle());
        assert!(placement.target().is_none());
        assert!(!surface.placing);

        // A click after cancelling does not commit anything.
        assert!(placement
            .report_click(&mut store, Spherical::new(0.0, 0.0), &mut surface)
            .is_none());
        assert_eq!(hotspots_on(&store, &project_id, &a), 0);

        // From Idle
        placement.cancel(&mut surface);
        assert!(placement.is_idle());
    }

    #[test]
    fn test_cancel_requests_candidate_removal() {
        let (store, project_id, a, b) = tour();
        let engine = RecordingEngine::with_mapping(Spherical::new(0.7, -0.1));
        let mut surface = PanoramaSurface::new(engine.clone(), ());
        let image = Arc::clone(store.get_project(&project_id).unwrap().image(&a).unwrap());
        surface.bind(image);

        let mut placement =
            HotspotPlacement::begin(&store, &project_id, &a, PostPlacement::Stay).unwrap();
        placement.select_target(&store, &b, &mut surface);
        let project = Arc::clone(store.get_project(&project_id).unwrap());
        let picked = surface.handle_event(ViewerEvent::RawClick { x: 3.0, y: 4.0 }, &project);
        assert!(matches!(picked, Some(SurfaceEvent::PointPicked(_))));
        assert!(surface.candidate().is_some());

        placement.cancel(&mut surface);

        assert!(placement.is_idle());
        assert!(!surface.is_placing());
        assert!(surface.candidate().is_none());
        assert_eq!(
            engine.log.borrow().removed.last().map(String::as_str),
            Some(CANDIDATE_MARKER_ID)
        );
    }

    #[test]
    fn test_end_to_end_tour() {
        let mut store = ProjectStore::new();
        let project_id = store.create_project("Tour").unwrap().id.clone();
        let a = store.add_image(&project_id, "data:image/jpeg;base64,QQ==").unwrap();
        let b = store.add_image(&project_id, "data:image/jpeg;base64,Qg==").unwrap();

        let project = Arc::clone(store.get_project(&project_id).unwrap());
        let order: Vec<_> = project.images.iter().map(|img| img.id.clone()).collect();
        assert_eq!(order, vec![a.clone(), b.clone()]);

        let engine = RecordingEngine::with_mapping(Spherical::new(1.2, 0.3));
        let mut surface = PanoramaSurface::new(engine.clone(), ());
        surface.bind(Arc::clone(project.image(&a).unwrap()));

        let mut placement =
            HotspotPlacement::begin(&store, &project_id, &a, PostPlacement::Stay).unwrap();
        assert!(placement.select_target(&store, &b, &mut surface));

        let position = match surface.handle_event(ViewerEvent::RawClick { x: 10.0, y: 20.0 }, &project)
        {
            Some(SurfaceEvent::PointPicked(position)) => position,
            other => panic!("expected a picked point, got {:?}", other),
        };
        placement.report_click(&mut store, position, &mut surface);
        assert_eq!(placement.state(), &PlacementState::Idle);

        let project = Arc::clone(store.get_project(&project_id).unwrap());
        let hotspots = &project.image(&a).unwrap().hotspots;
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].target_image_id, b);
        assert_eq!(hotspots[0].longitude, 1.2);
        assert_eq!(hotspots[0].latitude, 0.3);

        // The refreshed surface shows the new marker and follows it to B.
        surface.refresh(project.image(&a).unwrap());
        let marker = hotspots[0].id.to_string();
        let event = surface.handle_event(ViewerEvent::MarkerSelected(marker), &project);
        assert!(matches!(event, Some(SurfaceEvent::Navigated { target, .. }) if target == b));
        assert_eq!(
            engine.log.borrow().switched,
            vec!["data:image/jpeg;base64,Qg==".to_string()]
        );
    }

    #[test]
    fn test_empty_project_name_leaves_collection_unchanged() {
        let mut store = ProjectStore::new();
        store.create_project("Existing");
        let before = store.list_projects().len();

        assert!(store.create_project("").is_none());
        assert_eq!(store.list_projects().len(), before);
    }
}
