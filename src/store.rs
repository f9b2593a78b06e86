// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! In-memory project store.
//!
//! The store is the only component allowed to mutate projects. It is owned
//! by the application and passed by reference to whatever needs it.
//!
//! Every mutation is copy-on-write: the affected project (and, for hotspot
//! edits, the affected image) is cloned, modified and swapped into a new
//! project collection. Untouched projects and images remain shared with the
//! previous collection, so a holder of an older `Arc` can tell exactly what
//! changed with `Arc::ptr_eq` and never sees a half-applied update.
//!
//! Missing keys are not errors: reads return `None` and mutations on a
//! missing project or image do nothing.

use crate::models::{Hotspot, HotspotDraft, HotspotId, ImageId, Project, ProjectId, ProjectImage};
use std::sync::Arc;

/// Owner of all projects for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Arc<Vec<Arc<Project>>>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a project named `name` (trimmed).
    ///
    /// Returns `None` without touching the collection when the trimmed name
    /// is empty.
    pub fn create_project(&mut self, name: &str) -> Option<Arc<Project>> {
        let name = name.trim();
        if name.is_empty() {
            log::debug!("Ignoring project with empty name");
            return None;
        }

        let project = Arc::new(Project::new(name.to_string()));
        let mut projects = Vec::with_capacity(self.projects.len() + 1);
        projects.extend(self.projects.iter().cloned());
        projects.push(Arc::clone(&project));
        self.projects = Arc::new(projects);

        log::info!("Created project '{}' ({})", project.name, project.id);
        Some(project)
    }

    /// All projects in creation order.
    pub fn list_projects(&self) -> &[Arc<Project>] {
        &self.projects
    }

    /// The current project collection. Cheap to clone and never mutated in
    /// place, so it can be kept around and compared against later snapshots.
    pub fn snapshot(&self) -> Arc<Vec<Arc<Project>>> {
        Arc::clone(&self.projects)
    }

    pub fn get_project(&self, id: &ProjectId) -> Option<&Arc<Project>> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// Append a panorama to a project. Returns the new image id, or `None`
    /// when the project does not exist.
    pub fn add_image(&mut self, project_id: &ProjectId, url: impl Into<String>) -> Option<ImageId> {
        let url = url.into();
        self.update_project(project_id, |project| {
            let image = ProjectImage::new(url);
            let id = image.id.clone();
            project.images.push(Arc::new(image));
            log::info!(
                "Added image {} to project {}, total: {}",
                id,
                project.id,
                project.images.len()
            );
            Some(id)
        })
    }

    /// Append a hotspot to `source_image_id` inside `project_id`.
    ///
    /// Returns the new hotspot id, or `None` when the project or source image
    /// does not exist, or when the draft points back at its own source.
    /// Whether the target exists is checked when the hotspot is followed,
    /// not here.
    pub fn add_hotspot(
        &mut self,
        project_id: &ProjectId,
        source_image_id: &ImageId,
        draft: HotspotDraft,
    ) -> Option<HotspotId> {
        if &draft.target_image_id == source_image_id {
            log::warn!("Rejected self-referencing hotspot on image {}", source_image_id);
            return None;
        }

        self.update_project(project_id, |project| {
            let index = project.image_index(source_image_id)?;
            let mut image = ProjectImage::clone(&project.images[index]);
            let hotspot = Hotspot::from_draft(draft);
            let id = hotspot.id.clone();
            log::info!(
                "Added hotspot {} on image {} -> {} at ({:.3}, {:.3})",
                id,
                image.id,
                hotspot.target_image_id,
                hotspot.longitude,
                hotspot.latitude
            );
            image.hotspots.push(hotspot);
            project.images[index] = Arc::new(image);
            Some(id)
        })
    }

    /// Clone the project, let `edit` change it, and publish a new collection
    /// if `edit` reports success.
    fn update_project<T>(
        &mut self,
        project_id: &ProjectId,
        edit: impl FnOnce(&mut Project) -> Option<T>,
    ) -> Option<T> {
        let Some(index) = self.projects.iter().position(|p| &p.id == project_id) else {
            log::debug!("Project {} not found, ignoring update", project_id);
            return None;
        };

        let mut project = Project::clone(&self.projects[index]);
        let result = edit(&mut project)?;

        let mut projects = Vec::clone(&self.projects);
        projects[index] = Arc::new(project);
        self.projects = Arc::new(projects);
        Some(result)
    }
}
