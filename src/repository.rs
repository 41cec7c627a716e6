// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project repository and frame collection manager.
//!
//! The repository is the single owner of the loaded projects. Every
//! mutation goes through it, is validated, and is written to the backing
//! store before it returns.

use crate::error::{RepositoryError, StoreError};
use crate::io::persistence::ProjectStore;
use crate::models::{
    aspect_ratio::AspectRatio,
    crop_rect::CropRect,
    frame::{Frame, FrameId},
    project::{Project, ProjectId},
};

pub struct ProjectRepository<S: ProjectStore> {
    store: S,
    projects: Vec<Project>,
}

impl<S: ProjectStore> ProjectRepository<S> {
    /// Load all projects from `store`.
    ///
    /// Frames that break the crop invariant are clamped back into range,
    /// or dropped when they hold non-finite values.
    pub fn open(store: S) -> Result<Self, StoreError> {
        let mut projects = store.load_all()?;
        for project in &mut projects {
            let repair = repair_frames(project);
            if repair.clamped > 0 || repair.dropped > 0 {
                log::warn!(
                    "Project '{}': clamped {} frames, dropped {}",
                    project.name,
                    repair.clamped,
                    repair.dropped
                );
            }
        }
        Ok(Self { store, projects })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create an empty project for an imported photo.
    pub fn create_project(
        &mut self,
        name: String,
        original_image: Vec<u8>,
    ) -> Result<ProjectId, RepositoryError> {
        let project = Project::new(name, original_image);
        self.store.save(&project)?;
        let id = project.id;
        log::info!("Created project '{}' ({})", project.name, id);
        self.projects.push(project);
        Ok(id)
    }

    /// Delete a project and all of its frames. Returns false if it was not there.
    pub fn delete_project(&mut self, id: ProjectId) -> Result<bool, RepositoryError> {
        let Some(index) = self.projects.iter().position(|p| p.id == id) else {
            return Ok(false);
        };
        self.store.delete(id)?;
        let project = self.projects.remove(index);
        log::info!(
            "Deleted project '{}' with {} frames",
            project.name,
            project.frames.len()
        );
        Ok(true)
    }

    /// Append a frame to the end of a project's frame list.
    pub fn add_frame(&mut self, project_id: ProjectId, frame: Frame) -> Result<(), RepositoryError> {
        frame.crop_rect().validate()?;
        let index = self.index_of(project_id)?;

        let mut updated = self.projects[index].clone();
        updated.frames.push(frame);
        self.store.save(&updated)?;
        log::info!(
            "Added frame to '{}', total: {}",
            updated.name,
            updated.frames.len()
        );
        self.projects[index] = updated;
        Ok(())
    }

    /// Turn a working rectangle into a frame and append it.
    pub fn commit(
        &mut self,
        project_id: ProjectId,
        rect: CropRect,
        aspect_ratio: AspectRatio,
    ) -> Result<FrameId, RepositoryError> {
        let frame = Frame::new(rect, aspect_ratio)?;
        let id = frame.id();
        self.add_frame(project_id, frame)?;
        Ok(id)
    }

    /// Remove a frame by id. Removing a missing frame is a no-op returning false.
    pub fn remove_frame(
        &mut self,
        project_id: ProjectId,
        frame_id: FrameId,
    ) -> Result<bool, RepositoryError> {
        let index = self.index_of(project_id)?;
        let Some(position) = self.projects[index]
            .frames
            .iter()
            .position(|f| f.id() == frame_id)
        else {
            return Ok(false);
        };

        let mut updated = self.projects[index].clone();
        updated.frames.remove(position);
        self.store.save(&updated)?;
        log::info!(
            "Removed frame from '{}', total: {}",
            updated.name,
            updated.frames.len()
        );
        self.projects[index] = updated;
        Ok(true)
    }

    /// Give a project a new name. Blank or unchanged names are ignored.
    pub fn rename_project(&mut self, id: ProjectId, name: &str) -> Result<bool, RepositoryError> {
        let name = name.trim();
        let index = self.index_of(id)?;
        if name.is_empty() || self.projects[index].name == name {
            return Ok(false);
        }
        let mut project = self.projects[index].clone();
        log::info!("Renamed project '{}' to '{}'", project.name, name);
        project.name = name.to_string();
        self.update(project)?;
        Ok(true)
    }

    /// Replace a stored project wholesale.
    ///
    /// Rejected without any change if one of its frames is invalid.
    pub fn update(&mut self, project: Project) -> Result<(), RepositoryError> {
        for frame in &project.frames {
            frame.crop_rect().validate()?;
        }
        let index = self.index_of(project.id)?;
        self.store.save(&project)?;
        self.projects[index] = project;
        Ok(())
    }

    fn index_of(&self, id: ProjectId) -> Result<usize, RepositoryError> {
        self.projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepositoryError::UnknownProject(id))
    }
}

#[derive(Debug, Default, PartialEq)]
struct Repair {
    clamped: usize,
    dropped: usize,
}

/// Bring every stored frame back inside the crop invariant.
fn repair_frames(project: &mut Project) -> Repair {
    let mut repair = Repair::default();
    project.frames = std::mem::take(&mut project.frames)
        .into_iter()
        .filter_map(|frame| {
            if frame.crop_rect().is_valid() {
                return Some(frame);
            }
            let fixed = frame.sanitized();
            match fixed {
                Some(_) => repair.clamped += 1,
                None => repair.dropped += 1,
            }
            fixed
        })
        .collect();
    repair
}
