// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project storage.
//!
//! Each project lives in its own directory under the store root: the
//! record as `project.json` and the compressed photo as `original.jpg`.

use crate::error::StoreError;
use crate::models::project::{Project, ProjectId};
#[cfg(test)]
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const RECORD_FILE: &str = "project.json";
const IMAGE_FILE: &str = "original.jpg";

/// Persistence boundary for projects.
pub trait ProjectStore {
    /// Load every stored project, oldest first.
    fn load_all(&self) -> Result<Vec<Project>, StoreError>;

    /// Insert or replace a project.
    fn save(&mut self, project: &Project) -> Result<(), StoreError>;

    /// Remove a project and everything it owns. Missing projects are not an error.
    fn delete(&mut self, id: ProjectId) -> Result<(), StoreError>;
}

/// Directory-backed JSON store.
#[derive(Debug, Clone)]
pub struct JsonProjectStore {
    root: PathBuf,
}

impl JsonProjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn project_dir(&self, id: ProjectId) -> PathBuf {
        self.root.join(id.to_string())
    }

    fn load_one(dir: &Path) -> Result<Project, StoreError> {
        let json = std::fs::read_to_string(dir.join(RECORD_FILE))?;
        let mut project: Project = serde_json::from_str(&json)?;
        project.original_image = std::fs::read(dir.join(IMAGE_FILE))?;
        Ok(project)
    }
}

impl ProjectStore for JsonProjectStore {
    fn load_all(&self) -> Result<Vec<Project>, StoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut projects = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let dir = entry?.path();
            if !dir.join(RECORD_FILE).is_file() {
                continue;
            }
            // One unreadable project should not hide the others.
            match Self::load_one(&dir) {
                Ok(project) => projects.push(project),
                Err(e) => log::error!("Skipping project in {}: {}", dir.display(), e),
            }
        }
        projects.sort_by_key(|p| p.created_at);
        log::info!("Loaded {} projects from {}", projects.len(), self.root.display());
        Ok(projects)
    }

    fn save(&mut self, project: &Project) -> Result<(), StoreError> {
        let dir = self.project_dir(project.id);
        std::fs::create_dir_all(&dir)?;
        let json = serde_json::to_string_pretty(project)?;
        write_replacing(&dir, RECORD_FILE, json.as_bytes())?;
        write_replacing(&dir, IMAGE_FILE, &project.original_image)?;
        Ok(())
    }

    fn delete(&mut self, id: ProjectId) -> Result<(), StoreError> {
        let dir = self.project_dir(id);
        if dir.exists() {
            std::fs::remove_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Write `bytes` to `dir/name` through a temporary file in the same
/// directory, so a crash leaves either the old file or the new one.
fn write_replacing(dir: &Path, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(dir.join(name)).map_err(|e| e.error)?;
    Ok(())
}

/// In-memory store for repository tests.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    projects: BTreeMap<ProjectId, Project>,
}

#[cfg(test)]
impl ProjectStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<Project>, StoreError> {
        let mut projects: Vec<Project> = self.projects.values().cloned().collect();
        projects.sort_by_key(|p| p.created_at);
        Ok(projects)
    }

    fn save(&mut self, project: &Project) -> Result<(), StoreError> {
        self.projects.insert(project.id, project.clone());
        Ok(())
    }

    fn delete(&mut self, id: ProjectId) -> Result<(), StoreError> {
        self.projects.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{aspect_ratio::AspectRatio, crop_rect::CropRect, frame::Frame};

    fn sample_project() -> Project {
        let mut project = Project::new("harbour".to_string(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
        project
            .frames
            .push(Frame::new(CropRect::DEFAULT, AspectRatio::Free).unwrap());
        project
            .frames
            .push(Frame::new(CropRect::new(0.2, 0.2, 0.4, 0.3), AspectRatio::FourThree).unwrap());
        project
    }

    #[test]
    fn test_json_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonProjectStore::new(dir.path());
        let project = sample_project();

        store.save(&project).unwrap();
        let loaded = store.load_all().unwrap();

        assert_eq!(loaded, vec![project]);
    }

    #[test]
    fn test_json_store_keeps_image_out_of_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonProjectStore::new(dir.path());
        let project = sample_project();
        store.save(&project).unwrap();

        let record = std::fs::read_to_string(
            dir.path().join(project.id.to_string()).join(RECORD_FILE),
        )
        .unwrap();
        assert!(!record.contains("original_image"));
        assert!(record.contains("\"crop_rect\""));
        assert!(record.contains("\"4:3\""));
    }

    #[test]
    fn test_json_store_delete_cascades() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonProjectStore::new(dir.path());
        let project = sample_project();
        store.save(&project).unwrap();

        store.delete(project.id).unwrap();
        assert!(store.load_all().unwrap().is_empty());
        assert!(!dir.path().join(project.id.to_string()).exists());

        // Deleting again is fine.
        store.delete(project.id).unwrap();
    }

    #[test]
    fn test_json_store_save_replaces_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonProjectStore::new(dir.path());
        let mut project = sample_project();
        store.save(&project).unwrap();

        project.original_image = vec![9, 9, 9, 9];
        store.save(&project).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded[0].original_image, vec![9, 9, 9, 9]);
    }

    #[test]
    fn test_json_store_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonProjectStore::new(dir.path());
        let project = sample_project();
        store.save(&project).unwrap();
        store.save(&project).unwrap();

        let mut names: Vec<String> = std::fs::read_dir(dir.path().join(project.id.to_string()))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec![IMAGE_FILE.to_string(), RECORD_FILE.to_string()]);
    }

    #[test]
    fn test_missing_root_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonProjectStore::new(dir.path().join("not-yet"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_memory_store_replaces_on_save() {
        let mut store = MemoryStore::default();
        let mut project = sample_project();
        store.save(&project).unwrap();

        project.frames.clear();
        store.save(&project).unwrap();

        let loaded = store.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].frames.is_empty());
    }
}
