// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame sheet serialization and deserialization.
//!
//! This module handles exporting and importing a project's frame list in
//! YAML and JSON formats, so a set of frames can be shared or reapplied to
//! another photo.

use crate::models::{frame::Frame, project::Project};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Portable list of frames, without the photo itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSheet {
    pub project: String,
    pub frames: Vec<Frame>,
}

impl FrameSheet {
    pub fn from_project(project: &Project) -> Self {
        Self {
            project: project.name.clone(),
            frames: project.frames.clone(),
        }
    }

    /// Clamp out-of-range frames and drop ones with non-finite values.
    fn sanitized(self) -> Self {
        let total = self.frames.len();
        let frames: Vec<Frame> = self.frames.into_iter().filter_map(Frame::sanitized).collect();
        if frames.len() != total {
            log::warn!("Dropped {} unreadable frames from sheet", total - frames.len());
        }
        Self {
            project: self.project,
            frames,
        }
    }
}

/// Export a frame sheet to YAML format.
pub fn export_yaml(sheet: &FrameSheet, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(sheet)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a frame sheet to JSON format.
pub fn export_json(sheet: &FrameSheet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(sheet)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import a frame sheet from YAML format.
pub fn import_yaml(path: &Path) -> Result<FrameSheet> {
    let yaml = std::fs::read_to_string(path)?;
    let sheet: FrameSheet = serde_yaml::from_str(&yaml)?;
    Ok(sheet.sanitized())
}

/// Import a frame sheet from JSON format.
pub fn import_json(path: &Path) -> Result<FrameSheet> {
    let json = std::fs::read_to_string(path)?;
    let sheet: FrameSheet = serde_json::from_str(&json)?;
    Ok(sheet.sanitized())
}

/// Export by file extension (`.yaml`, `.yml` or `.json`).
pub fn export_by_extension(sheet: &FrameSheet, path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => export_yaml(sheet, path),
        Some("json") => export_json(sheet, path),
        other => anyhow::bail!("Unsupported file extension: {:?}", other),
    }
}

/// Import by file extension (`.yaml`, `.yml` or `.json`).
pub fn import_by_extension(path: &Path) -> Result<FrameSheet> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => import_yaml(path),
        Some("json") => import_json(path),
        other => anyhow::bail!("Unsupported file extension: {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{aspect_ratio::AspectRatio, crop_rect::CropRect};

    fn sheet() -> FrameSheet {
        FrameSheet {
            project: "street".to_string(),
            frames: vec![
                Frame::new(CropRect::DEFAULT, AspectRatio::Free).unwrap(),
                Frame::new(CropRect::new(0.1, 0.2, 0.4, 0.3), AspectRatio::FourThree).unwrap(),
            ],
        }
    }

    #[test]
    fn test_yaml_and_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let original = sheet();

        for name in ["frames.yaml", "frames.json"] {
            let path = dir.path().join(name);
            export_by_extension(&original, &path).unwrap();
            let imported = import_by_extension(&path).unwrap();
            assert_eq!(imported, original, "{name}");
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.txt");
        assert!(export_by_extension(&sheet(), &path).is_err());
        assert!(import_by_extension(&path).is_err());
    }

    #[test]
    fn test_import_clamps_out_of_range_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.json");
        std::fs::write(
            &path,
            r#"{
                "project": "hand-edited",
                "frames": [{
                    "id": "0b7f4a34-1f3e-4f0a-8d1e-2a9c5d6e7f80",
                    "created_at": "2025-05-01T09:30:00Z",
                    "crop_rect": { "x": -0.2, "y": 0.5, "width": 0.3, "height": 0.9 },
                    "aspect_ratio": "free"
                }]
            }"#,
        )
        .unwrap();

        let imported = import_json(&path).unwrap();
        assert_eq!(imported.frames.len(), 1);
        let rect = imported.frames[0].crop_rect();
        assert!(rect.is_valid());
        assert_eq!(rect.x, 0.0);
        assert!((rect.y - 0.1).abs() < 1e-9);
    }
}
