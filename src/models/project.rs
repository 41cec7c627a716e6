// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project state management.
//!
//! A project owns one imported photo (as compressed JPEG bytes) and the
//! ordered list of frames committed over it.

use super::frame::{Frame, FrameId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProjectId = Uuid;

/// A photo and its committed frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Compressed original image. Persisted next to the record, not in it.
    #[serde(skip)]
    pub original_image: Vec<u8>,
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl Project {
    /// Create an empty project for a freshly imported photo.
    pub fn new(name: String, original_image: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
            original_image,
            frames: Vec::new(),
        }
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id() == id)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}
