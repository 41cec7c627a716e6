// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Committed crop frames.

use super::{aspect_ratio::AspectRatio, crop_rect::CropRect};
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type FrameId = Uuid;

/// A committed crop rectangle and the aspect-ratio preset it was made with.
///
/// Frames are immutable. To change one, remove it and commit a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    id: FrameId,
    created_at: DateTime<Utc>,
    crop_rect: CropRect,
    aspect_ratio: AspectRatio,
}

impl Frame {
    /// Create a frame, rejecting rectangles that break the invariant.
    pub fn new(crop_rect: CropRect, aspect_ratio: AspectRatio) -> Result<Self, ValidationError> {
        crop_rect.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            crop_rect,
            aspect_ratio,
        })
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn crop_rect(&self) -> &CropRect {
        &self.crop_rect
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// Repair a frame read from storage.
    ///
    /// Finite out-of-range rectangles are clamped. Non-finite ones give
    /// `None` and the frame should be dropped.
    pub fn sanitized(mut self) -> Option<Self> {
        self.crop_rect = self.crop_rect.sanitized()?;
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frame_validates() {
        assert!(Frame::new(CropRect::DEFAULT, AspectRatio::Free).is_ok());
        assert!(Frame::new(CropRect::new(0.5, 0.5, 0.8, 0.8), AspectRatio::Free).is_err());
    }

    #[test]
    fn test_frames_get_unique_ids() {
        let a = Frame::new(CropRect::DEFAULT, AspectRatio::Square).unwrap();
        let b = Frame::new(CropRect::DEFAULT, AspectRatio::Square).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_sanitized_frame_keeps_identity() {
        let json = r#"{
            "id": "6f1c4b9e-3c1d-4a55-9a0e-0d4c3b2a1f00",
            "created_at": "2025-03-01T12:00:00Z",
            "crop_rect": { "x": 0.9, "y": 0.0, "width": 0.5, "height": 0.5 },
            "aspect_ratio": "1:1"
        }"#;
        let frame: Frame = serde_json::from_str(json).unwrap();
        let id = frame.id();
        let repaired = frame.sanitized().unwrap();
        assert_eq!(repaired.id(), id);
        assert!(repaired.crop_rect().is_valid());
        assert_eq!(repaired.aspect_ratio(), AspectRatio::Square);
    }
}
