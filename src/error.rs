// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for the crop core and its collaborators.

use crate::models::crop_rect::CropRect;
use thiserror::Error;
use uuid::Uuid;

/// A crop rectangle that breaks the normalized-bounds or min-size invariant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("crop rectangle contains a non-finite value")]
    NonFinite,

    #[error("crop rectangle {width:.3}x{height:.3} is smaller than {min}")]
    BelowMinSize { width: f64, height: f64, min: f64 },

    #[error("crop rectangle {0:?} leaves the unit square")]
    OutOfBounds(CropRect),
}

/// Failures reported by the image store and export surface.
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("crop region does not intersect the image")]
    EmptyCrop,
}

/// Failures from a `ProjectStore`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures from the frame collection manager.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("unknown project {0}")]
    UnknownProject(Uuid),

    #[error("invalid frame: {0}")]
    InvalidFrame(#[from] ValidationError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
