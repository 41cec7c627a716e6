// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Normalized crop rectangle.
//!
//! A `CropRect` stores its origin and size as fractions of the reference
//! image's width and height, so it is independent of any display
//! resolution. Every committed rectangle stays inside the unit square and
//! is at least `MIN_SIZE` wide and tall.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Smallest allowed width or height, as a fraction of the image axis.
pub const MIN_SIZE: f64 = 0.1;

/// Tolerance for invariant checks and float comparisons.
pub const EPSILON: f64 = 1e-9;

/// A rectangle in normalized image space (0.0 to 1.0 on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for CropRect {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CropRect {
    /// Starting rectangle for a new edit, also the fallback for degenerate
    /// coordinate conversions.
    pub const DEFAULT: CropRect = CropRect {
        x: 0.1,
        y: 0.1,
        width: 0.8,
        height: 0.8,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Width over height, or `None` when the height is not positive.
    pub fn ratio(&self) -> Option<f64> {
        (self.height > 0.0).then(|| self.width / self.height)
    }

    /// Check the normalized-bounds and minimum-size invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if ![self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ValidationError::NonFinite);
        }
        if self.width < MIN_SIZE - EPSILON || self.height < MIN_SIZE - EPSILON {
            return Err(ValidationError::BelowMinSize {
                width: self.width,
                height: self.height,
                min: MIN_SIZE,
            });
        }
        if self.x < -EPSILON
            || self.y < -EPSILON
            || self.right() > 1.0 + EPSILON
            || self.bottom() > 1.0 + EPSILON
        {
            return Err(ValidationError::OutOfBounds(*self));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Force the rectangle into the invariant.
    ///
    /// Sizes are clamped to `[MIN_SIZE, 1]` first, then the origin is
    /// shifted so the rectangle fits. Returns `None` for NaN or infinite
    /// input, which cannot be repaired meaningfully.
    pub fn sanitized(&self) -> Option<CropRect> {
        if ![self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
        {
            return None;
        }
        let width = self.width.clamp(MIN_SIZE, 1.0);
        let height = self.height.clamp(MIN_SIZE, 1.0);
        Some(CropRect {
            x: self.x.clamp(0.0, 1.0 - width),
            y: self.y.clamp(0.0, 1.0 - height),
            width,
            height,
        })
    }

    /// Component-wise comparison within `tolerance`.
    #[cfg(test)]
    pub fn approx_eq(&self, other: &CropRect, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}
