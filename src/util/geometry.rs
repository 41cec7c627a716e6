// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides utilities for coordinate transformations between
//! pixel coordinates and normalized coordinates.

use crate::models::crop_rect::CropRect;

/// Size of a pixel container (a view, a canvas or an image).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either axis is zero or negative.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A rectangle in pixel space, relative to its container's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
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

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Inclusive containment test.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// Project a normalized rectangle into a pixel container.
pub fn to_absolute(rect: &CropRect, container: Size) -> PixelRect {
    PixelRect {
        x: rect.x * container.width,
        y: rect.y * container.height,
        width: rect.width * container.width,
        height: rect.height * container.height,
    }
}

/// Convert a pixel rectangle back to normalized coordinates.
///
/// A degenerate container yields `CropRect::DEFAULT` instead of dividing
/// by zero.
pub fn from_absolute(pixel: &PixelRect, container: Size) -> CropRect {
    if container.is_degenerate() {
        return CropRect::DEFAULT;
    }
    CropRect {
        x: pixel.x / container.width,
        y: pixel.y / container.height,
        width: pixel.width / container.width,
        height: pixel.height / container.height,
    }
}

/// Convert a gesture translation in pixels to a normalized delta.
pub fn normalized_delta(dx_px: f64, dy_px: f64, container: Size) -> (f64, f64) {
    if container.is_degenerate() {
        return (0.0, 0.0);
    }
    (dx_px / container.width, dy_px / container.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_roundtrip() {
        let sizes = [
            Size::new(1920.0, 1080.0),
            Size::new(375.0, 812.0),
            Size::new(1.0, 3.0),
        ];
        let rects = [
            CropRect::DEFAULT,
            CropRect::new(0.0, 0.0, 1.0, 1.0),
            CropRect::new(0.33, 0.27, 0.1, 0.6),
        ];

        for size in sizes {
            for rect in rects {
                let back = from_absolute(&to_absolute(&rect, size), size);
                assert!(back.approx_eq(&rect, 1e-9), "{rect:?} in {size:?}");
            }
        }
    }

    #[test]
    fn test_to_absolute_scales_each_axis() {
        let px = to_absolute(&CropRect::DEFAULT, Size::new(1000.0, 500.0));
        assert!((px.x - 100.0).abs() < 1e-9);
        assert!((px.y - 50.0).abs() < 1e-9);
        assert!((px.width - 800.0).abs() < 1e-9);
        assert!((px.height - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_absolute_degenerate_container() {
        let pixel = PixelRect::new(10.0, 10.0, 50.0, 50.0);

        let rect = from_absolute(&pixel, Size::new(0.0, 0.0));
        assert_eq!(rect, CropRect::DEFAULT);

        let rect = from_absolute(&pixel, Size::new(640.0, -1.0));
        assert_eq!(rect, CropRect::DEFAULT);
        assert!(!rect.x.is_nan());
    }

    #[test]
    fn test_normalized_delta() {
        let (dx, dy) = normalized_delta(-120.0, 60.0, Size::new(400.0, 300.0));
        assert!((dx + 0.3).abs() < 1e-12);
        assert!((dy - 0.2).abs() < 1e-12);

        assert_eq!(normalized_delta(5.0, 5.0, Size::new(0.0, 10.0)), (0.0, 0.0));
    }

    #[test]
    fn test_pixel_rect_contains_is_inclusive() {
        let rect = PixelRect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(30.0, 30.0));
        assert!(!rect.contains(30.1, 15.0));
    }
}
