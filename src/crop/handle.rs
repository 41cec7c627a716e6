// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drag handles of the crop rectangle.

use crate::util::geometry::PixelRect;

/// One of the 9 control points of a crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    Center,
}

impl Handle {
    /// Handles drawn as grips, clockwise from the top-left corner.
    pub const GRIPS: [Handle; 8] = [
        Handle::TopLeft,
        Handle::Top,
        Handle::TopRight,
        Handle::Right,
        Handle::BottomRight,
        Handle::Bottom,
        Handle::BottomLeft,
        Handle::Left,
    ];

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Handle::TopLeft | Handle::TopRight | Handle::BottomLeft | Handle::BottomRight
        )
    }

    /// Position of the handle as fractions of the rectangle's size.
    pub fn position_fraction(self) -> (f64, f64) {
        match self {
            Handle::TopLeft => (0.0, 0.0),
            Handle::Top => (0.5, 0.0),
            Handle::TopRight => (1.0, 0.0),
            Handle::Right => (1.0, 0.5),
            Handle::BottomRight => (1.0, 1.0),
            Handle::Bottom => (0.5, 1.0),
            Handle::BottomLeft => (0.0, 1.0),
            Handle::Left => (0.0, 0.5),
            Handle::Center => (0.5, 0.5),
        }
    }

    /// The point that stays put while this handle resizes the rectangle,
    /// as fractions of the rectangle's size.
    pub fn fixed_fraction(self) -> (f64, f64) {
        let (fx, fy) = self.position_fraction();
        (1.0 - fx, 1.0 - fy)
    }

    /// Find the handle under `(px, py)` for a rectangle projected to pixels.
    ///
    /// Corners win over edge midpoints, which win over the interior.
    pub fn hit_test(rect: &PixelRect, px: f64, py: f64, tolerance: f64) -> Option<Handle> {
        let near = |handle: Handle| {
            let (fx, fy) = handle.position_fraction();
            let hx = rect.x + fx * rect.width;
            let hy = rect.y + fy * rect.height;
            (px - hx).abs() <= tolerance && (py - hy).abs() <= tolerance
        };

        let corners = Handle::GRIPS.into_iter().filter(|h| h.is_corner());
        let edges = Handle::GRIPS.into_iter().filter(|h| !h.is_corner());
        if let Some(handle) = corners.chain(edges).find(|h| near(*h)) {
            return Some(handle);
        }

        rect.contains(px, py).then_some(Handle::Center)
    }
}
