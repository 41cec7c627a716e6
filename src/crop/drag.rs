// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Per-handle drag rules.
//!
//! Every update is computed from the rectangle captured at drag start
//! (the anchor) and the total normalized delta since then, never from the
//! previous intermediate result.
//!
//! Order of constraints: the handle rule clamps to bounds and `MIN_SIZE`,
//! the aspect ratio is then enforced around the handle's fixed point, and
//! a result thinner than `MIN_SIZE` is grown uniformly about that point.
//! A final clamp shifts the rectangle back inside the unit square, which
//! only moves the fixed point in extreme drags near an edge.

use super::handle::Handle;
use crate::models::aspect_ratio::{constrain_to_ratio, grow_to_min_size, AspectRatio};
use crate::models::crop_rect::{CropRect, MIN_SIZE};

/// Apply a drag of `handle` by `(dx, dy)` to `anchor`.
pub fn apply(anchor: &CropRect, handle: Handle, dx: f64, dy: f64, aspect: AspectRatio) -> CropRect {
    if !dx.is_finite() || !dy.is_finite() {
        return *anchor;
    }
    let resized = resize(anchor, handle, dx, dy);
    let constrained = match aspect.ratio() {
        Some(ratio) if handle != Handle::Center => enforce_ratio(&resized, handle, ratio),
        _ => resized,
    };
    constrained.sanitized().unwrap_or(*anchor)
}

/// Handle-specific geometry, without any ratio.
pub fn resize(a: &CropRect, handle: Handle, dx: f64, dy: f64) -> CropRect {
    match handle {
        Handle::Center => CropRect {
            x: bound(a.x + dx, 0.0, 1.0 - a.width),
            y: bound(a.y + dy, 0.0, 1.0 - a.height),
            ..*a
        },
        Handle::TopLeft => {
            let (x, width) = move_left(a, dx);
            let (y, height) = move_top(a, dy);
            CropRect::new(x, y, width, height)
        }
        Handle::TopRight => {
            let width = move_right(a, dx);
            let (y, height) = move_top(a, dy);
            CropRect::new(a.x, y, width, height)
        }
        Handle::BottomLeft => {
            let (x, width) = move_left(a, dx);
            let height = move_bottom(a, dy);
            CropRect::new(x, a.y, width, height)
        }
        Handle::BottomRight => {
            CropRect::new(a.x, a.y, move_right(a, dx), move_bottom(a, dy))
        }
        Handle::Top => {
            let (y, height) = move_top(a, dy);
            CropRect { y, height, ..*a }
        }
        Handle::Bottom => CropRect {
            height: move_bottom(a, dy),
            ..*a
        },
        Handle::Left => {
            let (x, width) = move_left(a, dx);
            CropRect { x, width, ..*a }
        }
        Handle::Right => CropRect {
            width: move_right(a, dx),
            ..*a
        },
    }
}

// The moving edge is clamped once; position and size both derive from it.

fn move_left(a: &CropRect, dx: f64) -> (f64, f64) {
    let right = a.right();
    let x = bound(a.x + dx, 0.0, right - MIN_SIZE);
    (x, right - x)
}

fn move_right(a: &CropRect, dx: f64) -> f64 {
    let right = bound(a.right() + dx, a.x + MIN_SIZE, 1.0);
    right - a.x
}

fn move_top(a: &CropRect, dy: f64) -> (f64, f64) {
    let bottom = a.bottom();
    let y = bound(a.y + dy, 0.0, bottom - MIN_SIZE);
    (y, bottom - y)
}

fn move_bottom(a: &CropRect, dy: f64) -> f64 {
    let bottom = bound(a.bottom() + dy, a.y + MIN_SIZE, 1.0);
    bottom - a.y
}

/// Enforce `ratio` on a resized rectangle, keeping the handle's fixed point.
///
/// Corners shrink the overshooting dimension. Edges derive the free
/// dimension from the dragged one and cap it to the room around the fixed
/// point.
fn enforce_ratio(rect: &CropRect, handle: Handle, ratio: f64) -> CropRect {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return *rect;
    }
    let (fx, fy) = handle.fixed_fraction();
    let pivot_x = rect.x + fx * rect.width;
    let pivot_y = rect.y + fy * rect.height;

    let (mut width, mut height) = match handle {
        Handle::Left | Handle::Right => (rect.width, rect.width / ratio),
        Handle::Top | Handle::Bottom => (rect.height * ratio, rect.height),
        _ => {
            let c = constrain_to_ratio(rect, ratio);
            (c.width, c.height)
        }
    };

    let scale = 1.0_f64
        .min(room(pivot_x, fx) / width)
        .min(room(pivot_y, fy) / height);
    width *= scale;
    height *= scale;
    let (width, height) = grow_to_min_size(width, height);

    CropRect::new(pivot_x - fx * width, pivot_y - fy * height, width, height)
}

/// Largest extent along one axis that keeps `pivot` at `fraction` of the
/// extent and stays inside `[0, 1]`.
fn room(pivot: f64, fraction: f64) -> f64 {
    let before = if fraction > 0.0 { pivot / fraction } else { f64::INFINITY };
    let after = if fraction < 1.0 {
        (1.0 - pivot) / (1.0 - fraction)
    } else {
        f64::INFINITY
    };
    before.min(after).max(0.0)
}

/// Clamp without panicking when the bounds cross.
fn bound(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}
