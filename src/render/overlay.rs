// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Multi-frame overlay layout.
//!
//! Projects a project's frames into a pixel container and works out the
//! dark mask around them. Painting `mask` dark gives the same picture as
//! darkening the whole container and then erasing every frame, without
//! needing an erase blend mode. Building a layout has no side effects, so
//! the canvas rebuilds it on every paint.

use crate::models::frame::{Frame, FrameId};
use crate::util::geometry::{to_absolute, PixelRect, Size};

/// A frame projected into the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRegion {
    pub frame_id: FrameId,
    pub bounds: PixelRect,
    pub selected: bool,
}

/// Everything the canvas needs to draw and hit-test committed frames.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayout {
    pub container: Size,
    /// In frame-list order, which is also draw order.
    pub regions: Vec<FrameRegion>,
    /// Disjoint rectangles covering the container minus every frame.
    pub mask: Vec<PixelRect>,
}

impl OverlayLayout {
    pub fn build(frames: &[Frame], container: Size, selected: Option<FrameId>) -> Self {
        if container.is_degenerate() {
            return Self {
                container,
                regions: Vec::new(),
                mask: Vec::new(),
            };
        }

        let regions: Vec<FrameRegion> = frames
            .iter()
            .map(|frame| FrameRegion {
                frame_id: frame.id(),
                bounds: to_absolute(frame.crop_rect(), container),
                selected: selected == Some(frame.id()),
            })
            .collect();

        let cutouts: Vec<PixelRect> = regions.iter().map(|r| r.bounds).collect();
        let mask = mask_around(&cutouts, container);

        Self {
            container,
            regions,
            mask,
        }
    }

    /// The frame under a point, if any.
    ///
    /// Where frames overlap, the topmost one wins: the last in the list,
    /// since it is drawn last.
    pub fn hit_test(&self, px: f64, py: f64) -> Option<FrameId> {
        self.regions
            .iter()
            .rev()
            .find(|region| region.bounds.contains(px, py))
            .map(|region| region.frame_id)
    }

    /// Resolve one completed tap to the frame it selects.
    ///
    /// Meant to be called once per finished click, not per pointer move,
    /// so each tap yields at most one selection.
    pub fn tap(&self, px: f64, py: f64) -> Option<FrameId> {
        let hit = self.hit_test(px, py);
        match hit {
            Some(id) => log::debug!("Tap at ({:.1}, {:.1}) selected frame {}", px, py, id),
            None => log::debug!("Tap at ({:.1}, {:.1}) hit no frame", px, py),
        }
        hit
    }
}

/// Split the container minus the union of `cutouts` into disjoint rectangles.
///
/// The cut-out edges form a grid; every grid cell outside all cut-outs is
/// dark, and dark cells are merged into runs along each row.
fn mask_around(cutouts: &[PixelRect], container: Size) -> Vec<PixelRect> {
    let clipped: Vec<PixelRect> = cutouts
        .iter()
        .filter_map(|c| clip(c, container))
        .collect();

    let xs = grid_lines(container.width, clipped.iter().flat_map(|c| [c.x, c.right()]));
    let ys = grid_lines(container.height, clipped.iter().flat_map(|c| [c.y, c.bottom()]));

    let mut mask = Vec::new();
    for row in ys.windows(2) {
        let (top, bottom) = (row[0], row[1]);
        let mid_y = (top + bottom) / 2.0;
        let mut run: Option<(f64, f64)> = None;

        for col in xs.windows(2) {
            let (left, right) = (col[0], col[1]);
            let mid_x = (left + right) / 2.0;
            let covered = clipped.iter().any(|c| c.contains(mid_x, mid_y));

            run = match (run, covered) {
                (Some((start, _)), false) => Some((start, right)),
                (None, false) => Some((left, right)),
                (Some((start, end)), true) => {
                    mask.push(PixelRect::new(start, top, end - start, bottom - top));
                    None
                }
                (None, true) => None,
            };
        }
        if let Some((start, end)) = run {
            mask.push(PixelRect::new(start, top, end - start, bottom - top));
        }
    }
    mask
}

fn clip(rect: &PixelRect, container: Size) -> Option<PixelRect> {
    let x0 = rect.x.max(0.0);
    let y0 = rect.y.max(0.0);
    let x1 = rect.right().min(container.width);
    let y1 = rect.bottom().min(container.height);
    (x1 > x0 && y1 > y0).then(|| PixelRect::new(x0, y0, x1 - x0, y1 - y0))
}

/// Sorted, de-duplicated grid coordinates spanning `[0, extent]`.
fn grid_lines(extent: f64, edges: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut lines: Vec<f64> = [0.0, extent].into_iter().chain(edges).collect();
    lines.sort_by(|a, b| a.total_cmp(b));
    lines.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    lines
}
