// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Aspect-ratio presets and the ratio constraint.
//!
//! Ratios are expressed in normalized space: a `Square` frame is as many
//! image-widths wide as it is image-heights tall.

use super::crop_rect::{CropRect, MIN_SIZE};
use serde::{Deserialize, Serialize};

/// Aspect-ratio preset for a crop frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "4:3")]
    FourThree,
    #[serde(rename = "16:9")]
    SixteenNine,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:2")]
    ThreeTwo,
}

impl AspectRatio {
    /// All presets in menu order.
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Free,
        AspectRatio::FourThree,
        AspectRatio::SixteenNine,
        AspectRatio::Square,
        AspectRatio::ThreeTwo,
    ];

    /// Width over height, or `None` for the unconstrained preset.
    pub fn ratio(self) -> Option<f64> {
        match self {
            AspectRatio::Free => None,
            AspectRatio::FourThree => Some(4.0 / 3.0),
            AspectRatio::SixteenNine => Some(16.0 / 9.0),
            AspectRatio::Square => Some(1.0),
            AspectRatio::ThreeTwo => Some(3.0 / 2.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Free => "Free",
            AspectRatio::FourThree => "4:3",
            AspectRatio::SixteenNine => "16:9",
            AspectRatio::Square => "1:1",
            AspectRatio::ThreeTwo => "3:2",
        }
    }

    /// Shrink one dimension so that `width / height` equals the ratio.
    ///
    /// The origin is kept. A rectangle wider than the target loses width,
    /// otherwise it loses height, so the area never grows.
    pub fn constrain(self, rect: &CropRect) -> CropRect {
        match self.ratio() {
            Some(ratio) => constrain_to_ratio(rect, ratio),
            None => *rect,
        }
    }

    /// Re-fit `rect` to this ratio around its own center.
    ///
    /// Used once when the preset changes. Each axis is capped at twice the
    /// smaller center-to-edge distance so the result stays inside the unit
    /// square. A result thinner than `MIN_SIZE` is grown uniformly and then
    /// shifted back inside bounds, so near an edge the center can move.
    pub fn fit_centered(self, rect: &CropRect) -> CropRect {
        let Some(ratio) = self.ratio() else {
            return *rect;
        };
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return *rect;
        }

        let (cx, cy) = rect.center();
        let max_width = 2.0 * cx.min(1.0 - cx);
        let max_height = 2.0 * cy.min(1.0 - cy);
        if max_width <= 0.0 || max_height <= 0.0 {
            return *rect;
        }

        let constrained = self.constrain(rect);
        let mut width = constrained.width.min(max_width);
        let mut height = constrained.height.min(max_height);
        if width / height > ratio {
            width = height * ratio;
        } else {
            height = width / ratio;
        }
        let (width, height) = grow_to_min_size(width, height);

        let fitted = CropRect::new(cx - width / 2.0, cy - height / 2.0, width, height);
        fitted.sanitized().unwrap_or(*rect)
    }
}

/// Shrink one dimension of `rect` so that `width / height == ratio`.
pub(crate) fn constrain_to_ratio(rect: &CropRect, ratio: f64) -> CropRect {
    if rect.width <= 0.0 || rect.height <= 0.0 || ratio <= 0.0 {
        return *rect;
    }
    let mut out = *rect;
    if rect.width / rect.height > ratio {
        out.width = rect.height * ratio;
    } else {
        out.height = rect.width / ratio;
    }
    out
}

/// Scale `(width, height)` up uniformly until both reach `MIN_SIZE`.
pub(crate) fn grow_to_min_size(width: f64, height: f64) -> (f64, f64) {
    if width >= MIN_SIZE && height >= MIN_SIZE {
        return (width, height);
    }
    if width <= 0.0 || height <= 0.0 {
        return (width.max(MIN_SIZE), height.max(MIN_SIZE));
    }
    let scale = (MIN_SIZE / width).max(MIN_SIZE / height);
    (width * scale, height * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::crop_rect::EPSILON;

    fn sample_rects() -> Vec<CropRect> {
        vec![
            CropRect::DEFAULT,
            CropRect::new(0.1, 0.1, 0.8, 0.4),
            CropRect::new(0.0, 0.0, 1.0, 1.0),
            CropRect::new(0.2, 0.05, 0.15, 0.9),
            CropRect::new(0.6, 0.7, 0.4, 0.3),
        ]
    }

    #[test]
    fn test_free_is_identity() {
        for rect in sample_rects() {
            assert_eq!(AspectRatio::Free.constrain(&rect), rect);
            assert_eq!(AspectRatio::Free.fit_centered(&rect), rect);
        }
    }

    #[test]
    fn test_constrain_hits_ratio_without_growing() {
        for preset in AspectRatio::ALL.iter().skip(1) {
            let target = preset.ratio().unwrap();
            for rect in sample_rects() {
                let out = preset.constrain(&rect);
                assert!((out.width / out.height - target).abs() < 1e-9);
                assert!(out.area() <= rect.area() + EPSILON);
                assert_eq!((out.x, out.y), (rect.x, rect.y));
            }
        }
    }

    #[test]
    fn test_constrain_picks_dimension_to_shrink() {
        let wide = CropRect::new(0.0, 0.0, 0.8, 0.2);
        let out = AspectRatio::Square.constrain(&wide);
        assert!((out.width - 0.2).abs() < EPSILON);
        assert!((out.height - 0.2).abs() < EPSILON);

        let tall = CropRect::new(0.0, 0.0, 0.3, 0.9);
        let out = AspectRatio::FourThree.constrain(&tall);
        assert!((out.width - 0.3).abs() < EPSILON);
        assert!((out.height - 0.225).abs() < EPSILON);
    }

    #[test]
    fn test_fit_centered_square_scenario() {
        let rect = CropRect::new(0.1, 0.1, 0.8, 0.4);
        let out = AspectRatio::Square.fit_centered(&rect);
        assert!(out.approx_eq(&CropRect::new(0.3, 0.1, 0.4, 0.4), 1e-9));
    }

    #[test]
    fn test_fit_centered_preserves_center() {
        for preset in AspectRatio::ALL {
            for rect in sample_rects() {
                let out = preset.fit_centered(&rect);
                let (bx, by) = rect.center();
                let (ax, ay) = out.center();
                assert!((bx - ax).abs() < 1e-9, "{preset:?} {rect:?}");
                assert!((by - ay).abs() < 1e-9, "{preset:?} {rect:?}");
                assert!(out.is_valid());
                if let Some(target) = preset.ratio() {
                    assert!((out.width / out.height - target).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_fit_centered_grows_thin_result() {
        let rect = CropRect::new(0.45, 0.1, 0.1, 0.8);
        let out = AspectRatio::SixteenNine.fit_centered(&rect);
        assert!(out.is_valid());
        assert!((out.width / out.height - 16.0 / 9.0).abs() < 1e-9);
        let (cx, _) = out.center();
        assert!((cx - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fit_centered_near_edge_shifts_instead_of_bending_ratio() {
        // Center (0.05, 0.5): room for width 0.1 only, but 16:9 at MIN_SIZE
        // height needs width 0.178, so the grown rect is pushed off the edge.
        let rect = CropRect::new(0.0, 0.3, 0.1, 0.4);
        let out = AspectRatio::SixteenNine.fit_centered(&rect);

        assert!(out.approx_eq(&CropRect::new(0.0, 0.45, 0.16 / 0.9, 0.1), 1e-9));
        assert!(out.is_valid());
        assert!((out.width / out.height - 16.0 / 9.0).abs() < 1e-9);
        let (cx, cy) = out.center();
        assert!((cy - 0.5).abs() < 1e-9);
        assert!(cx > 0.05 + 1e-3);
    }

    #[test]
    fn test_serde_uses_ratio_labels() {
        let json = serde_json::to_string(&AspectRatio::SixteenNine).unwrap();
        assert_eq!(json, "\"16:9\"");
        let parsed: AspectRatio = serde_json::from_str("\"free\"").unwrap();
        assert_eq!(parsed, AspectRatio::Free);
    }
}
