// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! In-progress crop edit session.
//!
//! The editor owns the working rectangle, the active aspect ratio and the
//! drag state machine. Gesture events must be fed in order; the editor is
//! not meant to be shared between threads.

use super::{drag, handle::Handle};
use crate::models::{aspect_ratio::AspectRatio, crop_rect::CropRect};
use crate::util::geometry::{normalized_delta, Size};

/// Drag state of an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { handle: Handle, anchor: CropRect },
}

/// One event from the gesture source.
///
/// `Change` carries the total translation in pixels since `Start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Start(Handle),
    Change { dx: f64, dy: f64 },
    End,
    Cancel,
}

/// Working state for a single crop rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct CropEditor {
    rect: CropRect,
    aspect_ratio: AspectRatio,
    state: DragState,
}

impl Default for CropEditor {
    fn default() -> Self {
        Self::new(AspectRatio::Free)
    }
}

impl CropEditor {
    /// Start from the default rectangle, fitted to `aspect_ratio`.
    pub fn new(aspect_ratio: AspectRatio) -> Self {
        Self {
            rect: aspect_ratio.fit_centered(&CropRect::DEFAULT),
            aspect_ratio,
            state: DragState::Idle,
        }
    }

    pub fn rect(&self) -> &CropRect {
        &self.rect
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    #[cfg(test)]
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn active_handle(&self) -> Option<Handle> {
        match self.state {
            DragState::Dragging { handle, .. } => Some(handle),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Feed one gesture event, with `container` the current on-screen size
    /// of the image the rectangle is drawn over.
    pub fn handle_gesture(&mut self, event: GestureEvent, container: Size) {
        match event {
            GestureEvent::Start(handle) => {
                log::debug!("Crop drag started on {:?}", handle);
                self.state = DragState::Dragging {
                    handle,
                    anchor: self.rect,
                };
            }
            GestureEvent::Change { dx, dy } => {
                if let DragState::Dragging { handle, anchor } = self.state {
                    let (ndx, ndy) = normalized_delta(dx, dy, container);
                    self.rect = drag::apply(&anchor, handle, ndx, ndy, self.aspect_ratio);
                }
            }
            GestureEvent::End => {
                if self.is_dragging() {
                    log::debug!("Crop drag ended at {:?}", self.rect);
                }
                self.state = DragState::Idle;
            }
            GestureEvent::Cancel => {
                if let DragState::Dragging { anchor, .. } = self.state {
                    log::debug!("Crop drag cancelled");
                    self.rect = anchor;
                }
                self.state = DragState::Idle;
            }
        }
    }

    /// Switch the aspect-ratio preset, re-fitting the rectangle about its
    /// center and discarding any drag in progress.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: AspectRatio) {
        self.state = DragState::Idle;
        self.aspect_ratio = aspect_ratio;
        self.rect = aspect_ratio.fit_centered(&self.rect);
    }

    /// Back to the default rectangle under the current preset.
    pub fn reset(&mut self) {
        *self = Self::new(self.aspect_ratio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Size = Size {
        width: 400.0,
        height: 300.0,
    };

    #[test]
    fn test_drag_session_lifecycle() {
        let mut editor = CropEditor::default();
        assert_eq!(editor.state(), DragState::Idle);

        editor.handle_gesture(GestureEvent::Start(Handle::BottomRight), VIEW);
        assert_eq!(editor.active_handle(), Some(Handle::BottomRight));

        editor.handle_gesture(GestureEvent::Change { dx: -120.0, dy: -90.0 }, VIEW);
        editor.handle_gesture(GestureEvent::End, VIEW);

        assert!(!editor.is_dragging());
        assert!(editor
            .rect()
            .approx_eq(&CropRect::new(0.1, 0.1, 0.5, 0.5), 1e-9));
    }

    #[test]
    fn test_updates_are_drift_free() {
        let mut stepped = CropEditor::default();
        stepped.handle_gesture(GestureEvent::Start(Handle::TopLeft), VIEW);
        for step in 1..=10 {
            let t = step as f64 * 30.0;
            stepped.handle_gesture(GestureEvent::Change { dx: t, dy: -t }, VIEW);
        }

        let mut direct = CropEditor::default();
        direct.handle_gesture(GestureEvent::Start(Handle::TopLeft), VIEW);
        direct.handle_gesture(GestureEvent::Change { dx: 300.0, dy: -300.0 }, VIEW);

        assert_eq!(stepped.rect(), direct.rect());
    }

    #[test]
    fn test_cancel_restores_anchor() {
        let mut editor = CropEditor::default();
        editor.handle_gesture(GestureEvent::Start(Handle::Center), VIEW);
        editor.handle_gesture(GestureEvent::Change { dx: 30.0, dy: 30.0 }, VIEW);
        assert_ne!(*editor.rect(), CropRect::DEFAULT);

        editor.handle_gesture(GestureEvent::Cancel, VIEW);
        assert_eq!(*editor.rect(), CropRect::DEFAULT);
        assert_eq!(editor.state(), DragState::Idle);
    }

    #[test]
    fn test_change_while_idle_is_ignored() {
        let mut editor = CropEditor::default();
        editor.handle_gesture(GestureEvent::Change { dx: 50.0, dy: 50.0 }, VIEW);
        assert_eq!(*editor.rect(), CropRect::DEFAULT);
    }

    #[test]
    fn test_degenerate_container_does_not_move_rect() {
        let mut editor = CropEditor::default();
        editor.handle_gesture(GestureEvent::Start(Handle::Right), VIEW);
        editor.handle_gesture(
            GestureEvent::Change { dx: 50.0, dy: 0.0 },
            Size::new(0.0, 0.0),
        );
        assert_eq!(*editor.rect(), CropRect::DEFAULT);
    }

    #[test]
    fn test_set_aspect_ratio_refits_and_stops_drag() {
        let mut editor = CropEditor::default();
        editor.handle_gesture(GestureEvent::Start(Handle::Bottom), VIEW);
        editor.handle_gesture(GestureEvent::Change { dx: 0.0, dy: -120.0 }, VIEW);

        editor.set_aspect_ratio(AspectRatio::Square);
        assert!(!editor.is_dragging());
        assert!(editor
            .rect()
            .approx_eq(&CropRect::new(0.3, 0.1, 0.4, 0.4), 1e-9));
    }

    #[test]
    fn test_ratio_drag_keeps_ratio() {
        let mut editor = CropEditor::new(AspectRatio::ThreeTwo);
        editor.handle_gesture(GestureEvent::Start(Handle::TopRight), VIEW);
        editor.handle_gesture(GestureEvent::Change { dx: -80.0, dy: 45.0 }, VIEW);
        let rect = editor.rect();
        assert!((rect.width / rect.height - 1.5).abs() < 1e-9);
        assert!(rect.is_valid());
    }
}
