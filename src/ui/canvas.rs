// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the photo, committed frames and the working crop.
//!
//! The canvas turns pointer input into gesture events and frame taps. It
//! never changes the rectangle itself; the app feeds its actions to the
//! crop editor and the repository.

use crate::crop::{CropEditor, GestureEvent, Handle};
use crate::models::frame::{Frame, FrameId};
use crate::render::overlay::OverlayLayout;
use crate::util::geometry::{to_absolute, PixelRect, Size};

const HANDLE_SIZE: f32 = 10.0;
const HANDLE_HIT_SIZE: f64 = 24.0;
const MASK_ALPHA: u8 = 150;
const FRAME_COLOR: egui::Color32 = egui::Color32::YELLOW;
const SELECTED_COLOR: egui::Color32 = egui::Color32::LIGHT_BLUE;
const GRID_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(200, 200, 200, 160);

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    Gesture(GestureEvent, Size),
    SelectFrame(Option<FrameId>),
}

/// What the canvas needs to draw one project.
pub struct CanvasView<'a> {
    pub texture: Option<&'a egui::TextureHandle>,
    pub image_size: Option<(u32, u32)>,
    pub frames: &'a [Frame],
    pub selected_frame: Option<FrameId>,
    pub editor: &'a CropEditor,
    pub show_grid: bool,
}

/// Display the main canvas area and handle pointer interactions.
pub fn show(ui: &mut egui::Ui, view: &CanvasView<'_>) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();

    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let (Some(texture), Some((img_width, img_height))) = (view.texture, view.image_size) else {
            show_welcome(ui);
            return;
        };

        let image_rect = fit_image(ui, img_width, img_height);
        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let container = Size::new(image_rect.width() as f64, image_rect.height() as f64);
        let working = to_absolute(view.editor.rect(), container);
        let layout = OverlayLayout::build(view.frames, container, view.selected_frame);

        let response = ui.allocate_rect(image_rect, egui::Sense::click_and_drag());
        let origin = image_rect.min;
        let local = |pos: egui::Pos2| ((pos.x - origin.x) as f64, (pos.y - origin.y) as f64);
        let press_origin = ui.input(|i| i.pointer.press_origin());

        if response.drag_started() {
            if let Some(start) = press_origin {
                let (px, py) = local(start);
                if let Some(handle) = Handle::hit_test(&working, px, py, HANDLE_HIT_SIZE / 2.0) {
                    action = CanvasAction::Gesture(GestureEvent::Start(handle), container);
                }
            }
        } else if response.drag_stopped() {
            action = CanvasAction::Gesture(GestureEvent::End, container);
        } else if response.dragged() && view.editor.is_dragging() {
            if let (Some(start), Some(pos)) = (press_origin, response.interact_pointer_pos()) {
                let change = GestureEvent::Change {
                    dx: (pos.x - start.x) as f64,
                    dy: (pos.y - start.y) as f64,
                };
                action = CanvasAction::Gesture(change, container);
            }
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let (px, py) = local(pos);
                action = CanvasAction::SelectFrame(layout.tap(px, py));
            }
        }

        if let Some(handle) = view.editor.active_handle().or_else(|| {
            response
                .hover_pos()
                .and_then(|pos| {
                    let (px, py) = local(pos);
                    Handle::hit_test(&working, px, py, HANDLE_HIT_SIZE / 2.0)
                })
        }) {
            ui.ctx().set_cursor_icon(cursor_for(handle));
        }

        let painter = ui.painter_at(image_rect);
        draw_overlay(&painter, &layout, origin);
        draw_working_rect(&painter, &working, origin, view.show_grid);
    });

    // Status line at the bottom
    ui.separator();
    ui.horizontal(|ui| {
        let rect = view.editor.rect();
        ui.label(format!(
            "Crop: x {:.3}  y {:.3}  w {:.3}  h {:.3}",
            rect.x, rect.y, rect.width, rect.height
        ));
        ui.separator();
        ui.label(format!("Ratio: {}", view.editor.aspect_ratio().label()));
        ui.separator();
        ui.label(format!("Frames: {}", view.frames.len()));
    });

    action
}

/// Fit the image into the available space, centered, keeping its aspect.
fn fit_image(ui: &egui::Ui, img_width: u32, img_height: u32) -> egui::Rect {
    let available = ui.available_size();
    let img_aspect = img_width as f32 / img_height.max(1) as f32;
    let available_aspect = available.x / available.y.max(1.0);

    let (display_width, display_height) = if img_aspect > available_aspect {
        // Image is wider - fit to width
        (available.x, available.x / img_aspect)
    } else {
        // Image is taller - fit to height
        (available.y * img_aspect, available.y)
    };

    let x_offset = (available.x - display_width) / 2.0;
    let y_offset = (available.y - display_height) / 2.0;

    egui::Rect::from_min_size(
        ui.min_rect().min + egui::vec2(x_offset, y_offset),
        egui::vec2(display_width, display_height),
    )
}

fn to_screen(rect: &PixelRect, origin: egui::Pos2) -> egui::Rect {
    egui::Rect::from_min_size(
        origin + egui::vec2(rect.x as f32, rect.y as f32),
        egui::vec2(rect.width as f32, rect.height as f32),
    )
}

/// Darken everything outside committed frames and outline each frame.
fn draw_overlay(painter: &egui::Painter, layout: &OverlayLayout, origin: egui::Pos2) {
    let mask_color = egui::Color32::from_black_alpha(MASK_ALPHA);
    for rect in &layout.mask {
        painter.rect_filled(to_screen(rect, origin), 0.0, mask_color);
    }

    for region in &layout.regions {
        let (width, color) = if region.selected {
            (3.0, SELECTED_COLOR)
        } else {
            (1.5, FRAME_COLOR)
        };
        painter.rect_stroke(
            to_screen(&region.bounds, origin),
            0.0,
            egui::Stroke::new(width, color),
        );
    }
}

/// Draw the in-progress crop with its grips and optional thirds grid.
fn draw_working_rect(painter: &egui::Painter, rect: &PixelRect, origin: egui::Pos2, show_grid: bool) {
    let screen = to_screen(rect, origin);
    painter.rect_stroke(screen, 0.0, egui::Stroke::new(2.0, egui::Color32::WHITE));

    if show_grid {
        let stroke = egui::Stroke::new(1.0, GRID_COLOR);
        for i in 1..3 {
            let t = i as f32 / 3.0;
            let x = screen.min.x + screen.width() * t;
            let y = screen.min.y + screen.height() * t;
            painter.line_segment([egui::pos2(x, screen.min.y), egui::pos2(x, screen.max.y)], stroke);
            painter.line_segment([egui::pos2(screen.min.x, y), egui::pos2(screen.max.x, y)], stroke);
        }
    }

    for handle in Handle::GRIPS {
        let (fx, fy) = handle.position_fraction();
        let center = egui::pos2(
            screen.min.x + screen.width() * fx as f32,
            screen.min.y + screen.height() * fy as f32,
        );
        let grip = egui::Rect::from_center_size(center, egui::vec2(HANDLE_SIZE, HANDLE_SIZE));
        painter.rect_filled(grip, 1.0, egui::Color32::WHITE);
        painter.rect_stroke(grip, 1.0, egui::Stroke::new(1.0, egui::Color32::BLACK));
    }
}

fn cursor_for(handle: Handle) -> egui::CursorIcon {
    match handle {
        Handle::TopLeft | Handle::BottomRight => egui::CursorIcon::ResizeNwSe,
        Handle::TopRight | Handle::BottomLeft => egui::CursorIcon::ResizeNeSw,
        Handle::Top | Handle::Bottom => egui::CursorIcon::ResizeVertical,
        Handle::Left | Handle::Right => egui::CursorIcon::ResizeHorizontal,
        Handle::Center => egui::CursorIcon::Grab,
    }
}

/// Show welcome message when no project is open.
fn show_welcome(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("cropframe")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.label(
                egui::RichText::new("Practice framing by cropping your own photos")
                    .size(14.0)
                    .color(egui::Color32::from_gray(150)),
            );
            ui.add_space(20.0);
            ui.label(
                egui::RichText::new("Import a photo or open a project to begin")
                    .color(egui::Color32::from_gray(180)),
            );
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("File → Import Photo...")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
        });
    });
}
