// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame list panel.
//!
//! Lists the frames of the open project in display order, with selection,
//! export and delete controls.

use crate::models::{frame::FrameId, project::Project};

/// Result of frame panel interaction.
pub enum PropertiesAction {
    None,
    SelectFrame(FrameId),
    ExportFrame(FrameId),
    DeleteFrame(FrameId),
}

/// Display the frame list for `project`.
pub fn show(
    ui: &mut egui::Ui,
    project: Option<&Project>,
    selected: Option<FrameId>,
) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Frames");
    ui.separator();

    let Some(project) = project else {
        ui.label(egui::RichText::new("No project open").weak());
        return action;
    };

    if project.frames.is_empty() {
        ui.label(egui::RichText::new("No frames yet").weak());
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (index, frame) in project.frames.iter().enumerate() {
            let id = frame.id();
            let rect = frame.crop_rect();
            let is_selected = selected == Some(id);

            ui.horizontal(|ui| {
                let title = format!("Frame {} ({})", index + 1, frame.aspect_ratio().label());
                if ui.selectable_label(is_selected, title).clicked() {
                    action = PropertiesAction::SelectFrame(id);
                }
                if ui.small_button("💾").on_hover_text("Export").clicked() {
                    action = PropertiesAction::ExportFrame(id);
                }
                if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                    action = PropertiesAction::DeleteFrame(id);
                }
            });

            if is_selected {
                ui.indent(id, |ui| {
                    ui.label(format!("x {:.3}  y {:.3}", rect.x, rect.y));
                    ui.label(format!("w {:.3}  h {:.3}", rect.width, rect.height));
                    if let Some(ratio) = rect.ratio() {
                        ui.label(format!("{:.2}:1, {:.0}% of photo", ratio, rect.area() * 100.0));
                    }
                    ui.label(
                        egui::RichText::new(frame.created_at().format("%Y-%m-%d %H:%M").to_string())
                            .weak(),
                    );
                });
            }
        }
    });

    action
}
