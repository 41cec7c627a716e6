// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with aspect-ratio presets and commit controls.

use crate::models::aspect_ratio::AspectRatio;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    SetAspectRatio(AspectRatio),
    ToggleGrid(bool),
    Commit,
    Reset,
}

/// Display the toolbar.
pub fn show(
    ui: &mut egui::Ui,
    current: AspectRatio,
    show_grid: bool,
    can_commit: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Ratio:");

        for preset in AspectRatio::ALL {
            if ui.selectable_label(current == preset, preset.label()).clicked() && current != preset {
                action = ToolbarAction::SetAspectRatio(preset);
            }
        }

        ui.separator();

        let mut grid = show_grid;
        if ui.checkbox(&mut grid, "Thirds").changed() {
            action = ToolbarAction::ToggleGrid(grid);
        }

        ui.separator();

        if ui
            .add_enabled(can_commit, egui::Button::new("✔ Add Frame (Enter)"))
            .clicked()
        {
            action = ToolbarAction::Commit;
        }
        if ui.button("⟲ Reset").clicked() {
            action = ToolbarAction::Reset;
        }

        ui.separator();

        ui.label(
            egui::RichText::new("Drag the corners, edges or middle of the crop, then add it as a frame")
                .italics()
                .weak(),
        );
    });

    action
}
