// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project list panel.

use crate::models::project::{Project, ProjectId};

pub enum ProjectsAction {
    None,
    Open(ProjectId),
    Delete(ProjectId),
    Rename(ProjectId, String),
}

pub fn show(ui: &mut egui::Ui, projects: &[Project], current: Option<ProjectId>) -> ProjectsAction {
    let mut action = ProjectsAction::None;

    ui.heading("Projects");
    ui.separator();

    if projects.is_empty() {
        ui.label(egui::RichText::new("Import a photo to start").weak());
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for project in projects {
            ui.horizontal(|ui| {
                let title = format!("{} ({})", project.name, project.frame_count());
                if ui.selectable_label(current == Some(project.id), title).clicked() {
                    action = ProjectsAction::Open(project.id);
                }
                if ui.small_button("🗑").on_hover_text("Delete project").clicked() {
                    action = ProjectsAction::Delete(project.id);
                }
            });
        }
    });

    if let Some(project) = current.and_then(|id| projects.iter().find(|p| p.id == id)) {
        ui.separator();
        if let Some(name) = name_editor(ui, project) {
            action = ProjectsAction::Rename(project.id, name);
        }
    }

    action
}

/// Editable name of the open project. Yields the new name once editing ends.
fn name_editor(ui: &mut egui::Ui, project: &Project) -> Option<String> {
    let key = ui.make_persistent_id(("project_name", project.id));
    let mut name = ui
        .data_mut(|d| d.get_temp::<String>(key))
        .unwrap_or_else(|| project.name.clone());

    let response = ui
        .horizontal(|ui| {
            ui.label("Name:");
            ui.text_edit_singleline(&mut name)
        })
        .inner;

    if response.lost_focus() {
        ui.data_mut(|d| d.remove::<String>(key));
        return (name != project.name).then_some(name);
    }
    if response.changed() {
        ui.data_mut(|d| d.insert_temp(key, name));
    }
    None
}
