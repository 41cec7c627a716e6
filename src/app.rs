// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the repository and the crop editor and
//! routes actions from the UI panels to them.

use crate::config::AppConfig;
use crate::crop::{CropEditor, GestureEvent};
use crate::error::MediaError;
use crate::io::media::{self, ExportOutcome, ImportedPhoto, PixelBuffer};
use crate::io::persistence::JsonProjectStore;
use crate::io::serialization::{self, FrameSheet};
use crate::models::{frame::FrameId, project::ProjectId};
use crate::repository::ProjectRepository;
use crate::ui::{canvas, projects, properties, toolbar};
use crate::util::geometry::Size;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

/// Result of background image work.
enum Loaded {
    /// A new photo was decoded and compressed.
    Imported { name: String, photo: ImportedPhoto },
    /// A stored original was decoded for display.
    Opened { project_id: ProjectId, buffer: PixelBuffer },
}

/// Main application state.
pub struct CropApp {
    config: AppConfig,

    /// Owner of every project and its frames
    repository: ProjectRepository<JsonProjectStore>,

    /// Project shown on the canvas
    current_project: Option<ProjectId>,

    /// Decoded original of the current project, used for exports
    original: Option<PixelBuffer>,

    /// Texture of the current original
    image_texture: Option<egui::TextureHandle>,

    /// Working crop rectangle
    editor: CropEditor,

    /// Frame highlighted on the canvas and in the frame list
    selected_frame: Option<FrameId>,

    /// Receiver for background image loading
    image_loader: Option<Receiver<Result<Loaded, MediaError>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Last notice shown in the menu bar
    status: Option<String>,
}

impl CropApp {
    pub fn new(config: AppConfig, repository: ProjectRepository<JsonProjectStore>) -> Self {
        let editor = CropEditor::new(config.default_aspect_ratio);
        Self {
            config,
            repository,
            current_project: None,
            original: None,
            image_texture: None,
            editor,
            selected_frame: None,
            image_loader: None,
            loading_message: None,
            status: None,
        }
    }

    /// Import a photo from disk into a new project (asynchronously).
    fn import_photo(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some("Importing photo...".to_string());

        let quality = self.config.jpeg_quality;
        std::thread::spawn(move || {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "Untitled".to_string());
            let result = media::import_photo_file(&path, quality)
                .map(|photo| Loaded::Imported { name, photo });
            let _ = sender.send(result);
        });
    }

    /// Decode a stored project's original for display (asynchronously).
    fn open_project(&mut self, project_id: ProjectId) {
        let Some(project) = self.repository.project(project_id) else {
            return;
        };

        let (sender, receiver) = channel();
        self.image_loader = Some(receiver);
        self.loading_message = Some(format!("Opening {}...", project.name));

        let bytes = project.original_image.clone();
        std::thread::spawn(move || {
            let result = media::load_original(&bytes)
                .map(|buffer| Loaded::Opened { project_id, buffer });
            let _ = sender.send(result);
        });
    }

    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.image_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.image_loader = None;
        self.loading_message = None;

        match result {
            Ok(Loaded::Imported { name, photo }) => {
                match self.repository.create_project(name, photo.jpeg) {
                    Ok(project_id) => self.show_project(ctx, project_id, photo.buffer),
                    Err(e) => self.report(format!("Could not save project: {e}")),
                }
            }
            Ok(Loaded::Opened { project_id, buffer }) => {
                self.show_project(ctx, project_id, buffer);
            }
            Err(e) => self.report(format!("Failed to load image: {e}")),
        }
    }

    fn show_project(&mut self, ctx: &egui::Context, project_id: ProjectId, buffer: PixelBuffer) {
        let size = [buffer.width() as usize, buffer.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, buffer.pixels());
        self.image_texture = Some(ctx.load_texture(
            "original",
            color_image,
            egui::TextureOptions::LINEAR,
        ));
        self.original = Some(buffer);
        self.current_project = Some(project_id);
        self.selected_frame = None;
        self.editor.reset();
        log::info!("Opened project {}", project_id);
    }

    fn close_project(&mut self) {
        self.current_project = None;
        self.original = None;
        self.image_texture = None;
        self.selected_frame = None;
        self.editor.reset();
    }

    /// Commit the working rectangle as a frame of the current project.
    fn commit_frame(&mut self) {
        let Some(project_id) = self.current_project else {
            return;
        };
        if self.editor.is_dragging() {
            return;
        }
        let rect = *self.editor.rect();
        match self.repository.commit(project_id, rect, self.editor.aspect_ratio()) {
            Ok(frame_id) => self.selected_frame = Some(frame_id),
            // Invalid rectangles are dropped; the user can adjust and retry.
            Err(e) => log::warn!("Frame not added: {}", e),
        }
    }

    fn delete_frame(&mut self, frame_id: FrameId) {
        let Some(project_id) = self.current_project else {
            return;
        };
        match self.repository.remove_frame(project_id, frame_id) {
            Ok(_) => {
                if self.selected_frame == Some(frame_id) {
                    self.selected_frame = None;
                }
            }
            Err(e) => self.report(format!("Could not delete frame: {e}")),
        }
    }

    fn delete_project(&mut self, project_id: ProjectId) {
        match self.repository.delete_project(project_id) {
            Ok(_) => {
                if self.current_project == Some(project_id) {
                    self.close_project();
                }
            }
            Err(e) => self.report(format!("Could not delete project: {e}")),
        }
    }

    /// Crop a frame out of the original and save it to the export folder.
    fn export_frame(&mut self, frame_id: FrameId) {
        let (Some(project_id), Some(original)) = (self.current_project, &self.original) else {
            return;
        };
        let Some(project) = self.repository.project(project_id) else {
            return;
        };
        let Some(frame) = project.frame(frame_id) else {
            return;
        };

        let short_id = frame.id().simple().to_string();
        let name = format!("{}-{}", project.name, &short_id[..8]);
        let outcome = match media::crop(original, frame.crop_rect()) {
            Ok(cropped) => media::export_to_library(&cropped, &self.config.export_dir, &name),
            Err(e) => ExportOutcome::Failed(e),
        };
        let message = match outcome {
            ExportOutcome::Saved(path) => format!("Saved {}", path.display()),
            ExportOutcome::Denied => "Export folder is not writable".to_string(),
            ExportOutcome::Failed(e) => format!("Export failed: {e}"),
        };
        self.status = Some(message);
    }

    fn export_frame_sheet(&mut self, path: PathBuf) {
        let Some(project) = self.current_project.and_then(|id| self.repository.project(id)) else {
            return;
        };
        let sheet = FrameSheet::from_project(project);
        match serialization::export_by_extension(&sheet, &path) {
            Ok(()) => log::info!("Exported {} frames to {}", sheet.frames.len(), path.display()),
            Err(e) => self.report(format!("Failed to export frames: {e:#}")),
        }
    }

    /// Apply a frame sheet's rectangles to the current project as new frames.
    fn import_frame_sheet(&mut self, path: PathBuf) {
        let Some(project_id) = self.current_project else {
            return;
        };
        let sheet = match serialization::import_by_extension(&path) {
            Ok(sheet) => sheet,
            Err(e) => {
                self.report(format!("Failed to import frames: {e:#}"));
                return;
            }
        };

        let mut added = 0;
        for frame in &sheet.frames {
            match self
                .repository
                .commit(project_id, *frame.crop_rect(), frame.aspect_ratio())
            {
                Ok(_) => added += 1,
                Err(e) => log::warn!("Skipped frame from sheet: {}", e),
            }
        }
        log::info!("Imported {} frames from '{}'", added, sheet.project);
    }

    fn save_preferences(&self) {
        let Some(path) = AppConfig::default_path() else {
            return;
        };
        if let Err(e) = self.config.save_to(&path) {
            log::error!("Failed to save config: {:#}", e);
        }
    }

    fn report(&mut self, message: String) {
        log::error!("{}", message);
        self.status = Some(message);
    }

    fn show_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Import Photo...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"])
                            .pick_file()
                        {
                            self.import_photo(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    let has_project = self.current_project.is_some();
                    if ui
                        .add_enabled(has_project, egui::Button::new("Import Frames..."))
                        .clicked()
                    {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Frame sheets", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.import_frame_sheet(path);
                        }
                        ui.close_menu();
                    }
                    ui.add_enabled_ui(has_project, |ui| {
                        ui.menu_button("Export Frames", |ui| {
                            if ui.button("Export as YAML...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("YAML", &["yaml", "yml"])
                                    .set_file_name("frames.yaml")
                                    .save_file()
                                {
                                    self.export_frame_sheet(path);
                                }
                                ui.close_menu();
                            }
                            if ui.button("Export as JSON...").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .add_filter("JSON", &["json"])
                                    .set_file_name("frames.json")
                                    .save_file()
                                {
                                    self.export_frame_sheet(path);
                                }
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Edit", |ui| {
                    let has_selection = self.selected_frame.is_some();
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Export Selected Frame"))
                        .clicked()
                    {
                        if let Some(frame_id) = self.selected_frame {
                            self.export_frame(frame_id);
                        }
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(has_selection, egui::Button::new("Delete Selected Frame"))
                        .clicked()
                    {
                        if let Some(frame_id) = self.selected_frame {
                            self.delete_frame(frame_id);
                        }
                        ui.close_menu();
                    }
                });

                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(egui::RichText::new(status).weak());
                }
            });
        });
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.editor.is_dragging() {
                self.editor
                    .handle_gesture(GestureEvent::Cancel, Size::new(0.0, 0.0));
            } else {
                self.selected_frame = None;
            }
        }

        // Only process if no text field is focused
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.commit_frame();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)) {
            if let Some(frame_id) = self.selected_frame {
                self.delete_frame(frame_id);
            }
        }
    }
}

impl eframe::App for CropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        self.show_menu(ctx);
        self.handle_keys(ctx);

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(
                    ui,
                    self.editor.aspect_ratio(),
                    self.config.show_grid,
                    self.current_project.is_some(),
                )
            })
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::SetAspectRatio(preset) => {
                self.editor.set_aspect_ratio(preset);
                self.config.default_aspect_ratio = preset;
                self.save_preferences();
            }
            toolbar::ToolbarAction::ToggleGrid(show_grid) => {
                self.config.show_grid = show_grid;
                self.save_preferences();
            }
            toolbar::ToolbarAction::Commit => self.commit_frame(),
            toolbar::ToolbarAction::Reset => self.editor.reset(),
            toolbar::ToolbarAction::None => {}
        }

        let projects_action = egui::SidePanel::left("projects")
            .default_width(200.0)
            .show(ctx, |ui| {
                projects::show(ui, self.repository.projects(), self.current_project)
            })
            .inner;

        match projects_action {
            projects::ProjectsAction::Open(id) if self.current_project != Some(id) => {
                self.open_project(id);
            }
            projects::ProjectsAction::Delete(id) => self.delete_project(id),
            projects::ProjectsAction::Rename(id, name) => {
                if let Err(e) = self.repository.rename_project(id, &name) {
                    self.report(format!("Could not rename project: {e}"));
                }
            }
            _ => {}
        }

        let properties_action = egui::SidePanel::right("frames")
            .default_width(250.0)
            .show(ctx, |ui| {
                let project = self.current_project.and_then(|id| self.repository.project(id));
                properties::show(ui, project, self.selected_frame)
            })
            .inner;

        match properties_action {
            properties::PropertiesAction::SelectFrame(id) => self.selected_frame = Some(id),
            properties::PropertiesAction::ExportFrame(id) => self.export_frame(id),
            properties::PropertiesAction::DeleteFrame(id) => self.delete_frame(id),
            properties::PropertiesAction::None => {}
        }

        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    return canvas::CanvasAction::None;
                }

                let frames = self
                    .current_project
                    .and_then(|id| self.repository.project(id))
                    .map(|p| p.frames.as_slice())
                    .unwrap_or(&[]);
                let view = canvas::CanvasView {
                    texture: self.image_texture.as_ref(),
                    image_size: self.original.as_ref().map(|b| (b.width(), b.height())),
                    frames,
                    selected_frame: self.selected_frame,
                    editor: &self.editor,
                    show_grid: self.config.show_grid,
                };
                canvas::show(ui, &view)
            })
            .inner;

        match canvas_action {
            canvas::CanvasAction::Gesture(event, container) => {
                self.editor.handle_gesture(event, container);
            }
            canvas::CanvasAction::SelectFrame(frame_id) => {
                self.selected_frame = frame_id;
            }
            canvas::CanvasAction::None => {}
        }
    }
}
