//! Toolbar Widget
//! Top row with the environment actions and the search bar.

use egui::{Color32, RichText};

/// Top toolbar with action buttons and the filter query.
pub struct Toolbar {
    pub query: String,
    pub status: String,
    pub busy: bool,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self {
            query: String::new(),
            status: "Ready".to_string(),
            busy: false,
        }
    }
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the toolbar. Actions needing a selection are disabled without one.
    pub fn show(&mut self, ui: &mut egui::Ui, has_selection: bool) -> ToolbarAction {
        let mut action = ToolbarAction::None;

        ui.horizontal(|ui| {
            ui.add_enabled_ui(has_selection, |ui| {
                if ui.button("⬛ Open Shell in Env").clicked() {
                    action = ToolbarAction::OpenShell;
                }
                if ui.button("📂 Open Folder").clicked() {
                    action = ToolbarAction::OpenFolder;
                }
            });

            ui.add_enabled_ui(self.delete_enabled(has_selection), |ui| {
                if ui.button("🗑 Delete").clicked() {
                    action = ToolbarAction::Delete;
                }
            });

            ui.add_enabled_ui(!self.busy, |ui| {
                if ui.button("🔄 Reload").clicked() {
                    action = ToolbarAction::Reload;
                }
            });

            ui.add(
                egui::TextEdit::singleline(&mut self.query)
                    .hint_text("🔍 Search environments...")
                    .desired_width(f32::INFINITY),
            );
        });

        action
    }

    /// Delete needs a selection and no reload in flight.
    pub fn delete_enabled(&self, has_selection: bool) -> bool {
        has_selection && !self.busy
    }

    /// Draw the status line.
    pub fn show_status(&self, ui: &mut egui::Ui) {
        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.horizontal(|ui| {
            if self.busy {
                ui.spinner();
            }
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    pub fn set_error(&mut self, error: &str) {
        self.status = format!("Error: {}", error);
    }
}

/// Actions triggered by the toolbar
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    None,
    OpenShell,
    OpenFolder,
    Delete,
    Reload,
}
