//! Details Widget
//! Right side read-only text area with the selected environment's details.

use egui::{Color32, RichText, ScrollArea};
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct DetailsView {
    /// Environment the text describes (or is being gathered for).
    path: Option<PathBuf>,
    text: String,
    loading: bool,
}

impl DetailsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.path = None;
        self.text.clear();
        self.loading = false;
    }

    pub fn set_loading(&mut self, path: &Path) {
        self.path = Some(path.to_path_buf());
        self.text.clear();
        self.loading = true;
    }

    /// Accept rendered details, unless they belong to a stale selection.
    pub fn set_text(&mut self, path: &Path, text: String) -> bool {
        if self.path.as_deref() != Some(path) {
            return false;
        }
        self.text = text;
        self.loading = false;
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        if self.path.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Select an environment").size(18.0).color(Color32::GRAY));
            });
            return;
        }

        if self.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Gathering details...");
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let mut text = self.text.as_str();
                ui.add(
                    egui::TextEdit::multiline(&mut text)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_details_are_discarded() {
        let mut view = DetailsView::new();
        view.set_loading(Path::new("/a/.venv"));
        view.set_loading(Path::new("/b/.venv"));

        assert!(!view.set_text(Path::new("/a/.venv"), "old".to_string()));
        assert!(view.is_loading());
        assert!(view.set_text(Path::new("/b/.venv"), "new".to_string()));
        assert_eq!(view.text(), "new");
        assert!(!view.is_loading());
    }

    #[test]
    fn clear_forgets_everything() {
        let mut view = DetailsView::new();
        view.set_loading(Path::new("/a"));
        view.set_text(Path::new("/a"), "text".to_string());
        view.clear();
        assert_eq!(view.text(), "");
        assert!(!view.set_text(Path::new("/a"), "late".to_string()));
    }
}
