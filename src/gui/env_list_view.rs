//! Environment List Widget
//! Left side list of environments: bold name over a gray relative path.

use crate::env::{EnvEntry, EnvList};
use egui::{Color32, RichText, ScrollArea};
use std::path::{Path, PathBuf};

const ITEM_SPACING: f32 = 4.0;

/// Scrollable list of environments with single selection.
#[derive(Default)]
pub struct EnvListView {
    selected: Option<PathBuf>,
}

impl EnvListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Drop the selection if its path is no longer listed.
    pub fn retain_selection(&mut self, envs: &EnvList) {
        if let Some(selected) = &self.selected {
            if !envs.entries().iter().any(|e| &e.path == selected) {
                self.selected = None;
            }
        }
    }

    /// Draw entries matching `query`. Returns the newly selected path, if
    /// the selection changed this frame.
    pub fn show(&mut self, ui: &mut egui::Ui, envs: &EnvList, query: &str) -> Option<PathBuf> {
        if envs.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No environments").size(16.0).color(Color32::GRAY));
            });
            return None;
        }

        let mut changed = None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (idx, entry) in envs.filtered(query).enumerate() {
                    let is_selected = self.selected.as_deref() == Some(entry.path.as_path());
                    if Self::draw_item(ui, idx, entry, is_selected) && !is_selected {
                        self.selected = Some(entry.path.clone());
                        changed = Some(entry.path.clone());
                    }
                    ui.add_space(ITEM_SPACING);
                }
            });

        changed
    }

    /// Draw a single list item; returns true when clicked.
    fn draw_item(ui: &mut egui::Ui, idx: usize, entry: &EnvEntry, is_selected: bool) -> bool {
        let fill = if is_selected {
            ui.visuals().selection.bg_fill
        } else {
            ui.visuals().widgets.noninteractive.bg_fill
        };

        let frame = egui::Frame::none()
            .fill(fill)
            .rounding(5.0)
            .inner_margin(egui::Margin::symmetric(10.0, 4.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(&entry.name)
                        .size(14.0)
                        .strong()
                        .color(Color32::WHITE),
                );
                ui.label(RichText::new(&entry.relative_path).size(10.0).color(Color32::GRAY));
            });

        let response = ui
            .interact(
                frame.response.rect,
                ui.id().with(("env_item", idx)),
                egui::Sense::click(),
            )
            .on_hover_text(entry.path.display().to_string());
        response.clicked()
    }
}
