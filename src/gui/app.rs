//! guv Main Application
//! Main window with toolbar, environment list and details area.

use crate::config::Config;
use crate::env::{backup, discovery, shell, EnvDetails, EnvEntry, EnvList};
use crate::gui::{DetailsView, EnvListView, Toolbar, ToolbarAction};
use egui::{CentralPanel, SidePanel, TopBottomPanel};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Details result from background thread
struct DetailsResult {
    path: PathBuf,
    text: String,
}

/// Discovery result from background thread
enum ReloadResult {
    Progress(String),
    Complete(EnvList),
    Error(String),
}

/// Main application window.
pub struct GuvApp {
    config: Config,
    envs: EnvList,
    toolbar: Toolbar,
    list_view: EnvListView,
    details_view: DetailsView,

    // Async details
    details_rx: Option<Receiver<DetailsResult>>,

    // Async discovery
    reload_rx: Option<Receiver<ReloadResult>>,
    is_reloading: bool,
}

impl GuvApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let mut toolbar = Toolbar::new();
        let envs = match EnvList::load(&config.list_path()) {
            Ok(envs) => {
                toolbar.set_status(&format!("{} environments", envs.len()));
                envs
            }
            Err(e) => {
                tracing::warn!("{}", e);
                toolbar.set_error(&e.to_string());
                EnvList::empty(config.list_path())
            }
        };

        Self {
            config,
            envs,
            toolbar,
            list_view: EnvListView::new(),
            details_view: DetailsView::new(),
            details_rx: None,
            reload_rx: None,
            is_reloading: false,
        }
    }

    /// Gather details for the newly selected environment in the background.
    fn start_details(&mut self, path: PathBuf) {
        self.details_view.set_loading(&path);

        let (tx, rx) = channel();
        self.details_rx = Some(rx);
        let package_command = self.config.package_command.clone();

        thread::spawn(move || {
            let text = EnvDetails::gather(&path, &package_command).render();
            let _ = tx.send(DetailsResult { path, text });
        });
    }

    /// Check for details results
    fn check_details_results(&mut self) {
        let rx = self.details_rx.take();
        if let Some(rx) = rx {
            match rx.try_recv() {
                Ok(result) => {
                    if !self.details_view.set_text(&result.path, result.text) {
                        tracing::debug!("Discarding details for {}", result.path.display());
                    }
                }
                Err(std::sync::mpsc::TryRecvError::Empty) => self.details_rx = Some(rx),
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {}
            }
        }
    }

    /// Re-run the discovery script and reload the list - in the background.
    fn handle_reload(&mut self) {
        if self.is_reloading {
            return;
        }

        let script = self.config.script_path();
        let install_path = self.config.install_path.clone();
        let list_path = self.config.list_path();

        let (tx, rx) = channel();
        self.reload_rx = Some(rx);
        self.is_reloading = true;
        self.toolbar.busy = true;
        self.toolbar.set_status("Discovering environments...");

        thread::spawn(move || {
            if let Err(e) = discovery::run_script(&script, &install_path) {
                tracing::warn!("{}", e);
                let _ = tx.send(ReloadResult::Error(e.to_string()));
                return;
            }

            let _ = tx.send(ReloadResult::Progress("Reading environment list...".to_string()));

            match EnvList::load(&list_path) {
                Ok(envs) => {
                    let _ = tx.send(ReloadResult::Complete(envs));
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    let _ = tx.send(ReloadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for discovery results
    fn check_reload_results(&mut self) {
        let rx = self.reload_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    ReloadResult::Progress(status) => {
                        self.toolbar.set_status(&status);
                    }
                    ReloadResult::Complete(envs) => {
                        self.envs = envs;
                        self.list_view.retain_selection(&self.envs);
                        if self.list_view.selected().is_none() {
                            self.details_view.clear();
                        }
                        self.toolbar
                            .set_status(&format!("Reloaded {} environments", self.envs.len()));
                        should_keep_receiver = false;
                    }
                    ReloadResult::Error(error) => {
                        self.toolbar.set_error(&error);
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.reload_rx = Some(rx);
            } else {
                self.is_reloading = false;
                self.toolbar.busy = false;
            }
        }
    }

    /// Delete the selected environment after confirmation.
    fn handle_delete(&mut self) {
        // A pending reload would bring the deleted entry back.
        if self.is_reloading {
            return;
        }
        let Some(path) = self.list_view.selected().map(Path::to_path_buf) else {
            return;
        };
        let entry = EnvEntry::new(path.clone());

        let confirm = MessageDialog::new()
            .set_level(MessageLevel::Warning)
            .set_title("Confirm Deletion")
            .set_description(format!(
                "You are about to delete the virtual environment for:\n\n{}\n\nThis action cannot be undone.\n\nContinue?",
                entry.name
            ))
            .set_buttons(MessageButtons::YesNo)
            .show();

        if !matches!(confirm, MessageDialogResult::Yes) {
            return;
        }

        if let Err(e) = backup::write_backup(entry.project_dir(), self.details_view.text()) {
            tracing::warn!("Could not save details backup for {}: {}", entry.name, e);
        }

        match self.envs.delete_env(&path) {
            Ok(()) => {
                self.list_view.clear_selection();
                self.details_view.clear();
                self.toolbar.set_status(&format!("Deleted {}", entry.name));
            }
            Err(e) => {
                tracing::warn!("{}", e);
                MessageDialog::new()
                    .set_level(MessageLevel::Error)
                    .set_title("Error")
                    .set_description(format!("Failed to delete: {}", e))
                    .set_buttons(MessageButtons::Ok)
                    .show();
                self.toolbar.set_error(&e.to_string());
            }
        }
    }

    fn handle_open_shell(&mut self) {
        let Some(path) = self.list_view.selected() else {
            return;
        };

        match shell::open_shell(
            path,
            self.config.shell_rcfile.as_deref(),
            &self.config.terminals,
        ) {
            Ok(launched) => self
                .toolbar
                .set_status(&format!("Opened shell in {}", launched.program)),
            Err(e) => {
                tracing::warn!("{}", e);
                self.toolbar.set_error(&e.to_string());
            }
        }
    }

    fn handle_open_folder(&mut self) {
        let Some(path) = self.list_view.selected() else {
            return;
        };
        let folder = EnvEntry::new(path.to_path_buf()).project_dir().to_path_buf();

        if let Err(e) = open::that(&folder) {
            tracing::warn!("Failed to open {}: {}", folder.display(), e);
            self.toolbar.set_error(&e.to_string());
        }
    }
}

impl eframe::App for GuvApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_details_results();
        self.check_reload_results();

        // Request repaint while work is pending
        if self.is_reloading || self.details_view.is_loading() {
            ctx.request_repaint();
        }

        let has_selection = self.list_view.selected().is_some();
        let action = TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                ui.add_space(4.0);
                let action = self.toolbar.show(ui, has_selection);
                ui.add_space(4.0);
                action
            })
            .inner;

        match action {
            ToolbarAction::OpenShell => self.handle_open_shell(),
            ToolbarAction::OpenFolder => self.handle_open_folder(),
            ToolbarAction::Delete => self.handle_delete(),
            ToolbarAction::Reload => self.handle_reload(),
            ToolbarAction::None => {}
        }

        TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.toolbar.show_status(ui);
        });

        // Left panel - environment list
        let selected = SidePanel::left("env_list")
            .default_width(320.0)
            .min_width(240.0)
            .show(ctx, |ui| {
                self.list_view.show(ui, &self.envs, &self.toolbar.query)
            })
            .inner;

        if let Some(path) = selected {
            self.start_details(path);
        }

        // Central panel - details
        CentralPanel::default().show(ctx, |ui| {
            self.details_view.show(ui);
        });
    }
}
