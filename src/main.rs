//! guv - Virtual Environment Manager
//!
//! A desktop application for listing, inspecting, activating and deleting
//! Python virtual environments.

mod config;
mod env;
mod gui;

use config::Config;
use eframe::egui;
use gui::GuvApp;
use tracing_subscriber::EnvFilter;

const BANNER: &str = r"        __  ___   __
  ___ _/ / / / | / /
 / _ `/ /_/ /| |/ /
 \_, /\____/ |___/
/___/
";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("\x1b[1;38;5;11m{}\x1b[0m", BANNER);

    let config = Config::load()?;
    tracing::info!("Install path: {}", config.install_path.display());

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("guv - Environment Manager"),
        ..Default::default()
    };

    println!("\x1b[92mready...\x1b[0m");

    // Run the application
    eframe::run_native(
        "guv",
        options,
        Box::new(|cc| Ok(Box::new(GuvApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start window: {}", e))
}
