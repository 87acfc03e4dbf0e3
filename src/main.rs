//! Review Dashboard
//!
//! Desktop dashboard for product review complaint categories.

use anyhow::{anyhow, Context};
use eframe::egui;
use review_dashboard::config::{DashboardConfig, CONFIG_FILE};
use review_dashboard::gui::DashboardApp;
use review_dashboard::session::Session;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))
        .inspect_err(|e| log::error!("{e}"))
        .context("Cannot read dashboard configuration")?;

    // The table is loaded once up front; a bad file ends the session here
    let session = Session::open(config)
        .inspect_err(|e| log::error!("{e}"))
        .context("Cannot load review data")?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("전설의 패치 리뷰 분석 대시보드"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Review Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, session)))),
    )
    .map_err(|e| anyhow!("Window error: {e}"))
}
