use std::path::PathBuf;

use eframe::egui;
use paper_explorer::app::ExplorerApp;
use paper_explorer::config::{ExplorerConfig, CONFIG_ENV};

fn main() -> eframe::Result {
    env_logger::init();

    let config = ExplorerConfig::resolve(
        std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        std::env::args_os().nth(1).map(PathBuf::from),
    );
    let [width, height] = config.window_size;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Paper Explorer – CORD-19 Metadata",
        options,
        Box::new(|_cc| Ok(Box::new(ExplorerApp::new(config)))),
    )
}
