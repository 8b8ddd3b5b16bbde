//! AirTrend - Air Quality CSV Dashboard & Trend Viewer
//!
//! Loads a CSV of air-quality sensor readings and drives an interactive
//! line chart from location/time/pollutant/view dropdowns.

mod charts;
mod data;
mod gui;

use eframe::egui;
use gui::AirTrendApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Optional CSV path to load at startup; otherwise browse from the UI.
    let initial_csv = std::env::args().nth(1).map(PathBuf::from);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("AirTrend"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "AirTrend",
        options,
        Box::new(move |cc| Ok(Box::new(AirTrendApp::new(cc, initial_csv)))),
    )
}
