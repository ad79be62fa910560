//! Unicorn Companies Dashboard
//!
//! Interactive desktop dashboard over a dataset of unicorn companies:
//! investor-centric aggregates on one page, country-centric time/industry
//! breakdowns on the other.

mod charts;
mod data;
mod gui;
mod stats;

use eframe::egui;
use gui::UnicornApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 650.0])
            .with_title("Unicorn Companies Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Unicorn Companies Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(UnicornApp::new(cc)))),
    )
}
