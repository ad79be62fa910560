//! Unicorn Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartExporter, GeographyViewData, InvestorViewData};
use crate::data::{DataLoader, DataProcessor};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, ViewMode};
use crate::stats::{GeographyStats, InvestorStats};
use egui::SidePanel;
use polars::prelude::{DataFrame, PolarsError};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Dataset loaded automatically at startup when present.
pub const DEFAULT_DATASET_PATH: &str = "./unicorns.csv";

/// CSV loading result from the background thread.
enum LoadResult {
    Progress(String),
    Complete { df: DataFrame, row_count: usize },
    Error(String),
}

/// Payload for the export handler, cloned out of the viewer.
enum ExportPayload {
    Investor(InvestorViewData),
    Geography(GeographyViewData),
}

/// Main application window.
pub struct UnicornApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    viewer: ChartViewer,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl UnicornApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };

        if Path::new(DEFAULT_DATASET_PATH).exists() {
            app.start_load(PathBuf::from(DEFAULT_DATASET_PATH));
        } else {
            app.control_panel
                .set_status(&format!("{DEFAULT_DATASET_PATH} not found - browse for a CSV"));
        }

        app
    }

    /// Handle CSV file selection.
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Read and normalize a CSV in a background thread.
    fn start_load(&mut self, path: PathBuf) {
        if self.is_loading {
            return;
        }

        self.viewer.clear();
        self.control_panel.selection.csv_path = Some(path.clone());
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let path_str = path.to_string_lossy().to_string();

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            let result = DataLoader::read_csv(&path_str)
                .map_err(|e| e.to_string())
                .and_then(|df| DataProcessor::normalize(&df).map_err(|e| e.to_string()));

            match result {
                Ok(df) => {
                    let row_count = df.height();
                    let _ = tx.send(LoadResult::Complete { df, row_count });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e));
                }
            }
        });
    }

    /// Check for CSV loading results.
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete { df, row_count } => {
                        self.loader.set_dataframe(df);
                        self.install_loaded_data(row_count);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        log::warn!("load failed: {error}");
                        self.control_panel.set_status(&format!("Error: {error}"));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Refresh selector contents and recompute the active page after a load.
    fn install_loaded_data(&mut self, row_count: usize) {
        let countries = self.loader.countries();

        let investors: Vec<String> = self
            .loader
            .dataframe()
            .map(|df| {
                InvestorStats::top_investors(df)
                    .map(|ranked| ranked.into_iter().map(|entry| entry.name).collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default();

        log::info!(
            "loaded {row_count} rows, {} countries, {} ranked investors",
            countries.len(),
            investors.len()
        );

        self.control_panel.update_countries(countries);
        self.control_panel.update_investors(investors);
        self.control_panel
            .set_status(&format!("Loaded {row_count} rows"));
        self.recompute_active_view();
    }

    /// Recompute the active page's artifacts from the full loaded table.
    fn recompute_active_view(&mut self) {
        let Some(df) = self.loader.dataframe().cloned() else {
            return;
        };

        match self.control_panel.selection.mode {
            ViewMode::InvestorInsights => {
                let investor = self.control_panel.selection.investor.clone();
                if investor.is_empty() {
                    self.viewer.investor = None;
                    return;
                }
                match Self::build_investor_view(&df, &investor) {
                    Ok(data) => self.viewer.investor = Some(data),
                    Err(e) => {
                        log::warn!("investor view failed: {e}");
                        self.control_panel.set_status(&format!("Error: {e}"));
                    }
                }
            }
            ViewMode::GeographyInsights => {
                let country = self.control_panel.selection.country.clone();
                if country.is_empty() {
                    self.viewer.geography = None;
                    return;
                }
                match Self::build_geography_view(&df, &country) {
                    Ok(data) => self.viewer.geography = Some(data),
                    Err(e) => {
                        log::warn!("geography view failed: {e}");
                        self.control_panel.set_status(&format!("Error: {e}"));
                    }
                }
            }
        }
    }

    fn build_investor_view(
        df: &DataFrame,
        investor: &str,
    ) -> Result<InvestorViewData, PolarsError> {
        let ranked = InvestorStats::top_investors(df)?;
        let valuation_by_investor = InvestorStats::valuation_by_investor(df, &ranked);
        let summary = InvestorStats::summarize(df, investor)?;

        Ok(InvestorViewData {
            ranked,
            valuation_by_investor,
            summary,
        })
    }

    fn build_geography_view(
        df: &DataFrame,
        country: &str,
    ) -> Result<GeographyViewData, PolarsError> {
        let series = GeographyStats::unicorns_per_year(df, country)?;
        log::debug!(
            "{country}: {} unicorns across {} years",
            series.total(),
            series.points.len()
        );
        let pivot = GeographyStats::industry_pivot(df, country)?;

        Ok(GeographyViewData { series, pivot })
    }

    /// Handle chart export - render the active page to PNG plus a JSON
    /// sidecar of its aggregates, then open the image.
    fn handle_export(&mut self) {
        let payload = match self.control_panel.selection.mode {
            ViewMode::InvestorInsights => self
                .viewer
                .investor
                .clone()
                .map(|data| ("unicorn_investors.png", ExportPayload::Investor(data))),
            ViewMode::GeographyInsights => self
                .viewer
                .geography
                .clone()
                .map(|data| ("unicorn_geography.png", ExportPayload::Geography(data))),
        };

        let Some((default_name, payload)) = payload else {
            self.control_panel.set_status("No charts to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(default_name)
            .save_file()
        else {
            return; // User cancelled
        };

        let sidecar = path.with_extension("json");
        let outcome = match &payload {
            ExportPayload::Investor(data) => ChartExporter::export_investor_view(data, &path)
                .and_then(|_| ChartExporter::write_investor_summary(data, &sidecar)),
            ExportPayload::Geography(data) => ChartExporter::export_geography_view(data, &path)
                .and_then(|_| ChartExporter::write_geography_summary(data, &sidecar)),
        };

        match outcome {
            Ok(()) => {
                log::info!("exported {} and {}", path.display(), sidecar.display());
                self.control_panel
                    .set_status(&format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    log::warn!("could not open {}: {e}", path.display());
                }
            }
            Err(e) => {
                log::warn!("export failed: {e:#}");
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for UnicornApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        let mode = self.control_panel.selection.mode;
        self.control_panel.export_enabled = self.viewer.has_view(mode);

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::SelectionChanged => self.recompute_active_view(),
                        ControlPanelAction::Export => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        let mode = self.control_panel.selection.mode;
        egui::CentralPanel::default().show(ctx, |ui| {
            self.viewer.show(ui, mode);
        });
    }
}
