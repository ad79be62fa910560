//! Control Panel Widget
//! Left side panel with the page selector and per-page controls.

use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Which page of the dashboard is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    InvestorInsights,
    GeographyInsights,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::InvestorInsights => "Investor Insights",
            ViewMode::GeographyInsights => "Geographical and Industrial Insights",
        }
    }
}

/// Current user selections driving the views.
#[derive(Default, Clone)]
pub struct ViewSelection {
    pub csv_path: Option<PathBuf>,
    pub mode: ViewMode,
    pub investor: String,
    pub country: String,
}

/// Left side control panel with data source, page, and selection controls.
pub struct ControlPanel {
    pub selection: ViewSelection,
    /// Top-10 investor names, ranking order.
    pub investors: Vec<String>,
    /// Distinct countries, sorted.
    pub countries: Vec<String>,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selection: ViewSelection::default(),
            investors: Vec::new(),
            countries: Vec::new(),
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the top-investor names after a load; keeps the current
    /// selection when it survives, otherwise falls back to the top entry.
    pub fn update_investors(&mut self, investors: Vec<String>) {
        if !investors.contains(&self.selection.investor) {
            self.selection.investor = investors.first().cloned().unwrap_or_default();
        }
        self.investors = investors;
    }

    /// Install the country list after a load; same fallback rule.
    pub fn update_countries(&mut self, countries: Vec<String>) {
        if !countries.contains(&self.selection.country) {
            self.selection.country = countries.first().cloned().unwrap_or_default();
        }
        self.countries = countries;
    }

    /// Draw the control panel.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🦄 Unicorn Companies")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(RichText::new("Dashboard").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .selection
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.selection.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Page Section =====
        ui.label(RichText::new("📑 Page").size(14.0).strong());
        ui.add_space(5.0);

        for mode in [ViewMode::InvestorInsights, ViewMode::GeographyInsights] {
            if ui
                .radio_value(&mut self.selection.mode, mode, mode.label())
                .changed()
            {
                action = ControlPanelAction::SelectionChanged;
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Selection Section =====
        match self.selection.mode {
            ViewMode::InvestorInsights => {
                ui.label(RichText::new("Select an Investor").size(14.0).strong());
                ui.add_space(5.0);

                ComboBox::from_id_salt("investor_select")
                    .width(230.0)
                    .selected_text(&self.selection.investor)
                    .show_ui(ui, |ui| {
                        for investor in &self.investors {
                            if ui
                                .selectable_label(self.selection.investor == *investor, investor)
                                .clicked()
                            {
                                self.selection.investor = investor.clone();
                                action = ControlPanelAction::SelectionChanged;
                            }
                        }
                    });
            }
            ViewMode::GeographyInsights => {
                ui.label(RichText::new("Select a Country").size(14.0).strong());
                ui.add_space(5.0);

                ComboBox::from_id_salt("country_select")
                    .width(230.0)
                    .selected_text(&self.selection.country)
                    .show_ui(ui, |ui| {
                        for country in &self.countries {
                            if ui
                                .selectable_label(self.selection.country == *country, country)
                                .clicked()
                            {
                                self.selection.country = country.clone();
                                action = ControlPanelAction::SelectionChanged;
                            }
                        }
                    });
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Charts").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Export;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") || self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set the status line.
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by the control panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    SelectionChanged,
    Export,
}
