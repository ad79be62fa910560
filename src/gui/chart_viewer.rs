//! Chart Viewer Widget
//! Central panel rendering the active page's charts.

use egui::{Color32, RichText, ScrollArea};

use super::control_panel::ViewMode;
use crate::charts::{ChartPlotter, GeographyViewData, InvestorViewData};

const CARD_SPACING: f32 = 15.0;

/// Central chart area. Holds the artifacts computed for the current
/// selections; replaced wholesale on every selection change.
pub struct ChartViewer {
    pub investor: Option<InvestorViewData>,
    pub geography: Option<GeographyViewData>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            investor: None,
            geography: None,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all computed artifacts (before a reload).
    pub fn clear(&mut self) {
        self.investor = None;
        self.geography = None;
    }

    /// Whether the active page has something to render/export.
    pub fn has_view(&self, mode: ViewMode) -> bool {
        match mode {
            ViewMode::InvestorInsights => self.investor.is_some(),
            ViewMode::GeographyInsights => self.geography.is_some(),
        }
    }

    /// Draw the active page.
    pub fn show(&self, ui: &mut egui::Ui, mode: ViewMode) {
        match mode {
            ViewMode::InvestorInsights => match &self.investor {
                Some(data) => Self::draw_investor_view(ui, data),
                None => Self::draw_empty(ui),
            },
            ViewMode::GeographyInsights => match &self.geography {
                Some(data) => Self::draw_geography_view(ui, data),
                None => Self::draw_empty(ui),
            },
        }
    }

    fn draw_empty(ui: &mut egui::Ui) {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new("No Data").size(20.0));
        });
    }

    fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(60)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                add_contents(ui);
            });
    }

    fn draw_investor_view(ui: &mut egui::Ui, data: &InvestorViewData) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(ViewMode::InvestorInsights.label())
                        .size(20.0)
                        .strong(),
                );
                ui.add_space(CARD_SPACING);

                Self::card(ui, |ui| {
                    let summary = &data.summary;
                    ui.label(
                        RichText::new(format!(
                            "{} has funded {} companies with a total valuation of ${:.2} billion.",
                            summary.name, summary.companies_funded, summary.total_valuation
                        ))
                        .size(14.0),
                    );
                });
                ui.add_space(CARD_SPACING);

                Self::card(ui, |ui| {
                    let chart_width = (ui.available_width() - 30.0) / 2.0;
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.set_width(chart_width);
                            ui.label(
                                RichText::new("Number of Companies Invested In")
                                    .size(14.0)
                                    .strong(),
                            );
                            ChartPlotter::draw_company_count_chart(ui, &data.ranked);
                        });

                        ui.add_space(10.0);

                        ui.vertical(|ui| {
                            ui.set_width(chart_width);
                            ui.label(
                                RichText::new("Total Valuation of Investments")
                                    .size(14.0)
                                    .strong(),
                            );
                            ChartPlotter::draw_valuation_chart(
                                ui,
                                &data.ranked,
                                &data.valuation_by_investor,
                            );
                        });
                    });
                });
            });
    }

    fn draw_geography_view(ui: &mut egui::Ui, data: &GeographyViewData) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(ViewMode::GeographyInsights.label())
                        .size(20.0)
                        .strong(),
                );
                ui.add_space(CARD_SPACING);

                Self::card(ui, |ui| {
                    ui.label(
                        RichText::new(format!(
                            "Unicorn Companies per Year in {}",
                            data.series.country
                        ))
                        .size(14.0)
                        .strong(),
                    );
                    ui.add_space(5.0);
                    ChartPlotter::draw_country_line_chart(ui, &data.series);
                });
                ui.add_space(CARD_SPACING);

                Self::card(ui, |ui| {
                    ui.label(
                        RichText::new(format!(
                            "Industry Distribution in {}",
                            data.pivot.country
                        ))
                        .size(14.0)
                        .strong(),
                    );
                    ui.add_space(5.0);
                    ChartPlotter::draw_industry_heatmap(ui, &data.pivot);
                });
            });
    }
}
