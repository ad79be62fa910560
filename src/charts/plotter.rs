//! Chart Plotter Module
//! Creates the dashboard's interactive visualizations using egui_plot.

use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::stats::{CountrySeries, IndustryPivot, InvestorCount, InvestorSummary};

/// Bar fill for the companies-per-investor chart.
pub const COMPANY_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
/// Bar fill for the valuation-per-investor chart.
pub const VALUATION_COLOR: Color32 = Color32::from_rgb(155, 89, 182); // Purple
/// Line color for the per-year series.
pub const SERIES_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green

/// Ends of the heatmap color ramp (cool blue to warm red).
const HEAT_LOW: Color32 = Color32::from_rgb(59, 76, 192);
const HEAT_HIGH: Color32 = Color32::from_rgb(180, 4, 38);

const AXIS_LABEL_MAX_CHARS: usize = 14;

/// Everything the investor page renders.
#[derive(Clone)]
pub struct InvestorViewData {
    pub ranked: Vec<InvestorCount>,
    /// Summed valuation per ranked investor, same order as `ranked`.
    pub valuation_by_investor: Vec<f64>,
    pub summary: InvestorSummary,
}

/// Everything the geography page renders.
#[derive(Clone)]
pub struct GeographyViewData {
    pub series: CountrySeries,
    pub pivot: IndustryPivot,
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Shorten long category names so axis labels stay readable.
    fn truncate_label(name: &str, max_chars: usize) -> String {
        if name.chars().count() <= max_chars {
            name.to_string()
        } else {
            let prefix: String = name.chars().take(max_chars.saturating_sub(1)).collect();
            format!("{prefix}…")
        }
    }

    /// Axis formatter mapping integer positions to category labels.
    fn category_formatter(
        labels: Vec<String>,
    ) -> impl Fn(egui_plot::GridMark, &std::ops::RangeInclusive<f64>) -> String + 'static {
        move |mark, _range| {
            let nearest = mark.value.round();
            if (mark.value - nearest).abs() > 0.3 || nearest < 0.0 {
                return String::new();
            }
            labels.get(nearest as usize).cloned().unwrap_or_default()
        }
    }

    /// Bar chart of funded-company counts per top investor.
    pub fn draw_company_count_chart(ui: &mut egui::Ui, ranked: &[InvestorCount]) {
        let labels: Vec<String> = ranked
            .iter()
            .map(|entry| Self::truncate_label(&entry.name, AXIS_LABEL_MAX_CHARS))
            .collect();

        Plot::new("investor_companies")
            .height(300.0)
            .allow_scroll(false)
            .x_axis_label("Investor")
            .y_axis_label("Number of Companies")
            .x_axis_formatter(Self::category_formatter(labels))
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = ranked
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| {
                        Bar::new(i as f64, entry.companies as f64)
                            .width(0.6)
                            .fill(COMPANY_COLOR)
                            .name(&entry.name)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Bar chart of summed valuations per top investor.
    pub fn draw_valuation_chart(ui: &mut egui::Ui, ranked: &[InvestorCount], sums: &[f64]) {
        let labels: Vec<String> = ranked
            .iter()
            .map(|entry| Self::truncate_label(&entry.name, AXIS_LABEL_MAX_CHARS))
            .collect();

        Plot::new("investor_valuations")
            .height(300.0)
            .allow_scroll(false)
            .x_axis_label("Investor")
            .y_axis_label("Valuation ($B)")
            .x_axis_formatter(Self::category_formatter(labels))
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = ranked
                    .iter()
                    .zip(sums.iter())
                    .enumerate()
                    .map(|(i, (entry, &sum))| {
                        Bar::new(i as f64, sum)
                            .width(0.6)
                            .fill(VALUATION_COLOR)
                            .name(&entry.name)
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Line chart of companies joined per year, markers on each point.
    pub fn draw_country_line_chart(ui: &mut egui::Ui, series: &CountrySeries) {
        let points: Vec<[f64; 2]> = series
            .points
            .iter()
            .map(|&(year, count)| [year as f64, count as f64])
            .collect();

        Plot::new(format!("unicorns_per_year_{}", series.country))
            .height(300.0)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Number of Companies")
            .include_y(0.0)
            .x_axis_formatter(|mark, _range| {
                let nearest = mark.value.round();
                if (mark.value - nearest).abs() > 1e-6 {
                    String::new()
                } else {
                    format!("{}", nearest as i64)
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .color(SERIES_COLOR)
                        .width(2.0)
                        .name(&series.country),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .radius(3.5)
                        .color(SERIES_COLOR),
                );
            });
    }

    /// Interpolate the heat ramp for a cell count.
    pub fn heat_color(count: u32, max: u32) -> Color32 {
        let t = if max == 0 {
            0.0
        } else {
            count as f32 / max as f32
        };
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color32::from_rgb(
            lerp(HEAT_LOW.r(), HEAT_HIGH.r()),
            lerp(HEAT_LOW.g(), HEAT_HIGH.g()),
            lerp(HEAT_LOW.b(), HEAT_HIGH.b()),
        )
    }

    /// Annotated heatmap of the year x industry pivot. One filled cell per
    /// combination, count drawn in the middle.
    pub fn draw_industry_heatmap(ui: &mut egui::Ui, pivot: &IndustryPivot) {
        let industry_labels: Vec<String> = pivot
            .industries
            .iter()
            .map(|name| Self::truncate_label(name, AXIS_LABEL_MAX_CHARS))
            .collect();
        let year_labels: Vec<String> = pivot.years.iter().map(|year| year.to_string()).collect();
        let max = pivot.max_count();

        Plot::new(format!("industry_heatmap_{}", pivot.country))
            .height(380.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show_grid(false)
            .x_axis_label("Industry")
            .y_axis_label("Year")
            .x_axis_formatter(Self::category_formatter(industry_labels))
            .y_axis_formatter(Self::category_formatter(year_labels))
            .show(ui, |plot_ui| {
                for (row, year_counts) in pivot.counts.iter().enumerate() {
                    for (col, &count) in year_counts.iter().enumerate() {
                        let x = col as f64;
                        let y = row as f64;
                        let fill = Self::heat_color(count, max);

                        let cell = Polygon::new(PlotPoints::from(vec![
                            [x - 0.5, y - 0.5],
                            [x + 0.5, y - 0.5],
                            [x + 0.5, y + 0.5],
                            [x - 0.5, y + 0.5],
                        ]))
                        .fill_color(fill)
                        .stroke(Stroke::new(1.0, Color32::from_gray(30)));
                        plot_ui.polygon(cell);

                        // Keep the annotation readable on both ends of the ramp.
                        let text_color = if max > 0 && count * 2 > max {
                            Color32::WHITE
                        } else {
                            Color32::from_gray(230)
                        };
                        plot_ui.text(Text::new(
                            PlotPoint::new(x, y),
                            RichText::new(count.to_string())
                                .size(12.0)
                                .color(text_color),
                        ));
                    }
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heat_ramp_spans_low_to_high() {
        assert_eq!(ChartPlotter::heat_color(0, 10), HEAT_LOW);
        assert_eq!(ChartPlotter::heat_color(10, 10), HEAT_HIGH);
    }

    #[test]
    fn heat_ramp_handles_empty_pivot() {
        assert_eq!(ChartPlotter::heat_color(0, 0), HEAT_LOW);
    }

    #[test]
    fn long_labels_are_truncated() {
        let label = ChartPlotter::truncate_label("Tiger Global Management", 14);
        assert_eq!(label.chars().count(), 14);
        assert!(label.ends_with('…'));
        assert_eq!(ChartPlotter::truncate_label("Accel", 14), "Accel");
    }
}
