//! Static Chart Export
//! Renders the active view to a PNG with plotters and writes a JSON sidecar
//! of the computed aggregates.

use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;
use serde::Serialize;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use crate::charts::plotter::{GeographyViewData, InvestorViewData};
use crate::stats::{InvestorCount, InvestorSummary};

const EXPORT_WIDTH: u32 = 1600;
const EXPORT_HEIGHT: u32 = 700;

// Export palette, mirroring the interactive charts.
const COMPANY_RGB: RGBColor = RGBColor(52, 152, 219);
const VALUATION_RGB: RGBColor = RGBColor(155, 89, 182);
const SERIES_RGB: RGBColor = RGBColor(46, 204, 113);
const HEAT_LOW_RGB: RGBColor = RGBColor(59, 76, 192);
const HEAT_HIGH_RGB: RGBColor = RGBColor(180, 4, 38);

/// Renders view snapshots to disk.
pub struct ChartExporter;

impl ChartExporter {
    /// Two side-by-side bar charts: companies and valuation per top investor.
    pub fn export_investor_view(data: &InvestorViewData, path: &Path) -> Result<()> {
        Self::render_investor(data, path)
            .map_err(|e| anyhow!("rendering {}: {e}", path.display()))
    }

    /// Per-year line chart above the industry heatmap.
    pub fn export_geography_view(data: &GeographyViewData, path: &Path) -> Result<()> {
        Self::render_geography(data, path)
            .map_err(|e| anyhow!("rendering {}: {e}", path.display()))
    }

    /// JSON sidecar with the investor page's computed aggregates.
    pub fn write_investor_summary(data: &InvestorViewData, path: &Path) -> Result<()> {
        #[derive(Serialize)]
        struct Report<'a> {
            summary: &'a InvestorSummary,
            top_investors: &'a [InvestorCount],
            valuation_by_investor: &'a [f64],
        }

        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(
            file,
            &Report {
                summary: &data.summary,
                top_investors: &data.ranked,
                valuation_by_investor: &data.valuation_by_investor,
            },
        )
        .context("writing investor summary JSON")?;
        Ok(())
    }

    /// JSON sidecar with the geography page's computed aggregates.
    pub fn write_geography_summary(data: &GeographyViewData, path: &Path) -> Result<()> {
        #[derive(Serialize)]
        struct Report<'a> {
            series: &'a crate::stats::CountrySeries,
            pivot: &'a crate::stats::IndustryPivot,
        }

        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(
            file,
            &Report {
                series: &data.series,
                pivot: &data.pivot,
            },
        )
        .context("writing geography summary JSON")?;
        Ok(())
    }

    fn render_investor(data: &InvestorViewData, path: &Path) -> Result<(), Box<dyn Error>> {
        let root = BitMapBackend::new(path, (EXPORT_WIDTH, EXPORT_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;
        let (left, right) = root.split_horizontally(EXPORT_WIDTH / 2);

        let labels: Vec<String> = data.ranked.iter().map(|r| r.name.clone()).collect();
        let companies: Vec<f64> = data.ranked.iter().map(|r| r.companies as f64).collect();

        Self::draw_bar_pane(
            &left,
            "Number of Companies Invested In",
            "Number of Companies",
            &labels,
            &companies,
            COMPANY_RGB,
        )?;
        Self::draw_bar_pane(
            &right,
            "Total Valuation of Investments",
            "Valuation ($B)",
            &labels,
            &data.valuation_by_investor,
            VALUATION_RGB,
        )?;

        root.present()?;
        Ok(())
    }

    fn draw_bar_pane(
        area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        title: &str,
        y_desc: &str,
        labels: &[String],
        values: &[f64],
        color: RGBColor,
    ) -> Result<(), Box<dyn Error>> {
        let max = values.iter().cloned().fold(0.0f64, f64::max).max(1.0);

        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 26))
            .margin(15)
            .x_label_area_size(150)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..labels.len() as f64 - 0.5, 0.0..max * 1.1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|x| {
                let nearest = x.round();
                if (x - nearest).abs() > 0.3 || nearest < 0.0 {
                    return String::new();
                }
                labels
                    .get(nearest as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .x_label_style(
                ("sans-serif", 14)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_desc(y_desc)
            .draw()?;

        chart.draw_series(values.iter().enumerate().map(|(i, &value)| {
            Rectangle::new(
                [(i as f64 - 0.3, 0.0), (i as f64 + 0.3, value)],
                color.filled(),
            )
        }))?;

        Ok(())
    }

    fn render_geography(data: &GeographyViewData, path: &Path) -> Result<(), Box<dyn Error>> {
        let root = BitMapBackend::new(path, (EXPORT_WIDTH, EXPORT_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;
        let (top, bottom) = root.split_vertically(EXPORT_HEIGHT / 2);

        Self::draw_series_pane(&top, data)?;
        Self::draw_heatmap_pane(&bottom, data)?;

        root.present()?;
        Ok(())
    }

    fn draw_series_pane(
        area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        data: &GeographyViewData,
    ) -> Result<(), Box<dyn Error>> {
        let series = &data.series;
        let (year_min, year_max) = match (series.points.first(), series.points.last()) {
            (Some(&(first, _)), Some(&(last, _))) => (first, last),
            _ => (0, 1),
        };
        let count_max = series
            .points
            .iter()
            .map(|&(_, count)| count)
            .max()
            .unwrap_or(1) as f64;

        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("Unicorn Companies per Year in {}", series.country),
                ("sans-serif", 26),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(
                year_min as f64 - 0.5..year_max as f64 + 0.5,
                0.0..count_max * 1.1,
            )?;

        chart
            .configure_mesh()
            .x_label_formatter(&|x| format!("{}", x.round() as i64))
            .x_desc("Year")
            .y_desc("Number of Companies")
            .draw()?;

        let points: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|&(year, count)| (year as f64, count as f64))
            .collect();

        chart.draw_series(LineSeries::new(points.clone(), SERIES_RGB.stroke_width(2)))?;
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, SERIES_RGB.filled())),
        )?;

        Ok(())
    }

    fn draw_heatmap_pane(
        area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
        data: &GeographyViewData,
    ) -> Result<(), Box<dyn Error>> {
        let pivot = &data.pivot;
        let max = pivot.max_count().max(1);
        let industries = &pivot.industries;
        let years = &pivot.years;

        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("Industry Distribution in {}", pivot.country),
                ("sans-serif", 26),
            )
            .margin(15)
            .x_label_area_size(120)
            .y_label_area_size(70)
            .build_cartesian_2d(
                -0.5f64..industries.len() as f64 - 0.5,
                -0.5f64..years.len() as f64 - 0.5,
            )?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(industries.len())
            .y_labels(years.len())
            .x_label_formatter(&|x| {
                let nearest = x.round();
                if (x - nearest).abs() > 0.3 || nearest < 0.0 {
                    return String::new();
                }
                industries
                    .get(nearest as usize)
                    .cloned()
                    .unwrap_or_default()
            })
            .y_label_formatter(&|y| {
                let nearest = y.round();
                if (y - nearest).abs() > 0.3 || nearest < 0.0 {
                    return String::new();
                }
                years
                    .get(nearest as usize)
                    .map(|year| year.to_string())
                    .unwrap_or_default()
            })
            .x_label_style(
                ("sans-serif", 14)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .draw()?;

        for (row, year_counts) in pivot.counts.iter().enumerate() {
            for (col, &count) in year_counts.iter().enumerate() {
                let x = col as f64;
                let y = row as f64;
                let fill = Self::heat_rgb(count, max);

                chart.draw_series(std::iter::once(Rectangle::new(
                    [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                    fill.filled(),
                )))?;
                chart.draw_series(std::iter::once(Text::new(
                    count.to_string(),
                    (x, y),
                    ("sans-serif", 16).into_font().color(&WHITE),
                )))?;
            }
        }

        Ok(())
    }

    fn heat_rgb(count: u32, max: u32) -> RGBColor {
        let t = count as f64 / max as f64;
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        RGBColor(
            lerp(HEAT_LOW_RGB.0, HEAT_HIGH_RGB.0),
            lerp(HEAT_LOW_RGB.1, HEAT_HIGH_RGB.1),
            lerp(HEAT_LOW_RGB.2, HEAT_HIGH_RGB.2),
        )
    }
}
