//! Chart Plotter Module
//! Draws the review trend charts with egui_plot. Dates sit on the x axis as
//! day numbers and are formatted back with the configured date format.

use crate::data::Category;
use crate::stats::{CategoryCountPoint, CountPoint, Interval};
use chrono::{Datelike, NaiveDate};
use egui::Color32;
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, PlotUi, Points};
use std::collections::{BTreeMap, BTreeSet};

/// Line color of the negative review trend.
pub const NEGATIVE_COLOR: Color32 = Color32::from_rgb(255, 165, 0); // Orange

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(96, 125, 139), // Blue Grey
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
];

const CHART_HEIGHT: f32 = 280.0;

/// Draws trend charts from aggregator output.
pub struct TrendPlotter;

impl TrendPlotter {
    /// Fixed color per category so every chart uses the same legend.
    pub fn category_color(category: Category) -> Color32 {
        PALETTE[category.index() % PALETTE.len()]
    }

    /// X coordinate of a date.
    pub fn date_to_x(date: NaiveDate) -> f64 {
        date.num_days_from_ce() as f64
    }

    pub fn x_to_date(x: f64) -> Option<NaiveDate> {
        NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
    }

    /// Axis label for an x value. Non-integral positions stay unlabeled.
    pub fn format_x(x: f64, date_format: &str) -> String {
        if (x - x.round()).abs() > 1e-6 {
            return String::new();
        }
        Self::x_to_date(x)
            .map(|d| d.format(date_format).to_string())
            .unwrap_or_default()
    }

    /// Grid marks exactly on the bucket dates.
    fn bucket_marks(buckets: &[f64], interval: Interval) -> Vec<GridMark> {
        buckets
            .iter()
            .map(|&value| GridMark {
                value,
                step_size: interval.span_days(),
            })
            .collect()
    }

    fn show_plot(
        ui: &mut egui::Ui,
        id: &str,
        y_label: &str,
        buckets: Vec<f64>,
        interval: Interval,
        date_format: &str,
        build: impl FnOnce(&mut PlotUi),
    ) {
        let fmt = date_format.to_string();
        Plot::new(id)
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label("날짜")
            .y_axis_label(y_label)
            .x_grid_spacer(move |_input| Self::bucket_marks(&buckets, interval))
            .x_axis_formatter(move |mark, _range| Self::format_x(mark.value, &fmt))
            .show(ui, build);
    }

    /// Single orange line of negative reviews per bucket.
    pub fn draw_negative_line(
        ui: &mut egui::Ui,
        points: &[CountPoint],
        interval: Interval,
        date_format: &str,
    ) {
        let series: Vec<[f64; 2]> = points
            .iter()
            .map(|p| [Self::date_to_x(p.bucket), p.count as f64])
            .collect();
        let buckets = series.iter().map(|p| p[0]).collect();

        Self::show_plot(
            ui,
            "negative_trend",
            "부정적인 댓글 개수",
            buckets,
            interval,
            date_format,
            |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(series.iter().copied()))
                        .color(NEGATIVE_COLOR)
                        .width(2.0)
                        .name("부정적인 댓글"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(series.iter().copied()))
                        .radius(3.0)
                        .color(NEGATIVE_COLOR),
                );
            },
        );
    }

    /// Stacked bars, one segment per category.
    pub fn draw_stacked_bars(
        ui: &mut egui::Ui,
        points: &[CategoryCountPoint],
        interval: Interval,
        date_format: &str,
    ) {
        let (buckets, series) = Self::dense_series(points);
        let bar_width = interval.span_days() * 0.8;

        // stack_on works by bar index, so every chart carries every bucket
        let mut charts: Vec<BarChart> = Vec::with_capacity(series.len());
        for (category, counts) in &series {
            let bars: Vec<Bar> = buckets
                .iter()
                .zip(counts)
                .map(|(&x, &count)| Bar::new(x, count as f64).width(bar_width))
                .collect();
            let chart = {
                let below: Vec<&BarChart> = charts.iter().collect();
                BarChart::new(bars)
                    .name(category.label())
                    .color(Self::category_color(*category))
                    .stack_on(&below)
            };
            charts.push(chart);
        }

        Self::show_plot(
            ui,
            "category_bars",
            "리뷰 빈도수",
            buckets,
            interval,
            date_format,
            |plot_ui| {
                for chart in charts {
                    plot_ui.bar_chart(chart);
                }
            },
        );
    }

    /// One line per category over the buckets where it has data.
    pub fn draw_category_lines(
        ui: &mut egui::Ui,
        points: &[CategoryCountPoint],
        interval: Interval,
        date_format: &str,
    ) {
        let mut series: BTreeMap<Category, Vec<[f64; 2]>> = BTreeMap::new();
        for p in points {
            series
                .entry(p.category)
                .or_default()
                .push([Self::date_to_x(p.bucket), p.count as f64]);
        }
        let (buckets, _) = Self::dense_series(points);

        Self::show_plot(
            ui,
            "category_lines",
            "리뷰 빈도수",
            buckets,
            interval,
            date_format,
            |plot_ui| {
                for (category, pts) in &series {
                    let color = Self::category_color(*category);
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(pts.iter().copied()))
                            .color(color)
                            .width(1.5)
                            .name(category.label()),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(pts.iter().copied()))
                            .radius(2.5)
                            .color(color),
                    );
                }
            },
        );
    }

    /// Union of bucket positions and per-category counts aligned to them (0 where absent).
    pub fn dense_series(
        points: &[CategoryCountPoint],
    ) -> (Vec<f64>, BTreeMap<Category, Vec<usize>>) {
        let dates: BTreeSet<NaiveDate> = points.iter().map(|p| p.bucket).collect();
        let dates: Vec<NaiveDate> = dates.into_iter().collect();

        let mut series: BTreeMap<Category, Vec<usize>> = BTreeMap::new();
        for p in points {
            let counts = series
                .entry(p.category)
                .or_insert_with(|| vec![0; dates.len()]);
            if let Ok(idx) = dates.binary_search(&p.bucket) {
                counts[idx] += p.count;
            }
        }

        let buckets = dates.into_iter().map(Self::date_to_x).collect();
        (buckets, series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
    }

    #[test]
    fn x_axis_round_trips_dates() {
        let x = TrendPlotter::date_to_x(date(20));
        assert_eq!(TrendPlotter::x_to_date(x), Some(date(20)));
        assert_eq!(TrendPlotter::format_x(x, "%Y-%m-%d"), "2024-10-20");
        assert_eq!(TrendPlotter::format_x(x, "%m/%d"), "10/20");
        assert_eq!(TrendPlotter::format_x(x + 0.5, "%Y-%m-%d"), "");
    }

    #[test]
    fn dense_series_fills_missing_buckets_with_zero() {
        let points = vec![
            CategoryCountPoint { bucket: date(6), category: Category::Adhesion, count: 2 },
            CategoryCountPoint { bucket: date(13), category: Category::Other, count: 1 },
            CategoryCountPoint { bucket: date(13), category: Category::Adhesion, count: 4 },
        ];
        let (buckets, series) = TrendPlotter::dense_series(&points);
        assert_eq!(buckets.len(), 2);
        assert_eq!(series[&Category::Adhesion], vec![2, 4]);
        assert_eq!(series[&Category::Other], vec![0, 1]);
    }

    #[test]
    fn categories_keep_distinct_colors() {
        let colors: BTreeSet<[u8; 4]> = Category::ALL
            .iter()
            .map(|&c| TrendPlotter::category_color(c).to_array())
            .collect();
        assert_eq!(colors.len(), 7);
    }
}
