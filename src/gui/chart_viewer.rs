//! Chart Viewer Widget
//! Central scrollable panel: metric cards, trend charts and the "Other" review tables.

use crate::charts::TrendPlotter;
use crate::config::ColumnNames;
use crate::session::{DashboardView, DatedReviews};
use crate::stats::{CategoryMetric, Interval};
use egui::{Color32, RichText, ScrollArea};

/// Metric cards per row
const CARDS_PER_ROW: usize = 4;
const CARD_SPACING: f32 = 12.0;
const CARD_HEIGHT: f32 = 90.0;

const NO_DATA: &str = "선택한 간격에 해당하는 데이터가 없습니다.";

const UP_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const DOWN_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const WARNING_COLOR: Color32 = Color32::from_rgb(230, 162, 60);
const INFO_COLOR: Color32 = Color32::from_rgb(100, 149, 237);

/// Renders one `DashboardView`. Holds no state of its own beyond display settings.
pub struct ChartViewer {
    date_format: String,
    columns: ColumnNames,
}

impl ChartViewer {
    pub fn new(date_format: String, columns: ColumnNames) -> Self {
        Self {
            date_format,
            columns,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui, view: &DashboardView, interval: Interval) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(
                    RichText::new("전설의 패치 리뷰 분석 대시보드")
                        .size(24.0)
                        .strong(),
                );
                ui.add_space(12.0);

                Self::draw_metric_cards(ui, &view.metrics);
                ui.add_space(16.0);
                ui.separator();

                // Negative review trend
                ui.label(RichText::new("날짜별 부정적인 댓글 개수").size(16.0).strong());
                if view.negative_trend.is_empty() {
                    Self::warning(ui, NO_DATA);
                } else {
                    TrendPlotter::draw_negative_line(
                        ui,
                        &view.negative_trend,
                        interval,
                        &self.date_format,
                    );
                }
                ui.add_space(16.0);
                ui.separator();

                // Category trend
                if view.category_trend.is_empty() {
                    Self::warning(ui, NO_DATA);
                } else {
                    ui.label(
                        RichText::new("날짜별 리뷰 카테고리 빈도수 (누적 막대 그래프)")
                            .size(16.0)
                            .strong(),
                    );
                    TrendPlotter::draw_stacked_bars(
                        ui,
                        &view.category_trend,
                        interval,
                        &self.date_format,
                    );
                    ui.add_space(12.0);
                    ui.label(
                        RichText::new("날짜별 리뷰 카테고리 빈도수 (선 그래프)")
                            .size(16.0)
                            .strong(),
                    );
                    TrendPlotter::draw_category_lines(
                        ui,
                        &view.category_trend,
                        interval,
                        &self.date_format,
                    );
                }
                ui.add_space(16.0);
                ui.separator();

                for table in &view.other_reviews {
                    self.draw_review_table(ui, table);
                    ui.add_space(12.0);
                }
            });
    }

    /// Cards wrap after `CARDS_PER_ROW`.
    fn draw_metric_cards(ui: &mut egui::Ui, metrics: &[CategoryMetric]) {
        let avail = ui.available_width();
        let card_width =
            ((avail - CARD_SPACING * CARDS_PER_ROW as f32) / CARDS_PER_ROW as f32).max(160.0);

        for row in metrics.chunks(CARDS_PER_ROW) {
            ui.horizontal(|ui| {
                for metric in row {
                    Self::draw_metric_card(ui, metric, card_width);
                    ui.add_space(CARD_SPACING);
                }
            });
            ui.add_space(CARD_SPACING);
        }
    }

    fn draw_metric_card(ui: &mut egui::Ui, metric: &CategoryMetric, width: f32) {
        let delta_color = if metric.delta_percent < 0.0 {
            DOWN_COLOR
        } else {
            UP_COLOR
        };
        let arrow = if metric.delta_percent < 0.0 { "↓" } else { "↑" };

        egui::Frame::none()
            .rounding(8.0)
            .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(width - 20.0);
                ui.set_min_height(CARD_HEIGHT - 20.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(metric.label()).size(12.0).color(Color32::GRAY));
                    ui.label(RichText::new(metric.value_text()).size(26.0).strong());
                    ui.label(
                        RichText::new(format!("{} {}", arrow, metric.delta_text()))
                            .size(12.0)
                            .color(delta_color),
                    );
                });
            });
    }

    /// Rating/text table, or an info notice when there is nothing to list.
    fn draw_review_table(&self, ui: &mut egui::Ui, table: &DatedReviews) {
        if table.rows.is_empty() {
            Self::notice(ui, &table.empty_notice(), INFO_COLOR);
            return;
        }

        ui.label(RichText::new(table.title()).size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("other_reviews_{}", table.date)))
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new(&self.columns.rating).strong().size(12.0));
                        ui.label(RichText::new(&self.columns.text).strong().size(12.0));
                        ui.end_row();

                        for row in &table.rows {
                            ui.label(RichText::new(&row.rating).size(12.0));
                            ui.label(RichText::new(&row.text).size(12.0));
                            ui.end_row();
                        }
                    });
            });
    }

    fn warning(ui: &mut egui::Ui, text: &str) {
        Self::notice(ui, &format!("⚠ {}", text), WARNING_COLOR);
    }

    fn notice(ui: &mut egui::Ui, text: &str, color: Color32) {
        egui::Frame::none()
            .rounding(5.0)
            .stroke(egui::Stroke::new(1.0, color))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(text).size(13.0).color(color));
            });
    }
}
