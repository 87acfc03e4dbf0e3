//! Control Panel Widget
//! Left side panel with the interval selector and the category filter.

use crate::data::Category;
use crate::session::ViewSettings;
use crate::stats::Interval;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Left side control panel. Owns the user-facing view settings.
pub struct ControlPanel {
    pub settings: ViewSettings,
    pub selected_categories: [bool; 7],
    pub data_path: PathBuf,
    pub review_count: usize,
}

impl ControlPanel {
    pub fn new(data_path: PathBuf, review_count: usize) -> Self {
        Self {
            settings: ViewSettings::default(),
            selected_categories: [true; 7],
            data_path,
            review_count,
        }
    }

    /// Selected categories in code order.
    pub fn selected(&self) -> Vec<Category> {
        Category::ALL
            .iter()
            .zip(self.selected_categories.iter())
            .filter(|(_, &selected)| selected)
            .map(|(category, _)| *category)
            .collect()
    }

    pub fn review_count_text(&self) -> String {
        format!("리뷰 {}건", self.review_count)
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let before = self.settings.clone();

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 리뷰 분석")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 데이터").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let name = self
                    .data_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                ui.label(RichText::new(name).size(12.0));
                ui.label(
                    RichText::new(self.review_count_text())
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Interval Section =====
        ui.label(RichText::new("⏱ 보기 간격 선택").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            for interval in Interval::ALL {
                ui.radio_value(&mut self.settings.interval, interval, interval.label());
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Category Section =====
        ui.label(RichText::new("🏷 카테고리 선택").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                let flags = self.selected_categories.iter_mut();
                for (category, selected) in Category::ALL.iter().zip(flags) {
                    ui.checkbox(selected, category.label());
                }
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("전체 선택").clicked() {
                self.selected_categories.iter_mut().for_each(|v| *v = true);
            }
            if ui.small_button("전체 해제").clicked() {
                self.selected_categories.iter_mut().for_each(|v| *v = false);
            }
        });

        self.settings.selected = self.selected();

        if self.settings != before {
            log::debug!("View settings changed: {:?}", self.settings);
            ControlPanelAction::SettingsChanged
        } else {
            ControlPanelAction::None
        }
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SettingsChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_every_category_selected() {
        let panel = ControlPanel::new(PathBuf::from("reviews.csv"), 0);
        assert_eq!(panel.selected(), Category::ALL.to_vec());
        assert_eq!(panel.settings, ViewSettings::default());
    }

    #[test]
    fn selection_follows_checkbox_flags() {
        let mut panel = ControlPanel::new(PathBuf::from("reviews.csv"), 0);
        panel.selected_categories = [false; 7];
        panel.selected_categories[1] = true;
        panel.selected_categories[6] = true;
        assert_eq!(panel.selected(), vec![Category::Adhesion, Category::Other]);
    }

    #[test]
    fn review_count_is_shown_in_korean() {
        let panel = ControlPanel::new(PathBuf::from("reviews.xlsx"), 128);
        assert_eq!(panel.review_count_text(), "리뷰 128건");
    }
}
