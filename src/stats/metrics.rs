//! Metrics Calculator Module
//! Per-category negative review counts against their historical daily average.

use crate::data::{Category, Review};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Snapshot metric for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMetric {
    pub category: Category,
    /// Negative reviews on the reference date.
    pub count_on_date: usize,
    pub negative_total: usize,
    /// Distinct calendar dates with any review in this category.
    pub active_days: usize,
    pub avg_negative_count: f64,
    pub delta_percent: f64,
}

impl CategoryMetric {
    pub fn label(&self) -> String {
        format!("{} 부정 리뷰 개수", self.category.label())
    }

    pub fn value_text(&self) -> String {
        self.count_on_date.to_string()
    }

    /// Signed percentage, e.g. `+80.00%`.
    pub fn delta_text(&self) -> String {
        format!("{:+.2}%", self.delta_percent)
    }
}

pub struct MetricsCalculator;

impl MetricsCalculator {
    /// One metric per category, in category order.
    pub fn compute_all(reviews: &[Review], reference_date: NaiveDate) -> Vec<CategoryMetric> {
        Category::ALL
            .iter()
            .map(|&category| Self::compute(reviews, category, reference_date))
            .collect()
    }

    pub fn compute(
        reviews: &[Review],
        category: Category,
        reference_date: NaiveDate,
    ) -> CategoryMetric {
        let in_category: Vec<&Review> = reviews.iter().filter(|r| r.category == category).collect();

        let negative_total = in_category.iter().filter(|r| r.is_negative()).count();
        let count_on_date = in_category
            .iter()
            .filter(|r| r.is_negative() && r.date() == reference_date)
            .count();
        let active_days = in_category
            .iter()
            .map(|r| r.date())
            .collect::<HashSet<_>>()
            .len();

        let avg_negative_count = if active_days > 0 {
            negative_total as f64 / active_days as f64
        } else {
            0.0
        };

        CategoryMetric {
            category,
            count_on_date,
            negative_total,
            active_days,
            avg_negative_count,
            delta_percent: Self::delta_percent(count_on_date, avg_negative_count),
        }
    }

    /// Percentage change of `count` against `average`; 0 when the average is 0.
    pub fn delta_percent(count: usize, average: f64) -> f64 {
        if average > 0.0 {
            (count as f64 - average) / average * 100.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, hour: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, d)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 20).unwrap()
    }

    #[test]
    fn delta_is_zero_when_average_is_zero() {
        assert_eq!(MetricsCalculator::delta_percent(0, 0.0), 0.0);
        assert_eq!(MetricsCalculator::delta_percent(12, 0.0), 0.0);
    }

    #[test]
    fn average_uses_all_distinct_dates_in_category() {
        let reviews = vec![
            Review::new(at(20, 9), Some(1), 1, "1", "a"),
            Review::new(at(20, 10), Some(1), 1, "1", "b"),
            Review::new(at(20, 11), Some(1), 1, "2", "c"),
            Review::new(at(19, 9), Some(1), 1, "1", "d"),
            Review::new(at(18, 9), Some(1), 1, "1", "e"),
            Review::new(at(20, 9), Some(2), 1, "1", "other category"),
        ];

        let metric = MetricsCalculator::compute(&reviews, Category::SkinIrritation, reference());
        assert_eq!(metric.count_on_date, 3);
        assert_eq!(metric.negative_total, 5);
        assert_eq!(metric.active_days, 3);
        assert!((metric.avg_negative_count - 5.0 / 3.0).abs() < 1e-9);
        assert!((metric.delta_percent - 80.0).abs() < 1e-9);
        assert_eq!(metric.delta_text(), "+80.00%");
        assert_eq!(metric.value_text(), "3");
        assert_eq!(metric.label(), "피부 자극 및 부작용 부정 리뷰 개수");
    }

    #[test]
    fn non_negative_reviews_still_count_as_active_days() {
        let reviews = vec![
            Review::new(at(20, 9), Some(3), 1, "1", ""),
            Review::new(at(17, 9), Some(3), 0, "5", ""),
        ];
        let metric = MetricsCalculator::compute(&reviews, Category::LackOfEffect, reference());
        assert_eq!(metric.active_days, 2);
        assert!((metric.avg_negative_count - 0.5).abs() < 1e-9);
        assert_eq!(metric.delta_text(), "+100.00%");
    }

    #[test]
    fn falling_count_gives_negative_delta() {
        let reviews = vec![
            Review::new(at(19, 9), Some(4), 1, "1", ""),
            Review::new(at(19, 10), Some(4), 1, "1", ""),
            Review::new(at(19, 11), Some(4), 1, "1", ""),
            Review::new(at(20, 9), Some(4), 1, "1", ""),
        ];
        let metric = MetricsCalculator::compute(&reviews, Category::PriceValue, reference());
        // avg = 4 / 2 = 2, count = 1
        assert_eq!(metric.delta_text(), "-50.00%");
    }

    #[test]
    fn empty_category_shows_zero_card() {
        let metrics = MetricsCalculator::compute_all(&[], reference());
        assert_eq!(metrics.len(), 7);
        for metric in &metrics {
            assert_eq!(metric.value_text(), "0");
            assert_eq!(metric.delta_text(), "+0.00%");
        }
    }
}
