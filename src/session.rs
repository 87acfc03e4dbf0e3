//! Dashboard Session Module
//! Holds the loaded review table for one run and derives everything the UI
//! displays from it as a pure function of the current view settings.

use crate::config::DashboardConfig;
use crate::data::{Category, LoaderError, ReviewLoader, ReviewTable};
use crate::stats::{
    CategoryCountPoint, CategoryMetric, CountPoint, Interval, MetricsCalculator, TrendAggregator,
};
use chrono::{Datelike, NaiveDate};

/// Loaded table plus the configuration it was loaded with. Read-only after creation.
pub struct Session {
    pub config: DashboardConfig,
    pub table: ReviewTable,
}

impl Session {
    /// Load the configured review file.
    pub fn open(config: DashboardConfig) -> Result<Self, LoaderError> {
        let table = ReviewLoader::new(config.columns.clone()).load(&config.data_path)?;
        Ok(Self { config, table })
    }

    pub fn new(config: DashboardConfig, table: ReviewTable) -> Self {
        Self { config, table }
    }
}

/// User-controlled inputs of a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    pub interval: Interval,
    pub selected: Vec<Category>,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            interval: Interval::default(),
            selected: Category::ALL.to_vec(),
        }
    }
}

/// Rating and text of a listed review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    pub rating: String,
    pub text: String,
}

/// "Other" category reviews written on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedReviews {
    pub date: NaiveDate,
    pub rows: Vec<ReviewRow>,
}

impl DatedReviews {
    pub fn title(&self) -> String {
        format!(
            "{} 카테고리의 {}월 {}일 추가된 리뷰:",
            Category::Other.label(),
            self.date.month(),
            self.date.day()
        )
    }

    pub fn empty_notice(&self) -> String {
        format!(
            "{}월 {}일에 추가된 '{}' 카테고리 데이터가 없습니다.",
            self.date.month(),
            self.date.day(),
            Category::Other.label()
        )
    }
}

/// Everything one render pass shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub metrics: Vec<CategoryMetric>,
    pub negative_trend: Vec<CountPoint>,
    pub category_trend: Vec<CategoryCountPoint>,
    pub other_reviews: Vec<DatedReviews>,
}

/// Recompute the whole view from the session table and the current settings.
pub fn build_view(session: &Session, settings: &ViewSettings) -> DashboardView {
    let config = &session.config;
    let reviews = session.table.reviews();
    log::debug!(
        "Building view: interval={:?}, {} categories selected",
        settings.interval,
        settings.selected.len()
    );

    let other_reviews = config
        .other_table_dates
        .iter()
        .map(|&date| DatedReviews {
            date,
            rows: session
                .table
                .by_category_on(Category::Other, date)
                .into_iter()
                .map(|r| ReviewRow {
                    rating: r.rating.clone(),
                    text: r.text.clone(),
                })
                .collect(),
        })
        .collect();

    DashboardView {
        metrics: MetricsCalculator::compute_all(reviews, config.metrics_date),
        negative_trend: TrendAggregator::negative_trend(reviews, settings.interval, &config.window),
        category_trend: TrendAggregator::category_trend(
            reviews,
            settings.interval,
            &settings.selected,
            &config.window,
        ),
        other_reviews,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Review;

    fn at(d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn session(reviews: Vec<Review>) -> Session {
        Session::new(DashboardConfig::default(), ReviewTable::new(reviews))
    }

    #[test]
    fn default_settings_select_everything_daily() {
        let settings = ViewSettings::default();
        assert_eq!(settings.interval, Interval::Daily);
        assert_eq!(settings.selected, Category::ALL.to_vec());
    }

    #[test]
    fn empty_table_builds_a_complete_view() {
        let view = build_view(&session(Vec::new()), &ViewSettings::default());
        assert_eq!(view.metrics.len(), 7);
        assert_eq!(view.negative_trend.len(), 10);
        assert!(view.category_trend.is_empty());
        assert_eq!(view.other_reviews.len(), 2);
        assert!(view.other_reviews.iter().all(|t| t.rows.is_empty()));
    }

    #[test]
    fn other_tables_list_rating_and_text_for_each_date() {
        let view = build_view(
            &session(vec![
                Review::new(at(21), Some(7), 0, "4", "배송이 빨라요"),
                Review::new(at(21), Some(2), 1, "1", "잘 떨어져요"),
                Review::new(at(20), None, 1, "2", "코드 없음"),
            ]),
            &ViewSettings::default(),
        );

        let on_21 = &view.other_reviews[0];
        assert_eq!(on_21.date, NaiveDate::from_ymd_opt(2024, 10, 21).unwrap());
        assert_eq!(
            on_21.rows,
            vec![ReviewRow {
                rating: "4".to_string(),
                text: "배송이 빨라요".to_string()
            }]
        );
        assert_eq!(on_21.title(), "기타 카테고리의 10월 21일 추가된 리뷰:");

        let on_20 = &view.other_reviews[1];
        assert_eq!(on_20.rows.len(), 1);
        assert_eq!(on_20.rows[0].text, "코드 없음");
    }

    #[test]
    fn missing_other_reviews_produce_notice() {
        let view = build_view(
            &session(vec![Review::new(at(20), Some(7), 0, "3", "")]),
            &ViewSettings::default(),
        );
        let on_21 = &view.other_reviews[0];
        assert!(on_21.rows.is_empty());
        assert_eq!(
            on_21.empty_notice(),
            "10월 21일에 추가된 '기타' 카테고리 데이터가 없습니다."
        );
    }

    #[test]
    fn changing_settings_recomputes_trends() {
        let s = session(vec![
            Review::new(at(14), Some(1), 1, "1", ""),
            Review::new(at(15), Some(2), 0, "3", ""),
        ]);
        let daily = build_view(&s, &ViewSettings::default());
        let weekly = build_view(
            &s,
            &ViewSettings {
                interval: Interval::Weekly,
                selected: vec![Category::Adhesion],
            },
        );

        assert_eq!(daily.category_trend.len(), 20);
        assert_eq!(weekly.negative_trend.len(), 1);
        assert_eq!(weekly.category_trend.len(), 1);
        assert_eq!(weekly.category_trend[0].category, Category::Adhesion);
        assert_eq!(daily.metrics, weekly.metrics);
    }
}
