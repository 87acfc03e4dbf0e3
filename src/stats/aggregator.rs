//! Time-Bucketed Aggregator Module
//! Counts reviews per date bucket at daily, weekly or monthly granularity.
//!
//! Daily buckets are zero-filled across a fixed window; weekly and monthly
//! buckets only exist where at least one review falls.

use crate::data::{Category, Review};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// Bucket granularity selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interval {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    pub const ALL: [Interval; 3] = [Interval::Daily, Interval::Weekly, Interval::Monthly];

    pub fn label(self) -> &'static str {
        match self {
            Interval::Daily => "1일 간격",
            Interval::Weekly => "7일 간격",
            Interval::Monthly => "1개월 간격",
        }
    }

    /// Bucket key for a date: the day itself, the Sunday closing its week,
    /// or the last day of its month.
    pub fn bucket(self, date: NaiveDate) -> NaiveDate {
        match self {
            Interval::Daily => date,
            Interval::Weekly => {
                let to_sunday = 6 - date.weekday().num_days_from_monday() as i64;
                date + Duration::days(to_sunday)
            }
            Interval::Monthly => {
                let (year, month) = if date.month() == 12 {
                    (date.year() + 1, 1)
                } else {
                    (date.year(), date.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1)
                    .and_then(|first| first.pred_opt())
                    .unwrap_or(date)
            }
        }
    }

    /// Nominal bucket length in days, used for bar widths.
    pub fn span_days(self) -> f64 {
        match self {
            Interval::Daily => 1.0,
            Interval::Weekly => 7.0,
            Interval::Monthly => 30.0,
        }
    }
}

/// Inclusive calendar window used to zero-fill daily buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Every day of the window in ascending order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .collect()
    }
}

/// Count for one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountPoint {
    pub bucket: NaiveDate,
    pub count: usize,
}

/// Count for one (bucket, category) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCountPoint {
    pub bucket: NaiveDate,
    pub category: Category,
    pub count: usize,
}

/// Pure aggregation functions over a slice of reviews.
pub struct TrendAggregator;

impl TrendAggregator {
    /// Negative reviews per bucket.
    pub fn negative_trend(
        reviews: &[Review],
        interval: Interval,
        window: &DateWindow,
    ) -> Vec<CountPoint> {
        let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for review in reviews.iter().filter(|r| r.is_negative()) {
            *counts.entry(interval.bucket(review.date())).or_default() += 1;
        }

        match interval {
            Interval::Daily => window
                .days()
                .into_iter()
                .map(|day| CountPoint {
                    bucket: day,
                    count: counts.get(&day).copied().unwrap_or(0),
                })
                .collect(),
            Interval::Weekly | Interval::Monthly => counts
                .into_iter()
                .map(|(bucket, count)| CountPoint { bucket, count })
                .collect(),
        }
    }

    /// Reviews of any sentiment per (bucket, category), restricted to `selected`.
    ///
    /// Daily output covers every window day for each category that occurs in
    /// the filtered reviews; the window itself never depends on the filter.
    pub fn category_trend(
        reviews: &[Review],
        interval: Interval,
        selected: &[Category],
        window: &DateWindow,
    ) -> Vec<CategoryCountPoint> {
        let mut counts: BTreeMap<(NaiveDate, Category), usize> = BTreeMap::new();
        let mut present: BTreeSet<Category> = BTreeSet::new();

        for review in reviews.iter().filter(|r| selected.contains(&r.category)) {
            present.insert(review.category);
            *counts
                .entry((interval.bucket(review.date()), review.category))
                .or_default() += 1;
        }

        match interval {
            Interval::Daily => {
                let mut points = Vec::with_capacity(window.days().len() * present.len());
                for day in window.days() {
                    for &category in &present {
                        points.push(CategoryCountPoint {
                            bucket: day,
                            category,
                            count: counts.get(&(day, category)).copied().unwrap_or(0),
                        });
                    }
                }
                points
            }
            Interval::Weekly | Interval::Monthly => counts
                .into_iter()
                .map(|((bucket, category), count)| CategoryCountPoint {
                    bucket,
                    category,
                    count,
                })
                .collect(),
        }
    }
}
