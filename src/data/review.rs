//! Review Records Module
//! Normalizes a loaded DataFrame into typed review records.

use crate::config::ColumnNames;
use crate::data::{Category, LoaderError};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

/// Timestamp layouts accepted for the write-time column.
const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d", "%Y. %m. %d."];

/// A single product review.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub written_at: NaiveDateTime,
    pub category_code: Option<i64>,
    pub sentiment: i64,
    pub rating: String,
    pub text: String,
    pub category: Category,
}

impl Review {
    pub fn new(
        written_at: NaiveDateTime,
        category_code: Option<i64>,
        sentiment: i64,
        rating: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            written_at,
            category_code,
            sentiment,
            rating: rating.into(),
            text: text.into(),
            category: Category::from_code(category_code),
        }
    }

    /// Calendar date the review was written on.
    pub fn date(&self) -> NaiveDate {
        self.written_at.date()
    }

    pub fn is_negative(&self) -> bool {
        self.sentiment == 1
    }
}

/// Read-only review table shared by every downstream component.
#[derive(Debug, Clone, Default)]
pub struct ReviewTable {
    reviews: Vec<Review>,
}

impl ReviewTable {
    pub fn new(reviews: Vec<Review>) -> Self {
        Self { reviews }
    }

    /// Extract the configured columns from a raw DataFrame.
    ///
    /// Any missing column or unparseable timestamp fails the whole load.
    pub fn from_dataframe(df: &DataFrame, columns: &ColumnNames) -> Result<Self, LoaderError> {
        let written_at = string_values(df, &columns.written_at)?;
        let codes = numeric_values(df, &columns.category_code)?;
        let sentiments = numeric_values(df, &columns.sentiment)?;
        let ratings = string_values(df, &columns.rating)?;
        let texts = string_values(df, &columns.text)?;

        let mut reviews = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let raw = written_at[i].as_deref().unwrap_or_default();
            let timestamp = parse_timestamp(raw).ok_or_else(|| LoaderError::InvalidTimestamp {
                row: i + 1,
                value: raw.to_string(),
            })?;

            reviews.push(Review::new(
                timestamp,
                codes[i].and_then(whole_number),
                sentiments[i].map(|v| v.round() as i64).unwrap_or(0),
                ratings[i].clone().unwrap_or_default(),
                texts[i].clone().unwrap_or_default(),
            ));
        }

        Ok(Self { reviews })
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Reviews of one category written on a given calendar date, in file order.
    pub fn by_category_on(&self, category: Category, date: NaiveDate) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|r| r.category == category && r.date() == date)
            .collect()
    }
}

/// Parse a write-time cell. Date-only values map to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Integral values only; `1.4` is not code 1.
fn whole_number(v: f64) -> Option<i64> {
    (v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64).then_some(v as i64)
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, LoaderError> {
    df.column(name)
        .map_err(|_| LoaderError::MissingColumn(name.to_string()))
}

fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
    let casted = column(df, name)?.cast(&DataType::String)?;
    Ok(casted
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
    let casted = column(df, name)?.cast(&DataType::Float64)?;
    Ok(casted
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        df!(
            "리뷰 작성시간" => ["2024-10-20 09:15:00", "2024-10-19", "2024.10.18 23:59"],
            "추가정보" => [Some(1i64), None, Some(9)],
            "sentiment" => [Some(1i64), Some(0), None],
            "작성 리뷰 평점" => [5i64, 1, 3],
            "리뷰 내용" => ["따가워요", "괜찮아요", "그냥 그래요"]
        )
        .unwrap()
    }

    #[test]
    fn parses_supported_timestamp_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 10, 20)
            .unwrap()
            .and_hms_opt(13, 5, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-10-20 13:05:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-10-20T13:05:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-10-20 13:05"), Some(expected));
        assert_eq!(parse_timestamp("2024/10/20 13:05:00"), Some(expected));
        assert_eq!(parse_timestamp("2024.10.20 13:05"), Some(expected));
        assert_eq!(
            parse_timestamp(" 2024-10-20 "),
            NaiveDate::from_ymd_opt(2024, 10, 20).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn normalizes_frame_into_reviews() {
        let table = ReviewTable::from_dataframe(&sample_frame(), &ColumnNames::default()).unwrap();
        assert_eq!(table.len(), 3);

        let first = &table.reviews()[0];
        assert_eq!(first.category, Category::SkinIrritation);
        assert!(first.is_negative());
        assert_eq!(first.rating, "5");
        assert_eq!(first.text, "따가워요");

        // Missing and out-of-range codes both land in Other
        assert_eq!(table.reviews()[1].category, Category::Other);
        assert_eq!(table.reviews()[2].category, Category::Other);
        // Missing sentiment is non-negative
        assert_eq!(table.reviews()[2].sentiment, 0);
    }

    #[test]
    fn fractional_code_is_not_rounded_into_a_category() {
        let df = df!(
            "리뷰 작성시간" => ["2024-10-20", "2024-10-20"],
            "추가정보" => [1.4f64, 2.0],
            "sentiment" => [1i64, 1],
            "작성 리뷰 평점" => [1i64, 1],
            "리뷰 내용" => ["a", "b"]
        )
        .unwrap();
        let table = ReviewTable::from_dataframe(&df, &ColumnNames::default()).unwrap();
        assert_eq!(table.reviews()[0].category, Category::Other);
        assert_eq!(table.reviews()[0].category_code, None);
        assert_eq!(table.reviews()[1].category, Category::Adhesion);
        assert_eq!(table.reviews()[1].category_code, Some(2));
    }

    #[test]
    fn missing_column_fails_the_load() {
        let columns = ColumnNames {
            text: "본문".to_string(),
            ..ColumnNames::default()
        };
        let err = ReviewTable::from_dataframe(&sample_frame(), &columns).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref name) if name == "본문"));
    }

    #[test]
    fn bad_timestamp_fails_the_load() {
        let df = df!(
            "리뷰 작성시간" => ["2024-10-20", "not a date"],
            "추가정보" => [1i64, 2],
            "sentiment" => [1i64, 1],
            "작성 리뷰 평점" => [5i64, 4],
            "리뷰 내용" => ["a", "b"]
        )
        .unwrap();
        let err = ReviewTable::from_dataframe(&df, &ColumnNames::default()).unwrap_err();
        match err {
            LoaderError::InvalidTimestamp { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "not a date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn filters_by_category_and_date() {
        let table = ReviewTable::from_dataframe(&sample_frame(), &ColumnNames::default()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 10, 19).unwrap();
        let other = table.by_category_on(Category::Other, date);
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].text, "괜찮아요");
        assert!(table.by_category_on(Category::Adhesion, date).is_empty());
    }
}
