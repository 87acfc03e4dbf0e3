//! Stats module - category metrics and time-bucketed trends

mod aggregator;
mod metrics;

pub use aggregator::{CategoryCountPoint, CountPoint, DateWindow, Interval, TrendAggregator};
pub use metrics::{CategoryMetric, MetricsCalculator};
