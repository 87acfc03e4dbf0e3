//! Charts module - Trend chart rendering

mod plotter;

pub use plotter::TrendPlotter;
