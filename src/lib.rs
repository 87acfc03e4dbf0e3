//! Review Dashboard - product review complaint analysis
//!
//! Loads a review spreadsheet, sorts reviews into complaint categories and
//! shows per-category metrics, trend charts and review tables.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod session;
pub mod stats;
