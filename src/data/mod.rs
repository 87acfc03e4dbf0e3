//! Data module - review file loading, categorization and records

mod category;
mod loader;
mod review;

pub use category::Category;
pub use loader::{LoaderError, ReviewLoader, SourceFormat};
pub use review::{parse_timestamp, Review, ReviewTable};
