//! Services for fetching and aggregating user records

pub mod aggregator;
pub mod data_loader;
pub mod record_source;

pub use aggregator::Aggregator;
pub use data_loader::{DataLoaderService, LoadResult};
pub use record_source::{FileSource, RandomUserSource, RecordSource};
