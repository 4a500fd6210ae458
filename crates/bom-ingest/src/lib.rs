//! BOM data ingestion.
//!
//! Sources implement [`ItemSource`]: the REST endpoints ([`HttpSource`]), a
//! saved JSON snapshot ([`SnapshotFile`]) or the bundled sample
//! ([`SampleSource`]). [`ItemStore`] and [`DashboardStore`] hold the last
//! successfully fetched data for the views.

mod error;
mod file;
mod http;
mod sample;
mod source;
mod store;

// === Error Types ===
pub use error::{FetchError, Result};

// === Sources ===
pub use file::SnapshotFile;
pub use http::{DEFAULT_TIMEOUT, HttpSource, ITEMS_PATH, LIFECYCLE_PATH, STATISTICS_PATH};
pub use sample::{SampleSource, sample_items};
pub use source::{DataSource, ItemSource};

// === Stores ===
pub use store::{DashboardSnapshot, DashboardStore, ItemStore, fetch_dashboard};
