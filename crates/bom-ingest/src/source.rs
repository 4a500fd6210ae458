//! The data-source seam.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use bom_model::{Item, LifecycleDistribution, ProjectStatistics};

use crate::error::Result;
use crate::file::SnapshotFile;
use crate::http::HttpSource;
use crate::sample::SampleSource;

/// A read-only provider of the item collection and its summaries.
///
/// Only `fetch_items` is required. Sources without dedicated summary
/// endpoints derive the statistics and distribution from the items.
pub trait ItemSource: Send + Sync {
    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;

    fn fetch_items(&self) -> Result<Vec<Item>>;

    fn fetch_statistics(&self) -> Result<ProjectStatistics> {
        Ok(ProjectStatistics::from_items(&self.fetch_items()?))
    }

    fn fetch_lifecycle_distribution(&self) -> Result<LifecycleDistribution> {
        Ok(LifecycleDistribution::from_items(&self.fetch_items()?))
    }
}

/// Where the items come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Http { base_url: String, timeout: Duration },
    Snapshot(PathBuf),
    Sample,
}

impl DataSource {
    /// Build the concrete source.
    pub fn open(&self) -> Result<Box<dyn ItemSource>> {
        Ok(match self {
            DataSource::Http { base_url, timeout } => {
                Box::new(HttpSource::new(base_url.clone(), *timeout)?)
            }
            DataSource::Snapshot(path) => Box::new(SnapshotFile::new(path.clone())),
            DataSource::Sample => Box::new(SampleSource),
        })
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Http { base_url, .. } => write!(f, "{base_url}"),
            DataSource::Snapshot(path) => write!(f, "{}", path.display()),
            DataSource::Sample => write!(f, "bundled sample"),
        }
    }
}
