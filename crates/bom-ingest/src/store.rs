//! In-memory holders of the last fetched data.
//!
//! A refresh replaces the held data wholesale when the fetch succeeds. On
//! failure the last-known data stays in place and the error is returned.
//! Refreshes block and take `&mut self`, so a store is never observed
//! mid-fetch and carries no loading flag.

use chrono::{DateTime, Utc};
use tracing::{info, info_span, warn};

use bom_model::{Item, LifecycleDistribution, ProjectStatistics};

use crate::error::{FetchError, Result};
use crate::source::ItemSource;

/// The flat item collection behind the grid and the CO review.
pub struct ItemStore {
    source: Box<dyn ItemSource>,
    items: Vec<Item>,
    fetched_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl ItemStore {
    pub fn new(source: Box<dyn ItemSource>) -> Self {
        Self {
            source,
            items: Vec::new(),
            fetched_at: None,
            last_error: None,
        }
    }

    /// Fetch the collection and replace the held items. Returns the new item
    /// count.
    pub fn refresh(&mut self) -> Result<usize> {
        let span = info_span!("refresh_items", source = %self.source.describe());
        let _guard = span.enter();

        let outcome = self.source.fetch_items();

        match outcome {
            Ok(items) => {
                info!(items = items.len(), "loaded items");
                self.items = items;
                self.fetched_at = Some(Utc::now());
                self.last_error = None;
                Ok(self.items.len())
            }
            Err(e) => {
                warn!(error = %e, kept = self.items.len(), "item fetch failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Everything the PM dashboard renders, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub items: Vec<Item>,
    pub statistics: ProjectStatistics,
    pub distribution: LifecycleDistribution,
    pub fetched_at: DateTime<Utc>,
}

/// Fetch items, statistics and the lifecycle distribution concurrently.
/// Succeeds only when all three reads do.
pub fn fetch_dashboard(source: &dyn ItemSource) -> Result<DashboardSnapshot> {
    let (items, statistics, distribution) = std::thread::scope(|scope| {
        let items = scope.spawn(|| source.fetch_items());
        let statistics = scope.spawn(|| source.fetch_statistics());
        let distribution = scope.spawn(|| source.fetch_lifecycle_distribution());
        (
            items.join().map_err(|_| FetchError::Worker("items")),
            statistics.join().map_err(|_| FetchError::Worker("statistics")),
            distribution
                .join()
                .map_err(|_| FetchError::Worker("lifecycle distribution")),
        )
    });
    Ok(DashboardSnapshot {
        items: items??,
        statistics: statistics??,
        distribution: distribution??,
        fetched_at: Utc::now(),
    })
}

/// Holder of the last complete dashboard snapshot.
pub struct DashboardStore {
    source: Box<dyn ItemSource>,
    snapshot: Option<DashboardSnapshot>,
}

impl DashboardStore {
    pub fn new(source: Box<dyn ItemSource>) -> Self {
        Self {
            source,
            snapshot: None,
        }
    }

    /// Replace the snapshot when all three reads succeed. A partial result
    /// is discarded and the previous snapshot kept.
    pub fn refresh(&mut self) -> Result<&DashboardSnapshot> {
        let span = info_span!("refresh_dashboard", source = %self.source.describe());
        let _guard = span.enter();

        let outcome = fetch_dashboard(self.source.as_ref());

        match outcome {
            Ok(snapshot) => {
                info!(
                    items = snapshot.items.len(),
                    total = snapshot.statistics.total_items,
                    "loaded dashboard"
                );
                Ok(self.snapshot.insert(snapshot))
            }
            Err(e) => {
                warn!(error = %e, has_previous = self.snapshot.is_some(), "dashboard fetch failed");
                Err(e)
            }
        }
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }
}
