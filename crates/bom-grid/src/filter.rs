//! Panel and column filters over the flat item collection.
//!
//! Filtering runs before hierarchy assembly, so a filtered-out parent hides
//! its whole subtree even when some descendants would match.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use bom_model::{Item, LifecycleStage};

use crate::columns::ColumnKey;

/// Inclusive bounds on `overallReadiness`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessRange {
    pub min: u8,
    pub max: u8,
}

impl Default for ReadinessRange {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

impl ReadinessRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, readiness: u8) -> bool {
        (self.min..=self.max).contains(&readiness)
    }

    /// Whether the range excludes part of `0..=100`.
    pub fn is_narrowed(&self) -> bool {
        *self != Self::default()
    }
}

/// Filters from the side panel. Empty lists and `None` tri-states place no
/// constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelFilters {
    pub lifecycle_stages: Vec<LifecycleStage>,
    pub make_buy: Vec<String>,
    pub plants: Vec<String>,
    pub commodities: Vec<String>,
    pub erp_status: Vec<String>,
    pub has_blockers: Option<bool>,
    pub orderable: Option<bool>,
    pub readiness_range: ReadinessRange,
}

fn allows(selection: &[String], value: Option<&str>) -> bool {
    selection.is_empty() || value.is_some_and(|v| selection.iter().any(|s| s == v))
}

impl PanelFilters {
    pub fn matches(&self, item: &Item) -> bool {
        if !self.lifecycle_stages.is_empty()
            && !self.lifecycle_stages.contains(&item.lifecycle_stage)
        {
            return false;
        }
        if !allows(&self.make_buy, item.make_buy.as_deref())
            || !allows(&self.plants, item.plant.as_deref())
            || !allows(&self.commodities, item.commodity.as_deref())
            || !allows(&self.erp_status, item.erp_status.as_deref())
        {
            return false;
        }
        if self.has_blockers.is_some_and(|wanted| item.has_blockers() != wanted) {
            return false;
        }
        if self.orderable.is_some_and(|wanted| item.orderable != wanted) {
            return false;
        }
        self.readiness_range.contains(item.overall_readiness)
    }

    /// Badge count on the filter toggle.
    pub fn active_filter_count(&self) -> usize {
        self.lifecycle_stages.len()
            + self.make_buy.len()
            + self.plants.len()
            + self.commodities.len()
            + self.erp_status.len()
            + usize::from(self.has_blockers.is_some())
            + usize::from(self.orderable.is_some())
            + usize::from(self.readiness_range.is_narrowed())
    }

    pub fn is_empty(&self) -> bool {
        self.active_filter_count() == 0
    }
}

/// Per-column allowed display strings, as picked in the header dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnFilters(BTreeMap<ColumnKey, Vec<String>>);

impl ColumnFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection for a column. An empty selection clears it.
    pub fn set(&mut self, key: ColumnKey, values: Vec<String>) {
        if values.is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, values);
        }
    }

    /// Add one value to a column's selection.
    pub fn add(&mut self, key: ColumnKey, value: impl Into<String>) {
        let value = value.into();
        let selection = self.0.entry(key).or_default();
        if !selection.contains(&value) {
            selection.push(value);
        }
    }

    pub fn clear(&mut self, key: ColumnKey) {
        self.0.remove(&key);
    }

    pub fn get(&self, key: ColumnKey) -> &[String] {
        self.0.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.0.iter().all(|(key, selection)| {
            selection.is_empty() || selection.contains(&key.display(item))
        })
    }
}

/// Keep the items passing both filter layers, preserving source order.
pub fn apply_filters<'a>(
    items: &'a [Item],
    panel: &PanelFilters,
    columns: &ColumnFilters,
) -> Vec<&'a Item> {
    let kept: Vec<&Item> = items
        .iter()
        .filter(|item| panel.matches(item) && columns.matches(item))
        .collect();
    debug!(
        total = items.len(),
        kept = kept.len(),
        panel_filters = panel.active_filter_count(),
        "applied filters"
    );
    kept
}

/// Distinct display strings of a column over the items passing the panel
/// filters, sorted ascending. Column filters are not applied here.
pub fn unique_values(items: &[Item], panel: &PanelFilters, key: ColumnKey) -> Vec<String> {
    items
        .iter()
        .filter(|item| panel.matches(item))
        .map(|item| key.display(item))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
