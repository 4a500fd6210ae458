//! Summary payloads served next to the item collection.
//!
//! The remote service computes these itself. Offline sources (snapshot files,
//! the bundled sample) derive them with [`ProjectStatistics::from_items`] and
//! [`LifecycleDistribution::from_items`], which follow the service's rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::LifecycleStage;
use crate::item::Item;

/// Project-wide counters, shape of the statistics endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatistics {
    pub total_items: usize,
    pub orderable_items: usize,
    pub items_with_blockers: usize,
    /// Mean overall readiness, rounded to one decimal place.
    pub average_readiness: f64,
    pub draft_items: Option<usize>,
    pub erp_activated: Option<usize>,
    #[serde(rename = "notInERP")]
    pub not_in_erp: Option<usize>,
    pub last_updated: Option<String>,
}

impl ProjectStatistics {
    /// Derive the statistics payload from an item collection.
    pub fn from_items(items: &[Item]) -> Self {
        let total_items = items.len();
        let erp_activated = items.iter().filter(|item| item.is_erp_activated()).count();
        let average_readiness = if total_items == 0 {
            0.0
        } else {
            let sum: u64 = items.iter().map(|item| u64::from(item.overall_readiness)).sum();
            let mean = sum as f64 / total_items as f64;
            (mean * 10.0).round() / 10.0
        };
        Self {
            total_items,
            orderable_items: items.iter().filter(|item| item.orderable).count(),
            items_with_blockers: items.iter().filter(|item| item.has_blockers()).count(),
            average_readiness,
            draft_items: Some(
                items
                    .iter()
                    .filter(|item| item.lifecycle_stage == LifecycleStage::Draft)
                    .count(),
            ),
            erp_activated: Some(erp_activated),
            not_in_erp: Some(total_items - erp_activated),
            last_updated: None,
        }
    }
}

/// Item counts per lifecycle stage, shape of the lifecycle distribution
/// endpoint (stage name to count).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LifecycleDistribution(BTreeMap<LifecycleStage, usize>);

impl LifecycleDistribution {
    /// Count items per distinct stage value. Only stages that occur get an
    /// entry; unknown stage names are counted under their own name.
    pub fn from_items(items: &[Item]) -> Self {
        let mut counts = BTreeMap::new();
        for item in items {
            *counts.entry(item.lifecycle_stage.clone()).or_insert(0) += 1;
        }
        Self(counts)
    }

    /// Returns the count for a stage (zero when absent).
    pub fn count(&self, stage: &LifecycleStage) -> usize {
        self.0.get(stage).copied().unwrap_or(0)
    }

    /// Returns a copy with an entry for every stage of the enumeration.
    #[must_use]
    pub fn with_all_stages(&self) -> Self {
        let mut counts = self.0.clone();
        for stage in LifecycleStage::ALL {
            counts.entry(stage).or_insert(0);
        }
        Self(counts)
    }

    /// Total number of items across all stages.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// Iterate `(stage, count)` pairs in progression order, unknown stages
    /// last.
    pub fn iter(&self) -> impl Iterator<Item = (&LifecycleStage, usize)> + '_ {
        self.0.iter().map(|(stage, count)| (stage, *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, stage: LifecycleStage, readiness: u8, erp: &str) -> Item {
        let mut item = Item::new(id, None, 0, format!("P-{id}"));
        item.lifecycle_stage = stage;
        item.overall_readiness = readiness;
        item.erp_status = Some(erp.to_string());
        item
    }

    #[test]
    fn statistics_follow_service_rules() {
        let items = vec![
            item("1", LifecycleStage::Draft, 10, "Not Activated"),
            item("2", LifecycleStage::Orderable, 95, "Activated"),
            item("3", LifecycleStage::CoApproved, 50, "Activated"),
        ];
        let stats = ProjectStatistics::from_items(&items);
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.draft_items, Some(1));
        assert_eq!(stats.erp_activated, Some(2));
        assert_eq!(stats.not_in_erp, Some(1));
        assert!((stats.average_readiness - 51.7).abs() < f64::EPSILON);
    }

    #[test]
    fn statistics_of_empty_collection_are_zero() {
        let stats = ProjectStatistics::from_items(&[]);
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.average_readiness, 0.0);
    }

    #[test]
    fn distribution_serializes_as_stage_name_map() {
        let items = vec![
            item("1", LifecycleStage::Draft, 0, "Not Activated"),
            item("2", LifecycleStage::Draft, 0, "Not Activated"),
            item("3", LifecycleStage::CoSubmitted, 0, "Not Activated"),
        ];
        let distribution = LifecycleDistribution::from_items(&items);
        let json = serde_json::to_string(&distribution).expect("serialize distribution");
        assert_eq!(json, r#"{"Draft":2,"CO Submitted":1}"#);

        let filled = distribution.with_all_stages();
        assert_eq!(filled.iter().count(), LifecycleStage::ALL.len());
        assert_eq!(filled.count(&LifecycleStage::Orderable), 0);
        assert_eq!(filled.total(), 3);
    }

    #[test]
    fn distribution_keeps_unknown_stages() {
        let payload: LifecycleDistribution =
            serde_json::from_str(r#"{"Draft":3,"Released":1}"#).expect("deserialize distribution");
        let released = LifecycleStage::Other("Released".to_string());
        assert_eq!(payload.count(&LifecycleStage::Draft), 3);
        assert_eq!(payload.count(&released), 1);

        let items = vec![
            item("1", released.clone(), 0, "Not Activated"),
            item("2", LifecycleStage::Draft, 0, "Not Activated"),
        ];
        let filled = LifecycleDistribution::from_items(&items).with_all_stages();
        assert_eq!(filled.iter().count(), LifecycleStage::ALL.len() + 1);
        assert_eq!(filled.iter().last(), Some((&released, 1)));
        assert_eq!(filled.total(), 2);
    }

    #[test]
    fn statistics_deserialize_from_service_payload() {
        let json = r#"{
            "totalItems": 14,
            "orderableItems": 5,
            "itemsWithBlockers": 6,
            "averageReadiness": 61.6,
            "notInERP": 5
        }"#;
        let stats: ProjectStatistics = serde_json::from_str(json).expect("deserialize stats");
        assert_eq!(stats.total_items, 14);
        assert_eq!(stats.not_in_erp, Some(5));
        assert_eq!(stats.draft_items, None);
    }
}
