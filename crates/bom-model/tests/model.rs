//! Tests for bom-model types.

use bom_model::{Blocker, Item, LifecycleDistribution, LifecycleStage, ProjectStatistics};

fn sample_collection() -> Vec<Item> {
    let mut root = Item::new("1", None, 0, "ASM-12000");
    root.has_children = true;
    root.lifecycle_stage = LifecycleStage::CoApproved;
    root.overall_readiness = 81;
    root.erp_status = Some("Activated".to_string());
    root.blockers.push(Blocker::new("Procurement"));

    let mut child = Item::new("2", Some("1"), 1, "ASM-12100");
    child.lifecycle_stage = LifecycleStage::Orderable;
    child.orderable = true;
    child.overall_readiness = 100;
    child.erp_status = Some("Activated".to_string());

    let mut draft = Item::new("11", Some("1"), 1, "TEMP-001");
    draft.is_pre_co = Some(true.into());
    draft.overall_readiness = 11;
    draft.erp_status = Some("Not Activated".to_string());

    vec![root, child, draft]
}

#[test]
fn collection_round_trips_through_json() {
    let items = sample_collection();
    let json = serde_json::to_string(&items).expect("serialize items");
    let round: Vec<Item> = serde_json::from_str(&json).expect("deserialize items");
    assert_eq!(round, items);
}

#[test]
fn statistics_and_distribution_agree_on_totals() {
    let items = sample_collection();
    let stats = ProjectStatistics::from_items(&items);
    let distribution = LifecycleDistribution::from_items(&items);

    assert_eq!(stats.total_items, distribution.total());
    assert_eq!(stats.orderable_items, 1);
    assert_eq!(stats.items_with_blockers, 1);
    assert_eq!(stats.draft_items, Some(distribution.count(&LifecycleStage::Draft)));
    assert!((stats.average_readiness - 64.0).abs() < f64::EPSILON);
}

#[test]
fn item_helpers_reflect_fields() {
    let items = sample_collection();
    assert!(items[0].is_root());
    assert!(!items[1].is_root());
    assert!(items[2].is_pre_co());
    assert!(!items[0].is_pre_co());
    assert!(items[0].is_erp_activated());
    assert!(!items[2].is_erp_activated());
}
