//! Roll-ups over the bundled sample dataset.

use bom_ingest::sample_items;
use bom_model::LifecycleStage;
use bom_report::{BomKpis, KpiTone, ProjectSummary, co_groups};

#[test]
fn sample_groups_by_change_order() {
    let items = sample_items().unwrap();
    let groups = co_groups(&items);
    assert_eq!(groups.len(), 2);

    let first = &groups[0];
    assert_eq!(first.co_number, "CO-2026-001");
    assert_eq!(first.status.as_deref(), Some("Released"));
    assert_eq!(first.item_count, 9);
    assert_eq!(first.ready_count, 5);
    assert_eq!(first.blocked_count, 4);
    assert_eq!(first.average_readiness, 87);

    let second = &groups[1];
    assert_eq!(second.co_number, "CO-2026-002");
    assert_eq!(second.item_ids, ["8"]);
    assert_eq!(second.ready_count, 0);
    assert_eq!(second.blocked_count, 1);
    assert_eq!(second.average_readiness, 18);

    for group in &groups {
        assert_eq!(group.ready_count + group.not_ready_count(), group.item_count);
        assert!(group.average_readiness <= 100);
    }
    let grouped: usize = groups.iter().map(|g| g.item_count).sum();
    assert_eq!(grouped, 10);
}

#[test]
fn sample_project_summary() {
    let items = sample_items().unwrap();
    let summary = ProjectSummary::from_items(&items);
    assert_eq!(summary.total_items, 14);
    assert_eq!(summary.orderable_items, 5);
    assert_eq!(summary.items_with_blockers, 6);
    assert_eq!(summary.average_readiness, 62);
    assert_eq!(summary.pre_co_items, 4);
    assert_eq!(summary.completion_percentage(), 36);

    let distribution = &summary.lifecycle_distribution;
    assert_eq!(distribution.count(&LifecycleStage::Draft), 5);
    assert_eq!(distribution.count(&LifecycleStage::ReadyForCo), 0);
    assert_eq!(distribution.iter().count(), LifecycleStage::ALL.len());

    assert_eq!(
        summary.blockers_by_count(),
        [("Procurement", 5), ("Design", 2), ("Manufacturing", 1), ("Quality", 1)]
    );
}

#[test]
fn sample_grid_kpis() {
    let items = sample_items().unwrap();
    let kpis = BomKpis::from_items(&items);
    assert_eq!(kpis.not_in_erp.count, 5);
    assert_eq!(kpis.not_in_erp.total, 14);
    assert_eq!(kpis.not_in_erp.percentage, 36);
    assert_eq!(kpis.not_in_erp.tone, KpiTone::Critical);
    assert_eq!(kpis.pending_cos, 2);
    assert_eq!(kpis.pending_cos_tone, KpiTone::Good);
    assert_eq!(kpis.not_orderable.count, 9);
    assert_eq!(kpis.not_orderable.percentage, 64);
}
