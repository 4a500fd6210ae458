use std::collections::HashMap;

use bom_grid::{
    ColumnFilters, ColumnKey, ExpandState, PanelFilters, ReadinessRange, SortDirection, SortState,
    apply_filters, visible_rows,
};
use bom_model::{Blocker, Item, LifecycleStage};
use proptest::prelude::*;
use proptest::test_runner::Config;

const PLANTS: [&str; 3] = ["Columbus, OH", "Austin", "Reno"];
const COMMODITIES: [&str; 3] = ["Wire", "Resistor", "Electrical Assembly"];
const MAKE_BUY: [&str; 2] = ["Make", "Buy"];
const ERP_STATUS: [&str; 2] = ["Activated", "Not Activated"];
const BLOCKER_CATEGORIES: [&str; 2] = ["Procurement", "Quality"];

/// Display strings a column filter may select.
const DISPLAY_VALUES: [&str; 9] =
    ["Yes", "No", "-", "30 days", "Austin", "Reno", "Draft", "Released", "Wire"];

/// One generated node: (is_root, parent pick, expanded, readiness, orderable).
type NodeSeed = (bool, usize, bool, u8, bool);

/// Attribute picks: (stage, plant, commodity, make/buy, erp status, blocker
/// count, lead time). A pick past the end of its pool leaves the field empty.
type AttrSeed = (usize, usize, usize, usize, usize, usize, Option<i64>);

fn stages() -> Vec<LifecycleStage> {
    let mut stages = LifecycleStage::ALL.to_vec();
    stages.push(LifecycleStage::Other("Released".to_string()));
    stages
}

fn from_pool(pool: &[&str], index: usize) -> Option<String> {
    pool.get(index).map(|value| (*value).to_string())
}

fn owned(pool: &[&str]) -> Vec<String> {
    pool.iter().map(|value| (*value).to_string()).collect()
}

fn apply_attrs(item: &mut Item, attrs: &AttrSeed) {
    let (stage, plant, commodity, make_buy, erp, blockers, lead_time) = attrs;
    let pool = stages();
    item.lifecycle_stage = pool[*stage % pool.len()].clone();
    item.plant = from_pool(&PLANTS, *plant);
    item.commodity = from_pool(&COMMODITIES, *commodity);
    item.make_buy = from_pool(&MAKE_BUY, *make_buy);
    item.erp_status = from_pool(&ERP_STATUS, *erp);
    item.blockers = BLOCKER_CATEGORIES
        .iter()
        .take(*blockers)
        .map(|category| Blocker::new(*category))
        .collect();
    item.lead_time = *lead_time;
}

fn build_forest(seeds: &[(NodeSeed, AttrSeed)]) -> (Vec<Item>, ExpandState) {
    let mut items: Vec<Item> = Vec::with_capacity(seeds.len());
    let mut expand = ExpandState::new();
    for (index, ((is_root, pick, expanded, readiness, orderable), attrs)) in
        seeds.iter().enumerate()
    {
        let id = index.to_string();
        let mut item = if *is_root || index == 0 {
            Item::new(id.clone(), None, 0, format!("P-{index:03}"))
        } else {
            let parent = &items[pick % index];
            Item::new(
                id.clone(),
                Some(parent.id.as_str()),
                parent.level + 1,
                format!("P-{index:03}"),
            )
        };
        item.overall_readiness = *readiness;
        item.orderable = *orderable;
        apply_attrs(&mut item, attrs);
        items.push(item);
        if *expanded {
            expand.expand(&id);
        }
    }
    let parents: Vec<String> = items.iter().filter_map(|item| item.parent_id.clone()).collect();
    for item in &mut items {
        item.has_children = parents.contains(&item.id);
    }
    (items, expand)
}

fn ancestors_expanded(item: &Item, by_id: &HashMap<&str, &Item>, expand: &ExpandState) -> bool {
    let mut current = item;
    while let Some(parent_id) = current.parent_id.as_deref() {
        if !expand.is_expanded(parent_id) {
            return false;
        }
        current = by_id[parent_id];
    }
    true
}

fn seeds() -> impl Strategy<Value = Vec<(NodeSeed, AttrSeed)>> {
    let node = (any::<bool>(), 0_usize..64, any::<bool>(), 0_u8..=100, any::<bool>());
    let attrs = (
        0_usize..7,
        0_usize..4,
        0_usize..4,
        0_usize..3,
        0_usize..3,
        0_usize..3,
        proptest::option::of(-5_i64..60),
    );
    prop::collection::vec((node, attrs), 1..48)
}

fn panel_filters() -> impl Strategy<Value = PanelFilters> {
    let lists = (
        prop::sample::subsequence(stages(), 0..=2),
        prop::sample::subsequence(owned(&MAKE_BUY), 0..=1),
        prop::sample::subsequence(owned(&PLANTS), 0..=2),
        prop::sample::subsequence(owned(&COMMODITIES), 0..=2),
        prop::sample::subsequence(owned(&ERP_STATUS), 0..=1),
    );
    let flags = (
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
        0_u8..=100,
        0_u8..=100,
    );
    (lists, flags).prop_map(|(lists, flags)| {
        let (lifecycle_stages, make_buy, plants, commodities, erp_status) = lists;
        let (has_blockers, orderable, low, span) = flags;
        PanelFilters {
            lifecycle_stages,
            make_buy,
            plants,
            commodities,
            erp_status,
            has_blockers,
            orderable,
            readiness_range: ReadinessRange::new(low, low.saturating_add(span).min(100)),
        }
    })
}

fn column_filters() -> impl Strategy<Value = ColumnFilters> {
    let keys = vec![
        ColumnKey::Orderable,
        ColumnKey::LeadTime,
        ColumnKey::Plant,
        ColumnKey::LifecycleStage,
        ColumnKey::Commodity,
    ];
    prop::collection::vec(
        (
            prop::sample::select(keys),
            prop::collection::vec(prop::sample::select(owned(&DISPLAY_VALUES)), 0..3),
        ),
        0..3,
    )
    .prop_map(|selections| {
        let mut columns = ColumnFilters::new();
        for (key, values) in selections {
            for value in values {
                columns.add(key, value);
            }
        }
        columns
    })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn row_visible_iff_all_ancestors_expanded(seeds in seeds(), descending in any::<bool>()) {
        let (items, expand) = build_forest(&seeds);
        let by_id: HashMap<&str, &Item> =
            items.iter().map(|item| (item.id.as_str(), item)).collect();
        let refs: Vec<&Item> = items.iter().collect();
        let direction = if descending { SortDirection::Desc } else { SortDirection::Asc };
        let sort = SortState::new(ColumnKey::OverallReadiness, direction);

        let rows = visible_rows(&refs, &expand, &sort);
        let shown: Vec<&str> = rows.iter().map(|row| row.item.id.as_str()).collect();

        for item in &items {
            let expected = ancestors_expanded(item, &by_id, &expand);
            prop_assert_eq!(shown.contains(&item.id.as_str()), expected, "item {}", item.id);
        }
        for row in &rows {
            prop_assert_eq!(row.depth, row.item.level as usize);
        }
        let mut unique = shown.clone();
        unique.sort_unstable();
        unique.dedup();
        prop_assert_eq!(unique.len(), shown.len());
    }

    #[test]
    fn filtering_is_a_subset_and_idempotent(
        seeds in seeds(),
        panel in panel_filters(),
        columns in column_filters(),
    ) {
        let (items, _) = build_forest(&seeds);

        let once: Vec<Item> =
            apply_filters(&items, &panel, &columns).into_iter().cloned().collect();
        prop_assert!(once.len() <= items.len());
        prop_assert!(once.iter().all(|kept| items.contains(kept)));
        prop_assert!(once.iter().all(|kept| panel.matches(kept) && columns.matches(kept)));
        let rejected = items
            .iter()
            .filter(|item| !panel.matches(item) || !columns.matches(item))
            .count();
        prop_assert_eq!(once.len() + rejected, items.len());

        let twice: Vec<Item> =
            apply_filters(&once, &panel, &columns).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }
}
