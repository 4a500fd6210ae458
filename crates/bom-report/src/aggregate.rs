//! Roll-ups over the flat item collection.
//!
//! Every function here is total: an empty collection yields zero counts and
//! a zero average rather than an error.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use bom_model::{Item, LifecycleDistribution};

/// Integer mean rounded half up.
fn rounded_mean(sum: u64, count: u64) -> u8 {
    if count == 0 {
        return 0;
    }
    let mean = (sum * 2 + count) / (count * 2);
    u8::try_from(mean).unwrap_or(u8::MAX)
}

/// `part / whole` as a whole percentage, rounded half up.
pub fn percentage(part: usize, whole: usize) -> u8 {
    rounded_mean(part as u64 * 100, whole as u64)
}

fn mean_readiness<'a>(items: impl IntoIterator<Item = &'a Item>) -> u8 {
    let (sum, count) = items.into_iter().fold((0_u64, 0_u64), |(sum, count), item| {
        (sum + u64::from(item.overall_readiness), count + 1)
    });
    rounded_mean(sum, count)
}

/// Items sharing one pending CO number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoGroup {
    pub co_number: String,
    /// `coStatus` of the first member seen.
    pub status: Option<String>,
    pub item_ids: Vec<String>,
    pub item_count: usize,
    pub ready_count: usize,
    pub blocked_count: usize,
    pub average_readiness: u8,
}

impl CoGroup {
    pub fn not_ready_count(&self) -> usize {
        self.item_count - self.ready_count
    }

    pub fn completion_percentage(&self) -> u8 {
        percentage(self.ready_count, self.item_count)
    }
}

/// Partition items by pending CO number, groups in first-appearance order.
/// Items without a CO number belong to no group.
pub fn co_groups(items: &[Item]) -> Vec<CoGroup> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut members: Vec<Vec<&Item>> = Vec::new();
    for item in items {
        let Some(co) = item.co_number() else {
            continue;
        };
        let slot = *index.entry(co).or_insert_with(|| {
            members.push(Vec::new());
            members.len() - 1
        });
        members[slot].push(item);
    }

    let groups: Vec<CoGroup> = members
        .into_iter()
        .filter_map(|group| {
            let first = *group.first()?;
            Some(CoGroup {
                co_number: first.co_number()?.to_string(),
                status: first.co_status.clone(),
                item_ids: group.iter().map(|item| item.id.clone()).collect(),
                item_count: group.len(),
                ready_count: group.iter().filter(|item| item.orderable).count(),
                blocked_count: group.iter().filter(|item| item.has_blockers()).count(),
                average_readiness: mean_readiness(group.iter().copied()),
            })
        })
        .collect();
    debug!(items = items.len(), groups = groups.len(), "grouped items by CO");
    groups
}

/// Project-wide roll-up used by the CO review header and the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub total_items: usize,
    pub orderable_items: usize,
    pub items_with_blockers: usize,
    pub average_readiness: u8,
    /// Every lifecycle stage, zero when unused.
    pub lifecycle_distribution: LifecycleDistribution,
    pub blockers_by_category: BTreeMap<String, usize>,
    pub pre_co_items: usize,
}

impl ProjectSummary {
    pub fn from_items(items: &[Item]) -> Self {
        let mut blockers_by_category: BTreeMap<String, usize> = BTreeMap::new();
        for blocker in items.iter().flat_map(|item| &item.blockers) {
            *blockers_by_category.entry(blocker.category.clone()).or_insert(0) += 1;
        }
        Self {
            total_items: items.len(),
            orderable_items: items.iter().filter(|item| item.orderable).count(),
            items_with_blockers: items.iter().filter(|item| item.has_blockers()).count(),
            average_readiness: mean_readiness(items),
            lifecycle_distribution: LifecycleDistribution::from_items(items).with_all_stages(),
            blockers_by_category,
            pre_co_items: items.iter().filter(|item| item.is_pre_co()).count(),
        }
    }

    pub fn completion_percentage(&self) -> u8 {
        percentage(self.orderable_items, self.total_items)
    }

    /// Blocker categories by descending count, ties by name.
    pub fn blockers_by_count(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self
            .blockers_by_category
            .iter()
            .map(|(category, count)| (category.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Traffic-light rating of a KPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiTone {
    Good,
    Warning,
    Critical,
}

impl KpiTone {
    fn rate(value: usize, warning_above: usize, critical_above: usize) -> Self {
        if value > critical_above {
            KpiTone::Critical
        } else if value > warning_above {
            KpiTone::Warning
        } else {
            KpiTone::Good
        }
    }
}

/// A `count of total` KPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Share {
    pub count: usize,
    pub total: usize,
    pub percentage: u8,
    pub tone: KpiTone,
}

impl Share {
    fn new(count: usize, total: usize, warning_above: usize, critical_above: usize) -> Self {
        let percentage = percentage(count, total);
        Self {
            count,
            total,
            percentage,
            tone: KpiTone::rate(usize::from(percentage), warning_above, critical_above),
        }
    }
}

/// Header KPIs of the BOM grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BomKpis {
    pub not_in_erp: Share,
    pub pending_cos: usize,
    pub pending_cos_tone: KpiTone,
    pub not_orderable: Share,
}

impl BomKpis {
    pub fn from_items(items: &[Item]) -> Self {
        let total = items.len();
        let not_in_erp = items.iter().filter(|item| !item.is_erp_activated()).count();
        let not_orderable = items.iter().filter(|item| !item.orderable).count();
        let pending_cos = items
            .iter()
            .filter_map(Item::co_number)
            .collect::<HashSet<_>>()
            .len();
        Self {
            not_in_erp: Share::new(not_in_erp, total, 10, 25),
            pending_cos,
            pending_cos_tone: KpiTone::rate(pending_cos, 5, 10),
            not_orderable: Share::new(not_orderable, total, 10, 20),
        }
    }
}
