//! Flat BOM item records as served by the data source.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::LifecycleStage;

/// Attribute flag that the data source sends either as a JSON boolean or as
/// free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    /// `true`, or text spelling `true` in any case.
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(value) => *value,
            Flag::Text(text) => text.trim().eq_ignore_ascii_case("true"),
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        Flag::Bool(value)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flag::Bool(value) => write!(f, "{value}"),
            Flag::Text(text) => f.write_str(text),
        }
    }
}

/// A recorded obstruction that keeps an item from progressing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blocker {
    /// Blocker type label (Procurement, Quality, Design, ...).
    pub category: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub aging_days: Option<i64>,
    pub notes: Option<String>,
    pub severity: Option<String>,
    /// Organisation the blocker applies to, when org-specific.
    pub org: Option<String>,
}

impl Blocker {
    /// Creates a blocker with only a category set.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            description: None,
            owner: None,
            aging_days: None,
            notes: None,
            severity: None,
            org: None,
        }
    }
}

/// One BOM node. Parent/child structure is expressed through `parent_id`
/// links; `level` is the depth of the node in that forest.
///
/// Unknown fields in the source payload are ignored, and every descriptive
/// field is optional so that partially populated records still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub parent_id: Option<String>,
    pub level: u32,
    #[serde(default)]
    pub has_children: bool,

    // Identity
    pub item_number: String,
    pub revision: Option<String>,
    pub description: Option<String>,
    pub commodity: Option<String>,
    pub plant: Option<String>,

    // Procurement
    pub make_buy: Option<String>,
    pub supplier: Option<String>,
    /// Days; zero and negative values are kept and render as `-`.
    pub lead_time: Option<i64>,
    pub aml: Option<i64>,
    #[serde(rename = "hasBPA")]
    pub has_bpa: Option<bool>,
    pub quote_status: Option<String>,

    // Quality
    pub coo: Option<String>,
    pub ppap_status: Option<String>,
    pub trade_compliance_status: Option<String>,

    // Design
    pub design_status: Option<String>,
    pub is_new_part: Option<Flag>,
    pub is_assembly: Option<Flag>,

    // Governance
    #[serde(rename = "isPreCO")]
    pub is_pre_co: Option<Flag>,
    #[serde(default)]
    pub lifecycle_stage: LifecycleStage,
    #[serde(rename = "pendingCONumber")]
    pub pending_co_number: Option<String>,
    pub co_status: Option<String>,
    pub cco_status: Option<String>,
    #[serde(default)]
    pub orderable: bool,
    pub erp_status: Option<String>,

    // Ownership
    pub eng_owner: Option<String>,
    pub procurement_owner: Option<String>,
    pub ame_owner: Option<String>,
    pub quality_owner: Option<String>,
    pub blocker_owner: Option<String>,

    // Readiness
    #[serde(default)]
    pub design_readiness: u8,
    #[serde(default)]
    pub procurement_readiness: u8,
    #[serde(default)]
    pub manufacturing_readiness: u8,
    #[serde(default)]
    pub quality_readiness: u8,
    #[serde(default)]
    pub overall_readiness: u8,

    #[serde(default)]
    pub blockers: Vec<Blocker>,
}

impl Item {
    /// Creates a bare item with the structural fields set and every optional
    /// field empty.
    pub fn new(
        id: impl Into<String>,
        parent_id: Option<&str>,
        level: u32,
        item_number: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.map(str::to_string),
            level,
            has_children: false,
            item_number: item_number.into(),
            revision: None,
            description: None,
            commodity: None,
            plant: None,
            make_buy: None,
            supplier: None,
            lead_time: None,
            aml: None,
            has_bpa: None,
            quote_status: None,
            coo: None,
            ppap_status: None,
            trade_compliance_status: None,
            design_status: None,
            is_new_part: None,
            is_assembly: None,
            is_pre_co: None,
            lifecycle_stage: LifecycleStage::Draft,
            pending_co_number: None,
            co_status: None,
            cco_status: None,
            orderable: false,
            erp_status: None,
            eng_owner: None,
            procurement_owner: None,
            ame_owner: None,
            quality_owner: None,
            blocker_owner: None,
            design_readiness: 0,
            procurement_readiness: 0,
            manufacturing_readiness: 0,
            quality_readiness: 0,
            overall_readiness: 0,
            blockers: Vec::new(),
        }
    }

    /// Returns true for top-level items.
    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// Returns true if at least one blocker is recorded.
    pub fn has_blockers(&self) -> bool {
        !self.blockers.is_empty()
    }

    /// Returns the pending change order number, treating an empty string as
    /// "no change order".
    pub fn co_number(&self) -> Option<&str> {
        self.pending_co_number
            .as_deref()
            .map(str::trim)
            .filter(|number| !number.is_empty())
    }

    /// Returns true if the item is flagged as pre-change-order work.
    pub fn is_pre_co(&self) -> bool {
        self.is_pre_co.as_ref().is_some_and(Flag::is_set)
    }

    /// Returns true if the item has been activated in the ERP system.
    pub fn is_erp_activated(&self) -> bool {
        self.erp_status.as_deref() == Some(ERP_ACTIVATED)
    }
}

/// ERP status value of an activated item.
pub const ERP_ACTIVATED: &str = "Activated";
