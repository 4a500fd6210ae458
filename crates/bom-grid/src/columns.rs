//! Grid column catalogue.
//!
//! Every column has one entry in [`COLUMNS`] that fixes its key, label, group
//! and display format. Filtering, value enumeration and export all render
//! cells through [`ColumnKey::display`], so the strings a user picks in a
//! column filter are exactly the strings the filter later compares against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use bom_model::{Flag, Item};

/// Identifies a grid column. The string form is the item field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    Level,
    ItemNumber,
    Revision,
    Commodity,
    Description,
    Plant,
    LifecycleStage,
    #[serde(rename = "pendingCONumber")]
    PendingCoNumber,
    MakeBuy,
    Aml,
    Supplier,
    LeadTime,
    CcoStatus,
    Orderable,
    PpapStatus,
    Coo,
    TradeComplianceStatus,
    OverallReadiness,
    DesignReadiness,
    ProcurementReadiness,
    ManufacturingReadiness,
    QualityReadiness,
    EngOwner,
    ProcurementOwner,
    AmeOwner,
    QualityOwner,
    BlockerOwner,
    ErpStatus,
    #[serde(rename = "hasBPA")]
    HasBpa,
    QuoteStatus,
    CoStatus,
    IsNewPart,
    #[serde(rename = "isPreCO")]
    IsPreCo,
}

/// Column grouping used by the column settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnGroup {
    Identity,
    Governance,
    Procurement,
    Erp,
    Quality,
    Readiness,
    Ownership,
}

impl ColumnGroup {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnGroup::Identity => "Identity",
            ColumnGroup::Governance => "Governance",
            ColumnGroup::Procurement => "Procurement",
            ColumnGroup::Erp => "ERP",
            ColumnGroup::Quality => "Quality",
            ColumnGroup::Readiness => "Readiness",
            ColumnGroup::Ownership => "Ownership",
        }
    }
}

/// How a cell value turns into its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    /// String form of the value, `-` when absent.
    Plain,
    /// `Yes` / `No` for booleans.
    YesNo,
    /// `<n> days` for positive numbers, `-` otherwise.
    Days,
}

/// Typed cell value, the input of both the sort comparator and the display
/// formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellValue<'a> {
    Number(i64),
    Bool(bool),
    Text(&'a str),
    Missing,
}

impl<'a> CellValue<'a> {
    fn from_text(value: Option<&'a str>) -> Self {
        value.map_or(CellValue::Missing, CellValue::Text)
    }

    fn from_bool(value: Option<bool>) -> Self {
        value.map_or(CellValue::Missing, CellValue::Bool)
    }

    fn from_number(value: Option<i64>) -> Self {
        value.map_or(CellValue::Missing, CellValue::Number)
    }

    fn from_flag(value: Option<&'a Flag>) -> Self {
        match value {
            Some(Flag::Bool(b)) => CellValue::Bool(*b),
            Some(Flag::Text(text)) => CellValue::Text(text),
            None => CellValue::Missing,
        }
    }

    /// String coercion used when two values cannot be compared by type.
    /// Absent values coerce to the empty string.
    pub fn coerce_to_string(&self) -> String {
        match self {
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Text(s) => (*s).to_string(),
            CellValue::Missing => String::new(),
        }
    }
}

impl CellFormat {
    /// Render a value in this format.
    pub fn render(&self, value: &CellValue<'_>) -> String {
        match (self, value) {
            (CellFormat::YesNo, CellValue::Bool(true)) => "Yes".to_string(),
            (CellFormat::YesNo, CellValue::Bool(false)) => "No".to_string(),
            (CellFormat::Days, CellValue::Number(days)) if *days > 0 => format!("{days} days"),
            (CellFormat::Days, _) => "-".to_string(),
            (_, CellValue::Missing) => "-".to_string(),
            (_, other) => other.coerce_to_string(),
        }
    }
}

/// One row of the column catalogue.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub key: ColumnKey,
    pub label: &'static str,
    pub group: ColumnGroup,
    pub format: CellFormat,
}

const fn spec(
    key: ColumnKey,
    label: &'static str,
    group: ColumnGroup,
    format: CellFormat,
) -> ColumnSpec {
    ColumnSpec {
        key,
        label,
        group,
        format,
    }
}

/// The column catalogue in default display order.
pub static COLUMNS: [ColumnSpec; 33] = [
    spec(ColumnKey::Level, "Level", ColumnGroup::Identity, CellFormat::Plain),
    spec(ColumnKey::ItemNumber, "Item Number", ColumnGroup::Identity, CellFormat::Plain),
    spec(ColumnKey::Revision, "Revision", ColumnGroup::Identity, CellFormat::Plain),
    spec(ColumnKey::Commodity, "Commodity", ColumnGroup::Identity, CellFormat::Plain),
    spec(ColumnKey::Description, "Description", ColumnGroup::Identity, CellFormat::Plain),
    spec(ColumnKey::Plant, "Plant", ColumnGroup::Identity, CellFormat::Plain),
    spec(ColumnKey::LifecycleStage, "Lifecycle Stage", ColumnGroup::Governance, CellFormat::Plain),
    spec(ColumnKey::PendingCoNumber, "CO #", ColumnGroup::Governance, CellFormat::Plain),
    spec(ColumnKey::MakeBuy, "Make/Buy", ColumnGroup::Procurement, CellFormat::Plain),
    spec(ColumnKey::Aml, "AML", ColumnGroup::Procurement, CellFormat::Plain),
    spec(ColumnKey::Supplier, "Supplier", ColumnGroup::Procurement, CellFormat::Plain),
    spec(ColumnKey::LeadTime, "Lead Time", ColumnGroup::Procurement, CellFormat::Days),
    spec(ColumnKey::CcoStatus, "CCO Status", ColumnGroup::Erp, CellFormat::Plain),
    spec(ColumnKey::Orderable, "Orderable", ColumnGroup::Erp, CellFormat::YesNo),
    spec(ColumnKey::PpapStatus, "PPAP Status", ColumnGroup::Quality, CellFormat::Plain),
    spec(ColumnKey::Coo, "COO", ColumnGroup::Quality, CellFormat::Plain),
    spec(
        ColumnKey::TradeComplianceStatus,
        "Trade Compliance",
        ColumnGroup::Quality,
        CellFormat::Plain,
    ),
    spec(
        ColumnKey::OverallReadiness,
        "Overall Readiness",
        ColumnGroup::Readiness,
        CellFormat::Plain,
    ),
    spec(
        ColumnKey::DesignReadiness,
        "Design Readiness",
        ColumnGroup::Readiness,
        CellFormat::Plain,
    ),
    spec(
        ColumnKey::ProcurementReadiness,
        "Procurement Readiness",
        ColumnGroup::Readiness,
        CellFormat::Plain,
    ),
    spec(
        ColumnKey::ManufacturingReadiness,
        "Manufacturing Readiness",
        ColumnGroup::Readiness,
        CellFormat::Plain,
    ),
    spec(
        ColumnKey::QualityReadiness,
        "Quality Readiness",
        ColumnGroup::Readiness,
        CellFormat::Plain,
    ),
    spec(ColumnKey::EngOwner, "Eng Owner", ColumnGroup::Ownership, CellFormat::Plain),
    spec(
        ColumnKey::ProcurementOwner,
        "Procurement Owner",
        ColumnGroup::Ownership,
        CellFormat::Plain,
    ),
    spec(ColumnKey::AmeOwner, "AME Owner", ColumnGroup::Ownership, CellFormat::Plain),
    spec(ColumnKey::QualityOwner, "Quality Owner", ColumnGroup::Ownership, CellFormat::Plain),
    spec(ColumnKey::BlockerOwner, "Blocker Owner", ColumnGroup::Ownership, CellFormat::Plain),
    spec(ColumnKey::ErpStatus, "ERP Status", ColumnGroup::Erp, CellFormat::Plain),
    spec(ColumnKey::HasBpa, "Has BPA", ColumnGroup::Procurement, CellFormat::Plain),
    spec(ColumnKey::QuoteStatus, "Quote Status", ColumnGroup::Procurement, CellFormat::Plain),
    spec(ColumnKey::CoStatus, "CO Status", ColumnGroup::Governance, CellFormat::Plain),
    spec(ColumnKey::IsNewPart, "New Part", ColumnGroup::Identity, CellFormat::Plain),
    spec(ColumnKey::IsPreCo, "Pre-CO", ColumnGroup::Governance, CellFormat::Plain),
];

impl ColumnKey {
    /// Every column key in catalogue order.
    pub fn all() -> impl Iterator<Item = ColumnKey> {
        COLUMNS.iter().map(|spec| spec.key)
    }

    /// Catalogue entry for this column.
    pub fn spec(&self) -> &'static ColumnSpec {
        COLUMNS
            .iter()
            .find(|spec| spec.key == *self)
            .unwrap_or(&COLUMNS[0])
    }

    /// Returns the key as the item field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKey::Level => "level",
            ColumnKey::ItemNumber => "itemNumber",
            ColumnKey::Revision => "revision",
            ColumnKey::Commodity => "commodity",
            ColumnKey::Description => "description",
            ColumnKey::Plant => "plant",
            ColumnKey::LifecycleStage => "lifecycleStage",
            ColumnKey::PendingCoNumber => "pendingCONumber",
            ColumnKey::MakeBuy => "makeBuy",
            ColumnKey::Aml => "aml",
            ColumnKey::Supplier => "supplier",
            ColumnKey::LeadTime => "leadTime",
            ColumnKey::CcoStatus => "ccoStatus",
            ColumnKey::Orderable => "orderable",
            ColumnKey::PpapStatus => "ppapStatus",
            ColumnKey::Coo => "coo",
            ColumnKey::TradeComplianceStatus => "tradeComplianceStatus",
            ColumnKey::OverallReadiness => "overallReadiness",
            ColumnKey::DesignReadiness => "designReadiness",
            ColumnKey::ProcurementReadiness => "procurementReadiness",
            ColumnKey::ManufacturingReadiness => "manufacturingReadiness",
            ColumnKey::QualityReadiness => "qualityReadiness",
            ColumnKey::EngOwner => "engOwner",
            ColumnKey::ProcurementOwner => "procurementOwner",
            ColumnKey::AmeOwner => "ameOwner",
            ColumnKey::QualityOwner => "qualityOwner",
            ColumnKey::BlockerOwner => "blockerOwner",
            ColumnKey::ErpStatus => "erpStatus",
            ColumnKey::HasBpa => "hasBPA",
            ColumnKey::QuoteStatus => "quoteStatus",
            ColumnKey::CoStatus => "coStatus",
            ColumnKey::IsNewPart => "isNewPart",
            ColumnKey::IsPreCo => "isPreCO",
        }
    }

    pub fn label(&self) -> &'static str {
        self.spec().label
    }

    pub fn group(&self) -> ColumnGroup {
        self.spec().group
    }

    /// Extract the typed value of this column from an item.
    pub fn value<'a>(&self, item: &'a Item) -> CellValue<'a> {
        match self {
            ColumnKey::Level => CellValue::Number(i64::from(item.level)),
            ColumnKey::ItemNumber => CellValue::Text(&item.item_number),
            ColumnKey::Revision => CellValue::from_text(item.revision.as_deref()),
            ColumnKey::Commodity => CellValue::from_text(item.commodity.as_deref()),
            ColumnKey::Description => CellValue::from_text(item.description.as_deref()),
            ColumnKey::Plant => CellValue::from_text(item.plant.as_deref()),
            ColumnKey::LifecycleStage => CellValue::Text(item.lifecycle_stage.as_str()),
            ColumnKey::PendingCoNumber => CellValue::from_text(item.pending_co_number.as_deref()),
            ColumnKey::MakeBuy => CellValue::from_text(item.make_buy.as_deref()),
            ColumnKey::Aml => CellValue::from_number(item.aml),
            ColumnKey::Supplier => CellValue::from_text(item.supplier.as_deref()),
            ColumnKey::LeadTime => CellValue::from_number(item.lead_time),
            ColumnKey::CcoStatus => CellValue::from_text(item.cco_status.as_deref()),
            ColumnKey::Orderable => CellValue::Bool(item.orderable),
            ColumnKey::PpapStatus => CellValue::from_text(item.ppap_status.as_deref()),
            ColumnKey::Coo => CellValue::from_text(item.coo.as_deref()),
            ColumnKey::TradeComplianceStatus => {
                CellValue::from_text(item.trade_compliance_status.as_deref())
            }
            ColumnKey::OverallReadiness => CellValue::Number(i64::from(item.overall_readiness)),
            ColumnKey::DesignReadiness => CellValue::Number(i64::from(item.design_readiness)),
            ColumnKey::ProcurementReadiness => {
                CellValue::Number(i64::from(item.procurement_readiness))
            }
            ColumnKey::ManufacturingReadiness => {
                CellValue::Number(i64::from(item.manufacturing_readiness))
            }
            ColumnKey::QualityReadiness => CellValue::Number(i64::from(item.quality_readiness)),
            ColumnKey::EngOwner => CellValue::from_text(item.eng_owner.as_deref()),
            ColumnKey::ProcurementOwner => CellValue::from_text(item.procurement_owner.as_deref()),
            ColumnKey::AmeOwner => CellValue::from_text(item.ame_owner.as_deref()),
            ColumnKey::QualityOwner => CellValue::from_text(item.quality_owner.as_deref()),
            ColumnKey::BlockerOwner => CellValue::from_text(item.blocker_owner.as_deref()),
            ColumnKey::ErpStatus => CellValue::from_text(item.erp_status.as_deref()),
            ColumnKey::HasBpa => CellValue::from_bool(item.has_bpa),
            ColumnKey::QuoteStatus => CellValue::from_text(item.quote_status.as_deref()),
            ColumnKey::CoStatus => CellValue::from_text(item.co_status.as_deref()),
            ColumnKey::IsNewPart => CellValue::from_flag(item.is_new_part.as_ref()),
            ColumnKey::IsPreCo => CellValue::from_flag(item.is_pre_co.as_ref()),
        }
    }

    /// Display string of this column for an item.
    pub fn display(&self, item: &Item) -> String {
        self.spec().format.render(&self.value(item))
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnKey {
    type Err = String;

    /// Parse a column key (case-insensitive field name).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ColumnKey::all()
            .find(|key| key.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown column: {s}"))
    }
}

/// Named column selections from the column settings panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPreset {
    #[default]
    Default,
    Engineering,
    Procurement,
    Pm,
    Ame,
}

impl ColumnPreset {
    pub const ALL: [ColumnPreset; 5] = [
        ColumnPreset::Default,
        ColumnPreset::Engineering,
        ColumnPreset::Procurement,
        ColumnPreset::Pm,
        ColumnPreset::Ame,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ColumnPreset::Default => "Default View",
            ColumnPreset::Engineering => "Engineering View",
            ColumnPreset::Procurement => "Procurement View",
            ColumnPreset::Pm => "PM View",
            ColumnPreset::Ame => "AME View",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ColumnPreset::Default => "Standard column configuration",
            ColumnPreset::Engineering => "Focus on design & engineering fields",
            ColumnPreset::Procurement => "Focus on sourcing & supplier fields",
            ColumnPreset::Pm => "Focus on readiness & blockers",
            ColumnPreset::Ame => "Focus on manufacturing & quality",
        }
    }

    /// Visible columns of this preset, in display order.
    pub fn columns(&self) -> Vec<ColumnKey> {
        match self {
            ColumnPreset::Default => ColumnKey::all().take(18).collect(),
            ColumnPreset::Engineering => vec![
                ColumnKey::Level,
                ColumnKey::ItemNumber,
                ColumnKey::Revision,
                ColumnKey::Description,
                ColumnKey::LifecycleStage,
                ColumnKey::DesignReadiness,
                ColumnKey::EngOwner,
                ColumnKey::Commodity,
            ],
            ColumnPreset::Procurement => vec![
                ColumnKey::Level,
                ColumnKey::ItemNumber,
                ColumnKey::Description,
                ColumnKey::MakeBuy,
                ColumnKey::Supplier,
                ColumnKey::LeadTime,
                ColumnKey::Aml,
                ColumnKey::HasBpa,
                ColumnKey::QuoteStatus,
                ColumnKey::ProcurementReadiness,
                ColumnKey::ProcurementOwner,
            ],
            ColumnPreset::Pm => vec![
                ColumnKey::Level,
                ColumnKey::ItemNumber,
                ColumnKey::Description,
                ColumnKey::LifecycleStage,
                ColumnKey::OverallReadiness,
                ColumnKey::DesignReadiness,
                ColumnKey::ProcurementReadiness,
                ColumnKey::ManufacturingReadiness,
                ColumnKey::QualityReadiness,
                ColumnKey::Orderable,
            ],
            ColumnPreset::Ame => vec![
                ColumnKey::Level,
                ColumnKey::ItemNumber,
                ColumnKey::Description,
                ColumnKey::Plant,
                ColumnKey::ManufacturingReadiness,
                ColumnKey::QualityReadiness,
                ColumnKey::PpapStatus,
                ColumnKey::AmeOwner,
            ],
        }
    }
}

impl FromStr for ColumnPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(ColumnPreset::Default),
            "engineering" | "eng" => Ok(ColumnPreset::Engineering),
            "procurement" => Ok(ColumnPreset::Procurement),
            "pm" => Ok(ColumnPreset::Pm),
            "ame" => Ok(ColumnPreset::Ame),
            _ => Err(format!("Unknown column preset: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        let mut item = Item::new("4", Some("2"), 2, "IC-7720");
        item.lead_time = Some(0);
        item.orderable = true;
        item.supplier = Some("Texas Instruments".to_string());
        item.has_bpa = Some(false);
        item
    }

    #[test]
    fn catalogue_is_consistent_with_keys() {
        for (index, spec) in COLUMNS.iter().enumerate() {
            assert_eq!(spec.key.spec().key, spec.key);
            assert_eq!(spec.key.as_str().parse::<ColumnKey>().unwrap(), spec.key);
            assert!(
                COLUMNS[index + 1..].iter().all(|other| other.key != spec.key),
                "duplicate column {}",
                spec.key
            );
        }
    }

    #[test]
    fn display_strings_follow_column_formats() {
        let mut item = item();
        assert_eq!(ColumnKey::Orderable.display(&item), "Yes");
        assert_eq!(ColumnKey::LeadTime.display(&item), "-");
        assert_eq!(ColumnKey::Description.display(&item), "-");
        assert_eq!(ColumnKey::Supplier.display(&item), "Texas Instruments");
        assert_eq!(ColumnKey::HasBpa.display(&item), "false");
        assert_eq!(ColumnKey::Level.display(&item), "2");
        assert_eq!(ColumnKey::LifecycleStage.display(&item), "Draft");

        item.lead_time = Some(84);
        item.orderable = false;
        assert_eq!(ColumnKey::LeadTime.display(&item), "84 days");
        assert_eq!(ColumnKey::Orderable.display(&item), "No");
        item.lead_time = None;
        assert_eq!(ColumnKey::LeadTime.display(&item), "-");
        item.lead_time = Some(-1);
        assert_eq!(ColumnKey::LeadTime.display(&item), "-");
    }

    #[test]
    fn flags_display_as_sent() {
        let mut item = item();
        assert_eq!(ColumnKey::IsPreCo.display(&item), "-");
        item.is_pre_co = Some(Flag::Text("Yes".to_string()));
        item.is_new_part = Some(Flag::Bool(true));
        assert_eq!(ColumnKey::IsPreCo.display(&item), "Yes");
        assert_eq!(ColumnKey::IsNewPart.display(&item), "true");
        assert_eq!(ColumnKey::IsPreCo.value(&item), CellValue::Text("Yes"));
        assert_eq!(ColumnKey::IsNewPart.value(&item), CellValue::Bool(true));
    }

    #[test]
    fn empty_string_is_not_absent() {
        let mut item = item();
        item.pending_co_number = Some(String::new());
        assert_eq!(ColumnKey::PendingCoNumber.display(&item), "");
        item.pending_co_number = None;
        assert_eq!(ColumnKey::PendingCoNumber.display(&item), "-");
    }

    #[test]
    fn column_key_parses_case_insensitively() {
        assert_eq!("pendingconumber".parse::<ColumnKey>().unwrap(), ColumnKey::PendingCoNumber);
        assert_eq!("LeadTime".parse::<ColumnKey>().unwrap(), ColumnKey::LeadTime);
        assert!("blockers".parse::<ColumnKey>().is_err());
    }

    #[test]
    fn default_preset_ends_at_overall_readiness() {
        let columns = ColumnPreset::Default.columns();
        assert_eq!(columns.len(), 18);
        assert_eq!(columns.first(), Some(&ColumnKey::Level));
        assert_eq!(columns.last(), Some(&ColumnKey::OverallReadiness));
        for preset in ColumnPreset::ALL {
            assert_eq!(preset.columns()[..2], [ColumnKey::Level, ColumnKey::ItemNumber]);
        }
    }
}
