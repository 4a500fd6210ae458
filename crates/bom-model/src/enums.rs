//! Type-safe enumerations for BOM governance metadata.
//!
//! The data source transmits these as display strings; the enums keep the
//! known vocabulary and its ordering in one place.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Lifecycle stage of an item on its way to becoming orderable.
///
/// Declaration order is the progression order, so `Ord` sorts stages from
/// `Draft` to `Orderable`. Names outside the known vocabulary are kept
/// verbatim in [`LifecycleStage::Other`] and sort after the known stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LifecycleStage {
    /// Item exists only as an engineering draft.
    #[default]
    Draft,

    /// Design is complete and the item can be put on a change order.
    ReadyForCo,

    /// Change order submitted, awaiting approval.
    CoSubmitted,

    /// Change order approved.
    CoApproved,

    /// Cross-org change order being executed.
    CcoInProgress,

    /// Activation complete; the item can be procured.
    Orderable,

    /// Any other stage name the data source sends.
    Other(String),
}

impl LifecycleStage {
    /// Every stage in progression order.
    pub const ALL: [LifecycleStage; 6] = [
        LifecycleStage::Draft,
        LifecycleStage::ReadyForCo,
        LifecycleStage::CoSubmitted,
        LifecycleStage::CoApproved,
        LifecycleStage::CcoInProgress,
        LifecycleStage::Orderable,
    ];

    /// Returns the canonical name as the data source spells it.
    pub fn as_str(&self) -> &str {
        match self {
            LifecycleStage::Draft => "Draft",
            LifecycleStage::ReadyForCo => "Ready for CO",
            LifecycleStage::CoSubmitted => "CO Submitted",
            LifecycleStage::CoApproved => "CO Approved",
            LifecycleStage::CcoInProgress => "CCO In Progress",
            LifecycleStage::Orderable => "Orderable",
            LifecycleStage::Other(name) => name.as_str(),
        }
    }

    /// Map a wire name to a stage. Only the exact canonical spellings select
    /// a known stage.
    pub fn from_wire(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == name)
            .unwrap_or_else(|| LifecycleStage::Other(name.to_string()))
    }

    /// Returns true for stages outside the known vocabulary.
    pub fn is_other(&self) -> bool {
        matches!(self, LifecycleStage::Other(_))
    }
}

impl Serialize for LifecycleStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LifecycleStage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&name))
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LifecycleStage {
    type Err = String;

    /// Parse a stage name (case-insensitive, `-`/`_` accepted for spaces).
    /// Unrecognised names become [`LifecycleStage::Other`]; only a blank name
    /// is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Empty lifecycle stage".to_string());
        }
        let normalized = trimmed.to_uppercase().replace(['-', '_'], " ");

        match normalized.as_str() {
            "DRAFT" => Ok(LifecycleStage::Draft),
            "READY FOR CO" => Ok(LifecycleStage::ReadyForCo),
            "CO SUBMITTED" => Ok(LifecycleStage::CoSubmitted),
            "CO APPROVED" => Ok(LifecycleStage::CoApproved),
            "CCO IN PROGRESS" => Ok(LifecycleStage::CcoInProgress),
            "ORDERABLE" => Ok(LifecycleStage::Orderable),
            _ => Ok(LifecycleStage::Other(trimmed.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_stage_from_str() {
        assert_eq!(
            "Ready for CO".parse::<LifecycleStage>().unwrap(),
            LifecycleStage::ReadyForCo
        );
        assert_eq!(
            "cco-in-progress".parse::<LifecycleStage>().unwrap(),
            LifecycleStage::CcoInProgress
        );
        assert_eq!(
            "ORDERABLE".parse::<LifecycleStage>().unwrap(),
            LifecycleStage::Orderable
        );
        assert_eq!(
            "Released".parse::<LifecycleStage>().unwrap(),
            LifecycleStage::Other("Released".to_string())
        );
        assert!("  ".parse::<LifecycleStage>().is_err());
    }

    #[test]
    fn test_lifecycle_stage_serde_uses_display_names() {
        let json = serde_json::to_string(&LifecycleStage::CoSubmitted).unwrap();
        assert_eq!(json, "\"CO Submitted\"");
        let stage: LifecycleStage = serde_json::from_str("\"CCO In Progress\"").unwrap();
        assert_eq!(stage, LifecycleStage::CcoInProgress);
    }

    #[test]
    fn test_lifecycle_stage_order_follows_progression() {
        let mut stages = LifecycleStage::ALL.to_vec();
        stages.reverse();
        stages.sort();
        assert_eq!(stages, LifecycleStage::ALL.to_vec());
        for stage in LifecycleStage::ALL {
            assert_eq!(stage.as_str().parse::<LifecycleStage>().unwrap(), stage);
        }
    }

    #[test]
    fn test_unknown_stage_is_kept_verbatim() {
        let stage: LifecycleStage = serde_json::from_str("\"Released\"").unwrap();
        assert_eq!(stage, LifecycleStage::Other("Released".to_string()));
        assert!(stage.is_other());
        assert_eq!(stage.as_str(), "Released");
        assert_eq!(serde_json::to_string(&stage).unwrap(), "\"Released\"");
        assert!(stage > LifecycleStage::Orderable);

        // wire names are exact; only the CLI parser is lenient
        let stage: LifecycleStage = serde_json::from_str("\"draft\"").unwrap();
        assert_eq!(stage, LifecycleStage::Other("draft".to_string()));
    }
}
