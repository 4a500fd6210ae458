//! Sibling-group sorting.
//!
//! Sorting never flattens the hierarchy: the hierarchy builder calls
//! [`sort_siblings`] once per group of items sharing a parent.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bom_model::Item;

use crate::columns::{CellValue, ColumnKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown sort direction: {s}")),
        }
    }
}

/// The single active sort, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(ColumnKey, SortDirection)>,
}

impl SortState {
    /// No active sort: items keep their source order.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(key: ColumnKey, direction: SortDirection) -> Self {
        Self {
            active: Some((key, direction)),
        }
    }

    pub fn key(&self) -> Option<ColumnKey> {
        self.active.map(|(key, _)| key)
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.active.map(|(_, direction)| direction)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Header click: the same key cycles asc -> desc -> none, a different
    /// key starts over at asc.
    pub fn toggle(&mut self, key: ColumnKey) {
        self.active = match self.active {
            Some((current, SortDirection::Asc)) if current == key => {
                Some((key, SortDirection::Desc))
            }
            Some((current, SortDirection::Desc)) if current == key => None,
            _ => Some((key, SortDirection::Asc)),
        };
    }

    /// Compare two items under this sort. Equal when no sort is active.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let Some((key, direction)) = self.active else {
            return Ordering::Equal;
        };
        let ordering = compare_values(&key.value(a), &key.value(b));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortState {
    type Err = String;

    /// Parse `key`, `key:asc` or `key:desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, direction) = match s.split_once(':') {
            Some((key, direction)) => (key, direction.parse::<SortDirection>()?),
            None => (s, SortDirection::Asc),
        };
        Ok(Self::new(key.parse::<ColumnKey>()?, direction))
    }
}

/// Ascending comparison of two cell values.
///
/// Two numbers compare numerically and two booleans put `true` first. Any
/// other pairing, including a value against an absent one, compares the
/// string coercions (absent coerces to the empty string, so it sorts first).
pub fn compare_values(a: &CellValue<'_>, b: &CellValue<'_>) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x.cmp(y),
        (CellValue::Bool(x), CellValue::Bool(y)) => y.cmp(x),
        _ => collate(&a.coerce_to_string(), &b.coerce_to_string()),
    }
}

/// Locale-style string ordering: letters compare case-insensitively first,
/// then lower case sorts before upper case, then code points break the tie.
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    primary
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Stable in-place sort of one sibling group.
pub fn sort_siblings(siblings: &mut [&Item], sort: &SortState) {
    if sort.is_active() {
        siblings.sort_by(|a, b| sort.compare(a, b));
    }
}
