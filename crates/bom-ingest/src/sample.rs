//! Bundled demonstration dataset.

use bom_model::Item;

use crate::error::{FetchError, Result};
use crate::source::ItemSource;

const SAMPLE_JSON: &str = include_str!("../data/sample_items.json");

/// Serves the bundled sample items.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

/// Parse the bundled sample items.
pub fn sample_items() -> Result<Vec<Item>> {
    serde_json::from_str(SAMPLE_JSON).map_err(|e| FetchError::Decode {
        endpoint: "bundled sample".to_string(),
        message: e.to_string(),
    })
}

impl ItemSource for SampleSource {
    fn describe(&self) -> String {
        "bundled sample".to_string()
    }

    fn fetch_items(&self) -> Result<Vec<Item>> {
        sample_items()
    }
}
