//! Client for the BOM REST endpoints.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;

use bom_model::{Item, LifecycleDistribution, ProjectStatistics};

use crate::error::{FetchError, Result};
use crate::source::ItemSource;

pub const ITEMS_PATH: &str = "/api/bom-items";
pub const STATISTICS_PATH: &str = "/api/statistics";
pub const LIFECYCLE_PATH: &str = "/api/lifecycle-distribution";

/// HTTP request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client over the three read endpoints.
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(base_url));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, concat!("bom-grid/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().map_err(|e| FetchError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }
}

impl ItemSource for HttpSource {
    fn describe(&self) -> String {
        self.base_url.clone()
    }

    fn fetch_items(&self) -> Result<Vec<Item>> {
        self.get(ITEMS_PATH)
    }

    fn fetch_statistics(&self) -> Result<ProjectStatistics> {
        self.get(STATISTICS_PATH)
    }

    fn fetch_lifecycle_distribution(&self) -> Result<LifecycleDistribution> {
        self.get(LIFECYCLE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_http_base_url() {
        let err = HttpSource::new("ftp://example.com", DEFAULT_TIMEOUT).err();
        assert!(matches!(err, Some(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn trims_trailing_slash() {
        let source = HttpSource::new("http://localhost:3001/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(source.base_url(), "http://localhost:3001");
    }
}
