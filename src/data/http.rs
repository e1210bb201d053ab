//! Remote catalog over HTTP.
//!
//! The endpoint returns catalog rows as JSON, either a bare array or wrapped
//! as `{"categories": [...]}`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::data::CatalogSource;
use crate::domain::CatalogEntry;
use crate::error::EngineError;

/// Environment variable (or `.env` key) naming the catalog endpoint.
pub const CATALOG_URL_ENV: &str = "SAJU_CATALOG_URL";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpCatalog {
    client: Client,
    url: String,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| EngineError::catalog(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_env() -> Result<Self, EngineError> {
        dotenvy::dotenv().ok();
        let url = std::env::var(CATALOG_URL_ENV)
            .map_err(|_| EngineError::catalog(format!("missing {CATALOG_URL_ENV} in environment (.env)")))?;
        Self::new(url)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CatalogSource for HttpCatalog {
    fn list_categories(&self) -> Result<Vec<CatalogEntry>, EngineError> {
        debug!(url = %self.url, "fetching catalog");
        let resp = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| EngineError::catalog(format!("catalog request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(EngineError::catalog(format!(
                "catalog request failed with status {}",
                resp.status()
            )));
        }

        let body: CatalogResponse = resp
            .json()
            .map_err(|e| EngineError::catalog(format!("failed to parse catalog response: {e}")))?;
        Ok(body.into_entries())
    }

    fn describe(&self) -> String {
        format!("http catalog ({})", self.url)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogResponse {
    Rows(Vec<CatalogEntry>),
    Wrapped { categories: Vec<CatalogEntry> },
}

impl CatalogResponse {
    fn into_entries(self) -> Vec<CatalogEntry> {
        match self {
            CatalogResponse::Rows(rows) => rows,
            CatalogResponse::Wrapped { categories } => categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MajorType;

    #[test]
    fn accepts_bare_and_wrapped_bodies() {
        let bare = r#"[{"major_type":"positive","middle_name":"연예","minor_name":"배우"}]"#;
        let rows = serde_json::from_str::<CatalogResponse>(bare).unwrap().into_entries();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].base_weight, 1.0);
        assert_eq!(rows[0].confidence_factor, 0.8);

        let wrapped = r#"{"categories":[
            {"major_type":"negative","middle_name":"건강","minor_name":"위장 질환","base_weight":1.3}
        ]}"#;
        let rows = serde_json::from_str::<CatalogResponse>(wrapped).unwrap().into_entries();
        assert_eq!(rows[0].major_type, MajorType::Negative);
        assert_eq!(rows[0].base_weight, 1.3);
    }

    #[test]
    fn describes_its_endpoint() {
        let catalog = HttpCatalog::new("http://localhost:9/catalog").unwrap();
        assert_eq!(catalog.url(), "http://localhost:9/catalog");
        assert!(catalog.describe().contains("localhost:9"));
    }
}
