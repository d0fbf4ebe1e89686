//! NCBI E-utilities client
//!
//! Thin client over the two endpoints the service calls:
//!
//! - `esearch.fcgi` - search the GEO DataSets index (`db=gds`) and return
//!   the matching record identifiers
//! - `efetch.fcgi` - fetch the XML detail blob for one identifier
//!
//! Both calls are bounded by the configured timeout and carry the API key
//! only when one is configured. There are no retries; the caller maps any
//! transport or status failure to a generic upstream error.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::NcbiConfig;

/// GEO DataSets database identifier for E-utilities requests
const GDS_DB: &str = "gds";

/// Envelope around the esearch JSON response
#[derive(Debug, Default, Deserialize)]
struct EsearchEnvelope {
    #[serde(default)]
    esearchresult: EsearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct EsearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

/// Client for the NCBI E-utilities endpoints
#[derive(Clone)]
pub struct NcbiClient {
    client: Client,
    config: NcbiConfig,
}

impl NcbiClient {
    /// Create a new client with the configured request timeout
    pub fn new(config: NcbiConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("geofetch-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Search GEO DataSets for `term` and return the matching record ids.
    ///
    /// An empty list is a valid outcome ("no data found"), not an error.
    pub async fn search(&self, term: &str) -> reqwest::Result<Vec<String>> {
        let mut params: Vec<(&str, &str)> =
            vec![("db", GDS_DB), ("term", term), ("retmode", "json")];
        if let Some(key) = self.config.api_key.as_deref() {
            params.push(("api_key", key));
        }

        let envelope: EsearchEnvelope = self
            .client
            .get(&self.config.esearch_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let ids = envelope.esearchresult.idlist;
        debug!(term, count = ids.len(), "esearch returned identifiers");

        Ok(ids)
    }

    /// Fetch the raw XML detail blob for one record identifier.
    pub async fn fetch_detail(&self, id: &str) -> reqwest::Result<String> {
        let mut params: Vec<(&str, &str)> = vec![("db", GDS_DB), ("id", id), ("retmode", "xml")];
        if let Some(key) = self.config.api_key.as_deref() {
            params.push(("api_key", key));
        }

        let detail = self
            .client
            .get(&self.config.efetch_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        debug!(id, bytes = detail.len(), "efetch returned detail");

        Ok(detail)
    }
}
