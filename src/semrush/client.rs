use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::types::Database;

pub const API_BASE: &str = "https://api.semrush.com/";
const REPORT_TYPE: &str = "phrase_all";
/// Keyword, Search Volume, CPC, Date.
const CPC_COLUMNS: &str = "Ph,Nq,Cp,Dt";

#[derive(Debug, thiserror::Error)]
pub enum SemrushError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// One lookup per keyword, returning the raw response lines.
/// Implemented by `SemrushClient` for production; stubs in tests.
pub trait Fetcher {
    async fn fetch(
        &self,
        database: &Database,
        keyword: &str,
        include_cpc: bool,
    ) -> Result<Vec<String>, SemrushError>;
}

#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: &str) -> Option<Self> {
        let key = key.trim();
        (!key.is_empty()).then(|| Self(key.to_string()))
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Clone, Debug)]
pub struct SemrushClient {
    http: Client,
    api_key: ApiKey,
    base_url: Url,
}

impl SemrushClient {
    pub fn new(http: Client, api_key: ApiKey, base_url: &str) -> Result<Self, SemrushError> {
        Ok(Self {
            http,
            api_key,
            base_url: Url::parse(base_url)?,
        })
    }

    fn lookup_url(&self, database: &Database, keyword: &str, include_cpc: bool) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("type", REPORT_TYPE)
                .append_pair("key", &self.api_key.0)
                .append_pair("database", database.as_str())
                .append_pair("phrase", keyword);
            if include_cpc {
                query.append_pair("export_columns", CPC_COLUMNS);
            }
        }
        url
    }
}

impl Fetcher for SemrushClient {
    async fn fetch(
        &self,
        database: &Database,
        keyword: &str,
        include_cpc: bool,
    ) -> Result<Vec<String>, SemrushError> {
        let url = self.lookup_url(database, keyword, include_cpc);

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Body is still parsed; error bodies simply yield no rows.
            warn!(keyword, status = %status, "upstream returned non-success status");
        }

        let text = response.text().await?;
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        debug!(keyword, lines = lines.len(), "lookup complete");
        Ok(lines)
    }
}
