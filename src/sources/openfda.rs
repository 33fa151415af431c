use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{DrugLabelError, RequestFailure};
use crate::utils::query::{self, SearchTerm};

pub const DEFAULT_BASE_URL: &str = "https://api.fda.gov/drug/label.json";
pub const BASE_URL_ENV: &str = "OPENFDA_DRUG_LABEL_BASE";
pub const MAX_LIMIT: usize = 1000;

/// Body of a `drug/label.json` search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelResponse {
    #[serde(default)]
    pub meta: Map<String, Value>,
    #[serde(default)]
    pub results: Vec<Map<String, Value>>,
}

pub struct DrugLabelClient {
    client: reqwest::Client,
    base: Cow<'static, str>,
    api_key: String,
}

impl std::fmt::Debug for DrugLabelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrugLabelClient")
            .field("base", &self.base)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

pub(crate) fn validate_limit(limit: usize) -> Result<(), DrugLabelError> {
    if limit == 0 || limit > MAX_LIMIT {
        return Err(DrugLabelError::OutOfRange(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {limit}"
        )));
    }
    Ok(())
}

impl DrugLabelClient {
    /// Creates a client against the default label endpoint, or the one named
    /// by `OPENFDA_DRUG_LABEL_BASE` when that is set.
    pub fn new(api_key: impl Into<String>) -> Result<Self, DrugLabelError> {
        let base = crate::sources::env_base(DEFAULT_BASE_URL, BASE_URL_ENV);
        Self::build(api_key.into(), base)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DrugLabelError> {
        let base = base_url.into().trim().to_string();
        if base.is_empty() {
            return Err(DrugLabelError::InvalidArgument(
                "base URL must not be empty".into(),
            ));
        }
        Self::build(api_key.into(), Cow::Owned(base))
    }

    fn build(api_key: String, base: Cow<'static, str>) -> Result<Self, DrugLabelError> {
        if api_key.trim().is_empty() {
            return Err(DrugLabelError::EmptyCredential);
        }
        Ok(Self {
            client: crate::sources::shared_client()?,
            base,
            api_key,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        self.base.as_ref()
    }

    /// Same contract as [`query::build_term`].
    pub fn generic_search(
        &self,
        field: &str,
        value: &str,
        exact: bool,
    ) -> Result<SearchTerm, DrugLabelError> {
        query::build_term(field, value, exact)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, DrugLabelError> {
        let resp = req.send().await?;
        let status = resp.status();
        let bytes = crate::sources::read_limited_body(resp).await?;

        if !status.is_success() {
            let excerpt = crate::sources::body_excerpt(&bytes);
            warn!(%status, "openfda request returned non-success status");
            return Err(RequestFailure::Status { status, excerpt }.into());
        }

        serde_json::from_slice(&bytes).map_err(|source| DrugLabelError::ApiJson { source })
    }

    /// Runs one bounded search with all `terms` AND-joined.
    ///
    /// An empty `terms` slice sends no `search` parameter at all.
    pub async fn search_request<S: AsRef<str>>(
        &self,
        terms: &[S],
        limit: usize,
    ) -> Result<LabelResponse, DrugLabelError> {
        validate_limit(limit)?;

        let mut clauses: Vec<&str> = Vec::with_capacity(terms.len());
        for term in terms {
            let term = term.as_ref().trim();
            if term.is_empty() {
                return Err(DrugLabelError::InvalidArgument(
                    "search terms must not be empty".into(),
                ));
            }
            clauses.push(term);
        }
        let search = clauses.join(" AND ");

        let limit = limit.to_string();
        let mut req = self.client.get(self.base.as_ref());
        if !search.is_empty() {
            req = req.query(&[("search", search.as_str())]);
        }
        req = req.query(&[("limit", limit.as_str()), ("api_key", self.api_key.as_str())]);

        debug!(
            url = %self.base,
            terms = clauses.len(),
            limit = %limit,
            "openfda label search"
        );
        self.get_json(req).await
    }

    /// Fetches an arbitrary URL and parses the body as JSON.
    pub async fn manual_request(&self, url: &str) -> Result<Value, DrugLabelError> {
        debug!(url, "openfda manual request");
        self.get_json(self.client.get(url)).await
    }
}
