use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use tops_core::{MetadataProvider, RetryPolicy, Sleeper, TokioSleeper, UpstreamError, with_retry};
use tops_model::{Credentials, DepId, LabId};

use crate::{config::MetadataConfig, errors::DiscoverError};

const DEPLOYMENT_ID_PATH: &str = "/deployment/id/";
const LAB_ID_PATH: &str = "/userTags/name/labid/value/";
const CLOUD_ACCOUNTS_PATH: &str = "/cloudAccounts";

/// HTTP client for the cloud metadata service.
///
/// Every query is retried on its own per the configured policy; nothing is cached.
#[derive(Clone)]
pub struct HttpMetadataClient {
    http: reqwest::Client,
    base_url: String,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

#[derive(Debug, Deserialize)]
struct CloudAccounts {
    #[serde(rename = "cloudAccounts")]
    accounts: Vec<CloudAccount>,
}

#[derive(Debug, Deserialize)]
struct CloudAccount {
    credentials: Vec<AccountCredential>,
}

#[derive(Debug, Deserialize)]
struct AccountCredential {
    key: String,
    secret: String,
}

impl HttpMetadataClient {
    pub fn new(config: &MetadataConfig) -> Result<Self, DiscoverError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            policy: config.retry_policy(),
            sleeper: Arc::new(TokioSleeper),
        })
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    async fn get_text(&self, path: &str) -> Result<String, DiscoverError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "querying metadata service");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(DiscoverError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn fetch_id(&self, path: &str) -> Result<String, DiscoverError> {
        let body = self.get_text(path).await?;
        let id = body.trim();
        if id.is_empty() {
            return Err(DiscoverError::InvalidResponse(format!("empty body from {path}")));
        }
        Ok(id.to_string())
    }

    async fn fetch_credentials(&self) -> Result<Credentials, DiscoverError> {
        let body = self.get_text(CLOUD_ACCOUNTS_PATH).await?;
        let accounts: CloudAccounts = serde_json::from_str(&body)
            .map_err(|e| DiscoverError::InvalidResponse(format!("cloud accounts: {e}")))?;

        let pair = accounts
            .accounts
            .into_iter()
            .next()
            .and_then(|account| account.credentials.into_iter().next())
            .ok_or_else(|| {
                DiscoverError::InvalidResponse("no credentials in first cloud account".into())
            })?;
        Ok(Credentials::new(pair.key, pair.secret))
    }
}

#[async_trait]
impl MetadataProvider for HttpMetadataClient {
    async fn deployment_id(&self) -> Result<DepId, UpstreamError> {
        with_retry(&self.policy, self.sleeper.as_ref(), "deployment id", move || async move {
            self.fetch_id(DEPLOYMENT_ID_PATH)
                .await
                .map_err(UpstreamError::from)
        })
        .await
    }

    async fn lab_id(&self) -> Result<LabId, UpstreamError> {
        with_retry(&self.policy, self.sleeper.as_ref(), "lab id", move || async move {
            self.fetch_id(LAB_ID_PATH).await.map_err(UpstreamError::from)
        })
        .await
    }

    async fn credentials(&self) -> Result<Credentials, UpstreamError> {
        with_retry(&self.policy, self.sleeper.as_ref(), "cloud credentials", move || async move {
            self.fetch_credentials().await.map_err(UpstreamError::from)
        })
        .await
    }
}
