use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::config::Config;
use crate::error::{Result, WidgetError};
use crate::models::{SearchRequest, SearchResponse};

/// Where the widget sends queries.
pub trait SearchBackend {
    fn search(&self, query: &str) -> impl Future<Output = Result<SearchResponse>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    client: Client,
    url: String,
}

impl HttpSearchClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WidgetError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.search_url.clone(), config.timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SearchBackend for HttpSearchClient {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(&SearchRequest { query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        tracing::debug!(
            url = %self.url,
            body = %String::from_utf8_lossy(&body),
            "API response"
        );

        SearchResponse::from_slice(&body)
    }
}
