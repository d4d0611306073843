//! HTTP client for the Sumo Logic Collector Management API
//!
//! Resolves a collector by name and manages its sources. The collector list
//! and the resolved collector's source list are fetched lazily and cached
//! until [`CollectorClient::refresh`] is called; mutations never touch the
//! caches.

use reqwest::header::IF_MATCH;
use reqwest::{Method, RequestBuilder};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{
    Collector, CollectorList, Source, SourceData, SourceDetail, SourceEnvelope, SourceList,
};

use super::response::ApiResponse;
use super::retry::RetryPolicy;

/// HTTP client for one named collector
pub struct CollectorClient {
    config: ClientConfig,
    http_client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
    collectors: Option<Vec<Collector>>,
    sources: Option<Vec<Source>>,
}

impl CollectorClient {
    /// Create a new collector client from configuration
    ///
    /// Returns an error if the configuration is invalid or missing required fields.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.api_endpoint(),
            retry: RetryPolicy::from_config(&config),
            config,
            http_client,
            collectors: None,
            sources: None,
        })
    }

    /// Collector name this client resolves
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Fetch the full collector list, replacing the cached one
    pub async fn list_collectors(&mut self) -> Result<&[Collector]> {
        let response = self.request(Method::GET, "/collectors", |r| r).await?;
        let list: CollectorList = response.json()?;
        tracing::debug!(count = list.collectors.len(), "Fetched collectors");
        Ok(self.collectors.insert(list.collectors).as_slice())
    }

    /// Find the collector registered under this client's name
    ///
    /// Uses the cached collector list, fetching it on first use.
    pub async fn find_collector_metadata(&mut self) -> Result<Option<&Collector>> {
        if self.collectors.is_none() {
            self.list_collectors().await?;
        }
        let name = &self.config.name;
        Ok(self
            .collectors
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|c| &c.name == name))
    }

    /// Whether a collector with this name is registered
    pub async fn exists(&mut self) -> Result<bool> {
        Ok(self.find_collector_metadata().await?.is_some())
    }

    /// Server-assigned id of the named collector
    pub async fn id(&mut self) -> Result<String> {
        let id = self.find_collector_metadata().await?.map(|c| c.id.clone());
        id.ok_or_else(|| Error::CollectorNotFound(self.config.name.clone()))
    }

    /// Fetch the collector's sources, replacing the cached list
    pub async fn fetch_sources(&mut self) -> Result<&[Source]> {
        let path = self.sources_path().await?;
        let response = self.request(Method::GET, &path, |r| r).await?;
        let list: SourceList = response.json()?;
        tracing::debug!(
            collector = %self.config.name,
            count = list.sources.len(),
            "Fetched sources"
        );
        Ok(self.sources.insert(list.sources).as_slice())
    }

    /// Whether the collector has a source with this name
    pub async fn source_exists(&mut self, source_name: &str) -> Result<bool> {
        Ok(self.find_source(source_name).await?.is_some())
    }

    /// Find a source by name in the cached source list, fetching it on first use
    pub async fn find_source(&mut self, source_name: &str) -> Result<Option<&Source>> {
        if self.sources.is_none() {
            self.fetch_sources().await?;
        }
        Ok(self
            .sources
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|s| s.name == source_name))
    }

    /// Create a source on the collector
    ///
    /// The response body is returned as-is.
    pub async fn add_source(&mut self, source_data: &SourceData) -> Result<ApiResponse> {
        let path = self.sources_path().await?;
        let body = SourceEnvelope {
            source: source_data,
        };
        self.request(Method::POST, &path, |r| r.json(&body)).await
    }

    /// Delete a source from the collector
    pub async fn delete_source(&mut self, source_id: &str) -> Result<ApiResponse> {
        let path = self.source_path(source_id).await?;
        self.request(Method::DELETE, &path, |r| r).await
    }

    /// Replace a source's definition
    ///
    /// Fetches the current etag first and sends it as `If-Match`, so the
    /// update fails if the source changed in between.
    pub async fn update_source(
        &mut self,
        source_id: &str,
        source_data: &SourceData,
    ) -> Result<ApiResponse> {
        let etag = self
            .get_etag(source_id)
            .await?
            .ok_or_else(|| Error::MissingEtag(source_id.to_string()))?;

        let mut merged = source_data.clone();
        merged.insert("id".to_string(), Value::String(source_id.to_string()));
        let body = SourceEnvelope { source: &merged };

        let path = self.source_path(source_id).await?;
        self.request(Method::PUT, &path, |r| {
            r.header(IF_MATCH, etag.as_str()).json(&body)
        })
        .await
    }

    /// Current etag of a source
    ///
    /// Taken from the `ETag` header, or from the source's `etag` field when
    /// the header is absent.
    pub async fn get_etag(&mut self, source_id: &str) -> Result<Option<String>> {
        let path = self.source_path(source_id).await?;
        let response = self.request(Method::GET, &path, |r| r).await?;
        if response.etag.is_some() {
            return Ok(response.etag);
        }

        match serde_json::from_str::<SourceDetail>(&response.body) {
            Ok(detail) => Ok(detail.into_source().etag().map(str::to_string)),
            Err(e) => {
                tracing::warn!(
                    source_id,
                    status = response.status.as_u16(),
                    body = %response.body,
                    error = %e,
                    "No ETag header and source body is not a source definition"
                );
                Ok(None)
            }
        }
    }

    /// Run a log search query
    pub async fn search(&self, query: &str) -> Result<Value> {
        let response = self
            .request(Method::GET, "/logs/search", |r| r.query(&[("q", query)]))
            .await?;
        response.json()
    }

    /// Drop both caches and fetch collectors and sources again
    pub async fn refresh(&mut self) -> Result<()> {
        self.collectors = None;
        self.sources = None;
        self.list_collectors().await?;
        self.fetch_sources().await?;
        Ok(())
    }

    async fn sources_path(&mut self) -> Result<String> {
        let id = self.id().await?;
        Ok(format!("/collectors/{}/sources", urlencoding::encode(&id)))
    }

    async fn source_path(&mut self, source_id: &str) -> Result<String> {
        let sources = self.sources_path().await?;
        Ok(format!("{}/{}", sources, urlencoding::encode(source_id)))
    }

    /// Send one authenticated request under the retry policy
    async fn request(
        &self,
        method: Method,
        path: &str,
        build: impl Fn(RequestBuilder) -> RequestBuilder,
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "Sumo Logic API request");

        self.retry
            .run(|| {
                let request = build(self.http_client.request(method.clone(), &url))
                    .basic_auth(&self.config.access_id, Some(&self.config.access_key));
                async move {
                    let response = request.send().await?;
                    ApiResponse::read(response).await
                }
            })
            .await
    }
}

/// Check whether a collector named in `config` is registered
pub async fn collector_exists(config: ClientConfig) -> Result<bool> {
    CollectorClient::new(config)?.exists().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_valid_config() {
        let config = ClientConfig::default();
        assert!(CollectorClient::new(config).is_err());
    }

    #[test]
    fn test_client_with_valid_config() {
        let config = ClientConfig::new("web-01", "su123", "secret");
        let client = CollectorClient::new(config).unwrap();
        assert_eq!(client.name(), "web-01");
        assert_eq!(client.base_url, "https://api.us2.sumologic.com/api/v1");
        assert!(client.collectors.is_none());
        assert!(client.sources.is_none());
    }
}
