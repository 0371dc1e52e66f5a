//! Reqwest-backed transport for the Remote Data Service.
//!
//! This layer owns transport details only: endpoint assembly, auth headers,
//! HTTP error mapping, and JSON decoding. Table and procedure semantics live
//! in the per-port adapters next door.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::PortalSettings;
use crate::domain::ports::RemoteServiceError;

const REST_ROOT: &str = "rest/v1";
const RPC_SEGMENT: &str = "rpc";

/// Errors raised while constructing the transport from configuration.
#[derive(Debug, thiserror::Error)]
pub enum RestServiceBuildError {
    /// The configured service URL did not parse.
    #[error("service URL is invalid: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The HTTP client could not be constructed.
    #[error("http client construction failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Shared HTTP transport for the table and procedure adapters.
#[derive(Debug, Clone)]
pub struct RestDataService {
    client: Client,
    base: Url,
    key: Option<String>,
}

impl RestDataService {
    /// Build the transport with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(
        base: Url,
        key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base, key })
    }

    /// Build the transport from loaded portal settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured URL is invalid or the HTTP
    /// client cannot be built.
    pub fn from_settings(settings: &PortalSettings) -> Result<Self, RestServiceBuildError> {
        let base = Url::parse(settings.service_url())?;
        Ok(Self::new(
            base,
            settings.service_key().map(str::to_owned),
            settings.request_timeout(),
        )?)
    }

    /// Call a named remote procedure with a JSON argument object.
    ///
    /// An empty or `null` body decodes to [`Value::Null`]; callers treat that
    /// the same as a declined outcome.
    pub(crate) async fn rpc(
        &self,
        function: &str,
        arguments: &Value,
    ) -> Result<Value, RemoteServiceError> {
        let url = self.endpoint(&[REST_ROOT, RPC_SEGMENT, function])?;
        let response = self
            .authorised(self.client.post(url))
            .json(arguments)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(body.as_ref()).map_err(|error| {
            RemoteServiceError::decode(format!("invalid procedure response: {error}"))
        })
    }

    /// Read rows from a table with exact-match style filters.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<T>, RemoteServiceError> {
        let mut url = self.endpoint(&[REST_ROOT, table])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("select", "*");
            for (column, predicate) in filters {
                query.append_pair(column, predicate);
            }
        }
        let response = self
            .authorised(self.client.get(url))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        serde_json::from_slice(body.as_ref())
            .map_err(|error| RemoteServiceError::decode(format!("invalid row set: {error}")))
    }

    /// Insert one row into a table; the response body is not needed.
    pub(crate) async fn insert(
        &self,
        table: &str,
        row: &Value,
    ) -> Result<(), RemoteServiceError> {
        let url = self.endpoint(&[REST_ROOT, table])?;
        let response = self
            .authorised(self.client.post(url))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.map_err(map_transport_error)?;
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteServiceError> {
        let mut url = self.base.clone();
        {
            let mut parts = url.path_segments_mut().map_err(|()| {
                RemoteServiceError::transport("service URL cannot be used as a base")
            })?;
            parts.pop_if_empty();
            for segment in segments {
                parts.push(segment);
            }
        }
        Ok(url)
    }

    fn authorised(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header(reqwest::header::ACCEPT, "application/json");
        match &self.key {
            Some(key) => builder
                .header("apikey", key.as_str())
                .bearer_auth(key.as_str()),
            None => builder,
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> RemoteServiceError {
    RemoteServiceError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RemoteServiceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };
    RemoteServiceError::backend(message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
