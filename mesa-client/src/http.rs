//! HTTP client for network-based API calls

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::in_band_error;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making requests to the reservation service
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(method = "GET", %url, "request");
        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(method = "GET", %url, "request");
        let response = self.client.get(&url).query(query).send().await?;
        Self::decode(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(method = "POST", %url, "request");
        let response = self.client.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(method = "PUT", %url, "request");
        let response = self.client.put(&url).json(body).send().await?;
        Self::decode(response).await
    }

    /// Make a DELETE request, discarding the body
    ///
    /// With `check_in_band` set, a success body carrying an `error` message
    /// still fails with [`ClientError::Rejected`].
    pub async fn delete(&self, path: &str, check_in_band: bool) -> ClientResult<()> {
        let url = self.url(path);
        tracing::debug!(method = "DELETE", %url, "request");
        let response = self.client.delete(&url).send().await?;
        let body = Self::checked_body(response).await?;
        if check_in_band {
            if let Some(message) = body.as_ref().and_then(in_band_error) {
                return Err(ClientError::Rejected { message });
            }
        }
        Ok(())
    }

    /// Decode a success body into `T`
    async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let body = Self::checked_body(response)
            .await?
            .ok_or_else(|| ClientError::InvalidResponse("Body is not valid JSON".into()))?;
        if let Some(message) = in_band_error(&body) {
            return Err(ClientError::Rejected { message });
        }
        Ok(serde_json::from_value(body)?)
    }

    /// Fail on error statuses, otherwise return the parsed body
    ///
    /// An empty body parses as `null`; a body that is not JSON yields `None`.
    async fn checked_body(response: Response) -> ClientResult<Option<Value>> {
        let status = response.status();
        let text = response.text().await?;
        let body = parse_body(&text);

        if !status.is_success() {
            let status = status.as_u16();
            let err = match body.as_ref().and_then(in_band_error) {
                Some(message) => ClientError::Api { status, message },
                None => ClientError::Status { status, body: text },
            };
            tracing::warn!(status, error = %err, "request failed");
            return Err(err);
        }

        Ok(body)
    }
}

fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return Some(Value::Null);
    }
    serde_json::from_str(text).ok()
}
