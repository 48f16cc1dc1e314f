//! HTTP client for the Overpass interpreter endpoint.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use noor_core::{Coordinate, PlaceRecord};

use crate::error::OverpassError;
use crate::normalize::normalize_elements;
use crate::query::build_query;
use crate::types::{OverpassElement, OverpassResponse};

/// Public interpreter used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = noor_core::DEFAULT_OVERPASS_URL;

/// Characters of a non-2xx body kept for the error message.
const BODY_PREVIEW_CHARS: usize = 160;

/// Sends one query per call to an Overpass interpreter.
///
/// The request timeout also becomes the `[timeout:N]` directive of the query,
/// so the server gives up no later than the client does.
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
    timeout_secs: u64,
    max_elements: u32,
}

impl OverpassClient {
    /// Creates a client with a request timeout, `User-Agent`, and a
    /// server-side cap on the number of returned elements.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::InvalidEndpoint`] if `endpoint` is not an
    /// absolute http(s) URL, or [`OverpassError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_elements: u32,
    ) -> Result<Self, OverpassError> {
        let endpoint = parse_endpoint(endpoint)?;
        let timeout_secs = timeout_secs.max(1);
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            timeout_secs,
            max_elements,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Fetches raw mosque and halal-food elements around `origin`.
    ///
    /// # Errors
    ///
    /// - [`OverpassError::Timeout`]: the request exceeded the client timeout.
    /// - [`OverpassError::Http`]: network or TLS failure.
    /// - [`OverpassError::UnexpectedStatus`]: any non-2xx status.
    /// - [`OverpassError::Deserialize`]: response body is not Overpass JSON.
    pub async fn fetch_elements(
        &self,
        origin: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<OverpassElement>, OverpassError> {
        let query = build_query(origin, radius_meters, self.timeout_secs, self.max_elements);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &body));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        let parsed = serde_json::from_slice::<OverpassResponse>(&body)
            .map_err(|source| OverpassError::Deserialize { source })?;

        Ok(parsed.elements)
    }

    /// Fetches and normalizes places around `origin`.
    ///
    /// Elements without coordinates are dropped; distances are measured from
    /// `origin`.
    ///
    /// # Errors
    ///
    /// Same as [`OverpassClient::fetch_elements`].
    pub async fn fetch_places(
        &self,
        origin: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<PlaceRecord>, OverpassError> {
        let elements = self.fetch_elements(origin, radius_meters).await?;
        Ok(normalize_elements(&elements, origin))
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, OverpassError> {
    let url = Url::parse(endpoint).map_err(|e| OverpassError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(OverpassError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: format!("unsupported scheme \"{}\"", url.scheme()),
        });
    }

    Ok(url)
}

fn map_transport_error(error: reqwest::Error) -> OverpassError {
    if error.is_timeout() {
        OverpassError::Timeout(error.to_string())
    } else {
        OverpassError::Http(error)
    }
}

fn map_status_error(status: StatusCode, body: &str) -> OverpassError {
    if matches!(
        status,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT
    ) {
        return OverpassError::Timeout(format!("status {}", status.as_u16()));
    }

    OverpassError::UnexpectedStatus {
        status: status.as_u16(),
        body_preview: body_preview(body),
    }
}

fn body_preview(body: &str) -> String {
    let compact = body.split_whitespace().collect::<Vec<_>>().join(" ");
    let preview: String = compact.chars().take(BODY_PREVIEW_CHARS).collect();
    if compact.chars().count() > BODY_PREVIEW_CHARS {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
