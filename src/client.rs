/// HTTP client for the percolator tagging backend.
///
/// This module provides `PercolateClient` for making synchronous HTTP
/// requests to the tagging service, along with error types and a builder
/// for configuration. Both transports of the tagging endpoint live here:
/// the JSON body for direct text tagging and the multipart form for the
/// generalized three-mode flow.
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::form::{FormState, InputMode};
use crate::response::{DomainListing, TaggingResponse};

/// Errors that can occur when talking to the tagging backend.
#[derive(Debug, Error)]
pub enum PercolateError {
    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// HTTP errors with status code
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// Response body could not be decoded as the expected JSON shape
    #[error("Decoding error: {0}")]
    Decode(#[source] reqwest::Error),

    /// Invalid base URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The file chosen for upload could not be read
    #[error("File attachment error: {0}")]
    File(#[source] std::io::Error),

    /// The form is not submittable in its current state
    #[error("Invalid form: {0}")]
    Form(String),
}

/// JSON payload for the direct text transport of `POST /tag`.
///
/// `domains` is the comma-joined selected domain list, possibly empty
/// (empty means the backend applies no domain filter). `constant_score`
/// disables relevance scoring; the client requests scoring exactly when
/// score display is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagTextRequest {
    pub domains: String,
    pub constant_score: bool,
    pub text: String,
}

impl TagTextRequest {
    /// Builds the payload from the current form state.
    ///
    /// The form must be in text mode; this is the transport for the direct
    /// text path only.
    pub fn from_form(form: &FormState) -> Result<Self, PercolateError> {
        if form.mode() != InputMode::Text {
            return Err(PercolateError::Form(
                "text transport requires text mode".to_string(),
            ));
        }
        Ok(Self {
            domains: form.joined_domains(),
            constant_score: !form.score_display(),
            text: form.text().to_string(),
        })
    }
}

/// Builder for constructing `PercolateClient` instances.
///
/// # Examples
///
/// ```
/// use percolate::client::PercolateClientBuilder;
///
/// let client = PercolateClientBuilder::new()
///     .base_url("http://localhost:8080")
///     .build()
///     .expect("Failed to create client");
/// assert_eq!(client.base_url(), "http://localhost:8080");
/// ```
#[derive(Debug, Default)]
pub struct PercolateClientBuilder {
    base_url: Option<String>,
}

impl PercolateClientBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL of the tagging backend.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the `PercolateClient` with the configured settings.
    ///
    /// If `base_url()` was not called, the `PERCOLATE_URL` environment
    /// variable is consulted, and `http://localhost:8080` is the final
    /// fallback.
    ///
    /// # Errors
    ///
    /// Returns `PercolateError::InvalidUrl` when the resolved URL does not
    /// parse, or `PercolateError::Network` when the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<PercolateClient, PercolateError> {
        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            std::env::var("PERCOLATE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string())
        };

        reqwest::Url::parse(&base_url)
            .map_err(|e| PercolateError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(PercolateError::Network)?;

        Ok(PercolateClient { client, base_url })
    }
}

/// Synchronous HTTP client for the tagging backend.
///
/// Cheap to clone; clones share the underlying connection pool, which is
/// what the TUI relies on to dispatch requests from worker threads.
#[derive(Debug, Clone)]
pub struct PercolateClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl PercolateClient {
    /// Returns the base URL configured for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Tags inline text via the JSON transport (`POST /tag`).
    pub fn tag_text(&self, request: &TagTextRequest) -> Result<TaggingResponse, PercolateError> {
        let url = format!("{}/tag", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(PercolateError::Network)?;
        decode(response)
    }

    /// Tags the full form via the multipart transport (`POST /tag/form`).
    ///
    /// Serializes the selected domains as a comma-joined field plus the
    /// active mode's source field: `textSource`, `fileSource` (the file's
    /// contents), or `urlSource`.
    pub fn tag_form(&self, form: &FormState) -> Result<TaggingResponse, PercolateError> {
        let mut multipart = reqwest::blocking::multipart::Form::new()
            .text("domains", form.joined_domains())
            .text("constant_score", (!form.score_display()).to_string());

        multipart = match form.mode() {
            InputMode::Text => multipart.text("textSource", form.text().to_string()),
            InputMode::Url => multipart.text("urlSource", form.url().to_string()),
            InputMode::File => {
                let path = form
                    .file()
                    .ok_or_else(|| PercolateError::Form("no file chosen".to_string()))?;
                multipart
                    .file("fileSource", path)
                    .map_err(PercolateError::File)?
            }
        };

        let url = format!("{}/tag/form", self.base_url);
        let response = self
            .client
            .post(&url)
            .multipart(multipart)
            .send()
            .map_err(PercolateError::Network)?;
        decode(response)
    }

    /// Fetches the detail record for a single tag (`GET /taxa`).
    ///
    /// `field` is the domain-specific lookup field (e.g. `scientific_name`
    /// for `speciesplus`); `label` is the tag's displayed label. The raw
    /// JSON record is returned; tooltip composition happens in
    /// [`crate::response::compose_tooltip`].
    pub fn fetch_taxa(
        &self,
        domain: &str,
        field: &str,
        label: &str,
    ) -> Result<serde_json::Value, PercolateError> {
        let request = self.taxa_request(domain, field, label)?;
        let response = self
            .client
            .execute(request)
            .map_err(PercolateError::Network)?;
        decode(response)
    }

    /// Builds the `GET /taxa` request without sending it.
    ///
    /// The lookup field name is a query key, so it is serialized alongside
    /// `domain` rather than as a fixed parameter.
    fn taxa_request(
        &self,
        domain: &str,
        field: &str,
        label: &str,
    ) -> Result<reqwest::blocking::Request, PercolateError> {
        let url = format!("{}/taxa", self.base_url);
        self.client
            .get(&url)
            .query(&[("domain", domain), (field, label)])
            .build()
            .map_err(PercolateError::Network)
    }

    /// Lists the backend's tag domains (`GET /domains`).
    pub fn list_domains(&self) -> Result<DomainListing, PercolateError> {
        let url = format!("{}/domains", self.base_url);
        let response = self.client.get(&url).send().map_err(PercolateError::Network)?;
        decode(response)
    }
}

/// Checks the status and decodes a JSON response body.
fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::blocking::Response,
) -> Result<T, PercolateError> {
    let status = response.status();
    if !status.is_success() {
        return Err(PercolateError::Http {
            status: status.as_u16(),
        });
    }
    response.json().map_err(PercolateError::Decode)
}
