//! HTTP client for the Sunlight Congress and Open States legislator lookups.
//!
//! Wraps `reqwest` with API key handling and the Open States transport
//! policy. Responses are returned as raw JSON; record extraction lives in
//! [`crate::types`].

use std::future::Future;
use std::time::Duration;

use fyr_core::{GeocodeResult, PageScheme, ProviderId};
use reqwest::{Client, Url};

use crate::error::SunlightError;

const CONGRESS_BASE_URL: &str = "https://congress.api.sunlightfoundation.com/";
const OPENSTATES_BASE_URL: &str = "http://openstates.org/api/v1/";

const CONGRESS_LOCATE_PATH: &str = "legislators/locate";
const OPENSTATES_GEO_PATH: &str = "legislators/geo/";

const OPENSTATES_HTTPS_REFUSAL: &str =
    "Aborting Open States query--it does not support HTTPS; load the page over http to query state legislators";

/// A source of raw legislator payloads, one call per provider.
pub trait LegislatorSource: Send + Sync {
    /// Look up the legislators representing `location` at `provider`.
    ///
    /// `page_scheme` is the transport of the page hosting the widget.
    fn lookup(
        &self,
        provider: ProviderId,
        location: GeocodeResult,
        page_scheme: PageScheme,
    ) -> impl Future<Output = Result<serde_json::Value, SunlightError>> + Send;
}

/// Client for the Sunlight legislator lookup APIs.
///
/// Use [`SunlightClient::new`] for production or
/// [`SunlightClient::with_base_urls`] to point at mock servers in tests.
#[derive(Clone)]
pub struct SunlightClient {
    client: Client,
    api_key: String,
    congress_base: Url,
    openstates_base: Url,
}

impl SunlightClient {
    /// Creates a client pointed at the production endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`SunlightError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, SunlightError> {
        Self::with_base_urls(
            api_key,
            timeout_secs,
            user_agent,
            CONGRESS_BASE_URL,
            OPENSTATES_BASE_URL,
        )
    }

    /// Creates a client with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SunlightError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`SunlightError::InvalidBaseUrl`] if either base URL
    /// does not parse.
    pub fn with_base_urls(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        congress_base: &str,
        openstates_base: &str,
    ) -> Result<Self, SunlightError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            congress_base: parse_base_url(congress_base)?,
            openstates_base: parse_base_url(openstates_base)?,
        })
    }

    /// Federal legislators for a location (`legislators/locate`).
    ///
    /// # Errors
    ///
    /// - [`SunlightError::Http`] on network failure or non-2xx HTTP status.
    /// - [`SunlightError::Deserialize`] if the body is not JSON.
    pub async fn congress(&self, location: GeocodeResult) -> Result<serde_json::Value, SunlightError> {
        let url = self.build_url(
            &self.congress_base,
            CONGRESS_LOCATE_PATH,
            &[
                ("latitude", &coordinate(location.latitude)),
                ("longitude", &coordinate(location.longitude)),
            ],
        )?;
        self.request_json(&url).await
    }

    /// State legislators for a location (`legislators/geo/`).
    ///
    /// Open States only serves plain HTTP, so when the host page is on HTTPS
    /// the call is refused without touching the network.
    ///
    /// # Errors
    ///
    /// - [`SunlightError::InsecureTransport`] if `page_scheme` is HTTPS.
    /// - [`SunlightError::Http`] on network failure or non-2xx HTTP status.
    /// - [`SunlightError::Deserialize`] if the body is not JSON.
    pub async fn openstates(
        &self,
        location: GeocodeResult,
        page_scheme: PageScheme,
    ) -> Result<serde_json::Value, SunlightError> {
        if page_scheme.is_secure() {
            return Err(SunlightError::InsecureTransport(
                OPENSTATES_HTTPS_REFUSAL.to_string(),
            ));
        }
        let url = self.build_url(
            &self.openstates_base,
            OPENSTATES_GEO_PATH,
            &[
                ("lat", &coordinate(location.latitude)),
                ("long", &coordinate(location.longitude)),
            ],
        )?;
        self.request_json(&url).await
    }

    /// Joins `path` onto `base` and appends `apikey` plus `params` as
    /// percent-encoded query pairs.
    fn build_url(
        &self,
        base: &Url,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, SunlightError> {
        let mut url = base.join(path).map_err(|e| SunlightError::InvalidBaseUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apikey", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the body
    /// as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, SunlightError> {
        tracing::debug!(path = url.path(), "sunlight request");
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SunlightError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }
}

impl LegislatorSource for SunlightClient {
    async fn lookup(
        &self,
        provider: ProviderId,
        location: GeocodeResult,
        page_scheme: PageScheme,
    ) -> Result<serde_json::Value, SunlightError> {
        match provider {
            ProviderId::Congress => self.congress(location).await,
            ProviderId::OpenStates => self.openstates(location, page_scheme).await,
        }
    }
}

/// Ensures the base URL ends with exactly one slash so `Url::join` appends
/// to it rather than replacing its last segment.
fn parse_base_url(base_url: &str) -> Result<Url, SunlightError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| SunlightError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Missing coordinates are sent as empty parameters.
fn coordinate(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
