//! Address geocoding over Google or OpenStreetMap (Nominatim).

use std::future::Future;
use std::time::Duration;

use fyr_core::{Address, GeocodeResult, GeocoderProvider};
use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::types::{GoogleResponse, NominatimPlace};

const GOOGLE_BASE_URL: &str = "https://maps.googleapis.com/";
const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// Resolves a free-text address to coordinates.
///
/// Implementations never fail: any error resolves to
/// [`GeocodeResult::default`], and only the first match is used.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> impl Future<Output = GeocodeResult> + Send;
}

/// Geocode text addresses; pass known coordinates straight through.
pub async fn resolve_address<G: Geocoder>(geocoder: &G, address: &Address) -> GeocodeResult {
    match address {
        Address::Coordinates(coords) => *coords,
        Address::Text(text) => geocoder.geocode(text).await,
    }
}

/// HTTP geocoder for the configured [`GeocoderProvider`].
#[derive(Clone)]
pub struct GeocoderClient {
    client: Client,
    provider: GeocoderProvider,
    api_key: Option<String>,
    base_url: Url,
}

impl GeocoderClient {
    /// Creates a geocoder pointed at the provider's production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        provider: GeocoderProvider,
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeocodeError> {
        let base_url = match provider {
            GeocoderProvider::Google => GOOGLE_BASE_URL,
            GeocoderProvider::OpenStreetMap => NOMINATIM_BASE_URL,
        };
        Self::with_base_url(provider, api_key, timeout_secs, user_agent, base_url)
    }

    /// Creates a geocoder with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`GeocodeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        provider: GeocoderProvider,
        api_key: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            provider,
            api_key: api_key.map(str::to_owned),
            base_url,
        })
    }

    #[must_use]
    pub fn provider(&self) -> GeocoderProvider {
        self.provider
    }

    /// Geocodes `address`, returning the first match.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or non-2xx status.
    /// - [`GeocodeError::Deserialize`] if the body does not match the
    ///   provider's response shape.
    /// - [`GeocodeError::Api`] if Google reports a non-OK status.
    /// - [`GeocodeError::NoResults`] if nothing matched.
    /// - [`GeocodeError::InvalidCoordinate`] if Nominatim returns a
    ///   non-numeric coordinate.
    pub async fn try_geocode(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        match self.provider {
            GeocoderProvider::Google => self.geocode_google(address).await,
            GeocoderProvider::OpenStreetMap => self.geocode_nominatim(address).await,
        }
    }

    async fn geocode_google(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        let mut url = self.join("maps/api/geocode/json")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("address", address);
            if let Some(key) = &self.api_key {
                pairs.append_pair("key", key);
            }
        }

        let body = self.request_text(&url).await?;
        let response: GoogleResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: "google geocode".to_string(),
                source: e,
            })?;

        match response.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => return Err(GeocodeError::NoResults),
            _ => {
                return Err(GeocodeError::Api {
                    message: response.error_message.unwrap_or_default(),
                    status: response.status.clone(),
                })
            }
        }

        let first = response
            .results
            .into_iter()
            .next()
            .ok_or(GeocodeError::NoResults)?;
        tracing::debug!(matched = ?first.formatted_address, "google geocode match");
        let location = first.geometry.location;
        Ok(GeocodeResult::new(location.lat, location.lng))
    }

    async fn geocode_nominatim(&self, address: &str) -> Result<GeocodeResult, GeocodeError> {
        let mut url = self.join("search")?;
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("format", "json")
            .append_pair("limit", "1");

        let body = self.request_text(&url).await?;
        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: "nominatim search".to_string(),
                source: e,
            })?;

        let first = places.into_iter().next().ok_or(GeocodeError::NoResults)?;
        tracing::debug!(matched = ?first.display_name, "nominatim geocode match");
        let latitude = parse_coordinate(&first.lat)?;
        let longitude = parse_coordinate(&first.lon)?;
        Ok(GeocodeResult::new(latitude, longitude))
    }

    fn join(&self, path: &str) -> Result<Url, GeocodeError> {
        self.base_url
            .join(path)
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn request_text(&self, url: &Url) -> Result<String, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

impl Geocoder for GeocoderClient {
    async fn geocode(&self, address: &str) -> GeocodeResult {
        match self.try_geocode(address).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(
                    geocoder = %self.provider,
                    error = %e,
                    "geocoding failed; continuing with empty coordinates"
                );
                GeocodeResult::default()
            }
        }
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| GeocodeError::InvalidCoordinate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedGeocoder;

    impl Geocoder for FixedGeocoder {
        async fn geocode(&self, _address: &str) -> GeocodeResult {
            GeocodeResult::new(10.0, 20.0)
        }
    }

    #[test]
    fn parse_coordinate_accepts_decimal_strings() {
        assert!((parse_coordinate(" 39.9612 ").unwrap() - 39.9612).abs() < f64::EPSILON);
        assert!(matches!(
            parse_coordinate("north"),
            Err(GeocodeError::InvalidCoordinate(ref s)) if s == "north"
        ));
    }

    #[tokio::test]
    async fn resolve_address_passes_coordinates_through() {
        let known = GeocodeResult::new(1.5, -2.5);
        let resolved = resolve_address(&FixedGeocoder, &Address::Coordinates(known)).await;
        assert_eq!(resolved, known);
    }

    #[tokio::test]
    async fn resolve_address_geocodes_text() {
        let resolved = resolve_address(&FixedGeocoder, &Address::from("1 Main St")).await;
        assert_eq!(resolved, GeocodeResult::new(10.0, 20.0));
    }
}
