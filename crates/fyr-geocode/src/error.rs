use thiserror::Error;

/// Failures inside a geocoding request.
///
/// These never escape [`crate::Geocoder::geocode`], which degrades to an
/// empty [`fyr_core::GeocodeResult`]; they are surfaced by
/// [`crate::GeocoderClient::try_geocode`] for callers that want the reason.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("geocoder returned status {status}: {message}")]
    Api { status: String, message: String },

    #[error("no geocoding results for address")]
    NoResults,

    #[error("unparseable coordinate '{0}'")]
    InvalidCoordinate(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
