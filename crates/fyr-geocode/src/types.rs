//! Response types for the supported geocoding services.

use serde::Deserialize;

/// Google Geocoding API envelope.
#[derive(Debug, Deserialize)]
pub struct GoogleResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<GoogleResult>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleResult {
    pub geometry: GoogleGeometry,
    #[serde(default)]
    pub formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleGeometry {
    pub location: GoogleLatLng,
}

#[derive(Debug, Deserialize)]
pub struct GoogleLatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A single Nominatim search hit. Coordinates arrive as decimal strings.
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}
