use serde::{Deserialize, Serialize};

/// Coordinates resolved for an address.
///
/// Both fields are `None` when geocoding failed; the empty record still flows
/// downstream and renders as blank fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeocodeResult {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.latitude.is_none() && self.longitude.is_none()
    }
}

/// Input to a lookup: free text that still needs geocoding, or coordinates
/// that are already known.
#[derive(Debug, Clone, PartialEq)]
pub enum Address {
    Text(String),
    Coordinates(GeocodeResult),
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Address::Text(value.to_string())
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Address::Text(value)
    }
}

impl From<GeocodeResult> for Address {
    fn from(value: GeocodeResult) -> Self {
        Address::Coordinates(value)
    }
}

/// The common shape every provider record is normalized into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub name: String,
    pub details: String,
    pub photo_url: String,
    pub result_url: String,
    /// Raw chamber value from the provider (`senate`, `house`, `upper`, `lower`).
    /// Used for ordering only; never rendered.
    pub chamber: String,
}
