use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Backing service used to turn a free-text address into coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocoderProvider {
    #[default]
    Google,
    OpenStreetMap,
}

impl std::fmt::Display for GeocoderProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocoderProvider::Google => write!(f, "google"),
            GeocoderProvider::OpenStreetMap => write!(f, "openstreetmap"),
        }
    }
}

impl std::str::FromStr for GeocoderProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(GeocoderProvider::Google),
            "openstreetmap" | "osm" | "nominatim" => Ok(GeocoderProvider::OpenStreetMap),
            other => Err(format!(
                "unknown geocoder '{other}' (expected google or openstreetmap)"
            )),
        }
    }
}

/// Transport of the page hosting the widget.
///
/// The Open States endpoint is only reachable over plain HTTP, so lookups
/// against it are refused when the host page itself was served over HTTPS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageScheme {
    #[default]
    Http,
    Https,
}

impl PageScheme {
    #[must_use]
    pub fn is_secure(self) -> bool {
        self == PageScheme::Https
    }
}

impl std::fmt::Display for PageScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageScheme::Http => write!(f, "http"),
            PageScheme::Https => write!(f, "https"),
        }
    }
}

impl std::str::FromStr for PageScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches(':').to_ascii_lowercase().as_str() {
            "http" => Ok(PageScheme::Http),
            "https" => Ok(PageScheme::Https),
            other => Err(format!("unknown page scheme '{other}' (expected http or https)")),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub sunlight_api_key: Option<String>,
    pub apis: String,
    pub title: Option<String>,
    pub text: Option<String>,
    pub action: Option<String>,
    pub geocoder: GeocoderProvider,
    pub geocoder_api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub page_scheme: PageScheme,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "sunlight_api_key",
                &self.sunlight_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("apis", &self.apis)
            .field("title", &self.title)
            .field("text", &self.text)
            .field("action", &self.action)
            .field("geocoder", &self.geocoder)
            .field(
                "geocoder_api_key",
                &self.geocoder_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_scheme", &self.page_scheme)
            .finish()
    }
}
