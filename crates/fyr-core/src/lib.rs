pub mod app_config;
pub mod config;
pub mod normalize;
pub mod ordering;
pub mod provider;
pub mod template;
pub mod types;
pub mod widget_config;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, GeocoderProvider, PageScheme};
pub use config::{load_app_config, load_app_config_from_env};
pub use normalize::{normalize, normalize_for};
pub use ordering::{compare_for_display, is_upper_chamber, order_for_display};
pub use provider::ProviderId;
pub use template::{render, TemplateContext};
pub use types::{Address, DisplayRecord, GeocodeResult};
pub use widget_config::{WidgetConfig, WidgetOptions};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised while building widget configuration or mapping provider data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("an api key is required to render the widget")]
    MissingApiKey,

    #[error("no known providers configured")]
    NoProviders,
}
