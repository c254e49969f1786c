//! Widget configuration: the options a host supplies and the validated
//! [`WidgetConfig`] threaded through every widget operation.

use serde::Deserialize;

use crate::app_config::AppConfig;
use crate::provider::ProviderId;
use crate::template::TemplateContext;
use crate::CoreError;

pub const DEFAULT_TITLE: &str = "Find Your Representatives";
pub const DEFAULT_APIS: &str = "congress, openstates";
pub const DEFAULT_TEXT: &str = "Enter your address to see who represents you.";
pub const DEFAULT_ACTION: &str = "Go!";

/// Options as supplied by the host. Only `apikey` is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WidgetOptions {
    pub apikey: Option<String>,
    pub apis: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub action: Option<String>,
}

impl WidgetOptions {
    /// Widget defaults taken from the service configuration.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            apikey: config.sunlight_api_key.clone(),
            apis: Some(config.apis.clone()),
            title: config.title.clone(),
            text: config.text.clone(),
            action: config.action.clone(),
        }
    }
}

/// Validated, immutable configuration for one widget instance.
#[derive(Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub api_key: String,
    pub providers: Vec<ProviderId>,
    /// The provider list exactly as configured; echoed into the form markup.
    pub apis: String,
    pub title: String,
    pub text: String,
    pub action: String,
}

impl std::fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("api_key", &"[redacted]")
            .field("providers", &self.providers)
            .field("apis", &self.apis)
            .field("title", &self.title)
            .field("text", &self.text)
            .field("action", &self.action)
            .finish()
    }
}

impl WidgetConfig {
    /// Validate `options` and fill in defaults.
    ///
    /// The `apis` list is split on `,` followed by at most one space. Unknown
    /// provider ids are logged and skipped; repeated ids keep their first
    /// position.
    ///
    /// # Errors
    ///
    /// - [`CoreError::MissingApiKey`] if `apikey` is absent or blank.
    /// - [`CoreError::NoProviders`] if no known provider remains.
    pub fn from_options(options: WidgetOptions) -> Result<Self, CoreError> {
        let api_key = options
            .apikey
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(CoreError::MissingApiKey)?;

        let apis = options.apis.unwrap_or_else(|| DEFAULT_APIS.to_string());
        let providers = parse_providers(&apis);
        if providers.is_empty() {
            return Err(CoreError::NoProviders);
        }

        Ok(Self {
            api_key,
            providers,
            apis,
            title: options.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            text: options.text.unwrap_or_else(|| DEFAULT_TEXT.to_string()),
            action: options.action.unwrap_or_else(|| DEFAULT_ACTION.to_string()),
        })
    }

    /// Context for the form template. The api key is never part of it.
    #[must_use]
    pub fn form_context(&self) -> TemplateContext {
        TemplateContext::new()
            .with("title", self.title.as_str())
            .with("apis", self.apis.as_str())
            .with("text", self.text.as_str())
            .with("action", self.action.as_str())
    }
}

fn parse_providers(apis: &str) -> Vec<ProviderId> {
    let mut providers = Vec::new();
    for raw in apis.split(',') {
        let id = raw.strip_prefix(' ').unwrap_or(raw);
        match id.parse::<ProviderId>() {
            Ok(provider) if !providers.contains(&provider) => providers.push(provider),
            Ok(_) => {}
            Err(e) => tracing::warn!(provider = id, error = %e, "skipping unknown provider"),
        }
    }
    providers
}
