//! Command handlers for `form` and `lookup`.

use anyhow::Context;
use fyr_core::{
    render, template::FORM_TEMPLATE, Address, AppConfig, GeocodeResult, PageScheme, WidgetConfig,
    WidgetOptions,
};
use fyr_geocode::{Geocoder, GeocoderClient};
use fyr_sunlight::{LegislatorSource, SunlightClient};
use fyr_widget::{lookup_sections, HtmlSurface, ProviderSection, Widget};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LookupOutput {
    location: GeocodeResult,
    sections: Vec<ProviderSection>,
}

/// Widget options from the environment with command line overrides applied.
pub(crate) fn widget_config(
    config: &AppConfig,
    apikey: Option<String>,
    apis: Option<String>,
) -> anyhow::Result<WidgetConfig> {
    let mut options = WidgetOptions::from_app_config(config);
    if apikey.is_some() {
        options.apikey = apikey;
    }
    if apis.is_some() {
        options.apis = apis;
    }
    WidgetConfig::from_options(options).context("invalid widget options (check --apikey / --apis)")
}

pub(crate) fn address_from_args(
    address: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
) -> anyhow::Result<Address> {
    match (address, lat, lon) {
        (Some(text), _, _) if !text.trim().is_empty() => Ok(Address::Text(text)),
        (_, Some(lat), Some(lon)) => Ok(Address::Coordinates(GeocodeResult::new(lat, lon))),
        _ => anyhow::bail!("provide --address or both --lat and --lon"),
    }
}

pub(crate) fn run_form(widget_config: &WidgetConfig) -> String {
    render(FORM_TEMPLATE, &widget_config.form_context())
}

/// Run one lookup against the live services.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be built or the JSON output
/// cannot be serialized.
pub(crate) async fn run_lookup(
    config: &AppConfig,
    widget_config: WidgetConfig,
    address: Address,
    page_scheme: PageScheme,
    json: bool,
) -> anyhow::Result<String> {
    let geocoder = GeocoderClient::new(
        config.geocoder,
        config.geocoder_api_key.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let source = SunlightClient::new(
        &widget_config.api_key,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    render_lookup(geocoder, source, widget_config, address, page_scheme, json).await
}

pub(crate) async fn render_lookup<G, L>(
    geocoder: G,
    source: L,
    widget_config: WidgetConfig,
    address: Address,
    page_scheme: PageScheme,
    json: bool,
) -> anyhow::Result<String>
where
    G: Geocoder,
    L: LegislatorSource,
{
    if json {
        let (location, sections) =
            lookup_sections(&geocoder, &source, &widget_config, &address, page_scheme).await;
        return Ok(serde_json::to_string_pretty(&LookupOutput { location, sections })?);
    }

    let widget = Widget::new(
        widget_config,
        geocoder,
        source,
        HtmlSurface::new(),
        page_scheme,
    );
    let reports = widget.submit(address).await;
    for report in &reports {
        tracing::info!(provider = %report.provider, outcome = ?report.outcome, "section");
    }
    Ok(widget.inspect(HtmlSurface::html).await)
}
