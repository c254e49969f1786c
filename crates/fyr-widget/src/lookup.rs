//! Provider payload → ordered display records, shared by the widget and the
//! surface-less JSON lookup.

use fyr_core::{
    normalize, order_for_display, Address, DisplayRecord, GeocodeResult, PageScheme, ProviderId,
    WidgetConfig,
};
use fyr_geocode::{resolve_address, Geocoder};
use fyr_sunlight::{extract_results, LegislatorSource, ResultSet, SunlightError};
use futures::future::join_all;
use serde::Serialize;

/// What a single provider response turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionContent {
    /// Normalized records, upper chambers first.
    Records(Vec<DisplayRecord>),
    NoResults,
}

/// Extract, normalize and order the records in one provider payload.
#[must_use]
pub fn prepare_section(provider: ProviderId, payload: serde_json::Value) -> SectionContent {
    match extract_results(payload) {
        ResultSet::Empty => SectionContent::NoResults,
        ResultSet::Records(raw) => {
            let mut records: Vec<DisplayRecord> =
                raw.iter().map(|rep| normalize(rep, provider)).collect();
            order_for_display(&mut records);
            SectionContent::Records(records)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Ok,
    NoResults,
    Failed,
}

/// One provider's outcome for the JSON lookup.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderSection {
    pub provider: ProviderId,
    pub status: SectionStatus,
    pub records: Vec<DisplayRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProviderSection {
    fn from_result(
        provider: ProviderId,
        result: Result<serde_json::Value, SunlightError>,
    ) -> Self {
        match result {
            Ok(payload) => match prepare_section(provider, payload) {
                SectionContent::Records(records) => Self {
                    provider,
                    status: SectionStatus::Ok,
                    records,
                    error: None,
                },
                SectionContent::NoResults => Self {
                    provider,
                    status: SectionStatus::NoResults,
                    records: Vec::new(),
                    error: None,
                },
            },
            Err(e) => {
                tracing::warn!(provider = %provider, error = %e, "provider lookup failed");
                Self {
                    provider,
                    status: SectionStatus::Failed,
                    records: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Resolve `address` and query every configured provider concurrently,
/// returning the resolved location and one section per provider in
/// configuration order.
pub async fn lookup_sections<G, L>(
    geocoder: &G,
    source: &L,
    config: &WidgetConfig,
    address: &Address,
    page_scheme: PageScheme,
) -> (GeocodeResult, Vec<ProviderSection>)
where
    G: Geocoder,
    L: LegislatorSource,
{
    let location = resolve_address(geocoder, address).await;
    let lookups = config
        .providers
        .iter()
        .map(|&provider| lookup_section(source, provider, location, page_scheme));
    let sections = join_all(lookups).await;
    (location, sections)
}

async fn lookup_section<L: LegislatorSource>(
    source: &L,
    provider: ProviderId,
    location: GeocodeResult,
    page_scheme: PageScheme,
) -> ProviderSection {
    let result = source.lookup(provider, location, page_scheme).await;
    ProviderSection::from_result(provider, result)
}
