//! The widget state machine: form → querying → fetching → results, with a
//! reset back to the form from any state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use fyr_core::template::{FORM_TEMPLATE, NO_RESULTS_ITEM, RESULTS_TEMPLATE, RESULT_TEMPLATE};
use fyr_core::{render, Address, GeocodeResult, PageScheme, ProviderId, TemplateContext, WidgetConfig};
use fyr_geocode::{resolve_address, Geocoder};
use fyr_sunlight::{LegislatorSource, SunlightError};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::lookup::{prepare_section, SectionContent};
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetState {
    Form,
    Querying,
    Fetching,
    Results,
}

/// What happened to one provider's section during a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum SectionOutcome {
    /// This many result items were appended.
    Rendered(usize),
    /// The single "No results found." item was appended.
    NoResults,
    /// The lookup failed; the section stays hidden.
    Failed(String),
    /// The response arrived after a reset and was dropped.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub provider: ProviderId,
    pub outcome: SectionOutcome,
}

struct View<S> {
    surface: S,
    state: WidgetState,
}

struct Inner<G, L, S> {
    config: WidgetConfig,
    geocoder: G,
    source: L,
    page_scheme: PageScheme,
    /// Bumped by every submit and reset; responses tagged with an older
    /// value are stale.
    epoch: AtomicU64,
    view: Mutex<View<S>>,
}

/// One widget instance bound to a [`Surface`].
///
/// Cloning is cheap and shares the instance, so a reset may be issued from a
/// different task than the one awaiting [`Widget::submit`].
pub struct Widget<G, L, S> {
    inner: Arc<Inner<G, L, S>>,
}

impl<G, L, S> Clone for Widget<G, L, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G, L, S> Widget<G, L, S>
where
    G: Geocoder,
    L: LegislatorSource,
    S: Surface,
{
    /// Bind a widget to `surface` and render the form into it.
    pub fn new(
        config: WidgetConfig,
        geocoder: G,
        source: L,
        mut surface: S,
        page_scheme: PageScheme,
    ) -> Self {
        surface.show_form(render(FORM_TEMPLATE, &config.form_context()));
        Self {
            inner: Arc::new(Inner {
                config,
                geocoder,
                source,
                page_scheme,
                epoch: AtomicU64::new(0),
                view: Mutex::new(View {
                    surface,
                    state: WidgetState::Form,
                }),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn page_scheme(&self) -> PageScheme {
        self.inner.page_scheme
    }

    pub async fn state(&self) -> WidgetState {
        self.inner.view.lock().await.state
    }

    /// Run `f` against the surface while holding the view lock.
    pub async fn inspect<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let view = self.inner.view.lock().await;
        f(&view.surface)
    }

    /// Look up the representatives for `address` and render each provider's
    /// section as its response arrives.
    ///
    /// Returns one report per configured provider, in configuration order.
    pub async fn submit(&self, address: impl Into<Address>) -> Vec<SectionReport> {
        let address = address.into();
        let epoch = {
            let mut view = self.inner.view.lock().await;
            let epoch = self.inner.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            view.state = WidgetState::Querying;
            view.surface
                .show_results_shell(render(RESULTS_TEMPLATE, &TemplateContext::new()));
            epoch
        };

        let location = resolve_address(&self.inner.geocoder, &address).await;
        {
            let mut view = self.inner.view.lock().await;
            if self.is_stale(epoch) {
                tracing::debug!(epoch, "submission reset before lookups started");
                return self.discard_all();
            }
            view.state = WidgetState::Fetching;
        }
        tracing::debug!(
            latitude = ?location.latitude,
            longitude = ?location.longitude,
            providers = self.inner.config.providers.len(),
            "querying providers"
        );

        let mut pending = FuturesUnordered::new();
        for &provider in &self.inner.config.providers {
            pending.push(self.lookup_one(provider, location));
        }

        let mut reports = Vec::with_capacity(self.inner.config.providers.len());
        while let Some((provider, result)) = pending.next().await {
            let outcome = self.apply(epoch, provider, result).await;
            reports.push(SectionReport { provider, outcome });
        }
        reports.sort_by_key(|report| self.position(report.provider));
        reports
    }

    /// Abandon any in-flight submission and show the form again.
    pub async fn reset(&self) {
        let mut view = self.inner.view.lock().await;
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        view.surface
            .show_form(render(FORM_TEMPLATE, &self.inner.config.form_context()));
        view.state = WidgetState::Form;
    }

    async fn lookup_one(
        &self,
        provider: ProviderId,
        location: GeocodeResult,
    ) -> (ProviderId, Result<serde_json::Value, SunlightError>) {
        let result = self
            .inner
            .source
            .lookup(provider, location, self.inner.page_scheme)
            .await;
        (provider, result)
    }

    async fn apply(
        &self,
        epoch: u64,
        provider: ProviderId,
        result: Result<serde_json::Value, SunlightError>,
    ) -> SectionOutcome {
        let mut view = self.inner.view.lock().await;
        if self.is_stale(epoch) {
            tracing::debug!(provider = %provider, epoch, "discarding response after reset");
            return SectionOutcome::Discarded;
        }

        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(provider = %provider, error = %e, "provider lookup failed");
                return SectionOutcome::Failed(e.to_string());
            }
        };

        view.state = WidgetState::Results;
        match prepare_section(provider, payload) {
            SectionContent::NoResults => {
                view.surface
                    .append_to_section(provider, NO_RESULTS_ITEM.to_string());
                SectionOutcome::NoResults
            }
            SectionContent::Records(records) => {
                for record in &records {
                    let item = render(RESULT_TEMPLATE, &TemplateContext::from(record));
                    view.surface.append_to_section(provider, item);
                }
                SectionOutcome::Rendered(records.len())
            }
        }
    }

    fn is_stale(&self, epoch: u64) -> bool {
        self.inner.epoch.load(Ordering::SeqCst) != epoch
    }

    fn discard_all(&self) -> Vec<SectionReport> {
        self.inner
            .config
            .providers
            .iter()
            .map(|&provider| SectionReport {
                provider,
                outcome: SectionOutcome::Discarded,
            })
            .collect()
    }

    fn position(&self, provider: ProviderId) -> usize {
        self.inner
            .config
            .providers
            .iter()
            .position(|&p| p == provider)
            .unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;
