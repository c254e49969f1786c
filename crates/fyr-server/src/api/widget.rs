//! Server-rendered widget: the form on `GET /`, a completed lookup on
//! `POST /lookup`.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use fyr_core::{render, template::FORM_TEMPLATE};
use fyr_widget::{HtmlSurface, Widget};
use serde::Deserialize;

use super::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct LookupForm {
    #[serde(default)]
    address: String,
}

pub(super) async fn show_form(State(state): State<AppState>) -> Html<String> {
    Html(render(FORM_TEMPLATE, &state.widget_config.form_context()))
}

pub(super) async fn submit_lookup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LookupForm>,
) -> Response {
    let address = form.address.trim();
    if address.is_empty() {
        let html = render(FORM_TEMPLATE, &state.widget_config.form_context());
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response();
    }

    let page_scheme = state.page_scheme_for(&headers);
    let widget = Widget::new(
        state.widget_config.as_ref().clone(),
        state.geocoder.clone(),
        state.sunlight.clone(),
        HtmlSurface::new(),
        page_scheme,
    );
    let reports = widget.submit(address).await;
    tracing::debug!(?reports, %page_scheme, "widget lookup complete");

    Html(widget.inspect(HtmlSurface::html).await).into_response()
}
