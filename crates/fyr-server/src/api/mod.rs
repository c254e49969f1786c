mod representatives;
mod widget;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use fyr_core::{AppConfig, GeocoderProvider, PageScheme, ProviderId, WidgetConfig, WidgetOptions};
use fyr_geocode::GeocoderClient;
use fyr_sunlight::SunlightClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub geocoder: GeocoderClient,
    pub sunlight: SunlightClient,
    pub widget_config: Arc<WidgetConfig>,
    /// Scheme assumed for the hosting page when no proxy header says otherwise.
    pub page_scheme: PageScheme,
}

impl AppState {
    /// Builds the widget configuration and HTTP clients from service config.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let widget_config = WidgetConfig::from_options(WidgetOptions::from_app_config(config))
            .context("SUNLIGHT_API_KEY and FYR_APIS must describe a usable widget")?;
        let geocoder = GeocoderClient::new(
            config.geocoder,
            config.geocoder_api_key.as_deref(),
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        let sunlight = SunlightClient::new(
            &widget_config.api_key,
            config.request_timeout_secs,
            &config.user_agent,
        )?;

        Ok(Self {
            geocoder,
            sunlight,
            widget_config: Arc::new(widget_config),
            page_scheme: config.page_scheme,
        })
    }

    /// The hosting page's scheme: `x-forwarded-proto` when present and
    /// recognised, otherwise the configured default.
    fn page_scheme_for(&self, headers: &HeaderMap) -> PageScheme {
        headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<PageScheme>().ok())
            .unwrap_or(self.page_scheme)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    geocoder: GeocoderProvider,
    providers: Vec<ProviderId>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(widget::show_form))
        .route("/lookup", post(widget::submit_lookup))
        .route(
            "/api/v1/representatives",
            get(representatives::list_representatives),
        )
        .route("/api/v1/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            geocoder: state.geocoder.provider(),
            providers: state.widget_config.providers.clone(),
        },
        meta: ResponseMeta::new(req_id.0),
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::MockApis;
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    #[test]
    fn api_error_validation_error_maps_to_bad_request() {
        let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_unknown_code_maps_to_internal_error() {
        let response = ApiError::new("req-1", "internal_error", "boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn page_scheme_prefers_forwarded_proto() {
        let apis = MockApis::start().await;
        let state = apis.state("congress", PageScheme::Http);

        let mut headers = HeaderMap::new();
        assert_eq!(state.page_scheme_for(&headers), PageScheme::Http);

        headers.insert("x-forwarded-proto", "https, http".parse().expect("header"));
        assert_eq!(state.page_scheme_for(&headers), PageScheme::Https);

        headers.insert("x-forwarded-proto", "gopher".parse().expect("header"));
        assert_eq!(state.page_scheme_for(&headers), PageScheme::Http);
    }

    #[tokio::test]
    async fn health_reports_configured_providers() {
        let apis = MockApis::start().await;
        let app = build_app(apis.state("openstates, congress", PageScheme::Http));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("x-request-id").map(|v| v.as_bytes()),
            Some(&b"req-health"[..])
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["geocoder"], "openstreetmap");
        assert_eq!(
            json["data"]["providers"],
            serde_json::json!(["openstates", "congress"])
        );
        assert_eq!(json["meta"]["request_id"], "req-health");
    }

    #[tokio::test]
    async fn responses_carry_generated_request_id() {
        let apis = MockApis::start().await;
        let app = build_app(apis.state("congress", PageScheme::Http));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        let id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .expect("request id header");
        assert!(uuid::Uuid::parse_str(id).is_ok(), "not a uuid: {id}");
    }
}
