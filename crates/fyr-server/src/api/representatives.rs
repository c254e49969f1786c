use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Extension, Json,
};
use fyr_core::{Address, GeocodeResult, WidgetConfig, WidgetOptions};
use fyr_widget::{lookup_sections, ProviderSection};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct RepresentativesQuery {
    address: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    /// Overrides the configured provider list for this request.
    apis: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct RepresentativesData {
    location: GeocodeResult,
    sections: Vec<ProviderSection>,
}

pub(super) async fn list_representatives(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    Query(query): Query<RepresentativesQuery>,
) -> Result<Json<ApiResponse<RepresentativesData>>, ApiError> {
    let address = address_from_query(&query).ok_or_else(|| {
        ApiError::new(
            req_id.0.clone(),
            "validation_error",
            "provide either address or both lat and lon",
        )
    })?;

    let config = match &query.apis {
        None => state.widget_config.as_ref().clone(),
        Some(apis) => WidgetConfig::from_options(WidgetOptions {
            apikey: Some(state.widget_config.api_key.clone()),
            apis: Some(apis.clone()),
            ..WidgetOptions::default()
        })
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?,
    };

    let page_scheme = state.page_scheme_for(&headers);
    let (location, sections) = lookup_sections(
        &state.geocoder,
        &state.sunlight,
        &config,
        &address,
        page_scheme,
    )
    .await;

    Ok(Json(ApiResponse {
        data: RepresentativesData { location, sections },
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn address_from_query(query: &RepresentativesQuery) -> Option<Address> {
    if let Some(text) = query.address.as_deref().map(str::trim) {
        if !text.is_empty() {
            return Some(Address::from(text));
        }
    }
    match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => Some(Address::Coordinates(GeocodeResult::new(lat, lon))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use fyr_core::PageScheme;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    use super::*;
    use crate::api::{build_app, test_support::MockApis};

    fn query(address: Option<&str>, lat: Option<f64>, lon: Option<f64>) -> RepresentativesQuery {
        RepresentativesQuery {
            address: address.map(str::to_string),
            lat,
            lon,
            apis: None,
        }
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, serde_json::from_slice(&body).expect("json parse"))
    }

    #[test]
    fn address_text_wins_over_coordinates() {
        let address = address_from_query(&query(Some(" 1 Main St "), Some(1.0), Some(2.0)));
        assert_eq!(address, Some(Address::from("1 Main St")));
    }

    #[test]
    fn coordinates_need_both_halves() {
        assert_eq!(
            address_from_query(&query(None, Some(1.0), Some(2.0))),
            Some(Address::Coordinates(GeocodeResult::new(1.0, 2.0)))
        );
        assert_eq!(address_from_query(&query(None, Some(1.0), None)), None);
        assert_eq!(address_from_query(&query(Some("  "), None, None)), None);
    }

    #[tokio::test]
    async fn missing_location_is_validation_error() {
        let apis = MockApis::start().await;
        let app = build_app(apis.state("congress", PageScheme::Http));

        let (status, json) = get_json(app, "/api/v1/representatives").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn unknown_apis_override_is_validation_error() {
        let apis = MockApis::start().await;
        let app = build_app(apis.state("congress", PageScheme::Http));

        let (status, json) =
            get_json(app, "/api/v1/representatives?lat=1&lon=2&apis=nonsense").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn coordinates_query_returns_sections() {
        let apis = MockApis::start().await;

        Mock::given(method("GET"))
            .and(path("/legislators/locate"))
            .and(query_param("latitude", "39.96"))
            .and(query_param("longitude", "-82.99"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    { "title": "Rep.", "first_name": "Sam", "last_name": "Smith",
                      "chamber": "house", "party": "R", "state": "OH", "district": 3 },
                    { "title": "Sen.", "first_name": "Jane", "last_name": "Doe",
                      "chamber": "senate", "party": "D", "state_name": "Ohio" }
                ]
            })))
            .expect(1)
            .mount(&apis.congress)
            .await;
        Mock::given(method("GET"))
            .and(path("/legislators/geo/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&apis.openstates)
            .await;

        let app = build_app(apis.state("congress, openstates", PageScheme::Http));
        let (status, json) =
            get_json(app, "/api/v1/representatives?lat=39.96&lon=-82.99").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["location"]["latitude"], 39.96);
        let sections = json["data"]["sections"].as_array().expect("sections");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0]["provider"], "congress");
        assert_eq!(sections[0]["status"], "ok");
        assert_eq!(sections[0]["records"][0]["name"], "Sen. Jane Doe");
        assert_eq!(sections[0]["records"][1]["details"], "Republican, OH-3");
        assert_eq!(sections[1]["provider"], "openstates");
        assert_eq!(sections[1]["status"], "no_results");
    }

    #[tokio::test]
    async fn forwarded_https_refuses_openstates() {
        let apis = MockApis::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&apis.openstates)
            .await;

        let app = build_app(apis.state("openstates", PageScheme::Http));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/representatives?lat=1&lon=2")
                    .header("x-forwarded-proto", "https")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["sections"][0]["status"], "failed");
        assert!(json["data"]["sections"][0]["error"]
            .as_str()
            .is_some_and(|e| e.contains("HTTPS")));
        apis.openstates.verify().await;
    }
}
