use super::*;

fn test_client() -> SunlightClient {
    SunlightClient::with_base_urls(
        "test-key",
        30,
        "fyr-test",
        "https://congress.example.com",
        "http://openstates.example.com/api/v1/",
    )
    .expect("client construction should not fail")
}

#[test]
fn congress_url_carries_key_and_coordinates() {
    let client = test_client();
    let url = client
        .build_url(
            &client.congress_base,
            CONGRESS_LOCATE_PATH,
            &[("latitude", "39.96"), ("longitude", "-83.0")],
        )
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://congress.example.com/legislators/locate?apikey=test-key&latitude=39.96&longitude=-83.0"
    );
}

#[test]
fn openstates_url_keeps_base_path() {
    let client = test_client();
    let url = client
        .build_url(
            &client.openstates_base,
            OPENSTATES_GEO_PATH,
            &[("lat", "1"), ("long", "2")],
        )
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://openstates.example.com/api/v1/legislators/geo/?apikey=test-key&lat=1&long=2"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = SunlightClient::with_base_urls("k", 30, "ua", "not a url", "http://ok.example");
    assert!(matches!(
        result,
        Err(SunlightError::InvalidBaseUrl { ref url, .. }) if url == "not a url"
    ));
}

#[test]
fn missing_coordinates_become_empty_params() {
    assert_eq!(coordinate(None), "");
    assert_eq!(coordinate(Some(-83.5)), "-83.5");
}

#[tokio::test]
async fn openstates_refuses_secure_pages() {
    let client = test_client();
    let err = client
        .openstates(GeocodeResult::new(1.0, 2.0), PageScheme::Https)
        .await
        .unwrap_err();
    assert!(matches!(err, SunlightError::InsecureTransport(_)));
    assert!(err.to_string().contains("does not support HTTPS"));
}
