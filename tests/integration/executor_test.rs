//! Executor end-to-end tests: dotted-name routing, validation before
//! any network traffic, auth gating, automatic token refresh and
//! status-code mapping.

use serde_json::{json, Value};

use trakt::models::Country;
use trakt::oauth::Credentials;
use trakt::{CallContext, ClientConfig, Error, StatusKind};

use super::test_harness::{authed_client, mock_client, mock_client_with, MockTransport};

fn countries_fixture() -> Value {
    json!([
        {"name": "Australia", "code": "au"},
        {"name": "Poland", "code": "pl"},
    ])
}

#[test]
fn test_dotted_name_routing_variants() {
    let transport = MockTransport::new().route("countries/shows", countries_fixture(), 200);
    let client = mock_client(&transport);

    for name in ["countries", "get_countries", "countries.get_countries"] {
        let countries: Vec<Country> = client
            .run(name, CallContext::new().arg("type", "shows"))
            .unwrap_or_else(|e| panic!("{} should route: {}", name, e))
            .single()
            .unwrap();

        assert_eq!(countries.len(), 2, "route {}", name);
        assert_eq!(countries[0].code, "au");
    }
}

#[test]
fn test_unroutable_name_is_a_client_error() {
    let transport = MockTransport::new();
    let client = mock_client(&transport);

    let err = client
        .run::<Value>("count", CallContext::new().arg("type", "shows"))
        .unwrap_err();

    assert!(matches!(err, Error::Client(_)));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_ambiguous_name_is_a_client_error() {
    let transport = MockTransport::new();
    let client = mock_client(&transport);

    // movies, shows, lists and comments all register get_trending
    let err = client.run::<Value>("get_trending", CallContext::new()).unwrap_err();

    match err {
        Error::Client(msg) => assert!(msg.contains("ambiguous"), "got: {}", msg),
        other => panic!("expected Client error, got: {:?}", other),
    }
}

#[test]
fn test_countries_end_to_end() {
    let transport = MockTransport::new().route("countries/shows", countries_fixture(), 200);
    let client = mock_client(&transport);

    let countries = client.countries().get_countries("shows").unwrap();
    assert_eq!(countries[0].code, countries_fixture()[0]["code"].as_str().unwrap());

    let request = transport.last_request();
    assert_eq!(request.method, "GET");
    assert!(request.url.ends_with("countries/shows"));
    assert_eq!(
        request.headers.get("trakt-api-key").map(String::as_str),
        Some("client-id")
    );
    assert_eq!(
        request.headers.get("trakt-api-version").map(String::as_str),
        Some("2")
    );
}

#[test]
fn test_invalid_enum_rejected_before_any_network_call() {
    let transport = MockTransport::new().route("countries/.*", countries_fixture(), 200);
    let client = mock_client(&transport);

    let err = client.countries().get_countries("qwerty").unwrap_err();

    assert!(matches!(err, Error::Argument(_)));
    assert_eq!(transport.request_count(), 0, "validation must stop the call");
}

#[test]
fn test_missing_required_argument_rejected_before_any_network_call() {
    let transport = MockTransport::new().route(".*", json!([]), 200);
    let client = mock_client(&transport);

    let err = client
        .run::<Value>("countries", CallContext::new())
        .unwrap_err();

    assert!(matches!(err, Error::Argument(_)));
    assert_eq!(transport.request_count(), 0);
}

fn progress_fixture() -> Value {
    json!({
        "aired": 8,
        "completed": 6,
        "last_collected_at": "2015-03-21T19:03:58.000Z",
        "seasons": [{
            "number": 1,
            "aired": 8,
            "completed": 6,
            "episodes": [
                {"number": 1, "completed": true, "collected_at": "2015-03-21T19:03:58.000Z"},
                {"number": 2, "completed": false, "collected_at": null},
            ],
        }],
        "hidden_seasons": [{"number": 2, "ids": {"trakt": 3051}}],
        "last_episode": {"season": 1, "number": 6, "title": "Exposed", "ids": {"trakt": 211}},
        "next_episode": {},
    })
}

#[test]
fn test_auth_required_endpoint_without_credentials() {
    let transport = MockTransport::new().route("progress/collection", progress_fixture(), 200);
    let client = mock_client(&transport);

    let err = client
        .shows()
        .get_collection_progress(&1390u64, false, false, true)
        .unwrap_err();

    assert!(matches!(err, Error::NotAuthenticated));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_auth_required_endpoint_with_credentials() {
    let transport = MockTransport::new().route("progress/collection", progress_fixture(), 200);
    let client = authed_client(&transport);

    let progress = client
        .shows()
        .get_collection_progress(&1390u64, false, false, true)
        .unwrap();

    assert_eq!(progress.aired, 8);
    assert_eq!(progress.seasons[0].episodes.len(), 2);
    assert!(progress.next_episode.is_none(), "{{}} sentinel parses as None");

    let request = transport.last_request();
    assert_eq!(
        request.headers.get("Authorization").map(String::as_str),
        Some("Bearer access")
    );
    assert_eq!(request.query.get("hidden").map(String::as_str), Some("false"));
    assert_eq!(
        request.query.get("count_specials").map(String::as_str),
        Some("true")
    );
}

fn token_fixture(access: &str) -> Value {
    json!({
        "access_token": access,
        "refresh_token": "new-refresh",
        "token_type": "bearer",
        "expires_in": 7200,
        "scope": "public",
        "created_at": 1_500_000_000,
    })
}

#[test]
fn test_auto_refresh_disabled_leaves_credentials_alone() {
    let transport = MockTransport::new().route("countries/shows", countries_fixture(), 200);
    let expiring = Credentials::new("access", "refresh", "public", 100);
    let client = mock_client_with(&transport, ClientConfig::default(), Some(expiring));

    client.countries().get_countries("shows").unwrap();

    let user = client.user().unwrap();
    assert_eq!(user.access_token, "access");
    assert_eq!(user.refresh_token, "refresh");
}

#[test]
fn test_auto_refresh_replaces_near_expiry_credentials() {
    let transport = MockTransport::new()
        .route("countries/shows", countries_fixture(), 200)
        .route("oauth/token", token_fixture("new-access"), 200);
    let expiring = Credentials::new("access", "refresh", "public", 100);
    let config = ClientConfig::default().with_auto_refresh_token(true);
    let client = mock_client_with(&transport, config, Some(expiring));

    client.countries().get_countries("shows").unwrap();

    let user = client.user().unwrap();
    assert_eq!(user.access_token, "new-access");
    assert_eq!(user.refresh_token, "new-refresh");

    let requests = transport.requests();
    assert_eq!(requests.len(), 2, "refresh first, then the actual call");
    assert!(requests[0].url.ends_with("oauth/token"));
    assert_eq!(
        requests[0].body.as_ref().unwrap()["grant_type"],
        json!("refresh_token")
    );
}

#[test]
fn test_fresh_credentials_are_not_refreshed() {
    let transport = MockTransport::new().route("countries/shows", countries_fixture(), 200);
    let config = ClientConfig::default().with_auto_refresh_token(true);
    let client = mock_client_with(&transport, config, Some(super::test_harness::test_user()));

    client.countries().get_countries("shows").unwrap();

    assert_eq!(transport.request_count(), 1, "no refresh call expected");
}

#[test]
fn test_http_status_errors_are_mapped() {
    let transport = MockTransport::new().route(
        "movies/unknown-slug",
        json!({"error": "not found"}),
        404,
    );
    let client = mock_client(&transport);

    let err = client.movies().get_summary(&"unknown-slug").unwrap_err();

    match err {
        Error::Http(status) => {
            assert_eq!(status.status, 404);
            assert_eq!(status.kind, StatusKind::NotFound);
            assert_eq!(status.response, Some(json!({"error": "not found"})));
        }
        other => panic!("expected Http error, got: {:?}", other),
    }
}

#[test]
fn test_malformed_response_is_wrapped() {
    // an object where the declared shape is a list
    let transport = MockTransport::new().route("countries/shows", json!({"not": "a list"}), 200);
    let client = mock_client(&transport);

    let err = client.countries().get_countries("shows").unwrap_err();
    assert!(matches!(err, Error::Response(_)));
}
