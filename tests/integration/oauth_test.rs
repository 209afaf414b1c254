//! OAuth flow tests: redirect URL, token exchange, refresh, revoke and
//! the device-code polling loop.

use serde_json::{json, Value};

use trakt::Error;

use super::test_harness::{authed_client, mock_client, MockTransport};

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
fn test_redirect_url_construction() {
    let transport = MockTransport::new();
    let client = mock_client(&transport);

    let url = client.oauth().get_redirect_url(None, None);
    assert_eq!(
        url,
        "https://api.trakt.tv/oauth/authorize?response_type=code&client_id=client-id\
         &redirect_uri=urn%3Aietf%3Awg%3Aoauth%3A2.0%3Aoob"
    );

    let url = client.oauth().get_redirect_url(Some("https://example.com/cb"), Some("xyz"));
    assert!(url.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fcb"));
    assert!(url.ends_with("&state=xyz"));
}

#[test]
fn test_token_exchange_stores_credentials() {
    let transport = MockTransport::new().route("oauth/token", token_fixture("granted"), 200);
    let client = mock_client(&transport);

    assert!(!client.authenticated());

    let credentials = client.oauth().get_token("auth-code", None).unwrap();

    assert_eq!(credentials.access_token, "granted");
    assert_eq!(credentials.expires_at, 1_500_000_000 + 7200);
    assert!(client.authenticated());

    let request = transport.last_request();
    let body = request.body.unwrap();
    assert_eq!(body["code"], json!("auth-code"));
    assert_eq!(body["grant_type"], json!("authorization_code"));
    assert_eq!(body["redirect_uri"], json!("urn:ietf:wg:oauth:2.0:oob"));
}

#[test]
fn test_refresh_token_replaces_credentials_wholesale() {
    let transport = MockTransport::new().route("oauth/token", token_fixture("refreshed"), 200);
    let client = authed_client(&transport);

    client.oauth().refresh_token().unwrap();

    let user = client.user().unwrap();
    assert_eq!(user.access_token, "refreshed");
    assert_eq!(user.refresh_token, "new-refresh");

    let body = transport.last_request().body.unwrap();
    assert_eq!(body["grant_type"], json!("refresh_token"));
    assert_eq!(body["refresh_token"], json!("refresh"));
}

#[test]
fn test_refresh_without_credentials_is_not_authenticated() {
    let transport = MockTransport::new();
    let client = mock_client(&transport);

    let err = client.oauth().refresh_token().unwrap_err();
    assert!(matches!(err, Error::NotAuthenticated));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_revoke_clears_the_credentials_slot() {
    let transport = MockTransport::new().route("oauth/revoke", json!({}), 200);
    let client = authed_client(&transport);

    client.oauth().revoke_token().unwrap();

    assert!(!client.authenticated());
    let body = transport.last_request().body.unwrap();
    assert_eq!(body["token"], json!("access"));
}

fn device_code_fixture() -> Value {
    json!({
        "device_code": "device-code",
        "user_code": "5055CC52",
        "verification_url": "https://trakt.tv/activate",
        "expires_in": 10,
        "interval": 5,
    })
}

#[test]
fn test_device_code_issuance() {
    let transport = MockTransport::new().route("oauth/device/code", device_code_fixture(), 200);
    let client = mock_client(&transport);

    let device = client.oauth().get_device_code().unwrap();

    assert_eq!(device.user_code, "5055CC52");
    assert_eq!(device.interval, 5);
    assert_eq!(
        transport.last_request().body.unwrap(),
        json!({"client_id": "client-id"})
    );
}

#[test]
fn test_device_flow_polls_until_approved() {
    let transport = MockTransport::new()
        .route("oauth/device/code", device_code_fixture(), 200)
        .route_seq(
            "oauth/device/token",
            vec![
                (json!({}), 412),
                (json!({}), 412),
                (token_fixture("device-granted"), 200),
            ],
        );
    let client = mock_client(&transport);

    let device = client.oauth().get_device_code().unwrap();
    let credentials = client.oauth().wait_for_verification(&device).unwrap();

    assert_eq!(credentials.access_token, "device-granted");
    assert!(client.authenticated());

    let polls = transport
        .requests()
        .iter()
        .filter(|r| r.url.ends_with("oauth/device/token"))
        .count();
    assert_eq!(polls, 3, "exactly three poll requests");
}

#[test]
fn test_device_flow_times_out_when_never_approved() {
    let transport = MockTransport::new()
        .route("oauth/device/code", device_code_fixture(), 200)
        .route("oauth/device/token", json!({}), 412);
    let client = mock_client(&transport);

    let device = client.oauth().get_device_code().unwrap();
    let err = client.oauth().wait_for_verification(&device).unwrap_err();

    assert!(matches!(err, Error::Timeout));
    assert!(!client.authenticated());

    // expires_in 10 at interval 5: polls at 0s, 5s and 10s elapsed
    let polls = transport
        .requests()
        .iter()
        .filter(|r| r.url.ends_with("oauth/device/token"))
        .count();
    assert_eq!(polls, 3);
}
