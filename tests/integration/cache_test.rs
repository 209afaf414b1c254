//! Response cache behavior through the executor: replay, level gating
//! and TTL expiry.

use serde_json::json;

use trakt::cache::CacheLevel;
use trakt::ClientConfig;

use super::test_harness::{authed_client, mock_client, mock_client_with, MockTransport};

fn countries_transport() -> std::sync::Arc<MockTransport> {
    MockTransport::new().route(
        "countries/shows",
        json!([{"name": "Australia", "code": "au"}]),
        200,
    )
}

#[test]
fn test_repeated_get_is_served_from_cache() {
    let transport = countries_transport();
    let client = mock_client(&transport);

    client.countries().get_countries("shows").unwrap();
    client.countries().get_countries("shows").unwrap();

    assert_eq!(transport.request_count(), 1, "second call replays the cache");
}

#[test]
fn test_cache_disabled_by_configuration() {
    let transport = countries_transport();
    let config = ClientConfig::default().with_cache_level(CacheLevel::No);
    let client = mock_client_with(&transport, config, None);

    client.countries().get_countries("shows").unwrap();
    client.countries().get_countries("shows").unwrap();

    assert_eq!(transport.request_count(), 2);
}

#[test]
fn test_basic_configuration_rejects_full_level_endpoints() {
    // movies/!id declares no level, so it defaults to full
    let transport = MockTransport::new().route(
        "movies/28",
        json!({"title": "Guardians of the Galaxy", "year": 2014, "ids": {"trakt": 28}}),
        200,
    );
    let config = ClientConfig::default().with_cache_level(CacheLevel::Basic);
    let client = mock_client_with(&transport, config, None);

    client.movies().get_summary(&28u64).unwrap();
    client.movies().get_summary(&28u64).unwrap();

    assert_eq!(transport.request_count(), 2, "full-level endpoint, basic config");
}

#[test]
fn test_basic_configuration_accepts_basic_level_endpoints() {
    // countries declares the basic level explicitly
    let transport = countries_transport();
    let config = ClientConfig::default().with_cache_level(CacheLevel::Basic);
    let client = mock_client_with(&transport, config, None);

    client.countries().get_countries("shows").unwrap();
    client.countries().get_countries("shows").unwrap();

    assert_eq!(transport.request_count(), 1);
}

#[test]
fn test_mutating_calls_are_never_cached() {
    let transport = MockTransport::new().route("checkin", json!({}), 200);
    let client = authed_client(&transport);

    client.checkin().delete_active_checkins().unwrap();
    client.checkin().delete_active_checkins().unwrap();

    assert_eq!(transport.request_count(), 2);
}

#[test]
fn test_expired_entries_are_refetched() {
    let transport = countries_transport();
    let config = ClientConfig::default().with_cache_ttl_secs(0);
    let client = mock_client_with(&transport, config, None);

    client.countries().get_countries("shows").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    client.countries().get_countries("shows").unwrap();

    assert_eq!(transport.request_count(), 2, "expired entry is not replayed");
}

#[test]
fn test_distinct_queries_get_distinct_entries() {
    let transport = MockTransport::new()
        .route("countries/shows", json!([{"name": "A", "code": "au"}]), 200)
        .route("countries/movies", json!([{"name": "P", "code": "pl"}]), 200);
    let client = mock_client(&transport);

    let shows = client.countries().get_countries("shows").unwrap();
    let movies = client.countries().get_countries("movies").unwrap();

    assert_ne!(shows[0].code, movies[0].code);
    assert_eq!(transport.request_count(), 2);
}
