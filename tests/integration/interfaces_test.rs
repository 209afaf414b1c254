//! Typed suite interface tests: request construction and response
//! parsing per resource group.

use serde_json::{json, Value};

use trakt::models::Sharing;
use trakt::interfaces::CheckinOptions;
use trakt::Error;

use super::test_harness::{authed_client, mock_client, MockTransport};

#[test]
fn test_certifications_envelope_is_unwrapped() {
    let transport = MockTransport::new().route(
        "certifications/movies",
        json!({"us": [
            {"name": "PG", "slug": "pg", "description": "Parental Guidance Suggested"},
            {"name": "R", "slug": "r", "description": "Restricted"},
        ]}),
        200,
    );
    let client = mock_client(&transport);

    let certifications = client.certifications().get_certifications("movies").unwrap();

    assert_eq!(certifications.len(), 2);
    assert_eq!(certifications[1].slug, "r");
}

#[test]
fn test_movie_summary_parses_extended_payload() {
    let transport = MockTransport::new().route(
        "movies/tron-legacy-2010",
        json!({
            "title": "TRON: Legacy",
            "year": 2010,
            "ids": {"trakt": 1, "slug": "tron-legacy-2010", "imdb": "tt1104001", "tmdb": 20526},
            "tagline": "The Game Has Changed.",
            "released": "2010-12-16",
            "runtime": 125,
            "updated_at": "2014-07-23T03:21:46.000Z",
            "rating": 8.0,
            "votes": 111,
            "genres": ["action"],
        }),
        200,
    );
    let client = mock_client(&transport);

    let movie = client.movies().get_summary(&"tron-legacy-2010").unwrap();

    assert_eq!(movie.title, "TRON: Legacy");
    assert_eq!(movie.ids.trakt, 1);
    assert_eq!(movie.runtime, Some(125));
    assert_eq!(movie.updated_at.unwrap().timestamp(), 1406085706);
}

#[test]
fn test_movie_releases_with_and_without_country() {
    let release = json!([{
        "country": "us",
        "certification": "PG",
        "release_date": "2010-12-16",
        "release_type": "theatrical",
        "note": null,
    }]);
    let transport = MockTransport::new().route("movies/1/releases", release, 200);
    let client = mock_client(&transport);

    client.movies().get_releases(&1u64, None).unwrap();
    assert!(transport.last_request().url.ends_with("movies/1/releases"));

    client.movies().get_releases(&1u64, Some("us")).unwrap();
    assert!(transport.last_request().url.ends_with("movies/1/releases/us"));

    let err = client.movies().get_releases(&1u64, Some("usa")).unwrap_err();
    assert!(matches!(err, Error::Argument(_)), "three-letter code is invalid");
}

#[test]
fn test_period_collections_validate_their_enum() {
    let transport = MockTransport::new().route_paginated("movies/played", json!([]));
    let client = mock_client(&transport);

    assert!(client.movies().get_most_played(Some("monthly")).is_ok());

    let err = client.movies().get_most_played(Some("hourly")).unwrap_err();
    assert!(matches!(err, Error::Argument(_)));
    assert_eq!(transport.request_count(), 0, "paginated calls validate eagerly");
}

#[test]
fn test_next_episode_returns_none_on_204() {
    let transport = MockTransport::new().route("shows/42/next_episode", json!(null), 204);
    let client = mock_client(&transport);

    let episode = client.shows().get_next_episode(&42u64).unwrap();
    assert!(episode.is_none());
}

#[test]
fn test_last_episode_parses_when_present() {
    let transport = MockTransport::new().route(
        "shows/42/last_episode",
        json!({"season": 8, "number": 6, "title": "The Iron Throne", "ids": {"trakt": 3465855}}),
        200,
    );
    let client = mock_client(&transport);

    let episode = client.shows().get_last_episode(&42u64).unwrap().unwrap();
    assert_eq!(episode.season, 8);
    assert_eq!(episode.number, 6);
}

#[test]
fn test_search_text_query_request_shape() {
    let results = json!([{
        "type": "movie",
        "score": 26.019644,
        "movie": {"title": "TRON", "year": 1982, "ids": {"trakt": 66}},
    }]);
    let transport = MockTransport::new().route_paginated("search/movie", results);
    let client = mock_client(&transport);

    let mut it = client
        .search()
        .text_query(&["movie"], "tron", Some(&["title", "tagline"]))
        .unwrap();
    let hits = it.take_page().unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].item_type, "movie");
    assert_eq!(hits[0].movie.as_ref().unwrap().title, "TRON");

    let request = transport.last_request();
    assert!(request.url.ends_with("search/movie"));
    assert_eq!(request.query.get("query").map(String::as_str), Some("tron"));
    assert_eq!(
        request.query.get("fields").map(String::as_str),
        Some("title,tagline")
    );
}

#[test]
fn test_search_rejects_unknown_media_type() {
    let transport = MockTransport::new();
    let client = mock_client(&transport);

    let err = client.search().text_query(&["cartoon"], "tron", None).unwrap_err();
    assert!(matches!(err, Error::Argument(_)));
}

#[test]
fn test_checkin_builds_the_request_body() {
    let transport = MockTransport::new().route(
        "checkin",
        json!({
            "id": 3373536619u64,
            "watched_at": "2014-08-06T01:11:37.000Z",
            "sharing": {"twitter": true, "tumblr": false},
            "movie": {"title": "Guardians of the Galaxy", "year": 2014, "ids": {"trakt": 28}},
        }),
        200,
    );
    let client = authed_client(&transport);

    let options = CheckinOptions {
        message: Some("movie night".to_string()),
        sharing: Some(Sharing {
            twitter: true,
            ..Sharing::default()
        }),
        ..CheckinOptions::default()
    };
    let checkin = client.checkin().check_into_movie(&28u64, &options).unwrap();

    assert_eq!(checkin.movie.ids.trakt, 28);

    let request = transport.last_request();
    assert_eq!(request.method, "POST");
    let body = request.body.unwrap();
    assert_eq!(body["movie"]["ids"]["trakt"], json!(28));
    assert_eq!(body["message"], json!("movie night"));
    assert_eq!(body["sharing"]["twitter"], json!(true));
}

#[test]
fn test_checkin_requires_authentication() {
    let transport = MockTransport::new().route("checkin", json!({}), 200);
    let client = mock_client(&transport);

    let err = client
        .checkin()
        .check_into_movie(&28u64, &CheckinOptions::default())
        .unwrap_err();

    assert!(matches!(err, Error::NotAuthenticated));
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_scrobble_progress_bounds() {
    let fixture = json!({
        "id": 9832,
        "action": "start",
        "progress": 10.0,
        "sharing": {},
        "movie": {"title": "Guardians of the Galaxy", "year": 2014, "ids": {"trakt": 28}},
    });
    let transport = MockTransport::new().route("scrobble/start", fixture, 200);
    let client = authed_client(&transport);

    let scrobble = client.scrobble().start_scrobble_movie(&28u64, 10.0).unwrap();
    assert_eq!(scrobble.action, "start");
    assert!(scrobble.sharing.is_none(), "empty sharing object is the null sentinel");

    let err = client.scrobble().start_scrobble_movie(&28u64, 150.0).unwrap_err();
    assert!(matches!(err, Error::Argument(_)));

    let err = client.scrobble().start_scrobble_movie(&28u64, -5.0).unwrap_err();
    assert!(matches!(err, Error::Argument(_)));
}

#[test]
fn test_post_comment_rejects_short_text() {
    let transport = MockTransport::new().route("comments", json!({}), 200);
    let client = authed_client(&transport);

    let err = client
        .comments()
        .post_comment(&28u64, "too short", false, None)
        .unwrap_err();

    match err {
        Error::Argument(msg) => assert!(msg.contains("five words"), "got: {}", msg),
        other => panic!("expected Argument error, got: {:?}", other),
    }
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn test_comment_feeds_resolve_optional_segments() {
    let transport = MockTransport::new().route_paginated("comments/trending", json!([]));
    let client = mock_client(&transport);

    let mut it = client
        .comments()
        .get_trending(Some("reviews"), Some("movies"), true)
        .unwrap();
    it.take_page().unwrap();

    let request = transport.last_request();
    assert!(request.url.ends_with("comments/trending/reviews/movies"));
    assert_eq!(
        request.query.get("include_replies").map(String::as_str),
        Some("true")
    );
}

#[test]
fn test_calendars_require_auth_only_for_my_feeds() {
    let premiere = json!([{
        "first_aired": "2014-07-14T01:00:00.000Z",
        "episode": {"season": 7, "number": 4, "title": "Death is Not the End", "ids": {"trakt": 443}},
        "show": {"title": "True Blood", "year": 2008, "ids": {"trakt": 5}},
    }]);
    let transport = MockTransport::new()
        .route("calendars/all/shows", premiere.clone(), 200)
        .route("calendars/my/shows", premiere, 200);

    let anonymous = mock_client(&transport);
    assert!(anonymous.calendars().get_shows(None, None).is_ok());
    let err = anonymous.calendars().get_my_shows(None, None).unwrap_err();
    assert!(matches!(err, Error::NotAuthenticated));

    let authed = authed_client(&transport);
    let premieres = authed
        .calendars()
        .get_my_shows(Some("2014-07-14"), Some(7))
        .unwrap();
    assert_eq!(premieres[0].episode.number, 4);
    assert!(transport
        .last_request()
        .url
        .ends_with("calendars/my/shows/2014-07-14/7"));
}

#[test]
fn test_calendars_reject_malformed_dates() {
    let transport = MockTransport::new();
    let client = mock_client(&transport);

    let err = client.calendars().get_shows(Some("14-07-2014"), Some(7)).unwrap_err();
    assert!(matches!(err, Error::Argument(_)));
}

#[test]
fn test_seasons_translations_query_argument() {
    let transport = MockTransport::new().route(
        "shows/42/seasons/1",
        json!([{"season": 1, "number": 1, "title": "Pilot", "ids": {"trakt": 101}}]),
        200,
    );
    let client = mock_client(&transport);

    let episodes = client.seasons().get_season(&42u64, 1, Some("all")).unwrap();
    assert_eq!(episodes[0].title.as_deref(), Some("Pilot"));
    assert_eq!(
        transport.last_request().query.get("translations").map(String::as_str),
        Some("all")
    );

    let err = client.seasons().get_season(&42u64, 1, Some("english")).unwrap_err();
    assert!(matches!(err, Error::Argument(_)));
}

#[test]
fn test_recommendations_hide_uses_delete() {
    let transport = MockTransport::new().route("recommendations/movies/922", json!({}), 200);
    let client = authed_client(&transport);

    client.recommendations().hide_movie(&922u64).unwrap();

    let request = transport.last_request();
    assert_eq!(request.method, "DELETE");
    assert!(request.url.ends_with("recommendations/movies/922"));
}

#[test]
fn test_dynamic_and_typed_access_agree() {
    let genres = json!([{"name": "Action", "slug": "action"}]);
    let transport = MockTransport::new().route("genres/movies", genres, 200);
    let client = mock_client(&transport);

    let typed = client.genres().get_genres("movies").unwrap();
    let dynamic: Vec<Value> = client
        .run("genres", trakt::CallContext::new().arg("type", "movies"))
        .unwrap()
        .single()
        .unwrap();

    assert_eq!(typed.len(), 1);
    assert_eq!(dynamic[0]["slug"], json!("action"));
    // second call replays the cache (genres caches at the basic level)
    assert_eq!(transport.request_count(), 1);
}
