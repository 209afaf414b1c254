//! Pagination iterator tests: lazy fetching, page windows, take
//! semantics, prefetching and restart.

use serde_json::{json, Value};

use trakt::{CallContext, Error};

use super::test_harness::{mock_client, MockTransport};

/// Ten scalar items; the mock slices them per page/limit.
fn items_fixture() -> Value {
    json!([1, 2, 3, 4, 5, 6, 7, 8, 9, 10])
}

fn trending_transport() -> std::sync::Arc<MockTransport> {
    MockTransport::new().route_paginated("movies/trending", items_fixture())
}

fn iterator<'a>(
    client: &'a trakt::TraktClient,
    ctx: CallContext,
) -> trakt::PaginationIterator<'a, Value> {
    client
        .run::<Value>("movies.get_trending", ctx)
        .unwrap()
        .paginated()
        .unwrap()
}

#[test]
fn test_paginated_run_is_lazy() {
    let transport = trending_transport();
    let client = mock_client(&transport);

    let _it = iterator(&client, CallContext::new());
    assert_eq!(transport.request_count(), 0, "no fetch before iteration");
}

#[test]
fn test_iteration_yields_all_items_in_order() {
    let transport = trending_transport();
    let client = mock_client(&transport);

    let items: Result<Vec<Value>, Error> = iterator(&client, CallContext::new()).collect();

    assert_eq!(items.unwrap(), items_fixture().as_array().unwrap().clone());
    // 10 items, page size 10: a single round-trip
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn test_requesting_page_two_skips_earlier_items() {
    let transport = trending_transport();
    let client = mock_client(&transport);

    let mut it = iterator(&client, CallContext::new().page(2).per_page(3));

    let first_three = it.take(3).unwrap();
    assert_eq!(first_three, vec![json!(4), json!(5), json!(6)]);
}

#[test]
fn test_take_after_partial_consumption() {
    let transport = trending_transport();
    let client = mock_client(&transport);

    let mut it = iterator(&client, CallContext::new().per_page(3));

    assert_eq!(it.next().unwrap().unwrap(), json!(1));
    assert_eq!(it.next().unwrap().unwrap(), json!(2));

    let taken = it.take(3).unwrap();
    assert_eq!(taken, vec![json!(3), json!(4), json!(5)]);
}

#[test]
fn test_take_page_returns_one_page_worth() {
    let transport = trending_transport();
    let client = mock_client(&transport);

    let mut it = iterator(&client, CallContext::new().per_page(4));

    assert_eq!(it.take_page().unwrap().len(), 4);
}

#[test]
fn test_take_all_walks_every_page() {
    let transport = trending_transport();
    let client = mock_client(&transport);

    let mut it = iterator(&client, CallContext::new().per_page(3));
    let all = it.take_all().unwrap();

    assert_eq!(all.len(), 10);
    // ceil(10 / 3) pages
    assert_eq!(transport.request_count(), 4);
    assert!(!it.has_next());
    assert!(it.next().is_none());
}

#[test]
fn test_lazy_consumption_fetches_page_by_page() {
    let transport = trending_transport();
    let client = mock_client(&transport);

    let mut it = iterator(&client, CallContext::new().per_page(3));

    it.take(3).unwrap();
    assert_eq!(transport.request_count(), 1);

    it.take(1).unwrap();
    assert_eq!(transport.request_count(), 2, "crossing a page boundary fetches");
}

#[test]
fn test_prefetch_all_then_consume_issues_no_further_calls() {
    let transport = trending_transport();
    let client = mock_client(&transport);

    let mut it = iterator(&client, CallContext::new().per_page(3));
    it.prefetch_all().unwrap();

    let calls_after_prefetch = transport.request_count();
    assert_eq!(calls_after_prefetch, 1, "one batched round-trip");
    assert_eq!(
        transport.last_request().query.get("limit").map(String::as_str),
        Some("100")
    );

    let all = it.take_all().unwrap();
    assert_eq!(all.len(), 10);
    assert_eq!(transport.request_count(), calls_after_prefetch);
}

#[test]
fn test_prefetch_all_skips_already_consumed_items() {
    let transport = trending_transport();
    let client = mock_client(&transport);

    let mut it = iterator(&client, CallContext::new().per_page(3));

    assert_eq!(it.next().unwrap().unwrap(), json!(1));
    assert_eq!(it.next().unwrap().unwrap(), json!(2));

    it.prefetch_all().unwrap();
    let rest = it.take_all().unwrap();

    assert_eq!(
        rest,
        vec![json!(3), json!(4), json!(5), json!(6), json!(7), json!(8), json!(9), json!(10)]
    );
}

#[test]
fn test_has_next_tracks_queue_and_pages() {
    let transport = trending_transport();
    let client = mock_client(&transport);

    let mut it = iterator(&client, CallContext::new().per_page(5));
    assert!(it.has_next(), "fresh iterator has items ahead");

    it.take(5).unwrap();
    assert!(it.has_next(), "second page still fetchable");

    it.take(5).unwrap();
    assert!(!it.has_next(), "everything consumed");
}

#[test]
fn test_restart_resets_the_traversal() {
    let transport = trending_transport();
    let client = mock_client(&transport);

    let mut it = iterator(&client, CallContext::new().per_page(3));
    it.take(7).unwrap();

    it.restart();
    assert!(it.has_next());
    assert_eq!(it.next().unwrap().unwrap(), json!(1));
}

#[test]
fn test_builder_style_page_window_on_typed_interface() {
    let transport = trending_transport();
    let client = mock_client(&transport);

    let it = client
        .movies()
        .get_trending()
        .unwrap()
        .starting_at(2)
        .with_per_page(3);

    assert!(it.has_next());
    assert_eq!(transport.request_count(), 0, "builder setters must not trigger fetches");
}

#[test]
fn test_mid_iteration_error_surfaces_and_exhausts() {
    let transport = MockTransport::new().route("movies/trending", json!({"error": "boom"}), 500);
    let client = mock_client(&transport);

    let mut it = iterator(&client, CallContext::new().per_page(3));

    let first = it.next().expect("an item-shaped result");
    assert!(first.is_err());
    assert!(it.next().is_none(), "iterator is exhausted after an error");
}
