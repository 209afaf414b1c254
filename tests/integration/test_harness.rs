//! Test utilities: scripted mock transport and client builders
//!
//! The mock transport maps URL patterns to canned responses. Routes
//! registered as paginated slice their item list according to the
//! `page`/`limit` query arguments and synthesize the `X-Pagination-*`
//! headers the way the real API does.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use regex::Regex;
use serde_json::Value;

use trakt::error::Error;
use trakt::http::{HttpTransport, TransportRequest, TransportResponse};
use trakt::oauth::Credentials;
use trakt::{ClientConfig, TraktClient};

enum RouteKind {
    /// Scripted responses, consumed in order; the last one repeats.
    Scripted(Vec<(Value, u16)>),
    /// Full item list, sliced per request by `page`/`limit`.
    Paginated(Vec<Value>),
}

struct Route {
    pattern: Regex,
    kind: RouteKind,
    served: usize,
}

/// One request as the transport saw it.
#[derive(Debug, Clone)]
pub struct LoggedRequest {
    pub method: String,
    pub url: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

/// Scripted in-memory transport.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<LoggedRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(MockTransport::default())
    }

    fn add_route(self: Arc<Self>, pattern: &str, kind: RouteKind) -> Arc<Self> {
        let pattern = Regex::new(pattern).expect("invalid route pattern");
        self.routes.lock().push(Route {
            pattern,
            kind,
            served: 0,
        });
        self
    }

    /// Always answer `pattern` with one response.
    pub fn route(self: Arc<Self>, pattern: &str, body: Value, status: u16) -> Arc<Self> {
        self.add_route(pattern, RouteKind::Scripted(vec![(body, status)]))
    }

    /// Answer `pattern` with a response sequence; the last repeats.
    pub fn route_seq(self: Arc<Self>, pattern: &str, responses: Vec<(Value, u16)>) -> Arc<Self> {
        assert!(!responses.is_empty(), "route_seq needs at least one response");
        self.add_route(pattern, RouteKind::Scripted(responses))
    }

    /// Answer `pattern` with page slices of `items`.
    pub fn route_paginated(self: Arc<Self>, pattern: &str, items: Value) -> Arc<Self> {
        let items = items.as_array().expect("paginated route needs an array").clone();
        self.add_route(pattern, RouteKind::Paginated(items))
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<LoggedRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> LoggedRequest {
        self.requests.lock().last().expect("no request issued").clone()
    }

    fn paginated_response(items: &[Value], query: &HashMap<String, String>) -> TransportResponse {
        let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);

        let page_count = (items.len() + limit - 1) / limit;
        let offset = (page - 1) * limit;
        let slice: Vec<Value> = items
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        let mut headers = HashMap::new();
        headers.insert("x-pagination-item-count".to_string(), items.len().to_string());
        headers.insert("x-pagination-limit".to_string(), limit.to_string());
        headers.insert("x-pagination-page".to_string(), page.to_string());
        headers.insert("x-pagination-page-count".to_string(), page_count.to_string());

        TransportResponse {
            status: 200,
            body: Some(Value::Array(slice)),
            headers,
        }
    }
}

impl HttpTransport for MockTransport {
    fn execute(&self, request: &TransportRequest) -> Result<TransportResponse, Error> {
        let query: HashMap<String, String> = request.query.iter().cloned().collect();

        self.requests.lock().push(LoggedRequest {
            method: request.method.to_string(),
            url: request.url.clone(),
            query: query.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
        });

        let mut routes = self.routes.lock();
        let matching: Vec<usize> = routes
            .iter()
            .enumerate()
            .filter(|(_, r)| r.pattern.is_match(&request.url))
            .map(|(i, _)| i)
            .collect();

        assert_eq!(
            matching.len(),
            1,
            "expected exactly one route for {}, found {}",
            request.url,
            matching.len()
        );

        let route = &mut routes[matching[0]];
        let response = match &route.kind {
            RouteKind::Scripted(responses) => {
                let index = route.served.min(responses.len() - 1);
                let (body, status) = &responses[index];
                TransportResponse {
                    status: *status,
                    body: Some(body.clone()),
                    headers: HashMap::new(),
                }
            }
            RouteKind::Paginated(items) => Self::paginated_response(items, &query),
        };
        route.served += 1;

        Ok(response)
    }
}

/// Credentials that never expire within the refresh window.
pub fn test_user() -> Credentials {
    Credentials::new("access", "refresh", "public", 10_000_000_000)
}

pub fn mock_client(transport: &Arc<MockTransport>) -> TraktClient {
    mock_client_with(transport, ClientConfig::default(), None)
}

pub fn authed_client(transport: &Arc<MockTransport>) -> TraktClient {
    mock_client_with(transport, ClientConfig::default(), Some(test_user()))
}

/// Opt-in log output for debugging test runs (`RUST_LOG=trakt=debug`).
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

pub fn mock_client_with(
    transport: &Arc<MockTransport>,
    config: ClientConfig,
    user: Option<Credentials>,
) -> TraktClient {
    init_tracing();

    let mut builder = TraktClient::builder("client-id", "client-secret")
        .config(config)
        .transport(Arc::clone(transport) as Arc<dyn HttpTransport>)
        // tests never really sleep
        .sleep_fn(Arc::new(|_| {}));

    if let Some(user) = user {
        builder = builder.user(user);
    }

    builder.build().expect("client builds without I/O")
}
