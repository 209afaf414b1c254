//! HTTP component
//!
//! The boundary between the typed client and the wire. The actual
//! transport sits behind the [`HttpTransport`] trait so tests can
//! substitute a scripted implementation; the default is a blocking
//! reqwest client. The component joins the base URL, attaches the
//! standard API headers, retries transient server failures, maps
//! non-success statuses to [`StatusError`] and extracts the
//! `X-Pagination-*` metadata headers.

pub mod retry;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;

use crate::constants::API_VERSION;
use crate::error::{Error, StatusError};
use retry::RetryPolicy;

/// Pagination metadata delivered via response headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageMeta {
    pub item_count: Option<u64>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub page_count: Option<u32>,
}

impl PageMeta {
    /// Read the four `X-Pagination-*` headers (keys lowercased).
    fn from_headers(headers: &HashMap<String, String>) -> Option<PageMeta> {
        let meta = PageMeta {
            item_count: headers.get("x-pagination-item-count").and_then(|v| v.parse().ok()),
            limit: headers.get("x-pagination-limit").and_then(|v| v.parse().ok()),
            page: headers.get("x-pagination-page").and_then(|v| v.parse().ok()),
            page_count: headers.get("x-pagination-page-count").and_then(|v| v.parse().ok()),
        };

        if meta == PageMeta::default() {
            None
        } else {
            Some(meta)
        }
    }
}

/// One fully resolved outgoing request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    /// Query pairs, sorted by key for deterministic URLs.
    pub query: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

/// Raw response from the transport. Header keys are lowercased.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Option<Value>,
    pub headers: HashMap<String, String>,
}

/// Blocking transport abstraction; the only thing that touches the
/// network.
pub trait HttpTransport: Send + Sync {
    fn execute(&self, request: &TransportRequest) -> Result<TransportResponse, Error>;
}

/// Default transport backed by a blocking reqwest client.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout_secs: u64) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(ReqwestTransport { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: &TransportRequest) -> Result<TransportResponse, Error> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .query(&request.query);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send()?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.json().ok();

        Ok(TransportResponse {
            status,
            body,
            headers,
        })
    }
}

/// Parsed API response handed to the executor.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub json: Value,
    pub status: u16,
    pub pagination: Option<PageMeta>,
}

/// Standard request headers: JSON content type, client identifier, API
/// version marker and a bearer token when authenticated.
pub fn default_headers(client_id: &str, access_token: Option<&str>) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("trakt-api-key".to_string(), client_id.to_string());
    headers.insert("trakt-api-version".to_string(), API_VERSION.to_string());

    if let Some(token) = access_token {
        headers.insert("Authorization".to_string(), format!("Bearer {}", token));
    }

    headers
}

/// HTTP component: URL joining, retry loop, status mapping.
pub struct HttpComponent {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpComponent {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>, max_retries: u32) -> Self {
        HttpComponent {
            transport,
            base_url: base_url.into(),
            retry: RetryPolicy::new(max_retries),
        }
    }

    /// Execute one request against the API.
    ///
    /// Transient 5xx responses are retried per the retry policy. Unless
    /// `no_raise` is set, any remaining 4xx/5xx status raises
    /// [`Error::Http`]; `no_raise` callers (the device-poll loop) get
    /// the response back with its status for inspection.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        query: &HashMap<String, String>,
        body: Option<&Value>,
        headers: &HashMap<String, String>,
        no_raise: bool,
    ) -> Result<ApiResponse, Error> {
        let mut query: Vec<(String, String)> = query
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        query.sort();

        let request = TransportRequest {
            method,
            url: self.join(path),
            query,
            headers: headers.clone(),
            body: body.cloned(),
        };

        let mut attempt = 0;
        let response = loop {
            tracing::debug!(method = %request.method, path, attempt, "executing API request");
            let response = self.transport.execute(&request)?;

            if self.retry.should_retry(attempt, response.status) {
                let backoff = self.retry.backoff_duration(attempt + 1);
                tracing::warn!(
                    status = response.status,
                    path,
                    "transient API failure, retrying in {:?}",
                    backoff
                );
                std::thread::sleep(backoff);
                attempt += 1;
                continue;
            }

            break response;
        };

        if !no_raise && response.status >= 400 {
            return Err(StatusError::new(response.status, path, response.body).into());
        }

        let pagination = PageMeta::from_headers(&response.headers);

        Ok(ApiResponse {
            json: response.body.unwrap_or(Value::Null),
            status: response.status,
            pagination,
        })
    }

    /// Full URL for a path and query, used for OAuth redirect links.
    pub fn get_url(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut url = self.join(path);

        if !query.is_empty() {
            let encoded: Vec<String> = query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&encoded.join("&"));
        }

        url
    }

    fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    /// Transport returning a scripted sequence of responses.
    struct ScriptedTransport {
        responses: Mutex<Vec<TransportResponse>>,
        calls: Mutex<Vec<TransportRequest>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<TransportResponse>) -> Self {
            ScriptedTransport {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    impl HttpTransport for ScriptedTransport {
        fn execute(&self, request: &TransportRequest) -> Result<TransportResponse, Error> {
            self.calls.lock().push(request.clone());
            let mut responses = self.responses.lock();
            if responses.is_empty() {
                panic!("scripted transport ran out of responses");
            }
            Ok(responses.remove(0))
        }
    }

    fn ok_response(body: Value) -> TransportResponse {
        TransportResponse {
            status: 200,
            body: Some(body),
            headers: HashMap::new(),
        }
    }

    fn status_response(status: u16) -> TransportResponse {
        TransportResponse {
            status,
            body: Some(json!({"error": "nope"})),
            headers: HashMap::new(),
        }
    }

    fn component(transport: Arc<ScriptedTransport>) -> HttpComponent {
        HttpComponent::new(transport, "https://api.trakt.tv", 3)
    }

    #[test]
    fn test_successful_request_returns_json() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok_response(json!([1, 2, 3]))]));
        let http = component(transport.clone());

        let response = http
            .request(
                Method::GET,
                "countries/shows",
                &HashMap::new(),
                None,
                &HashMap::new(),
                false,
            )
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.json, json!([1, 2, 3]));
        assert_eq!(transport.call_count(), 1);

        let call = &transport.calls.lock()[0];
        assert_eq!(call.url, "https://api.trakt.tv/countries/shows");
    }

    #[test]
    fn test_error_status_raises_with_body() {
        let transport = Arc::new(ScriptedTransport::new(vec![status_response(404)]));
        let http = component(transport);

        let err = http
            .request(
                Method::GET,
                "movies/0",
                &HashMap::new(),
                None,
                &HashMap::new(),
                false,
            )
            .unwrap_err();

        match err {
            Error::Http(status) => {
                assert_eq!(status.status, 404);
                assert_eq!(status.response, Some(json!({"error": "nope"})));
            }
            other => panic!("expected Http error, got: {:?}", other),
        }
    }

    #[test]
    fn test_no_raise_returns_error_statuses() {
        let transport = Arc::new(ScriptedTransport::new(vec![status_response(412)]));
        let http = component(transport);

        let response = http
            .request(
                Method::POST,
                "oauth/device/token",
                &HashMap::new(),
                None,
                &HashMap::new(),
                true,
            )
            .unwrap();

        assert_eq!(response.status, 412);
    }

    #[test]
    fn test_transient_failures_are_retried() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            status_response(503),
            status_response(503),
            ok_response(json!({"ok": true})),
        ]));
        let http = component(transport.clone());

        let response = http
            .request(
                Method::GET,
                "movies/trending",
                &HashMap::new(),
                None,
                &HashMap::new(),
                false,
            )
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(transport.call_count(), 3);
    }

    #[test]
    fn test_retry_budget_is_bounded() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            status_response(500),
            status_response(500),
            status_response(500),
        ]));
        let http = component(transport.clone());

        let err = http
            .request(
                Method::GET,
                "movies/trending",
                &HashMap::new(),
                None,
                &HashMap::new(),
                false,
            )
            .unwrap_err();

        assert!(matches!(err, Error::Http(ref s) if s.status == 500));
        assert_eq!(transport.call_count(), 3, "3 attempts, then give up");
    }

    #[test]
    fn test_client_errors_are_not_retried() {
        let transport = Arc::new(ScriptedTransport::new(vec![status_response(404)]));
        let http = component(transport.clone());

        let _ = http.request(
            Method::GET,
            "movies/0",
            &HashMap::new(),
            None,
            &HashMap::new(),
            false,
        );

        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_pagination_headers_are_extracted() {
        let mut headers = HashMap::new();
        headers.insert("x-pagination-item-count".to_string(), "100".to_string());
        headers.insert("x-pagination-limit".to_string(), "10".to_string());
        headers.insert("x-pagination-page".to_string(), "2".to_string());
        headers.insert("x-pagination-page-count".to_string(), "10".to_string());

        let transport = Arc::new(ScriptedTransport::new(vec![TransportResponse {
            status: 200,
            body: Some(json!([])),
            headers,
        }]));
        let http = component(transport);

        let response = http
            .request(
                Method::GET,
                "movies/trending",
                &HashMap::new(),
                None,
                &HashMap::new(),
                false,
            )
            .unwrap();

        let meta = response.pagination.expect("pagination headers present");
        assert_eq!(meta.item_count, Some(100));
        assert_eq!(meta.limit, Some(10));
        assert_eq!(meta.page, Some(2));
        assert_eq!(meta.page_count, Some(10));
    }

    #[test]
    fn test_get_url_percent_encodes_query() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let http = component(transport);

        let url = http.get_url("a/b/c", &[("d", "e")]);
        assert_eq!(url, "https://api.trakt.tv/a/b/c?d=e");

        let url = http.get_url(
            "oauth/authorize",
            &[
                ("response_type", "code"),
                ("client_id", "123"),
                ("redirect_uri", "urn:ietf:wg:oauth:2.0:oob"),
            ],
        );
        assert_eq!(
            url,
            "https://api.trakt.tv/oauth/authorize?response_type=code&client_id=123\
             &redirect_uri=urn%3Aietf%3Awg%3Aoauth%3A2.0%3Aoob"
        );
    }

    #[test]
    fn test_default_headers_with_and_without_token() {
        let anon = default_headers("client-id", None);
        assert_eq!(anon.get("trakt-api-key").map(String::as_str), Some("client-id"));
        assert_eq!(anon.get("trakt-api-version").map(String::as_str), Some("2"));
        assert!(!anon.contains_key("Authorization"));

        let signed = default_headers("client-id", Some("token"));
        assert_eq!(
            signed.get("Authorization").map(String::as_str),
            Some("Bearer token")
        );
    }
}
