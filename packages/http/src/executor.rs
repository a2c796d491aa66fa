//! HTTP execution abstraction.
//!
//! The catalog client never talks to the network directly; it is handed an
//! [`HttpExecutor`] and issues every request through it. Tests swap in the
//! [`mock::MockExecutor`] to avoid real network calls.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::Error;
use crate::types::{HttpRequest, HttpResponse};

/// Trait for executing HTTP requests.
///
/// `Ok` means the server answered, whatever the status code. `Err` means no
/// response was obtained.
pub trait HttpExecutor: Send + Sync {
    /// Execute an HTTP request and return the response.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

impl<E: HttpExecutor + ?Sized> HttpExecutor for &E {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        (**self).execute(request)
    }
}

/// Production HTTP executor using reqwest.
pub struct ReqwestExecutor {
    client: Client,
    base_url: Url,
}

impl ReqwestExecutor {
    /// Create a new executor for the given base URL and request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// Create with default timeout of 30 seconds.
    pub fn with_default_timeout(base_url: &str) -> Result<Self, Error> {
        Self::new(base_url, Duration::from_secs(30))
    }

    /// Create with a custom reqwest client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, Error> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve the request path (and query) against the base URL.
    fn build_url(&self, request: &HttpRequest) -> Result<Url, Error> {
        let mut url = if request.path.starts_with("http://") || request.path.starts_with("https://")
        {
            Url::parse(&request.path)?
        } else {
            self.base_url.join(&request.path)?
        };

        // The same encoder that produces `HttpRequest::target`.
        if let Some(encoded) = request.query_string().strip_prefix('?') {
            let query = match url.query() {
                Some(existing) if !existing.is_empty() => format!("{}&{}", existing, encoded),
                _ => encoded.to_string(),
            };
            url.set_query(Some(&query));
        }

        Ok(url)
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, Error> {
    let url = Url::parse(base_url)?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl {
            message: format!("'{}' cannot be used as a base URL", base_url),
        });
    }
    Ok(url)
}

impl HttpExecutor for ReqwestExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let url = self.build_url(request)?;
        let method: http::Method = request.method.into();

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::try_from(name.as_str())?;
            let header_value = HeaderValue::try_from(value.as_str())?;
            headers.insert(header_name, header_value);
        }

        tracing::debug!(method = %request.method, url = %url, "sending request");

        let mut req_builder = self.client.request(method, url).headers(headers);

        if let Some(body) = &request.body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder.send().map_err(|e| {
            tracing::warn!(error = %e, "request failed before a response arrived");
            Error::Transport {
                message: e.to_string(),
            }
        })?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();

        let mut resp_headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                resp_headers.insert(name.to_string(), v.to_string());
            }
        }

        // Get body as text first
        let body_text = response.text()?;

        // Try to parse as JSON
        let body = serde_json::from_str(&body_text).unwrap_or(serde_json::Value::Null);

        tracing::debug!(status, "received response");

        Ok(HttpResponse {
            status,
            status_text,
            headers: resp_headers,
            body,
            body_text: Some(body_text),
        })
    }
}

/// Mock HTTP executor for testing.
///
/// Returns predefined responses based on request matching.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex, MutexGuard};

    /// A mock HTTP executor that returns predefined responses.
    ///
    /// Responses are looked up by `"METHOD path"` first, then by path alone.
    /// Queued responses (see [`MockExecutor::queue_response`]) take precedence
    /// over both and are consumed in order.
    #[derive(Clone, Default)]
    pub struct MockExecutor {
        /// Responses keyed by `"METHOD path"` or path.
        responses: Arc<Mutex<HashMap<String, HttpResponse>>>,
        /// One-shot responses returned before any keyed lookup.
        queued: Arc<Mutex<VecDeque<HttpResponse>>>,
        /// Default response when no match found.
        default_response: Arc<Mutex<Option<HttpResponse>>>,
        /// Recorded requests for verification.
        recorded_requests: Arc<Mutex<Vec<HttpRequest>>>,
        /// Error message to fail every request with.
        failure: Arc<Mutex<Option<String>>>,
    }

    // A poisoned lock only means another test thread panicked; the data is still usable.
    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    impl MockExecutor {
        /// Create a new mock executor.
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a response for a specific key (`"/products"` or `"GET /products"`).
        pub fn with_response(self, key: impl Into<String>, response: HttpResponse) -> Self {
            lock(&self.responses).insert(key.into(), response);
            self
        }

        /// Set a default response when no key matches.
        pub fn with_default_response(self, response: HttpResponse) -> Self {
            *lock(&self.default_response) = Some(response);
            self
        }

        /// Configure to fail all requests with a transport error.
        pub fn fail_with(self, message: impl Into<String>) -> Self {
            *lock(&self.failure) = Some(message.into());
            self
        }

        /// Queue a one-shot response.
        pub fn queue_response(&self, response: HttpResponse) {
            lock(&self.queued).push_back(response);
        }

        /// Get all recorded requests.
        pub fn recorded_requests(&self) -> Vec<HttpRequest> {
            lock(&self.recorded_requests).clone()
        }

        /// The most recently recorded request.
        pub fn last_request(&self) -> Option<HttpRequest> {
            lock(&self.recorded_requests).last().cloned()
        }

        /// Clear recorded requests.
        pub fn clear_recorded(&self) {
            lock(&self.recorded_requests).clear();
        }

        /// Create a 200 OK response with a JSON body.
        pub fn success_response(body: serde_json::Value) -> HttpResponse {
            HttpResponse::json_body(200, body)
        }

        /// Create an error response carrying a `message` field.
        pub fn error_response(status: u16, message: &str) -> HttpResponse {
            HttpResponse::json_body(status, serde_json::json!({ "message": message }))
        }

        /// Create a 404 Not Found response.
        pub fn not_found() -> HttpResponse {
            Self::error_response(404, "Not Found")
        }
    }

    impl HttpExecutor for MockExecutor {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
            lock(&self.recorded_requests).push(request.clone());

            if let Some(message) = lock(&self.failure).clone() {
                return Err(Error::Transport { message });
            }

            if let Some(response) = lock(&self.queued).pop_front() {
                return Ok(response);
            }

            let responses = lock(&self.responses);
            let keyed = format!("{} {}", request.method, request.path);
            if let Some(response) = responses.get(&keyed).or_else(|| responses.get(&request.path))
            {
                return Ok(response.clone());
            }

            if let Some(response) = lock(&self.default_response).clone() {
                return Ok(response);
            }

            Ok(Self::not_found())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockExecutor;
    use super::*;
    use crate::types::Method;
    use serde_json::json;

    #[test]
    fn mock_executor_returns_configured_response() {
        let executor = MockExecutor::new()
            .with_response("/test", MockExecutor::success_response(json!({"result": "success"})));

        let result = executor.execute(&HttpRequest::get("/test")).unwrap();

        assert_eq!(result.status, 200);
        assert_eq!(result.body, json!({"result": "success"}));
    }

    #[test]
    fn mock_executor_prefers_method_specific_key() {
        let executor = MockExecutor::new()
            .with_response("/products/1", MockExecutor::success_response(json!("any")))
            .with_response(
                "DELETE /products/1",
                MockExecutor::success_response(json!("deleted")),
            );

        let get = executor.execute(&HttpRequest::get("/products/1")).unwrap();
        let delete = executor.execute(&HttpRequest::delete("/products/1")).unwrap();

        assert_eq!(get.body, json!("any"));
        assert_eq!(delete.body, json!("deleted"));
    }

    #[test]
    fn mock_executor_queued_responses_come_first() {
        let executor = MockExecutor::new()
            .with_default_response(MockExecutor::success_response(json!("default")));
        executor.queue_response(MockExecutor::success_response(json!("first")));

        let first = executor.execute(&HttpRequest::get("/x")).unwrap();
        let second = executor.execute(&HttpRequest::get("/x")).unwrap();

        assert_eq!(first.body, json!("first"));
        assert_eq!(second.body, json!("default"));
    }

    #[test]
    fn mock_executor_returns_404_when_no_match() {
        let executor = MockExecutor::new();
        let result = executor.execute(&HttpRequest::get("/unknown")).unwrap();

        assert_eq!(result.status, 404);
        assert_eq!(result.message(), Some("Not Found"));
    }

    #[test]
    fn mock_executor_fails_when_configured() {
        let executor = MockExecutor::new().fail_with("Network error");
        let result = executor.execute(&HttpRequest::get("/any"));

        match result {
            Err(Error::Transport { message }) => assert_eq!(message, "Network error"),
            other => panic!("expected transport failure, got {:?}", other),
        }
    }

    #[test]
    fn mock_executor_records_requests() {
        let executor = MockExecutor::new()
            .with_default_response(MockExecutor::success_response(serde_json::Value::Null));

        executor.execute(&HttpRequest::get("/first")).unwrap();
        executor.execute(&HttpRequest::post("/second")).unwrap();
        executor.execute(&HttpRequest::delete("/third")).unwrap();

        let recorded = executor.recorded_requests();
        assert_eq!(recorded.len(), 3);
        assert_eq!(recorded[0].path, "/first");
        assert_eq!(recorded[0].method, Method::GET);
        assert_eq!(recorded[1].method, Method::POST);
        assert_eq!(recorded[2].method, Method::DELETE);
        assert_eq!(executor.last_request().unwrap().path, "/third");

        executor.clear_recorded();
        assert!(executor.recorded_requests().is_empty());
    }

    #[test]
    fn executor_by_reference() {
        let executor = MockExecutor::new();
        let by_ref: &dyn HttpExecutor = &executor;
        by_ref.execute(&HttpRequest::get("/a")).unwrap();
        assert_eq!(executor.recorded_requests().len(), 1);
    }

    #[test]
    fn reqwest_executor_builds_urls() {
        let executor = ReqwestExecutor::with_default_timeout("http://localhost:8080").unwrap();

        let request = HttpRequest::get("/api/products")
            .with_query("name", "foo bar")
            .with_query("minimum", "10");
        let url = executor.build_url(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/products?name=foo+bar&minimum=10"
        );

        let url = executor.build_url(&HttpRequest::get("/products/7")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/products/7");

        assert_eq!(url_for(&executor, &request), request.target());
    }

    #[test]
    fn reqwest_executor_keeps_encoded_segments() {
        let executor = ReqwestExecutor::with_default_timeout("http://localhost:8080").unwrap();

        let request = HttpRequest::delete("/products/7%2Fpurchase");
        let url = executor.build_url(&request).unwrap();
        assert_eq!(url.path(), "/products/7%2Fpurchase");
        assert_eq!(url.query(), None);

        let request = HttpRequest::get("/products/1%3Fname%3Dx").with_query("category", "Toy");
        assert_eq!(url_for(&executor, &request), request.target());
    }

    fn url_for(executor: &ReqwestExecutor, request: &HttpRequest) -> String {
        let url = executor.build_url(request).unwrap();
        match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }
    }

    #[test]
    fn reqwest_executor_rejects_bad_base_url() {
        assert!(matches!(
            ReqwestExecutor::with_default_timeout("not a url"),
            Err(Error::UrlParse(_))
        ));
        assert!(matches!(
            ReqwestExecutor::with_default_timeout("mailto:ops@example.com"),
            Err(Error::InvalidUrl { .. })
        ));
    }
}
