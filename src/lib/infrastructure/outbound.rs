//! Outbound JSON-over-HTTP calls.
//!
//! Nothing in here fails loudly: a call that does not produce a response is
//! `None`, and so is a body that does not decode.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, ACCEPT, CONTENT_TYPE},
    Client, Method, StatusCode, Url,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

#[cfg(test)]
use mockall::mock;

/// An outbound request
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method
    pub method: Method,

    /// The full URL
    pub url: String,

    /// Extra headers, on top of the JSON `accept` and `content-type`
    pub headers: Vec<(String, String)>,

    /// The JSON body
    pub body: Option<Value>,
}

impl HttpRequest {
    /// A POST request to `url`
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A GET request to `url`
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            ..Self::post(url)
        }
    }

    /// Adds a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the JSON body
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The value of the first header called `name`, compared case-insensitively
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The host the request goes to. Safe to log, unlike the full URL which
    /// may carry a token in its path.
    pub fn host(&self) -> String {
        Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| "<invalid url>".to_string())
    }
}

/// A response that made it back to us, whatever its status
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The status code
    pub status: StatusCode,

    /// The response headers
    pub headers: HeaderMap,

    /// The raw body
    pub body: String,
}

impl HttpResponse {
    /// A response with no headers
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Decodes the body as JSON, or `None` if it does not fit `T`
    pub fn parse_json<T: DeserializeOwned>(&self) -> Option<T> {
        match serde_json::from_str(&self.body) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(error = %err, status = %self.status, "could not decode response body");
                None
            }
        }
    }
}

/// Issues outbound HTTP calls
#[async_trait]
pub trait HttpClient: Clone + Send + Sync + 'static {
    /// Performs the request.
    ///
    /// # Returns
    /// [`Some`] with the response for any status code, or [`None`] if no
    /// response was received (DNS, TLS, connection or timeout failure).
    async fn call(&self, request: HttpRequest) -> Option<HttpResponse>;
}

#[cfg(test)]
mock! {
    pub HttpClient {}

    impl Clone for HttpClient {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl HttpClient for HttpClient {
        async fn call(&self, request: HttpRequest) -> Option<HttpResponse>;
    }
}

/// [`HttpClient`] backed by a shared [`reqwest::Client`]
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Create a new client with its own connection pool
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn call(&self, request: HttpRequest) -> Option<HttpResponse> {
        let host = request.host();

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(host = %host, error = %err, "outbound request failed");
                return None;
            }
        };

        let status = response.status();
        let headers = response.headers().clone();

        match response.text().await {
            Ok(body) => {
                debug!(host = %host, %status, "outbound request completed");
                Some(HttpResponse {
                    status,
                    headers,
                    body,
                })
            }
            Err(err) => {
                warn!(host = %host, %status, error = %err, "could not read response body");
                None
            }
        }
    }
}
