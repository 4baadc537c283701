//! HTTP transport: URL construction, bounded-timeout requests, and the
//! single error funnel every call goes through.
//!
//! The backend uses session cookies, so the underlying client carries a
//! cookie store and every request sends credentials. Bodies are read as
//! text first and only then parsed, so a non-JSON body degrades to a
//! `{"_raw": <text>}` wrapper instead of failing the call.

use crate::config::Config;
use crate::error::ApiError;
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// Per-request timeout unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Retry behavior of the transport.
///
/// There is no retry at this layer. A timed-out or failed request surfaces
/// immediately; callers that want retries check [`ApiError::is_transient`]
/// and schedule their own. The variant exists so the policy is stated
/// rather than implied by missing code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryPolicy {
  #[default]
  None,
}

/// Thin wrapper over reqwest bound to one base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
  http: Client,
  base_url: String,
  timeout: Duration,
  retry: RetryPolicy,
}

impl HttpClient {
  pub fn new(config: &Config) -> Result<Self, ApiError> {
    let http = Client::builder()
      .cookie_store(true)
      .user_agent(concat!("tradewinds/", env!("CARGO_PKG_VERSION")))
      .build()?;

    Ok(Self {
      http,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      timeout: DEFAULT_TIMEOUT,
      retry: RetryPolicy::None,
    })
  }

  /// Replace the default timeout for every request issued by this client.
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn retry_policy(&self) -> RetryPolicy {
    self.retry
  }

  /// Build the full URL for `path`, appending the query pairs whose value
  /// is `Some`. Absolute `http(s)` paths pass through without the base
  /// prefix.
  pub fn build_url(&self, path: &str, query: &[(&str, Option<String>)]) -> Result<Url, ApiError> {
    let full = if path.starts_with("http://") || path.starts_with("https://") {
      path.to_string()
    } else {
      format!("{}{}", self.base_url, path)
    };

    let mut url = Url::parse(&full).map_err(|e| ApiError::Network {
      message: format!("invalid url {full}: {e}"),
    })?;

    let pairs: Vec<(&str, &str)> = query
      .iter()
      .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v)))
      .collect();
    if !pairs.is_empty() {
      // query_pairs_mut leaves a dangling `?` when nothing is appended,
      // hence the emptiness check above.
      let mut serializer = url.query_pairs_mut();
      for (key, value) in pairs {
        serializer.append_pair(key, value);
      }
    }

    Ok(url)
  }

  pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
    let url = self.build_url(path, &[])?;
    self
      .request_json::<Value>(Method::GET, url, None, None)
      .await
  }

  pub async fn get_query(
    &self,
    path: &str,
    query: &[(&str, Option<String>)],
  ) -> Result<Value, ApiError> {
    let url = self.build_url(path, query)?;
    self
      .request_json::<Value>(Method::GET, url, None, None)
      .await
  }

  pub async fn post<B>(&self, path: &str, body: &B) -> Result<Value, ApiError>
  where
    B: Serialize + ?Sized,
  {
    let url = self.build_url(path, &[])?;
    self.request_json(Method::POST, url, Some(body), None).await
  }

  /// Core request path. Every accessor funnels through here, so the error
  /// taxonomy is constructed in exactly one place.
  ///
  /// The timeout aborts the in-flight call when it fires; `timeout`
  /// overrides the client default for this one request.
  pub async fn request_json<B>(
    &self,
    method: Method,
    url: Url,
    body: Option<&B>,
    timeout: Option<Duration>,
  ) -> Result<Value, ApiError>
  where
    B: Serialize + ?Sized,
  {
    let started = Instant::now();

    let mut request = self
      .http
      .request(method.clone(), url.clone())
      .timeout(timeout.unwrap_or(self.timeout));
    if let Some(body) = body {
      request = request.json(body);
    }

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;
    let value = parse_body(&text);

    debug!(
      %method,
      %url,
      status = status.as_u16(),
      elapsed_ms = started.elapsed().as_millis() as u64,
      "request"
    );

    if status.is_success() {
      Ok(value)
    } else {
      Err(ApiError::from_response(status.as_u16(), value))
    }
  }
}

/// Parse a response body, wrapping non-JSON text instead of failing.
fn parse_body(text: &str) -> Value {
  serde_json::from_str(text).unwrap_or_else(|_| json!({ "_raw": text }))
}
