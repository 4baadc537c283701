//! Error taxonomy for the data-access layer.
//!
//! Every transport failure funnels through these variants; accessors never
//! leak a raw reqwest error. `status()` follows the backend convention of 0
//! for failures that never produced an HTTP response.

use serde_json::Value;
use thiserror::Error;

/// Error raised by the API client.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The per-request timer fired before the call settled; the in-flight
  /// request was aborted.
  #[error("timeout")]
  Timeout,

  /// The call failed before reaching the server (DNS, connection refused,
  /// TLS handshake).
  #[error("network_error")]
  Network {
    /// Underlying transport error text.
    message: String,
  },

  /// The server answered with a non-success status.
  #[error("{message}")]
  Http {
    status: u16,
    /// Server-provided `error`/`message` field, or `HTTP <status>`.
    message: String,
    /// Parsed response body, or `{"_raw": <text>}` for non-JSON bodies.
    body: Value,
  },
}

impl ApiError {
  /// HTTP status of the failure; 0 for timeouts and network errors.
  pub fn status(&self) -> u16 {
    match self {
      ApiError::Timeout | ApiError::Network { .. } => 0,
      ApiError::Http { status, .. } => *status,
    }
  }

  /// Whether a caller may reasonably retry. Timeouts and connectivity
  /// failures are transient; server-reported errors are not, so their
  /// message should be shown rather than blindly retried.
  pub fn is_transient(&self) -> bool {
    matches!(self, ApiError::Timeout | ApiError::Network { .. })
  }

  /// Response body for server-reported failures.
  pub fn body(&self) -> Option<&Value> {
    match self {
      ApiError::Http { body, .. } => Some(body),
      _ => None,
    }
  }

  /// Build the error for a non-success response. The message is taken from
  /// the body's `error` or `message` field when the server provided one.
  pub(crate) fn from_response(status: u16, body: Value) -> Self {
    let message = server_message(&body).unwrap_or_else(|| format!("HTTP {status}"));
    ApiError::Http {
      status,
      message,
      body,
    }
  }
}

impl From<reqwest::Error> for ApiError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      ApiError::Timeout
    } else {
      ApiError::Network {
        message: err.to_string(),
      }
    }
  }
}

/// Probe the error body for a human-readable message. The backend has used
/// both `{"error": "..."}` and `{"message": "..."}` envelopes.
fn server_message(body: &Value) -> Option<String> {
  for candidate in [&body["error"], &body["message"], &body["error"]["message"]] {
    if let Some(text) = candidate.as_str() {
      return Some(text.to_string());
    }
  }
  None
}
