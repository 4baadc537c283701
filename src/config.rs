use std::env;

/// Environment variable holding the backend base URL.
const BASE_URL_VAR: &str = "TRADEWINDS_API_URL";

/// Local dev backend, used when the variable is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// Client configuration.
///
/// The base URL is the only environment-driven knob at this layer; request
/// timeouts and cache TTLs are tuned through the client builders instead.
#[derive(Debug, Clone)]
pub struct Config {
  pub base_url: String,
}

impl Config {
  /// Resolve the base URL from `TRADEWINDS_API_URL`, falling back to the
  /// local dev default.
  pub fn from_env() -> Self {
    let base_url = env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    Self { base_url }
  }

  /// Explicit base URL, for tests and CLI overrides.
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_explicit_base_url() {
    let config = Config::new("https://api.tradewinds.example");
    assert_eq!(config.base_url, "https://api.tradewinds.example");
  }

  // Env resolution lives in one test so the variable is never touched from
  // two test threads at once.
  #[test]
  fn test_from_env_resolution() {
    env::remove_var(BASE_URL_VAR);
    assert_eq!(Config::from_env().base_url, DEFAULT_BASE_URL);

    env::set_var(BASE_URL_VAR, "https://staging.tradewinds.example");
    assert_eq!(
      Config::from_env().base_url,
      "https://staging.tradewinds.example"
    );
    env::remove_var(BASE_URL_VAR);
  }
}
