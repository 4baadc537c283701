//! Data-access layer for the Tradewinds storefront API.
//!
//! The backend is a plain HTTP/JSON API with session-cookie auth and
//! historically inconsistent payload shapes. This crate owns the parts the
//! site cannot get wrong:
//!
//! - bounded-timeout requests that always send credentials ([`http`]),
//! - normalization of the backend's payload shapes ([`api::shapes`]),
//! - a small TTL cache for the home bundle and the push public key
//!   ([`cache`]),
//! - one typed error taxonomy for every transport failure ([`error`]).
//!
//! [`api::ApiClient`] is the entry point; the `tradewinds` binary wraps it
//! for probing endpoints from the command line.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;

pub use api::client::ApiClient;
pub use api::types::ListQuery;
pub use cache::{CacheKey, TtlCache};
pub use config::Config;
pub use error::ApiError;
pub use http::{HttpClient, RetryPolicy};
