pub mod client;
pub mod shapes;
pub mod types;

pub use client::ApiClient;
