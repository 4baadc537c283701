//! Domain types decoded from the storefront API.
//!
//! Decoding is tolerant: fields are defaulted so older backend versions
//! that omit them still decode, and historically renamed fields carry
//! aliases. Records that fail to decode anyway are skipped with a warning
//! instead of failing the whole call.

use crate::api::shapes;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
  #[serde(alias = "_id")]
  pub id: String,
  pub slug: String,
  #[serde(alias = "title")]
  pub name: String,
  pub description: String,
  /// Slug of the owning category.
  pub category: String,
  #[serde(alias = "imageUrl")]
  pub image: String,
  pub price: Option<f64>,
  pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
  #[serde(alias = "_id")]
  pub id: String,
  pub slug: String,
  #[serde(alias = "title")]
  pub name: String,
  pub description: String,
  #[serde(alias = "imageUrl")]
  pub image: String,
}

// ============================================================================
// Blog
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogPost {
  #[serde(alias = "_id")]
  pub id: String,
  pub slug: String,
  pub title: String,
  pub excerpt: String,
  #[serde(alias = "body")]
  pub content: String,
  #[serde(alias = "image")]
  pub cover_image: String,
  pub author: String,
  pub likes: u64,
  #[serde(alias = "createdAt")]
  pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Comment {
  #[serde(alias = "_id")]
  pub id: String,
  #[serde(alias = "name")]
  pub author: String,
  #[serde(alias = "text")]
  pub message: String,
  pub created_at: Option<DateTime<Utc>>,
}

/// Outbound comment payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewComment {
  pub author: String,
  pub message: String,
}

// ============================================================================
// Reviews
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Review {
  #[serde(alias = "_id")]
  pub id: String,
  #[serde(alias = "name")]
  pub author: String,
  pub rating: f32,
  #[serde(alias = "comment")]
  pub message: String,
  /// Slug of the reviewed product, when the review is product-scoped.
  pub product: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReviewStats {
  #[serde(alias = "total")]
  pub count: u64,
  #[serde(alias = "avg")]
  pub average: f64,
}

// ============================================================================
// Home bundle
// ============================================================================

/// The `/api/home` payload: one response carrying everything the landing
/// page renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HomeBundle {
  /// Hero section content, passed through untyped.
  pub hero: Option<Value>,
  pub products: Vec<Product>,
  pub categories: Vec<Category>,
  pub blogs: Vec<BlogPost>,
  pub reviews: Vec<Review>,
}

impl HomeBundle {
  /// Assemble from the raw bundle, normalizing each embedded list through
  /// the usual shape probes and skipping records that fail to decode.
  pub(crate) fn from_bundle(value: &Value) -> Self {
    let hero = value
      .get("hero")
      .or_else(|| value.get("data").and_then(|data| data.get("hero")))
      .filter(|v| !v.is_null())
      .cloned();
    Self {
      hero,
      products: decode_list(shapes::list(value, "products"), "product"),
      categories: decode_list(shapes::list(value, "categories"), "category"),
      blogs: decode_list(shapes::list(value, "blogs"), "blog"),
      reviews: decode_list(shapes::list(value, "reviews"), "review"),
    }
  }
}

// ============================================================================
// Visitors & push
// ============================================================================

/// Outbound payload for `/api/visitors/identify`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisitorIdentify {
  pub visitor_id: String,
  pub referrer: Option<String>,
  pub landing_page: Option<String>,
}

/// Outbound payload for `/api/visitors/event`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisitorEvent {
  pub visitor_id: String,
  pub event: String,
  pub page: Option<String>,
  pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisitorsSummary {
  #[serde(alias = "totalVisitors")]
  pub total: u64,
  #[serde(alias = "visitorsToday")]
  pub today: u64,
  #[serde(alias = "totalEvents")]
  pub events: u64,
}

/// Outbound payload for `/api/push/subscribe`, mirroring the browser
/// `PushSubscription` JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PushSubscription {
  pub endpoint: String,
  pub keys: PushKeys,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PushKeys {
  pub p256dh: String,
  pub auth: String,
}

// ============================================================================
// List queries
// ============================================================================

/// Optional list filters; `None` fields stay out of the query string.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
  pub q: Option<String>,
  pub category: Option<String>,
  pub limit: Option<u32>,
}

impl ListQuery {
  pub(crate) fn pairs(&self) -> Vec<(&'static str, Option<String>)> {
    vec![
      ("q", self.q.clone()),
      ("category", self.category.clone()),
      ("limit", self.limit.map(|n| n.to_string())),
    ]
  }
}

// ============================================================================
// Decode helpers
// ============================================================================

/// Decode each record, skipping any that fail.
pub(crate) fn decode_list<T: DeserializeOwned>(items: Vec<Value>, what: &str) -> Vec<T> {
  items
    .into_iter()
    .filter_map(|item| match serde_json::from_value(item) {
      Ok(decoded) => Some(decoded),
      Err(e) => {
        warn!("skipping {} record that failed to decode: {}", what, e);
        None
      }
    })
    .collect()
}

/// Decode a single entity, mapping failure to `None`.
pub(crate) fn decode_entity<T: DeserializeOwned>(value: Value, what: &str) -> Option<T> {
  match serde_json::from_value(value) {
    Ok(decoded) => Some(decoded),
    Err(e) => {
      warn!("discarding {} entity that failed to decode: {}", what, e);
      None
    }
  }
}
