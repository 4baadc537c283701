//! Typed accessors over the storefront endpoints.
//!
//! Wraps the transport with shape normalization and a small TTL cache for
//! the two payloads every page view needs. Everything else is an uncached
//! pass-through. Every accessor returns an always-shaped value or an
//! [`ApiError`]; no raw transport error escapes unwrapped.

use crate::api::shapes;
use crate::api::types::{
  decode_entity, decode_list, BlogPost, Category, Comment, HomeBundle, ListQuery, NewComment,
  Product, PushSubscription, Review, ReviewStats, VisitorEvent, VisitorIdentify, VisitorsSummary,
};
use crate::cache::{CacheKey, TtlCache};
use crate::config::Config;
use crate::error::ApiError;
use crate::http::HttpClient;
use serde_json::{json, Value};
use tracing::warn;

/// Client for the storefront API.
#[derive(Debug, Clone)]
pub struct ApiClient {
  http: HttpClient,
  cache: TtlCache,
}

impl ApiClient {
  /// Client with a fresh cache and default timeouts.
  pub fn new(config: &Config) -> Result<Self, ApiError> {
    Ok(Self::with_cache(HttpClient::new(config)?, TtlCache::new()))
  }

  /// Client over an explicit transport and cache. Tests construct isolated
  /// instances through here instead of sharing process-wide state.
  pub fn with_cache(http: HttpClient, cache: TtlCache) -> Self {
    Self { http, cache }
  }

  /// Get the home-page bundle (cached, 60 s TTL).
  pub async fn get_home(&self) -> Result<HomeBundle, ApiError> {
    let bundle = self.cached(CacheKey::Home, "/api/home").await?;
    Ok(HomeBundle::from_bundle(&bundle))
  }

  /// Get the web-push public key (cached, 1 h TTL).
  pub async fn get_push_public_key(&self) -> Result<Option<String>, ApiError> {
    let value = self
      .cached(CacheKey::PushPublicKey, "/api/push/public")
      .await?;
    Ok(shapes::string_key(&value, &["key", "publicKey"]))
  }

  /// List products, optionally filtered (not cached).
  pub async fn get_products(&self, query: &ListQuery) -> Result<Vec<Product>, ApiError> {
    let value = self.http.get_query("/api/products", &query.pairs()).await?;
    Ok(decode_list(shapes::list(&value, "products"), "product"))
  }

  /// Get one product by slug (not cached).
  pub async fn get_product(&self, slug: &str) -> Result<Option<Product>, ApiError> {
    let value = self.http.get(&format!("/api/products/{slug}")).await?;
    Ok(shapes::entity(&value, "product").and_then(|v| decode_entity(v, "product")))
  }

  /// List categories (not cached).
  pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
    let value = self.http.get("/api/categories").await?;
    Ok(decode_list(shapes::list(&value, "categories"), "category"))
  }

  /// List the products of one category (not cached).
  pub async fn get_category_products(&self, slug: &str) -> Result<Vec<Product>, ApiError> {
    let value = self
      .http
      .get(&format!("/api/categories/{slug}/products"))
      .await?;
    Ok(decode_list(shapes::list(&value, "products"), "product"))
  }

  /// List blog posts, optionally filtered (not cached).
  pub async fn get_blogs(&self, query: &ListQuery) -> Result<Vec<BlogPost>, ApiError> {
    let value = self.http.get_query("/api/blogs", &query.pairs()).await?;
    Ok(decode_list(shapes::list(&value, "blogs"), "blog"))
  }

  /// Get one blog post by slug (not cached).
  ///
  /// Resolves to `Ok(None)` instead of an error when the post cannot be
  /// found: the direct lookup falls back to a one-result search, and a
  /// failure of both legs reads as "not found". Both failures are logged
  /// with their status so a genuine outage stays visible.
  pub async fn get_blog(&self, slug: &str) -> Result<Option<BlogPost>, ApiError> {
    let slug = slug.trim();
    if slug.is_empty() {
      return Ok(None);
    }

    match self.http.get(&format!("/api/blogs/{slug}")).await {
      Ok(value) => {
        if let Some(post) = shapes::entity(&value, "blog").and_then(|v| decode_entity(v, "blog")) {
          return Ok(Some(post));
        }
      }
      Err(e) => {
        warn!(
          "direct blog lookup for {:?} failed (status {}): {}",
          slug,
          e.status(),
          e
        );
      }
    }

    let search = ListQuery {
      q: Some(slug.to_string()),
      limit: Some(1),
      ..ListQuery::default()
    };
    match self.get_blogs(&search).await {
      Ok(posts) => Ok(posts.into_iter().next()),
      Err(e) => {
        warn!(
          "blog search fallback for {:?} failed (status {}): {}",
          slug,
          e.status(),
          e
        );
        Ok(None)
      }
    }
  }

  /// Like a blog post, returning the updated like count (write, not cached).
  pub async fn like_blog(&self, id: &str) -> Result<u64, ApiError> {
    let value = self
      .http
      .post(&format!("/api/blogs/{id}/like"), &json!({}))
      .await?;
    Ok(shapes::count(&value, &["likes", "count"]).unwrap_or_default())
  }

  /// List the comments of a blog post (not cached).
  pub async fn get_comments(&self, id: &str) -> Result<Vec<Comment>, ApiError> {
    let value = self.http.get(&format!("/api/blogs/{id}/comments")).await?;
    Ok(decode_list(shapes::list(&value, "comments"), "comment"))
  }

  /// Post a comment on a blog post, returning the created comment when the
  /// backend echoes it (write, not cached).
  pub async fn post_comment(
    &self,
    id: &str,
    comment: &NewComment,
  ) -> Result<Option<Comment>, ApiError> {
    let value = self
      .http
      .post(&format!("/api/blogs/{id}/comments"), comment)
      .await?;
    Ok(shapes::entity(&value, "comment").and_then(|v| decode_entity(v, "comment")))
  }

  /// List reviews, optionally filtered (not cached).
  pub async fn get_reviews(&self, query: &ListQuery) -> Result<Vec<Review>, ApiError> {
    let value = self.http.get_query("/api/reviews", &query.pairs()).await?;
    Ok(decode_list(shapes::list(&value, "reviews"), "review"))
  }

  /// Get aggregate review statistics (not cached).
  pub async fn get_review_stats(&self) -> Result<ReviewStats, ApiError> {
    let value = self.http.get("/api/reviews/stats").await?;
    let stats = shapes::entity(&value, "stats").and_then(|v| decode_entity(v, "stats"));
    Ok(stats.unwrap_or_default())
  }

  /// Report a visitor identity (write, not cached).
  pub async fn identify_visitor(&self, identify: &VisitorIdentify) -> Result<(), ApiError> {
    self.http.post("/api/visitors/identify", identify).await?;
    Ok(())
  }

  /// Record a visitor event (write, not cached).
  pub async fn record_event(&self, event: &VisitorEvent) -> Result<(), ApiError> {
    self.http.post("/api/visitors/event", event).await?;
    Ok(())
  }

  /// Register a web-push subscription (write, not cached).
  pub async fn subscribe_push(&self, subscription: &PushSubscription) -> Result<(), ApiError> {
    self.http.post("/api/push/subscribe", subscription).await?;
    Ok(())
  }

  /// Get the visitor summary metrics (not cached).
  pub async fn get_visitors_summary(&self) -> Result<VisitorsSummary, ApiError> {
    let value = self.http.get("/api/metrics/visitors/summary").await?;
    let summary = shapes::entity(&value, "summary").and_then(|v| decode_entity(v, "summary"));
    Ok(summary.unwrap_or_default())
  }

  /// Check the cache, refresh on a miss, and fall back to a stale payload
  /// when the refresh fails and one exists. Error states are never stored.
  async fn cached(&self, key: CacheKey, path: &str) -> Result<Value, ApiError> {
    if let Some(fresh) = self.cache.fresh(key) {
      return Ok(fresh);
    }

    match self.http.get(path).await {
      Ok(value) => {
        self.cache.store(key, value.clone());
        Ok(value)
      }
      Err(e) => match self.cache.stale_or_fresh(key) {
        Some(stale) => {
          warn!(
            "serving stale {:?} payload after refresh failure (status {}): {}",
            key,
            e.status(),
            e
          );
          Ok(stale)
        }
        None => Err(e),
      },
    }
  }
}
