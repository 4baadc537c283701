//! In-memory TTL cache for the two endpoints every page view hits.
//!
//! The cache is deliberately closed over two keys: the home-page bundle and
//! the web-push public key. Everything else goes straight to the network.
//! Slots are only ever overwritten by successful fetches, so a slot either
//! holds the last good payload or has never been filled; failed refreshes
//! cannot clobber it. Concurrent refreshes of the same key are last-write-
//! wins; there is no request coalescing.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Keys of the cached endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
  /// `GET /api/home` bundle.
  Home,
  /// `GET /api/push/public` VAPID key.
  PushPublicKey,
}

#[derive(Debug)]
struct Slot {
  ttl: Duration,
  payload: Option<Value>,
  fetched_at: Option<DateTime<Utc>>,
}

impl Slot {
  fn empty(ttl: Duration) -> Self {
    Self {
      ttl,
      payload: None,
      fetched_at: None,
    }
  }
}

/// TTL cache with one slot per [`CacheKey`].
///
/// Constructed by the caller and handed to the client, so tests get
/// isolated instances instead of sharing module-level state. Clones share
/// the slots.
#[derive(Debug, Clone)]
pub struct TtlCache {
  slots: Arc<Mutex<HashMap<CacheKey, Slot>>>,
}

impl TtlCache {
  /// Cache with the production TTLs: the home bundle refreshes every
  /// minute, the push key every hour.
  pub fn new() -> Self {
    let mut slots = HashMap::new();
    slots.insert(CacheKey::Home, Slot::empty(Duration::seconds(60)));
    slots.insert(CacheKey::PushPublicKey, Slot::empty(Duration::hours(1)));
    Self {
      slots: Arc::new(Mutex::new(slots)),
    }
  }

  /// Override one slot's TTL. `store` never touches TTLs, so this is the
  /// only way a TTL changes after construction.
  pub fn with_ttl(self, key: CacheKey, ttl: Duration) -> Self {
    {
      let mut slots = self.lock();
      if let Some(slot) = slots.get_mut(&key) {
        slot.ttl = ttl;
      }
    }
    self
  }

  /// Payload for `key` if it is still within its TTL. A stale payload may
  /// still be physically present; it is not returned here.
  pub fn fresh(&self, key: CacheKey) -> Option<Value> {
    let slots = self.lock();
    let slot = slots.get(&key)?;
    let fetched_at = slot.fetched_at?;
    if Utc::now() - fetched_at < slot.ttl {
      slot.payload.clone()
    } else {
      None
    }
  }

  /// Last successfully stored payload regardless of freshness. This is the
  /// stale-if-error read: callers use it only after a refresh has failed.
  pub fn stale_or_fresh(&self, key: CacheKey) -> Option<Value> {
    self.lock().get(&key).and_then(|slot| slot.payload.clone())
  }

  /// Overwrite the payload and reset the slot's clock. Only called with
  /// successful responses; error states are never stored.
  pub fn store(&self, key: CacheKey, payload: Value) {
    let mut slots = self.lock();
    if let Some(slot) = slots.get_mut(&key) {
      slot.payload = Some(payload);
      slot.fetched_at = Some(Utc::now());
    }
  }

  fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, Slot>> {
    match self.slots.lock() {
      Ok(guard) => guard,
      Err(poisoned) => poisoned.into_inner(),
    }
  }
}

impl Default for TtlCache {
  fn default() -> Self {
    Self::new()
  }
}
