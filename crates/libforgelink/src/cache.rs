use std::{
  collections::HashMap,
  sync::{Arc, Mutex},
};

use jiff::{SignedDuration, Timestamp};
use uuid::Uuid;

use crate::model::MatchOutcome;

/// Swappable key-value store for finished recommendations, keyed by order id.
/// The ranking engine itself never touches a cache; callers consult one
/// around it. TTL and explicit clearing are part of the contract.
pub trait RecommendationCache: Clone + Send + Sync + 'static {
  fn get(&self, order_id: Uuid, now: Timestamp) -> Option<MatchOutcome>;
  fn put(&self, order_id: Uuid, outcome: MatchOutcome, now: Timestamp);
  fn clear(&self);
  fn purge_expired(&self, now: Timestamp);
}

#[derive(Clone, Debug)]
pub struct MemoryCache {
  ttl: SignedDuration,
  entries: Arc<Mutex<HashMap<Uuid, (Timestamp, MatchOutcome)>>>,
}

impl MemoryCache {
  pub fn new(ttl: SignedDuration) -> MemoryCache {
    MemoryCache {
      ttl,
      entries: Arc::new(Mutex::new(HashMap::new())),
    }
  }

  fn expired(&self, stored_at: Timestamp, now: Timestamp) -> bool {
    now.saturating_sub(self.ttl).unwrap() > stored_at
  }
}

impl RecommendationCache for MemoryCache {
  fn get(&self, order_id: Uuid, now: Timestamp) -> Option<MatchOutcome> {
    let entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    match entries.get(&order_id) {
      Some((stored_at, outcome)) if !self.expired(*stored_at, now) => Some(outcome.clone()),
      _ => None,
    }
  }

  fn put(&self, order_id: Uuid, outcome: MatchOutcome, now: Timestamp) {
    let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    entries.insert(order_id, (now, outcome));
  }

  fn clear(&self) {
    let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    entries.clear();
  }

  fn purge_expired(&self, now: Timestamp) {
    let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    entries.retain(|_, (stored_at, _)| !self.expired(*stored_at, now));
  }
}
