use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

/// How long a rendered index page stays valid.
pub const INDEX_TTL: Duration = Duration::from_secs(10);

struct CachedPage {
    body: Vec<u8>,
    stored_at: Instant,
}

/// TTL cache of rendered response bytes, keyed by namespace plus the full
/// query string. Reads within the TTL replay the stored bytes verbatim,
/// even if the underlying data changed in between.
#[derive(Clone)]
pub struct PageCache {
    store: Arc<DashMap<String, CachedPage>>,
    ttl: Duration,
}

impl PageCache {
    pub fn new(ttl: Duration) -> Self {
        Self { store: Arc::new(DashMap::new()), ttl }
    }

    pub fn key(namespace: &str, query: &str) -> String {
        format!("{namespace}?{query}")
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.store.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                return Some(entry.body.clone());
            }
            Some(_) => {}
            None => return None,
        }
        // expired: drop it so the next write restarts the TTL
        self.store.remove(key);
        None
    }

    pub fn put(&self, key: String, body: Vec<u8>) {
        self.store.insert(key, CachedPage { body, stored_at: Instant::now() });
    }

    /// Purge every entry immediately.
    pub fn clear(&self) {
        self.store.clear();
    }
}
