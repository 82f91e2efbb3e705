use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::sync::Cache;
use tracing::debug;

use crate::app::query::{CacheTag, QueryData, QueryKey};

const MAX_ENTRIES: u64 = 512;

/// Genres rarely change, so they outlive every other entry.
struct QueryExpiry {
    ttl: Duration,
}

impl Expiry<QueryKey, QueryData> for QueryExpiry {
    fn expire_after_create(
        &self,
        _key: &QueryKey,
        value: &QueryData,
        _created_at: Instant,
    ) -> Option<Duration> {
        match value {
            QueryData::Genres(_) => None,
            _ => Some(self.ttl),
        }
    }
}

/// Query results keyed by normalized parameters, invalidated by tag.
pub struct QueryCache {
    entries: Cache<QueryKey, QueryData>,
    tags: HashMap<CacheTag, HashSet<QueryKey>>,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .expire_after(QueryExpiry { ttl })
            .build();

        Self {
            entries,
            tags: HashMap::new(),
        }
    }

    pub fn get(&self, key: &QueryKey) -> Option<QueryData> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: QueryKey, data: QueryData, tags: Vec<CacheTag>) {
        self.prune_evicted();
        self.untag(&key);
        for tag in tags {
            self.tags.entry(tag).or_default().insert(key.clone());
        }
        self.entries.insert(key, data);
    }

    pub fn invalidate(&mut self, key: &QueryKey) {
        self.prune_evicted();
        self.entries.invalidate(key);
        self.untag(key);
    }

    /// Drops every entry carrying `tag`, returning how many keys were dropped.
    pub fn invalidate_tag(&mut self, tag: CacheTag) -> usize {
        self.prune_evicted();
        let Some(keys) = self.tags.remove(&tag) else {
            return 0;
        };
        for key in &keys {
            self.entries.invalidate(key);
        }
        for other in self.tags.values_mut() {
            other.retain(|key| !keys.contains(key));
        }
        self.tags.retain(|_, keys| !keys.is_empty());
        debug!(?tag, dropped = keys.len(), "invalidated cache tag");
        keys.len()
    }

    /// Forgets the tags of keys moka dropped on its own, by TTL or capacity.
    fn prune_evicted(&mut self) {
        let entries = &self.entries;
        for keys in self.tags.values_mut() {
            keys.retain(|key| entries.contains_key(key));
        }
        self.tags.retain(|_, keys| !keys.is_empty());
    }

    fn untag(&mut self, key: &QueryKey) {
        for keys in self.tags.values_mut() {
            keys.remove(key);
        }
        self.tags.retain(|_, keys| !keys.is_empty());
    }
}
