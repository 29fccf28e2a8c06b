//! Per-connector, per-model field descriptor cache.

use crate::{Clock, SystemClock};
use chrono::{DateTime, TimeDelta, Utc};
use playground_core::FieldDescriptor;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Configuration for [`FieldMetadataCache`].
#[derive(Debug, Clone, derive_getters::Getters, derive_builder::Builder)]
pub struct FieldCacheConfig {
    /// How long an entry stays fresh after it was fetched.
    #[builder(default = "TimeDelta::hours(24)")]
    ttl: TimeDelta,
}

impl Default for FieldCacheConfig {
    fn default() -> Self {
        Self {
            ttl: TimeDelta::hours(24),
        }
    }
}

impl FieldCacheConfig {
    /// Returns a copy with a different freshness window.
    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }
}

/// One cached fetch result.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct CachedFields {
    /// When the descriptors were fetched
    fetched_at: DateTime<Utc>,
    /// The descriptors as returned by the service
    fields: Vec<FieldDescriptor>,
}

impl CachedFields {
    /// Whether the entry may still be served at `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now - self.fetched_at < ttl
    }
}

/// Field descriptors keyed connector → model → entry.
///
/// Entries are created on the first successful fetch and overwritten on
/// refresh. Nothing is evicted proactively: an expired entry is simply
/// treated as absent when read. The cache is owned by one browsing session
/// and lives exactly as long as it does.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use playground_cache::{FieldCacheConfig, FieldMetadataCache, ManualClock};
/// use playground_core::FieldDescriptor;
/// use std::sync::Arc;
///
/// let clock = ManualClock::default();
/// let mut cache = FieldMetadataCache::with_clock(FieldCacheConfig::default(), Arc::new(clock.clone()));
///
/// cache.insert("hubspot", "crmContact", vec![FieldDescriptor::new("email", "text")]);
/// assert!(cache.get("hubspot", "crmContact").is_some());
///
/// clock.advance(TimeDelta::hours(24));
/// assert!(cache.get("hubspot", "crmContact").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct FieldMetadataCache {
    config: FieldCacheConfig,
    clock: Arc<dyn Clock>,
    entries: HashMap<String, HashMap<String, CachedFields>>,
}

impl FieldMetadataCache {
    /// Creates an empty cache using wall-clock time.
    pub fn new(config: FieldCacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(config: FieldCacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            entries: HashMap::new(),
        }
    }

    /// Returns the fresh descriptors for (connector, model), if any.
    #[instrument(skip(self))]
    pub fn get(&self, connector: &str, model: &str) -> Option<&[FieldDescriptor]> {
        let entry = self.entries.get(connector)?.get(model)?;
        let now = self.clock.now();
        if entry.is_fresh(now, self.config.ttl) {
            debug!(fields = entry.fields.len(), "Field cache hit");
            Some(&entry.fields)
        } else {
            debug!(fetched_at = %entry.fetched_at, "Field cache entry expired");
            None
        }
    }

    /// Stores freshly fetched descriptors, stamped with the current time.
    #[instrument(skip(self, descriptors), fields(count = descriptors.len()))]
    pub fn insert(&mut self, connector: &str, model: &str, descriptors: Vec<FieldDescriptor>) {
        let entry = CachedFields {
            fetched_at: self.clock.now(),
            fields: descriptors,
        };
        self.entries
            .entry(connector.to_string())
            .or_default()
            .insert(model.to_string(), entry);
        debug!("Field cache entry stored");
    }

    /// Number of (connector, model) entries, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The active configuration.
    pub fn config(&self) -> &FieldCacheConfig {
        &self.config
    }
}

impl Default for FieldMetadataCache {
    fn default() -> Self {
        Self::new(FieldCacheConfig::default())
    }
}
