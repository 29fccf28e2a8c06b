//! Field metadata caching.
//!
//! Field descriptors change rarely, so they are kept per (connector, model)
//! for a freshness window instead of being fetched on every model switch.

mod clock;
mod field_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use field_cache::{CachedFields, FieldCacheConfig, FieldCacheConfigBuilder, FieldMetadataCache};
