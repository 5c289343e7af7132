//! Caching subsystem.
//!
//! Two pieces:
//!
//! - [`key::cache_key`] — deterministic key derivation from a resource and
//!   its query string. Canonicalisation lives here so every caller agrees
//!   on which requests share an entry.
//!
//! - [`tiered::TieredCache`] — the fresh/stale store itself. One logical
//!   entry per key, materialised in two moka stores with different TTLs;
//!   see [`tiered`] module docs for the tier semantics.

pub mod key;
pub mod tiered;

pub use key::cache_key;
pub use tiered::{CacheConfig, STALE_TTL_FACTOR, TieredCache};
