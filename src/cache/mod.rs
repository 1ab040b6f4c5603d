//! Offline asset cache
//!
//! Static page assets are loaded once at install and served cache-first,
//! falling back to the asset directory on a miss.

pub mod asset_cache;

pub use asset_cache::{content_type_for, AssetCache, CacheError, CachedAsset, CACHE_NAME, PRECACHE_URLS};
