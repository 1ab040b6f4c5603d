//! Install-once asset cache keyed by request path

use std::{
    collections::HashMap,
    path::{Component, Path, PathBuf},
    sync::{Arc, RwLock},
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Cache name, bumped whenever the precache list changes
pub const CACHE_NAME: &str = "meditation-timer-cache-v1";

/// Assets stored at install time
pub const PRECACHE_URLS: &[&str] = &[
    "./",
    "./index.html",
    "./style.css",
    "./script.js",
    "./512.png",
    "./bell.wav",
];

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path {0:?} escapes the asset directory")]
    OutsideRoot(String),

    #[error("cache lock poisoned")]
    Poisoned,
}

/// One cached response body
#[derive(Debug, Clone)]
pub struct CachedAsset {
    pub content_type: &'static str,
    pub body: Arc<[u8]>,
}

/// Asset cache rooted at a directory on disk
#[derive(Debug)]
pub struct AssetCache {
    root: PathBuf,
    entries: RwLock<HashMap<String, CachedAsset>>,
}

impl AssetCache {
    /// Create an empty cache; call [`AssetCache::install`] to populate it
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every URL in `urls`. Either all of them are stored or none are.
    pub async fn install(&self, urls: &[&str]) -> Result<usize, CacheError> {
        info!("Installing {} with {} assets", CACHE_NAME, urls.len());

        let mut loaded = HashMap::with_capacity(urls.len());
        for url in urls {
            let key = cache_key(url);
            let asset = self.fetch(&key).await?;
            loaded.insert(key, asset);
        }

        let count = loaded.len();
        let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;
        entries.extend(loaded);
        info!("{} installed ({} entries)", CACHE_NAME, count);
        Ok(count)
    }

    /// Cached copy of `url`, if any
    pub fn lookup(&self, url: &str) -> Option<CachedAsset> {
        let entries = self.entries.read().ok()?;
        entries.get(&cache_key(url)).cloned()
    }

    /// Serve from cache, else read from the asset directory
    pub async fn respond(&self, url: &str) -> Result<CachedAsset, CacheError> {
        if let Some(asset) = self.lookup(url) {
            debug!("Cache hit: {}", url);
            return Ok(asset);
        }

        debug!("Cache miss, reading from disk: {}", url);
        self.fetch(&cache_key(url)).await
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn fetch(&self, key: &str) -> Result<CachedAsset, CacheError> {
        let path = self.resolve(key)?;
        let body = tokio::fs::read(&path).await.map_err(|source| {
            warn!("Failed to read asset {}: {}", path.display(), source);
            CacheError::Io { path: path.clone(), source }
        })?;

        Ok(CachedAsset {
            content_type: content_type_for(key),
            body: body.into(),
        })
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, CacheError> {
        let relative = Path::new(key.trim_start_matches('/'));
        if relative.components().any(|c| !matches!(c, Component::Normal(_))) {
            return Err(CacheError::OutsideRoot(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

/// Normalise `./x`, `/x` and `x` to `/x`; the site root maps to `/index.html`
fn cache_key(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_start_matches('.').trim_start_matches('/');
    if path.is_empty() {
        "/index.html".to_string()
    } else {
        format!("/{}", path)
    }
}

/// MIME type from the file extension
pub fn content_type_for(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()).as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_dir(name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("meditation-timer-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        for (file, body) in files {
            std::fs::write(dir.join(file), body).unwrap();
        }
        dir
    }

    #[test]
    fn keys_are_normalised() {
        assert_eq!(cache_key("./"), "/index.html");
        assert_eq!(cache_key("/"), "/index.html");
        assert_eq!(cache_key("./style.css"), "/style.css");
        assert_eq!(cache_key("/style.css?v=2"), "/style.css");
        assert_eq!(cache_key("script.js"), "/script.js");
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for("/bell.mp3"), "audio/mpeg");
        assert_eq!(content_type_for("/index.html"), "text/html; charset=utf-8");
        assert_eq!(content_type_for("/blob"), "application/octet-stream");
    }

    #[tokio::test]
    async fn install_then_serve_from_cache() {
        let dir = asset_dir("hit", &[("index.html", "<h1>timer</h1>"), ("style.css", "body{}")]);
        let cache = AssetCache::new(&dir);

        assert_eq!(cache.install(&["./", "./style.css"]).await.unwrap(), 2);
        std::fs::remove_dir_all(&dir).unwrap();

        let root = cache.respond("/").await.unwrap();
        assert_eq!(&*root.body, b"<h1>timer</h1>");
        assert_eq!(cache.respond("/style.css").await.unwrap().content_type, "text/css; charset=utf-8");
    }

    #[tokio::test]
    async fn miss_falls_back_to_disk() {
        let dir = asset_dir("miss", &[("extra.js", "let x = 1;")]);
        let cache = AssetCache::new(&dir);

        assert!(cache.lookup("/extra.js").is_none());
        let asset = cache.respond("/extra.js").await.unwrap();
        assert_eq!(&*asset.body, b"let x = 1;");
        assert!(cache.respond("/missing.css").await.is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn install_is_all_or_nothing() {
        let dir = asset_dir("partial", &[("index.html", "ok")]);
        let cache = AssetCache::new(&dir);

        assert!(cache.install(PRECACHE_URLS).await.is_err());
        assert!(cache.is_empty());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn shipped_assets_install() {
        let cache = AssetCache::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"));
        assert_eq!(cache.install(PRECACHE_URLS).await.unwrap(), PRECACHE_URLS.len());
        assert_eq!(cache.lookup("./bell.wav").unwrap().content_type, "audio/wav");
    }

    #[tokio::test]
    async fn refuses_paths_outside_root() {
        let cache = AssetCache::new(std::env::temp_dir());
        assert!(matches!(
            cache.respond("/../etc/passwd").await,
            Err(CacheError::OutsideRoot(_))
        ));
    }
}
