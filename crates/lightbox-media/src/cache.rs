// crates/lightbox-media/src/cache.rs
//
// Shared decoded-image store. The cache is a pure mapping: `get` never
// triggers a decode, `put` is an idempotent insert/overwrite. Both the
// foreground display path and the preloader worker write it; decoded bytes
// for the same identifier are equivalent, so a racing double-decode costs
// duplicated work, never correctness.
//
// Unbounded on purpose — matches the observed behavior of the viewer this
// replaces. See DESIGN.md for the eviction open question.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::decode::DecodedImage;

#[derive(Clone, Default)]
pub struct DecodeCache {
    inner: Arc<Mutex<HashMap<String, Arc<DecodedImage>>>>,
}

impl DecodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous lookup. A miss is just a miss — the caller decides whether
    /// to decode (display path) or skip (preloader already-warm check).
    pub fn get(&self, identifier: &str) -> Option<Arc<DecodedImage>> {
        self.inner.lock().get(identifier).cloned()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.inner.lock().contains_key(identifier)
    }

    /// Insert or overwrite. Returns the stored handle so the display path can
    /// keep using it without a second lookup.
    pub fn put(&self, identifier: String, image: DecodedImage) -> Arc<DecodedImage> {
        let image = Arc::new(image);
        self.inner.lock().insert(identifier, Arc::clone(&image));
        image
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(w: u32, h: u32, fill: u8) -> DecodedImage {
        DecodedImage { width: w, height: h, pixels: vec![fill; (w * h * 4) as usize] }
    }

    #[test]
    fn get_after_put_round_trips_the_exact_data() {
        let cache = DecodeCache::new();
        let stored = img(4, 2, 7);
        cache.put("a.png".into(), stored.clone());
        let got = cache.get("a.png").unwrap();
        assert_eq!(*got, stored);
        assert!(cache.get("b.png").is_none());
    }

    #[test]
    fn put_is_an_idempotent_overwrite() {
        let cache = DecodeCache::new();
        cache.put("a.png".into(), img(1, 1, 1));
        cache.put("a.png".into(), img(1, 1, 2));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a.png").unwrap().pixels[0], 2);
    }

    #[test]
    fn clones_share_the_same_store() {
        let cache = DecodeCache::new();
        let other = cache.clone();
        other.put("a.png".into(), img(1, 1, 9));
        assert!(cache.contains("a.png"));
    }
}
