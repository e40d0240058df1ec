// crates/lightbox-media/src/preloader.rs
//
// One long-lived worker that warms the decode cache with the logical
// neighbors of the displayed image. The foreground resolves WHICH
// identifiers are neighbors (it owns the traversal order) and enqueues them;
// the worker only decodes and inserts.
//
// The queue is small and bounded, and `warm` uses try_send: when the worker
// is behind, new notifications are dropped rather than ever blocking a
// navigation keystroke. Prefetch is best-effort, not a correctness
// requirement — the display path decodes synchronously on a miss anyway.

use std::thread;

use crossbeam_channel::{bounded, Sender, TrySendError};

use crate::cache::DecodeCache;
use crate::decode::decode_image;

/// Pending warm-up requests the queue will hold before dropping new ones.
const QUEUE_CAPACITY: usize = 10;

enum PreloadMsg {
    Warm(Vec<String>),
    Shutdown,
}

pub struct Preloader {
    tx: Sender<PreloadMsg>,
}

impl Preloader {
    /// Spawn the worker. It shares `cache` with the display path and runs
    /// until `shutdown` or until the Preloader handle is dropped.
    pub fn new(cache: DecodeCache) -> Self {
        let (tx, rx) = bounded::<PreloadMsg>(QUEUE_CAPACITY);

        thread::spawn(move || {
            loop {
                match rx.recv() {
                    Ok(PreloadMsg::Warm(identifiers)) => {
                        for id in identifiers {
                            // Re-check under the current cache state: the
                            // display path may have decoded this one while
                            // the request sat in the queue.
                            if cache.contains(&id) {
                                continue;
                            }
                            match decode_image(&id) {
                                Ok(img) => {
                                    cache.put(id, img);
                                }
                                // Preload failures are invisible to the user;
                                // the display path reports its own errors.
                                Err(e) => eprintln!("[preload] {e:#}"),
                            }
                        }
                    }
                    Ok(PreloadMsg::Shutdown) | Err(_) => return,
                }
            }
        });

        Self { tx }
    }

    /// Enqueue neighbor identifiers for background decode. Never blocks:
    /// returns false when the queue is full and the request was dropped.
    pub fn warm(&self, identifiers: Vec<String>) -> bool {
        if identifiers.is_empty() {
            return true;
        }
        match self.tx.try_send(PreloadMsg::Warm(identifiers)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Ask the worker to exit. Best-effort (try_send) — if the queue is full
    /// the worker still exits when the channel disconnects on drop.
    pub fn shutdown(&self) {
        let _ = self.tx.try_send(PreloadMsg::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn write_png(dir: &std::path::Path, name: &str, fill: u8) -> String {
        let path = dir.join(name);
        image::RgbaImage::from_pixel(2, 2, image::Rgba([fill, 0, 0, 255]))
            .save(&path)
            .unwrap();
        path.to_string_lossy().into_owned()
    }

    fn wait_for(cache: &DecodeCache, id: &str) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if cache.contains(id) {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn warms_neighbors_into_the_shared_cache() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_png(dir.path(), "a.png", 1);
        let b = write_png(dir.path(), "b.png", 2);

        let cache = DecodeCache::new();
        let pre = Preloader::new(cache.clone());
        assert!(pre.warm(vec![a.clone(), b.clone()]));

        assert!(wait_for(&cache, &a));
        assert!(wait_for(&cache, &b));
        assert_eq!(cache.get(&a).unwrap().pixels[0], 1);
        pre.shutdown();
    }

    #[test]
    fn decode_failures_are_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_png(dir.path(), "good.png", 3);

        let cache = DecodeCache::new();
        let pre = Preloader::new(cache.clone());
        // The bad identifier is skipped; the good one still lands.
        pre.warm(vec!["/no/such/thing.png".into(), good.clone()]);
        assert!(wait_for(&cache, &good));
        assert!(!cache.contains("/no/such/thing.png"));
        pre.shutdown();
    }

    #[test]
    fn a_burst_of_notifications_never_blocks_the_caller() {
        // Simulates 20 rapid navigation steps against a possibly-full queue:
        // every warm() must return immediately, dropped or not.
        let cache = DecodeCache::new();
        let pre = Preloader::new(cache);
        let start = Instant::now();
        for i in 0..20 {
            pre.warm(vec![format!("/missing/{i}.png"), format!("/missing/{}.png", i + 1)]);
        }
        // Generous bound: try_send is non-blocking, so even a slow CI box
        // finishes a 20-call burst orders of magnitude faster than this.
        assert!(start.elapsed() < Duration::from_secs(1));
        pre.shutdown();
    }
}
