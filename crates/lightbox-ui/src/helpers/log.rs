// crates/lightbox-ui/src/helpers/log.rs
//
// Unified logging for the UI crate.
//
// Lightbox is often launched from a desktop file manager with no console
// attached, so `eprintln!` output is silently discarded. All log calls go to
// a temp file instead so they're visible regardless of launch mode.
//
// File: $TMPDIR/lightbox.log — append-only, created on first write per session.
//
// Usage:
//   use crate::helpers::log::vlog;
//   vlog("[scan] 214 images from 2 directories");
//
// Or use the macro for format string convenience:
//   lightbox_log!("[display] {id}: {msg}");

use std::io::Write;

/// Write `msg` to the Lightbox log file in the OS temp directory.
/// Never panics — failures are silently ignored (we're already in a fallback path).
pub fn vlog(msg: &str) {
    if let Ok(mut f) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(std::env::temp_dir().join("lightbox.log"))
    {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let _ = writeln!(f, "[{ts}] {msg}");
    }
}

/// Convenience macro — formats like `eprintln!` but routes through `vlog`.
#[macro_export]
macro_rules! lightbox_log {
    ($($arg:tt)*) => {
        $crate::helpers::log::vlog(&format!($($arg)*))
    };
}
