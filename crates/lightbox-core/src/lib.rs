// crates/lightbox-core/src/lib.rs
//
// Pure viewer data and algorithms — no egui, no image decoding, no file I/O.
// Everything here is driven from the foreground input loop in lightbox-ui;
// background contexts never touch these structures directly.

pub mod collection;
pub mod commands;
pub mod cursor;
pub mod interaction;
pub mod order;

pub use collection::Collection;
pub use commands::{PanDirection, ViewerCommand};
pub use cursor::{NavCursor, NavStep};
pub use interaction::{ScrollSpeed, Slideshow};
pub use order::NavMode;
