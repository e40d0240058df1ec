// crates/lightbox-media/src/lib.rs
//
// Everything that touches bytes on disk: blocking image decode, the shared
// decode cache, the background preloader, and the relocate (move/copy)
// capability. No egui dependency — lightbox-ui talks to this crate through
// the shared cache handle and plain return values only.

pub mod cache;
pub mod decode;
pub mod preloader;
pub mod relocate;

// Re-export the main public API so lightbox-ui imports are simple.
pub use cache::DecodeCache;
pub use decode::{decode_image, DecodedImage};
pub use preloader::Preloader;
pub use relocate::{copy_to, relocate, RelocateError};
