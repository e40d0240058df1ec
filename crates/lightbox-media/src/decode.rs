// crates/lightbox-media/src/decode.rs

use anyhow::{Context, Result};

/// A fully decoded image: dimensions plus tightly-packed RGBA8 pixels,
/// ready for texture upload.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Blocking decode of `identifier` to RGBA8.
///
/// Called from two places: the synchronous display path (cache miss while
/// navigating) and the preloader worker. Failures carry the identifier so
/// the display path can surface a useful feedback line.
pub fn decode_image(identifier: &str) -> Result<DecodedImage> {
    let img = image::open(identifier)
        .with_context(|| format!("can't decode {identifier}"))?;
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage { width, height, pixels: rgba.into_raw() })
}
