//! Image loading utilities.

use std::path::Path;

use image::DynamicImage;

use crate::error::{Error, Result};

use super::DecodedImage;

/// Load an image from disk and classify its channel layout.
///
/// 8-bit RGB decodes become [`DecodedImage::ThreeChannel`], 8-bit RGBA
/// decodes become [`DecodedImage::FourChannel`], and every other layout
/// lands in [`DecodedImage::Unsupported`] so callers can pass it through
/// without failing the batch.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DecodedImage> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(classify(img))
}

/// Resolve the channel-layout tag for a decoded image.
fn classify(img: DynamicImage) -> DecodedImage {
    match img {
        DynamicImage::ImageRgb8(rgb) => DecodedImage::ThreeChannel(rgb),
        DynamicImage::ImageRgba8(rgba) => DecodedImage::FourChannel(rgba),
        other => DecodedImage::Unsupported(other),
    }
}
