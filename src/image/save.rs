//! Image saving utilities.

use std::path::Path;

use image::DynamicImage;

use crate::error::{Error, Result};

use super::DecodedImage;

/// Save a decoded image, inferring the format from the path extension.
///
/// JPEG cannot carry an alpha channel, so four-channel images headed for
/// a `.jpg`/`.jpeg` path are flattened to RGB first; every other format
/// is written as-is.
///
/// # Errors
///
/// Returns an error if the image cannot be encoded or written.
pub fn save_image<P: AsRef<Path>>(img: &DecodedImage, path: P) -> Result<()> {
    let path = path.as_ref();

    let dynamic = match img {
        DecodedImage::ThreeChannel(rgb) => DynamicImage::ImageRgb8(rgb.clone()),
        DecodedImage::FourChannel(rgba) => DynamicImage::ImageRgba8(rgba.clone()),
        DecodedImage::Unsupported(other) => other.clone(),
    };

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");

    let final_img = match extension {
        "jpg" | "jpeg" if dynamic.color().has_alpha() => {
            DynamicImage::ImageRgb8(dynamic.to_rgb8())
        }
        _ => dynamic,
    };

    final_img.save(path).map_err(|source| Error::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}
