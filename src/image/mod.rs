//! Image loading, classification, and saving utilities.

mod load;
mod save;

pub use load::load_image;
pub use save::save_image;

use image::{DynamicImage, RgbImage, RgbaImage};

/// A decoded image, classified by channel layout once at load time.
///
/// The rest of the crate branches on this tag instead of inspecting
/// pixel layouts at every step.
#[derive(Debug, Clone)]
pub enum DecodedImage {
    /// Three colour channels, no alpha.
    ThreeChannel(RgbImage),
    /// Three colour channels plus alpha.
    FourChannel(RgbaImage),
    /// Any other layout (greyscale, 16-bit, ...). Passed through
    /// untouched and written out exactly as decoded.
    Unsupported(DynamicImage),
}
