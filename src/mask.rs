//! The transparency mapper: classify near-black pixels and knock them out.
//!
//! Classification differs by channel layout on purpose. Three-channel
//! images are judged on luminance; four-channel images require every
//! colour channel to clear the threshold. Both comparisons are strict,
//! so a pixel sitting exactly on the threshold stays opaque.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use ndarray::Array2;

use crate::image::DecodedImage;

/// Rec. 601 integer luma: `(299*R + 587*G + 114*B) / 1000`.
#[allow(clippy::cast_possible_truncation)]
fn luma(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    // Weights sum to 1000, so the quotient fits in u8.
    (weighted / 1000) as u8
}

/// Derive the near-black mask for a three-channel image.
///
/// A pixel is near-black iff its Rec. 601 luma is strictly below
/// `threshold`.
#[must_use]
pub fn near_black_mask_rgb(img: &RgbImage, threshold: u8) -> Array2<bool> {
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        luma(img.get_pixel(x as u32, y as u32)) < threshold
    })
}

/// Derive the near-black mask for a four-channel image.
///
/// A pixel is near-black iff all three colour channels are strictly
/// below `threshold`. Existing alpha is not an input to the
/// classification.
#[must_use]
pub fn near_black_mask_rgba(img: &RgbaImage, threshold: u8) -> Array2<bool> {
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
        let [r, g, b, _] = img.get_pixel(x as u32, y as u32).0;
        r < threshold && g < threshold && b < threshold
    })
}

/// Turn every near-black pixel fully transparent.
///
/// Three-channel inputs gain an alpha channel (255 everywhere outside
/// the mask); four-channel inputs keep their original colour and alpha
/// outside the mask. Masked pixels become `(0, 0, 0, 0)` in both cases.
/// Unsupported layouts are returned untouched.
#[must_use]
pub fn knock_out(img: DecodedImage, threshold: u8) -> DecodedImage {
    match img {
        DecodedImage::ThreeChannel(rgb) => {
            let mask = near_black_mask_rgb(&rgb, threshold);
            let rgba = RgbaImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                if mask[[y as usize, x as usize]] {
                    Rgba([0, 0, 0, 0])
                } else {
                    let [r, g, b] = rgb.get_pixel(x, y).0;
                    Rgba([r, g, b, 255])
                }
            });
            DecodedImage::FourChannel(rgba)
        }
        DecodedImage::FourChannel(mut rgba) => {
            let mask = near_black_mask_rgba(&rgba, threshold);
            for (x, y, pixel) in rgba.enumerate_pixels_mut() {
                if mask[[y as usize, x as usize]] {
                    *pixel = Rgba([0, 0, 0, 0]);
                }
            }
            DecodedImage::FourChannel(rgba)
        }
        DecodedImage::Unsupported(other) => DecodedImage::Unsupported(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn rgb_single(pixel: [u8; 3]) -> DecodedImage {
        DecodedImage::ThreeChannel(RgbImage::from_pixel(1, 1, Rgb(pixel)))
    }

    fn rgba_single(pixel: [u8; 4]) -> DecodedImage {
        DecodedImage::FourChannel(RgbaImage::from_pixel(1, 1, Rgba(pixel)))
    }

    fn single_rgba_pixel(img: &DecodedImage) -> [u8; 4] {
        match img {
            DecodedImage::FourChannel(rgba) => rgba.get_pixel(0, 0).0,
            _ => panic!("expected a four-channel image"),
        }
    }

    #[test]
    fn test_dark_rgb_pixel_becomes_transparent() {
        let out = knock_out(rgb_single([10, 10, 10]), 40);
        assert_eq!(single_rgba_pixel(&out), [0, 0, 0, 0]);
    }

    #[test]
    fn test_bright_rgb_pixel_gains_opaque_alpha() {
        let out = knock_out(rgb_single([200, 200, 200]), 40);
        assert_eq!(single_rgba_pixel(&out), [200, 200, 200, 255]);
    }

    #[test]
    fn test_dark_rgba_pixel_becomes_transparent() {
        let out = knock_out(rgba_single([5, 5, 5, 255]), 40);
        assert_eq!(single_rgba_pixel(&out), [0, 0, 0, 0]);
    }

    #[test]
    fn test_rgba_pixel_with_one_bright_channel_is_untouched() {
        let out = knock_out(rgba_single([5, 5, 50, 255]), 40);
        assert_eq!(single_rgba_pixel(&out), [5, 5, 50, 255]);
    }

    #[test]
    fn test_threshold_boundary_is_strict() {
        // Luma of (40, 40, 40) is exactly 40; strictly-less means opaque.
        let out = knock_out(rgb_single([40, 40, 40]), 40);
        assert_eq!(single_rgba_pixel(&out), [40, 40, 40, 255]);

        let out = knock_out(rgba_single([40, 40, 40, 128]), 40);
        assert_eq!(single_rgba_pixel(&out), [40, 40, 40, 128]);
    }

    #[test]
    fn test_existing_alpha_is_not_a_classification_input() {
        // Fully transparent but bright: stays exactly as it was.
        let out = knock_out(rgba_single([90, 90, 90, 0]), 40);
        assert_eq!(single_rgba_pixel(&out), [90, 90, 90, 0]);

        // Fully transparent and dark: colour channels still qualify.
        let out = knock_out(rgba_single([3, 3, 3, 0]), 40);
        assert_eq!(single_rgba_pixel(&out), [0, 0, 0, 0]);
    }

    #[test]
    fn test_existing_alpha_preserved_outside_mask() {
        let out = knock_out(rgba_single([100, 150, 200, 77]), 40);
        assert_eq!(single_rgba_pixel(&out), [100, 150, 200, 77]);
    }

    #[test]
    fn test_output_always_four_channels() {
        assert!(matches!(
            knock_out(rgb_single([1, 2, 3]), 40),
            DecodedImage::FourChannel(_)
        ));
        assert!(matches!(
            knock_out(rgba_single([1, 2, 3, 4]), 40),
            DecodedImage::FourChannel(_)
        ));
    }

    #[test]
    fn test_unsupported_layout_passes_through() {
        let grey = DecodedImage::Unsupported(DynamicImage::new_luma8(2, 2));
        assert!(matches!(
            knock_out(grey, 40),
            DecodedImage::Unsupported(_)
        ));
    }

    #[test]
    fn test_idempotent() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([5, 5, 5, 255]));
        img.put_pixel(1, 0, Rgba([200, 10, 10, 128]));
        img.put_pixel(0, 1, Rgba([39, 39, 39, 9]));
        img.put_pixel(1, 1, Rgba([40, 40, 40, 255]));

        let once = knock_out(DecodedImage::FourChannel(img), 40);
        let twice = knock_out(once.clone(), 40);

        match (&once, &twice) {
            (DecodedImage::FourChannel(a), DecodedImage::FourChannel(b)) => {
                assert_eq!(a.as_raw(), b.as_raw());
            }
            _ => panic!("expected four-channel images"),
        }
    }

    #[test]
    fn test_mask_shape_is_height_by_width() {
        let img = RgbImage::new(7, 3);
        let mask = near_black_mask_rgb(&img, 40);
        assert_eq!(mask.dim(), (3, 7));
    }

    #[test]
    fn test_luma_weighting() {
        // Pure red: 299 * 255 / 1000 = 76.
        assert_eq!(luma(&Rgb([255, 0, 0])), 76);
        // Pure green: 587 * 255 / 1000 = 149.
        assert_eq!(luma(&Rgb([0, 255, 0])), 149);
        // Pure blue: 114 * 255 / 1000 = 29.
        assert_eq!(luma(&Rgb([0, 0, 255])), 29);
    }
}
