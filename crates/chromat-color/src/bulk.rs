//! Whole-image conversions.
//!
//! Each helper maps one scalar conversion over every pixel with rayon and
//! returns an image of the same dimensions. They are shorthands for
//! [`ColorProcessor::convert`](crate::ColorProcessor::convert) without a
//! processor to configure.
//!
//! ```rust
//! use chromat_color::bulk::{hsv_image_to_rgb, rgb_image_to_hsv};
//! use chromat_core::{Image, Rgb8};
//!
//! let img = Image::from_fn(8, 8, |x, y| Rgb8::new((x * 30) as u8, (y * 30) as u8, 90));
//! let back = hsv_image_to_rgb(&rgb_image_to_hsv(&img));
//! assert_eq!(back, img);
//! ```

use crate::convert::{lab_to_rgb, rgb_to_lab};
use crate::hsl::{hsl_to_rgb, rgb_to_hsl};
use crate::hsv::{hsv_to_rgb, rgb_to_hsv};
use crate::lab::{lab_to_xyz_d65, xyz_to_lab_d65};
use crate::lch::{lab_to_lch, lch_to_lab};
use crate::xyz::{rgb_to_xyz, xyz_to_rgb};
use chromat_core::{Hsl, Hsv, Image, Lab, Lch, Rgb8, Xyz};
use tracing::trace;

/// RGB image -> HSV image.
pub fn rgb_image_to_hsv(image: &Image<Rgb8>) -> Image<Hsv> {
    trace!(width = image.width(), height = image.height(), "rgb_image_to_hsv");
    image.map(rgb_to_hsv)
}

/// HSV image -> RGB image, rounded and clipped.
pub fn hsv_image_to_rgb(image: &Image<Hsv>) -> Image<Rgb8> {
    image.map(hsv_to_rgb)
}

/// RGB image -> HSL image.
pub fn rgb_image_to_hsl(image: &Image<Rgb8>) -> Image<Hsl> {
    trace!(width = image.width(), height = image.height(), "rgb_image_to_hsl");
    image.map(rgb_to_hsl)
}

/// HSL image -> RGB image, rounded and clipped.
pub fn hsl_image_to_rgb(image: &Image<Hsl>) -> Image<Rgb8> {
    image.map(hsl_to_rgb)
}

/// RGB image -> XYZ image (Y = 100).
pub fn rgb_image_to_xyz(image: &Image<Rgb8>) -> Image<Xyz> {
    trace!(width = image.width(), height = image.height(), "rgb_image_to_xyz");
    image.map(rgb_to_xyz)
}

/// XYZ image -> RGB image, gamut-clipped.
pub fn xyz_image_to_rgb(image: &Image<Xyz>) -> Image<Rgb8> {
    image.map(xyz_to_rgb)
}

/// XYZ image -> LAB image (D65).
pub fn xyz_image_to_lab(image: &Image<Xyz>) -> Image<Lab> {
    image.map(xyz_to_lab_d65)
}

/// LAB image (D65) -> XYZ image.
pub fn lab_image_to_xyz(image: &Image<Lab>) -> Image<Xyz> {
    image.map(lab_to_xyz_d65)
}

/// LAB image -> LCH image.
pub fn lab_image_to_lch(image: &Image<Lab>) -> Image<Lch> {
    image.map(lab_to_lch)
}

/// LCH image -> LAB image.
pub fn lch_image_to_lab(image: &Image<Lch>) -> Image<Lab> {
    image.map(lch_to_lab)
}

/// RGB image -> LAB image (D65).
pub fn rgb_image_to_lab(image: &Image<Rgb8>) -> Image<Lab> {
    trace!(width = image.width(), height = image.height(), "rgb_image_to_lab");
    image.map(rgb_to_lab)
}

/// LAB image (D65) -> RGB image, gamut-clipped.
pub fn lab_image_to_rgb(image: &Image<Lab>) -> Image<Rgb8> {
    image.map(lab_to_rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Image<Rgb8> {
        Image::from_fn(12, 7, |x, y| {
            Rgb8::new((x * 21) as u8, (y * 36) as u8, ((x + y) * 13) as u8)
        })
    }

    #[test]
    fn test_dimensions_preserved() {
        let img = sample();
        assert_eq!(rgb_image_to_hsv(&img).dimensions(), (12, 7));
        assert_eq!(rgb_image_to_hsl(&img).dimensions(), (12, 7));
        assert_eq!(rgb_image_to_xyz(&img).dimensions(), (12, 7));
        assert_eq!(rgb_image_to_lab(&img).dimensions(), (12, 7));
    }

    #[test]
    fn test_pointwise() {
        let img = sample();
        let lab = rgb_image_to_lab(&img);
        let lch = lab_image_to_lch(&lab);
        for (x, y, px) in img.enumerate() {
            assert_eq!(lab.pixel(x, y), rgb_to_lab(px));
            assert_eq!(lch.pixel(x, y), lab_to_lch(rgb_to_lab(px)));
        }
    }

    #[test]
    fn test_roundtrips() {
        let img = sample();
        assert_eq!(hsv_image_to_rgb(&rgb_image_to_hsv(&img)), img);
        assert_eq!(hsl_image_to_rgb(&rgb_image_to_hsl(&img)), img);
        assert_eq!(xyz_image_to_rgb(&rgb_image_to_xyz(&img)), img);
        assert_eq!(lab_image_to_rgb(&rgb_image_to_lab(&img)), img);

        let lab = rgb_image_to_lab(&img);
        let xyz = lab_image_to_xyz(&lab);
        let back = lch_image_to_lab(&lab_image_to_lch(&xyz_image_to_lab(&xyz)));
        for (a, b) in back.pixels().iter().zip(lab.pixels()) {
            assert!((a.l - b.l).abs() < 1e-6);
            assert!((a.a - b.a).abs() < 1e-6);
            assert!((a.b - b.b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_empty_image() {
        let img: Image<Rgb8> = Image::new(0, 0);
        assert!(rgb_image_to_lab(&img).is_empty());
    }
}
