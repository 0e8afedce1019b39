//! Binary masks.
//!
//! A [`Mask`] is a single-channel `width * height` buffer whose values are
//! either [`Mask::OFF`] (0) or [`Mask::ON`] (255), the same layout an 8-bit
//! threshold image has. Masks come out of segmentation and ΔE thresholding
//! and go into morphology and [`Image`](crate::Image) masking.
//!
//! # Dependencies
//!
//! - [`crate::error::Error`] - Dimension checks
//!
//! # Used By
//!
//! - `chromat-ops` - segment, morphology, grouping

use crate::{Error, Image, Pixel, Result};
use rayon::prelude::*;

/// Binary single-channel buffer, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Mask {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Mask {
    /// Value of a set pixel.
    pub const ON: u8 = 255;
    /// Value of a cleared pixel.
    pub const OFF: u8 = 0;

    /// Creates a mask with every pixel cleared.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![Self::OFF; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Builds a mask from per-pixel flags in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the length does not match.
    pub fn from_bools(width: u32, height: u32, flags: &[bool]) -> Result<Self> {
        let expected = width as usize * height as usize;
        if flags.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} values, got {}", expected, flags.len()),
            ));
        }
        Ok(Self {
            data: flags.iter().map(|&on| Self::value(on)).collect(),
            width,
            height,
        })
    }

    /// Builds a mask from raw bytes; any non-zero byte counts as set.
    pub fn from_raw(width: u32, height: u32, raw: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if raw.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} values, got {}", expected, raw.len()),
            ));
        }
        let data = raw.into_iter().map(|v| Self::value(v != 0)).collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Sets every pixel of `image` for which `predicate` holds, in parallel.
    ///
    /// ```rust
    /// use chromat_core::{Image, Mask, Rgb8};
    ///
    /// let img = Image::from_fn(4, 1, |x, _| Rgb8::new(x as u8 * 80, 0, 0));
    /// let bright = Mask::from_image(&img, |px| px.r > 100);
    /// assert_eq!(bright.as_raw(), &[0, 0, 255, 255]);
    /// ```
    pub fn from_image<P, F>(image: &Image<P>, predicate: F) -> Self
    where
        P: Pixel,
        F: Fn(P) -> bool + Sync + Send,
    {
        let data = image
            .pixels()
            .par_iter()
            .map(|&px| Self::value(predicate(px)))
            .collect();
        Self {
            data,
            width: image.width(),
            height: image.height(),
        }
    }

    #[inline]
    fn value(on: bool) -> u8 {
        if on { Self::ON } else { Self::OFF }
    }

    /// Mask width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw row-major values, each 0 or 255.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the values, used by row-parallel operators.
    ///
    /// Callers must only write [`Mask::ON`] or [`Mask::OFF`].
    #[inline]
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Whether `(x, y)` is set. Out-of-bounds reads are `false`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width
            && y < self.height
            && self.data[y as usize * self.width as usize + x as usize] == Self::ON
    }

    /// Sets or clears `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, on: bool) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        self.data[y as usize * self.width as usize + x as usize] = Self::value(on);
        Ok(())
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v == Self::ON).count()
    }

    /// Pixel-wise OR of two masks of the same shape.
    pub fn union(&self, other: &Mask) -> Result<Mask> {
        self.zip(other, |a, b| a | b)
    }

    /// Pixel-wise AND of two masks of the same shape.
    pub fn intersection(&self, other: &Mask) -> Result<Mask> {
        self.zip(other, |a, b| a & b)
    }

    /// Flips every pixel.
    pub fn invert(&self) -> Mask {
        Mask {
            data: self.data.iter().map(|&v| Self::ON - v).collect(),
            width: self.width,
            height: self.height,
        }
    }

    fn zip(&self, other: &Mask, op: impl Fn(u8, u8) -> u8) -> Result<Mask> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ));
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(Mask {
            data,
            width: self.width,
            height: self.height,
        })
    }
}

impl std::fmt::Debug for Mask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("set", &self.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_values() {
        let mask = Mask::from_raw(3, 1, vec![0, 1, 200]).unwrap();
        assert_eq!(mask.as_raw(), &[0, 255, 255]);
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_get_out_of_bounds_is_false() {
        let mask = Mask::from_bools(1, 1, &[true]).unwrap();
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 0));
    }

    #[test]
    fn test_set_ops() {
        let a = Mask::from_bools(2, 1, &[true, false]).unwrap();
        let b = Mask::from_bools(2, 1, &[true, true]).unwrap();
        assert_eq!(a.union(&b).unwrap().count(), 2);
        assert_eq!(a.intersection(&b).unwrap().count(), 1);
        assert_eq!(a.invert().as_raw(), &[0, 255]);
        assert!(a.union(&Mask::new(1, 2)).is_err());
    }

    #[test]
    fn test_from_image() {
        use crate::Rgb8;
        let img = Image::from_fn(3, 2, |x, y| Rgb8::new((x + y) as u8, 0, 0));
        let mask = Mask::from_image(&img, |px| px.r >= 2);
        assert_eq!(mask.dimensions(), (3, 2));
        assert_eq!(mask.as_raw(), &[0, 0, 255, 0, 255, 255]);
    }

    #[test]
    fn test_length_check() {
        assert!(Mask::from_bools(2, 2, &[true; 3]).is_err());
    }
}
