//! Image buffer of typed pixels.
//!
//! [`Image<P>`] stores `width * height` values of one [`Pixel`] type in
//! row-major order, top-to-bottom:
//!
//! ```text
//! Memory: [P P P P ...]  <- Row 0
//!         [P P P P ...]  <- Row 1
//!         ...
//! ```
//!
//! The color space is part of the type. An `Image<Lab>` cannot be passed
//! where an `Image<Rgb8>` is expected; converting between them goes through
//! `chromat-color`.
//!
//! # Usage
//!
//! ```rust
//! use chromat_core::{Image, Rgb8};
//!
//! let mut img = Image::filled(4, 3, Rgb8::BLACK);
//! img.set_pixel(1, 2, Rgb8::WHITE).unwrap();
//! assert_eq!(img.pixel(1, 2), Rgb8::WHITE);
//! assert_eq!(img.get_pixel(4, 0), None);
//! ```
//!
//! # Dependencies
//!
//! - [`crate::pixel::Pixel`] - Typed pixel values
//! - [`crate::error::Error`] - Error types
//! - [`rayon`] - Parallel pointwise maps
//!
//! # Used By
//!
//! - `chromat-color` - Bulk conversions
//! - `chromat-ops` - Segmentation, clustering, palette mapping

use crate::{Error, Pixel, Result};
use rayon::prelude::*;
use std::sync::Arc;

/// Owned image buffer of a single pixel type.
///
/// # Memory Management
///
/// Pixels live in an [`Arc<Vec<P>>`]. Cloning an image shares the buffer;
/// the first mutation of a shared image copies it.
#[derive(Clone, PartialEq)]
pub struct Image<P: Pixel> {
    data: Arc<Vec<P>>,
    width: u32,
    height: u32,
}

impl<P: Pixel> Image<P> {
    /// Creates an image filled with `P::default()`.
    ///
    /// ```rust
    /// use chromat_core::{Image, Lab};
    ///
    /// let img: Image<Lab> = Image::new(8, 8);
    /// assert_eq!(img.pixel_count(), 64);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, P::default())
    }

    /// Creates an image with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: P) -> Self {
        Self {
            data: Arc::new(vec![pixel; width as usize * height as usize]),
            width,
            height,
        }
    }

    /// Creates an image from row-major pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<P>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, pixels.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(pixels),
            width,
            height,
        })
    }

    /// Builds an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> P,
    {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            data: Arc::new(data),
            width,
            height,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[P] {
        &self.data
    }

    /// Mutable pixel slice. Copies the buffer if it is shared.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [P] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Consumes the image and returns its pixels.
    pub fn into_pixels(self) -> Vec<P> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds. Use
    /// [`get_pixel`](Self::get_pixel) for a checked read.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> P {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[self.offset(x, y)]
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<P> {
        if x < self.width && y < self.height {
            Some(self.data[self.offset(x, y)])
        } else {
            None
        }
    }

    /// Writes the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: P) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let idx = self.offset(x, y);
        Arc::make_mut(&mut self.data)[idx] = pixel;
        Ok(())
    }

    /// Sets every pixel to `pixel`.
    pub fn fill(&mut self, pixel: P) {
        Arc::make_mut(&mut self.data).fill(pixel);
    }

    /// Pixels of row `y`.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.offset(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Iterates over all pixels with their coordinates.
    pub fn enumerate(&self) -> impl Iterator<Item = (u32, u32, P)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, px)| ((i as u32) % width, (i as u32) / width, *px))
    }

    /// Applies `f` to every pixel, producing an image of another pixel type.
    ///
    /// Runs on the rayon thread pool. Output has the same dimensions.
    ///
    /// ```rust
    /// use chromat_core::{Image, Rgb, Rgb8};
    ///
    /// let img = Image::filled(2, 2, Rgb8::WHITE);
    /// let unit: Image<Rgb> = img.map(|px| px.to_unit());
    /// assert_eq!(unit.pixel(1, 1), Rgb::new(1.0, 1.0, 1.0));
    /// ```
    pub fn map<Q, F>(&self, f: F) -> Image<Q>
    where
        Q: Pixel,
        F: Fn(P) -> Q + Sync + Send,
    {
        let data: Vec<Q> = self.data.par_iter().map(|px| f(*px)).collect();
        Image {
            data: Arc::new(data),
            width: self.width,
            height: self.height,
        }
    }

    /// Sequential counterpart of [`map`](Self::map).
    pub fn map_seq<Q, F>(&self, f: F) -> Image<Q>
    where
        Q: Pixel,
        F: Fn(P) -> Q,
    {
        let data: Vec<Q> = self.data.iter().map(|px| f(*px)).collect();
        Image {
            data: Arc::new(data),
            width: self.width,
            height: self.height,
        }
    }

    /// Applies `f` to each pixel in place, in parallel.
    pub fn map_in_place<F>(&mut self, f: F)
    where
        F: Fn(P) -> P + Sync + Send,
    {
        Arc::make_mut(&mut self.data)
            .par_iter_mut()
            .for_each(|px| *px = f(*px));
    }

    /// Fails with [`Error::DimensionMismatch`] unless both buffers share a shape.
    pub fn ensure_same_dimensions(&self, other: (u32, u32)) -> Result<()> {
        if self.dimensions() != other {
            return Err(Error::dimension_mismatch(self.dimensions(), other));
        }
        Ok(())
    }
}

impl<P: Pixel> std::fmt::Debug for Image<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("colorspace", &P::SPACE.name())
            .field("pixel", &std::any::type_name::<P>())
            .finish()
    }
}
