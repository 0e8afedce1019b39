//! Bulk color processor.
//!
//! The [`ColorProcessor`] maps a conversion over every pixel of an
//! [`Image`], in parallel or sequentially, and runs [`Pipeline`]s over raw
//! triples with optional matrix/scale merging.
//!
//! # Features
//!
//! - Typed image conversion via [`Convert`]
//! - Pipeline application with matrix concatenation optimization
//! - Statistics collection (optional)
//!
//! # Example
//!
//! ```rust
//! use chromat_color::ColorProcessor;
//! use chromat_core::{Image, Lab, Rgb8};
//!
//! let mut proc = ColorProcessor::new().with_stats(true);
//!
//! let img = Image::filled(4, 3, Rgb8::WHITE);
//! let lab: Image<Lab> = proc.convert(&img);
//!
//! assert_eq!(lab.dimensions(), (4, 3));
//! assert!((lab.pixel(0, 0).l - 100.0).abs() < 1e-3);
//! assert_eq!(proc.pixels_processed(), 12);
//! ```

use crate::convert::Convert;
use crate::pipeline::{Pipeline, Stage};
use chromat_core::{Image, Pixel};
use chromat_math::Mat3;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Color processor for bulk conversions.
///
/// # Optimization
///
/// [`optimize`](Self::optimize) concatenates consecutive matrix stages and
/// multiplies consecutive scale stages. Any other stage flushes what is
/// pending, so the stage order is otherwise untouched.
///
/// ```rust
/// use chromat_color::{ColorProcessor, Pipeline};
/// use chromat_color::primaries::{SRGB_TO_XYZ, XYZ_TO_SRGB};
///
/// let proc = ColorProcessor::new();
///
/// let pipeline = Pipeline::new()
///     .matrix(SRGB_TO_XYZ)
///     .matrix(XYZ_TO_SRGB);
///
/// let optimized = proc.optimize(&pipeline);
/// assert_eq!(optimized.len(), 1);
/// ```
#[derive(Clone)]
pub struct ColorProcessor {
    /// Enable pipeline optimization.
    optimize: bool,
    /// Map images with rayon.
    parallel: bool,
    /// Collect processing statistics.
    collect_stats: bool,
    /// Number of pixels processed.
    pixels_processed: u64,
}

impl Default for ColorProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ColorProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorProcessor")
            .field("optimize", &self.optimize)
            .field("parallel", &self.parallel)
            .field("collect_stats", &self.collect_stats)
            .field("pixels_processed", &self.pixels_processed)
            .finish()
    }
}

impl ColorProcessor {
    /// Creates a processor with optimization and parallelism on.
    pub fn new() -> Self {
        Self {
            optimize: true,
            parallel: true,
            collect_stats: false,
            pixels_processed: 0,
        }
    }

    /// Enables or disables pipeline optimization.
    pub fn with_optimization(mut self, enable: bool) -> Self {
        self.optimize = enable;
        self
    }

    /// Chooses between rayon and a plain sequential loop.
    ///
    /// Both paths produce identical results.
    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    /// Enables or disables statistics collection.
    pub fn with_stats(mut self, enable: bool) -> Self {
        self.collect_stats = enable;
        self
    }

    /// Returns true if images are mapped in parallel.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Returns the number of pixels processed.
    pub fn pixels_processed(&self) -> u64 {
        self.pixels_processed
    }

    /// Resets the statistics.
    pub fn reset_stats(&mut self) {
        self.pixels_processed = 0;
    }

    fn count(&mut self, n: usize) {
        if self.collect_stats {
            self.pixels_processed += n as u64;
        }
    }

    // =========================================================================
    // Image mapping
    // =========================================================================

    /// Applies `f` to every pixel, preserving dimensions.
    ///
    /// ```rust
    /// use chromat_color::ColorProcessor;
    /// use chromat_color::hsv::rgb_to_hsv;
    /// use chromat_core::{Hsv, Image, Rgb8};
    ///
    /// let img = Image::filled(2, 2, Rgb8::new(255, 0, 0));
    /// let hsv: Image<Hsv> = ColorProcessor::new().map(&img, rgb_to_hsv);
    /// assert_eq!(hsv.pixel(1, 0), Hsv::new(0.0, 1.0, 1.0));
    /// ```
    pub fn map<P, Q, F>(&mut self, image: &Image<P>, f: F) -> Image<Q>
    where
        P: Pixel,
        Q: Pixel,
        F: Fn(P) -> Q + Sync + Send,
    {
        let (w, h) = image.dimensions();
        debug!(
            from = P::SPACE.name(),
            to = Q::SPACE.name(),
            width = w,
            height = h,
            parallel = self.parallel,
            "Mapping image"
        );
        self.count(image.pixel_count());
        if self.parallel {
            image.map(f)
        } else {
            image.map_seq(f)
        }
    }

    /// Converts every pixel with the [`Convert`] impl for `P -> Q`.
    pub fn convert<P, Q>(&mut self, image: &Image<P>) -> Image<Q>
    where
        P: Pixel + Convert<Q>,
        Q: Pixel,
    {
        self.map(image, <P as Convert<Q>>::convert)
    }

    /// Runs a pipeline over every pixel, reinterpreting the result as `Q`.
    ///
    /// The pipeline is optimized first when optimization is enabled.
    pub fn apply_image<P, Q>(&mut self, pipeline: &Pipeline, image: &Image<P>) -> Image<Q>
    where
        P: Pixel,
        Q: Pixel,
    {
        let pipeline = self.optimize(pipeline);
        self.map(image, |px: P| pipeline.apply_pixel::<P, Q>(px))
    }

    // =========================================================================
    // Raw triples
    // =========================================================================

    /// Applies a pipeline to a single triple.
    ///
    /// ```rust
    /// use chromat_color::{ColorProcessor, Pipeline};
    ///
    /// let mut proc = ColorProcessor::new();
    /// let pipeline = Pipeline::rgb_to_xyz();
    ///
    /// let xyz = proc.apply(&pipeline, [1.0, 1.0, 1.0]);
    /// assert!((xyz[1] - 100.0).abs() < 1e-3);
    /// ```
    pub fn apply(&mut self, pipeline: &Pipeline, rgb: [f64; 3]) -> [f64; 3] {
        self.count(1);
        pipeline.apply(rgb)
    }

    /// Applies a pipeline to a batch of triples.
    ///
    /// ```rust
    /// use chromat_color::{ColorProcessor, Pipeline};
    ///
    /// let mut proc = ColorProcessor::new();
    /// let pipeline = Pipeline::new().scale(2.0);
    ///
    /// let pixels = vec![[0.1, 0.2, 0.3], [0.4, 0.5, 0.6], [1.0, 1.0, 1.0]];
    /// let results = proc.apply_batch(&pipeline, &pixels);
    /// assert_eq!(results.len(), 3);
    /// ```
    pub fn apply_batch(&mut self, pipeline: &Pipeline, pixels: &[[f64; 3]]) -> Vec<[f64; 3]> {
        self.count(pixels.len());
        let pipeline = self.optimize(pipeline);
        trace!(stages = pipeline.len(), pixels = pixels.len(), "apply_batch");
        if self.parallel {
            pixels.par_iter().map(|&v| pipeline.apply(v)).collect()
        } else {
            pixels.iter().map(|&v| pipeline.apply(v)).collect()
        }
    }

    /// Applies a pipeline to a mutable slice of triples in place.
    pub fn apply_in_place(&mut self, pipeline: &Pipeline, pixels: &mut [[f64; 3]]) {
        self.count(pixels.len());
        let pipeline = self.optimize(pipeline);
        if self.parallel {
            pixels.par_iter_mut().for_each(|v| *v = pipeline.apply(*v));
        } else {
            for v in pixels.iter_mut() {
                *v = pipeline.apply(*v);
            }
        }
    }

    /// Optimizes a pipeline by merging stages.
    ///
    /// Consecutive matrices are multiplied together and consecutive scales
    /// are multiplied per channel. Returns a clone when optimization is off.
    pub fn optimize(&self, pipeline: &Pipeline) -> Pipeline {
        if !self.optimize || pipeline.is_empty() {
            return pipeline.clone();
        }

        let mut result = Pipeline::with_capacity(pipeline.len());
        let mut pending_matrix: Option<Mat3> = None;
        let mut pending_scale: Option<[f64; 3]> = None;

        for stage in pipeline.stages() {
            match stage {
                Stage::Matrix(m) => {
                    if let Some(s) = pending_scale.take() {
                        result = result.push(Stage::Scale(s));
                    }
                    pending_matrix = Some(match pending_matrix {
                        Some(prev) => *m * prev,
                        None => *m,
                    });
                }
                Stage::Scale(s) => {
                    if let Some(m) = pending_matrix.take() {
                        result = result.matrix(m);
                    }
                    pending_scale = Some(match pending_scale {
                        Some(prev) => [prev[0] * s[0], prev[1] * s[1], prev[2] * s[2]],
                        None => *s,
                    });
                }
                other => {
                    if let Some(m) = pending_matrix.take() {
                        result = result.matrix(m);
                    }
                    if let Some(s) = pending_scale.take() {
                        result = result.push(Stage::Scale(s));
                    }
                    result = result.push(*other);
                }
            }
        }

        if let Some(m) = pending_matrix {
            result = result.matrix(m);
        }
        if let Some(s) = pending_scale {
            result = result.push(Stage::Scale(s));
        }

        trace!(before = pipeline.len(), after = result.len(), "Optimized pipeline");
        result
    }
}
