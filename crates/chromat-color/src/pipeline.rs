//! Runtime conversion pipeline.
//!
//! A [`Pipeline`] is a sequence of [`Stage`]s applied in order to a raw
//! `[f64; 3]`. The typed functions in [`crate::convert`] cover the fixed
//! chains; a pipeline is for chains assembled at runtime, inverted, or
//! optimized by [`ColorProcessor`](crate::ColorProcessor).
//!
//! # Example
//!
//! ```rust
//! use chromat_color::Pipeline;
//! use chromat_color::convert::rgb_to_lab;
//! use chromat_core::Rgb8;
//!
//! // Byte sRGB -> LAB, then back.
//! let forward = Pipeline::rgb_to_lab().from_bytes();
//! let lab = forward.apply([255.0, 128.0, 0.0]);
//! let expected = rgb_to_lab(Rgb8::new(255, 128, 0));
//! assert!((lab[0] - expected.l).abs() < 1e-9);
//!
//! let inverse = Pipeline::lab_to_rgb().to_bytes();
//! assert_eq!(inverse.apply(lab), [255.0, 128.0, 0.0]);
//! ```

use crate::error::{ColorError, ColorResult};
use crate::hsl::{hsl_to_rgb_unit, rgb_to_hsl};
use crate::hsv::{hsv_to_rgb_unit, rgb_to_hsv};
use crate::lab::{lab_to_xyz, xyz_to_lab};
use crate::lch::{lab_to_lch, lch_to_lab};
use crate::xyz::XYZ_SCALE;
use chromat_core::{BYTE_MAX, Hsl, Hsv, Lab, Lch, Pixel, Rgb, Xyz};
use chromat_math::Mat3;
use chromat_primaries::{SRGB_TO_XYZ, WhitePoint, XYZ_TO_SRGB};
use chromat_transfer::{gamma_compress, gamma_expand};

/// A single step of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    /// sRGB EOTF per channel (encoded -> linear).
    GammaExpand,
    /// sRGB OETF per channel (linear -> encoded).
    GammaCompress,
    /// `v' = M * v`
    Matrix(Mat3),
    /// Per-channel scale.
    Scale([f64; 3]),
    /// Per-channel clamp. Not invertible.
    Clamp {
        /// Minimum per channel
        min: [f64; 3],
        /// Maximum per channel
        max: [f64; 3],
    },
    /// Round each channel to the nearest integer. Not invertible.
    Round,
    /// XYZ -> LAB relative to the white point.
    XyzToLab(WhitePoint),
    /// LAB -> XYZ relative to the white point.
    LabToXyz(WhitePoint),
    /// LAB -> LCH.
    LabToLch,
    /// LCH -> LAB.
    LchToLab,
    /// Normalized RGB -> HSV.
    RgbToHsv,
    /// HSV -> normalized RGB.
    HsvToRgb,
    /// Normalized RGB -> HSL.
    RgbToHsl,
    /// HSL -> normalized RGB.
    HslToRgb,
}

impl Stage {
    /// Applies this stage to one triple.
    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        match self {
            Self::GammaExpand => v.map(gamma_expand),
            Self::GammaCompress => v.map(gamma_compress),
            Self::Matrix(m) => m.transform(v),
            Self::Scale(s) => [v[0] * s[0], v[1] * s[1], v[2] * s[2]],
            Self::Clamp { min, max } => [
                v[0].clamp(min[0], max[0]),
                v[1].clamp(min[1], max[1]),
                v[2].clamp(min[2], max[2]),
            ],
            Self::Round => v.map(f64::round),
            Self::XyzToLab(w) => xyz_to_lab(Xyz::from_array(v), w).to_array(),
            Self::LabToXyz(w) => lab_to_xyz(Lab::from_array(v), w).to_array(),
            Self::LabToLch => lab_to_lch(Lab::from_array(v)).to_array(),
            Self::LchToLab => lch_to_lab(Lch::from_array(v)).to_array(),
            Self::RgbToHsv => rgb_to_hsv(Rgb::from_array(v)).to_array(),
            Self::HsvToRgb => hsv_to_rgb_unit(Hsv::from_array(v)).to_array(),
            Self::RgbToHsl => rgb_to_hsl(Rgb::from_array(v)).to_array(),
            Self::HslToRgb => hsl_to_rgb_unit(Hsl::from_array(v)).to_array(),
        }
    }

    /// The stage undoing this one, if there is one.
    pub fn inverse(&self) -> Option<Stage> {
        Some(match self {
            Self::GammaExpand => Self::GammaCompress,
            Self::GammaCompress => Self::GammaExpand,
            Self::Matrix(m) => Self::Matrix(m.inverse()?),
            Self::Scale(s) => {
                if s.iter().any(|&k| k == 0.0) {
                    return None;
                }
                Self::Scale(s.map(|k| 1.0 / k))
            }
            Self::Clamp { .. } | Self::Round => return None,
            Self::XyzToLab(w) => Self::LabToXyz(*w),
            Self::LabToXyz(w) => Self::XyzToLab(*w),
            Self::LabToLch => Self::LchToLab,
            Self::LchToLab => Self::LabToLch,
            Self::RgbToHsv => Self::HsvToRgb,
            Self::HsvToRgb => Self::RgbToHsv,
            Self::RgbToHsl => Self::HslToRgb,
            Self::HslToRgb => Self::RgbToHsl,
        })
    }

    /// Short name for logs and errors.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GammaExpand => "GammaExpand",
            Self::GammaCompress => "GammaCompress",
            Self::Matrix(_) => "Matrix",
            Self::Scale(_) => "Scale",
            Self::Clamp { .. } => "Clamp",
            Self::Round => "Round",
            Self::XyzToLab(_) => "XyzToLab",
            Self::LabToXyz(_) => "LabToXyz",
            Self::LabToLch => "LabToLch",
            Self::LchToLab => "LchToLab",
            Self::RgbToHsv => "RgbToHsv",
            Self::HsvToRgb => "HsvToRgb",
            Self::RgbToHsl => "RgbToHsl",
            Self::HslToRgb => "HslToRgb",
        }
    }
}

/// An ordered list of [`Stage`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Creates a pipeline with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            stages: Vec::with_capacity(capacity),
        }
    }

    /// Appends a stage.
    pub fn push(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Appends every stage of `other`.
    pub fn then(mut self, other: Pipeline) -> Self {
        self.stages.extend(other.stages);
        self
    }

    /// Appends a matrix stage.
    pub fn matrix(self, m: Mat3) -> Self {
        self.push(Stage::Matrix(m))
    }

    /// Appends a uniform scale.
    pub fn scale(self, k: f64) -> Self {
        self.push(Stage::Scale([k; 3]))
    }

    /// Appends a 0-1 clamp.
    pub fn clamp_01(self) -> Self {
        self.push(Stage::Clamp {
            min: [0.0; 3],
            max: [1.0; 3],
        })
    }

    /// Prepends a /255 so the pipeline reads byte RGB.
    pub fn from_bytes(self) -> Self {
        Pipeline::new().scale(1.0 / BYTE_MAX).then(self)
    }

    /// Appends x255, round and clip to [0, 255] so the pipeline emits byte RGB.
    pub fn to_bytes(self) -> Self {
        self.scale(BYTE_MAX).push(Stage::Round).push(Stage::Clamp {
            min: [0.0; 3],
            max: [BYTE_MAX; 3],
        })
    }

    // ------------------------------------------------------------------
    // Presets
    // ------------------------------------------------------------------

    /// Normalized sRGB -> XYZ (Y = 100).
    pub fn rgb_to_xyz() -> Self {
        Self::with_capacity(3)
            .push(Stage::GammaExpand)
            .matrix(SRGB_TO_XYZ)
            .scale(XYZ_SCALE)
    }

    /// XYZ (Y = 100) -> normalized sRGB, gamut-clipped.
    pub fn xyz_to_rgb() -> Self {
        Self::with_capacity(4)
            .scale(1.0 / XYZ_SCALE)
            .matrix(XYZ_TO_SRGB)
            .clamp_01()
            .push(Stage::GammaCompress)
    }

    /// Normalized sRGB -> LAB (D65).
    pub fn rgb_to_lab() -> Self {
        Self::rgb_to_xyz().push(Stage::XyzToLab(WhitePoint::D65))
    }

    /// LAB (D65) -> normalized sRGB, gamut-clipped.
    pub fn lab_to_rgb() -> Self {
        Self::new()
            .push(Stage::LabToXyz(WhitePoint::D65))
            .then(Self::xyz_to_rgb())
    }

    /// Normalized sRGB -> LCH (D65).
    pub fn rgb_to_lch() -> Self {
        Self::rgb_to_lab().push(Stage::LabToLch)
    }

    /// LCH (D65) -> normalized sRGB, gamut-clipped.
    pub fn lch_to_rgb() -> Self {
        Self::new().push(Stage::LchToLab).then(Self::lab_to_rgb())
    }

    // ------------------------------------------------------------------
    // Inspection and application
    // ------------------------------------------------------------------

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The stages in order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Applies every stage in order.
    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        self.stages.iter().fold(v, |acc, stage| stage.apply(acc))
    }

    /// Applies the pipeline to a typed value, reinterpreting the result as `Q`.
    pub fn apply_pixel<P: Pixel, Q: Pixel>(&self, px: P) -> Q {
        Q::from_array(self.apply(px.to_array()))
    }

    /// Builds the pipeline that undoes this one.
    ///
    /// # Errors
    ///
    /// [`ColorError::NonInvertible`] names the first stage without an
    /// inverse (clamp, round, singular matrix, zero scale).
    pub fn inverse(&self) -> ColorResult<Pipeline> {
        let mut stages = Vec::with_capacity(self.stages.len());
        for (index, stage) in self.stages.iter().enumerate().rev() {
            let inv = stage.inverse().ok_or_else(|| ColorError::NonInvertible {
                index,
                stage: stage.name().to_string(),
            })?;
            stages.push(inv);
        }
        Ok(Pipeline { stages })
    }
}
