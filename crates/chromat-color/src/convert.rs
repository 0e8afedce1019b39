//! Composed conversions and the [`Convert`] trait.
//!
//! The chains compose the single-step codecs:
//!
//! ```text
//! RGB --gamma/matrix--> XYZ --f--> LAB --polar--> LCH
//! ```
//!
//! [`Convert<T>`] is implemented for every supported pair of typed
//! triples, so the conversion is picked by the target type:
//!
//! ```rust
//! use chromat_color::Convert;
//! use chromat_core::{Lab, Lch, Rgb8};
//!
//! let lab: Lab = Rgb8::new(255, 255, 255).convert();
//! assert!((lab.l - 100.0).abs() < 0.5);
//!
//! let lch: Lch = lab.convert();
//! let back: Rgb8 = lch.convert();
//! assert_eq!(back, Rgb8::WHITE);
//! ```
//!
//! [`convert_slice`] does the same at runtime for untyped input, where the
//! spaces are named by [`ColorSpaceId`].

use crate::error::ColorResult;
use crate::hsl::{hsl_to_rgb, hsl_to_rgb_unit, rgb_to_hsl};
use crate::hsv::{hsv_to_rgb, hsv_to_rgb_unit, rgb_to_hsv};
use crate::lab::{lab_to_xyz_d65, xyz_to_lab_d65};
use crate::lch::{lab_to_lch, lch_to_lab};
use crate::xyz::{rgb_to_xyz, xyz_to_rgb, xyz_to_rgb_unit};
use chromat_core::{
    ColorSpaceId, Hsl, Hsv, Lab, Lch, Pixel, Rgb, Rgb8, RgbScale, Xyz,
};

// ============================================================================
// Chains
// ============================================================================

/// sRGB -> LAB (D65).
#[inline]
pub fn rgb_to_lab(rgb: impl Into<Rgb>) -> Lab {
    xyz_to_lab_d65(rgb_to_xyz(rgb))
}

/// LAB (D65) -> normalized sRGB, gamut-clipped.
#[inline]
pub fn lab_to_rgb_unit(lab: Lab) -> Rgb {
    xyz_to_rgb_unit(lab_to_xyz_d65(lab))
}

/// LAB (D65) -> byte sRGB, gamut-clipped.
#[inline]
pub fn lab_to_rgb(lab: Lab) -> Rgb8 {
    xyz_to_rgb(lab_to_xyz_d65(lab))
}

/// sRGB -> LCH (D65).
#[inline]
pub fn rgb_to_lch(rgb: impl Into<Rgb>) -> Lch {
    lab_to_lch(rgb_to_lab(rgb))
}

/// LCH (D65) -> byte sRGB, gamut-clipped.
#[inline]
pub fn lch_to_rgb(lch: Lch) -> Rgb8 {
    lab_to_rgb(lch_to_lab(lch))
}

/// XYZ -> LCH (D65).
#[inline]
pub fn xyz_to_lch(xyz: Xyz) -> Lch {
    lab_to_lch(xyz_to_lab_d65(xyz))
}

/// LCH (D65) -> XYZ.
#[inline]
pub fn lch_to_xyz(lch: Lch) -> Xyz {
    lab_to_xyz_d65(lch_to_lab(lch))
}

// ============================================================================
// Typed conversion
// ============================================================================

/// Conversion between typed color triples.
///
/// Device-independent spaces use the D65 white point. Conversions into
/// [`Rgb8`] and [`Rgb`] clip out-of-gamut colors.
pub trait Convert<T> {
    /// Converts `self` into `T`.
    fn convert(self) -> T;
}

impl Convert<Rgb> for Rgb8 {
    fn convert(self) -> Rgb {
        self.to_unit()
    }
}

impl Convert<Hsv> for Rgb8 {
    fn convert(self) -> Hsv {
        rgb_to_hsv(self)
    }
}

impl Convert<Hsl> for Rgb8 {
    fn convert(self) -> Hsl {
        rgb_to_hsl(self)
    }
}

impl Convert<Xyz> for Rgb8 {
    fn convert(self) -> Xyz {
        rgb_to_xyz(self)
    }
}

impl Convert<Lab> for Rgb8 {
    fn convert(self) -> Lab {
        rgb_to_lab(self)
    }
}

impl Convert<Lch> for Rgb8 {
    fn convert(self) -> Lch {
        rgb_to_lch(self)
    }
}

impl Convert<Rgb8> for Rgb {
    fn convert(self) -> Rgb8 {
        self.to_rgb8()
    }
}

impl Convert<Hsv> for Rgb {
    fn convert(self) -> Hsv {
        rgb_to_hsv(self)
    }
}

impl Convert<Hsl> for Rgb {
    fn convert(self) -> Hsl {
        rgb_to_hsl(self)
    }
}

impl Convert<Xyz> for Rgb {
    fn convert(self) -> Xyz {
        rgb_to_xyz(self)
    }
}

impl Convert<Lab> for Rgb {
    fn convert(self) -> Lab {
        rgb_to_lab(self)
    }
}

impl Convert<Lch> for Rgb {
    fn convert(self) -> Lch {
        rgb_to_lch(self)
    }
}

impl Convert<Rgb8> for Hsv {
    fn convert(self) -> Rgb8 {
        hsv_to_rgb(self)
    }
}

impl Convert<Rgb> for Hsv {
    fn convert(self) -> Rgb {
        hsv_to_rgb_unit(self)
    }
}

impl Convert<Rgb8> for Hsl {
    fn convert(self) -> Rgb8 {
        hsl_to_rgb(self)
    }
}

impl Convert<Rgb> for Hsl {
    fn convert(self) -> Rgb {
        hsl_to_rgb_unit(self)
    }
}

impl Convert<Rgb8> for Xyz {
    fn convert(self) -> Rgb8 {
        xyz_to_rgb(self)
    }
}

impl Convert<Rgb> for Xyz {
    fn convert(self) -> Rgb {
        xyz_to_rgb_unit(self)
    }
}

impl Convert<Lab> for Xyz {
    fn convert(self) -> Lab {
        xyz_to_lab_d65(self)
    }
}

impl Convert<Lch> for Xyz {
    fn convert(self) -> Lch {
        xyz_to_lch(self)
    }
}

impl Convert<Rgb8> for Lab {
    fn convert(self) -> Rgb8 {
        lab_to_rgb(self)
    }
}

impl Convert<Rgb> for Lab {
    fn convert(self) -> Rgb {
        lab_to_rgb_unit(self)
    }
}

impl Convert<Xyz> for Lab {
    fn convert(self) -> Xyz {
        lab_to_xyz_d65(self)
    }
}

impl Convert<Lch> for Lab {
    fn convert(self) -> Lch {
        lab_to_lch(self)
    }
}

impl Convert<Rgb8> for Lch {
    fn convert(self) -> Rgb8 {
        lch_to_rgb(self)
    }
}

impl Convert<Rgb> for Lch {
    fn convert(self) -> Rgb {
        lab_to_rgb_unit(lch_to_lab(self))
    }
}

impl Convert<Xyz> for Lch {
    fn convert(self) -> Xyz {
        lch_to_xyz(self)
    }
}

impl Convert<Lab> for Lch {
    fn convert(self) -> Lab {
        lch_to_lab(self)
    }
}

// ============================================================================
// Runtime conversion
// ============================================================================

/// Intermediate form: RGB-family spaces meet in normalized RGB,
/// device-independent ones in XYZ.
#[derive(Clone, Copy)]
enum Hub {
    Rgb(Rgb),
    Xyz(Xyz),
}

fn to_hub(arr: [f64; 3], from: ColorSpaceId, scale: RgbScale) -> Hub {
    match from {
        ColorSpaceId::Rgb => Hub::Rgb(Rgb::from_scaled(arr, scale)),
        ColorSpaceId::Hsv => Hub::Rgb(hsv_to_rgb_unit(Hsv::from_array(arr))),
        ColorSpaceId::Hsl => Hub::Rgb(hsl_to_rgb_unit(Hsl::from_array(arr))),
        ColorSpaceId::Xyz => Hub::Xyz(Xyz::from_array(arr)),
        ColorSpaceId::Lab => Hub::Xyz(lab_to_xyz_d65(Lab::from_array(arr))),
        ColorSpaceId::Lch => Hub::Xyz(lch_to_xyz(Lch::from_array(arr))),
    }
}

/// Converts an untyped triple between spaces named at runtime.
///
/// RGB input is read in `scale`. RGB output is normalized for
/// [`RgbScale::Unit`] and rounded bytes otherwise. HSV/HSL use
/// natural units (degrees, [0, 1]).
///
/// # Errors
///
/// Fails with an arity error unless `values` holds exactly three numbers.
///
/// ```rust
/// use chromat_color::convert::convert_slice;
/// use chromat_core::{ColorSpaceId, RgbScale};
///
/// let hsv = convert_slice(&[255.0, 0.0, 0.0], ColorSpaceId::Rgb, ColorSpaceId::Hsv, RgbScale::Byte).unwrap();
/// assert_eq!(hsv, [0.0, 1.0, 1.0]);
/// assert!(convert_slice(&[1.0, 2.0], ColorSpaceId::Lab, ColorSpaceId::Xyz, RgbScale::Unit).is_err());
/// ```
pub fn convert_slice(
    values: &[f64],
    from: ColorSpaceId,
    to: ColorSpaceId,
    scale: RgbScale,
) -> ColorResult<[f64; 3]> {
    let arr = Xyz::try_from_slice(values)?.to_array();
    if from == to && from != ColorSpaceId::Rgb {
        return Ok(arr);
    }

    let hub = to_hub(arr, from, scale);
    let rgb = || match hub {
        Hub::Rgb(rgb) => rgb,
        Hub::Xyz(xyz) => xyz_to_rgb_unit(xyz),
    };
    let xyz = || match hub {
        Hub::Rgb(rgb) => rgb_to_xyz(rgb),
        Hub::Xyz(xyz) => xyz,
    };

    Ok(match to {
        ColorSpaceId::Rgb => {
            let rgb = rgb();
            match scale {
                RgbScale::Unit => rgb.to_array(),
                _ => rgb.to_rgb8().to_array(),
            }
        }
        ColorSpaceId::Hsv => rgb_to_hsv(rgb()).to_array(),
        ColorSpaceId::Hsl => rgb_to_hsl(rgb()).to_array(),
        ColorSpaceId::Xyz => xyz().to_array(),
        ColorSpaceId::Lab => xyz_to_lab_d65(xyz()).to_array(),
        ColorSpaceId::Lch => xyz_to_lch(xyz()).to_array(),
    })
}
