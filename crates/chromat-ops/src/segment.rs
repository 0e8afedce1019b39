//! HSV threshold segmentation.
//!
//! A pixel belongs to a color when its HSV value falls inside one of the
//! color's [`HsvRange`] bands. Bands are inclusive on both ends and stored
//! in natural units: hue in degrees, saturation and value in [0, 1].
//!
//! The named bands come from the usual 8-bit OpenCV table (H 0-180,
//! S/V 0-255); [`HsvRange::from_opencv`] converts such bounds.
//!
//! | Color | OpenCV H | Degrees |
//! |-------|----------|---------|
//! | red | 0-10, 160-180 | 0-20, 320-360 |
//! | orange | 10-25 | 20-50 |
//! | yellow | 25-35 | 50-70 |
//! | green | 35-85 | 70-170 |
//! | cyan | 85-100 | 170-200 |
//! | blue | 100-130 | 200-260 |
//! | purple | 130-160 | 260-320 |
//!
//! All named bands require S and V of at least 100/255.
//!
//! # Example
//!
//! ```rust
//! use chromat_core::{Image, Rgb8};
//! use chromat_ops::segment::{NamedRange, apply_mask, segment};
//!
//! let img = Image::from_fn(2, 1, |x, _| {
//!     if x == 0 { Rgb8::new(220, 20, 20) } else { Rgb8::new(20, 20, 220) }
//! });
//! let red = segment(&img, "kirmizi".parse::<NamedRange>().unwrap());
//! assert_eq!(red.as_raw(), &[255, 0]);
//!
//! let only_red = apply_mask(&img, &red).unwrap();
//! assert_eq!(only_red.pixel(1, 0), Rgb8::BLACK);
//! ```

use crate::{OpsError, OpsResult};
use chromat_color::bulk::rgb_image_to_hsv;
use chromat_core::{Hsv, Image, Mask, Pixel, Rgb8};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Slack on the band edges for values computed through division.
const EDGE_EPSILON: f64 = 1e-9;

/// Inclusive HSV bounds in natural units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HsvRange {
    /// Lowest hue, degrees
    pub h_min: f64,
    /// Highest hue, degrees
    pub h_max: f64,
    /// Lowest saturation
    pub s_min: f64,
    /// Highest saturation
    pub s_max: f64,
    /// Lowest value
    pub v_min: f64,
    /// Highest value
    pub v_max: f64,
}

impl HsvRange {
    /// Creates a range from `(min, max)` pairs.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] when a bound is not finite, a minimum
    /// exceeds its maximum, hue leaves [0, 360] or S/V leave [0, 1].
    pub fn new(h: (f64, f64), s: (f64, f64), v: (f64, f64)) -> OpsResult<Self> {
        let range = Self {
            h_min: h.0,
            h_max: h.1,
            s_min: s.0,
            s_max: s.1,
            v_min: v.0,
            v_max: v.1,
        };
        range.validate()?;
        Ok(range)
    }

    /// Converts 8-bit OpenCV bounds (H 0-180, S/V 0-255).
    ///
    /// ```rust
    /// use chromat_ops::segment::HsvRange;
    ///
    /// let green = HsvRange::from_opencv([35, 100, 100], [85, 255, 255]).unwrap();
    /// assert_eq!(green.h_min, 70.0);
    /// assert_eq!(green.s_max, 1.0);
    /// ```
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] when H exceeds 180 or a lower bound
    /// exceeds its upper bound.
    pub fn from_opencv(lower: [u8; 3], upper: [u8; 3]) -> OpsResult<Self> {
        if lower[0] > 180 || upper[0] > 180 {
            return Err(OpsError::invalid(format!(
                "OpenCV hue must be in 0..=180, got {}..={}",
                lower[0], upper[0]
            )));
        }
        let range = Self::opencv(lower, upper);
        range.validate()?;
        Ok(range)
    }

    const fn opencv(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self {
            h_min: lower[0] as f64 * 2.0,
            h_max: upper[0] as f64 * 2.0,
            s_min: lower[1] as f64 / 255.0,
            s_max: upper[1] as f64 / 255.0,
            v_min: lower[2] as f64 / 255.0,
            v_max: upper[2] as f64 / 255.0,
        }
    }

    const fn band(h_lo: u8, h_hi: u8) -> Self {
        Self::opencv([h_lo, 100, 100], [h_hi, 255, 255])
    }

    /// Checks the bounds.
    pub fn validate(&self) -> OpsResult<()> {
        let pairs = [
            ("hue", self.h_min, self.h_max, 360.0),
            ("saturation", self.s_min, self.s_max, 1.0),
            ("value", self.v_min, self.v_max, 1.0),
        ];
        for (name, lo, hi, limit) in pairs {
            if !lo.is_finite() || !hi.is_finite() {
                return Err(OpsError::invalid(format!("{name} bounds must be finite")));
            }
            if lo < 0.0 || hi > limit {
                return Err(OpsError::invalid(format!(
                    "{name} bounds {lo}..={hi} outside 0..={limit}"
                )));
            }
            if lo > hi {
                return Err(OpsError::invalid(format!(
                    "{name} minimum {lo} exceeds maximum {hi}"
                )));
            }
        }
        Ok(())
    }

    /// Whether `hsv` lies inside the range, edges included.
    #[inline]
    pub fn contains(&self, hsv: Hsv) -> bool {
        within(hsv.h, self.h_min, self.h_max)
            && within(hsv.s, self.s_min, self.s_max)
            && within(hsv.v, self.v_min, self.v_max)
    }
}

#[inline]
fn within(x: f64, lo: f64, hi: f64) -> bool {
    x >= lo - EDGE_EPSILON && x <= hi + EDGE_EPSILON
}

// ============================================================================
// Named ranges
// ============================================================================

static RED: [HsvRange; 2] = [HsvRange::band(0, 10), HsvRange::band(160, 180)];
static ORANGE: [HsvRange; 1] = [HsvRange::band(10, 25)];
static YELLOW: [HsvRange; 1] = [HsvRange::band(25, 35)];
static GREEN: [HsvRange; 1] = [HsvRange::band(35, 85)];
static CYAN: [HsvRange; 1] = [HsvRange::band(85, 100)];
static BLUE: [HsvRange; 1] = [HsvRange::band(100, 130)];
static PURPLE: [HsvRange; 1] = [HsvRange::band(130, 160)];

/// The closed set of colors with built-in HSV bands.
///
/// Parses from English names and from the Turkish identifiers used in
/// older configs (`kirmizi`, `turuncu`, `sari`, `yesil`, `cyan`, `mavi`, `mor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedRange {
    /// Two bands around 0°.
    #[serde(alias = "kirmizi")]
    Red,
    /// 20-50°
    #[serde(alias = "turuncu")]
    Orange,
    /// 50-70°
    #[serde(alias = "sari")]
    Yellow,
    /// 70-170°
    #[serde(alias = "yesil")]
    Green,
    /// 170-200°
    Cyan,
    /// 200-260°
    #[serde(alias = "mavi")]
    Blue,
    /// 260-320°
    #[serde(alias = "mor")]
    Purple,
}

impl NamedRange {
    /// Every named range.
    pub const ALL: [NamedRange; 7] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Cyan,
        Self::Blue,
        Self::Purple,
    ];

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Purple => "purple",
        }
    }

    /// The HSV bands; a pixel matches if any band contains it.
    pub fn bands(self) -> &'static [HsvRange] {
        match self {
            Self::Red => &RED,
            Self::Orange => &ORANGE,
            Self::Yellow => &YELLOW,
            Self::Green => &GREEN,
            Self::Cyan => &CYAN,
            Self::Blue => &BLUE,
            Self::Purple => &PURPLE,
        }
    }

    /// Whether `hsv` falls in any band of this color.
    pub fn contains(self, hsv: Hsv) -> bool {
        self.bands().iter().any(|band| band.contains(hsv))
    }
}

impl fmt::Display for NamedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedRange {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "kirmizi" => Ok(Self::Red),
            "orange" | "turuncu" => Ok(Self::Orange),
            "yellow" | "sari" => Ok(Self::Yellow),
            "green" | "yesil" => Ok(Self::Green),
            "cyan" => Ok(Self::Cyan),
            "blue" | "mavi" => Ok(Self::Blue),
            "purple" | "mor" => Ok(Self::Purple),
            _ => Err(OpsError::UnknownColor {
                name: s.to_string(),
                options: Self::ALL.map(|c| c.name()).join(", "),
            }),
        }
    }
}

// ============================================================================
// Segmentation
// ============================================================================

/// Mask of the pixels matching a named color.
pub fn segment(image: &Image<Rgb8>, color: NamedRange) -> Mask {
    segment_ranges(image, color.bands())
}

/// Mask of the pixels inside one custom range.
pub fn segment_range(image: &Image<Rgb8>, range: &HsvRange) -> Mask {
    segment_ranges(image, std::slice::from_ref(range))
}

/// Mask of the pixels inside any of `ranges` (union of bands).
///
/// An empty slice yields an empty mask.
pub fn segment_ranges(image: &Image<Rgb8>, ranges: &[HsvRange]) -> Mask {
    let hsv = rgb_image_to_hsv(image);
    let mask = Mask::from_image(&hsv, |px| ranges.iter().any(|r| r.contains(px)));
    debug!(
        width = image.width(),
        height = image.height(),
        bands = ranges.len(),
        selected = mask.count(),
        "Segmented image"
    );
    mask
}

/// Keeps the pixels under the mask; everything else becomes `P::default()`
/// (black for RGB).
///
/// # Errors
///
/// [`OpsError::SizeMismatch`] if the mask and image differ in size.
pub fn apply_mask<P: Pixel>(image: &Image<P>, mask: &Mask) -> OpsResult<Image<P>> {
    if image.dimensions() != mask.dimensions() {
        return Err(OpsError::SizeMismatch(format!(
            "image is {:?}, mask is {:?}",
            image.dimensions(),
            mask.dimensions()
        )));
    }
    let pixels = image
        .pixels()
        .iter()
        .zip(mask.as_raw())
        .map(|(&px, &m)| if m == Mask::ON { px } else { P::default() })
        .collect();
    Ok(Image::from_pixels(image.width(), image.height(), pixels)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swatch(colors: &[Rgb8]) -> Image<Rgb8> {
        Image::from_pixels(colors.len() as u32, 1, colors.to_vec()).unwrap()
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("red".parse::<NamedRange>().unwrap(), NamedRange::Red);
        assert_eq!("Kirmizi".parse::<NamedRange>().unwrap(), NamedRange::Red);
        assert_eq!("yesil".parse::<NamedRange>().unwrap(), NamedRange::Green);
        assert_eq!("mavi".parse::<NamedRange>().unwrap(), NamedRange::Blue);
        assert_eq!(" mor ".parse::<NamedRange>().unwrap(), NamedRange::Purple);
        for color in NamedRange::ALL {
            assert_eq!(color.name().parse::<NamedRange>().unwrap(), color);
        }
    }

    #[test]
    fn test_unknown_color() {
        let err = "magenta".parse::<NamedRange>().unwrap_err();
        match err {
            OpsError::UnknownColor { name, options } => {
                assert_eq!(name, "magenta");
                assert!(options.contains("purple"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_named_bands() {
        assert_eq!(NamedRange::Red.bands().len(), 2);
        assert_eq!(NamedRange::Red.bands()[1].h_max, 360.0);
        assert_eq!(NamedRange::Blue.bands()[0].h_min, 200.0);
        for color in NamedRange::ALL {
            for band in color.bands() {
                band.validate().unwrap();
            }
        }
    }

    #[test]
    fn test_primaries() {
        let img = swatch(&[
            Rgb8::new(255, 0, 0),
            Rgb8::new(0, 255, 0),
            Rgb8::new(0, 0, 255),
            Rgb8::new(255, 255, 0),
        ]);
        assert_eq!(segment(&img, NamedRange::Red).as_raw(), &[255, 0, 0, 0]);
        assert_eq!(segment(&img, NamedRange::Green).as_raw(), &[0, 255, 0, 0]);
        assert_eq!(segment(&img, NamedRange::Blue).as_raw(), &[0, 0, 255, 0]);
        // 60° is inside yellow's 50-70.
        assert_eq!(segment(&img, NamedRange::Yellow).as_raw(), &[0, 0, 0, 255]);
    }

    #[test]
    fn test_red_wraps() {
        // Hue ~340°, inside the upper red band.
        let img = swatch(&[Rgb8::new(255, 0, 85)]);
        assert_eq!(segment(&img, NamedRange::Red).count(), 1);
        assert_eq!(segment(&img, NamedRange::Purple).count(), 0);
    }

    #[test]
    fn test_low_saturation_rejected() {
        let img = swatch(&[Rgb8::new(128, 128, 128), Rgb8::new(40, 0, 0)]);
        for color in NamedRange::ALL {
            assert_eq!(segment(&img, color).count(), 0, "{color}");
        }
    }

    #[test]
    fn test_custom_range() {
        let img = swatch(&[Rgb8::new(128, 128, 128), Rgb8::new(255, 255, 255)]);
        let gray = HsvRange::new((0.0, 360.0), (0.0, 0.05), (0.4, 0.6)).unwrap();
        assert_eq!(segment_range(&img, &gray).as_raw(), &[255, 0]);
        assert_eq!(segment_ranges(&img, &[]).count(), 0);
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(HsvRange::new((10.0, 5.0), (0.0, 1.0), (0.0, 1.0)).is_err());
        assert!(HsvRange::new((0.0, 400.0), (0.0, 1.0), (0.0, 1.0)).is_err());
        assert!(HsvRange::new((0.0, 10.0), (0.0, f64::NAN), (0.0, 1.0)).is_err());
        assert!(HsvRange::from_opencv([0, 0, 0], [200, 255, 255]).is_err());
    }

    #[test]
    fn test_apply_mask() {
        let img = swatch(&[Rgb8::new(1, 2, 3), Rgb8::new(4, 5, 6)]);
        let mask = Mask::from_bools(2, 1, &[false, true]).unwrap();
        let out = apply_mask(&img, &mask).unwrap();
        assert_eq!(out.pixels(), &[Rgb8::BLACK, Rgb8::new(4, 5, 6)]);

        let err = apply_mask(&img, &Mask::new(1, 2)).unwrap_err();
        assert!(matches!(err, OpsError::SizeMismatch(_)));
    }

    #[test]
    fn test_serde_aliases() {
        let colors: Vec<NamedRange> = serde_yaml::from_str("[red, kirmizi, mavi, cyan]").unwrap();
        assert_eq!(
            colors,
            vec![NamedRange::Red, NamedRange::Red, NamedRange::Blue, NamedRange::Cyan]
        );
        assert!(serde_yaml::from_str::<NamedRange>("magenta").is_err());
    }
}
