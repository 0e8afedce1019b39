//! Perceptual color difference (Delta E).
//!
//! Three metrics of increasing fidelity, all over LAB pairs:
//!
//! | Metric | Function | Notes |
//! |--------|----------|-------|
//! | CIE76 | [`cie76`] | Euclidean distance |
//! | CIE94 | [`cie94`] | Weighted by the first color's chroma, not symmetric |
//! | CIEDE2000 | [`ciede2000`] | Hue rotation term, lightness/chroma/hue weighting |
//!
//! [`DeltaE`] selects a metric at runtime (from configuration, for
//! example) and [`interpret`] buckets a difference into a [`Perception`].
//!
//! ```rust
//! use chromat_color::delta_e::{ciede2000, interpret, Perception};
//! use chromat_core::Lab;
//!
//! let de = ciede2000(Lab::new(50.0, 2.5, 0.0), Lab::new(50.0, 3.1736, 0.5854));
//! assert!((de - 1.0).abs() < 1e-4);
//! assert_eq!(interpret(0.5), Perception::Imperceptible);
//! ```
//!
//! # Reference
//!
//! G. Sharma, W. Wu, E. N. Dalal, "The CIEDE2000 Color-Difference Formula:
//! Implementation Notes, Supplementary Test Data, and Mathematical
//! Observations", Color Research & Application 30(1), 2005.

use crate::error::{ColorError, ColorResult};
use chromat_core::Lab;
use chromat_math::angle::{atan2_degrees, to_radians};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CIE76
// ============================================================================

/// CIE76: Euclidean distance in LAB.
#[inline]
pub fn cie76(lab1: Lab, lab2: Lab) -> f64 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

// ============================================================================
// CIE94
// ============================================================================

/// CIE94 weighting set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cie94Application {
    /// kL = 1, K1 = 0.045, K2 = 0.015
    #[default]
    GraphicArts,
    /// kL = 2, K1 = 0.048, K2 = 0.014
    Textiles,
}

impl Cie94Application {
    /// `(kL, K1, K2)`.
    pub const fn weights(self) -> (f64, f64, f64) {
        match self {
            Self::GraphicArts => (1.0, 0.045, 0.015),
            Self::Textiles => (2.0, 0.048, 0.014),
        }
    }
}

/// CIE94 difference.
///
/// `SC` and `SH` use the chroma of `lab1`, so the metric is not symmetric.
/// The hue term's radicand is clamped at zero before the square root.
pub fn cie94(lab1: Lab, lab2: Lab, application: Cie94Application) -> f64 {
    let (kl, k1, k2) = application.weights();

    let c1 = lab1.chroma();
    let c2 = lab2.chroma();
    let dl = lab1.l - lab2.l;
    let dc = c1 - c2;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    let dh = (da * da + db * db - dc * dc).max(0.0).sqrt();

    let sl = 1.0;
    let sc = 1.0 + k1 * c1;
    let sh = 1.0 + k2 * c1;

    let tl = dl / (kl * sl);
    let tc = dc / sc;
    let th = dh / sh;
    (tl * tl + tc * tc + th * th).sqrt()
}

// ============================================================================
// CIEDE2000
// ============================================================================

const POW25_7: f64 = 6_103_515_625.0; // 25^7

/// Hue angle of `(a', b)` in degrees; 0 when both are 0.
#[inline]
fn hue_prime(b: f64, a_prime: f64) -> f64 {
    if a_prime == 0.0 && b == 0.0 {
        0.0
    } else {
        atan2_degrees(b, a_prime)
    }
}

/// CIEDE2000 with unit parametric factors.
#[inline]
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    ciede2000_weighted(lab1, lab2, 1.0, 1.0, 1.0)
}

/// CIEDE2000 with parametric factors `kL`, `kC`, `kH`.
pub fn ciede2000_weighted(lab1: Lab, lab2: Lab, kl: f64, kc: f64, kh: f64) -> f64 {
    // a' correction
    let c_bar = (lab1.chroma() + lab2.chroma()) / 2.0;
    let c_bar7 = c_bar.powi(7);
    let g = 0.5 * (1.0 - (c_bar7 / (c_bar7 + POW25_7)).sqrt());
    let a1p = (1.0 + g) * lab1.a;
    let a2p = (1.0 + g) * lab2.a;

    let c1p = a1p.hypot(lab1.b);
    let c2p = a2p.hypot(lab2.b);
    let h1p = hue_prime(lab1.b, a1p);
    let h2p = hue_prime(lab2.b, a2p);
    let chroma_product = c1p * c2p;

    // Differences
    let dlp = lab2.l - lab1.l;
    let dcp = c2p - c1p;
    let dhp = if chroma_product == 0.0 {
        0.0
    } else {
        let d = h2p - h1p;
        if d > 180.0 {
            d - 360.0
        } else if d < -180.0 {
            d + 360.0
        } else {
            d
        }
    };
    let d_hp = 2.0 * chroma_product.sqrt() * to_radians(dhp / 2.0).sin();

    // Means
    let l_bar = (lab1.l + lab2.l) / 2.0;
    let c_bar_p = (c1p + c2p) / 2.0;
    let h_bar_p = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    // Weighting functions
    let t = 1.0 - 0.17 * to_radians(h_bar_p - 30.0).cos()
        + 0.24 * to_radians(2.0 * h_bar_p).cos()
        + 0.32 * to_radians(3.0 * h_bar_p + 6.0).cos()
        - 0.20 * to_radians(4.0 * h_bar_p - 63.0).cos();
    let d_theta = 30.0 * (-((h_bar_p - 275.0) / 25.0).powi(2)).exp();
    let c_bar_p7 = c_bar_p.powi(7);
    let rc = 2.0 * (c_bar_p7 / (c_bar_p7 + POW25_7)).sqrt();
    let l50 = (l_bar - 50.0).powi(2);
    let sl = 1.0 + 0.015 * l50 / (20.0 + l50).sqrt();
    let sc = 1.0 + 0.045 * c_bar_p;
    let sh = 1.0 + 0.015 * c_bar_p * t;
    let rt = -to_radians(2.0 * d_theta).sin() * rc;

    let tl = dlp / (kl * sl);
    let tc = dcp / (kc * sc);
    let th = d_hp / (kh * sh);
    (tl * tl + tc * tc + th * th + rt * tc * th).max(0.0).sqrt()
}

// ============================================================================
// Runtime metric selection
// ============================================================================

/// A Delta E metric, selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeltaE {
    /// [`cie76`]
    #[serde(rename = "cie76")]
    Cie76,
    /// [`cie94`] with graphic arts weights
    #[serde(rename = "cie94")]
    Cie94,
    /// [`cie94`] with textile weights
    #[serde(rename = "cie94-textiles")]
    Cie94Textiles,
    /// [`ciede2000`]
    #[default]
    #[serde(rename = "ciede2000")]
    Ciede2000,
}

impl DeltaE {
    /// Every metric.
    pub const ALL: [DeltaE; 4] = [Self::Cie76, Self::Cie94, Self::Cie94Textiles, Self::Ciede2000];

    /// Canonical name, as accepted by [`FromStr`] and serde.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cie76 => "cie76",
            Self::Cie94 => "cie94",
            Self::Cie94Textiles => "cie94-textiles",
            Self::Ciede2000 => "ciede2000",
        }
    }

    /// Difference between two LAB colors under this metric.
    #[inline]
    pub fn compute(self, lab1: Lab, lab2: Lab) -> f64 {
        match self {
            Self::Cie76 => cie76(lab1, lab2),
            Self::Cie94 => cie94(lab1, lab2, Cie94Application::GraphicArts),
            Self::Cie94Textiles => cie94(lab1, lab2, Cie94Application::Textiles),
            Self::Ciede2000 => ciede2000(lab1, lab2),
        }
    }

    /// Whether `compute(a, b) == compute(b, a)` for all inputs.
    pub const fn is_symmetric(self) -> bool {
        !matches!(self, Self::Cie94 | Self::Cie94Textiles)
    }
}

impl fmt::Display for DeltaE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeltaE {
    type Err = ColorError;

    /// Accepts the canonical names plus `76`, `94`, `2000`, `de2000`;
    /// case and `_`/`-` are ignored.
    fn from_str(s: &str) -> ColorResult<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "cie76" | "76" | "de76" => Ok(Self::Cie76),
            "cie94" | "94" | "de94" => Ok(Self::Cie94),
            "cie94textiles" | "cie94textile" | "94textiles" => Ok(Self::Cie94Textiles),
            "ciede2000" | "2000" | "de2000" => Ok(Self::Ciede2000),
            _ => Err(ColorError::UnknownMetric {
                name: s.to_string(),
                options: Self::ALL.map(|m| m.name()).join(", "),
            }),
        }
    }
}

// ============================================================================
// Interpretation
// ============================================================================

/// Qualitative reading of a Delta E value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perception {
    /// ΔE < 1
    Imperceptible,
    /// 1 <= ΔE < 2
    TrainedEye,
    /// 2 <= ΔE < 3.5
    CloselyNoticeable,
    /// 3.5 <= ΔE < 5
    Noticeable,
    /// 5 <= ΔE < 10
    ClearlyDifferent,
    /// ΔE >= 10
    TotallyDifferent,
}

impl Perception {
    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Imperceptible => "Imperceptible",
            Self::TrainedEye => "Perceptible to a trained eye",
            Self::CloselyNoticeable => "Perceptible on close inspection",
            Self::Noticeable => "Noticeable",
            Self::ClearlyDifferent => "Clearly different",
            Self::TotallyDifferent => "Totally different",
        }
    }
}

impl fmt::Display for Perception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Buckets a Delta E value at 1, 2, 3.5, 5 and 10.
///
/// NaN falls through to [`Perception::TotallyDifferent`].
pub fn interpret(delta_e: f64) -> Perception {
    if delta_e < 1.0 {
        Perception::Imperceptible
    } else if delta_e < 2.0 {
        Perception::TrainedEye
    } else if delta_e < 3.5 {
        Perception::CloselyNoticeable
    } else if delta_e < 5.0 {
        Perception::Noticeable
    } else if delta_e < 10.0 {
        Perception::ClearlyDifferent
    } else {
        Perception::TotallyDifferent
    }
}
