//! Binary morphology on [`Mask`]s.
//!
//! Erosion keeps a pixel when every neighbor under the structuring element
//! is set; dilation sets it when any neighbor is. Neighbors that fall
//! outside the mask are ignored, so borders neither erode nor grow.
//!
//! - [`open`] - erode then dilate, removes specks
//! - [`close`] - dilate then erode, fills pinholes
//! - [`refine`] - open then close with square elements
//!
//! Rows are processed in parallel with the `parallel` feature.
//!
//! # Example
//!
//! ```rust
//! use chromat_core::Mask;
//! use chromat_ops::morphology::{StructuringElement, open};
//!
//! // A lone pixel disappears under a 3x3 opening.
//! let mut mask = Mask::new(5, 5);
//! mask.set(2, 2, true).unwrap();
//! let cleaned = open(&mask, &StructuringElement::rect(3).unwrap());
//! assert_eq!(cleaned.count(), 0);
//! ```

use crate::{OpsError, OpsResult};
use chromat_core::Mask;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Shape of a structuring element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementShape {
    /// Full square.
    #[default]
    #[serde(alias = "kare")]
    Rect,
    /// Ellipse inscribed in the square.
    #[serde(alias = "daire")]
    Ellipse,
    /// Center row and column.
    #[serde(alias = "capraz")]
    Cross,
}

/// A square structuring element with odd side, anchored at its center.
#[derive(Clone, PartialEq, Eq)]
pub struct StructuringElement {
    size: usize,
    shape: ElementShape,
    /// Active `(dx, dy)` offsets relative to the anchor.
    offsets: Vec<(isize, isize)>,
}

impl StructuringElement {
    /// Builds an element of the given shape.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] unless `size` is odd and positive.
    pub fn new(shape: ElementShape, size: usize) -> OpsResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(OpsError::invalid(format!(
                "structuring element size must be odd and > 0, got {size}"
            )));
        }
        let anchor = (size / 2) as isize;
        let mut offsets = Vec::with_capacity(size * size);
        for row in 0..size {
            let (start, end) = row_span(shape, size, row);
            for col in start..end {
                offsets.push((col as isize - anchor, row as isize - anchor));
            }
        }
        Ok(Self {
            size,
            shape,
            offsets,
        })
    }

    /// `size x size` square.
    pub fn rect(size: usize) -> OpsResult<Self> {
        Self::new(ElementShape::Rect, size)
    }

    /// Ellipse inscribed in a `size x size` square.
    pub fn ellipse(size: usize) -> OpsResult<Self> {
        Self::new(ElementShape::Ellipse, size)
    }

    /// Center row plus center column.
    pub fn cross(size: usize) -> OpsResult<Self> {
        Self::new(ElementShape::Cross, size)
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Shape the element was built with.
    pub fn shape(&self) -> ElementShape {
        self.shape
    }

    /// Whether the cell at `(col, row)` is part of the element.
    pub fn contains(&self, col: usize, row: usize) -> bool {
        let anchor = (self.size / 2) as isize;
        let d = (col as isize - anchor, row as isize - anchor);
        self.offsets.contains(&d)
    }

    /// Number of active cells.
    pub fn area(&self) -> usize {
        self.offsets.len()
    }
}

impl std::fmt::Debug for StructuringElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuringElement")
            .field("size", &self.size)
            .field("shape", &self.shape)
            .field("area", &self.area())
            .finish()
    }
}

/// Active column range `[start, end)` of one element row.
fn row_span(shape: ElementShape, size: usize, row: usize) -> (usize, usize) {
    let r = (size / 2) as isize;
    match shape {
        ElementShape::Rect => (0, size),
        ElementShape::Cross if row as isize == r => (0, size),
        ElementShape::Cross => (r as usize, r as usize + 1),
        ElementShape::Ellipse => {
            if r == 0 {
                return (0, size);
            }
            let dy = row as isize - r;
            let rr = (r * r) as f64;
            let dx = (r as f64 * ((rr - (dy * dy) as f64) / rr).sqrt()).round() as isize;
            let start = (r - dx).max(0) as usize;
            let end = ((r + dx + 1) as usize).min(size);
            (start, end)
        }
    }
}

// ============================================================================
// Operators
// ============================================================================

#[derive(Clone, Copy)]
enum Op {
    Erode,
    Dilate,
}

fn apply(mask: &Mask, element: &StructuringElement, op: Op) -> Mask {
    let (w, h) = mask.dimensions();
    if w == 0 || h == 0 {
        return mask.clone();
    }
    let (w, h) = (w as isize, h as isize);
    let src = mask.as_raw();
    let mut out = Mask::new(w as u32, h as u32);

    let fill_row = |y: usize, row: &mut [u8]| {
        let y = y as isize;
        for (x, cell) in row.iter_mut().enumerate() {
            let x = x as isize;
            let mut neighbors = element.offsets.iter().filter_map(|&(dx, dy)| {
                let (nx, ny) = (x + dx, y + dy);
                (nx >= 0 && nx < w && ny >= 0 && ny < h)
                    .then(|| src[(ny * w + nx) as usize] == Mask::ON)
            });
            let on = match op {
                Op::Erode => neighbors.all(|set| set),
                Op::Dilate => neighbors.any(|set| set),
            };
            *cell = if on { Mask::ON } else { Mask::OFF };
        }
    };

    let rows = out.as_raw_mut();
    #[cfg(feature = "parallel")]
    rows.par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| fill_row(y, row));
    #[cfg(not(feature = "parallel"))]
    rows.chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| fill_row(y, row));

    out
}

/// Erosion: a pixel stays set only if every in-mask neighbor is set.
pub fn erode(mask: &Mask, element: &StructuringElement) -> Mask {
    trace!(size = element.size(), "erode");
    apply(mask, element, Op::Erode)
}

/// Dilation: a pixel becomes set if any in-mask neighbor is set.
pub fn dilate(mask: &Mask, element: &StructuringElement) -> Mask {
    trace!(size = element.size(), "dilate");
    apply(mask, element, Op::Dilate)
}

/// Opening: erosion then dilation.
pub fn open(mask: &Mask, element: &StructuringElement) -> Mask {
    dilate(&erode(mask, element), element)
}

/// Closing: dilation then erosion.
pub fn close(mask: &Mask, element: &StructuringElement) -> Mask {
    erode(&dilate(mask, element), element)
}

/// Opens with a square of `open_size`, then closes with a square of
/// `close_size`.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if either size is even or zero.
pub fn refine(mask: &Mask, open_size: usize, close_size: usize) -> OpsResult<Mask> {
    let opening = StructuringElement::rect(open_size)?;
    let closing = StructuringElement::rect(close_size)?;
    Ok(refine_with(mask, &opening, &closing))
}

/// [`refine`] with explicit elements.
pub fn refine_with(
    mask: &Mask,
    opening: &StructuringElement,
    closing: &StructuringElement,
) -> Mask {
    let refined = close(&open(mask, opening), closing);
    debug!(
        before = mask.count(),
        after = refined.count(),
        "Refined mask"
    );
    refined
}
