//! Delta E thresholding, greedy color grouping and palette mapping.
//!
//! All three take the metric as a [`DeltaE`] value, so the same code runs
//! under CIE76, CIE94 or CIEDE2000.
//!
//! ```rust
//! use chromat_color::DeltaE;
//! use chromat_core::Lab;
//! use chromat_ops::grouping::group_colors;
//!
//! let colors = [
//!     Lab::new(50.0, 20.0, 30.0),
//!     Lab::new(80.0, -20.0, -30.0),
//!     Lab::new(52.0, 22.0, 28.0),
//! ];
//! let groups = group_colors(&colors, 10.0, DeltaE::Cie76);
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[0], vec![colors[0], colors[2]]);
//! ```

use crate::{OpsError, OpsResult};
use chromat_color::DeltaE;
use chromat_core::{Image, Lab, Mask};
use tracing::debug;

/// Mask of the pixels whose ΔE to `reference` is strictly below `threshold`.
pub fn delta_e_mask(image: &Image<Lab>, reference: Lab, threshold: f64, metric: DeltaE) -> Mask {
    let mask = Mask::from_image(image, |px| metric.compute(reference, px) < threshold);
    debug!(
        metric = metric.name(),
        threshold,
        selected = mask.count(),
        "Delta E mask"
    );
    mask
}

/// Greedy first-fit grouping.
///
/// Colors are visited in input order. Each color not yet grouped seeds a
/// new group and pulls in every later ungrouped color within `threshold`
/// (inclusive) of the seed. Every input lands in exactly one group.
pub fn group_colors(colors: &[Lab], threshold: f64, metric: DeltaE) -> Vec<Vec<Lab>> {
    let mut assigned = vec![false; colors.len()];
    let mut groups = Vec::new();

    for (i, &seed) in colors.iter().enumerate() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let mut group = vec![seed];
        for (j, &candidate) in colors.iter().enumerate().skip(i + 1) {
            if !assigned[j] && metric.compute(seed, candidate) <= threshold {
                assigned[j] = true;
                group.push(candidate);
            }
        }
        groups.push(group);
    }

    debug!(colors = colors.len(), groups = groups.len(), "Grouped colors");
    groups
}

/// Component-wise mean of each group. Empty groups are skipped.
pub fn group_means(groups: &[Vec<Lab>]) -> Vec<Lab> {
    groups
        .iter()
        .filter(|g| !g.is_empty())
        .map(|g| {
            let n = g.len() as f64;
            let (l, a, b) = g
                .iter()
                .fold((0.0, 0.0, 0.0), |acc, c| (acc.0 + c.l, acc.1 + c.a, acc.2 + c.b));
            Lab::new(l / n, a / n, b / n)
        })
        .collect()
}

/// Index of the palette entry closest to `color`. Ties go to the first.
///
/// Returns `None` for an empty palette.
pub fn nearest_index(color: Lab, palette: &[Lab], metric: DeltaE) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &entry) in palette.iter().enumerate() {
        let d = metric.compute(color, entry);
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Replaces every pixel by its nearest palette color.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if the palette is empty.
pub fn nearest_palette(
    image: &Image<Lab>,
    palette: &[Lab],
    metric: DeltaE,
) -> OpsResult<Image<Lab>> {
    if palette.is_empty() {
        return Err(OpsError::invalid("palette is empty"));
    }
    Ok(image.map(|px| {
        let idx = nearest_index(px, palette, metric).unwrap_or(0);
        palette[idx]
    }))
}
