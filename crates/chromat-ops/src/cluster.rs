//! Dominant colors through clustering in LAB.
//!
//! [`Clusterer`] is the seam; [`KMeans`] is the built-in implementation.
//! It is Lloyd's algorithm with farthest-point seeding, so the same input
//! always yields the same centers. Distances are Euclidean in LAB (ΔE76).
//!
//! # Example
//!
//! ```rust
//! use chromat_core::{Image, Rgb8};
//! use chromat_ops::cluster::{KMeans, dominant_colors};
//!
//! let img = Image::from_fn(4, 4, |x, _| {
//!     if x < 3 { Rgb8::new(200, 30, 30) } else { Rgb8::new(20, 40, 200) }
//! });
//! let colors = dominant_colors(&img, 2, &KMeans::default()).unwrap();
//! assert_eq!(colors.len(), 2);
//! // Most frequent first.
//! assert!(colors[0].a > 40.0);
//! ```

use crate::grouping::{group_colors, group_means, nearest_palette};
use crate::{OpsError, OpsResult};
use chromat_color::DeltaE;
use chromat_color::bulk::{lab_image_to_rgb, rgb_image_to_lab};
use chromat_core::{Image, Lab, Rgb8};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of clustering a point set.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// One center per cluster.
    pub centers: Vec<Lab>,
    /// Cluster index of each input point.
    pub labels: Vec<usize>,
    /// Sum of squared distances from points to their centers.
    pub compactness: f64,
}

impl Clustering {
    /// Number of points in each cluster.
    pub fn counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.centers.len()];
        for &label in &self.labels {
            counts[label] += 1;
        }
        counts
    }
}

/// Partitions LAB points into `k` clusters.
pub trait Clusterer {
    /// Clusters `points` into exactly `k` clusters.
    ///
    /// # Errors
    ///
    /// Implementations reject `k == 0`, empty input and `k > points.len()`.
    fn cluster(&self, points: &[Lab], k: usize) -> OpsResult<Clustering>;
}

/// Deterministic k-means.
///
/// Stops when no center moves more than `epsilon` or after
/// `max_iterations`. Each of the `attempts` runs seeds from a different
/// starting point; the most compact result wins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeans {
    /// Iteration cap per attempt.
    pub max_iterations: usize,
    /// Convergence threshold on center movement, in ΔE76 units.
    pub epsilon: f64,
    /// Number of seeded runs.
    pub attempts: usize,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            epsilon: 0.2,
            attempts: 10,
        }
    }
}

#[inline]
fn dist2(a: Lab, b: Lab) -> f64 {
    let (dl, da, db) = (a.l - b.l, a.a - b.a, a.b - b.b);
    dl * dl + da * da + db * db
}

fn nearest(p: Lab, centers: &[Lab]) -> usize {
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (i, &c) in centers.iter().enumerate() {
        let d = dist2(p, c);
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    best
}

fn assign(points: &[Lab], centers: &[Lab], labels: &mut [usize]) {
    #[cfg(feature = "parallel")]
    labels
        .par_iter_mut()
        .zip(points.par_iter())
        .for_each(|(label, &p)| *label = nearest(p, centers));
    #[cfg(not(feature = "parallel"))]
    for (label, &p) in labels.iter_mut().zip(points) {
        *label = nearest(p, centers);
    }
}

/// Farthest-point seeding from `points[start]`.
fn seed(points: &[Lab], k: usize, start: usize) -> Vec<Lab> {
    let mut centers = Vec::with_capacity(k);
    centers.push(points[start]);
    let mut d2: Vec<f64> = points.iter().map(|&p| dist2(p, points[start])).collect();
    while centers.len() < k {
        let mut idx = 0;
        for (i, &d) in d2.iter().enumerate() {
            if d > d2[idx] {
                idx = i;
            }
        }
        let c = points[idx];
        centers.push(c);
        for (d, &p) in d2.iter_mut().zip(points) {
            *d = d.min(dist2(p, c));
        }
    }
    centers
}

impl KMeans {
    fn validate(&self, points: &[Lab], k: usize) -> OpsResult<()> {
        if k == 0 {
            return Err(OpsError::invalid("k must be > 0"));
        }
        if points.is_empty() {
            return Err(OpsError::invalid("no points to cluster"));
        }
        if k > points.len() {
            return Err(OpsError::invalid(format!(
                "k = {k} exceeds the number of points ({})",
                points.len()
            )));
        }
        if self.attempts == 0 {
            return Err(OpsError::invalid("attempts must be > 0"));
        }
        if self.epsilon.is_nan() || self.epsilon < 0.0 {
            return Err(OpsError::invalid(format!(
                "epsilon must be >= 0, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }

    fn run(&self, points: &[Lab], k: usize, start: usize) -> Clustering {
        let mut centers = seed(points, k, start);
        let mut labels = vec![0; points.len()];
        let eps2 = self.epsilon * self.epsilon;

        for iter in 0..self.max_iterations {
            assign(points, &centers, &mut labels);

            let mut sums = vec![(0.0, 0.0, 0.0); k];
            let mut counts = vec![0usize; k];
            for (&p, &label) in points.iter().zip(&labels) {
                let s = &mut sums[label];
                *s = (s.0 + p.l, s.1 + p.a, s.2 + p.b);
                counts[label] += 1;
            }

            let mut next: Vec<Lab> = sums
                .iter()
                .zip(&counts)
                .zip(&centers)
                .map(|((s, &n), &old)| {
                    if n == 0 {
                        old
                    } else {
                        let n = n as f64;
                        Lab::new(s.0 / n, s.1 / n, s.2 / n)
                    }
                })
                .collect();

            // An empty cluster takes over the point farthest from its center.
            for j in 0..k {
                if counts[j] > 0 {
                    continue;
                }
                let mut far = 0;
                let mut far_d = -1.0;
                for (i, &p) in points.iter().enumerate() {
                    if counts[labels[i]] <= 1 {
                        continue;
                    }
                    let d = dist2(p, next[labels[i]]);
                    if d > far_d {
                        far = i;
                        far_d = d;
                    }
                }
                if far_d < 0.0 {
                    continue;
                }
                counts[labels[far]] -= 1;
                labels[far] = j;
                counts[j] = 1;
                next[j] = points[far];
            }

            let shift = centers
                .iter()
                .zip(&next)
                .map(|(&a, &b)| dist2(a, b))
                .fold(0.0, f64::max);
            centers = next;
            if shift <= eps2 {
                trace!(iter, start, "k-means converged");
                break;
            }
        }

        assign(points, &centers, &mut labels);
        let compactness = points
            .iter()
            .zip(&labels)
            .map(|(&p, &label)| dist2(p, centers[label]))
            .sum();
        Clustering {
            centers,
            labels,
            compactness,
        }
    }
}

impl Clusterer for KMeans {
    fn cluster(&self, points: &[Lab], k: usize) -> OpsResult<Clustering> {
        self.validate(points, k)?;
        let n = points.len();
        let mut best: Option<Clustering> = None;
        for attempt in 0..self.attempts {
            let start = attempt * n / self.attempts;
            let result = self.run(points, k, start);
            if best.as_ref().is_none_or(|b| result.compactness < b.compactness) {
                best = Some(result);
            }
        }
        let best = best.ok_or_else(|| OpsError::invalid("attempts must be > 0"))?;
        debug!(
            points = n,
            k,
            compactness = best.compactness,
            "k-means finished"
        );
        Ok(best)
    }
}

// ============================================================================
// Image helpers
// ============================================================================

/// The `k` dominant colors of an image in LAB, most frequent first.
///
/// # Errors
///
/// Whatever the clusterer rejects (`k == 0`, `k` above the pixel count).
pub fn dominant_colors(
    image: &Image<Rgb8>,
    k: usize,
    clusterer: &impl Clusterer,
) -> OpsResult<Vec<Lab>> {
    let lab = rgb_image_to_lab(image);
    let clustering = clusterer.cluster(lab.pixels(), k)?;
    let counts = clustering.counts();
    let mut order: Vec<usize> = (0..clustering.centers.len()).collect();
    order.sort_by(|&a, &b| counts[b].cmp(&counts[a]));
    Ok(order.into_iter().map(|i| clustering.centers[i]).collect())
}

/// Dominant colors merged by ΔE: clusters `k` colors, groups those within
/// `threshold`, and returns the mean of each group.
pub fn grouped_palette(
    image: &Image<Rgb8>,
    k: usize,
    clusterer: &impl Clusterer,
    threshold: f64,
    metric: DeltaE,
) -> OpsResult<Vec<Lab>> {
    let dominant = dominant_colors(image, k, clusterer)?;
    let groups = group_colors(&dominant, threshold, metric);
    Ok(group_means(&groups))
}

/// Repaints every pixel with its nearest dominant color.
pub fn color_map(
    image: &Image<Rgb8>,
    k: usize,
    clusterer: &impl Clusterer,
    metric: DeltaE,
) -> OpsResult<Image<Rgb8>> {
    let palette = dominant_colors(image, k, clusterer)?;
    let lab = rgb_image_to_lab(image);
    let mapped = nearest_palette(&lab, &palette, metric)?;
    Ok(lab_image_to_rgb(&mapped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chromat_color::convert::rgb_to_lab;

    fn blobs() -> Vec<Lab> {
        let mut points = Vec::new();
        for i in 0..5 {
            let d = i as f64 * 0.5;
            points.push(Lab::new(30.0 + d, 10.0, -10.0 + d));
            points.push(Lab::new(80.0 - d, -30.0 + d, 40.0));
        }
        points
    }

    #[test]
    fn test_two_blobs() {
        let points = blobs();
        let result = KMeans::default().cluster(&points, 2).unwrap();
        assert_eq!(result.centers.len(), 2);
        assert_eq!(result.counts(), vec![5, 5]);
        // Points alternate between blobs.
        for pair in result.labels.chunks(2) {
            assert_ne!(pair[0], pair[1]);
        }
        let low = result.centers[result.labels[0]];
        assert_abs_diff_eq!(low.l, 31.0, epsilon = 1e-9);
        assert_abs_diff_eq!(low.b, -9.0, epsilon = 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let points = blobs();
        let km = KMeans::default();
        assert_eq!(km.cluster(&points, 3).unwrap(), km.cluster(&points, 3).unwrap());
    }

    #[test]
    fn test_invalid_inputs() {
        let km = KMeans::default();
        assert!(km.cluster(&[], 1).is_err());
        assert!(km.cluster(&blobs(), 0).is_err());
        assert!(km.cluster(&blobs(), 11).is_err());
        let none = KMeans {
            attempts: 0,
            ..KMeans::default()
        };
        assert!(none.cluster(&blobs(), 2).is_err());
        let nan = KMeans {
            epsilon: f64::NAN,
            ..KMeans::default()
        };
        assert!(nan.cluster(&blobs(), 2).is_err());
    }

    #[test]
    fn test_more_clusters_than_colors() {
        let points = vec![Lab::new(50.0, 0.0, 0.0); 6];
        let result = KMeans::default().cluster(&points, 3).unwrap();
        assert_eq!(result.centers, vec![points[0]; 3]);
        assert_eq!(result.compactness, 0.0);
    }

    #[test]
    fn test_dominant_order() {
        let red = Rgb8::new(200, 30, 30);
        let blue = Rgb8::new(20, 40, 200);
        let img = Image::from_fn(4, 4, |x, _| if x < 3 { red } else { blue });
        let colors = dominant_colors(&img, 2, &KMeans::default()).unwrap();
        assert_eq!(colors.len(), 2);
        for (got, px) in colors.iter().zip([red, blue]) {
            let want = rgb_to_lab(px);
            assert_abs_diff_eq!(got.l, want.l, epsilon = 1e-9);
            assert_abs_diff_eq!(got.a, want.a, epsilon = 1e-9);
            assert_abs_diff_eq!(got.b, want.b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_color_map_two_colors() {
        let img = Image::from_fn(5, 2, |x, y| {
            if (x + y) % 2 == 0 { Rgb8::new(200, 30, 30) } else { Rgb8::new(20, 40, 200) }
        });
        let mapped = color_map(&img, 2, &KMeans::default(), DeltaE::Cie76).unwrap();
        assert_eq!(mapped, img);
    }

    #[test]
    fn test_grouped_palette() {
        let img = Image::from_fn(3, 1, |x, _| match x {
            0 => Rgb8::new(200, 30, 30),
            1 => Rgb8::new(205, 30, 30),
            _ => Rgb8::new(20, 40, 200),
        });
        let palette = grouped_palette(&img, 3, &KMeans::default(), 5.0, DeltaE::Ciede2000).unwrap();
        assert_eq!(palette.len(), 2);
    }

    #[test]
    fn test_kmeans_serde_defaults() {
        let km: KMeans = serde_yaml::from_str("attempts: 3").unwrap();
        assert_eq!(km.attempts, 3);
        assert_eq!(km.max_iterations, 100);
        assert_eq!(km.epsilon, 0.2);
    }
}
