//! YAML configuration for segmentation runs.
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```yaml
//! colors: [red, green, blue]
//! custom_ranges:
//!   - name: skin
//!     ranges:
//!       - { h_min: 0, h_max: 50, s_min: 0.2, s_max: 0.7, v_min: 0.3, v_max: 1 }
//! morphology:
//!   open_size: 3
//!   close_size: 7
//!   shape: rect
//! grouping:
//!   metric: ciede2000
//!   threshold: 20
//!   clusters: 8
//! delta_e_threshold: 30
//! ```
//!
//! Color names and shapes also accept the Turkish identifiers used by
//! older configs (`kirmizi`, `mavi`, `daire`, ...).

use crate::cluster::{KMeans, grouped_palette};
use crate::grouping;
use crate::morphology::{ElementShape, StructuringElement, refine_with};
use crate::segment::{HsvRange, NamedRange, segment, segment_ranges};
use crate::{OpsError, OpsResult};
use chromat_color::DeltaE;
use chromat_core::{Image, Lab, Mask, Rgb8};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A user-defined color selected by one or more HSV bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomRange {
    /// Label of the resulting mask.
    pub name: String,
    /// Bands, unioned.
    pub ranges: Vec<HsvRange>,
}

/// Mask cleanup settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologyConfig {
    /// Side of the opening element.
    pub open_size: usize,
    /// Side of the closing element.
    pub close_size: usize,
    /// Element shape for both steps.
    pub shape: ElementShape,
}

impl Default for MorphologyConfig {
    fn default() -> Self {
        Self {
            open_size: 3,
            close_size: 7,
            shape: ElementShape::Rect,
        }
    }
}

impl MorphologyConfig {
    fn elements(&self) -> OpsResult<(StructuringElement, StructuringElement)> {
        Ok((
            StructuringElement::new(self.shape, self.open_size)?,
            StructuringElement::new(self.shape, self.close_size)?,
        ))
    }

    /// Opens then closes `mask` with the configured elements.
    pub fn refine(&self, mask: &Mask) -> OpsResult<Mask> {
        let (opening, closing) = self.elements()?;
        Ok(refine_with(mask, &opening, &closing))
    }
}

/// Palette extraction settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Metric for grouping and palette mapping.
    pub metric: DeltaE,
    /// Colors closer than this join one group.
    pub threshold: f64,
    /// Dominant colors to extract.
    pub clusters: usize,
    /// Clustering parameters.
    pub kmeans: KMeans,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            metric: DeltaE::Ciede2000,
            threshold: 20.0,
            clusters: 8,
            kmeans: KMeans::default(),
        }
    }
}

impl GroupingConfig {
    /// Sets the metric by name, e.g. `"de2000"` or `"76"`.
    ///
    /// # Errors
    ///
    /// [`OpsError::Color`] for a name no metric answers to.
    pub fn set_metric(&mut self, name: &str) -> OpsResult<()> {
        self.metric = name.parse()?;
        Ok(())
    }
}

/// Top-level segmentation config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Named colors to segment.
    pub colors: Vec<NamedRange>,
    /// Additional user-defined colors.
    pub custom_ranges: Vec<CustomRange>,
    /// Mask cleanup.
    pub morphology: MorphologyConfig,
    /// Palette extraction.
    pub grouping: GroupingConfig,
    /// Threshold for [`delta_e_mask`](crate::grouping::delta_e_mask).
    pub delta_e_threshold: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            colors: vec![NamedRange::Red, NamedRange::Green, NamedRange::Blue],
            custom_ranges: Vec::new(),
            morphology: MorphologyConfig::default(),
            grouping: GroupingConfig::default(),
            delta_e_threshold: 30.0,
        }
    }
}

fn non_negative(name: &str, value: f64) -> OpsResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(OpsError::invalid(format!("{name} must be finite and >= 0, got {value}")))
    }
}

impl SegmentationConfig {
    /// Loads a config from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> OpsResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OpsError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loading segmentation config");
        Self::from_yaml_str(&content)
    }

    /// Parses and validates a config from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> OpsResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to YAML.
    pub fn to_yaml_string(&self) -> OpsResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks ranges, element sizes, thresholds and clustering parameters.
    pub fn validate(&self) -> OpsResult<()> {
        for custom in &self.custom_ranges {
            if custom.ranges.is_empty() {
                return Err(OpsError::invalid(format!(
                    "custom range '{}' has no bands",
                    custom.name
                )));
            }
            for range in &custom.ranges {
                range.validate()?;
            }
        }
        self.morphology.elements()?;
        non_negative("grouping.threshold", self.grouping.threshold)?;
        non_negative("delta_e_threshold", self.delta_e_threshold)?;
        non_negative("grouping.kmeans.epsilon", self.grouping.kmeans.epsilon)?;
        if self.grouping.clusters == 0 {
            return Err(OpsError::invalid("grouping.clusters must be > 0"));
        }
        if self.grouping.kmeans.attempts == 0 {
            return Err(OpsError::invalid("grouping.kmeans.attempts must be > 0"));
        }
        Ok(())
    }

    /// Segments every configured color and refines each mask.
    ///
    /// Named colors come first, in config order, then custom ranges.
    pub fn segment_all(&self, image: &Image<Rgb8>) -> OpsResult<Vec<(String, Mask)>> {
        let (opening, closing) = self.morphology.elements()?;
        let mut masks = Vec::with_capacity(self.colors.len() + self.custom_ranges.len());

        for &color in &self.colors {
            let mask = refine_with(&segment(image, color), &opening, &closing);
            masks.push((color.name().to_string(), mask));
        }
        for custom in &self.custom_ranges {
            let mask = refine_with(&segment_ranges(image, &custom.ranges), &opening, &closing);
            masks.push((custom.name.clone(), mask));
        }

        debug!(masks = masks.len(), "Segmented configured colors");
        Ok(masks)
    }

    /// Grouped dominant colors of `image` using the `grouping` settings.
    pub fn palette(&self, image: &Image<Rgb8>) -> OpsResult<Vec<Lab>> {
        let g = &self.grouping;
        grouped_palette(image, g.clusters, &g.kmeans, g.threshold, g.metric)
    }

    /// Pixels within `delta_e_threshold` of `reference` under `grouping.metric`.
    pub fn delta_e_mask(&self, image: &Image<Lab>, reference: Lab) -> Mask {
        grouping::delta_e_mask(image, reference, self.delta_e_threshold, self.grouping.metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "
colors: [kirmizi, blue]
custom_ranges:
  - name: skin
    ranges:
      - { h_min: 0, h_max: 50, s_min: 0.2, s_max: 0.7, v_min: 0.3, v_max: 1 }
morphology:
  shape: daire
  close_size: 5
grouping:
  metric: cie76
  threshold: 15
  kmeans:
    attempts: 4
";

    #[test]
    fn test_defaults() {
        let config = SegmentationConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, SegmentationConfig::default());
        assert_eq!(config.morphology.open_size, 3);
        assert_eq!(config.morphology.close_size, 7);
        assert_eq!(config.grouping.threshold, 20.0);
        assert_eq!(config.grouping.clusters, 8);
        assert_eq!(config.delta_e_threshold, 30.0);
    }

    #[test]
    fn test_full_document() {
        let config = SegmentationConfig::from_yaml_str(FULL).unwrap();
        assert_eq!(config.colors, vec![NamedRange::Red, NamedRange::Blue]);
        assert_eq!(config.custom_ranges[0].name, "skin");
        assert_eq!(config.custom_ranges[0].ranges[0].h_max, 50.0);
        assert_eq!(config.morphology.shape, ElementShape::Ellipse);
        assert_eq!(config.morphology.open_size, 3);
        assert_eq!(config.morphology.close_size, 5);
        assert_eq!(config.grouping.metric, DeltaE::Cie76);
        assert_eq!(config.grouping.kmeans.attempts, 4);
        assert_eq!(config.grouping.kmeans.max_iterations, 100);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = SegmentationConfig::from_yaml_str(FULL).unwrap();
        let yaml = config.to_yaml_string().unwrap();
        assert_eq!(SegmentationConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let even = "morphology: { close_size: 4 }";
        assert!(matches!(
            SegmentationConfig::from_yaml_str(even),
            Err(OpsError::InvalidParameter(_))
        ));
        let negative = "delta_e_threshold: -1";
        assert!(SegmentationConfig::from_yaml_str(negative).is_err());
        let no_bands = "custom_ranges: [{ name: x, ranges: [] }]";
        assert!(SegmentationConfig::from_yaml_str(no_bands).is_err());
        let unknown = "colors: [magenta]";
        assert!(matches!(
            SegmentationConfig::from_yaml_str(unknown),
            Err(OpsError::Yaml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("segment.yaml");
        std::fs::write(&path, FULL).unwrap();
        let config = SegmentationConfig::from_file(&path).unwrap();
        assert_eq!(config.grouping.threshold, 15.0);

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            SegmentationConfig::from_file(&missing),
            Err(OpsError::ConfigNotFound { .. })
        ));
    }

    fn swatches() -> Image<Rgb8> {
        Image::from_fn(4, 1, |x, _| match x {
            0 => Rgb8::new(200, 30, 30),
            1 => Rgb8::new(205, 30, 30),
            2 => Rgb8::new(128, 128, 128),
            _ => Rgb8::new(20, 40, 200),
        })
    }

    #[test]
    fn test_palette_follows_grouping() {
        let mut config = SegmentationConfig::default();
        config.grouping.clusters = 4;
        assert_eq!(config.palette(&swatches()).unwrap().len(), 3);

        config.grouping.threshold = 0.5;
        assert_eq!(config.palette(&swatches()).unwrap().len(), 4);

        config.grouping.clusters = 2;
        assert_eq!(config.palette(&swatches()).unwrap().len(), 2);

        // Default asks for 8 clusters, more than the 4 pixels.
        assert!(SegmentationConfig::default().palette(&swatches()).is_err());
    }

    #[test]
    fn test_set_metric_by_name() {
        let mut grouping = GroupingConfig::default();
        grouping.set_metric("76").unwrap();
        assert_eq!(grouping.metric, DeltaE::Cie76);
        grouping.set_metric("cie94-textiles").unwrap();
        assert_eq!(grouping.metric, DeltaE::Cie94Textiles);

        let err = grouping.set_metric("cmc").unwrap_err();
        assert!(matches!(
            err,
            OpsError::Color(chromat_color::ColorError::UnknownMetric { .. })
        ));
        assert_eq!(grouping.metric, DeltaE::Cie94Textiles);
    }

    #[test]
    fn test_delta_e_mask_follows_config() {
        let lab = chromat_color::bulk::rgb_image_to_lab(&swatches());
        let red = lab.pixel(0, 0);

        // Gray sits 30.1 from red in CIEDE2000.
        let config = SegmentationConfig::default();
        assert_eq!(config.delta_e_mask(&lab, red).as_raw(), &[255, 255, 0, 0]);

        let loose = SegmentationConfig {
            delta_e_threshold: 35.0,
            ..SegmentationConfig::default()
        };
        assert_eq!(loose.delta_e_mask(&lab, red).as_raw(), &[255, 255, 255, 0]);

        // The two reds are 1.04 apart in CIEDE2000 but 2.14 in CIE76.
        let mut tight = SegmentationConfig {
            delta_e_threshold: 2.0,
            ..SegmentationConfig::default()
        };
        assert_eq!(tight.delta_e_mask(&lab, red).as_raw(), &[255, 255, 0, 0]);
        tight.grouping.metric = DeltaE::Cie76;
        assert_eq!(tight.delta_e_mask(&lab, red).as_raw(), &[255, 0, 0, 0]);
    }

    #[test]
    fn test_segment_all() {
        let img = Image::from_fn(11, 11, |x, y| {
            if (2..9).contains(&x) && (2..9).contains(&y) {
                Rgb8::new(255, 0, 0)
            } else {
                Rgb8::WHITE
            }
        });
        let config = SegmentationConfig {
            colors: vec![NamedRange::Red, NamedRange::Blue],
            morphology: MorphologyConfig {
                close_size: 3,
                ..MorphologyConfig::default()
            },
            ..SegmentationConfig::default()
        };
        let masks = config.segment_all(&img).unwrap();
        assert_eq!(masks.len(), 2);
        assert_eq!(masks[0].0, "red");
        assert_eq!(masks[0].1.count(), 49);
        assert_eq!(masks[1].0, "blue");
        assert_eq!(masks[1].1.count(), 0);
    }
}
