//! End-to-end flows: segment, clean up, measure and summarize an image.

use chromat_color::DeltaE;
use chromat_color::bulk::rgb_image_to_lab;
use chromat_color::convert::rgb_to_lab;
use chromat_core::{Image, Rgb8};
use chromat_ops::cluster::{color_map, dominant_colors, grouped_palette};
use chromat_ops::grouping::delta_e_mask;
use chromat_ops::segment::{apply_mask, segment};
use chromat_ops::{KMeans, NamedRange, SegmentationConfig, morphology};

const RED: Rgb8 = Rgb8::new(220, 30, 30);
const GREEN: Rgb8 = Rgb8::new(30, 200, 40);
const GRAY: Rgb8 = Rgb8::new(128, 128, 128);

/// 16x16 gray canvas with a red square, a green square and one stray red pixel.
fn scene() -> Image<Rgb8> {
    Image::from_fn(16, 16, |x, y| {
        if (2..7).contains(&x) && (2..7).contains(&y) {
            RED
        } else if (9..14).contains(&x) && (9..14).contains(&y) {
            GREEN
        } else if (x, y) == (12, 2) {
            RED
        } else {
            GRAY
        }
    })
}

#[test]
fn refine_drops_the_stray_pixel() {
    let img = scene();
    let raw = segment(&img, NamedRange::Red);
    assert_eq!(raw.count(), 26);

    let refined = morphology::refine(&raw, 3, 3).unwrap();
    assert_eq!(refined.count(), 25);
    assert!(!refined.get(12, 2));
    assert!(refined.get(4, 4));
}

#[test]
fn masked_image_keeps_only_the_selection() {
    let img = scene();
    let mask = segment(&img, NamedRange::Green);
    let out = apply_mask(&img, &mask).unwrap();
    assert_eq!(out.pixel(10, 10), GREEN);
    assert_eq!(out.pixel(0, 0), Rgb8::default());
    assert_eq!(out.pixel(4, 4), Rgb8::default());
}

#[test]
fn delta_e_mask_matches_segmentation_for_flat_colors() {
    let img = scene();
    let lab = rgb_image_to_lab(&img);
    let near_red = delta_e_mask(&lab, rgb_to_lab(RED), 20.0, DeltaE::Ciede2000);
    assert_eq!(near_red, segment(&img, NamedRange::Red));
}

#[test]
fn palette_from_scene() {
    let img = scene();
    let colors = dominant_colors(&img, 3, &KMeans::default()).unwrap();
    // Gray covers most of the canvas.
    assert!(colors[0].a.abs() < 1.0 && colors[0].b.abs() < 1.0);

    let palette = grouped_palette(&img, 3, &KMeans::default(), 20.0, DeltaE::Ciede2000).unwrap();
    assert_eq!(palette.len(), 3);

    let mapped = color_map(&img, 3, &KMeans::default(), DeltaE::Ciede2000).unwrap();
    assert_eq!(mapped, img);
}

#[test]
fn config_drives_a_full_run() {
    let config = SegmentationConfig::from_yaml_str(
        "colors: [kirmizi, yesil, mavi]\nmorphology: { open_size: 3, close_size: 3 }\n",
    )
    .unwrap();
    let masks = config.segment_all(&scene()).unwrap();
    let counts: Vec<(&str, usize)> = masks.iter().map(|(n, m)| (n.as_str(), m.count())).collect();
    assert_eq!(counts, vec![("red", 25), ("green", 25), ("blue", 0)]);
}
