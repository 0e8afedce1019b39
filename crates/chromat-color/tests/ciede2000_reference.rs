//! CIEDE2000 against the Sharma, Wu & Dalal (2005) test data.
//!
//! Each row is `L1, a1, b1, L2, a2, b2, ΔE00` with ΔE rounded to four
//! decimals in the paper.

use chromat_color::delta_e::ciede2000;
use chromat_color::{DeltaE, Perception, interpret};
use chromat_core::Lab;

const TOLERANCE: f64 = 1e-4;

#[rustfmt::skip]
const PAIRS: &[[f64; 7]] = &[
    [50.0000,   2.6772, -79.7751, 50.0000,   0.0000, -82.7485, 2.0425],
    [50.0000,   3.1571, -77.2803, 50.0000,   0.0000, -82.7485, 2.8615],
    [50.0000,   2.8361, -74.0200, 50.0000,   0.0000, -82.7485, 3.4412],
    [50.0000,  -1.3802, -84.2814, 50.0000,   0.0000, -82.7485, 1.0000],
    [50.0000,   0.0000,   0.0000, 50.0000,  -1.0000,   2.0000, 2.3669],
    [50.0000,   2.4900,  -0.0010, 50.0000,  -2.4900,   0.0009, 7.1792],
    [50.0000,   2.4900,  -0.0010, 50.0000,  -2.4900,   0.0011, 7.2195],
    [50.0000,  -0.0010,   2.4900, 50.0000,   0.0009,  -2.4900, 4.8045],
    [50.0000,  -0.0010,   2.4900, 50.0000,   0.0011,  -2.4900, 4.7461],
    [50.0000,   2.5000,   0.0000, 50.0000,   0.0000,  -2.5000, 4.3065],
    [50.0000,   2.5000,   0.0000, 73.0000,  25.0000, -18.0000, 27.1492],
    [50.0000,   2.5000,   0.0000, 61.0000,  -5.0000,  29.0000, 22.8977],
    [50.0000,   2.5000,   0.0000, 56.0000, -27.0000,  -3.0000, 31.9030],
    [50.0000,   2.5000,   0.0000, 58.0000,  24.0000,  15.0000, 19.4535],
    [50.0000,   2.5000,   0.0000, 50.0000,   3.1736,   0.5854, 1.0000],
    [60.2574, -34.0099,  36.2677, 60.4626, -34.1751,  39.4387, 1.2644],
    [63.0109, -31.0961,  -5.8663, 62.8187, -29.7946,  -4.0864, 1.2630],
    [61.2901,   3.7196,  -5.3901, 61.4292,   2.2480,  -4.9620, 1.8731],
    [35.0831, -44.1164,   3.7933, 35.0232, -40.0716,   1.5901, 1.8645],
    [22.7233,  20.0904, -46.6940, 23.0331,  14.9730, -42.5619, 2.0373],
    [36.4612,  47.8580,  18.3852, 36.2715,  50.5065,  21.2231, 1.4146],
    [90.8027,  -2.0831,   1.4410, 91.1528,  -1.6435,   0.0447, 1.4441],
    [90.9257,  -0.5406,  -0.9208, 88.6381,  -0.8985,  -0.7239, 1.5381],
    [ 6.7747,  -0.2908,  -2.4247,  5.8714,  -0.0985,  -2.2286, 0.6377],
    [ 2.0776,   0.0795,  -1.1350,  0.9033,  -0.0636,  -0.5514, 0.9082],
];

fn split(row: &[f64; 7]) -> (Lab, Lab, f64) {
    (
        Lab::new(row[0], row[1], row[2]),
        Lab::new(row[3], row[4], row[5]),
        row[6],
    )
}

#[test]
fn reference_pairs() {
    for (i, row) in PAIRS.iter().enumerate() {
        let (a, b, expected) = split(row);
        let got = ciede2000(a, b);
        assert!(
            (got - expected).abs() < TOLERANCE,
            "pair {}: got {:.6}, expected {}",
            i + 1,
            got,
            expected
        );
    }
}

#[test]
fn reference_pairs_swapped() {
    for (i, row) in PAIRS.iter().enumerate() {
        let (a, b, expected) = split(row);
        let got = ciede2000(b, a);
        assert!(
            (got - expected).abs() < TOLERANCE,
            "pair {} swapped: got {:.6}, expected {}",
            i + 1,
            got,
            expected
        );
    }
}

#[test]
fn metric_enum_dispatches_to_ciede2000() {
    for row in PAIRS {
        let (a, b, _) = split(row);
        assert_eq!(DeltaE::Ciede2000.compute(a, b), ciede2000(a, b));
        assert_eq!(DeltaE::default().compute(a, b), ciede2000(a, b));
    }
}

#[test]
fn unit_pairs_and_interpretation() {
    // Pairs 4 and 15 sit exactly on ΔE00 = 1.0000.
    for idx in [3, 14] {
        let (a, b, _) = split(&PAIRS[idx]);
        let de = ciede2000(a, b);
        assert!((de - 1.0).abs() < TOLERANCE);
    }
    let (a, b, _) = split(&PAIRS[23]);
    assert_eq!(interpret(ciede2000(a, b)), Perception::Imperceptible);
}
