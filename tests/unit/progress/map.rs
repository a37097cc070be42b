use super::*;

#[test]
fn lerp_endpoints_and_midpoint() {
    assert_eq!(lerp(2.0, 4.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 4.0, 1.0), 4.0);
    assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
}

#[test]
fn map_range_clamps_outside_and_is_linear_inside() {
    for x in [-3.0, 0.0, 0.1, 0.36] {
        assert_eq!(map_range(x, 0.36, 0.50), 0.0);
    }
    for x in [0.5, 0.51, 1.0, 7.0] {
        assert_eq!(map_range(x, 0.36, 0.50), 1.0);
    }
    let v = map_range(0.37, 0.36, 0.50);
    assert!((v - 0.071_428).abs() < 1e-4, "{v}");

    let a = map_range(0.40, 0.36, 0.50);
    let b = map_range(0.44, 0.36, 0.50);
    let c = map_range(0.48, 0.36, 0.50);
    assert!(((b - a) - (c - b)).abs() < 1e-12);
}

#[test]
fn map_range_degenerate_range_is_a_step() {
    assert_eq!(map_range(0.2, 0.3, 0.3), 0.0);
    assert_eq!(map_range(0.3, 0.3, 0.3), 1.0);
    assert_eq!(map_range(f64::NAN, 0.0, 1.0), 0.0);
}

#[test]
fn map_between_targets_output_range() {
    assert_eq!(map_between(0.0, 0.0, 1.0, 12.0, 0.0), 12.0);
    assert_eq!(map_between(0.5, 0.0, 1.0, 12.0, 0.0), 6.0);
}
