use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn in_out_curves_are_symmetric_about_midpoint() {
    for ease in [
        Ease::InOutQuad,
        Ease::InOutCubic,
        Ease::InOutQuart,
        Ease::InOutQuint,
    ] {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-12);
        let lo = ease.apply(0.2);
        let hi = ease.apply(0.8);
        assert!((lo + hi - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn arrival_and_settle_families_differ() {
    // Arrival front-loads motion; settling starts slow.
    assert!(Ease::ARRIVE.apply(0.1) > 0.3);
    assert!(Ease::SETTLE.apply(0.1) < 0.01);
    assert_ne!(Ease::OutQuint.apply(0.3), Ease::InOutQuint.apply(0.3));
}

#[test]
fn out_of_range_input_is_clamped() {
    assert_eq!(Ease::OutQuart.apply(-4.0), 0.0);
    assert_eq!(Ease::InOutQuint.apply(9.0), 1.0);
    assert_eq!(Ease::Linear.apply(f64::NAN), 0.0);
}
