use super::*;

#[test]
fn assignment_is_deterministic() {
    for wave in 0..20 {
        assert_eq!(assign_images(9, wave, 6, 7), assign_images(9, wave, 6, 7));
    }
    assert_ne!(
        (0..10).map(|w| assign_images(9, w, 6, 7)).collect::<Vec<_>>(),
        (0..10).map(|w| assign_images(9, w, 6, 8)).collect::<Vec<_>>()
    );
}

#[test]
fn adjacent_entries_differ_for_most_waves() {
    let waves = 500u64;
    let ok = (0..waves)
        .filter(|&w| {
            let ids = assign_images(12, w, 3, 42);
            ids.windows(2).all(|p| p[0] != p[1])
        })
        .count();
    assert!(ok as f64 >= 0.95 * waves as f64, "{ok}/{waves}");
}

#[test]
fn picks_stay_in_pool() {
    let ids = assign_images(40, 3, 5, 1);
    assert_eq!(ids.len(), 40);
    assert!(ids.iter().all(|&i| i < 5));
    assert!(assign_images(4, 0, 0, 0).is_empty());
    assert_eq!(assign_images(3, 0, 1, 0), vec![0, 0, 0]);
}

#[test]
fn offset_combines_parallax_and_float() {
    let tuning = SlotTuning {
        float_amplitude: 4.0,
        parallax: 20.0,
        float_period: 2.0,
    };
    let slot = Slot {
        position: Point::new(0.0, 0.0),
        size: Size::new(10.0, 10.0),
        depth: 0.5,
        float_amplitude: 1.0,
        phase: 0.0,
    };
    let at_rest = slot.offset(Vec2::ZERO, 0.0, &tuning);
    assert!(at_rest.hypot() < 1e-9);

    let quarter = slot.offset(Vec2::new(1.0, 0.0), 0.5, &tuning);
    assert!((quarter.x + 10.0).abs() < 1e-9);
    assert!((quarter.y - 4.0).abs() < 1e-9);
}

#[test]
fn reduced_motion_pins_slots() {
    let tuning = SlotTuning {
        float_amplitude: 0.0,
        parallax: 0.0,
        float_period: 5.0,
    };
    let slot = Slot {
        position: Point::ZERO,
        size: Size::new(1.0, 1.0),
        depth: 1.0,
        float_amplitude: 2.5,
        phase: 0.3,
    };
    assert!(slot.offset(Vec2::new(0.7, -0.2), 12.3, &tuning).hypot() < 1e-12);
}

#[test]
fn slots_float_by_their_own_amplitude() {
    let tuning = SlotTuning {
        float_amplitude: 4.0,
        parallax: 0.0,
        float_period: 2.0,
    };
    let slot = |float_amplitude| Slot {
        position: Point::ZERO,
        size: Size::new(1.0, 1.0),
        depth: 0.0,
        float_amplitude,
        phase: 0.0,
    };
    assert!((slot(0.5).offset(Vec2::ZERO, 0.5, &tuning).y - 2.0).abs() < 1e-9);
    assert!((slot(2.0).offset(Vec2::ZERO, 0.5, &tuning).y - 8.0).abs() < 1e-9);
    assert_eq!(slot(0.0).offset(Vec2::ZERO, 0.5, &tuning).y, 0.0);
}

#[test]
fn float_amplitude_defaults_to_one_and_rejects_negatives() {
    let slot: Slot = serde_json::from_value(serde_json::json!({
        "position": {"x": 1.0, "y": 2.0},
        "size": {"width": 3.0, "height": 4.0}
    }))
    .unwrap();
    assert_eq!(slot.float_amplitude, 1.0);
    assert!(slot.validate().is_ok());

    let bad = Slot {
        float_amplitude: -1.0,
        ..slot
    };
    assert!(bad.validate().is_err());
}
