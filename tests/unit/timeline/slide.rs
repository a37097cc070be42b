use super::*;

#[test]
fn empty_track_stays_at_origin() {
    let t = SlideTrack::default();
    assert_eq!(t.sample(Progress::new(0.5)), 0.0);
    assert_eq!(t.hold_at(Progress::new(0.5)), None);
}

#[test]
fn panels_build_hold_plateaus() {
    // Three panels; the middle one dwells longest.
    let t = SlideTrack::panels(100.0, &[0.2, 0.4, 0.2], Ease::Linear).unwrap();
    // Moves share 0.2 => 0.1 each.
    assert_eq!(t.sample(Progress::new(0.0)), 0.0);
    assert_eq!(t.sample(Progress::new(0.15)), 0.0);
    assert!((t.sample(Progress::new(0.25)) + 50.0).abs() < 1e-9);
    assert_eq!(t.sample(Progress::new(0.35)), -100.0);
    assert_eq!(t.sample(Progress::new(0.5)), -100.0);
    assert_eq!(t.sample(Progress::new(0.7)), -100.0);
    assert_eq!(t.sample(Progress::new(1.0)), -200.0);

    assert_eq!(t.hold_at(Progress::new(0.1)), Some(0));
    assert_eq!(t.hold_at(Progress::new(0.5)), Some(1));
    assert_eq!(t.hold_at(Progress::new(0.75)), None);
    assert_eq!(t.hold_at(Progress::new(0.95)), Some(2));
}

#[test]
fn offset_is_monotonic_through_the_sweep() {
    let t = SlideTrack::panels(320.0, &[0.1, 0.3, 0.1, 0.1], Ease::InOutCubic).unwrap();
    let mut prev = f64::INFINITY;
    for i in 0..=200 {
        let v = t.sample(Progress::new(i as f64 / 200.0));
        assert!(v <= prev + 1e-9);
        prev = v;
    }
}

#[test]
fn oversubscribed_holds_are_rejected() {
    assert!(SlideTrack::panels(100.0, &[0.6, 0.6], Ease::Linear).is_err());
    assert!(SlideTrack::panels(100.0, &[-0.1], Ease::Linear).is_err());
}

#[test]
fn unordered_stops_are_rejected() {
    let stops = vec![
        SlideStop { at: 0.5, offset: 0.0, ease: Ease::Linear },
        SlideStop { at: 0.2, offset: -10.0, ease: Ease::Linear },
    ];
    assert!(SlideTrack::new(stops).is_err());
}

#[test]
fn deserializes_from_stop_list() {
    let t: SlideTrack =
        serde_json::from_str(r#"[{"at":0.0,"offset":0},{"at":1.0,"offset":-50}]"#).unwrap();
    assert_eq!(t.sample(Progress::new(0.5)), -25.0);
}
