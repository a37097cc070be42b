use super::*;

fn base() -> serde_json::Value {
    serde_json::json!({
        "name": "hero",
        "phases": [0.0, 0.22, 0.36, 0.50, 0.64],
        "choreography": {
            "batches": [
                {"members": [0.02, 0.05]},
                {"members": [0.25, 0.3]}
            ]
        },
        "media": [{"name": "clip", "start": 0.3, "end": 0.55}],
        "burn": {"start": 0.1, "end": 0.6},
        "events": [{"name": "expansion-complete", "at": 0.9}]
    })
}

fn parse(v: serde_json::Value) -> EmberResult<SectionSpec> {
    SectionSpec::from_reader(v.to_string().as_bytes())
}

#[test]
fn minimal_spec_parses_with_defaults() {
    let s = parse(serde_json::json!({"name": "a", "phases": [0.0]})).unwrap();
    s.validate().unwrap();
    assert_eq!(s.reconcile, ReconcilePolicy::ScrollAuthoritative);
    assert!(s.media.is_empty());
    assert!(!s.haptics);
}

#[test]
fn choreography_supplies_reveal_thresholds() {
    let s = parse(base()).unwrap();
    s.validate().unwrap();
    let t = s.timeline().unwrap();
    assert_eq!(t.reveals.points(), &[0.02, 0.05, 0.25, 0.3]);
}

#[test]
fn unordered_phases_fail_to_parse() {
    let mut v = base();
    v["phases"] = serde_json::json!([0.0, 0.5, 0.3]);
    let err = parse(v).unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn validation_catches_bad_sections() {
    let mut v = base();
    v["name"] = serde_json::json!("  ");
    assert!(parse(v).unwrap().validate().is_err());

    let mut v = base();
    v["media"][0]["end"] = serde_json::json!(0.1);
    assert!(parse(v).unwrap().validate().is_err());

    let mut v = base();
    v["burn"] = serde_json::json!({"start": 0.5, "end": 0.5});
    assert!(parse(v).unwrap().validate().is_err());

    let mut v = base();
    v["reveals"] = serde_json::json!([0.1]);
    assert!(parse(v).unwrap().validate().is_err());

    let mut v = base();
    v["choreography"]["wipe_phases"] = serde_json::json!([7]);
    assert!(parse(v).unwrap().validate().is_err());

    let mut v = base();
    v["phases"] = serde_json::json!([0.0]);
    assert!(parse(v).unwrap().validate().is_err());
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = SectionSpec::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("open section JSON"));
}

#[test]
fn slots_need_an_image_pool() {
    let mut v = base();
    v["slots"] = serde_json::json!([
        {"position": {"x": 10.0, "y": 20.0}, "size": {"width": 40.0, "height": 40.0}}
    ]);
    assert!(parse(v.clone()).unwrap().validate().is_err());
    v["slot_pool"] = serde_json::json!(4);
    let s = parse(v).unwrap();
    s.validate().unwrap();
    assert_eq!(s.slots[0].depth, 0.0);
}
