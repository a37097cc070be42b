use super::*;

fn canvas() -> Canvas {
    Canvas::new(64, 48).unwrap()
}

#[test]
fn one_sample_per_column() {
    let e = BurnEdge::compute(0.5, 0.0, canvas(), &BurnTuning::default());
    assert_eq!(e.ys.len(), 64);
}

#[test]
fn edge_rises_as_progress_grows() {
    let t = BurnTuning::default();
    let mut prev = f32::MAX;
    for i in 0..=10 {
        let e = BurnEdge::compute(i as f32 / 10.0, 0.3, canvas(), &t);
        assert!(e.base_y < prev);
        prev = e.base_y;
    }
}

#[test]
fn extremes_leave_the_frame() {
    let t = BurnTuning::default();
    let start = BurnEdge::compute(0.0, 2.0, canvas(), &t);
    assert!(start.ys.iter().all(|&y| y > 48.0));
    let end = BurnEdge::compute(1.0, 2.0, canvas(), &t);
    assert!(end.ys.iter().all(|&y| y < 0.0));
}

#[test]
fn knots_are_interpolated_between_steps() {
    let mut t = BurnTuning::default();
    t.edge_step = 8;
    let e = BurnEdge::compute(0.5, 1.0, canvas(), &t);
    for k in 0..7 {
        let a = e.ys[k * 8];
        let b = e.ys[k * 8 + 8];
        let mid = e.ys[k * 8 + 4];
        assert!((mid - (a + b) / 2.0).abs() < 1e-3);
    }
}

#[test]
fn same_inputs_same_edge() {
    let t = BurnTuning::default();
    assert_eq!(
        BurnEdge::compute(0.4, 1.7, canvas(), &t),
        BurnEdge::compute(0.4, 1.7, canvas(), &t)
    );
}

#[test]
fn path_follows_samples() {
    let e = BurnEdge::compute(0.5, 0.0, canvas(), &BurnTuning::default());
    let path = e.to_path();
    assert_eq!(path.elements().len(), 64);
    let first = match path.elements()[0] {
        kurbo::PathEl::MoveTo(p) => p,
        ref other => panic!("unexpected {other:?}"),
    };
    assert_eq!(first.y, f64::from(e.ys[0]));
}
