use super::*;

fn tuning() -> RevealTuning {
    RevealTuning {
        stagger: 0.1,
        blur_start: 10.0,
        scale_start: 1.1,
        enter_duration: 1.0,
        backdrop_duration: 0.5,
        backdrop_opacity: 0.3,
        gone_duration: 0.5,
        phase_interval: 4.0,
    }
}

#[test]
fn future_member_is_hidden() {
    let t = tuning();
    let m = Member::new(&t);
    let v = m.visual(5.0, &t);
    assert_eq!(v.opacity, 0.0);
    assert_eq!(v.blur, 10.0);
    assert_eq!(v.scale, 1.1);
}

#[test]
fn enter_tweens_to_rest_then_settles() {
    let t = tuning();
    let mut m = Member::new(&t);
    assert!(m.transition(RevealState::Enter, 1.0, &t));
    let start = m.visual(1.0, &t);
    assert_eq!(start.opacity, 0.0);
    let mid = m.visual(1.5, &t);
    assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
    assert!(mid.blur < 10.0 && mid.blur > 0.0);
    assert_eq!(m.visual(2.0, &t), MemberVisual::REST);

    m.settle(1.5, &t);
    assert_eq!(m.state(), RevealState::Enter);
    m.settle(2.0, &t);
    assert_eq!(m.state(), RevealState::Active);
    assert!(!m.transition(RevealState::Enter, 3.0, &t));
}

#[test]
fn backdrop_dims_but_stays_visible() {
    let t = tuning();
    let mut m = Member::new(&t);
    m.transition(RevealState::Enter, 0.0, &t);
    m.settle(1.0, &t);
    m.transition(RevealState::Backdrop, 2.0, &t);
    assert_eq!(m.visual(2.0, &t).opacity, 1.0);
    for i in 0..=10 {
        let o = m.visual(2.0 + i as f64 * 0.1, &t).opacity;
        assert!(o >= 0.3 - 1e-12);
    }
    assert!((m.visual(3.0, &t).opacity - 0.3).abs() < 1e-12);
}

#[test]
fn interrupted_tween_starts_from_current_look() {
    let t = tuning();
    let mut m = Member::new(&t);
    m.transition(RevealState::Enter, 0.0, &t);
    let mid = m.visual(0.3, &t);
    m.transition(RevealState::Gone, 0.3, &t);
    assert_eq!(m.visual(0.3, &t), mid);
    assert_eq!(m.visual(0.8, &t).opacity, 0.0);
}

#[test]
fn zero_durations_snap() {
    let t = RevealTuning {
        enter_duration: 0.0,
        gone_duration: 0.0,
        ..tuning()
    };
    let mut m = Member::new(&t);
    m.transition(RevealState::Enter, 0.0, &t);
    assert_eq!(m.visual(0.0, &t), MemberVisual::REST);
    m.transition(RevealState::Gone, 0.0, &t);
    assert_eq!(m.visual(0.0, &t).opacity, 0.0);
}
