use super::*;
use crate::foundation::core::Progress;

fn tuning() -> RevealTuning {
    RevealTuning {
        stagger: 0.1,
        blur_start: 8.0,
        scale_start: 1.05,
        enter_duration: 0.4,
        backdrop_duration: 0.3,
        backdrop_opacity: 0.35,
        gone_duration: 0.3,
        phase_interval: 4.0,
    }
}

fn spec(trigger: EntryTrigger) -> ChoreographySpec {
    ChoreographySpec {
        batches: vec![
            BatchSpec {
                members: vec![0.05, 0.1],
            },
            BatchSpec {
                members: vec![0.3, 0.35],
            },
            BatchSpec {
                members: vec![0.55, 0.6],
            },
        ],
        trigger,
        wipe_phases: vec![],
    }
}

fn states(c: &Choreography, batch: usize) -> Vec<RevealState> {
    c.visuals(0.0)[batch].states.clone()
}

#[test]
fn scroll_members_enter_on_their_thresholds() {
    let s = spec(EntryTrigger::Scroll);
    let table = s.thresholds().unwrap();
    let mut c = Choreography::new(&s, tuning()).unwrap();

    c.apply_mask(&table.mask(Progress::new(0.07)), 1.0);
    assert_eq!(states(&c, 0), vec![RevealState::Enter, RevealState::Future]);
    c.apply_mask(&table.mask(Progress::new(0.12)), 1.1);
    assert_eq!(states(&c, 0), vec![RevealState::Enter, RevealState::Enter]);
    c.tick(2.0);
    assert_eq!(states(&c, 0), vec![RevealState::Active, RevealState::Active]);
}

#[test]
fn phase_advance_moves_batches_down_the_lifecycle() {
    let s = spec(EntryTrigger::Scroll);
    let table = s.thresholds().unwrap();
    let mut c = Choreography::new(&s, tuning()).unwrap();
    c.apply_mask(&table.mask(Progress::new(0.2)), 0.0);

    c.set_phase(1, 1.0);
    assert_eq!(states(&c, 0), vec![RevealState::Backdrop; 2]);
    assert_eq!(states(&c, 1), vec![RevealState::Future; 2]);

    c.apply_mask(&table.mask(Progress::new(0.4)), 1.5);
    assert_eq!(states(&c, 1), vec![RevealState::Enter; 2]);

    c.set_phase(2, 3.0);
    assert_eq!(states(&c, 0), vec![RevealState::Gone; 2]);
    assert_eq!(states(&c, 1), vec![RevealState::Backdrop; 2]);
    assert_eq!(states(&c, 2), vec![RevealState::Future; 2]);

    // Backdrop stays visible until the next batch has something on screen.
    let v = c.visuals(10.0);
    assert!(v[1].is_visible());
    assert!(!v[0].is_visible());
}

#[test]
fn moving_back_restores_earlier_batches() {
    let s = spec(EntryTrigger::Scroll);
    let table = s.thresholds().unwrap();
    let mut c = Choreography::new(&s, tuning()).unwrap();
    c.apply_mask(&table.mask(Progress::new(0.62)), 0.0);
    c.set_phase(2, 0.0);

    c.apply_mask(&table.mask(Progress::new(0.32)), 1.0);
    c.set_phase(1, 1.0);
    assert_eq!(states(&c, 2), vec![RevealState::Future; 2]);
    assert_eq!(states(&c, 1), vec![RevealState::Enter, RevealState::Future]);
    assert_eq!(states(&c, 0), vec![RevealState::Backdrop; 2]);
}

#[test]
fn wipe_phase_clears_every_prior_batch() {
    let mut s = spec(EntryTrigger::Scroll);
    s.wipe_phases = vec![2];
    let table = s.thresholds().unwrap();
    let mut c = Choreography::new(&s, tuning()).unwrap();
    c.apply_mask(&table.mask(Progress::new(0.4)), 0.0);
    c.set_phase(1, 0.0);
    c.set_phase(2, 1.0);
    assert_eq!(states(&c, 1), vec![RevealState::Gone; 2]);
    assert!(!c.any_visible(5.0));
}

#[test]
fn timed_members_enter_with_stagger() {
    let s = spec(EntryTrigger::Timed);
    assert!(s.thresholds().unwrap().is_empty());
    let mut c = Choreography::new(&s, tuning()).unwrap();
    c.set_phase(0, 2.0);
    assert_eq!(states(&c, 0), vec![RevealState::Enter, RevealState::Future]);
    c.tick(2.05);
    assert_eq!(states(&c, 0)[1], RevealState::Future);
    c.tick(2.11);
    assert_eq!(states(&c, 0)[1], RevealState::Enter);
}

#[test]
fn invalid_specs_are_rejected() {
    let mut s = spec(EntryTrigger::Scroll);
    s.batches[1].members = vec![0.01];
    assert!(Choreography::new(&s, tuning()).is_err());

    let mut s = spec(EntryTrigger::Scroll);
    s.batches[0].members.clear();
    assert!(Choreography::new(&s, tuning()).is_err());
}

#[test]
fn reset_hides_everything() {
    let s = spec(EntryTrigger::Scroll);
    let table = s.thresholds().unwrap();
    let mut c = Choreography::new(&s, tuning()).unwrap();
    c.apply_mask(&table.mask(Progress::new(1.0)), 0.0);
    c.set_phase(2, 0.0);
    c.reset();
    assert_eq!(c.phase(), 0);
    assert!(!c.any_visible(10.0));
}
