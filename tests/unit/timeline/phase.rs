use super::*;

fn table() -> PhaseTable {
    PhaseTable::new(vec![0.0, 0.22, 0.36, 0.50, 0.64]).unwrap()
}

#[test]
fn phase_lookup_matches_breakpoints() {
    let t = table();
    assert_eq!(t.phase_at(Progress::new(0.40)), 2);
    assert_eq!(t.phase_at(Progress::new(0.21)), 0);
    assert_eq!(t.phase_at(Progress::new(0.22)), 1);
    assert_eq!(t.phase_at(Progress::new(1.0)), 4);
}

#[test]
fn late_first_start_still_reports_phase_zero() {
    let t = PhaseTable::new(vec![0.1, 0.5]).unwrap();
    assert_eq!(t.phase_at(Progress::new(0.05)), 0);
    assert_eq!(t.phase_at(Progress::new(0.5)), 1);
}

#[test]
fn empty_or_decreasing_tables_are_rejected() {
    assert!(PhaseTable::new(vec![]).is_err());
    assert!(PhaseTable::new(vec![0.5, 0.1]).is_err());
    assert!(serde_json::from_str::<PhaseTable>("[]").is_err());
}

#[test]
fn gate_is_edge_triggered() {
    let mut g = PhaseGate::default();
    assert_eq!(g.commit(0), None);
    assert_eq!(g.commit(2), Some(PhaseChange { from: 0, to: 2 }));
    assert_eq!(g.commit(2), None);
    let back = g.commit(1).unwrap();
    assert!(!back.is_advance());
    assert_eq!(g.committed(), 1);
}
