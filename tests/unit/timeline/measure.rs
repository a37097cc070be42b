use super::*;

fn metrics() -> SectionMetrics {
    SectionMetrics {
        top: 1000.0,
        height: 5000.0,
        viewport_height: 1000.0,
    }
}

#[test]
fn progress_spans_entry_to_exit() {
    let m = metrics();
    assert_eq!(m.scroll_range(), Some((1000.0, 5000.0)));
    assert_eq!(m.progress_at(1000.0).unwrap().get(), 0.0);
    assert_eq!(m.progress_at(3000.0).unwrap().get(), 0.5);
    assert_eq!(m.progress_at(5000.0).unwrap().get(), 1.0);
}

#[test]
fn progress_is_clamped_outside_the_section() {
    let m = metrics();
    assert_eq!(m.progress_at(0.0).unwrap().get(), 0.0);
    assert_eq!(m.progress_at(9000.0).unwrap().get(), 1.0);
}

#[test]
fn unmeasured_sections_report_none() {
    assert!(SectionMetrics::default().progress_at(10.0).is_none());
    let short = SectionMetrics {
        top: 0.0,
        height: 800.0,
        viewport_height: 900.0,
    };
    assert!(short.progress_at(10.0).is_none());
    let nan = SectionMetrics {
        top: f64::NAN,
        ..metrics()
    };
    assert!(nan.progress_at(10.0).is_none());
}
