use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::assets::decode::{PreparedImage, Readiness};
use crate::media::element::PlaybackError;
use crate::reveal::lifecycle::RevealState;
use crate::reveal::reconcile::ReconcilePolicy;

#[derive(Default)]
struct FakeHost {
    live: Rc<Cell<i64>>,
    total: usize,
}

impl FakeHost {
    fn handle(&mut self) -> Cancel {
        self.total += 1;
        self.live.set(self.live.get() + 1);
        let live = self.live.clone();
        Box::new(move || live.set(live.get() - 1))
    }
}

impl HostBindings for FakeHost {
    fn subscribe(&mut self, _event: HostEvent) -> Cancel {
        self.handle()
    }

    fn request_frames(&mut self) -> Cancel {
        self.handle()
    }
}

struct Video {
    paused: Rc<Cell<bool>>,
}

impl MediaElement for Video {
    fn is_paused(&self) -> bool {
        self.paused.get()
    }
    fn current_time(&self) -> f64 {
        0.0
    }
    fn play(&mut self) -> Result<(), PlaybackError> {
        self.paused.set(false);
        Ok(())
    }
    fn pause(&mut self) {
        self.paused.set(true);
    }
    fn seek(&mut self, _seconds: f64) {}
    fn set_muted(&mut self, _muted: bool) {}
}

fn spec() -> SectionSpec {
    serde_json::from_value(serde_json::json!({
        "name": "hero",
        "phases": [0.0, 0.22, 0.36, 0.50, 0.64],
        "choreography": {
            "batches": [
                {"members": [0.0, 0.05]},
                {"members": [0.22, 0.25]},
                {"members": [0.36, 0.4]}
            ]
        },
        "media": [{"name": "clip", "start": 0.3, "end": 0.55}],
        "burn": {"start": 0.5, "end": 0.9},
        "events": [{"name": "expansion-complete", "at": 0.9}],
        "haptics": true,
        "slots": [
            {"position": {"x": 0.0, "y": 0.0}, "size": {"width": 8.0, "height": 8.0}, "depth": 1.0},
            {"position": {"x": 9.0, "y": 0.0}, "size": {"width": 8.0, "height": 8.0}},
            {"position": {"x": 18.0, "y": 0.0}, "size": {"width": 8.0, "height": 8.0}}
        ],
        "slot_pool": 4
    }))
    .unwrap()
}

fn canvas() -> Canvas {
    Canvas::new(16, 16).unwrap()
}

fn runtime() -> SectionRuntime {
    SectionRuntime::new(&spec(), &KnobSet::default(), MotionPreference::Full, canvas()).unwrap()
}

fn metrics() -> SectionMetrics {
    // Scroll range [0, 1000].
    SectionMetrics {
        top: 0.0,
        height: 2000.0,
        viewport_height: 1000.0,
    }
}

#[test]
fn mount_and_teardown_balance_registrations() {
    let mut host = FakeHost::default();
    let mut rt = runtime();
    rt.mount(&mut host);
    rt.mount(&mut host);
    assert_eq!(host.live.get(), 4);
    assert_eq!(rt.live_registrations(), 4);

    rt.teardown();
    assert_eq!(host.live.get(), 0);
    assert_eq!(rt.live_registrations(), 0);

    rt.mount(&mut host);
    assert_eq!(host.live.get(), 4);
    assert_eq!(host.total, 8);
    drop(rt);
    assert_eq!(host.live.get(), 0);
}

#[test]
fn unmeasured_section_stays_at_rest() {
    let mut rt = runtime();
    rt.on_scroll(500.0);
    let out = rt.on_frame(1.0 / 60.0).unwrap();
    assert!(!out.timeline.measured);
    assert_eq!(out.phase, 0);
    assert!(out.phase_change.is_none());
    assert!(out.media.is_empty());
}

#[test]
fn autoplay_waits_for_a_measurement() {
    let mut spec = spec();
    spec.reconcile = ReconcilePolicy::TimerAssist;
    spec.autoplay = true;
    let mut rt =
        SectionRuntime::new(&spec, &KnobSet::default(), MotionPreference::Full, canvas()).unwrap();
    rt.activate();
    for _ in 0..3 {
        let out = rt.on_frame(4.0).unwrap();
        assert!(!out.timeline.measured);
        assert_eq!(out.phase, 0);
        assert!(out.phase_change.is_none());
        assert!(!out.haptic);
    }

    rt.on_resize(metrics());
    rt.on_frame(0.0).unwrap();
    let out = rt.on_frame(4.0).unwrap();
    assert!(out.timeline.measured);
    assert_eq!(out.phase, 1);
    assert!(out.haptic);
}

#[test]
fn remount_shows_the_current_batch() {
    let mut host = FakeHost::default();
    let mut rt = runtime();
    rt.mount(&mut host);
    rt.on_resize(metrics());
    rt.on_scroll(450.0);
    rt.on_frame(5.0).unwrap();
    let first = rt.on_frame(5.0).unwrap();
    assert_eq!(first.phase, 2);
    assert!(first.reveal[2].states.iter().all(|s| *s != RevealState::Future));

    rt.teardown();
    rt.mount(&mut host);
    rt.on_scroll(450.0);
    let out = rt.on_frame(5.0).unwrap();
    assert_eq!(out.phase, 2);
    assert!(out.timeline.mask_change);
    let out = rt.on_frame(5.0).unwrap();
    assert_eq!(out.reveal[2].states, first.reveal[2].states);
    assert!(out.reveal[2].members.iter().all(|m| m.opacity > 0.0));
}

#[test]
fn frame_resolves_phase_mask_and_media() {
    let mut host = FakeHost::default();
    let mut rt = runtime();
    let paused = Rc::new(Cell::new(true));
    rt.attach_media(
        "clip",
        Box::new(Video {
            paused: paused.clone(),
        }),
    )
    .unwrap();
    rt.mount(&mut host);
    rt.on_resize(metrics());
    rt.on_scroll(100.0);
    rt.on_scroll(400.0);
    let out = rt.on_frame(1.0 / 60.0).unwrap();

    assert_eq!(out.timeline.progress.get(), 0.4);
    assert_eq!(out.phase, 2);
    assert_eq!(out.phase_change, Some(PhaseChange { from: 0, to: 2 }));
    assert!(out.haptic);
    assert!(!paused.get());
    assert_eq!(out.media.len(), 1);
    assert_eq!(rt.progress_reader().get().get(), 0.4);

    // Batch 2 is entering; batch 1 is the backdrop.
    assert_eq!(out.reveal[2].states, vec![RevealState::Enter; 2]);
    assert_eq!(out.reveal[1].states, vec![RevealState::Backdrop; 2]);
    assert_eq!(out.reveal[0].states, vec![RevealState::Gone; 2]);

    // Quiet frame: nothing new to commit.
    let out = rt.on_frame(1.0 / 60.0).unwrap();
    assert!(out.phase_change.is_none());
    assert!(!out.haptic);
    assert!(out.media.is_empty());

    rt.on_scroll(600.0);
    let out = rt.on_frame(1.0 / 60.0).unwrap();
    assert_eq!(out.phase, 3);
    assert!(paused.get());
}

#[test]
fn media_attach_checks_names() {
    let mut rt = runtime();
    let video = || -> Box<dyn MediaElement> {
        Box::new(Video {
            paused: Rc::new(Cell::new(true)),
        })
    };
    assert!(rt.attach_media("nope", video()).is_err());
    rt.attach_media("clip", video()).unwrap();
    assert!(rt.attach_media("clip", video()).is_err());
    assert_eq!(rt.toggle_mute("clip"), Some(true));
    assert_eq!(rt.is_muted("clip"), Some(true));
    assert_eq!(rt.toggle_mute("nope"), None);
}

#[test]
fn burn_falls_back_to_static_before() {
    let mut rt = runtime();
    rt.on_resize(metrics());
    rt.on_scroll(700.0);
    assert!(rt.on_frame(0.016).unwrap().burn.is_none());

    let red = PreparedImage::from_rgba8(2, 2, [255, 0, 0, 255].repeat(4)).unwrap();
    rt.burn_mut().unwrap().set_before(Readiness::Ready(red));
    let frame = rt.on_frame(0.016).unwrap().burn.unwrap();
    assert_eq!(frame.pixel(8, 8), [255, 0, 0, 255]);

    let blue = PreparedImage::from_rgba8(2, 2, [0, 0, 255, 255].repeat(4)).unwrap();
    rt.burn_mut().unwrap().set_after(Readiness::Ready(blue));
    assert!(rt.burn().unwrap().is_running());
    rt.on_scroll(1000.0);
    let frame = rt.on_frame(0.016).unwrap().burn.unwrap();
    assert_eq!(frame.pixel(8, 8), [0, 0, 255, 255]);
}

#[test]
fn user_selection_overrides_scroll_phase() {
    let mut rt = runtime();
    rt.on_resize(metrics());
    rt.on_scroll(400.0);
    rt.on_frame(0.016).unwrap();
    assert_eq!(rt.select_phase(0), Some(PhaseChange { from: 2, to: 0 }));
    assert_eq!(rt.phase(), 0);
}

#[test]
fn slots_reshuffle_on_phase_change() {
    let mut rt = runtime();
    rt.on_resize(metrics());
    rt.on_pointer(Vec2::new(2.0, 0.0));
    rt.on_scroll(400.0);
    let out = rt.on_frame(0.016).unwrap();
    assert_eq!(out.slots.len(), 3);
    assert_eq!(
        out.slots.iter().map(|s| s.image).collect::<Vec<_>>(),
        assign_images(3, 2, 4, 0)
    );
    // Clamped pointer, depth 1: full parallax to the left.
    assert!(out.slots[0].offset.x < 0.0);
    assert_eq!(out.slots[1].offset.x, 0.0);
}

#[test]
fn retune_to_reduced_motion_stills_the_slots() {
    let mut rt = runtime();
    rt.on_resize(metrics());
    rt.on_pointer(Vec2::new(1.0, -1.0));
    rt.on_scroll(100.0);
    let out = rt.on_frame(0.5).unwrap();
    assert!(out.slots[0].offset.hypot() > 0.0);

    rt.retune(&KnobSet::default(), MotionPreference::Reduced)
        .unwrap();
    let out = rt.on_frame(0.5).unwrap();
    assert!(out.slots.iter().all(|s| s.offset.hypot() < 1e-12));
    assert_eq!(rt.phase(), 0);
}
