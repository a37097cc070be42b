//! Per-section frame loop.
//!
//! Host events (scroll, resize, pointer) only land in an inbox. Once per animation frame the
//! runtime drains the inbox, derives progress, resolves every discrete commit (phase, reveal
//! mask, reconciled phase, choreography, latched events) and only then evaluates the
//! continuous values (styles, slide offset, reveal tweens, burn frame, slot motion).

use tracing::{debug, info};

use crate::burn::renderer::BurnRenderer;
use crate::config::knobs::{BurnTuning, KnobSet, MotionPreference, RevealTuning, SlotTuning};
use crate::engine::registry::{Cancel, Registry, RegistrationKind};
use crate::engine::spec::SectionSpec;
use crate::foundation::core::{Canvas, FrameRgba, Progress, Vec2, Window};
use crate::foundation::error::{EmberError, EmberResult};
use crate::media::element::MediaElement;
use crate::media::sync::{MediaEvent, MediaSync, MediaWindow};
use crate::progress::map::map_range;
use crate::reveal::choreography::{BatchVisual, Choreography};
use crate::reveal::reconcile::PhaseReconciler;
use crate::reveal::slots::{Slot, assign_images};
use crate::timeline::measure::SectionMetrics;
use crate::timeline::phase::PhaseChange;
use crate::timeline::section::{ScrollSection, TimelineFrame};
use crate::timeline::signal::{ProgressReader, ProgressSignal, ScrollInbox};

/// Host events a section subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostEvent {
    Scroll,
    Resize,
    Pointer,
}

/// Registration surface of the host platform. Each call returns the action that undoes it.
pub trait HostBindings {
    fn subscribe(&mut self, event: HostEvent) -> Cancel;

    fn request_frames(&mut self) -> Cancel;
}

/// Displacement and image of one sparkle slot for this frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SlotFrame {
    pub offset: Vec2,
    pub image: usize,
}

/// Everything a section produced for one animation frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub timeline: TimelineFrame,
    /// Reconciled phase shown on screen.
    pub phase: usize,
    pub phase_change: Option<PhaseChange>,
    pub reveal: Vec<BatchVisual>,
    pub media: Vec<(String, MediaEvent)>,
    pub burn: Option<FrameRgba>,
    pub slots: Vec<SlotFrame>,
    /// A committed phase change asked for a haptic tick.
    pub haptic: bool,
}

struct BurnStage {
    window: Window,
    renderer: BurnRenderer,
}

pub struct SectionRuntime {
    name: String,
    listens: Vec<String>,
    haptics: bool,
    section: ScrollSection,
    reconciler: PhaseReconciler,
    choreography: Option<Choreography>,
    media_windows: Vec<MediaWindow>,
    media: Vec<MediaSync<Box<dyn MediaElement>>>,
    burn: Option<BurnStage>,
    slots: Vec<Slot>,
    slot_pool: usize,
    slot_ids: Vec<usize>,
    seed: u64,
    slot_tuning: SlotTuning,
    inbox: ScrollInbox,
    metrics: Option<SectionMetrics>,
    offset: f64,
    pointer: Vec2,
    signal: ProgressSignal,
    registry: Registry,
    clock: f64,
    mounted: bool,
}

impl SectionRuntime {
    pub fn new(
        spec: &SectionSpec,
        knobs: &KnobSet,
        motion: MotionPreference,
        canvas: Canvas,
    ) -> EmberResult<Self> {
        spec.validate()?;
        let reveal = RevealTuning::from_knobs(knobs, motion);
        let section = ScrollSection::new(&spec.timeline()?)?;
        let mut reconciler =
            PhaseReconciler::new(spec.reconcile, spec.phases.len(), reveal.phase_interval)?;
        reconciler.set_autoplay(spec.autoplay);

        let choreography = spec
            .choreography
            .as_ref()
            .map(|c| Choreography::new(c, reveal))
            .transpose()?;

        let burn = spec.burn.map(|window| BurnStage {
            window,
            renderer: BurnRenderer::new(canvas, BurnTuning::from_knobs(knobs, motion)),
        });

        let slot_ids = assign_images(spec.slots.len(), 0, spec.slot_pool, spec.seed);

        Ok(Self {
            name: spec.name.clone(),
            listens: spec.listens.clone(),
            haptics: spec.haptics,
            section,
            reconciler,
            choreography,
            media_windows: spec.media.clone(),
            media: Vec::new(),
            burn,
            slots: spec.slots.clone(),
            slot_pool: spec.slot_pool,
            slot_ids,
            seed: spec.seed,
            slot_tuning: SlotTuning::from_knobs(knobs, motion),
            inbox: ScrollInbox::new(),
            metrics: None,
            offset: 0.0,
            pointer: Vec2::ZERO,
            signal: ProgressSignal::new(),
            registry: Registry::new(),
            clock: 0.0,
            mounted: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn listens_to(&self, event: &str) -> bool {
        self.listens.iter().any(|l| l == event)
    }

    pub fn progress_reader(&self) -> ProgressReader {
        self.signal.reader()
    }

    pub fn phase(&self) -> usize {
        self.reconciler.phase()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_active(&self) -> bool {
        self.section.is_active()
    }

    pub fn live_registrations(&self) -> usize {
        self.registry.live()
    }

    /// Attach the host element for the media window called `name`.
    pub fn attach_media(&mut self, name: &str, element: Box<dyn MediaElement>) -> EmberResult<()> {
        if self.media.iter().any(|m| m.name() == name) {
            return Err(EmberError::media(format!(
                "section '{}' already has media '{name}'",
                self.name
            )));
        }
        let Some(window) = self.media_windows.iter().find(|w| w.name == name) else {
            return Err(EmberError::media(format!(
                "section '{}' declares no media window '{name}'",
                self.name
            )));
        };
        let sync = MediaSync::new(window, element)?;
        self.media.push(sync);
        Ok(())
    }

    pub fn burn(&self) -> Option<&BurnRenderer> {
        self.burn.as_ref().map(|b| &b.renderer)
    }

    pub fn burn_mut(&mut self) -> Option<&mut BurnRenderer> {
        self.burn.as_mut().map(|b| &mut b.renderer)
    }

    /// Subscribe to host events and request frames. Mounting twice registers once.
    pub fn mount(&mut self, host: &mut dyn HostBindings) {
        if self.mounted {
            return;
        }
        for event in [HostEvent::Scroll, HostEvent::Resize, HostEvent::Pointer] {
            let cancel = host.subscribe(event);
            self.registry
                .register(RegistrationKind::Listener, format!("{event:?}"), cancel);
        }
        let cancel = host.request_frames();
        self.registry
            .register(RegistrationKind::FrameRequest, "frame", cancel);
        self.mounted = true;
        if self.listens.is_empty() {
            self.activate();
        }
        info!(section = %self.name, registrations = self.registry.live(), "section mounted");
    }

    pub fn activate(&mut self) {
        self.section.activate();
    }

    pub fn on_scroll(&mut self, offset: f64) {
        self.inbox.push_scroll(offset);
    }

    pub fn on_resize(&mut self, metrics: SectionMetrics) {
        self.inbox.push_resize(metrics);
    }

    /// Pointer relative to the viewport centre, normalized to `[-1, 1]`.
    pub fn on_pointer(&mut self, pointer: Vec2) {
        self.pointer = Vec2::new(pointer.x.clamp(-1.0, 1.0), pointer.y.clamp(-1.0, 1.0));
    }

    /// Re-read every tuning from `knobs`. Takes effect from the next frame; committed state is kept.
    pub fn retune(&mut self, knobs: &KnobSet, motion: MotionPreference) -> EmberResult<()> {
        let reveal = RevealTuning::from_knobs(knobs, motion);
        self.reconciler.set_interval(reveal.phase_interval)?;
        if let Some(choreo) = self.choreography.as_mut() {
            choreo.set_tuning(reveal);
        }
        if let Some(stage) = self.burn.as_mut() {
            stage.renderer.set_tuning(BurnTuning::from_knobs(knobs, motion));
        }
        self.slot_tuning = SlotTuning::from_knobs(knobs, motion);
        debug!(section = %self.name, ?motion, "section retuned");
        Ok(())
    }

    /// Explicit user selection of a phase (indicator click).
    pub fn select_phase(&mut self, phase: usize) -> Option<PhaseChange> {
        let change = self.reconciler.select(phase);
        if let (Some(c), Some(choreo)) = (change, self.choreography.as_mut()) {
            choreo.set_phase(c.to, self.clock);
        }
        change
    }

    /// User mute toggle for media `name`; returns the new muted state.
    pub fn toggle_mute(&mut self, name: &str) -> Option<bool> {
        self.media
            .iter_mut()
            .find(|m| m.name() == name)
            .map(|m| m.toggle_mute())
    }

    pub fn is_muted(&self, name: &str) -> Option<bool> {
        self.media
            .iter()
            .find(|m| m.name() == name)
            .map(|m| m.is_muted())
    }

    /// Run one animation frame, `dt` seconds after the previous one.
    #[tracing::instrument(level = "trace", skip(self), fields(section = %self.name))]
    pub fn on_frame(&mut self, dt: f64) -> EmberResult<FrameOutput> {
        self.clock += dt.max(0.0);

        let input = self.inbox.take();
        if let Some(input) = input {
            if let Some(m) = input.metrics {
                self.metrics = Some(m);
            }
            if let Some(o) = input.offset {
                self.offset = o;
            }
        }
        let progress = self.metrics.and_then(|m| m.progress_at(self.offset));
        if let Some(p) = progress {
            self.signal.publish(p);
        }

        // Discrete state first.
        let timeline = self.section.sample(progress);
        let mut phase_change = None;
        if timeline.measured && (input.is_some() || timeline.phase_change.is_some()) {
            phase_change = self.reconciler.on_scroll(timeline.phase);
        }
        // Autoplay waits for a valid measurement too.
        let ticked = if timeline.measured {
            self.reconciler.on_tick(dt)
        } else {
            None
        };
        if let Some(c) = ticked {
            phase_change = Some(match phase_change {
                Some(first) => PhaseChange {
                    from: first.from,
                    to: c.to,
                },
                None => c,
            });
        }
        let phase = self.reconciler.phase();

        if let Some(choreo) = self.choreography.as_mut() {
            if phase_change.is_some() {
                choreo.set_phase(phase, self.clock);
            }
            if timeline.mask_change {
                choreo.apply_mask(&timeline.mask, self.clock);
            }
            choreo.tick(self.clock);
        }

        if phase_change.is_some() && !self.slots.is_empty() {
            self.slot_ids =
                assign_images(self.slots.len(), phase as u64, self.slot_pool, self.seed);
        }

        let mut media = Vec::new();
        if let Some(p) = progress {
            for m in &mut self.media {
                if let Some(ev) = m.update(p) {
                    media.push((m.name().to_string(), ev));
                }
            }
        }

        // Continuous values.
        let reveal = self
            .choreography
            .as_ref()
            .map(|c| c.visuals(self.clock))
            .unwrap_or_default();

        let burn = match self.burn.as_mut() {
            Some(stage) => {
                stage.renderer.tick();
                let p = timeline.progress.get();
                let burn_p = Progress::new(map_range(p, stage.window.start, stage.window.end));
                match stage.renderer.render(burn_p)? {
                    Some(frame) => Some(frame),
                    None => stage.renderer.fallback_frame(),
                }
            }
            None => None,
        };

        let slots = self
            .slots
            .iter()
            .zip(&self.slot_ids)
            .map(|(slot, &image)| SlotFrame {
                offset: slot.offset(self.pointer, self.clock, &self.slot_tuning),
                image,
            })
            .collect();

        let haptic = self.haptics && phase_change.is_some_and(|c| c.from != c.to);

        Ok(FrameOutput {
            timeline,
            phase,
            phase_change,
            reveal,
            media,
            burn,
            slots,
            haptic,
        })
    }

    /// Cancel every registration, stop media and release burn resources.
    pub fn teardown(&mut self) {
        let cancelled = self.registry.teardown();
        for m in &mut self.media {
            m.stop();
        }
        if let Some(stage) = self.burn.as_mut() {
            stage.renderer.teardown();
        }
        self.section.deactivate();
        self.section.reset();
        self.reconciler.reset();
        if let Some(c) = self.choreography.as_mut() {
            c.reset();
        }
        if self.mounted {
            info!(section = %self.name, cancelled, "section torn down");
        }
        self.mounted = false;
        debug!(section = %self.name, live = self.registry.live(), "teardown complete");
    }
}

impl Drop for SectionRuntime {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/runtime.rs"]
mod tests;
