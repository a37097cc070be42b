//! Emberline is a scroll-driven cinematic animation engine.
//!
//! A page is a stack of tall scroll-bound sections. Each section maps its scroll position to a
//! normalized progress value and fans it out to:
//!
//! - discrete phase and reveal-mask commits that fire only when a threshold is crossed
//! - continuous style values, a horizontal slide, reveal tweens and slot motion, recomputed on
//!   every frame
//! - side effects: scroll-windowed media playback, one-shot sibling events and haptic ticks
//! - the burn transition, a procedural noise edge that dissolves one image into another
//!
//! Start from a [`SectionSpec`], build a [`SectionRuntime`], and drive it with scroll events
//! and [`SectionRuntime::on_frame`].
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod burn;
pub(crate) mod config;
pub(crate) mod effects;
pub(crate) mod engine;
pub(crate) mod media;
pub(crate) mod noise;
pub(crate) mod progress;
pub(crate) mod reveal;
pub(crate) mod timeline;

pub use crate::foundation::core::{
    Affine, Canvas, FrameRgba, Point, Progress, Rect, Rgba8Premul, Size, Vec2, Window,
};
pub use crate::foundation::error::{EmberError, EmberResult};

pub use crate::assets::decode::{PreparedImage, Readiness, decode_image, load_image};
pub use crate::burn::cover::{CoverFit, cover_fit};
pub use crate::burn::edge::BurnEdge;
pub use crate::burn::renderer::{BurnRenderer, composite_burn};
pub use crate::config::knobs::{
    BurnTuning, ENV_PREFIX, GlowPass, KNOB_DEFS, KnobDef, KnobSet, MediaTuning, MotionPreference,
    RevealTuning, SlotTuning,
};
pub use crate::engine::page::{HeaderState, Page, PageEvent};
pub use crate::engine::registry::{Cancel, Registry, RegistrationId, RegistrationKind};
pub use crate::engine::runtime::{FrameOutput, HostBindings, HostEvent, SectionRuntime, SlotFrame};
pub use crate::engine::spec::SectionSpec;
pub use crate::media::element::{MediaElement, PlaybackError};
pub use crate::media::haptics::{AudioBackend, BackendFactory, HapticService, HapticTick};
pub use crate::media::sync::{MediaEvent, MediaSync, MediaWindow};
pub use crate::noise::field::{NoiseParams, burn_edge_y, fbm_2d, value_noise_2d};
pub use crate::progress::ease::Ease;
pub use crate::progress::map::{lerp, map_between, map_range};
pub use crate::progress::mask::{
    MaskGate, RevealMask, ThresholdTable, has_crossed_new_threshold,
};
pub use crate::progress::rng::SeededRandom;
pub use crate::reveal::choreography::{
    BatchSpec, BatchVisual, Choreography, ChoreographySpec, EntryTrigger,
};
pub use crate::reveal::lifecycle::{Member, MemberVisual, RevealState};
pub use crate::reveal::reconcile::{
    PhaseReconciler, PhaseTimer, ReconcilePolicy, merge_scroll_authoritative, merge_timer_assist,
};
pub use crate::reveal::slots::{MAX_ASSIGN_RETRIES, Slot, assign_images};
pub use crate::reveal::text::{SplitMode, TextReveal, TextUnit, UnitVisual, split_units};
pub use crate::timeline::latch::{EventLatches, LatchedEvent, OneShotLatch};
pub use crate::timeline::measure::SectionMetrics;
pub use crate::timeline::phase::{PhaseChange, PhaseGate, PhaseTable};
pub use crate::timeline::section::{ScrollSection, TimelineFrame, TimelineSpec};
pub use crate::timeline::signal::{ProgressReader, ProgressSignal, ScrollInbox, ScrollInput};
pub use crate::timeline::slide::{SlideStop, SlideTrack};
pub use crate::timeline::style::{Channel, LayerStyle, StyleSheet, StyleTrack, StyleValues};
