use tracing::{debug, info};

use crate::config::knobs::{KnobSet, MediaTuning, MotionPreference};
use crate::engine::runtime::{FrameOutput, HostBindings, SectionRuntime};
use crate::foundation::error::{EmberError, EmberResult};
use crate::media::haptics::HapticService;

/// What the page header does while a full-screen movie overlay is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct HeaderState {
    pub hidden: bool,
    pub background_paused: bool,
}

/// Cross-section notifications.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEvent {
    /// One-shot event fired by `source`, delivered to `targets`.
    Section {
        source: String,
        name: String,
        targets: Vec<String>,
    },
    MovieOverlay {
        open: bool,
    },
}

/// All sections of one page plus the services they share.
pub struct Page {
    sections: Vec<SectionRuntime>,
    header: HeaderState,
    haptics: HapticService,
}

impl Page {
    pub fn new(haptics: HapticService) -> Self {
        Self {
            sections: Vec::new(),
            header: HeaderState::default(),
            haptics,
        }
    }

    pub fn add_section(&mut self, section: SectionRuntime) -> EmberResult<()> {
        if self.section(section.name()).is_some() {
            return Err(EmberError::validation(format!(
                "duplicate section name '{}'",
                section.name()
            )));
        }
        self.sections.push(section);
        Ok(())
    }

    pub fn section(&self, name: &str) -> Option<&SectionRuntime> {
        self.sections.iter().find(|s| s.name() == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut SectionRuntime> {
        self.sections.iter_mut().find(|s| s.name() == name)
    }

    pub fn header(&self) -> HeaderState {
        self.header
    }

    pub fn haptics(&self) -> &HapticService {
        &self.haptics
    }

    /// Apply new knob values to every section and to the haptic service.
    pub fn retune(&mut self, knobs: &KnobSet, motion: MotionPreference) -> EmberResult<()> {
        for s in &mut self.sections {
            s.retune(knobs, motion)?;
        }
        self.haptics.set_enabled(MediaTuning::from_knobs(knobs).haptics);
        Ok(())
    }

    pub fn mount_all(&mut self, host: &mut dyn HostBindings) {
        for s in &mut self.sections {
            s.mount(host);
        }
    }

    /// Movie overlay opened or closed by the user.
    pub fn set_movie_overlay(&mut self, open: bool) -> PageEvent {
        self.header = HeaderState {
            hidden: open,
            background_paused: open,
        };
        debug!(open, "movie overlay");
        PageEvent::MovieOverlay { open }
    }

    /// Run one frame for every mounted section, then route their one-shot events.
    pub fn on_frame(&mut self, dt: f64) -> EmberResult<(Vec<FrameOutput>, Vec<PageEvent>)> {
        let mut outputs = Vec::with_capacity(self.sections.len());
        let mut sources = Vec::with_capacity(self.sections.len());
        for s in self.sections.iter_mut().filter(|s| s.is_mounted()) {
            outputs.push(s.on_frame(dt)?);
            sources.push(s.name().to_string());
        }

        let mut events = Vec::new();
        for (source, out) in sources.iter().zip(&outputs) {
            if out.haptic {
                self.haptics.tick();
            }
            for name in &out.timeline.events {
                events.push(self.route(source, name));
            }
        }
        Ok((outputs, events))
    }

    fn route(&mut self, source: &str, name: &str) -> PageEvent {
        let mut targets = Vec::new();
        for s in &mut self.sections {
            if s.name() != source && s.listens_to(name) {
                s.activate();
                targets.push(s.name().to_string());
            }
        }
        info!(source, event = name, targets = targets.len(), "section event routed");
        PageEvent::Section {
            source: source.to_string(),
            name: name.to_string(),
            targets,
        }
    }

    /// Tear down every section and release the haptic backend.
    pub fn teardown(&mut self) {
        for s in &mut self.sections {
            s.teardown();
        }
        self.haptics.teardown();
        self.header = HeaderState::default();
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/page.rs"]
mod tests;
