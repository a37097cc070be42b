use std::collections::BTreeMap;

use tracing::debug;

/// Undo action for one host registration.
pub type Cancel = Box<dyn FnOnce()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationKind {
    Listener,
    Timer,
    FrameRequest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(u64);

struct Entry {
    kind: RegistrationKind,
    label: String,
    cancel: Cancel,
}

/// Every listener, timer and frame request a section holds, with the means to undo it.
#[derive(Default)]
pub struct Registry {
    next: u64,
    live: BTreeMap<RegistrationId, Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        kind: RegistrationKind,
        label: impl Into<String>,
        cancel: Cancel,
    ) -> RegistrationId {
        let id = RegistrationId(self.next);
        self.next += 1;
        self.live.insert(
            id,
            Entry {
                kind,
                label: label.into(),
                cancel,
            },
        );
        id
    }

    /// Cancel one registration. Unknown ids are ignored.
    pub fn cancel(&mut self, id: RegistrationId) -> bool {
        match self.live.remove(&id) {
            Some(entry) => {
                (entry.cancel)();
                true
            }
            None => false,
        }
    }

    pub fn live(&self) -> usize {
        self.live.len()
    }

    pub fn live_of(&self, kind: RegistrationKind) -> usize {
        self.live.values().filter(|e| e.kind == kind).count()
    }

    /// Cancel everything, newest first. Returns how many were cancelled.
    pub fn teardown(&mut self) -> usize {
        let n = self.live.len();
        while let Some((_, entry)) = self.live.pop_last() {
            debug!(kind = ?entry.kind, label = %entry.label, "registration cancelled");
            (entry.cancel)();
        }
        n
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("live", &self.live.len())
            .finish()
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/registry.rs"]
mod tests;
