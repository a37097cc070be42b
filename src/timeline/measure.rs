use crate::foundation::core::Progress;

/// Layout of a scroll-bound section in document coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionMetrics {
    /// Document offset of the section's top edge.
    pub top: f64,
    /// Total section height (the tall virtual extent).
    pub height: f64,
    pub viewport_height: f64,
}

impl SectionMetrics {
    /// Scroll offsets at which the section is entered and exited.
    ///
    /// `None` while the section cannot be measured (not laid out, zero height, or no taller than
    /// the viewport).
    pub fn scroll_range(&self) -> Option<(f64, f64)> {
        let finite = [self.top, self.height, self.viewport_height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.height <= 0.0 {
            return None;
        }
        let start = self.top;
        let end = self.top + self.height - self.viewport_height.max(0.0);
        (end > start).then_some((start, end))
    }

    /// `(offset - start) / (end - start)`, clamped; `None` when unmeasurable.
    pub fn progress_at(&self, scroll_offset: f64) -> Option<Progress> {
        let (start, end) = self.scroll_range()?;
        Some(Progress::new((scroll_offset - start) / (end - start)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/measure.rs"]
mod tests;
