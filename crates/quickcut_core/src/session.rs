use crate::error::{CoreError, Result};
use crate::suggest::{ranges_from_suggestions, SuggestedRange};
use crate::types::{SourceMedia, Timeline};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One editing session: a bound source, the timeline built over it, and the
/// transient editor state (playhead, selection).
///
/// The session is an owned value; every edit replaces the timeline snapshot
/// with the one returned by the edit engine. Nothing here blocks or touches
/// the filesystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub source: Option<SourceMedia>,
    pub timeline: Timeline,
    pub playhead: f64,
    pub selected_clip: Option<Uuid>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind (or replace) the source media. The timeline collapses to a
    /// single clip spanning the whole source.
    pub fn bind_source(&mut self, source: SourceMedia) {
        self.timeline = Timeline::full_span(source.probe.duration);
        self.source = Some(source);
        self.playhead = 0.0;
        self.selected_clip = None;
    }

    /// Discard the source and all editing state, as when the user starts a
    /// new project.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Total timeline duration; falls back to the source duration when the
    /// timeline is empty but a source is bound.
    pub fn total_duration(&self) -> f64 {
        if self.timeline.is_empty() {
            self.source.as_ref().map_or(0.0, |s| s.probe.duration)
        } else {
            self.timeline.total_duration()
        }
    }

    pub fn set_playhead(&mut self, time: f64) {
        self.playhead = time.clamp(0.0, self.total_duration());
    }

    pub fn select_clip(&mut self, clip_id: Option<Uuid>) {
        self.selected_clip = clip_id;
    }

    /// Split the clip under the playhead. Silent no-op under the same
    /// conditions as [`Timeline::split_at`]; total duration never changes,
    /// so the playhead stays put.
    pub fn split_at_playhead(&mut self) {
        self.timeline = self.timeline.split_at(self.playhead);
    }

    pub fn split_at(&mut self, time: f64) {
        self.timeline = self.timeline.split_at(time);
    }

    /// Delete a clip, clear a selection pointing at it, and clamp the
    /// playhead down if it now sits beyond the shortened timeline. The
    /// playhead is deliberately not shifted left when the deleted clip was
    /// before it; only the overshoot case is corrected.
    pub fn delete_clip(&mut self, clip_id: Uuid) {
        self.timeline = self.timeline.delete_clip(clip_id);

        if self.selected_clip == Some(clip_id) {
            self.selected_clip = None;
        }

        let new_duration = self.timeline.total_duration();
        if self.playhead > new_duration {
            self.playhead = new_duration.max(0.0);
        }
    }

    /// Delete whichever clip is selected, if any.
    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_clip {
            self.delete_clip(id);
        }
    }

    /// Collapse back to the single full-span clip. No-op if no source is
    /// bound.
    pub fn reset(&mut self) {
        if let Some(source) = &self.source {
            self.timeline = Timeline::full_span(source.probe.duration);
            self.playhead = 0.0;
            self.selected_clip = None;
        }
    }

    /// Replace the whole timeline with externally suggested ranges, after
    /// validating them against the source bounds.
    pub fn apply_suggestions(&mut self, suggestions: &[SuggestedRange]) -> Result<()> {
        let source = self.source.as_ref().ok_or(CoreError::NoSource)?;
        let ranges = ranges_from_suggestions(suggestions, source.probe.duration)?;
        self.timeline = Timeline::replace_all(&ranges);
        self.selected_clip = None;
        self.playhead = self.playhead.min(self.timeline.total_duration());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
