use crate::types::{Clip, Timeline};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum offset, in seconds, from either clip edge at which a split is
/// honored. Requests inside the guard band are dropped so no near-zero-length
/// clip can be created.
pub const SPLIT_GUARD_SECS: f64 = 0.1;

/// A source-time range handed to [`Timeline::replace_all`]. Validated against
/// the source bounds at the ingestion boundary, not here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SourceRange {
    pub start: f64,
    pub end: f64,
}

impl Timeline {
    /// Split the clip containing `time` (timeline seconds) into two clips at
    /// that position. The split happens in place: later clips keep their
    /// timeline positions and the total duration is unchanged.
    ///
    /// No-op (returns an identical timeline) when no clip contains `time` or
    /// when the cut point is within [`SPLIT_GUARD_SECS`] of either clip edge.
    pub fn split_at(&self, time: f64) -> Timeline {
        let Some(idx) = self.clips.iter().position(|c| c.contains(time)) else {
            return self.clone();
        };

        let clip = &self.clips[idx];
        let offset = time - clip.timeline_start;
        if offset <= SPLIT_GUARD_SECS || offset >= clip.duration - SPLIT_GUARD_SECS {
            return self.clone();
        }

        let first = Clip::new(
            clip.source_start,
            clip.source_start + offset,
            clip.timeline_start,
        );
        let second = Clip::new(
            clip.source_start + offset,
            clip.source_end,
            clip.timeline_start + offset,
        );

        let mut clips = self.clips.clone();
        clips[idx] = first;
        clips.insert(idx + 1, second);
        Timeline { clips }
    }

    /// Remove the clip with `clip_id` and close the gap: every clip that
    /// started after the removed one shifts left by its duration. Clips
    /// before it are untouched. No-op if the id is unknown.
    pub fn delete_clip(&self, clip_id: Uuid) -> Timeline {
        let Some(removed) = self.clips.iter().find(|c| c.id == clip_id) else {
            return self.clone();
        };
        let removed_start = removed.timeline_start;
        let removed_duration = removed.duration;

        let clips = self
            .clips
            .iter()
            .filter(|c| c.id != clip_id)
            .map(|c| {
                let mut c = c.clone();
                if c.timeline_start > removed_start {
                    c.timeline_start -= removed_duration;
                }
                c
            })
            .collect();
        Timeline { clips }
    }

    /// Build a fresh timeline from source ranges laid back-to-back starting
    /// at 0, in the order given. Fully supersedes the prior sequence; an
    /// empty input yields an empty timeline.
    pub fn replace_all(ranges: &[SourceRange]) -> Timeline {
        let mut clips = Vec::with_capacity(ranges.len());
        let mut cursor = 0.0;
        for range in ranges {
            let clip = Clip::new(range.start, range.end, cursor);
            cursor += clip.duration;
            clips.push(clip);
        }
        Timeline { clips }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
