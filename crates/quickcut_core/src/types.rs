use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// ProbeResult
// ---------------------------------------------------------------------------

/// Immutable metadata for a source file, as reported by the media prober.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeResult {
    /// Duration in seconds.
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub codec: String,
}

// ---------------------------------------------------------------------------
// SourceMedia
// ---------------------------------------------------------------------------

/// The single source file an editing session is bound to. Never mutated;
/// every edit is expressed as a remapping of its time ranges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceMedia {
    pub id: Uuid,
    pub name: String,
    pub path: PathBuf,
    pub probe: ProbeResult,
}

// ---------------------------------------------------------------------------
// Clip
// ---------------------------------------------------------------------------

/// A mapping from a contiguous source-time range onto a contiguous
/// timeline-time range. All fields are seconds.
///
/// Invariant: `duration == source_end - source_start`, exactly. Construct
/// clips through [`Clip::new`], which derives the duration; never fill the
/// field independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clip {
    pub id: Uuid,
    pub source_start: f64,
    pub source_end: f64,
    pub timeline_start: f64,
    pub duration: f64,
}

impl Clip {
    pub fn new(source_start: f64, source_end: f64, timeline_start: f64) -> Self {
        debug_assert!(source_start >= 0.0);
        debug_assert!(source_end > source_start);
        Self {
            id: Uuid::new_v4(),
            source_start,
            source_end,
            timeline_start,
            duration: source_end - source_start,
        }
    }

    pub fn timeline_end(&self) -> f64 {
        self.timeline_start + self.duration
    }

    /// Whether `time` (timeline seconds) falls inside this clip's half-open
    /// interval `[timeline_start, timeline_start + duration)`.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.timeline_start && time < self.timeline_end()
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// An ordered sequence of clips. Vec order is presentation order.
///
/// Invariants held by every value produced by this crate:
/// consecutive clips are contiguous (`b.timeline_start == a.timeline_end()`),
/// the first clip starts at 0, and source ranges are unconstrained relative
/// to each other (they may overlap or leave gaps in the source).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Timeline {
    pub clips: Vec<Clip>,
}

impl Timeline {
    pub fn new() -> Self {
        Self { clips: vec![] }
    }

    /// A single clip spanning the whole source, the state right after a
    /// source is bound or the timeline is reset.
    pub fn full_span(source_duration: f64) -> Self {
        Self {
            clips: vec![Clip::new(0.0, source_duration, 0.0)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// The clip whose half-open timeline interval contains `time`, if any.
    pub fn clip_at(&self, time: f64) -> Option<&Clip> {
        self.clips.iter().find(|c| c.contains(time))
    }

    /// Total edited duration: the furthest timeline end over all clips,
    /// 0.0 for an empty timeline.
    pub fn total_duration(&self) -> f64 {
        self.clips
            .iter()
            .map(|c| c.timeline_end())
            .fold(0.0, f64::max)
    }

    /// Map a timeline position to the corresponding source position.
    /// Returns `None` outside every clip; callers with no edits in play
    /// typically fall back to treating the time as source time already.
    pub fn to_source_time(&self, time: f64) -> Option<f64> {
        self.clip_at(time)
            .map(|c| c.source_start + (time - c.timeline_start))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_new_derives_duration() {
        let clip = Clip::new(2.5, 10.0, 0.0);
        assert_eq!(clip.duration, clip.source_end - clip.source_start);
        assert_eq!(clip.duration, 7.5);
        assert_eq!(clip.timeline_end(), 7.5);
    }

    #[test]
    fn clip_contains_is_half_open() {
        let clip = Clip::new(0.0, 5.0, 10.0);
        assert!(!clip.contains(9.999));
        assert!(clip.contains(10.0));
        assert!(clip.contains(14.999));
        assert!(!clip.contains(15.0));
    }

    #[test]
    fn full_span_matches_bound_source() {
        // Scenario A: binding a 100s source yields one clip {0, 100, 0, 100}.
        let tl = Timeline::full_span(100.0);
        assert_eq!(tl.clips.len(), 1);
        let clip = &tl.clips[0];
        assert_eq!(clip.source_start, 0.0);
        assert_eq!(clip.source_end, 100.0);
        assert_eq!(clip.timeline_start, 0.0);
        assert_eq!(clip.duration, 100.0);
        assert_eq!(tl.total_duration(), 100.0);
    }

    #[test]
    fn clip_at_finds_containing_clip() {
        let mut tl = Timeline::new();
        tl.clips.push(Clip::new(0.0, 4.0, 0.0));
        tl.clips.push(Clip::new(10.0, 16.0, 4.0));

        assert_eq!(tl.clip_at(0.0).unwrap().source_start, 0.0);
        assert_eq!(tl.clip_at(3.999).unwrap().source_start, 0.0);
        assert_eq!(tl.clip_at(4.0).unwrap().source_start, 10.0);
        assert!(tl.clip_at(10.0).is_none());
        assert!(tl.clip_at(-1.0).is_none());
    }

    #[test]
    fn clip_at_empty_timeline_is_none() {
        let tl = Timeline::new();
        assert!(tl.clip_at(0.0).is_none());
    }

    #[test]
    fn total_duration_over_clips() {
        let mut tl = Timeline::new();
        tl.clips.push(Clip::new(20.0, 25.0, 0.0));
        tl.clips.push(Clip::new(0.0, 3.0, 5.0));
        assert_eq!(tl.total_duration(), 8.0);
        assert_eq!(Timeline::new().total_duration(), 0.0);
    }

    #[test]
    fn to_source_time_offsets_into_clip() {
        let mut tl = Timeline::new();
        tl.clips.push(Clip::new(40.0, 100.0, 0.0));

        assert_eq!(tl.to_source_time(0.0), Some(40.0));
        assert_eq!(tl.to_source_time(25.5), Some(65.5));
        assert_eq!(tl.to_source_time(60.0), None);
    }

    #[test]
    fn serde_roundtrip_clip() {
        let clip = Clip::new(1.0, 6.5, 0.0);
        let json = serde_json::to_string(&clip).unwrap();
        let back: Clip = serde_json::from_str(&json).unwrap();
        assert_eq!(clip, back);
    }

    #[test]
    fn serde_roundtrip_source_media() {
        let source = SourceMedia {
            id: Uuid::new_v4(),
            name: "talk.mp4".to_string(),
            path: PathBuf::from("/media/talk.mp4"),
            probe: ProbeResult {
                duration: 300.0,
                width: 1920,
                height: 1080,
                fps: 29.97,
                codec: "h264".to_string(),
            },
        };
        let json = serde_json::to_string(&source).unwrap();
        let back: SourceMedia = serde_json::from_str(&json).unwrap();
        assert_eq!(source, back);
    }

    #[test]
    fn serde_roundtrip_timeline() {
        let tl = Timeline::full_span(42.0);
        let json = serde_json::to_string(&tl).unwrap();
        let back: Timeline = serde_json::from_str(&json).unwrap();
        assert_eq!(tl, back);
    }
}
