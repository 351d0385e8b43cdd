//! Frame-accurate cut-list models.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Transition into a clip. Presentation metadata only; never affects timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    #[default]
    Cut,
    Fade,
    Dip,
}

impl Transition {
    pub const ALL: [Transition; 3] = [Transition::Cut, Transition::Fade, Transition::Dip];

    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Cut => "cut",
            Transition::Fade => "fade",
            Transition::Dip => "dip",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audio cue attached to a clip. Presentation metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    #[default]
    Rise,
    Drop,
    Sting,
    Motif,
}

impl AudioCue {
    pub const ALL: [AudioCue; 4] = [
        AudioCue::Rise,
        AudioCue::Drop,
        AudioCue::Sting,
        AudioCue::Motif,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCue::Rise => "rise",
            AudioCue::Drop => "drop",
            AudioCue::Sting => "sting",
            AudioCue::Motif => "motif",
        }
    }
}

impl fmt::Display for AudioCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One cut in the output trailer.
///
/// `in_secs`/`out_secs` are trailer-relative; `source_start`/`source_end`
/// are source-relative. Consecutive clips are contiguous in trailer time
/// (`clip[i].out_secs == clip[i+1].in_secs`) and non-overlapping in source
/// time.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TimelineClip {
    /// Scene this clip was cut from
    pub scene_id: u32,

    /// Trailer-relative start
    pub in_secs: f64,

    /// Trailer-relative end
    pub out_secs: f64,

    /// Source-relative start, after padding and clamping
    pub source_start: f64,

    /// Source-relative end, after padding and clamping
    pub source_end: f64,

    /// Seconds of pre-roll added before the scene's raw start
    pub pad_before: f64,

    /// Seconds of post-roll added after the scene's raw end
    pub pad_after: f64,

    /// Transition into this clip
    pub transition: Transition,

    /// Audio cue for this clip
    pub audio_cue: AudioCue,
}

impl TimelineClip {
    /// Clip duration in trailer seconds.
    pub fn duration(&self) -> f64 {
        self.out_secs - self.in_secs
    }
}

/// The ordered, gapless cut list for one variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct Timeline {
    /// Clips in trailer order
    pub clips: Vec<TimelineClip>,

    /// Total trailer runtime; equals the last clip's `out_secs`
    pub estimated_duration: f64,
}

impl Timeline {
    /// An empty timeline (degenerate catalog).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// True when clips tile trailer time exactly: first at 0, each `out`
    /// equal to the next `in`.
    pub fn is_contiguous(&self) -> bool {
        if let Some(first) = self.clips.first() {
            if first.in_secs.abs() > 1e-6 {
                return false;
            }
        }
        self.clips
            .windows(2)
            .all(|pair| (pair[0].out_secs - pair[1].in_secs).abs() < 1e-6)
    }

    /// True when no clip's source range overlaps its successor's.
    pub fn sources_non_overlapping(&self) -> bool {
        self.clips
            .windows(2)
            .all(|pair| pair[0].source_end <= pair[1].source_start + 1e-6)
    }
}
