//! Scene catalog models.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::{parse_timestamp, TimestampError};

/// A character detected in a scene by the vision collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CharacterTag {
    /// Character name or track label
    pub name: String,

    /// Detection confidence (0-1), if the collaborator reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl CharacterTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            confidence: None,
        }
    }
}

/// A contiguous tagged interval of the source video.
///
/// Produced by the upstream vision/tagging collaborator; immutable for the
/// duration of a personalization run. `end > start` always holds for
/// well-formed input; degenerate geometry is tolerated downstream rather
/// than rejected here.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// Unique ID within the video (1-indexed)
    pub scene_id: u32,

    /// Start time in source seconds
    pub start: f64,

    /// End time in source seconds
    pub end: f64,

    /// Opaque base quality score (0-1) from the upstream signal
    #[serde(default)]
    pub quality: f64,

    /// Detected emotions (e.g. "Joy", "Fear")
    #[serde(default)]
    pub emotions: BTreeSet<String>,

    /// Detected content labels (e.g. "chase", "dialogue")
    #[serde(default)]
    pub labels: BTreeSet<String>,

    /// Characters present in the scene
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub characters: Vec<CharacterTag>,
}

impl Scene {
    /// Create a new scene from numeric boundaries.
    pub fn new(scene_id: u32, start: f64, end: f64, quality: f64) -> Self {
        Self {
            scene_id,
            start,
            end,
            quality,
            emotions: BTreeSet::new(),
            labels: BTreeSet::new(),
            characters: Vec::new(),
        }
    }

    /// Create a scene from collaborator timestamps (HH:MM:SS or HH:MM:SS.mmm).
    pub fn from_timestamps(
        scene_id: u32,
        start: &str,
        end: &str,
        quality: f64,
    ) -> Result<Self, TimestampError> {
        Ok(Self::new(
            scene_id,
            parse_timestamp(start)?,
            parse_timestamp(end)?,
            quality,
        ))
    }

    /// Scene duration in seconds. Negative for degenerate geometry.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Add an emotion tag.
    pub fn with_emotion(mut self, emotion: impl Into<String>) -> Self {
        self.emotions.insert(emotion.into());
        self
    }

    /// Add a content label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    /// Add a character tag.
    pub fn with_character(mut self, character: CharacterTag) -> Self {
        self.characters.push(character);
        self
    }
}

/// Normalized, immutable record of detected scenes for one source video.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SceneCatalog {
    /// Source video identifier
    pub video_id: String,

    /// Total length of the source media in seconds
    pub source_duration_secs: f64,

    /// Detected scenes, in collaborator order
    pub scenes: Vec<Scene>,
}

impl SceneCatalog {
    /// Create a new catalog.
    pub fn new(video_id: impl Into<String>, source_duration_secs: f64, scenes: Vec<Scene>) -> Self {
        Self {
            video_id: video_id.into(),
            source_duration_secs,
            scenes,
        }
    }

    /// Sum of all scene durations (ignores negative-duration scenes).
    pub fn total_scene_duration(&self) -> f64 {
        self.scenes
            .iter()
            .map(|s| s.duration().max(0.0))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }
}
