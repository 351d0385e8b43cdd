//! Rendered deliverable metadata.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Timeline;

/// Status of a variant's render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliverableStatus {
    /// Render is in flight
    #[default]
    Rendering,
    /// All artifacts written
    Completed,
    /// Render failed; no artifacts should be presented
    Failed,
}

impl DeliverableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliverableStatus::Rendering => "rendering",
            DeliverableStatus::Completed => "completed",
            DeliverableStatus::Failed => "failed",
        }
    }
}

/// Artifacts rendered for one variant.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Deliverable {
    /// Variant name this deliverable belongs to
    pub variant_name: String,

    /// The cut list that was rendered
    pub timeline: Timeline,

    /// Master cut media file
    pub master_path: PathBuf,

    /// WebVTT caption track (one cue per clip)
    pub captions_path: PathBuf,

    /// Storyboard JSON (one frame description per clip)
    pub storyboard_path: PathBuf,

    /// Poster thumbnail for the master cut
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<PathBuf>,

    /// Master cut size in bytes
    #[serde(default)]
    pub file_size_bytes: u64,

    /// Render status
    #[serde(default)]
    pub status: DeliverableStatus,

    /// When the render finished
    pub created_at: DateTime<Utc>,
}

impl Deliverable {
    /// Mark as completed with the final file size.
    pub fn complete(mut self, file_size_bytes: u64) -> Self {
        self.status = DeliverableStatus::Completed;
        self.file_size_bytes = file_size_bytes;
        self
    }
}

/// Deliverables for a whole job, keyed by variant name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DeliverableSet {
    /// Per-variant deliverables
    pub deliverables: BTreeMap<String, Deliverable>,

    /// Variants that failed to render, with the failure message
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub failures: BTreeMap<String, String>,
}

impl DeliverableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed variant.
    pub fn insert(&mut self, deliverable: Deliverable) {
        self.deliverables
            .insert(deliverable.variant_name.clone(), deliverable);
    }

    /// Record a failed variant.
    pub fn insert_failure(&mut self, variant_name: impl Into<String>, error: impl Into<String>) {
        self.failures.insert(variant_name.into(), error.into());
    }

    /// True when every requested variant rendered.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deliverables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliverables.is_empty()
    }
}
