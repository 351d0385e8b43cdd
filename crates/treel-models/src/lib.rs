//! Shared data models for the TrailReel engine.
//!
//! This crate provides Serde-serializable types for:
//! - Scene catalogs and viewer profiles
//! - Ranked scenes and narrative regions
//! - Edit variants and cut-list timelines
//! - Encoding configuration and rendered deliverables

pub mod deliverable;
pub mod encoding;
pub mod job;
pub mod profile;
pub mod ranking;
pub mod scene;
pub mod timeline;
pub mod timestamp;
pub mod variant;

// Re-export common types
pub use deliverable::{Deliverable, DeliverableSet, DeliverableStatus};
pub use encoding::EncodingConfig;
pub use job::JobId;
pub use profile::{Profile, ProfileCatalog};
pub use ranking::{RankedScene, Region, RegionName, Regions};
pub use scene::{CharacterTag, Scene, SceneCatalog};
pub use timeline::{AudioCue, Timeline, TimelineClip, Transition};
pub use timestamp::{format_seconds, format_seconds_millis, parse_timestamp, TimestampError};
pub use variant::{Distribution, Variant, VariantSpec};
