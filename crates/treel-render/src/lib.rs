//! Render coordination for the TrailReel engine.
//!
//! Consumes the engine's timelines and drives the external encoder per
//! variant, packaging a deliverable set (master cut, caption track,
//! storyboard, thumbnail) keyed by variant name.

pub mod captions;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod storyboard;

pub use captions::{webvtt, write_captions};
pub use config::RenderConfig;
pub use coordinator::{ClipEncoder, FfmpegEncoder, RenderCoordinator};
pub use error::{RenderError, RenderResult};
pub use logging::JobLogger;
pub use storyboard::{frames_for, write_storyboard, StoryboardFrame};
