//! FFmpeg CLI wrapper for reel rendering.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with timeout handling
//! - Source probing via ffprobe
//! - Timeline-clip cutting with transition/audio-cue decoration
//! - Concat-demuxer joining of clips into a master cut
//! - Thumbnail and storyboard frame grabs

pub mod command;
pub mod concat;
pub mod cut;
pub mod error;
pub mod probe;
pub mod thumbnail;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use concat::concat_clips;
pub use cut::cut_clip;
pub use error::{MediaError, MediaResult};
pub use probe::{get_duration, probe_source, SourceInfo};
pub use thumbnail::{generate_thumbnail, grab_frame};
