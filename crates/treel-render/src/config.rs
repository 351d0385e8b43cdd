//! Render coordinator configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Render coordinator configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Work directory for per-job artifacts
    pub work_dir: PathBuf,
    /// Maximum concurrent FFmpeg encodes per variant
    pub max_concurrent_encodes: usize,
    /// Timeout for a single clip encode
    pub encode_timeout: Duration,
    /// Keep intermediate clip files after the master cut is joined
    pub keep_clip_files: bool,
    /// Grab a storyboard frame per clip (one extra FFmpeg run each)
    pub storyboard_frames: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("/tmp/treel"),
            max_concurrent_encodes: 3,
            encode_timeout: Duration::from_secs(600), // 10 minutes
            keep_clip_files: false,
            storyboard_frames: true,
        }
    }
}

impl RenderConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("TREEL_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/tmp/treel")),
            max_concurrent_encodes: std::env::var("TREEL_MAX_ENCODES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            encode_timeout: Duration::from_secs(
                std::env::var("TREEL_ENCODE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(600),
            ),
            keep_clip_files: std::env::var("TREEL_KEEP_CLIPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
            storyboard_frames: std::env::var("TREEL_STORYBOARD_FRAMES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Builder: set the work directory.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    /// Builder: disable storyboard frame grabs.
    pub fn without_storyboard_frames(mut self) -> Self {
        self.storyboard_frames = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.max_concurrent_encodes, 3);
        assert!(!config.keep_clip_files);
        assert!(config.storyboard_frames);
    }

    #[test]
    fn test_builders() {
        let config = RenderConfig::default()
            .with_work_dir("/data/reels")
            .without_storyboard_frames();
        assert_eq!(config.work_dir, PathBuf::from("/data/reels"));
        assert!(!config.storyboard_frames);
    }
}
