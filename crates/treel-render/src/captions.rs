//! Caption track generation.
//!
//! One WebVTT cue per timeline clip, timed in trailer-relative seconds.

use std::fmt::Write as _;
use std::path::Path;

use treel_models::{format_seconds_millis, Timeline};

use crate::error::RenderResult;

/// Render a timeline as a WebVTT caption track.
pub fn webvtt(timeline: &Timeline) -> String {
    let mut out = String::from("WEBVTT\n");

    for (idx, clip) in timeline.clips.iter().enumerate() {
        let _ = write!(
            out,
            "\n{}\n{} --> {}\nScene {} \u{00b7} {}\n",
            idx + 1,
            format_seconds_millis(clip.in_secs),
            format_seconds_millis(clip.out_secs),
            clip.scene_id,
            clip.audio_cue,
        );
    }

    out
}

/// Write the caption track to disk.
pub async fn write_captions(timeline: &Timeline, path: impl AsRef<Path>) -> RenderResult<()> {
    tokio::fs::write(path.as_ref(), webvtt(timeline)).await?;
    Ok(())
}
