//! Storyboard generation.
//!
//! One frame description per timeline clip, serialized as a JSON array.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use treel_models::{AudioCue, Timeline, Transition};

use crate::error::RenderResult;

/// Description of one storyboard frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryboardFrame {
    /// Position in the trailer (0-indexed)
    pub index: usize,

    /// Scene the clip was cut from
    pub scene_id: u32,

    /// Trailer-relative clip range
    pub in_secs: f64,
    pub out_secs: f64,

    /// Source-relative clip range
    pub source_start: f64,
    pub source_end: f64,

    /// Presentation hints
    pub transition: Transition,
    pub audio_cue: AudioCue,

    /// Grabbed frame image, when frame grabbing is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_path: Option<PathBuf>,
}

/// Build frame descriptions for a timeline, without images.
pub fn frames_for(timeline: &Timeline) -> Vec<StoryboardFrame> {
    timeline
        .clips
        .iter()
        .enumerate()
        .map(|(index, clip)| StoryboardFrame {
            index,
            scene_id: clip.scene_id,
            in_secs: clip.in_secs,
            out_secs: clip.out_secs,
            source_start: clip.source_start,
            source_end: clip.source_end,
            transition: clip.transition,
            audio_cue: clip.audio_cue,
            frame_path: None,
        })
        .collect()
}

/// Write the storyboard to disk as pretty JSON.
pub async fn write_storyboard(
    frames: &[StoryboardFrame],
    path: impl AsRef<Path>,
) -> RenderResult<()> {
    let body = serde_json::to_vec_pretty(frames)?;
    tokio::fs::write(path.as_ref(), body).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use treel_models::TimelineClip;

    #[test]
    fn test_one_frame_per_clip() {
        let timeline = Timeline {
            clips: vec![
                TimelineClip {
                    scene_id: 1,
                    in_secs: 0.0,
                    out_secs: 4.0,
                    source_start: 2.0,
                    source_end: 6.0,
                    pad_before: 0.0,
                    pad_after: 0.0,
                    transition: Transition::Cut,
                    audio_cue: AudioCue::Rise,
                },
                TimelineClip {
                    scene_id: 4,
                    in_secs: 4.0,
                    out_secs: 9.0,
                    source_start: 20.0,
                    source_end: 25.0,
                    pad_before: 0.0,
                    pad_after: 0.0,
                    transition: Transition::Dip,
                    audio_cue: AudioCue::Motif,
                },
            ],
            estimated_duration: 9.0,
        };

        let frames = frames_for(&timeline);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].index, 0);
        assert_eq!(frames[1].scene_id, 4);
        assert!(frames.iter().all(|f| f.frame_path.is_none()));
    }

    #[test]
    fn test_serialization_round_trip() {
        let frames = frames_for(&Timeline::empty());
        let json = serde_json::to_string(&frames).unwrap();
        let back: Vec<StoryboardFrame> = serde_json::from_str(&json).unwrap();
        assert!(back.is_empty());
    }
}
