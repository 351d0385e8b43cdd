//! Single-clip extraction.

use std::path::Path;
use tracing::info;

use treel_models::{AudioCue, EncodingConfig, TimelineClip, Transition};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Cut one timeline clip out of the source, re-encoded for concatenation.
///
/// The transition and audio cue are decorated as best-effort filter hints;
/// they never change the clip's timing.
pub async fn cut_clip(
    source: impl AsRef<Path>,
    output: impl AsRef<Path>,
    clip: &TimelineClip,
    encoding: &EncodingConfig,
    timeout_secs: Option<u64>,
) -> MediaResult<()> {
    let source = source.as_ref();
    let output = output.as_ref();

    let duration = clip.source_end - clip.source_start;
    if duration <= 0.0 {
        return Err(MediaError::invalid_clip(format!(
            "clip for scene {} has non-positive source range [{:.3}, {:.3}]",
            clip.scene_id, clip.source_start, clip.source_end
        )));
    }

    info!(
        scene_id = clip.scene_id,
        source_start = clip.source_start,
        source_end = clip.source_end,
        transition = %clip.transition,
        "Cutting clip"
    );

    let mut cmd = FfmpegCommand::new(source, output)
        .seek(clip.source_start)
        .duration(duration)
        .video_codec(&encoding.codec)
        .preset(&encoding.preset)
        .crf(encoding.crf)
        .audio_codec(&encoding.audio_codec)
        .audio_bitrate(&encoding.audio_bitrate);

    if let Some(filter) = transition_filter(clip.transition) {
        cmd = cmd.video_filter(filter);
    }
    if let Some(filter) = audio_cue_filter(clip.audio_cue, duration) {
        cmd = cmd.audio_filter(filter);
    }

    let runner = match timeout_secs {
        Some(secs) => FfmpegRunner::new().with_timeout(secs),
        None => FfmpegRunner::new(),
    };
    runner.run(&cmd).await
}

/// Video filter for a transition hint, if it needs one.
fn transition_filter(transition: Transition) -> Option<String> {
    match transition {
        Transition::Cut => None,
        Transition::Fade => Some("fade=t=in:st=0:d=0.5".to_string()),
        Transition::Dip => Some("fade=t=in:st=0:d=0.4:color=black".to_string()),
    }
}

/// Audio filter for a cue hint, if it needs one.
///
/// Sting and motif are left to the host's music bed.
fn audio_cue_filter(cue: AudioCue, duration: f64) -> Option<String> {
    match cue {
        AudioCue::Rise => Some("afade=t=in:st=0:d=0.4".to_string()),
        AudioCue::Drop if duration > 0.5 => {
            Some(format!("afade=t=out:st={:.3}:d=0.4", duration - 0.4))
        }
        _ => None,
    }
}
