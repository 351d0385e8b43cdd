//! Timeline assembly.
//!
//! Converts a start-ordered scene selection into a gapless, duration-bounded
//! cut list. Padding around each scene adapts to its neighbors so no source
//! frame appears in two clips, and the trailer budget is enforced exactly at
//! the clip level: the timeline never overshoots the target duration.

use tracing::{debug, info};

use treel_models::{RankedScene, Timeline, TimelineClip};

use crate::config::EngineConfig;
use crate::rng::ReelRng;

/// Assemble the cut list for one variant's scenes.
///
/// `scenes` must be start-ordered. Degenerate scenes (non-positive duration,
/// start beyond the source) and clips whose padding collapses below the
/// minimum length are skipped rather than emitted.
pub fn assemble_timeline(
    scenes: &[RankedScene],
    target_secs: f64,
    source_secs: f64,
    rng: &mut ReelRng,
    config: &EngineConfig,
) -> Timeline {
    let mut clips: Vec<TimelineClip> = Vec::new();
    let mut cursor = 0.0f64;
    let mut last_source_end = 0.0f64;

    for (i, scene) in scenes.iter().enumerate() {
        if cursor >= target_secs {
            break;
        }

        let start = scene.start();
        let end = scene.end();
        if end <= start || start >= source_secs {
            debug!(scene_id = scene.scene_id(), "Skipping degenerate scene geometry");
            continue;
        }

        // Pre-roll is capped by the gap since the previous clip so frames
        // never repeat; post-roll takes at most a fraction of the gap to
        // the next scene so it never bleeds into upcoming material.
        let pre_pad = config.max_pre_pad.min((start - last_source_end).max(0.0));
        let post_pad = match scenes.get(i + 1) {
            Some(next) => {
                let gap = (next.start() - end).max(0.0);
                config.max_post_pad.min(gap * config.post_pad_gap_fraction)
            }
            None => config.max_post_pad,
        };

        let mut source_start = (start - pre_pad).max(0.0);
        let mut source_end = (end + post_pad).min(source_secs);

        let mut clip_secs = source_end - source_start;
        if clip_secs < config.min_clip_secs {
            debug!(
                scene_id = scene.scene_id(),
                clip_secs = clip_secs,
                "Skipping clip below minimum duration"
            );
            continue;
        }

        // Trim the clip to exactly fill whatever budget remains.
        let remaining = target_secs - cursor;
        if clip_secs > remaining {
            source_end = source_start + remaining;
            clip_secs = remaining;
        }

        // Budget trimming can leave the clip behind the previous one when
        // scenes overlap in source time; shift forward, never backward.
        if source_start < last_source_end {
            source_start = last_source_end;
            clip_secs = source_end - source_start;
            if clip_secs <= 0.0 {
                debug!(scene_id = scene.scene_id(), "Skipping clip consumed by overlap shift");
                continue;
            }
        }

        let clip = TimelineClip {
            scene_id: scene.scene_id(),
            in_secs: cursor,
            out_secs: cursor + clip_secs,
            source_start,
            source_end,
            pad_before: (start - source_start).max(0.0),
            pad_after: (source_end - end).max(0.0),
            transition: rng.transition(),
            audio_cue: rng.audio_cue(),
        };

        cursor += clip_secs;
        last_source_end = source_end;
        clips.push(clip);
    }

    info!(
        clips = clips.len(),
        estimated_secs = cursor,
        target_secs = target_secs,
        "Assembled timeline"
    );

    Timeline {
        clips,
        estimated_duration: cursor,
    }
}
