//! Render coordination.
//!
//! Drives the encoder collaborator once per variant and packages the
//! deliverables: master cut, caption track, storyboard, and poster
//! thumbnail.
//!
//! # Failure containment
//!
//! A failed clip fails only its variant. Variants already rendered are
//! kept, the failed variant's work directory is removed so no partial
//! artifact survives, and the failure is reported next to the completed
//! deliverables for the host to surface.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use treel_media::MediaResult;
use treel_models::{
    Deliverable, DeliverableSet, DeliverableStatus, EncodingConfig, JobId, Timeline, TimelineClip,
};

use crate::captions::write_captions;
use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::logging::JobLogger;
use crate::metrics;
use crate::storyboard::{frames_for, write_storyboard};

/// The encoder collaborator boundary.
///
/// The production implementation shells out to FFmpeg; tests substitute a
/// mock so coordination logic is exercised without media files.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClipEncoder: Send + Sync {
    /// Cut one timeline clip out of the source.
    async fn cut_clip(
        &self,
        source: &Path,
        output: &Path,
        clip: &TimelineClip,
        encoding: &EncodingConfig,
    ) -> MediaResult<()>;

    /// Join clip files into one master cut, in order.
    async fn concat_clips(&self, clips: &[PathBuf], output: &Path) -> MediaResult<()>;

    /// Grab a single frame at the given offset.
    async fn grab_frame(&self, video: &Path, output: &Path, offset_secs: f64) -> MediaResult<()>;
}

/// FFmpeg-backed encoder.
#[derive(Debug, Default)]
pub struct FfmpegEncoder {
    /// Per-clip encode timeout in seconds
    encode_timeout_secs: Option<u64>,
}

impl FfmpegEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(secs: u64) -> Self {
        Self {
            encode_timeout_secs: Some(secs),
        }
    }
}

#[async_trait]
impl ClipEncoder for FfmpegEncoder {
    async fn cut_clip(
        &self,
        source: &Path,
        output: &Path,
        clip: &TimelineClip,
        encoding: &EncodingConfig,
    ) -> MediaResult<()> {
        treel_media::cut_clip(source, output, clip, encoding, self.encode_timeout_secs).await
    }

    async fn concat_clips(&self, clips: &[PathBuf], output: &Path) -> MediaResult<()> {
        treel_media::concat_clips(clips, output).await
    }

    async fn grab_frame(&self, video: &Path, output: &Path, offset_secs: f64) -> MediaResult<()> {
        treel_media::grab_frame(video, output, offset_secs).await
    }
}

/// Drives the encoder per variant and packages deliverables.
pub struct RenderCoordinator {
    config: RenderConfig,
    encoding: EncodingConfig,
    encoder: Arc<dyn ClipEncoder>,
}

impl RenderCoordinator {
    /// Create a coordinator backed by FFmpeg.
    pub fn new(config: RenderConfig, encoding: EncodingConfig) -> Self {
        let encoder = Arc::new(FfmpegEncoder::with_timeout(config.encode_timeout.as_secs()));
        Self::with_encoder(config, encoding, encoder)
    }

    /// Create a coordinator with a custom encoder implementation.
    pub fn with_encoder(
        config: RenderConfig,
        encoding: EncodingConfig,
        encoder: Arc<dyn ClipEncoder>,
    ) -> Self {
        Self {
            config,
            encoding,
            encoder,
        }
    }

    /// Render every variant's timeline and package the deliverables.
    ///
    /// Variants render independently; the returned set carries completed
    /// deliverables alongside per-variant failures. Empty timelines are
    /// skipped, they have nothing to render.
    pub async fn render_job(
        &self,
        job_id: &JobId,
        source: &Path,
        timelines: &BTreeMap<String, Timeline>,
    ) -> RenderResult<DeliverableSet> {
        if !source.exists() {
            return Err(RenderError::source_missing(source.display().to_string()));
        }

        let logger = JobLogger::new(job_id, "render_variants");
        logger.log_start(&format!("{} variants", timelines.len()));

        let mut set = DeliverableSet::new();

        for (variant_name, timeline) in timelines {
            if timeline.is_empty() {
                warn!(variant = %variant_name, "Skipping variant with empty timeline");
                continue;
            }

            let started = Instant::now();
            match self
                .render_variant(job_id, variant_name, source, timeline)
                .await
            {
                Ok(deliverable) => {
                    metrics::record_variant(variant_name, "completed", started.elapsed().as_secs_f64());
                    logger.log_progress(&format!("variant {} rendered", variant_name));
                    set.insert(deliverable);
                }
                Err(e) => {
                    metrics::record_variant(variant_name, "failed", started.elapsed().as_secs_f64());
                    logger.log_error(&format!("variant {} failed: {}", variant_name, e));
                    self.cleanup_variant_dir(job_id, variant_name).await;
                    set.insert_failure(variant_name.clone(), e.to_string());
                }
            }
        }

        logger.log_completion(&format!(
            "{} rendered, {} failed",
            set.len(),
            set.failures.len()
        ));

        Ok(set)
    }

    /// Render one variant: cut clips, join the master, write captions,
    /// storyboard, and thumbnail.
    async fn render_variant(
        &self,
        job_id: &JobId,
        variant_name: &str,
        source: &Path,
        timeline: &Timeline,
    ) -> RenderResult<Deliverable> {
        let variant_dir = self.variant_dir(job_id, variant_name);
        let clips_dir = variant_dir.join("clips");
        tokio::fs::create_dir_all(&clips_dir).await?;

        let clip_paths = self.cut_all_clips(source, &clips_dir, timeline).await?;

        let master_path = variant_dir.join("master.mp4");
        self.encoder.concat_clips(&clip_paths, &master_path).await?;

        // Thumbnail is best-effort; a missing poster never fails the variant.
        let thumbnail_path = master_path.with_extension("jpg");
        let thumbnail_path = match self
            .encoder
            .grab_frame(&master_path, &thumbnail_path, 1.0)
            .await
        {
            Ok(()) => Some(thumbnail_path),
            Err(e) => {
                warn!(variant = %variant_name, error = %e, "Failed to generate thumbnail");
                None
            }
        };

        let captions_path = variant_dir.join("captions.vtt");
        write_captions(timeline, &captions_path).await?;

        let storyboard_path = variant_dir.join("storyboard.json");
        let frames = self
            .build_storyboard_frames(&master_path, &variant_dir, timeline)
            .await;
        write_storyboard(&frames, &storyboard_path).await?;

        if !self.config.keep_clip_files {
            tokio::fs::remove_dir_all(&clips_dir).await.ok();
        }

        let file_size_bytes = tokio::fs::metadata(&master_path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);

        info!(
            variant = %variant_name,
            clips = timeline.clips.len(),
            estimated_secs = timeline.estimated_duration,
            size_bytes = file_size_bytes,
            "Variant rendered"
        );

        Ok(Deliverable {
            variant_name: variant_name.to_string(),
            timeline: timeline.clone(),
            master_path,
            captions_path,
            storyboard_path,
            thumbnail_path,
            file_size_bytes,
            status: DeliverableStatus::Rendering,
            created_at: chrono::Utc::now(),
        }
        .complete(file_size_bytes))
    }

    /// Cut every clip of a timeline, bounded by the encode semaphore.
    async fn cut_all_clips(
        &self,
        source: &Path,
        clips_dir: &Path,
        timeline: &Timeline,
    ) -> RenderResult<Vec<PathBuf>> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_encodes));

        let futures: Vec<_> = timeline
            .clips
            .iter()
            .enumerate()
            .map(|(idx, clip)| {
                let semaphore = semaphore.clone();
                let encoder = self.encoder.clone();
                let encoding = self.encoding.clone();
                let source = source.to_path_buf();
                let output = clips_dir.join(format!("clip_{:03}.mp4", idx));
                let clip = clip.clone();

                async move {
                    let _permit = semaphore.acquire().await.expect("semaphore closed");
                    let result = encoder.cut_clip(&source, &output, &clip, &encoding).await;
                    match &result {
                        Ok(()) => metrics::record_clip("completed"),
                        Err(_) => metrics::record_clip("failed"),
                    }
                    result.map(|()| output)
                }
            })
            .collect();

        let mut clip_paths = Vec::with_capacity(timeline.clips.len());
        for result in join_all(futures).await {
            clip_paths.push(result?);
        }
        Ok(clip_paths)
    }

    /// Build storyboard frames, grabbing one image per clip when enabled.
    async fn build_storyboard_frames(
        &self,
        master_path: &Path,
        variant_dir: &Path,
        timeline: &Timeline,
    ) -> Vec<crate::storyboard::StoryboardFrame> {
        let mut frames = frames_for(timeline);
        if !self.config.storyboard_frames {
            return frames;
        }

        let frames_dir = variant_dir.join("frames");
        if tokio::fs::create_dir_all(&frames_dir).await.is_err() {
            return frames;
        }

        for frame in &mut frames {
            let frame_path = frames_dir.join(format!("frame_{:03}.jpg", frame.index));
            // Grab from the clip's midpoint in the rendered master.
            let offset = (frame.in_secs + frame.out_secs) / 2.0;
            match self.encoder.grab_frame(master_path, &frame_path, offset).await {
                Ok(()) => frame.frame_path = Some(frame_path),
                Err(e) => {
                    warn!(index = frame.index, error = %e, "Failed to grab storyboard frame");
                }
            }
        }

        frames
    }

    fn variant_dir(&self, job_id: &JobId, variant_name: &str) -> PathBuf {
        self.config
            .work_dir
            .join(job_id.as_str())
            .join(variant_name)
    }

    /// Remove a failed variant's partial artifacts.
    async fn cleanup_variant_dir(&self, job_id: &JobId, variant_name: &str) {
        let dir = self.variant_dir(job_id, variant_name);
        if dir.exists() {
            tokio::fs::remove_dir_all(&dir).await.ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treel_models::{AudioCue, Transition};

    fn timeline(scene_ids: &[u32]) -> Timeline {
        let clips: Vec<TimelineClip> = scene_ids
            .iter()
            .enumerate()
            .map(|(i, &scene_id)| TimelineClip {
                scene_id,
                in_secs: i as f64 * 5.0,
                out_secs: (i + 1) as f64 * 5.0,
                source_start: scene_id as f64 * 10.0,
                source_end: scene_id as f64 * 10.0 + 5.0,
                pad_before: 0.0,
                pad_after: 0.0,
                transition: Transition::Cut,
                audio_cue: AudioCue::Rise,
            })
            .collect();
        Timeline {
            estimated_duration: clips.len() as f64 * 5.0,
            clips,
        }
    }

    fn write_file_ok(path: &Path) -> MediaResult<()> {
        std::fs::write(path, b"artifact").unwrap();
        Ok(())
    }

    fn coordinator_with(
        work_dir: &Path,
        encoder: MockClipEncoder,
    ) -> RenderCoordinator {
        RenderCoordinator::with_encoder(
            RenderConfig::default()
                .with_work_dir(work_dir)
                .without_storyboard_frames(),
            EncodingConfig::default(),
            Arc::new(encoder),
        )
    }

    fn source_file(dir: &Path) -> PathBuf {
        let source = dir.join("source.mp4");
        std::fs::write(&source, b"source").unwrap();
        source
    }

    #[tokio::test]
    async fn test_render_job_packages_deliverables() {
        let tmp = tempfile::tempdir().unwrap();
        let source = source_file(tmp.path());

        let mut encoder = MockClipEncoder::new();
        encoder
            .expect_cut_clip()
            .times(3)
            .returning(|_, output, _, _| write_file_ok(output));
        encoder
            .expect_concat_clips()
            .times(1)
            .returning(|_, output| write_file_ok(output));
        encoder
            .expect_grab_frame()
            .times(1)
            .returning(|_, output, _| write_file_ok(output));

        let coordinator = coordinator_with(tmp.path(), encoder);
        let mut timelines = BTreeMap::new();
        timelines.insert("opening_act".to_string(), timeline(&[1, 2, 3]));

        let job_id = JobId::from_string("job-render-1");
        let set = coordinator
            .render_job(&job_id, &source, &timelines)
            .await
            .unwrap();

        assert!(set.is_complete());
        let deliverable = &set.deliverables["opening_act"];
        assert_eq!(deliverable.status, DeliverableStatus::Completed);
        assert!(deliverable.master_path.exists());
        assert!(deliverable.thumbnail_path.as_ref().unwrap().exists());
        assert!(deliverable.file_size_bytes > 0);

        let captions = std::fs::read_to_string(&deliverable.captions_path).unwrap();
        assert!(captions.starts_with("WEBVTT"));
        assert_eq!(captions.matches("-->").count(), 3);

        let storyboard = std::fs::read_to_string(&deliverable.storyboard_path).unwrap();
        let frames: Vec<serde_json::Value> = serde_json::from_str(&storyboard).unwrap();
        assert_eq!(frames.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_variant_does_not_corrupt_others() {
        let tmp = tempfile::tempdir().unwrap();
        let source = source_file(tmp.path());

        let mut encoder = MockClipEncoder::new();
        // Clips from scene 99 belong to the failing variant.
        encoder
            .expect_cut_clip()
            .returning(|_, output, clip, _| {
                if clip.scene_id == 99 {
                    Err(treel_media::MediaError::ffmpeg_failed(
                        "encoder crashed",
                        None,
                        Some(1),
                    ))
                } else {
                    write_file_ok(output)
                }
            });
        encoder
            .expect_concat_clips()
            .returning(|_, output| write_file_ok(output));
        encoder
            .expect_grab_frame()
            .returning(|_, output, _| write_file_ok(output));

        let coordinator = coordinator_with(tmp.path(), encoder);
        let mut timelines = BTreeMap::new();
        timelines.insert("good".to_string(), timeline(&[1, 2]));
        timelines.insert("bad".to_string(), timeline(&[99]));

        let job_id = JobId::from_string("job-render-2");
        let set = coordinator
            .render_job(&job_id, &source, &timelines)
            .await
            .unwrap();

        assert!(!set.is_complete());
        assert!(set.deliverables.contains_key("good"));
        assert!(set.failures.contains_key("bad"));
        assert!(set.deliverables["good"].master_path.exists());

        // Partial artifacts of the failed variant are removed.
        let bad_dir = tmp.path().join("job-render-2").join("bad");
        assert!(!bad_dir.exists());
    }

    #[tokio::test]
    async fn test_empty_timelines_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let source = source_file(tmp.path());

        let encoder = MockClipEncoder::new(); // no expectations: nothing may run
        let coordinator = coordinator_with(tmp.path(), encoder);

        let mut timelines = BTreeMap::new();
        timelines.insert("empty".to_string(), Timeline::empty());

        let set = coordinator
            .render_job(&JobId::from_string("job-render-3"), &source, &timelines)
            .await
            .unwrap();

        assert!(set.is_empty());
        assert!(set.is_complete());
    }

    #[tokio::test]
    async fn test_missing_source_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let coordinator = coordinator_with(tmp.path(), MockClipEncoder::new());

        let err = coordinator
            .render_job(
                &JobId::from_string("job-render-4"),
                &tmp.path().join("nope.mp4"),
                &BTreeMap::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, RenderError::SourceMissing(_)));
        assert!(!err.is_retryable());
    }
}
