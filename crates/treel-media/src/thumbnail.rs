//! Thumbnail and storyboard frame grabs.

use std::path::Path;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use treel_models::encoding::THUMBNAIL_SCALE_WIDTH;

/// Generate a poster thumbnail from a rendered cut.
pub async fn generate_thumbnail(
    video_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> MediaResult<()> {
    grab_frame(video_path, output_path, 1.0).await
}

/// Grab a single scaled frame at the given offset.
///
/// Used both for poster thumbnails and per-clip storyboard frames.
pub async fn grab_frame(
    video_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    offset_secs: f64,
) -> MediaResult<()> {
    let filter = format!("scale={}:-2", THUMBNAIL_SCALE_WIDTH);

    let cmd = FfmpegCommand::new(video_path.as_ref(), output_path.as_ref())
        .seek(offset_secs.max(0.0))
        .single_frame()
        .video_filter(&filter)
        .log_level("error");

    FfmpegRunner::new().run(&cmd).await
}
