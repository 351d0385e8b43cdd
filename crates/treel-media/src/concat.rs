//! Clip concatenation into the master cut.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{MediaError, MediaResult};

/// Join per-clip files into one master cut, in order, without re-encoding.
///
/// All clips must share the same codec parameters, which holds for clips
/// produced by [`crate::cut::cut_clip`] under a single encoding config.
pub async fn concat_clips(
    clip_paths: &[PathBuf],
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let output = output.as_ref();

    if clip_paths.is_empty() {
        return Err(MediaError::invalid_clip("no clips to concatenate"));
    }
    for path in clip_paths {
        if !path.exists() {
            return Err(MediaError::FileNotFound(path.clone()));
        }
    }

    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

    // concat demuxer wants a list file next to the clips
    let list_file = tempfile::NamedTempFile::new()?;
    let list_body = concat_list(clip_paths);
    tokio::fs::write(list_file.path(), list_body).await?;

    info!(clips = clip_paths.len(), output = %output.display(), "Concatenating clips");

    let args = vec![
        "-y".to_string(),
        "-v".to_string(),
        "error".to_string(),
        "-f".to_string(),
        "concat".to_string(),
        "-safe".to_string(),
        "0".to_string(),
        "-i".to_string(),
        list_file.path().to_string_lossy().to_string(),
        "-c".to_string(),
        "copy".to_string(),
        output.to_string_lossy().to_string(),
    ];

    let result = tokio::process::Command::new("ffmpeg")
        .args(&args)
        .output()
        .await?;

    if !result.status.success() {
        return Err(MediaError::ffmpeg_failed(
            "Concatenation failed",
            Some(String::from_utf8_lossy(&result.stderr).to_string()),
            result.status.code(),
        ));
    }

    Ok(())
}

/// Build the concat-demuxer list body. Single quotes in paths are escaped
/// the way the demuxer expects.
fn concat_list(clip_paths: &[PathBuf]) -> String {
    clip_paths
        .iter()
        .map(|p| {
            let escaped = p.to_string_lossy().replace('\'', "'\\''");
            format!("file '{}'\n", escaped)
        })
        .collect()
}
