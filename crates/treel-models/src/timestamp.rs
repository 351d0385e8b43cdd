//! Timestamp parsing and formatting utilities.
//!
//! Collaborators exchange timestamps as HH:MM:SS, HH:MM:SS.mmm, MM:SS, or
//! bare seconds; FFmpeg and WebVTT want HH:MM:SS.mmm back out.

use thiserror::Error;

/// Maximum reasonable video duration (24 hours in seconds).
pub const MAX_VIDEO_DURATION_SECS: f64 = 86400.0;

/// Timestamp parsing error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimestampError {
    #[error("Timestamp cannot be empty")]
    Empty,

    #[error("Timestamp cannot be negative")]
    Negative,

    #[error("Invalid {0} value: {1}")]
    InvalidValue(&'static str, String),

    #[error("Invalid timestamp format '{0}'. Use HH:MM:SS, HH:MM:SS.mmm, MM:SS, or SS")]
    InvalidFormat(String),
}

/// Parse a timestamp string to total seconds.
///
/// # Examples
/// ```
/// use treel_models::timestamp::parse_timestamp;
/// assert_eq!(parse_timestamp("01:30:00").unwrap(), 5400.0);
/// assert_eq!(parse_timestamp("05:30").unwrap(), 330.0);
/// assert_eq!(parse_timestamp("90").unwrap(), 90.0);
/// ```
pub fn parse_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Err(TimestampError::Empty);
    }

    let parts: Vec<&str> = ts.split(':').collect();
    let parse_part = |name: &'static str, raw: &str| -> Result<f64, TimestampError> {
        let value: f64 = raw
            .parse()
            .map_err(|_| TimestampError::InvalidValue(name, raw.to_string()))?;
        if value < 0.0 {
            return Err(TimestampError::Negative);
        }
        Ok(value)
    };

    match parts.len() {
        1 => parse_part("seconds", parts[0]),
        2 => {
            let minutes = parse_part("minutes", parts[0])?;
            let seconds = parse_part("seconds", parts[1])?;
            Ok(minutes * 60.0 + seconds)
        }
        3 => {
            let hours = parse_part("hours", parts[0])?;
            let minutes = parse_part("minutes", parts[1])?;
            let seconds = parse_part("seconds", parts[2])?;
            Ok(hours * 3600.0 + minutes * 60.0 + seconds)
        }
        _ => Err(TimestampError::InvalidFormat(ts.to_string())),
    }
}

/// Format seconds into HH:MM:SS or HH:MM:SS.mmm.
pub fn format_seconds(total_secs: f64) -> String {
    let total_secs = total_secs.max(0.0);
    let hours = (total_secs / 3600.0).floor() as u32;
    let mins = ((total_secs % 3600.0) / 60.0).floor() as u32;
    let secs = total_secs % 60.0;

    if (secs - secs.floor()).abs() > 0.0001 {
        format!("{:02}:{:02}:{:06.3}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}:{:02}", hours, mins, secs.floor() as u32)
    }
}

/// Format seconds into HH:MM:SS.mmm, always including milliseconds.
///
/// WebVTT cue timings require the fractional part even when zero.
pub fn format_seconds_millis(total_secs: f64) -> String {
    let total_secs = total_secs.max(0.0);
    let hours = (total_secs / 3600.0).floor() as u32;
    let mins = ((total_secs % 3600.0) / 60.0).floor() as u32;
    let secs = total_secs % 60.0;
    format!("{:02}:{:02}:{:06.3}", hours, mins, secs)
}
