//! Render metrics collection.
//!
//! Provides standardized metrics for monitoring the render pipeline:
//! - Clip and variant counters by status
//! - Render latency histograms

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Total clips cut, by status.
    pub const CLIPS_TOTAL: &str = "treel_render_clips_total";

    /// Total variants rendered, by status.
    pub const VARIANTS_TOTAL: &str = "treel_render_variants_total";

    /// Variant render latency in seconds.
    pub const VARIANT_SECONDS: &str = "treel_render_variant_seconds";
}

/// Record a completed clip cut.
pub fn record_clip(status: &'static str) {
    counter!(names::CLIPS_TOTAL, "status" => status).increment(1);
}

/// Record a completed variant render.
pub fn record_variant(variant: &str, status: &'static str, elapsed_secs: f64) {
    counter!(
        names::VARIANTS_TOTAL,
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::VARIANT_SECONDS,
        "variant" => variant.to_string()
    )
    .record(elapsed_secs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_does_not_panic_without_recorder() {
        // The metrics facade no-ops when no recorder is installed.
        record_clip("completed");
        record_variant("opening_act", "failed", 1.25);
    }
}
