//! Configuration for the personalization engine.

use serde::{Deserialize, Serialize};

/// Configuration for the personalization engine.
///
/// The defaults reproduce the stock narrative-arc behavior; none of the
/// literals is load-bearing for correctness, only the bounds they create
/// (coverage, budget, non-overlap) are part of the contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    // ============================================
    // Default-selection region split
    // ============================================
    /// Share of the target duration budgeted to the early third.
    pub early_share: f64,

    /// Share budgeted to the middle third.
    pub middle_share: f64,

    /// Share budgeted to the late third.
    pub late_share: f64,

    // ============================================
    // Selection tolerances
    // ============================================
    /// Multiplier on the target duration the greedy fill may reach, so the
    /// last admitted scene can slightly exceed its quota instead of leaving
    /// a ragged gap.
    pub overshoot_tolerance: f64,

    /// Minimum acceptable coverage as a fraction of the target duration.
    /// Below this the selection gets a score-order top-up pass.
    pub min_coverage: f64,

    // ============================================
    // Scoring weights
    // ============================================
    /// Score boost per emotion shared with the profile.
    pub emotion_weight: f64,

    /// Score boost per content label shared with the profile.
    pub tag_weight: f64,

    // ============================================
    // Variant planning
    // ============================================
    /// Stand-in for the true mean scene length when converting region
    /// ratios to scene counts.
    pub avg_scene_secs: f64,

    /// Scenes taken from the global ranked list when a variant would
    /// otherwise be empty.
    pub fallback_variant_len: usize,

    // ============================================
    // Timeline assembly
    // ============================================
    /// Maximum pre-roll added before a scene's raw start.
    pub max_pre_pad: f64,

    /// Maximum post-roll added after a scene's raw end.
    pub max_post_pad: f64,

    /// Fraction of the gap to the next scene the post-roll may consume.
    pub post_pad_gap_fraction: f64,

    /// Clips shorter than this are dropped rather than emitted.
    pub min_clip_secs: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Setup / complication / payoff split
            early_share: 0.30,
            middle_share: 0.40,
            late_share: 0.30,

            overshoot_tolerance: 1.05,
            min_coverage: 0.70,

            emotion_weight: 0.15,
            tag_weight: 0.10,

            avg_scene_secs: 10.0,
            fallback_variant_len: 5,

            max_pre_pad: 0.75,
            max_post_pad: 0.90,
            post_pad_gap_fraction: 0.45,
            min_clip_secs: 1.5,
        }
    }
}

impl EngineConfig {
    /// Builder: set the region split for the default selection.
    pub fn with_region_split(mut self, early: f64, middle: f64, late: f64) -> Self {
        self.early_share = early;
        self.middle_share = middle;
        self.late_share = late;
        self
    }

    /// Builder: set the overshoot tolerance.
    pub fn with_overshoot_tolerance(mut self, tolerance: f64) -> Self {
        self.overshoot_tolerance = tolerance;
        self
    }

    /// Builder: set the minimum coverage fraction.
    pub fn with_min_coverage(mut self, coverage: f64) -> Self {
        self.min_coverage = coverage;
        self
    }

    /// Builder: set the scoring weights.
    pub fn with_weights(mut self, emotion: f64, tag: f64) -> Self {
        self.emotion_weight = emotion;
        self.tag_weight = tag;
        self
    }

    /// Builder: set the padding limits.
    pub fn with_padding(mut self, pre: f64, post: f64, gap_fraction: f64) -> Self {
        self.max_pre_pad = pre;
        self.max_post_pad = post;
        self.post_pad_gap_fraction = gap_fraction;
        self
    }

    /// Builder: set the minimum clip duration.
    pub fn with_min_clip_secs(mut self, secs: f64) -> Self {
        self.min_clip_secs = secs;
        self
    }
}
