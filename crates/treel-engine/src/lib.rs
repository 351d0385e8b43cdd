//! Personalized highlight-reel planning engine.
//!
//! Takes a scored scene catalog and a viewer profile, allocates scenes
//! against a target duration across narrative regions, plans several
//! non-redundant edit variants, and emits one frame-accurate cut list per
//! variant.
//!
//! The engine is stateless and synchronous: one call per request, no shared
//! mutable state, no I/O. All stochastic choices come from an explicit
//! generator seeded by the job id, so equal inputs replay byte-identically.

pub mod assembler;
pub mod config;
pub mod personalizer;
pub mod planner;
pub mod rng;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use treel_models::{
    JobId, Profile, RankedScene, Regions, SceneCatalog, Timeline, Variant, VariantSpec,
};

pub use assembler::assemble_timeline;
pub use config::EngineConfig;
pub use personalizer::{personalize, Personalization};
pub use planner::{plan_variant, plan_variants};
pub use rng::ReelRng;

/// Everything one personalization run produces.
///
/// Serializable as-is; the host persists it as the job's result payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalizationResult {
    /// The job this run belongs to
    pub job_id: JobId,

    /// All scenes scored against the profile, score descending
    pub ranked_scenes: Vec<RankedScene>,

    /// The narrative-region partition with quotas
    pub regions: Regions,

    /// The default selection, start-ordered
    pub default_selection: Vec<RankedScene>,

    /// Planned edit variants
    pub variants: Vec<Variant>,

    /// One cut list per variant, keyed by variant name
    pub timelines: BTreeMap<String, Timeline>,
}

/// Run the full personalization pipeline for one request.
///
/// Rank and select scenes, plan the requested variants, then assemble one
/// timeline per variant. Degenerate input (empty catalog, zero target)
/// yields empty-but-valid output, never an error.
pub fn personalize_reel(
    job_id: &JobId,
    catalog: &SceneCatalog,
    profile: &Profile,
    target_secs: f64,
    specs: &[VariantSpec],
    config: &EngineConfig,
) -> PersonalizationResult {
    let mut rng = ReelRng::from_job(job_id);

    let personalization = personalize(catalog, profile, target_secs, config);
    let variants = plan_variants(
        &personalization.regions,
        &personalization.ranked,
        target_secs,
        specs,
        config,
    );

    let timelines: BTreeMap<String, Timeline> = variants
        .iter()
        .map(|variant| {
            let timeline = assemble_timeline(
                &variant.scenes,
                target_secs,
                catalog.source_duration_secs,
                &mut rng,
                config,
            );
            (variant.name.clone(), timeline)
        })
        .collect();

    info!(
        job_id = %job_id,
        video_id = %catalog.video_id,
        variants = variants.len(),
        "Personalization run complete"
    );

    PersonalizationResult {
        job_id: job_id.clone(),
        ranked_scenes: personalization.ranked,
        regions: personalization.regions,
        default_selection: personalization.default_selection,
        variants,
        timelines,
    }
}
