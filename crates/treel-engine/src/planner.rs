//! Cross-variant edit planning.
//!
//! Produces one scene selection per variant archetype while minimizing
//! scene reuse across the variants of a single run. Novelty is best-effort:
//! when striding can't fill a region's count with unused scenes, the
//! planner backfills from the remaining candidates rather than deliver a
//! short variant.

use std::collections::HashSet;

use tracing::{debug, info};

use treel_models::{RankedScene, RegionName, Regions, Variant, VariantSpec};

use crate::config::EngineConfig;
use crate::personalizer::sort_by_start;

/// Plan all variants for one run.
///
/// The cross-variant used-set is threaded through the fold explicitly:
/// each step takes the set accumulated so far and returns the updated one.
pub fn plan_variants(
    regions: &Regions,
    ranked: &[RankedScene],
    target_secs: f64,
    specs: &[VariantSpec],
    config: &EngineConfig,
) -> Vec<Variant> {
    let mut used: HashSet<u32> = HashSet::new();
    let mut variants = Vec::with_capacity(specs.len());

    for spec in specs {
        let (variant, next_used) = plan_variant(regions, ranked, target_secs, spec, used, config);
        used = next_used;
        variants.push(variant);
    }

    info!(
        variants = variants.len(),
        distinct_scenes = used.len(),
        "Planned edit variants"
    );

    variants
}

/// Plan a single variant against the used-set accumulated so far.
///
/// Returns the variant and the updated used-set.
pub fn plan_variant(
    regions: &Regions,
    ranked: &[RankedScene],
    target_secs: f64,
    spec: &VariantSpec,
    used: HashSet<u32>,
    config: &EngineConfig,
) -> (Variant, HashSet<u32>) {
    let mut chosen: Vec<RankedScene> = Vec::new();
    let mut chosen_ids: HashSet<u32> = HashSet::new();

    for name in RegionName::ALL {
        let region = regions.get(name);
        let count = region_count(target_secs, spec.distribution.ratio(name), config);

        // Skip-one striding over unused candidates maximizes novelty
        // between variants built from the same material.
        let mut taken = 0usize;
        let mut idx = spec.offset;
        while idx < region.members.len() && taken < count {
            let candidate = &region.members[idx];
            if !used.contains(&candidate.scene_id()) && chosen_ids.insert(candidate.scene_id()) {
                chosen.push(candidate.clone());
                taken += 1;
            }
            idx += 2;
        }

        // Backfill in score order, novelty budget exhausted before coverage.
        if taken < count {
            for candidate in &region.members {
                if taken >= count {
                    break;
                }
                if chosen_ids.insert(candidate.scene_id()) {
                    chosen.push(candidate.clone());
                    taken += 1;
                }
            }
            debug!(
                variant = %spec.name,
                region = %name,
                target_count = count,
                filled = taken,
                "Striding under-filled region, backfilled without novelty"
            );
        }
    }

    // Degenerate catalog: fall back to the top of the global ranked list.
    if chosen.is_empty() {
        chosen = ranked
            .iter()
            .take(config.fallback_variant_len)
            .cloned()
            .collect();
        chosen_ids = chosen.iter().map(|s| s.scene_id()).collect();
    }

    sort_by_start(&mut chosen);

    let mut next_used = used;
    next_used.extend(chosen_ids);

    (
        Variant {
            name: spec.name.clone(),
            distribution: spec.distribution,
            scenes: chosen,
        },
        next_used,
    )
}

/// Approximate scene count for a region's runtime share.
fn region_count(target_secs: f64, ratio: f64, config: &EngineConfig) -> usize {
    let count = (target_secs * ratio / config.avg_scene_secs).floor() as usize;
    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use treel_models::{Profile, Scene, SceneCatalog};

    use crate::personalizer::{partition_regions, rank_scenes};

    fn build_regions(scene_count: u32, target_secs: f64) -> (Regions, Vec<RankedScene>) {
        let config = EngineConfig::default();
        let scenes = (0..scene_count)
            .map(|i| {
                let start = i as f64 * 10.0;
                Scene::new(i + 1, start, start + 8.0, 0.3 + 0.05 * (i % 10) as f64)
            })
            .collect();
        let catalog = SceneCatalog::new("vid-1", scene_count as f64 * 10.0, scenes);
        let ranked = rank_scenes(&catalog, &Profile::new("p"), &config);
        let regions = partition_regions(&ranked, target_secs, &config);
        (regions, ranked)
    }

    #[test]
    fn test_region_count_floors_at_one() {
        let config = EngineConfig::default();
        assert_eq!(region_count(60.0, 0.10, &config), 1);
        assert_eq!(region_count(60.0, 0.60, &config), 3);
        assert_eq!(region_count(0.0, 0.60, &config), 1);
    }

    #[test]
    fn test_variants_have_unique_scenes() {
        let (regions, ranked) = build_regions(30, 60.0);
        let variants = plan_variants(
            &regions,
            &ranked,
            60.0,
            &VariantSpec::archetypes(),
            &EngineConfig::default(),
        );

        assert_eq!(variants.len(), 4);
        for variant in &variants {
            assert!(variant.has_unique_scenes(), "{} repeats a scene", variant.name);
            assert!(!variant.scenes.is_empty());
        }
    }

    #[test]
    fn test_variants_minimize_reuse_with_rich_catalog() {
        let (regions, ranked) = build_regions(60, 60.0);
        let variants = plan_variants(
            &regions,
            &ranked,
            60.0,
            &VariantSpec::archetypes(),
            &EngineConfig::default(),
        );

        // With plenty of candidates per region, variants should not need to
        // repeat content at all. Overlap is a property to minimize, so the
        // assertion is on the aggregate, not zero-per-pair.
        let total: usize = variants.iter().map(|v| v.scenes.len()).sum();
        let distinct: HashSet<u32> = variants
            .iter()
            .flat_map(|v| v.scenes.iter().map(|s| s.scene_id()))
            .collect();
        assert!(
            distinct.len() * 10 >= total * 9,
            "too much reuse: {} distinct of {}",
            distinct.len(),
            total
        );
    }

    #[test]
    fn test_scarce_catalog_backfills_instead_of_starving() {
        // Three scenes cannot satisfy four variants without reuse; every
        // variant must still receive its per-region minimum.
        let (regions, ranked) = build_regions(3, 60.0);
        let variants = plan_variants(
            &regions,
            &ranked,
            60.0,
            &VariantSpec::archetypes(),
            &EngineConfig::default(),
        );

        for variant in &variants {
            assert!(!variant.scenes.is_empty(), "{} is empty", variant.name);
            assert!(variant.has_unique_scenes());
        }
    }

    #[test]
    fn test_variant_scenes_are_start_ordered() {
        let (regions, ranked) = build_regions(30, 60.0);
        let variants = plan_variants(
            &regions,
            &ranked,
            60.0,
            &VariantSpec::archetypes(),
            &EngineConfig::default(),
        );

        for variant in &variants {
            let starts: Vec<f64> = variant.scenes.iter().map(|s| s.start()).collect();
            let mut sorted = starts.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(starts, sorted, "{} not start-ordered", variant.name);
        }
    }

    #[test]
    fn test_empty_catalog_yields_empty_variants() {
        let (regions, ranked) = build_regions(0, 60.0);
        let variants = plan_variants(
            &regions,
            &ranked,
            60.0,
            &VariantSpec::archetypes(),
            &EngineConfig::default(),
        );
        for variant in &variants {
            assert!(variant.scenes.is_empty());
        }
    }

    #[test]
    fn test_used_set_threads_through_fold() {
        let (regions, ranked) = build_regions(40, 60.0);
        let config = EngineConfig::default();
        let specs = VariantSpec::archetypes();

        let (first, used_after_first) = plan_variant(
            &regions,
            &ranked,
            60.0,
            &specs[0],
            HashSet::new(),
            &config,
        );
        assert_eq!(
            used_after_first.len(),
            first.scenes.len(),
            "used-set should contain exactly the first variant's scenes"
        );

        let (second, used_after_second) = plan_variant(
            &regions,
            &ranked,
            60.0,
            &specs[1],
            used_after_first.clone(),
            &config,
        );
        // With a rich catalog the second variant avoids the first's scenes.
        for scene in &second.scenes {
            assert!(!used_after_first.contains(&scene.scene_id()));
        }
        assert!(used_after_second.len() >= used_after_first.len());
    }
}
