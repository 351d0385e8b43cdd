//! Scene scoring and default selection.
//!
//! Scores each catalog scene against a viewer profile, partitions the
//! catalog into narrative thirds with duration quotas, and greedily fills
//! the quotas into a start-ordered default selection.
//!
//! Selection never fails: a starved region force-admits its best member,
//! and a selection below minimum coverage gets a score-order top-up pass.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::{debug, info};

use treel_models::{
    Profile, RankedScene, Region, RegionName, Regions, Scene, SceneCatalog,
};

use crate::config::EngineConfig;

/// Output of the scoring/selection stage.
#[derive(Debug, Clone)]
pub struct Personalization {
    /// All scenes scored against the profile, sorted by score descending
    pub ranked: Vec<RankedScene>,

    /// The region partition with quotas and score-ordered members
    pub regions: Regions,

    /// The default selection, sorted by source start ascending
    pub default_selection: Vec<RankedScene>,
}

/// Score and select scenes for one profile and target duration.
pub fn personalize(
    catalog: &SceneCatalog,
    profile: &Profile,
    target_secs: f64,
    config: &EngineConfig,
) -> Personalization {
    let ranked = rank_scenes(catalog, profile, config);
    let regions = partition_regions(&ranked, target_secs, config);
    let default_selection = select_default(&regions, &ranked, target_secs, config);

    info!(
        video_id = %catalog.video_id,
        profile = %profile.id,
        scenes = ranked.len(),
        selected = default_selection.len(),
        selected_secs = selected_duration(&default_selection),
        target_secs = target_secs,
        "Personalized scene selection"
    );

    Personalization {
        ranked,
        regions,
        default_selection,
    }
}

/// Score every scene against the profile, sorted by score descending.
///
/// Weight grows with the overlap between the scene's tags and the profile's
/// preferred sets; the final score is capped at 1.0.
pub fn rank_scenes(
    catalog: &SceneCatalog,
    profile: &Profile,
    config: &EngineConfig,
) -> Vec<RankedScene> {
    let source_secs = catalog.source_duration_secs;

    let mut ranked: Vec<RankedScene> = catalog
        .scenes
        .iter()
        .map(|scene| {
            let weight = profile_weight(scene, profile, config);
            let score = (scene.quality * weight).min(1.0);
            RankedScene {
                scene: scene.clone(),
                score,
                normalized_start: normalized_start(scene.start, source_secs),
            }
        })
        .collect();

    sort_by_score(&mut ranked);
    ranked
}

fn profile_weight(scene: &Scene, profile: &Profile, config: &EngineConfig) -> f64 {
    let emotion_overlap = scene
        .emotions
        .intersection(&profile.preferred_emotions)
        .count();
    let tag_overlap = scene.labels.intersection(&profile.preferred_tags).count();

    1.0 + config.emotion_weight * emotion_overlap as f64 + config.tag_weight * tag_overlap as f64
}

fn normalized_start(start: f64, source_secs: f64) -> f64 {
    if source_secs <= 0.0 {
        return 0.0;
    }
    (start / source_secs).clamp(0.0, 1.0 - f64::EPSILON)
}

/// Partition ranked scenes into the three narrative thirds.
///
/// Quotas follow the configured setup/complication/payoff split of the
/// target duration. Members keep score order.
pub fn partition_regions(
    ranked: &[RankedScene],
    target_secs: f64,
    config: &EngineConfig,
) -> Regions {
    let mut regions = Regions::new(
        Region::new(RegionName::Early, target_secs * config.early_share),
        Region::new(RegionName::Middle, target_secs * config.middle_share),
        Region::new(RegionName::Late, target_secs * config.late_share),
    );

    // `ranked` is score-ordered, so each region's members inherit that order.
    for scene in ranked {
        regions.get_mut(scene.region()).members.push(scene.clone());
    }

    regions
}

/// Greedy quota fill, starvation rescue, and minimum-coverage top-up.
fn select_default(
    regions: &Regions,
    ranked: &[RankedScene],
    target_secs: f64,
    config: &EngineConfig,
) -> Vec<RankedScene> {
    if ranked.is_empty() || target_secs <= 0.0 {
        return Vec::new();
    }

    let budget_cap = target_secs * config.overshoot_tolerance;
    let mut selected: Vec<RankedScene> = Vec::new();
    let mut selected_ids: HashSet<u32> = HashSet::new();
    let mut total_secs = 0.0;

    // Fill each region's quota by descending score. The cumulative check is
    // global so the three quotas together stay inside the overshoot cap.
    for name in RegionName::ALL {
        let region = regions.get(name);
        let mut region_secs = 0.0;
        let mut region_count = 0usize;

        for scene in &region.members {
            if region_secs >= region.quota_secs {
                break;
            }
            let duration = scene.duration();
            if duration <= 0.0 {
                continue;
            }
            if total_secs == 0.0 || total_secs + duration <= budget_cap {
                region_secs += duration;
                total_secs += duration;
                region_count += 1;
                selected_ids.insert(scene.scene_id());
                selected.push(scene.clone());
            }
        }

        // A region with candidates must contribute at least one scene:
        // spanning the whole narrative arc beats strict budget adherence.
        if region_count == 0 {
            if let Some(best) = region.members.iter().find(|s| s.duration() > 0.0) {
                debug!(
                    region = %name,
                    scene_id = best.scene_id(),
                    "Region starved, force-admitting best member"
                );
                total_secs += best.duration();
                selected_ids.insert(best.scene_id());
                selected.push(best.clone());
            }
        }
    }

    // Top up below minimum coverage, overshoot allowed.
    let min_secs = target_secs * config.min_coverage;
    if total_secs < min_secs {
        for scene in ranked {
            if total_secs >= min_secs {
                break;
            }
            if selected_ids.contains(&scene.scene_id()) || scene.duration() <= 0.0 {
                continue;
            }
            total_secs += scene.duration();
            selected_ids.insert(scene.scene_id());
            selected.push(scene.clone());
        }
    }

    sort_by_start(&mut selected);
    selected
}

/// Total duration of a selection in seconds.
pub fn selected_duration(selection: &[RankedScene]) -> f64 {
    selection.iter().map(|s| s.duration().max(0.0)).sum()
}

/// Sort by score descending, scene id as the deterministic tie-break.
pub(crate) fn sort_by_score(scenes: &mut [RankedScene]) {
    scenes.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.scene_id().cmp(&b.scene_id()))
    });
}

/// Sort by source start ascending, scene id as the deterministic tie-break.
pub(crate) fn sort_by_start(scenes: &mut [RankedScene]) {
    scenes.sort_by(|a, b| {
        a.start()
            .partial_cmp(&b.start())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.scene_id().cmp(&b.scene_id()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_of(scenes: Vec<Scene>, source_secs: f64) -> SceneCatalog {
        SceneCatalog::new("vid-1", source_secs, scenes)
    }

    /// Ten 12s scenes over 120s, alternating Joy/Fear.
    fn alternating_catalog() -> SceneCatalog {
        let scenes = (0..10u32)
            .map(|i| {
                let start = i as f64 * 12.0;
                let scene = Scene::new(i + 1, start, start + 12.0, 0.5);
                if i % 2 == 0 {
                    scene.with_emotion("Joy")
                } else {
                    scene.with_emotion("Fear")
                }
            })
            .collect();
        catalog_of(scenes, 120.0)
    }

    fn joy_profile() -> Profile {
        Profile::new("joy-viewer").with_emotions(["Joy"])
    }

    #[test]
    fn test_score_weighting_prefers_profile_matches() {
        let catalog = alternating_catalog();
        let ranked = rank_scenes(&catalog, &joy_profile(), &EngineConfig::default());

        let joy = ranked.iter().find(|s| s.scene.emotions.contains("Joy")).unwrap();
        let fear = ranked.iter().find(|s| s.scene.emotions.contains("Fear")).unwrap();
        assert!((joy.score - 0.575).abs() < 1e-9);
        assert!((fear.score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_score_capped_at_one() {
        let scene = Scene::new(1, 0.0, 10.0, 0.95)
            .with_emotion("Joy")
            .with_emotion("Surprise")
            .with_label("chase");
        let catalog = catalog_of(vec![scene], 100.0);
        let profile = Profile::new("p")
            .with_emotions(["Joy", "Surprise"])
            .with_tags(["chase"]);

        let ranked = rank_scenes(&catalog, &profile, &EngineConfig::default());
        assert!((ranked[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partition_is_total_and_disjoint() {
        let catalog = alternating_catalog();
        let config = EngineConfig::default();
        let ranked = rank_scenes(&catalog, &joy_profile(), &config);
        let regions = partition_regions(&ranked, 60.0, &config);

        let total: usize = regions.iter().map(|r| r.members.len()).sum();
        assert_eq!(total, 10);

        let mut ids = HashSet::new();
        for region in regions.iter() {
            for member in &region.members {
                assert!(ids.insert(member.scene_id()));
                assert_eq!(member.region(), region.name);
            }
        }
    }

    #[test]
    fn test_narrative_arc_scenario() {
        let catalog = alternating_catalog();
        let config = EngineConfig::default();
        let result = personalize(&catalog, &joy_profile(), 60.0, &config);

        // ~5 scenes, skewed toward Joy, inside the overshoot cap.
        assert_eq!(result.default_selection.len(), 5);
        let joy_count = result
            .default_selection
            .iter()
            .filter(|s| s.scene.emotions.contains("Joy"))
            .count();
        assert!(joy_count >= 4);

        let total = selected_duration(&result.default_selection);
        assert!(total >= 60.0 * config.min_coverage);
        assert!(total <= 60.0 * config.overshoot_tolerance);

        // Start-ordered.
        let starts: Vec<f64> = result.default_selection.iter().map(|s| s.start()).collect();
        let mut sorted = starts.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_empty_catalog_degrades_gracefully() {
        let catalog = catalog_of(Vec::new(), 0.0);
        let result = personalize(&catalog, &joy_profile(), 60.0, &EngineConfig::default());
        assert!(result.ranked.is_empty());
        assert!(result.default_selection.is_empty());
    }

    #[test]
    fn test_oversized_scene_admitted_whole() {
        // A single scene longer than the target is never split.
        let catalog = catalog_of(vec![Scene::new(1, 0.0, 200.0, 0.9)], 200.0);
        let result = personalize(&catalog, &joy_profile(), 30.0, &EngineConfig::default());
        assert_eq!(result.default_selection.len(), 1);
        assert!((result.default_selection[0].duration() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_region_starvation_force_admits() {
        // Early eats the whole cap; late still contributes its best member.
        let catalog = catalog_of(
            vec![
                Scene::new(1, 0.0, 60.0, 0.9),
                Scene::new(2, 110.0, 118.0, 0.4),
                Scene::new(3, 100.0, 104.0, 0.7),
            ],
            120.0,
        );
        let result = personalize(&catalog, &joy_profile(), 60.0, &EngineConfig::default());

        let ids: Vec<u32> = result.default_selection.iter().map(|s| s.scene_id()).collect();
        assert!(ids.contains(&1));
        // The late region's best-scoring member, despite the exhausted cap.
        assert!(ids.contains(&3));
    }

    #[test]
    fn test_top_up_reaches_minimum_coverage() {
        // Quotas admit one short scene per region; the top-up pulls more
        // until coverage is acceptable.
        let scenes = (0..12u32)
            .map(|i| Scene::new(i + 1, i as f64 * 10.0, i as f64 * 10.0 + 6.0, 0.5))
            .collect();
        let catalog = catalog_of(scenes, 120.0);
        let config = EngineConfig::default();
        let result = personalize(&catalog, &joy_profile(), 60.0, &config);

        let total = selected_duration(&result.default_selection);
        assert!(total >= 60.0 * config.min_coverage);
    }

    #[test]
    fn test_degenerate_geometry_skipped() {
        let catalog = catalog_of(
            vec![
                Scene::new(1, 10.0, 10.0, 0.9),
                Scene::new(2, 30.0, 25.0, 0.9),
                Scene::new(3, 50.0, 62.0, 0.5),
            ],
            120.0,
        );
        let result = personalize(&catalog, &joy_profile(), 60.0, &EngineConfig::default());
        let ids: Vec<u32> = result.default_selection.iter().map(|s| s.scene_id()).collect();
        assert_eq!(ids, vec![3]);
    }
}
