//! Edit variant models.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{RankedScene, RegionName};

/// How a variant spreads its runtime across the narrative thirds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Distribution {
    /// Fraction of runtime drawn from the early third
    pub early: f64,
    /// Fraction of runtime drawn from the middle third
    pub middle: f64,
    /// Fraction of runtime drawn from the late third
    pub late: f64,
}

impl Distribution {
    pub fn new(early: f64, middle: f64, late: f64) -> Self {
        Self {
            early,
            middle,
            late,
        }
    }

    /// Ratio for one region.
    pub fn ratio(&self, region: RegionName) -> f64 {
        match region {
            RegionName::Early => self.early,
            RegionName::Middle => self.middle,
            RegionName::Late => self.late,
        }
    }
}

/// Recipe for one edit variant.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VariantSpec {
    /// Variant name (e.g. "opening_act")
    pub name: String,

    /// Region emphasis for this variant
    pub distribution: Distribution,

    /// Starting offset for skip-one striding (0 or 1)
    pub offset: usize,
}

impl VariantSpec {
    pub fn new(name: impl Into<String>, distribution: Distribution, offset: usize) -> Self {
        Self {
            name: name.into(),
            distribution,
            offset,
        }
    }

    /// The four built-in archetypes, adjacent specs on alternating stride parity.
    pub fn archetypes() -> Vec<VariantSpec> {
        vec![
            VariantSpec::new("opening_act", Distribution::new(0.60, 0.30, 0.10), 0),
            VariantSpec::new("middle_climax", Distribution::new(0.20, 0.60, 0.20), 1),
            VariantSpec::new("grand_finale", Distribution::new(0.10, 0.30, 0.60), 0),
            VariantSpec::new("balanced_mix", Distribution::new(0.33, 0.34, 0.33), 1),
        ]
    }
}

/// One planned edit: a start-ordered scene selection with its emphasis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Variant {
    /// Variant name, from the archetype that produced it
    pub name: String,

    /// Region emphasis this variant was planned with
    pub distribution: Distribution,

    /// Selected scenes, sorted by source start ascending
    pub scenes: Vec<RankedScene>,
}

impl Variant {
    /// True when no scene id appears twice.
    pub fn has_unique_scenes(&self) -> bool {
        let mut seen = HashSet::new();
        self.scenes.iter().all(|s| seen.insert(s.scene_id()))
    }

    /// Total duration of the selected scenes in seconds.
    pub fn total_duration(&self) -> f64 {
        self.scenes.iter().map(|s| s.duration().max(0.0)).sum()
    }
}
