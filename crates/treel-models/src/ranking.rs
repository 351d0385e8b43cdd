//! Ranked scenes and narrative regions.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Scene;

/// A scene scored against a profile.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RankedScene {
    /// The underlying catalog scene
    #[serde(flatten)]
    pub scene: Scene,

    /// Profile-weighted quality score (0-1)
    pub score: f64,

    /// Scene start as a fraction of source duration, clamped below 1.0
    pub normalized_start: f64,
}

impl RankedScene {
    pub fn scene_id(&self) -> u32 {
        self.scene.scene_id
    }

    pub fn start(&self) -> f64 {
        self.scene.start
    }

    pub fn end(&self) -> f64 {
        self.scene.end
    }

    pub fn duration(&self) -> f64 {
        self.scene.duration()
    }

    /// Region this scene falls into by its normalized start.
    pub fn region(&self) -> RegionName {
        RegionName::from_normalized_start(self.normalized_start)
    }
}

/// One of the three coarse narrative thirds of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegionName {
    Early,
    Middle,
    Late,
}

impl RegionName {
    /// All regions in narrative order.
    pub const ALL: [RegionName; 3] = [RegionName::Early, RegionName::Middle, RegionName::Late];

    /// Classify a normalized start (0-1) into its region third.
    pub fn from_normalized_start(normalized_start: f64) -> Self {
        if normalized_start < 1.0 / 3.0 {
            RegionName::Early
        } else if normalized_start < 2.0 / 3.0 {
            RegionName::Middle
        } else {
            RegionName::Late
        }
    }

    /// Stable index for array-backed storage.
    pub fn index(&self) -> usize {
        match self {
            RegionName::Early => 0,
            RegionName::Middle => 1,
            RegionName::Late => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionName::Early => "early",
            RegionName::Middle => "middle",
            RegionName::Late => "late",
        }
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A narrative third with its duration quota and member scenes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Region {
    /// Which third this is
    pub name: RegionName,

    /// Seconds of the target duration budgeted to this region
    pub quota_secs: f64,

    /// Member scenes, sorted by score descending
    pub members: Vec<RankedScene>,
}

impl Region {
    pub fn new(name: RegionName, quota_secs: f64) -> Self {
        Self {
            name,
            quota_secs,
            members: Vec::new(),
        }
    }
}

/// The full region partition, array-backed since the key set is closed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Regions([Region; 3]);

impl Regions {
    /// Build from one region per third, in narrative order.
    pub fn new(early: Region, middle: Region, late: Region) -> Self {
        debug_assert_eq!(early.name, RegionName::Early);
        debug_assert_eq!(middle.name, RegionName::Middle);
        debug_assert_eq!(late.name, RegionName::Late);
        Self([early, middle, late])
    }

    pub fn get(&self, name: RegionName) -> &Region {
        &self.0[name.index()]
    }

    pub fn get_mut(&mut self, name: RegionName) -> &mut Region {
        &mut self.0[name.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_thirds() {
        assert_eq!(RegionName::from_normalized_start(0.0), RegionName::Early);
        assert_eq!(RegionName::from_normalized_start(0.33), RegionName::Early);
        assert_eq!(
            RegionName::from_normalized_start(1.0 / 3.0),
            RegionName::Middle
        );
        assert_eq!(RegionName::from_normalized_start(0.5), RegionName::Middle);
        assert_eq!(
            RegionName::from_normalized_start(2.0 / 3.0),
            RegionName::Late
        );
        assert_eq!(RegionName::from_normalized_start(0.999), RegionName::Late);
    }

    #[test]
    fn test_regions_indexing() {
        let regions = Regions::new(
            Region::new(RegionName::Early, 18.0),
            Region::new(RegionName::Middle, 24.0),
            Region::new(RegionName::Late, 18.0),
        );
        assert_eq!(regions.get(RegionName::Middle).quota_secs, 24.0);
        assert_eq!(regions.iter().count(), 3);
    }

    #[test]
    fn test_ranked_scene_region() {
        let ranked = RankedScene {
            scene: Scene::new(1, 80.0, 90.0, 0.5),
            score: 0.5,
            normalized_start: 0.8,
        };
        assert_eq!(ranked.region(), RegionName::Late);
    }
}
