//! Viewer preference profiles.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A viewer-preference preset.
///
/// Scenes whose tags intersect the preferred sets get a score boost during
/// personalization; an empty profile leaves base scores untouched.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Profile {
    /// Preset identifier (e.g. "adrenaline")
    pub id: String,

    /// Emotions this viewer responds to
    #[serde(default)]
    pub preferred_emotions: BTreeSet<String>,

    /// Content labels this viewer responds to
    #[serde(default)]
    pub preferred_tags: BTreeSet<String>,
}

impl Profile {
    /// Create an empty profile with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            preferred_emotions: BTreeSet::new(),
            preferred_tags: BTreeSet::new(),
        }
    }

    pub fn with_emotions<I, S>(mut self, emotions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_emotions
            .extend(emotions.into_iter().map(Into::into));
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_tags.extend(tags.into_iter().map(Into::into));
        self
    }
}

/// Named collection of viewer presets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ProfileCatalog {
    profiles: Vec<Profile>,
}

impl ProfileCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in presets shipped with the engine.
    pub fn built_in() -> Self {
        Self {
            profiles: vec![
                Profile::new("adrenaline")
                    .with_emotions(["Fear", "Surprise", "Anger"])
                    .with_tags(["chase", "fight", "explosion", "stunt"]),
                Profile::new("heartfelt")
                    .with_emotions(["Joy", "Sadness"])
                    .with_tags(["family", "romance", "reunion"]),
                Profile::new("comedy")
                    .with_emotions(["Joy", "Surprise"])
                    .with_tags(["banter", "slapstick", "prank"]),
                Profile::new("balanced"),
            ],
        }
    }

    /// Look up a preset by id.
    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Add or replace a preset.
    pub fn insert(&mut self, profile: Profile) {
        if let Some(existing) = self.profiles.iter_mut().find(|p| p.id == profile.id) {
            *existing = profile;
        } else {
            self.profiles.push(profile);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Profile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
