//! Personalization job identity.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one personalization request.
///
/// Also the seed source for the request's random generator, so a job id
/// pins down every stochastic choice the engine makes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Stable 64-bit seed derived from the id bytes.
    ///
    /// FNV-1a, so equal ids map to equal seeds on every platform.
    pub fn seed(&self) -> u64 {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in self.0.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        hash
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_stable() {
        let a = JobId::from_string("job-123");
        let b = JobId::from_string("job-123");
        assert_eq!(a.seed(), b.seed());
    }

    #[test]
    fn test_seed_differs_across_ids() {
        let a = JobId::from_string("job-123");
        let b = JobId::from_string("job-124");
        assert_ne!(a.seed(), b.seed());
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(JobId::new(), JobId::new());
    }
}
