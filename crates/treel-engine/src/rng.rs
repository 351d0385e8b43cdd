//! Seeded random choices for presentation metadata.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use treel_models::{AudioCue, JobId, Transition};

/// Explicit seeded generator for the engine's stochastic choices.
///
/// One instance per personalization request, seeded from the job id, so a
/// given input replays byte-identically. The generator is always passed in
/// by the caller; nothing in the engine reaches for ambient randomness.
#[derive(Debug)]
pub struct ReelRng {
    inner: StdRng,
}

impl ReelRng {
    /// Create from a raw seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Create from a job id.
    pub fn from_job(job_id: &JobId) -> Self {
        Self::from_seed(job_id.seed())
    }

    /// Draw the next transition.
    pub fn transition(&mut self) -> Transition {
        let idx = self.inner.random_range(0..Transition::ALL.len());
        Transition::ALL[idx]
    }

    /// Draw the next audio cue.
    pub fn audio_cue(&mut self) -> AudioCue {
        let idx = self.inner.random_range(0..AudioCue::ALL.len());
        AudioCue::ALL[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = ReelRng::from_seed(42);
        let mut b = ReelRng::from_seed(42);
        for _ in 0..32 {
            assert_eq!(a.transition(), b.transition());
            assert_eq!(a.audio_cue(), b.audio_cue());
        }
    }

    #[test]
    fn test_job_id_seeding_is_stable() {
        let job = JobId::from_string("job-abc");
        let mut a = ReelRng::from_job(&job);
        let mut b = ReelRng::from_job(&JobId::from_string("job-abc"));
        for _ in 0..8 {
            assert_eq!(a.audio_cue(), b.audio_cue());
        }
    }

    #[test]
    fn test_draws_stay_in_enum_range() {
        let mut rng = ReelRng::from_seed(7);
        for _ in 0..64 {
            // Draw both; the index arithmetic guarantees a valid variant,
            // this just exercises the paths.
            let _ = rng.transition();
            let _ = rng.audio_cue();
        }
    }
}
