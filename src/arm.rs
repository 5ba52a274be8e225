//! Per-arm performance statistics with a recency-weighted estimate.
//!
//! Lifetime averages are the wrong tool against a non-stationary opponent:
//! evidence from fifty rounds ago says little about a strategy the opponent
//! switched to ten rounds ago. Each arm therefore keeps an exponentially
//! decayed running estimate with decay `λ ∈ (0, 1)` next to its raw
//! cumulative tally.

/// Statistics for one arm (one registered agent).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmStats {
    /// How many rounds this arm was trusted.
    pub pulls: u64,
    /// Sum of all rewards earned while trusted.
    pub cumulative: f64,
    /// Recency-weighted reward estimate.
    ///
    /// The first observed reward sets the estimate exactly; each later reward
    /// `r` updates it as `λ·r + (1−λ)·estimate`.
    pub estimate: f64,
}

impl ArmStats {
    /// Record a reward earned while this arm was trusted.
    ///
    /// `reward` is clamped to `[-1, 1]`; `decay` is the session-wide `λ`.
    pub(crate) fn record(&mut self, reward: f64, decay: f64) {
        let r = reward.clamp(-1.0, 1.0);
        self.cumulative += r;
        self.estimate = if self.pulls == 0 {
            r
        } else {
            decay * r + (1.0 - decay) * self.estimate
        };
        self.pulls = self.pulls.saturating_add(1);
    }

    /// Discard all learned state (used when a strategy shift is detected).
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
