//! Strategy-shift detection over the opponent's recent play.
//!
//! When the opponent's recent moves look uniformly random for long enough,
//! whatever the arms have learned is stale: either the opponent switched
//! strategies or they noticed they were being predicted. The monitor tracks
//! the Shannon entropy of a sliding window of opponent moves and fires once
//! the entropy stays above a threshold for `patience` consecutive full
//! windows' worth of checks. The session responds by resetting every arm's
//! statistics so the bandit re-learns from scratch.
//!
//! Disabled by default; see [`SessionConfig::with_shift`].
//!
//! [`SessionConfig::with_shift`]: crate::SessionConfig::with_shift

use crate::Move;
use std::collections::VecDeque;

/// Configuration for the shift monitor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftConfig {
    /// Number of recent opponent moves considered (minimum 2).
    pub window: usize,
    /// Entropy threshold in bits. For a 3-move alphabet the maximum is
    /// `log2(3) ≈ 1.585`, so the default of 1.5 means "close to uniform".
    pub threshold_bits: f64,
    /// Consecutive above-threshold checks required before firing.
    pub patience: u32,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self {
            window: 10,
            threshold_bits: 1.5,
            patience: 3,
        }
    }
}

/// Windowed entropy detector. Fires at most once per accumulation cycle.
#[derive(Debug, Clone)]
pub(crate) struct ShiftMonitor<M: Move> {
    cfg: ShiftConfig,
    recent: VecDeque<M>,
    streak: u32,
}

impl<M: Move> ShiftMonitor<M> {
    pub(crate) fn new(cfg: ShiftConfig) -> Self {
        Self {
            cfg,
            recent: VecDeque::new(),
            streak: 0,
        }
    }

    /// Record an opponent move; returns `true` when the monitor fires.
    ///
    /// On fire the window and streak are cleared, so the next firing requires
    /// a full re-accumulation.
    pub(crate) fn observe(&mut self, opponent: M) -> bool {
        let window = self.cfg.window.max(2);
        if self.recent.len() == window {
            self.recent.pop_front();
        }
        self.recent.push_back(opponent);
        if self.recent.len() < window {
            return false;
        }

        if entropy_bits::<M>(self.recent.iter().copied()) > self.cfg.threshold_bits {
            self.streak += 1;
        } else {
            self.streak = 0;
        }

        if self.streak >= self.cfg.patience.max(1) {
            self.recent.clear();
            self.streak = 0;
            return true;
        }
        false
    }
}

/// Shannon entropy, in bits, of a move sample.
pub fn entropy_bits<M: Move>(moves: impl Iterator<Item = M>) -> f64 {
    let mut counts = vec![0u64; M::ALPHABET.len()];
    let mut total = 0u64;
    for m in moves {
        if let Some(i) = m.index() {
            counts[i] += 1;
            total += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    -counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            p * p.log2()
        })
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Hand;

    #[test]
    fn entropy_of_a_constant_sample_is_zero() {
        let e = entropy_bits([Hand::Rock; 10].into_iter());
        assert!(e.abs() < 1e-12);
    }

    #[test]
    fn entropy_of_a_uniform_sample_is_log2_of_the_alphabet() {
        let sample = [Hand::Rock, Hand::Paper, Hand::Scissors].repeat(4);
        let e = entropy_bits(sample.into_iter());
        assert!((e - 3f64.log2()).abs() < 1e-9, "{e}");
    }

    #[test]
    fn entropy_of_an_empty_sample_is_zero() {
        let e = entropy_bits(std::iter::empty::<Hand>());
        assert_eq!(e, 0.0);
    }

    #[test]
    fn monitor_stays_quiet_on_predictable_play() {
        let mut m = ShiftMonitor::<Hand>::new(ShiftConfig::default());
        for _ in 0..100 {
            assert!(!m.observe(Hand::Rock));
        }
    }

    #[test]
    fn monitor_fires_after_sustained_high_entropy() {
        let cfg = ShiftConfig {
            window: 6,
            threshold_bits: 1.5,
            patience: 3,
        };
        let mut m = ShiftMonitor::<Hand>::new(cfg);
        let uniform = [Hand::Rock, Hand::Paper, Hand::Scissors];
        let mut fired = 0;
        let mut first_fire_at = None;
        for i in 0..30 {
            if m.observe(uniform[i % 3]) {
                fired += 1;
                first_fire_at.get_or_insert(i);
            }
        }
        // Window fills at move 6, then 3 consecutive high-entropy checks.
        assert_eq!(first_fire_at, Some(7));
        // After firing, the window must re-fill before the next firing.
        assert!(fired >= 2, "expected repeated firings, got {fired}");
    }

    #[test]
    fn a_low_entropy_stretch_resets_the_streak() {
        let cfg = ShiftConfig {
            window: 3,
            threshold_bits: 1.5,
            patience: 3,
        };
        let mut m = ShiftMonitor::<Hand>::new(cfg);
        // Two high-entropy checks, then collapse to constant play.
        for mv in [
            Hand::Rock,
            Hand::Paper,
            Hand::Scissors, // window full, entropy log2(3) > 1.5: streak 1
            Hand::Rock,     // P,S,R: streak 2
            Hand::Rock,     // S,R,R: entropy ~0.92: streak resets
            Hand::Paper,
            Hand::Scissors, // R,P,S again: streak 1
        ] {
            assert!(!m.observe(mv));
        }
    }
}
