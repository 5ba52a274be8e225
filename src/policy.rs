//! Explore/exploit selection policies over the arm table.
//!
//! Both policies score the decayed per-arm estimates from [`ArmStats`] and
//! differ only in how they explore:
//!
//! - [`ExplorePolicy::EpsilonGreedy`]: with probability ε a uniformly random
//!   arm (seeded RNG, reproducible), otherwise the best estimate.
//! - [`ExplorePolicy::Ucb`]: optimism bonus `c·sqrt(ln(t)/pulls)`; any
//!   unpulled arm is taken first, in registration order, so every arm is
//!   covered before any is repeated.
//!
//! Ties are broken deterministically: lowest pull count, then registration
//! order.

use crate::{ArmStats, Error, TIEBREAK_EPS};
use rand::rngs::StdRng;
use rand::Rng;

/// How score ties between arms are resolved.
///
/// Currently only registration order is supported; the enum exists so the
/// configuration surface names the strategy explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// Lowest pull count first, then the earlier-registered arm.
    #[default]
    RegistrationOrder,
}

/// Exploration mechanism layered on the decayed estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExplorePolicy {
    /// ε-greedy: explore a uniformly random arm with probability `epsilon`.
    EpsilonGreedy {
        /// Exploration rate in `[0, 1]`.
        epsilon: f64,
    },
    /// Upper confidence bound: `estimate + c·sqrt(ln(t)/pulls)`.
    Ucb {
        /// Exploration constant, `≥ 0`.
        c: f64,
    },
}

impl Default for ExplorePolicy {
    fn default() -> Self {
        ExplorePolicy::EpsilonGreedy { epsilon: 0.1 }
    }
}

impl ExplorePolicy {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        match *self {
            ExplorePolicy::EpsilonGreedy { epsilon } => {
                if !epsilon.is_finite() || !(0.0..=1.0).contains(&epsilon) {
                    return Err(Error::Configuration(format!(
                        "epsilon must be in [0, 1], got {epsilon}"
                    )));
                }
            }
            ExplorePolicy::Ucb { c } => {
                if !c.is_finite() || c < 0.0 {
                    return Err(Error::Configuration(format!(
                        "ucb constant must be >= 0, got {c}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Pick an arm index. `rounds` is the number of completed rounds; `rng`
    /// is consumed only by ε-greedy exploration.
    ///
    /// `arms` must be non-empty (guaranteed by session construction).
    pub(crate) fn select(&self, arms: &[ArmStats], rounds: u64, rng: &mut StdRng) -> usize {
        debug_assert!(!arms.is_empty());
        match *self {
            ExplorePolicy::EpsilonGreedy { epsilon } => {
                if epsilon > 0.0 && rng.random::<f64>() < epsilon {
                    rng.random_range(0..arms.len())
                } else {
                    argmax(arms, |a| a.estimate)
                }
            }
            ExplorePolicy::Ucb { c } => {
                // Cold start: cover every arm once, in registration order.
                if let Some(idx) = arms.iter().position(|a| a.pulls == 0) {
                    return idx;
                }
                // All pulls >= 1 here, so the bonus never divides by zero;
                // rounds >= arms.len() >= 1, so ln is well defined.
                let t = (rounds.max(1)) as f64;
                argmax(arms, |a| a.estimate + c * (t.ln() / a.pulls as f64).sqrt())
            }
        }
    }
}

/// Index of the highest-scoring arm; ties within [`TIEBREAK_EPS`] go to the
/// lowest pull count, then to the earlier-registered arm.
fn argmax(arms: &[ArmStats], score: impl Fn(&ArmStats) -> f64) -> usize {
    let mut best = 0usize;
    let mut best_score = score(&arms[0]);
    for (i, a) in arms.iter().enumerate().skip(1) {
        let s = score(a);
        let tied = (s - best_score).abs() <= TIEBREAK_EPS;
        if s > best_score + TIEBREAK_EPS || (tied && a.pulls < arms[best].pulls) {
            best = i;
            best_score = s;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn arm(pulls: u64, estimate: f64) -> ArmStats {
        ArmStats {
            pulls,
            cumulative: estimate,
            estimate,
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0)
    }

    #[test]
    fn greedy_picks_the_highest_estimate_when_epsilon_is_zero() {
        let p = ExplorePolicy::EpsilonGreedy { epsilon: 0.0 };
        let arms = vec![arm(3, 0.1), arm(3, 0.9), arm(3, 0.5)];
        assert_eq!(p.select(&arms, 9, &mut rng()), 1);
    }

    #[test]
    fn greedy_breaks_ties_by_lowest_pull_count_then_order() {
        let p = ExplorePolicy::EpsilonGreedy { epsilon: 0.0 };
        let arms = vec![arm(5, 0.5), arm(2, 0.5), arm(2, 0.5)];
        assert_eq!(p.select(&arms, 9, &mut rng()), 1);

        let arms = vec![arm(2, 0.5), arm(2, 0.5)];
        assert_eq!(p.select(&arms, 4, &mut rng()), 0);
    }

    #[test]
    fn ucb_covers_every_arm_before_repeating_any() {
        let p = ExplorePolicy::Ucb { c: 2.0 };
        let mut arms = vec![ArmStats::default(); 4];
        let mut seen = Vec::new();
        for round in 0..4u64 {
            let i = p.select(&arms, round, &mut rng());
            assert!(!seen.contains(&i), "arm {i} repeated during cold start");
            seen.push(i);
            arms[i].record(0.0, 0.5);
        }
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn ucb_bonus_favors_the_less_pulled_arm_at_equal_estimates() {
        let p = ExplorePolicy::Ucb { c: 1.0 };
        let arms = vec![arm(50, 0.2), arm(2, 0.2)];
        assert_eq!(p.select(&arms, 52, &mut rng()), 1);
    }

    #[test]
    fn ucb_with_zero_constant_is_greedy() {
        let p = ExplorePolicy::Ucb { c: 0.0 };
        let arms = vec![arm(10, -0.2), arm(1, 0.4)];
        assert_eq!(p.select(&arms, 11, &mut rng()), 1);
    }

    #[test]
    fn epsilon_exploration_is_reproducible_under_a_fixed_seed() {
        let p = ExplorePolicy::EpsilonGreedy { epsilon: 0.5 };
        let arms = vec![arm(3, 0.9), arm(3, 0.1), arm(3, 0.1)];
        let picks_a: Vec<usize> = {
            let mut r = StdRng::seed_from_u64(42);
            (0..50).map(|t| p.select(&arms, t, &mut r)).collect()
        };
        let picks_b: Vec<usize> = {
            let mut r = StdRng::seed_from_u64(42);
            (0..50).map(|t| p.select(&arms, t, &mut r)).collect()
        };
        assert_eq!(picks_a, picks_b);
        // With ε = 0.5 over 50 rounds, at least one pick should explore away
        // from the greedy arm.
        assert!(picks_a.iter().any(|&i| i != 0));
    }

    #[test]
    fn validation_rejects_out_of_range_parameters() {
        assert!(ExplorePolicy::EpsilonGreedy { epsilon: -0.1 }.validate().is_err());
        assert!(ExplorePolicy::EpsilonGreedy { epsilon: 1.5 }.validate().is_err());
        assert!(ExplorePolicy::EpsilonGreedy { epsilon: f64::NAN }.validate().is_err());
        assert!(ExplorePolicy::Ucb { c: -1.0 }.validate().is_err());
        assert!(ExplorePolicy::Ucb { c: 0.0 }.validate().is_ok());
        assert!(ExplorePolicy::EpsilonGreedy { epsilon: 0.0 }.validate().is_ok());
    }
}
