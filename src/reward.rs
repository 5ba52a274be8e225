//! Reward accounting: outcome → scalar reward.
//!
//! Kept separate from the controller so reward shaping can change without
//! touching agents or the selection policy. Rewards are bounded to `[-1, 1]`
//! so decayed accumulation stays numerically stable over arbitrarily long
//! sessions.

use crate::{Error, Outcome};

/// Fixed mapping from round outcome to scalar reward.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardShaping {
    /// Reward for a won round.
    pub win: f64,
    /// Reward for a tied round.
    pub tie: f64,
    /// Reward for a lost round.
    pub lose: f64,
}

impl Default for RewardShaping {
    fn default() -> Self {
        Self {
            win: 1.0,
            tie: 0.0,
            lose: -1.0,
        }
    }
}

impl RewardShaping {
    /// Reward for `outcome`. Pure and total.
    pub fn reward(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Win => self.win,
            Outcome::Lose => self.lose,
            Outcome::Tie => self.tie,
        }
    }

    /// Check every value is finite and within `[-1, 1]`.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        for (name, v) in [("win", self.win), ("tie", self.tie), ("lose", self.lose)] {
            if !v.is_finite() || !(-1.0..=1.0).contains(&v) {
                return Err(Error::Configuration(format!(
                    "reward shaping `{name}` must be in [-1, 1], got {v}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shaping_is_plus_one_zero_minus_one() {
        let s = RewardShaping::default();
        assert_eq!(s.reward(Outcome::Win), 1.0);
        assert_eq!(s.reward(Outcome::Tie), 0.0);
        assert_eq!(s.reward(Outcome::Lose), -1.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn out_of_range_shaping_is_rejected() {
        let s = RewardShaping {
            win: 2.0,
            ..RewardShaping::default()
        };
        assert!(s.validate().is_err());

        let s = RewardShaping {
            lose: f64::NEG_INFINITY,
            ..RewardShaping::default()
        };
        assert!(s.validate().is_err());
    }
}
