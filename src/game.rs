//! Move alphabet and outcome relation.
//!
//! A [`Move`] is an element of a small finite alphabet with a cyclic
//! dominance relation (every pair of distinct moves has exactly one winner).
//! The canonical alphabet is [`Hand`] (rock/paper/scissors); custom alphabets
//! only need to implement the trait and keep the relation consistent.

use crate::Error;
use std::fmt::Debug;
use std::hash::Hash;

/// Result of one round, from the controller's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

impl Outcome {
    /// The same round seen from the opponent's side.
    pub fn invert(self) -> Self {
        match self {
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
            Outcome::Tie => Outcome::Tie,
        }
    }
}

/// A move in a small finite alphabet with pairwise dominance.
///
/// Implementations must keep the relation total and antisymmetric:
///
/// - `a.duel(a) == Tie` for every `a`;
/// - for distinct `a`, `b`, exactly one of `a.duel(b) == Win` and
///   `b.duel(a) == Win` holds (and `a.duel(b) == b.duel(a).invert()`);
/// - `m.counter().duel(m) == Win` — `counter` names a preferred best
///   response, not necessarily the only one for alphabets larger than three.
///
/// `ALPHABET` is the complete set of legal values in a stable order; the
/// controller uses that order for deterministic tie-breaking and as the safe
/// default when a collaborator misbehaves.
pub trait Move: Copy + Eq + Hash + Debug + 'static {
    /// Every legal move, in a stable order.
    const ALPHABET: &'static [Self];

    /// Outcome of playing `self` against `opponent`.
    fn duel(self, opponent: Self) -> Outcome;

    /// A move that beats `self`.
    fn counter(self) -> Self;

    /// Whether `self` is a member of the declared alphabet.
    ///
    /// Trivially true for closed enums like [`Hand`]; meaningful for wrapper
    /// types whose representable values exceed the alphabet.
    fn in_alphabet(self) -> bool {
        Self::ALPHABET.contains(&self)
    }

    /// Position of `self` within the alphabet.
    fn index(self) -> Option<usize> {
        Self::ALPHABET.iter().position(|m| *m == self)
    }
}

/// Validated outcome of `own` vs `opponent`.
///
/// Rejects out-of-alphabet input with [`Error::InvalidMove`]; otherwise pure
/// and total.
pub fn outcome<M: Move>(own: M, opponent: M) -> Result<Outcome, Error> {
    if !own.in_alphabet() || !opponent.in_alphabet() {
        return Err(Error::InvalidMove);
    }
    Ok(own.duel(opponent))
}

/// The canonical rock/paper/scissors alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
}

impl Move for Hand {
    const ALPHABET: &'static [Self] = &[Hand::Rock, Hand::Paper, Hand::Scissors];

    fn duel(self, opponent: Self) -> Outcome {
        if self == opponent {
            Outcome::Tie
        } else if self == opponent.counter() {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }

    fn counter(self) -> Self {
        match self {
            Hand::Rock => Hand::Paper,
            Hand::Paper => Hand::Scissors,
            Hand::Scissors => Hand::Rock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pair_has_exactly_one_winner_or_is_a_tie() {
        for &a in Hand::ALPHABET {
            for &b in Hand::ALPHABET {
                let ab = a.duel(b);
                let ba = b.duel(a);
                assert_eq!(ab, ba.invert(), "{:?} vs {:?}", a, b);
                if a == b {
                    assert_eq!(ab, Outcome::Tie);
                } else {
                    assert_ne!(ab, Outcome::Tie, "{:?} vs {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn counter_beats_its_target() {
        for &m in Hand::ALPHABET {
            assert_eq!(m.counter().duel(m), Outcome::Win);
        }
    }

    #[test]
    fn outcome_matches_the_classic_table() {
        assert_eq!(outcome(Hand::Rock, Hand::Scissors).unwrap(), Outcome::Win);
        assert_eq!(outcome(Hand::Paper, Hand::Rock).unwrap(), Outcome::Win);
        assert_eq!(outcome(Hand::Scissors, Hand::Paper).unwrap(), Outcome::Win);
        assert_eq!(outcome(Hand::Rock, Hand::Paper).unwrap(), Outcome::Lose);
        assert_eq!(outcome(Hand::Rock, Hand::Rock).unwrap(), Outcome::Tie);
    }

    #[test]
    fn hand_alphabet_membership_is_total() {
        for &m in Hand::ALPHABET {
            assert!(m.in_alphabet());
            assert_eq!(Hand::ALPHABET[m.index().unwrap()], m);
        }
    }
}
