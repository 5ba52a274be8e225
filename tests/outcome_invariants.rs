//! Totality and antisymmetry of the outcome relation, for the canonical
//! three-move alphabet and a custom five-move one.

use counterplay::{outcome, Error, Hand, Move, Outcome};
use proptest::prelude::*;

/// A five-move cyclic alphabet: `i` beats `j` when `(i - j) mod 5` is 1 or 3.
///
/// Wrapper over `u8`, so out-of-alphabet values are representable (unlike
/// `Hand`) and the validation path is reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Penta(u8);

impl Move for Penta {
    const ALPHABET: &'static [Self] = &[Penta(0), Penta(1), Penta(2), Penta(3), Penta(4)];

    fn duel(self, opponent: Self) -> Outcome {
        match (5 + self.0 - opponent.0) % 5 {
            0 => Outcome::Tie,
            1 | 3 => Outcome::Win,
            _ => Outcome::Lose,
        }
    }

    fn counter(self) -> Self {
        Penta((self.0 + 1) % 5)
    }
}

fn hand() -> impl Strategy<Value = Hand> {
    prop_oneof![Just(Hand::Rock), Just(Hand::Paper), Just(Hand::Scissors)]
}

fn penta() -> impl Strategy<Value = Penta> {
    (0u8..5).prop_map(Penta)
}

proptest! {
    #[test]
    fn hand_outcomes_are_consistent_inverses(a in hand(), b in hand()) {
        let ab = outcome(a, b).unwrap();
        let ba = outcome(b, a).unwrap();
        prop_assert_eq!(ab, ba.invert());
        if a == b {
            prop_assert_eq!(ab, Outcome::Tie);
        } else {
            prop_assert_ne!(ab, Outcome::Tie);
        }
    }

    #[test]
    fn hand_counter_always_wins(m in hand()) {
        prop_assert_eq!(outcome(m.counter(), m).unwrap(), Outcome::Win);
    }

    #[test]
    fn penta_outcomes_are_consistent_inverses(a in penta(), b in penta()) {
        let ab = outcome(a, b).unwrap();
        let ba = outcome(b, a).unwrap();
        prop_assert_eq!(ab, ba.invert());
        if a == b {
            prop_assert_eq!(ab, Outcome::Tie);
        } else {
            prop_assert_ne!(ab, Outcome::Tie);
        }
    }

    #[test]
    fn penta_counter_always_wins(m in penta()) {
        prop_assert_eq!(outcome(m.counter(), m).unwrap(), Outcome::Win);
    }

    #[test]
    fn out_of_alphabet_penta_is_rejected(bad in 5u8.., good in penta()) {
        prop_assert_eq!(outcome(Penta(bad), good), Err(Error::InvalidMove));
        prop_assert_eq!(outcome(good, Penta(bad)), Err(Error::InvalidMove));
    }
}
