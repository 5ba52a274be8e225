//! Agent capability interface and the reference predictor pool.
//!
//! An [`Agent`] guesses the **opponent's** next move from the shared history
//! (plus whatever it has learned via [`Agent::observe`]). The session never
//! inspects an agent beyond its predictions and the rewards they earn, so
//! arbitrary specialized heuristics can be registered without touching the
//! controller.
//!
//! The reference pool covers the classic exploits:
//!
//! - [`FrequencyAgent`]: punishes a biased move distribution.
//! - [`MarkovAgent`]: punishes first-order transition habits.
//! - [`MirrorAgent`]: punishes streaks (bets on repetition).
//! - [`VoteAgent`]: majority vote over a sub-pool.

use crate::{History, Move, RoundRecord};
use std::collections::HashMap;

/// A pluggable move predictor.
///
/// `predict` must return an in-alphabet move for any well-formed (possibly
/// empty) history; a deterministic cold-start default is fine. `observe` is
/// called after **every** completed round, selected or not, so agents learn
/// passively while out of favor.
pub trait Agent<M: Move> {
    /// Predict the opponent's next move.
    fn predict(&self, history: &History<M>) -> M;

    /// Learn from a completed round.
    fn observe(&mut self, record: &RoundRecord<M>);
}

fn first<M: Move>() -> M {
    M::ALPHABET[0]
}

/// Highest count wins; ties go to the earlier alphabet entry.
fn argmax_by_count<M: Move>(count_of: impl Fn(M) -> u64) -> M {
    let mut best = first::<M>();
    let mut best_count = count_of(best);
    for &m in &M::ALPHABET[1..] {
        let c = count_of(m);
        if c > best_count {
            best = m;
            best_count = c;
        }
    }
    best
}

/// Predicts the opponent's modal move so far.
#[derive(Debug, Clone, Default)]
pub struct FrequencyAgent<M: Move> {
    counts: HashMap<M, u64>,
}

impl<M: Move> FrequencyAgent<M> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}

impl<M: Move> Agent<M> for FrequencyAgent<M> {
    fn predict(&self, _history: &History<M>) -> M {
        argmax_by_count(|m| self.counts.get(&m).copied().unwrap_or(0))
    }

    fn observe(&mut self, record: &RoundRecord<M>) {
        *self.counts.entry(record.opponent).or_insert(0) += 1;
    }
}

/// First-order Markov model of the opponent's transitions.
///
/// Transition counts start at 1 (add-one smoothing), so early predictions
/// fall back to alphabet order rather than chasing a single observation.
#[derive(Debug, Clone, Default)]
pub struct MarkovAgent<M: Move> {
    transitions: HashMap<(M, M), u64>,
    last: Option<M>,
}

impl<M: Move> MarkovAgent<M> {
    pub fn new() -> Self {
        Self {
            transitions: HashMap::new(),
            last: None,
        }
    }

    fn count(&self, from: M, to: M) -> u64 {
        self.transitions.get(&(from, to)).copied().unwrap_or(1)
    }
}

impl<M: Move> Agent<M> for MarkovAgent<M> {
    fn predict(&self, _history: &History<M>) -> M {
        match self.last {
            Some(from) => argmax_by_count(|to| self.count(from, to)),
            None => first::<M>(),
        }
    }

    fn observe(&mut self, record: &RoundRecord<M>) {
        if let Some(from) = self.last {
            *self
                .transitions
                .entry((from, record.opponent))
                .or_insert(1) += 1;
        }
        self.last = Some(record.opponent);
    }
}

/// Bets the opponent repeats their last move.
#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorAgent;

impl MirrorAgent {
    pub fn new() -> Self {
        Self
    }
}

impl<M: Move> Agent<M> for MirrorAgent {
    fn predict(&self, history: &History<M>) -> M {
        history.last().map(|r| r.opponent).unwrap_or_else(first)
    }

    fn observe(&mut self, _record: &RoundRecord<M>) {}
}

/// Majority vote over a sub-pool of agents.
///
/// Votes are tallied per predicted move; ties go to the earlier alphabet
/// entry. `observe` is forwarded to every member, so the ensemble keeps
/// learning even while another arm is trusted.
pub struct VoteAgent<M: Move> {
    members: Vec<Box<dyn Agent<M>>>,
}

impl<M: Move> VoteAgent<M> {
    /// Build an ensemble over `members`. An empty ensemble predicts the
    /// alphabet default.
    pub fn new(members: Vec<Box<dyn Agent<M>>>) -> Self {
        Self { members }
    }
}

impl<M: Move> Agent<M> for VoteAgent<M> {
    fn predict(&self, history: &History<M>) -> M {
        let mut votes: HashMap<M, u64> = HashMap::new();
        for member in &self.members {
            let p = member.predict(history);
            if p.in_alphabet() {
                *votes.entry(p).or_insert(0) += 1;
            }
        }
        argmax_by_count(|m| votes.get(&m).copied().unwrap_or(0))
    }

    fn observe(&mut self, record: &RoundRecord<M>) {
        for member in &mut self.members {
            member.observe(record);
        }
    }
}
