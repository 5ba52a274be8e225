//! Bounded round history.
//!
//! [`History`] is a ring buffer of completed rounds: append-only from the
//! session's side, read-only from the agents' side. When full, the oldest
//! record is dropped, so agents always see the most recent
//! `capacity` rounds in order.

use crate::{Move, Outcome};
use std::collections::VecDeque;

/// One completed round. Immutable once appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundRecord<M: Move> {
    /// Monotone round index, starting at 0.
    pub round: u64,
    /// The move we played.
    pub own: M,
    /// The move the opponent played.
    pub opponent: M,
    /// Outcome from our perspective.
    pub outcome: Outcome,
    /// Registration index of the agent whose prediction was trusted.
    pub agent: usize,
}

/// Ring buffer of the most recent [`RoundRecord`]s.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct History<M: Move> {
    cap: usize,
    buf: VecDeque<RoundRecord<M>>,
}

impl<M: Move> History<M> {
    /// Create an empty history with capacity `cap` (minimum 1).
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            buf: VecDeque::new(),
        }
    }

    /// Append a record, dropping the oldest when at capacity.
    pub(crate) fn push(&mut self, record: RoundRecord<M>) {
        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(record);
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether no rounds have been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Records in order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &RoundRecord<M>> {
        self.buf.iter()
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&RoundRecord<M>> {
        self.buf.back()
    }

    /// The `i`-th retained record, oldest first.
    pub fn get(&self, i: usize) -> Option<&RoundRecord<M>> {
        self.buf.get(i)
    }
}
