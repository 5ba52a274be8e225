//! Error taxonomy.
//!
//! Three distinct, inspectable failure modes; nothing is silently swallowed.
//! Agent misbehavior is deliberately **not** an error: an out-of-alphabet
//! prediction is substituted with the alphabet default and logged as a
//! collaborator fault, never failing the session.

/// Errors surfaced by the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Invalid session setup (empty registry, out-of-range parameter).
    /// Fatal: the session is never constructed.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Operation invoked in the wrong session phase. A contract violation by
    /// the caller; repeat calls fail the same way.
    #[error("{op} called while {phase}")]
    Protocol {
        /// The operation that was attempted.
        op: &'static str,
        /// The phase the session was in.
        phase: &'static str,
    },

    /// Opponent move outside the declared alphabet. Recoverable: the call
    /// mutates nothing and may be retried with a corrected move.
    #[error("move outside the declared alphabet")]
    InvalidMove,
}
