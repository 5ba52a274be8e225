//! `counterplay`: bandit-routed move prediction for iterated cyclic games.
//!
//! Built for adversarial guessing games with a small fixed move alphabet
//! (canonically rock/paper/scissors): you keep a pool of specialized
//! predictors ("agents" — frequency counters, Markov models, mirrors,
//! anything behind the [`Agent`] trait), and a bandit controller routes trust
//! among them round by round, rewarding whichever agent's prediction was
//! played and decaying old evidence so the pool tracks an opponent who
//! changes strategy or adapts to being predicted.
//!
//! **Goals:**
//! - **Deterministic by default**: one seeded RNG per session; same seed +
//!   same opponent moves → same selections and same final statistics.
//! - **Non-stationarity friendly**: recency-weighted (exponentially decayed)
//!   reward estimates, not lifetime averages, plus an optional entropy-based
//!   shift monitor that restarts learning when the opponent goes random.
//! - **Small K**: designed for a handful of agents, not hundreds.
//! - **Capability boundary**: the controller sees only agent predictions and
//!   the rewards they earn; agent internals are never inspected, and a
//!   misbehaving agent is substituted-and-logged rather than fatal.
//!
//! **Selection policies** (see [`ExplorePolicy`]):
//! - ε-greedy: uniformly random exploration at rate ε, otherwise the best
//!   decayed estimate.
//! - UCB: optimism bonus `c·sqrt(ln(t)/pulls)` with guaranteed initial
//!   coverage of every arm.
//!
//! Both break ties deterministically (lowest pull count, then registration
//! order), so runs are reproducible.
//!
//! # Example
//!
//! ```rust
//! use counterplay::{
//!     Agent, FrequencyAgent, Hand, MarkovAgent, MirrorAgent, Outcome, Session, SessionConfig,
//! };
//!
//! let agents: Vec<(String, Box<dyn Agent<Hand>>)> = vec![
//!     ("frequency".into(), Box::new(FrequencyAgent::new())),
//!     ("markov".into(), Box::new(MarkovAgent::new())),
//!     ("mirror".into(), Box::new(MirrorAgent::new())),
//! ];
//! let mut session = Session::start(agents, SessionConfig::default()).unwrap();
//!
//! // Each round:
//! let played = session.select_move().unwrap();
//! // ... show `played`, learn what the opponent did ...
//! let record = session.record_outcome(Hand::Rock).unwrap();
//! // Every reference agent cold-starts on rock, so the counter wins here.
//! assert_eq!(record.outcome, Outcome::Win);
//!
//! let summary = session.end();
//! assert_eq!(summary.rounds, 1);
//! ```
//!
//! **Non-goals:** no game harness or UI, no persistence, no multi-session
//! learning transfer, no dynamic agent add/remove mid-session.

#![forbid(unsafe_code)]

/// Epsilon used for floating-point tie-breaking in selection scoring.
///
/// Avoids exact equality comparisons on f64 scores so the deterministic
/// tie-break chain (pull count, then registration order) applies uniformly.
const TIEBREAK_EPS: f64 = 1e-12;

mod error;
pub use error::*;

mod game;
pub use game::*;

mod history;
pub use history::*;

mod agent;
pub use agent::*;

mod reward;
pub use reward::*;

mod arm;
pub use arm::*;

mod policy;
pub use policy::*;

mod monitor;
pub use monitor::{entropy_bits, ShiftConfig};

mod session;
pub use session::*;
