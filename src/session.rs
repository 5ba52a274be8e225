//! Stateful prediction session: the front door of the crate.
//!
//! A [`Session`] owns one arm per registered agent and runs the round
//! lifecycle:
//!
//! ```text
//! let played = session.select_move()?;   // trust one agent, counter its prediction
//! // ... play `played`, observe the opponent ...
//! let record = session.record_outcome(opponent)?;  // reward the arm, teach the pool
//! ```
//!
//! Exactly one round is in flight at a time. The session moves between two
//! phases — awaiting a selection, awaiting an outcome — until [`Session::end`]
//! terminates it; calls made in the wrong phase fail with
//! [`Error::Protocol`]. All stochastic behavior (ε-exploration, bluffing)
//! flows from one seeded RNG, so a fixed seed makes a whole session
//! reproducible.

use crate::monitor::ShiftMonitor;
use crate::{
    outcome, Agent, ArmStats, Error, ExplorePolicy, History, Move, Outcome, RewardShaping,
    RoundRecord, ShiftConfig, TieBreak,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Configuration
// ============================================================================

/// Full configuration for a [`Session`].
///
/// Start from [`SessionConfig::default()`] and adjust via the builder
/// methods or by setting fields directly.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Capacity of the round-history ring buffer (must be > 0).
    pub history_capacity: usize,
    /// Decay `λ ∈ (0, 1)` for the per-arm reward estimates. Larger values
    /// weight recent rounds more heavily (shorter memory).
    pub decay: f64,
    /// Explore/exploit mechanism.
    pub policy: ExplorePolicy,
    /// Tie-break strategy for equal selection scores.
    pub tie_break: TieBreak,
    /// Outcome → reward mapping.
    pub shaping: RewardShaping,
    /// Seed for the session RNG (exploration and bluffing).
    pub seed: u64,
    /// Probability in `[0, 1]` of playing a uniformly random move instead of
    /// the strict counter, to blunt counter-exploitation. `0.0` disables it.
    pub bluff_rate: f64,
    /// Strategy-shift detection. `None` disables it.
    pub shift: Option<ShiftConfig>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: 50,
            decay: 0.25,
            policy: ExplorePolicy::default(),
            tie_break: TieBreak::default(),
            shaping: RewardShaping::default(),
            seed: 0,
            bluff_rate: 0.0,
            shift: None,
        }
    }
}

impl SessionConfig {
    /// Set the selection policy.
    pub fn with_policy(mut self, policy: ExplorePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the estimate decay `λ`.
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Set the history capacity.
    pub fn with_history_capacity(mut self, cap: usize) -> Self {
        self.history_capacity = cap;
        self
    }

    /// Enable shift detection.
    pub fn with_shift(mut self, shift: ShiftConfig) -> Self {
        self.shift = Some(shift);
        self
    }

    /// Set the bluff rate.
    pub fn with_bluff_rate(mut self, rate: f64) -> Self {
        self.bluff_rate = rate;
        self
    }

    fn validate(&self) -> Result<(), Error> {
        if self.history_capacity == 0 {
            return Err(Error::Configuration(
                "history_capacity must be > 0".to_string(),
            ));
        }
        if !self.decay.is_finite() || self.decay <= 0.0 || self.decay >= 1.0 {
            return Err(Error::Configuration(format!(
                "decay must be in (0, 1), got {}",
                self.decay
            )));
        }
        if !self.bluff_rate.is_finite() || !(0.0..=1.0).contains(&self.bluff_rate) {
            return Err(Error::Configuration(format!(
                "bluff_rate must be in [0, 1], got {}",
                self.bluff_rate
            )));
        }
        self.policy.validate()?;
        self.shaping.validate()
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Final statistics for one arm, reported by [`Session::summary`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmReport {
    /// Registered agent name.
    pub name: String,
    /// Rounds this arm was trusted.
    pub pulls: u64,
    /// Sum of rewards earned while trusted.
    pub cumulative_reward: f64,
    /// Final recency-weighted estimate.
    pub estimate: f64,
}

/// Net win/lose/tie tally from the controller's perspective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tally {
    pub wins: u64,
    pub losses: u64,
    pub ties: u64,
}

impl Tally {
    /// Wins minus losses.
    pub fn net(&self) -> i64 {
        self.wins as i64 - self.losses as i64
    }
}

/// Snapshot of a session's accumulated results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSummary {
    /// Per-arm reports, in registration order.
    pub arms: Vec<ArmReport>,
    /// Completed rounds.
    pub rounds: u64,
    /// Win/lose/tie tally.
    pub tally: Tally,
    /// How many times the shift monitor reset the arm statistics.
    pub resets: u64,
}

// ============================================================================
// Session
// ============================================================================

/// What the session is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingSelection,
    AwaitingOutcome,
    Terminated,
}

impl Phase {
    fn describe(self) -> &'static str {
        match self {
            Phase::AwaitingSelection => "awaiting a selection",
            Phase::AwaitingOutcome => "awaiting an outcome",
            Phase::Terminated => "terminated",
        }
    }
}

/// The move chosen in `select_move`, held until its outcome arrives.
#[derive(Debug, Clone, Copy)]
struct Pending<M: Move> {
    agent: usize,
    played: M,
}

/// Bandit-routed prediction session over a fixed pool of agents.
///
/// Construction **is** the session start: [`Session::start`] validates the
/// registry and configuration, after which the arm set is fixed for the
/// session's lifetime. Single-threaded by design; agents only ever see a
/// shared `&History`.
pub struct Session<M: Move> {
    names: Vec<String>,
    agents: Vec<Box<dyn Agent<M>>>,
    arms: Vec<ArmStats>,
    history: History<M>,
    monitor: Option<ShiftMonitor<M>>,
    cfg: SessionConfig,
    rng: StdRng,
    phase: Phase,
    pending: Option<Pending<M>>,
    rounds: u64,
    tally: Tally,
    resets: u64,
}

impl<M: Move> std::fmt::Debug for Session<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("names", &self.names)
            .field("cfg", &self.cfg)
            .field("phase", &self.phase)
            .field("rounds", &self.rounds)
            .field("resets", &self.resets)
            .finish_non_exhaustive()
    }
}

impl<M: Move> Session<M> {
    /// Start a session over `agents` (registration order defines arm order).
    ///
    /// Fails with [`Error::Configuration`] if the registry is empty, a name
    /// is empty or duplicated, or any config parameter is out of range.
    pub fn start(
        agents: Vec<(String, Box<dyn Agent<M>>)>,
        cfg: SessionConfig,
    ) -> Result<Self, Error> {
        cfg.validate()?;
        if agents.is_empty() {
            return Err(Error::Configuration(
                "at least one agent must be registered".to_string(),
            ));
        }
        if M::ALPHABET.is_empty() {
            return Err(Error::Configuration(
                "move alphabet must be non-empty".to_string(),
            ));
        }
        let mut names = Vec::with_capacity(agents.len());
        let mut pool = Vec::with_capacity(agents.len());
        for (name, agent) in agents {
            if name.is_empty() {
                return Err(Error::Configuration("agent name must be non-empty".to_string()));
            }
            if names.contains(&name) {
                return Err(Error::Configuration(format!("duplicate agent name `{name}`")));
            }
            names.push(name);
            pool.push(agent);
        }
        let arms = vec![ArmStats::default(); pool.len()];
        Ok(Self {
            names,
            agents: pool,
            arms,
            history: History::new(cfg.history_capacity),
            monitor: cfg.shift.map(ShiftMonitor::new),
            rng: StdRng::seed_from_u64(cfg.seed),
            cfg,
            phase: Phase::AwaitingSelection,
            pending: None,
            rounds: 0,
            tally: Tally::default(),
            resets: 0,
        })
    }

    // -----------------------------------------------------------------------
    // Round lifecycle
    // -----------------------------------------------------------------------

    /// Choose this round's move.
    ///
    /// Queries every agent for a prediction of the opponent's next move,
    /// trusts one arm per the selection policy, and plays the counter to the
    /// trusted prediction (or a uniformly random move, at the configured
    /// bluff rate). Callable exactly once per round.
    pub fn select_move(&mut self) -> Result<M, Error> {
        if self.phase != Phase::AwaitingSelection {
            return Err(Error::Protocol {
                op: "select_move",
                phase: self.phase.describe(),
            });
        }

        let predictions: Vec<M> = self
            .agents
            .iter()
            .enumerate()
            .map(|(i, agent)| {
                let p = agent.predict(&self.history);
                if p.in_alphabet() {
                    p
                } else {
                    // Collaborator fault: never fail the session over a bad
                    // agent, substitute the alphabet default.
                    log::warn!(
                        "agent `{}` predicted out-of-alphabet {:?}; substituting {:?}",
                        self.names[i],
                        p,
                        M::ALPHABET[0]
                    );
                    M::ALPHABET[0]
                }
            })
            .collect();

        let chosen = self.cfg.policy.select(&self.arms, self.rounds, &mut self.rng);
        let predicted = predictions[chosen];
        let played = if self.cfg.bluff_rate > 0.0 && self.rng.random::<f64>() < self.cfg.bluff_rate
        {
            M::ALPHABET[self.rng.random_range(0..M::ALPHABET.len())]
        } else {
            predicted.counter()
        };

        self.pending = Some(Pending {
            agent: chosen,
            played,
        });
        self.phase = Phase::AwaitingOutcome;
        Ok(played)
    }

    /// Record the opponent's reply to the move returned by [`select_move`].
    ///
    /// Scores the round, rewards the trusted arm, teaches every agent the
    /// completed round, appends it to the history, and advances to the next
    /// round. An out-of-alphabet `opponent` is rejected with
    /// [`Error::InvalidMove`] without mutating anything, so the call can be
    /// retried with a corrected move.
    ///
    /// [`select_move`]: Session::select_move
    pub fn record_outcome(&mut self, opponent: M) -> Result<RoundRecord<M>, Error> {
        if self.phase != Phase::AwaitingOutcome {
            return Err(Error::Protocol {
                op: "record_outcome",
                phase: self.phase.describe(),
            });
        }
        // Validate before touching any state: a rejected round must leave the
        // session exactly as it was.
        let pending = self.pending.as_ref().copied().ok_or(Error::Protocol {
            op: "record_outcome",
            phase: "awaiting a selection",
        })?;
        let result = outcome(pending.played, opponent)?;

        let reward = self.cfg.shaping.reward(result);
        self.arms[pending.agent].record(reward, self.cfg.decay);
        match result {
            Outcome::Win => self.tally.wins += 1,
            Outcome::Lose => self.tally.losses += 1,
            Outcome::Tie => self.tally.ties += 1,
        }

        let record = RoundRecord {
            round: self.rounds,
            own: pending.played,
            opponent,
            outcome: result,
            agent: pending.agent,
        };
        for agent in &mut self.agents {
            agent.observe(&record);
        }
        self.history.push(record);

        if let Some(monitor) = &mut self.monitor {
            if monitor.observe(opponent) {
                log::debug!("shift monitor fired at round {}; resetting arm statistics", self.rounds);
                for arm in &mut self.arms {
                    arm.reset();
                }
                self.resets += 1;
            }
        }

        self.rounds += 1;
        self.pending = None;
        self.phase = Phase::AwaitingSelection;
        Ok(record)
    }

    /// Terminate the session and return the final summary.
    ///
    /// Idempotent: callable from any phase, any number of times. A round left
    /// awaiting its outcome is discarded unscored.
    pub fn end(&mut self) -> SessionSummary {
        self.phase = Phase::Terminated;
        self.pending = None;
        self.summary()
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// The retained round history.
    pub fn history(&self) -> &History<M> {
        &self.history
    }

    /// Completed rounds.
    pub fn rounds_played(&self) -> u64 {
        self.rounds
    }

    /// Registered agent names, in registration order.
    pub fn agent_names(&self) -> &[String] {
        &self.names
    }

    /// Whether [`Session::end`] has been called.
    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    /// Current accumulated results.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            arms: self
                .names
                .iter()
                .zip(&self.arms)
                .map(|(name, arm)| ArmReport {
                    name: name.clone(),
                    pulls: arm.pulls,
                    cumulative_reward: arm.cumulative,
                    estimate: arm.estimate,
                })
                .collect(),
            rounds: self.rounds,
            tally: self.tally,
            resets: self.resets,
        }
    }
}
