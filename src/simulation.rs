//! Bulk Monte-Carlo trials
//!
//! Runs many independent duels and tallies who won. Each trial gets a
//! freshly built entity graph from the caller's factory; a combat instance
//! is single-use, so entities can never bleed damage or conditions into a
//! later trial. Timed-out trials are recorded as stalemates and the batch
//! keeps going.

use std::collections::HashMap;
use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::combat::{CombatError, Duel};
use crate::combatant::Combatant;
use crate::dice::RandomRoller;

/// Batch settings, loadable from a TOML file and SKIRMISH_* env vars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of independent trials
    pub trials: u32,
    /// Round-limit circuit breaker per trial
    pub max_rounds: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            max_rounds: 50,
        }
    }
}

impl SimConfig {
    /// Load settings: defaults, then the optional TOML file, then
    /// SKIRMISH_-prefixed environment variables
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(SimConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        let config = figment.merge(Env::prefixed("SKIRMISH_")).extract()?;
        Ok(config)
    }
}

/// Aggregated outcome of a batch of duels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Wins per combatant name
    pub wins: HashMap<String, u32>,
    /// Trials that hit the round limit
    pub stalemates: u32,
    /// Trials run
    pub trials: u32,
}

impl BatchOutcome {
    /// Wins recorded for a name
    pub fn wins_for(&self, name: &str) -> u32 {
        self.wins.get(name).copied().unwrap_or(0)
    }

    /// Win rate for a name over all trials, including stalemates
    pub fn win_rate(&self, name: &str) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        f64::from(self.wins_for(name)) / f64::from(self.trials)
    }
}

/// Run a batch of independent duels.
///
/// The factory must build a fresh pair of combatants for every trial.
/// Round-limit trips are counted as stalemates; any other combat error is
/// a caller bug and propagates immediately.
pub fn run_duels<F>(config: &SimConfig, mut factory: F) -> Result<BatchOutcome, CombatError>
where
    F: FnMut() -> (Combatant, Combatant),
{
    let mut outcome = BatchOutcome::default();
    let mut roller = RandomRoller::new();

    for trial in 0..config.trials {
        let (a, b) = factory();
        let mut duel = Duel::new(a, b).with_max_rounds(config.max_rounds);

        match duel.run(&mut roller) {
            Ok(summary) => {
                *outcome.wins.entry(summary.winner).or_insert(0) += 1;
            }
            Err(CombatError::RoundLimit { rounds }) => {
                warn!(trial, rounds, "trial stalemated at the round limit");
                outcome.stalemates += 1;
            }
            Err(err) => return Err(err),
        }
        outcome.trials += 1;
    }

    info!(
        trials = outcome.trials,
        stalemates = outcome.stalemates,
        "batch finished"
    );
    Ok(outcome)
}
