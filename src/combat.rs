//! Combat state machines
//!
//! Drives the round loop until one side is defeated or the round limit
//! trips:
//! - [`Duel`]: two combatants, one attack per living combatant per turn
//! - [`TeamCombat`]: any number of opposing teams, targets picked
//!   uniformly at random among living enemies
//!
//! Both consume their combatants by value: a combat instance is
//! single-use, and every independent trial needs freshly built entities.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use tracing::{info, warn};

use crate::combatant::{Combatant, Team};
use crate::dice::Roller;
use crate::event::{CombatEvent, EventBus, Observer, ResultHandler};
use crate::feature::AttackOptions;
use crate::resolve::{resolve_attack, AttackError, AttackResult};
use crate::statblock::Ability;
use crate::turn::{TurnError, TurnManager};

/// Round limit applied when the caller does not configure one
pub const DEFAULT_MAX_ROUNDS: u32 = 50;

/// Combat lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    /// Constructed but not started
    NotStarted,
    /// Round loop in progress
    Running,
    /// Finished with a decided outcome
    Over,
    /// Killed by the round-limit circuit breaker
    TimedOut,
}

/// Errors from combat execution and outcome queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error(transparent)]
    Attack(#[from] AttackError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("combat has not produced a winner yet")]
    Undecided,

    #[error("no side survived")]
    NoSurvivors,

    #[error("combat exceeded {rounds} rounds without a result")]
    RoundLimit {
        /// Round counter at the moment the limit tripped
        rounds: u32,
    },
}

/// Outcome of a finished combat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatSummary {
    /// Winning combatant or team name
    pub winner: String,
    /// Whoever won initiative
    pub initiative_winner: String,
    /// Rounds fought
    pub rounds: u32,
}

fn pair_mut(combatants: &mut [Combatant], a: usize, b: usize) -> (&mut Combatant, &mut Combatant) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = combatants.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = combatants.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// Single-pair combat
pub struct Duel {
    combatants: [Combatant; 2],
    turn: TurnManager,
    phase: CombatPhase,
    round: u32,
    max_rounds: u32,
    events: EventBus,
    result_handler: Option<Rc<RefCell<dyn ResultHandler>>>,
}

impl Duel {
    /// Create a duel between two freshly built combatants
    pub fn new(a: Combatant, b: Combatant) -> Self {
        Self {
            combatants: [a, b],
            turn: TurnManager::new(),
            phase: CombatPhase::NotStarted,
            round: 0,
            max_rounds: DEFAULT_MAX_ROUNDS,
            events: EventBus::new(),
            result_handler: None,
        }
    }

    /// Set the round-limit circuit breaker
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Register a lifecycle-event observer
    pub fn subscribe(&mut self, observer: Rc<RefCell<dyn Observer>>) {
        self.events.subscribe(observer);
    }

    /// Register the single-shot end-of-combat handler
    pub fn set_result_handler(&mut self, handler: Rc<RefCell<dyn ResultHandler>>) {
        self.result_handler = Some(handler);
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    /// Current round counter
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Both combatants, in construction order
    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    /// Whether at least one side is down
    pub fn is_over(&self) -> bool {
        self.combatants.iter().any(|c| !c.is_alive())
    }

    /// The winner's name, or a distinct error when the outcome is not
    /// decided or nobody survived
    pub fn winner(&self) -> Result<&str, CombatError> {
        let alive: Vec<&Combatant> = self.combatants.iter().filter(|c| c.is_alive()).collect();
        match alive.len() {
            0 => Err(CombatError::NoSurvivors),
            1 if self.is_over() => Ok(&alive[0].name),
            _ => Err(CombatError::Undecided),
        }
    }

    fn start(&mut self, roller: &mut dyn Roller) {
        let entries: Vec<(usize, i32)> = self
            .combatants
            .iter()
            .enumerate()
            .map(|(i, c)| (i, c.statblock.ability_modifier(Ability::Dexterity)))
            .collect();
        self.turn.roll_initiative(&entries, roller);
        self.phase = CombatPhase::Running;

        let names: Vec<String> = self.combatants.iter().map(|c| c.name.clone()).collect();
        info!(combatants = ?names, "combat started");
        self.events
            .publish(&CombatEvent::CombatStart { combatants: names });
    }

    /// Advance one turn: the next combatant in order makes one attack
    /// against its opponent. Returns None when the turn produced no attack
    /// (combat already over, or the actor is down).
    pub fn step(&mut self, roller: &mut dyn Roller) -> Result<Option<AttackResult>, CombatError> {
        if self.phase == CombatPhase::NotStarted {
            self.start(roller);
        }
        if self.is_over() {
            return Ok(None);
        }

        let next = self.turn.next_turn()?;
        if next.new_round {
            if self.round >= self.max_rounds {
                self.phase = CombatPhase::TimedOut;
                warn!(rounds = self.round, "combat hit the round limit");
                return Err(CombatError::RoundLimit { rounds: self.round });
            }
            self.round += 1;
            self.events
                .publish(&CombatEvent::RoundStart { round: self.round });
        }

        let actor = next.combatant;
        if !self.combatants[actor].is_alive() {
            return Ok(None);
        }
        let target = 1 - actor;

        let Some(attack) = self.combatants[actor].primary_attack().cloned() else {
            return Ok(None);
        };

        let (attacker, defender) = pair_mut(&mut self.combatants, actor, target);
        attacker.turn.reset();
        attacker.turn.use_action()?;

        let result = resolve_attack(
            attacker,
            defender,
            &attack,
            &AttackOptions::default(),
            roller,
        )?;
        if result.is_dead {
            self.phase = CombatPhase::Over;
        }
        Ok(Some(result))
    }

    /// Run the round loop to completion.
    ///
    /// Emits the lifecycle events, invokes the result handler, and returns
    /// the summary. A round-limit trip leaves the combat in the TimedOut
    /// phase and propagates the error for the caller to record.
    pub fn run(&mut self, roller: &mut dyn Roller) -> Result<CombatSummary, CombatError> {
        while !self.is_over() {
            self.step(roller)?;
        }
        self.phase = CombatPhase::Over;

        let winner = self.winner()?.to_string();
        let initiative_winner = self
            .turn
            .initiative_winner()
            .map(|i| self.combatants[i].name.clone())
            .unwrap_or_default();
        let summary = CombatSummary {
            winner: winner.clone(),
            initiative_winner: initiative_winner.clone(),
            rounds: self.round,
        };

        info!(winner = %winner, rounds = self.round, "combat over");
        self.events.publish(&CombatEvent::CombatEnd {
            winner,
            initiative_winner,
        });
        if let Some(handler) = &self.result_handler {
            handler.borrow_mut().handle_result(&summary);
        }
        Ok(summary)
    }
}

/// Multi-team combat
pub struct TeamCombat {
    teams: Vec<Team>,
    /// Linear roster id to (team, member) index
    index: Vec<(usize, usize)>,
    turn: TurnManager,
    phase: CombatPhase,
    round: u32,
    max_rounds: u32,
    events: EventBus,
    result_handler: Option<Rc<RefCell<dyn ResultHandler>>>,
}

impl TeamCombat {
    /// Create a team combat from freshly built teams
    pub fn new(teams: Vec<Team>) -> Self {
        let mut index = Vec::new();
        for (t, team) in teams.iter().enumerate() {
            for m in 0..team.members().len() {
                index.push((t, m));
            }
        }
        Self {
            teams,
            index,
            turn: TurnManager::new(),
            phase: CombatPhase::NotStarted,
            round: 0,
            max_rounds: DEFAULT_MAX_ROUNDS,
            events: EventBus::new(),
            result_handler: None,
        }
    }

    /// Set the round-limit circuit breaker
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Register a lifecycle-event observer
    pub fn subscribe(&mut self, observer: Rc<RefCell<dyn Observer>>) {
        self.events.subscribe(observer);
    }

    /// Register the single-shot end-of-combat handler
    pub fn set_result_handler(&mut self, handler: Rc<RefCell<dyn ResultHandler>>) {
        self.result_handler = Some(handler);
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    /// Current round counter
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Teams in construction order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Whether at least one team has no living members
    pub fn is_over(&self) -> bool {
        self.teams.iter().any(|t| t.is_defeated())
    }

    /// The winning team's name, or a distinct error when undecided or
    /// when no team survived
    pub fn winner(&self) -> Result<&str, CombatError> {
        let alive: Vec<&Team> = self.teams.iter().filter(|t| !t.is_defeated()).collect();
        match alive.len() {
            0 => Err(CombatError::NoSurvivors),
            1 if self.is_over() => Ok(&alive[0].name),
            _ => Err(CombatError::Undecided),
        }
    }

    fn member(&self, id: usize) -> &Combatant {
        let (t, m) = self.index[id];
        &self.teams[t].members()[m]
    }

    fn start(&mut self, roller: &mut dyn Roller) {
        let entries: Vec<(usize, i32)> = (0..self.index.len())
            .map(|id| {
                (
                    id,
                    self.member(id).statblock.ability_modifier(Ability::Dexterity),
                )
            })
            .collect();
        self.turn.roll_initiative(&entries, roller);
        self.phase = CombatPhase::Running;

        let names: Vec<String> = (0..self.index.len())
            .map(|id| self.member(id).name.clone())
            .collect();
        info!(combatants = ?names, teams = self.teams.len(), "team combat started");
        self.events
            .publish(&CombatEvent::CombatStart { combatants: names });
    }

    /// Living enemies of the given team, as linear roster ids
    fn living_enemies(&self, team: usize) -> Vec<usize> {
        (0..self.index.len())
            .filter(|&id| self.index[id].0 != team && self.member(id).is_alive())
            .collect()
    }

    /// Advance one turn: the next living combatant attacks a uniformly
    /// random living enemy
    pub fn step(&mut self, roller: &mut dyn Roller) -> Result<Option<AttackResult>, CombatError> {
        if self.phase == CombatPhase::NotStarted {
            self.start(roller);
        }
        if self.is_over() {
            return Ok(None);
        }

        let next = self.turn.next_turn()?;
        if next.new_round {
            if self.round >= self.max_rounds {
                self.phase = CombatPhase::TimedOut;
                warn!(rounds = self.round, "team combat hit the round limit");
                return Err(CombatError::RoundLimit { rounds: self.round });
            }
            self.round += 1;
            self.events
                .publish(&CombatEvent::RoundStart { round: self.round });
        }

        let actor_id = next.combatant;
        if !self.member(actor_id).is_alive() {
            return Ok(None);
        }
        let (actor_team, actor_member) = self.index[actor_id];

        let candidates = self.living_enemies(actor_team);
        if candidates.is_empty() {
            self.phase = CombatPhase::Over;
            return Ok(None);
        }
        // Uniform pick through the roller so scripted runs stay
        // deterministic
        let pick = roller.roll(candidates.len() as u32) as usize;
        let target_id = candidates[pick.saturating_sub(1).min(candidates.len() - 1)];
        let (target_team, target_member) = self.index[target_id];

        let Some(attack) = self.member(actor_id).primary_attack().cloned() else {
            return Ok(None);
        };

        debug_assert_ne!(actor_team, target_team);
        let (attacker_team, defender_team) = if actor_team < target_team {
            let (left, right) = self.teams.split_at_mut(target_team);
            (&mut left[actor_team], &mut right[0])
        } else {
            let (left, right) = self.teams.split_at_mut(actor_team);
            (&mut right[0], &mut left[target_team])
        };
        let attacker = &mut attacker_team.members_mut()[actor_member];
        let defender = &mut defender_team.members_mut()[target_member];

        attacker.turn.reset();
        attacker.turn.use_action()?;

        let result = resolve_attack(
            attacker,
            defender,
            &attack,
            &AttackOptions::default(),
            roller,
        )?;
        if self.is_over() {
            self.phase = CombatPhase::Over;
        }
        Ok(Some(result))
    }

    /// Run the round loop to completion
    pub fn run(&mut self, roller: &mut dyn Roller) -> Result<CombatSummary, CombatError> {
        while !self.is_over() {
            self.step(roller)?;
        }
        self.phase = CombatPhase::Over;

        let winner = self.winner()?.to_string();
        let initiative_winner = self
            .turn
            .initiative_winner()
            .map(|id| self.member(id).name.clone())
            .unwrap_or_default();
        let summary = CombatSummary {
            winner: winner.clone(),
            initiative_winner: initiative_winner.clone(),
            rounds: self.round,
        };

        info!(winner = %winner, rounds = self.round, "team combat over");
        self.events.publish(&CombatEvent::CombatEnd {
            winner,
            initiative_winner,
        });
        if let Some(handler) = &self.result_handler {
            handler.borrow_mut().handle_result(&summary);
        }
        Ok(summary)
    }
}
