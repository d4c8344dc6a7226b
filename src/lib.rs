//! skirmish - deterministic d20 combat resolution and balance simulation
//!
//! A turn-based combat engine for answering balance questions: build two
//! combatants (or teams), run many independent trials, and see who wins
//! more often. All randomness flows through an injectable roller, so any
//! fight can be replayed from a scripted sequence.

pub mod attack;
pub mod combat;
pub mod combatant;
pub mod condition;
pub mod dice;
pub mod event;
pub mod feature;
pub mod resolve;
pub mod simulation;
pub mod statblock;
pub mod turn;

pub use attack::{Attack, AttackKind, SaveDc};
pub use combat::{CombatError, CombatPhase, CombatSummary, Duel, TeamCombat};
pub use combatant::{Combatant, Team};
pub use condition::Condition;
pub use dice::{Dice, DiceError, RandomRoller, Roller, ScriptedRoller};
pub use event::{CombatEvent, EventBus, Observer, ResultHandler};
pub use feature::{AttackOptions, Feature};
pub use resolve::{resolve_attack, AttackError, AttackResult};
pub use simulation::{run_duels, BatchOutcome, SimConfig};
pub use statblock::{Ability, Armor, Shield, Statblock};
pub use turn::{TurnContext, TurnError, TurnManager};
