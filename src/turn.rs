//! Turn resources and turn order
//!
//! - [`TurnContext`]: per-combatant action economy within one turn
//! - [`TurnManager`]: initiative rolling, sorted turn order, circular
//!   cycling with round-boundary detection
//!
//! Initiative values live in the manager's own table for the encounter,
//! never on the combatants themselves.

use thiserror::Error;
use tracing::debug;

use crate::dice::Roller;

/// Errors from turn resources and turn advancement
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("action already used this turn")]
    ActionAlreadyUsed,

    #[error("bonus action already used this turn")]
    BonusActionAlreadyUsed,

    #[error("reaction already used this turn")]
    ReactionAlreadyUsed,

    #[error("no combatants in turn order")]
    NoCombatants,
}

/// Per-turn resource counters for one combatant.
///
/// Spending a resource twice in a turn is a caller bug, not a game rule
/// outcome, so the use_* methods fail loudly instead of ignoring it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnContext {
    action_used: bool,
    bonus_action_used: bool,
    reaction_used: bool,
    movement_used: u32,
}

impl TurnContext {
    /// Fresh context with nothing spent
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset at the start of the owner's turn
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Spend the turn's single action
    pub fn use_action(&mut self) -> Result<(), TurnError> {
        if self.action_used {
            return Err(TurnError::ActionAlreadyUsed);
        }
        self.action_used = true;
        Ok(())
    }

    /// Spend the turn's single bonus action
    pub fn use_bonus_action(&mut self) -> Result<(), TurnError> {
        if self.bonus_action_used {
            return Err(TurnError::BonusActionAlreadyUsed);
        }
        self.bonus_action_used = true;
        Ok(())
    }

    /// Spend the turn's single reaction
    pub fn use_reaction(&mut self) -> Result<(), TurnError> {
        if self.reaction_used {
            return Err(TurnError::ReactionAlreadyUsed);
        }
        self.reaction_used = true;
        Ok(())
    }

    /// Record movement in feet
    pub fn use_movement(&mut self, feet: u32) {
        self.movement_used += feet;
    }

    /// Whether the action is still available
    pub fn action_available(&self) -> bool {
        !self.action_used
    }

    /// Movement spent so far this turn
    pub fn movement_used(&self) -> u32 {
        self.movement_used
    }
}

/// Turn-manager lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnPhase {
    /// No initiative rolled yet
    #[default]
    Idle,
    /// Initiative rolled and sorted, no turn served yet
    InitiativeRolled,
    /// Serving turns
    Cycling,
}

/// One sorted initiative entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitiativeEntry {
    /// Caller-side combatant id (index into the encounter's roster)
    pub combatant: usize,
    /// d20 + dexterity modifier
    pub initiative: i32,
    /// Dexterity modifier, kept for tie-breaking
    pub dex_modifier: i32,
}

/// The combatant served by [`TurnManager::next_turn`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextTurn {
    /// Combatant id whose turn it is
    pub combatant: usize,
    /// True when this turn starts a new round (the cycle wrapped to the
    /// top of the order)
    pub new_round: bool,
}

/// Rolls initiative and cycles turn order
#[derive(Debug, Clone, Default)]
pub struct TurnManager {
    phase: TurnPhase,
    order: Vec<InitiativeEntry>,
    cursor: usize,
}

impl TurnManager {
    /// Create an idle manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Roll initiative for each (id, dexterity modifier) pair and sort
    /// descending by (initiative, dexterity modifier)
    pub fn roll_initiative(&mut self, combatants: &[(usize, i32)], roller: &mut dyn Roller) {
        self.order = combatants
            .iter()
            .map(|&(combatant, dex_modifier)| InitiativeEntry {
                combatant,
                initiative: roller.roll(20) as i32 + dex_modifier,
                dex_modifier,
            })
            .collect();
        self.order
            .sort_by(|a, b| (b.initiative, b.dex_modifier).cmp(&(a.initiative, a.dex_modifier)));
        self.cursor = 0;
        self.phase = TurnPhase::InitiativeRolled;

        for entry in &self.order {
            debug!(
                combatant = entry.combatant,
                initiative = entry.initiative,
                "initiative rolled"
            );
        }
    }

    /// Sorted initiative order
    pub fn order(&self) -> &[InitiativeEntry] {
        &self.order
    }

    /// The combatant that won initiative
    pub fn initiative_winner(&self) -> Option<usize> {
        self.order.first().map(|e| e.combatant)
    }

    /// Serve the next turn, cycling circularly through the sorted order
    pub fn next_turn(&mut self) -> Result<NextTurn, TurnError> {
        if self.order.is_empty() {
            return Err(TurnError::NoCombatants);
        }
        let new_round = self.cursor == 0;
        let entry = self.order[self.cursor];
        self.cursor = (self.cursor + 1) % self.order.len();
        self.phase = TurnPhase::Cycling;
        Ok(NextTurn {
            combatant: entry.combatant,
            new_round,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRoller;

    #[test]
    fn test_turn_context_resources() {
        let mut turn = TurnContext::new();

        assert!(turn.use_action().is_ok());
        assert_eq!(turn.use_action(), Err(TurnError::ActionAlreadyUsed));

        assert!(turn.use_bonus_action().is_ok());
        assert_eq!(
            turn.use_bonus_action(),
            Err(TurnError::BonusActionAlreadyUsed)
        );

        assert!(turn.use_reaction().is_ok());
        assert_eq!(turn.use_reaction(), Err(TurnError::ReactionAlreadyUsed));

        turn.use_movement(20);
        turn.use_movement(10);
        assert_eq!(turn.movement_used(), 30);

        turn.reset();
        assert!(turn.action_available());
        assert!(turn.use_action().is_ok());
        assert_eq!(turn.movement_used(), 0);
    }

    #[test]
    fn test_initiative_sort_descending() {
        let mut manager = TurnManager::new();
        // Combatant 0 rolls 5, combatant 1 rolls 18
        let mut roller = ScriptedRoller::new([5, 18]);
        manager.roll_initiative(&[(0, 1), (1, 2)], &mut roller);

        let order: Vec<usize> = manager.order().iter().map(|e| e.combatant).collect();
        assert_eq!(order, vec![1, 0]);
        assert_eq!(manager.order()[0].initiative, 20);
        assert_eq!(manager.order()[1].initiative, 6);
        assert_eq!(manager.initiative_winner(), Some(1));
    }

    #[test]
    fn test_initiative_tie_broken_by_dex() {
        let mut manager = TurnManager::new();
        // Both total 10: combatant 0 rolls 10 with +0 dex, combatant 1
        // rolls 9 with +1 dex
        let mut roller = ScriptedRoller::new([10, 9]);
        manager.roll_initiative(&[(0, 0), (1, 1)], &mut roller);

        let order: Vec<usize> = manager.order().iter().map(|e| e.combatant).collect();
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_next_turn_cycles_and_detects_rounds() {
        let mut manager = TurnManager::new();
        let mut roller = ScriptedRoller::new([20, 10, 5]);
        manager.roll_initiative(&[(0, 0), (1, 0), (2, 0)], &mut roller);
        assert_eq!(manager.phase(), TurnPhase::InitiativeRolled);

        let first = manager.next_turn().unwrap();
        assert_eq!(first.combatant, 0);
        assert!(first.new_round);
        assert_eq!(manager.phase(), TurnPhase::Cycling);

        assert!(!manager.next_turn().unwrap().new_round);
        assert!(!manager.next_turn().unwrap().new_round);

        // Cycle wraps back to the top
        let wrapped = manager.next_turn().unwrap();
        assert_eq!(wrapped.combatant, 0);
        assert!(wrapped.new_round);
    }

    #[test]
    fn test_next_turn_without_combatants() {
        let mut manager = TurnManager::new();
        assert_eq!(manager.next_turn(), Err(TurnError::NoCombatants));

        let mut roller = ScriptedRoller::new([]);
        manager.roll_initiative(&[], &mut roller);
        assert_eq!(manager.next_turn(), Err(TurnError::NoCombatants));
    }
}
