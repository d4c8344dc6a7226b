//! Attack-roll resolution
//!
//! Computes the d20 roll for a weapon attack:
//! - Base modifier from the attack's relevant stat, adjusted by features
//! - Advantage/disadvantage merged from caller options, attacker and
//!   defender conditions, and the ranged-while-adjacent rule
//! - Both flags set cancel to a single d20
//! - The selected natural roll drives both the total and crit detection

use tracing::debug;

use crate::attack::Attack;
use crate::combatant::Combatant;
use crate::dice::Roller;
use crate::feature::{self, AttackContext, AttackOptions};

/// One resolved attack roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackRoll {
    /// The natural die selected for the total and crit detection
    pub natural: u32,
    /// Raw d20 results, in roll order (one or two dice)
    pub rolls: Vec<u32>,
    /// Full modifier applied to the natural roll
    pub modifier: i32,
    /// Natural roll plus modifier
    pub total: i32,
    /// Advantage state after merging
    pub advantage: bool,
    /// Disadvantage state after merging
    pub disadvantage: bool,
    /// Natural 20
    pub critical: bool,
}

/// Merge caller options with condition-derived and proximity rules.
///
/// Returns the (advantage, disadvantage) pair before cancellation.
pub fn roll_state(
    attacker: &Combatant,
    defender: &Combatant,
    attack: &Attack,
    options: &AttackOptions,
) -> (bool, bool) {
    let melee = attack.is_melee();
    let mut advantage = options.advantage;
    let mut disadvantage = options.disadvantage;

    for condition in attacker.statblock.conditions() {
        advantage |= condition.advantage_on_attacks();
        disadvantage |= condition.disadvantage_on_attacks();
    }
    for condition in defender.statblock.conditions() {
        advantage |= condition.grants_advantage_to_attackers(melee);
        disadvantage |= condition.imposes_disadvantage_on_attackers(melee);
    }

    // Firing a ranged attack with an enemy in reach
    if !melee && options.enemy_adjacent {
        disadvantage = true;
    }

    (advantage, disadvantage)
}

/// Roll a weapon attack for the attacker against the defender
pub fn roll_attack(
    attacker: &Combatant,
    defender: &Combatant,
    attack: &Attack,
    options: &AttackOptions,
    roller: &mut dyn Roller,
) -> AttackRoll {
    let (advantage, disadvantage) = roll_state(attacker, defender, attack, options);

    let ctx = AttackContext {
        attack,
        options,
        advantage,
        disadvantage,
    };
    let base = attacker.statblock.ability_modifier(attack.relevant_stat);
    let modifier = feature::attack_roll_modifier(attacker.features(), base, &ctx);

    // Canceled flags roll a single d20, consuming exactly one result
    let rolls = if advantage == disadvantage {
        vec![roller.roll(20)]
    } else {
        vec![roller.roll(20), roller.roll(20)]
    };
    let natural = if rolls.len() == 1 {
        rolls[0]
    } else if advantage {
        *rolls.iter().max().unwrap_or(&0)
    } else {
        *rolls.iter().min().unwrap_or(&0)
    };

    let total = natural as i32 + modifier;
    let critical = natural == 20;

    debug!(
        attacker = %attacker.name,
        attack = %attack.name,
        natural,
        total,
        advantage,
        disadvantage,
        critical,
        "attack roll"
    );

    AttackRoll {
        natural,
        rolls,
        modifier,
        total,
        advantage,
        disadvantage,
        critical,
    }
}
