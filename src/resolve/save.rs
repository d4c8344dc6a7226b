//! Save resolution
//!
//! The defender rolls d20 + save modifier against the attack's DC. Damage
//! is rolled once; a successful save takes half or nothing depending on
//! the attack, and the defender's damage-taken hook gets the final word.

use tracing::debug;

use crate::attack::{Attack, SaveDc};
use crate::combatant::Combatant;
use crate::dice::Roller;
use crate::feature::{self, SaveContext};
use crate::statblock::Ability;

/// One resolved saving throw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveResolution {
    /// Difficulty class the defender rolled against
    pub dc: i32,
    /// Natural d20 result
    pub natural: u32,
    /// Natural roll plus the defender's save modifier and feature deltas
    pub total: i32,
    /// Whether the defender's save succeeded
    pub succeeded: bool,
    /// Full damage rolled before the save outcome was applied
    pub rolled_damage: i32,
    /// Damage roll log
    pub damage_rolls: Vec<u32>,
    /// Damage to apply after the half rule and the damage-taken hook
    pub damage: i32,
}

/// Resolve a save attack against the defender
pub fn resolve_save(
    attacker: &Combatant,
    defender: &Combatant,
    attack: &Attack,
    save_ability: Ability,
    dc: SaveDc,
    half_on_success: bool,
    roller: &mut dyn Roller,
) -> SaveResolution {
    let dc = match dc {
        SaveDc::Fixed(value) => value,
        SaveDc::Stat(ability) => {
            8 + attacker.statblock.proficiency_bonus()
                + attacker.statblock.ability_modifier(ability)
        }
    };

    let ctx = SaveContext {
        attack,
        save_ability,
    };

    let natural = roller.roll(20);
    let base_modifier = defender.statblock.save_modifier(save_ability);
    let modifier = feature::save_roll_modifier(defender.features(), base_modifier, &ctx);
    let total = natural as i32 + modifier;
    let succeeded = total >= dc;

    // Damage is rolled once regardless of the outcome
    let outcome = attack
        .damage_dice_for(attacker.statblock.level)
        .roll(roller);
    let rolled_damage = outcome.total;

    // Base rule first, then the defender's feature override
    let base_damage = if succeeded {
        if half_on_success {
            rolled_damage / 2
        } else {
            0
        }
    } else {
        rolled_damage
    };
    let damage = feature::damage_taken(defender.features(), base_damage, succeeded, &ctx);

    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        attack = %attack.name,
        dc,
        total,
        succeeded,
        rolled_damage,
        damage,
        "saving throw"
    );

    SaveResolution {
        dc,
        natural,
        total,
        succeeded,
        rolled_damage,
        damage_rolls: outcome.rolls,
        damage,
    }
}
