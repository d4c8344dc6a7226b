//! Damage-roll resolution
//!
//! Base dice come from the attack (level-scaled), pass through the
//! replacing damage hook, then have their count doubled on a critical.
//! Extra damage sources are rolled independently, each with its own roll
//! log, and summed into the total.

use tracing::debug;

use crate::attack::Attack;
use crate::combatant::Combatant;
use crate::dice::{Dice, DiceOutcome, Roller};
use crate::feature::{self, AttackContext};

/// One resolved damage roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageRoll {
    /// The dice actually rolled for the base damage, after hooks and crit
    pub dice: Dice,
    /// Base damage roll log
    pub base: DiceOutcome,
    /// Extra damage roll logs, one per contributed dice spec, kept
    /// distinct from the base log
    pub extra: Vec<DiceOutcome>,
    /// Base total plus all extra totals
    pub total: i32,
    /// Whether this was critical damage
    pub critical: bool,
}

/// Roll damage for a landed attack
pub fn roll_damage(
    attacker: &Combatant,
    attack: &Attack,
    ctx: &AttackContext<'_>,
    critical: bool,
    roller: &mut dyn Roller,
) -> DamageRoll {
    let scaled = attack.damage_dice_for(attacker.statblock.level);
    let mut dice = feature::damage_dice(attacker.features(), scaled, ctx);

    // A critical doubles the dice count, never the flat modifier
    if critical {
        dice = dice.doubled();
    }

    let base = dice.roll(roller);
    let extra: Vec<DiceOutcome> = feature::extra_damage_dice(attacker.features(), ctx)
        .into_iter()
        .map(|d| d.roll(roller))
        .collect();

    let total = base.total + extra.iter().map(|e| e.total).sum::<i32>();

    debug!(
        attacker = %attacker.name,
        attack = %attack.name,
        dice = %dice,
        base = base.total,
        extra_sources = extra.len(),
        total,
        critical,
        "damage roll"
    );

    DamageRoll {
        dice,
        base,
        extra,
        total,
        critical,
    }
}
