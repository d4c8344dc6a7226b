//! Power-attack feats
//!
//! Great Weapon Master and Sharpshooter share the same trade: when the
//! caller's power-attack flag is on, take -5 on the attack roll for +10 on
//! the damage. Each applies only to its own weapon class.

use crate::dice::Dice;

use super::{AttackContext, Feature};

const POWER_ATTACK_ROLL_PENALTY: i32 = -5;
const POWER_ATTACK_DAMAGE_BONUS: i32 = 10;

/// Great Weapon Master: -5 to hit / +10 damage on melee attacks when the
/// power-attack flag is set
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatWeaponMaster;

impl GreatWeaponMaster {
    /// Create the feat
    pub fn new() -> Self {
        Self
    }

    fn applies(ctx: &AttackContext<'_>) -> bool {
        ctx.options.power_attack && ctx.attack.is_melee()
    }
}

impl Feature for GreatWeaponMaster {
    fn name(&self) -> &str {
        "great weapon master"
    }

    fn on_attack_roll(&self, ctx: &AttackContext<'_>) -> i32 {
        if Self::applies(ctx) {
            POWER_ATTACK_ROLL_PENALTY
        } else {
            0
        }
    }

    fn on_damage_calculation(&self, dice: &Dice, ctx: &AttackContext<'_>) -> Option<Dice> {
        if Self::applies(ctx) {
            Some(dice.with_modifier(dice.modifier() + POWER_ATTACK_DAMAGE_BONUS))
        } else {
            None
        }
    }
}

/// Sharpshooter: -5 to hit / +10 damage on ranged attacks when the
/// power-attack flag is set
#[derive(Debug, Clone, Copy, Default)]
pub struct Sharpshooter;

impl Sharpshooter {
    /// Create the feat
    pub fn new() -> Self {
        Self
    }

    fn applies(ctx: &AttackContext<'_>) -> bool {
        ctx.options.power_attack && !ctx.attack.is_melee()
    }
}

impl Feature for Sharpshooter {
    fn name(&self) -> &str {
        "sharpshooter"
    }

    fn on_attack_roll(&self, ctx: &AttackContext<'_>) -> i32 {
        if Self::applies(ctx) {
            POWER_ATTACK_ROLL_PENALTY
        } else {
            0
        }
    }

    fn on_damage_calculation(&self, dice: &Dice, ctx: &AttackContext<'_>) -> Option<Dice> {
        if Self::applies(ctx) {
            Some(dice.with_modifier(dice.modifier() + POWER_ATTACK_DAMAGE_BONUS))
        } else {
            None
        }
    }
}
