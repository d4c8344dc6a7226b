//! Class features
//!
//! Sneak Attack (rogue) and Evasion (rogue/monk).

use crate::dice::Dice;
use crate::statblock::Ability;

use super::{AttackContext, Feature, SaveContext};

/// Sneak Attack: extra d6s when attacking with effective advantage or when
/// the caller flags eligibility explicitly
#[derive(Debug, Clone, Copy)]
pub struct SneakAttack {
    dice_count: u32,
}

impl SneakAttack {
    /// Create a sneak attack worth the given number of d6s
    pub fn new(dice_count: u32) -> Self {
        Self { dice_count }
    }

    fn eligible(&self, ctx: &AttackContext<'_>) -> bool {
        self.dice_count > 0 && (ctx.has_advantage() || ctx.options.sneak_attack)
    }
}

impl Feature for SneakAttack {
    fn name(&self) -> &str {
        "sneak attack"
    }

    fn extra_damage_dice(&self, ctx: &AttackContext<'_>) -> Vec<Dice> {
        if self.eligible(ctx) {
            // dice_count checked non-zero in eligible()
            Dice::new(self.dice_count, 6, 0).map_or_else(|_| Vec::new(), |d| vec![d])
        } else {
            Vec::new()
        }
    }
}

/// Evasion: dexterity saves take no damage on success and half on failure,
/// regardless of the attack's own half-damage rule
#[derive(Debug, Clone, Copy, Default)]
pub struct Evasion;

impl Evasion {
    /// Create the feature
    pub fn new() -> Self {
        Self
    }
}

impl Feature for Evasion {
    fn name(&self) -> &str {
        "evasion"
    }

    fn on_damage_taken(
        &self,
        damage: i32,
        save_succeeded: bool,
        ctx: &SaveContext<'_>,
    ) -> Option<i32> {
        if ctx.save_ability != Ability::Dexterity {
            return None;
        }
        if save_succeeded {
            Some(0)
        } else {
            Some(damage / 2)
        }
    }
}
