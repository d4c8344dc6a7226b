//! Rule-modifier features (feats and class features)
//!
//! A feature hooks into named stages of attack and save resolution. The
//! engine never branches on concrete features; it folds the combatant's
//! ordered feature list through one of three reduction strategies:
//! - Additive: each feature contributes a delta to a base modifier
//! - Replacing: each feature may swap the working value, last one wins
//! - Accumulating: each feature may append items, concatenated in order
//!
//! Every hook defaults to a no-op, so a feature only implements the stages
//! it cares about.

mod class;
mod feats;

pub use class::{Evasion, SneakAttack};
pub use feats::{GreatWeaponMaster, Sharpshooter};

use crate::attack::Attack;
use crate::dice::Dice;
use crate::statblock::Ability;

/// Caller-supplied options for one attack resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct AttackOptions {
    /// Force advantage on the attack roll
    pub advantage: bool,
    /// Force disadvantage on the attack roll
    pub disadvantage: bool,
    /// Take the power-attack trade (Great Weapon Master / Sharpshooter)
    pub power_attack: bool,
    /// Explicitly mark sneak-attack eligibility
    pub sneak_attack: bool,
    /// An enemy is within melee reach of the attacker
    pub enemy_adjacent: bool,
}

/// Context passed to attack-stage hooks
#[derive(Debug, Clone, Copy)]
pub struct AttackContext<'a> {
    /// The attack being resolved
    pub attack: &'a Attack,
    /// Caller options for this resolution
    pub options: &'a AttackOptions,
    /// Advantage after merging options and conditions
    pub advantage: bool,
    /// Disadvantage after merging options and conditions
    pub disadvantage: bool,
}

impl AttackContext<'_> {
    /// Whether the roll is effectively at advantage (not canceled out)
    pub fn has_advantage(&self) -> bool {
        self.advantage && !self.disadvantage
    }
}

/// Context passed to save-stage hooks
#[derive(Debug, Clone, Copy)]
pub struct SaveContext<'a> {
    /// The attack forcing the save
    pub attack: &'a Attack,
    /// Ability the defender saves with
    pub save_ability: Ability,
}

/// A rule modifier hooked into resolution stages.
///
/// All hooks default to no-ops; implement only the stages the feature
/// affects.
pub trait Feature {
    /// Feature name, for logs and result audits
    fn name(&self) -> &str;

    /// Additive delta to the attack-roll modifier
    fn on_attack_roll(&self, ctx: &AttackContext<'_>) -> i32 {
        let _ = ctx;
        0
    }

    /// Replace the base damage dice, or None to pass through
    fn on_damage_calculation(&self, dice: &Dice, ctx: &AttackContext<'_>) -> Option<Dice> {
        let _ = (dice, ctx);
        None
    }

    /// Additive delta to the holder's saving-throw roll
    fn on_save_roll(&self, ctx: &SaveContext<'_>) -> i32 {
        let _ = ctx;
        0
    }

    /// Override the damage the holder takes after a save resolves, or None
    /// to keep the base-rule result
    fn on_damage_taken(
        &self,
        damage: i32,
        save_succeeded: bool,
        ctx: &SaveContext<'_>,
    ) -> Option<i32> {
        let _ = (damage, save_succeeded, ctx);
        None
    }

    /// Extra damage dice rolled separately from the base damage
    fn extra_damage_dice(&self, ctx: &AttackContext<'_>) -> Vec<Dice> {
        let _ = ctx;
        Vec::new()
    }
}

/// Additive reduction over the attack-roll hook
pub fn attack_roll_modifier(
    features: &[Box<dyn Feature>],
    base: i32,
    ctx: &AttackContext<'_>,
) -> i32 {
    features.iter().fold(base, |acc, f| acc + f.on_attack_roll(ctx))
}

/// Replacing reduction over the damage-dice hook; each replacement feeds
/// the next feature, so the last replacement wins
pub fn damage_dice(features: &[Box<dyn Feature>], base: Dice, ctx: &AttackContext<'_>) -> Dice {
    features.iter().fold(base, |acc, f| {
        f.on_damage_calculation(&acc, ctx).unwrap_or(acc)
    })
}

/// Additive reduction over the save-roll hook
pub fn save_roll_modifier(features: &[Box<dyn Feature>], base: i32, ctx: &SaveContext<'_>) -> i32 {
    features.iter().fold(base, |acc, f| acc + f.on_save_roll(ctx))
}

/// Replacing reduction over the damage-taken hook
pub fn damage_taken(
    features: &[Box<dyn Feature>],
    base: i32,
    save_succeeded: bool,
    ctx: &SaveContext<'_>,
) -> i32 {
    features.iter().fold(base, |acc, f| {
        f.on_damage_taken(acc, save_succeeded, ctx).unwrap_or(acc)
    })
}

/// Accumulating reduction over the extra-dice hook, concatenated in
/// feature order
pub fn extra_damage_dice(features: &[Box<dyn Feature>], ctx: &AttackContext<'_>) -> Vec<Dice> {
    features
        .iter()
        .flat_map(|f| f.extra_damage_dice(ctx))
        .collect()
}
