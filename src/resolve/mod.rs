//! Attack resolution pipeline
//!
//! Stateless helpers for one attack each:
//! - Attack rolls with advantage/disadvantage and crit detection
//! - Damage rolls with hook replacement and crit doubling
//! - Saving throws with DC derivation and damage overrides
//!
//! [`resolve_attack`] is the orchestrator: it validates that both sides
//! are alive, dispatches by attack kind, applies damage, and emits the
//! structured result.

mod damage;
mod result;
mod roll;
mod save;

pub use damage::{roll_damage, DamageRoll};
pub use result::{AttackResult, ResolutionKind};
pub use roll::{roll_attack, roll_state, AttackRoll};
pub use save::{resolve_save, SaveResolution};

use thiserror::Error;
use tracing::debug;

use crate::attack::{Attack, AttackKind};
use crate::combatant::Combatant;
use crate::dice::Roller;
use crate::feature::{AttackContext, AttackOptions};

/// Illegal attack attempts.
///
/// These are caller errors: the attack is never silently skipped and never
/// retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttackError {
    #[error("attacker '{0}' is dead")]
    DeadAttacker(String),

    #[error("defender '{0}' is dead")]
    DeadDefender(String),
}

/// Resolve one attack from attacker to defender, applying damage.
///
/// Dispatches to save resolution for save attacks, otherwise to the
/// attack-roll + damage-roll pipeline. Damage is applied only when
/// positive; the result carries a death flag for the defender.
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &mut Combatant,
    attack: &Attack,
    options: &AttackOptions,
    roller: &mut dyn Roller,
) -> Result<AttackResult, AttackError> {
    if !attacker.is_alive() {
        return Err(AttackError::DeadAttacker(attacker.name.clone()));
    }
    if !defender.is_alive() {
        return Err(AttackError::DeadDefender(defender.name.clone()));
    }

    let result = match attack.kind {
        AttackKind::Save {
            ability,
            dc,
            half_on_success,
        } => {
            let save = resolve_save(
                attacker,
                defender,
                attack,
                ability,
                dc,
                half_on_success,
                roller,
            );
            if save.damage > 0 {
                defender.statblock.take_damage(save.damage);
            }
            AttackResult {
                attacker: attacker.name.clone(),
                defender: defender.name.clone(),
                attack: attack.name.clone(),
                // The attacker wins when the defender fails the save
                success: !save.succeeded,
                damage: save.damage.max(0),
                kind: ResolutionKind::SavingThrow,
                attack_roll: None,
                target_ac: None,
                save_roll: Some(save.total),
                save_dc: Some(save.dc),
                is_dead: !defender.is_alive(),
            }
        }
        AttackKind::Weapon => {
            let roll = roll_attack(attacker, defender, attack, options, roller);
            let target_ac = defender.statblock.armor_class();
            let hit = roll.total >= target_ac;

            let damage = if hit {
                let ctx = AttackContext {
                    attack,
                    options,
                    advantage: roll.advantage,
                    disadvantage: roll.disadvantage,
                };
                let damage = roll_damage(attacker, attack, &ctx, roll.critical, roller);
                if damage.total > 0 {
                    defender.statblock.take_damage(damage.total);
                }
                damage.total.max(0)
            } else {
                0
            };

            AttackResult {
                attacker: attacker.name.clone(),
                defender: defender.name.clone(),
                attack: attack.name.clone(),
                success: hit,
                damage,
                kind: ResolutionKind::AttackRoll,
                attack_roll: Some(roll.total),
                target_ac: Some(target_ac),
                save_roll: None,
                save_dc: None,
                is_dead: !defender.is_alive(),
            }
        }
    };

    debug!(
        attacker = %result.attacker,
        defender = %result.defender,
        attack = %result.attack,
        success = result.success,
        damage = result.damage,
        is_dead = result.is_dead,
        "attack resolved"
    );

    Ok(result)
}
