//! Attack definitions
//!
//! Immutable descriptions of what a combatant can do on its turn:
//! - Weapon attacks resolved as d20 roll vs armor class
//! - Save attacks resolved as a defender saving throw vs a DC
//! - Optional level scaling of the damage dice (cantrip-style)

use serde::{Deserialize, Serialize};

use crate::dice::Dice;
use crate::statblock::Ability;

/// Range at or below which an attack counts as melee, in feet
pub const MELEE_RANGE: u32 = 5;

/// How a save attack's difficulty class is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveDc {
    /// A fixed DC, e.g. from a trap or potion
    Fixed(i32),
    /// 8 + attacker proficiency + attacker modifier for this ability
    Stat(Ability),
}

/// How an attack is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    /// d20 + modifier vs the defender's armor class
    Weapon,
    /// Defender rolls d20 + save modifier vs the DC
    Save {
        /// Ability the defender saves with
        ability: Ability,
        /// How the DC is computed
        dc: SaveDc,
        /// Whether a successful save still takes half damage
        half_on_success: bool,
    },
}

/// An immutable attack definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    /// Attack name (e.g., "longsword", "fire bolt")
    pub name: String,
    /// Base damage dice before scaling, hooks, or criticals
    pub damage_dice: Dice,
    /// Ability whose modifier drives the attack roll or save DC
    pub relevant_stat: Ability,
    /// Reach or range in feet; at most [`MELEE_RANGE`] means melee
    pub range: u32,
    /// Resolution method
    pub kind: AttackKind,
    /// Whether the damage dice scale with attacker level
    #[serde(default)]
    pub scales_with_level: bool,
}

impl Attack {
    /// Create a weapon attack
    pub fn weapon(name: &str, damage_dice: Dice, relevant_stat: Ability, range: u32) -> Self {
        Self {
            name: name.to_string(),
            damage_dice,
            relevant_stat,
            range,
            kind: AttackKind::Weapon,
            scales_with_level: false,
        }
    }

    /// Create a save attack
    pub fn save(
        name: &str,
        damage_dice: Dice,
        relevant_stat: Ability,
        range: u32,
        save_ability: Ability,
        dc: SaveDc,
        half_on_success: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            damage_dice,
            relevant_stat,
            range,
            kind: AttackKind::Save {
                ability: save_ability,
                dc,
                half_on_success,
            },
            scales_with_level: false,
        }
    }

    /// Enable cantrip-style level scaling of the damage dice
    pub fn with_level_scaling(mut self) -> Self {
        self.scales_with_level = true;
        self
    }

    /// Whether this attack is melee
    pub fn is_melee(&self) -> bool {
        self.range <= MELEE_RANGE
    }

    /// Damage dice for an attacker of the given level.
    ///
    /// Scaling attacks add one die at levels 5, 11, and 17; everything else
    /// returns the base dice unchanged. Pure, never mutates the definition.
    pub fn damage_dice_for(&self, level: u32) -> Dice {
        if !self.scales_with_level {
            return self.damage_dice;
        }
        let steps = [5, 11, 17].iter().filter(|&&l| level >= l).count() as u32;
        // count is already validated non-zero, adding to it stays valid
        self.damage_dice
            .with_count(self.damage_dice.count() + steps)
            .unwrap_or(self.damage_dice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d10() -> Dice {
        Dice::new(1, 10, 0).unwrap()
    }

    #[test]
    fn test_melee_classification() {
        let sword = Attack::weapon("longsword", d10(), Ability::Strength, 5);
        assert!(sword.is_melee());

        let bow = Attack::weapon("longbow", d10(), Ability::Dexterity, 150);
        assert!(!bow.is_melee());
    }

    #[test]
    fn test_no_scaling_by_default() {
        let sword = Attack::weapon("longsword", d10(), Ability::Strength, 5);
        assert_eq!(sword.damage_dice_for(1).count(), 1);
        assert_eq!(sword.damage_dice_for(20).count(), 1);
    }

    #[test]
    fn test_cantrip_scaling_steps() {
        let bolt = Attack::weapon("fire bolt", d10(), Ability::Intelligence, 120)
            .with_level_scaling();
        assert_eq!(bolt.damage_dice_for(1).count(), 1);
        assert_eq!(bolt.damage_dice_for(4).count(), 1);
        assert_eq!(bolt.damage_dice_for(5).count(), 2);
        assert_eq!(bolt.damage_dice_for(10).count(), 2);
        assert_eq!(bolt.damage_dice_for(11).count(), 3);
        assert_eq!(bolt.damage_dice_for(17).count(), 4);
        assert_eq!(bolt.damage_dice_for(20).count(), 4);
    }

    #[test]
    fn test_scaling_preserves_sides_and_modifier() {
        let dice = Dice::new(1, 8, 2).unwrap();
        let attack = Attack::weapon("ray", dice, Ability::Wisdom, 60).with_level_scaling();
        let scaled = attack.damage_dice_for(11);
        assert_eq!(scaled.sides(), 8);
        assert_eq!(scaled.modifier(), 2);
    }

    #[test]
    fn test_save_attack_definition() {
        let breath = Attack::save(
            "poison breath",
            Dice::new(2, 6, 0).unwrap(),
            Ability::Constitution,
            15,
            Ability::Constitution,
            SaveDc::Fixed(11),
            true,
        );
        match breath.kind {
            AttackKind::Save {
                ability,
                dc,
                half_on_success,
            } => {
                assert_eq!(ability, Ability::Constitution);
                assert_eq!(dc, SaveDc::Fixed(11));
                assert!(half_on_success);
            }
            AttackKind::Weapon => panic!("expected save attack"),
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let attack = Attack::save(
            "burning hands",
            Dice::new(3, 6, 0).unwrap(),
            Ability::Intelligence,
            15,
            Ability::Dexterity,
            SaveDc::Stat(Ability::Intelligence),
            true,
        );
        let json = serde_json::to_string(&attack).unwrap();
        let back: Attack = serde_json::from_str(&json).unwrap();
        assert_eq!(back, attack);
    }
}
