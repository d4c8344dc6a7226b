//! Shared fixtures for scenario tests
//!
//! Each scenario binary uses its own subset of these builders.
#![allow(dead_code)]

use skirmish::feature::{Evasion, GreatWeaponMaster, SneakAttack};
use skirmish::{Ability, Attack, Combatant, Dice, SaveDc, ScriptedRoller, Statblock};

/// Initialize test logging; safe to call from every test
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skirmish=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// Strength fighter: +3 to hit, 1d8+3 longsword, AC 16
pub fn fighter(name: &str) -> Combatant {
    let statblock = Statblock::new([16, 12, 14, 10, 10, 10], 5, 44).with_base_armor_class(14);
    Combatant::new(name, statblock).with_attack(Attack::weapon(
        "longsword",
        Dice::new(1, 8, 3).unwrap(),
        Ability::Strength,
        5,
    ))
}

/// Greatsword fighter carrying Great Weapon Master
pub fn gwm_fighter(name: &str) -> Combatant {
    let statblock = Statblock::new([18, 10, 14, 10, 10, 10], 5, 44).with_base_armor_class(14);
    Combatant::new(name, statblock)
        .with_attack(Attack::weapon(
            "greatsword",
            Dice::new(2, 6, 4).unwrap(),
            Ability::Strength,
            5,
        ))
        .with_feature(GreatWeaponMaster::new())
}

/// Dexterity rogue with sneak attack and evasion
pub fn rogue(name: &str) -> Combatant {
    let statblock = Statblock::new([10, 16, 12, 12, 10, 10], 5, 33)
        .with_base_armor_class(12)
        .with_save_proficiency(Ability::Dexterity);
    Combatant::new(name, statblock)
        .with_attack(Attack::weapon(
            "shortsword",
            Dice::new(1, 6, 3).unwrap(),
            Ability::Dexterity,
            5,
        ))
        .with_feature(SneakAttack::new(3))
        .with_feature(Evasion::new())
}

/// Intelligence wizard with a dex-save fireball (DC 14)
pub fn wizard(name: &str) -> Combatant {
    let statblock = Statblock::new([8, 14, 12, 16, 10, 10], 5, 27).with_base_armor_class(12);
    Combatant::new(name, statblock).with_attack(Attack::save(
        "fireball",
        Dice::new(8, 6, 0).unwrap(),
        Ability::Intelligence,
        150,
        Ability::Dexterity,
        SaveDc::Stat(Ability::Intelligence),
        true,
    ))
}

/// Low-HP target that anything can hit
pub fn goblin(name: &str) -> Combatant {
    let statblock = Statblock::new([8, 14, 10, 10, 8, 8], 1, 7).with_base_armor_class(11);
    Combatant::new(name, statblock).with_attack(Attack::weapon(
        "scimitar",
        Dice::new(1, 6, 2).unwrap(),
        Ability::Dexterity,
        5,
    ))
}

/// A combatant that can never hit or be hit, for stalemate scenarios
pub fn turtle(name: &str) -> Combatant {
    let statblock = Statblock::new([10, 10, 10, 10, 10, 10], 1, 10).with_base_armor_class(30);
    Combatant::new(name, statblock).with_attack(Attack::weapon(
        "poke",
        Dice::new(1, 4, 0).unwrap(),
        Ability::Strength,
        5,
    ))
}

/// Scripted roller from a fixed sequence
pub fn scripted(rolls: impl IntoIterator<Item = u32>) -> ScriptedRoller {
    ScriptedRoller::new(rolls)
}
