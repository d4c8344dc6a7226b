//! Team combat scenarios

mod common;

use common::{fighter, goblin, rogue, scripted, turtle};
use skirmish::{CombatError, CombatPhase, Team, TeamCombat};

#[test]
fn two_on_one_runs_to_a_team_winner() {
    let heroes = Team::new("heroes", vec![fighter("fighter"), rogue("rogue")]);
    let goblins = Team::new("goblins", vec![goblin("gob")]);
    let mut combat = TeamCombat::new(vec![heroes, goblins]);

    // Initiative 20+1 / 18+3 / 1+2: both heroes total 21, the rogue's
    // higher dexterity breaks the tie. Rogue picks the only goblin
    // (target roll 1), hits with 12+3 vs AC 13, and the d6 rolling 4 (+3)
    // drops it.
    let mut roller = scripted([20, 18, 1, 1, 12, 4]);
    let summary = combat.run(&mut roller).unwrap();

    assert_eq!(summary.winner, "heroes");
    assert_eq!(summary.initiative_winner, "rogue");
    assert_eq!(summary.rounds, 1);
    assert_eq!(combat.phase(), CombatPhase::Over);
    assert_eq!(combat.winner().unwrap(), "heroes");
}

#[test]
fn members_carry_their_team_back_reference() {
    let heroes = Team::new("heroes", vec![fighter("fighter"), rogue("rogue")]);
    for member in heroes.members() {
        assert_eq!(member.team(), Some("heroes"));
    }
}

#[test]
fn is_over_needs_a_fully_downed_side() {
    let heroes = Team::new("heroes", vec![fighter("fighter"), rogue("rogue")]);
    let mut gob = goblin("gob");
    gob.statblock.take_damage(10);
    let goblins = Team::new("goblins", vec![gob]);

    let combat = TeamCombat::new(vec![heroes, goblins]);
    assert!(combat.is_over());
    assert_eq!(combat.winner().unwrap(), "heroes");
}

#[test]
fn winner_is_undecided_while_both_sides_stand() {
    let combat = TeamCombat::new(vec![
        Team::new("a", vec![goblin("a1")]),
        Team::new("b", vec![goblin("b1")]),
    ]);
    assert!(!combat.is_over());
    assert_eq!(combat.winner(), Err(CombatError::Undecided));
}

#[test]
fn double_knockout_has_no_winner() {
    let mut a = goblin("a1");
    a.statblock.take_damage(10);
    let mut b = goblin("b1");
    b.statblock.take_damage(10);

    let combat = TeamCombat::new(vec![
        Team::new("a", vec![a]),
        Team::new("b", vec![b]),
    ]);
    assert!(combat.is_over());
    assert_eq!(combat.winner(), Err(CombatError::NoSurvivors));
}

#[test]
fn team_round_limit_raises_timeout() {
    let mut combat = TeamCombat::new(vec![
        Team::new("a", vec![turtle("a1"), turtle("a2")]),
        Team::new("b", vec![turtle("b1")]),
    ])
    .with_max_rounds(2);

    let mut roller = scripted([]);
    let err = combat.run(&mut roller).unwrap_err();
    assert_eq!(err, CombatError::RoundLimit { rounds: 2 });
    assert_eq!(combat.round(), 2);
    assert_eq!(combat.phase(), CombatPhase::TimedOut);
}

#[test]
fn dead_members_are_skipped_not_attacked() {
    // Two goblins on one side, one already down; the fighter must target
    // the living one
    let mut downed = goblin("downed");
    downed.statblock.take_damage(10);
    let goblins = Team::new("goblins", vec![downed, goblin("standing")]);
    let heroes = Team::new("heroes", vec![fighter("fighter")]);
    let mut combat = TeamCombat::new(vec![goblins, heroes]);

    // Initiative: downed 20+2, standing 15+2, fighter 10+1 -> downed
    // first but skipped; standing attacks fighter (target roll 1): 2+2
    // misses AC 15. Fighter's turn: only "standing" is a candidate, roll
    // 1 picks it, 18+3 hits AC 13, damage 5+3 = 8 drops it.
    let mut roller = scripted([20, 15, 10, 1, 2, 1, 18, 5]);
    let summary = combat.run(&mut roller).unwrap();

    assert_eq!(summary.winner, "heroes");
    assert_eq!(combat.teams()[0].living_count(), 0);
}
