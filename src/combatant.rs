//! Combatants and teams
//!
//! A combatant owns its statblock, attack list, feature list, and per-turn
//! resource context. A team owns its members for the duration of one
//! encounter; the combatant keeps only the team name as a back-reference
//! for lookup.

use crate::attack::Attack;
use crate::feature::Feature;
use crate::statblock::Statblock;
use crate::turn::TurnContext;

/// One character or monster
pub struct Combatant {
    /// Display name; also the key used in results and win tallies
    pub name: String,
    /// Mutable numeric and condition state
    pub statblock: Statblock,
    attacks: Vec<Attack>,
    features: Vec<Box<dyn Feature>>,
    /// Per-turn action economy
    pub turn: TurnContext,
    team: Option<String>,
}

impl Combatant {
    /// Create a combatant with no attacks or features yet
    pub fn new(name: &str, statblock: Statblock) -> Self {
        Self {
            name: name.to_string(),
            statblock,
            attacks: Vec::new(),
            features: Vec::new(),
            turn: TurnContext::new(),
            team: None,
        }
    }

    /// Attach an attack
    pub fn with_attack(mut self, attack: Attack) -> Self {
        self.attacks.push(attack);
        self
    }

    /// Attach a feature; features apply in attachment order
    pub fn with_feature(mut self, feature: impl Feature + 'static) -> Self {
        self.features.push(Box::new(feature));
        self
    }

    /// Attacks this combatant can make
    pub fn attacks(&self) -> &[Attack] {
        &self.attacks
    }

    /// The default attack used by the automatic combat loop
    pub fn primary_attack(&self) -> Option<&Attack> {
        self.attacks.first()
    }

    /// Features in application order; read-only during combat
    pub fn features(&self) -> &[Box<dyn Feature>] {
        &self.features
    }

    /// Alive means strictly positive hit points
    pub fn is_alive(&self) -> bool {
        self.statblock.is_alive()
    }

    /// Name of the team this combatant belongs to, if any
    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    pub(crate) fn set_team(&mut self, team: &str) {
        self.team = Some(team.to_string());
    }
}

impl std::fmt::Debug for Combatant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Combatant")
            .field("name", &self.name)
            .field("hit_points", &self.statblock.hit_points)
            .field("attacks", &self.attacks.len())
            .field("features", &self.features.len())
            .field("team", &self.team)
            .finish()
    }
}

/// An ordered group of combatants fighting on the same side
#[derive(Debug)]
pub struct Team {
    /// Team name, used for winner reporting
    pub name: String,
    members: Vec<Combatant>,
}

impl Team {
    /// Create a team, linking each member's team back-reference
    pub fn new(name: &str, mut members: Vec<Combatant>) -> Self {
        for member in &mut members {
            member.set_team(name);
        }
        Self {
            name: name.to_string(),
            members,
        }
    }

    /// Members in order
    pub fn members(&self) -> &[Combatant] {
        &self.members
    }

    /// Mutable member access for damage application
    pub fn members_mut(&mut self) -> &mut [Combatant] {
        &mut self.members
    }

    /// Number of members still alive
    pub fn living_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_alive()).count()
    }

    /// Whether every member is down
    pub fn is_defeated(&self) -> bool {
        self.living_count() == 0
    }
}
