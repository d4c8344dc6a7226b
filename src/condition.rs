//! Named combat conditions
//!
//! Each condition carries a declarative mechanics table read by the
//! resolution pipeline:
//! - Disadvantage or advantage on the holder's own attack rolls
//! - Advantage or disadvantage granted to attackers targeting the holder
//! - Movement restriction
//!
//! The mechanics are shared reference data; holders only store which
//! conditions are active on them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named status condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    /// Prone - disadvantage on own attacks; melee attackers gain advantage,
    /// ranged attackers suffer disadvantage
    Prone,
    /// Grappled - cannot move
    Grappled,
    /// Restrained - disadvantage on own attacks, attackers gain advantage,
    /// cannot move
    Restrained,
    /// Hidden - advantage on own attacks, attackers suffer disadvantage
    Hidden,
    /// Blinded - disadvantage on own attacks
    Blinded,
    /// Poisoned - disadvantage on own attacks
    Poisoned,
    /// Stunned - attackers gain advantage
    Stunned,
}

impl Condition {
    /// Whether this condition imposes disadvantage on the holder's attacks
    pub fn disadvantage_on_attacks(&self) -> bool {
        matches!(
            self,
            Condition::Prone | Condition::Restrained | Condition::Blinded | Condition::Poisoned
        )
    }

    /// Whether this condition grants the holder advantage on attacks
    pub fn advantage_on_attacks(&self) -> bool {
        matches!(self, Condition::Hidden)
    }

    /// Whether an attack against a holder of this condition is made with
    /// advantage, given whether the attack is melee
    pub fn grants_advantage_to_attackers(&self, melee: bool) -> bool {
        match self {
            Condition::Prone => melee,
            Condition::Restrained | Condition::Stunned => true,
            _ => false,
        }
    }

    /// Whether an attack against a holder of this condition is made with
    /// disadvantage, given whether the attack is melee
    pub fn imposes_disadvantage_on_attackers(&self, melee: bool) -> bool {
        match self {
            Condition::Prone => !melee,
            Condition::Hidden => true,
            _ => false,
        }
    }

    /// Whether this condition prevents movement
    pub fn prevents_movement(&self) -> bool {
        matches!(self, Condition::Grappled | Condition::Restrained)
    }
}

impl FromStr for Condition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prone" => Ok(Condition::Prone),
            "grappled" | "grapple" => Ok(Condition::Grappled),
            "restrained" | "restrain" => Ok(Condition::Restrained),
            "hidden" | "hide" => Ok(Condition::Hidden),
            "blinded" | "blind" => Ok(Condition::Blinded),
            "poisoned" | "poison" => Ok(Condition::Poisoned),
            "stunned" | "stun" => Ok(Condition::Stunned),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Condition::Prone => "prone",
            Condition::Grappled => "grappled",
            Condition::Restrained => "restrained",
            Condition::Hidden => "hidden",
            Condition::Blinded => "blinded",
            Condition::Poisoned => "poisoned",
            Condition::Stunned => "stunned",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_parsing() {
        assert_eq!("prone".parse::<Condition>(), Ok(Condition::Prone));
        assert_eq!("HIDDEN".parse::<Condition>(), Ok(Condition::Hidden));
        assert_eq!("restrain".parse::<Condition>(), Ok(Condition::Restrained));
        assert!("invalid".parse::<Condition>().is_err());
    }

    #[test]
    fn test_attacker_side_mechanics() {
        assert!(Condition::Prone.disadvantage_on_attacks());
        assert!(Condition::Restrained.disadvantage_on_attacks());
        assert!(!Condition::Hidden.disadvantage_on_attacks());
        assert!(Condition::Hidden.advantage_on_attacks());
        assert!(!Condition::Prone.advantage_on_attacks());
    }

    #[test]
    fn test_defender_side_mechanics() {
        // Prone flips with attack range
        assert!(Condition::Prone.grants_advantage_to_attackers(true));
        assert!(!Condition::Prone.grants_advantage_to_attackers(false));
        assert!(Condition::Prone.imposes_disadvantage_on_attackers(false));
        assert!(!Condition::Prone.imposes_disadvantage_on_attackers(true));

        // Restrained helps attackers regardless of range
        assert!(Condition::Restrained.grants_advantage_to_attackers(true));
        assert!(Condition::Restrained.grants_advantage_to_attackers(false));

        // Hidden defenders are hard to hit
        assert!(Condition::Hidden.imposes_disadvantage_on_attackers(true));
        assert!(Condition::Hidden.imposes_disadvantage_on_attackers(false));
    }

    #[test]
    fn test_movement_restriction() {
        assert!(Condition::Grappled.prevents_movement());
        assert!(Condition::Restrained.prevents_movement());
        assert!(!Condition::Prone.prevents_movement());
    }

    #[test]
    fn test_display_round_trip() {
        for c in [
            Condition::Prone,
            Condition::Grappled,
            Condition::Restrained,
            Condition::Hidden,
            Condition::Blinded,
            Condition::Poisoned,
            Condition::Stunned,
        ] {
            assert_eq!(c.to_string().parse::<Condition>(), Ok(c));
        }
    }
}
