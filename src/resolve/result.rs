//! Attack outcome records

use serde::Serialize;

/// How an attack was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    /// d20 attack roll vs armor class
    AttackRoll,
    /// Defender saving throw vs a DC
    SavingThrow,
}

/// The immutable record of one resolved attack.
///
/// Produced once per resolution and handed to the caller; the engine keeps
/// no copy.
#[derive(Debug, Clone, Serialize)]
pub struct AttackResult {
    /// Attacker name
    pub attacker: String,
    /// Defender name
    pub defender: String,
    /// Attack name
    pub attack: String,
    /// Attacker success: a hit, or a failed defender save
    pub success: bool,
    /// Damage applied to the defender
    pub damage: i32,
    /// Resolution method
    pub kind: ResolutionKind,
    /// Attack roll total (attack-roll resolutions only)
    pub attack_roll: Option<i32>,
    /// Defender armor class (attack-roll resolutions only)
    pub target_ac: Option<i32>,
    /// Defender save total (save resolutions only)
    pub save_roll: Option<i32>,
    /// Save DC (save resolutions only)
    pub save_dc: Option<i32>,
    /// Whether the defender dropped to 0 or below
    pub is_dead: bool,
}
