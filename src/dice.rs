//! Dice primitives and the roller seam
//!
//! Parses and rolls dice notation like "2d6+3", "1d20", "4d6-2".
//! All randomness flows through the [`Roller`] trait so any roll can be
//! replayed from a scripted sequence in tests.

use std::collections::VecDeque;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from dice construction and notation parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("dice count must be at least 1")]
    ZeroCount,

    #[error("die sides must be at least 1")]
    ZeroSides,

    #[error("missing 'd' in dice notation")]
    MissingSeparator,

    #[error("invalid dice count: {0}")]
    InvalidCount(String),

    #[error("invalid die sides: {0}")]
    InvalidSides(String),

    #[error("invalid modifier: {0}")]
    InvalidModifier(String),
}

/// A dice specification: count, sides, and a flat modifier.
///
/// Immutable once constructed; rolling never caches results, every call to
/// [`Dice::roll`] draws fresh values from the roller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Dice {
    count: u32,
    sides: u32,
    modifier: i32,
}

impl Dice {
    /// Create a dice spec, validating both fields
    pub fn new(count: u32, sides: u32, modifier: i32) -> Result<Self, DiceError> {
        if count == 0 {
            return Err(DiceError::ZeroCount);
        }
        if sides == 0 {
            return Err(DiceError::ZeroSides);
        }
        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Number of dice rolled
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Sides per die
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Flat modifier added to the roll total
    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Same dice with a different flat modifier
    pub fn with_modifier(self, modifier: i32) -> Self {
        Self { modifier, ..self }
    }

    /// Same dice with a different count
    pub fn with_count(self, count: u32) -> Result<Self, DiceError> {
        Self::new(count, self.sides, self.modifier)
    }

    /// Critical-hit variant: twice the dice, same modifier
    pub fn doubled(self) -> Self {
        Self {
            count: self.count * 2,
            ..self
        }
    }

    /// Roll the dice and return individual results plus total
    pub fn roll(&self, roller: &mut dyn Roller) -> DiceOutcome {
        let mut rolls = Vec::with_capacity(self.count as usize);
        for _ in 0..self.count {
            rolls.push(roller.roll(self.sides));
        }
        let sum: u32 = rolls.iter().sum();
        let total = sum as i32 + self.modifier;
        DiceOutcome { rolls, total }
    }

    /// Minimum possible result
    pub fn min(&self) -> i32 {
        self.count as i32 + self.modifier
    }

    /// Maximum possible result
    pub fn max(&self) -> i32 {
        (self.count * self.sides) as i32 + self.modifier
    }
}

/// One resolved roll: the individual die results and the modified total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceOutcome {
    /// Individual die results, in roll order
    pub rolls: Vec<u32>,
    /// Sum of rolls plus the flat modifier
    pub total: i32,
}

impl FromStr for Dice {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dice(s)
    }
}

impl TryFrom<String> for Dice {
    type Error = DiceError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Dice> for String {
    fn from(dice: Dice) -> String {
        dice.to_string()
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifier > 0 {
            write!(f, "{}d{}+{}", self.count, self.sides, self.modifier)
        } else if self.modifier < 0 {
            write!(f, "{}d{}{}", self.count, self.sides, self.modifier)
        } else {
            write!(f, "{}d{}", self.count, self.sides)
        }
    }
}

/// Parse a dice notation string like "2d6+3"
pub fn parse_dice(notation: &str) -> Result<Dice, DiceError> {
    let notation = notation.trim().to_lowercase();

    // Find the 'd' separator
    let d_pos = notation.find('d').ok_or(DiceError::MissingSeparator)?;

    // Parse count (before 'd')
    let count_str = &notation[..d_pos];
    let count: u32 = if count_str.is_empty() {
        1 // "d6" means "1d6"
    } else {
        count_str
            .parse()
            .map_err(|_| DiceError::InvalidCount(count_str.to_string()))?
    };

    // Parse sides and modifier (after 'd')
    let rest = &notation[d_pos + 1..];

    let (sides_str, modifier) = if let Some(plus_pos) = rest.find('+') {
        let sides = &rest[..plus_pos];
        let mod_str = &rest[plus_pos + 1..];
        let modifier: i32 = mod_str
            .parse()
            .map_err(|_| DiceError::InvalidModifier(mod_str.to_string()))?;
        (sides, modifier)
    } else if let Some(minus_pos) = rest.rfind('-') {
        // rfind so a negative modifier's minus sign is found, not a stray one
        if minus_pos == 0 {
            (rest, 0)
        } else {
            let sides = &rest[..minus_pos];
            let mod_str = &rest[minus_pos..]; // includes the minus sign
            let modifier: i32 = mod_str
                .parse()
                .map_err(|_| DiceError::InvalidModifier(mod_str.to_string()))?;
            (sides, modifier)
        }
    } else {
        (rest, 0)
    };

    let sides: u32 = sides_str
        .parse()
        .map_err(|_| DiceError::InvalidSides(sides_str.to_string()))?;

    Dice::new(count, sides, modifier)
}

/// Source of individual die results.
///
/// The production implementation draws from the thread RNG; tests swap in a
/// [`ScriptedRoller`] to replay a fixed sequence.
pub trait Roller {
    /// Roll one die with the given number of sides, returning a value in
    /// [1, sides] (scripted rollers may return whatever was scripted)
    fn roll(&mut self, sides: u32) -> u32;
}

/// Real randomness via the thread RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRoller;

impl RandomRoller {
    /// Create a new random roller
    pub fn new() -> Self {
        Self
    }
}

impl Roller for RandomRoller {
    fn roll(&mut self, sides: u32) -> u32 {
        rand::rng().random_range(1..=sides)
    }
}

/// A fixed queue of results consumed in call order.
///
/// Returns 0 once the queue is exhausted, so a test that under-scripts its
/// rolls fails visibly instead of drawing real randomness.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    queue: VecDeque<u32>,
}

impl ScriptedRoller {
    /// Create a scripted roller from a result sequence
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            queue: rolls.into_iter().collect(),
        }
    }

    /// Append more results to the queue
    pub fn push(&mut self, roll: u32) {
        self.queue.push_back(roll);
    }

    /// Results not yet consumed
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl Roller for ScriptedRoller {
    fn roll(&mut self, _sides: u32) -> u32 {
        self.queue.pop_front().unwrap_or(0)
    }
}
