// Numerology Number Systems
// Letter and digit tables for the Pythagorean and Chaldean systems

use crate::types::{NumerologyError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Letter to value table for one numerological system
///
/// Letters `a`-`z` map through a fixed table, decimal digits map to themselves,
/// and the separators that commonly appear in names (space, `.`, `-`) map to 0.
/// Anything else has no value in either system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct NumberSystem {
    name: &'static str,

    /// Value of each letter, indexed from `a`
    letters: [u8; 26],

    /// Digits the system produces. Chaldean never assigns 9 to a letter.
    valid_numbers: &'static [u32],
}

/// Pythagorean system: letters cycle through 1-9 in alphabet order
pub const PYTHAGOREAN: NumberSystem = NumberSystem {
    name: "Pythagorean",
    //        a  b  c  d  e  f  g  h  i  j  k  l  m  n  o  p  q  r  s  t  u  v  w  x  y  z
    letters: [1, 2, 3, 4, 5, 6, 7, 8, 9, 1, 2, 3, 4, 5, 6, 7, 8, 9, 1, 2, 3, 4, 5, 6, 7, 8],
    valid_numbers: &[1, 2, 3, 4, 5, 6, 7, 8, 9],
};

/// Chaldean system: values follow letter sounds, 9 is never assigned
pub const CHALDEAN: NumberSystem = NumberSystem {
    name: "Chaldean",
    //        a  b  c  d  e  f  g  h  i  j  k  l  m  n  o  p  q  r  s  t  u  v  w  x  y  z
    letters: [1, 2, 3, 4, 5, 8, 3, 5, 1, 1, 2, 3, 4, 5, 7, 8, 1, 2, 3, 4, 6, 6, 6, 5, 1, 7],
    valid_numbers: &[1, 2, 3, 4, 5, 6, 7, 8],
};

impl NumberSystem {
    /// Look up a system by name, ignoring case
    ///
    /// # Example
    /// ```
    /// # use numerology::number_system::{NumberSystem, CHALDEAN};
    /// assert_eq!(NumberSystem::by_name("chaldean").unwrap(), CHALDEAN);
    /// assert!(NumberSystem::by_name("babylonian").is_err());
    /// ```
    pub fn by_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "pythagorean" => Ok(PYTHAGOREAN),
            "chaldean" => Ok(CHALDEAN),
            _ => Err(NumerologyError::UnknownNumberSystem(name.to_string())),
        }
    }

    /// Display name, e.g. "Pythagorean"
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Digits that letters of this system can map to, ascending
    pub fn valid_numbers(&self) -> &'static [u32] {
        self.valid_numbers
    }

    /// Largest digit the system uses (9 Pythagorean, 8 Chaldean)
    pub fn max_digit(&self) -> u32 {
        self.valid_numbers.last().copied().unwrap_or(0)
    }

    pub fn is_valid_number(&self, n: u32) -> bool {
        self.valid_numbers.contains(&n)
    }

    /// Value of a character, case-insensitive. `None` when the system has no mapping.
    pub fn value(&self, ch: char) -> Option<u32> {
        let ch = ch.to_ascii_lowercase();
        match ch {
            'a'..='z' => Some(self.letters[(ch as u8 - b'a') as usize] as u32),
            '0'..='9' => ch.to_digit(10),
            ' ' | '.' | '-' => Some(0),
            _ => None,
        }
    }
}

impl Default for NumberSystem {
    fn default() -> Self {
        PYTHAGOREAN
    }
}

// The tables are 'static, so deserialize through the name instead of the fields
impl<'de> Deserialize<'de> for NumberSystem {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        NumberSystem::by_name(&name).map_err(serde::de::Error::custom)
    }
}

impl From<NumberSystem> for String {
    fn from(ns: NumberSystem) -> Self {
        ns.name.to_lowercase()
    }
}

impl std::fmt::Display for NumberSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
