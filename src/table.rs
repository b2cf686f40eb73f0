// Numerology Name Table
// Column layout of the precomputed name table and the values stored per row

use crate::name::NameNumerology;
use crate::number_system::{NumberSystem, CHALDEAN, PYTHAGOREAN};
use crate::opts::NameOpts;
use crate::types::{Gender, NumerologyError, Result};
use regex::Regex;
use std::sync::LazyLock;

static TABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

/// Which letters an unreduced value column was summed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Full,
    Vowels,
    Consonants,
}

impl ValueKind {
    pub const ALL: [ValueKind; 3] = [ValueKind::Full, ValueKind::Vowels, ValueKind::Consonants];

    fn suffix(self) -> &'static str {
        match self {
            ValueKind::Full => "full",
            ValueKind::Vowels => "vowels",
            ValueKind::Consonants => "consonants",
        }
    }

    /// Column holding this value for `system`, e.g. `pythagorean_full`
    pub fn column(self, system: NumberSystem) -> String {
        format!("{}_{}", system.name().to_lowercase(), self.suffix())
    }
}

/// Column holding the occurrence count of `digit` for `system`, e.g. `p3` or `c8`
///
/// # Example
/// ```
/// # use numerology::table::count_column;
/// # use numerology::number_system::{CHALDEAN, PYTHAGOREAN};
/// assert_eq!(count_column(PYTHAGOREAN, 3), "p3");
/// assert_eq!(count_column(CHALDEAN, 8), "c8");
/// ```
pub fn count_column(system: NumberSystem, digit: u32) -> String {
    let prefix = system
        .name()
        .chars()
        .next()
        .map(|c| c.to_ascii_lowercase())
        .unwrap_or('x');
    format!("{}{}", prefix, digit)
}

/// Accept only plain SQL identifiers, since table names are spliced into queries
pub fn validate_table_name(table: &str) -> Result<()> {
    if TABLE_NAME.is_match(table) {
        Ok(())
    } else {
        Err(NumerologyError::InvalidTableName(table.to_string()))
    }
}

/// Unreduced full, vowel and consonant sums for one number system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemValues {
    pub full: u8,
    pub vowels: u8,
    pub consonants: u8,
}

impl SystemValues {
    pub fn get(&self, kind: ValueKind) -> u8 {
        match kind {
            ValueKind::Full => self.full,
            ValueKind::Vowels => self.vowels,
            ValueKind::Consonants => self.consonants,
        }
    }

    fn from_name(name: &NameNumerology) -> Option<Self> {
        let raw = |steps: Vec<u32>| steps.first().and_then(|&v| u8::try_from(v).ok());
        Some(Self {
            full: raw(name.full().reduce_steps)?,
            vowels: raw(name.vowels().reduce_steps)?,
            consonants: raw(name.consonants().reduce_steps)?,
        })
    }
}

/// One row of the name table
///
/// Rows are written once by an offline ingestion step; the search engine only
/// reads them. Row ids are assigned in popularity order and are not part of
/// this struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecalculatedEntry {
    pub name: String,
    pub gender: Gender,
    pub pythagorean: SystemValues,
    pub chaldean: SystemValues,

    /// Occurrences of digits 1-9, index 0 holds digit 1
    pub pythagorean_counts: [u8; 9],

    /// Occurrences of digits 1-8, index 0 holds digit 1
    pub chaldean_counts: [u8; 8],
}

impl PrecalculatedEntry {
    /// Compute the row for `name` the way ingestion does: no master numbers and
    /// no word reduction, in both number systems
    ///
    /// Returns `None` when the name holds characters that are not expected in a
    /// name, or a value too large for the table.
    ///
    /// # Example
    /// ```
    /// # use numerology::table::PrecalculatedEntry;
    /// # use numerology::types::Gender;
    /// let row = PrecalculatedEntry::from_name("Bacon", Gender::Male).unwrap();
    /// assert_eq!(row.pythagorean.full, 17);
    /// assert!(PrecalculatedEntry::from_name("B@con", Gender::Male).is_none());
    /// ```
    pub fn from_name(name: &str, gender: Gender) -> Option<Self> {
        let pythagorean = NameNumerology::new(name, NameOpts::new(PYTHAGOREAN, vec![], false));
        let chaldean = NameNumerology::new(name, NameOpts::new(CHALDEAN, vec![], false));
        if !pythagorean.unknown_characters().is_empty() || !chaldean.unknown_characters().is_empty()
        {
            return None;
        }

        let mut pythagorean_counts = [0u8; 9];
        for (digit, count) in pythagorean.counts().iter() {
            pythagorean_counts[digit as usize - 1] = u8::try_from(count).ok()?;
        }
        let mut chaldean_counts = [0u8; 8];
        for (digit, count) in chaldean.counts().iter() {
            chaldean_counts[digit as usize - 1] = u8::try_from(count).ok()?;
        }

        Some(Self {
            name: pythagorean.name().to_string(),
            gender,
            pythagorean: SystemValues::from_name(&pythagorean)?,
            chaldean: SystemValues::from_name(&chaldean)?,
            pythagorean_counts,
            chaldean_counts,
        })
    }

    pub fn values(&self, system: NumberSystem) -> SystemValues {
        if system == CHALDEAN {
            self.chaldean
        } else {
            self.pythagorean
        }
    }

    /// Stored count of `digit`, 0 for digits the system does not use
    pub fn count(&self, system: NumberSystem, digit: u32) -> u8 {
        let counts: &[u8] = if system == CHALDEAN {
            &self.chaldean_counts
        } else {
            &self.pythagorean_counts
        };
        digit
            .checked_sub(1)
            .and_then(|i| counts.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Every numeric column paired with its value, in table order
    pub fn column_values(&self) -> Vec<(String, u8)> {
        let mut columns = Vec::with_capacity(23);
        for system in [PYTHAGOREAN, CHALDEAN] {
            let values = self.values(system);
            for kind in ValueKind::ALL {
                columns.push((kind.column(system), values.get(kind)));
            }
        }
        for system in [PYTHAGOREAN, CHALDEAN] {
            for &digit in system.valid_numbers() {
                columns.push((count_column(system, digit), self.count(system, digit)));
            }
        }
        columns
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_columns() {
        assert_eq!(ValueKind::Full.column(PYTHAGOREAN), "pythagorean_full");
        assert_eq!(ValueKind::Vowels.column(CHALDEAN), "chaldean_vowels");
        assert_eq!(ValueKind::Consonants.column(CHALDEAN), "chaldean_consonants");
    }

    #[test]
    fn test_validate_table_name() {
        assert!(validate_table_name("usa").is_ok());
        assert!(validate_table_name("_names_2021").is_ok());
        for bad in ["", "1usa", "usa; DROP TABLE usa", "us-a", "usa names"] {
            assert!(
                matches!(
                    validate_table_name(bad),
                    Err(NumerologyError::InvalidTableName(_))
                ),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn test_entry_values() {
        let row = PrecalculatedEntry::from_name("Kevin", Gender::Male).unwrap();
        // k e v i n = 2 5 4 9 5
        assert_eq!(row.pythagorean.full, 25);
        assert_eq!(row.pythagorean.vowels, 14);
        assert_eq!(row.pythagorean.consonants, 11);
        assert_eq!(row.count(PYTHAGOREAN, 5), 2);
        assert_eq!(row.count(PYTHAGOREAN, 1), 0);
        assert_eq!(row.count(CHALDEAN, 9), 0);
        assert_eq!(row.gender, Gender::Male);
    }

    #[test]
    fn test_entry_rejects_unacceptable_characters() {
        assert!(PrecalculatedEntry::from_name("Ann*", Gender::Female).is_none());
        assert!(PrecalculatedEntry::from_name("Ann-Marie", Gender::Female).is_some());
    }

    #[test]
    fn test_column_values_layout() {
        let row = PrecalculatedEntry::from_name("Zoe", Gender::Female).unwrap();
        let columns = row.column_values();
        assert_eq!(columns.len(), 6 + 9 + 8);
        assert_eq!(columns[0].0, "pythagorean_full");
        assert_eq!(columns[5].0, "chaldean_consonants");
        assert_eq!(columns[6].0, "p1");
        assert_eq!(columns[22].0, "c8");
        let c7 = columns.iter().find(|(c, _)| c == "c7").unwrap();
        assert_eq!(c7.1, 2);
    }

    #[test]
    fn test_fixture_table() {
        let conn = fixtures::name_table("t", &[("Anna", Gender::Female), ("Bob", Gender::Male)]);
        let n: i64 = conn
            .query_row("SELECT count(*) FROM t WHERE p1 = 2", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 1);
    }
}
