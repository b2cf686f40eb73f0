// Numerology Type Definitions
// Error kinds, search selectors and the value objects produced by calculations

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T, E = NumerologyError> = std::result::Result<T, E>;

/// Problems with the `?` placeholder in a search template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("missing '?' in name")]
    MissingPlaceholder,

    #[error("too many '?' in name: found {found}, only one '?' can be searched at a time")]
    TooManyPlaceholders { found: usize },
}

/// Everything a calculation or search can report
#[derive(Debug, Error)]
pub enum NumerologyError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("invalid table name '{0}': only letters, digits and '_' are allowed")]
    InvalidTableName(String),

    #[error("database table {0} does not exist")]
    TableNotFound(String),

    #[error("database table {0} is empty")]
    EmptyTable(String),

    #[error("unable to open database {path}: {source}")]
    Connection {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database query failed: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("unknown number system: {0}")]
    UnknownNumberSystem(String),

    #[error("unknown gender code: '{0}'")]
    UnknownGender(String),
}

/// Gender filter for name searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gender {
    /// Names recorded as male
    Male,
    /// Names recorded as female
    Female,
    /// No filtering
    #[default]
    Both,
}

impl Gender {
    /// Single-letter code stored in the table, `None` when no filter applies
    pub fn table_code(self) -> Option<&'static str> {
        match self {
            Gender::Male => Some("M"),
            Gender::Female => Some("F"),
            Gender::Both => None,
        }
    }

    /// Parse a gender code. Only the first letter matters: (m)ale, (f)emale, (b)oth.
    pub fn parse(code: &str) -> Result<Self> {
        match code.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('M') => Ok(Gender::Male),
            Some('F') => Ok(Gender::Female),
            Some('B') => Ok(Gender::Both),
            _ => Err(NumerologyError::UnknownGender(code.to_string())),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = NumerologyError;

    fn try_from(value: String) -> Result<Self> {
        Gender::parse(&value)
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.to_string()
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "M"),
            Gender::Female => write!(f, "F"),
            Gender::Both => write!(f, "B"),
        }
    }
}

/// Ordering applied to name search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SortOrder {
    /// Most popular names first (ascending row id)
    #[default]
    Common,
    /// Popularity order, starting past the common names
    Uncommon,
    /// Seeded pseudorandom order
    Random,
}

impl SortOrder {
    /// Parse a sort name. Anything unrecognised falls back to `Common`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "uncommon" => SortOrder::Uncommon,
            "random" => SortOrder::Random,
            _ => SortOrder::Common,
        }
    }
}

impl From<String> for SortOrder {
    fn from(value: String) -> Self {
        SortOrder::parse(&value)
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Common => write!(f, "common"),
            SortOrder::Uncommon => write!(f, "uncommon"),
            SortOrder::Random => write!(f, "random"),
        }
    }
}

/// A single character of a name (or digit of a date) and the value it contributed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterValue {
    pub letter: String,
    pub value: u32,
}

impl LetterValue {
    pub fn new(letter: impl Into<String>, value: u32) -> Self {
        Self {
            letter: letter.into(),
            value,
        }
    }
}

/// Calculation for one word of a name, or one component of a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    /// Final value; always the last reduction step
    pub value: u32,

    /// Every value from the raw sum to the final value
    pub reduce_steps: Vec<u32>,

    /// Per-letter contributions, masked-out letters carry 0
    pub letter_values: Vec<LetterValue>,
}

/// Aggregate calculation over every word of a name or every part of a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumerologicalResult {
    pub value: u32,
    pub reduce_steps: Vec<u32>,
    pub breakdown: Vec<Breakdown>,
}

/// Digits that occur the most in a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HiddenPassionResults {
    /// Digits sharing the highest count, ascending
    pub numbers: Vec<u32>,
    pub max_count: u32,
}

/// Digits that never occur in a name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KarmicLessonResults {
    #[serde(rename = "karmic_lessons")]
    pub numbers: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_display() {
        assert_eq!(SortOrder::Common.to_string(), "common");
        assert_eq!(SortOrder::Uncommon.to_string(), "uncommon");
        assert_eq!(SortOrder::Random.to_string(), "random");
    }

    #[test]
    fn test_sort_order_catch_all() {
        assert_eq!(SortOrder::parse("RANDOM"), SortOrder::Random);
        assert_eq!(SortOrder::parse("uncommon"), SortOrder::Uncommon);
        assert_eq!(SortOrder::parse("popular"), SortOrder::Common);
        assert_eq!(SortOrder::parse(""), SortOrder::Common);
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("m").unwrap(), Gender::Male);
        assert_eq!(Gender::parse("Female").unwrap(), Gender::Female);
        assert_eq!(Gender::parse("b").unwrap(), Gender::Both);
        assert!(matches!(
            Gender::parse("x"),
            Err(NumerologyError::UnknownGender(_))
        ));
        assert!(Gender::parse("").is_err());
    }

    #[test]
    fn test_gender_table_code() {
        assert_eq!(Gender::Male.table_code(), Some("M"));
        assert_eq!(Gender::Female.table_code(), Some("F"));
        assert_eq!(Gender::Both.table_code(), None);
    }

    #[test]
    fn test_template_error_messages() {
        assert_eq!(
            TemplateError::MissingPlaceholder.to_string(),
            "missing '?' in name"
        );
        let err: NumerologyError = TemplateError::TooManyPlaceholders { found: 2 }.into();
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn test_letter_value_builder() {
        let lv = LetterValue::new("a", 1);
        assert_eq!(lv.letter, "a");
        assert_eq!(lv.value, 1);
    }
}
