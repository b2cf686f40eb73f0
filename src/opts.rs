// Numerology Options
// Calculation and search options for names and dates

use crate::number_system::NumberSystem;
use crate::types::{Gender, SortOrder};
use serde::{Deserialize, Serialize};

/// Page size used when a search asks for 0 results
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Settings needed to calculate a name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NameOpts {
    pub number_system: NumberSystem,

    /// Values that are never reduced further, conventionally 11, 22, 33
    pub master_numbers: Vec<u32>,

    /// Reduce each word on its own before combining, instead of summing the whole name first
    pub reduce_words: bool,
}

impl NameOpts {
    pub fn new(number_system: NumberSystem, master_numbers: Vec<u32>, reduce_words: bool) -> Self {
        Self {
            number_system,
            master_numbers,
            reduce_words,
        }
    }
}

/// Criteria and paging for a name search
///
/// For `full`, `vowels`, `consonants`, `hidden_passions` and `karmic_lessons`,
/// positive numbers must be present in the result and negative numbers must be
/// absent. An empty list means no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NameSearchOpts {
    /// Number of names to return; 0 uses the engine default
    pub count: usize,

    /// Continuation offset returned by the previous page
    pub offset: i64,

    /// Seed for random ordering. Reuse it to page through the same random order.
    pub seed: i64,

    /// Table to search
    pub dictionary: String,

    pub gender: Gender,

    pub sort: SortOrder,

    /// Values calculated from every letter (destiny / expression)
    pub full: Vec<i32>,

    /// Values calculated from vowels only (soul's urge / heart's desire)
    pub vowels: Vec<i32>,

    /// Values calculated from consonants only (personality)
    pub consonants: Vec<i32>,

    /// Digits that must (or must not) be among the most frequent
    pub hidden_passions: Vec<i32>,

    /// Digits that must (or must not) be missing
    pub karmic_lessons: Vec<i32>,
}

impl NameSearchOpts {
    /// Search `dictionary` with no constraints
    pub fn new(dictionary: impl Into<String>) -> Self {
        Self {
            dictionary: dictionary.into(),
            ..Self::default()
        }
    }
}

/// Settings needed to calculate a date
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateOpts {
    pub master_numbers: Vec<u32>,
}

/// Criteria and paging for a forward date search
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateSearchOpts {
    pub count: usize,

    /// Days to skip from the start date
    pub offset: i64,

    /// Acceptable final values; empty accepts every date
    #[serde(rename = "match")]
    pub match_values: Vec<u32>,

    /// Length of the search window
    pub months_forward: u32,

    /// Days of the week to keep, 0 = Sunday ... 6 = Saturday; empty keeps all
    pub dow: Vec<u32>,

    /// Keep master numbers in the final reduction (birth dates) instead of reducing fully (events)
    pub life_path: bool,
}
