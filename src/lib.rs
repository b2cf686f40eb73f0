//! # Numerology: Name and Date Scoring with Constraint Search
//!
//! Calculates numerological values of names and dates, and searches a
//! precomputed table of names for ones that give a wanted result without
//! recalculating every row.
//!
//! ## Calculations
//!
//! 1. **Names** - full (destiny), vowels (soul's urge) and consonants (personality)
//!    - Pythagorean or Chaldean letter values
//!    - Optional master numbers that stop reduction (11, 22, 33)
//!    - Whole-name or word-by-word reduction
//! 2. **Digit counts** - hidden passions (most frequent digits) and karmic lessons (missing digits)
//! 3. **Dates** - life path and event numbers, plus forward date searches
//!
//! ## Search Templates
//!
//! - `?` marks the part of the name to fill from the table, exactly once
//! - `? Bacon` - any first name
//! - `Kevin Nor?d Bacon` - middle names starting with "nor" and ending with "d"
//!
//! ## Example Usage
//!
//! ```ignore
//! use numerology::{NameNumerology, NameOpts, NameSearch, NameSearchOpts, PYTHAGOREAN};
//!
//! let opts = NameOpts::new(PYTHAGOREAN, vec![11, 22, 33], true);
//!
//! // Direct calculation
//! let name = NameNumerology::new("Kevin Norwood Bacon", opts.clone());
//! assert_eq!(name.full().value, 2);
//!
//! // Search
//! let engine = NameSearch::open("names.sqlite")?;
//! let mut search = NameSearchOpts::new("usa");
//! search.full = vec![1];
//! search.hidden_passions = vec![5];
//! let page = engine.search("? Bacon", &opts, &search)?;
//! for result in &page.results {
//!     println!("{} {}", result.name(), result.full().value);
//! }
//! # Ok::<(), numerology::NumerologyError>(())
//! ```
//!
//! ## Architecture
//!
//! - **Number Systems** - Letter to digit tables
//! - **Letter Mask** - Vowel/consonant classification with the `y` rules
//! - **Reducer** - Digit sums with master number stops
//! - **Scorer** - Letter values, reductions and digit counts
//! - **Solver** - Unreduced values an unknown name part needs
//! - **Query Builder** - SQL predicates over the name table
//! - **NameSearch API** - Main entry point combining all components

pub mod date;
pub mod mask;
pub mod name;
pub mod number_system;
pub mod opts;
pub mod pattern;
pub mod query;
pub mod reduce;
pub mod scorer;
pub mod search;
pub mod solver;
pub mod table;
pub mod types;

// Re-export main types and functions for convenience
pub use date::{calculate_date, dates, DateNumerology, DatePage};
pub use mask::LetterMask;
pub use name::{names, normalize_name, NameNumerology};
pub use number_system::{NumberSystem, CHALDEAN, PYTHAGOREAN};
pub use opts::{DateOpts, DateSearchOpts, NameOpts, NameSearchOpts, DEFAULT_PAGE_SIZE};
pub use pattern::{parse_template, ParsedTemplate};
pub use reduce::reduce;
pub use scorer::{DigitCounts, UnknownCharacters};
pub use search::{NameSearch, SearchConfig, SearchPage};
pub use solver::generate_lookup_numbers;
pub use table::{PrecalculatedEntry, ValueKind};
pub use types::{
    Breakdown, Gender, HiddenPassionResults, KarmicLessonResults, LetterValue,
    NumerologicalResult, NumerologyError, Result, SortOrder, TemplateError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
