// Numerology Names
// A name plus its calculation options, with cached letter mask and digit counts

use crate::mask::LetterMask;
use crate::opts::{NameOpts, NameSearchOpts};
use crate::scorer::{calculate_core_number, count_numbers, DigitCounts, UnknownCharacters};
use crate::search::{NameSearch, SearchPage};
use crate::types::{HiddenPassionResults, KarmicLessonResults, NumerologicalResult, Result};
use regex::Regex;
use std::cell::OnceCell;
use std::sync::{Arc, LazyLock};

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t]").expect("valid regex"));
static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Remove line breaks and tabs, collapse repeated whitespace and trim
///
/// # Example
/// ```
/// # use numerology::name::normalize_name;
/// assert_eq!(normalize_name("  Kevin \n  Bacon "), "Kevin Bacon");
/// ```
pub fn normalize_name(s: &str) -> String {
    let no_breaks = LINE_BREAKS.replace_all(s, "");
    WHITESPACE_RUNS
        .replace_all(&no_breaks, " ")
        .trim()
        .to_string()
}

/// A name whose numerological values can be calculated
///
/// The letter mask and digit counts are computed on first use and kept for the
/// life of the value.
#[derive(Debug, Clone)]
pub struct NameNumerology {
    name: String,
    opts: Arc<NameOpts>,
    mask: OnceCell<LetterMask>,
    counts: OnceCell<(DigitCounts, UnknownCharacters)>,
}

impl NameNumerology {
    /// Create a name, normalizing its whitespace
    pub fn new(name: &str, opts: NameOpts) -> Self {
        Self::with_shared_opts(name, Arc::new(opts))
    }

    /// Create a name that shares its options with other names
    pub fn with_shared_opts(name: &str, opts: Arc<NameOpts>) -> Self {
        Self {
            name: normalize_name(name),
            opts,
            mask: OnceCell::new(),
            counts: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn opts(&self) -> &NameOpts {
        &self.opts
    }

    fn mask(&self) -> &LetterMask {
        self.mask.get_or_init(|| LetterMask::new(&self.name))
    }

    fn counted(&self) -> &(DigitCounts, UnknownCharacters) {
        self.counts
            .get_or_init(|| count_numbers(&self.name, self.opts.number_system))
    }

    fn calculate(&self, mask: &[bool]) -> NumerologicalResult {
        calculate_core_number(
            &self.name,
            &self.opts.master_numbers,
            self.opts.reduce_words,
            self.opts.number_system,
            mask,
        )
    }

    /// Value of every letter of the name
    pub fn full(&self) -> NumerologicalResult {
        self.calculate(&self.mask().full())
    }

    /// Alias for [`NameNumerology::full`]
    pub fn destiny(&self) -> NumerologicalResult {
        self.full()
    }

    /// Alias for [`NameNumerology::full`]
    pub fn expression(&self) -> NumerologicalResult {
        self.full()
    }

    /// Value of the vowels only
    pub fn vowels(&self) -> NumerologicalResult {
        self.calculate(self.mask().vowels())
    }

    /// Alias for [`NameNumerology::vowels`]
    pub fn souls_urge(&self) -> NumerologicalResult {
        self.vowels()
    }

    /// Alias for [`NameNumerology::vowels`]
    pub fn hearts_desire(&self) -> NumerologicalResult {
        self.vowels()
    }

    /// Value of the consonants only
    pub fn consonants(&self) -> NumerologicalResult {
        self.calculate(&self.mask().consonants())
    }

    /// Alias for [`NameNumerology::consonants`]
    pub fn personality(&self) -> NumerologicalResult {
        self.consonants()
    }

    /// How often each digit occurs in the name
    pub fn counts(&self) -> &DigitCounts {
        &self.counted().0
    }

    /// Digit(s) that occur the most
    pub fn hidden_passions(&self) -> HiddenPassionResults {
        self.counts().hidden_passions()
    }

    /// Digit(s) that never occur
    pub fn karmic_lessons(&self) -> KarmicLessonResults {
        self.counts().karmic_lessons()
    }

    /// Characters that were ignored and are not normally found in names, sorted
    pub fn unknown_characters(&self) -> Vec<String> {
        self.counted().1.unacceptable().to_sorted_strings()
    }

    /// Search the table for names that fill this name's `?` and satisfy `opts`
    pub fn search(&self, engine: &NameSearch, opts: &NameSearchOpts) -> Result<SearchPage> {
        engine.search(&self.name, &self.opts, opts)
    }
}

impl PartialEq for NameNumerology {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.opts == other.opts
    }
}

impl Eq for NameNumerology {}

/// Build several names sharing one set of options
pub fn names<S: AsRef<str>>(list: &[S], opts: NameOpts) -> Vec<NameNumerology> {
    let opts = Arc::new(opts);
    list.iter()
        .map(|n| NameNumerology::with_shared_opts(n.as_ref(), Arc::clone(&opts)))
        .collect()
}
