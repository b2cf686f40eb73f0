// Numerology Scorer
// Turns names into letter values, reduction steps and digit occurrence counts

use crate::number_system::NumberSystem;
use crate::reduce::reduce;
use crate::types::{
    Breakdown, HiddenPassionResults, KarmicLessonResults, LetterValue, NumerologicalResult,
};
use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::LazyLock;

/// Characters that carry no value but are normal in names: dashes (Hernandez-Johnson),
/// periods (Jr.), apostrophes (O'Neil) and whitespace
static ACCEPTABLE_UNKNOWN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-\s.']$").expect("valid regex"));

/// Characters that could not be converted to a value in a given number system
///
/// Not an error: the calculation ignores them. Exposed so callers can tell when a
/// result may be inaccurate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownCharacters {
    chars: FxHashSet<char>,
}

impl UnknownCharacters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a character, lowercased
    pub fn add(&mut self, ch: char) {
        self.chars.extend(ch.to_lowercase());
    }

    pub fn union(&self, other: &UnknownCharacters) -> UnknownCharacters {
        UnknownCharacters {
            chars: self.chars.union(&other.chars).copied().collect(),
        }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Drop the characters that are expected in names, keep the rest
    pub fn unacceptable(&self) -> UnknownCharacters {
        let chars = self
            .chars
            .iter()
            .copied()
            .filter(|c| {
                let mut buf = [0u8; 4];
                !ACCEPTABLE_UNKNOWN.is_match(c.encode_utf8(&mut buf))
            })
            .collect();
        UnknownCharacters { chars }
    }

    /// Characters as one-character strings, sorted
    pub fn to_sorted_strings(&self) -> Vec<String> {
        let mut chars: Vec<char> = self.chars.iter().copied().collect();
        chars.sort_unstable();
        chars.into_iter().map(String::from).collect()
    }
}

/// How often each valid digit of a number system occurs in a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitCounts {
    system: NumberSystem,

    /// Occurrences indexed by digit; index 0 is unused
    counts: [u32; 10],

    max_count: u32,
}

impl DigitCounts {
    /// Count for `digit`, 0 for digits the system does not use
    pub fn get(&self, digit: u32) -> u32 {
        if self.system.is_valid_number(digit) {
            self.counts[digit as usize]
        } else {
            0
        }
    }

    /// Highest count of any digit
    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    pub fn number_system(&self) -> NumberSystem {
        self.system
    }

    /// (digit, count) for every valid digit, ascending, zero counts included
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.system
            .valid_numbers()
            .iter()
            .map(move |&d| (d, self.counts[d as usize]))
    }

    /// Digits with the highest count
    pub fn hidden_passions(&self) -> HiddenPassionResults {
        let numbers = self
            .iter()
            .filter(|&(_, count)| count == self.max_count)
            .map(|(digit, _)| digit)
            .collect();
        HiddenPassionResults {
            numbers,
            max_count: self.max_count,
        }
    }

    /// Digits that never occur
    pub fn karmic_lessons(&self) -> KarmicLessonResults {
        let numbers = self
            .iter()
            .filter(|&(_, count)| count == 0)
            .map(|(digit, _)| digit)
            .collect();
        KarmicLessonResults { numbers }
    }
}

/// Count the occurrences of every digit in `name`
///
/// Characters without a mapping, or whose value is 0 (spaces, punctuation, the
/// digit 0), are recorded as unknown instead of counted.
///
/// # Example
/// ```
/// # use numerology::scorer::count_numbers;
/// # use numerology::number_system::PYTHAGOREAN;
/// let (counts, _) = count_numbers("a", PYTHAGOREAN);
/// assert_eq!(counts.karmic_lessons().numbers, vec![2, 3, 4, 5, 6, 7, 8, 9]);
/// ```
pub fn count_numbers(name: &str, system: NumberSystem) -> (DigitCounts, UnknownCharacters) {
    let mut counts = [0u32; 10];
    let mut max_count = 0;
    let mut unknowns = UnknownCharacters::new();

    for ch in name.chars() {
        match system.value(ch) {
            Some(v) if system.is_valid_number(v) => {
                counts[v as usize] += 1;
                max_count = max_count.max(counts[v as usize]);
            }
            _ => unknowns.add(ch),
        }
    }

    (
        DigitCounts {
            system,
            counts,
            max_count,
        },
        unknowns,
    )
}

/// Score one word. `mask` marks which characters participate.
///
/// When `reduce_word` is false the breakdown holds only the raw sum.
pub fn calculate_word(
    word: &[char],
    mask: &[bool],
    system: NumberSystem,
    master_numbers: &[u32],
    reduce_word: bool,
) -> Breakdown {
    let mut total = 0;
    let mut letter_values = Vec::with_capacity(word.len());

    for (i, &ch) in word.iter().enumerate() {
        let counted = mask.get(i).copied().unwrap_or(false);
        let value = match system.value(ch) {
            Some(v) if counted => v,
            _ => 0,
        };
        total += value;
        letter_values.push(LetterValue::new(ch, value));
    }

    let reduce_steps = if reduce_word {
        reduce(total, master_numbers)
    } else {
        vec![total]
    };

    Breakdown {
        value: *reduce_steps.last().unwrap_or(&total),
        reduce_steps,
        letter_values,
    }
}

/// Score a full name under `mask`
///
/// The name is split on spaces. With `reduce_words` each word is reduced on its
/// own and the word values are summed and reduced again; a single word keeps its
/// own reduction steps. Without it the raw letter sums are added and the total
/// is reduced once.
pub fn calculate_core_number(
    name: &str,
    master_numbers: &[u32],
    reduce_words: bool,
    system: NumberSystem,
    mask: &[bool],
) -> NumerologicalResult {
    let chars: Vec<char> = name.chars().collect();
    let mut breakdown = Vec::new();
    let mut total = 0;
    let mut start = 0;

    for end in 0..=chars.len() {
        if end < chars.len() && chars[end] != ' ' {
            continue;
        }
        if start != end {
            let word_mask = mask.get(start..end).unwrap_or(&[]);
            let calc = calculate_word(
                &chars[start..end],
                word_mask,
                system,
                master_numbers,
                reduce_words,
            );
            total += calc.value;
            breakdown.push(calc);
        }
        start = end + 1;
    }

    let reduce_steps = match breakdown.as_slice() {
        [only] if reduce_words => only.reduce_steps.clone(),
        _ => reduce(total, master_numbers),
    };

    NumerologicalResult {
        value: *reduce_steps.last().unwrap_or(&total),
        reduce_steps,
        breakdown,
    }
}
