// Numerology Inverse Range Solver
// Finds the unreduced values an unknown name part needs to reach target results

use crate::reduce::reduce;

/// Target values split by sign
///
/// Non-negative entries are acceptable, negative entries are excluded by their
/// absolute value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    pub acceptable: Vec<u32>,
    pub excluded: Vec<u32>,
}

impl TargetSet {
    pub fn new(targets: &[i32]) -> Self {
        let mut set = TargetSet::default();
        for &t in targets {
            if t >= 0 {
                set.acceptable.push(t as u32);
            } else {
                set.excluded.push(t.unsigned_abs());
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.acceptable.is_empty() && self.excluded.is_empty()
    }

    /// Decide whether a reduction sequence satisfies the targets
    ///
    /// Steps are checked in order. The first step that is excluded rejects, the
    /// first step that is acceptable accepts. With no acceptable values, any
    /// sequence that never hits an excluded value is accepted.
    pub fn accepts(&self, steps: &[u32]) -> bool {
        for step in steps {
            if self.excluded.contains(step) {
                return false;
            }
            if self.acceptable.contains(step) {
                return true;
            }
        }
        self.acceptable.is_empty()
    }
}

/// Unreduced values `i` in `1..=max_search_number - min_search_number` that, added
/// to a known part worth `min_search_number`, give a name matching `targets`
///
/// With `reduce_words` the unknown part is reduced on its own first, the same way
/// a separate word would be; otherwise its raw value is added.
///
/// # Example
/// ```
/// # use numerology::solver::generate_lookup_numbers;
/// // "? Bacon": Bacon reduces to 8, table values run up to 30
/// let nums = generate_lookup_numbers(8, 38, &[1], &[], true);
/// // every i that reduces to 2 gives 8 + 2 = 10 -> 1
/// assert_eq!(nums, vec![2, 11, 20, 29]);
/// ```
pub fn generate_lookup_numbers(
    min_search_number: u32,
    max_search_number: u32,
    targets: &[i32],
    master_numbers: &[u32],
    reduce_words: bool,
) -> Vec<u32> {
    let targets = TargetSet::new(targets);
    let span = max_search_number.saturating_sub(min_search_number);

    (1..=span)
        .filter(|&i| {
            let part = if reduce_words {
                reduce(i, master_numbers).last().copied().unwrap_or(i)
            } else {
                i
            };
            targets.accepts(&reduce(min_search_number + part, master_numbers))
        })
        .collect()
}
