// Numerology Constraint Query Builder
// Translates value and digit-count constraints into SQL predicates over the name table

use crate::number_system::NumberSystem;
use crate::pattern::LIKE_ESCAPE;
use crate::scorer::DigitCounts;
use crate::solver::generate_lookup_numbers;
use crate::table::count_column;
use crate::types::Gender;
use rusqlite::types::Value;

/// One SQL condition and the parameters bound to its `?` markers
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Predicate {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(sql: impl Into<String>, param: impl Into<Value>) -> Self {
        Self {
            sql: sql.into(),
            params: vec![param.into()],
        }
    }

    /// Matches no row
    pub fn never() -> Self {
        Self::new("0 = 1")
    }

    pub fn is_never(&self) -> bool {
        self.sql == "0 = 1"
    }

    /// Disjunction of `predicates`; an empty list matches no row
    pub fn any_of(predicates: Vec<Predicate>) -> Self {
        if predicates.is_empty() {
            return Self::never();
        }
        let sql = predicates
            .iter()
            .map(|p| p.sql.as_str())
            .collect::<Vec<_>>()
            .join(" OR ");
        Self {
            sql: format!("({})", sql),
            params: predicates.into_iter().flat_map(|p| p.params).collect(),
        }
    }
}

/// Conjunction of predicates making up a WHERE clause
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    predicates: Vec<Predicate>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    pub fn extend(&mut self, predicates: impl IntoIterator<Item = Predicate>) {
        self.predicates.extend(predicates);
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// `WHERE a AND b ...`, or an empty string when there are no predicates
    pub fn to_sql(&self) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }
        let joined = self
            .predicates
            .iter()
            .map(|p| p.sql.as_str())
            .collect::<Vec<_>>()
            .join(" AND ");
        format!("WHERE {}", joined)
    }

    /// Parameters in the order their markers appear in [`WhereClause::to_sql`]
    pub fn params(&self) -> Vec<Value> {
        self.predicates
            .iter()
            .flat_map(|p| p.params.iter().cloned())
            .collect()
    }
}

/// Combined count of `digit`: the table column plus what the known part already holds
fn total(system: NumberSystem, digit: u32, known: u32) -> String {
    let column = count_column(system, digit);
    if known == 0 {
        column
    } else {
        format!("{} + {}", column, known)
    }
}

fn push_unique(list: &mut Vec<u32>, digit: u32) {
    if !list.contains(&digit) {
        list.push(digit);
    }
}

/// `column IN (...)` over the unreduced values; an empty lookup matches no row
pub fn lookup_predicate(column: &str, lookup: &[u32]) -> Predicate {
    if lookup.is_empty() {
        return Predicate::never();
    }
    let values = lookup
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Predicate::new(format!("{} IN ({})", column, values))
}

/// Restrict an unreduced value column so the combined name reduces to one of `targets`
///
/// `known_value` is the unreduced value of the known part of the name and
/// `max_value` the largest value stored in the table. `None` when `targets` is
/// empty.
pub fn value_predicate(
    column: &str,
    known_value: u32,
    max_value: u32,
    targets: &[i32],
    master_numbers: &[u32],
    reduce_words: bool,
) -> Option<Predicate> {
    if targets.is_empty() {
        return None;
    }
    let lookup = generate_lookup_numbers(
        known_value,
        known_value.saturating_add(max_value),
        targets,
        master_numbers,
        reduce_words,
    );
    tracing::debug!(column, lookup = lookup.len(), "value lookup");
    Some(lookup_predicate(column, &lookup))
}

/// Case-insensitive match of the table name against a LIKE pattern
pub fn like_predicate(pattern: &str) -> Predicate {
    Predicate::with_param(
        format!("LOWER(name) LIKE ? ESCAPE '{}'", LIKE_ESCAPE),
        pattern.to_string(),
    )
}

/// Gender filter, `None` when both genders are wanted
pub fn gender_predicate(gender: Gender) -> Option<Predicate> {
    gender
        .table_code()
        .map(|code| Predicate::with_param("gender = ?", code.to_string()))
}

/// Predicates making the requested digits the most frequent in the combined name
///
/// Positive digits must share the highest count; negative digits must not
/// have it. Digits are de-duplicated. A positive digit the number system does
/// not use, or a digit that is both required and excluded, matches no row. A
/// negative digit the system does not use is ignored.
///
/// With at least one positive digit, the largest positive digit is the prime:
/// its combined count must reach the known part's maximum, other positive
/// digits must equal it, excluded digits must fall below it and every other
/// digit must not exceed it. With only negative digits, each excluded digit
/// must be out-counted by some digit that is not excluded.
pub fn hidden_passion_predicates(known: &DigitCounts, requested: &[i32]) -> Vec<Predicate> {
    let system = known.number_system();
    let mut required = Vec::new();
    let mut excluded = Vec::new();

    for &n in requested {
        let digit = n.unsigned_abs();
        if n >= 0 {
            if !system.is_valid_number(digit) {
                return vec![Predicate::never()];
            }
            push_unique(&mut required, digit);
        } else if system.is_valid_number(digit) {
            push_unique(&mut excluded, digit);
        }
    }

    if required.iter().any(|d| excluded.contains(d)) {
        return vec![Predicate::never()];
    }

    let total_of = |digit: u32| total(system, digit, known.get(digit));

    if let Some(&prime) = required.iter().max() {
        let prime_total = total_of(prime);
        let mut predicates = vec![Predicate::new(format!(
            "{} >= {}",
            prime_total,
            known.max_count()
        ))];
        for &digit in system.valid_numbers() {
            if digit == prime {
                continue;
            }
            let comparator = if required.contains(&digit) {
                "="
            } else if excluded.contains(&digit) {
                "<"
            } else {
                "<="
            };
            predicates.push(Predicate::new(format!(
                "{} {} {}",
                total_of(digit),
                comparator,
                prime_total
            )));
        }
        return predicates;
    }

    let candidates: Vec<u32> = system
        .valid_numbers()
        .iter()
        .copied()
        .filter(|d| !excluded.contains(d))
        .collect();

    excluded
        .iter()
        .map(|&e| {
            let excluded_total = total_of(e);
            Predicate::any_of(
                candidates
                    .iter()
                    .map(|&d| Predicate::new(format!("{} > {}", total_of(d), excluded_total)))
                    .collect(),
            )
        })
        .collect()
}

/// Predicates making the requested digits missing from the combined name
///
/// Positive digits must have a combined count of zero, negative digits must
/// occur at least once. A positive digit the number system does not use
/// matches no row; a negative one is ignored.
pub fn karmic_lesson_predicates(known: &DigitCounts, requested: &[i32]) -> Vec<Predicate> {
    let system = known.number_system();
    let mut missing = Vec::new();
    let mut present = Vec::new();

    for &n in requested {
        let digit = n.unsigned_abs();
        if n >= 0 {
            if !system.is_valid_number(digit) {
                return vec![Predicate::never()];
            }
            push_unique(&mut missing, digit);
        } else if system.is_valid_number(digit) {
            push_unique(&mut present, digit);
        }
    }

    if missing.iter().any(|d| present.contains(d)) {
        return vec![Predicate::never()];
    }

    let missing_predicates = missing.into_iter().map(|digit| {
        Predicate::new(format!(
            "{} <= 0",
            total(system, digit, known.get(digit))
        ))
    });
    let present_predicates = present.into_iter().map(|digit| {
        Predicate::new(format!("{} > 0", total(system, digit, known.get(digit))))
    });
    missing_predicates.chain(present_predicates).collect()
}
