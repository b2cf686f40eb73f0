// Integration tests for the constraint query builder run directly against SQLite

mod common;

use common::{populate, CORPUS, TABLE};
use numerology::query::{
    hidden_passion_predicates, karmic_lesson_predicates, like_predicate, lookup_predicate,
    value_predicate, Predicate, WhereClause,
};
use numerology::scorer::count_numbers;
use numerology::{
    generate_lookup_numbers, Gender, NumberSystem, PrecalculatedEntry, ValueKind, CHALDEAN,
    PYTHAGOREAN,
};
use rusqlite::{params_from_iter, Connection};

fn table() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    populate(&conn, TABLE, CORPUS);
    conn
}

/// Names matching `predicates`, in id order, duplicates kept
fn select(conn: &Connection, predicates: Vec<Predicate>) -> Vec<String> {
    let mut clause = WhereClause::new();
    clause.extend(predicates);
    let sql = format!("SELECT name FROM {} {} ORDER BY id", TABLE, clause.to_sql());
    let mut stmt = conn.prepare(&sql).unwrap();
    stmt.query_map(params_from_iter(clause.params()), |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

fn corpus_where<F>(keep: F) -> Vec<String>
where
    F: Fn(&PrecalculatedEntry) -> bool,
{
    CORPUS
        .iter()
        .map(|(n, g)| PrecalculatedEntry::from_name(n, *g).unwrap())
        .filter(|row| keep(row))
        .map(|row| row.name)
        .collect()
}

fn combined_counts(system: NumberSystem, known: &str, row: &PrecalculatedEntry) -> Vec<u32> {
    let (counts, _) = count_numbers(known, system);
    let mut total = vec![0u32; 10];
    for &digit in system.valid_numbers() {
        total[digit as usize] = counts.get(digit) + row.count(system, digit) as u32;
    }
    total
}

fn is_max(system: NumberSystem, totals: &[u32], digit: u32) -> bool {
    let max = system
        .valid_numbers()
        .iter()
        .map(|&d| totals[d as usize])
        .max()
        .unwrap();
    totals[digit as usize] == max
}

// ============ Lookup Tests ============

#[test]
fn test_lookup_predicate_selects_values() {
    let conn = table();
    let column = ValueKind::Full.column(PYTHAGOREAN);
    let names = select(&conn, vec![lookup_predicate(&column, &[16, 17])]);
    let expected = corpus_where(|row| matches!(row.pythagorean.full, 16 | 17));
    assert_eq!(names, expected);
}

#[test]
fn test_empty_lookup_selects_nothing() {
    let conn = table();
    let column = ValueKind::Vowels.column(CHALDEAN);
    assert!(select(&conn, vec![lookup_predicate(&column, &[])]).is_empty());
}

#[test]
fn test_value_predicate_matches_solver() {
    let conn = table();
    let column = ValueKind::Consonants.column(PYTHAGOREAN);
    let predicate = value_predicate(&column, 12, 60, &[7], &[11, 22, 33], false).unwrap();
    let lookup = generate_lookup_numbers(12, 72, &[7], &[11, 22, 33], false);
    let names = select(&conn, vec![predicate]);
    let expected = corpus_where(|row| lookup.contains(&(row.pythagorean.consonants as u32)));
    assert_eq!(names, expected);
}

#[test]
fn test_karmic_debt_lookup() {
    // intermediate 13 -> 4 is a karmic debt; exclude it but keep other 4s
    let lookup = generate_lookup_numbers(0, 80, &[-13], &[], false);
    assert!(!lookup.contains(&13));
    assert!(lookup.contains(&22));
    assert!(lookup.contains(&31));
    assert!(!lookup.contains(&49));
}

// ============ LIKE Tests ============

#[test]
fn test_like_predicate_escapes() {
    let conn = table();
    assert_eq!(
        select(&conn, vec![like_predicate("o'%")]),
        vec!["O'Neil".to_string()]
    );
    assert_eq!(
        select(&conn, vec![like_predicate("ann-%")]),
        vec!["Ann-Marie".to_string()]
    );
    // "_" is escaped, so it only matches a literal underscore
    assert!(select(&conn, vec![like_predicate("m\\_ry")]).is_empty());
}

// ============ Hidden Passion Tests ============

#[test]
fn test_hidden_passion_predicates_agree_with_counts() {
    let conn = table();
    for known in ["", "Bacon", "Anna Lee"] {
        for digit in 1..=9 {
            let (counts, _) = count_numbers(known, PYTHAGOREAN);
            let names = select(&conn, hidden_passion_predicates(&counts, &[digit]));
            let expected = corpus_where(|row| {
                is_max(PYTHAGOREAN, &combined_counts(PYTHAGOREAN, known, row), digit as u32)
            });
            assert_eq!(names, expected, "known {:?} digit {}", known, digit);
        }
    }
}

#[test]
fn test_hidden_passion_exclusions_agree_with_counts() {
    let conn = table();
    for known in ["", "Smith"] {
        let (counts, _) = count_numbers(known, CHALDEAN);
        let names = select(&conn, hidden_passion_predicates(&counts, &[-1, -5]));
        let expected = corpus_where(|row| {
            let totals = combined_counts(CHALDEAN, known, row);
            !is_max(CHALDEAN, &totals, 1) && !is_max(CHALDEAN, &totals, 5)
        });
        assert_eq!(names, expected, "known {:?}", known);
    }
}

#[test]
fn test_hidden_passion_tie_requires_both() {
    let conn = table();
    let (counts, _) = count_numbers("", PYTHAGOREAN);
    let names = select(&conn, hidden_passion_predicates(&counts, &[1, 5]));
    let expected = corpus_where(|row| {
        let totals = combined_counts(PYTHAGOREAN, "", row);
        is_max(PYTHAGOREAN, &totals, 1) && is_max(PYTHAGOREAN, &totals, 5)
    });
    assert_eq!(names, expected);
}

// ============ Karmic Lesson Tests ============

#[test]
fn test_karmic_lesson_predicates_agree_with_counts() {
    let conn = table();
    let (counts, _) = count_numbers("Bacon", PYTHAGOREAN);
    let names = select(&conn, karmic_lesson_predicates(&counts, &[4, -7]));
    let expected = corpus_where(|row| {
        let totals = combined_counts(PYTHAGOREAN, "Bacon", row);
        totals[4] == 0 && totals[7] > 0
    });
    assert_eq!(names, expected);
}

#[test]
fn test_gender_column() {
    let conn = table();
    let names = select(
        &conn,
        vec![numerology::query::gender_predicate(Gender::Female).unwrap()],
    );
    let expected = corpus_where(|row| row.gender == Gender::Female);
    assert_eq!(names, expected);
}
