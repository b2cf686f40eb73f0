// Shared fixtures: an in-memory name table built the way ingestion builds it

#![allow(dead_code)]

use numerology::{
    Gender, NameNumerology, NameOpts, NameSearch, NameSearchOpts, PrecalculatedEntry, SortOrder,
    PYTHAGOREAN,
};
use rusqlite::Connection;

/// Names in popularity order; ids are assigned 1, 2, 3, ...
pub const CORPUS: &[(&str, Gender)] = &[
    ("Mary", Gender::Female),
    ("James", Gender::Male),
    ("Patricia", Gender::Female),
    ("John", Gender::Male),
    ("Jennifer", Gender::Female),
    ("Robert", Gender::Male),
    ("Linda", Gender::Female),
    ("Michael", Gender::Male),
    ("Elizabeth", Gender::Female),
    ("William", Gender::Male),
    ("Barbara", Gender::Female),
    ("David", Gender::Male),
    ("Susan", Gender::Female),
    ("Richard", Gender::Male),
    ("Jessica", Gender::Female),
    ("Joseph", Gender::Male),
    ("Sarah", Gender::Female),
    ("Thomas", Gender::Male),
    ("Karen", Gender::Female),
    ("Charles", Gender::Male),
    ("Nancy", Gender::Female),
    ("Christopher", Gender::Male),
    ("Lisa", Gender::Female),
    ("Daniel", Gender::Male),
    ("Betty", Gender::Female),
    ("Matthew", Gender::Male),
    ("Margaret", Gender::Female),
    ("Anthony", Gender::Male),
    ("Sandra", Gender::Female),
    ("Mark", Gender::Male),
    ("Ashley", Gender::Female),
    ("Donald", Gender::Male),
    ("Kimberly", Gender::Female),
    ("Steven", Gender::Male),
    ("Emily", Gender::Female),
    ("Paul", Gender::Male),
    ("Donna", Gender::Female),
    ("Andrew", Gender::Male),
    ("Michelle", Gender::Female),
    ("Joshua", Gender::Male),
    ("Jordan", Gender::Male),
    ("Jordan", Gender::Female),
    ("Joan", Gender::Female),
    ("Josephine", Gender::Female),
    ("Kyle", Gender::Male),
    ("Barry", Gender::Male),
    ("Mickey", Gender::Male),
    ("Ann-Marie", Gender::Female),
    ("O'Neil", Gender::Male),
    ("Norwood", Gender::Male),
    ("Norbert", Gender::Male),
    ("Zoe", Gender::Female),
    ("Quincy", Gender::Male),
    ("Xavier", Gender::Male),
    ("Ivy", Gender::Female),
    ("Uma", Gender::Female),
    ("Oscar", Gender::Male),
    ("Hugh", Gender::Male),
    ("Gwen", Gender::Female),
    ("Fred", Gender::Male),
];

pub const TABLE: &str = "usa";

const SCHEMA: &str = "
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    gender VARCHAR(1) NOT NULL,
    pythagorean_full INTEGER NOT NULL,
    pythagorean_vowels INTEGER NOT NULL,
    pythagorean_consonants INTEGER NOT NULL,
    chaldean_full INTEGER NOT NULL,
    chaldean_vowels INTEGER NOT NULL,
    chaldean_consonants INTEGER NOT NULL,
    p1 INTEGER NOT NULL, p2 INTEGER NOT NULL, p3 INTEGER NOT NULL,
    p4 INTEGER NOT NULL, p5 INTEGER NOT NULL, p6 INTEGER NOT NULL,
    p7 INTEGER NOT NULL, p8 INTEGER NOT NULL, p9 INTEGER NOT NULL,
    c1 INTEGER NOT NULL, c2 INTEGER NOT NULL, c3 INTEGER NOT NULL,
    c4 INTEGER NOT NULL, c5 INTEGER NOT NULL, c6 INTEGER NOT NULL,
    c7 INTEGER NOT NULL, c8 INTEGER NOT NULL";

/// Create `table` and insert `names` in order
pub fn populate(conn: &Connection, table: &str, names: &[(&str, Gender)]) {
    conn.execute_batch(&format!("CREATE TABLE {} ({});", table, SCHEMA))
        .unwrap();

    for (name, gender) in names {
        let row = PrecalculatedEntry::from_name(name, *gender)
            .unwrap_or_else(|| panic!("{} should be a valid corpus name", name));
        let (columns, values): (Vec<String>, Vec<String>) = row
            .column_values()
            .into_iter()
            .map(|(column, value)| (column, value.to_string()))
            .unzip();
        conn.execute(
            &format!(
                "INSERT INTO {} (name, gender, {}) VALUES (?1, ?2, {})",
                table,
                columns.join(", "),
                values.join(", ")
            ),
            (&row.name, row.gender.to_string()),
        )
        .unwrap();
    }
}

pub fn engine() -> NameSearch {
    let conn = Connection::open_in_memory().unwrap();
    populate(&conn, TABLE, CORPUS);
    NameSearch::new(conn)
}

pub fn pythagorean(reduce_words: bool) -> NameOpts {
    NameOpts::new(PYTHAGOREAN, vec![11, 22, 33], reduce_words)
}

pub fn search_opts() -> NameSearchOpts {
    NameSearchOpts::new(TABLE)
}

/// Every result of a search, following continuation offsets
pub fn search_all(
    engine: &NameSearch,
    template: &str,
    opts: &NameOpts,
    search: &NameSearchOpts,
) -> Vec<NameNumerology> {
    let mut search = search.clone();
    search.sort = SortOrder::Common;
    search.count = 7;
    search.offset = 0;

    let mut all = Vec::new();
    loop {
        let page = engine.search(template, opts, &search).unwrap();
        all.extend(page.results);
        if page.offset == 0 {
            return all;
        }
        search.offset = page.offset;
    }
}

/// Distinct corpus names put in place of `?`, in popularity order
pub fn candidates(template: &str, opts: &NameOpts) -> Vec<NameNumerology> {
    let mut seen = Vec::new();
    for (name, _) in CORPUS {
        if !seen.contains(name) {
            seen.push(*name);
        }
    }
    seen.into_iter()
        .map(|name| NameNumerology::new(&template.replacen('?', name, 1), opts.clone()))
        .collect()
}

pub fn names_of(results: &[NameNumerology]) -> Vec<String> {
    results.iter().map(|r| r.name().to_string()).collect()
}

/// Assert a search returns exactly the candidates accepted by `expected`
pub fn assert_matches_brute_force<F>(
    template: &str,
    opts: &NameOpts,
    search: &NameSearchOpts,
    expected: F,
) where
    F: Fn(&NameNumerology) -> bool,
{
    let found = names_of(&search_all(&engine(), template, opts, search));
    let wanted = names_of(
        &candidates(template, opts)
            .into_iter()
            .filter(|c| expected(c))
            .collect::<Vec<_>>(),
    );
    assert_eq!(found, wanted);
}
