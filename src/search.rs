// Numerology Search Engine
// Main API that fills a name template from the precomputed name table

use crate::name::{normalize_name, NameNumerology};
use crate::opts::{NameOpts, NameSearchOpts, DEFAULT_PAGE_SIZE};
use crate::pattern::parse_template;
use crate::query::{
    gender_predicate, hidden_passion_predicates, karmic_lesson_predicates, like_predicate,
    value_predicate, Predicate, WhereClause,
};
use crate::table::{validate_table_name, ValueKind};
use crate::types::{NumerologyError, Result, SortOrder};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use rustc_hash::FxHashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Modulus of the seeded row ordering, the largest 31-bit prime
const RANDOM_MODULUS: i64 = 2_147_483_647;

/// Tunables of a [`NameSearch`] engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Page size used when a search asks for 0 results
    pub default_count: usize,

    /// First row id considered by the "uncommon" sort
    pub uncommon_threshold: i64,

    /// Largest table value assumed when the table cannot report one
    pub fallback_max_value: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_count: DEFAULT_PAGE_SIZE,
            uncommon_threshold: 5000,
            fallback_max_value: 100,
        }
    }
}

impl SearchConfig {
    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }

    pub fn with_uncommon_threshold(mut self, threshold: i64) -> Self {
        self.uncommon_threshold = threshold;
        self
    }

    pub fn with_fallback_max_value(mut self, value: u32) -> Self {
        self.fallback_max_value = value;
        self
    }
}

/// One page of a name search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    /// Full names with the placeholder filled in
    pub results: Vec<NameNumerology>,

    /// Offset to pass back for the next page; 0 when nothing is left
    pub offset: i64,
}

/// Search engine over one read-only name database
///
/// Combines all components:
/// - Template parsing (exactly one `?`)
/// - Inverse range solving for full/vowel/consonant targets
/// - Digit-count predicates for hidden passions and karmic lessons
/// - Ordering and paging (common, uncommon, seeded random)
///
/// The largest value stored in each table is looked up once and cached.
pub struct NameSearch {
    conn: Mutex<Connection>,
    max_values: Mutex<FxHashMap<String, u32>>,
    config: SearchConfig,
}

impl NameSearch {
    /// Wrap an open, populated connection
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            max_values: Mutex::new(FxHashMap::default()),
            config: SearchConfig::default(),
        }
    }

    /// Open an SQLite database read-only
    ///
    /// # Arguments
    /// * `path` - Database file
    ///
    /// # Returns
    /// The engine, or `NumerologyError::Connection` when the file cannot be opened
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags).map_err(|source| {
            NumerologyError::Connection {
                path: path.display().to_string(),
                source,
            }
        })?;
        info!(path = %path.display(), "opened name database");
        Ok(Self::new(conn))
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Largest unreduced full value in `table` across both number systems
    ///
    /// Cached per table. Falls back to `SearchConfig::fallback_max_value` when
    /// the table cannot report a value.
    pub fn max_value(&self, table: &str) -> Result<u32> {
        let table = table.to_lowercase();
        validate_table_name(&table)?;
        let conn = self.connection();
        Ok(self.cached_max_value(&conn, &table))
    }

    fn cached_max_value(&self, conn: &Connection, table: &str) -> u32 {
        let mut cache = self.max_values.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(&value) = cache.get(table) {
            return value;
        }

        let sql = format!(
            "SELECT max(max(pythagorean_full), max(chaldean_full)) FROM {}",
            table
        );
        let value = match conn.query_row(&sql, [], |row| row.get::<_, Option<i64>>(0)) {
            Ok(Some(v)) => u32::try_from(v).unwrap_or(self.config.fallback_max_value),
            Ok(None) => {
                warn!(table, "table reports no maximum value, using fallback");
                self.config.fallback_max_value
            }
            Err(err) => {
                warn!(table, error = %err, "maximum value lookup failed, using fallback");
                self.config.fallback_max_value
            }
        };
        cache.insert(table.to_string(), value);
        value
    }

    /// Fail unless `table` exists and holds at least one row
    fn check_table(conn: &Connection, table: &str) -> Result<()> {
        let exists: i64 = conn.query_row(
            "SELECT count(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1 COLLATE NOCASE",
            [table],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(NumerologyError::TableNotFound(table.to_string()));
        }

        let rows: i64 =
            conn.query_row(&format!("SELECT count(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
        if rows == 0 {
            return Err(NumerologyError::EmptyTable(table.to_string()));
        }
        Ok(())
    }

    /// Find names that fill the `?` of `template` and satisfy `search`
    ///
    /// Vowel and consonant constraints are matched against the values stored
    /// for each table name on its own. A `y` that opens the filled word can be
    /// classified differently once it follows other words, so when the `?` is
    /// not in the first word a name like "Yoko" may come back with a vowel
    /// value outside the requested set ("Kevin ?" with vowels 8 can return
    /// "Kevin Yoko", whose vowel value is 33). Full values are not affected.
    ///
    /// # Arguments
    /// * `template` - Name with exactly one `?`, e.g. "? Bacon" or "Kevin Nor?d Bacon"
    /// * `opts` - How names are calculated (number system, master numbers, word reduction)
    /// * `search` - Table, constraints, ordering and paging
    ///
    /// # Returns
    /// Up to `search.count` full names and the offset of the next page
    ///
    /// # Example
    /// ```
    /// # use numerology::{NameOpts, NameSearch, NameSearchOpts, PYTHAGOREAN};
    /// # use rusqlite::Connection;
    /// let engine = NameSearch::new(Connection::open_in_memory().unwrap());
    /// let opts = NameOpts::new(PYTHAGOREAN, vec![11, 22, 33], true);
    /// // templates are checked before the table is touched
    /// assert!(engine.search("Kevin Bacon", &opts, &NameSearchOpts::new("usa")).is_err());
    /// ```
    pub fn search(
        &self,
        template: &str,
        opts: &NameOpts,
        search: &NameSearchOpts,
    ) -> Result<SearchPage> {
        let parsed = parse_template(&normalize_name(template))?;

        let table = search.dictionary.to_lowercase();
        validate_table_name(&table)?;

        let conn = self.connection();
        Self::check_table(&conn, &table)?;

        let shared = Arc::new(opts.clone());
        let known = NameNumerology::with_shared_opts(&parsed.reconstructed, Arc::clone(&shared));
        let count = if search.count == 0 {
            self.config.default_count
        } else {
            search.count
        };

        let mut clause = WhereClause::new();

        if let Some(pattern) = parsed.like_pattern() {
            clause.push(like_predicate(&pattern));
        }
        if let Some(gender) = gender_predicate(search.gender) {
            clause.push(gender);
        }

        match search.sort {
            SortOrder::Common => {
                clause.push(Predicate::with_param("id >= ?", search.offset));
            }
            SortOrder::Uncommon => {
                let start = search.offset.max(self.config.uncommon_threshold);
                clause.push(Predicate::with_param("id >= ?", start));
            }
            SortOrder::Random => {}
        }

        clause.extend(hidden_passion_predicates(
            known.counts(),
            &search.hidden_passions,
        ));
        clause.extend(karmic_lesson_predicates(
            known.counts(),
            &search.karmic_lessons,
        ));

        let targets = [
            (ValueKind::Full, &search.full),
            (ValueKind::Vowels, &search.vowels),
            (ValueKind::Consonants, &search.consonants),
        ];
        if targets.iter().any(|(_, t)| !t.is_empty()) {
            let max_value = self.cached_max_value(&conn, &table);
            for (kind, target) in targets {
                let known_result = match kind {
                    ValueKind::Full => known.full(),
                    ValueKind::Vowels => known.vowels(),
                    ValueKind::Consonants => known.consonants(),
                };
                let known_value = known_result.reduce_steps.first().copied().unwrap_or(0);
                if let Some(predicate) = value_predicate(
                    &kind.column(opts.number_system),
                    known_value,
                    max_value,
                    target,
                    &opts.master_numbers,
                    opts.reduce_words,
                ) {
                    clause.push(predicate);
                }
            }
        }

        let (order, page_offset) = match search.sort {
            SortOrder::Random => (random_order(search.seed), search.offset.max(0)),
            _ => ("id".to_string(), 0),
        };
        let sql = format!(
            "SELECT id, name FROM (SELECT min(id) AS id, name FROM {} {} GROUP BY name) ORDER BY {} LIMIT {} OFFSET {}",
            table,
            clause.to_sql(),
            order,
            count.saturating_add(1),
            page_offset
        );
        debug!(table = %table, predicates = clause.len(), sql = %sql, "name search");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(clause.params()), |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut offset = 0;
        let mut results = Vec::with_capacity(rows.len().min(count));
        for (i, (id, name)) in rows.into_iter().enumerate() {
            if i < count {
                results.push(NameNumerology::with_shared_opts(
                    &parsed.substitute(&name),
                    Arc::clone(&shared),
                ));
            } else {
                offset = match search.sort {
                    SortOrder::Random => page_offset + count as i64,
                    _ => id,
                };
            }
        }

        Ok(SearchPage { results, offset })
    }
}

/// Seed-derived row ordering; the same seed always gives the same order
fn random_order(seed: i64) -> String {
    let mut rng = ChaCha20Rng::seed_from_u64(seed as u64);
    let multiplier: i64 = rng.gen_range(1..RANDOM_MODULUS);
    let increment: i64 = rng.gen_range(0..RANDOM_MODULUS);
    format!(
        "((id * {} + {}) % {}), id",
        multiplier, increment, RANDOM_MODULUS
    )
}
