// Numerology Dates
// Life path and event numbers, and forward searches for dates with a given value

use crate::opts::{DateOpts, DateSearchOpts, DEFAULT_PAGE_SIZE};
use crate::reduce::{reduce, split_number};
use crate::types::{Breakdown, LetterValue, NumerologicalResult};
use chrono::{Datelike, Months, NaiveDate, TimeDelta};
use std::sync::Arc;

/// A calendar date with its calculation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateNumerology {
    pub date: NaiveDate,
    opts: Arc<DateOpts>,
}

/// One page of a date search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePage {
    pub results: Vec<DateNumerology>,

    /// Day offset to pass back for the next page; 0 when nothing is left
    pub offset: i64,
}

impl DateNumerology {
    pub fn new(date: NaiveDate, master_numbers: Vec<u32>) -> Self {
        Self {
            date,
            opts: Arc::new(DateOpts { master_numbers }),
        }
    }

    pub fn opts(&self) -> &DateOpts {
        &self.opts
    }

    /// Number for an occasion such as a wedding. Master numbers are kept in the
    /// year, month and day but the final sum is always reduced to one digit.
    pub fn event(&self) -> NumerologicalResult {
        calculate_date(self.date, &self.opts.master_numbers, false)
    }

    /// Number for a birth date. Master numbers stop the final reduction too.
    pub fn life_path(&self) -> NumerologicalResult {
        calculate_date(self.date, &self.opts.master_numbers, true)
    }

    /// Scan forward from this date for days whose value is in `opts.match_values`
    ///
    /// The scan starts `opts.offset` days after this date and stops
    /// `opts.months_forward` months after it. The returned offset is the day
    /// index of the first match that did not fit in the page.
    pub fn search(&self, opts: &DateSearchOpts) -> DatePage {
        date_search(self.date, &self.opts, opts)
    }
}

/// Build several dates sharing one set of master numbers
pub fn dates(list: &[NaiveDate], master_numbers: Vec<u32>) -> Vec<DateNumerology> {
    let opts = Arc::new(DateOpts { master_numbers });
    list.iter()
        .map(|&date| DateNumerology {
            date,
            opts: Arc::clone(&opts),
        })
        .collect()
}

/// Digits of a date component; a master number stays whole
fn letter_values_from_number(n: u32, master_numbers: &[u32]) -> Vec<LetterValue> {
    if master_numbers.contains(&n) {
        return vec![LetterValue::new(n.to_string(), n)];
    }
    split_number(n as u64)
        .into_iter()
        .map(|d| LetterValue::new(d.to_string(), d))
        .collect()
}

/// Reduce year, month and day separately, then reduce their sum
///
/// `life_path` keeps `master_numbers` for the final reduction; otherwise the
/// sum is reduced to a single digit.
pub fn calculate_date(
    date: NaiveDate,
    master_numbers: &[u32],
    life_path: bool,
) -> NumerologicalResult {
    let parts = [date.year().unsigned_abs(), date.month(), date.day()];
    let mut total = 0;
    let mut breakdown = Vec::with_capacity(parts.len());

    for part in parts {
        let reduce_steps = reduce(part, master_numbers);
        let value = *reduce_steps.last().unwrap_or(&part);
        total += value;
        breakdown.push(Breakdown {
            value,
            reduce_steps,
            letter_values: letter_values_from_number(part, master_numbers),
        });
    }

    let final_masters: &[u32] = if life_path { master_numbers } else { &[] };
    let reduce_steps = reduce(total, final_masters);

    NumerologicalResult {
        value: *reduce_steps.last().unwrap_or(&total),
        reduce_steps,
        breakdown,
    }
}

fn date_search(start: NaiveDate, date_opts: &Arc<DateOpts>, opts: &DateSearchOpts) -> DatePage {
    let count = if opts.count == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        opts.count
    };
    let end = start
        .checked_add_months(Months::new(opts.months_forward))
        .unwrap_or(NaiveDate::MAX);

    let mut results = Vec::new();
    let mut offset = 0;
    let mut current =
        TimeDelta::try_days(opts.offset.max(0)).and_then(|skip| start.checked_add_signed(skip));

    while let Some(day) = current.filter(|d| *d < end) {
        current = day.succ_opt();

        let weekday = day.weekday().num_days_from_sunday();
        if !opts.dow.is_empty() && !opts.dow.contains(&weekday) {
            continue;
        }

        let calc = calculate_date(day, &date_opts.master_numbers, opts.life_path);
        if !opts.match_values.is_empty() && !opts.match_values.contains(&calc.value) {
            continue;
        }

        if results.len() == count {
            offset = (day - start).num_days();
            break;
        }
        results.push(DateNumerology {
            date: day,
            opts: Arc::clone(date_opts),
        });
    }

    DatePage { results, offset }
}
