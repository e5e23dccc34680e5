use crate::clock::Clock;
use crate::models::{Bucket, ModalResult, Period, Selection};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const TRAILING_MONTHS: i64 = 12;

/// Counts records per calendar unit of the selected range.
///
/// The result always covers the whole range, oldest first, with empty units
/// reported as zero. Records whose date is missing or falls outside the range
/// are skipped.
pub fn bucketize<R>(
    records: &[R],
    date_of: impl Fn(&R) -> Option<NaiveDate>,
    selection: &Selection,
    clock: &dyn Clock,
) -> Vec<Bucket> {
    let window = Window::resolve(selection, clock.today());
    let mut buckets: Vec<Bucket> = window
        .labels()
        .into_iter()
        .map(|label| Bucket { label, count: 0 })
        .collect();

    for date in records.iter().filter_map(&date_of) {
        if let Some(slot) = window.slot(date) {
            buckets[slot].count = buckets[slot].count.saturating_add(1);
        }
    }

    buckets
}

/// Most frequent category among the records admitted by `selection`.
///
/// `All` admits every record, dated or not. Ties go to the value seen first.
pub fn modal_category<R>(
    records: &[R],
    date_of: impl Fn(&R) -> Option<NaiveDate>,
    category_of: impl Fn(&R) -> Option<String>,
    selection: &Selection,
    clock: &dyn Clock,
) -> ModalResult {
    let window = Window::resolve(selection, clock.today());
    let mut tallies: Vec<(String, u64)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let admitted = match window {
            Window::Trailing { .. } => true,
            _ => date_of(record).is_some_and(|date| window.slot(date).is_some()),
        };
        if !admitted {
            continue;
        }
        let value = category_of(record).filter(|value| !value.trim().is_empty());
        let Some(value) = value else {
            continue;
        };
        match positions.get(&value) {
            Some(&index) => tallies[index].1 += 1,
            None => {
                positions.insert(value.clone(), tallies.len());
                tallies.push((value, 1));
            }
        }
    }

    let mut best: Option<(String, u64)> = None;
    for (value, count) in tallies {
        if best.as_ref().is_none_or(|(_, top)| count > *top) {
            best = Some((value, count));
        }
    }

    match best {
        Some((value, count)) => ModalResult {
            value: Some(value),
            count,
        },
        None => ModalResult::default(),
    }
}

/// Sum of bucket counts.
pub fn total(buckets: &[Bucket]) -> u64 {
    buckets
        .iter()
        .fold(0u64, |acc, bucket| acc.saturating_add(bucket.count))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    Days { year: i32, month: u32 },
    Months { year: i32 },
    // months since year 0, inclusive end
    Trailing { end: i64 },
}

impl Window {
    fn resolve(selection: &Selection, today: NaiveDate) -> Self {
        let month = selection.month.and_then(valid_month);
        let year = selection.year.unwrap_or_else(|| today.year());
        match selection.period {
            Period::Month => Window::Days {
                year,
                month: month.unwrap_or_else(|| today.month()),
            },
            Period::Year => match month {
                Some(month) => Window::Days { year, month },
                None => Window::Months { year },
            },
            Period::All => Window::Trailing {
                end: month_index(today.year(), today.month()),
            },
        }
    }

    fn labels(&self) -> Vec<String> {
        match *self {
            Window::Days { year, month } => (1..=days_in_month(year, month))
                .map(|day| day.to_string())
                .collect(),
            Window::Months { .. } => MONTH_ABBR
                .iter()
                .map(|name| name.to_string())
                .collect(),
            Window::Trailing { end } => (end - TRAILING_MONTHS + 1..=end)
                .map(|index| {
                    let month0 = index.rem_euclid(12) as usize;
                    format!("{} {}", MONTH_ABBR[month0], index.div_euclid(12))
                })
                .collect(),
        }
    }

    fn slot(&self, date: NaiveDate) -> Option<usize> {
        match *self {
            Window::Days { year, month } => {
                let inside = date.year() == year && date.month() == month;
                inside.then(|| date.day0() as usize)
            }
            Window::Months { year } => (date.year() == year).then(|| date.month0() as usize),
            Window::Trailing { end } => {
                let start = end - TRAILING_MONTHS + 1;
                let offset = month_index(date.year(), date.month()) - start;
                (0..TRAILING_MONTHS).contains(&offset).then_some(offset as usize)
            }
        }
    }
}

fn valid_month(month: i32) -> Option<u32> {
    (1..=12).contains(&month).then_some(month as u32)
}

fn month_index(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
