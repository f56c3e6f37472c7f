use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::subscription::Category;

/// Calendar month. Variant order is calendar order, so the derived `Ord`
/// sorts chronologically within a year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn from_date(date: NaiveDate) -> Self {
        // month0 is guaranteed to be in 0..12.
        Self::ALL[date.month0() as usize]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Three-letter label used by trend output.
    pub fn abbrev(&self) -> &'static str {
        &self.name()[..3]
    }
}

/// One historical spend snapshot, keyed by `(month, year)`. The per-category
/// map always covers every known category, zero-filled when unused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpendingRecord {
    pub month: Month,
    pub year: i32,
    pub total_spend: f64,
    pub by_category: BTreeMap<Category, f64>,
}

impl SpendingRecord {
    pub fn period(&self) -> (i32, Month) {
        (self.year, self.month)
    }

    /// A category map with every key present and zeroed.
    pub fn empty_categories() -> BTreeMap<Category, f64> {
        Category::ALL.iter().map(|c| (*c, 0.0)).collect()
    }
}

/// A single point of the chronological spending trend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub amount: f64,
}
