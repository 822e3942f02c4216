// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::errors::ValidationError;
use crate::utils::days_in_month;

/// A calendar bucket: one month (`YYYY-MM`) or one year (`YYYY`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodKey {
    Month { year: i32, month: u32 },
    Year(i32),
}

impl PeriodKey {
    pub fn month(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ValidationError::InvalidPeriod(format!("{}-{:02}", year, month)));
        }
        Ok(PeriodKey::Month { year, month })
    }

    pub fn year(year: i32) -> Result<Self, ValidationError> {
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            return Err(ValidationError::InvalidPeriod(year.to_string()));
        }
        Ok(PeriodKey::Year(year))
    }

    pub fn current_month(today: NaiveDate) -> Self {
        PeriodKey::Month {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn current_year(today: NaiveDate) -> Self {
        PeriodKey::Year(today.year())
    }

    pub fn is_month(&self) -> bool {
        matches!(self, PeriodKey::Month { .. })
    }

    pub fn first_day(&self) -> NaiveDate {
        let (y, m) = match *self {
            PeriodKey::Month { year, month } => (year, month),
            PeriodKey::Year(year) => (year, 1),
        };
        NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let (y, m) = match *self {
            PeriodKey::Month { year, month } => (year, month),
            PeriodKey::Year(year) => (year, 12),
        };
        NaiveDate::from_ymd_opt(y, m, days_in_month(y, m)).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            PeriodKey::Month { year, month } => date.year() == year && date.month() == month,
            PeriodKey::Year(year) => date.year() == year,
        }
    }

    /// The month keys covered by this period, in calendar order.
    pub fn months(&self) -> Vec<PeriodKey> {
        match *self {
            PeriodKey::Month { .. } => vec![*self],
            PeriodKey::Year(year) => (1..=12)
                .map(|month| PeriodKey::Month { year, month })
                .collect(),
        }
    }

    /// Shifts a month key by `n` months; a year key by `n` years.
    pub fn offset(&self, n: i32) -> PeriodKey {
        match *self {
            PeriodKey::Month { year, month } => {
                let idx = month_index(year, month) + n;
                PeriodKey::Month {
                    year: idx.div_euclid(12),
                    month: (idx.rem_euclid(12) + 1) as u32,
                }
            }
            PeriodKey::Year(year) => PeriodKey::Year(year + n),
        }
    }
}

/// Months elapsed since year 0, used to compare month distances.
pub fn month_index(year: i32, month: u32) -> i32 {
    year * 12 + month as i32 - 1
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            PeriodKey::Year(year) => write!(f, "{:04}", year),
        }
    }
}

impl FromStr for PeriodKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let bad = || ValidationError::InvalidPeriod(s.to_string());
        let all_digits = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
        match raw.split_once('-') {
            Some((y, m)) if y.len() == 4 && m.len() == 2 && all_digits(y) && all_digits(m) => {
                let year: i32 = y.parse().map_err(|_| bad())?;
                let month: u32 = m.parse().map_err(|_| bad())?;
                PeriodKey::month(year, month).map_err(|_| bad())
            }
            None if raw.len() == 4 && all_digits(raw) => {
                let year: i32 = raw.parse().map_err(|_| bad())?;
                PeriodKey::year(year)
            }
            _ => Err(bad()),
        }
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
