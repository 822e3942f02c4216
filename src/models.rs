// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

pub const EXPENSE_CATEGORIES: [&str; 12] = [
    "impulse",
    "take-out",
    "groceries",
    "home needs",
    "Son needs",
    "son impulse",
    "charity",
    "loan emi",
    "LIC",
    "investment",
    "foolish commitments",
    "transport",
];

pub const INCOME_CATEGORIES: [&str; 2] = ["Salary", "Other"];

/// Spellings used by older spreadsheets, mapped to the stored name.
const INCOME_ALIASES: [(&str, &str); 2] =
    [("Salary Income", "Salary"), ("Other Income", "Other")];

/// Categories highlighted in listings as avoidable spend.
pub const DISCRETIONARY_CATEGORIES: [&str; 3] = ["impulse", "son impulse", "foolish commitments"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Expense => "Expense",
            EntryKind::Income => "Income",
        }
    }

    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            EntryKind::Expense => &EXPENSE_CATEGORIES,
            EntryKind::Income => &INCOME_CATEGORIES,
        }
    }

    /// Resolves user input to the canonical spelling of a category in this kind's set.
    pub fn canonical_category(&self, raw: &str) -> Result<&'static str, ValidationError> {
        let wanted = raw.trim();
        let aliases: &[(&str, &'static str)] = match self {
            EntryKind::Income => &INCOME_ALIASES,
            EntryKind::Expense => &[],
        };
        self.categories()
            .iter()
            .copied()
            .find(|c| c.eq_ignore_ascii_case(wanted))
            .or_else(|| {
                aliases
                    .iter()
                    .find(|(alias, _)| alias.eq_ignore_ascii_case(wanted))
                    .map(|(_, canonical)| *canonical)
            })
            .ok_or_else(|| ValidationError::UnknownCategory {
                kind: self.as_str().to_lowercase(),
                category: wanted.to_string(),
            })
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(EntryKind::Expense),
            "income" => Ok(EntryKind::Income),
            _ => Err(ValidationError::InvalidKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "One-time")]
    OneTime,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::OneTime => "One-time",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Yearly => "Yearly",
        }
    }

    /// Months between two occurrences; `None` for a one-time schedule.
    pub fn step_months(&self) -> Option<i32> {
        match self {
            Frequency::OneTime => None,
            Frequency::Monthly => Some(1),
            Frequency::Quarterly => Some(3),
            Frequency::Yearly => Some(12),
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Frequency::OneTime)
    }

    /// Parses the frequency of a recurring schedule. `One-time` is not accepted here.
    pub fn parse_recurring(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Frequency::Monthly),
            "quarterly" => Ok(Frequency::Quarterly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(ValidationError::InvalidFrequency(s.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one-time" | "onetime" | "one time" => Ok(Frequency::OneTime),
            _ => Frequency::parse_recurring(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledExpense {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub frequency: Frequency,
}

impl ScheduledExpense {
    pub fn recurring(&self) -> bool {
        self.frequency.is_recurring()
    }
}

pub fn is_discretionary(category: &str) -> bool {
    DISCRETIONARY_CATEGORIES.contains(&category)
}
