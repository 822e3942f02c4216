// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejection raised at the store boundary when a record is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Unknown {kind} category '{category}'")]
    UnknownCategory { kind: String, category: String },
    #[error("Recurring schedule requires a frequency (Monthly, Quarterly or Yearly)")]
    MissingFrequency,
    #[error("Invalid frequency '{0}', expected Monthly, Quarterly or Yearly")]
    InvalidFrequency(String),
    #[error("Invalid entry type '{0}', expected Expense or Income")]
    InvalidKind(String),
    #[error("No record with id {0}")]
    UnknownId(i64),
    #[error("Invalid period '{0}', expected YYYY-MM or YYYY")]
    InvalidPeriod(String),
    #[error("Invalid user name '{0}'")]
    InvalidUser(String),
    #[error("Budget for '{0}' cannot be negative")]
    NegativeBudget(String),
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("Unknown setting '{0}'")]
    UnknownSetting(String),
    #[error("Invalid value '{value}' for setting '{key}'")]
    InvalidSetting { key: String, value: String },
}

/// A persisted row that could not be turned back into a record during load.
/// The row is excluded from every computation but kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCorruptionWarning {
    pub table: &'static str,
    pub row_id: Option<i64>,
    pub reason: String,
}

impl DataCorruptionWarning {
    pub fn new(table: &'static str, row_id: Option<i64>, reason: impl Into<String>) -> Self {
        Self {
            table,
            row_id,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DataCorruptionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row_id {
            Some(id) => write!(f, "{} row {}: {}", self.table, id, self.reason),
            None => write!(f, "{} row: {}", self.table, self.reason),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
