// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::BudgetTable;
use crate::errors::{DataCorruptionWarning, StoreError};
use crate::models::{LedgerEntry, ScheduledExpense};

/// Everything a user's store holds, as read back from storage.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub entries: Vec<LedgerEntry>,
    pub scheduled: Vec<ScheduledExpense>,
    pub budgets: BudgetTable,
    /// Rows skipped because they failed to parse.
    pub warnings: Vec<DataCorruptionWarning>,
}

/// Storage for one user's records. Saves write the given rows and drop the
/// `removed` ids; rows the backend could not parse are left alone.
pub trait Persistence {
    fn load(&self) -> Result<Snapshot, StoreError>;
    fn save_entries(&self, entries: &[LedgerEntry], removed: &[i64]) -> Result<(), StoreError>;
    fn save_scheduled(
        &self,
        scheduled: &[ScheduledExpense],
        removed: &[i64],
    ) -> Result<(), StoreError>;
    fn save_budgets(&self, budgets: &BudgetTable) -> Result<(), StoreError>;
    fn get_setting(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_setting(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
