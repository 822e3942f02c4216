// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-user context handed to every command.
//!
//! A session owns one user's stores and the backend they are persisted to.
//! Mutating helpers validate, update the store, save, and hand back the
//! affected record; read helpers are pure over the current store contents.

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::aggregate::{PeriodAggregate, aggregate, yearly_aggregate};
use crate::budget::{BudgetLine, BudgetTable};
use crate::entries::{EntryDraft, EntryStore};
use crate::errors::{DataCorruptionWarning, StoreError, ValidationError};
use crate::models::{LedgerEntry, ScheduledExpense};
use crate::period::PeriodKey;
use crate::persistence::Persistence;
use crate::projection::{Projection, forecast, project};
use crate::schedule::{ScheduleDraft, ScheduleStore};

/// User names become file names, so they are kept to a safe alphabet.
pub fn validate_user(name: &str) -> Result<&str, ValidationError> {
    let ok = !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(name)
    } else {
        Err(ValidationError::InvalidUser(name.to_string()))
    }
}

pub struct Session<P: Persistence> {
    user: String,
    backend: P,
    entries: EntryStore,
    schedule: ScheduleStore,
    budgets: BudgetTable,
    warnings: Vec<DataCorruptionWarning>,
}

impl<P: Persistence> Session<P> {
    pub fn open(user: &str, backend: P) -> Result<Self, StoreError> {
        let user = validate_user(user)?.to_string();
        let snapshot = backend.load()?;
        let mut entries = EntryStore::from_entries(snapshot.entries);
        let mut schedule = ScheduleStore::from_scheduled(snapshot.scheduled);
        for w in &snapshot.warnings {
            match (w.table, w.row_id) {
                ("entries", Some(id)) => entries.reserve_ids_through(id),
                ("scheduled", Some(id)) => schedule.reserve_ids_through(id),
                _ => {}
            }
        }
        info!(user = %user, "session opened");
        Ok(Self {
            user,
            backend,
            entries,
            schedule,
            budgets: snapshot.budgets,
            warnings: snapshot.warnings,
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn backend(&self) -> &P {
        &self.backend
    }

    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }

    pub fn schedule(&self) -> &ScheduleStore {
        &self.schedule
    }

    pub fn budgets(&self) -> &BudgetTable {
        &self.budgets
    }

    /// Rows skipped at load time; they take no part in any total.
    pub fn warnings(&self) -> &[DataCorruptionWarning] {
        &self.warnings
    }

    pub fn add_entry(&mut self, draft: EntryDraft) -> Result<LedgerEntry, StoreError> {
        self.commit_entries(|store| store.add(draft).cloned())
    }

    /// Adds every draft or none of them.
    pub fn import_entries(&mut self, drafts: Vec<EntryDraft>) -> Result<usize, StoreError> {
        for draft in &drafts {
            draft.validate(0)?;
        }
        let count = drafts.len();
        self.commit_entries(|store| {
            for draft in drafts {
                store.add(draft)?;
            }
            Ok(count)
        })
    }

    pub fn update_entry(&mut self, id: i64, draft: EntryDraft) -> Result<LedgerEntry, StoreError> {
        self.commit_entries(|store| store.update(id, draft).cloned())
    }

    pub fn delete_entry(&mut self, id: i64) -> Result<LedgerEntry, StoreError> {
        self.commit_entries(|store| store.delete(id))
    }

    pub fn add_scheduled(&mut self, draft: ScheduleDraft) -> Result<ScheduledExpense, StoreError> {
        self.commit_scheduled(|store| store.add(draft).cloned())
    }

    pub fn update_scheduled(
        &mut self,
        id: i64,
        draft: ScheduleDraft,
    ) -> Result<ScheduledExpense, StoreError> {
        self.commit_scheduled(|store| store.update(id, draft).cloned())
    }

    pub fn delete_scheduled(&mut self, id: i64) -> Result<ScheduledExpense, StoreError> {
        self.commit_scheduled(|store| store.delete(id))
    }

    pub fn set_budget(&mut self, category: &str, amount: Decimal) -> Result<&'static str, StoreError> {
        let before = self.budgets.clone();
        let canonical = self.budgets.set(category, amount)?;
        if let Err(e) = self.backend.save_budgets(&self.budgets) {
            warn!(error = %e, "budget save failed, change rolled back");
            self.budgets = before;
            return Err(e);
        }
        Ok(canonical)
    }

    pub fn aggregate(&self, period: &PeriodKey) -> PeriodAggregate {
        aggregate(self.entries.entries(), period)
    }

    pub fn yearly(&self, year: i32) -> Vec<PeriodAggregate> {
        yearly_aggregate(self.entries.entries(), year)
    }

    pub fn project(&self, period: &PeriodKey) -> Projection {
        project(&self.aggregate(period), &self.schedule, period)
    }

    pub fn forecast(&self, start: PeriodKey, months: u32) -> Vec<Projection> {
        forecast(self.entries.entries(), &self.schedule, start, months)
    }

    pub fn budget_report(&self, period: &PeriodKey) -> Vec<BudgetLine> {
        self.budgets.variance(&self.aggregate(period))
    }

    /// Applies `change` and saves. The store is left as it was if either step fails.
    fn commit_entries<T>(
        &mut self,
        change: impl FnOnce(&mut EntryStore) -> Result<T, ValidationError>,
    ) -> Result<T, StoreError> {
        let before = self.entries.clone();
        let saved = change(&mut self.entries)
            .map_err(StoreError::from)
            .and_then(|out| {
                let removed = self.entries.take_removed();
                self.backend
                    .save_entries(self.entries.entries(), &removed)
                    .map(|()| out)
            });
        if let Err(e) = &saved {
            if !matches!(e, StoreError::Validation(_)) {
                warn!(error = %e, "entry save failed, change rolled back");
            }
            self.entries = before;
        }
        saved
    }

    fn commit_scheduled<T>(
        &mut self,
        change: impl FnOnce(&mut ScheduleStore) -> Result<T, ValidationError>,
    ) -> Result<T, StoreError> {
        let before = self.schedule.clone();
        let saved = change(&mut self.schedule)
            .map_err(StoreError::from)
            .and_then(|out| {
                let removed = self.schedule.take_removed();
                self.backend
                    .save_scheduled(self.schedule.all(), &removed)
                    .map(|()| out)
            });
        if let Err(e) = &saved {
            if !matches!(e, StoreError::Validation(_)) {
                warn!(error = %e, "schedule save failed, change rolled back");
            }
            self.schedule = before;
        }
        saved
    }
}
