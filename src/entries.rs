// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Income and expense transactions owned by one user.

use rust_decimal::Decimal;
use tracing::debug;

use crate::errors::ValidationError;
use crate::models::{EntryKind, LedgerEntry};
use crate::period::PeriodKey;
use crate::utils::parse_date;

/// Unvalidated input for a new or replaced ledger entry.
#[derive(Debug, Clone)]
pub struct EntryDraft {
    pub date: String,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub kind: EntryKind,
}

impl EntryDraft {
    pub fn validate(&self, id: i64) -> Result<LedgerEntry, ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        let date = parse_date(&self.date)?;
        let category = self.kind.canonical_category(&self.category)?;
        Ok(LedgerEntry {
            id,
            date,
            amount: self.amount,
            category: category.to_string(),
            description: clean_description(self.description.as_deref()),
            kind: self.kind,
        })
    }
}

pub(crate) fn clean_description(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone)]
pub struct EntryStore {
    entries: Vec<LedgerEntry>,
    next_id: i64,
    removed: Vec<i64>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::from_entries(Vec::new())
    }

    /// Wraps entries already loaded from persistence. Ids keep counting from the largest seen.
    pub fn from_entries(entries: Vec<LedgerEntry>) -> Self {
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            entries,
            next_id,
            removed: Vec::new(),
        }
    }

    /// Keeps new ids above `id`, e.g. a stored row that could not be loaded.
    pub fn reserve_ids_through(&mut self, id: i64) {
        self.next_id = self.next_id.max(id + 1);
    }

    pub fn add(&mut self, draft: EntryDraft) -> Result<&LedgerEntry, ValidationError> {
        let entry = draft.validate(self.next_id)?;
        self.next_id += 1;
        debug!(id = entry.id, date = %entry.date, kind = %entry.kind, "entry added");
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn update(
        &mut self,
        id: i64,
        draft: EntryDraft,
    ) -> Result<&LedgerEntry, ValidationError> {
        let pos = self.position(id)?;
        let entry = draft.validate(id)?;
        debug!(id, "entry replaced");
        self.entries[pos] = entry;
        Ok(&self.entries[pos])
    }

    pub fn delete(&mut self, id: i64) -> Result<LedgerEntry, ValidationError> {
        let pos = self.position(id)?;
        self.removed.push(id);
        debug!(id, "entry deleted");
        Ok(self.entries.remove(pos))
    }

    pub fn get(&self, id: i64) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Newest first; entries on the same day come back most recently added first.
    pub fn all(&self) -> Vec<&LedgerEntry> {
        let mut out: Vec<&LedgerEntry> = self.entries.iter().collect();
        out.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        out
    }

    pub fn filter_by_period(&self, period: &PeriodKey) -> Vec<&LedgerEntry> {
        self.all()
            .into_iter()
            .filter(|e| period.contains(e.date))
            .collect()
    }

    pub fn filter_by_category(
        &self,
        category: &str,
        period: Option<&PeriodKey>,
    ) -> Vec<&LedgerEntry> {
        self.all()
            .into_iter()
            .filter(|e| e.category.eq_ignore_ascii_case(category.trim()))
            .filter(|e| period.is_none_or(|p| p.contains(e.date)))
            .collect()
    }

    /// Raw slice in insertion order.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Ids deleted since the last call, for the persistence layer to drop.
    pub fn take_removed(&mut self) -> Vec<i64> {
        std::mem::take(&mut self.removed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: i64) -> Result<usize, ValidationError> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(ValidationError::UnknownId(id))
    }
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}
