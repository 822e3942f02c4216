// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Future expenses the user plans for, one-time or recurring.

use rust_decimal::Decimal;
use tracing::debug;

use crate::entries::clean_description;
use crate::errors::ValidationError;
use crate::models::{EntryKind, Frequency, ScheduledExpense};
use crate::period::PeriodKey;
use crate::recurrence::{Occurrence, expand_all};
use crate::utils::parse_date;

#[derive(Debug, Clone)]
pub struct ScheduleDraft {
    pub date: String,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub recurring: bool,
    /// Only read when `recurring` is set.
    pub frequency: Option<String>,
}

impl ScheduleDraft {
    pub fn validate(&self, id: i64) -> Result<ScheduledExpense, ValidationError> {
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        let date = parse_date(&self.date)?;
        let category = EntryKind::Expense.canonical_category(&self.category)?;
        let frequency = if self.recurring {
            match self.frequency.as_deref().map(str::trim) {
                None | Some("") => return Err(ValidationError::MissingFrequency),
                Some(raw) => Frequency::parse_recurring(raw)?,
            }
        } else {
            Frequency::OneTime
        };
        Ok(ScheduledExpense {
            id,
            date,
            amount: self.amount,
            category: category.to_string(),
            description: clean_description(self.description.as_deref()),
            frequency,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleStore {
    scheduled: Vec<ScheduledExpense>,
    next_id: i64,
    removed: Vec<i64>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::from_scheduled(Vec::new())
    }

    pub fn from_scheduled(scheduled: Vec<ScheduledExpense>) -> Self {
        let next_id = scheduled.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self {
            scheduled,
            next_id,
            removed: Vec::new(),
        }
    }

    /// Keeps new ids above `id`, e.g. a stored row that could not be loaded.
    pub fn reserve_ids_through(&mut self, id: i64) {
        self.next_id = self.next_id.max(id + 1);
    }

    pub fn add(&mut self, draft: ScheduleDraft) -> Result<&ScheduledExpense, ValidationError> {
        let item = draft.validate(self.next_id)?;
        self.next_id += 1;
        debug!(id = item.id, anchor = %item.date, frequency = %item.frequency, "schedule added");
        self.scheduled.push(item);
        Ok(&self.scheduled[self.scheduled.len() - 1])
    }

    /// Replaces the whole row; the last write wins.
    pub fn update(
        &mut self,
        id: i64,
        draft: ScheduleDraft,
    ) -> Result<&ScheduledExpense, ValidationError> {
        let pos = self.position(id)?;
        let item = draft.validate(id)?;
        debug!(id, "schedule replaced");
        self.scheduled[pos] = item;
        Ok(&self.scheduled[pos])
    }

    pub fn delete(&mut self, id: i64) -> Result<ScheduledExpense, ValidationError> {
        let pos = self.position(id)?;
        self.removed.push(id);
        debug!(id, "schedule deleted");
        Ok(self.scheduled.remove(pos))
    }

    pub fn get(&self, id: i64) -> Option<&ScheduledExpense> {
        self.scheduled.iter().find(|s| s.id == id)
    }

    /// Rows in the order they were created.
    pub fn all(&self) -> &[ScheduledExpense] {
        &self.scheduled
    }

    /// Every occurrence of every schedule inside `period`, earliest first.
    pub fn upcoming(&self, period: &PeriodKey) -> Vec<Occurrence> {
        expand_all(&self.scheduled, period)
    }

    pub fn take_removed(&mut self) -> Vec<i64> {
        std::mem::take(&mut self.removed)
    }

    pub fn len(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }

    fn position(&self, id: i64) -> Result<usize, ValidationError> {
        self.scheduled
            .iter()
            .position(|s| s.id == id)
            .ok_or(ValidationError::UnknownId(id))
    }
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}
