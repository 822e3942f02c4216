// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{EXPENSE_CATEGORIES, EntryKind, INCOME_CATEGORIES, LedgerEntry};
use crate::period::PeriodKey;

/// Totals for one period. Every known category is present, zero when unused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodAggregate {
    pub period: PeriodKey,
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub per_category_expense: BTreeMap<String, Decimal>,
    pub per_category_income: BTreeMap<String, Decimal>,
}

impl PeriodAggregate {
    pub fn empty(period: PeriodKey) -> Self {
        Self {
            period,
            income_total: Decimal::ZERO,
            expense_total: Decimal::ZERO,
            per_category_expense: zeroed(&EXPENSE_CATEGORIES),
            per_category_income: zeroed(&INCOME_CATEGORIES),
        }
    }

    pub fn net(&self) -> Decimal {
        self.income_total - self.expense_total
    }

    pub fn expense_for(&self, category: &str) -> Decimal {
        self.per_category_expense
            .get(category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn income_for(&self, category: &str) -> Decimal {
        self.per_category_income
            .get(category)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn record(&mut self, entry: &LedgerEntry) {
        let (total, per_cat) = match entry.kind {
            EntryKind::Income => (&mut self.income_total, &mut self.per_category_income),
            EntryKind::Expense => (&mut self.expense_total, &mut self.per_category_expense),
        };
        *total += entry.amount;
        *per_cat
            .entry(entry.category.clone())
            .or_insert(Decimal::ZERO) += entry.amount;
    }
}

fn zeroed(categories: &[&str]) -> BTreeMap<String, Decimal> {
    categories
        .iter()
        .map(|c| (c.to_string(), Decimal::ZERO))
        .collect()
}

/// Sums the entries that fall inside `period`; others are ignored.
pub fn aggregate<'a, I>(entries: I, period: &PeriodKey) -> PeriodAggregate
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    let mut agg = PeriodAggregate::empty(*period);
    for entry in entries.into_iter().filter(|e| period.contains(e.date)) {
        agg.record(entry);
    }
    agg
}

/// Twelve monthly aggregates, January first. Quiet months report zeros.
pub fn yearly_aggregate(entries: &[LedgerEntry], year: i32) -> Vec<PeriodAggregate> {
    let mut months: Vec<PeriodAggregate> = PeriodKey::Year(year)
        .months()
        .into_iter()
        .map(PeriodAggregate::empty)
        .collect();
    for entry in entries {
        if let Some(slot) = months.iter_mut().find(|m| m.period.contains(entry.date)) {
            slot.record(entry);
        }
    }
    months
}

pub fn yearly_total(entries: &[LedgerEntry], year: i32) -> PeriodAggregate {
    aggregate(entries, &PeriodKey::Year(year))
}
