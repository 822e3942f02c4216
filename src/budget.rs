// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::PeriodAggregate;
use crate::errors::ValidationError;
use crate::models::{EXPENSE_CATEGORIES, EntryKind};

/// Budget per expense category. Categories never set read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetTable {
    amounts: BTreeMap<&'static str, Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetLine {
    pub category: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub variance: Decimal,
    pub over_budget: bool,
}

impl BudgetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical category name the amount was stored under.
    pub fn set(&mut self, category: &str, amount: Decimal) -> Result<&'static str, ValidationError> {
        let canonical = EntryKind::Expense.canonical_category(category)?;
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeBudget(canonical.to_string()));
        }
        self.amounts.insert(canonical, amount);
        Ok(canonical)
    }

    pub fn get(&self, category: &str) -> Decimal {
        EntryKind::Expense
            .canonical_category(category)
            .ok()
            .and_then(|c| self.amounts.get(c).copied())
            .unwrap_or(Decimal::ZERO)
    }

    /// All expense categories in their fixed order, with their budget.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Decimal)> + '_ {
        EXPENSE_CATEGORIES
            .iter()
            .map(|c| (*c, self.amounts.get(c).copied().unwrap_or(Decimal::ZERO)))
    }

    pub fn total(&self) -> Decimal {
        self.amounts.values().copied().sum()
    }

    /// Budget minus actual spend for every expense category; negative means over budget.
    pub fn variance(&self, actual: &PeriodAggregate) -> Vec<BudgetLine> {
        self.iter()
            .map(|(category, budget)| {
                let spent = actual.expense_for(category);
                let variance = budget - spent;
                BudgetLine {
                    category: category.to_string(),
                    budget,
                    spent,
                    variance,
                    over_budget: variance < Decimal::ZERO,
                }
            })
            .collect()
    }
}
