// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use famledger::aggregate::{aggregate, yearly_aggregate, yearly_total};
use famledger::entries::{EntryDraft, EntryStore};
use famledger::models::{EXPENSE_CATEGORIES, EntryKind, INCOME_CATEGORIES, LedgerEntry};
use famledger::period::PeriodKey;
use rust_decimal::Decimal;

fn draft(date: &str, amount: &str, category: &str, kind: EntryKind) -> EntryDraft {
    EntryDraft {
        date: date.into(),
        amount: amount.parse().unwrap(),
        category: category.into(),
        description: None,
        kind,
    }
}

fn store(rows: &[(&str, &str, &str, EntryKind)]) -> EntryStore {
    let mut s = EntryStore::new();
    for (date, amount, cat, kind) in rows {
        s.add(draft(date, amount, cat, *kind)).unwrap();
    }
    s
}

#[test]
fn january_salary_and_groceries() {
    let s = store(&[
        ("2025-01-05", "50000", "Salary", EntryKind::Income),
        ("2025-01-10", "1200", "groceries", EntryKind::Expense),
    ]);
    let agg = aggregate(s.entries(), &"2025-01".parse().unwrap());
    assert_eq!(agg.income_total, Decimal::from(50000));
    assert_eq!(agg.expense_total, Decimal::from(1200));
    assert_eq!(agg.net(), Decimal::from(48800));
    assert_eq!(agg.expense_for("groceries"), Decimal::from(1200));
    assert_eq!(agg.income_for("Salary"), Decimal::from(50000));
}

#[test]
fn empty_input_reports_every_category_as_zero() {
    let entries: Vec<LedgerEntry> = Vec::new();
    let agg = aggregate(&entries, &"2025-01".parse().unwrap());
    assert_eq!(agg.income_total, Decimal::ZERO);
    assert_eq!(agg.expense_total, Decimal::ZERO);
    assert_eq!(agg.per_category_expense.len(), EXPENSE_CATEGORIES.len());
    assert_eq!(agg.per_category_income.len(), INCOME_CATEGORIES.len());
    for cat in EXPENSE_CATEGORIES {
        assert_eq!(agg.per_category_expense[cat], Decimal::ZERO);
    }
    for cat in INCOME_CATEGORIES {
        assert_eq!(agg.per_category_income[cat], Decimal::ZERO);
    }
}

#[test]
fn entries_outside_the_period_are_ignored() {
    let s = store(&[
        ("2024-12-31", "10", "transport", EntryKind::Expense),
        ("2025-01-01", "20", "transport", EntryKind::Expense),
        ("2025-02-01", "40", "transport", EntryKind::Expense),
    ]);
    let agg = aggregate(s.entries(), &"2025-01".parse().unwrap());
    assert_eq!(agg.expense_total, Decimal::from(20));
    assert_eq!(agg.expense_for("transport"), Decimal::from(20));
}

#[test]
fn decimal_sums_do_not_drift() {
    let s = store(&[
        ("2025-03-01", "0.10", "take-out", EntryKind::Expense),
        ("2025-03-02", "0.20", "take-out", EntryKind::Expense),
    ]);
    let agg = aggregate(s.entries(), &"2025-03".parse().unwrap());
    assert_eq!(agg.expense_total, "0.30".parse::<Decimal>().unwrap());
}

#[test]
fn yearly_aggregate_has_twelve_months_in_order() {
    let s = store(&[
        ("2025-01-05", "50000", "Salary", EntryKind::Income),
        ("2025-03-10", "700", "charity", EntryKind::Expense),
        ("2024-03-10", "999", "charity", EntryKind::Expense),
    ]);
    let months = yearly_aggregate(s.entries(), 2025);
    assert_eq!(months.len(), 12);
    for (i, m) in months.iter().enumerate() {
        assert_eq!(m.period, PeriodKey::month(2025, i as u32 + 1).unwrap());
    }
    assert_eq!(months[0].income_total, Decimal::from(50000));
    assert_eq!(months[1].income_total, Decimal::ZERO);
    assert_eq!(months[1].expense_total, Decimal::ZERO);
    assert_eq!(months[2].expense_for("charity"), Decimal::from(700));

    let total = yearly_total(s.entries(), 2025);
    assert_eq!(total.period, PeriodKey::Year(2025));
    assert_eq!(total.expense_total, Decimal::from(700));
    assert_eq!(total.net(), Decimal::from(49300));
}
