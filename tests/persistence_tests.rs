// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use famledger::budget::BudgetTable;
use famledger::config;
use famledger::db::{SqliteBackend, is_truthy};
use famledger::entries::EntryDraft;
use famledger::errors::{StoreError, ValidationError};
use famledger::models::{EntryKind, Frequency, LedgerEntry, ScheduledExpense};
use famledger::period::PeriodKey;
use famledger::persistence::{Persistence, Snapshot};
use famledger::schedule::ScheduleDraft;
use famledger::session::{Session, validate_user};
use rust_decimal::Decimal;
use std::cell::Cell;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn draft(date: &str, amount: &str, category: &str, kind: EntryKind) -> EntryDraft {
    EntryDraft {
        date: date.into(),
        amount: dec(amount),
        category: category.into(),
        description: Some("note".into()),
        kind,
    }
}

#[test]
fn ledger_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alice.sqlite");
    {
        let mut s = Session::open("alice", SqliteBackend::open(&path).unwrap()).unwrap();
        s.add_entry(draft("2025-01-01", "50000", "Salary", EntryKind::Income))
            .unwrap();
        s.add_entry(draft("2025-01-05", "1200.10", "groceries", EntryKind::Expense))
            .unwrap();
        s.add_scheduled(ScheduleDraft {
            date: "2024-11-15".into(),
            amount: dec("2000"),
            category: "loan emi".into(),
            description: None,
            recurring: true,
            frequency: Some("Monthly".into()),
        })
        .unwrap();
        s.set_budget("Groceries", dec("1500")).unwrap();
    }

    let s = Session::open("alice", SqliteBackend::open(&path).unwrap()).unwrap();
    assert!(s.warnings().is_empty());
    assert_eq!(s.entries().len(), 2);
    assert_eq!(s.schedule().len(), 1);
    assert_eq!(s.schedule().all()[0].frequency, Frequency::Monthly);
    assert_eq!(s.budgets().get("groceries"), dec("1500"));

    let jan = s.aggregate(&PeriodKey::month(2025, 1).unwrap());
    assert_eq!(jan.expense_total, dec("1200.10"));
    assert_eq!(jan.net(), dec("48799.90"));
}

#[test]
fn deletes_are_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bob.sqlite");
    let id = {
        let mut s = Session::open("bob", SqliteBackend::open(&path).unwrap()).unwrap();
        let keep = s
            .add_entry(draft("2025-01-05", "10", "charity", EntryKind::Expense))
            .unwrap();
        let gone = s
            .add_entry(draft("2025-01-06", "20", "charity", EntryKind::Expense))
            .unwrap();
        s.delete_entry(gone.id).unwrap();
        keep.id
    };
    let s = Session::open("bob", SqliteBackend::open(&path).unwrap()).unwrap();
    assert_eq!(s.entries().len(), 1);
    assert!(s.entries().get(id).is_some());
}

#[test]
fn corrupted_rows_are_reported_and_left_alone() {
    let backend = SqliteBackend::in_memory().unwrap();
    backend
        .conn()
        .execute_batch(
            r#"
        INSERT INTO entries(id, date, amount, category, description, kind)
            VALUES (1, '2025-01-03', '100', 'groceries', NULL, 'Expense');
        INSERT INTO entries(id, date, amount, category, description, kind)
            VALUES (7, '2025-01-04', 'lots', 'groceries', NULL, 'Expense');
        INSERT INTO entries(id, date, amount, category, description, kind)
            VALUES (8, '2025-13-01', '5', 'groceries', NULL, 'Expense');
        INSERT INTO scheduled(id, date, amount, category, description, recurring, frequency)
            VALUES (3, '2025-01-10', '40', 'transport', NULL, 1, 'Weekly');
        "#,
        )
        .unwrap();

    let mut s = Session::open("carol", backend).unwrap();
    assert_eq!(s.warnings().len(), 3);
    assert!(s.warnings().iter().any(|w| w.table == "scheduled" && w.row_id == Some(3)));
    assert_eq!(s.entries().len(), 1);
    assert!(s.schedule().is_empty());

    let jan = s.aggregate(&PeriodKey::month(2025, 1).unwrap());
    assert_eq!(jan.expense_total, dec("100"));

    let added = s
        .add_entry(draft("2025-01-09", "1", "impulse", EntryKind::Expense))
        .unwrap();
    assert!(added.id > 8);

    let stored: i64 = s
        .backend()
        .conn()
        .query_row("SELECT COUNT(*) FROM entries", [], |r| r.get(0))
        .unwrap();
    assert_eq!(stored, 4);
    let raw: String = s
        .backend()
        .conn()
        .query_row("SELECT amount FROM entries WHERE id=7", [], |r| r.get(0))
        .unwrap();
    assert_eq!(raw, "lots");
}

#[test]
fn legacy_yes_no_recurring_flag_is_read() {
    let backend = SqliteBackend::in_memory().unwrap();
    backend
        .conn()
        .execute(
            "INSERT INTO scheduled(id, date, amount, category, recurring, frequency)
             VALUES (1, '2025-01-31', '300', 'LIC', 'Yes', 'Quarterly')",
            [],
        )
        .unwrap();
    let s = Session::open("dave", backend).unwrap();
    assert!(s.warnings().is_empty());
    assert_eq!(s.schedule().all()[0].frequency, Frequency::Quarterly);
    assert!(is_truthy(" yes "));
    assert!(!is_truthy("No"));
}

#[test]
fn rejected_mutation_leaves_store_untouched() {
    let mut s = Session::open("erin", SqliteBackend::in_memory().unwrap()).unwrap();
    let err = s
        .add_entry(draft("2025-01-01", "0", "groceries", EntryKind::Expense))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::NonPositiveAmount(_))
    ));
    assert!(s.entries().is_empty());

    let bad = vec![
        draft("2025-01-01", "10", "groceries", EntryKind::Expense),
        draft("2025-01-02", "10", "Salary", EntryKind::Expense),
    ];
    assert!(s.import_entries(bad).is_err());
    assert!(s.entries().is_empty());

    let good = vec![
        draft("2025-01-01", "10", "groceries", EntryKind::Expense),
        draft("2025-01-02", "10", "other", EntryKind::Income),
    ];
    assert_eq!(s.import_entries(good).unwrap(), 2);
    assert_eq!(s.entries().len(), 2);
}

#[test]
fn settings_default_and_validate() {
    let backend = SqliteBackend::in_memory().unwrap();
    assert_eq!(config::currency_symbol(&backend).unwrap(), "₹");
    assert_eq!(config::forecast_months(&backend).unwrap(), 3);

    config::set(&backend, config::CURRENCY_SYMBOL, "$").unwrap();
    assert_eq!(config::currency_symbol(&backend).unwrap(), "$");

    assert!(matches!(
        config::set(&backend, config::FORECAST_MONTHS, "0"),
        Err(StoreError::Validation(ValidationError::InvalidSetting { .. }))
    ));
    assert!(matches!(
        config::get(&backend, "theme"),
        Err(StoreError::Validation(ValidationError::UnknownSetting(_)))
    ));
}

#[test]
fn user_names_are_restricted() {
    assert!(validate_user("family_2025").is_ok());
    for bad in ["", "../etc", "a b", "x/y"] {
        assert_eq!(
            validate_user(bad).unwrap_err(),
            ValidationError::InvalidUser(bad.into())
        );
    }
    assert!(Session::open("../x", SqliteBackend::in_memory().unwrap()).is_err());
}

/// SQLite backend whose next `n` saves fail.
struct FailingSaves {
    inner: SqliteBackend,
    failures: Cell<u32>,
}

impl FailingSaves {
    fn fail_next(&self, n: u32) {
        self.failures.set(n);
    }

    fn check(&self) -> Result<(), StoreError> {
        let left = self.failures.get();
        if left > 0 {
            self.failures.set(left - 1);
            return Err(std::io::Error::other("disk full").into());
        }
        Ok(())
    }
}

impl Persistence for FailingSaves {
    fn load(&self) -> Result<Snapshot, StoreError> {
        self.inner.load()
    }

    fn save_entries(&self, entries: &[LedgerEntry], removed: &[i64]) -> Result<(), StoreError> {
        self.check()?;
        self.inner.save_entries(entries, removed)
    }

    fn save_scheduled(
        &self,
        scheduled: &[ScheduledExpense],
        removed: &[i64],
    ) -> Result<(), StoreError> {
        self.check()?;
        self.inner.save_scheduled(scheduled, removed)
    }

    fn save_budgets(&self, budgets: &BudgetTable) -> Result<(), StoreError> {
        self.check()?;
        self.inner.save_budgets(budgets)
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get_setting(key)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set_setting(key, value)
    }
}

#[test]
fn failed_save_leaves_store_and_file_in_step() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frank.sqlite");
    let backend = FailingSaves {
        inner: SqliteBackend::open(&path).unwrap(),
        failures: Cell::new(0),
    };
    let mut s = Session::open("frank", backend).unwrap();
    let first = s
        .add_entry(draft("2025-01-05", "10", "charity", EntryKind::Expense))
        .unwrap();

    s.backend().fail_next(1);
    assert!(matches!(s.delete_entry(first.id), Err(StoreError::Io(_))));
    assert!(s.entries().get(first.id).is_some());

    s.backend().fail_next(1);
    assert!(
        s.add_entry(draft("2025-01-06", "20", "charity", EntryKind::Expense))
            .is_err()
    );
    assert_eq!(s.entries().len(), 1);

    s.backend().fail_next(1);
    assert!(s.set_budget("charity", dec("100")).is_err());
    assert_eq!(s.budgets().get("charity"), Decimal::ZERO);

    s.delete_entry(first.id).unwrap();
    s.add_entry(draft("2025-01-07", "30", "charity", EntryKind::Expense))
        .unwrap();
    assert_eq!(s.entries().len(), 1);
    drop(s);

    let reloaded = Session::open("frank", SqliteBackend::open(&path).unwrap()).unwrap();
    assert_eq!(reloaded.entries().len(), 1);
    assert!(reloaded.entries().get(first.id).is_none());
}

#[test]
fn failed_schedule_save_is_rolled_back() {
    let backend = FailingSaves {
        inner: SqliteBackend::in_memory().unwrap(),
        failures: Cell::new(0),
    };
    let mut s = Session::open("grace", backend).unwrap();
    let item = s
        .add_scheduled(ScheduleDraft {
            date: "2025-01-15".into(),
            amount: dec("500"),
            category: "LIC".into(),
            description: None,
            recurring: true,
            frequency: Some("Yearly".into()),
        })
        .unwrap();
    s.backend().fail_next(1);
    assert!(s.delete_scheduled(item.id).is_err());
    assert_eq!(s.schedule().len(), 1);
    s.delete_scheduled(item.id).unwrap();
    assert!(s.schedule().is_empty());
    assert!(s.backend().inner.load().unwrap().scheduled.is_empty());
}

#[test]
fn corrupt_forecast_setting_is_an_error() {
    let backend = SqliteBackend::in_memory().unwrap();
    backend
        .set_setting(config::FORECAST_MONTHS, "many")
        .unwrap();
    assert!(matches!(
        config::forecast_months(&backend),
        Err(StoreError::Validation(ValidationError::InvalidSetting { .. }))
    ));
    config::set(&backend, config::FORECAST_MONTHS, "12").unwrap();
    assert_eq!(config::forecast_months(&backend).unwrap(), 12);
}
