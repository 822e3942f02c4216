// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use famledger::entries::{EntryDraft, EntryStore};
use famledger::errors::ValidationError;
use famledger::models::{EntryKind, Frequency};
use famledger::period::PeriodKey;
use famledger::schedule::{ScheduleDraft, ScheduleStore};
use rust_decimal::Decimal;

fn expense(date: &str, amount: i64, category: &str) -> EntryDraft {
    EntryDraft {
        date: date.into(),
        amount: Decimal::from(amount),
        category: category.into(),
        description: Some("  ".into()),
        kind: EntryKind::Expense,
    }
}

fn scheduled(recurring: bool, frequency: Option<&str>) -> ScheduleDraft {
    ScheduleDraft {
        date: "2025-01-15".into(),
        amount: Decimal::from(2000),
        category: "loan emi".into(),
        description: None,
        recurring,
        frequency: frequency.map(str::to_string),
    }
}

#[test]
fn added_entry_shows_up_once_in_its_period() {
    let mut store = EntryStore::new();
    for (i, amount) in [1_i64, 15, 2500].iter().enumerate() {
        let date = format!("2025-0{}-28", i + 1);
        let id = store.add(expense(&date, *amount, "transport")).unwrap().id;
        let month: PeriodKey = date[..7].parse().unwrap();
        let hits: Vec<_> = store
            .filter_by_period(&month)
            .into_iter()
            .filter(|e| e.id == id)
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(
            store
                .filter_by_period(&PeriodKey::Year(2025))
                .iter()
                .filter(|e| e.id == id)
                .count(),
            1
        );
    }
    assert_eq!(store.len(), 3);
}

#[test]
fn add_rejects_malformed_entries() {
    let mut store = EntryStore::new();
    assert_eq!(
        store.add(expense("2025-01-01", 0, "groceries")).unwrap_err(),
        ValidationError::NonPositiveAmount(Decimal::ZERO)
    );
    assert!(matches!(
        store.add(expense("2025-01-01", -5, "groceries")),
        Err(ValidationError::NonPositiveAmount(_))
    ));
    assert_eq!(
        store.add(expense("2025-02-30", 5, "groceries")).unwrap_err(),
        ValidationError::InvalidDate("2025-02-30".into())
    );
    assert!(matches!(
        store.add(expense("2025-01-01", 5, "Salary")),
        Err(ValidationError::UnknownCategory { .. })
    ));
    assert!(store.is_empty());
}

#[test]
fn categories_are_stored_in_canonical_spelling() {
    let mut store = EntryStore::new();
    let e = store.add(expense("2025-01-01", 5, "  GROCERIES ")).unwrap();
    assert_eq!(e.category, "groceries");
    assert_eq!(e.description, None);
    let lic = store.add(expense("2025-01-01", 5, "lic")).unwrap();
    assert_eq!(lic.category, "LIC");
}

#[test]
fn all_is_newest_first_with_ties_by_insertion() {
    let mut store = EntryStore::new();
    let a = store.add(expense("2025-01-10", 1, "impulse")).unwrap().id;
    let b = store.add(expense("2025-01-12", 2, "impulse")).unwrap().id;
    let c = store.add(expense("2025-01-10", 3, "impulse")).unwrap().id;
    let order: Vec<i64> = store.all().iter().map(|e| e.id).collect();
    assert_eq!(order, vec![b, c, a]);
}

#[test]
fn update_and_delete_by_id() {
    let mut store = EntryStore::new();
    let id = store.add(expense("2025-01-10", 10, "charity")).unwrap().id;
    let updated = store.update(id, expense("2025-01-11", 12, "charity")).unwrap();
    assert_eq!(updated.amount, Decimal::from(12));
    assert_eq!(updated.id, id);

    assert_eq!(
        store.update(99, expense("2025-01-11", 12, "charity")).unwrap_err(),
        ValidationError::UnknownId(99)
    );
    let removed = store.delete(id).unwrap();
    assert_eq!(removed.id, id);
    assert_eq!(store.take_removed(), vec![id]);
    assert!(store.take_removed().is_empty());
    assert_eq!(store.delete(id).unwrap_err(), ValidationError::UnknownId(id));
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut store = EntryStore::new();
    let first = store.add(expense("2025-01-10", 10, "charity")).unwrap().id;
    store.delete(first).unwrap();
    let second = store.add(expense("2025-01-10", 10, "charity")).unwrap().id;
    assert!(second > first);
}

#[test]
fn filter_by_category_matches_case_insensitively() {
    let mut store = EntryStore::new();
    store.add(expense("2025-01-10", 10, "transport")).unwrap();
    store.add(expense("2025-02-10", 20, "transport")).unwrap();
    store.add(expense("2025-02-11", 30, "groceries")).unwrap();
    assert_eq!(store.filter_by_category("Transport", None).len(), 2);
    let feb: PeriodKey = "2025-02".parse().unwrap();
    assert_eq!(store.filter_by_category("transport", Some(&feb)).len(), 1);
}

#[test]
fn recurring_schedule_needs_a_valid_frequency() {
    let mut store = ScheduleStore::new();
    assert_eq!(
        store.add(scheduled(true, None)).unwrap_err(),
        ValidationError::MissingFrequency
    );
    assert_eq!(
        store.add(scheduled(true, Some("Weekly"))).unwrap_err(),
        ValidationError::InvalidFrequency("Weekly".into())
    );
    assert_eq!(
        store.add(scheduled(true, Some("One-time"))).unwrap_err(),
        ValidationError::InvalidFrequency("One-time".into())
    );
    let q = store.add(scheduled(true, Some("quarterly"))).unwrap();
    assert_eq!(q.frequency, Frequency::Quarterly);
    assert!(q.recurring());
}

#[test]
fn non_recurring_schedule_is_one_time() {
    let mut store = ScheduleStore::new();
    let s = store.add(scheduled(false, Some("Monthly"))).unwrap();
    assert_eq!(s.frequency, Frequency::OneTime);
    assert!(!s.recurring());
}

#[test]
fn schedule_rejects_non_positive_amount() {
    let mut store = ScheduleStore::new();
    let mut draft = scheduled(false, None);
    draft.amount = Decimal::ZERO;
    assert_eq!(
        store.add(draft).unwrap_err(),
        ValidationError::NonPositiveAmount(Decimal::ZERO)
    );
}

#[test]
fn schedule_update_replaces_the_row() {
    let mut store = ScheduleStore::new();
    let id = store.add(scheduled(true, Some("Monthly"))).unwrap().id;
    let mut replacement = scheduled(false, None);
    replacement.date = "2025-03-01".into();
    replacement.description = Some("final payment".into());
    let s = store.update(id, replacement).unwrap();
    assert_eq!(s.frequency, Frequency::OneTime);
    assert_eq!(s.description.as_deref(), Some("final payment"));
    assert_eq!(store.len(), 1);

    assert!(store.upcoming(&"2025-02".parse().unwrap()).is_empty());
    assert_eq!(store.upcoming(&"2025-03".parse().unwrap()).len(), 1);

    store.delete(id).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.delete(id).unwrap_err(), ValidationError::UnknownId(id));
}

#[test]
fn period_keys_parse_and_reject_garbage() {
    assert_eq!("2025-01".parse::<PeriodKey>().unwrap().to_string(), "2025-01");
    assert_eq!("2025".parse::<PeriodKey>().unwrap(), PeriodKey::Year(2025));
    for bad in ["2025-13", "2025-1", "25-01", "2025/01", "", "abcd"] {
        assert!(bad.parse::<PeriodKey>().is_err(), "{}", bad);
    }
    let dec: PeriodKey = "2025-12".parse().unwrap();
    assert_eq!(dec.offset(1).to_string(), "2026-01");
    assert_eq!(dec.offset(-12).to_string(), "2024-12");
    assert_eq!(dec.last_day().to_string(), "2025-12-31");
}
