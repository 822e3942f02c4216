// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Expansion of scheduled expenses into dated occurrences.
//!
//! Recurring schedules have no end date. Every query is bounded by the period it
//! asks about, so expansion is linear in the number of months in that period.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Frequency, ScheduledExpense};
use crate::period::{PeriodKey, month_index};
use crate::utils::clamped_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub schedule_id: i64,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    pub frequency: Frequency,
}

impl Occurrence {
    fn of(schedule: &ScheduledExpense, date: NaiveDate) -> Self {
        Self {
            schedule_id: schedule.id,
            date,
            amount: schedule.amount,
            category: schedule.category.clone(),
            description: schedule.description.clone(),
            frequency: schedule.frequency,
        }
    }
}

/// The occurrences of one schedule that land inside `period`, in date order.
pub fn occurrences(schedule: &ScheduledExpense, period: &PeriodKey) -> Vec<Occurrence> {
    let Some(step) = schedule.frequency.step_months() else {
        if period.contains(schedule.date) {
            return vec![Occurrence::of(schedule, schedule.date)];
        }
        return Vec::new();
    };

    let anchor = schedule.date;
    let anchor_idx = month_index(anchor.year(), anchor.month());
    period
        .months()
        .into_iter()
        .filter_map(|key| {
            let PeriodKey::Month { year, month } = key else {
                return None;
            };
            let diff = month_index(year, month) - anchor_idx;
            if diff < 0 || diff % step != 0 {
                return None;
            }
            clamped_date(year, month, anchor.day()).map(|d| Occurrence::of(schedule, d))
        })
        .collect()
}

pub fn expand_all(schedules: &[ScheduledExpense], period: &PeriodKey) -> Vec<Occurrence> {
    let mut out: Vec<Occurrence> = schedules
        .iter()
        .flat_map(|s| occurrences(s, period))
        .collect();
    out.sort_by(|a, b| a.date.cmp(&b.date).then(a.schedule_id.cmp(&b.schedule_id)));
    out
}

/// First occurrence on or after `from`, if the schedule still has one.
pub fn next_occurrence(schedule: &ScheduledExpense, from: NaiveDate) -> Option<NaiveDate> {
    let anchor = schedule.date;
    let Some(step) = schedule.frequency.step_months() else {
        return (anchor >= from).then_some(anchor);
    };
    if anchor >= from {
        return Some(anchor);
    }
    let anchor_idx = month_index(anchor.year(), anchor.month());
    let from_idx = month_index(from.year(), from.month());
    let mut k = (from_idx - anchor_idx + step - 1) / step;
    // the clamped day in `from`'s month may already be behind `from`
    for _ in 0..2 {
        let idx = anchor_idx + k * step;
        let date = clamped_date(idx.div_euclid(12), (idx.rem_euclid(12) + 1) as u32, anchor.day())?;
        if date >= from {
            return Some(date);
        }
        k += 1;
    }
    None
}
