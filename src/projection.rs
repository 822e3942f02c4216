// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{PeriodAggregate, aggregate};
use crate::models::LedgerEntry;
use crate::period::PeriodKey;
use crate::recurrence::Occurrence;
use crate::schedule::ScheduleStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub period: PeriodKey,
    pub current_balance: Decimal,
    pub scheduled_outflow: Decimal,
    pub projected_balance: Decimal,
    pub occurrences: Vec<Occurrence>,
}

/// Balance left in `period` once every scheduled occurrence inside it is paid.
pub fn project(
    current: &PeriodAggregate,
    schedule: &ScheduleStore,
    period: &PeriodKey,
) -> Projection {
    let current_balance = current.income_total - current.expense_total;
    let occurrences = schedule.upcoming(period);
    let scheduled_outflow: Decimal = occurrences.iter().map(|o| o.amount).sum();
    Projection {
        period: *period,
        current_balance,
        scheduled_outflow,
        projected_balance: current_balance - scheduled_outflow,
        occurrences,
    }
}

/// Longest forecast, in months, that will be computed.
pub const MAX_FORECAST_MONTHS: u32 = 120;

/// Month-by-month projections starting at `start`. A year key starts at its January.
/// `months` is capped at [`MAX_FORECAST_MONTHS`].
pub fn forecast(
    entries: &[LedgerEntry],
    schedule: &ScheduleStore,
    start: PeriodKey,
    months: u32,
) -> Vec<Projection> {
    let first = start.months()[0];
    (0..months.min(MAX_FORECAST_MONTHS))
        .map(|i| {
            let key = first.offset(i as i32);
            project(&aggregate(entries, &key), schedule, &key)
        })
        .collect()
}
