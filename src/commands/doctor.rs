// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;

use crate::persistence::Persistence;
use crate::session::Session;
use crate::utils::pretty_table;

/// Issue name and detail for every problem found in the user's store.
pub fn issues<P: Persistence>(session: &Session<P>, reference: NaiveDate) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Rows skipped at load time
    for w in session.warnings() {
        rows.push(vec!["unreadable_row".into(), w.to_string()]);
    }

    // 2) One-time schedules whose date has passed and will never project again
    for s in session.schedule().all() {
        if !s.recurring() && s.date < reference {
            rows.push(vec![
                "stale_one_time_schedule".into(),
                format!("#{} {} {} ({})", s.id, s.date, s.amount, s.category),
            ]);
        }
    }
    rows
}

pub fn handle<P: Persistence>(session: &Session<P>) -> Result<()> {
    let rows = issues(session, super::today());
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!(
            "doctor: {} unreadable row(s) excluded from totals",
            session.warnings().len()
        );
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
