// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, ensure};
use serde::Serialize;

use super::{period_or, required, today};
use crate::config::currency_symbol;
use crate::period::PeriodKey;
use crate::persistence::Persistence;
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle<P: Persistence>(session: &mut Session<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("report", sub)) => report(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn set<P: Persistence>(session: &mut Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let cat = required(sub, "category")?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let canonical = session.set_budget(cat, amount)?;
    println!("Budget set for {} = {}", canonical, amount);
    Ok(())
}

#[derive(Serialize)]
struct BudgetRow<'a> {
    category: &'a str,
    budget: String,
}

fn list<P: Persistence>(session: &Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<BudgetRow> = session
        .budgets()
        .iter()
        .map(|(category, amount)| BudgetRow {
            category,
            budget: format!("{:.2}", amount),
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| vec![r.category.to_string(), r.budget.clone()])
            .collect();
        println!("{}", pretty_table(&["Category", "Budget"], rows));
    }
    Ok(())
}

fn report<P: Persistence>(session: &Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_or(sub, "period", PeriodKey::current_month(today()))?;
    // budgets are monthly amounts
    ensure!(period.is_month(), "Budget report takes a month (YYYY-MM), got {}", period);
    let lines = session.budget_report(&period);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &lines)? {
        let symbol = currency_symbol(session.backend())?;
        let rows = lines
            .iter()
            .map(|l| {
                vec![
                    l.category.clone(),
                    fmt_money(&l.budget, &symbol),
                    fmt_money(&l.spent, &symbol),
                    fmt_money(&l.variance, &symbol),
                    if l.over_budget { "OVER" } else { "ok" }.to_string(),
                ]
            })
            .collect();
        println!("Budget vs actual for {}", period);
        println!(
            "{}",
            pretty_table(&["Category", "Budget", "Spent", "Variance", "Status"], rows)
        );
    }
    Ok(())
}
