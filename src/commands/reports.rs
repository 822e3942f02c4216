// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

use super::entries::EntryRow;
use super::{optional, period_or, required, today};
use crate::config::{currency_symbol, forecast_months};
use crate::models::{EXPENSE_CATEGORIES, INCOME_CATEGORIES};
use crate::period::PeriodKey;
use crate::persistence::Persistence;
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub fn handle<P: Persistence>(session: &Session<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(session, sub)?,
        Some(("balance", sub)) => balance(session, sub)?,
        Some(("yearly", sub)) => yearly(session, sub)?,
        Some(("category", sub)) => category(session, sub)?,
        Some(("forecast", sub)) => forecast(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary<P: Persistence>(session: &Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_or(sub, "period", PeriodKey::current_month(today()))?;
    let agg = session.aggregate(&period);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &agg)? {
        return Ok(());
    }
    let symbol = currency_symbol(session.backend())?;
    println!("{}", period);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Net Savings"],
            vec![vec![
                fmt_money(&agg.income_total, &symbol),
                fmt_money(&agg.expense_total, &symbol),
                fmt_money(&agg.net(), &symbol),
            ]],
        )
    );
    let mut rows: Vec<Vec<String>> = Vec::new();
    for cat in INCOME_CATEGORIES {
        rows.push(vec!["Income".into(), cat.into(), fmt_money(&agg.income_for(cat), &symbol)]);
    }
    for cat in EXPENSE_CATEGORIES {
        let spent = agg.expense_for(cat);
        if !spent.is_zero() {
            rows.push(vec!["Expense".into(), cat.into(), fmt_money(&spent, &symbol)]);
        }
    }
    println!("{}", pretty_table(&["Type", "Category", "Total"], rows));
    Ok(())
}

fn balance<P: Persistence>(session: &Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_or(sub, "period", PeriodKey::current_month(today()))?;
    let projection = session.project(&period);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &projection)? {
        return Ok(());
    }
    let symbol = currency_symbol(session.backend())?;
    println!("{}", period);
    println!(
        "{}",
        pretty_table(
            &["Current Balance", "Scheduled", "Projected Balance"],
            vec![vec![
                fmt_money(&projection.current_balance, &symbol),
                fmt_money(&projection.scheduled_outflow, &symbol),
                fmt_money(&projection.projected_balance, &symbol),
            ]],
        )
    );
    if !projection.occurrences.is_empty() {
        let rows = projection
            .occurrences
            .iter()
            .map(|o| {
                vec![
                    o.date.to_string(),
                    o.category.clone(),
                    o.description.clone().unwrap_or_default(),
                    fmt_money(&o.amount, &symbol),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Due", "Category", "Description", "Amount"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct YearlyRow {
    month: String,
    income: Decimal,
    expenses: Decimal,
    net: Decimal,
}

fn yearly<P: Persistence>(session: &Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let year = sub
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| today().year());
    PeriodKey::year(year)?;
    let months = session.yearly(year);
    let data: Vec<YearlyRow> = months
        .iter()
        .map(|m| YearlyRow {
            month: m.period.to_string(),
            income: m.income_total,
            expenses: m.expense_total,
            net: m.net(),
        })
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let symbol = currency_symbol(session.backend())?;
    let mut rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.month.clone(),
                fmt_money(&r.income, &symbol),
                fmt_money(&r.expenses, &symbol),
                fmt_money(&r.net, &symbol),
            ]
        })
        .collect();
    let income: Decimal = data.iter().map(|r| r.income).sum();
    let expenses: Decimal = data.iter().map(|r| r.expenses).sum();
    rows.push(vec![
        format!("Total {}", year),
        fmt_money(&income, &symbol),
        fmt_money(&expenses, &symbol),
        fmt_money(&(income - expenses), &symbol),
    ]);
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Net"], rows)
    );
    Ok(())
}

fn category<P: Persistence>(session: &Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let cat = required(sub, "category")?;
    let period = period_or(sub, "period", PeriodKey::current_month(today()))?;
    let data: Vec<EntryRow> = session
        .entries()
        .filter_by_category(cat, Some(&period))
        .into_iter()
        .map(EntryRow::from)
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let symbol = currency_symbol(session.backend())?;
    let total: Decimal = session
        .entries()
        .filter_by_category(cat, Some(&period))
        .iter()
        .map(|e| e.amount)
        .sum();
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.date.clone(),
                r.description.clone(),
                format!("{}{}", symbol, r.amount),
            ]
        })
        .collect();
    println!("{} in {}: {}", cat, period, fmt_money(&total, &symbol));
    println!("{}", pretty_table(&["Date", "Description", "Amount"], rows));
    Ok(())
}

fn forecast<P: Persistence>(session: &Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let start = match optional(sub, "from") {
        Some(raw) => raw.parse::<PeriodKey>()?,
        None => PeriodKey::current_month(today()),
    };
    let months = match sub.get_one::<u32>("months") {
        Some(n) => *n,
        None => forecast_months(session.backend())?,
    };
    let projections = session.forecast(start, months);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &projections)? {
        return Ok(());
    }
    let symbol = currency_symbol(session.backend())?;
    let rows = projections
        .iter()
        .map(|p| {
            vec![
                p.period.to_string(),
                fmt_money(&p.current_balance, &symbol),
                fmt_money(&p.scheduled_outflow, &symbol),
                fmt_money(&p.projected_balance, &symbol),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Balance", "Scheduled", "Projected"], rows)
    );
    Ok(())
}
