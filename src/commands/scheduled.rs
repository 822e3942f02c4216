// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{optional, period_or, required, today};
use crate::config::currency_symbol;
use crate::errors::ValidationError;
use crate::models::ScheduledExpense;
use crate::period::PeriodKey;
use crate::persistence::Persistence;
use crate::recurrence::next_occurrence;
use crate::schedule::ScheduleDraft;
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle<P: Persistence>(session: &mut Session<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        Some(("expand", sub)) => expand(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<P: Persistence>(session: &mut Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let draft = ScheduleDraft {
        date: optional(sub, "date")
            .map(str::to_string)
            .unwrap_or_else(|| today().to_string()),
        amount: parse_decimal(required(sub, "amount")?)?,
        category: required(sub, "category")?.to_string(),
        description: optional(sub, "desc").map(str::to_string),
        recurring: sub.get_flag("recurring"),
        frequency: optional(sub, "frequency").map(str::to_string),
    };
    let item = session
        .add_scheduled(draft)
        .context("Scheduled expense rejected")?;
    let symbol = currency_symbol(session.backend())?;
    println!(
        "Scheduled #{}: {} {} from {} ({})",
        item.id,
        fmt_money(&item.amount, &symbol),
        item.frequency,
        item.date,
        item.category
    );
    Ok(())
}

fn edit<P: Persistence>(session: &mut Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let current = session
        .schedule()
        .get(id)
        .cloned()
        .ok_or(ValidationError::UnknownId(id))?;
    let frequency = optional(sub, "frequency").map(str::to_string);
    // a new frequency alone switches a one-time row to recurring
    let recurring = sub
        .get_one::<bool>("recurring")
        .copied()
        .unwrap_or(current.recurring() || frequency.is_some());
    let draft = ScheduleDraft {
        date: optional(sub, "date")
            .map(str::to_string)
            .unwrap_or_else(|| current.date.to_string()),
        amount: match optional(sub, "amount") {
            Some(raw) => parse_decimal(raw)?,
            None => current.amount,
        },
        category: optional(sub, "category")
            .map(str::to_string)
            .unwrap_or(current.category),
        description: optional(sub, "desc")
            .map(str::to_string)
            .or(current.description),
        recurring,
        frequency: frequency.or_else(|| {
            current
                .frequency
                .is_recurring()
                .then(|| current.frequency.to_string())
        }),
    };
    let item = session
        .update_scheduled(id, draft)
        .context("Scheduled expense rejected")?;
    println!("Updated scheduled #{} ({}, {})", item.id, item.category, item.frequency);
    Ok(())
}

fn remove<P: Persistence>(session: &mut Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let item = session.delete_scheduled(id)?;
    println!("Deleted scheduled #{} ({})", item.id, item.category);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ScheduledRow {
    pub id: i64,
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub recurring: bool,
    pub frequency: String,
    pub next_due: Option<String>,
}

impl ScheduledRow {
    fn from_item(s: &ScheduledExpense, reference: chrono::NaiveDate) -> Self {
        Self {
            id: s.id,
            date: s.date.to_string(),
            amount: format!("{:.2}", s.amount),
            category: s.category.clone(),
            description: s.description.clone().unwrap_or_default(),
            recurring: s.recurring(),
            frequency: s.frequency.to_string(),
            next_due: next_occurrence(s, reference).map(|d| d.to_string()),
        }
    }
}

pub fn query_rows<P: Persistence>(session: &Session<P>) -> Vec<ScheduledRow> {
    let reference = today();
    session
        .schedule()
        .all()
        .iter()
        .map(|s| ScheduledRow::from_item(s, reference))
        .collect()
}

fn list<P: Persistence>(session: &Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(session);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let symbol = currency_symbol(session.backend())?;
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    format!("{}{}", symbol, r.amount),
                    r.category.clone(),
                    r.description.clone(),
                    if r.recurring { "Yes" } else { "No" }.to_string(),
                    r.frequency.clone(),
                    r.next_due.clone().unwrap_or_else(|| "-".into()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID",
                    "Date",
                    "Amount",
                    "Category",
                    "Description",
                    "Recurring",
                    "Frequency",
                    "Next due"
                ],
                rows
            )
        );
    }
    Ok(())
}

fn expand<P: Persistence>(session: &Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let period = period_or(sub, "period", PeriodKey::current_month(today()))?;
    let occurrences = session.schedule().upcoming(&period);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &occurrences)? {
        let symbol = currency_symbol(session.backend())?;
        let total: Decimal = occurrences.iter().map(|o| o.amount).sum();
        let mut rows: Vec<Vec<String>> = occurrences
            .iter()
            .map(|o| {
                vec![
                    o.date.to_string(),
                    o.category.clone(),
                    o.description.clone().unwrap_or_default(),
                    o.frequency.to_string(),
                    fmt_money(&o.amount, &symbol),
                ]
            })
            .collect();
        rows.push(vec![
            format!("Total {}", period),
            String::new(),
            String::new(),
            String::new(),
            fmt_money(&total, &symbol),
        ]);
        println!(
            "{}",
            pretty_table(
                &["Date", "Category", "Description", "Frequency", "Amount"],
                rows
            )
        );
    }
    Ok(())
}
