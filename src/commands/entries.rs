// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::Serialize;

use super::{optional, required, today};
use crate::config::currency_symbol;
use crate::entries::EntryDraft;
use crate::errors::ValidationError;
use crate::models::{EntryKind, LedgerEntry, is_discretionary};
use crate::period::PeriodKey;
use crate::persistence::Persistence;
use crate::session::Session;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle<P: Persistence>(session: &mut Session<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<P: Persistence>(session: &mut Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let kind: EntryKind = optional(sub, "kind").unwrap_or("Expense").parse()?;
    let draft = EntryDraft {
        date: optional(sub, "date")
            .map(str::to_string)
            .unwrap_or_else(|| today().to_string()),
        amount: parse_decimal(required(sub, "amount")?)?,
        category: required(sub, "category")?.to_string(),
        description: optional(sub, "desc").map(str::to_string),
        kind,
    };
    let entry = session.add_entry(draft).context("Entry rejected")?;
    let symbol = currency_symbol(session.backend())?;
    println!(
        "Recorded {} #{}: {} on {} ({})",
        entry.kind,
        entry.id,
        fmt_money(&entry.amount, &symbol),
        entry.date,
        entry.category
    );
    Ok(())
}

fn edit<P: Persistence>(session: &mut Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let current = session
        .entries()
        .get(id)
        .cloned()
        .ok_or(ValidationError::UnknownId(id))?;
    let draft = EntryDraft {
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
        kind: match optional(sub, "kind") {
            Some(raw) => raw.parse()?,
            None => current.kind,
        },
    };
    let entry = session.update_entry(id, draft).context("Entry rejected")?;
    println!("Updated entry #{} ({} on {})", entry.id, entry.category, entry.date);
    Ok(())
}

fn remove<P: Persistence>(session: &mut Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("--id is required")?;
    let entry = session.delete_entry(id)?;
    println!("Deleted entry #{} ({} on {})", entry.id, entry.category, entry.date);
    Ok(())
}

fn list<P: Persistence>(session: &Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let symbol = currency_symbol(session.backend())?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    if r.discretionary {
                        format!("{} (!)", r.category)
                    } else {
                        r.category.clone()
                    },
                    format!("{}{}", symbol, r.amount),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Amount", "Description"],
                rows
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct EntryRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub description: String,
    pub discretionary: bool,
}

impl From<&LedgerEntry> for EntryRow {
    fn from(e: &LedgerEntry) -> Self {
        Self {
            id: e.id,
            date: e.date.to_string(),
            kind: e.kind.to_string(),
            category: e.category.clone(),
            amount: format!("{:.2}", e.amount),
            description: e.description.clone().unwrap_or_default(),
            discretionary: is_discretionary(&e.category),
        }
    }
}

/// Entries matching the `list` filters, newest first.
pub fn query_rows<P: Persistence>(
    session: &Session<P>,
    sub: &clap::ArgMatches,
) -> Result<Vec<EntryRow>> {
    let period = match (optional(sub, "month"), optional(sub, "year")) {
        (Some(raw), _) | (None, Some(raw)) => Some(raw.parse::<PeriodKey>()?),
        (None, None) => None,
    };
    let entries = match optional(sub, "category") {
        Some(cat) => session.entries().filter_by_category(cat, period.as_ref()),
        None => match period {
            Some(p) => session.entries().filter_by_period(&p),
            None => session.entries().all(),
        },
    };
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    Ok(entries.into_iter().take(limit).map(EntryRow::from).collect())
}
