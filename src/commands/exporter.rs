// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use serde_json::json;

use super::required;
use crate::persistence::Persistence;
use crate::session::Session;

pub fn handle<P: Persistence>(session: &Session<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("entries", sub)) => export_entries(session, sub),
        Some(("scheduled", sub)) => export_scheduled(session, sub),
        _ => Ok(()),
    }
}

fn output_format(sub: &clap::ArgMatches) -> Result<String> {
    let fmt = required(sub, "format")?.to_lowercase();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    Ok(fmt)
}

/// Oldest first, with the same column names the import reads.
fn export_entries<P: Persistence>(session: &Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = output_format(sub)?;
    let out = required(sub, "out")?;
    let mut entries = session.entries().all();
    entries.reverse();

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record(["Date", "Amount", "Category", "Description", "Type"])?;
        for e in &entries {
            wtr.write_record([
                e.date.to_string(),
                e.amount.to_string(),
                e.category.clone(),
                e.description.clone().unwrap_or_default(),
                e.kind.to_string(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = entries
            .iter()
            .map(|e| {
                json!({
                    "date": e.date.to_string(),
                    "amount": e.amount.to_string(),
                    "category": e.category,
                    "description": e.description,
                    "type": e.kind.as_str(),
                })
            })
            .collect();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    println!("Exported {} entries to {}", entries.len(), out);
    Ok(())
}

fn export_scheduled<P: Persistence>(session: &Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = output_format(sub)?;
    let out = required(sub, "out")?;
    let scheduled = session.schedule().all();

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record([
            "Date",
            "Amount",
            "Category",
            "Description",
            "Recurring",
            "Frequency",
        ])?;
        for s in scheduled {
            wtr.write_record([
                s.date.to_string(),
                s.amount.to_string(),
                s.category.clone(),
                s.description.clone().unwrap_or_default(),
                if s.recurring() { "Yes" } else { "No" }.to_string(),
                s.frequency.to_string(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = scheduled
            .iter()
            .map(|s| {
                json!({
                    "date": s.date.to_string(),
                    "amount": s.amount.to_string(),
                    "category": s.category,
                    "description": s.description,
                    "recurring": s.recurring(),
                    "frequency": s.frequency.as_str(),
                })
            })
            .collect();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    println!("Exported {} scheduled expenses to {}", scheduled.len(), out);
    Ok(())
}
