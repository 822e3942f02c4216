// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use super::required;
use crate::entries::EntryDraft;
use crate::models::EntryKind;
use crate::persistence::Persistence;
use crate::session::Session;
use crate::utils::parse_decimal;

pub fn handle<P: Persistence>(session: &mut Session<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("entries", sub)) => import_entries(session, sub),
        _ => Ok(()),
    }
}

/// Reads `Date,Amount,Category,Description,Type` rows. Nothing is stored unless every row is valid.
fn import_entries<P: Persistence>(session: &mut Session<P>, sub: &clap::ArgMatches) -> Result<()> {
    let path = required(sub, "path")?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let mut drafts = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        // header is line 1
        let line = idx + 2;
        let rec = result?;
        let date = rec.get(0).context("date missing")?.trim().to_string();
        let amount_raw = rec.get(1).context("amount missing")?.trim();
        let category = rec.get(2).context("category missing")?.trim().to_string();
        let description = rec
            .get(3)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());
        let kind: EntryKind = rec
            .get(4)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or("Expense")
            .parse()
            .with_context(|| format!("Line {}", line))?;
        let amount = parse_decimal(amount_raw).with_context(|| format!("Line {}", line))?;

        let draft = EntryDraft {
            date,
            amount,
            category,
            description,
            kind,
        };
        draft
            .validate(0)
            .with_context(|| format!("Line {}", line))?;
        drafts.push(draft);
    }

    let count = session.import_entries(drafts)?;
    println!("Imported {} entries from {}", count, path);
    Ok(())
}
