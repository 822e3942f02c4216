// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{EntryKind, is_discretionary};
use crate::utils::pretty_table;

/// Categories are a fixed set per entry type; there is nothing to add or remove.
pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", _)) | None => {
            let mut data = Vec::new();
            for kind in [EntryKind::Expense, EntryKind::Income] {
                for cat in kind.categories() {
                    let flag = if is_discretionary(cat) { "yes" } else { "" };
                    data.push(vec![kind.to_string(), cat.to_string(), flag.to_string()]);
                }
            }
            println!("{}", pretty_table(&["Type", "Category", "Discretionary"], data));
        }
        _ => {}
    }
    Ok(())
}
