// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::{optional, required};
use crate::config::{self, KNOWN_SETTINGS};
use crate::persistence::Persistence;
use crate::session::Session;
use crate::utils::pretty_table;

pub fn handle<P: Persistence>(session: &Session<P>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let keys: Vec<&str> = match optional(sub, "key") {
                Some(k) => vec![k],
                None => KNOWN_SETTINGS.iter().map(|(k, _)| *k).collect(),
            };
            let mut rows = Vec::new();
            for key in keys {
                rows.push(vec![key.to_string(), config::get(session.backend(), key)?]);
            }
            println!("{}", pretty_table(&["Key", "Value"], rows));
        }
        Some(("set", sub)) => {
            let key = required(sub, "key")?;
            let value = required(sub, "value")?;
            config::set(session.backend(), key, value)?;
            println!("Set {} = {}", key, value);
        }
        _ => {}
    }
    Ok(())
}
