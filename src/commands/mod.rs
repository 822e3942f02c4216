// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod categories;
pub mod config;
pub mod doctor;
pub mod entries;
pub mod exporter;
pub mod importer;
pub mod reports;
pub mod scheduled;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::period::PeriodKey;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn required<'a>(sub: &'a clap::ArgMatches, id: &str) -> Result<&'a str> {
    sub.get_one::<String>(id)
        .map(|s| s.trim())
        .with_context(|| format!("--{} is required", id))
}

pub(crate) fn optional<'a>(sub: &'a clap::ArgMatches, id: &str) -> Option<&'a str> {
    sub.get_one::<String>(id).map(|s| s.trim())
}

/// Reads a `YYYY-MM`/`YYYY` argument, falling back when it was not given.
pub(crate) fn period_or(sub: &clap::ArgMatches, id: &str, fallback: PeriodKey) -> Result<PeriodKey> {
    match optional(sub, id) {
        Some(raw) => Ok(raw.parse::<PeriodKey>()?),
        None => Ok(fallback),
    }
}
