// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};

use famledger::db::{self, SqliteBackend};
use famledger::session::Session;
use famledger::{cli, commands, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    if let Some(("category", sub)) = matches.subcommand() {
        return commands::categories::handle(sub);
    }

    let user = matches
        .get_one::<String>("user")
        .map(String::as_str)
        .unwrap_or("default");
    let backend = SqliteBackend::open_for_user(user)?;
    let mut session =
        Session::open(user, backend).with_context(|| format!("Load ledger for '{}'", user))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path(user)?.display());
        }
        Some(("entry", sub)) => commands::entries::handle(&mut session, sub)?,
        Some(("scheduled", sub)) => commands::scheduled::handle(&mut session, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut session, sub)?,
        Some(("report", sub)) => commands::reports::handle(&session, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&session, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&session)?,
        Some(("config", sub)) => commands::config::handle(&session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
