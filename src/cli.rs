// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::builder::BoolishValueParser;
use clap::{Arg, ArgAction, Command, value_parser};

use crate::projection::MAX_FORECAST_MONTHS;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn period_arg(help: &'static str) -> Arg {
    Arg::new("period").long("period").help(help)
}

fn entry_cmd() -> Command {
    Command::new("entry")
        .about("Record and browse income and expenses")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Add an income or expense")
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .default_value("Expense")
                        .help("Expense or Income"),
                )
                .arg(Arg::new("desc").long("desc")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List entries, newest first")
                .arg(Arg::new("month").long("month").conflicts_with("year"))
                .arg(Arg::new("year").long("year"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Replace fields of an entry")
                .arg(id_arg())
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("kind").long("kind"))
                .arg(Arg::new("desc").long("desc")),
        )
        .subcommand(Command::new("rm").about("Delete an entry").arg(id_arg()))
}

fn scheduled_cmd() -> Command {
    Command::new("scheduled")
        .about("Plan one-time and recurring future expenses")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Schedule an expense")
                .arg(Arg::new("date").long("date").help("Anchor date, defaults to today"))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("desc").long("desc"))
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("frequency")
                        .long("frequency")
                        .help("Monthly, Quarterly or Yearly"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list").about("List scheduled expenses with their next due date"),
        ))
        .subcommand(
            Command::new("edit")
                .about("Replace fields of a scheduled expense")
                .arg(id_arg())
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("desc").long("desc"))
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .value_parser(BoolishValueParser::new()),
                )
                .arg(Arg::new("frequency").long("frequency")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a scheduled expense")
                .arg(id_arg()),
        )
        .subcommand(json_flags(
            Command::new("expand")
                .about("Show the occurrences falling in a period")
                .arg(period_arg("YYYY-MM or YYYY, defaults to this month")),
        ))
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Per-category spending budgets")
        .subcommand_required(true)
        .subcommand(
            Command::new("set")
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(json_flags(Command::new("list")))
        .subcommand(json_flags(
            Command::new("report")
                .about("Budget against actual spend")
                .arg(period_arg("YYYY-MM or YYYY, defaults to this month")),
        ))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Summaries and projections")
        .subcommand_required(true)
        .subcommand(json_flags(
            Command::new("summary")
                .about("Income, expenses and net savings")
                .arg(period_arg("YYYY-MM or YYYY, defaults to this month")),
        ))
        .subcommand(json_flags(
            Command::new("balance")
                .about("Current and projected balance after scheduled expenses")
                .arg(period_arg("YYYY-MM or YYYY, defaults to this month")),
        ))
        .subcommand(json_flags(
            Command::new("yearly")
                .about("Month by month totals for a year")
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(i32)),
                ),
        ))
        .subcommand(json_flags(
            Command::new("category")
                .about("Entries and total for one category")
                .arg(Arg::new("category").long("category").required(true))
                .arg(period_arg("YYYY-MM or YYYY, defaults to this month")),
        ))
        .subcommand(json_flags(
            Command::new("forecast")
                .about("Projected balance for consecutive months")
                .arg(Arg::new("from").long("from").help("First month, defaults to this month"))
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(
                            value_parser!(u32).range(1..=MAX_FORECAST_MONTHS as i64),
                        ),
                ),
        ))
}

pub fn build_cli() -> Command {
    Command::new("famledger")
        .about("Family income, expenses, budgets and scheduled-expense projection")
        .version(clap::crate_version!())
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .default_value("default")
                .help("Whose ledger to open"),
        )
        .subcommand(Command::new("init").about("Create the user's database"))
        .subcommand(entry_cmd())
        .subcommand(scheduled_cmd())
        .subcommand(budget_cmd())
        .subcommand(report_cmd())
        .subcommand(
            Command::new("category")
                .about("Known categories")
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("export")
                .about("Write records to a file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("entries")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("scheduled")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Read records from a CSV file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("entries")
                        .about("Columns: Date,Amount,Category,Description,Type")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Report rows that could not be read"))
        .subcommand(
            Command::new("config")
                .about("Per-user settings")
                .subcommand_required(true)
                .subcommand(Command::new("get").arg(Arg::new("key").long("key")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
}
