// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{info, warn};

use crate::budget::BudgetTable;
use crate::entries::EntryDraft;
use crate::errors::{DataCorruptionWarning, StoreError, ValidationError};
use crate::models::{LedgerEntry, ScheduledExpense};
use crate::persistence::{Persistence, Snapshot};
use crate::schedule::ScheduleDraft;
use crate::session::validate_user;
use crate::utils::parse_decimal;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.famledger", "Famledger", "famledger"));

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir().join("users");
    fs::create_dir_all(&data_dir).context("Failed to create data dir")?;
    Ok(data_dir)
}

pub fn db_path(user: &str) -> Result<PathBuf> {
    let user = validate_user(user)?;
    Ok(data_dir()?.join(format!("{}.sqlite", user)))
}

/// SQLite file holding one user's entries, schedules, budgets and settings.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    pub fn open_for_user(user: &str) -> Result<Self> {
        let path = db_path(user)?;
        Self::open(&path).with_context(|| format!("Open DB at {}", path.display()))
    }

    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    fn load_entries(
        &self,
        warnings: &mut Vec<DataCorruptionWarning>,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, amount, category, description, kind FROM entries ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            match entry_from_row(id, r)? {
                Ok(entry) => out.push(entry),
                Err(reason) => {
                    warnings.push(DataCorruptionWarning::new("entries", Some(id), reason))
                }
            }
        }
        Ok(out)
    }

    fn load_scheduled(
        &self,
        warnings: &mut Vec<DataCorruptionWarning>,
    ) -> Result<Vec<ScheduledExpense>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, amount, category, description, recurring, frequency FROM scheduled ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            match scheduled_from_row(id, r)? {
                Ok(item) => out.push(item),
                Err(reason) => {
                    warnings.push(DataCorruptionWarning::new("scheduled", Some(id), reason))
                }
            }
        }
        Ok(out)
    }

    fn load_budgets(
        &self,
        warnings: &mut Vec<DataCorruptionWarning>,
    ) -> Result<BudgetTable, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT category, amount FROM budgets ORDER BY category")?;
        let mut rows = stmt.query([])?;
        let mut table = BudgetTable::new();
        while let Some(r) = rows.next()? {
            let category = text_at(r, 0)?.unwrap_or_default();
            let amount = text_at(r, 1)?.unwrap_or_default();
            let parsed = parse_decimal(&amount).and_then(|a| table.set(&category, a));
            if let Err(e) = parsed {
                warnings.push(DataCorruptionWarning::new(
                    "budgets",
                    None,
                    format!("{}: {}", category, e),
                ));
            }
        }
        Ok(table)
    }
}

impl Persistence for SqliteBackend {
    fn load(&self) -> Result<Snapshot, StoreError> {
        let mut warnings = Vec::new();
        let entries = self.load_entries(&mut warnings)?;
        let scheduled = self.load_scheduled(&mut warnings)?;
        let budgets = self.load_budgets(&mut warnings)?;
        for w in &warnings {
            warn!(warning = %w, "skipping unreadable row");
        }
        info!(
            entries = entries.len(),
            scheduled = scheduled.len(),
            skipped = warnings.len(),
            "store loaded"
        );
        Ok(Snapshot {
            entries,
            scheduled,
            budgets,
            warnings,
        })
    }

    fn save_entries(&self, entries: &[LedgerEntry], removed: &[i64]) -> Result<(), StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut upsert = tx.prepare(
                "INSERT INTO entries(id, date, amount, category, description, kind)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(id) DO UPDATE SET date=excluded.date, amount=excluded.amount,
                   category=excluded.category, description=excluded.description, kind=excluded.kind",
            )?;
            for e in entries {
                upsert.execute(params![
                    e.id,
                    e.date.to_string(),
                    e.amount.to_string(),
                    e.category,
                    e.description,
                    e.kind.as_str()
                ])?;
            }
            let mut delete = tx.prepare("DELETE FROM entries WHERE id=?1")?;
            for id in removed {
                delete.execute(params![id])?;
            }
        }
        tx.commit()?;
        info!(rows = entries.len(), removed = removed.len(), "entries saved");
        Ok(())
    }

    fn save_scheduled(
        &self,
        scheduled: &[ScheduledExpense],
        removed: &[i64],
    ) -> Result<(), StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut upsert = tx.prepare(
                "INSERT INTO scheduled(id, date, amount, category, description, recurring, frequency)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO UPDATE SET date=excluded.date, amount=excluded.amount,
                   category=excluded.category, description=excluded.description,
                   recurring=excluded.recurring, frequency=excluded.frequency",
            )?;
            for s in scheduled {
                upsert.execute(params![
                    s.id,
                    s.date.to_string(),
                    s.amount.to_string(),
                    s.category,
                    s.description,
                    s.recurring(),
                    s.frequency.as_str()
                ])?;
            }
            let mut delete = tx.prepare("DELETE FROM scheduled WHERE id=?1")?;
            for id in removed {
                delete.execute(params![id])?;
            }
        }
        tx.commit()?;
        info!(rows = scheduled.len(), removed = removed.len(), "scheduled expenses saved");
        Ok(())
    }

    fn save_budgets(&self, budgets: &BudgetTable) -> Result<(), StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut upsert = tx.prepare(
                "INSERT INTO budgets(category, amount) VALUES (?1, ?2)
                 ON CONFLICT(category) DO UPDATE SET amount=excluded.amount",
            )?;
            for (category, amount) in budgets.iter() {
                upsert.execute(params![category, amount.to_string()])?;
            }
        }
        tx.commit()?;
        info!("budgets saved");
        Ok(())
    }

    fn get_setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        let v = self
            .conn
            .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Reads a column as text whatever its storage class; NULL reads as `None`.
fn text_at(r: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match r.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    })
}

fn entry_from_row(id: i64, r: &Row<'_>) -> rusqlite::Result<Result<LedgerEntry, String>> {
    let date = text_at(r, 1)?.unwrap_or_default();
    let amount = text_at(r, 2)?.unwrap_or_default();
    let category = text_at(r, 3)?.unwrap_or_default();
    let description = text_at(r, 4)?;
    let kind = text_at(r, 5)?.unwrap_or_default();
    Ok(parse_entry(id, date, &amount, category, description, &kind).map_err(|e| e.to_string()))
}

fn parse_entry(
    id: i64,
    date: String,
    amount: &str,
    category: String,
    description: Option<String>,
    kind: &str,
) -> Result<LedgerEntry, ValidationError> {
    let draft = EntryDraft {
        date,
        amount: parse_decimal(amount)?,
        category,
        description,
        kind: kind.parse()?,
    };
    draft.validate(id)
}

fn scheduled_from_row(id: i64, r: &Row<'_>) -> rusqlite::Result<Result<ScheduledExpense, String>> {
    let date = text_at(r, 1)?.unwrap_or_default();
    let amount = text_at(r, 2)?.unwrap_or_default();
    let category = text_at(r, 3)?.unwrap_or_default();
    let description = text_at(r, 4)?;
    let recurring = text_at(r, 5)?.unwrap_or_default();
    let frequency = text_at(r, 6)?;
    let parsed = parse_decimal(&amount).and_then(|amount| {
        ScheduleDraft {
            date,
            amount,
            category,
            description,
            recurring: is_truthy(&recurring),
            frequency,
        }
        .validate(id)
    });
    Ok(parsed.map_err(|e| e.to_string()))
}

/// Accepts both the integer flag and the `Yes`/`No` spelling of spreadsheet exports.
pub fn is_truthy(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "1" | "yes" | "y" | "true"
    )
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS entries(
        id INTEGER PRIMARY KEY,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        description TEXT,
        kind TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_entries_date ON entries(date);

    CREATE TABLE IF NOT EXISTS scheduled(
        id INTEGER PRIMARY KEY,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        description TEXT,
        recurring INTEGER NOT NULL DEFAULT 0,
        frequency TEXT NOT NULL DEFAULT 'One-time'
    );

    CREATE TABLE IF NOT EXISTS budgets(
        category TEXT PRIMARY KEY,
        amount TEXT NOT NULL DEFAULT '0'
    );
    "#,
    )?;
    Ok(())
}
