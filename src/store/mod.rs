// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Local persisted state.
//!
//! This module keeps the small amount of state that survives a restart, the
//! ranking and the dark-mode preference, in a single SQLite key-value table.
//!
//! # Tables
//!
//! * `kv` - One row per named entry, the value is stored as text.
//!
//! Values are always overwritten whole. The ranking is stored as a JSON array
//! holding `null` or an album object for each slot.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::warn;

use crate::model::{AlbumRecord, ranking::Rankings};

const RANKINGS_KEY: &str = "rankings";
const DARK_MODE_KEY: &str = "darkMode";

/// Opens the store, creating the file and schema if needed.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened or the schema
/// cannot be created.
pub(crate) fn open_store(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open store {}", path.display()))?;

    create_schema(&conn)?;

    Ok(conn)
}

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );",
    )
    .context("Failed to create schema")?;

    Ok(())
}

fn get_value(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare_cached("SELECT value FROM kv WHERE key = ?1")?;
    let value = stmt.query_row(params![key], |row| row.get(0)).optional()?;

    Ok(value)
}

fn set_value(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )?;
    stmt.execute(params![key, value])?;

    Ok(())
}

/// Loads the persisted ranking, or an empty one of length `len`.
///
/// A missing entry, unreadable JSON or a store error all fall back to an
/// empty ranking; only the latter two are logged.
pub(crate) fn load_rankings(conn: &Connection, len: usize) -> Rankings {
    let stored = match get_value(conn, RANKINGS_KEY) {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Failed to read rankings: {:#}", e);
            None
        }
    };

    let Some(json) = stored else {
        return Rankings::new(len);
    };

    match serde_json::from_str::<Vec<Option<AlbumRecord>>>(&json) {
        Ok(slots) => Rankings::from_slots(slots, len),
        Err(e) => {
            warn!("Discarding unreadable rankings: {}", e);
            Rankings::new(len)
        }
    }
}

/// Overwrites the persisted ranking with the full slot sequence.
pub(crate) fn save_rankings(conn: &Connection, rankings: &Rankings) -> Result<()> {
    let json = serde_json::to_string(rankings.slots()).context("Failed to serialize rankings")?;
    set_value(conn, RANKINGS_KEY, &json).context("Failed to save rankings")
}

pub(crate) fn load_dark_mode(conn: &Connection) -> bool {
    match get_value(conn, DARK_MODE_KEY) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            warn!("Failed to read dark mode preference: {:#}", e);
            false
        }
    }
}

pub(crate) fn save_dark_mode(conn: &Connection, dark_mode: bool) -> Result<()> {
    set_value(conn, DARK_MODE_KEY, if dark_mode { "true" } else { "false" })
        .context("Failed to save dark mode preference")
}

#[cfg(test)]
pub(crate) fn memory_store() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    create_schema(&conn).unwrap();
    conn
}
