//! SQLite-backed settings store: a durable key → string map.
//!
//! One connection behind a mutex. [`SettingsStore::atomically`] holds the lock
//! for the whole closure and runs it inside a single `BEGIN IMMEDIATE`
//! transaction, so every key written by the closure commits together or not at all.

use crate::db::init_db;
use crate::errors::{AppError, AppResult};
use crate::utils::date::{format_date, parse_date};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Keys the ledger persists.
pub mod keys {
    pub const BALANCE: &str = "balance";
    pub const TARGET: &str = "target";
    pub const LAST_APPLIED: &str = "last_applied";
    pub const INITIALIZED: &str = "initialized";
}

pub struct SettingsStore {
    conn: Mutex<Connection>,
    path: String,
}

impl SettingsStore {
    /// Open (or create) the database at `path` and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        init_db(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: path.to_string(),
        })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: ":memory:".to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A panic inside a closure drops its transaction, which rolls back.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `func` as one atomic unit. Returning an error rolls everything back.
    pub fn atomically<T, F>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Settings<'_>) -> AppResult<T>,
    {
        let mut conn = self.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let out = func(&Settings { conn: &*tx })?;
        tx.commit()?;
        Ok(out)
    }

    /// Direct access to the connection, for maintenance commands.
    pub fn with_conn<T, F>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Connection) -> AppResult<T>,
    {
        let conn = self.lock();
        func(&*conn)
    }
}

/// Typed view over the settings table, valid for the duration of one transaction.
pub struct Settings<'a> {
    conn: &'a Connection,
}

impl Settings<'_> {
    pub fn get(&self, key: &str) -> AppResult<Option<String>> {
        let value: Option<Option<String>> = self
            .conn
            .prepare_cached("SELECT value FROM settings WHERE key = ?1")?
            .query_row([key], |row| row.get(0))
            .optional()?;
        Ok(value.flatten())
    }

    /// Insert or overwrite `key`.
    pub fn set(&self, key: &str, value: impl ToString) -> AppResult<()> {
        self.conn
            .prepare_cached(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )?
            .execute(params![key, value.to_string()])?;
        Ok(())
    }

    pub fn get_i64(&self, key: &str) -> AppResult<Option<i64>> {
        match self.get(key)? {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| AppError::CorruptValue {
                    key: key.to_string(),
                    value: raw,
                }),
        }
    }

    /// A missing or blank value reads as `None`.
    pub fn get_date(&self, key: &str) -> AppResult<Option<NaiveDate>> {
        match self.get(key)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_date(&raw)
                .map(Some)
                .ok_or(AppError::CorruptValue {
                    key: key.to_string(),
                    value: raw,
                }),
        }
    }

    pub fn set_date(&self, key: &str, date: &NaiveDate) -> AppResult<()> {
        self.set(key, format_date(date))
    }

    /// Every stored pair, ordered by key.
    pub fn all(&self) -> AppResult<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, COALESCE(value, '') FROM settings ORDER BY key ASC")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}
