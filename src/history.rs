use crate::app_dirs::AppDirs;
use crate::error::StoreError;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Key the history list is stored under
pub const HISTORY_KEY: &str = "results";

/// Number of finished sessions kept
pub const HISTORY_LIMIT: usize = 10;

/// Outcome of one finished session as it is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Total difference formatted with two decimals
    pub difference: String,
    pub hits: u32,
}

impl HistoryRecord {
    pub fn new(total_difference: f64, hits: u32) -> Self {
        Self {
            difference: format!("{:.2}", total_difference),
            hits,
        }
    }

    pub fn difference_value(&self) -> Option<f64> {
        self.difference.parse().ok()
    }
}

/// Put `record` in front and drop whatever falls past `limit`
pub fn push_capped(history: &mut Vec<HistoryRecord>, record: HistoryRecord, limit: usize) {
    history.insert(0, record);
    history.truncate(limit);
}

/// Mean total difference over the stored sessions
pub fn average_difference(history: &[HistoryRecord]) -> Option<f64> {
    let values: Vec<f64> = history
        .iter()
        .filter_map(HistoryRecord::difference_value)
        .collect();

    match values.len() {
        0 => None,
        n => Some(values.iter().sum::<f64>() / n as f64),
    }
}

pub trait HistoryStore {
    /// Stored records, newest first. A missing entry reads as empty.
    fn load(&self) -> Vec<HistoryRecord>;
    fn save(&mut self, records: &[HistoryRecord]) -> Result<(), StoreError>;
}

impl<S: HistoryStore + ?Sized> HistoryStore for Box<S> {
    fn load(&self) -> Vec<HistoryRecord> {
        (**self).load()
    }

    fn save(&mut self, records: &[HistoryRecord]) -> Result<(), StoreError> {
        (**self).save(records)
    }
}

/// Volatile store, used by tests and when no database can be opened
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    records: Vec<HistoryRecord>,
}

impl MemoryHistoryStore {
    pub fn with_records(records: Vec<HistoryRecord>) -> Self {
        Self { records }
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Vec<HistoryRecord> {
        self.records.clone()
    }

    fn save(&mut self, records: &[HistoryRecord]) -> Result<(), StoreError> {
        self.records = records.to_vec();
        Ok(())
    }
}

/// Key-value table in SQLite holding the history as a JSON array
#[derive(Debug)]
pub struct SqliteHistoryStore {
    conn: Connection,
}

impl SqliteHistoryStore {
    /// Open the store at the default state location
    pub fn new() -> Result<Self, StoreError> {
        let path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("pinpoint.db"));
        Self::open(path)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
            [],
        )?;
        Ok(Self { conn })
    }

    fn read_raw(&self) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![HISTORY_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Strict variant of `load` that reports unreadable data
    pub fn try_load(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        match self.read_raw()? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![HISTORY_KEY])?;
        Ok(())
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn load(&self) -> Vec<HistoryRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("ignoring unreadable history: {}", e);
                Vec::new()
            }
        }
    }

    fn save(&mut self, records: &[HistoryRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.conn.execute(
            r#"
            INSERT INTO kv_store (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            params![HISTORY_KEY, json],
        )?;
        Ok(())
    }
}
