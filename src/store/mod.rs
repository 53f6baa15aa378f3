//! Local key-value persistence. The browser app kept a "recent activities"
//! map in localStorage with ad hoc JSON parsing at each call site; here the
//! same data lives in a small sqlite table behind typed accessors.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::models::activity::Intensity;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS kv_store (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

const RECENT_ACTIVITIES_KEY: &str = "recent_activities";

/// Duration/intensity prefill remembered per activity name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityPrefill {
    pub duration_min: f64,
    pub intensity: Intensity,
}

/// Path-holding handle over the sqlite file; connections are opened per
/// call and configured with WAL and a busy timeout.
#[derive(Clone, Debug)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> AppResult<Self> {
        let path = path.into();
        info!(store_path = %path.display(), "initializing local store");
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self { path };
        {
            store.connection()?;
        }

        Ok(store)
    }

    /// Store under the directory named by `NUTRIFLOW_DATA_DIR`, falling back
    /// to the working directory.
    pub fn from_env() -> AppResult<Self> {
        let dir = env::var("NUTRIFLOW_DATA_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join("nutriflow.db"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Typed read. A corrupt stored payload is logged and treated as
    /// absent rather than failing the caller.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let conn = self.connection()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(
                    target: "app::store",
                    key,
                    error = %err,
                    "corrupt stored value, treating as absent"
                );
                Ok(None)
            }
        }
    }

    /// Typed upsert.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, raw, Utc::now().to_rfc3339()],
        )?;
        debug!(target: "app::store", key, "value stored");
        Ok(())
    }

    pub fn remove(&self, key: &str) -> AppResult<()> {
        let conn = self.connection()?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// The per-activity-name prefill map.
    pub fn recent_activities(&self) -> AppResult<HashMap<String, ActivityPrefill>> {
        Ok(self.get(RECENT_ACTIVITIES_KEY)?.unwrap_or_default())
    }

    /// Remembers the duration/intensity last used for an activity name.
    pub fn remember_activity(&self, name: &str, prefill: ActivityPrefill) -> AppResult<()> {
        let mut map = self.recent_activities()?;
        map.insert(name.to_string(), prefill);
        self.set(RECENT_ACTIVITIES_KEY, &map)
    }

    fn connection(&self) -> AppResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.pragma_update(None, "journal_mode", &"WAL")?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(conn)
    }
}
