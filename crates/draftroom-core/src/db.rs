// SQLite persistence for observed picks and key-value draft state.

use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::draft::pick::{Pick, Player};

/// SQLite-backed store for picks seen on the feed, scoped by draft id so a
/// restart can replay the session in progress.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure all tables
    /// exist. Pass `":memory:"` for an ephemeral in-memory database.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS draft_picks (
                pick_number   INTEGER NOT NULL,
                draft_id      TEXT NOT NULL,
                player_name   TEXT NOT NULL,
                position      TEXT NOT NULL,
                team          TEXT NOT NULL,
                jersey_number INTEGER,
                picked_at     TEXT NOT NULL,
                PRIMARY KEY (pick_number, draft_id)
            );

            CREATE INDEX IF NOT EXISTS idx_draft_picks_draft_id ON draft_picks(draft_id);

            CREATE TABLE IF NOT EXISTS draft_state (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database mutex poisoned"))
    }

    /// Record a completed pick. Uses INSERT OR IGNORE, so re-recording the
    /// same pick number in the same draft is a no-op. Picks without a player
    /// are not stored. Returns whether a row was written.
    pub fn record_pick(&self, pick: &Pick, draft_id: &str) -> Result<bool> {
        let Some(player) = &pick.player else {
            return Ok(false);
        };
        let picked_at = pick.picked_at.unwrap_or_else(Utc::now).to_rfc3339();

        let conn = self.conn()?;
        let changed = conn
            .execute(
                "INSERT OR IGNORE INTO draft_picks
                    (pick_number, draft_id, player_name, position, team, jersey_number, picked_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    pick.pick_number,
                    draft_id,
                    player.name,
                    player.position,
                    player.team,
                    player.jersey_number,
                    picked_at,
                ],
            )
            .context("failed to record draft pick")?;
        Ok(changed > 0)
    }

    /// Load picks for one draft session, ordered by pick number.
    pub fn load_picks(&self, draft_id: &str) -> Result<Vec<Pick>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT pick_number, player_name, position, team, jersey_number, picked_at
                 FROM draft_picks WHERE draft_id = ?1 ORDER BY pick_number",
            )
            .context("failed to prepare load_picks query")?;

        let picks = stmt
            .query_map(params![draft_id], |row| {
                let picked_at: String = row.get(5)?;
                Ok(Pick {
                    pick_number: row.get(0)?,
                    player: Some(Player {
                        name: row.get(1)?,
                        position: row.get(2)?,
                        team: row.get(3)?,
                        jersey_number: row.get(4)?,
                    }),
                    picked_at: DateTime::parse_from_rfc3339(&picked_at)
                        .ok()
                        .map(|t| t.with_timezone(&Utc)),
                })
            })
            .context("failed to query draft picks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map draft pick rows")?;

        Ok(picks)
    }

    /// Persist an arbitrary JSON value under `key`, overwriting any previous
    /// value.
    pub fn save_state(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let conn = self.conn()?;
        let json_str =
            serde_json::to_string(value).context("failed to serialize state value")?;
        conn.execute(
            "INSERT OR REPLACE INTO draft_state (key, value) VALUES (?1, ?2)",
            params![key, json_str],
        )
        .context("failed to save state")?;
        Ok(())
    }

    /// Load a previously saved JSON value by `key`.
    pub fn load_state(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT value FROM draft_state WHERE key = ?1")
            .context("failed to prepare load_state query")?;

        let mut rows = stmt
            .query_map(params![key], |row| row.get::<_, String>(0))
            .context("failed to query draft state")?;

        match rows.next() {
            Some(row_result) => {
                let json_str = row_result.context("failed to read state row")?;
                let value: serde_json::Value = serde_json::from_str(&json_str)
                    .context("failed to deserialize state value")?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Whether any pick has been recorded for `draft_id`.
    pub fn has_draft_in_progress(&self, draft_id: &str) -> Result<bool> {
        let conn = self.conn()?;
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM draft_picks WHERE draft_id = ?1)",
                params![draft_id],
                |row| row.get(0),
            )
            .context("failed to check draft_picks existence")?;
        Ok(exists)
    }

    pub fn pick_count(&self, draft_id: &str) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM draft_picks WHERE draft_id = ?1",
                params![draft_id],
                |row| row.get(0),
            )
            .context("failed to count draft picks")?;
        Ok(count as usize)
    }

    // ------------------------------------------------------------------
    // Draft ID management
    // ------------------------------------------------------------------

    const DRAFT_ID_KEY: &'static str = "current_draft_id";

    /// Stored draft id, if one has been set.
    pub fn get_draft_id(&self) -> Result<Option<String>> {
        let value = self.load_state(Self::DRAFT_ID_KEY)?;
        Ok(value.and_then(|v| v.as_str().map(|s| s.to_string())))
    }

    pub fn set_draft_id(&self, draft_id: &str) -> Result<()> {
        self.save_state(
            Self::DRAFT_ID_KEY,
            &serde_json::Value::String(draft_id.to_string()),
        )
    }

    /// Load the stored draft id, or generate and store a new one.
    pub fn get_or_create_draft_id(&self) -> Result<String> {
        if let Some(id) = self.get_draft_id()? {
            return Ok(id);
        }
        let id = Self::generate_draft_id();
        self.set_draft_id(&id)?;
        Ok(id)
    }

    /// New draft id from the current UTC time, e.g. `draft_20260228_143022_123`.
    pub fn generate_draft_id() -> String {
        Utc::now().format("draft_%Y%m%d_%H%M%S_%3f").to_string()
    }
}
