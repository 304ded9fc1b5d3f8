use anyhow::{Context, Result};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fmt;
use std::path::PathBuf;

use crate::paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Ideas,
    Market,
}

impl RunKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Ideas => "ideas",
            Self::Market => "market",
        }
    }
}

impl FromSql for RunKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "ideas" => Ok(Self::Ideas),
            "market" => Ok(Self::Market),
            other => Err(FromSqlError::Other(
                format!("unknown run kind '{other}'").into(),
            )),
        }
    }
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A completed run about to be recorded.
#[derive(Debug, Clone)]
pub struct NewRun<'a> {
    pub kind: RunKind,
    pub provider: &'a str,
    pub model: &'a str,
    pub prompt: &'a str,
    pub content: &'a str,
    pub thinking: &'a str,
    /// The ideas run a market analysis was derived from.
    pub parent_id: Option<i64>,
}

/// A recorded run.
#[derive(Debug, Clone)]
pub struct Run {
    pub id: i64,
    pub kind: RunKind,
    pub provider: String,
    pub model: String,
    pub prompt: String,
    pub content: String,
    pub thinking: String,
    pub parent_id: Option<i64>,
    pub created_at: String,
}

/// One line of `ideate history`.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub id: i64,
    pub kind: RunKind,
    pub model: String,
    pub preview: String,
    pub created_at: String,
}

pub struct HistoryStore {
    db_path: PathBuf,
}

impl HistoryStore {
    pub fn new() -> Result<Self> {
        let data_dir = paths::data_dir()?;

        std::fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;

        let store = Self {
            db_path: data_dir.join("history.db"),
        };

        store.init_db()?;

        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS runs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL,
                provider TEXT NOT NULL,
                model TEXT NOT NULL,
                prompt TEXT NOT NULL,
                content TEXT NOT NULL,
                thinking TEXT NOT NULL,
                parent_id INTEGER REFERENCES runs(id),
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create runs table")?;

        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path).with_context(|| {
            format!(
                "Failed to open history database: {}",
                self.db_path.display()
            )
        })
    }

    /// Records a completed run and returns its id.
    pub fn record(&self, run: &NewRun<'_>) -> Result<i64> {
        let conn = self.connect()?;

        conn.execute(
            "INSERT INTO runs (kind, provider, model, prompt, content, thinking, parent_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                run.kind.as_str(),
                run.provider,
                run.model,
                run.prompt,
                run.content,
                run.thinking,
                run.parent_id,
            ],
        )
        .context("Failed to insert run into history")?;

        Ok(conn.last_insert_rowid())
    }

    /// Most recent runs first.
    pub fn list(&self, limit: usize) -> Result<Vec<RunSummary>> {
        let conn = self.connect()?;

        let mut stmt = conn.prepare(
            "SELECT id, kind, model, content, created_at FROM runs
             ORDER BY id DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map([limit as i64], |row| {
            Ok(RunSummary {
                id: row.get(0)?,
                kind: row.get(1)?,
                model: row.get(2)?,
                preview: preview(&row.get::<_, String>(3)?),
                created_at: row.get(4)?,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read history")
    }

    pub fn get(&self, id: i64) -> Result<Option<Run>> {
        let conn = self.connect()?;

        conn.query_row(
            "SELECT id, kind, provider, model, prompt, content, thinking, parent_id, created_at
             FROM runs WHERE id = ?1",
            [id],
            run_from_row,
        )
        .optional()
        .context("Failed to read run from history")
    }
}

fn run_from_row(row: &Row<'_>) -> rusqlite::Result<Run> {
    Ok(Run {
        id: row.get(0)?,
        kind: row.get(1)?,
        provider: row.get(2)?,
        model: row.get(3)?,
        prompt: row.get(4)?,
        content: row.get(5)?,
        thinking: row.get(6)?,
        parent_id: row.get(7)?,
        created_at: row.get(8)?,
    })
}

/// First non-empty line of `content`, shortened for listing.
fn preview(content: &str) -> String {
    const MAX_CHARS: usize = 60;

    let line = content
        .lines()
        .map(|l| l.trim_start_matches('#').trim())
        .find(|l| !l.is_empty())
        .unwrap_or_default();

    if line.chars().count() > MAX_CHARS {
        let truncated: String = line.chars().take(MAX_CHARS).collect();
        format!("{truncated}…")
    } else {
        line.to_string()
    }
}
