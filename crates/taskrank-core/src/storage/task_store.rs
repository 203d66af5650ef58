//! SQLite-backed store for the most recently submitted task set.
//!
//! The store has one write operation: replace everything. There is no
//! per-record update and no locking beyond what SQLite provides.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use super::data_dir;
use super::migrations;
use crate::error::{DatabaseError, Result, ValidationError};
use crate::task::{TaskId, TaskRecord};

/// Parse a stored due date, treating unreadable values as absent.
fn parse_due_date(raw: Option<String>) -> Option<NaiveDate> {
    let raw = raw?;
    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(value = %raw, error = %e, "ignoring unreadable due_date");
            None
        }
    }
}

/// Parse a stored dependency list, treating unreadable values as empty.
fn parse_dependencies(raw: &str) -> Vec<TaskId> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(value = %raw, error = %e, "ignoring unreadable dependencies");
        Vec::new()
    })
}

fn row_to_task(row: &rusqlite::Row) -> std::result::Result<TaskRecord, rusqlite::Error> {
    let due_date: Option<String> = row.get(2)?;
    let dependencies: String = row.get(5)?;
    Ok(TaskRecord {
        id: Some(TaskId::Int(row.get(0)?)),
        title: row.get(1)?,
        due_date: parse_due_date(due_date),
        estimated_hours: Some(row.get(3)?),
        importance: Some(row.get(4)?),
        dependencies: parse_dependencies(&dependencies),
        extra: serde_json::Map::new(),
    })
}

/// Check a batch before it is written.
///
/// Stored ids are SQLite row ids, so only integer ids are accepted here.
/// Dependency lists may still name any id.
fn validate_batch(tasks: &[TaskRecord]) -> std::result::Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        task.validate()?;
        if let Some(id) = &task.id {
            let Some(n) = id.as_int() else {
                return Err(ValidationError::InvalidValue {
                    field: "id".into(),
                    message: format!("stored tasks need integer ids, got \"{id}\""),
                });
            };
            if !seen.insert(n) {
                return Err(ValidationError::DuplicateId(id.clone()));
            }
        }
    }
    Ok(())
}

/// Final ids for a validated batch, in submission order.
///
/// Records without an id get fresh ids above every integer id the batch
/// mentions, explicit or as a dependency, so an assigned id never turns a
/// dangling reference into a real edge.
fn assign_ids(tasks: &[TaskRecord]) -> Vec<i64> {
    let highest = tasks
        .iter()
        .flat_map(|task| task.id.iter().chain(task.dependencies.iter()))
        .filter_map(TaskId::as_int)
        .max()
        .unwrap_or(0)
        .max(0);

    let mut next = highest;
    tasks
        .iter()
        .map(|task| match task.id.as_ref().and_then(TaskId::as_int) {
            Some(n) => n,
            None => {
                next += 1;
                next
            }
        })
        .collect()
}

/// Persistent task set.
pub struct TaskStore {
    conn: Connection,
}

impl TaskStore {
    /// Open the store at `<data_dir>/taskrank.db`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("taskrank.db"))
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store.
    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Replace every stored task with `tasks`.
    ///
    /// Records keep their submitted ids; records without one are assigned
    /// ids no other record uses or refers to. Nothing is written if any
    /// record fails validation. Returns the stored records in submission
    /// order.
    pub fn replace_all(&self, tasks: &[TaskRecord]) -> Result<Vec<TaskRecord>> {
        validate_batch(tasks)?;
        let ids = assign_ids(tasks);

        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM tasks", [])?;

        let mut stored = Vec::with_capacity(tasks.len());
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (id, title, due_date, estimated_hours, importance, dependencies)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for (task, id) in tasks.iter().zip(ids) {
                stmt.execute(params![
                    id,
                    task.title,
                    task.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
                    task.effort_hours(),
                    task.importance_level(),
                    serde_json::to_string(&task.dependencies)?,
                ])?;
                let mut record = task.clone();
                record.id = Some(TaskId::Int(id));
                record.estimated_hours = Some(task.effort_hours());
                record.importance = Some(task.importance_level());
                record.extra.clear();
                stored.push(record);
            }
        }
        tx.commit()?;

        tracing::info!(count = stored.len(), "replaced stored task set");
        Ok(stored)
    }

    /// All stored tasks ordered by id.
    pub fn list_tasks(&self) -> Result<Vec<TaskRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, due_date, estimated_hours, importance, dependencies
             FROM tasks ORDER BY id",
        )?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Delete every stored task. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let deleted = self.conn.execute("DELETE FROM tasks", [])?;
        tracing::info!(deleted, "cleared stored task set");
        Ok(deleted)
    }
}
