//! Task records as submitted for ranking.
//!
//! A record is read-only to the scoring engine. Every field except `title`
//! is optional on the wire and degrades to a documented default, so any
//! well-formed JSON object decodes into a scorable record.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a task within a batch.
///
/// Ids are compared by equality only, so integer and string ids are both
/// accepted. `1` and `"1"` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Int(i64),
    Text(String),
}

impl TaskId {
    /// The integer value, if this is an integer id.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TaskId::Int(n) => Some(*n),
            TaskId::Text(_) => None,
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Int(n) => write!(f, "{n}"),
            TaskId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        TaskId::Int(n)
    }
}

impl From<i32> for TaskId {
    fn from(n: i32) -> Self {
        TaskId::Int(n.into())
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId::Text(s.to_owned())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId::Text(s)
    }
}

/// Importance used when a record omits it.
pub const DEFAULT_IMPORTANCE: i64 = 5;

/// Effort estimate (hours) used when a record omits it.
pub const DEFAULT_ESTIMATED_HOURS: i64 = 1;

/// Maximum title length accepted by the task store.
pub const MAX_TITLE_LEN: usize = 200;

/// A single task record.
///
/// Unknown fields are preserved in `extra` so an analyzed batch echoes back
/// exactly what was submitted, plus the score annotations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    #[serde(default)]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "deserialize_due_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_dependencies")]
    pub dependencies: Vec<TaskId>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TaskRecord {
    /// Create a record with only a title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_estimated_hours(mut self, hours: i64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = Some(importance);
        self
    }

    pub fn with_dependencies<I>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TaskId>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Importance with the default applied. Not clamped.
    pub fn importance_level(&self) -> i64 {
        self.importance.unwrap_or(DEFAULT_IMPORTANCE)
    }

    /// Estimated hours with the default applied.
    pub fn effort_hours(&self) -> i64 {
        self.estimated_hours.unwrap_or(DEFAULT_ESTIMATED_HOURS)
    }

    /// Check the constraints enforced on persisted records.
    ///
    /// Scoring accepts any record; only the task store calls this.
    pub fn validate(&self) -> Result<(), crate::error::ValidationError> {
        use crate::error::ValidationError;

        let title_len = self.title.chars().count();
        if title_len == 0 {
            return Err(ValidationError::InvalidValue {
                field: "title".into(),
                message: "must not be empty".into(),
            });
        }
        if title_len > MAX_TITLE_LEN {
            return Err(ValidationError::InvalidValue {
                field: "title".into(),
                message: format!("must be at most {MAX_TITLE_LEN} characters, got {title_len}"),
            });
        }

        let importance = self.importance_level();
        if !(1..=10).contains(&importance) {
            return Err(ValidationError::InvalidValue {
                field: "importance".into(),
                message: format!("must be between 1 and 10, got {importance}"),
            });
        }

        Ok(())
    }
}

/// Accepts an ISO 8601 date, `null`, or an empty string (treated as no date).
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid due_date '{s}': {e}"))),
    }
}

/// A `null` dependency list is the same as an empty one.
fn deserialize_dependencies<'de, D>(deserializer: D) -> Result<Vec<TaskId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TaskId>>::deserialize(deserializer)?.unwrap_or_default())
}
