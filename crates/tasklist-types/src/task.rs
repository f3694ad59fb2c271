//! Task types

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub content: String,
    /// Creation time in RFC 3339 form. Empty for legacy records that never had one.
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<i64>,
}

impl Task {
    /// Create a new task with a fresh id, stamped with the current time
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            created_at: timestamp_now(),
            complete: None,
        }
    }

    pub fn with_complete(mut self, complete: i64) -> Self {
        self.complete = Some(complete);
        self
    }

    /// Record that replaces this task after an edit.
    ///
    /// Only `id` and `created_at` carry over; `complete` is not part of an
    /// edited record. A missing creation time is filled in with the current time.
    pub fn revised(&self, content: impl Into<String>) -> Self {
        let created_at = if self.created_at.is_empty() {
            timestamp_now()
        } else {
            self.created_at.clone()
        };

        Self {
            id: self.id.clone(),
            content: content.into(),
            created_at,
            complete: None,
        }
    }

    /// Ordering that puts the most recently created task first
    pub fn newest_first(a: &Task, b: &Task) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

/// Current UTC time, e.g. `2024-05-01T10:11:12.123456+00:00`
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}
