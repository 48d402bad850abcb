//! Driver task catalog and check-off records.
//!
//! The task catalog is a singleton document (`config/driver_tasks`,
//! field `items`); check-offs are append-only records keyed by roster
//! id rather than email, and they carry a single evaluator id instead
//! of the uid/email pair the monthly records use.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use probation_store::{Document, DocumentStore, Filter, OrderBy, server_timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::error::Result;
use crate::paths::{CONFIG_COLLECTION, DRIVER_SIGNOFFS_COLLECTION, DRIVER_TASKS_DOC};
use crate::signoff::SignoffResult;

/// One entry in the driver task catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverTask {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub category: String,
}

/// One stored driver check-off record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSignoff {
    /// Store-assigned record id (not a stored field).
    #[serde(skip)]
    pub id: String,
    pub user_id: String,
    pub task_id: String,
    pub result: SignoffResult,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub evaluator_id: String,
    pub created_at: DateTime<Utc>,
}

/// Input for [`DriverClient::record`].
#[derive(Clone, Debug)]
pub struct NewDriverSignoff {
    pub user_id: String,
    pub task_id: String,
    pub result: SignoffResult,
    pub notes: String,
    pub evaluator_id: String,
}

/// Access layer for driver tasks and check-offs.
pub struct DriverClient {
    store: Arc<dyn DocumentStore>,
}

impl DriverClient {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Load the driver task catalog. Absent document or missing
    /// `items` field is an empty catalog; non-object entries are
    /// skipped.
    pub async fn tasks(&self) -> Result<Vec<DriverTask>> {
        let doc = self
            .store
            .get_doc(CONFIG_COLLECTION, DRIVER_TASKS_DOC)
            .await?;
        let Some(Value::Array(items)) = doc.as_ref().and_then(|d| d.get("items")) else {
            return Ok(Vec::new());
        };
        Ok(items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect())
    }

    /// Append one immutable check-off record and return its id.
    pub async fn record(&self, new: NewDriverSignoff) -> Result<String> {
        let mut fields = Document::new();
        fields.insert("userId".to_string(), json!(new.user_id));
        fields.insert("taskId".to_string(), json!(new.task_id));
        fields.insert("result".to_string(), json!(new.result));
        fields.insert("notes".to_string(), json!(new.notes));
        fields.insert("evaluatorId".to_string(), json!(new.evaluator_id));
        fields.insert("createdAt".to_string(), server_timestamp());
        let id = self
            .store
            .add_doc(DRIVER_SIGNOFFS_COLLECTION, fields)
            .await?;
        debug!(task = %new.task_id, result = %new.result, "recorded check-off");
        Ok(id)
    }

    /// All check-offs for a roster member, newest first.
    pub async fn list_signoffs(&self, user_id: &str) -> Result<Vec<DriverSignoff>> {
        let snapshots = self
            .store
            .query(
                DRIVER_SIGNOFFS_COLLECTION,
                &[Filter::field_eq("userId", user_id)],
                Some(&OrderBy::desc("createdAt")),
            )
            .await?;
        snapshots
            .into_iter()
            .map(|snap| {
                let mut record: DriverSignoff = snap.deserialize()?;
                record.id = snap.id;
                Ok(record)
            })
            .collect()
    }
}

/// Case-insensitive substring filter over task id + title. An empty or
/// whitespace needle keeps everything.
pub fn filter_tasks<'a>(tasks: &'a [DriverTask], needle: &str) -> Vec<&'a DriverTask> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return tasks.iter().collect();
    }
    tasks
        .iter()
        .filter(|t| format!("{}{}", t.id, t.title).to_lowercase().contains(&needle))
        .collect()
}

/// Current status of a task: the first matching record in a
/// newest-first listing.
pub fn latest_result(signoffs: &[DriverSignoff], task_id: &str) -> Option<SignoffResult> {
    signoffs
        .iter()
        .find(|s| s.task_id == task_id)
        .map(|s| s.result)
}
