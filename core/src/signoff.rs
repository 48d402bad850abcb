//! Monthly skill evaluation records.
//!
//! Signoffs are append-only: there is no update or delete surface, and
//! historical corrections are new records. The "current status" of a
//! skill is the newest record mentioning it, which is why every listing
//! comes back newest-first on the store-assigned `createdAt` stamp.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use probation_store::{Document, DocumentStore, Filter, OrderBy, server_timestamp};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::auth::Principal;
use crate::error::Result;
use crate::month::Month;
use crate::paths::MONTHLY_SIGNOFFS_COLLECTION;

/// Outcome of one evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignoffResult {
    Pass,
    Fail,
}

impl SignoffResult {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for SignoffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("expected \"pass\" or \"fail\", got {0:?}")]
pub struct ParseSignoffResultError(String);

impl FromStr for SignoffResult {
    type Err = ParseSignoffResultError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pass" => Ok(Self::Pass),
            "fail" => Ok(Self::Fail),
            other => Err(ParseSignoffResultError(other.to_string())),
        }
    }
}

/// One stored monthly evaluation record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySignoff {
    /// Store-assigned record id (not a stored field).
    #[serde(skip)]
    pub id: String,
    pub probationer_email: String,
    pub month: Month,
    pub skill_id: String,
    pub result: SignoffResult,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub evaluator_uid: String,
    #[serde(default)]
    pub evaluator_email: String,
    pub created_at: DateTime<Utc>,
}

/// Input for [`MonthlySignoffClient::record`].
#[derive(Clone, Debug)]
pub struct NewMonthlySignoff {
    pub probationer_email: String,
    pub month: Month,
    pub skill_id: String,
    pub result: SignoffResult,
    pub notes: String,
    pub evaluator: Option<Principal>,
}

/// Access layer for the monthly signoff collection.
pub struct MonthlySignoffClient {
    store: Arc<dyn DocumentStore>,
}

impl MonthlySignoffClient {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Append one immutable evaluation record and return its id.
    ///
    /// The probationer email is trimmed; notes and evaluator fields
    /// default to empty; `createdAt` is assigned by the store.
    pub async fn record(&self, new: NewMonthlySignoff) -> Result<String> {
        let evaluator = new.evaluator.unwrap_or_default();
        let mut fields = Document::new();
        fields.insert(
            "probationerEmail".to_string(),
            json!(new.probationer_email.trim()),
        );
        fields.insert("month".to_string(), json!(new.month.number()));
        fields.insert("skillId".to_string(), json!(new.skill_id));
        fields.insert("result".to_string(), json!(new.result));
        fields.insert("notes".to_string(), json!(new.notes));
        fields.insert("evaluatorUid".to_string(), json!(evaluator.uid));
        fields.insert("evaluatorEmail".to_string(), json!(evaluator.email));
        fields.insert("createdAt".to_string(), server_timestamp());
        let id = self
            .store
            .add_doc(MONTHLY_SIGNOFFS_COLLECTION, fields)
            .await?;
        debug!(skill = %new.skill_id, month = %new.month, result = %new.result, "recorded signoff");
        Ok(id)
    }

    /// All signoffs for a probationer, newest first, optionally
    /// narrowed to one month.
    pub async fn list(
        &self,
        probationer_email: &str,
        month: Option<Month>,
    ) -> Result<Vec<MonthlySignoff>> {
        let mut filters = vec![Filter::field_eq(
            "probationerEmail",
            probationer_email.trim(),
        )];
        if let Some(month) = month {
            filters.push(Filter::field_eq("month", month.number()));
        }
        let snapshots = self
            .store
            .query(
                MONTHLY_SIGNOFFS_COLLECTION,
                &filters,
                Some(&OrderBy::desc("createdAt")),
            )
            .await?;
        snapshots
            .into_iter()
            .map(|snap| {
                let mut record: MonthlySignoff = snap.deserialize()?;
                record.id = snap.id;
                Ok(record)
            })
            .collect()
    }
}

/// Current status of a skill: the first matching record in a
/// newest-first listing.
pub fn latest_result(records: &[MonthlySignoff], skill_id: &str) -> Option<SignoffResult> {
    records
        .iter()
        .find(|r| r.skill_id == skill_id)
        .map(|r| r.result)
}
