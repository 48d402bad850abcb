//! Roster lookup.
//!
//! The roster is owned elsewhere; this layer only reads it. The lookup
//! is dual-mode: given a non-empty shift it filters by exact shift
//! match, otherwise it falls back to active members only. The criterion
//! swap is intentional — callers rely on the active-only fallback, not
//! a combined filter.

use std::sync::Arc;

use probation_store::{DocumentStore, Filter};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::paths::ROSTER_COLLECTION;

/// One roster member.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    /// Store-assigned record id (not a stored field).
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Read-only access to the roster collection.
pub struct RosterClient {
    store: Arc<dyn DocumentStore>,
}

impl RosterClient {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Non-empty `shift` ⇒ exact shift equality; `None` or empty ⇒
    /// `isActive == true` regardless of shift.
    pub async fn search_by_shift(&self, shift: Option<&str>) -> Result<Vec<RosterEntry>> {
        let filter = match shift {
            Some(shift) if !shift.is_empty() => Filter::field_eq("shift", shift),
            _ => Filter::field_eq("isActive", true),
        };
        let snapshots = self
            .store
            .query(ROSTER_COLLECTION, &[filter], None)
            .await?;
        snapshots
            .into_iter()
            .map(|snap| {
                let mut entry: RosterEntry = snap.deserialize()?;
                entry.id = snap.id;
                Ok(entry)
            })
            .collect()
    }
}
