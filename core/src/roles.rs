//! Owner allow-list membership.

use std::sync::Arc;

use probation_store::DocumentStore;
use serde_json::Value;

use crate::auth::Principal;
use crate::error::Result;
use crate::paths::{CONFIG_COLLECTION, ROLES_DOC};

/// Access layer for the `config/roles` owner allow-list.
pub struct RolesClient {
    store: Arc<dyn DocumentStore>,
}

impl RolesClient {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Whether `principal` is an owner: its uid or its email appears in
    /// the stored `owners` list. `None`, an absent roles document, and
    /// a malformed `owners` field all answer `false`.
    pub async fn is_owner(&self, principal: Option<&Principal>) -> Result<bool> {
        let Some(principal) = principal else {
            return Ok(false);
        };
        let Some(doc) = self.store.get_doc(CONFIG_COLLECTION, ROLES_DOC).await? else {
            return Ok(false);
        };
        let owners = doc.get("owners").and_then(Value::as_array);
        Ok(owners.is_some_and(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .any(|owner| owner == principal.uid || owner == principal.email)
        }))
    }
}
