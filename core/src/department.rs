//! Department reference information.
//!
//! One singleton document (`config/department`) with every field
//! optional. An absent document is simply an all-empty record.

use std::sync::Arc;

use probation_store::DocumentStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::paths::{CONFIG_COLLECTION, DEPARTMENT_DOC};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneEntry {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub number: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorCode {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioChannel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub freq: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainOfCommandEntry {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
}

/// Everything the department info document may carry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInfo {
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub phones: Vec<PhoneEntry>,
    #[serde(default)]
    pub door_codes: Vec<DoorCode>,
    #[serde(default)]
    pub radio_channels: Vec<RadioChannel>,
    #[serde(default)]
    pub chain_of_command: Vec<ChainOfCommandEntry>,
    #[serde(default)]
    pub history: String,
    #[serde(default)]
    pub station_duties: Vec<String>,
    #[serde(default)]
    pub typical_day: String,
}

/// Read-only access to the department info document.
pub struct DepartmentClient {
    store: Arc<dyn DocumentStore>,
}

impl DepartmentClient {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Result<DepartmentInfo> {
        let Some(doc) = self
            .store
            .get_doc(CONFIG_COLLECTION, DEPARTMENT_DOC)
            .await?
        else {
            return Ok(DepartmentInfo::default());
        };
        Ok(serde_json::from_value(Value::Object(doc))?)
    }
}
