#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Department info reads against the in-memory store fake.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use probation_core::department::{DepartmentClient, DepartmentInfo};
use probation_store::{DocumentStore, MemoryStore};
use serde_json::json;

#[tokio::test]
async fn absent_document_loads_as_defaults() {
    let store = Arc::new(MemoryStore::new());
    let client = DepartmentClient::new(store.clone());
    assert_eq!(client.load().await.unwrap(), DepartmentInfo::default());
}

#[tokio::test]
async fn populated_document_decodes_with_partial_fields() {
    let store = Arc::new(MemoryStore::new());
    let fields: probation_store::Document = [
        ("mission".to_string(), json!("Protect life and property.")),
        (
            "phones".to_string(),
            json!([{"label": "Station 1", "number": "555-0100"}]),
        ),
        (
            "radioChannels".to_string(),
            json!([{"name": "Dispatch", "freq": "154.250"}]),
        ),
        ("stationDuties".to_string(), json!(["Rig check", "Hose tower"])),
    ]
    .into_iter()
    .collect();
    store
        .set_doc_merge("config", "department", fields)
        .await
        .unwrap();

    let client = DepartmentClient::new(store.clone());
    let info = client.load().await.unwrap();
    assert_eq!(info.mission, "Protect life and property.");
    assert_eq!(info.phones.len(), 1);
    assert_eq!(info.phones[0].number, "555-0100");
    assert_eq!(info.radio_channels[0].notes, "");
    assert_eq!(info.station_duties, vec!["Rig check", "Hose tower"]);
    assert_eq!(info.history, "");
    assert!(info.door_codes.is_empty());
}
