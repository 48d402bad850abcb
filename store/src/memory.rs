//! In-memory document store, the test fake for the access layers.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::DocumentStore;
use crate::document::{Document, DocumentSnapshot, ServerClock, resolve_server_timestamps};
use crate::error::StoreError;
use crate::query::{Filter, OrderBy, matches, sort_snapshots};

type Collections = HashMap<String, BTreeMap<String, Document>>;

/// `HashMap`-backed store with the same write semantics as the hosted
/// backend: merge writes, generated ids, server-resolved timestamps,
/// last-writer-wins.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
    clock: ServerClock,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            clock: ServerClock::new(),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_doc(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.lock().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn set_doc_merge(
        &self,
        collection: &str,
        id: &str,
        mut fields: Document,
    ) -> Result<(), StoreError> {
        resolve_server_timestamps(&mut fields, self.clock.now());
        let mut collections = self.collections.lock().await;
        let doc = collections
            .entry(collection.to_string())
            .or_default()
            .entry(id.to_string())
            .or_default();
        for (key, value) in fields {
            doc.insert(key, value);
        }
        Ok(())
    }

    async fn add_doc(&self, collection: &str, mut fields: Document) -> Result<String, StoreError> {
        resolve_server_timestamps(&mut fields, self.clock.now());
        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        Ok(id)
    }

    async fn query(
        &self,
        collection: &str,
        filters: &[Filter],
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<DocumentSnapshot>, StoreError> {
        let collections = self.collections.lock().await;
        let mut snapshots: Vec<DocumentSnapshot> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, fields)| matches(fields, filters))
                    .map(|(id, fields)| DocumentSnapshot {
                        id: id.clone(),
                        fields: fields.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        if let Some(order) = order_by {
            sort_snapshots(&mut snapshots, order);
        }
        Ok(snapshots)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::document::server_timestamp;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn doc(pairs: &[(&str, Value)]) -> Document {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn get_missing_doc_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get_doc("config", "nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn merge_write_preserves_unnamed_fields() {
        let store = MemoryStore::new();
        store
            .set_doc_merge("config", "department", doc(&[("mission", json!("serve"))]))
            .await
            .unwrap();
        store
            .set_doc_merge("config", "department", doc(&[("history", json!("1901"))]))
            .await
            .unwrap();
        let loaded = store.get_doc("config", "department").await.unwrap().unwrap();
        assert_eq!(loaded.get("mission"), Some(&json!("serve")));
        assert_eq!(loaded.get("history"), Some(&json!("1901")));
    }

    #[tokio::test]
    async fn merge_write_replaces_named_fields_wholesale() {
        let store = MemoryStore::new();
        store
            .set_doc_merge(
                "config",
                "monthly_skills",
                doc(&[("months", json!({"1": [{"id": "a"}], "2": [{"id": "b"}]}))]),
            )
            .await
            .unwrap();
        store
            .set_doc_merge(
                "config",
                "monthly_skills",
                doc(&[("months", json!({"1": []}))]),
            )
            .await
            .unwrap();
        let loaded = store
            .get_doc("config", "monthly_skills")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.get("months"), Some(&json!({"1": []})));
    }

    #[tokio::test]
    async fn add_doc_assigns_distinct_ids_and_stamps() {
        let store = MemoryStore::new();
        let id1 = store
            .add_doc("signoffs", doc(&[("createdAt", server_timestamp())]))
            .await
            .unwrap();
        let id2 = store
            .add_doc("signoffs", doc(&[("createdAt", server_timestamp())]))
            .await
            .unwrap();
        assert_ne!(id1, id2);

        let d1 = store.get_doc("signoffs", &id1).await.unwrap().unwrap();
        let d2 = store.get_doc("signoffs", &id2).await.unwrap().unwrap();
        let t1 = d1.get("createdAt").unwrap().as_str().unwrap();
        let t2 = d2.get("createdAt").unwrap().as_str().unwrap();
        assert!(t2 > t1, "second write must stamp strictly later: {t1} {t2}");
    }

    #[tokio::test]
    async fn query_filters_and_orders() {
        let store = MemoryStore::new();
        for (user, result) in [("u1", "pass"), ("u2", "fail"), ("u1", "fail")] {
            store
                .add_doc(
                    "signoffs",
                    doc(&[
                        ("userId", json!(user)),
                        ("result", json!(result)),
                        ("createdAt", server_timestamp()),
                    ]),
                )
                .await
                .unwrap();
        }
        let snaps = store
            .query(
                "signoffs",
                &[Filter::field_eq("userId", "u1")],
                Some(&OrderBy::desc("createdAt")),
            )
            .await
            .unwrap();
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[0].fields.get("result"), Some(&json!("fail")));
        assert_eq!(snaps[1].fields.get("result"), Some(&json!("pass")));
    }

    #[tokio::test]
    async fn query_missing_collection_is_empty() {
        let store = MemoryStore::new();
        let snaps = store.query("nothing", &[], None).await.unwrap();
        assert!(snaps.is_empty());
    }
}
