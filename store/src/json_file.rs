//! Single-file JSON store backing the CLI.
//!
//! The whole store lives in one versioned JSON file. Every write mutates
//! the in-memory state and then rewrites the file atomically via a
//! `.tmp` sibling, so a crash mid-write never leaves a torn file.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::DocumentStore;
use crate::document::{Document, DocumentSnapshot, ServerClock, resolve_server_timestamps};
use crate::error::StoreError;
use crate::query::{Filter, OrderBy, matches, sort_snapshots};

/// On-disk layout of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct FileState {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    collections: HashMap<String, BTreeMap<String, Document>>,
}

fn default_version() -> u32 {
    1
}

/// Document store persisted to a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<FileState>,
    clock: ServerClock,
}

impl JsonFileStore {
    /// Open (or create) the store file at `path`. A missing file is a
    /// valid empty store; parent directories are created as needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let state = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => FileState {
                version: default_version(),
                collections: HashMap::new(),
            },
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), "opened json store");
        Ok(Self {
            path,
            state: Mutex::new(state),
            clock: ServerClock::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the store file atomically via a `.tmp` sibling.
    fn persist(&self, state: &FileState) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn get_doc(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .collections
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
        let mut state = self.state.lock().await;
        let doc = state
            .collections
            .entry(collection.to_string())
            .or_default()
            .entry(id.to_string())
            .or_default();
        for (key, value) in fields {
            doc.insert(key, value);
        }
        self.persist(&state)
    }

    async fn add_doc(&self, collection: &str, mut fields: Document) -> Result<String, StoreError> {
        resolve_server_timestamps(&mut fields, self.clock.now());
        let id = Uuid::new_v4().to_string();
        let mut state = self.state.lock().await;
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        self.persist(&state)?;
        Ok(id)
    }

    async fn query(
        &self,
        collection: &str,
        filters: &[Filter],
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<DocumentSnapshot>, StoreError> {
        let state = self.state.lock().await;
        let mut snapshots: Vec<DocumentSnapshot> = state
            .collections
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
