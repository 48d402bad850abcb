//! `probation-store` — document store abstraction for the probation tracker.
//!
//! Models the subset of a hosted document database the tracker actually
//! uses: named collections of JSON documents keyed by explicit or
//! generated ids, merge writes, equality filters, and a single-field
//! sort. The hosted service is an opaque external collaborator; the
//! access layers in `probation-core` program against the
//! [`DocumentStore`] trait so they can run against any backend,
//! including the in-memory fake used throughout the test suites.
//!
//! ## Backends
//!
//! - [`MemoryStore`] — `HashMap`-backed, for tests.
//! - [`JsonFileStore`] — one versioned JSON file on disk, for the CLI.
//!
//! ## Server timestamps
//!
//! Callers never stamp `createdAt` themselves. They write the
//! [`server_timestamp`] sentinel and the backend resolves it at write
//! time with a strictly monotonic UTC clock, so ordering by `createdAt`
//! is total even for writes landing in the same microsecond.

pub mod document;
pub mod error;
pub mod json_file;
pub mod memory;
pub mod query;

pub use document::{Document, DocumentSnapshot, server_timestamp};
pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use query::{Direction, Filter, OrderBy};

use async_trait::async_trait;

/// Handle to a document database: named collections of loosely-typed
/// JSON documents.
///
/// All writes are last-writer-wins. There are no transactions, no
/// optimistic locking, and no delete operation — nothing in the tracker
/// ever hard-deletes a document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a single document by id. `Ok(None)` when the document (or
    /// the whole collection) does not exist.
    async fn get_doc(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Merge-write a document: each named top-level field is replaced
    /// wholesale, fields not named are preserved. Creates the document
    /// if it does not exist.
    async fn set_doc_merge(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> Result<(), StoreError>;

    /// Append a document under a generated id and return that id.
    /// Server-timestamp sentinels in `fields` are resolved before the
    /// document is persisted.
    async fn add_doc(&self, collection: &str, fields: Document) -> Result<String, StoreError>;

    /// Return every document matching the conjunction of `filters`,
    /// optionally sorted on a single field. A missing collection yields
    /// an empty result, not an error.
    async fn query(
        &self,
        collection: &str,
        filters: &[Filter],
        order_by: Option<&OrderBy>,
    ) -> Result<Vec<DocumentSnapshot>, StoreError>;
}
