//! `probation-core` — domain access layers for the probation tracker.
//!
//! Everything the tracker persists lives in a hosted document store;
//! this crate holds the typed access layers in front of it:
//!
//! - [`catalog`] — the months 1–6 skill catalog and its mutations
//! - [`roles`] — the owner allow-list membership check
//! - [`signoff`] — monthly skill evaluations (append-only)
//! - [`driver`] — driver task catalog and check-offs (append-only)
//! - [`roster`] — shift / active-flag roster lookup
//! - [`department`] — department reference information
//!
//! Every client takes an injected `Arc<dyn DocumentStore>`, so the whole
//! layer runs unchanged against the in-memory fake in tests.
//!
//! ## Semantics
//!
//! Absent documents are a valid empty state, never an error. Catalog
//! mutations are read-modify-write with last-writer-wins and no
//! optimistic locking; two concurrent writers can lose an update, a
//! known limitation of the single-admin usage pattern, not something
//! this layer papers over. Signoff records are immutable once
//! written — corrections are new records, and "current status" is the
//! newest record for a given skill or task.

pub mod auth;
pub mod catalog;
pub mod department;
pub mod driver;
pub mod error;
pub mod month;
pub mod paths;
pub mod roles;
pub mod roster;
pub mod signoff;

pub use auth::Principal;
pub use error::{AccessError, Result};
pub use month::Month;
