//! Document collections with live snapshot subscriptions.
//!
//! A collection is a set of JSON field maps keyed by store-assigned ids.
//! Subscribers receive the whole collection, ordered by id, once on
//! subscribe and again after every write that changes it.
//!
//! Backends:
//! - [`MemoryStore`]: in-process, for tests and throwaway sessions.
//! - [`RedbDocumentStore`]: persisted in a single redb file.
//! - [`FaultyStore`]: wraps another store to inject failures and latency.

pub mod document;
pub mod error;
pub mod faulty;
pub mod hub;
pub mod memory;
pub mod redb;
pub mod traits;

pub use document::{new_id, Document, Fields, Snapshot};
pub use error::StoreError;
pub use faulty::{FaultyStore, Operation};
pub use hub::{SnapshotHub, Subscription};
pub use memory::MemoryStore;
pub use self::redb::RedbDocumentStore;
pub use traits::DocumentStore;
