//! Persistence Layer
//!
//! Charts are stored as versioned JSON snapshots behind a small key/value
//! seam:
//!
//! - `snapshot` - envelope encoding and tolerant decoding
//! - `snapshot_store` - the `SnapshotStore` trait with in-memory and
//!   file-backed implementations
//!
//! Persistence is best-effort. The in-memory tree is always authoritative and
//! a failed load or save never surfaces as a user-facing error.

mod error;
mod snapshot;
mod snapshot_store;

pub use error::SnapshotError;
pub use snapshot::{decode_envelope, decode_snapshot, encode_snapshot, SavedSnapshot, SNAPSHOT_VERSION};
pub use snapshot_store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
