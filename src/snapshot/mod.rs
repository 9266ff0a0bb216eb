//! Panel state persistence.
//!
//! The tree and expansion state flatten into a list of `(path, item)`
//! pairs plus expanded paths, serialized between runs under the
//! workspace's `.arbor` directory.

mod snapshot;

pub use snapshot::{PanelSnapshot, SnapshotPersistError};
