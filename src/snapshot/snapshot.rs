use std::hash::Hasher;
use std::path::{Path, PathBuf};

use bincode::{Decode, Encode};
use compio::fs;
use metrohash::MetroHash64;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::ext::PathDisplayExt;
use crate::panel::{PanelController, PanelState};
use crate::pathtree::PathTree;

const SNAPSHOT_FILE_PATH: &str = ".arbor/panel.snapshot";

/// Bytes of checksum prefixed to the compressed payload.
const CHECKSUM_LEN: usize = size_of::<u64>();

fn get_snapshot_file_path(root: &Path) -> PathBuf {
    root.join(SNAPSHOT_FILE_PATH)
}

/// Flat serializable form of the panel: `(path, item)` pairs in display
/// order plus the expanded directory paths.
///
/// Replaying the pairs through `push_item` reproduces the tree exactly,
/// including item order per level and directory creation order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Encode, Decode)]
pub struct PanelSnapshot {
    entries: Vec<(String, String)>,
    expanded: Vec<String>,
}

impl PanelSnapshot {
    pub fn capture(controller: &PanelController) -> Self {
        let mut entries = Vec::new();
        flatten(controller.root(), "", &mut entries);
        let expanded = controller
            .state()
            .expanded_paths()
            .map(str::to_owned)
            .collect();
        Self { entries, expanded }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.expanded.is_empty()
    }

    pub fn restore(&self) -> (PathTree<String>, PanelState) {
        let mut tree = PathTree::new();
        for (path, value) in &self.entries {
            tree = tree.push_item(path, value.clone());
        }
        let state = self.expanded.iter().cloned().collect();
        (tree, state)
    }

    /// Reads the snapshot for `root`, falling back to an empty one when
    /// the file is missing, truncated, corrupted, or from an incompatible
    /// version. Stale panel state is never worth failing a run over.
    pub async fn read(root: &Path) -> Self {
        let path = get_snapshot_file_path(root);
        debug!("Reading panel snapshot from {}", path.friendly_display());
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(_) => {
                info!("No existing panel snapshot found, starting fresh");
                return Self::default();
            }
        };
        match Self::decode_file(&bytes) {
            Some(snapshot) => {
                debug!(
                    "Successfully read panel snapshot: {} entries, {} expanded",
                    snapshot.entries.len(),
                    snapshot.expanded.len(),
                );
                snapshot
            }
            None => {
                warn!(
                    "Discarding unreadable panel snapshot: {}",
                    path.friendly_display()
                );
                Self::default()
            }
        }
    }

    pub async fn write(&self, root: &Path) -> Result<(), SnapshotPersistError> {
        let path = get_snapshot_file_path(root);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.context(CreateDirSnafu {
                file_path: path.friendly_display(),
            })?;
        }

        let bytes = self.encode_file()?;
        fs::write(&path, bytes).await.0.context(WriteSnafu {
            file_path: path.friendly_display(),
        })?;
        debug!("Wrote panel snapshot to {}", path.friendly_display());
        Ok(())
    }

    fn encode_file(&self) -> Result<Vec<u8>, SnapshotPersistError> {
        let payload = bincode::encode_to_vec(self, bincode::config::standard())
            .context(EncodeSnafu)?;
        let compressed =
            zstd::encode_all(payload.as_slice(), zstd::DEFAULT_COMPRESSION_LEVEL)
                .context(CompressSnafu)?;

        let mut bytes = checksum(&compressed).to_le_bytes().to_vec();
        bytes.extend_from_slice(&compressed);
        Ok(bytes)
    }

    fn decode_file(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < CHECKSUM_LEN {
            return None;
        }
        let (header, compressed) = bytes.split_at(CHECKSUM_LEN);
        let stored = u64::from_le_bytes(header.try_into().ok()?);
        if stored != checksum(compressed) {
            return None;
        }

        let payload = zstd::decode_all(compressed).ok()?;
        let (snapshot, _) =
            bincode::decode_from_slice(&payload, bincode::config::standard()).ok()?;
        Some(snapshot)
    }
}

fn flatten(node: &PathTree<String>, prefix: &str, entries: &mut Vec<(String, String)>) {
    for (name, child) in node.children() {
        let full_path = if prefix.is_empty() {
            name.to_owned()
        } else {
            format!("{prefix}/{name}")
        };
        flatten(child, &full_path, entries);
    }
    for value in node.items() {
        entries.push((prefix.to_owned(), value.clone()));
    }
}

fn checksum(bytes: &[u8]) -> u64 {
    let mut hasher = MetroHash64::default();
    hasher.write(bytes);
    hasher.finish()
}

#[derive(Debug, Snafu)]
pub enum SnapshotPersistError {
    #[snafu(display("Failed to serialize the panel snapshot"))]
    EncodeError { source: bincode::error::EncodeError },
    #[snafu(display("Failed to compress the panel snapshot"))]
    CompressError { source: std::io::Error },
    #[snafu(display("Failed to create the snapshot directory for {}", file_path))]
    CreateDirError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write the panel snapshot: {}", file_path))]
    WriteError {
        file_path: String,
        source: std::io::Error,
    },
}
