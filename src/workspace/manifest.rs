use std::borrow::Cow;
use std::path::{Path, PathBuf};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::ext::{AsyncTryFrom, AsyncTryInto, PathDisplayExt};
use crate::pathtree::PathTree;

const PANEL_FILE_NAME: &str = "panel.yaml";

fn get_panel_file_path(root: &Path) -> PathBuf {
    root.join(PANEL_FILE_NAME)
}

/// Parsed `panel.yaml`: an ordered list of path entries, each carrying the
/// items to push at that path.
///
/// File order is preserved all the way into the tree, so the panel shows
/// directories in the order the manifest declares them.
#[derive(Debug, Clone)]
pub struct PanelManifest {
    entries: Vec<(String, Vec<String>)>,
}

impl PanelManifest {
    pub async fn read(root: &Path) -> Result<Self, ManifestError> {
        get_panel_file_path(root).async_try_into().await
    }

    /// Replays the manifest entries into a fresh tree.
    pub fn build_tree(&self) -> PathTree<String> {
        let mut tree = PathTree::new();
        for (path, values) in &self.entries {
            for value in values {
                tree = tree.push_item(path, value.clone());
            }
        }
        tree
    }

    fn parse_entries_from_yaml(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Vec<(String, Vec<String>)>, ManifestError> {
        let entries = top_level
            .get(&Yaml::Value(Scalar::String(Cow::Borrowed("entries"))))
            .unwrap_or(&Yaml::Mapping(LinkedHashMap::new()))
            .as_mapping()
            .ok_or(ManifestError::EntriesNotMap)?
            .iter()
            .filter_map(|(key, value)| {
                if let Yaml::Value(Scalar::String(path)) = key {
                    if let Some(sequence) = value.as_sequence() {
                        return Some((path.to_string(), sequence));
                    }
                }
                debug!("Skipping invalid panel entry: {:?}", key);
                None
            })
            .map(|(path, sequence)| {
                let values = sequence
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_owned))
                    .collect();
                (path, values)
            })
            .collect();

        Ok(entries)
    }
}

impl AsyncTryFrom<PathBuf> for PanelManifest {
    type Error = ManifestError;

    async fn async_try_from(path: PathBuf) -> Result<Self, Self::Error> {
        debug!("Reading panel manifest: {}", path.friendly_display());
        let bytes = fs::read(&path).await.context(ReadSnafu {
            file_path: path.friendly_display(),
        })?;
        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.friendly_display(),
        })?;
        contents.as_str().try_into()
    }
}

impl TryFrom<&str> for PanelManifest {
    type Error = ManifestError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents)
            .map_err(|e| ManifestError::ParseError { source: e })?;
        let document = documents.get(0).ok_or(ManifestError::MalformedManifest)?;

        let top_level = document
            .as_mapping()
            .ok_or(ManifestError::TopLevelNotMap)?;

        let entries = Self::parse_entries_from_yaml(top_level)?;
        Ok(PanelManifest { entries })
    }
}

#[derive(Debug, Snafu)]
pub enum ManifestError {
    #[snafu(display("Failed to read the panel manifest: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Panel manifest is not valid UTF-8: {}", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the panel manifest"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted panel manifest"))]
    MalformedManifest,
    #[snafu(display("Top level of the panel manifest should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Entries section should be a map"))]
    EntriesNotMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[compio::test]
    async fn manifest_returns_error_on_nonexistent_file() {
        let result = PanelManifest::read(Path::new("/no/such/root")).await;
        assert!(matches!(result, Err(ManifestError::ReadError { .. })));
    }

    #[test]
    fn manifest_returns_error_on_invalid_yaml() {
        let invalid_yaml = "entries: [unclosed";
        let result: Result<PanelManifest, _> = invalid_yaml.try_into();
        assert!(matches!(result, Err(ManifestError::ParseError { .. })));
    }

    #[test]
    fn manifest_returns_error_on_empty_file() {
        let result: Result<PanelManifest, _> = "".try_into();
        assert!(matches!(result, Err(ManifestError::MalformedManifest)));
    }

    #[test]
    fn manifest_returns_error_when_top_level_is_not_map() {
        let result: Result<PanelManifest, _> = "- item1\n- item2".try_into();
        assert!(matches!(result, Err(ManifestError::TopLevelNotMap)));
    }

    #[test]
    fn manifest_returns_error_when_entries_is_not_map() {
        let result: Result<PanelManifest, _> = "entries:\n  - not_a_map".try_into();
        assert!(matches!(result, Err(ManifestError::EntriesNotMap)));
    }

    #[test]
    fn manifest_handles_empty_entries_section() {
        let manifest: PanelManifest = "entries: {}".try_into().unwrap();
        assert!(manifest.entries.is_empty());
        assert!(manifest.build_tree().is_empty());
    }

    #[test]
    fn manifest_handles_missing_entries_section() {
        let manifest: PanelManifest = "other_config: value".try_into().unwrap();
        assert!(manifest.entries.is_empty());
    }

    #[test]
    fn manifest_skips_invalid_entries() {
        let contents = r#"
entries:
  123:
    - numeric key
  dir1:
    - Hello
  dir2: just a string
"#;
        let manifest: PanelManifest = contents.try_into().unwrap();
        assert_eq!(manifest.entries, vec![(
            "dir1".to_owned(),
            vec!["Hello".to_owned()],
        )]);
    }

    #[test]
    fn manifest_preserves_file_order() {
        let contents = r#"
entries:
  zeta:
    - z
  alpha:
    - a
"#;
        let manifest: PanelManifest = contents.try_into().unwrap();
        let tree = manifest.build_tree();
        let names: Vec<&str> = tree.children().map(|(name, _)| name).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn manifest_builds_nested_paths() {
        let contents = r#"
entries:
  dir1:
    - Hello
    - World
  dir1/dir2:
    - Nested File 1
"#;
        let manifest: PanelManifest = contents.try_into().unwrap();
        let tree = manifest.build_tree();

        let dir1 = tree.child("dir1").unwrap();
        assert_eq!(dir1.items(), ["Hello", "World"]);
        assert_eq!(dir1.child("dir2").unwrap().items(), ["Nested File 1"]);
    }

    #[test]
    fn manifest_handles_unicode_values() {
        let contents = "entries:\n  \"тест\":\n    - \"🚀rocket\"";
        let manifest: PanelManifest = contents.try_into().unwrap();
        let tree = manifest.build_tree();
        assert_eq!(tree.child("тест").unwrap().items(), ["🚀rocket"]);
    }
}
