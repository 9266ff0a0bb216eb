use tracing::debug;

use crate::panel::{PanelRow, PanelState, render};
use crate::pathtree::PathTree;

/// Single owner of the panel's current tree root and view state.
///
/// Every mutation replaces the held root with the value returned by the
/// tree operation; earlier roots stay valid for anyone still holding one.
#[derive(Debug, Clone, Default)]
pub struct PanelController {
    root: PathTree<String>,
    state: PanelState,
}

impl PanelController {
    pub fn from_root(root: PathTree<String>) -> Self {
        Self {
            root,
            state: PanelState::new(),
        }
    }

    pub fn root(&self) -> &PathTree<String> {
        &self.root
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn set_state(&mut self, state: PanelState) {
        self.state = state;
    }

    pub fn push_item(&mut self, path: &str, value: impl Into<String>) {
        let value = value.into();
        debug!("Pushing '{}' at '{}'", value, path);
        self.root = self.root.push_item(path, value);
    }

    /// Pops the most recently added item at the directory `path`, if any.
    pub fn pop_item(&mut self, path: &str) -> Option<String> {
        let (root, popped) = self.root.pop_item(path);
        self.root = root;
        match &popped {
            Some(value) => debug!("Popped '{}' from '{}'", value, path),
            None => debug!("Nothing to pop at '{}'", path),
        }
        popped
    }

    /// Flips expansion for `path` when it names an existing directory,
    /// returning the new expansion state. Unknown paths are ignored.
    pub fn toggle_expanded(&mut self, path: &str) -> bool {
        if self.directory_at(path).is_none() {
            debug!("Ignoring toggle for unknown directory '{}'", path);
            return false;
        }
        self.state.toggle(path)
    }

    fn directory_at(&self, path: &str) -> Option<&PathTree<String>> {
        path.split('/')
            .try_fold(&self.root, |node, segment| node.child(segment))
    }

    pub fn rows(&self, flat: bool) -> Vec<PanelRow> {
        render(&self.root, &self.state, flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutations_replace_the_held_root() {
        let mut controller = PanelController::from_root(PathTree::new());
        controller.push_item("dir1", "Hello");
        controller.push_item("dir1", "World");

        assert_eq!(controller.root().child("dir1").unwrap().items(), [
            "Hello", "World",
        ]);

        assert_eq!(controller.pop_item("dir1"), Some("World".to_owned()));
        assert_eq!(controller.root().child("dir1").unwrap().items(), ["Hello"]);
    }

    #[test]
    fn earlier_roots_survive_later_mutations() {
        let mut controller = PanelController::from_root(PathTree::new());
        controller.push_item("dir1", "Hello");
        let earlier = controller.root().clone();

        controller.push_item("dir1", "World");
        controller.pop_item("dir1");
        controller.pop_item("dir1");

        assert_eq!(earlier.child("dir1").unwrap().items(), ["Hello"]);
        assert!(controller.root().is_empty());
    }

    #[test]
    fn pop_on_missing_path_reports_none() {
        let mut controller = PanelController::from_root(PathTree::new());
        controller.push_item("dir1", "Hello");

        assert_eq!(controller.pop_item("no/such/dir"), None);
        assert_eq!(controller.root().child("dir1").unwrap().items(), ["Hello"]);
    }

    #[test]
    fn toggle_expanded_drives_rendering() {
        let mut controller = PanelController::from_root(PathTree::new());
        controller.push_item("dir1/dir2", "nested");

        assert!(controller.toggle_expanded("dir1"));
        let rows = controller.rows(false);
        assert_eq!(rows.len(), 2);
        assert!(matches!(
            &rows[1],
            PanelRow::Directory { depth: 1, name, .. } if name == "dir2"
        ));
    }

    #[test]
    fn toggle_on_unknown_directory_is_ignored() {
        let mut controller = PanelController::from_root(PathTree::new());
        controller.push_item("dir1", "Hello");

        assert!(!controller.toggle_expanded("dir9"));
        assert!(!controller.state().is_expanded("dir9"));
    }
}
