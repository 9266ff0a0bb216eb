use tracing::info;

use crate::editor::{EditorBuffer, Key};
use crate::panel::PanelController;
use crate::pathtree::PathTree;

/// Builds the starter content shown when no manifest exists.
pub fn seed_tree() -> PathTree<String> {
    PathTree::new()
        .push_item("dir1", "Hello".to_owned())
        .push_item("dir1", "World".to_owned())
        .push_item("dir1/dir2", "Nested File 1".to_owned())
        .push_item("dir1/dir2", "Nested File 2".to_owned())
        .push_item("dir3", "Another File".to_owned())
}

/// Applies a scripted round of panel edits: a couple of additions, one
/// removal, and expansion of the touched directories.
pub fn demo_mutations(controller: &mut PanelController) {
    controller.push_item("dir3/dir4", "Deeply Nested File");
    controller.push_item("dir3", "Test File in Dir3");

    if let Some(popped) = controller.pop_item("dir1/dir2") {
        info!("Removed '{}' from dir1/dir2", popped);
    }

    for path in ["dir1", "dir1/dir2", "dir3"] {
        if !controller.state().is_expanded(path) {
            controller.toggle_expanded(path);
        }
    }
}

/// Runs a scripted editing pass demonstrating the indent-aware keys:
/// Tab inside leading whitespace, Enter keeping indentation, and
/// Backspace stepping back a tab stop.
pub fn demo_edit_session() -> EditorBuffer {
    let mut buffer = EditorBuffer::from_text("fn main() {\nprintln!(\"hi\");\n}");

    let body_start = "fn main() {\n".len();
    buffer.set_selection(body_start, body_start);
    buffer.apply_key(Key::Tab);

    let body_end = body_start + 4 + "println!(\"hi\");".len();
    buffer.set_selection(body_end, body_end);
    buffer.apply_key(Key::Enter);
    buffer.apply_key(Key::Backspace);

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_tree_matches_the_starter_layout() {
        let tree = seed_tree();

        let dir1 = tree.child("dir1").unwrap();
        assert_eq!(dir1.items(), ["Hello", "World"]);
        assert_eq!(dir1.child("dir2").unwrap().items(), [
            "Nested File 1",
            "Nested File 2",
        ]);
        assert_eq!(tree.child("dir3").unwrap().items(), ["Another File"]);
    }

    #[test]
    fn demo_mutations_add_remove_and_expand() {
        let mut controller = PanelController::from_root(seed_tree());
        demo_mutations(&mut controller);

        let root = controller.root();
        assert_eq!(
            root.child("dir3").unwrap().child("dir4").unwrap().items(),
            ["Deeply Nested File"],
        );
        assert_eq!(root.child("dir3").unwrap().items(), [
            "Another File",
            "Test File in Dir3",
        ]);
        // The most recent addition to dir1/dir2 is gone, the first stays.
        assert_eq!(
            root.child("dir1").unwrap().child("dir2").unwrap().items(),
            ["Nested File 1"],
        );
        assert!(controller.state().is_expanded("dir1"));
        assert!(controller.state().is_expanded("dir3"));
    }

    #[test]
    fn demo_edit_session_shows_indent_behavior() {
        let buffer = demo_edit_session();
        assert_eq!(buffer.text(), "fn main() {\n    println!(\"hi\");\n\n}");
    }
}
