use std::sync::Arc;

use hashlink::LinkedHashMap;

/// One level of a persistent directory tree.
///
/// Values live in `items` in insertion order (duplicates allowed), child
/// levels in `children` keyed by a single path segment. The map keeps key
/// creation order, which is also the display order for consumers.
///
/// Both operations are total: there is no error case, only the explicit
/// "nothing popped" outcome of [`PathTree::pop_item`]. Neither operation
/// mutates the node it is called on; callers replace their held root with
/// the returned value. Subtrees off the edited path are shared by
/// reference between the old and new root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTree<T> {
    items: Vec<T>,
    children: LinkedHashMap<String, Arc<PathTree<T>>>,
}

impl<T> Default for PathTree<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            children: LinkedHashMap::new(),
        }
    }
}

impl<T> PathTree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Values stored directly at this level, oldest first.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Child levels in key creation order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &PathTree<T>)> {
        self.children
            .iter()
            .map(|(name, child)| (name.as_str(), child.as_ref()))
    }

    /// Looks up a direct child by segment name.
    pub fn child(&self, name: &str) -> Option<&PathTree<T>> {
        self.children.get(name).map(Arc::as_ref)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// True when the level holds no items and no children. Empty nodes are
    /// never reachable as children; only the root itself may be empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.children.is_empty()
    }
}

impl<T: Clone> PathTree<T> {
    /// Returns a new tree with `value` appended at the level named by
    /// `path`. An empty path means this level. Missing intermediate levels
    /// are created on the way down.
    ///
    /// A path like `"a//b"` descends into a child literally keyed by the
    /// empty string; segments are never skipped.
    pub fn push_item(&self, path: &str, value: T) -> Self {
        if path.is_empty() {
            let mut items = self.items.clone();
            items.push(value);
            return Self {
                items,
                children: self.children.clone(),
            };
        }

        let (first, rest) = split_first_segment(path);
        let updated = match self.children.get(first) {
            Some(child) => child.push_item(rest, value),
            None => PathTree::new().push_item(rest, value),
        };

        let mut children = self.children.clone();
        // replace, not insert: insert moves an existing key to the back
        children.replace(first.to_owned(), Arc::new(updated));
        Self {
            items: self.items.clone(),
            children,
        }
    }

    /// Removes and returns the most recently added item at the level named
    /// by `path`, together with the new root.
    ///
    /// Popping from a level with no items, or descending through a segment
    /// that names no child, is a no-op that returns `None`; absence is a
    /// normal outcome, not an error. A child left with no items and no
    /// children is pruned from its parent, and the pruning cascades upward.
    pub fn pop_item(&self, path: &str) -> (Self, Option<T>) {
        if path.is_empty() {
            if self.items.is_empty() {
                return (self.clone(), None);
            }
            let mut items = self.items.clone();
            let popped = items.pop();
            return (
                Self {
                    items,
                    children: self.children.clone(),
                },
                popped,
            );
        }

        let (first, rest) = split_first_segment(path);
        let Some(child) = self.children.get(first) else {
            return (self.clone(), None);
        };

        let (new_child, popped) = child.pop_item(rest);
        let mut children = self.children.clone();
        if new_child.is_empty() {
            children.remove(first);
        } else {
            children.replace(first.to_owned(), Arc::new(new_child));
        }
        (
            Self {
                items: self.items.clone(),
                children,
            },
            popped,
        )
    }
}

/// Splits a path at the first separator: `"a/b/c"` becomes `("a", "b/c")`,
/// `"a"` becomes `("a", "")`.
fn split_first_segment(path: &str) -> (&str, &str) {
    match path.split_once('/') {
        Some((first, rest)) => (first, rest),
        None => (path, ""),
    }
}
