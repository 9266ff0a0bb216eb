//! Persistent path-indexed tree.
//!
//! This module provides an immutable tree mapping slash-delimited paths
//! to ordered collections of values. Edits return a new root and share
//! every untouched subtree with the previous version.

mod tree;

pub use tree::PathTree;
