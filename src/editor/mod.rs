//! Indent-aware plain-text editing.
//!
//! A selection-carrying text buffer with the Tab/Shift-Tab/Enter/Backspace
//! behavior of the editing surface: block indent and deindent, tab-stop
//! alignment inside leading whitespace, and newline insertion that copies
//! the current line's indentation.

mod buffer;
mod key;

pub use buffer::EditorBuffer;
pub use key::Key;
