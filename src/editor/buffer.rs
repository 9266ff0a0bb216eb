use tracing::debug;

use crate::editor::Key;

/// One indentation unit.
const INDENT: &str = "    ";
const INDENT_UNIT: usize = INDENT.len();

/// Plain-text buffer with a byte-offset selection.
///
/// Selection offsets always sit on character boundaries; a collapsed
/// selection is the caret. All editing operations keep the selection
/// consistent with the text they produce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorBuffer {
    text: String,
    selection_start: usize,
    selection_end: usize,
}

impl EditorBuffer {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection_start: 0,
            selection_end: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> (usize, usize) {
        (self.selection_start, self.selection_end)
    }

    /// Moves the selection, clamping to the text and snapping each end
    /// down to a character boundary.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let start = self.snap_to_boundary(start);
        let end = self.snap_to_boundary(end);
        self.selection_start = start.min(end);
        self.selection_end = start.max(end);
    }

    fn snap_to_boundary(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }

    fn selection_is_collapsed(&self) -> bool {
        self.selection_start == self.selection_end
    }

    /// Byte offset of the start of the line containing `at`.
    fn line_start(&self, at: usize) -> usize {
        self.text[..at].rfind('\n').map_or(0, |i| i + 1)
    }

    /// Byte offset of the newline at or after `from`, or the end of text.
    fn line_end(&self, from: usize) -> usize {
        self.text[from..].find('\n').map_or(self.text.len(), |i| from + i)
    }

    /// Width of the run of spaces and tabs at the start of the line.
    fn leading_indent_width(&self, line_start: usize) -> usize {
        self.text[line_start..]
            .chars()
            .take_while(|c| matches!(c, ' ' | '\t'))
            .count()
    }

    /// True when everything between the line start and the caret is
    /// whitespace, including the caret sitting at the line start.
    pub fn is_cursor_in_leading_whitespace(&self) -> bool {
        let line_start = self.line_start(self.selection_start);
        self.text[line_start..self.selection_start]
            .chars()
            .all(char::is_whitespace)
    }

    /// True at the very start of the text or right after a newline.
    pub fn is_cursor_in_leftmost_position(&self) -> bool {
        self.selection_start == 0
            || self.text.as_bytes()[self.selection_start - 1] == b'\n'
    }

    /// True when the caret's line does not start with a space or tab.
    pub fn is_cursor_on_line_with_no_leading_whitespace(&self) -> bool {
        let line_start = self.line_start(self.selection_start);
        !matches!(self.text[line_start..].chars().next(), Some(' ' | '\t'))
    }

    /// Applies the indent-aware behavior for `key`.
    ///
    /// Returns `true` when the buffer consumed the key and `false` when
    /// the host's default editing should run instead, mirroring which
    /// branches of the key handler suppress the default action.
    pub fn apply_key(&mut self, key: Key) -> bool {
        debug!("Applying {} at {:?}", key, self.selection());
        match key {
            Key::Tab => {
                if self.selection_is_collapsed() && self.is_cursor_in_leading_whitespace() {
                    self.tab_in_leading_whitespace();
                } else {
                    self.indent_selection();
                }
                true
            }
            Key::ShiftTab => {
                if self.is_cursor_on_line_with_no_leading_whitespace() {
                    return true;
                }
                if self.selection_is_collapsed() && self.is_cursor_in_leading_whitespace() {
                    self.shift_tab_in_leading_whitespace();
                } else {
                    self.deindent_selection();
                }
                true
            }
            Key::Enter => {
                self.insert_newline_with_indent();
                true
            }
            Key::Backspace => {
                if self.is_cursor_in_leftmost_position() {
                    return false;
                }
                if self.selection_is_collapsed() && self.is_cursor_in_leading_whitespace() {
                    self.shift_tab_in_leading_whitespace();
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Prefixes every line touched by the selection with one indent unit.
    pub fn indent_selection(&mut self) {
        let start = self.selection_start;
        let end = self.selection_end;
        let block_start = self.line_start(start);
        let block_end = self.line_end(end);

        let block = &self.text[block_start..block_end];
        let line_count = block.split('\n').count();
        let indented = block
            .split('\n')
            .map(|line| format!("{INDENT}{line}"))
            .collect::<Vec<_>>()
            .join("\n");

        self.text.replace_range(block_start..block_end, &indented);
        self.selection_start = start + INDENT_UNIT;
        self.selection_end = end + line_count * INDENT_UNIT;
    }

    /// Strips up to one leading indent unit from every line touched by the
    /// selection. Lines indented with less than a full unit are untouched.
    pub fn deindent_selection(&mut self) {
        let start = self.selection_start;
        let end = self.selection_end;
        let block_start = self.line_start(start);
        let block_end = self.line_end(end);

        let block = &self.text[block_start..block_end];
        let mut removed = 0;
        let deindented = block
            .split('\n')
            .map(|line| match line.strip_prefix(INDENT) {
                Some(rest) => {
                    removed += INDENT_UNIT;
                    rest
                }
                None => line,
            })
            .collect::<Vec<_>>()
            .join("\n");

        self.text.replace_range(block_start..block_end, &deindented);
        self.selection_start = self.snap_to_boundary(start);
        self.selection_end = self
            .snap_to_boundary(end.saturating_sub(removed))
            .max(self.selection_start);
    }

    /// Replaces the selection with a newline followed by a copy of the
    /// current line's leading whitespace.
    pub fn insert_newline_with_indent(&mut self) {
        let start = self.selection_start;
        let line_start = self.line_start(start);
        let indent: String = self.text[line_start..start]
            .chars()
            .take_while(|c| c.is_whitespace())
            .collect();

        let insertion = format!("\n{indent}");
        let caret = start + insertion.len();
        self.text
            .replace_range(self.selection_start..self.selection_end, &insertion);
        self.selection_start = caret;
        self.selection_end = caret;
    }

    /// Inserts the spaces needed to reach the next tab stop when the caret
    /// sits inside the line's leading whitespace.
    pub fn tab_in_leading_whitespace(&mut self) {
        if !self.is_cursor_in_leading_whitespace() {
            return;
        }
        let start = self.selection_start;
        let line_start = self.line_start(start);
        let current_indent = self.leading_indent_width(line_start);

        let spaces = INDENT_UNIT - (current_indent % INDENT_UNIT);
        self.text.insert_str(start, &" ".repeat(spaces));
        self.selection_start = start + spaces;
        self.selection_end = self.selection_start;
    }

    /// Removes the spaces back to the previous tab stop when the caret
    /// sits inside the line's leading whitespace, taking from the left of
    /// the caret first and then from the right.
    pub fn shift_tab_in_leading_whitespace(&mut self) {
        if !self.is_cursor_in_leading_whitespace() {
            return;
        }
        let start = self.selection_start;
        let line_start = self.line_start(start);
        let current_indent = self.leading_indent_width(line_start);
        // Bail on empty indent, or a caret past the space/tab run (the
        // line may open with other whitespace characters).
        if current_indent == 0 || start - line_start > current_indent {
            return;
        }

        let to_remove = match current_indent % INDENT_UNIT {
            0 => INDENT_UNIT,
            rem => rem,
        };
        let left = to_remove.min(start - line_start);
        let right = to_remove - left;

        self.text.replace_range(start - left..start, "");
        let adjusted = start - left;
        self.text.replace_range(adjusted..adjusted + right, "");
        self.selection_start = adjusted;
        self.selection_end = adjusted;
    }
}
