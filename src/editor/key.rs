use derive_more::Display;

/// Keys the buffer gives indent-aware treatment.
///
/// Decoding keyboard events into these is the host's job; the buffer only
/// sees the result.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    #[display("Shift-Tab")]
    ShiftTab,
    Enter,
    Backspace,
}
