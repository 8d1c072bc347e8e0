//! Control characters and escape sequence recognition.

use num_enum::{IntoPrimitive, TryFromPrimitive};

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Eq, PartialEq, Copy, Clone, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ControlCharacter {
    NUL = 0x0,
    CtrlA = 0x1,
    CtrlB = 0x2,
    CtrlC = 0x3,
    CtrlD = 0x4,
    CtrlE = 0x5,
    CtrlF = 0x6,
    CtrlG = 0x7,
    CtrlH = 0x8,
    Tab = 0x9,
    LineFeed = 0xA,
    CtrlK = 0xB,
    CtrlL = 0xC,
    CarriageReturn = 0xD,
    CtrlN = 0xE,
    CtrlO = 0xF,
    CtrlP = 0x10,
    CtrlQ = 0x11,
    CtrlR = 0x12,
    CtrlS = 0x13,
    CtrlT = 0x14,
    CtrlU = 0x15,
    CtrlV = 0x16,
    CtrlW = 0x17,
    CtrlX = 0x18,
    CtrlY = 0x19,
    CtrlZ = 0x1A,
    Escape = 0x1B,
    FS = 0x1C,
    GS = 0x1D,
    RS = 0x1E,
    US = 0x1F,
    Backspace = 0x7F,
}

impl ControlCharacter {
    pub fn new(byte: u8) -> Option<Self> {
        Self::try_from(byte).ok()
    }

    /// Whether the editor has a binding for this character. Bound
    /// characters are handled before any partial input is considered.
    pub fn is_bound(self) -> bool {
        use ControlCharacter::*;

        matches!(
            self,
            CtrlC | CtrlD | CtrlH | Tab | LineFeed | CarriageReturn | CtrlR | Escape | Backspace
        )
    }
}

/// Named key decoded from an escape sequence
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Key {
    Up,
    Down,
    Right,
    Left,
    ShiftUp,
    ShiftDown,
    ShiftRight,
    ShiftLeft,
    Home,
    End,
    Insert,
    Delete,
    PageUp,
    PageDown,
}

/// Known key sequences, in both CSI (`ESC [`) and SS3 (`ESC O`) forms.
pub const KEY_SEQUENCES: &[(&[u8], Key)] = &[
    (b"\x1b[A", Key::Up),
    (b"\x1b[B", Key::Down),
    (b"\x1b[C", Key::Right),
    (b"\x1b[D", Key::Left),
    (b"\x1bOA", Key::Up),
    (b"\x1bOB", Key::Down),
    (b"\x1bOC", Key::Right),
    (b"\x1bOD", Key::Left),
    (b"\x1b[1;2A", Key::ShiftUp),
    (b"\x1b[1;2B", Key::ShiftDown),
    (b"\x1b[1;2C", Key::ShiftRight),
    (b"\x1b[1;2D", Key::ShiftLeft),
    (b"\x1b[a", Key::ShiftUp),
    (b"\x1b[b", Key::ShiftDown),
    (b"\x1b[c", Key::ShiftRight),
    (b"\x1b[d", Key::ShiftLeft),
    (b"\x1bO2A", Key::ShiftUp),
    (b"\x1bO2B", Key::ShiftDown),
    (b"\x1bO2C", Key::ShiftRight),
    (b"\x1bO2D", Key::ShiftLeft),
    (b"\x1b[H", Key::Home),
    (b"\x1b[F", Key::End),
    (b"\x1bOH", Key::Home),
    (b"\x1bOF", Key::End),
    (b"\x1b[1~", Key::Home),
    (b"\x1b[2~", Key::Insert),
    (b"\x1b[3~", Key::Delete),
    (b"\x1b[4~", Key::End),
    (b"\x1b[5~", Key::PageUp),
    (b"\x1b[6~", Key::PageDown),
    (b"\x1b[7~", Key::Home),
    (b"\x1b[8~", Key::End),
];

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Recognized {
    /// Strict prefix of at least one known sequence
    Incomplete,
    Key(Key),
    /// Not a prefix of any known sequence
    Invalid,
}

/// Match `seq` against [`KEY_SEQUENCES`].
pub fn recognize(seq: &[u8]) -> Recognized {
    recognize_in(KEY_SEQUENCES, seq)
}

/// Match `seq` against `table`. A sequence that completes one entry
/// while still being a strict prefix of a longer one is incomplete.
pub fn recognize_in(table: &[(&[u8], Key)], seq: &[u8]) -> Recognized {
    let mut exact = None;

    for &(pattern, key) in table {
        if pattern.len() > seq.len() && pattern.starts_with(seq) {
            return Recognized::Incomplete;
        }

        if pattern == seq {
            exact = Some(key);
        }
    }

    exact.map_or(Recognized::Invalid, Recognized::Key)
}

const MAX_SEQUENCE_LEN: usize = 8;

/// Escape sequence being accumulated, starting with `ESC`.
#[derive(Debug, Eq, PartialEq, Clone)]
pub(crate) struct EscapeBuffer {
    buf: [u8; MAX_SEQUENCE_LEN],
    len: usize,
}

impl EscapeBuffer {
    pub(crate) fn new() -> Self {
        let mut buf = [0; MAX_SEQUENCE_LEN];
        buf[0] = ControlCharacter::Escape.into();

        Self { buf, len: 1 }
    }

    pub(crate) fn push(&mut self, byte: u8) -> Recognized {
        if self.len == MAX_SEQUENCE_LEN {
            return Recognized::Invalid;
        }

        self.buf[self.len] = byte;
        self.len += 1;

        recognize(self.as_bytes())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}
