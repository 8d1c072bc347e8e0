//! Codepoint boundary arithmetic over UTF-8 byte buffers.
//!
//! None of these functions allocate or panic: offsets are clamped into
//! `0..=buf.len()` and a malformed leading byte is stepped over as if it
//! were a single byte, so scanning always makes progress.

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub(crate) enum Utf8ByteType {
    SingleByte,
    StartTwoByte,
    StartThreeByte,
    StartFourByte,
    Continuation,
    Invalid,
}

pub(crate) trait Utf8Byte {
    fn utf8_byte_type(&self) -> Utf8ByteType;
    fn utf8_is_continuation(&self) -> bool;
}

impl Utf8Byte for u8 {
    fn utf8_byte_type(&self) -> Utf8ByteType {
        let byte = *self;

        if byte & 0b10000000 == 0 {
            Utf8ByteType::SingleByte
        } else if byte & 0b11000000 == 0b10000000 {
            Utf8ByteType::Continuation
        } else if byte & 0b11100000 == 0b11000000 {
            Utf8ByteType::StartTwoByte
        } else if byte & 0b11110000 == 0b11100000 {
            Utf8ByteType::StartThreeByte
        } else if byte & 0b11111000 == 0b11110000 {
            Utf8ByteType::StartFourByte
        } else {
            Utf8ByteType::Invalid
        }
    }

    fn utf8_is_continuation(&self) -> bool {
        matches!(self.utf8_byte_type(), Utf8ByteType::Continuation)
    }
}

/// Length in bytes of the codepoint introduced by `lead`, or 0 if
/// `lead` can't start a codepoint.
pub fn char_len(lead: u8) -> usize {
    match lead.utf8_byte_type() {
        Utf8ByteType::SingleByte => 1,
        Utf8ByteType::StartTwoByte => 2,
        Utf8ByteType::StartThreeByte => 3,
        Utf8ByteType::StartFourByte => 4,
        Utf8ByteType::Continuation | Utf8ByteType::Invalid => 0,
    }
}

/// Offset of the codepoint boundary before `pos`.
pub fn prev_boundary(buf: &[u8], pos: usize) -> usize {
    let mut pos = pos.min(buf.len());

    if pos == 0 {
        return 0;
    }

    pos -= 1;

    while pos > 0 && buf[pos].utf8_is_continuation() {
        pos -= 1;
    }

    pos
}

/// Offset of the codepoint boundary after `pos`.
pub fn next_boundary(buf: &[u8], pos: usize) -> usize {
    if pos >= buf.len() {
        return buf.len();
    }

    let len = char_len(buf[pos]).max(1);

    (pos + len).min(buf.len())
}

/// Number of codepoints in `buf[start..end]`.
pub fn count_chars(buf: &[u8], start: usize, end: usize) -> usize {
    let end = end.min(buf.len());
    let mut pos = start.min(end);
    let mut count = 0;

    while pos < end {
        pos = next_boundary(buf, pos);
        count += 1;
    }

    count
}

#[cfg_attr(test, derive(Debug))]
#[derive(Eq, PartialEq)]
pub(crate) enum Utf8DecoderStatus {
    Continuation,
    Done(char),
    Error,
}

/// Accumulates the bytes of one codepoint as they arrive.
#[derive(Debug, Default, Eq, PartialEq)]
pub(crate) struct Utf8Decoder {
    buf: [u8; 4],
    pos: usize,
    expected: usize,
}

impl Utf8Decoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.pos = 0;
        self.expected = 0;
    }

    pub(crate) fn advance(&mut self, byte: u8) -> Utf8DecoderStatus {
        if self.pos == 0 {
            let len = char_len(byte);

            if len == 0 {
                return Utf8DecoderStatus::Error;
            }

            self.expected = len;
        } else if !byte.utf8_is_continuation() {
            // Interrupted sequence, start over from this byte
            self.reset();
            return self.advance(byte);
        }

        self.buf[self.pos] = byte;
        self.pos += 1;

        if self.pos < self.expected {
            return Utf8DecoderStatus::Continuation;
        }

        let bytes = &self.buf[..self.pos];
        let decoded = core::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.chars().next());

        self.reset();

        match decoded {
            Some(c) => Utf8DecoderStatus::Done(c),
            None => Utf8DecoderStatus::Error,
        }
    }
}
