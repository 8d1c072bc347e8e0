//! Terminal output for a [`View`].
//!
//! Every frame redraws the whole line: return to column 0, erase to
//! the end of the line, print prompt and text, then move the cursor
//! forward to where it belongs.

use alloc::string::String;
use alloc::vec::Vec;

use crate::core::{Event, Session, View};
use crate::error::HistlineError;
use crate::history::History;

const CLEAR_LINE: &[u8] = b"\r\x1b[K";
const PROMPT_STYLE: &[u8] = b"\x1b[1;32m";
const FAILED_STYLE: &[u8] = b"\x1b[31m";
const RESET_STYLE: &[u8] = b"\x1b[0m";
const SEARCH_LABEL: &str = "(reverse-i-search)";
const FAILED_SEARCH_LABEL: &str = "(failed reverse-i-search)";

/// Turns editor state into terminal output
pub trait Render {
    /// Append the bytes drawing `prompt` followed by `view` to `out`.
    fn render(&self, prompt: &str, view: &View<'_>, out: &mut Vec<u8>);

    /// Append the bytes that end the current line, after a command is
    /// entered or the session stops.
    fn finish(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(b"\r\n");
    }
}

/// Renderer for ANSI terminals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnsiRenderer {
    colors: bool,
}

impl Default for AnsiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsiRenderer {
    pub fn new() -> Self {
        Self { colors: true }
    }

    /// Enable or disable SGR styling of prompt and search label
    pub fn with_colors(self, colors: bool) -> Self {
        Self { colors }
    }

    fn styled(&self, out: &mut Vec<u8>, style: &[u8], text: &str) {
        if self.colors {
            out.extend_from_slice(style);
            out.extend_from_slice(text.as_bytes());
            out.extend_from_slice(RESET_STYLE);
        } else {
            out.extend_from_slice(text.as_bytes());
        }
    }
}

impl Render for AnsiRenderer {
    fn render(&self, prompt: &str, view: &View<'_>, out: &mut Vec<u8>) {
        out.extend_from_slice(CLEAR_LINE);
        self.styled(out, PROMPT_STYLE, prompt);

        let mut column = prompt.chars().count();

        match view.search {
            Some(search) => {
                let label = if search.failed {
                    self.styled(out, FAILED_STYLE, FAILED_SEARCH_LABEL);
                    FAILED_SEARCH_LABEL
                } else {
                    out.extend_from_slice(SEARCH_LABEL.as_bytes());
                    SEARCH_LABEL
                };

                out.push(b'`');
                out.extend_from_slice(view.line.as_bytes());
                out.extend_from_slice(b"': ");
                out.extend_from_slice(search.matched.as_bytes());

                // Cursor stays within the needle
                column += label.chars().count() + 1;
            }
            None => out.extend_from_slice(view.line.as_bytes()),
        }

        column += view.cursor;

        out.push(b'\r');

        if column > 0 {
            match UintToBytes::<5>::from_uint(column) {
                Some(digits) => {
                    out.extend_from_slice(b"\x1b[");
                    out.extend_from_slice(digits.as_bytes());
                    out.push(b'C');
                }
                None => tracing::trace!(column, "cursor column out of range"),
            }
        }
    }
}

/// Append the output for `event` to `out`. Returns the result of the
/// line once it is done.
pub(crate) fn handle_event<H: History, R: Render>(
    event: Event,
    session: &Session<H>,
    prompt: &str,
    renderer: &R,
    out: &mut Vec<u8>,
) -> Option<Result<String, HistlineError>> {
    match event {
        Event::Pending => None,
        // The sequence may have ended a search
        Event::UnknownEscape(_) | Event::Redraw => {
            renderer.render(prompt, &session.view(), out);
            None
        }
        Event::Command(line) => {
            // Redraw as a plain line in case it came from a search
            let view = View {
                line: &line,
                cursor: line.chars().count(),
                search: None,
            };

            renderer.render(prompt, &view, out);
            renderer.finish(out);

            Some(Ok(line))
        }
        Event::Stop => {
            renderer.render(prompt, &session.view(), out);
            renderer.finish(out);

            Some(Err(HistlineError::Aborted))
        }
    }
}

/// Decimal digits of an unsigned integer without allocating
#[cfg_attr(test, derive(Debug))]
#[derive(Copy, Clone)]
struct UintToBytes<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> UintToBytes<N> {
    fn from_uint<I: Into<usize>>(n: I) -> Option<Self> {
        let mut n: usize = n.into();

        if n < 10_usize.pow(N as u32) {
            let mut bytes = [0; N];

            for i in (0..N).rev() {
                bytes[i] = b'0' + (n % 10) as u8;
                n /= 10;

                if n == 0 {
                    break;
                }
            }

            Some(Self { bytes })
        } else {
            None
        }
    }

    fn as_bytes(&self) -> &[u8] {
        let start = self.bytes.iter().take_while(|&&b| b == 0).count();
        &self.bytes[start..]
    }
}
