//! Core state machine turning input bytes into line edits.
//!
//! [`Session`] takes input one byte at a time and reports the outcome
//! as an [`Event`]. It does no IO: the caller reads bytes, feeds them
//! in, draws [`Session::view`] whenever the event asks for it and runs
//! completed commands.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use crate::escape::{ControlCharacter, EscapeBuffer, Key, Recognized};
use crate::history::History;
use crate::line_buffer::LineBuffer;
use crate::navigator::HistoryNavigator;
use crate::utf8::{Utf8Decoder, Utf8DecoderStatus};

use ControlCharacter::*;

/// Outcome of feeding one byte to a [`Session`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Byte consumed, nothing visible changed
    Pending,
    /// Line or search state changed
    Redraw,
    /// A non-empty line was entered. The session is reset to an empty
    /// line.
    Command(String),
    /// An escape sequence matched no known key and was discarded
    UnknownEscape(Vec<u8>),
    /// The user asked to end the session
    Stop,
}

#[derive(Debug, Default)]
enum InputState {
    #[default]
    Idle,
    /// Escape sequence in progress. An active search is set aside until
    /// the sequence resolves.
    Escape {
        seq: EscapeBuffer,
        suspended: Option<HistoryNavigator>,
    },
    Utf8(Utf8Decoder),
}

/// Search state as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchView<'a> {
    /// Matched history entry, empty if there is none
    pub matched: &'a str,
    /// The needle is non-empty but nothing matched
    pub failed: bool,
}

/// Everything a renderer needs to draw the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View<'a> {
    /// Line being edited, or the search needle while searching
    pub line: &'a str,
    /// Cursor position in codepoints
    pub cursor: usize,
    pub search: Option<SearchView<'a>>,
}

/// Line editing session.
///
/// Owns the line, the history and the navigation state for as long as
/// the session lasts; lines are entered one after the other on the same
/// session.
#[derive(Debug)]
pub struct Session<H: History> {
    line: LineBuffer,
    history: H,
    nav: HistoryNavigator,
    input: InputState,
    last_byte: Option<u8>,
}

impl<H: History> Session<H> {
    pub fn new(history: H) -> Self {
        Self {
            line: LineBuffer::new(),
            history,
            nav: HistoryNavigator::new(),
            input: InputState::Idle,
            last_byte: None,
        }
    }

    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn is_searching(&self) -> bool {
        self.searching_navigator().is_some()
    }

    pub fn is_browsing(&self) -> bool {
        self.nav.is_browsing()
    }

    fn searching_navigator(&self) -> Option<&HistoryNavigator> {
        match &self.input {
            InputState::Escape {
                suspended: Some(nav),
                ..
            } => Some(nav),
            _ if self.nav.is_searching() => Some(&self.nav),
            _ => None,
        }
    }

    pub fn view(&self) -> View<'_> {
        let search = self.searching_navigator().map(|nav| SearchView {
            matched: if nav.has_match() {
                nav.current(&self.history)
            } else {
                ""
            },
            failed: !nav.has_match() && !self.line.is_empty(),
        });

        View {
            line: self.line.as_str(),
            cursor: self.line.cursor_chars(),
            search,
        }
    }

    /// Clear the line and any partial input, and leave browsing or
    /// searching.
    pub fn reset(&mut self) {
        self.line.clear();
        self.nav.cancel();
        self.input = InputState::Idle;
    }

    /// Advance state machine by one byte.
    pub fn advance(&mut self, byte: u8) -> Event {
        let previous = self.last_byte.replace(byte);
        let control = ControlCharacter::new(byte);

        if let Some(c) = control.filter(|c| c.is_bound()) {
            return self.control(c, previous);
        }

        match mem::take(&mut self.input) {
            InputState::Escape { seq, suspended } => self.escape(seq, suspended, byte),
            InputState::Idle | InputState::Utf8(_) if control.is_some() => {
                tracing::trace!(byte, "ignoring unbound control character");
                Event::Pending
            }
            InputState::Utf8(decoder) => self.utf8(decoder, byte),
            InputState::Idle => self.utf8(Utf8Decoder::new(), byte),
        }
    }

    fn control(&mut self, c: ControlCharacter, previous: Option<u8>) -> Event {
        // Partial input is dropped. A search set aside by a bare ESC
        // carries on.
        if let InputState::Escape {
            suspended: Some(nav),
            ..
        } = mem::take(&mut self.input)
        {
            self.nav.resume(nav);
        }

        match c {
            CtrlC => {
                if self.line.is_empty() && !self.nav.is_searching() {
                    Event::Stop
                } else {
                    self.line.clear();
                    self.nav.cancel();
                    Event::Redraw
                }
            }
            CtrlD => {
                self.line.clear();
                self.nav.cancel();
                Event::Stop
            }
            CtrlR => {
                if self.nav.is_searching() {
                    self.nav.backward(&self.history, "");
                } else {
                    self.nav.search(&self.history, self.line.as_str());
                }

                Event::Redraw
            }
            Tab => {
                if self.nav.is_searching() {
                    self.accept_search();
                    Event::Redraw
                } else {
                    // Completion is not supported
                    self.nav.cancel();
                    Event::Pending
                }
            }
            CtrlH | Backspace => {
                let erased = self.line.erase_backward();
                self.erased(erased)
            }
            LineFeed if previous == Some(u8::from(CarriageReturn)) => Event::Pending,
            CarriageReturn | LineFeed => self.submit(),
            Escape => {
                let suspended = self.nav.suspend();

                self.input = InputState::Escape {
                    seq: EscapeBuffer::new(),
                    suspended,
                };

                Event::Pending
            }
            _ => Event::Pending,
        }
    }

    fn escape(
        &mut self,
        mut seq: EscapeBuffer,
        suspended: Option<HistoryNavigator>,
        byte: u8,
    ) -> Event {
        match seq.push(byte) {
            Recognized::Incomplete => {
                self.input = InputState::Escape { seq, suspended };
                Event::Pending
            }
            Recognized::Key(key) => {
                if let Some(nav) = suspended {
                    self.nav.resume(nav);
                }

                self.key(key)
            }
            Recognized::Invalid => {
                if suspended.is_some() {
                    tracing::debug!("search dropped by unknown escape sequence");
                }

                tracing::debug!(sequence = ?seq.as_bytes(), "unknown escape sequence");

                Event::UnknownEscape(seq.as_bytes().to_vec())
            }
        }
    }

    fn key(&mut self, key: Key) -> Event {
        match key {
            Key::Up | Key::ShiftUp => self.history_backward(),
            Key::Down | Key::ShiftDown => self.history_forward(),
            Key::Left => self.movement(LineBuffer::move_left),
            Key::Right => self.movement(LineBuffer::move_right),
            Key::ShiftLeft => self.movement(LineBuffer::move_word_left),
            Key::ShiftRight => self.movement(LineBuffer::move_word_right),
            Key::Home => self.movement(LineBuffer::home),
            Key::End => self.movement(LineBuffer::end),
            Key::Delete => {
                let erased = self.line.erase_forward();
                self.erased(erased)
            }
            Key::Insert | Key::PageUp | Key::PageDown => Event::Pending,
        }
    }

    fn utf8(&mut self, mut decoder: Utf8Decoder, byte: u8) -> Event {
        match decoder.advance(byte) {
            Utf8DecoderStatus::Continuation => {
                self.input = InputState::Utf8(decoder);
                Event::Pending
            }
            Utf8DecoderStatus::Done(c) => {
                self.line.insert_char(c);
                self.edited()
            }
            Utf8DecoderStatus::Error => {
                tracing::trace!(byte, "dropping malformed UTF-8");
                Event::Pending
            }
        }
    }

    // The line changed: re-run the search with the new needle, or stop
    // browsing.
    fn edited(&mut self) -> Event {
        if self.nav.is_searching() {
            self.nav.search(&self.history, self.line.as_str());
        } else {
            self.nav.cancel();
        }

        Event::Redraw
    }

    // Erasing nothing still ends browsing. A search keeps going.
    fn erased(&mut self, erased: bool) -> Event {
        if erased {
            self.edited()
        } else {
            if !self.nav.is_searching() {
                self.nav.cancel();
            }

            Event::Pending
        }
    }

    // Moving the cursor while searching takes the match into the line
    // first.
    fn movement(&mut self, f: fn(&mut LineBuffer) -> bool) -> Event {
        let accepted = self.nav.is_searching();

        if accepted {
            self.accept_search();
        }

        if f(&mut self.line) || accepted {
            Event::Redraw
        } else {
            Event::Pending
        }
    }

    fn history_backward(&mut self) -> Event {
        if self.nav.is_searching() {
            self.nav.backward(&self.history, "");
        } else {
            let entry = String::from(self.nav.backward(&self.history, self.line.as_str()));
            self.line.set(&entry);
        }

        Event::Redraw
    }

    fn history_forward(&mut self) -> Event {
        if self.nav.is_searching() {
            self.nav.forward(&self.history, "");
        } else {
            let entry = String::from(self.nav.forward(&self.history, self.line.as_str()));
            self.line.set(&entry);
        }

        Event::Redraw
    }

    fn accept_search(&mut self) {
        if self.nav.has_match() {
            self.line.set(self.nav.current(&self.history));
        }

        self.nav.cancel();
    }

    fn submit(&mut self) -> Event {
        if self.nav.is_searching() {
            self.accept_search();
        }

        self.nav.cancel();

        let command = self.line.take();

        if command.is_empty() {
            Event::Redraw
        } else {
            Event::Command(command)
        }
    }
}
