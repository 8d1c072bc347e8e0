//! Line editor for synchronous IO.
//!
//! The editor reads from any [`embedded_io::Read`] and writes to any
//! [`embedded_io::Write`], wrapped in [`IO`]. With feature `std`,
//! [`crate::sync_io::std_sync`] has wrappers for stdin and stdout.
//!
//! Use the [`crate::builder::EditorBuilder`] to build an editor.
use alloc::string::String;
use alloc::vec::Vec;

use crate::core::{Event, Session};
use crate::error::HistlineError;
use crate::history::History;
use crate::output::{handle_event, AnsiRenderer, Render};
use crate::sync_io::IO;

/// Line editor for synchronous IO
///
/// It is recommended to use [`crate::builder::EditorBuilder`] to build an Editor.
pub struct Editor<H: History, R: Render = AnsiRenderer> {
    session: Session<H>,
    prompt: String,
    renderer: R,
    #[cfg(feature = "std")]
    history_file: Option<std::path::PathBuf>,
}

impl<H: History, R: Render> Editor<H, R> {
    pub fn new(history: H, prompt: impl Into<String>, renderer: R) -> Self {
        Self {
            session: Session::new(history),
            prompt: prompt.into(),
            renderer,
            #[cfg(feature = "std")]
            history_file: None,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Change the prompt. Takes effect from the next redraw.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn history(&self) -> &H {
        self.session.history()
    }

    pub fn history_mut(&mut self) -> &mut H {
        self.session.history_mut()
    }

    fn render(&self, out: &mut Vec<u8>) {
        self.renderer.render(&self.prompt, &self.session.view(), out);
    }

    /// Read one line.
    ///
    /// Returns the entered line, which is not added to the history, or
    /// [`HistlineError::Aborted`] if the user ends the session or the
    /// input ends.
    pub fn readline<RD, WR>(&mut self, io: &mut IO<RD, WR>) -> Result<String, HistlineError>
    where
        RD: embedded_io::Read,
        WR: embedded_io::Write,
    {
        let mut out = Vec::new();

        self.render(&mut out);
        io.write(&out)?;
        io.flush()?;

        loop {
            let mut buf = [0; 1];

            let event = if io.read(&mut buf)? == 0 {
                tracing::debug!("end of input");
                self.session.reset();
                Event::Stop
            } else {
                self.session.advance(buf[0])
            };

            out.clear();

            let done = handle_event(
                event,
                &self.session,
                &self.prompt,
                &self.renderer,
                &mut out,
            );

            if !out.is_empty() {
                io.write(&out)?;
                io.flush()?;
            }

            if let Some(result) = done {
                return result;
            }
        }
    }

    /// Read lines until the session ends, passing each one to
    /// `on_command` together with the history.
    pub fn run<RD, WR, F>(
        &mut self,
        io: &mut IO<RD, WR>,
        mut on_command: F,
    ) -> Result<(), HistlineError>
    where
        RD: embedded_io::Read,
        WR: embedded_io::Write,
        F: FnMut(String, &mut H),
    {
        loop {
            match self.readline(io) {
                Ok(line) => on_command(line, self.session.history_mut()),
                Err(HistlineError::Aborted) => return Ok(()),
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(feature = "std")]
mod std_history {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::history::HistoryStore;

    impl<H: History, R: Render> Editor<H, R> {
        pub(crate) fn set_history_file(&mut self, path: Option<PathBuf>) {
            self.history_file = path;
        }

        pub fn history_file(&self) -> Option<&Path> {
            self.history_file.as_deref()
        }
    }

    impl<R: Render> Editor<HistoryStore, R> {
        /// Reload history from the history file. Failures are logged and
        /// leave the history empty. Returns the number of entries.
        pub fn load_history(&mut self) -> usize {
            let Some(path) = self.history_file.as_deref() else {
                return 0;
            };

            match self.session.history_mut().load(path) {
                Ok(count) => count,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "could not load history");
                    0
                }
            }
        }

        /// Save history to the history file. Failures are logged.
        pub fn save_history(&self) {
            let Some(path) = self.history_file.as_deref() else {
                return;
            };

            if let Err(err) = self.session.history().save(path) {
                tracing::warn!(path = %path.display(), %err, "could not save history");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;
    use std::string::ToString;
    use std::thread;
    use std::vec::Vec;

    use crossbeam::channel::{unbounded, Receiver, Sender};

    use super::*;
    use crate::escape::ControlCharacter::*;
    use crate::history::{HistoryStore, NoHistory};
    use crate::testlib::{csi, AsByteVec};

    struct ChannelReader(Receiver<u8>);

    impl embedded_io::ErrorType for ChannelReader {
        type Error = Infallible;
    }

    impl embedded_io::Read for ChannelReader {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            match self.0.recv() {
                Ok(byte) => {
                    buf[0] = byte;
                    Ok(1)
                }
                Err(_) => Ok(0),
            }
        }
    }

    struct ChannelWriter {
        buffer: Vec<u8>,
        tx: Sender<u8>,
    }

    impl ChannelWriter {
        fn new(tx: Sender<u8>) -> Self {
            Self {
                buffer: Vec::new(),
                tx,
            }
        }
    }

    impl embedded_io::ErrorType for ChannelWriter {
        type Error = Infallible;
    }

    impl embedded_io::Write for ChannelWriter {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.buffer.extend(buf.iter());

            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            for b in self.buffer.drain(0..) {
                self.tx.send(b).unwrap();
            }

            Ok(())
        }
    }

    fn send(tx: &Sender<u8>, input: impl AsByteVec) {
        for b in input.as_byte_vec() {
            tx.send(b).unwrap();
        }
    }

    fn plain() -> AnsiRenderer {
        AnsiRenderer::new().with_colors(false)
    }

    fn readline_from<H: History>(
        editor: &mut Editor<H>,
        input: impl AsByteVec,
    ) -> (Result<String, HistlineError>, String) {
        let input = input.as_byte_vec();
        let mut io = IO::new(input.as_slice(), Vec::new());

        let result = editor.readline(&mut io);
        let (_, output) = io.take();

        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn readline() {
        let mut editor = Editor::new(NoHistory::new(), "> ", plain());

        let (result, output) = readline_from(&mut editor, "abc\r");

        assert_eq!(result, Ok("abc".to_string()));
        assert!(output.starts_with("\r\x1b[K> \r\x1b[2C"));
        assert!(output.contains("\r\x1b[K> ab\r\x1b[4C"));
        assert!(output.ends_with("\r\x1b[K> abc\r\x1b[5C\r\n"));
    }

    #[test]
    fn end_of_input() {
        let mut editor = Editor::new(NoHistory::new(), "> ", plain());

        let (result, output) = readline_from(&mut editor, "");
        assert_eq!(result, Err(HistlineError::Aborted));
        assert!(output.ends_with("\r\n"));

        // Unfinished line is dropped
        let (result, _) = readline_from(&mut editor, "abc");
        assert_eq!(result, Err(HistlineError::Aborted));

        let (result, _) = readline_from(&mut editor, "d\n");
        assert_eq!(result, Ok("d".to_string()));
    }

    #[test]
    fn ctrl_d() {
        let mut editor = Editor::new(NoHistory::new(), "$ ", plain());

        let (result, output) = readline_from(&mut editor, ["abc", "\x04"]);

        assert_eq!(result, Err(HistlineError::Aborted));
        assert!(output.ends_with("\r\x1b[K$ \r\x1b[2C\r\n"));
    }

    #[test]
    fn search_is_drawn() {
        let mut history = HistoryStore::new(8);
        history.push("xab");
        history.push("ab1");

        let mut editor = Editor::new(history, "> ", plain());

        let (result, output) = readline_from(&mut editor, ["\x12", "ab", "\r"]);

        assert!(output.contains("(reverse-i-search)`ab': ab1"));
        assert!(output.ends_with("\r\x1b[K> ab1\r\x1b[5C\r\n"));
        assert_eq!(result, Ok("ab1".to_string()));
    }

    #[test]
    fn prompt() {
        let mut editor = Editor::new(NoHistory::new(), "> ", plain());

        editor.set_prompt("≫ ");
        assert_eq!(editor.prompt(), "≫ ");

        let (_, output) = readline_from(&mut editor, "\r");
        assert!(output.starts_with("\r\x1b[K≫ \r\x1b[2C"));
    }

    #[test]
    fn run() {
        let (input_tx, input_rx) = unbounded();
        let (output_tx, output_rx) = unbounded();
        let (command_tx, command_rx) = unbounded();

        let handle = thread::spawn(move || {
            let mut io = IO::new(ChannelReader(input_rx), ChannelWriter::new(output_tx));
            let mut editor = Editor::new(HistoryStore::new(8), "> ", plain());

            let result = editor.run(&mut io, |line, history| {
                history.push(line.clone());
                command_tx.send(line).unwrap();
            });

            let history: Vec<String> = editor.history().iter().map(|s| s.to_string()).collect();

            (result, history)
        });

        send(&input_tx, "ls -l\r");
        assert_eq!(command_rx.recv().unwrap(), "ls -l");

        send(&input_tx, ["pwd", "\r"]);
        assert_eq!(command_rx.recv().unwrap(), "pwd");

        send(&input_tx, [csi::UP, csi::UP, "\r"]);
        assert_eq!(command_rx.recv().unwrap(), "ls -l");

        send(&input_tx, CtrlC);

        let (result, history) = handle.join().unwrap();

        assert_eq!(result, Ok(()));
        assert_eq!(history, ["ls -l", "pwd", "ls -l"]);

        let output: Vec<u8> = output_rx.try_iter().collect();
        assert!(String::from_utf8(output).unwrap().contains("> pwd"));
    }

    #[cfg(feature = "std")]
    #[test]
    fn history_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");

        let mut editor = Editor::new(HistoryStore::new(8), "> ", plain());

        // No file configured
        assert_eq!(editor.load_history(), 0);
        editor.save_history();

        editor.set_history_file(Some(path.clone()));
        assert_eq!(editor.history_file(), Some(path.as_path()));
        assert_eq!(editor.load_history(), 0);

        editor.history_mut().push("one");
        editor.history_mut().push("two");
        editor.save_history();

        let mut loaded = Editor::new(HistoryStore::new(8), "> ", plain());
        loaded.set_history_file(Some(path));

        assert_eq!(loaded.load_history(), 2);
        assert_eq!(loaded.history().iter().collect::<Vec<_>>(), ["one", "two"]);
    }

    #[cfg(feature = "std")]
    #[test]
    fn unreadable_history_file() {
        let dir = tempfile::tempdir().unwrap();

        let mut editor = Editor::new(HistoryStore::new(8), "> ", plain());
        editor.history_mut().push("kept");

        // A directory can't be read as a file
        editor.set_history_file(Some(dir.path().to_path_buf()));
        assert_eq!(editor.load_history(), 0);

        // Nor written
        editor.history_mut().push("one");
        editor.save_history();
    }
}
