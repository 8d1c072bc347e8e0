//! Line editor for async IO

use alloc::string::String;
use alloc::vec::Vec;

use crate::{
    async_io::IO,
    core::{Event, Session},
    error::HistlineError,
    history::History,
    output::{handle_event, AnsiRenderer, Render},
};

/// Line editor for async IO
///
/// It is recommended to use [`crate::builder::EditorBuilder`] to build an editor.
pub struct Editor<H: History, R: Render = AnsiRenderer> {
    session: Session<H>,
    prompt: String,
    renderer: R,
    #[cfg(feature = "std")]
    history_file: Option<std::path::PathBuf>,
}

impl<H, R> Editor<H, R>
where
    H: History,
    R: Render,
{
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

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn history(&self) -> &H {
        self.session.history()
    }

    pub fn history_mut(&mut self) -> &mut H {
        self.session.history_mut()
    }

    /// Read one line. See [`crate::sync_editor::Editor::readline`].
    pub async fn readline<RD, WR>(&mut self, io: &mut IO<RD, WR>) -> Result<String, HistlineError>
    where
        RD: embedded_io_async::Read,
        WR: embedded_io_async::Write,
    {
        let mut out = Vec::new();

        self.renderer
            .render(&self.prompt, &self.session.view(), &mut out);
        io.write(&out).await?;
        io.flush().await?;

        loop {
            let mut buf = [0; 1];

            let event = if io.read(&mut buf).await? == 0 {
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
                io.write(&out).await?;
                io.flush().await?;
            }

            if let Some(result) = done {
                return result;
            }
        }
    }

    /// Read lines until the session ends, passing each one to
    /// `on_command` together with the history.
    pub async fn run<RD, WR, F>(
        &mut self,
        io: &mut IO<RD, WR>,
        mut on_command: F,
    ) -> Result<(), HistlineError>
    where
        RD: embedded_io_async::Read,
        WR: embedded_io_async::Write,
        F: FnMut(String, &mut H),
    {
        loop {
            match self.readline(io).await {
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
        /// Save history to the history file. Failures are logged.
        ///
        /// File IO is blocking.
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
    use std::string::ToString;
    use std::vec::Vec;

    use super::*;
    use crate::history::{HistoryStore, NoHistory};
    use crate::testlib::{csi, AsByteVec};

    fn plain() -> AnsiRenderer {
        AnsiRenderer::new().with_colors(false)
    }

    #[tokio::test]
    async fn readline() {
        let mut editor = Editor::new(NoHistory::new(), "> ", plain());
        let mut io = IO::new("æøå\r".as_bytes(), Vec::new());

        assert_eq!(editor.readline(&mut io).await, Ok("æøå".to_string()));
        assert_eq!(editor.readline(&mut io).await, Err(HistlineError::Aborted));

        let (_, output) = io.take();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("\r\x1b[K> æøå\r\x1b[5C\r\n"));
    }

    #[tokio::test]
    async fn run() {
        let mut editor = Editor::new(HistoryStore::new(4), "> ", plain());

        let input = ["make\r", "test\r", csi::UP, "\r", "\x04"].as_byte_vec();
        let mut io = IO::new(input.as_slice(), Vec::new());

        let mut commands = Vec::new();

        let result = editor
            .run(&mut io, |line, history| {
                history.push(line.clone());
                commands.push(line);
            })
            .await;

        assert_eq!(result, Ok(()));
        assert_eq!(commands, ["make", "test", "test"]);
        assert_eq!(editor.history().iter().collect::<Vec<_>>(), ["make", "test"]);
    }

    struct Closed;

    impl embedded_io_async::ErrorType for Closed {
        type Error = embedded_io::ErrorKind;
    }

    impl embedded_io_async::Write for Closed {
        async fn write(&mut self, _buf: &[u8]) -> Result<usize, Self::Error> {
            Err(embedded_io::ErrorKind::BrokenPipe)
        }
    }

    #[tokio::test]
    async fn write_error() {
        let mut editor = Editor::new(NoHistory::new(), "> ", plain());
        let mut io = IO::new("abc\r".as_bytes(), Closed);

        assert_eq!(
            editor.readline(&mut io).await,
            Err(HistlineError::WriteError(embedded_io::ErrorKind::BrokenPipe))
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn save_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");

        let mut editor = Editor::new(HistoryStore::new(4), "> ", plain());
        editor.history_mut().push("a");

        editor.save_history();
        assert!(!path.exists());

        editor.set_history_file(Some(path.clone()));
        editor.save_history();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\n");
    }
}
