//! IO wrapper for blocking readers and writers
use core::fmt;

use embedded_io::Error;

use crate::error::HistlineError;

/// Byte source and render sink for [`crate::sync_editor::Editor`]
pub struct IO<R, W>
where
    R: embedded_io::Read,
    W: embedded_io::Write,
{
    input: R,
    output: W,
}

impl<R, W> IO<R, W>
where
    R: embedded_io::Read,
    W: embedded_io::Write,
{
    /// Create IO wrapper from input and output
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume wrapper and return input and output as tuple
    pub fn take(self) -> (R, W) {
        (self.input, self.output)
    }

    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, HistlineError> {
        self.input
            .read(buf)
            .map_err(|e| HistlineError::ReadError(e.kind()))
    }

    pub fn write(&mut self, buf: &[u8]) -> Result<(), HistlineError> {
        self.output
            .write_all(buf)
            .map_err(|e| HistlineError::WriteError(e.kind()))
    }

    pub fn flush(&mut self) -> Result<(), HistlineError> {
        self.output
            .flush()
            .map_err(|e| HistlineError::WriteError(e.kind()))
    }
}

impl<R, W> fmt::Write for IO<R, W>
where
    R: embedded_io::Read,
    W: embedded_io::Write,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s.as_bytes()).or(Err(fmt::Error))
    }
}

#[cfg(feature = "std")]
pub mod std_sync {
    //! Adapters for `std::io` handles. Requires feature `std`.

    use super::*;
    use std::io::{self, Read, Write};

    impl Default for IO<StdinReader, StdoutWriter> {
        fn default() -> Self {
            Self::new(StdinReader::new(), StdoutWriter::new())
        }
    }

    /// Reads [`std::io::Stdin`] one byte at a time
    pub struct StdinReader(io::Stdin);

    impl StdinReader {
        pub fn new() -> Self {
            Self(io::stdin())
        }
    }

    impl Default for StdinReader {
        fn default() -> Self {
            Self::new()
        }
    }

    impl embedded_io::ErrorType for StdinReader {
        type Error = embedded_io::ErrorKind;
    }

    impl embedded_io::Read for StdinReader {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            if buf.is_empty() {
                return Ok(0);
            }

            // End of input reads as 0 bytes
            self.0
                .read(&mut buf[..1])
                .map_err(|e| Self::Error::from(e.kind()))
        }
    }

    /// Writer for [`std::io::Stdout`]
    pub struct StdoutWriter(io::Stdout);

    impl StdoutWriter {
        pub fn new() -> Self {
            Self(io::stdout())
        }
    }

    impl Default for StdoutWriter {
        fn default() -> Self {
            Self::new()
        }
    }

    impl embedded_io::ErrorType for StdoutWriter {
        type Error = embedded_io::ErrorKind;
    }

    impl embedded_io::Write for StdoutWriter {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.0.write(buf).map_err(|e| e.kind().into())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.0.flush().map_err(|e| e.kind().into())
        }
    }
}
