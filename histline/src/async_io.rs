//! IO wrapper for async readers and writers
use embedded_io_async::Error;

use crate::error::HistlineError;

/// Byte source and render sink for [`crate::async_editor::Editor`]
pub struct IO<R, W>
where
    R: embedded_io_async::Read,
    W: embedded_io_async::Write,
{
    input: R,
    output: W,
}

impl<R, W> IO<R, W>
where
    R: embedded_io_async::Read,
    W: embedded_io_async::Write,
{
    /// Create IO wrapper from input and output
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume wrapper and return input and output as tuple
    pub fn take(self) -> (R, W) {
        (self.input, self.output)
    }

    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize, HistlineError> {
        self.input
            .read(buf)
            .await
            .map_err(|e| HistlineError::ReadError(e.kind()))
    }

    pub async fn write(&mut self, buf: &[u8]) -> Result<(), HistlineError> {
        self.output
            .write_all(buf)
            .await
            .map_err(|e| HistlineError::WriteError(e.kind()))
    }

    pub async fn flush(&mut self) -> Result<(), HistlineError> {
        self.output
            .flush()
            .await
            .map_err(|e| HistlineError::WriteError(e.kind()))
    }
}
