//! Error types

use thiserror::Error;

/// Errors returned by the editors
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HistlineError {
    /// The session ended: Ctrl-C on an empty line, Ctrl-D or end of
    /// input
    #[error("input aborted")]
    Aborted,
    #[error("read error: {0:?}")]
    ReadError(embedded_io::ErrorKind),
    #[error("write error: {0:?}")]
    WriteError(embedded_io::ErrorKind),
}

impl embedded_io::Error for HistlineError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match *self {
            HistlineError::Aborted => embedded_io::ErrorKind::Interrupted,
            HistlineError::ReadError(kind) | HistlineError::WriteError(kind) => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use embedded_io::{Error, ErrorKind};

    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(HistlineError::Aborted.kind(), ErrorKind::Interrupted);
        assert_eq!(
            HistlineError::ReadError(ErrorKind::BrokenPipe).kind(),
            ErrorKind::BrokenPipe
        );
        assert_eq!(HistlineError::Aborted.to_string(), "input aborted");
    }
}
