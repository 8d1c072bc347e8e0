use std::error::Error;

use embedded_io_async::{ErrorKind, ErrorType, Read, Write};
use histline::async_io::IO;
use histline::builder::EditorBuilder;
use histline_demo::{init_logging, HISTORY_FILE};
use termion::raw::IntoRawMode;
use tokio::io::{self, AsyncReadExt, AsyncWriteExt};

struct Stdin(io::Stdin);

impl ErrorType for Stdin {
    type Error = ErrorKind;
}

impl Read for Stdin {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.0.read(buf).await.map_err(|e| e.kind().into())
    }
}

struct Stdout(io::Stdout);

impl ErrorType for Stdout {
    type Error = ErrorKind;
}

impl Write for Stdout {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.0.write(buf).await.map_err(|e| e.kind().into())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.flush().await.map_err(|e| e.kind().into())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let _raw_term = std::io::stdout().into_raw_mode()?;
    let mut io = IO::new(Stdin(io::stdin()), Stdout(io::stdout()));

    let mut editor = EditorBuilder::new()
        .with_prompt("async> ")
        .with_history(256)
        .with_history_file(HISTORY_FILE, true)
        .build_async();

    editor
        .run(&mut io, |line, history| {
            tracing::info!(%line, "read line");
            history.push(line);
        })
        .await?;

    editor.save_history();

    Ok(())
}
