use std::error::Error;
use std::fmt::Write;

use histline::builder::EditorBuilder;
use histline::error::HistlineError;
use histline::sync_io::std_sync::{StdinReader, StdoutWriter};
use histline::sync_io::IO;
use histline_demo::{init_logging, HISTORY_FILE};
use termion::raw::IntoRawMode;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let _raw_term = std::io::stdout().into_raw_mode()?;
    let mut io = IO::new(StdinReader::new(), StdoutWriter::new());

    let mut editor = EditorBuilder::new()
        .with_history(256)
        .with_history_file(HISTORY_FILE, true)
        .build_sync();

    loop {
        match editor.readline(&mut io) {
            Ok(line) => {
                tracing::info!(%line, "read line");
                write!(io, "Read: '{}'\r\n", line)?;
                editor.history_mut().push(line);
            }
            Err(HistlineError::Aborted) => break,
            Err(err) => return Err(err.into()),
        }
    }

    editor.save_history();

    Ok(())
}
