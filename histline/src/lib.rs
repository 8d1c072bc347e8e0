//! Histline is an IO-agnostic `#[no_std]` line editor with searchable
//! history. The core is a state machine that takes input one byte at a
//! time, so it can be driven by anything that produces bytes: a raw
//! mode terminal, a serial port or an async stream.
//!
//! Features:
//! - UTF-8 aware editing and cursor movement
//! - Arrow, Home, End and Delete keys in both CSI and SS3 form
//! - Word movement with shift-arrows
//! - Bounded history with browsing and Ctrl-R reverse incremental search
//! - History persistence to a plain text file (feature `std`)
//!
//! The core implementation is [`core::Session`], which turns bytes into
//! [`core::Event`]s and exposes a [`core::View`] for drawing. It
//! does no IO. On top of it there are two editors:
//! - [`sync_editor::Editor`] for [`embedded_io::Read`] and [`embedded_io::Write`]
//! - [`async_editor::Editor`] for [`embedded_io_async::Read`] and
//!   [`embedded_io_async::Write`]
//!
//! Editors are built using [`builder::EditorBuilder`].
//!
//! # Example
//! ```no_run
//! use histline::{builder::EditorBuilder, sync_io::IO};
//! use histline::sync_io::std_sync::{StdinReader, StdoutWriter};
//! use std::fmt::Write;
//! use termion::raw::IntoRawMode;
//!
//! fn main() {
//!     let _raw = std::io::stdout().into_raw_mode().unwrap();
//!     let mut io = IO::new(StdinReader::new(), StdoutWriter::new());
//!
//!     let mut editor = EditorBuilder::new()
//!         .with_history(100)
//!         .with_history_file(".histline_history", true)
//!         .build_sync();
//!
//!     while let Ok(line) = editor.readline(&mut io) {
//!         write!(io, "Read: '{}'\r\n", line).unwrap();
//!         editor.history_mut().push(line);
//!     }
//!
//!     editor.save_history();
//! }
//! ```

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

pub mod async_editor;
pub mod async_io;
pub mod builder;
pub mod core;
pub mod error;
pub mod escape;
pub mod history;
pub mod line_buffer;
pub mod navigator;
pub mod output;
pub mod sync_editor;
pub mod sync_io;
pub mod utf8;

#[cfg(test)]
pub(crate) mod testlib;
