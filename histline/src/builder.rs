//! Builder for editors

use alloc::string::String;

use crate::{
    async_editor,
    history::{History, HistoryStore, NoHistory},
    output::AnsiRenderer,
    sync_editor,
};

#[cfg(feature = "std")]
use std::path::{Path, PathBuf};

/// Prompt used unless another one is set
pub const DEFAULT_PROMPT: &str = "> ";

/// Builder for [`sync_editor::Editor`] and [`async_editor::Editor`].
///
/// # Example
/// ```no_run
/// # use embedded_io::{Read, Write, ErrorType};
/// # use core::convert::Infallible;
/// # struct MyIO {}
/// # impl ErrorType for MyIO {
/// #     type Error = Infallible;
/// # }
/// # impl embedded_io::Write for MyIO {
/// #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { unimplemented!() }
/// #     fn flush(&mut self) -> Result<(), Self::Error> { unimplemented!() }
/// # }
/// # impl embedded_io::Read for MyIO {
/// #     fn read(&mut self, buf: &mut[u8]) -> Result<usize, Self::Error> { unimplemented!() }
/// # }
/// use histline::builder::EditorBuilder;
/// use histline::sync_io::IO;
///
/// let mut io = IO::new(MyIO {}, MyIO {});
/// let mut editor = EditorBuilder::new()
///     .with_prompt("$ ")
///     .with_history(100)
///     .build_sync();
///
/// while let Ok(line) = editor.readline(&mut io) {
///     editor.history_mut().push(line);
/// }
/// ```
pub struct EditorBuilder<H: History> {
    history: H,
    prompt: String,
    renderer: AnsiRenderer,
    #[cfg(feature = "std")]
    history_file: Option<PathBuf>,
}

impl EditorBuilder<NoHistory> {
    /// Create builder for editor without history
    pub fn new() -> Self {
        Self {
            history: NoHistory::new(),
            prompt: String::from(DEFAULT_PROMPT),
            renderer: AnsiRenderer::new(),
            #[cfg(feature = "std")]
            history_file: None,
        }
    }
}

impl Default for EditorBuilder<NoHistory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: History> EditorBuilder<H> {
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Enable or disable colored prompt and search label
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.renderer = self.renderer.with_colors(colors);
        self
    }

    /// Keep up to `capacity` entries of history (at least 2)
    pub fn with_history(self, capacity: usize) -> EditorBuilder<HistoryStore> {
        #[allow(unused_mut)]
        let mut history = HistoryStore::new(capacity);

        #[cfg(feature = "std")]
        if let Some(path) = &self.history_file {
            load_history(&mut history, path);
        }

        EditorBuilder {
            history,
            prompt: self.prompt,
            renderer: self.renderer,
            #[cfg(feature = "std")]
            history_file: self.history_file,
        }
    }

    /// Build [`sync_editor::Editor`]
    pub fn build_sync(self) -> sync_editor::Editor<H> {
        #[allow(unused_mut)]
        let mut editor = sync_editor::Editor::new(self.history, self.prompt, self.renderer);

        #[cfg(feature = "std")]
        editor.set_history_file(self.history_file);

        editor
    }

    /// Build [`async_editor::Editor`]
    pub fn build_async(self) -> async_editor::Editor<H> {
        #[allow(unused_mut)]
        let mut editor = async_editor::Editor::new(self.history, self.prompt, self.renderer);

        #[cfg(feature = "std")]
        editor.set_history_file(self.history_file);

        editor
    }
}

#[cfg(feature = "std")]
impl EditorBuilder<HistoryStore> {
    /// Load history from `path`, and let the editor save back to it.
    ///
    /// With `relative_to_home`, `path` is taken relative to the user's
    /// home directory.
    pub fn with_history_file(mut self, path: impl AsRef<Path>, relative_to_home: bool) -> Self {
        let path = resolve_history_path(path.as_ref(), relative_to_home);

        load_history(&mut self.history, &path);
        self.history_file = Some(path);

        self
    }
}

#[cfg(feature = "std")]
fn resolve_history_path(path: &Path, relative_to_home: bool) -> PathBuf {
    if !relative_to_home {
        return path.to_path_buf();
    }

    match dirs::home_dir() {
        Some(home) => home.join(path),
        None => {
            tracing::warn!(path = %path.display(), "no home directory, using path as is");
            path.to_path_buf()
        }
    }
}

#[cfg(feature = "std")]
fn load_history(history: &mut HistoryStore, path: &Path) {
    if let Err(err) = history.load(path) {
        tracing::warn!(path = %path.display(), %err, "could not load history");
    }
}
