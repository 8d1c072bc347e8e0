//! Line history

use alloc::string::String;
use alloc::vec::Vec;
use core::{iter::Chain, ops::Range};

/// Default number of entries kept by [`HistoryStore`]
pub const DEFAULT_CAPACITY: usize = 256;

#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
enum CircularRange {
    Consecutive(Range<usize>),
    Split(Range<usize>, Range<usize>),
}

impl CircularRange {
    fn new(start: usize, end: usize, len: usize, capacity: usize) -> Self {
        if len > 0 && start >= end {
            Self::Split(start..capacity, 0..end)
        } else {
            Self::Consecutive(start..end)
        }
    }

    fn get_ranges(&self) -> (Range<usize>, Range<usize>) {
        match self {
            CircularRange::Consecutive(range) => (range.clone(), 0..0),
            CircularRange::Split(range1, range2) => (range1.clone(), range2.clone()),
        }
    }
}

impl IntoIterator for CircularRange {
    type Item = usize;

    type IntoIter = Chain<Range<usize>, Range<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        let (range1, range2) = self.get_ranges();

        range1.chain(range2)
    }
}

/// Trait for line history
///
/// Entries are addressed by their distance from the most recent one:
/// distance 1 is the last entry pushed, distance [`History::len`] the
/// oldest one still kept.
pub trait History {
    /// Append an entry
    fn push(&mut self, entry: String);

    /// Number of entries
    fn len(&self) -> usize;

    /// Entry `distance` steps back from the most recent, or `None` if
    /// out of range
    fn get(&self, distance: usize) -> Option<&str>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fixed-capacity circular history. Once full, the oldest entries are
/// overwritten. Pushing the same entry twice in a row stores it once.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: Vec<String>,
    head: usize,
    full: bool,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryStore {
    /// Create history holding up to `capacity` entries (at least 2)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);

        Self {
            entries: core::iter::repeat_with(String::new).take(capacity).collect(),
            head: 0,
            full: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn size(&self) -> usize {
        if self.full {
            self.capacity()
        } else {
            self.head
        }
    }

    pub fn empty(&self) -> bool {
        !self.full && self.head == 0
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(String::clear);
        self.head = 0;
        self.full = false;
    }

    fn slots(&self) -> CircularRange {
        if self.full {
            CircularRange::new(self.head, self.head, self.capacity(), self.capacity())
        } else {
            CircularRange::new(0, self.head, self.head, self.capacity())
        }
    }

    /// Entries in chronological order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots()
            .into_iter()
            .map(move |index| self.entries[index].as_str())
    }

    fn slot(&self, distance: usize) -> usize {
        let capacity = self.capacity();

        (self.head + capacity - distance % capacity) % capacity
    }

    /// Append `command`, unless it equals the most recent entry.
    pub fn push(&mut self, command: impl Into<String>) {
        let command = command.into();

        if !self.empty() && self.entries[self.slot(1)] == command {
            return;
        }

        self.entries[self.head] = command;
        self.head += 1;

        if self.head == self.capacity() {
            self.head = 0;
            self.full = true;
        }
    }
}

impl History for HistoryStore {
    fn push(&mut self, entry: String) {
        HistoryStore::push(self, entry);
    }

    fn len(&self) -> usize {
        self.size()
    }

    fn get(&self, distance: usize) -> Option<&str> {
        if distance == 0 || distance > self.size() {
            None
        } else {
            Some(self.entries[self.slot(distance)].as_str())
        }
    }
}

/// Empty implementation for editors with no history
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHistory;

impl NoHistory {
    pub fn new() -> Self {
        Self
    }
}

impl History for NoHistory {
    fn push(&mut self, _entry: String) {}

    fn len(&self) -> usize {
        0
    }

    fn get(&self, _distance: usize) -> Option<&str> {
        None
    }
}

/// Split `text` into lines terminated by `\n`, `\r\n` or a lone `\r`.
/// A final line without terminator is yielded as is.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;

    core::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }

        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(index) => {
                let line = &rest[..index];
                let skip = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[index + skip..];
                Some(line)
            }
            None => Some(core::mem::take(&mut rest)),
        }
    })
}

#[cfg(feature = "std")]
mod file {
    use super::*;
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Read, Write};
    use std::path::Path;

    impl HistoryStore {
        /// Replace the content with entries read from `reader`, one per
        /// line. Blank lines are skipped. Returns the number of entries
        /// kept, after repeats and overflow are dropped.
        pub fn load_from<R: Read>(&mut self, mut reader: R) -> io::Result<usize> {
            self.clear();

            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes)?;

            let text = String::from_utf8_lossy(&bytes);

            for line in split_lines(&text).filter(|line| !line.is_empty()) {
                self.push(line);
            }

            Ok(self.size())
        }

        /// Write entries oldest first, one per line.
        pub fn save_to<W: Write>(&self, writer: W) -> io::Result<()> {
            let mut writer = BufWriter::new(writer);

            for entry in self.iter() {
                writeln!(writer, "{}", entry)?;
            }

            writer.flush()
        }

        /// Load history from file at `path`. The history is emptied
        /// first, and stays empty if the file is missing or unreadable.
        pub fn load(&mut self, path: impl AsRef<Path>) -> io::Result<usize> {
            let path = path.as_ref();

            self.clear();

            match File::open(path) {
                Ok(file) => {
                    let count = self.load_from(file)?;
                    tracing::debug!(path = %path.display(), count, "loaded history");
                    Ok(count)
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(0),
                Err(err) => Err(err),
            }
        }

        /// Save history to file at `path`. Nothing is written if the
        /// history is empty.
        pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
            let path = path.as_ref();

            if self.empty() {
                return Ok(());
            }

            self.save_to(fs::File::create(path)?)?;
            tracing::debug!(path = %path.display(), count = self.size(), "saved history");

            Ok(())
        }
    }
}
