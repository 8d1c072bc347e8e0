//! Browsing and incremental search over a [`History`].

use alloc::string::String;
use core::mem;

use crate::history::History;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
enum Navigation {
    /// At the live line
    #[default]
    Live,
    /// Stepping through entries. `stored` is the line that was being
    /// typed when browsing started.
    Browsing { stored: String, pos: usize },
    /// Searching for `needle`. `pos` is the distance of the last match,
    /// 0 if none. An empty needle never matches.
    Searching { needle: String, pos: usize },
}

/// Cursor into a [`History`].
///
/// Positions count back from the most recent entry: 0 is the live
/// line, `n` the entry pushed `n` steps ago. The navigator doesn't own
/// the history; every call that needs it borrows it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HistoryNavigator {
    state: Navigation,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.state, Navigation::Searching { .. })
    }

    pub fn is_browsing(&self) -> bool {
        matches!(self.state, Navigation::Browsing { .. })
    }

    /// Distance of the selected entry, 0 at the live line
    pub fn position(&self) -> usize {
        match self.state {
            Navigation::Live => 0,
            Navigation::Browsing { pos, .. } | Navigation::Searching { pos, .. } => pos,
        }
    }

    /// Whether a search is active and has found an entry
    pub fn has_match(&self) -> bool {
        matches!(self.state, Navigation::Searching { pos, .. } if pos > 0)
    }

    /// The search needle, if searching
    pub fn needle(&self) -> Option<&str> {
        match &self.state {
            Navigation::Searching { needle, .. } => Some(needle.as_str()),
            _ => None,
        }
    }

    /// Selected entry, or the stored line (or needle) at position 0.
    pub fn current<'a, H: History>(&'a self, history: &'a H) -> &'a str {
        match &self.state {
            Navigation::Live => "",
            Navigation::Browsing { stored, pos }
            | Navigation::Searching {
                needle: stored,
                pos,
            } => {
                if *pos == 0 {
                    stored.as_str()
                } else {
                    history.get(*pos).unwrap_or(stored.as_str())
                }
            }
        }
    }

    /// Step to an older entry, or search for an older match.
    ///
    /// When browsing starts, `line` is stored so that it can be
    /// restored by stepping forward again.
    pub fn backward<'a, H: History>(&'a mut self, history: &'a H, line: &str) -> &'a str {
        if let Navigation::Live = self.state {
            self.state = Navigation::Browsing {
                stored: String::new(),
                pos: 0,
            };
        }

        match &mut self.state {
            Navigation::Searching { needle, pos } => search_backward(history, needle, pos),
            Navigation::Browsing { stored, pos } => {
                if *pos == 0 {
                    stored.clear();
                    stored.push_str(line);
                }

                if *pos < history.len() {
                    *pos += 1;
                }
            }
            Navigation::Live => (),
        }

        self.current(history)
    }

    /// Step to a newer entry, or search for a newer match.
    ///
    /// Stepping forward from the live line returns `line` unchanged.
    pub fn forward<'a, H: History>(&'a mut self, history: &'a H, line: &'a str) -> &'a str {
        match &mut self.state {
            Navigation::Searching { needle, pos } => search_forward(history, needle, pos),
            Navigation::Browsing { pos, .. } if *pos > 0 => *pos -= 1,
            Navigation::Browsing { .. } | Navigation::Live => return line,
        }

        self.current(history)
    }

    /// Start searching for `needle`, returning the most recent match.
    pub fn search<'a, H: History>(&'a mut self, history: &'a H, needle: &str) -> &'a str {
        self.state = Navigation::Searching {
            needle: String::from(needle),
            pos: 0,
        };

        self.backward(history, needle)
    }

    /// Leave browsing or searching and return to the live line.
    pub fn cancel(&mut self) {
        self.state = Navigation::Live;
    }

    /// Take an active search out of the navigator, leaving it at the
    /// live line. Returns `None` if not searching.
    pub(crate) fn suspend(&mut self) -> Option<HistoryNavigator> {
        if self.is_searching() {
            Some(HistoryNavigator {
                state: mem::take(&mut self.state),
            })
        } else {
            None
        }
    }

    /// Put back a search taken by [`HistoryNavigator::suspend`].
    pub(crate) fn resume(&mut self, suspended: HistoryNavigator) {
        self.state = suspended.state;
    }
}

fn search_backward<H: History>(history: &H, needle: &mut String, pos: &mut usize) {
    if needle.is_empty() {
        return;
    }

    for distance in (*pos + 1)..=history.len() {
        if history.get(distance).is_some_and(|entry| entry.contains(needle.as_str())) {
            *pos = distance;
            return;
        }
    }

    // No older match: the search is abandoned
    needle.clear();
    *pos = 0;
}

fn search_forward<H: History>(history: &H, needle: &str, pos: &mut usize) {
    if needle.is_empty() || *pos == 0 {
        return;
    }

    for distance in (1..*pos).rev() {
        if history.get(distance).is_some_and(|entry| entry.contains(needle)) {
            *pos = distance;
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;

    fn history(entries: &[&str]) -> HistoryStore {
        let mut history = HistoryStore::new(10);

        for entry in entries {
            history.push(*entry);
        }

        history
    }

    #[test]
    fn browse() {
        let history = history(&["one", "two", "three"]);
        let mut nav = HistoryNavigator::new();

        assert_eq!(nav.backward(&history, "typed"), "three");
        assert!(nav.is_browsing());
        assert_eq!(nav.backward(&history, "three"), "two");
        assert_eq!(nav.backward(&history, "two"), "one");
        assert_eq!(nav.position(), 3);

        // Saturates at the oldest entry
        assert_eq!(nav.backward(&history, "one"), "one");
        assert_eq!(nav.position(), 3);

        assert_eq!(nav.forward(&history, "one"), "two");
        assert_eq!(nav.forward(&history, "two"), "three");

        // Back to position 0 restores the stored line
        assert_eq!(nav.forward(&history, "three"), "typed");
        assert_eq!(nav.position(), 0);

        // At position 0 the caller's line comes back unchanged
        assert_eq!(nav.forward(&history, "edited"), "edited");
        assert_eq!(nav.position(), 0);
    }

    #[test]
    fn browse_restarts_snapshot_at_live_position() {
        let history = history(&["one"]);
        let mut nav = HistoryNavigator::new();

        assert_eq!(nav.backward(&history, "first"), "one");
        assert_eq!(nav.forward(&history, "one"), "first");
        assert_eq!(nav.backward(&history, "second"), "one");
        assert_eq!(nav.forward(&history, "one"), "second");
    }

    #[test]
    fn browse_empty_history() {
        let history = HistoryStore::new(4);
        let mut nav = HistoryNavigator::new();

        assert_eq!(nav.backward(&history, "typed"), "typed");
        assert_eq!(nav.position(), 0);
        assert_eq!(nav.forward(&history, "typed"), "typed");
        assert_eq!(nav.forward(&HistoryStore::new(2), "x"), "x");
    }

    #[test]
    fn forward_when_live() {
        let history = history(&["one"]);
        let mut nav = HistoryNavigator::new();

        assert_eq!(nav.forward(&history, "live"), "live");
        assert!(!nav.is_browsing());
    }

    #[test]
    fn search() {
        let history = history(&["xab", "ab1", "zzz"]);
        let mut nav = HistoryNavigator::new();

        assert_eq!(nav.search(&history, "ab"), "ab1");
        assert!(nav.is_searching());
        assert!(nav.has_match());
        assert_eq!(nav.position(), 2);

        assert_eq!(nav.backward(&history, ""), "xab");
        assert_eq!(nav.position(), 3);

        assert_eq!(nav.forward(&history, ""), "ab1");
        assert_eq!(nav.position(), 2);

        // No newer match, stays put
        assert_eq!(nav.forward(&history, ""), "ab1");

        assert_eq!(nav.backward(&history, ""), "xab");

        // Exhausted: needle is cleared
        assert_eq!(nav.backward(&history, ""), "");
        assert_eq!(nav.needle(), Some(""));
        assert_eq!(nav.position(), 0);
        assert!(!nav.has_match());

        // Empty needle never matches
        assert_eq!(nav.backward(&history, ""), "");
        assert_eq!(nav.forward(&history, ""), "");
    }

    #[test]
    fn search_is_case_sensitive_substring() {
        let history = history(&["make test", "Make all"]);
        let mut nav = HistoryNavigator::new();

        assert_eq!(nav.search(&history, "ke t"), "make test");
        assert_eq!(nav.search(&history, "Ma"), "Make all");
        assert_eq!(nav.search(&history, "MAKE"), "");
        assert_eq!(nav.search(&history, ""), "");
    }

    #[test]
    fn cancel() {
        let history = history(&["one", "two"]);
        let mut nav = HistoryNavigator::new();

        nav.search(&history, "o");
        nav.cancel();

        assert!(!nav.is_searching());
        assert_eq!(nav.position(), 0);
        assert_eq!(nav.current(&history), "");

        nav.backward(&history, "live");
        nav.cancel();
        assert!(!nav.is_browsing());
    }

    #[test]
    fn suspend_and_resume() {
        let history = history(&["one", "two"]);
        let mut nav = HistoryNavigator::new();

        assert!(nav.suspend().is_none());

        nav.search(&history, "on");
        let suspended = nav.suspend().unwrap();

        assert!(!nav.is_searching());

        nav.resume(suspended);

        assert!(nav.is_searching());
        assert_eq!(nav.current(&history), "one");
    }
}
