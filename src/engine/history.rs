//! Bounded command history with a browsing cursor.
use std::collections::VecDeque;

/// Number of entries kept when no bound is configured.
pub const DEFAULT_HISTORY_SIZE: usize = 100;

/// Result of moving the history cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall<'a> {
    /// The cursor now points at this entry.
    Entry(&'a str),
    /// The cursor moved past the newest entry and is back at the sentinel.
    Exhausted,
    /// Nothing to do (empty history, or not browsing).
    Unchanged,
}

/// Previously submitted command lines, oldest first.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    max_size: usize,
    /// `None` means the user is not browsing history.
    cursor: Option<usize>,
}

impl History {
    /// Creates an empty history keeping at most `max_size` entries (at least one).
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            entries: VecDeque::with_capacity(max_size.min(DEFAULT_HISTORY_SIZE)),
            max_size,
            cursor: None,
        }
    }

    /// Appends an entry, evicting the oldest ones past the bound.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_back(entry.into());
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
        self.cursor = None;
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Moves toward older entries, starting from the newest one.
    ///
    /// Stays on the oldest entry once it is reached.
    pub fn previous(&mut self) -> Recall<'_> {
        if self.entries.is_empty() {
            return Recall::Unchanged;
        }

        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        Recall::Entry(&self.entries[index])
    }

    /// Moves toward newer entries; stepping past the newest returns to the sentinel.
    pub fn next(&mut self) -> Recall<'_> {
        match self.cursor {
            None => Recall::Unchanged,
            Some(i) if i + 1 >= self.entries.len() => {
                self.cursor = None;
                Recall::Exhausted
            }
            Some(i) => {
                self.cursor = Some(i + 1);
                Recall::Entry(&self.entries[i + 1])
            }
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}
