use log::trace;

/// Session-scoped command history with a browsing cursor.
///
/// `cursor` is `None` while no entry is being recalled; `prev`/`next` walk
/// it through the entries, and stepping past the newest one ends browsing.
/// Nothing is persisted across sessions.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
    max_entries: usize,
    ignore_dups: bool,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_entries,
            ignore_dups: true,
        }
    }

    /// 直前のエントリと重複するものを無視するかどうか
    pub fn ignore_duplicates(mut self, ignore: bool) -> Self {
        self.ignore_dups = ignore;
        self
    }

    /// Append an accepted line. Empty lines are dropped, as are consecutive
    /// duplicates when configured. Adding always ends any browsing.
    pub fn add(&mut self, entry: &str) {
        let duplicate = self.ignore_dups && self.entries.last().map(String::as_str) == Some(entry);
        if !entry.is_empty() && !duplicate {
            self.entries.push(entry.to_string());
            if self.entries.len() > self.max_entries {
                self.entries.remove(0);
            }
        }
        self.cursor = None;
    }

    /// Step to the previous (older) entry. `None` once the oldest entry has
    /// already been recalled, or when the history is empty.
    pub fn prev(&mut self) -> Option<&str> {
        let index = match self.cursor {
            None if !self.entries.is_empty() => self.entries.len() - 1,
            Some(i) if i > 0 => i - 1,
            _ => return None,
        };
        self.cursor = Some(index);
        trace!("history: recalled entry {}", index);
        Some(&self.entries[index])
    }

    /// Step to the next (newer) entry. Stepping past the newest recalled
    /// entry ends browsing and returns `None`.
    pub fn next(&mut self) -> Option<&str> {
        match self.cursor {
            Some(i) if i + 1 < self.entries.len() => {
                self.cursor = Some(i + 1);
                Some(&self.entries[i + 1])
            }
            Some(_) => {
                self.cursor = None;
                None
            }
            None => None,
        }
    }

    /// Browsing position; `None` means no entry is currently recalled.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
