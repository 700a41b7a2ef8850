use log::trace;

use crate::history::History;
use crate::layout::{Layout, Position};
use crate::line::LineBuffer;
use crate::tty::Tty;
use crate::width::display_width;

/// Editing state for one prompt: the logical buffer plus the bookkeeping
/// needed to keep the physical cursor in sync with it on a wrapped,
/// variable-width display.
///
/// The terminal and the history are borrowed from the surrounding session
/// and never outlived. Every operation runs to completion before the next
/// one is accepted; all terminal writes happen in-line.
pub struct State<'a, T: Tty> {
    prompt: &'a str,
    prompt_size: Position,
    line: LineBuffer,
    layout: Layout,
    tty: &'a mut T,
    history: &'a mut History,
}

impl<'a, T: Tty> State<'a, T> {
    /// Computes the prompt's display size once, for the lifetime of the
    /// state. Performs no terminal writes; the first `refresh` paints the
    /// prompt and establishes the real baseline.
    pub fn new(prompt: &'a str, tty: &'a mut T, history: &'a mut History) -> Self {
        let prompt_size = tty.calculate_position(prompt, Position::default());
        Self {
            prompt,
            prompt_size,
            line: LineBuffer::new(),
            layout: Layout::new(prompt_size),
            tty,
            history,
        }
    }

    pub fn buffer(&self) -> String {
        self.line.buffer()
    }

    pub fn pos(&self) -> usize {
        self.line.pos()
    }

    pub fn len(&self) -> usize {
        self.line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Insert `text` at the cursor.
    ///
    /// A plain append that stays strictly inside the current row is echoed
    /// with a single raw write and the cached layout advances in place.
    /// Anything that could change wrapping or the number of rows (a
    /// newline, a mid-line edit, a row overflow, a zero-width fragment)
    /// routes through the full refresh.
    pub fn edit_insert(&mut self, text: &str) {
        let push = self.line.insert(text);
        let multiline = text.contains('\n');
        if push && !multiline {
            let width = display_width(text);
            if width > 0 && self.layout.cursor.col + width < self.tty.col() {
                trace!("edit_insert: fast path, width {}", width);
                self.layout.cursor.col += width;
                self.layout.end.col += width;
                self.tty.write(text);
            } else {
                self.refresh();
            }
        } else {
            self.refresh();
        }
    }

    /// Replace the whole buffer, cursor at the end, and redraw. Used for
    /// history recall, where nothing relates the new contents to the old.
    pub fn update(&mut self, text: &str) {
        self.line.update(text, text.chars().count());
        self.refresh();
    }

    /// Delete up to `n` chars before the cursor. Deletion can always change
    /// wrapping, so any change triggers a full refresh.
    pub fn edit_backspace(&mut self, n: usize) {
        if self.line.backspace(n) {
            self.refresh();
        }
    }

    /// Recompute the layout and redraw the line. The single authoritative
    /// resynchronization point between logical and physical state.
    pub fn refresh(&mut self) {
        let new_layout = self.tty.compute_layout(self.prompt_size, &self.line);
        trace!(
            "refresh: cursor {:?} end {:?}",
            new_layout.cursor,
            new_layout.end
        );
        self.tty
            .refresh_line(self.prompt, &self.line, &self.layout, &new_layout);
        self.layout = new_layout;
    }

    pub fn move_cursor_back(&mut self, n: usize) {
        if self.line.move_back(n) {
            self.move_cursor();
        }
    }

    pub fn move_cursor_forward(&mut self, n: usize) {
        if self.line.move_forward(n) {
            self.move_cursor();
        }
    }

    /// Up within the buffer while a line above exists; on the first line
    /// the motion turns into a history recall instead. The two cases are
    /// indistinguishable to callers.
    pub fn move_cursor_up(&mut self, n: usize) {
        if self.line.move_line_up(n) {
            self.move_cursor();
        } else {
            self.previous_history();
        }
    }

    /// Mirror of `move_cursor_up`: falling off the last line browses
    /// forward through history.
    pub fn move_cursor_down(&mut self, n: usize) {
        if self.line.move_line_down(n) {
            self.move_cursor();
        } else {
            self.next_history();
        }
    }

    /// Recall the previous history entry; a no-op at the oldest entry.
    pub fn previous_history(&mut self) {
        if let Some(prev) = self.history.prev().map(str::to_string) {
            self.update(&prev);
        }
    }

    /// Recall the next history entry. Advancing past the newest recalled
    /// entry clears the line; the draft that was being composed before
    /// browsing began is not restored.
    pub fn next_history(&mut self) {
        if self.history.cursor().is_none() {
            return;
        }
        match self.history.next().map(str::to_string) {
            Some(next) => self.update(&next),
            None => self.update(""),
        }
    }

    /// Reconcile the physical cursor with the logical one. Content is
    /// unchanged, so at most one cursor move is needed, and none at all
    /// when the recomputed position equals the cached one.
    pub fn move_cursor(&mut self) {
        let cursor = self
            .tty
            .calculate_position(&self.line.pos_buffer(), self.prompt_size);
        if cursor == self.layout.cursor {
            return;
        }
        self.tty.move_cursor(self.layout.cursor, cursor);
        self.layout.prompt_size = self.prompt_size;
        self.layout.cursor = cursor;
    }
}
