use unicode_segmentation::UnicodeSegmentation;

use crate::layout::{Layout, Position};
use crate::line::LineBuffer;
use crate::width::grapheme_width;

/// Terminal capability required by the editor state.
///
/// The wrapping math (`calculate_position`, `compute_layout`) is pure in
/// the column count and ships as provided methods; backends supply the
/// geometry and the actual writes. Write-side methods are fire-and-forget:
/// a backend that can fail should log and continue, not propagate.
pub trait Tty {
    /// Terminal width in columns.
    fn col(&self) -> usize;

    /// Append raw text at the current physical cursor.
    fn write(&mut self, text: &str);

    /// Relocate the physical cursor without rewriting any content.
    fn move_cursor(&mut self, old: Position, new: Position);

    /// Redraw the edited line given the previous and the freshly computed
    /// layout, leaving the physical cursor at `new.cursor`.
    fn refresh_line(&mut self, prompt: &str, line: &LineBuffer, old: &Layout, new: &Layout);

    /// Display position reached after writing `text` starting at `orig`,
    /// honoring newlines, wrapping, and per-glyph display width.
    ///
    /// A glyph that does not fit on the current row wraps to the next row
    /// carrying its own width; a row filled to exactly the terminal width
    /// wraps to column 0 of the following row.
    fn calculate_position(&self, text: &str, orig: Position) -> Position {
        let cols = self.col();
        let mut pos = orig;
        for grapheme in text.graphemes(true) {
            if grapheme == "\n" {
                pos.row += 1;
                pos.col = 0;
                continue;
            }
            let width = grapheme_width(grapheme);
            pos.col += width;
            if pos.col > cols {
                pos.row += 1;
                pos.col = width;
            }
        }
        if pos.col == cols {
            pos.row += 1;
            pos.col = 0;
        }
        pos
    }

    /// Authoritative layout for the current buffer contents.
    fn compute_layout(&self, prompt_size: Position, line: &LineBuffer) -> Layout {
        let cursor = self.calculate_position(&line.pos_buffer(), prompt_size);
        let end = if line.pos() == line.len() {
            cursor
        } else {
            self.calculate_position(&line.post_buffer(), cursor)
        };
        Layout {
            prompt_size,
            cursor,
            end,
        }
    }
}

/// In-memory terminal with a fixed width, for deterministic tests and
/// headless hosts. Records every raw write and cursor move, and tracks the
/// currently displayed text alongside the physical cursor.
#[derive(Debug, Clone)]
pub struct VirtualTty {
    cols: usize,
    writes: Vec<String>,
    display: String,
    cursor: Position,
    refreshes: usize,
    cursor_moves: usize,
}

impl VirtualTty {
    pub fn new(cols: usize) -> Self {
        Self {
            cols,
            writes: Vec::new(),
            display: String::new(),
            cursor: Position::default(),
            refreshes: 0,
            cursor_moves: 0,
        }
    }

    /// Raw text fragments sent through `write`, in order.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    /// Prompt and buffer text as currently displayed.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Physical cursor, prompt-relative.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    pub fn cursor_move_count(&self) -> usize {
        self.cursor_moves
    }
}

impl Tty for VirtualTty {
    fn col(&self) -> usize {
        self.cols
    }

    fn write(&mut self, text: &str) {
        self.writes.push(text.to_string());
        self.display.push_str(text);
        self.cursor = self.calculate_position(text, self.cursor);
    }

    fn move_cursor(&mut self, _old: Position, new: Position) {
        self.cursor = new;
        self.cursor_moves += 1;
    }

    fn refresh_line(&mut self, prompt: &str, line: &LineBuffer, _old: &Layout, new: &Layout) {
        self.display.clear();
        self.display.push_str(prompt);
        self.display.push_str(&line.buffer());
        self.cursor = new.cursor;
        self.refreshes += 1;
    }
}
