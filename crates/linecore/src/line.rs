use ropey::Rope;

/// Logical text buffer for one edited input (which may itself contain
/// newlines), with the cursor tracked as a char offset into the text.
///
/// The buffer knows nothing about display wrapping; translating the char
/// offset into a screen position is the terminal's job.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    rope: Rope,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            cursor: 0,
        }
    }

    pub fn buffer(&self) -> String {
        self.rope.to_string()
    }

    /// Text from the start of the buffer up to the cursor.
    pub fn pos_buffer(&self) -> String {
        self.rope.slice(..self.cursor).to_string()
    }

    /// Text from the cursor to the end of the buffer.
    pub fn post_buffer(&self) -> String {
        self.rope.slice(self.cursor..).to_string()
    }

    pub fn pos(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Insert `text` at the cursor and advance the cursor past it.
    ///
    /// Returns true only for a pure append, i.e. the cursor sat at the end
    /// of the buffer before the insertion. That is the one case where the
    /// caller may echo the text without redrawing the tail of the line.
    pub fn insert(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let push = self.cursor == self.rope.len_chars();
        self.rope.insert(self.cursor, text);
        self.cursor += text.chars().count();
        push
    }

    /// Replace the whole contents and place the cursor at char offset `pos`,
    /// clamped to the new length.
    pub fn update(&mut self, text: &str, pos: usize) {
        self.rope = Rope::from_str(text);
        self.cursor = pos.min(self.rope.len_chars());
    }

    /// Delete up to `n` chars before the cursor. Returns whether any
    /// deletion occurred.
    pub fn backspace(&mut self, n: usize) -> bool {
        let n = n.min(self.cursor);
        if n == 0 {
            return false;
        }
        self.rope.remove(self.cursor - n..self.cursor);
        self.cursor -= n;
        true
    }

    /// Move the cursor back up to `n` chars. Returns whether it moved.
    pub fn move_back(&mut self, n: usize) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor = self.cursor.saturating_sub(n);
        true
    }

    /// Move the cursor forward up to `n` chars. Returns whether it moved.
    pub fn move_forward(&mut self, n: usize) -> bool {
        if self.cursor == self.rope.len_chars() {
            return false;
        }
        self.cursor = self.cursor.saturating_add(n).min(self.rope.len_chars());
        true
    }

    /// Move the cursor up `n` logical lines, keeping the char column where
    /// the target line is long enough. Returns false on the first line.
    pub fn move_line_up(&mut self, n: usize) -> bool {
        let line = self.rope.char_to_line(self.cursor);
        if line == 0 {
            return false;
        }
        let col = self.cursor - self.rope.line_to_char(line);
        let target = line.saturating_sub(n);
        self.cursor = self.rope.line_to_char(target) + col.min(self.line_len(target));
        true
    }

    /// Move the cursor down `n` logical lines. Returns false on the last
    /// line.
    pub fn move_line_down(&mut self, n: usize) -> bool {
        let line = self.rope.char_to_line(self.cursor);
        let last = self.rope.len_lines().saturating_sub(1);
        if line >= last {
            return false;
        }
        let col = self.cursor - self.rope.line_to_char(line);
        let target = (line + n).min(last);
        self.cursor = self.rope.line_to_char(target) + col.min(self.line_len(target));
        true
    }

    /// Content length of a line in chars, excluding its trailing newline.
    fn line_len(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len -= 1;
        }
        len
    }
}
