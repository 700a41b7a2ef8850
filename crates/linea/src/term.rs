use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{MoveDown, MoveToColumn, MoveUp},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use linecore::{Layout, LineBuffer, Position, Tty};

/// Crossterm-backed terminal. Commands are queued and flushed once per
/// operation. Failures are logged and swallowed: the editor treats writes
/// as fire-and-forget, and a failing terminal has no useful recovery path
/// mid-keystroke anyway.
pub struct CrosstermTty {
    out: Stdout,
}

impl CrosstermTty {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            log::error!("terminal flush failed: {}", e);
        }
    }
}

impl Default for CrosstermTty {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw mode turns off output post-processing, so a bare `\n` only moves
/// down a row; every logical newline needs an explicit carriage return.
fn raw_newlines(text: &str) -> String {
    text.replace('\n', "\r\n")
}

impl Tty for CrosstermTty {
    fn col(&self) -> usize {
        match terminal::size() {
            Ok((cols, _)) => cols as usize,
            Err(e) => {
                log::warn!("terminal size query failed, assuming 80 columns: {}", e);
                80
            }
        }
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = queue!(self.out, Print(text)) {
            log::error!("terminal write failed: {}", e);
        }
        self.flush();
    }

    fn move_cursor(&mut self, old: Position, new: Position) {
        let result = (|| -> io::Result<()> {
            if new.row > old.row {
                queue!(self.out, MoveDown((new.row - old.row) as u16))?;
            } else if new.row < old.row {
                queue!(self.out, MoveUp((old.row - new.row) as u16))?;
            }
            queue!(self.out, MoveToColumn(new.col as u16))?;
            Ok(())
        })();
        if let Err(e) = result {
            log::error!("terminal cursor move failed: {}", e);
        }
        self.flush();
    }

    fn refresh_line(&mut self, prompt: &str, line: &LineBuffer, old: &Layout, new: &Layout) {
        let result = (|| -> io::Result<()> {
            // Walk down to the last row the old layout drew, then erase
            // every row upward until the prompt's first row.
            let below = old.end.row.saturating_sub(old.cursor.row);
            if below > 0 {
                queue!(self.out, MoveDown(below as u16))?;
            }
            for _ in 0..old.end.row {
                queue!(
                    self.out,
                    MoveToColumn(0),
                    Clear(ClearType::UntilNewLine),
                    MoveUp(1)
                )?;
            }
            queue!(self.out, MoveToColumn(0), Clear(ClearType::UntilNewLine))?;

            queue!(
                self.out,
                Print(raw_newlines(prompt)),
                Print(raw_newlines(&line.buffer()))
            )?;
            // The terminal defers the wrap when a row fills exactly; force
            // it so the cursor lands where the layout says.
            if new.end.col == 0 && new.end.row > 0 {
                queue!(self.out, Print("\r\n"))?;
            }

            let up = new.end.row.saturating_sub(new.cursor.row);
            if up > 0 {
                queue!(self.out, MoveUp(up as u16))?;
            }
            queue!(self.out, MoveToColumn(new.cursor.col as u16))?;
            Ok(())
        })();
        if let Err(e) = result {
            log::error!("terminal refresh failed: {}", e);
        }
        self.flush();
    }
}
