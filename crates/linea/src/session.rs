use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use linecore::{History, State, Tty};

use crate::config::Config;
use crate::term::CrosstermTty;

/// How a `read_line` call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A complete line was accepted with Enter.
    Line(String),
    /// The line was cancelled with Ctrl+C.
    Interrupted,
    /// End of input was requested with Ctrl+D on an empty line.
    Eof,
}

/// One interactive session: configuration, command history, and the
/// terminal, shared across successive `read_line` calls.
pub struct Session {
    config: Config,
    history: History,
    tty: CrosstermTty,
}

impl Session {
    pub async fn new() -> Result<Self> {
        let config = Config::load().await?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        let history = History::with_capacity(config.history.max_entries)
            .ignore_duplicates(config.history.ignore_duplicates);
        Self {
            config,
            history,
            tty: CrosstermTty::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Read one line with the session prompt. Raw mode is enabled for the
    /// duration of the call and restored on every exit path.
    pub fn read_line(&mut self) -> Result<ReadOutcome> {
        enable_raw_mode()?;
        let result = self.read_line_inner();
        disable_raw_mode()?;
        result
    }

    fn read_line_inner(&mut self) -> Result<ReadOutcome> {
        let prompt = self.config.prompt.clone();
        let tab = " ".repeat(self.config.editor.tab_width);
        let outcome = {
            let mut state = State::new(&prompt, &mut self.tty, &mut self.history);
            state.refresh();
            loop {
                match event::read()? {
                    Event::Key(key) => {
                        if let Some(outcome) = apply_key(&mut state, key, &tab) {
                            break outcome;
                        }
                    }
                    Event::Resize(_, _) => {
                        log::debug!("terminal resized");
                        state.refresh();
                    }
                    _ => {}
                }
            }
        };
        match &outcome {
            ReadOutcome::Line(line) => {
                self.history.add(line);
                self.tty.write("\r\n");
            }
            ReadOutcome::Interrupted => self.tty.write("\r\n"),
            ReadOutcome::Eof => {}
        }
        Ok(outcome)
    }
}

/// Apply one decoded key to the editor state. Returns `Some` when the key
/// finishes the read.
fn apply_key<T: Tty>(state: &mut State<'_, T>, key: KeyEvent, tab: &str) -> Option<ReadOutcome> {
    match key.code {
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            // Compose a multi-line entry instead of accepting it
            state.edit_insert("\n");
            None
        }
        KeyCode::Enter => {
            move_to_end(state);
            Some(ReadOutcome::Line(state.buffer()))
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            move_to_end(state);
            Some(ReadOutcome::Interrupted)
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if state.is_empty() {
                Some(ReadOutcome::Eof)
            } else {
                None
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.edit_backspace(state.pos());
            None
        }
        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.move_cursor_back(state.pos());
            None
        }
        KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            move_to_end(state);
            None
        }
        KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.previous_history();
            None
        }
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.next_history();
            None
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.edit_insert(&c.to_string());
            None
        }
        KeyCode::Tab => {
            state.edit_insert(tab);
            None
        }
        KeyCode::Backspace => {
            state.edit_backspace(1);
            None
        }
        KeyCode::Left => {
            state.move_cursor_back(1);
            None
        }
        KeyCode::Right => {
            state.move_cursor_forward(1);
            None
        }
        KeyCode::Up => {
            state.move_cursor_up(1);
            None
        }
        KeyCode::Down => {
            state.move_cursor_down(1);
            None
        }
        KeyCode::Home => {
            state.move_cursor_back(state.pos());
            None
        }
        KeyCode::End => {
            move_to_end(state);
            None
        }
        _ => None,
    }
}

fn move_to_end<T: Tty>(state: &mut State<'_, T>) {
    let remaining = state.len() - state.pos();
    if remaining > 0 {
        state.move_cursor_forward(remaining);
    }
}
