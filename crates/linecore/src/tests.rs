use crate::history::History;
use crate::layout::Position;
use crate::line::LineBuffer;
use crate::state::State;
use crate::tty::{Tty, VirtualTty};

#[test]
fn test_fast_path_matches_full_refresh() {
    let mut tty_fast = VirtualTty::new(80);
    let mut history_fast = History::new();
    {
        let mut state = State::new("> ", &mut tty_fast, &mut history_fast);
        state.refresh();
        for c in ["h", "e", "l", "l", "o"] {
            state.edit_insert(c);
        }
        let mut tty_full = VirtualTty::new(80);
        let mut history_full = History::new();
        let mut full = State::new("> ", &mut tty_full, &mut history_full);
        full.refresh();
        full.update("hello");
        assert_eq!(state.layout().cursor, full.layout().cursor);
        assert_eq!(state.layout().end, full.layout().end);
    }
    // Only the initial prompt paint refreshed; the characters went out raw
    assert_eq!(tty_fast.refresh_count(), 1);
    assert_eq!(tty_fast.writes(), ["h", "e", "l", "l", "o"]);
    assert_eq!(tty_fast.display(), "> hello");
    assert_eq!(tty_fast.cursor(), Position::new(0, 7));
}

#[test]
fn test_fast_path_example() {
    // Walkthrough: prompt "> " on an 80 column terminal
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("hi");
        assert_eq!(state.layout().cursor, Position::new(0, 4));
        assert_eq!(state.layout().end, Position::new(0, 4));

        state.edit_backspace(1);
        assert_eq!(state.buffer(), "h");
        assert_eq!(state.layout().cursor, Position::new(0, 3));
        assert_eq!(state.layout().end, Position::new(0, 3));
    }
    assert_eq!(tty.writes(), ["hi"]);
    assert_eq!(tty.refresh_count(), 2);
    assert_eq!(tty.display(), "> h");
}

#[test]
fn test_newline_insert_always_refreshes() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("ab\ncd");
        assert_eq!(state.layout().cursor, Position::new(1, 2));
        assert_eq!(state.layout().end, Position::new(1, 2));
    }
    assert!(tty.writes().is_empty());
    assert_eq!(tty.refresh_count(), 2);
    assert_eq!(tty.display(), "> ab\ncd");
}

#[test]
fn test_insert_filling_row_exactly_refreshes() {
    // Strict comparison: a column landing exactly on the terminal width
    // must not take the fast path
    let mut tty = VirtualTty::new(4);
    let mut history = History::new();
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("a");
        state.edit_insert("b");
        assert_eq!(state.layout().cursor, Position::new(1, 0));
    }
    // "a" still fit on the row; "b" landed the column exactly on the width
    assert_eq!(tty.writes(), ["a"]);
    assert_eq!(tty.refresh_count(), 2);
}

#[test]
fn test_wide_glyph_overflowing_row_refreshes() {
    let mut tty = VirtualTty::new(4);
    let mut history = History::new();
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        // width 2 would land the column exactly on the terminal width
        state.edit_insert("世");
        assert_eq!(state.layout().cursor, Position::new(1, 0));
        assert_eq!(state.layout().end, Position::new(1, 0));
    }
    assert!(tty.writes().is_empty());
    assert_eq!(tty.refresh_count(), 2);
}

#[test]
fn test_wide_glyphs_take_fast_path_when_room_remains() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("世");
        state.edit_insert("界");
        assert_eq!(state.layout().cursor, Position::new(0, 6));
        assert_eq!(state.layout().end, Position::new(0, 6));
    }
    assert_eq!(tty.writes(), ["世", "界"]);
    assert_eq!(tty.refresh_count(), 1);
}

#[test]
fn test_zero_width_insert_refreshes() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("e");
        // Combining mark: rendered width 0, must not advance the column
        state.edit_insert("\u{301}");
        assert_eq!(state.layout().cursor, Position::new(0, 3));
    }
    assert_eq!(tty.writes(), ["e"]);
    assert_eq!(tty.refresh_count(), 2);
}

#[test]
fn test_mid_line_insert_refreshes() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("abc");
        state.move_cursor_back(1);
        state.edit_insert("x");
        assert_eq!(state.buffer(), "abxc");
        assert_eq!(state.layout().cursor, Position::new(0, 5));
        assert_eq!(state.layout().end, Position::new(0, 6));
    }
    // "abc" went out raw; the mid-line edit forced a redraw
    assert_eq!(tty.writes(), ["abc"]);
    assert_eq!(tty.display(), "> abxc");
}

#[test]
fn test_move_cursor_is_idempotent() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("abc");
        state.move_cursor_back(1);
        // Logical cursor unchanged since the last reconcile: no write
        state.move_cursor();
        state.move_cursor();
    }
    assert_eq!(tty.cursor_move_count(), 1);
    assert_eq!(tty.cursor(), Position::new(0, 4));
}

#[test]
fn test_motion_at_buffer_edges_writes_nothing() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("ab");
        state.move_cursor_forward(1);
        state.move_cursor_back(5);
        state.move_cursor_back(1);
    }
    // Forward at the end and back at the start report no motion
    assert_eq!(tty.cursor_move_count(), 1);
    assert_eq!(tty.cursor(), Position::new(0, 2));
}

#[test]
fn test_previous_history_at_oldest_is_noop() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    history.add("only");
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.previous_history();
        assert_eq!(state.buffer(), "only");
        state.previous_history();
        assert_eq!(state.buffer(), "only");
    }
    // Initial paint plus exactly one recall
    assert_eq!(tty.refresh_count(), 2);
}

#[test]
fn test_next_history_when_not_browsing_is_noop() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    history.add("one");
    history.add("two");
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.next_history();
        assert_eq!(state.buffer(), "");
    }
    assert_eq!(tty.refresh_count(), 1);
}

#[test]
fn test_next_history_past_newest_clears_draft() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    history.add("recalled");
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("draft");
        state.previous_history();
        assert_eq!(state.buffer(), "recalled");
        state.next_history();
        // The pre-browsing draft is deliberately not restored
        assert_eq!(state.buffer(), "");
        assert_eq!(state.layout().cursor, Position::new(0, 2));
    }
    assert_eq!(tty.display(), "> ");
}

#[test]
fn test_history_walk_forward_returns_newer_entry() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    history.add("first");
    history.add("second");
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.previous_history();
        state.previous_history();
        assert_eq!(state.buffer(), "first");
        state.next_history();
        assert_eq!(state.buffer(), "second");
    }
}

#[test]
fn test_up_on_single_line_recalls_history() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    history.add("older");
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("draft");
        state.move_cursor_up(1);
        // No vertical room in a single-line buffer: the draft is replaced
        assert_eq!(state.buffer(), "older");
    }
}

#[test]
fn test_up_inside_multiline_moves_before_recalling() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    history.add("older");
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("ab\ncd");
        state.move_cursor_up(1);
        // Still inside the buffer: cursor climbed one line, content kept
        assert_eq!(state.buffer(), "ab\ncd");
        assert_eq!(state.layout().cursor, Position::new(0, 4));
        state.move_cursor_up(1);
        // On the first line the same key browses history instead
        assert_eq!(state.buffer(), "older");
    }
}

#[test]
fn test_down_inside_multiline_moves_before_browsing() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    history.add("entry");
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("ab\ncd");
        state.move_cursor_up(1);
        state.move_cursor_down(1);
        assert_eq!(state.buffer(), "ab\ncd");
        assert_eq!(state.layout().cursor, Position::new(1, 2));
        // On the last line, down browses forward; not browsing yet: no-op
        state.move_cursor_down(1);
        assert_eq!(state.buffer(), "ab\ncd");
    }
}

#[test]
fn test_layout_always_matches_full_recompute() {
    let mut tty = VirtualTty::new(10);
    let mut history = History::new();
    history.add("from history");
    let (buffer, pos, layout) = {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("hello");
        state.edit_insert(" world");
        state.move_cursor_back(3);
        state.edit_backspace(2);
        state.edit_insert("縦\n横");
        state.move_cursor_forward(1);
        (state.buffer(), state.pos(), state.layout().clone())
    };
    let mut check = LineBuffer::new();
    check.update(&buffer, pos);
    assert_eq!(tty.compute_layout(Position::new(0, 2), &check), layout);
    assert!(layout.cursor <= layout.end);
}

#[test]
fn test_update_places_cursor_after_last_char() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.update("こんにちは");
        assert_eq!(state.pos(), 5);
        assert_eq!(state.layout().cursor, Position::new(0, 12));
        assert_eq!(state.layout().end, Position::new(0, 12));
    }
    assert_eq!(tty.display(), "> こんにちは");
}

#[test]
fn test_wrapped_line_layout() {
    let mut tty = VirtualTty::new(4);
    let mut history = History::new();
    {
        let mut state = State::new("> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("abcd");
        assert_eq!(state.layout().cursor, Position::new(1, 2));
        assert_eq!(state.layout().end, Position::new(1, 2));
    }
    assert_eq!(tty.display(), "> abcd");
    assert_eq!(tty.cursor(), Position::new(1, 2));
}

#[test]
fn test_multiline_prompt_offsets_layout() {
    let mut tty = VirtualTty::new(80);
    let mut history = History::new();
    {
        let mut state = State::new("one\ntwo> ", &mut tty, &mut history);
        state.refresh();
        state.edit_insert("x");
        assert_eq!(state.layout().prompt_size, Position::new(1, 5));
        assert_eq!(state.layout().cursor, Position::new(1, 6));
    }
}
