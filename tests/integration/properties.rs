// termline — A multi-line readline engine for terminal command input
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

// =====
// TESTS: 7
// =====
//
// Property tests over arbitrary buffers and screen widths.

use crate::helpers::editor;
use proptest::prelude::*;
use termline::editor::prompt::{Prompt, Prompts};
use termline::editor::{Action, Outcome, Position, TextBuffer, screen};
use termline::term::cells::cells;

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z ]{0,40}",
        "[a-z .\\-\n]{0,80}",
        "[a-z é日\u{1F600}\n]{0,60}",
    ]
}

/// Every position a cursor may occupy in `buffer`.
fn positions(buffer: &TextBuffer) -> Vec<Position> {
    let mut out = Vec::new();
    for (y, line) in buffer.lines().iter().enumerate() {
        out.extend(line.char_indices().map(|(x, _)| Position::new(x, y)));
        out.push(Position::new(line.len(), y));
    }
    out
}

fn prompts(primary: &str, continuation: &str) -> Prompts {
    Prompts {
        primary: Prompt::new(primary, false, false),
        continuation: Prompt::new(continuation, true, false),
    }
}

proptest! {
    #[test]
    fn erase_then_insert_restores_lines(
        text in text_strategy(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let mut buffer = TextBuffer::from_text(&text);
        let all = positions(&buffer);
        let (start, end) = (all[a.index(all.len())], all[b.index(all.len())]);
        prop_assume!(start < end);
        let lines_before = buffer.lines().to_vec();

        buffer.set_cursor(start);
        let erased = buffer.erase_range(start, end);
        prop_assert_eq!(buffer.cursor(), start);
        buffer.insert(&erased);
        prop_assert_eq!(buffer.lines(), lines_before.as_slice());
        prop_assert_eq!(buffer.cursor(), end);
    }

    #[test]
    fn zero_count_motions_change_nothing(
        text in text_strategy(),
        at in any::<prop::sample::Index>(),
    ) {
        use termline::editor::WordClass;
        let mut buffer = TextBuffer::from_text(&text);
        let all = positions(&buffer);
        buffer.set_cursor(all[at.index(all.len())]);
        let before = buffer.clone();

        prop_assert_eq!(buffer.move_left(0, true), 0);
        prop_assert_eq!(buffer.move_right(0, true), 0);
        prop_assert_eq!(buffer.move_to_end_of_word(0, true, WordClass::Alphanumeric), 0);
        prop_assert_eq!(buffer.move_to_start_of_word(0, true, WordClass::NonSpace), 0);
        prop_assert_eq!(buffer, before);
    }

    #[test]
    fn motion_at_line_edges_without_traversal_is_a_no_op(text in text_strategy(), n in 1usize..5) {
        let mut buffer = TextBuffer::from_text(&text);
        for y in 0..buffer.line_count() {
            buffer.set_cursor(Position::new(0, y));
            let before = buffer.clone();
            prop_assert_eq!(buffer.move_left(n, false), 0);
            prop_assert_eq!(&buffer, &before);

            let end = Position::new(buffer.lines()[y].len(), y);
            buffer.set_cursor(end);
            let before = buffer.clone();
            prop_assert_eq!(buffer.move_right(n, false), 0);
            prop_assert_eq!(&buffer, &before);
        }
    }

    #[test]
    fn kill_then_yank_round_trips(text in "[a-z é日]{1,30}", back in 0usize..40) {
        let mut rl = editor(20);
        rl.set_text(&text);
        rl.perform_action(Action::CursorLeft, back).unwrap();
        let cursor = rl.buffer().cursor();
        prop_assume!(cursor.x > 0);

        rl.perform_action(Action::KillToStartOfLine, 1).unwrap();
        rl.perform_action(Action::Yank, 1).unwrap();
        prop_assert_eq!(rl.all_text(), text);
        prop_assert_eq!(rl.buffer().cursor(), cursor);
    }

    #[test]
    fn projection_covers_every_line_with_one_cursor(
        text in text_strategy(),
        at in any::<prop::sample::Index>(),
        primary in "[$>]{0,12}",
        continuation in "[.]{0,12}",
        width in 1usize..30,
    ) {
        let mut buffer = TextBuffer::from_text(&text);
        let all = positions(&buffer);
        buffer.set_cursor(all[at.index(all.len())]);
        let p = prompts(&primary, &continuation);
        let rows = screen::project(buffer.lines(), buffer.cursor(), &p, width);

        let with_cursor: Vec<_> = rows.iter().filter(|row| row.cursor_cell.is_some()).collect();
        prop_assert_eq!(with_cursor.len(), 1);
        prop_assert!(with_cursor[0].cursor_cell.unwrap_or(0) < width);
        for (y, line) in buffer.lines().iter().enumerate() {
            let joined: String =
                rows.iter().filter(|row| row.parent_line_number == y).map(|row| row.text).collect();
            prop_assert_eq!(&joined, line);
        }
        for row in &rows {
            let room = width.saturating_sub(row.prompt_length());
            prop_assert!(row.text_width <= room || cells(row.text).count() == 1);
        }
    }

    #[test]
    fn word_kill_across_lines_then_yank_round_trips(
        text in "[a-z .\\-\n]{1,60}",
        back in 0usize..60,
        action in prop::sample::select(vec![
            Action::KillNextWord,
            Action::KillPreviousWord,
            Action::KillPreviousSpaceDelimitedWord,
        ]),
        count in 1usize..4,
    ) {
        let mut rl = editor(20);
        rl.set_text(&text);
        rl.perform_action(Action::CursorLeft, back).unwrap();
        let cursor = rl.buffer().cursor();

        prop_assume!(rl.perform_action(action, count).unwrap() == Outcome::Handled);
        prop_assert_eq!(rl.perform_action(Action::Yank, 1).unwrap(), Outcome::Handled);
        prop_assert_eq!(rl.all_text(), text);
        if action != Action::KillNextWord {
            prop_assert_eq!(rl.buffer().cursor(), cursor);
        }
    }

    #[test]
    fn vertical_motion_keeps_cursor_valid(
        text in text_strategy(),
        moves in prop::collection::vec(-3isize..=3, 1..10),
        width in 4usize..20,
    ) {
        let mut rl = editor(width);
        rl.set_text(&text);
        for amt in moves {
            let action = if amt < 0 { Action::CursorUp } else { Action::CursorDown };
            rl.perform_action(action, amt.unsigned_abs()).unwrap();
            prop_assert!(rl.buffer().is_valid(rl.buffer().cursor()));
        }
    }
}
