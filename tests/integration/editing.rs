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
// TESTS: 14
// =====
//
// Editing flows driven through key events and raw actions.

use crate::helpers::{Recorder, alt, ctrl, editor, key, lines, press, type_keys};
use crossterm::event::{KeyCode, KeyModifiers};
use pretty_assertions::assert_eq;
use termline::editor::{Action, Outcome, Position, ReadlineBuilder};

#[test]
fn typed_keys_build_multi_line_input() {
    let mut rl = editor(40);
    type_keys(&mut rl, "hi\nx");
    assert_eq!(lines(&rl), vec!["hi", "x"]);
    assert_eq!(rl.buffer().cursor(), Position::new(1, 1));
    assert_eq!(rl.all_text(), "hi\nx");
}

#[test]
fn backspace_scenario_ends_with_bell() {
    let mut rl = editor(40);
    rl.set_text("ab");
    assert_eq!(press(&mut rl, key(KeyCode::Backspace, KeyModifiers::NONE)), Outcome::Handled);
    assert_eq!(lines(&rl), vec!["a"]);
    assert_eq!(rl.buffer().cursor(), Position::new(1, 0));
    assert_eq!(press(&mut rl, ctrl('h')), Outcome::Handled);
    assert_eq!(lines(&rl), vec![""]);
    assert_eq!(rl.buffer().cursor(), Position::ZERO);
    assert_eq!(press(&mut rl, ctrl('h')), Outcome::CouldNotPerform);
    assert_eq!(rl.terminal().beeps, 1);
}

#[test]
fn backspace_joins_lines() {
    let mut rl = editor(40);
    rl.set_text("ab\n");
    press(&mut rl, key(KeyCode::Backspace, KeyModifiers::NONE));
    assert_eq!(lines(&rl), vec!["ab"]);
    assert_eq!(rl.buffer().cursor(), Position::new(2, 0));
}

#[test]
fn numeric_argument_repeats_motion() {
    let mut rl = editor(40);
    rl.set_text("abcdef");
    assert_eq!(press(&mut rl, alt('3')), Outcome::Handled);
    press(&mut rl, ctrl('b'));
    assert_eq!(rl.buffer().cursor(), Position::new(3, 0));
    press(&mut rl, key(KeyCode::Delete, KeyModifiers::NONE));
    assert_eq!(rl.all_text(), "abcef");
}

#[test]
fn numeric_argument_repeats_typed_text() {
    let mut rl = editor(40);
    press(&mut rl, alt('4'));
    type_keys(&mut rl, "z");
    assert_eq!(rl.all_text(), "zzzz");
}

#[test]
fn long_numeric_argument_is_capped() {
    let mut rl = editor(40);
    for _ in 0..25 {
        assert_eq!(press(&mut rl, alt('9')), Outcome::Handled);
    }
    assert_eq!(press(&mut rl, key(KeyCode::Char('z'), KeyModifiers::NONE)), Outcome::Handled);
    assert_eq!(rl.all_text().len(), 10_000);
}

#[test]
fn vertical_motion_over_wrapped_line_keeps_column() {
    // "$ abcdefgh" fills the first row; "ijkl" wraps onto the second.
    let mut rl = editor(10);
    rl.set_text("abcdefghijkl");
    assert_eq!(press(&mut rl, key(KeyCode::Up, KeyModifiers::NONE)), Outcome::Handled);
    assert_eq!(rl.buffer().cursor(), Position::new(4, 0));
    assert_eq!(press(&mut rl, ctrl('n')), Outcome::Handled);
    assert_eq!(rl.buffer().cursor(), Position::new(12, 0));
}

#[test]
fn vertical_motion_works_with_prompt_wider_than_screen() {
    let mut rl = ReadlineBuilder::new()
        .prompt("123456789")
        .continuation_prompt("abcdefghi")
        .mark_prompts(false)
        .build(Recorder::new(8));
    rl.set_text("ab\ncd");
    rl.perform_action(Action::CursorLeft, 2).unwrap();
    assert_eq!(rl.buffer().cursor(), Position::new(0, 1));
    let rows = rl.screen_lines().unwrap();
    assert_eq!(rows.iter().filter(|row| row.cursor_cell.is_some()).count(), 1);
    assert_eq!(press(&mut rl, key(KeyCode::Up, KeyModifiers::NONE)), Outcome::Handled);
    assert_eq!(rl.buffer().cursor(), Position::new(1, 0));
}

#[test]
fn moving_down_onto_shorter_line_lands_at_its_end() {
    let mut rl = editor(40);
    rl.set_text("abcdefg\nxyz");
    rl.perform_action(Action::CursorUp, 1).unwrap();
    rl.perform_action(Action::CursorRight, 2).unwrap();
    assert_eq!(rl.buffer().cursor(), Position::new(5, 0));
    rl.perform_action(Action::CursorDown, 1).unwrap();
    assert_eq!(rl.buffer().cursor(), Position::new(3, 1));
}

#[test]
fn vertical_motion_at_edge_rings_bell() {
    let mut rl = editor(40);
    rl.set_text("one\ntwo");
    assert_eq!(press(&mut rl, key(KeyCode::Down, KeyModifiers::NONE)), Outcome::CouldNotPerform);
    assert_eq!(press(&mut rl, ctrl('p')), Outcome::Handled);
    assert_eq!(rl.buffer().cursor(), Position::new(3, 0));
    assert_eq!(press(&mut rl, ctrl('p')), Outcome::CouldNotPerform);
    assert_eq!(rl.terminal().beeps, 2);
}

#[test]
fn enter_accepts_and_ctrl_d_ends_on_empty_line() {
    let mut rl = editor(40);
    type_keys(&mut rl, "ls");
    assert_eq!(press(&mut rl, key(KeyCode::Enter, KeyModifiers::NONE)), Outcome::Accepted);
    assert_eq!(rl.all_text(), "ls");

    rl.reset_text();
    assert_eq!(press(&mut rl, ctrl('d')), Outcome::EndOfStream);
}

#[test]
fn ctrl_d_on_non_empty_line_accepts() {
    let mut rl = editor(40);
    type_keys(&mut rl, "exit");
    assert_eq!(press(&mut rl, ctrl('d')), Outcome::Accepted);
    assert!(Outcome::Accepted.ends_session());
}

#[test]
fn abort_starts_a_fresh_line() {
    let mut rl = editor(40);
    type_keys(&mut rl, "half typed\nthing");
    rl.terminal_mut().take_output();
    assert_eq!(press(&mut rl, ctrl('c')), Outcome::Handled);
    assert!(rl.buffer().is_empty());
    assert!(rl.terminal().output.starts_with("\r\n"));
    assert_eq!(rl.last_action(), Action::Nil);
}

#[test]
fn bracketed_paste_is_inserted_in_one_piece() {
    let mut rl = editor(40);
    type_keys(&mut rl, "> ");
    assert_eq!(rl.on_text("first\r\n", true).unwrap(), Outcome::Handled);
    assert_eq!(rl.on_text("second", true).unwrap(), Outcome::Handled);
    assert_eq!(lines(&rl), vec!["> "]);
    rl.on_text("", false).unwrap();
    assert_eq!(lines(&rl), vec!["> first", "second"]);
    assert_eq!(rl.last_action(), Action::AddText);
}
