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
// TESTS: 10
// =====
//
// What reaches the terminal: redraw sequences, prompt markers, session
// start/end, resizes.

use crate::helpers::{Recorder, ctrl, editor, type_keys};
use pretty_assertions::assert_eq;
use termline::editor::{Outcome, ReadlineBuilder};

#[test]
fn start_enables_paste_and_draws_prompt() {
    let mut rl = editor(40);
    rl.start().unwrap();
    let out = rl.terminal_mut().take_output();
    assert!(out.contains("\x1b[?2004h"));
    assert!(out.ends_with("\r\x1b[J\x1b[?7l$ \x1b[?7h\x1b[3G"));
}

#[test]
fn every_redraw_is_one_atomic_update() {
    let mut rl = editor(40);
    type_keys(&mut rl, "abc");
    let term = rl.terminal();
    assert_eq!(term.updates_begun, 3);
    assert_eq!(term.updates_ended, 3);
}

#[test]
fn redraw_returns_to_first_row_of_previous_draw() {
    let mut rl = editor(40);
    rl.set_text("a\nb");
    rl.redraw().unwrap();
    rl.terminal_mut().take_output();
    type_keys(&mut rl, "c");
    let out = rl.terminal_mut().take_output();
    assert!(out.starts_with("\x1b[1A\r\x1b[J"), "{out:?}");
    assert!(out.contains("$ a\r\n"));
}

#[test]
fn highlighter_colours_each_row() {
    let mut rl = ReadlineBuilder::new()
        .prompt("$ ")
        .mark_prompts(false)
        .highlighter(|text, _, _| text.to_uppercase())
        .build(Recorder::new(40));
    type_keys(&mut rl, "ab");
    assert!(rl.terminal().output.contains("$ AB"));
    assert_eq!(rl.all_text(), "ab");
}

#[test]
fn marked_prompts_carry_semantic_markers() {
    let mut rl = ReadlineBuilder::new().prompt("$ ").build(Recorder::new(40));
    rl.start().unwrap();
    type_keys(&mut rl, "a\nb");
    let out = rl.terminal_mut().take_output();
    assert!(out.contains("\x1b]133;A\x1b\\$ a"));
    assert!(out.contains("\r\n\x1b]133;A;k=s\x1b\\"));
}

#[test]
fn end_moves_below_input_and_marks_output() {
    let mut rl = ReadlineBuilder::new().prompt("$ ").build(Recorder::new(40));
    rl.set_text("a\nb");
    assert_eq!(rl.on_key_event(ctrl('p')).unwrap(), Outcome::Handled);
    rl.terminal_mut().take_output();
    rl.end().unwrap();
    let out = rl.terminal_mut().take_output();
    assert!(out.starts_with("\x1b[1B"), "{out:?}");
    assert!(out.ends_with("\x1b[?2004l\r\n\x1b]133;C\x1b\\"), "{out:?}");
}

#[test]
fn clear_screen_redraws_from_top() {
    let mut rl = editor(40);
    rl.set_text("a\nb");
    rl.redraw().unwrap();
    rl.terminal_mut().take_output();
    assert_eq!(rl.on_key_event(ctrl('l')).unwrap(), Outcome::Handled);
    assert_eq!(rl.terminal().clears, 1);
    assert!(rl.terminal().output.starts_with("\r\x1b[J"));
}

#[test]
fn resize_relayouts_at_new_width() {
    let mut rl = editor(40);
    rl.set_text(&"x".repeat(30));
    assert_eq!(rl.screen_lines().unwrap().len(), 1);
    rl.terminal_mut().width = 10;
    assert_eq!(rl.screen_lines().unwrap().len(), 1);
    rl.on_resize().unwrap();
    let rows = rl.screen_lines().unwrap();
    let texts: Vec<&str> = rows.iter().map(|row| row.text).collect();
    assert_eq!(texts, vec!["xxxxxxxx", "xxxxxxxxxx", "xxxxxxxxxx", "xx"]);
}

#[test]
fn wide_characters_wrap_whole() {
    let mut rl = editor(6);
    type_keys(&mut rl, "日本語");
    let rows = rl.screen_lines().unwrap();
    let texts: Vec<&str> = rows.iter().map(|row| row.text).collect();
    assert_eq!(texts, vec!["日本", "語"]);
    assert_eq!(rows[1].cursor_cell, Some(2));
}

#[test]
fn too_narrow_screen_edits_without_drawing() {
    let mut rl = editor(3);
    type_keys(&mut rl, "ok");
    assert_eq!(rl.all_text(), "ok");
    assert_eq!(rl.terminal().output, "");
}
