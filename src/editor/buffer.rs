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

use super::position::Position;
use crate::term::cells::cells;
use std::borrow::Cow;

/// The text being edited: logical lines (never containing a line break)
/// plus the cursor. There is always at least one, possibly empty, line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    pub(super) lines: Vec<String>,
    pub(super) cursor: Position,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self { lines: vec![String::new()], cursor: Position::ZERO }
    }

    /// A buffer holding `text` with the cursor at its end.
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.insert(text);
        buffer
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Place the cursor, clamping it into the buffer first.
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.clamp(pos);
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn current_line(&self) -> &str {
        &self.lines[self.cursor.y]
    }

    /// All lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
        self.cursor = Position::ZERO;
    }

    /// Replace the whole contents with `text`, leaving the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        self.insert(text);
        self.move_to_end();
    }

    /// Whether `pos` addresses an existing line at a char boundary.
    #[must_use]
    pub fn is_valid(&self, pos: Position) -> bool {
        self.lines.get(pos.y).is_some_and(|line| line.is_char_boundary(pos.x))
    }

    /// Pull `pos` into the buffer: last line at most, end of line at most,
    /// snapped back to the start of the cluster it falls in.
    #[must_use]
    pub fn clamp(&self, pos: Position) -> Position {
        let y = pos.y.min(self.lines.len() - 1);
        let line = &self.lines[y];
        Position::new(cluster_floor(line, pos.x.min(line.len())), y)
    }

    /// Move the cursor to a position already known to be inside the buffer.
    pub(super) fn place_cursor(&mut self, pos: Position) {
        debug_assert!(self.is_valid(pos), "cursor {pos:?} outside buffer");
        self.cursor = pos;
    }

    #[must_use]
    pub fn text_before_cursor(&self) -> String {
        let Position { x, y } = self.cursor;
        let mut out = String::new();
        for line in &self.lines[..y] {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.lines[y][..x]);
        out
    }

    #[must_use]
    pub fn text_after_cursor(&self) -> String {
        let Position { x, y } = self.cursor;
        let mut out = self.lines[y][x..].to_owned();
        for line in &self.lines[y + 1..] {
            out.push('\n');
            out.push_str(line);
        }
        out
    }

    /// Insert `text` at the cursor, leaving the cursor after it.
    ///
    /// `\r\n` and lone `\r` count as line breaks. A trailing break opens a
    /// new line and the cursor lands at its start.
    pub fn insert(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let text = normalize_line_breaks(text);
        let (body, trailing_break) = match text.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (&*text, false),
        };

        let y = self.cursor.y;
        let tail = self.lines[y].split_off(self.cursor.x);
        let mut segments = body.split('\n');
        if let Some(first) = segments.next() {
            self.lines[y].push_str(first);
        }
        let mut new_lines: Vec<String> = segments.map(str::to_owned).collect();
        if trailing_break {
            new_lines.push(String::new());
        }

        let last = y + new_lines.len();
        self.lines.splice(y + 1..y + 1, new_lines);
        self.cursor = Position::new(self.lines[last].len(), last);
        self.lines[last].push_str(&tail);
    }

    /// Move left by up to `amt` display clusters. Stepping onto the end of
    /// the previous line costs one unit and needs `traverse_breaks`.
    /// Returns the units actually moved.
    pub fn move_left(&mut self, amt: usize, traverse_breaks: bool) -> usize {
        let mut moved = 0;
        while moved < amt {
            if self.cursor.x == 0 {
                if !traverse_breaks || self.cursor.y == 0 {
                    break;
                }
                self.cursor.y -= 1;
                self.cursor.x = self.lines[self.cursor.y].len();
                moved += 1;
                continue;
            }
            let line = &self.lines[self.cursor.y];
            for cluster in cells(&line[..self.cursor.x]).rev() {
                if moved == amt {
                    break;
                }
                self.cursor.x -= cluster.len();
                moved += 1;
            }
        }
        moved
    }

    /// Mirror image of [`move_left`](Self::move_left).
    pub fn move_right(&mut self, amt: usize, traverse_breaks: bool) -> usize {
        let mut moved = 0;
        while moved < amt {
            let line = &self.lines[self.cursor.y];
            if self.cursor.x >= line.len() {
                if !traverse_breaks || self.cursor.y + 1 == self.lines.len() {
                    break;
                }
                self.cursor.y += 1;
                self.cursor.x = 0;
                moved += 1;
                continue;
            }
            for cluster in cells(&line[self.cursor.x..]) {
                if moved == amt {
                    break;
                }
                self.cursor.x += cluster.len();
                moved += 1;
            }
        }
        moved
    }

    pub fn move_to_start_of_line(&mut self) -> bool {
        if self.cursor.x == 0 {
            return false;
        }
        self.cursor.x = 0;
        true
    }

    pub fn move_to_end_of_line(&mut self) -> bool {
        let len = self.lines[self.cursor.y].len();
        if self.cursor.x >= len {
            return false;
        }
        self.cursor.x = len;
        true
    }

    pub fn move_to_start(&mut self) -> bool {
        if self.cursor == Position::ZERO {
            return false;
        }
        self.cursor = Position::ZERO;
        true
    }

    pub fn move_to_end(&mut self) -> bool {
        let last = self.lines.len() - 1;
        let end = Position::new(self.lines[last].len(), last);
        if self.cursor == end {
            return false;
        }
        self.cursor = end;
        true
    }

    /// Remove the text between two positions (in either order) and return it,
    /// line breaks included. The cursor keeps pointing at the same text; if
    /// that text was erased it lands where the range started.
    pub fn erase_range(&mut self, start: Position, end: Position) -> String {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        if start == end {
            return String::new();
        }
        debug_assert!(
            self.is_valid(start) && self.is_valid(end),
            "erase range outside buffer: {start:?}..{end:?}"
        );
        let cursor = self.cursor;

        if start.y == end.y {
            let erased: String = self.lines[start.y].drain(start.x..end.x).collect();
            if cursor.y == start.y && cursor.x >= start.x {
                self.cursor.x = if cursor.x < end.x { start.x } else { cursor.x - erased.len() };
            }
            return erased;
        }

        let tail = self.lines[end.y].split_off(end.x);
        let removed: Vec<String> = self.lines.drain(start.y + 1..=end.y).collect();
        let first = &mut self.lines[start.y];
        let mut erased = first.split_off(start.x);
        for line in removed {
            erased.push('\n');
            erased.push_str(&line);
        }
        first.push_str(&tail);

        if cursor.y == start.y {
            self.cursor.x = cursor.x.min(start.x);
        } else if cursor.y < end.y && cursor.y > start.y {
            self.cursor = start;
        } else if cursor.y == end.y {
            let x = if cursor.x < end.x { start.x } else { start.x + cursor.x - end.x };
            self.cursor = Position::new(x, start.y);
        } else if cursor.y > end.y {
            self.cursor.y -= end.y - start.y;
        }
        erased
    }

    /// Erase up to `amt` clusters before the cursor. Returns the units erased.
    pub fn erase_chars_before_cursor(&mut self, amt: usize, traverse_breaks: bool) -> usize {
        let before = self.cursor;
        let moved = self.move_left(amt, traverse_breaks);
        if moved > 0 {
            self.erase_range(self.cursor, before);
        }
        moved
    }

    /// Erase up to `amt` clusters after the cursor. Returns the units erased.
    pub fn erase_chars_after_cursor(&mut self, amt: usize, traverse_breaks: bool) -> usize {
        let before = self.cursor;
        let moved = self.move_right(amt, traverse_breaks);
        if moved > 0 {
            self.erase_range(before, self.cursor);
        }
        moved
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Start of the cluster containing byte `x` of `line`, or `x` itself when it
/// already sits on a cluster boundary.
fn cluster_floor(line: &str, x: usize) -> usize {
    let mut boundary = 0;
    for cell in cells(line) {
        if boundary + cell.len() > x {
            break;
        }
        boundary += cell.len();
    }
    boundary
}
