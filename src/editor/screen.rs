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

//! Projection of logical lines onto wrapped screen rows.
//!
//! The projection is a pure function of the buffer, the prompts and the
//! screen width. Nothing here is cached; callers recompute it whenever they
//! need it, so a width change can never leave a stale layout behind.

use super::position::Position;
use super::prompt::{Prompt, Prompts};
use crate::term::cells::{cells, truncate_to_visible_width, truncate_with_width, visible_width};

/// One row of terminal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLine<'a> {
    pub text: &'a str,
    pub parent_line_number: usize,
    /// Byte offset of `text` within its logical line.
    pub offset_in_parent_line: usize,
    /// Only the first row of a logical line carries a prompt.
    pub prompt: Option<&'a Prompt>,
    pub text_width: usize,
    /// Screen column of the cursor if it is on this row.
    pub cursor_cell: Option<usize>,
    /// Byte offset of the cursor within `text` if it is on this row.
    pub cursor_text_pos: Option<usize>,
    pub after_line_break: bool,
}

impl ScreenLine<'_> {
    #[must_use]
    pub fn prompt_length(&self) -> usize {
        self.prompt.map_or(0, |p| p.length)
    }
}

/// Lay out `lines` on a screen `width` cells wide.
///
/// Rows are cut at cluster boundaries; a cluster wider than a whole row gets
/// a row of its own. A cursor sitting exactly at the right edge is shown at
/// the start of the next row, which is an extra empty row when the logical
/// line has no more text. The cursor cell is always below `width`, except
/// that a zero width still reports column 0.
pub fn project<'a>(
    lines: &'a [String],
    cursor: Position,
    prompts: &'a Prompts,
    width: usize,
) -> Vec<ScreenLine<'a>> {
    let mut rows = Vec::with_capacity(lines.len());
    let mut found_cursor = false;

    for (line_number, line) in lines.iter().enumerate() {
        let mut prompt = Some(prompts.for_line(line_number));
        let mut offset = 0;
        let mut first = true;

        while first || offset < line.len() {
            let prompt_length = prompt.map_or(0, |p| p.length);
            let rest = &line[offset..];
            let (mut text, mut text_width) =
                truncate_with_width(rest, width.saturating_sub(prompt_length));
            if text.is_empty() && !rest.is_empty() {
                let len = cells(rest).next().map_or(rest.len(), str::len);
                text = &rest[..len];
                text_width = visible_width(text);
            }

            let mut row = ScreenLine {
                text,
                parent_line_number: line_number,
                offset_in_parent_line: offset,
                prompt,
                text_width,
                cursor_cell: None,
                cursor_text_pos: None,
                after_line_break: first,
            };

            let mut overflow_row = None;
            if !found_cursor
                && line_number == cursor.y
                && offset <= cursor.x
                && cursor.x <= offset + text.len()
            {
                let pos = cursor.x - offset;
                let cell = prompt_length + visible_width(&text[..pos]);
                if cell < width {
                    row.cursor_cell = Some(cell);
                    row.cursor_text_pos = Some(pos);
                    found_cursor = true;
                } else if pos < text.len() {
                    // A prompt at least as wide as the screen pushes the
                    // cursor off the row; pin it to the last column.
                    row.cursor_cell = Some(width.saturating_sub(1));
                    row.cursor_text_pos = Some(pos);
                    found_cursor = true;
                } else if offset + text.len() >= line.len() {
                    overflow_row = Some(ScreenLine {
                        text: "",
                        parent_line_number: line_number,
                        offset_in_parent_line: line.len(),
                        prompt: None,
                        text_width: 0,
                        cursor_cell: Some(0),
                        cursor_text_pos: Some(0),
                        after_line_break: false,
                    });
                    found_cursor = true;
                }
                // Otherwise the next row of this line starts at the cursor.
            }

            rows.push(row);
            rows.extend(overflow_row);
            prompt = None;
            offset += text.len();
            first = false;
        }
    }
    rows
}

/// Index of the row holding the cursor.
pub fn cursor_row(rows: &[ScreenLine<'_>]) -> usize {
    rows.iter().position(|row| row.cursor_cell.is_some()).unwrap_or(0)
}

/// Logical position reached by moving from the cursor row to `target`,
/// keeping the cursor's visual distance past its prompt where the target
/// row is long enough.
pub fn position_on_row(source: &ScreenLine<'_>, target: &ScreenLine<'_>) -> Position {
    let visual_distance =
        source.cursor_cell.unwrap_or(0).saturating_sub(source.prompt_length());
    let prefix = truncate_to_visible_width(target.text, visual_distance);
    Position::new(target.offset_in_parent_line + prefix.len(), target.parent_line_number)
}

/// Where the cursor lands after `amt` rows of vertical motion (negative is
/// up), clamped to the first and last rows. `None` when it cannot move.
pub fn vertical_target(rows: &[ScreenLine<'_>], amt: isize) -> Option<Position> {
    if rows.is_empty() {
        return None;
    }
    let current = cursor_row(rows);
    let target = current.saturating_add_signed(amt).min(rows.len() - 1);
    if target == current {
        return None;
    }
    Some(position_on_row(&rows[current], &rows[target]))
}
