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

use super::terminal::Terminal;
use crate::editor::ScreenLine;
use crate::editor::prompt::continuation_mark;
use crossterm::{Command, cursor, terminal};
use std::io;

/// Below this width there is no room to draw anything meaningful.
pub const MIN_DRAW_WIDTH: usize = 4;

/// Callback colouring one screen row: `(text, offset_in_line, line_number)`.
pub type Highlighter = dyn Fn(&str, usize, usize) -> String;

/// Append the ANSI form of `command` to `buf`.
pub(crate) fn queue_ansi(buf: &mut String, command: impl Command) {
    // Formatting into a String cannot fail.
    let _ = command.write_ansi(buf);
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

pub struct DrawParams<'a> {
    pub width: usize,
    /// Row of the cursor, relative to the first row, after the previous draw.
    pub previous_cursor_row: usize,
    pub mark_prompts: bool,
    pub highlighter: Option<&'a Highlighter>,
}

/// Redraw `rows` in place of the previous draw and park the terminal cursor
/// on the cursor cell. Returns the cursor row relative to the first row.
///
/// Everything is written in a single call so it can sit inside one atomic
/// update.
pub fn draw<T: Terminal + ?Sized>(
    term: &mut T,
    rows: &[ScreenLine<'_>],
    params: &DrawParams<'_>,
) -> io::Result<usize> {
    if params.width < MIN_DRAW_WIDTH {
        return Ok(params.previous_cursor_row);
    }
    let mut buf = String::new();
    if params.previous_cursor_row > 0 {
        queue_ansi(&mut buf, cursor::MoveUp(to_u16(params.previous_cursor_row)));
    }
    buf.push('\r');
    queue_ansi(&mut buf, terminal::Clear(terminal::ClearType::FromCursorDown));
    queue_ansi(&mut buf, terminal::DisableLineWrap);

    let mut cursor_x = 0;
    let mut cursor_row = 0;
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            buf.push_str("\r\n");
        }
        if row.after_line_break {
            if let Some(prompt) = row.prompt {
                buf.push_str(&prompt.text);
            }
        } else if params.mark_prompts {
            buf.push_str(&continuation_mark());
        }
        match params.highlighter {
            Some(highlight) => {
                let text = highlight(row.text, row.offset_in_parent_line, row.parent_line_number);
                buf.push_str(&text);
            }
            None => buf.push_str(row.text),
        }
        if let Some(cell) = row.cursor_cell {
            cursor_x = cell;
            cursor_row = i;
        }
    }

    queue_ansi(&mut buf, terminal::EnableLineWrap);
    let rows_below_cursor = rows.len().saturating_sub(cursor_row + 1);
    if rows_below_cursor > 0 {
        queue_ansi(&mut buf, cursor::MoveUp(to_u16(rows_below_cursor)));
    }
    queue_ansi(&mut buf, cursor::MoveToColumn(to_u16(cursor_x)));
    term.write(&buf)?;
    Ok(cursor_row)
}
