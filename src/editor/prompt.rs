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

use crate::term::cells::visible_width;
use crossterm::style::Stylize;

/// Introducer of the semantic prompt-marking OSC sequence.
pub const PROMPT_MARK: &str = "\x1b]133;";
/// String terminator closing an OSC sequence.
pub const ST: &str = "\x1b\\";

/// Prompt text as written to the screen, with its width in cells.
///
/// Session markers are escape sequences and so add nothing to `length`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    pub length: usize,
}

impl Prompt {
    pub fn new(text: &str, is_secondary: bool, mark: bool) -> Self {
        let text = if mark {
            let kind = if is_secondary { ";k=s" } else { "" };
            format!("{PROMPT_MARK}A{kind}{ST}{text}")
        } else {
            text.to_owned()
        };
        let length = visible_width(&text);
        Self { text, length }
    }
}

/// Primary prompt for the first logical line, continuation for the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompts {
    pub primary: Prompt,
    pub continuation: Prompt,
}

impl Prompts {
    #[must_use]
    pub fn for_line(&self, line_number: usize) -> &Prompt {
        if line_number == 0 { &self.primary } else { &self.continuation }
    }
}

/// Marker written once the accepted input is handed over and command
/// output begins.
pub fn mark_output_start() -> String {
    format!("{PROMPT_MARK}C{ST}")
}

/// Marker opening a screen row that continues a wrapped prompt line.
pub fn continuation_mark() -> String {
    format!("{PROMPT_MARK}A;k=s{ST}")
}

pub fn default_continuation_prompt() -> String {
    format!("{} ", ">".yellow())
}
