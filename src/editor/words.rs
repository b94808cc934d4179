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

//! Word boundaries over display clusters.

use super::buffer::TextBuffer;
use crate::term::cells::cells;

/// Which clusters count as part of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    /// Letters and digits; punctuation and spaces separate words.
    Alphanumeric,
    /// Anything but whitespace; only spaces separate words.
    NonSpace,
}

impl WordClass {
    #[must_use]
    pub fn contains(self, cluster: &str) -> bool {
        match self {
            Self::Alphanumeric => is_word_char(cluster),
            Self::NonSpace => has_non_space(cluster),
        }
    }
}

pub fn is_word_char(cluster: &str) -> bool {
    cluster.chars().any(char::is_alphanumeric)
}

pub fn has_non_space(cluster: &str) -> bool {
    !cluster.chars().any(char::is_whitespace)
}

impl TextBuffer {
    /// Move forward past the end of up to `amt` words and return how many
    /// boundaries were crossed.
    ///
    /// Leaving a word counts once; reaching the end of a line counts once
    /// when the cursor actually moved to get there. An empty line is walked
    /// across without counting. If nothing was counted the cursor stays put.
    pub fn move_to_end_of_word(
        &mut self,
        amt: usize,
        traverse_breaks: bool,
        class: WordClass,
    ) -> usize {
        let before = self.cursor;
        let mut remaining = amt;
        let mut moved = 0;
        while remaining > 0 {
            let start = self.cursor.x;
            let line = &self.lines[self.cursor.y];
            let mut in_word = false;
            let mut scanned = 0;
            for cluster in cells(&line[start..]) {
                let boundary = scanned;
                scanned += cluster.len();
                if class.contains(cluster) {
                    in_word = true;
                } else if in_word {
                    self.cursor.x = start + boundary;
                    remaining -= 1;
                    moved += 1;
                    if remaining == 0 {
                        return moved;
                    }
                    in_word = false;
                }
            }
            if self.move_to_end_of_line() {
                remaining -= 1;
                moved += 1;
            }
            if remaining == 0 || !traverse_breaks || self.cursor.y + 1 == self.lines.len() {
                break;
            }
            self.cursor.y += 1;
            self.cursor.x = 0;
        }
        if moved == 0 {
            self.cursor = before;
        }
        moved
    }

    /// Backward counterpart of [`move_to_end_of_word`](Self::move_to_end_of_word):
    /// stops at word starts and at the start of lines.
    pub fn move_to_start_of_word(
        &mut self,
        amt: usize,
        traverse_breaks: bool,
        class: WordClass,
    ) -> usize {
        let before = self.cursor;
        let mut remaining = amt;
        let mut moved = 0;
        while remaining > 0 {
            let start = self.cursor.x;
            let line = &self.lines[self.cursor.y];
            let mut in_word = false;
            let mut scanned = 0;
            for cluster in cells(&line[..start]).rev() {
                let boundary = scanned;
                scanned += cluster.len();
                if class.contains(cluster) {
                    in_word = true;
                } else if in_word {
                    self.cursor.x = start - boundary;
                    remaining -= 1;
                    moved += 1;
                    if remaining == 0 {
                        return moved;
                    }
                    in_word = false;
                }
            }
            if self.move_to_start_of_line() {
                remaining -= 1;
                moved += 1;
            }
            if remaining == 0 || !traverse_breaks || self.cursor.y == 0 {
                break;
            }
            self.cursor.y -= 1;
            self.cursor.x = self.lines[self.cursor.y].len();
        }
        if moved == 0 {
            self.cursor = before;
        }
        moved
    }
}
