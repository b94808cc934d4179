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

use std::collections::VecDeque;

/// Recently killed text, most recent first.
#[derive(Debug, Default, Clone)]
pub struct KillRing {
    items: VecDeque<String>,
}

impl KillRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend the front entry with `text`, creating it if the ring is empty.
    pub fn append_front(&mut self, text: &str) {
        match self.items.front_mut() {
            Some(front) => front.push_str(text),
            None => self.push_front(text),
        }
    }

    /// Add `text` as a new front entry. Empty text is ignored.
    pub fn push_front(&mut self, text: &str) {
        if !text.is_empty() {
            self.items.push_front(text.to_owned());
        }
    }

    /// The front entry, or `""` when the ring is empty.
    #[must_use]
    pub fn peek_front(&self) -> &str {
        self.items.front().map_or("", String::as_str)
    }

    /// Move the front entry to the back and return the new front.
    ///
    /// With fewer than two entries there is nothing to cycle to and the
    /// result is empty.
    pub fn rotate_and_peek(&mut self) -> &str {
        if self.items.len() < 2 {
            return "";
        }
        self.items.rotate_left(1);
        self.peek_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries from most to least recent.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}
