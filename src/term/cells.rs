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

//! Display-cluster primitives shared by the editor and the renderer.
//!
//! A display cluster is one extended grapheme cluster. Escape sequences
//! (prompt markers, highlighter styling) occupy no cells and are never split.

use unicode_segmentation::{Graphemes, UnicodeSegmentation};
use unicode_width::UnicodeWidthStr;

/// Forward/backward iterator over the display clusters of a string.
#[derive(Clone)]
pub struct Cells<'a> {
    inner: Graphemes<'a>,
}

/// Iterate `text` one display cluster at a time.
pub fn cells(text: &str) -> Cells<'_> {
    Cells { inner: text.graphemes(true) }
}

impl<'a> Iterator for Cells<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next()
    }
}

impl DoubleEndedIterator for Cells<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

/// Number of terminal cells a single cluster occupies.
pub fn cluster_width(cluster: &str) -> usize {
    if cluster.chars().all(char::is_control) {
        return 0;
    }
    UnicodeWidthStr::width(cluster)
}

/// Byte length of the escape sequence `text` starts with, if it starts with one.
fn escape_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&0x1b) {
        return None;
    }
    match bytes.get(1) {
        None => Some(1),
        Some(b'[') => {
            let end = bytes[2..].iter().position(|b| (0x40..=0x7e).contains(b));
            Some(end.map_or(bytes.len(), |i| i + 3))
        }
        Some(b']' | b'P' | b'_' | b'^') => {
            // String sequences run until BEL or ST.
            let mut i = 2;
            while i < bytes.len() {
                if bytes[i] == 0x07 {
                    return Some(i + 1);
                }
                if bytes[i] == 0x1b && bytes.get(i + 1) == Some(&b'\\') {
                    return Some(i + 2);
                }
                i += 1;
            }
            Some(bytes.len())
        }
        Some(_) => Some(text[1..].chars().next().map_or(1, |c| 1 + c.len_utf8())),
    }
}

/// Visible width of `text` in terminal cells, ignoring escape sequences.
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut rest = text;
    while !rest.is_empty() {
        if let Some(len) = escape_len(rest) {
            rest = &rest[len..];
            continue;
        }
        let end = rest.find('\x1b').unwrap_or(rest.len());
        width += rest[..end].graphemes(true).map(cluster_width).sum::<usize>();
        rest = &rest[end..];
    }
    width
}

/// Longest prefix of `text` that fits in `max` cells, together with its width.
///
/// Clusters are never split: a wide cluster that would straddle the limit is
/// left out entirely.
pub fn truncate_with_width(text: &str, max: usize) -> (&str, usize) {
    let mut width = 0;
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        if let Some(len) = escape_len(rest) {
            pos += len;
            continue;
        }
        let end = rest.find('\x1b').unwrap_or(rest.len());
        for cluster in rest[..end].graphemes(true) {
            let w = cluster_width(cluster);
            if width + w > max {
                return (&text[..pos], width);
            }
            width += w;
            pos += cluster.len();
        }
    }
    (text, width)
}

/// Longest prefix of `text` that fits in `max` cells.
pub fn truncate_to_visible_width(text: &str, max: usize) -> &str {
    truncate_with_width(text, max).0
}
