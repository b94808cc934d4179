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

//! Default emacs-style key bindings on top of crossterm key events.

use super::actions::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key event resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResolution {
    Action { action: Action, repeat: usize },
    Text { text: String, repeat: usize },
    /// Consumed as part of a numeric argument; wait for the next key.
    Pending,
    /// No binding.
    Unbound,
    /// Key releases and other events the editor does not react to.
    Ignored,
}

/// Largest repeat count a numeric argument can reach.
pub const MAX_NUMERIC_ARG: usize = 10_000;

/// Keyboard sub-state carried between key events: the numeric argument
/// typed with Alt+digit, applied as the repeat count of the next action.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KeyboardState {
    numeric_arg: Option<usize>,
}

impl KeyboardState {
    fn push_digit(&mut self, digit: usize) {
        let next = self.numeric_arg.unwrap_or(0).saturating_mul(10).saturating_add(digit);
        self.numeric_arg = Some(next.min(MAX_NUMERIC_ARG));
    }

    fn take_repeat(&mut self) -> usize {
        self.numeric_arg.take().unwrap_or(1).max(1)
    }

    #[must_use]
    pub fn pending_count(&self) -> Option<usize> {
        self.numeric_arg
    }

    pub fn reset(&mut self) {
        self.numeric_arg = None;
    }

    pub fn resolve(&mut self, key: KeyEvent) -> KeyResolution {
        if key.kind == KeyEventKind::Release {
            return KeyResolution::Ignored;
        }
        if key.modifiers == KeyModifiers::ALT
            && let KeyCode::Char(c) = key.code
            && let Some(digit) = c.to_digit(10)
        {
            self.push_digit(digit as usize);
            return KeyResolution::Pending;
        }

        if let Some(action) = default_action(key) {
            return KeyResolution::Action { action, repeat: self.take_repeat() };
        }
        if let Some(text) = literal_text(key) {
            return KeyResolution::Text { text, repeat: self.take_repeat() };
        }
        self.reset();
        KeyResolution::Unbound
    }
}

fn is_ctrl_char(key: KeyEvent, expected: char) -> bool {
    key.modifiers == KeyModifiers::CONTROL
        && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&expected))
}

fn is_alt_char(key: KeyEvent, expected: char) -> bool {
    key.modifiers == KeyModifiers::ALT
        && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&expected))
}

#[inline]
fn is_printable_text_modifiers(modifiers: KeyModifiers) -> bool {
    let ctrl_alt =
        modifiers.contains(KeyModifiers::CONTROL) && modifiers.contains(KeyModifiers::ALT);
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) || ctrl_alt
}

/// The action bound to `key` in the default keymap.
pub fn default_action(key: KeyEvent) -> Option<Action> {
    let ctrl_bindings = [
        ('b', Action::CursorLeft),
        ('f', Action::CursorRight),
        ('p', Action::CursorUp),
        ('n', Action::CursorDown),
        ('h', Action::Backspace),
        ('d', Action::EndInput),
        ('k', Action::KillToEndOfLine),
        ('u', Action::KillToStartOfLine),
        ('w', Action::KillPreviousSpaceDelimitedWord),
        ('y', Action::Yank),
        ('c', Action::AbortCurrentLine),
        ('l', Action::ClearScreen),
    ];
    if let Some((_, action)) = ctrl_bindings.iter().find(|(c, _)| is_ctrl_char(key, *c)) {
        return Some(*action);
    }
    if is_alt_char(key, 'd') {
        return Some(Action::KillNextWord);
    }
    if is_alt_char(key, 'y') {
        return Some(Action::PopYank);
    }

    let plain = key.modifiers.difference(KeyModifiers::SHIFT).is_empty();
    match key.code {
        KeyCode::Backspace if key.modifiers == KeyModifiers::ALT => Some(Action::KillPreviousWord),
        KeyCode::Backspace if plain => Some(Action::Backspace),
        KeyCode::Delete if plain => Some(Action::Delete),
        KeyCode::Left if plain => Some(Action::CursorLeft),
        KeyCode::Right if plain => Some(Action::CursorRight),
        KeyCode::Up if plain => Some(Action::CursorUp),
        KeyCode::Down if plain => Some(Action::CursorDown),
        KeyCode::Enter if key.modifiers == KeyModifiers::NONE => Some(Action::AcceptInput),
        _ => None,
    }
}

/// Text a key types by itself, if any.
fn literal_text(key: KeyEvent) -> Option<String> {
    match key.code {
        KeyCode::Char(c) if is_printable_text_modifiers(key.modifiers) => Some(c.to_string()),
        KeyCode::Tab if key.modifiers == KeyModifiers::NONE => Some("\t".to_owned()),
        KeyCode::Enter if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) => {
            Some("\n".to_owned())
        }
        _ => None,
    }
}
