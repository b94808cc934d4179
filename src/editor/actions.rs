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

/// Everything the editor can be asked to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Action {
    #[default]
    Nil,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    Backspace,
    Delete,
    // Kill actions: consecutive ones coalesce into one kill-ring entry.
    KillToEndOfLine,
    KillToStartOfLine,
    KillNextWord,
    KillPreviousWord,
    KillPreviousSpaceDelimitedWord,
    Yank,
    PopYank,
    AddText,
    AcceptInput,
    EndInput,
    AbortCurrentLine,
    ClearScreen,
}

impl Action {
    #[must_use]
    pub const fn is_kill(self) -> bool {
        matches!(
            self,
            Self::KillToEndOfLine
                | Self::KillToStartOfLine
                | Self::KillNextWord
                | Self::KillPreviousWord
                | Self::KillPreviousSpaceDelimitedWord
        )
    }

    #[must_use]
    pub const fn is_yank(self) -> bool {
        matches!(self, Self::Yank | Self::PopYank)
    }
}

/// What the last successful action means for the next kill or pop-yank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChainState {
    #[default]
    Idle,
    /// Kills append to the front kill-ring entry.
    InKillRun,
    /// Pop-yank may replace the last yanked span.
    JustYanked,
}

impl ChainState {
    /// State after `action` completed successfully.
    #[must_use]
    pub const fn after(action: Action) -> Self {
        if action.is_kill() {
            Self::InKillRun
        } else if action.is_yank() {
            Self::JustYanked
        } else {
            Self::Idle
        }
    }
}

/// Result of feeding one action or key to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Done; keep editing.
    Handled,
    /// Nothing to do in the current state (cursor at a boundary, empty kill
    /// ring, ...). Non-fatal; hosts ring the bell.
    CouldNotPerform,
    /// The key has no binding and was left for the host.
    Unhandled,
    /// The user accepted the input; read it with `all_text()`.
    Accepted,
    /// End of input requested on an empty line.
    EndOfStream,
}

impl Outcome {
    /// Whether editing of the current input is over.
    #[must_use]
    pub const fn ends_session(self) -> bool {
        matches!(self, Self::Accepted | Self::EndOfStream)
    }
}
