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

#[derive(Debug, thiserror::Error)]
pub enum ReadlineError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("standard input is not a terminal")]
    NotATerminal,
}

impl ReadlineError {
    pub const IO_EXIT_CODE: i32 = 20;
    pub const NOT_A_TERMINAL_EXIT_CODE: i32 = 21;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => Self::IO_EXIT_CODE,
            Self::NotATerminal => Self::NOT_A_TERMINAL_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Io(_) => "Lost contact with the terminal while editing.",
            Self::NotATerminal => {
                "termline needs an interactive terminal. Run it without redirecting stdin."
            }
        }
    }
}
