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

//! The editing core: buffer, kill ring, word motion, screen projection and
//! the action dispatcher tying them together.

pub mod actions;
pub mod buffer;
pub mod keys;
pub mod kill_ring;
pub mod position;
pub mod prompt;
pub mod readline;
pub mod screen;
pub mod words;

pub use actions::{Action, ChainState, Outcome};
pub use buffer::TextBuffer;
pub use keys::{KeyResolution, KeyboardState};
pub use kill_ring::KillRing;
pub use position::{Position, YankExtent};
pub use prompt::{Prompt, Prompts};
pub use readline::{Readline, ReadlineBuilder};
pub use screen::ScreenLine;
pub use words::WordClass;
