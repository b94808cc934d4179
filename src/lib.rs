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

//! Multi-line line editing for terminal command input.
//!
//! [`editor::Readline`] owns the text being edited and draws it through a
//! [`term::Terminal`], wrapping long lines at the screen width and keeping
//! an emacs-style kill ring across inputs.

pub mod editor;
pub mod error;
pub mod term;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "termline", about = "Multi-line line editor for the terminal", version)]
pub struct Cli {
    /// Primary prompt shown before the first line
    #[arg(long, default_value = "> ")]
    pub prompt: String,

    /// Prompt shown before continuation lines
    #[arg(long)]
    pub continuation_prompt: Option<String>,

    /// Show no prompt at all on continuation lines
    #[arg(long, conflicts_with = "continuation_prompt")]
    pub empty_continuation_prompt: bool,

    /// Do not emit semantic prompt markers (OSC 133)
    #[arg(long)]
    pub no_mark_prompts: bool,

    /// Write tracing diagnostics to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<std::path::PathBuf>,

    /// Tracing filter directives (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER", requires = "log_file")]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long, requires = "log_file")]
    pub log_append: bool,
}
