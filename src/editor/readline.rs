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

use super::actions::{Action, ChainState, Outcome};
use super::buffer::TextBuffer;
use super::keys::{KeyResolution, KeyboardState};
use super::kill_ring::KillRing;
use super::position::{Position, YankExtent};
use super::prompt::{Prompt, Prompts, default_continuation_prompt, mark_output_start};
use super::screen::{self, ScreenLine};
use super::words::WordClass;
use crate::error::ReadlineError;
use crate::term::render::{self, DrawParams, Highlighter, queue_ansi};
use crate::term::terminal::{AtomicUpdate, Terminal};
use crossterm::cursor;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, KeyEvent};

/// Upper bound on the bytes a single repeated insert may add.
const MAX_INSERT_BYTES: usize = 16 * 1024 * 1024;

/// Editor configuration, consumed by [`build`](Self::build).
pub struct ReadlineBuilder {
    prompt: String,
    continuation_prompt: Option<String>,
    empty_continuation_prompt: bool,
    mark_prompts: bool,
    highlighter: Option<Box<Highlighter>>,
}

impl Default for ReadlineBuilder {
    fn default() -> Self {
        Self {
            prompt: "> ".to_owned(),
            continuation_prompt: None,
            empty_continuation_prompt: false,
            mark_prompts: true,
            highlighter: None,
        }
    }
}

impl ReadlineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn continuation_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.continuation_prompt = Some(prompt.into());
        self
    }

    /// Draw continuation lines with no prompt at all instead of the default.
    pub fn empty_continuation_prompt(mut self, empty: bool) -> Self {
        self.empty_continuation_prompt = empty;
        self
    }

    /// Wrap prompts in semantic prompt markers (on by default).
    pub fn mark_prompts(mut self, mark: bool) -> Self {
        self.mark_prompts = mark;
        self
    }

    pub fn highlighter(
        mut self,
        highlight: impl Fn(&str, usize, usize) -> String + 'static,
    ) -> Self {
        self.highlighter = Some(Box::new(highlight));
        self
    }

    pub fn build<T: Terminal>(self, terminal: T) -> Readline<T> {
        let continuation = match self.continuation_prompt {
            Some(text) if !text.is_empty() => text,
            _ if self.empty_continuation_prompt => String::new(),
            _ => default_continuation_prompt(),
        };
        let prompts = Prompts {
            primary: Prompt::new(&self.prompt, false, self.mark_prompts),
            continuation: Prompt::new(&continuation, true, self.mark_prompts),
        };
        Readline {
            prompts,
            mark_prompts: self.mark_prompts,
            terminal,
            buffer: TextBuffer::new(),
            kill_ring: KillRing::new(),
            cursor_row: 0,
            screen_width: 0,
            last_yank_extent: YankExtent::default(),
            paste_buffer: String::new(),
            last_action: Action::Nil,
            chain: ChainState::Idle,
            keyboard: KeyboardState::default(),
            pending_insert_text: String::new(),
            highlighter: self.highlighter,
        }
    }
}

/// Multi-line line editor driving one [`Terminal`].
///
/// Feed it key events, text or raw actions; it edits its buffer, redraws and
/// reports an [`Outcome`] for each call.
pub struct Readline<T: Terminal> {
    prompts: Prompts,
    mark_prompts: bool,
    terminal: T,
    buffer: TextBuffer,
    kill_ring: KillRing,
    /// Cursor row (relative to the first row) left by the last draw.
    cursor_row: usize,
    /// Zero until measured; reset when the terminal is resized.
    screen_width: usize,
    last_yank_extent: YankExtent,
    paste_buffer: String,
    last_action: Action,
    chain: ChainState,
    keyboard: KeyboardState,
    pending_insert_text: String,
    highlighter: Option<Box<Highlighter>>,
}

impl<T: Terminal> Readline<T> {
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn kill_ring(&self) -> &KillRing {
        &self.kill_ring
    }

    pub fn last_action(&self) -> Action {
        self.last_action
    }

    pub fn chain_state(&self) -> ChainState {
        self.chain
    }

    pub fn last_yank_extent(&self) -> YankExtent {
        self.last_yank_extent
    }

    pub fn prompts(&self) -> &Prompts {
        &self.prompts
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn all_text(&self) -> String {
        self.buffer.text()
    }

    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
    }

    pub fn set_prompt(&mut self, text: &str) {
        self.prompts.primary = Prompt::new(text, false, self.mark_prompts);
    }

    /// Start a fresh input. The kill ring survives.
    pub fn reset_text(&mut self) {
        tracing::debug!("resetting input");
        self.buffer.clear();
        self.last_action = Action::Nil;
        self.chain = ChainState::Idle;
        self.keyboard.reset();
        self.cursor_row = 0;
    }

    /// Begin an editing session: bar cursor, bracketed paste, first draw.
    pub fn start(&mut self) -> Result<(), ReadlineError> {
        let mut seq = String::new();
        queue_ansi(&mut seq, cursor::SetCursorStyle::SteadyBar);
        queue_ansi(&mut seq, EnableBracketedPaste);
        self.terminal.write(&seq)?;
        self.redraw()
    }

    /// Finish an editing session, leaving the terminal cursor below the input.
    pub fn end(&mut self) -> Result<(), ReadlineError> {
        let mut seq = self.move_below_input()?;
        queue_ansi(&mut seq, cursor::SetCursorStyle::DefaultUserShape);
        queue_ansi(&mut seq, DisableBracketedPaste);
        seq.push_str("\r\n");
        if self.mark_prompts {
            seq.push_str(&mark_output_start());
        }
        self.terminal.write(&seq)?;
        self.cursor_row = 0;
        Ok(())
    }

    /// Sequence taking the terminal cursor from the cursor row to the last
    /// row of the input.
    fn move_below_input(&mut self) -> Result<String, ReadlineError> {
        self.ensure_screen_width()?;
        let rows = screen::project(
            self.buffer.lines(),
            self.buffer.cursor(),
            &self.prompts,
            self.screen_width,
        );
        let rows_below = rows.len().saturating_sub(screen::cursor_row(&rows) + 1);
        let mut seq = String::new();
        if rows_below > 0 {
            queue_ansi(&mut seq, cursor::MoveDown(u16::try_from(rows_below).unwrap_or(u16::MAX)));
        }
        Ok(seq)
    }

    /// The terminal changed size; forget the known width and redraw.
    pub fn on_resize(&mut self) -> Result<(), ReadlineError> {
        tracing::debug!(old_width = self.screen_width, "terminal resized");
        self.screen_width = 0;
        self.redraw()
    }

    /// Wrapped screen rows for the current buffer and screen width.
    pub fn screen_lines(&mut self) -> Result<Vec<ScreenLine<'_>>, ReadlineError> {
        self.ensure_screen_width()?;
        Ok(screen::project(
            self.buffer.lines(),
            self.buffer.cursor(),
            &self.prompts,
            self.screen_width,
        ))
    }

    pub fn redraw(&mut self) -> Result<(), ReadlineError> {
        self.draw(false)
    }

    fn draw(&mut self, clear_first: bool) -> Result<(), ReadlineError> {
        self.ensure_screen_width()?;
        let rows = screen::project(
            self.buffer.lines(),
            self.buffer.cursor(),
            &self.prompts,
            self.screen_width,
        );
        let mut previous_cursor_row = self.cursor_row;
        let mut term = AtomicUpdate::begin(&mut self.terminal)?;
        if clear_first {
            term.clear_screen()?;
            previous_cursor_row = 0;
        }
        let params = DrawParams {
            width: self.screen_width,
            previous_cursor_row,
            mark_prompts: self.mark_prompts,
            highlighter: self.highlighter.as_deref(),
        };
        self.cursor_row = render::draw(&mut *term, &rows, &params)?;
        Ok(())
    }

    fn ensure_screen_width(&mut self) -> Result<(), ReadlineError> {
        if self.screen_width == 0 {
            self.screen_width = self.terminal.screen_width()?;
            tracing::debug!(width = self.screen_width, "measured screen width");
        }
        Ok(())
    }

    /// Handle one key event: resolve it through the default keymap and
    /// dispatch the result, ringing the bell when nothing could be done.
    pub fn on_key_event(&mut self, key: KeyEvent) -> Result<Outcome, ReadlineError> {
        match self.keyboard.resolve(key) {
            KeyResolution::Action { action, repeat } => self.dispatch_with_bell(action, repeat),
            KeyResolution::Text { text, repeat } => {
                self.pending_insert_text = text;
                self.dispatch_with_bell(Action::AddText, repeat)
            }
            KeyResolution::Pending | KeyResolution::Ignored => Ok(Outcome::Handled),
            KeyResolution::Unbound => Ok(Outcome::Unhandled),
        }
    }

    /// Handle incoming text. Text inside a bracketed paste is collected until
    /// the paste ends and then inserted as a whole.
    pub fn on_text(
        &mut self,
        text: &str,
        in_bracketed_paste: bool,
    ) -> Result<Outcome, ReadlineError> {
        if in_bracketed_paste {
            self.paste_buffer.push_str(text);
            return Ok(Outcome::Handled);
        }
        let mut staged = std::mem::take(&mut self.paste_buffer);
        staged.push_str(text);
        self.pending_insert_text = staged;
        self.perform_action(Action::AddText, 1)
    }

    fn dispatch_with_bell(
        &mut self,
        action: Action,
        repeat: usize,
    ) -> Result<Outcome, ReadlineError> {
        let outcome = self.perform_action(action, repeat)?;
        if outcome == Outcome::CouldNotPerform {
            self.terminal.beep()?;
        }
        Ok(outcome)
    }

    /// Apply `action` `repeat` times (where repetition makes sense) and
    /// redraw if anything changed.
    pub fn perform_action(
        &mut self,
        action: Action,
        repeat: usize,
    ) -> Result<Outcome, ReadlineError> {
        let (outcome, record) = self.apply(action, repeat)?;
        tracing::trace!(?action, repeat, ?outcome, "performed action");
        if outcome == Outcome::Handled {
            if record {
                self.last_action = action;
                self.chain = ChainState::after(action);
            }
            if action != Action::ClearScreen {
                self.redraw()?;
            }
        }
        Ok(outcome)
    }

    fn apply(&mut self, action: Action, repeat: usize) -> Result<(Outcome, bool), ReadlineError> {
        let rows = isize::try_from(repeat).unwrap_or(isize::MAX);
        let performed = match action {
            Action::Backspace => self.buffer.erase_chars_before_cursor(repeat, true) > 0,
            Action::Delete => self.buffer.erase_chars_after_cursor(repeat, true) > 0,
            Action::CursorLeft => self.buffer.move_left(repeat, true) > 0,
            Action::CursorRight => self.buffer.move_right(repeat, true) > 0,
            Action::CursorUp => self.move_vertically(-rows)?,
            Action::CursorDown => self.move_vertically(rows)?,
            Action::KillToEndOfLine => self.kill_to_end_of_line(),
            Action::KillToStartOfLine => self.kill_to_start_of_line(),
            Action::KillNextWord => self.kill_next_word(repeat) > 0,
            Action::KillPreviousWord => {
                self.kill_previous_word(repeat, WordClass::Alphanumeric) > 0
            }
            Action::KillPreviousSpaceDelimitedWord => {
                self.kill_previous_word(repeat, WordClass::NonSpace) > 0
            }
            Action::Yank => self.yank(false),
            Action::PopYank => self.yank(true),
            Action::AddText => {
                let text = std::mem::take(&mut self.pending_insert_text);
                match text.len().checked_mul(repeat) {
                    Some(total) if total <= MAX_INSERT_BYTES => {
                        self.buffer.insert(&text.repeat(repeat));
                        true
                    }
                    _ => {
                        tracing::debug!(len = text.len(), repeat, "refusing oversized insert");
                        false
                    }
                }
            }
            Action::AcceptInput => return Ok((Outcome::Accepted, false)),
            Action::EndInput => {
                if self.buffer.current_line().is_empty() {
                    return Ok((Outcome::EndOfStream, false));
                }
                return Ok((Outcome::Accepted, false));
            }
            Action::AbortCurrentLine => {
                let mut seq = self.move_below_input()?;
                seq.push_str("\r\n");
                self.terminal.write(&seq)?;
                self.reset_text();
                return Ok((Outcome::Handled, false));
            }
            Action::ClearScreen => {
                self.draw(true)?;
                return Ok((Outcome::Handled, false));
            }
            Action::Nil => false,
        };
        let outcome = if performed { Outcome::Handled } else { Outcome::CouldNotPerform };
        Ok((outcome, true))
    }

    /// Move the cursor `amt` screen rows (negative is up). Returns whether it moved.
    fn move_vertically(&mut self, amt: isize) -> Result<bool, ReadlineError> {
        self.ensure_screen_width()?;
        let rows = screen::project(
            self.buffer.lines(),
            self.buffer.cursor(),
            &self.prompts,
            self.screen_width,
        );
        let Some(target) = screen::vertical_target(&rows, amt) else {
            return Ok(false);
        };
        self.buffer.place_cursor(target);
        Ok(true)
    }

    fn kill_text(&mut self, text: &str) {
        if self.chain == ChainState::InKillRun {
            tracing::debug!(len = text.len(), "appending to current kill");
            self.kill_ring.append_front(text);
        } else {
            self.kill_ring.push_front(text);
        }
    }

    fn kill_to_end_of_line(&mut self) -> bool {
        let Position { x, y } = self.buffer.cursor;
        if x >= self.buffer.lines[y].len() {
            return false;
        }
        let killed = self.buffer.lines[y].split_off(x);
        self.kill_text(&killed);
        true
    }

    fn kill_to_start_of_line(&mut self) -> bool {
        let Position { x, y } = self.buffer.cursor;
        if x == 0 {
            return false;
        }
        let killed: String = self.buffer.lines[y].drain(..x).collect();
        self.buffer.cursor.x = 0;
        self.kill_text(&killed);
        true
    }

    fn kill_next_word(&mut self, amt: usize) -> usize {
        let before = self.buffer.cursor;
        let killed = self.buffer.move_to_end_of_word(amt, true, WordClass::Alphanumeric);
        if killed > 0 {
            let text = self.buffer.erase_range(before, self.buffer.cursor);
            self.kill_text(&text);
        }
        killed
    }

    fn kill_previous_word(&mut self, amt: usize, class: WordClass) -> usize {
        let before = self.buffer.cursor;
        let killed = self.buffer.move_to_start_of_word(amt, true, class);
        if killed > 0 {
            let text = self.buffer.erase_range(self.buffer.cursor, before);
            self.kill_text(&text);
        }
        killed
    }

    /// Insert the front of the kill ring, or with `pop`, swap the text the
    /// previous yank inserted for the next ring entry.
    fn yank(&mut self, pop: bool) -> bool {
        if pop && self.chain != ChainState::JustYanked {
            return false;
        }
        let text = if pop { self.kill_ring.rotate_and_peek() } else { self.kill_ring.peek_front() };
        if text.is_empty() {
            return false;
        }
        let text = text.to_owned();

        if pop {
            // The extent predates any edits since; keep it inside the buffer.
            let start = self.buffer.clamp(self.last_yank_extent.start);
            let end = self.buffer.clamp(self.last_yank_extent.end);
            self.buffer.erase_range(start, end);
            self.buffer.place_cursor(start.min(end));
        }
        let before = self.buffer.cursor;
        self.buffer.insert(&text);
        self.last_yank_extent = YankExtent { start: before, end: self.buffer.cursor };
        tracing::debug!(extent = ?self.last_yank_extent, pop, "yanked");
        true
    }
}
